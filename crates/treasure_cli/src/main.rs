use std::fs;
use std::io::{self, BufRead, Write as _};
use std::path::{Path, PathBuf};
use std::process;

use clap::Parser;
use treasure_core::{
    CoreError, CoreErrorCode, ItemCatalog, Region, SaveDocument, SaveLayout, editor,
};

#[derive(Debug, Parser)]
#[command(author, version, about)]
struct Cli {
    /// Save file, or a directory to scan for the first .dat file.
    #[arg(value_name = "SAVE.DAT|DIR", default_value = ".")]
    path: PathBuf,
    /// Item name catalog (JSON document with a `treasures` array).
    /// Defaults to english.json next to the save file.
    #[arg(long, value_name = "PATH")]
    catalog: Option<PathBuf>,
    /// Region layout for a different save revision (JSON).
    #[arg(long, value_name = "PATH")]
    layout: Option<PathBuf>,
}

const COMMAND_HELP: &str = "\
write   - Write the modified buffer to the save file.
reload  - Discard unsaved changes and reload catalog and save.
mobile  - Move the mobile hotbar slots to the inventory.
sort    - Sort inventory and hotbar, empties last.
give    - Give the player <id> <amount>.
done    - Exit without writing.";

struct Session {
    catalog: ItemCatalog,
    document: SaveDocument,
}

impl Session {
    fn load(
        save_path: &Path,
        catalog_path: &Path,
        layout: SaveLayout,
    ) -> Result<Self, CoreError> {
        let catalog = ItemCatalog::load(catalog_path)?;
        let document = SaveDocument::open(save_path, layout)?;
        Ok(Self { catalog, document })
    }

    fn print_regions(&self) {
        print_region("Inventory", self.document.inventory(), &self.catalog);
        print_region("Hotbar", self.document.hotbar(), &self.catalog);
    }
}

fn main() {
    let cli = Cli::parse();

    let layout = match cli.layout.as_deref() {
        Some(path) => load_layout(path).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        }),
        None => SaveLayout::classic(),
    };

    let save_path = resolve_save_path(&cli.path).unwrap_or_else(|e| {
        eprintln!("Error: {e}");
        process::exit(1);
    });
    let catalog_path = cli
        .catalog
        .clone()
        .unwrap_or_else(|| default_catalog_path(&save_path));

    let mut session =
        Session::load(&save_path, &catalog_path, layout).unwrap_or_else(|e| {
            eprintln!("Error: {e}");
            process::exit(1);
        });
    println!(
        "Loaded {} ({} catalog entries).",
        save_path.display(),
        session.catalog.len()
    );
    session.print_regions();

    let stdin = io::stdin();
    loop {
        println!();
        println!("{COMMAND_HELP}");
        print!("Choice: ");
        let _ = io::stdout().flush();

        let mut line = String::new();
        match stdin.lock().read_line(&mut line) {
            Ok(0) => break, // EOF behaves like `done`
            Ok(_) => {}
            Err(e) => {
                eprintln!("Error reading input: {e}");
                process::exit(1);
            }
        }

        let mut parts = line.split_whitespace();
        let command = parts.next().unwrap_or("");
        let args: Vec<&str> = parts.collect();

        match command {
            "write" => {
                session.document.persist(&save_path).unwrap_or_else(|e| {
                    eprintln!("Error: {e}");
                    process::exit(1);
                });
                println!("Save file written.");
            }
            "reload" => {
                session = Session::load(&save_path, &catalog_path, layout).unwrap_or_else(
                    |e| {
                        eprintln!("Error: {e}");
                        process::exit(1);
                    },
                );
                println!("Reloaded catalog and save data.");
                session.print_regions();
            }
            "mobile" => {
                let mobile = session.document.layout().mobile;
                let (inventory, hotbar) = session.document.regions_mut();
                match editor::transfer(hotbar, mobile.indices(), inventory) {
                    Ok(moved) => {
                        for entry in &moved {
                            println!(
                                "Moved \"{}\" [{}] x{} to inventory slot {}.",
                                session.catalog.name(entry.item_id),
                                entry.item_id,
                                entry.amount,
                                entry.dest_index
                            );
                        }
                        println!("Moved {} hotbar slot(s) for mobile play.", moved.len());
                    }
                    Err(e) => report_soft_or_exit(&e),
                }
            }
            "sort" => {
                editor::sort(session.document.inventory_mut());
                editor::sort(session.document.hotbar_mut());
                println!("Sorted inventory and hotbar by item id.");
            }
            "give" => match parse_give_args(&args) {
                Some((item_id, amount)) => {
                    match editor::give(session.document.inventory_mut(), item_id, amount) {
                        Ok(index) => println!(
                            "Gave \"{}\" [{}] x{} (inventory slot {}).",
                            session.catalog.name(item_id),
                            item_id,
                            amount,
                            index
                        ),
                        Err(e) => report_soft_or_exit(&e),
                    }
                }
                None => println!("Bad command format, expected: give <id> <amount>"),
            },
            "done" => {
                println!("Exiting without writing.");
                break;
            }
            "" => {}
            _ => println!("Bad command format."),
        }
    }
}

fn print_region(label: &str, region: &Region, catalog: &ItemCatalog) {
    println!(
        "{label}: {} slots, {} empty",
        region.len(),
        region.empty_count()
    );
    for (index, slot) in region.slots().iter().enumerate() {
        if slot.is_empty() {
            continue;
        }
        println!(
            "  [{index:02}] \"{}\" [{}] x{}",
            catalog.name(slot.item_id),
            slot.item_id,
            slot.amount
        );
    }
}

/// Soft failures keep the loop alive; everything else aborts.
fn report_soft_or_exit(error: &CoreError) {
    if error.is_fatal() {
        eprintln!("Error: {error}");
        process::exit(1);
    }
    println!("{}.", capitalize(&error.message));
}

fn capitalize(message: &str) -> String {
    let mut chars = message.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().collect::<String>() + chars.as_str(),
        None => String::new(),
    }
}

fn parse_give_args(args: &[&str]) -> Option<(i16, i16)> {
    let [id, amount] = args else {
        return None;
    };
    Some((id.parse().ok()?, amount.parse().ok()?))
}

fn load_layout(path: &Path) -> Result<SaveLayout, CoreError> {
    let raw = fs::read_to_string(path).map_err(|e| {
        CoreError::new(
            CoreErrorCode::Io,
            format!("failed to read layout {}: {e}", path.display()),
        )
    })?;
    serde_json::from_str(&raw).map_err(|e| {
        CoreError::new(
            CoreErrorCode::MalformedRecord,
            format!("failed to parse layout {}: {e}", path.display()),
        )
    })
}

/// A directory argument means "scan for the save": the first .dat file
/// in name order wins, as the original tool scanned its working
/// directory.
fn resolve_save_path(path: &Path) -> Result<PathBuf, CoreError> {
    if !path.is_dir() {
        return Ok(path.to_path_buf());
    }

    let entries = fs::read_dir(path).map_err(|e| {
        CoreError::new(
            CoreErrorCode::SaveFileMissing,
            format!("failed to scan {}: {e}", path.display()),
        )
    })?;

    let mut candidates: Vec<PathBuf> = entries
        .flatten()
        .map(|entry| entry.path())
        .filter(|candidate| {
            candidate.is_file()
                && candidate
                    .extension()
                    .is_some_and(|ext| ext.eq_ignore_ascii_case("dat"))
        })
        .collect();
    candidates.sort();

    candidates.into_iter().next().ok_or_else(|| {
        CoreError::new(
            CoreErrorCode::SaveFileMissing,
            format!("no .dat save file found under {}", path.display()),
        )
    })
}

fn default_catalog_path(save_path: &Path) -> PathBuf {
    match save_path.parent() {
        Some(parent) => parent.join("english.json"),
        None => PathBuf::from("english.json"),
    }
}
