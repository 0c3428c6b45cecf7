use clap::{Parser, Subcommand};
use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;
use webpages_core::{pages_root_from_env_value, CoreConfig, FileKind, PageStore};

#[derive(Parser)]
#[command(name = "webpages")]
#[command(about = "Manage WebPages pages and assets directly on disk")]
struct Cli {
    /// Pages root directory
    #[arg(long, env = "WEBPAGES_ROOT")]
    root: Option<String>,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Subcommand)]
enum Commands {
    /// List pages (or assets)
    List {
        /// List image assets instead of pages
        #[arg(long)]
        assets: bool,
    },
    /// Print a page
    Read {
        /// Page path relative to the root
        path: String,
    },
    /// Create or overwrite a page
    Write {
        /// Page path relative to the root
        path: String,
        /// Read content from this file instead of stdin
        #[arg(long)]
        file: Option<PathBuf>,
    },
    /// Store an image asset
    Upload {
        /// Local image to store
        source: PathBuf,
        /// Target folder under the root
        #[arg(long)]
        folder: Option<String>,
        /// Stored filename (defaults to the source filename)
        #[arg(long)]
        name: Option<String>,
    },
    /// Delete a page (or asset)
    Delete {
        /// Path relative to the root
        path: String,
        /// Delete an image asset instead of a page
        #[arg(long)]
        asset: bool,
    },
}

fn main() {
    let cli = Cli::parse();

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<(), Box<dyn std::error::Error>> {
    let cfg = CoreConfig::new(pages_root_from_env_value(cli.root))?;
    let store = PageStore::new(Arc::new(cfg));

    match cli.command {
        Some(Commands::List { assets }) => {
            let kind = if assets { FileKind::Asset } else { FileKind::Page };
            let files = store.list(kind)?;
            if files.is_empty() {
                println!("No {}s found.", kind);
            } else {
                for file in files {
                    println!(
                        "{}\t{} bytes\t{}",
                        file.path,
                        file.size,
                        file.updated_at.to_rfc3339()
                    );
                }
            }
        }
        Some(Commands::Read { path }) => {
            let page = store.read_text(FileKind::Page, &path)?;
            print!("{}", page.content);
        }
        Some(Commands::Write { path, file }) => {
            let content = match file {
                Some(src) => std::fs::read_to_string(src)?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin().read_to_string(&mut buf)?;
                    buf
                }
            };
            let saved = store.write_text(FileKind::Page, &path, &content)?;
            println!("Saved {}", saved);
        }
        Some(Commands::Upload {
            source,
            folder,
            name,
        }) => {
            let filename = match name {
                Some(name) => name,
                None => source
                    .file_name()
                    .map(|n| n.to_string_lossy().into_owned())
                    .unwrap_or_default(),
            };
            let data = std::fs::read(&source)?;
            let stored = store.upload(folder.as_deref(), &filename, &data)?;
            println!("Stored {} ({})", stored.path, stored.url);
        }
        Some(Commands::Delete { path, asset }) => {
            let kind = if asset { FileKind::Asset } else { FileKind::Page };
            let deleted = store.delete(kind, &path)?;
            println!("Deleted {}", deleted);
        }
        None => {
            println!("Use 'webpages --help' for commands");
        }
    }

    Ok(())
}
