use std::error::Error;
use std::io::Write;
use std::path::PathBuf;
use std::sync::Arc;

use clap::{Parser, Subcommand};
use nextstep_rs::data::{self, Category};
use nextstep_rs::lists::{self, BookmarkEntry, BookmarkList, RecentList};
use nextstep_rs::storage::{JsonFileStore, Storage};
use nextstep_rs::widgets;
use serde_json::json;
use tracing_subscriber::EnvFilter;

#[cfg(feature = "web")]
use nextstep_rs::web;

#[derive(Parser, Debug)]
#[command(name = "nextstep-rs", about = "NextStep Navigator toolkit", version)]
pub struct Cli {
    /// Emit JSON instead of human-readable tables.
    #[arg(long, global = true)]
    json: bool,

    /// Path of the site's key-value store file.
    #[arg(long, global = true, default_value = "nextstep-data.json")]
    store: PathBuf,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Operations on the recently-viewed list.
    #[command(subcommand)]
    Recent(RecentCommand),
    /// Operations on the bookmark list.
    #[command(subcommand)]
    Bookmark(BookmarkCommand),
    /// Inspect the personalized site content.
    #[command(subcommand)]
    Content(ContentCommand),
    /// Increment the simulated visit counter and print it.
    Counter,
    /// Print a live clock, once per second, until interrupted.
    Clock,
    /// Serve the site over HTTP.
    #[cfg(feature = "web")]
    Serve {
        /// Address to bind.
        #[arg(long, default_value = "127.0.0.1:8080")]
        addr: std::net::SocketAddr,
        /// Directory holding `partials/` and `data/`.
        #[arg(long, default_value = ".")]
        site_root: PathBuf,
        /// Public base URL of the site.
        #[arg(long, default_value = "http://127.0.0.1:8080")]
        base_url: String,
    },
}

#[derive(Subcommand, Debug)]
enum RecentCommand {
    /// Show the recently-viewed list.
    List,
    /// Record a visit.
    Add {
        /// Display label of the visited item.
        label: String,
        /// Link target; defaults to a placeholder.
        #[arg(default_value = "#")]
        href: String,
    },
}

#[derive(Subcommand, Debug)]
enum BookmarkCommand {
    /// Show saved bookmarks.
    List,
    /// Save the entry, or remove it when already saved.
    Toggle {
        /// Unique bookmark id.
        id: String,
        #[arg(long)]
        label: Option<String>,
        #[arg(long)]
        href: Option<String>,
    },
    /// Write bookmarks as a numbered text file.
    Export {
        /// Output path; defaults to the export's own file name.
        #[arg(long)]
        out: Option<PathBuf>,
    },
    /// Remove every bookmark.
    Clear,
}

#[derive(Subcommand, Debug)]
enum ContentCommand {
    /// Show the tailored menu tiles for a category.
    Menu {
        #[arg(long)]
        category: Option<String>,
    },
    /// Show the recommendation cards for a category.
    Recommendations {
        #[arg(long)]
        category: Option<String>,
    },
    /// Preview the greeting for a visitor.
    Greet {
        #[arg(long)]
        name: String,
        #[arg(long)]
        category: Option<String>,
    },
}

pub fn run() -> Result<(), Box<dyn Error>> {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .try_init();
    let cli = Cli::parse();
    let storage: Arc<dyn Storage> = Arc::new(JsonFileStore::open(&cli.store)?);
    match cli.command {
        Command::Recent(RecentCommand::List) => handle_recent_list(storage, cli.json),
        Command::Recent(RecentCommand::Add { label, href }) => {
            handle_recent_add(storage, label, href, cli.json)
        }
        Command::Bookmark(BookmarkCommand::List) => handle_bookmark_list(storage, cli.json),
        Command::Bookmark(BookmarkCommand::Toggle { id, label, href }) => {
            handle_bookmark_toggle(storage, id, label, href, cli.json)
        }
        Command::Bookmark(BookmarkCommand::Export { out }) => handle_bookmark_export(storage, out),
        Command::Bookmark(BookmarkCommand::Clear) => {
            BookmarkList::new(storage).clear();
            println!("Bookmarks cleared.");
            Ok(())
        }
        Command::Content(ContentCommand::Menu { category }) => {
            handle_content_menu(category, cli.json)
        }
        Command::Content(ContentCommand::Recommendations { category }) => {
            handle_content_recommendations(category, cli.json)
        }
        Command::Content(ContentCommand::Greet { name, category }) => {
            println!("{}", data::greeting(&name, parse_category(category)));
            Ok(())
        }
        Command::Counter => {
            println!("{}", widgets::bump_visit_counter(storage.as_ref()));
            Ok(())
        }
        Command::Clock => widgets::run_clock(|text| {
            print!("\r{text}");
            let _ = std::io::stdout().flush();
        }),
        #[cfg(feature = "web")]
        Command::Serve {
            addr,
            site_root,
            base_url,
        } => {
            let config = web::WebConfig {
                addr,
                site_root,
                base_url,
            };
            let runtime = tokio::runtime::Runtime::new()?;
            runtime.block_on(web::serve(config, storage))?;
            Ok(())
        }
    }
}

fn parse_category(raw: Option<String>) -> Option<Category> {
    raw.and_then(|value| value.parse::<Category>().ok())
}

fn handle_recent_list(storage: Arc<dyn Storage>, as_json: bool) -> Result<(), Box<dyn Error>> {
    let entries = RecentList::new(storage).read();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("Nothing viewed yet.");
        return Ok(());
    }
    let now = lists::now_ms();
    let width = column_width(entries.iter().map(|entry| entry.label.len()), "LABEL");
    println!("{:<width$}  {:<24}  {}", "LABEL", "HREF", "AGE", width = width);
    println!("{:-<width$}  {:-<24}  {}", "", "", "---", width = width);
    for entry in &entries {
        println!(
            "{:<width$}  {:<24}  {}",
            entry.label,
            entry.href,
            lists::time_ago(entry.ts, now),
            width = width
        );
    }
    Ok(())
}

fn handle_recent_add(
    storage: Arc<dyn Storage>,
    label: String,
    href: String,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let state = RecentList::new(storage).push(&label, &href);
    if as_json {
        println!("{}", serde_json::to_string_pretty(&state)?);
    } else {
        println!("Recorded. {} item(s) in the list.", state.len());
    }
    Ok(())
}

fn handle_bookmark_list(storage: Arc<dyn Storage>, as_json: bool) -> Result<(), Box<dyn Error>> {
    let entries = BookmarkList::new(storage).read();
    if as_json {
        println!("{}", serde_json::to_string_pretty(&entries)?);
        return Ok(());
    }
    if entries.is_empty() {
        println!("No bookmarks yet.");
        return Ok(());
    }
    let width = column_width(entries.iter().map(|entry| entry.id.len()), "ID");
    println!("{:<width$}  {:<28}  {}", "ID", "LABEL", "HREF", width = width);
    println!("{:-<width$}  {:-<28}  {}", "", "", "----", width = width);
    for entry in &entries {
        println!(
            "{:<width$}  {:<28}  {}",
            entry.id,
            entry.label,
            entry.href,
            width = width
        );
    }
    Ok(())
}

fn handle_bookmark_toggle(
    storage: Arc<dyn Storage>,
    id: String,
    label: Option<String>,
    href: Option<String>,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let list = BookmarkList::new(storage);
    let state = list.toggle(&BookmarkEntry {
        href: href.unwrap_or_default(),
        label: label.unwrap_or_default(),
        id: id.clone(),
    });
    let saved = state.iter().any(|entry| entry.id == id);
    if as_json {
        println!(
            "{}",
            serde_json::to_string_pretty(&json!({ "id": id, "saved": saved, "bookmarks": state }))?
        );
    } else if saved {
        println!("Saved \"{id}\". {} bookmark(s).", state.len());
    } else {
        println!("Removed \"{id}\". {} bookmark(s).", state.len());
    }
    Ok(())
}

fn handle_bookmark_export(
    storage: Arc<dyn Storage>,
    out: Option<PathBuf>,
) -> Result<(), Box<dyn Error>> {
    match BookmarkList::new(storage).export() {
        Some(export) => {
            let path = out.unwrap_or_else(|| PathBuf::from(export.filename));
            std::fs::write(&path, &export.body)?;
            println!("Wrote {}.", path.display());
            Ok(())
        }
        None => {
            println!("No bookmarks to export.");
            Ok(())
        }
    }
}

fn handle_content_menu(category: Option<String>, as_json: bool) -> Result<(), Box<dyn Error>> {
    let category = parse_category(category);
    let menu = data::menu_for(category);
    if as_json {
        println!("{}", serde_json::to_string_pretty(menu)?);
        return Ok(());
    }
    println!("Tailored menu ({}):", data::audience_label(category));
    for item in menu {
        println!("- {} [{}] {}", item.title, item.href, item.text);
    }
    Ok(())
}

fn handle_content_recommendations(
    category: Option<String>,
    as_json: bool,
) -> Result<(), Box<dyn Error>> {
    let category = parse_category(category);
    let cards = data::recommendations_for(category);
    if as_json {
        println!("{}", serde_json::to_string_pretty(cards)?);
        return Ok(());
    }
    println!("Recommended ({}):", data::audience_label(category));
    for card in cards {
        println!("- {} ({}) [{}]", card.title, card.meta, card.href);
    }
    Ok(())
}

fn column_width<I>(lengths: I, heading: &str) -> usize
where
    I: Iterator<Item = usize>,
{
    lengths.max().unwrap_or(heading.len()).max(heading.len())
}
