use std::io::{self, Write};
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing::warn;

use crate::config::{Config, ConfigOverrides};
use crate::logging::{self, LogTarget};
use crate::models::Item;
use crate::omnibox::{PopupEvent, PopupHost, Session, TabController, commit, resolve};
use crate::platform::{StdoutTabs, SystemBrowser};
use crate::sources::{BookmarkFileStore, HistoryFileStore, LoadedSources, SourceLoader};
use crate::tui::run_interactive;
use crate::utils::{format_path_with_tilde, get_log_file, strip_ansi_codes};

#[derive(Parser)]
#[command(name = "history-omnibox")]
#[command(version = "0.1.0")]
#[command(about = "Search browser history and bookmarks, then open the result", long_about = None)]
pub struct Cli {
    /// Config file (default: <config dir>/history-omnibox/config.toml)
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// History export to read instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub history: Option<PathBuf>,

    /// Bookmarks file to read instead of the configured one
    #[arg(long, global = true, value_name = "PATH")]
    pub bookmarks: Option<PathBuf>,

    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Open the interactive popup
    Popup {
        /// Url of the current tab, prefilled into the input
        #[arg(long, value_name = "URL")]
        current_url: Option<String>,
    },
    /// Print the suggestions the popup would show for TEXT
    Query {
        text: String,
        /// Print JSON instead of one suggestion per line
        #[arg(long)]
        json: bool,
    },
    /// Print (or open) the url Enter would navigate to
    Resolve {
        typed: String,
        /// Url of the active suggestion
        #[arg(long, value_name = "URL")]
        active_url: Option<String>,
        /// Resolve as if Ctrl were held
        #[arg(long)]
        new_tab: bool,
        /// Open the result in the browser instead of printing it
        #[arg(long)]
        open: bool,
    },
    /// Show statistics about the loaded sources
    Stats,
}

/// Host for commands that have no popup window to close
struct Headless;

impl PopupHost for Headless {
    fn close(&mut self) {}
}

pub fn run() -> Result<()> {
    let cli = Cli::parse();

    let interactive = matches!(cli.command, Some(Commands::Popup { .. }));
    init_logging(interactive);

    let mut config = Config::load(cli.config.as_deref())?;
    config.apply(ConfigOverrides { history_file: cli.history, bookmarks_file: cli.bookmarks });

    match cli.command {
        Some(Commands::Popup { current_url }) => run_popup(&config, current_url)?,
        Some(Commands::Query { text, json }) => run_query(&config, &text, json)?,
        Some(Commands::Resolve { typed, active_url, new_tab, open }) => {
            run_resolve(&config, &typed, active_url.as_deref(), new_tab, open)?
        }
        Some(Commands::Stats) => show_stats(&config)?,
        None => {
            println!("Use --help for usage information");
        }
    }

    Ok(())
}

/// The popup owns the terminal, so it logs to a file; everything else logs to stderr
fn init_logging(interactive: bool) {
    let result = if interactive {
        get_log_file().and_then(|path| logging::init(LogTarget::File(&path)))
    } else {
        logging::init(LogTarget::Stderr)
    };
    if let Err(e) = result {
        eprintln!("Warning: logging disabled: {:#}", e);
    }
}

fn spawn_loader(config: &Config) -> SourceLoader {
    let history = HistoryFileStore::new(config.history_path().unwrap_or_default());
    let bookmarks = BookmarkFileStore::new(config.bookmarks_path().unwrap_or_default());
    SourceLoader::spawn(Box::new(history), Box::new(bookmarks), config.load_options())
}

fn load_sources(config: &Config) -> LoadedSources {
    let loaded = spawn_loader(config).wait();
    if !loaded.is_complete() {
        warn!(missing = ?loaded.missing, "Some sources did not load");
    }
    loaded
}

fn run_popup(config: &Config, current_url: Option<String>) -> Result<()> {
    let tabs = SystemBrowser::from_config(&config.browser, current_url)?;
    let prefill = tabs.active_url();
    let session = Session::new(config.session_options()).with_prefill(prefill.as_deref());
    let loader = spawn_loader(config);

    if let Some(navigation) = run_interactive(session, loader, Box::new(tabs))? {
        let target = if navigation.open_in_new_tab { "new tab" } else { "current tab" };
        println!("Opened {} ({})", navigation.url, target);
    }
    Ok(())
}

/// The suggestions the popup renders for `text` once every source is loaded
pub fn query_suggestions(config: &Config, text: &str) -> Vec<Item> {
    let loaded = load_sources(config);
    let mut session = Session::new(config.session_options());
    session.handle(PopupEvent::SourcesLoaded(loaded.lists));
    session.handle(PopupEvent::Input(text.to_string()));
    session.slots().visible().map(|slot| slot.item.clone()).collect()
}

fn run_query(config: &Config, text: &str, json: bool) -> Result<()> {
    let suggestions = query_suggestions(config, text);

    let stdout = io::stdout();
    let mut out = stdout.lock();
    if json {
        serde_json::to_writer_pretty(&mut out, &suggestions).context("Failed to write JSON")?;
        writeln!(out)?;
    } else {
        for item in &suggestions {
            writeln!(out, "{}\t{}", strip_ansi_codes(&item.title), strip_ansi_codes(&item.url))?;
        }
    }
    Ok(())
}

fn run_resolve(
    config: &Config,
    typed: &str,
    active_url: Option<&str>,
    new_tab: bool,
    open: bool,
) -> Result<()> {
    let navigation = resolve(typed, active_url, new_tab, &config.search);

    let mut tabs: Box<dyn TabController> = if open {
        Box::new(SystemBrowser::from_config(&config.browser, None)?)
    } else {
        Box::new(StdoutTabs::new(io::stdout()))
    };
    commit(&navigation, tabs.as_mut(), &mut Headless)
}

fn describe_path(path: Option<&Path>) -> String {
    match path {
        Some(path) if path.exists() => format_path_with_tilde(path),
        Some(path) => format!("{} (not found)", format_path_with_tilde(path)),
        None => "(unknown)".to_string(),
    }
}

fn show_stats(config: &Config) -> Result<()> {
    let loaded = load_sources(config);
    let lists = &loaded.lists;

    println!("History Omnibox Statistics");
    println!("==========================");
    println!("Total candidates: {}", lists.len());
    println!("  Domains: {}", lists.domains.len());
    println!("  History: {}", lists.history.len());
    println!("  Bookmarks: {}", lists.bookmarks.len());
    println!();
    println!("History file: {}", describe_path(config.history_path().as_deref()));
    println!("Bookmarks file: {}", describe_path(config.bookmarks_path().as_deref()));

    if !loaded.is_complete() {
        let missing: Vec<String> = loaded.missing.iter().map(|kind| kind.to_string()).collect();
        println!("Unavailable: {}", missing.join(", "));
    }

    if let Some(newest) = lists.history.first() {
        println!("Most recent: {}", strip_ansi_codes(&newest.title));
    }

    Ok(())
}
