use clap::Parser;
use log::warn;
use navmenu::Backend;
use navmenu::core::config::{self, CliOverrides, NavConfig};
use navmenu::persistence;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

#[derive(Parser)]
#[command(name = "navmenu", about = "Editable hierarchical navigation menu")]
struct Args {
    /// Where the menu is loaded from and saved to
    #[arg(short, long, value_enum)]
    backend: Option<Backend>,

    /// Menu service root for the http backend
    #[arg(long)]
    base_url: Option<String>,

    /// Menu file for the file backend
    #[arg(short, long)]
    file: Option<String>,

    /// Log level for navmenu.log (error, warn, info, debug, trace)
    #[arg(long, default_value = "debug")]
    log_level: String,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    // Initialize file logger - writes to navmenu.log in current directory
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    let level = args.log_level.parse().unwrap_or(LevelFilter::Debug);
    if let Ok(log_file) = File::create("navmenu.log") {
        let _ = WriteLogger::init(level, log_config, log_file);
    }

    let file_config = config::load_config().unwrap_or_else(|e| {
        warn!("Ignoring unreadable config: {}", e);
        NavConfig::default()
    });
    let cli = CliOverrides {
        backend: args.backend.map(|b| b.as_str().to_string()),
        base_url: args.base_url,
        file: args.file,
    };
    let resolved = config::resolve(&file_config, &cli);

    log::info!("navmenu starting up with backend: {}", resolved.backend);

    let store = persistence::build_store(&resolved).map_err(std::io::Error::other)?;
    navmenu::tui::run(resolved, store)
}
