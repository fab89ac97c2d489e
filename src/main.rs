use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};
use std::fs::File;

use tripdeck::core::{config, profile};

#[derive(Parser)]
#[command(name = "tripdeck", about = "Terminal travel-booking companion")]
struct Args {
    /// Directory the file browser (`o`) lists documents from
    #[arg(short, long)]
    inbox: Option<String>,

    /// Personalization profile file (TOML or JSON)
    #[arg(short, long)]
    profile: Option<String>,
}

#[tokio::main]
async fn main() -> std::io::Result<()> {
    let args = Args::parse();

    // Initialize file logger - writes to tripdeck.log in current directory
    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();
    if let Ok(log_file) = File::create("tripdeck.log") {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("Tripdeck starting up");

    let file_config = config::load_config().map_err(std::io::Error::other)?;
    let resolved = config::resolve(
        &file_config,
        args.inbox.as_deref(),
        args.profile.as_deref(),
    );

    let settings = match &resolved.profile_file {
        Some(path) => profile::load_profile(path).map_err(std::io::Error::other)?,
        None => None,
    };

    tripdeck::tui::run(resolved, settings)
}
