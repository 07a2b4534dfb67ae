use clap::Parser;
use lensmith::console;
use lensmith::core::config;
use simplelog::{ConfigBuilder, WriteLogger};
use std::fs::File;
use std::path::PathBuf;

#[derive(Parser)]
#[command(name = "lensmith", about = "Todo lists driven by lenses and a single reducer")]
struct Args {
    /// Config file (default: ~/.lensmith/config.toml)
    #[arg(short, long)]
    config: Option<PathBuf>,

    /// Log level: off, error, warn, info, debug, trace
    #[arg(long)]
    log_level: Option<String>,

    /// List to watch; repeat for several (default: all)
    #[arg(short, long = "list")]
    lists: Vec<String>,
}

fn main() -> std::io::Result<()> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let loaded = config::load_config(args.config.as_deref())?;
    let resolved = config::resolve(&loaded, args.log_level.as_deref(), &args.lists);

    // Initialize file logger - writes to lensmith.log in current directory by default
    let log_config = ConfigBuilder::new()
        .set_time_format_rfc3339()
        .build();

    if let Ok(log_file) = File::create(&resolved.log_file) {
        let _ = WriteLogger::init(resolved.log_level, log_config, log_file);
    }

    log::info!("Lensmith starting up, watching {:?}", resolved.lists);

    let stdin = std::io::stdin();
    let stdout = std::io::stdout();
    console::run(&resolved, stdin.lock(), stdout.lock())
}
