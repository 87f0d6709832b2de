use std::fs::File;
use std::path::PathBuf;
use std::sync::Arc;

use atlas::core::config::{self, CliOverrides};
use atlas::core::service::CountryService;
use atlas::countries::RestCountriesSource;
use clap::Parser;
use simplelog::{ConfigBuilder, LevelFilter, WriteLogger};

#[derive(Parser)]
#[command(name = "atlas", about = "Browse the world's countries from your terminal")]
struct Args {
    /// Base URL of the REST Countries API
    #[arg(long)]
    api_url: Option<String>,

    /// Directory for the country cache and saved countries
    #[arg(long)]
    data_dir: Option<PathBuf>,

    /// Request timeout in seconds
    #[arg(long)]
    timeout: Option<u64>,

    /// Log file path
    #[arg(long, default_value = "atlas.log")]
    log_file: PathBuf,
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args = Args::parse();
    dotenv::dotenv().ok();

    let log_config = ConfigBuilder::new().set_time_format_rfc3339().build();

    if let Ok(log_file) = File::create(&args.log_file) {
        let _ = WriteLogger::init(LevelFilter::Debug, log_config, log_file);
    }

    log::info!("atlas starting up");

    let file_config = config::load_config()?;
    let resolved = config::resolve(
        &file_config,
        &CliOverrides {
            base_url: args.api_url,
            timeout_secs: args.timeout,
            data_dir: args.data_dir,
        },
    );
    log::info!(
        "API {} (timeout {:?}), data in {}",
        resolved.base_url,
        resolved.timeout,
        resolved.data_dir.display()
    );

    let source = RestCountriesSource::new(&resolved.base_url, resolved.timeout)?;
    let service = CountryService::open(Arc::new(source), &resolved.data_dir)?;

    atlas::tui::run(Arc::new(service))?;
    Ok(())
}
