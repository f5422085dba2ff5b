mod search;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(name = "mandir-cli")]
#[command(about = "Temple discovery from the command line")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search for temples, ranked by distance when an origin is given
    Search {
        /// Origin latitude in degrees
        #[arg(long, requires = "lng", allow_hyphen_values = true)]
        lat: Option<f64>,
        /// Origin longitude in degrees
        #[arg(long, requires = "lat", allow_hyphen_values = true)]
        lng: Option<f64>,
        /// Free-text query, e.g. "shiva"
        #[arg(long)]
        query: Option<String>,
        /// Print normalized places as JSON instead of a table
        #[arg(long)]
        json: bool,
    },
    /// Show full details for one place
    Details {
        /// Provider place identifier
        place_id: String,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let cli = Cli::parse();

    let Some(command) = cli.command else {
        println!("mandir-cli: try `mandir-cli search --help`");
        return Ok(());
    };

    let config = mandir_core::load_app_config()?;
    let env_filter = EnvFilter::try_from_default_env()
        .or_else(|_| EnvFilter::try_new(config.log_level.clone()))?;
    tracing_subscriber::fmt()
        .with_env_filter(env_filter)
        .with_writer(std::io::stderr)
        .init();

    match command {
        Commands::Search {
            lat,
            lng,
            query,
            json,
        } => search::run_search(&config, lat.zip(lng), query.as_deref(), json).await,
        Commands::Details { place_id } => search::run_details(&config, &place_id).await,
    }
}
