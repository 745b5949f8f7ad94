mod client;
mod geolocation;
mod render;
mod session;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use crate::client::PlacesApiClient;
use crate::geolocation::{FixedPosition, Unsupported};
use crate::session::SearchSession;

#[derive(Debug, Parser)]
#[command(name = "halal-cli")]
#[command(about = "Find halal meat shops near an address or a point")]
struct Cli {
    /// Base URL of a running halal-server.
    #[arg(
        long,
        global = true,
        env = "HALAL_SERVER_URL",
        default_value = "http://127.0.0.1:3000"
    )]
    server_url: String,

    #[command(subcommand)]
    command: Option<Commands>,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Search around an address, or around `--lat`/`--lng`.
    ///
    /// With neither, the device location is requested.
    Search {
        /// Free-text address, e.g. "Dearborn, MI".
        #[arg(long, conflicts_with_all = ["lat", "lng"])]
        address: Option<String>,

        #[arg(long, requires = "lng", allow_negative_numbers = true)]
        lat: Option<f64>,

        #[arg(long, requires = "lat", allow_negative_numbers = true)]
        lng: Option<f64>,

        /// Search radius in meters (server default 5000).
        #[arg(long)]
        radius: Option<u32>,

        /// Print the raw response envelope as JSON.
        #[arg(long, default_value_t = false)]
        json: bool,
    },
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    match cli.command {
        Some(Commands::Search {
            address,
            lat,
            lng,
            radius,
            json,
        }) => {
            let api = PlacesApiClient::new(&cli.server_url)?;
            tracing::debug!(endpoint = %api.endpoint(), "searching");

            let mut session = SearchSession::new();
            match (address, lat.zip(lng)) {
                (Some(address), _) => session.search_by_address(&api, &address, radius).await,
                (None, Some((lat, lng))) => {
                    let position = FixedPosition::new(lat, lng);
                    session
                        .search_by_current_location(&api, &position, radius)
                        .await;
                }
                (None, None) => {
                    session
                        .search_by_current_location(&api, &Unsupported, radius)
                        .await;
                }
            }

            report(&session, json)
        }
        None => {
            println!("halal-cli ready; try `halal-cli search --address <text>`");
            Ok(())
        }
    }
}

fn report(session: &SearchSession, json: bool) -> anyhow::Result<()> {
    if let Some(message) = &session.error {
        if json {
            let envelope = halal_core::SearchResponse::error(message.clone());
            println!("{}", serde_json::to_string_pretty(&envelope)?);
        }
        anyhow::bail!("{message}");
    }

    if json {
        let envelope = halal_core::SearchResponse::success(session.results.clone());
        println!("{}", serde_json::to_string_pretty(&envelope)?);
    } else {
        print!("{}", render::render_results(&session.results));
    }
    Ok(())
}
