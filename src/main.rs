use std::path::PathBuf;
use std::process::ExitCode;
use std::sync::Arc;

use anyhow::{Result, anyhow};
use clap::{Parser, Subcommand};
use tokio::sync::{RwLock, watch};
use tokio_util::sync::CancellationToken;
use tracing::{info, warn};

use weather_dashboard::api::AppState;
use weather_dashboard::{
    AddressContext, Dashboard, DashboardConfig, DashboardError, GeocodingClient, LocationInput,
    OpenMeteoClient, TemperatureUnit, WeatherContainer, logging, render_compact, render_text, web,
};

#[derive(Parser, Debug)]
#[command(name = "weather-dashboard", version)]
#[command(about = "Current conditions and multi-day forecast from Open-Meteo")]
struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// City name to look up, e.g. "Lisbon"
    #[arg(long, global = true, conflicts_with_all = ["lat", "lon"])]
    city: Option<String>,

    /// Latitude (decimal)
    #[arg(long, global = true, allow_negative_numbers = true, requires = "lon")]
    lat: Option<f64>,

    /// Longitude (decimal)
    #[arg(long, global = true, allow_negative_numbers = true, requires = "lat")]
    lon: Option<f64>,

    /// Temperature unit: F or C
    #[arg(long, global = true)]
    unit: Option<TemperatureUnit>,

    /// Forecast day to select (0 = first day)
    #[arg(long, global = true)]
    day: Option<usize>,

    /// Show only the selected day
    #[arg(long, global = true)]
    compact: bool,

    /// Configuration file
    #[arg(long, global = true)]
    config: Option<PathBuf>,

    /// Debug logging
    #[arg(short, long, global = true)]
    verbose: bool,
}

#[derive(Subcommand, Debug, Clone, PartialEq)]
enum Commands {
    /// Fetch once and print the dashboard
    Show,
    /// Keep polling and reprint on every update
    Watch,
    /// Poll in the background and serve the dashboard as JSON
    Serve {
        /// Port to listen on
        #[arg(long)]
        port: Option<u16>,
    },
}

impl Cli {
    fn location_input(&self, config: &DashboardConfig) -> Option<LocationInput> {
        if let (Some(lat), Some(lon)) = (self.lat, self.lon) {
            return Some(LocationInput::Coordinates(lat, lon));
        }
        self.city
            .clone()
            .or_else(|| config.dashboard.default_city.clone())
            .map(LocationInput::Name)
    }

    fn render(&self, dashboard: &Dashboard) -> String {
        let snapshot = dashboard.snapshot(chrono::Utc::now());
        if self.compact {
            render_compact(&snapshot)
        } else {
            render_text(&snapshot)
        }
    }
}

#[tokio::main]
async fn main() -> ExitCode {
    let cli = Cli::parse();
    match run(cli).await {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            match e.downcast_ref::<DashboardError>() {
                Some(error) => eprintln!("Error: {}", error.user_message()),
                None => eprintln!("Error: {e:#}"),
            }
            ExitCode::FAILURE
        }
    }
}

async fn run(cli: Cli) -> Result<()> {
    let config = DashboardConfig::load_from_path(cli.config.clone())?;
    logging::init(&config.logging, cli.verbose)?;

    let unit = cli.unit.unwrap_or(config.dashboard.unit);
    let geocoder = Arc::new(GeocodingClient::new(&config.weather)?);
    let address = match cli.location_input(&config) {
        Some(input) => geocoder.resolve(input).await?,
        None => AddressContext::default(),
    };

    let source = Arc::new(OpenMeteoClient::new(&config.weather)?);
    let dashboard = Arc::new(RwLock::new(Dashboard::new(unit)));
    let container = Arc::new(WeatherContainer::new(source, Arc::clone(&dashboard)));

    match cli.command.clone().unwrap_or(Commands::Show) {
        Commands::Show => show(&cli, &container, address).await,
        Commands::Watch => watch_dashboard(&cli, container, address, &config).await,
        Commands::Serve { port } => {
            serve(container, geocoder, address, port.unwrap_or(config.web.port), &config).await
        }
    }
}

async fn show(cli: &Cli, container: &WeatherContainer, address: AddressContext) -> Result<()> {
    if address.latlong.is_none() {
        return Err(DashboardError::validation(
            "No location given; use --city, --lat/--lon or set dashboard.default_city",
        )
        .into());
    }

    container.refresh(&address).await;

    let dashboard = container.dashboard();
    let mut dashboard = dashboard.write().await;
    if !dashboard.weather().has_data() {
        return Err(anyhow!(
            "Failed to fetch weather forecast for {}",
            address.city_name().unwrap_or("the given location")
        ));
    }
    if let Some(day) = cli.day {
        dashboard.select_day(day)?;
    }
    print!("{}", cli.render(&dashboard));
    Ok(())
}

async fn watch_dashboard(
    cli: &Cli,
    container: Arc<WeatherContainer>,
    address: AddressContext,
    config: &DashboardConfig,
) -> Result<()> {
    let shutdown = CancellationToken::new();
    let (_address_tx, address_rx) = watch::channel(address);
    let mut updates = container.subscribe();
    let dashboard = container.dashboard();
    let handle = Arc::clone(&container).spawn(
        address_rx,
        config.dashboard.poll_interval(),
        shutdown.clone(),
    );

    print_updates(cli, &dashboard, &mut updates, async {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, stopping");
        }
    })
    .await;

    shutdown.cancel();
    handle.await?;
    Ok(())
}

/// Reprint the dashboard after every completed fetch until `stop` resolves
/// or the container goes away. Returns the number of renders.
async fn print_updates(
    cli: &Cli,
    dashboard: &RwLock<Dashboard>,
    updates: &mut watch::Receiver<u64>,
    stop: impl Future<Output = ()>,
) -> usize {
    let mut day = cli.day;
    let mut renders = 0;
    tokio::pin!(stop);
    loop {
        tokio::select! {
            () = &mut stop => break,
            changed = updates.changed() => {
                if changed.is_err() {
                    break;
                }
                let mut dashboard = dashboard.write().await;
                if let Some(index) = day.take()
                    && let Err(e) = dashboard.select_day(index)
                {
                    warn!("Ignoring --day: {e}");
                }
                println!("{}", cli.render(&dashboard));
                renders += 1;
            }
        }
    }
    renders
}

async fn serve(
    container: Arc<WeatherContainer>,
    geocoder: Arc<GeocodingClient>,
    address: AddressContext,
    port: u16,
    config: &DashboardConfig,
) -> Result<()> {
    let shutdown = CancellationToken::new();
    let (address_tx, address_rx) = watch::channel(address);
    let handle = Arc::clone(&container).spawn(
        address_rx,
        config.dashboard.poll_interval(),
        shutdown.clone(),
    );

    let signal = shutdown.clone();
    tokio::spawn(async move {
        if tokio::signal::ctrl_c().await.is_ok() {
            info!("Interrupted, shutting down");
        }
        signal.cancel();
    });

    let state = AppState {
        dashboard: container.dashboard(),
        address_tx,
        geocoder,
    };
    let served = web::run(port, state, shutdown.clone()).await;

    shutdown.cancel();
    handle.await?;
    served
}
