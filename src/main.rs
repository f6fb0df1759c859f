use std::sync::Arc;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use dialoguer::Confirm;
use property_catalog::api::{build_router, AppState};
use property_catalog::client::{
    CatalogClient, CatalogSession, Choice, Filters, Notice, PropertyForm, DEFAULT_API_URL,
};
use property_catalog::config::AppConfig;
use property_catalog::models::{ListingStatus, PropertyId, PropertyType};
use property_catalog::store::{MemoryStore, MongoStore, PropertyStore};
use tracing::{info, warn};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "property-catalog")]
#[command(about = "Real estate listing catalog: REST API server and terminal client", long_about = None)]
struct Cli {
    #[command(subcommand)]
    command: Commands,

    /// Base URL of the catalog API
    #[arg(long, global = true, default_value = DEFAULT_API_URL, env = "CATALOG_API_URL")]
    api_url: String,

    /// Log level (trace, debug, info, warn, error)
    #[arg(short, long, global = true, default_value = "info", env = "LOG_LEVEL")]
    log_level: String,
}

#[derive(Subcommand)]
enum Commands {
    /// Run the REST API server
    Serve {
        /// Keep listings in process memory instead of MongoDB
        #[arg(long)]
        in_memory: bool,
    },
    /// Show listings, optionally filtered
    List {
        /// Match title, location or description (case-insensitive)
        #[arg(short, long, default_value = "")]
        search: String,
        /// Property type or "all"
        #[arg(long = "type", default_value = "all")]
        property_type: Choice<PropertyType>,
        /// Listing status or "all"
        #[arg(long, default_value = "all")]
        status: Choice<ListingStatus>,
        #[arg(long)]
        min_price: Option<f64>,
        #[arg(long)]
        max_price: Option<f64>,
    },
    /// Add a new listing
    Add {
        #[arg(long)]
        title: String,
        #[arg(long)]
        description: String,
        #[arg(long)]
        price: String,
        #[arg(long)]
        location: String,
        #[arg(long = "type", default_value = "Apartment")]
        property_type: PropertyType,
        #[arg(long, default_value = "For Sale")]
        status: ListingStatus,
        #[arg(long)]
        bedrooms: String,
        #[arg(long)]
        bathrooms: String,
        /// Square feet
        #[arg(long)]
        area: String,
        #[arg(long, default_value = "")]
        image_url: String,
    },
    /// Change the status of a listing
    SetStatus { id: PropertyId, status: ListingStatus },
    /// Delete a listing
    Delete {
        id: PropertyId,
        /// Skip the confirmation prompt
        #[arg(short, long)]
        yes: bool,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    // Initialize logging
    init_logging(&cli.log_level);

    match cli.command {
        Commands::Serve { in_memory } => serve(in_memory).await,
        Commands::List {
            search,
            property_type,
            status,
            min_price,
            max_price,
        } => {
            let filters = Filters::default()
                .with_search(search)
                .with_type(property_type)
                .with_status(status)
                .with_min_price(min_price)
                .with_max_price(max_price);
            list(&cli.api_url, filters).await
        }
        Commands::Add {
            title,
            description,
            price,
            location,
            property_type,
            status,
            bedrooms,
            bathrooms,
            area,
            image_url,
        } => {
            let mut form = PropertyForm {
                title,
                description,
                price,
                location,
                property_type,
                status,
                bedrooms,
                bathrooms,
                area,
                image_url,
            };
            let mut session = open_session(&cli.api_url)?;
            let notice = session.submit(&mut form).await;
            finish(&session, notice)
        }
        Commands::SetStatus { id, status } => {
            let mut session = open_session(&cli.api_url)?;
            let notice = session.set_status(&id, status).await;
            finish(&session, notice)
        }
        Commands::Delete { id, yes } => {
            let mut session = open_session(&cli.api_url)?;
            let notice = session.delete(&id, |id| yes || confirm_delete(id)).await;
            finish(&session, notice)
        }
    }
}

fn init_logging(level: &str) {
    let filter = EnvFilter::try_new(level).unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

async fn serve(in_memory: bool) -> Result<()> {
    let config = AppConfig::load().context("Failed to load configuration")?;

    let store: Arc<dyn PropertyStore> = if in_memory {
        warn!("Using in-memory store, listings are lost on shutdown");
        Arc::new(MemoryStore::new())
    } else {
        Arc::new(
            MongoStore::connect(&config.mongodb_uri)
                .await
                .context("MongoDB connection error")?,
        )
    };
    info!("Storage backend: {}", store.name());

    let assets = config
        .is_production()
        .then_some(config.static_dir.as_path());
    let app = build_router(AppState::new(store), assets);

    let listener = tokio::net::TcpListener::bind(config.listen_addr())
        .await
        .with_context(|| format!("Failed to bind {}", config.listen_addr()))?;

    info!("✅ Server running on http://{}", listener.local_addr()?);
    info!("✅ Environment: {}", config.node_env);

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!("Failed to listen for Ctrl+C: {}", e);
        std::future::pending::<()>().await;
    }
    info!("Shutting down server...");
}

fn open_session(api_url: &str) -> Result<CatalogSession> {
    let client = CatalogClient::new(api_url).context("Failed to create HTTP client")?;
    Ok(CatalogSession::new(client))
}

async fn list(api_url: &str, filters: Filters) -> Result<()> {
    let mut session = open_session(api_url)?;
    if let Some(notice) = session.load().await {
        return report(notice);
    }
    session.set_filters(filters);

    let view = session.view();
    println!("🏠 {}\n", view.summary());
    print!("{}", view.render());
    Ok(())
}

/// Report a mutation outcome, with the refreshed listing count on success
fn finish(session: &CatalogSession, notice: Notice) -> Result<()> {
    let refreshed = matches!(notice, Notice::Success(_));
    report(notice)?;
    if refreshed {
        println!("{}", session.view().summary());
    }
    Ok(())
}

fn confirm_delete(id: &PropertyId) -> bool {
    Confirm::new()
        .with_prompt(format!("Are you sure you want to delete property {}?", id))
        .default(false)
        .interact()
        .unwrap_or(false)
}

/// Print a notice; errors abort with a non-zero exit
fn report(notice: Notice) -> Result<()> {
    match notice {
        Notice::Error(msg) => anyhow::bail!("{}", msg),
        Notice::Success(msg) => println!("✅ {}", msg),
        Notice::Cancelled => println!("Cancelled"),
    }
    Ok(())
}
