use counsel_match::config::{LoggingSettings, Settings};
use counsel_match::services::PostgresRepository;
use counsel_match::{AvailabilityMatcher, MatchRequest, MatchResponse};
use std::io::{self, Read};
use std::sync::Arc;
use tracing::{error, info};
use tracing_subscriber::EnvFilter;

/// Install the global subscriber; RUST_LOG overrides the configured level
fn init_tracing(logging: &LoggingSettings) {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(&logging.level));

    let subscriber = tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(io::stderr)
        .with_target(false)
        .with_level(true);

    match logging.format.as_str() {
        "pretty" => subscriber.pretty().init(),
        "json" => subscriber.json().init(),
        _ => subscriber.compact().init(),
    }
}

/// One-shot matching run: reads a MatchRequest as JSON on stdin and writes
/// the ordered MatchResponse as JSON on stdout.
#[tokio::main]
async fn main() -> io::Result<()> {
    // Load .env file if present
    dotenv::dotenv().ok();

    let settings = Settings::load().map_err(|e| {
        eprintln!("Configuration error: {}", e);
        io::Error::other(e)
    })?;

    init_tracing(&settings.logging);

    info!("Configuration loaded successfully");

    let mut input = String::new();
    io::stdin().read_to_string(&mut input)?;
    let request: MatchRequest = serde_json::from_str(&input).map_err(|e| {
        error!("Invalid match request: {}", e);
        io::Error::new(io::ErrorKind::InvalidData, e)
    })?;

    let repository = Arc::new(PostgresRepository::from_settings(&settings.database).await.map_err(|e| {
        error!("Failed to connect to PostgreSQL: {}", e);
        io::Error::other(e)
    })?);

    let policy = settings.matching_policy();
    info!("Matcher initialized with policy: {:?}", policy);

    let matcher = AvailabilityMatcher::new(repository.clone(), repository, policy);

    let result = matcher
        .find_matches(&request, chrono::Utc::now())
        .await
        .map_err(|e| {
            error!("Matching failed: {}", e);
            io::Error::other(e)
        })?;

    let response = MatchResponse::from(result);
    println!("{}", serde_json::to_string_pretty(&response)?);

    Ok(())
}
