/// Seatwell: restaurant reservation and table seating backend
///
/// Main entry point. Initializes configuration and starts the HTTP server.

use seatwell::{config::Config, server::start_server};

/// Application entry point
///
/// The server provides:
/// - Reservation management at /reservations
/// - Table management and seating at /tables
/// - Health check at /healthz
#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Load configuration (defaults to 0.0.0.0:3004 and a SQLite database)
    let config = Config::default();

    // Start the server
    start_server(config).await?;

    Ok(())
}
