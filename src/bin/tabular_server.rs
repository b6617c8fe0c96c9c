//! Tabular API Server binary
//!
//! HTTP REST API for file export and import.

use clap::Parser;
use royalbit_tabular::api::{run_api_server, server::ApiConfig};

#[derive(Parser, Debug)]
#[command(name = "tabular-server")]
#[command(version)]
#[command(author = "RoyalBit Inc. <admin@royalbit.ca>")]
#[command(about = "Tabular API Server - records to xlsx/csv downloads and uploads back to rows")]
#[command(long_about = r#"
Tabular API Server

Endpoints:
  - POST /api/v1/export?filename=<name>  - JSON records → .xlsx/.csv download
  - POST /api/v1/import?filename=<name>  - Uploaded .xlsx/.csv → JSON rows

Additional endpoints:
  - GET  /health           - Health check
  - GET  /version          - Server version info
  - GET  /                 - API documentation

Features:
  - CORS enabled for cross-origin requests
  - Graceful shutdown on SIGINT/SIGTERM
  - JSON response format with request IDs
  - Tracing and structured logging (RUST_LOG)

Example usage:
  tabular-server                           # Start on localhost:8080
  tabular-server --host 0.0.0.0 --port 3000

  curl -X POST "http://localhost:8080/api/v1/export?filename=orders.csv" \
    -H "Content-Type: application/json" \
    -d '[{"orderId": 1, "total": 9.5}]'

  curl -X POST "http://localhost:8080/api/v1/import?filename=orders.xlsx" \
    --data-binary @orders.xlsx
"#)]
struct Args {
    /// Host address to bind to (use 0.0.0.0 for all interfaces)
    #[arg(short = 'H', long, default_value = "127.0.0.1", env = "TABULAR_HOST")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "8080", env = "TABULAR_PORT")]
    port: u16,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();

    let config = ApiConfig {
        host: args.host,
        port: args.port,
    };

    run_api_server(config).await
}
