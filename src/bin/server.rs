//! Working Days HTTP server.
//!
//! # Usage
//!
//! ```bash
//! cargo run --bin working-days-server -- --config working-days.toml
//! ```
//!
//! # Environment Variables
//!
//! - `HOST`: Server host (default: 0.0.0.0)
//! - `PORT`: Server port (default: 3000)
//! - `HOLIDAYS_URL`: Holiday list URL
//! - `BUSINESS_TIMEZONE`: IANA timezone of the business calendar
//! - `RUST_LOG`: Log filter (default from the `[logging]` section)

use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Context;
use clap::Parser;
use tracing::info;

use working_days::http::{create_router, AppState};
use working_days::utils::{logger, validation::Validate};
use working_days::{HolidayCalendar, ServiceConfig};

#[derive(Parser)]
#[command(name = "working-days-server")]
#[command(about = "HTTP API for business day and hour calculations")]
struct Args {
    /// Path to TOML configuration file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    let args = Args::parse();
    let config = ServiceConfig::load(args.config.as_deref())
        .context("failed to load configuration")?;

    logger::init_server_logger(&config.logging.level, config.logging.json);
    info!("🚀 Starting Working Days HTTP Server");

    config.validate().context("invalid configuration")?;
    let timezone = config.timezone()?;

    // 假日載入成功後才開始接受請求
    let calendar = Arc::new(HolidayCalendar::new());
    let source = config.holiday_source()?;
    calendar
        .load_from(source.as_ref())
        .await
        .context("could not load holidays")?;

    let state = AppState::new(calendar, timezone);
    let app = create_router(state);

    let bind_address = config.bind_address();
    let listener = tokio::net::TcpListener::bind(bind_address.as_str())
        .await
        .with_context(|| format!("could not bind {}", bind_address))?;

    info!("Server listening on http://{}", listener.local_addr()?);
    info!("📊 Endpoint available: GET /calcular");

    axum::serve(listener, app).await?;

    Ok(())
}

