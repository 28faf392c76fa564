//! Dashboard entry point

use std::sync::Arc;

use clap::Parser;

use advisor::RealAdvisorClient;
use orderbook::RealCsvStore;
use shared::{ProcessId, logging, process_info, process_warn};
use webserver::{DashboardConfig, RealSessionRegistry, WebServer, WebServerResult};

/// Catering operations dashboard
#[derive(Parser, Debug)]
#[command(name = "webserver")]
#[command(about = "Catering operations dashboard (JSON API)")]
struct Args {
    /// Interface to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port for HTTP server
    #[arg(long, default_value = "8501")]
    port: u16,

    /// Order file (defaults to $ORDERS_FILE, then ./cleaned_revenue_data.csv)
    #[arg(long)]
    data_file: Option<String>,

    /// Log level (trace, debug, info, warn, error)
    #[arg(long, default_value = "info")]
    log_level: String,
}

#[tokio::main]
async fn main() -> WebServerResult<()> {
    dotenv::dotenv().ok();
    let args = Args::parse();

    ProcessId::init_dashboard();
    logging::init_tracing_with_level(Some(&args.log_level));

    let config = DashboardConfig::from_env(&args.host, args.port, args.data_file)?;
    process_info!(
        ProcessId::current(),
        "📂 Orders file: {}",
        config.orders_file.display()
    );

    let advisor = RealAdvisorClient::from_env();
    if advisor.config().api_key.is_none() {
        process_warn!(
            ProcessId::current(),
            "⚠️ OPENAI_API_KEY not set; advice and extraction will report an error"
        );
    }

    let store = Arc::new(RealCsvStore::new(config.orders_file.clone()));
    let sessions = Arc::new(RealSessionRegistry::new(config.password.clone()));
    let webserver = WebServer::new(config.bind_address, store, Arc::new(advisor), sessions);

    webserver.run().await?;

    logging::log_success(ProcessId::current(), "Dashboard stopped gracefully");
    Ok(())
}
