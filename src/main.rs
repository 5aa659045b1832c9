use std::sync::{Arc, Mutex};

use sentiscope::application::AnalyzeUseCase;
use sentiscope::infrastructure::config::ServiceConfig;
use sentiscope::infrastructure::llm_clients::{RouterClient, SentimentClient};
use sentiscope::interfaces::http::{add_log, start_server, HttpState};
use tracing::{error, info};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    dotenvy::dotenv().ok();
    let _ = tracing_subscriber::fmt().with_env_filter("info").try_init();

    let config = match ServiceConfig::load() {
        Ok(config) => config,
        Err(err) => {
            error!(error = %err, "Failed to load configuration");
            return Err(std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                err.to_string(),
            ));
        }
    };

    let llm_client: Arc<dyn SentimentClient + Send + Sync> = Arc::new(RouterClient::new());
    let logs = Arc::new(Mutex::new(Vec::new()));

    let state = HttpState {
        analyze_use_case: AnalyzeUseCase::new(llm_client.clone()),
        llm_client,
        default_config: config.classifier.clone(),
        logs: logs.clone(),
    };

    let server = start_server(state, &config.host, config.port)?;

    add_log(
        &logs,
        "INFO",
        "System",
        &format!("Backend initialized and HTTP server started on :{}", config.port),
    );
    info!(host = %config.host, port = config.port, "sentiscope listening");

    server.await
}
