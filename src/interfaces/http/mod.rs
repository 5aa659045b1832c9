use crate::application::AnalyzeUseCase;
use crate::domain::classifier_config::ClassifierConfig;
use crate::infrastructure::llm_clients::SentimentClient;
use actix_cors::Cors;
use actix_web::{dev::Server, get, post, web, App, HttpResponse, HttpServer, Responder};
use chrono::Local;
use serde::{Deserialize, Serialize};
use std::sync::{Arc, Mutex};

#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct LogEntry {
    pub time: String,
    pub level: String,
    pub source: String,
    pub message: String,
}

pub struct HttpState {
    pub analyze_use_case: AnalyzeUseCase,
    pub llm_client: Arc<dyn SentimentClient + Send + Sync>,
    pub default_config: ClassifierConfig,
    pub logs: Arc<Mutex<Vec<LogEntry>>>,
}

#[derive(Deserialize)]
pub struct AnalyzeRequest {
    pub csv: String,
    #[serde(default)]
    pub config: Option<ClassifierConfig>,
}

#[derive(Deserialize)]
pub struct PreviewQuery {
    pub limit: Option<usize>,
}

#[post("/analyze")]
async fn analyze(data: web::Data<HttpState>, req: web::Json<AnalyzeRequest>) -> impl Responder {
    let config = req
        .config
        .clone()
        .unwrap_or_else(|| data.default_config.clone());

    add_log(
        &data.logs,
        "INFO",
        "Analyze",
        &format!(
            "Analyzing batch (provider={:?} base_url={} model={})",
            config.provider, config.base_url, config.model
        ),
    );

    match data.analyze_use_case.execute(&config, &req.csv).await {
        Ok(report) => {
            add_log(
                &data.logs,
                "INFO",
                "Analyze",
                &format!(
                    "Batch {} complete: {} rows, {} valid, {} skipped, {} classifier failures",
                    report.batch_id,
                    report.row_count,
                    report.summary.valid_rows,
                    report.summary.skipped_rows,
                    report.enrichment_failures
                ),
            );
            HttpResponse::Ok().json(report)
        }
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Analyze",
                &format!("Analysis failed: {}", e),
            );
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[post("/preview")]
async fn preview(
    data: web::Data<HttpState>,
    body: web::Bytes,
    query: web::Query<PreviewQuery>,
) -> impl Responder {
    let limit = query.limit.unwrap_or(10);

    add_log(
        &data.logs,
        "INFO",
        "Preview",
        &format!("Previewing {} rows from upload ({} bytes)", limit, body.len()),
    );

    match AnalyzeUseCase::preview(&body, limit) {
        Ok(preview) => HttpResponse::Ok().json(preview),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Preview",
                &format!("Preview failed: {}", e),
            );
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[post("/inspect")]
async fn inspect(data: web::Data<HttpState>, body: web::Bytes) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "Inspect",
        &format!("Inspecting upload ({} bytes)", body.len()),
    );

    match AnalyzeUseCase::inspect(&body) {
        Ok(stats) => HttpResponse::Ok().json(stats),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Inspect",
                &format!("Inspection failed: {}", e),
            );
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[post("/models")]
async fn list_models(
    data: web::Data<HttpState>,
    config: web::Json<ClassifierConfig>,
) -> impl Responder {
    add_log(
        &data.logs,
        "INFO",
        "Models",
        &format!(
            "Fetching models (provider={:?} base_url={})",
            config.provider, config.base_url
        ),
    );

    match data.llm_client.list_models(&config).await {
        Ok(models) => HttpResponse::Ok().json(models),
        Err(e) => {
            add_log(
                &data.logs,
                "ERROR",
                "Models",
                &format!("Failed to list models: {}", e),
            );
            HttpResponse::InternalServerError().body(e.to_string())
        }
    }
}

#[get("/logs")]
async fn get_logs(data: web::Data<HttpState>) -> impl Responder {
    let logs = data.logs.lock().unwrap();
    HttpResponse::Ok().json(&*logs)
}

#[get("/health")]
async fn health() -> impl Responder {
    HttpResponse::Ok().json(serde_json::json!({ "status": "ok" }))
}

pub fn add_log_entry(
    logs: &Mutex<Vec<LogEntry>>,
    level: &str,
    source: &str,
    message: &str,
) -> LogEntry {
    let entry = LogEntry {
        time: Local::now().format("%H:%M:%S").to_string(),
        level: level.to_string(),
        source: source.to_string(),
        message: message.to_string(),
    };
    let mut logs = logs.lock().unwrap();
    logs.push(entry.clone());
    if logs.len() > 100 {
        logs.remove(0);
    }
    entry
}

pub fn add_log(logs: &Mutex<Vec<LogEntry>>, level: &str, source: &str, message: &str) {
    add_log_entry(logs, level, source, message);
}

pub fn start_server(state: HttpState, host: &str, port: u16) -> std::io::Result<Server> {
    let state = web::Data::new(state);

    let server = HttpServer::new(move || {
        let cors = Cors::permissive(); // Allow all origins for local tool

        App::new().wrap(cors).app_data(state.clone()).service(
            web::scope("/api")
                .service(analyze)
                .service(preview)
                .service(inspect)
                .service(list_models)
                .service(get_logs)
                .service(health),
        )
    })
    .bind((host, port))?
    .run();

    Ok(server)
}
