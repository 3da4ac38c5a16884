use actix_web::{middleware, web, App, HttpRequest, HttpResponse, HttpServer, Result};
use serde::Deserialize;
use std::sync::Mutex;
use tracing::info;

use crate::config::SchedulerConfig;
use crate::display::{schedule_to_string, UNFILLED_LABEL};
use crate::parser::{load_workers_from_reader, reject_reserved_identities};
use crate::schedule::{create_rng, AssignmentEngine, PoolLimits, ScheduleReport, WorkerPool};

// In-memory storage for the uploaded pool and the last generated schedule
pub struct AppState {
    pub pool: Mutex<Option<WorkerPool>>,
    pub report: Mutex<Option<ScheduleReport>>,
    pub config: SchedulerConfig,
    pub admin_password: String,
}

impl AppState {
    pub fn new(config: SchedulerConfig, admin_password: String) -> Self {
        Self {
            pool: Mutex::new(None),
            report: Mutex::new(None),
            config,
            admin_password,
        }
    }
}

#[derive(Deserialize)]
pub struct GenerateQuery {
    seed: Option<u64>,
}

fn is_authorized(req: &HttpRequest, state: &AppState) -> bool {
    let password = req
        .headers()
        .get("X-Admin-Password")
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");
    password == state.admin_password
}

fn unauthorized() -> HttpResponse {
    HttpResponse::Unauthorized().json(serde_json::json!({"success": false, "error": "Unauthorized"}))
}

fn lock_poisoned() -> actix_web::Error {
    actix_web::error::ErrorInternalServerError("State lock poisoned")
}

// Preference table upload endpoint
async fn upload_preferences(
    req: HttpRequest,
    body: web::Bytes,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !is_authorized(&req, &state) {
        return Ok(unauthorized());
    }

    let reserved = [state.config.supervisor_label.as_str(), UNFILLED_LABEL];
    let parsed = load_workers_from_reader(&body[..])
        .and_then(|workers| reject_reserved_identities(&workers, &reserved).map(|_| workers));

    match parsed {
        Ok(workers) => {
            let count = workers.len();
            let pool = WorkerPool::with_limits(workers, PoolLimits::from(&state.config));
            *state.pool.lock().map_err(|_| lock_poisoned())? = Some(pool);
            info!(workers = count, "Preference table uploaded");

            Ok(HttpResponse::Ok().json(serde_json::json!({
                "success": true,
                "workers": count
            })))
        }
        Err(e) => Ok(HttpResponse::BadRequest().json(serde_json::json!({
            "success": false,
            "error": format!("Failed to process CSV: {}", e)
        }))),
    }
}

// Runs the engine on the uploaded pool
async fn generate_schedule(
    req: HttpRequest,
    query: web::Query<GenerateQuery>,
    state: web::Data<AppState>,
) -> Result<HttpResponse> {
    if !is_authorized(&req, &state) {
        return Ok(unauthorized());
    }

    let mut pool_guard = state.pool.lock().map_err(|_| lock_poisoned())?;
    let Some(pool) = pool_guard.as_mut() else {
        return Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "No preferences uploaded"})));
    };

    let seed = query.seed.or(state.config.seed);
    let mut engine = AssignmentEngine::new(create_rng(seed), state.config.min_staff);
    let report = ScheduleReport::new(engine.generate(pool), seed);
    drop(pool_guard);

    let response = HttpResponse::Ok().json(&report);
    *state.report.lock().map_err(|_| lock_poisoned())? = Some(report);
    Ok(response)
}

// Schedule endpoint
async fn get_schedule(state: web::Data<AppState>) -> Result<HttpResponse> {
    let report = state.report.lock().map_err(|_| lock_poisoned())?;
    match *report {
        Some(ref report) => Ok(HttpResponse::Ok().json(report)),
        None => Ok(HttpResponse::NotFound().json(serde_json::json!({"error": "Schedule not available"}))),
    }
}

async fn get_schedule_text(state: web::Data<AppState>) -> Result<HttpResponse> {
    let report = state.report.lock().map_err(|_| lock_poisoned())?;
    match *report {
        Some(ref report) => Ok(HttpResponse::Ok()
            .content_type("text/plain; charset=utf-8")
            .body(schedule_to_string(report, &state.config.supervisor_label))),
        None => Ok(HttpResponse::NotFound().body("Schedule not available")),
    }
}

pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/api/upload", web::post().to(upload_preferences))
        .route("/api/generate", web::post().to(generate_schedule))
        .route("/api/schedule", web::get().to(get_schedule))
        .route("/api/schedule/text", web::get().to(get_schedule_text));
}

pub async fn start_server(port: u16, config: SchedulerConfig, admin_password: String) -> std::io::Result<()> {
    let app_state = web::Data::new(AppState::new(config, admin_password));

    HttpServer::new(move || {
        App::new()
            .app_data(app_state.clone())
            .wrap(middleware::Logger::default())
            .configure(configure)
    })
    .bind(("0.0.0.0", port))?
    .run()
    .await
}
