//! Single binary web server: stateless JSON API around the scheduler.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080),
//! SCHEDULER_CONFIG (path to a JSON scheduler configuration).

use actix_web::{
    get, post,
    web::{self, Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use chrono::{DateTime, Utc};
use padel_league_scheduler::{
    generate_rounds, LeagueId, Match, Player, ScheduleError, ScheduleRequest, SchedulerConfig,
};
use serde::Deserialize;
use std::collections::HashSet;

type AppConfig = Data<SchedulerConfig>;

#[derive(serde::Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct GenerateMatchesBody {
    players: Vec<Player>,
    #[serde(default)]
    played_matches: Vec<Match>,
    #[serde(default = "default_rounds")]
    rounds: u32,
    date: DateTime<Utc>,
}

fn default_rounds() -> u32 {
    1
}

/// Path segment: league id (e.g. /api/leagues/{league_id})
#[derive(Deserialize)]
struct LeaguePath {
    league_id: LeagueId,
}

/// Duplicate ids are the caller's problem, not the scheduler's: reject them here.
fn check_unique_players(players: &[Player]) -> Result<(), ScheduleError> {
    let mut seen = HashSet::new();
    match players.iter().find(|p| !seen.insert(p.id.as_str())) {
        Some(dup) => Err(ScheduleError::DuplicatePlayer(dup.id.clone())),
        None => Ok(()),
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "padel-league-scheduler",
    })
}

/// Generate the next rounds for a league. Nothing is persisted.
#[post("/api/leagues/{league_id}/matches/generate")]
async fn api_generate_matches(
    config: AppConfig,
    path: Path<LeaguePath>,
    body: Json<GenerateMatchesBody>,
) -> HttpResponse {
    let body = body.into_inner();
    if let Err(e) = check_unique_players(&body.players) {
        return HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() }));
    }
    let request = ScheduleRequest::new(path.into_inner().league_id, body.rounds, body.date);
    // The search is CPU bound: keep it off the async workers.
    let result = web::block(move || {
        generate_rounds(&body.players, &body.played_matches, &request, &config)
    })
    .await;
    match result {
        Ok(Ok(rounds)) => HttpResponse::Ok().json(rounds),
        Ok(Err(e)) => HttpResponse::BadRequest().json(serde_json::json!({ "error": e.to_string() })),
        Err(e) => {
            log::error!("Scheduler task failed: {}", e);
            HttpResponse::InternalServerError().body("scheduler error")
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn load_config() -> std::io::Result<SchedulerConfig> {
    let Ok(path) = std::env::var("SCHEDULER_CONFIG") else {
        return Ok(SchedulerConfig::default());
    };
    let raw = std::fs::read_to_string(&path)?;
    let config = SchedulerConfig::from_json(&raw)
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    config
        .validate()
        .map_err(|e| std::io::Error::new(std::io::ErrorKind::InvalidData, e))?;
    log::info!("Loaded scheduler config from {}", path);
    Ok(config)
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let config = Data::new(load_config()?);
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);

    HttpServer::new(move || {
        App::new()
            .app_data(config.clone())
            .app_data(web::JsonConfig::default().limit(4 * 1024 * 1024))
            .service(api_health)
            .service(api_generate_matches)
    })
    .bind(bind)?
    .run()
    .await
}
