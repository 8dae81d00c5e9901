//! Single binary web server: JSON API for scoring tennis matches point by point.
//! Run with: cargo run --bin web
//! Listens on 0.0.0.0:8080 by default.
//! Override with env: HOST (e.g. 0.0.0.0), PORT (e.g. 8080), DATA_FILE (e.g. statspoint_data.json).

use actix_web::{
    delete, get, post,
    web::{Data, Json, Path},
    App, HttpResponse, HttpServer, Responder,
};
use rand::Rng;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, Mutex, RwLock};
use std::time::{Duration, Instant};
use tennis_stats_web::{
    match_summaries, write_stats_csv, JsonFileStore, MatchId, MatchSession, MatchStore, Player,
    PointOutcome, PointReport, SavedMatch, Side, StoreError, TennisMatch, SETS_PER_MATCH,
};

/// The one save file, shared by every session and handler.
type SharedStore = Arc<Mutex<JsonFileStore>>;

/// Per-match entry: session (match + store) and last activity time (for auto-cleanup).
struct MatchEntry {
    session: MatchSession<SharedStore>,
    last_activity: Instant,
}

/// Matches being scored, by id. Entries are removed after 12h inactivity.
type AppState = Data<RwLock<HashMap<MatchId, MatchEntry>>>;

/// Inactivity threshold: matches not touched for this long are dropped from memory.
const INACTIVITY_TIMEOUT: Duration = Duration::from_secs(12 * 3600);

#[derive(Serialize)]
struct HealthResponse {
    ok: bool,
    service: &'static str,
}

#[derive(Deserialize)]
struct CreateMatchBody {
    match_name: String,
    player1: String,
    player2: String,
    /// Who serves first; a coin toss decides when absent.
    #[serde(default)]
    server: Option<Side>,
}

/// Path segment: match or save id (e.g. /api/matches/{id})
#[derive(Deserialize)]
struct MatchPath {
    id: MatchId,
}

#[derive(Serialize)]
struct PlayerView {
    name: String,
    points: String,
    games: String,
    sets: String,
    /// Games per set, for the scoreboard squares.
    total_games: [u32; SETS_PER_MATCH],
}

/// Scoreboard of a match.
#[derive(Serialize)]
struct MatchView {
    id: MatchId,
    match_name: String,
    players: [PlayerView; 2],
    server: String,
    sets_winners: [Option<String>; SETS_PER_MATCH],
    in_tie_break: bool,
    match_ended: bool,
}

impl MatchView {
    fn from_match(m: &TennisMatch) -> Self {
        let view = |p: &Player| PlayerView {
            name: p.name().to_string(),
            points: p.points_text(),
            games: p.games_text(),
            sets: p.sets_text(),
            total_games: *p.total_games(),
        };
        Self {
            id: m.id,
            match_name: m.match_name().to_string(),
            players: [view(m.player1()), view(m.player2())],
            server: m.server_player().name().to_string(),
            sets_winners: m.sets_winners().clone(),
            in_tie_break: m.in_tie_break(),
            match_ended: m.is_over(),
        }
    }
}

#[derive(Serialize)]
struct PointResponse {
    outcome: PointOutcome,
    #[serde(rename = "match")]
    view: MatchView,
    /// Set when the match ended but could not be saved.
    #[serde(skip_serializing_if = "Option::is_none")]
    save_warning: Option<String>,
}

#[derive(Serialize)]
struct SaveListItem {
    id: MatchId,
    label: String,
    saved_at: chrono::DateTime<chrono::Utc>,
    match_ended: bool,
}

fn error_json(message: impl ToString) -> serde_json::Value {
    serde_json::json!({ "error": message.to_string() })
}

fn store_error_response(e: StoreError) -> HttpResponse {
    match e {
        StoreError::NotFound(_) => HttpResponse::NotFound().json(error_json(e)),
        StoreError::Match(_) => HttpResponse::BadRequest().json(error_json(e)),
        StoreError::Io(_) | StoreError::Json(_) | StoreError::Lock => {
            log::error!("{}", e);
            HttpResponse::InternalServerError().json(error_json(e))
        }
    }
}

#[get("/api/health")]
async fn api_health() -> impl Responder {
    HttpResponse::Ok().json(HealthResponse {
        ok: true,
        service: "tennis-stats-web",
    })
}

/// Create a new match (returns its scoreboard with id; client stores id for subsequent requests).
#[post("/api/matches")]
async fn api_create_match(
    state: AppState,
    store: Data<SharedStore>,
    body: Json<CreateMatchBody>,
) -> HttpResponse {
    let match_name = body.match_name.trim();
    let (name1, name2) = (body.player1.trim(), body.player2.trim());
    if match_name.is_empty() || name1.is_empty() || name2.is_empty() {
        return HttpResponse::BadRequest().json(error_json("Match and player names are required"));
    }
    if name1 == name2 {
        return HttpResponse::BadRequest().json(error_json("Players must have different names"));
    }
    let server = body.server.unwrap_or_else(|| {
        if rand::thread_rng().gen_bool(0.5) {
            Side::One
        } else {
            Side::Two
        }
    });
    let tennis_match =
        TennisMatch::new(Player::new(name1), Player::new(name2), match_name).with_server(server);
    let view = MatchView::from_match(&tennis_match);
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    log::info!("New match {} ({} serves)", view.match_name, view.server);
    g.insert(
        view.id,
        MatchEntry {
            session: MatchSession::new(tennis_match, store.get_ref().clone()),
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(view)
}

/// Get a match scoreboard by id (404 if not found). Touching it refreshes last_activity.
#[get("/api/matches/{id}")]
async fn api_get_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get_mut(&path.id) {
        Some(entry) => {
            entry.last_activity = Instant::now();
            HttpResponse::Ok().json(MatchView::from_match(entry.session.tennis_match()))
        }
        None => HttpResponse::NotFound().json(error_json("No match")),
    }
}

/// Report how a point ended; the match-ending point also saves the match.
#[post("/api/matches/{id}/points")]
async fn api_report_point(
    state: AppState,
    path: Path<MatchPath>,
    body: Json<PointReport>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(error_json("No match")),
    };
    entry.last_activity = Instant::now();
    match entry.session.report(body.into_inner()) {
        Ok(reported) => HttpResponse::Ok().json(PointResponse {
            outcome: reported.outcome,
            view: MatchView::from_match(entry.session.tennis_match()),
            save_warning: reported.save_error.map(|e| e.to_string()),
        }),
        Err(e) => store_error_response(StoreError::Match(e)),
    }
}

/// Save the match as it stands.
#[post("/api/matches/{id}/save")]
async fn api_save_match(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get_mut(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(error_json("No match")),
    };
    entry.last_activity = Instant::now();
    match entry.session.save() {
        Ok(()) => HttpResponse::Ok().json(MatchView::from_match(entry.session.tennis_match())),
        Err(e) => store_error_response(e),
    }
}

/// Per-set and whole-match statistics of both players.
#[get("/api/matches/{id}/stats")]
async fn api_match_stats(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    match g.get(&path.id) {
        Some(entry) => HttpResponse::Ok().json(match_summaries(entry.session.tennis_match())),
        None => HttpResponse::NotFound().json(error_json("No match")),
    }
}

/// Same statistics as CSV.
#[get("/api/matches/{id}/stats.csv")]
async fn api_match_stats_csv(state: AppState, path: Path<MatchPath>) -> HttpResponse {
    let g = match state.read() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    let entry = match g.get(&path.id) {
        Some(e) => e,
        None => return HttpResponse::NotFound().json(error_json("No match")),
    };
    let mut buf = Vec::new();
    match write_stats_csv(entry.session.tennis_match(), &mut buf) {
        Ok(()) => HttpResponse::Ok()
            .content_type("text/csv; charset=utf-8")
            .body(buf),
        Err(e) => HttpResponse::InternalServerError().json(error_json(e)),
    }
}

/// All saved matches, newest first.
#[get("/api/saves")]
async fn api_list_saves(store: Data<SharedStore>) -> HttpResponse {
    match store.load_all() {
        Ok(mut records) => {
            records.sort_by(|a, b| b.saved_at.cmp(&a.saved_at));
            let items: Vec<SaveListItem> = records
                .into_iter()
                .map(|r| SaveListItem {
                    id: r.id,
                    label: r.label(),
                    saved_at: r.saved_at,
                    match_ended: r.match_ended,
                })
                .collect();
            HttpResponse::Ok().json(items)
        }
        Err(e) => store_error_response(e),
    }
}

/// Statistics of a saved match (finished or not), without resuming it.
#[get("/api/saves/{id}/stats")]
async fn api_saved_stats(store: Data<SharedStore>, path: Path<MatchPath>) -> HttpResponse {
    let loaded = store
        .load(path.id)
        .and_then(|r: SavedMatch| TennisMatch::from_saved(r).map_err(StoreError::from));
    match loaded {
        Ok(m) => HttpResponse::Ok().json(match_summaries(&m)),
        Err(e) => store_error_response(e),
    }
}

/// Load an unfinished save back into memory to keep scoring it. A match
/// still in memory is returned as it stands; the older save never replaces it.
#[post("/api/saves/{id}/resume")]
async fn api_resume_save(
    state: AppState,
    store: Data<SharedStore>,
    path: Path<MatchPath>,
) -> HttpResponse {
    let mut g = match state.write() {
        Ok(guard) => guard,
        Err(_) => return HttpResponse::InternalServerError().body("lock error"),
    };
    if let Some(entry) = g.get_mut(&path.id) {
        entry.last_activity = Instant::now();
        return HttpResponse::Ok().json(MatchView::from_match(entry.session.tennis_match()));
    }
    let session = match MatchSession::resume(store.get_ref().clone(), path.id) {
        Ok(s) => s,
        Err(e) => return store_error_response(e),
    };
    if session.tennis_match().is_over() {
        return HttpResponse::BadRequest().json(error_json("The match is already over"));
    }
    let view = MatchView::from_match(session.tennis_match());
    g.insert(
        view.id,
        MatchEntry {
            session,
            last_activity: Instant::now(),
        },
    );
    HttpResponse::Ok().json(view)
}

#[delete("/api/saves/{id}")]
async fn api_delete_save(store: Data<SharedStore>, path: Path<MatchPath>) -> HttpResponse {
    let mut store = store.get_ref().clone();
    match store.delete(path.id) {
        Ok(()) => HttpResponse::NoContent().finish(),
        Err(e) => store_error_response(e),
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_data_file() -> String {
    "statspoint_data.json".to_string()
}

#[actix_web::main]
async fn main() -> std::io::Result<()> {
    env_logger::init_from_env(env_logger::Env::new().default_filter_or("info"));

    let host = std::env::var("HOST").unwrap_or_else(|_| default_host());
    let port: u16 = std::env::var("PORT")
        .ok()
        .and_then(|p| p.parse().ok())
        .unwrap_or_else(default_port);
    let data_file = std::env::var("DATA_FILE").unwrap_or_else(|_| default_data_file());
    let bind = (host.as_str(), port);
    log::info!("Starting server at http://{}:{}", bind.0, bind.1);
    log::info!("Match saves in {}", data_file);

    let state = Data::new(RwLock::new(HashMap::<MatchId, MatchEntry>::new()));
    let store: Data<SharedStore> = Data::new(Arc::new(Mutex::new(JsonFileStore::new(data_file))));

    // Background task: every 30 minutes, drop matches inactive for 12+ hours
    let state_cleanup = state.clone();
    actix_web::rt::spawn(async move {
        let mut interval = tokio::time::interval(Duration::from_secs(30 * 60));
        loop {
            interval.tick().await;
            let mut g = match state_cleanup.write() {
                Ok(guard) => guard,
                Err(_) => continue,
            };
            let before = g.len();
            g.retain(|_, entry| entry.last_activity.elapsed() < INACTIVITY_TIMEOUT);
            let removed = before - g.len();
            if removed > 0 {
                log::info!("Cleaned up {} inactive match(es) (no activity for 12h)", removed);
            }
        }
    });

    HttpServer::new(move || {
        App::new()
            .app_data(state.clone())
            .app_data(store.clone())
            .service(api_health)
            .service(api_create_match)
            .service(api_get_match)
            .service(api_report_point)
            .service(api_save_match)
            .service(api_match_stats_csv)
            .service(api_match_stats)
            .service(api_list_saves)
            .service(api_saved_stats)
            .service(api_resume_save)
            .service(api_delete_save)
    })
    .bind(bind)?
    .run()
    .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::test;
    use serde_json::{json, Value};

    #[actix_web::test]
    async fn resuming_a_live_match_keeps_its_unsaved_points() {
        let dir = tempfile::tempdir().unwrap();
        let state = Data::new(RwLock::new(HashMap::<MatchId, MatchEntry>::new()));
        let store: Data<SharedStore> = Data::new(Arc::new(Mutex::new(JsonFileStore::new(
            dir.path().join("saves.json"),
        ))));
        let app = test::init_service(
            App::new()
                .app_data(state.clone())
                .app_data(store.clone())
                .service(api_create_match)
                .service(api_report_point)
                .service(api_save_match)
                .service(api_resume_save),
        )
        .await;

        let created: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri("/api/matches")
                .set_json(json!({
                    "match_name": "Final",
                    "player1": "Alice",
                    "player2": "Bob",
                    "server": "one"
                }))
                .to_request(),
        )
        .await;
        let id = created["id"].as_str().unwrap().to_string();

        let save = test::TestRequest::post()
            .uri(&format!("/api/matches/{}/save", id))
            .to_request();
        assert!(test::call_service(&app, save).await.status().is_success());

        let point: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/matches/{}/points", id))
                .set_json(json!({
                    "type": "rally",
                    "winner": "one",
                    "ending": { "kind": "winner", "shot": "forehand" }
                }))
                .to_request(),
        )
        .await;
        assert_eq!(point["match"]["players"][0]["points"], "15");

        let resumed: Value = test::call_and_read_body_json(
            &app,
            test::TestRequest::post()
                .uri(&format!("/api/saves/{}/resume", id))
                .to_request(),
        )
        .await;
        assert_eq!(resumed["players"][0]["points"], "15");
        assert_eq!(state.read().unwrap().len(), 1);
    }
}
