use std::sync::{Arc, Mutex};

use axum::{
    extract::{
        rejection::{JsonRejection, PathRejection, QueryRejection},
        Path, Query, State,
    },
    middleware,
    routing::{get, post},
    Json, Router,
};
use chrono::Timelike;
use serde::Serialize;
use tracing::{debug, info, warn};

use crate::api::health::{HealthResponse, HealthState};
use crate::api::latency::{track_requests, LatencyResponse, LatencyStats};
use crate::api::validation::{
    CreateGameRequest, CreateSignalRequest, FeedbackRequest, HistoryQuery, ResultRequest,
    StatsQuery,
};
use crate::clock::{civil_minutes_of_day, civil_time, Clock};
use crate::error::{AppError, Result};
use crate::generator::random::RandomSource;
use crate::generator::slots::{in_profitable_hours, profitable_slots};
use crate::generator::SignalGenerator;
use crate::state::{GameCatalog, SignalStore};
use crate::types::{Game, Signal, SignalStats};

/// Everything a handler can reach. Built once in `run()` (or per test) and
/// cloned into each request.
#[derive(Clone)]
pub struct ApiState {
    pub catalog: Arc<GameCatalog>,
    pub store: Arc<SignalStore>,
    pub generator: SignalGenerator,
    pub rng: Arc<Mutex<Box<dyn RandomSource>>>,
    pub clock: Arc<dyn Clock>,
    pub health: Arc<HealthState>,
    pub latency: Arc<LatencyStats>,
    pub history_limit_max: usize,
}

impl ApiState {
    pub fn new(
        clock: Arc<dyn Clock>,
        rng: Box<dyn RandomSource>,
        history_limit_max: usize,
    ) -> Result<Self> {
        Ok(Self {
            catalog: GameCatalog::seeded(),
            store: SignalStore::new(Arc::clone(&clock)),
            generator: SignalGenerator::default(),
            rng: Arc::new(Mutex::new(rng)),
            clock,
            health: Arc::new(HealthState::new()),
            latency: Arc::new(LatencyStats::new()?),
            history_limit_max,
        })
    }
}

pub fn router(state: ApiState) -> Router {
    Router::new()
        .route("/healthz", get(healthz))
        .route("/api/health", get(get_health))
        .route("/api/clock", get(get_clock))
        .route("/api/games", get(list_games).post(create_game))
        .route("/api/games/:id", get(get_game))
        .route("/api/signals", post(create_signal))
        .route("/api/signals/generate/:game_id", post(generate_signal))
        .route("/api/signals/game/:game_id", get(list_signals_for_game))
        .route("/api/signals/recent", get(list_recent_signals))
        .route("/api/signals/stats", get(get_stats))
        .route("/api/signals/:id", get(get_signal).patch(set_result))
        .route("/api/signals/:id/feedback", post(set_feedback))
        .route("/api/stats/latency", get(get_stats_latency))
        .layer(middleware::from_fn_with_state(state.clone(), track_requests))
        .with_state(state)
}

// ---------------------------------------------------------------------------
// Extractor results
// ---------------------------------------------------------------------------

type IdPath = std::result::Result<Path<u64>, PathRejection>;
type QueryParams<T> = std::result::Result<Query<T>, QueryRejection>;

/// Ids in the URL that are not unsigned integers name no record; they resolve
/// like any other unknown id.
fn path_id(path: IdPath) -> Option<u64> {
    path.ok().map(|Path(id)| id)
}

fn game_not_found() -> AppError {
    AppError::NotFound("Game not found".to_string())
}

fn signal_not_found() -> AppError {
    AppError::NotFound("Signal not found".to_string())
}

// ---------------------------------------------------------------------------
// Response types
// ---------------------------------------------------------------------------

#[derive(Debug, Serialize)]
pub struct FeedbackResponse {
    pub message: String,
    pub signal: Signal,
}

#[derive(Debug, Serialize)]
pub struct SlotResponse {
    pub start: String,
    pub end: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ClockResponse {
    /// `HH:MM:SS`, civil UTC-3.
    pub time: String,
    pub date: String,
    pub in_profitable_hours: bool,
    pub upcoming_slots: Vec<SlotResponse>,
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn healthz() -> &'static str {
    "OK"
}

async fn get_health(State(state): State<ApiState>) -> Json<HealthResponse> {
    Json(state.health.snapshot(state.catalog.len(), state.store.len()))
}

async fn get_clock(State(state): State<ApiState>) -> Json<ClockResponse> {
    let now = state.clock.now();
    let civil = civil_time(now);
    let minutes = civil_minutes_of_day(now);
    Json(ClockResponse {
        time: format!("{:02}:{:02}:{:02}", civil.hour(), civil.minute(), civil.second()),
        date: civil.format("%Y-%m-%d").to_string(),
        in_profitable_hours: in_profitable_hours(minutes),
        upcoming_slots: profitable_slots(minutes)
            .iter()
            .map(|s| SlotResponse {
                start: s.start_label(),
                end: s.end_label(),
            })
            .collect(),
    })
}

async fn list_games(State(state): State<ApiState>) -> Json<Vec<Game>> {
    Json(state.catalog.list())
}

async fn get_game(State(state): State<ApiState>, path: IdPath) -> Result<Json<Game>> {
    let id = path_id(path).ok_or_else(game_not_found)?;
    let game = state.catalog.get_by_id(id).inspect_err(|_| {
        debug!(game_id = id, "game lookup missed");
    })?;
    Ok(Json(game))
}

async fn create_game(
    State(state): State<ApiState>,
    payload: std::result::Result<Json<CreateGameRequest>, JsonRejection>,
) -> Result<Json<Game>> {
    let Json(body) = payload?;
    let new_game = body.validate().inspect_err(|e| warn!("Rejected game body: {e}"))?;
    let game = state.catalog.create_game(new_game);
    info!(game_id = game.id, provider = %game.provider, "Game added to catalog: {}", game.name);
    Ok(Json(game))
}

async fn generate_signal(
    State(state): State<ApiState>,
    path: IdPath,
) -> Result<Json<Signal>> {
    let game_id = path_id(path).ok_or_else(game_not_found)?;
    let game = state.catalog.get_by_id(game_id).inspect_err(|_| {
        debug!(game_id, "signal requested for unknown game");
    })?;
    let now = state.clock.now();
    let draft = {
        let mut rng = state.rng.lock().unwrap_or_else(|e| e.into_inner());
        state.generator.generate(&game, now, &mut **rng)
    };
    let signal = state.store.create_signal(draft);
    state.health.inc_signals_generated();

    info!(
        signal_id = signal.id,
        game_id,
        provider = %game.provider,
        strength = %signal.strength,
        algorithm = %signal.algorithm,
        "Signal generated | {} | {} {}% | window {}–{}",
        game.display_name,
        signal.strength,
        signal.confidence,
        signal.profitable_time_start,
        signal.profitable_time_end,
    );
    Ok(Json(signal))
}

async fn create_signal(
    State(state): State<ApiState>,
    payload: std::result::Result<Json<CreateSignalRequest>, JsonRejection>,
) -> Result<Json<Signal>> {
    let Json(body) = payload?;
    let draft = body
        .validate(&state.catalog)
        .inspect_err(|e| warn!("Rejected signal body: {e}"))?;
    let signal = state.store.create_signal(draft);
    info!(signal_id = signal.id, game_id = signal.game_id, "Signal inserted directly");
    Ok(Json(signal))
}

async fn list_signals_for_game(
    State(state): State<ApiState>,
    path: IdPath,
    query: QueryParams<HistoryQuery>,
) -> Result<Json<Vec<Signal>>> {
    let Query(params) = query?;
    let limit = params.validate(state.history_limit_max)?;
    // An unparsable game id matches no signal.
    let signals = match path_id(path) {
        Some(game_id) => state.store.signals_by_game(game_id, limit),
        None => Vec::new(),
    };
    Ok(Json(signals))
}

async fn list_recent_signals(
    State(state): State<ApiState>,
    query: QueryParams<HistoryQuery>,
) -> Result<Json<Vec<Signal>>> {
    let Query(params) = query?;
    let limit = params.validate(state.history_limit_max)?;
    Ok(Json(state.store.recent_signals(limit)))
}

async fn get_signal(State(state): State<ApiState>, path: IdPath) -> Result<Json<Signal>> {
    let id = path_id(path).ok_or_else(signal_not_found)?;
    Ok(Json(state.store.get(id)?))
}

async fn set_result(
    State(state): State<ApiState>,
    path: IdPath,
    payload: std::result::Result<Json<ResultRequest>, JsonRejection>,
) -> Result<Json<Signal>> {
    let Json(body) = payload?;
    let result = body.validate()?;
    let id = path_id(path).ok_or_else(signal_not_found)?;
    let signal = state.store.update_result(id, result)?;
    state.health.inc_results_recorded();
    info!(signal_id = id, result = %result, "Signal result recorded");
    Ok(Json(signal))
}

async fn set_feedback(
    State(state): State<ApiState>,
    path: IdPath,
    payload: std::result::Result<Json<FeedbackRequest>, JsonRejection>,
) -> Result<Json<FeedbackResponse>> {
    let Json(body) = payload?;
    let feedback = body.validate()?;
    let id = path_id(path).ok_or_else(signal_not_found)?;
    let signal = state.store.update_feedback(id, feedback)?;
    state.health.inc_feedback_recorded();
    info!(signal_id = id, feedback = %feedback, "Signal feedback recorded");
    Ok(Json(FeedbackResponse {
        message: "Feedback recorded".to_string(),
        signal,
    }))
}

async fn get_stats(
    State(state): State<ApiState>,
    query: QueryParams<StatsQuery>,
) -> Result<Json<SignalStats>> {
    let Query(params) = query?;
    Ok(Json(state.store.stats(params.validate()?)))
}

async fn get_stats_latency(State(state): State<ApiState>) -> Json<LatencyResponse> {
    Json(state.latency.snapshot())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::FixedClock;
    use crate::generator::random::{rng_from_seed, ScriptedRandom};
    use crate::types::{Feedback, Provider, SignalResult, Strength};
    use serde_json::{json, Value};

    fn test_state() -> ApiState {
        ApiState::new(
            Arc::new(FixedClock::at_civil(10, 0)),
            Box::new(rng_from_seed(Some(11))),
            100,
        )
        .unwrap()
    }

    fn id(n: u64) -> IdPath {
        Ok(Path(n))
    }

    fn history(limit: Option<&str>) -> QueryParams<HistoryQuery> {
        Ok(Query(HistoryQuery { limit: limit.map(String::from) }))
    }

    fn stats_for(game_id: Option<&str>) -> QueryParams<StatsQuery> {
        Ok(Query(StatsQuery { game_id: game_id.map(String::from) }))
    }

    fn result_body(result: &str) -> std::result::Result<Json<ResultRequest>, JsonRejection> {
        Ok(Json(ResultRequest { result: Some(result.to_string()) }))
    }

    fn feedback_body(feedback: &str) -> std::result::Result<Json<FeedbackRequest>, JsonRejection> {
        Ok(Json(FeedbackRequest { feedback: Some(feedback.to_string()) }))
    }

    async fn generate(state: &ApiState, game_id: u64) -> Signal {
        generate_signal(State(state.clone()), id(game_id))
            .await
            .unwrap()
            .0
    }

    fn signal_body(game_id: i64) -> CreateSignalRequest {
        CreateSignalRequest {
            game_id: Some(game_id),
            strength: Some("MEDIUM".to_string()),
            strength_level: Some(2),
            recommendation: Some("WAIT".to_string()),
            confidence: Some(82),
            assertiveness: Some(85),
            normal_spins: Some(5),
            turbo_spins: Some(3),
            auto_mode: Some(false),
            profitable_time_start: Some("08:00".to_string()),
            profitable_time_end: Some("08:45".to_string()),
            betting_houses: Some(vec!["Bet365".into(), "Betano".into(), "Betway".into()]),
            algorithm: Some("EXTERNAL_FEED".to_string()),
            result: None,
            user_feedback: None,
        }
    }

    // -----------------------------------------------------------------------
    // Handlers
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn list_games_returns_seed_catalog() {
        let Json(games) = list_games(State(test_state())).await;
        assert_eq!(games.len(), 8);
        assert_eq!(games[0].name, "fortune-rabbit");
    }

    #[tokio::test]
    async fn get_game_unknown_is_not_found() {
        let err = get_game(State(test_state()), id(404)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
    }

    #[tokio::test]
    async fn generate_uses_game_provider_and_clock() {
        let state = test_state();
        let signal = generate(&state, 2).await;
        assert_eq!(signal.id, 1);
        assert_eq!(signal.game_id, 2);
        assert!(signal.algorithm.starts_with("PG_SOFT_CYCLE_v2.1_FORTUNE-TIGER"));
        assert!((94..=99).contains(&signal.assertiveness));
        assert!((80..=99).contains(&signal.confidence));
        assert_eq!(signal.profitable_time_start, "10:15");
        assert_eq!(signal.profitable_time_end, "11:00");
        assert_eq!(signal.created_at, state.clock.now());
        assert_eq!(state.store.len(), 1);
    }

    #[tokio::test]
    async fn generate_for_unknown_game_stores_nothing() {
        let state = test_state();
        let err = generate_signal(State(state.clone()), id(99)).await.unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(state.store.len(), 0);
    }

    #[tokio::test]
    async fn generate_with_scripted_draws_is_deterministic() {
        let state = ApiState::new(
            Arc::new(FixedClock::at_civil(10, 0)),
            Box::new(ScriptedRandom::constant(0.35)),
            100,
        )
        .unwrap();
        let signal = generate(&state, 1).await;
        assert_eq!(signal.strength, Strength::Strong);
        // 80 + floor(0.35 * 20)
        assert_eq!(signal.confidence, 87);
    }

    #[tokio::test]
    async fn direct_insert_then_recent() {
        let state = test_state();
        generate(&state, 6).await;
        let Json(inserted) = create_signal(State(state.clone()), Ok(Json(signal_body(6))))
            .await
            .unwrap();
        assert_eq!(inserted.id, 2);
        assert_eq!(inserted.algorithm, "EXTERNAL_FEED");

        let Json(recent) = list_recent_signals(State(state.clone()), history(Some("1")))
            .await
            .unwrap();
        assert_eq!(recent, vec![inserted]);
    }

    #[tokio::test]
    async fn direct_insert_rejects_bad_body() {
        let state = test_state();
        let mut body = signal_body(1);
        body.assertiveness = Some(-5);
        let err = create_signal(State(state.clone()), Ok(Json(body))).await.unwrap_err();
        assert!(matches!(err, AppError::InvalidInput { .. }));

        let err = create_signal(State(state.clone()), Ok(Json(signal_body(50))))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(state.store.len(), 0);
    }

    #[tokio::test]
    async fn history_limit_is_capped() {
        let state = ApiState::new(
            Arc::new(FixedClock::at_civil(10, 0)),
            Box::new(rng_from_seed(Some(5))),
            12,
        )
        .unwrap();
        for _ in 0..15 {
            generate(&state, 7).await;
        }
        let Json(all) = list_signals_for_game(State(state.clone()), id(7), history(Some("500")))
            .await
            .unwrap();
        assert_eq!(all.len(), 12);
        let Json(default) = list_signals_for_game(State(state.clone()), id(7), history(None))
            .await
            .unwrap();
        assert_eq!(default.len(), 10);
        assert_eq!(default[0].id, 15);
    }

    #[tokio::test]
    async fn malformed_history_limit_is_invalid_input() {
        let err = list_recent_signals(State(test_state()), history(Some("abc")))
            .await
            .unwrap_err();
        match err {
            AppError::InvalidInput { errors, .. } => assert_eq!(errors[0].field, "limit"),
            other => panic!("expected InvalidInput, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn result_feedback_and_stats_flow() {
        let state = test_state();
        let a = generate(&state, 3).await;
        let b = generate(&state, 3).await;
        generate(&state, 3).await;
        generate(&state, 4).await;

        let Json(won) = set_result(State(state.clone()), id(a.id), result_body("WIN"))
            .await
            .unwrap();
        assert_eq!(won.result, Some(SignalResult::Win));
        let Json(lost) = set_result(State(state.clone()), id(b.id), result_body("LOSS"))
            .await
            .unwrap();
        assert_eq!(lost.result, Some(SignalResult::Loss));

        let Json(fb) = set_feedback(State(state.clone()), id(a.id), feedback_body("WORKED"))
            .await
            .unwrap();
        assert_eq!(fb.signal.user_feedback, Some(Feedback::Worked));
        assert_eq!(fb.signal.result, Some(SignalResult::Win));
        assert_eq!(fb.signal.algorithm, a.algorithm);

        let Json(stats) = get_stats(State(state.clone()), stats_for(Some("3"))).await.unwrap();
        assert_eq!(stats, SignalStats { total_signals: 3, win_rate: 50, wins: 1, losses: 1 });

        let Json(all) = get_stats(State(state.clone()), stats_for(None)).await.unwrap();
        assert_eq!(all.total_signals, 4);

        let Json(health) = get_health(State(state.clone())).await;
        assert_eq!(health.signals_generated, 4);
        assert_eq!(health.results_recorded, 2);
        assert_eq!(health.feedback_recorded, 1);
    }

    #[tokio::test]
    async fn mutations_on_missing_signal_are_not_found() {
        let state = test_state();
        let err = set_result(State(state.clone()), id(9), result_body("WIN"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));

        let err = set_feedback(State(state.clone()), id(9), feedback_body("WORKED"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::NotFound(_)));
        assert_eq!(state.store.len(), 0);
    }

    #[tokio::test]
    async fn invalid_result_value_is_rejected_before_lookup() {
        let state = test_state();
        let s = generate(&state, 1).await;
        let err = set_result(State(state.clone()), id(s.id), result_body("PUSH"))
            .await
            .unwrap_err();
        assert!(matches!(err, AppError::InvalidInput { .. }));
        let Json(unchanged) = get_signal(State(state.clone()), id(s.id)).await.unwrap();
        assert!(unchanged.result.is_none());
        assert!(get_signal(State(state), id(s.id + 1)).await.is_err());
    }

    #[tokio::test]
    async fn create_game_extends_catalog() {
        let state = test_state();
        let body = CreateGameRequest {
            name: Some("aviator".to_string()),
            display_name: Some("Aviator".to_string()),
            provider: Some("Spribe".to_string()),
            assertiveness_level: Some(80),
            ..Default::default()
        };
        let Json(game) = create_game(State(state.clone()), Ok(Json(body))).await.unwrap();
        assert_eq!(game.id, 9);
        assert_eq!(game.provider, Provider::Other("Spribe".to_string()));

        let signal = generate(&state, 9).await;
        assert_eq!(signal.algorithm, "GENERIC_ALGORITHM_v1.0");
        assert_eq!(signal.assertiveness, 85);
    }

    #[tokio::test]
    async fn clock_reports_civil_time_and_slots() {
        let Json(clock) = get_clock(State(test_state())).await;
        assert_eq!(clock.time, "10:00:00");
        assert_eq!(clock.date, "2024-01-15");
        assert!(!clock.in_profitable_hours);
        assert_eq!(clock.upcoming_slots.len(), 4);
        assert_eq!(clock.upcoming_slots[0].start, "10:15");
        assert_eq!(clock.upcoming_slots[3].end, "17:30");
    }

    // -----------------------------------------------------------------------
    // Router over a real socket
    // -----------------------------------------------------------------------

    /// Serves `router(state)` on an ephemeral port and returns its base URL.
    async fn serve(state: ApiState) -> String {
        let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, router(state)).await.unwrap();
        });
        format!("http://{addr}")
    }

    async fn json_of(resp: reqwest::Response) -> (u16, Value) {
        let status = resp.status().as_u16();
        let content_type = resp
            .headers()
            .get(reqwest::header::CONTENT_TYPE)
            .and_then(|v| v.to_str().ok())
            .unwrap_or_default()
            .to_string();
        assert!(content_type.starts_with("application/json"), "content-type {content_type:?}");
        (status, resp.json().await.unwrap())
    }

    #[tokio::test]
    async fn generate_recent_stats_over_http() {
        let state = test_state();
        let latency = Arc::clone(&state.latency);
        let base = serve(state).await;
        let client = reqwest::Client::new();

        let (status, signal) =
            json_of(client.post(format!("{base}/api/signals/generate/2")).send().await.unwrap())
                .await;
        assert_eq!(status, 200);
        assert_eq!(signal["id"], 1);
        assert_eq!(signal["gameId"], 2);
        assert_eq!(signal["profitableTimeStart"], "10:15");

        let (status, recent) =
            json_of(client.get(format!("{base}/api/signals/recent?limit=5")).send().await.unwrap())
                .await;
        assert_eq!(status, 200);
        assert_eq!(recent.as_array().map(Vec::len), Some(1));
        assert_eq!(recent[0]["id"], 1);

        let (status, won) = json_of(
            client
                .patch(format!("{base}/api/signals/1"))
                .json(&json!({ "result": "WIN" }))
                .send()
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(won["result"], "WIN");

        let (status, fb) = json_of(
            client
                .post(format!("{base}/api/signals/1/feedback"))
                .json(&json!({ "feedback": "WORKED" }))
                .send()
                .await
                .unwrap(),
        )
        .await;
        assert_eq!(status, 200);
        assert_eq!(fb["signal"]["userFeedback"], "WORKED");

        let (status, stats) =
            json_of(client.get(format!("{base}/api/signals/stats?gameId=2")).send().await.unwrap())
                .await;
        assert_eq!(status, 200);
        assert_eq!(stats, json!({ "totalSignals": 1, "winRate": 100, "wins": 1, "losses": 0 }));

        let (status, one) =
            json_of(client.get(format!("{base}/api/signals/1")).send().await.unwrap()).await;
        assert_eq!(status, 200);
        assert_eq!(one["userFeedback"], "WORKED");

        let healthz = client.get(format!("{base}/healthz")).send().await.unwrap();
        assert_eq!(healthz.text().await.unwrap(), "OK");

        // Six /api requests so far; /healthz is not timed.
        assert_eq!(latency.snapshot().sample_count, 6);
        let (_, snapshot) =
            json_of(client.get(format!("{base}/api/stats/latency")).send().await.unwrap()).await;
        assert_eq!(snapshot["sample_count"], 6);
    }

    #[tokio::test]
    async fn verbs_are_bound_to_their_routes() {
        let base = serve(test_state()).await;
        let client = reqwest::Client::new();

        let resp = client.get(format!("{base}/api/signals/generate/1")).send().await.unwrap();
        assert_eq!(resp.status().as_u16(), 405);
        let resp = client
            .post(format!("{base}/api/signals/1"))
            .json(&json!({ "result": "WIN" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 405);
        let resp = client
            .patch(format!("{base}/api/signals/1/feedback"))
            .json(&json!({ "feedback": "WORKED" }))
            .send()
            .await
            .unwrap();
        assert_eq!(resp.status().as_u16(), 405);
    }

    #[tokio::test]
    async fn malformed_url_values_answer_in_json() {
        let base = serve(test_state()).await;
        let client = reqwest::Client::new();
        let get = |path: &str| client.get(format!("{base}{path}")).send();

        let (status, body) = json_of(get("/api/signals/recent?limit=abc").await.unwrap()).await;
        assert_eq!(status, 400);
        assert_eq!(body["errors"][0]["field"], "limit");

        let (status, body) = json_of(get("/api/signals/stats?gameId=x").await.unwrap()).await;
        assert_eq!(status, 400);
        assert_eq!(body["errors"][0]["field"], "gameId");

        let (status, body) = json_of(get("/api/signals/recent?limit=1&limit=2").await.unwrap()).await;
        assert_eq!(status, 400);
        assert!(body["message"].is_string());

        let (status, body) = json_of(get("/api/games/abc").await.unwrap()).await;
        assert_eq!(status, 404);
        assert_eq!(body["message"], "Game not found");

        let (status, body) = json_of(get("/api/signals/xyz").await.unwrap()).await;
        assert_eq!(status, 404);
        assert_eq!(body["message"], "Signal not found");

        let (status, body) = json_of(
            client.post(format!("{base}/api/signals/generate/-1")).send().await.unwrap(),
        )
        .await;
        assert_eq!(status, 404);
        assert_eq!(body["message"], "Game not found");

        let (status, body) = json_of(get("/api/signals/game/abc").await.unwrap()).await;
        assert_eq!(status, 200);
        assert_eq!(body, json!([]));
    }
}
