use anyhow::{Context, Result};
use std::{
    sync::Arc,
    time::{Duration, Instant},
};

use tracing::{debug, error, info};

use crate::catalog::{Catalog, Song};
use crate::mood::{self, Emotion};
use tower_http::{catch_panic::CatchPanicLayer, cors::CorsLayer, services::ServeDir};

use axum::{
    extract::{rejection::JsonRejection, Path, State},
    http::StatusCode,
    middleware,
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::error::ApiError;
use super::metrics::{metrics_handler, record_classification, record_error, record_mood_request};
use super::{handle_panic, log_requests, state::*, ServerConfig};

#[derive(Serialize)]
struct ServerStats {
    pub uptime: String,
    pub version: String,
    pub songs: usize,
    pub classifier_loaded: bool,
}

fn format_uptime(duration: Duration) -> String {
    let total_seconds = duration.as_secs();

    let days = total_seconds / 86_400;
    let hours = (total_seconds % 86_400) / 3600;
    let minutes = (total_seconds % 3600) / 60;
    let seconds = total_seconds % 60;

    format!("{}d {:02}:{:02}:{:02}", days, hours, minutes, seconds)
}

#[derive(Serialize, Debug, PartialEq)]
struct SongSummary<'a> {
    track_id: &'a str,
    artists: &'a str,
    track_name: &'a str,
}

impl<'a> From<&'a Song> for SongSummary<'a> {
    fn from(song: &'a Song) -> Self {
        SongSummary {
            track_id: &song.track_id,
            artists: &song.artists,
            track_name: &song.track_name,
        }
    }
}

enum SongsResponse<'a> {
    Songs(Vec<SongSummary<'a>>),
    NoSongs(Emotion),
}

impl IntoResponse for SongsResponse<'_> {
    fn into_response(self) -> Response {
        match self {
            SongsResponse::Songs(songs) => {
                (StatusCode::OK, Json(serde_json::json!({ "songs": songs }))).into_response()
            }
            SongsResponse::NoSongs(emotion) => (
                StatusCode::OK,
                Json(serde_json::json!({
                    "message": format!("No songs found for emotion: {}", emotion)
                })),
            )
                .into_response(),
        }
    }
}

#[derive(Deserialize, Debug)]
struct AnalyzeMoodBody {
    pub text: Option<String>,
}

async fn home(State(state): State<ServerState>) -> impl IntoResponse {
    let stats = ServerStats {
        uptime: format_uptime(state.start_time.elapsed()),
        version: env!("CARGO_PKG_VERSION").to_owned(),
        songs: state.catalog.get_songs_count(),
        classifier_loaded: state.classifier.is_some(),
    };
    Json(stats)
}

async fn get_songs(
    State(catalog): State<GuardedCatalog>,
    Path(raw_emotion): Path<String>,
) -> Response {
    let emotion = match raw_emotion.parse::<Emotion>() {
        Ok(emotion) => emotion,
        Err(err) => {
            debug!("Rejected emotion {:?}", raw_emotion);
            record_mood_request("invalid", "invalid");
            return ApiError::from(err).into_response();
        }
    };

    let songs: Vec<SongSummary> = mood::select(&catalog, emotion)
        .into_iter()
        .map(SongSummary::from)
        .collect();

    if songs.is_empty() {
        record_mood_request(emotion.name(), "empty");
        SongsResponse::NoSongs(emotion).into_response()
    } else {
        record_mood_request(emotion.name(), "songs");
        SongsResponse::Songs(songs).into_response()
    }
}

async fn analyze_mood(
    State(classifier): State<OptionalClassifier>,
    payload: Result<Json<AnalyzeMoodBody>, JsonRejection>,
) -> Result<impl IntoResponse, ApiError> {
    let result = classify_payload(classifier, payload);
    if let Err(err) = &result {
        record_error(err.kind(), "analyze_mood");
        if err.status().is_server_error() {
            error!("Mood analysis failed: {}", err);
        }
    }
    result.map(Json)
}

fn classify_payload(
    classifier: OptionalClassifier,
    payload: Result<Json<AnalyzeMoodBody>, JsonRejection>,
) -> Result<crate::classifier::Prediction, ApiError> {
    let Json(body) = payload.map_err(|rejection| ApiError::BadRequest(rejection.body_text()))?;
    let text = match body.text {
        Some(text) if !text.is_empty() => text,
        _ => return Err(ApiError::NoText),
    };
    let classifier = classifier.ok_or(ApiError::ClassifierUnavailable)?;

    let start = Instant::now();
    let prediction = classifier
        .classify(&text)
        .map_err(|err| ApiError::Internal(err.to_string()))?;
    record_classification(&prediction.emotion, start.elapsed());
    debug!(
        "Classified {} chars as {} ({:.3})",
        text.chars().count(),
        prediction.emotion,
        prediction.confidence
    );
    Ok(prediction)
}

pub fn make_app(
    config: ServerConfig,
    catalog: GuardedCatalog,
    classifier: OptionalClassifier,
) -> Result<Router> {
    let state = ServerState::new(config.clone(), catalog, classifier);

    let mood_routes: Router = Router::new()
        .route("/get_songs/{emotion}", get(get_songs))
        .route("/analyze_mood", post(analyze_mood))
        .with_state(state.clone());

    let home_router: Router = match config.frontend_dir_path {
        Some(frontend_path) => {
            let static_files_service =
                ServeDir::new(frontend_path).append_index_html_on_directories(true);
            Router::new().fallback_service(static_files_service)
        }
        None => Router::new()
            .route("/", get(home))
            .with_state(state.clone()),
    };

    let app: Router = home_router
        .merge(mood_routes)
        .layer(CatchPanicLayer::custom(handle_panic))
        .layer(middleware::from_fn_with_state(state.clone(), log_requests))
        .layer(CorsLayer::permissive());

    Ok(app)
}

pub fn make_metrics_app() -> Router {
    Router::new().route("/metrics", get(metrics_handler))
}

pub async fn run_server(
    config: ServerConfig,
    catalog: Catalog,
    classifier: OptionalClassifier,
) -> Result<()> {
    let bind_address = config.bind_address.clone();
    let port = config.port;
    let metrics_port = config.metrics_port;
    let app = make_app(config, Arc::new(catalog), classifier)?;

    let metrics_listener = tokio::net::TcpListener::bind((bind_address.as_str(), metrics_port))
        .await
        .with_context(|| format!("Could not bind metrics port {}", metrics_port))?;
    tokio::spawn(async move {
        if let Err(err) = axum::serve(metrics_listener, make_metrics_app()).await {
            error!("Metrics server stopped: {}", err);
        }
    });

    let listener = tokio::net::TcpListener::bind((bind_address.as_str(), port))
        .await
        .with_context(|| format!("Could not bind {}:{}", bind_address, port))?;
    info!("Listening on {}:{}", bind_address, port);

    Ok(axum::serve(listener, app).await?)
}
