use crate::config::AppConfig;
use crate::coordinator::{self, ChatError};
use crate::language::SUPPORTED_LANGUAGES;
use crate::llm_client::ResponseGenerator;
use crate::types::{ChatRequest, ResponsePayload};
use axum::{
    extract::{rejection::JsonRejection, State},
    http::{Method, StatusCode, Uri},
    response::{IntoResponse, Response},
    routing::{get, post},
    Json, Router,
};
use serde::Serialize;
use serde_json::json;
use std::any::Any;
use std::net::SocketAddr;
use std::sync::Arc;
use tower::ServiceBuilder;
use tower_http::catch_panic::CatchPanicLayer;
use tower_http::cors::{Any as AnyOrigin, CorsLayer};
use tower_http::trace::TraceLayer;
use tracing::{error, info, info_span, warn, Instrument};
use uuid::Uuid;

const PROMPT_FOR_INPUT: &str = "कृपया अपना मन की बात साझा करें। मैं यहाँ सुनने के लिए हूँ। 💙 / Please share what's on your mind. I'm here to listen. 💙";
const NOT_CONFIGURED: &str = "AI सेवा सही तरीके से कॉन्फ़िगर नहीं है। कृपया API key जाँचें। 💙 / AI service is not properly configured. Please check your API key. 💙";
const APOLOGY: &str = "मुझे खेद है, लेकिन मुझे अभी परेशानी हो रही है। तत्काल सहायता के लिए कृपया किसी काउंसलर से संपर्क करें। 💙 / I apologize, but I'm having trouble right now. Please reach out to a counselor if you need immediate support. 💙";

const SERVICE_NAME: &str = "MindCare Mental Health Chatbot - Indian Languages";
const AVAILABLE_ROUTES: &[&str] = &["GET /health", "POST /api/chat"];

/// Application state shared with all routes
#[derive(Clone)]
pub struct AppState {
    config: Arc<AppConfig>,
    generator: Option<Arc<dyn ResponseGenerator>>,
}

impl AppState {
    /// `generator` is `None` when no API key is configured; chat requests then answer 500.
    pub fn new(config: AppConfig, generator: Option<Arc<dyn ResponseGenerator>>) -> Self {
        Self {
            config: Arc::new(config),
            generator,
        }
    }
}

/// Internal-failure body: the full reply contract plus an error marker
#[derive(Serialize)]
struct ErrorReply {
    #[serde(flatten)]
    payload: ResponsePayload,
    error: &'static str,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HealthResponse {
    status: &'static str,
    timestamp: String,
    service: &'static str,
    ai_configured: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    model: Option<String>,
    supported_languages: &'static [&'static str],
}

/// Error type for HTTP server
#[derive(Debug)]
pub enum ApiError {
    Validation,
    Configuration,
    InternalError(anyhow::Error),
}

impl From<ChatError> for ApiError {
    fn from(e: ChatError) -> Self {
        match e {
            ChatError::MissingMessage => Self::Validation,
            ChatError::NotConfigured => Self::Configuration,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match self {
            Self::Validation => (
                StatusCode::BAD_REQUEST,
                Json(ResponsePayload::notice(PROMPT_FOR_INPUT)),
            )
                .into_response(),
            Self::Configuration => {
                error!("GEMINI_API_KEY is not set; chat is unavailable");
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ResponsePayload::notice(NOT_CONFIGURED)),
                )
                    .into_response()
            }
            Self::InternalError(e) => {
                error!(error = %e, "Internal server error");
                let body = Json(ErrorReply {
                    payload: ResponsePayload::notice(APOLOGY),
                    error: "Server error occurred",
                });
                (StatusCode::INTERNAL_SERVER_ERROR, body).into_response()
            }
        }
    }
}

fn handle_panic(err: Box<dyn Any + Send + 'static>) -> Response {
    let detail = if let Some(s) = err.downcast_ref::<String>() {
        s.clone()
    } else if let Some(s) = err.downcast_ref::<&str>() {
        s.to_string()
    } else {
        "unknown panic payload".to_string()
    };
    ApiError::InternalError(anyhow::anyhow!("handler panicked: {}", detail)).into_response()
}

/// Wrap routes with request tracing, permissive CORS and panic capture.
fn with_middleware<S>(router: Router<S>) -> Router<S>
where
    S: Clone + Send + Sync + 'static,
{
    let cors = CorsLayer::new()
        .allow_origin(AnyOrigin)
        .allow_methods(AnyOrigin)
        .allow_headers(AnyOrigin);

    router.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .layer(CatchPanicLayer::custom(handle_panic)),
    )
}

/// Build the router
pub fn router(state: AppState) -> Router {
    let routes = Router::new()
        .route("/health", get(health))
        .route("/api/chat", post(handle_chat))
        .fallback(not_found);

    with_middleware(routes).with_state(state)
}

/// Start the HTTP server
pub async fn run_server(
    config: AppConfig,
    generator: Option<Arc<dyn ResponseGenerator>>,
    addr: SocketAddr,
) -> anyhow::Result<()> {
    info!("Starting HTTP server on {}", addr);

    let app = router(AppState::new(config, generator));

    axum::Server::bind(&addr)
        .serve(app.into_make_service())
        .with_graceful_shutdown(shutdown_signal())
        .await
        .map_err(|e| anyhow::anyhow!("Failed to start HTTP server: {}", e))
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        warn!(error = %e, "Failed to listen for shutdown signal");
        std::future::pending::<()>().await;
    }
    info!("Shutdown signal received");
}

/// Health check handler
async fn health(State(state): State<AppState>) -> Json<HealthResponse> {
    Json(HealthResponse {
        status: "OK",
        timestamp: chrono::Utc::now().to_rfc3339(),
        service: SERVICE_NAME,
        ai_configured: state.generator.is_some(),
        model: state.generator.as_ref().map(|g| g.model_name().to_string()),
        supported_languages: SUPPORTED_LANGUAGES,
    })
}

/// Handler for chat requests
async fn handle_chat(
    State(state): State<AppState>,
    payload: Result<Json<ChatRequest>, JsonRejection>,
) -> Result<Json<ResponsePayload>, ApiError> {
    let request = match payload {
        Ok(Json(request)) => request,
        Err(rejection) => {
            warn!(error = %rejection, "Rejected chat request body");
            return Err(ApiError::Validation);
        }
    };

    let request_id = Uuid::new_v4();
    let span = info_span!("chat", %request_id, turns = request.conversation_history.len());

    let reply = coordinator::process_chat(&state.config, state.generator.as_deref(), request)
        .instrument(span)
        .await?;

    Ok(Json(reply.payload))
}

async fn not_found(method: Method, uri: Uri) -> impl IntoResponse {
    warn!("404 Error: {} {} - Route not found", method, uri.path());
    (
        StatusCode::NOT_FOUND,
        Json(json!({
            "error": "Route not found",
            "message": "The requested resource does not exist on this server.",
            "path": uri.path(),
            "method": method.as_str(),
            "timestamp": chrono::Utc::now().to_rfc3339(),
            "availableRoutes": AVAILABLE_ROUTES,
        })),
    )
}
