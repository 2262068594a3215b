use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State, multipart::MultipartError},
    http::StatusCode,
    response::{Html, IntoResponse, Response},
    routing::get,
};
use tokio::net::TcpListener;
use tower_http::services::ServeDir;
use tower_http::trace::TraceLayer;
use tracing::{info, warn};

use veil_core::{BlurLevel, HISTORY_LIMIT};
use veil_engine::{ProcessRequest, Processor};

use crate::html;

const DEFAULT_MODE: &str = "face";

#[derive(Clone)]
pub struct AppState {
    pub processor: Processor,
    pub max_upload_bytes: usize,
}

impl AppState {
    pub fn new(processor: Processor, max_upload_bytes: usize) -> Self {
        Self {
            processor,
            max_upload_bytes,
        }
    }
}

pub struct VeilServer;

impl VeilServer {
    pub async fn serve(state: AppState, host: &str, port: u16) -> anyhow::Result<()> {
        let app = router(state);

        let addr = format!("{}:{}", host, port);
        let listener = TcpListener::bind(&addr).await?;

        info!("veil listening on http://{}", addr);

        axum::serve(listener, app).await?;

        Ok(())
    }
}

pub fn router(state: AppState) -> Router {
    let uploads = ServeDir::new(state.processor.uploads().root());

    Router::new()
        .route("/", get(upload_form).post(handle_upload))
        .route("/history", get(history_page))
        .route("/api/history", get(api_history))
        .route("/health", get(handle_info))
        .nest_service("/uploads", uploads)
        .layer(DefaultBodyLimit::max(state.max_upload_bytes))
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health
async fn handle_info() -> Json<serde_json::Value> {
    Json(serde_json::json!({
        "name": "veil",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}

/// GET / - upload form
async fn upload_form() -> Html<&'static str> {
    Html(html::UPLOAD_FORM)
}

/// Fields of the upload form
struct UploadForm {
    mode: String,
    blur: String,
    image: Option<(String, Vec<u8>)>,
}

async fn read_form(mut multipart: Multipart) -> Result<UploadForm, (StatusCode, String)> {
    let mut form = UploadForm {
        mode: DEFAULT_MODE.to_string(),
        blur: BlurLevel::NORMAL.to_string(),
        image: None,
    };

    while let Some(field) = multipart.next_field().await.map_err(rejection)? {
        let name = field.name().unwrap_or_default().to_string();
        match name.as_str() {
            "mode" => {
                form.mode = field.text().await.map_err(rejection)?;
            }
            "blur" => {
                form.blur = field.text().await.map_err(rejection)?;
            }
            "image" => {
                let filename = field.file_name().unwrap_or_default().to_string();
                let bytes = field.bytes().await.map_err(rejection)?;
                // a file input left empty still sends a part, with no file name
                if !filename.is_empty() {
                    form.image = Some((filename, bytes.to_vec()));
                }
            }
            _ => {}
        }
    }

    Ok(form)
}

fn rejection(e: MultipartError) -> (StatusCode, String) {
    (e.status(), e.body_text())
}

/// POST / - redact an uploaded image
async fn handle_upload(State(state): State<AppState>, multipart: Multipart) -> Response {
    let form = match read_form(multipart).await {
        Ok(form) => form,
        Err(rejection) => return rejection.into_response(),
    };

    let Some((filename, bytes)) = form.image else {
        return (StatusCode::BAD_REQUEST, "No file uploaded").into_response();
    };

    let request = ProcessRequest {
        filename,
        bytes,
        mode: form.mode,
        blur_level: BlurLevel::parse(&form.blur),
    };

    match state.processor.process(request).await {
        Ok(result) => Html(html::result_page(&result)).into_response(),
        Err(e) if e.is_client_error() => {
            warn!("Rejected upload: {}", e);
            (StatusCode::BAD_REQUEST, "Could not read image file").into_response()
        }
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// GET /history - last 50 records
async fn history_page(State(state): State<AppState>) -> Response {
    match state.processor.history().recent(HISTORY_LIMIT).await {
        Ok(records) => Html(html::history_page(&records)).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}

/// GET /api/history - last 50 records as JSON
async fn api_history(State(state): State<AppState>) -> Response {
    match state.processor.history().recent(HISTORY_LIMIT).await {
        Ok(records) => Json(records).into_response(),
        Err(e) => (StatusCode::INTERNAL_SERVER_ERROR, e.to_string()).into_response(),
    }
}
