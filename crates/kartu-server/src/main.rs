//! Axum HTTP service exposing KTP field extraction.
//!
//! One OCR engine is loaded at startup and shared across requests; the
//! extraction pipeline itself is stateless, so requests run concurrently
//! without synchronization.

use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use axum::{
    Json, Router,
    extract::{DefaultBodyLimit, Multipart, State},
    http::StatusCode,
    response::IntoResponse,
    routing::{get, post},
};
use clap::Parser;
use serde_json::json;
use tracing::{error, info, warn};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use kartu_core::ktp::{AnchoredKtpParser, KtpExtractor};
use kartu_core::models::config::KartuConfig;
use kartu_core::ocr::PureOcrEngine;

/// Multipart field name carrying the uploaded ID card image.
const UPLOAD_FIELD: &str = "id_card_image";

/// Upload size limit: ID card photos, not scans of books.
const MAX_UPLOAD_BYTES: usize = 10 * 1024 * 1024;

/// HTTP service for Indonesian KTP OCR field extraction
#[derive(Parser)]
#[command(name = "kartu-server")]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Address to bind
    #[arg(long, default_value = "127.0.0.1")]
    host: String,

    /// Port to listen on
    #[arg(short, long, default_value = "5001")]
    port: u16,

    /// Model directory
    #[arg(short, long, default_value = "models")]
    model_dir: PathBuf,

    /// Path to config file
    #[arg(short, long)]
    config: Option<PathBuf>,
}

struct AppState {
    engine: PureOcrEngine,
    parser: AnchoredKtpParser,
}

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "info".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    let args = Args::parse();

    let config = match &args.config {
        Some(path) => KartuConfig::from_file(path)?,
        None => KartuConfig::default(),
    };

    let engine = PureOcrEngine::from_dir(&args.model_dir, config.ocr.clone())
        .map_err(|e| anyhow::anyhow!("Failed to load OCR models: {}", e))?;

    let mut parser = AnchoredKtpParser::new();
    if let Some(year) = config.extraction.reference_year {
        parser = parser.with_reference_year(year);
    }

    let state = Arc::new(AppState { engine, parser });

    let app = Router::new()
        .route("/health", get(health))
        .route("/extract-ktp", post(extract_ktp))
        .with_state(state)
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES));

    let addr: SocketAddr = format!("{}:{}", args.host, args.port).parse()?;
    info!("Listening on {}", addr);

    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app).await?;

    Ok(())
}

async fn health() -> impl IntoResponse {
    Json(json!({"status": "ok"}))
}

/// Extract KTP fields from an uploaded ID card image.
///
/// Expects a multipart body with the image under the `id_card_image` field
/// and answers with `{"success": true, "data": record}` or
/// `{"success": false, "error": message}`. Upload and OCR failures happen
/// here; the extraction pipeline itself never fails and a card with no
/// recognizable fields still yields a record of "Not found" values.
async fn extract_ktp(
    State(state): State<Arc<AppState>>,
    mut multipart: Multipart,
) -> (StatusCode, Json<serde_json::Value>) {
    let mut upload: Option<Vec<u8>> = None;

    loop {
        match multipart.next_field().await {
            Ok(Some(field)) => {
                if field.name() == Some(UPLOAD_FIELD) {
                    match field.bytes().await {
                        Ok(bytes) => upload = Some(bytes.to_vec()),
                        Err(e) => return failure(StatusCode::BAD_REQUEST, e.to_string()),
                    }
                    break;
                }
            }
            Ok(None) => break,
            Err(e) => return failure(StatusCode::BAD_REQUEST, e.to_string()),
        }
    }

    let Some(bytes) = upload else {
        warn!("Upload rejected: no '{}' field", UPLOAD_FIELD);
        return failure(StatusCode::BAD_REQUEST, "No file uploaded".to_string());
    };

    let image = match image::load_from_memory(&bytes) {
        Ok(image) => image,
        Err(e) => {
            warn!("Upload rejected: undecodable image: {}", e);
            return failure(StatusCode::BAD_REQUEST, format!("Invalid image: {}", e));
        }
    };

    // OCR is CPU-bound; keep it off the async workers.
    let state = state.clone();
    let result = tokio::task::spawn_blocking(move || {
        let ocr = state.engine.process(&image)?;
        Ok::<_, kartu_core::KartuError>((state.parser.extract(&ocr)?, ocr.processing_time_ms))
    })
    .await;

    match result {
        Ok(Ok((record, ocr_ms))) => {
            info!("Extraction complete (OCR {}ms)", ocr_ms);
            (
                StatusCode::OK,
                Json(json!({"success": true, "data": record})),
            )
        }
        Ok(Err(e)) => {
            error!("Extraction failed: {}", e);
            failure(StatusCode::INTERNAL_SERVER_ERROR, e.to_string())
        }
        Err(e) => {
            error!("Extraction task panicked: {}", e);
            failure(
                StatusCode::INTERNAL_SERVER_ERROR,
                "internal error".to_string(),
            )
        }
    }
}

fn failure(status: StatusCode, error: String) -> (StatusCode, Json<serde_json::Value>) {
    (status, Json(json!({"success": false, "error": error})))
}

#[cfg(test)]
mod tests {
    use super::*;
    use kartu_core::models::record::KtpRecord;

    #[test]
    fn test_success_envelope_shape() {
        let record = KtpRecord {
            nik: "1234567890123456".to_string(),
            nama: "JOHN DOE".to_string(),
            tanggal_lahir: "17-08-1990".to_string(),
        };

        let envelope = json!({"success": true, "data": record});
        assert_eq!(envelope["success"], true);
        assert_eq!(envelope["data"]["NIK"], "1234567890123456");
        assert_eq!(envelope["data"]["Tanggal Lahir"], "17-08-1990");
    }

    #[test]
    fn test_failure_envelope_shape() {
        let (status, Json(body)) =
            failure(StatusCode::BAD_REQUEST, "No file uploaded".to_string());

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["success"], false);
        assert_eq!(body["error"], "No file uploaded");
    }
}
