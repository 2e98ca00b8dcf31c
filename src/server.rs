use axum::body::Body;
use axum::extract::DefaultBodyLimit;
use axum::http::{header, StatusCode};
use axum::response::{IntoResponse, Response};
use axum::routing::post;
use axum::{Json, Router};
use axum_extra::extract::Multipart;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde::Serialize;
use tower_http::cors::CorsLayer;
use tracing::{error, info};

use crate::batch::{run_batch, NullProgress};
use crate::constants::{CONVERT_ARTIFACT_KIND, DEFAULT_QUALITY, MAX_UPLOAD_BYTES};
use crate::error::BatchError;
use crate::model::{BatchResult, ItemResult, SourceImage};
use crate::sink::{BufferSink, Delivery, ZipSink};
use crate::transform::{TargetFormat, TransformSpec};
use crate::utils::parse_quality_or;
use crate::validation::validate_upload_batch;

#[derive(Debug, Serialize)]
struct ErrorBody {
    error: String,
}

/// Routes for the two upload endpoints. Both are convert-only: every
/// accepted file is re-encoded as WebP at the requested quality.
pub fn router() -> Router {
    Router::new()
        .route("/convert", post(convert))
        .route("/convert-zip", post(convert_zip))
        .layer(DefaultBodyLimit::max(MAX_UPLOAD_BYTES))
        .layer(CorsLayer::permissive())
}

/// Bind and serve until shutdown.
pub async fn serve(port: u16) -> std::io::Result<()> {
    let app = router();
    let addr = format!("127.0.0.1:{}", port);
    let listener = tokio::net::TcpListener::bind(&addr).await?;
    info!(%addr, "listening");
    axum::serve(listener, app).await
}

struct UploadForm {
    sources: Vec<SourceImage>,
    quality: u8,
}

async fn read_form(multipart: &mut Multipart) -> Result<UploadForm, Response> {
    let mut sources = Vec::new();
    let mut quality = DEFAULT_QUALITY;

    loop {
        let field = match multipart.next_field().await {
            Ok(Some(field)) => field,
            Ok(None) => break,
            Err(e) => {
                return Err(error_response(
                    StatusCode::BAD_REQUEST,
                    &BatchError::Unknown(e.to_string()),
                ))
            }
        };

        let field_name = field.name().unwrap_or("").to_string();
        match field_name.as_str() {
            "files" => {
                let name = field.file_name().unwrap_or("image").to_string();
                let mime_type = field
                    .content_type()
                    .unwrap_or("application/octet-stream")
                    .to_string();
                let bytes = match field.bytes().await {
                    Ok(bytes) => bytes.to_vec(),
                    Err(e) => {
                        return Err(error_response(
                            StatusCode::BAD_REQUEST,
                            &BatchError::Unknown(e.to_string()),
                        ))
                    }
                };
                sources.push(SourceImage::new(name, mime_type, bytes));
            }
            "quality" => {
                if let Ok(text) = field.text().await {
                    quality = parse_quality_or(&text, DEFAULT_QUALITY);
                }
            }
            _ => {}
        }
    }

    Ok(UploadForm { sources, quality })
}

async fn convert(mut multipart: Multipart) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };
    if let Err(e) = validate_upload_batch(&form.sources) {
        return error_response(StatusCode::BAD_REQUEST, &e);
    }

    let spec = match TransformSpec::convert_only(TargetFormat::WebP, Some(form.quality)) {
        Ok(spec) => spec,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };

    info!(files = form.sources.len(), quality = form.quality, "convert request");

    let mut sink = BufferSink::new();
    match run_batch(&form.sources, &spec, &mut sink, &NullProgress) {
        Ok((mut summary, delivery)) => {
            attach_payloads(&mut summary, delivery);
            (StatusCode::OK, Json(summary)).into_response()
        }
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e),
    }
}

async fn convert_zip(mut multipart: Multipart) -> Response {
    let form = match read_form(&mut multipart).await {
        Ok(form) => form,
        Err(response) => return response,
    };
    if let Err(e) = validate_upload_batch(&form.sources) {
        return error_response(StatusCode::BAD_REQUEST, &e);
    }

    let spec = match TransformSpec::convert_only(TargetFormat::WebP, Some(form.quality)) {
        Ok(spec) => spec,
        Err(e) => return error_response(StatusCode::BAD_REQUEST, &e),
    };

    info!(files = form.sources.len(), quality = form.quality, "convert-zip request");

    let mut sink = ZipSink::new(CONVERT_ARTIFACT_KIND);
    match run_batch(&form.sources, &spec, &mut sink, &NullProgress) {
        Ok((summary, Some(Delivery::Archive { file_name, bytes }))) => {
            info!(
                total = summary.total_files,
                failed = summary.failed_count,
                archive = %file_name,
                "archive ready"
            );
            archive_response(&file_name, bytes)
        }
        Ok(_) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &BatchError::Packaging("archive was not produced".to_string()),
        ),
        Err(e) => error_response(StatusCode::INTERNAL_SERVER_ERROR, &e),
    }
}

/// Pair buffered outputs with the Success entries they came from, in
/// order, and attach them as base64 payloads.
fn attach_payloads(summary: &mut BatchResult, delivery: Option<Delivery>) {
    let Some(Delivery::Buffered(blobs)) = delivery else {
        return;
    };
    let mut blobs = blobs.into_iter();
    for item in &mut summary.results {
        if let ItemResult::Success(success) = item {
            if let Some((_, bytes)) = blobs.next() {
                success.data = Some(STANDARD.encode(&bytes));
            }
        }
    }
}

fn archive_response(file_name: &str, bytes: Vec<u8>) -> Response {
    match Response::builder()
        .status(StatusCode::OK)
        .header(header::CONTENT_TYPE, "application/zip")
        .header(
            header::CONTENT_DISPOSITION,
            format!("attachment; filename=\"{}\"", file_name),
        )
        .body(Body::from(bytes))
    {
        Ok(response) => response,
        Err(e) => error_response(
            StatusCode::INTERNAL_SERVER_ERROR,
            &BatchError::Unknown(e.to_string()),
        ),
    }
}

fn error_response(status: StatusCode, err: &BatchError) -> Response {
    if status.is_server_error() {
        error!(%err, "request failed");
    }
    (
        status,
        Json(ErrorBody {
            error: err.to_string(),
        }),
    )
        .into_response()
}
