//! Image upload handler.

use actix_web::{HttpRequest, HttpResponse, http::header, web};

use quill_core::ports::ObjectStorage;
use quill_shared::DataEnvelope;
use quill_shared::dto::UploadData;

use crate::middleware::auth::Identity;
use crate::middleware::error::AppResult;
use crate::state::AppState;

/// POST /api/uploads/image - authenticated; raw image body with its
/// content type. Returns the stable reference path to attach to a post
/// as `coverImage`.
pub async fn upload_image(
    state: web::Data<AppState>,
    _identity: Identity,
    req: HttpRequest,
    body: web::Bytes,
) -> AppResult<HttpResponse> {
    let content_type = req
        .headers()
        .get(header::CONTENT_TYPE)
        .and_then(|v| v.to_str().ok())
        .unwrap_or("");

    let path = state.storage.store_image(content_type, &body).await?;

    Ok(HttpResponse::Created().json(DataEnvelope::new(UploadData { path })))
}
