/// Document CRUD endpoints
///
/// The same five handlers serve projects, blogs and skills. Each collection
/// router attaches its [`Collection`] as a request extension, which selects the
/// repository and the wording of messages.
///
/// # Endpoints (shown for projects)
///
/// - `POST   /api/create-project` - Store a new document (201)
/// - `GET    /api/projects` - All documents in creation order
/// - `GET    /api/project/:id` - One document
/// - `PUT    /api/project/:id` - Shallow-merge the body into the document
/// - `DELETE /api/project/:id` - Remove the document, data is `{deletedCount}`

use crate::{
    app::AppState,
    error::{ApiError, ApiResult},
    middleware::auth::AuthContext,
    response::ApiResponse,
};
use axum::{
    extract::{rejection::JsonRejection, Path, State},
    Extension, Json,
};
use folio_shared::models::document::{Collection, Document, Fields};
use serde::{Deserialize, Serialize};
use serde_json::Value;

/// Data returned by DELETE
#[derive(Debug, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DeleteResult {
    pub deleted_count: u64,
}

/// Accepts only a JSON object as a document body
fn object_body(payload: Result<Json<Value>, JsonRejection>) -> ApiResult<Fields> {
    let Json(value) = payload?;
    match value {
        Value::Object(fields) => Ok(fields),
        _ => Err(ApiError::BadRequest(
            "Request body must be a JSON object".to_string(),
        )),
    }
}

pub async fn create(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    caller: Option<Extension<AuthContext>>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<ApiResponse<Document>> {
    let fields = object_body(payload)?;
    let doc = state.resources.get(collection).create(fields).await?;

    if let Some(Extension(caller)) = caller {
        tracing::info!(%collection, id = %doc.id, email = %caller.email, "Document created");
    }

    Ok(ApiResponse::created(
        format!("New {} Added successfully!", collection.label()),
        doc,
    ))
}

pub async fn list(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
) -> ApiResult<ApiResponse<Vec<Document>>> {
    let docs = state.resources.get(collection).list_all().await?;

    Ok(ApiResponse::ok(
        format!("{} are retrieved successfully!", collection.label_plural()),
        docs,
    ))
}

pub async fn get(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<Document>> {
    let doc = state
        .resources
        .get(collection)
        .get_by_id(&id)
        .await?
        .ok_or(ApiError::NotFound(collection.label()))?;

    Ok(ApiResponse::ok(
        format!("{} is retrieved successfully!", collection.label()),
        doc,
    ))
}

pub async fn update(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
    payload: Result<Json<Value>, JsonRejection>,
) -> ApiResult<ApiResponse<Document>> {
    let patch = object_body(payload)?;
    let doc = state
        .resources
        .get(collection)
        .update_by_id(&id, patch)
        .await?
        .ok_or(ApiError::NotFound(collection.label()))?;

    Ok(ApiResponse::ok(
        format!("{} is updated successfully!", collection.label()),
        doc,
    ))
}

pub async fn delete(
    State(state): State<AppState>,
    Extension(collection): Extension<Collection>,
    Path(id): Path<String>,
) -> ApiResult<ApiResponse<DeleteResult>> {
    let deleted_count = state.resources.get(collection).delete_by_id(&id).await?;
    if deleted_count == 0 {
        return Err(ApiError::NotFound(collection.label()));
    }

    Ok(ApiResponse::ok(
        format!("{} is deleted successfully!", collection.label()),
        DeleteResult { deleted_count },
    ))
}
