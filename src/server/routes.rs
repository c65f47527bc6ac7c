use axum::{
    extract::{Form, Multipart, Query, State},
    http::StatusCode,
    response::Html,
    Json,
};
use serde::{Deserialize, Serialize};
use crate::ingest::{ImportLayout, ImportReport, Importer};
use crate::lot::{LotLookup, LotRecord};
use crate::server::AppState;
use std::sync::Arc;

const UPDATE_FORM: &str = r#"<body>
    <h1>Update `Lot` Database</h1>
    <p>Upload the exported lot list as CSV (lot, part, ..., MM-DD-YY).</p>
    <form action="/update" enctype="multipart/form-data" method="post">
        <input name="file" type="file">
        <input type="submit">
    </form>
</body>
"#;

const DELETE_FORM: &str = r#"<body>
    <h1>Delete `Lot`</h1>
    <form action="/delete" method="post">
        <input name="lot" type="text">
        <input type="submit">
    </form>
</body>
"#;

#[derive(Debug, Deserialize)]
pub struct LotParams {
    pub lot: String,
}

#[derive(Debug, Deserialize)]
pub struct PartParams {
    pub part: String,
}

#[derive(Debug, Deserialize)]
pub struct UploadParams {
    pub layout: Option<String>,
}

#[derive(Serialize)]
pub struct ErrorResponse {
    pub error: String,
}

#[derive(Serialize)]
pub struct CountResponse {
    pub count: usize,
}

#[derive(Serialize)]
pub struct DeletedResponse {
    pub deleted: String,
}

type ApiError = (StatusCode, Json<ErrorResponse>);

fn api_error(status: StatusCode, error: impl ToString) -> ApiError {
    (status, Json(ErrorResponse { error: error.to_string() }))
}

fn internal(error: crate::Error) -> ApiError {
    tracing::error!("Request failed: {}", error);
    api_error(StatusCode::INTERNAL_SERVER_ERROR, error)
}

#[tracing::instrument(skip(state))]
pub async fn get_lot(
    State(state): State<Arc<AppState>>,
    Query(params): Query<LotParams>,
) -> Result<Json<LotLookup>, ApiError> {
    let store = state.store.lock().await;
    match store.get(&params.lot).map_err(internal)? {
        Some(record) => Ok(Json(record.into())),
        None => Err(api_error(StatusCode::NOT_FOUND, "lot not found")),
    }
}

pub async fn list_lots(State(state): State<Arc<AppState>>) -> Result<Json<Vec<LotRecord>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.get_all().map_err(internal)?))
}

#[tracing::instrument(skip(state))]
pub async fn lots_by_part(
    State(state): State<Arc<AppState>>,
    Query(params): Query<PartParams>,
) -> Result<Json<Vec<LotRecord>>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(store.get_by_part(&params.part).map_err(internal)?))
}

pub async fn count_lots(State(state): State<Arc<AppState>>) -> Result<Json<CountResponse>, ApiError> {
    let store = state.store.lock().await;
    Ok(Json(CountResponse { count: store.count().map_err(internal)? }))
}

pub async fn update_form() -> Html<&'static str> {
    Html(UPDATE_FORM)
}

pub async fn delete_form() -> Html<&'static str> {
    Html(DELETE_FORM)
}

#[tracing::instrument(skip(state, multipart))]
pub async fn upload_lots(
    State(state): State<Arc<AppState>>,
    Query(params): Query<UploadParams>,
    mut multipart: Multipart,
) -> Result<Json<ImportReport>, ApiError> {
    let layout = match params.layout.as_deref() {
        Some(name) => name
            .parse::<ImportLayout>()
            .map_err(|e| api_error(StatusCode::BAD_REQUEST, e))?,
        None => state.layout,
    };

    let mut content: Option<Vec<u8>> = None;

    while let Some(field) = multipart.next_field().await.map_err(|e| {
        api_error(StatusCode::BAD_REQUEST, format!("Failed to read multipart field: {}", e))
    })? {
        if field.name() == Some("file") {
            let data = field.bytes().await.map_err(|e| {
                api_error(StatusCode::BAD_REQUEST, format!("Failed to read file bytes: {}", e))
            })?;
            content = Some(data.to_vec());
        }
    }

    let content = content
        .ok_or_else(|| api_error(StatusCode::BAD_REQUEST, "No file field found in multipart data"))?;

    tracing::info!(bytes = content.len(), %layout, "Importing uploaded lot list");

    let store = state.store.lock().await;
    let report = Importer::new(&store, layout)
        .ingest_bytes(&content)
        .map_err(internal)?;

    Ok(Json(report))
}

#[tracing::instrument(skip(state))]
pub async fn delete_lot(
    State(state): State<Arc<AppState>>,
    Form(params): Form<LotParams>,
) -> Result<Json<DeletedResponse>, ApiError> {
    let store = state.store.lock().await;
    if !store.delete(&params.lot).map_err(internal)? {
        tracing::debug!(lot = %params.lot, "Delete of unknown lot, nothing removed");
    }

    Ok(Json(DeletedResponse { deleted: params.lot }))
}
