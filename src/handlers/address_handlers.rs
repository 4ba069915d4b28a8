//! HTTP handlers for the address book.
//! Each handler decodes its input, makes exactly one call to the
//! `AddressBookService`, and maps the error kinds it expects to a status.
//! Anything else becomes a 500.

use crate::{
    errors::AppError,
    models::address::{AddressBook, AddressEntry, AddressId},
    services::address_book_service::ServiceError,
    state::AppState,
};
use axum::{
    Json,
    body::Bytes,
    extract::{Path, State},
    http::{HeaderValue, StatusCode, header},
    response::IntoResponse,
};

/// GET `/addressbook` — the whole collection keyed by id.
pub async fn list_addresses(
    State(state): State<AppState>,
) -> Result<Json<AddressBook>, AppError> {
    let all = state
        .service
        .get_all_addresses()
        .await
        .map_err(AppError::unexpected)?;
    Ok(Json(all))
}

/// POST `/addressbook` — store a new entry, answer 201 with its `Location`.
pub async fn create_address(
    State(state): State<AppState>,
    body: Bytes,
) -> Result<impl IntoResponse, AppError> {
    let entry = parse_entry(&body)?;

    let id = state
        .service
        .post_address(entry)
        .await
        .map_err(|err| match err {
            ServiceError::InvalidInput(_) => AppError::expected(StatusCode::BAD_REQUEST, err),
            other => AppError::unexpected(other),
        })?;

    let location = HeaderValue::from_str(&id.uri())
        .map_err(|err| AppError::internal("Internal Server Error").caused_by(&err))?;
    Ok((StatusCode::CREATED, [(header::LOCATION, location)]))
}

/// GET `/addressbook/{id}`
pub async fn get_address(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<Json<AddressEntry>, AppError> {
    let id = resolve_id(&state, &raw_id)?;

    let entry = state
        .service
        .get_address(&id)
        .await
        .map_err(|err| match err {
            ServiceError::NotFound(_) => AppError::expected(StatusCode::NOT_FOUND, err),
            other => AppError::unexpected(other),
        })?;
    Ok(Json(entry))
}

/// PUT `/addressbook/{id}` — replace an existing entry.
pub async fn update_address(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
    body: Bytes,
) -> Result<StatusCode, AppError> {
    let id = resolve_id(&state, &raw_id)?;
    let entry = parse_entry(&body)?;

    state
        .service
        .put_address(&id, entry)
        .await
        .map_err(|err| match err {
            ServiceError::NotFound(_) => AppError::expected(StatusCode::NOT_FOUND, err),
            ServiceError::InvalidInput(_) => AppError::expected(StatusCode::BAD_REQUEST, err),
            other => AppError::unexpected(other),
        })?;
    Ok(StatusCode::NO_CONTENT)
}

/// DELETE `/addressbook/{id}`
pub async fn delete_address(
    State(state): State<AppState>,
    Path(raw_id): Path<String>,
) -> Result<StatusCode, AppError> {
    let id = resolve_id(&state, &raw_id)?;

    state
        .service
        .delete_address(&id)
        .await
        .map_err(|err| match err {
            ServiceError::NotFound(_) => AppError::expected(StatusCode::NOT_FOUND, err),
            other => AppError::unexpected(other),
        })?;
    Ok(StatusCode::NO_CONTENT)
}

fn parse_entry(body: &[u8]) -> Result<AddressEntry, AppError> {
    AddressEntry::from_json_slice(body).map_err(AppError::invalid_json)
}

/// Segments outside `[a-zA-Z0-9-]+` are not routes at all.
fn resolve_id(state: &AppState, raw: &str) -> Result<AddressId, AppError> {
    AddressId::parse(raw).ok_or_else(|| state.default_route.error())
}
