//! GET /api/provinces, /api/cities, /api/barangays

use axum::extract::State;
use axum::http::header;
use axum::response::{IntoResponse, Response};
use std::sync::Arc;

use crate::address::AddressDataset;
use crate::error::AppError;

/// File contents as-is, labelled as JSON.
async fn serve(state: &crate::AppState, dataset: AddressDataset) -> Result<Response, AppError> {
    let bytes = state.address_data.load(dataset).await?;
    Ok(([(header::CONTENT_TYPE, "application/json")], bytes).into_response())
}

pub async fn provinces(State(state): State<Arc<crate::AppState>>) -> Result<Response, AppError> {
    serve(&state, AddressDataset::Provinces).await
}

pub async fn cities(State(state): State<Arc<crate::AppState>>) -> Result<Response, AppError> {
    serve(&state, AddressDataset::Cities).await
}

pub async fn barangays(State(state): State<Arc<crate::AppState>>) -> Result<Response, AppError> {
    serve(&state, AddressDataset::Barangays).await
}
