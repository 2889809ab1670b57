use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json},
};
use serde_json::json;
use uuid::Uuid;

use crate::error::ApiError;
use crate::services::company_service::{CompanyService, CreateCompany, UpdateCompany};

/// GET /api/companies - List all companies
pub async fn list() -> Result<impl IntoResponse, ApiError> {
    let companies = CompanyService::new().await?.list().await?;
    Ok(Json(json!({ "success": true, "data": companies })))
}

/// POST /api/companies - Create a company
pub async fn create(Json(payload): Json<CreateCompany>) -> Result<impl IntoResponse, ApiError> {
    let company = CompanyService::new().await?.create(payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": company })),
    ))
}

/// GET /api/companies/:id - Get a single company
pub async fn get(Path(id): Path<Uuid>) -> Result<impl IntoResponse, ApiError> {
    let company = CompanyService::new().await?.get(id).await?;
    Ok(Json(json!({ "success": true, "data": company })))
}

/// PUT /api/companies/:id - Update a company
pub async fn put(
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompany>,
) -> Result<impl IntoResponse, ApiError> {
    let company = CompanyService::new().await?.update(id, payload).await?;
    Ok(Json(json!({ "success": true, "data": company })))
}

/// PATCH /api/companies/:id - Partially update a company
pub async fn patch(
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateCompany>,
) -> Result<impl IntoResponse, ApiError> {
    let company = CompanyService::new().await?.update(id, payload).await?;
    Ok(Json(json!({ "success": true, "data": company })))
}

/// DELETE /api/companies/:id - Delete a company (rejected while units remain)
pub async fn delete(Path(id): Path<Uuid>) -> Result<impl IntoResponse, ApiError> {
    CompanyService::new().await?.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}
