use axum::{
    extract::Path,
    http::StatusCode,
    response::{IntoResponse, Json},
    Extension,
};
use serde_json::json;
use uuid::Uuid;

use crate::database::manager::DatabaseManager;
use crate::database::unit_store::PgUnitStore;
use crate::error::ApiError;
use crate::middleware::auth::AuthContext;
use crate::services::organization_unit_service::{
    CreateOrganizationUnit, OrganizationUnitService, UpdateOrganizationUnit,
};

async fn service() -> Result<OrganizationUnitService<PgUnitStore>, ApiError> {
    let pool = DatabaseManager::main_pool().await?;
    Ok(OrganizationUnitService::new(PgUnitStore::new(pool)))
}

/// GET /api/organization_units - List all organization units
pub async fn list() -> Result<impl IntoResponse, ApiError> {
    let units = service().await?.list().await?;
    Ok(Json(json!({ "success": true, "data": units })))
}

/// POST /api/organization_units - Create an organization unit
///
/// `company_id` comes from the session context, not the payload.
pub async fn create(
    Extension(auth): Extension<AuthContext>,
    Json(payload): Json<CreateOrganizationUnit>,
) -> Result<impl IntoResponse, ApiError> {
    let unit = service().await?.create(auth.company_id, payload).await?;
    Ok((
        StatusCode::CREATED,
        Json(json!({ "success": true, "data": unit })),
    ))
}

/// GET /api/organization_units/:id - Get a single organization unit
pub async fn get(Path(id): Path<Uuid>) -> Result<impl IntoResponse, ApiError> {
    let unit = service().await?.get(id).await?;
    Ok(Json(json!({ "success": true, "data": unit })))
}

/// PUT /api/organization_units/:id - Update an organization unit
pub async fn put(
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrganizationUnit>,
) -> Result<impl IntoResponse, ApiError> {
    let unit = service().await?.update(id, payload).await?;
    Ok(Json(json!({ "success": true, "data": unit })))
}

/// PATCH /api/organization_units/:id - Partially update an organization unit
///
/// The all-optional payload gives PUT and PATCH the same semantics.
pub async fn patch(
    Path(id): Path<Uuid>,
    Json(payload): Json<UpdateOrganizationUnit>,
) -> Result<impl IntoResponse, ApiError> {
    let unit = service().await?.update(id, payload).await?;
    Ok(Json(json!({ "success": true, "data": unit })))
}

/// DELETE /api/organization_units/:id - Delete a unit and its whole subtree
pub async fn delete(Path(id): Path<Uuid>) -> Result<impl IntoResponse, ApiError> {
    service().await?.delete(id).await?;
    Ok(StatusCode::NO_CONTENT)
}

/// GET /api/organization_units/:id/children - List direct children
pub async fn children(Path(id): Path<Uuid>) -> Result<impl IntoResponse, ApiError> {
    let units = service().await?.children(id).await?;
    Ok(Json(json!({ "success": true, "data": units })))
}

/// GET /api/companies/:id/organization_units - List a company's forest
pub async fn by_company(Path(company_id): Path<Uuid>) -> Result<impl IntoResponse, ApiError> {
    let units = service().await?.list_by_company(company_id).await?;
    Ok(Json(json!({ "success": true, "data": units })))
}
