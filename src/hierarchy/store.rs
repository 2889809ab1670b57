use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::organization_unit::OrganizationUnit;

/// Persistence seam for the hierarchy engine.
///
/// The tree is an adjacency list: units keyed by id, `parent_id` a plain
/// value referencing another unit's id (never an object reference). The
/// engine only ever needs point lookups and children listings, so backends
/// stay trivial: Postgres in production, a HashMap arena in tests.
#[async_trait]
pub trait UnitStore: Send + Sync {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<OrganizationUnit>, DatabaseError>;

    async fn get_all(&self) -> Result<Vec<OrganizationUnit>, DatabaseError>;

    async fn get_by_company(&self, company_id: Uuid) -> Result<Vec<OrganizationUnit>, DatabaseError>;

    /// All units whose `parent_id` equals `parent_id`
    async fn get_children(&self, parent_id: Uuid) -> Result<Vec<OrganizationUnit>, DatabaseError>;

    async fn insert(&self, unit: &OrganizationUnit) -> Result<(), DatabaseError>;

    async fn update(&self, unit: &OrganizationUnit) -> Result<(), DatabaseError>;

    /// Delete the given ids in order. Implementations that support it run
    /// the whole batch in one transaction so a failed cascade leaves no
    /// partially deleted subtree behind.
    async fn delete_many(&self, ids: &[Uuid]) -> Result<(), DatabaseError>;
}
