use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use uuid::Uuid;

/// A structural unit within a company (department, division, team).
///
/// `path` is the materialized ancestor chain (`<ancestor_path>/<id>`, or just
/// `<id>` for a root) and `level` the depth in the tree, 0 for roots. Both are
/// derived by the hierarchy engine and never accepted from clients.
#[derive(Debug, Clone, Serialize, Deserialize, FromRow)]
pub struct OrganizationUnit {
    pub id: Uuid,
    pub name: String,
    pub company_id: Uuid,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
    pub path: String,
    pub level: i32,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl OrganizationUnit {
    /// Build a fresh unit with a generated id. `path` and `level` hold
    /// placeholder values until the first recompute runs against the store.
    pub fn new(
        name: String,
        company_id: Uuid,
        description: Option<String>,
        parent_id: Option<Uuid>,
    ) -> Self {
        let now = Utc::now();
        Self {
            id: Uuid::new_v4(),
            name,
            company_id,
            description,
            parent_id,
            path: String::new(),
            level: 0,
            created_at: now,
            updated_at: now,
        }
    }
}
