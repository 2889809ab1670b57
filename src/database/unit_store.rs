use async_trait::async_trait;
use sqlx::PgPool;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::organization_unit::OrganizationUnit;
use crate::hierarchy::UnitStore;

const UNIT_COLUMNS: &str =
    "id, name, company_id, description, parent_id, path, level, created_at, updated_at";

/// Postgres-backed unit store over the `organization_unit` table
pub struct PgUnitStore {
    pool: PgPool,
}

impl PgUnitStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

#[async_trait]
impl UnitStore for PgUnitStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<OrganizationUnit>, DatabaseError> {
        let unit = sqlx::query_as::<_, OrganizationUnit>(&format!(
            "SELECT {} FROM organization_unit WHERE id = $1",
            UNIT_COLUMNS
        ))
        .bind(id)
        .fetch_optional(&self.pool)
        .await?;

        Ok(unit)
    }

    async fn get_all(&self) -> Result<Vec<OrganizationUnit>, DatabaseError> {
        let units = sqlx::query_as::<_, OrganizationUnit>(&format!(
            "SELECT {} FROM organization_unit ORDER BY created_at",
            UNIT_COLUMNS
        ))
        .fetch_all(&self.pool)
        .await?;

        Ok(units)
    }

    async fn get_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<OrganizationUnit>, DatabaseError> {
        let units = sqlx::query_as::<_, OrganizationUnit>(&format!(
            "SELECT {} FROM organization_unit WHERE company_id = $1 ORDER BY created_at",
            UNIT_COLUMNS
        ))
        .bind(company_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(units)
    }

    async fn get_children(&self, parent_id: Uuid) -> Result<Vec<OrganizationUnit>, DatabaseError> {
        let units = sqlx::query_as::<_, OrganizationUnit>(&format!(
            "SELECT {} FROM organization_unit WHERE parent_id = $1 ORDER BY created_at",
            UNIT_COLUMNS
        ))
        .bind(parent_id)
        .fetch_all(&self.pool)
        .await?;

        Ok(units)
    }

    async fn insert(&self, unit: &OrganizationUnit) -> Result<(), DatabaseError> {
        sqlx::query(
            "INSERT INTO organization_unit \
             (id, name, company_id, description, parent_id, path, level, created_at, updated_at) \
             VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)",
        )
        .bind(unit.id)
        .bind(&unit.name)
        .bind(unit.company_id)
        .bind(&unit.description)
        .bind(unit.parent_id)
        .bind(&unit.path)
        .bind(unit.level)
        .bind(unit.created_at)
        .bind(unit.updated_at)
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn update(&self, unit: &OrganizationUnit) -> Result<(), DatabaseError> {
        let result = sqlx::query(
            "UPDATE organization_unit \
             SET name = $2, description = $3, parent_id = $4, path = $5, level = $6, updated_at = $7 \
             WHERE id = $1",
        )
        .bind(unit.id)
        .bind(&unit.name)
        .bind(&unit.description)
        .bind(unit.parent_id)
        .bind(&unit.path)
        .bind(unit.level)
        .bind(unit.updated_at)
        .execute(&self.pool)
        .await?;

        if result.rows_affected() == 0 {
            return Err(DatabaseError::NotFound(format!(
                "organization unit {}",
                unit.id
            )));
        }

        Ok(())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<(), DatabaseError> {
        // One transaction for the whole batch; the caller hands ids
        // children-before-parents, so the self-referential FK holds at every
        // step and a failure rolls the entire cascade back.
        let mut tx = self.pool.begin().await?;

        for id in ids {
            sqlx::query("DELETE FROM organization_unit WHERE id = $1")
                .bind(id)
                .execute(&mut *tx)
                .await?;
        }

        tx.commit().await?;
        Ok(())
    }
}
