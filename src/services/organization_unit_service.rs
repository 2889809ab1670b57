use chrono::Utc;
use serde::{Deserialize, Deserializer};
use tracing::info;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::organization_unit::OrganizationUnit;
use crate::hierarchy::{self, HierarchyError, UnitStore};

#[derive(Debug, thiserror::Error)]
pub enum OrgUnitError {
    #[error("{message}")]
    Validation { field: &'static str, message: String },

    #[error("Organization unit not found: {0}")]
    NotFound(Uuid),

    #[error(transparent)]
    Hierarchy(#[from] HierarchyError),

    #[error(transparent)]
    Database(#[from] DatabaseError),
}

#[derive(Debug, Deserialize)]
pub struct CreateOrganizationUnit {
    pub name: String,
    pub description: Option<String>,
    pub parent_id: Option<Uuid>,
}

/// Update payload for PUT and PATCH. Every field is optional; for
/// `parent_id` the nested Option distinguishes "absent, keep the current
/// parent" from an explicit `null`, which reparents the unit to a root.
#[derive(Debug, Default, Deserialize)]
pub struct UpdateOrganizationUnit {
    pub name: Option<String>,
    pub description: Option<String>,
    #[serde(default, deserialize_with = "double_option")]
    pub parent_id: Option<Option<Uuid>>,
}

fn double_option<'de, D>(deserializer: D) -> Result<Option<Option<Uuid>>, D::Error>
where
    D: Deserializer<'de>,
{
    Deserialize::deserialize(deserializer).map(Some)
}

/// Orchestrates unit mutations: hierarchy validation, then path/level
/// recompute, then persistence, in that order.
pub struct OrganizationUnitService<S> {
    store: S,
}

impl<S: UnitStore> OrganizationUnitService<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    pub async fn list(&self) -> Result<Vec<OrganizationUnit>, OrgUnitError> {
        Ok(self.store.get_all().await?)
    }

    pub async fn list_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<OrganizationUnit>, OrgUnitError> {
        Ok(self.store.get_by_company(company_id).await?)
    }

    pub async fn get(&self, id: Uuid) -> Result<OrganizationUnit, OrgUnitError> {
        self.store
            .get_by_id(id)
            .await?
            .ok_or(OrgUnitError::NotFound(id))
    }

    /// Children of a unit. Listing children of an unknown id yields an empty
    /// list rather than a not-found.
    pub async fn children(&self, id: Uuid) -> Result<Vec<OrganizationUnit>, OrgUnitError> {
        Ok(self.store.get_children(id).await?)
    }

    /// Create a unit. `company_id` comes from the authenticated session, not
    /// the payload. The row is inserted first so the generated id is durable,
    /// then path/level are derived and written back.
    pub async fn create(
        &self,
        company_id: Uuid,
        req: CreateOrganizationUnit,
    ) -> Result<OrganizationUnit, OrgUnitError> {
        info!("Creating a new organization unit");
        validate_name(&req.name)?;
        if let Some(description) = req.description.as_deref() {
            validate_description(description)?;
        }

        hierarchy::ensure_valid_parent(&self.store, None, req.parent_id).await?;

        let mut unit = OrganizationUnit::new(req.name, company_id, req.description, req.parent_id);
        self.store.insert(&unit).await?;

        hierarchy::recompute_path_and_level(&self.store, &mut unit).await?;
        self.store.update(&unit).await?;

        Ok(unit)
    }

    /// Apply an update. A present `parent_id` (including explicit null)
    /// re-triggers hierarchy validation; path/level are recomputed for this
    /// unit only; descendants are not touched.
    pub async fn update(
        &self,
        id: Uuid,
        changes: UpdateOrganizationUnit,
    ) -> Result<OrganizationUnit, OrgUnitError> {
        info!("Updating organization unit {}", id);
        let mut unit = self.get(id).await?;

        if let Some(name) = changes.name {
            validate_name(&name)?;
            unit.name = name;
        }
        if let Some(description) = changes.description {
            validate_description(&description)?;
            unit.description = Some(description);
        }
        if let Some(new_parent) = changes.parent_id {
            hierarchy::ensure_valid_parent(&self.store, Some(id), new_parent).await?;
            unit.parent_id = new_parent;
        }

        hierarchy::recompute_path_and_level(&self.store, &mut unit).await?;
        unit.updated_at = Utc::now();
        self.store.update(&unit).await?;

        Ok(unit)
    }

    /// Delete a unit together with its entire descendant subtree.
    pub async fn delete(&self, id: Uuid) -> Result<(), OrgUnitError> {
        info!("Deleting organization unit {} and all its descendants", id);
        if self.store.get_by_id(id).await?.is_none() {
            return Err(OrgUnitError::NotFound(id));
        }

        hierarchy::delete_subtree(&self.store, id).await?;
        Ok(())
    }
}

fn validate_name(name: &str) -> Result<(), OrgUnitError> {
    let len = name.chars().count();
    if len == 0 || len > 100 {
        return Err(OrgUnitError::Validation {
            field: "name",
            message: "Name must be between 1 and 100 characters.".to_string(),
        });
    }
    let allowed = |c: char| c.is_alphanumeric() || c.is_whitespace() || matches!(c, '-' | '_' | '.');
    if !name.chars().all(allowed) {
        return Err(OrgUnitError::Validation {
            field: "name",
            message: "Name: only letters, numbers, spaces, -, _ and . allowed.".to_string(),
        });
    }
    Ok(())
}

fn validate_description(description: &str) -> Result<(), OrgUnitError> {
    if description.chars().count() > 200 {
        return Err(OrgUnitError::Validation {
            field: "description",
            message: "Description cannot exceed 200 characters.".to_string(),
        });
    }
    Ok(())
}
