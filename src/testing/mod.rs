use std::collections::HashMap;
use std::sync::Mutex;

use async_trait::async_trait;
use uuid::Uuid;

use crate::database::manager::DatabaseError;
use crate::database::models::organization_unit::OrganizationUnit;
use crate::hierarchy::UnitStore;

/// In-memory arena store for hierarchy tests: units keyed by id in a map,
/// `parent_id` kept as a plain value. Mirrors the Postgres store's contract,
/// including delete-by-id being a no-op for unknown ids.
#[derive(Default)]
pub struct MemoryUnitStore {
    units: Mutex<HashMap<Uuid, OrganizationUnit>>,
}

impl MemoryUnitStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert a unit directly, bypassing validation and recompute.
    pub fn seed(&self, unit: OrganizationUnit) {
        self.units.lock().unwrap().insert(unit.id, unit);
    }

    pub fn unit(&self, id: Uuid) -> Option<OrganizationUnit> {
        self.units.lock().unwrap().get(&id).cloned()
    }

    pub fn len(&self) -> usize {
        self.units.lock().unwrap().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn roots(&self) -> Vec<OrganizationUnit> {
        let mut roots: Vec<_> = self
            .units
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.parent_id.is_none())
            .cloned()
            .collect();
        roots.sort_by_key(|u| u.created_at);
        roots
    }
}

#[async_trait]
impl UnitStore for MemoryUnitStore {
    async fn get_by_id(&self, id: Uuid) -> Result<Option<OrganizationUnit>, DatabaseError> {
        Ok(self.units.lock().unwrap().get(&id).cloned())
    }

    async fn get_all(&self) -> Result<Vec<OrganizationUnit>, DatabaseError> {
        let mut units: Vec<_> = self.units.lock().unwrap().values().cloned().collect();
        units.sort_by_key(|u| u.created_at);
        Ok(units)
    }

    async fn get_by_company(
        &self,
        company_id: Uuid,
    ) -> Result<Vec<OrganizationUnit>, DatabaseError> {
        let mut units: Vec<_> = self
            .units
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.company_id == company_id)
            .cloned()
            .collect();
        units.sort_by_key(|u| u.created_at);
        Ok(units)
    }

    async fn get_children(&self, parent_id: Uuid) -> Result<Vec<OrganizationUnit>, DatabaseError> {
        let mut units: Vec<_> = self
            .units
            .lock()
            .unwrap()
            .values()
            .filter(|u| u.parent_id == Some(parent_id))
            .cloned()
            .collect();
        units.sort_by_key(|u| u.created_at);
        Ok(units)
    }

    async fn insert(&self, unit: &OrganizationUnit) -> Result<(), DatabaseError> {
        self.units.lock().unwrap().insert(unit.id, unit.clone());
        Ok(())
    }

    async fn update(&self, unit: &OrganizationUnit) -> Result<(), DatabaseError> {
        let mut units = self.units.lock().unwrap();
        if !units.contains_key(&unit.id) {
            return Err(DatabaseError::NotFound(format!(
                "organization unit {}",
                unit.id
            )));
        }
        units.insert(unit.id, unit.clone());
        Ok(())
    }

    async fn delete_many(&self, ids: &[Uuid]) -> Result<(), DatabaseError> {
        let mut units = self.units.lock().unwrap();
        for id in ids {
            units.remove(id);
        }
        Ok(())
    }
}

/// Seed a unit under `parent` (or as a root) with `path`/`level` already
/// materialized from the parent's stored values, the way a consistent store
/// would hold them.
pub fn seeded_unit(
    store: &MemoryUnitStore,
    name: &str,
    parent_id: Option<Uuid>,
) -> OrganizationUnit {
    let parent = parent_id.and_then(|id| store.unit(id));
    let company_id = parent
        .as_ref()
        .map(|p| p.company_id)
        .unwrap_or_else(Uuid::new_v4);

    let mut unit = OrganizationUnit::new(name.to_string(), company_id, None, parent_id);
    match parent {
        Some(p) => {
            let base = if p.path.is_empty() { p.id.to_string() } else { p.path.clone() };
            unit.path = format!("{}/{}", base, unit.id);
            unit.level = p.level + 1;
        }
        None => {
            unit.path = unit.id.to_string();
            unit.level = 0;
        }
    }

    store.seed(unit.clone());
    unit
}
