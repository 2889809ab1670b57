use crate::database::models::organization_unit::OrganizationUnit;
use crate::hierarchy::{HierarchyError, UnitStore};

/// Derive `path` and `level` for a single unit from its (already validated)
/// `parent_id`, using one store lookup of the parent.
///
/// Roots get `path == id` and `level == 0`. A child extends the parent's
/// stored path (falling back to the parent's id when the parent's own path
/// was never materialized) and sits one level below it. A dangling
/// `parent_id` is tolerated and yields root values.
///
/// Only the unit passed in is recomputed. Descendants keep whatever
/// path/level they were last written with; callers that reparent a unit with
/// children leave those children stale until each is written again.
pub async fn recompute_path_and_level<S: UnitStore>(
    store: &S,
    unit: &mut OrganizationUnit,
) -> Result<(), HierarchyError> {
    let Some(parent_id) = unit.parent_id else {
        unit.path = unit.id.to_string();
        unit.level = 0;
        return Ok(());
    };

    match store.get_by_id(parent_id).await? {
        Some(parent) => {
            let base = if parent.path.is_empty() {
                parent.id.to_string()
            } else {
                parent.path.clone()
            };
            unit.path = format!("{}/{}", base, unit.id);
            unit.level = parent.level + 1;
        }
        // Dangling parent reference: treated as a root.
        None => {
            unit.path = unit.id.to_string();
            unit.level = 0;
        }
    }

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::testing::{seeded_unit, MemoryUnitStore};
    use uuid::Uuid;

    #[tokio::test]
    async fn root_gets_own_id_as_path() {
        let store = MemoryUnitStore::new();
        let mut unit = OrganizationUnit::new("Root".into(), Uuid::new_v4(), None, None);

        recompute_path_and_level(&store, &mut unit).await.unwrap();

        assert_eq!(unit.path, unit.id.to_string());
        assert_eq!(unit.level, 0);
    }

    #[tokio::test]
    async fn child_extends_parent_path() {
        let store = MemoryUnitStore::new();
        let root = seeded_unit(&store, "Root", None);
        let mut child = OrganizationUnit::new("Child".into(), root.company_id, None, Some(root.id));

        recompute_path_and_level(&store, &mut child).await.unwrap();

        assert_eq!(child.path, format!("{}/{}", root.path, child.id));
        assert_eq!(child.level, root.level + 1);
    }

    #[tokio::test]
    async fn parent_without_materialized_path_falls_back_to_its_id() {
        let store = MemoryUnitStore::new();
        let mut parent = OrganizationUnit::new("Bare".into(), Uuid::new_v4(), None, None);
        parent.path = String::new();
        store.seed(parent.clone());

        let mut child = OrganizationUnit::new("Child".into(), parent.company_id, None, Some(parent.id));
        recompute_path_and_level(&store, &mut child).await.unwrap();

        assert_eq!(child.path, format!("{}/{}", parent.id, child.id));
        assert_eq!(child.level, 1);
    }

    #[tokio::test]
    async fn dangling_parent_yields_root_values() {
        let store = MemoryUnitStore::new();
        let mut unit =
            OrganizationUnit::new("Orphan".into(), Uuid::new_v4(), None, Some(Uuid::new_v4()));

        recompute_path_and_level(&store, &mut unit).await.unwrap();

        assert_eq!(unit.path, unit.id.to_string());
        assert_eq!(unit.level, 0);
    }
}
