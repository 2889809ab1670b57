use uuid::Uuid;

use crate::hierarchy::{HierarchyError, UnitStore};

/// Reject structurally invalid parent assignments before any write.
///
/// `unit_id` is `None` for a unit that does not exist yet (create), in which
/// case no cycle is possible and only the trivial checks run. Otherwise the
/// ancestor chain is walked upward from `candidate_parent_id`; finding
/// `unit_id` anywhere on that chain means the candidate is a descendant of
/// the unit and the reparenting would close a cycle.
///
/// An ancestor id missing from the store ends the walk without error: a
/// dangling parent reference is not this check's concern.
pub async fn ensure_valid_parent<S: UnitStore>(
    store: &S,
    unit_id: Option<Uuid>,
    candidate_parent_id: Option<Uuid>,
) -> Result<(), HierarchyError> {
    let Some(parent_id) = candidate_parent_id else {
        // Becoming (or staying) a root is always valid.
        return Ok(());
    };

    if unit_id == Some(parent_id) {
        return Err(HierarchyError::SelfParent);
    }

    let Some(unit_id) = unit_id else {
        return Ok(());
    };

    // Walk the ancestor chain with an explicit cursor rather than recursion;
    // the walk is bounded by the tree depth.
    let mut cursor = Some(parent_id);
    while let Some(current) = cursor {
        if current == unit_id {
            return Err(HierarchyError::CycleDetected);
        }
        cursor = match store.get_by_id(current).await? {
            Some(ancestor) => ancestor.parent_id,
            // Unknown ancestor: treat as a root and stop.
            None => None,
        };
    }

    Ok(())
}
