use uuid::Uuid;

use crate::hierarchy::{HierarchyError, UnitStore};

/// Enumerate the subtree rooted at `root_id`, children before parents.
///
/// The traversal uses an explicit stack instead of call-stack recursion so
/// depth is bounded by heap, not stack, on adversarially deep trees. Ids are
/// discovered parents-first and the order reversed, which places every unit
/// after all of its descendants.
pub async fn collect_subtree<S: UnitStore>(
    store: &S,
    root_id: Uuid,
) -> Result<Vec<Uuid>, HierarchyError> {
    let mut order = vec![root_id];
    let mut stack = vec![root_id];

    while let Some(id) = stack.pop() {
        for child in store.get_children(id).await? {
            order.push(child.id);
            stack.push(child.id);
        }
    }

    order.reverse();
    Ok(order)
}

/// Remove a unit and its entire descendant subtree as one logical operation.
///
/// Children are deleted before their parent, which satisfies the
/// self-referential `parent_id -> id` foreign key without deferred
/// constraints. The store's `delete_many` applies the batch atomically where
/// the backend allows, so a failure never leaves a half-deleted subtree.
pub async fn delete_subtree<S: UnitStore>(store: &S, root_id: Uuid) -> Result<(), HierarchyError> {
    let order = collect_subtree(store, root_id).await?;
    store.delete_many(&order).await?;
    Ok(())
}
