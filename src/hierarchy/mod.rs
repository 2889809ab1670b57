// Organization-unit hierarchy engine: parent validation, materialized
// path/level derivation, and cascading subtree deletion, all working against
// the UnitStore seam so the same logic runs on Postgres and in-memory stores.
pub mod deleter;
pub mod path;
pub mod store;
pub mod validator;

pub use deleter::{collect_subtree, delete_subtree};
pub use path::recompute_path_and_level;
pub use store::UnitStore;
pub use validator::ensure_valid_parent;

use thiserror::Error;

use crate::database::manager::DatabaseError;

/// Structural violations rejected before any write
#[derive(Debug, Error)]
pub enum HierarchyError {
    #[error("An organization unit cannot be its own parent.")]
    SelfParent,

    #[error("Can't set parent_id to a descendant (cycle detected).")]
    CycleDetected,

    #[error(transparent)]
    Database(#[from] DatabaseError),
}
