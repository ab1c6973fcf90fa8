//! Domain layer: the hospital hierarchy and its renderings
//!
//! This layer is independent of external concerns (no CLI, no config loading).

pub mod arena;
pub mod entities;
pub mod error;
pub mod render;

pub use arena::{HospitalTree, TreeIterator, DEFAULT_ROOT_NAME};
pub use entities::{NodeId, NodeKind, TreeNode};
pub use error::{DomainError, DomainResult};
pub use render::{DisplayLines, TreeNodeConvert, INDENT_WIDTH};
