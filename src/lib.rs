//! Hospital organisation hierarchy.
//!
//! A hospital root owns departments, departments own doctors and doctors own
//! patients. The tree lives in a generational arena ([`domain::HospitalTree`]);
//! the [`cli`] layer wraps it in an interactive menu.

pub mod cli;
pub mod config;
pub mod domain;
pub mod exitcode;
pub mod util;

pub use domain::{DomainError, HospitalTree, NodeId, NodeKind, TreeNode};
