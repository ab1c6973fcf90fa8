//! Domain entities: node kinds, handles and tree nodes

use std::fmt;

use generational_arena::Index;

/// Category tag of a node in the hospital hierarchy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum NodeKind {
    Root,
    Department,
    Doctor,
    Patient,
}

impl NodeKind {
    /// Lowercase name used in the rendered structure, e.g. `doctor`.
    pub fn as_str(&self) -> &'static str {
        match self {
            NodeKind::Root => "root",
            NodeKind::Department => "department",
            NodeKind::Doctor => "doctor",
            NodeKind::Patient => "patient",
        }
    }

    /// Capitalized kind name for user-facing messages, e.g. `Doctor`.
    ///
    /// This names the kind, not a node: the root is `Root` whatever the
    /// hospital is called.
    pub fn label(&self) -> &'static str {
        match self {
            NodeKind::Root => "Root",
            NodeKind::Department => "Department",
            NodeKind::Doctor => "Doctor",
            NodeKind::Patient => "Patient",
        }
    }
}

impl fmt::Display for NodeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Opaque handle to a node.
///
/// Handles stay valid until the node they point to is deleted. A handle to a
/// deleted node never resolves again, even if its arena slot is reused.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct NodeId(pub(crate) Index);

/// Tree node in the arena-based hospital hierarchy.
#[derive(Debug, Clone)]
pub struct TreeNode {
    /// Display name, not unique
    pub name: String,
    pub kind: NodeKind,
    /// Specialization for doctors, diagnosis/treatment text for patients
    pub detail: String,
    /// Owning node, None for the root
    pub parent: Option<NodeId>,
    /// Child handles in insertion order
    pub children: Vec<NodeId>,
}

impl TreeNode {
    pub(crate) fn new(name: &str, kind: NodeKind, detail: &str, parent: Option<NodeId>) -> Self {
        Self {
            name: name.to_string(),
            kind,
            detail: detail.to_string(),
            parent,
            children: Vec::new(),
        }
    }

    /// Exact, case-sensitive match on name and kind.
    pub fn matches(&self, name: &str, kind: NodeKind) -> bool {
        self.kind == kind && self.name == name
    }
}

impl fmt::Display for TreeNode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({})", self.name, self.kind)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn given_kind_when_displayed_then_lowercase() {
        assert_eq!(NodeKind::Department.to_string(), "department");
        assert_eq!(NodeKind::Root.to_string(), "root");
    }

    #[test]
    fn given_kind_when_labelled_then_capitalized_kind_name() {
        assert_eq!(NodeKind::Root.label(), "Root");
        assert_eq!(NodeKind::Department.label(), "Department");
        assert_eq!(NodeKind::Patient.label(), "Patient");
    }

    #[test]
    fn given_node_when_matching_then_name_and_kind_must_both_agree() {
        let node = TreeNode::new("Dr. Lee", NodeKind::Doctor, "Cardiologist", None);
        assert!(node.matches("Dr. Lee", NodeKind::Doctor));
        assert!(!node.matches("Dr. Lee", NodeKind::Patient));
        assert!(!node.matches("dr. lee", NodeKind::Doctor));
        assert_eq!(node.to_string(), "Dr. Lee (doctor)");
    }
}
