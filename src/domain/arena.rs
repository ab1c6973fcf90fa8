use generational_arena::Arena;
use tracing::{debug, instrument};

use super::entities::{NodeId, NodeKind, TreeNode};
use super::error::{DomainError, DomainResult};

pub const DEFAULT_ROOT_NAME: &str = "Hospital";

/// Arena-based hospital hierarchy.
///
/// The arena owns every node; parents own their children through the index
/// lists in [`TreeNode::children`]. Deleting a node removes its whole subtree
/// from the arena, which invalidates every handle into that subtree.
#[derive(Debug)]
pub struct HospitalTree {
    /// Arena storage for all tree nodes
    arena: Arena<TreeNode>,
    /// Root node, created once and never deleted
    root: NodeId,
}

impl Default for HospitalTree {
    fn default() -> Self {
        Self::new()
    }
}

impl HospitalTree {
    pub fn new() -> Self {
        Self::with_root_name(DEFAULT_ROOT_NAME)
    }

    pub fn with_root_name(name: &str) -> Self {
        let mut arena = Arena::new();
        let root = NodeId(arena.insert(TreeNode::new(name, NodeKind::Root, "", None)));
        Self { arena, root }
    }

    pub fn root(&self) -> NodeId {
        self.root
    }

    pub fn get_node(&self, id: NodeId) -> Option<&TreeNode> {
        self.arena.get(id.0)
    }

    pub fn contains(&self, id: NodeId) -> bool {
        self.arena.contains(id.0)
    }

    /// Number of live nodes, root included.
    #[allow(clippy::len_without_is_empty)]
    pub fn len(&self) -> usize {
        self.arena.len()
    }

    /// Direct children of `id` in insertion order. Empty for stale handles.
    pub fn children(&self, id: NodeId) -> impl Iterator<Item = (NodeId, &TreeNode)> + '_ {
        self.get_node(id).into_iter().flat_map(move |node| {
            node.children
                .iter()
                .filter_map(move |&child| self.get_node(child).map(|c| (child, c)))
        })
    }

    #[instrument(level = "debug", skip(self))]
    pub fn add_department(&mut self, name: &str) -> NodeId {
        let idx = NodeId(self.arena.insert(TreeNode::new(
            name,
            NodeKind::Department,
            "",
            Some(self.root),
        )));
        if let Some(root) = self.arena.get_mut(self.root.0) {
            root.children.push(idx);
        }
        idx
    }

    /// Appends a doctor under `department`.
    ///
    /// The parent's kind is not checked: any live handle is accepted.
    #[instrument(level = "debug", skip(self))]
    pub fn add_doctor(
        &mut self,
        department: NodeId,
        name: &str,
        specialization: &str,
    ) -> DomainResult<NodeId> {
        self.insert_child(department, name, NodeKind::Doctor, specialization)
    }

    /// Appends a patient under `doctor`. Like [`Self::add_doctor`], permissive
    /// about the parent's kind.
    #[instrument(level = "debug", skip(self))]
    pub fn add_patient(&mut self, doctor: NodeId, name: &str, detail: &str) -> DomainResult<NodeId> {
        self.insert_child(doctor, name, NodeKind::Patient, detail)
    }

    #[instrument(level = "trace", skip(self))]
    fn insert_child(
        &mut self,
        parent: NodeId,
        name: &str,
        kind: NodeKind,
        detail: &str,
    ) -> DomainResult<NodeId> {
        if !self.contains(parent) {
            debug!("rejecting insert under stale handle {:?}", parent);
            return Err(DomainError::StaleHandle);
        }
        let idx = NodeId(self.arena.insert(TreeNode::new(name, kind, detail, Some(parent))));
        if let Some(parent) = self.arena.get_mut(parent.0) {
            parent.children.push(idx);
        }
        Ok(idx)
    }

    /// First department directly under the root with this exact name.
    #[instrument(level = "debug", skip(self))]
    pub fn find_department(&self, name: &str) -> Option<NodeId> {
        self.departments()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    /// First doctor with this exact name, scanning departments in order.
    #[instrument(level = "debug", skip(self))]
    pub fn find_doctor(&self, name: &str) -> Option<NodeId> {
        self.doctors()
            .find(|(_, node)| node.name == name)
            .map(|(id, _)| id)
    }

    /// First patient with this exact name, scanning departments then doctors in order.
    #[instrument(level = "debug", skip(self))]
    pub fn find_patient(&self, name: &str) -> Option<NodeId> {
        self.doctors()
            .flat_map(move |(doctor, _)| self.children(doctor))
            .find(|(_, node)| node.matches(name, NodeKind::Patient))
            .map(|(id, _)| id)
    }

    /// Resolves a name to a handle using the lookup for `kind`.
    pub fn locate(&self, kind: NodeKind, name: &str) -> DomainResult<NodeId> {
        let found = match kind {
            NodeKind::Root => self
                .get_node(self.root)
                .filter(|root| root.name == name)
                .map(|_| self.root),
            NodeKind::Department => self.find_department(name),
            NodeKind::Doctor => self.find_doctor(name),
            NodeKind::Patient => self.find_patient(name),
        };
        found.ok_or_else(|| DomainError::NotFound {
            kind,
            name: name.to_string(),
        })
    }

    fn departments(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> + '_ {
        self.children(self.root)
            .filter(|(_, node)| node.kind == NodeKind::Department)
    }

    fn doctors(&self) -> impl Iterator<Item = (NodeId, &TreeNode)> + '_ {
        self.departments()
            .flat_map(move |(department, _)| self.children(department))
            .filter(|(_, node)| node.kind == NodeKind::Doctor)
    }

    /// Deletes the first node below `start` matching (`name`, `kind`) together
    /// with its subtree.
    ///
    /// Depth-first: each child is tested before descending into it, and a
    /// child's subtree is searched before its next sibling. `start` itself is
    /// never a candidate, so the root cannot be deleted.
    #[instrument(level = "debug", skip(self))]
    pub fn delete_node(&mut self, start: NodeId, name: &str, kind: NodeKind) -> bool {
        let Some(target) = self.find_below(start, name, kind) else {
            debug!("no {} named {:?} below {:?}", kind, name, start);
            return false;
        };
        let removed = self.remove_subtree(target);
        debug!("deleted {} {:?} and {} descendants", kind, name, removed - 1);
        true
    }

    pub fn delete_department(&mut self, name: &str) -> bool {
        self.delete_node(self.root, name, NodeKind::Department)
    }

    pub fn delete_doctor(&mut self, name: &str) -> bool {
        self.delete_node(self.root, name, NodeKind::Doctor)
    }

    pub fn delete_patient(&mut self, name: &str) -> bool {
        self.delete_node(self.root, name, NodeKind::Patient)
    }

    /// Pre-order walk over the descendants of `start` with an explicit stack.
    fn find_below(&self, start: NodeId, name: &str, kind: NodeKind) -> Option<NodeId> {
        let mut stack: Vec<NodeId> = self.get_node(start)?.children.iter().rev().copied().collect();
        while let Some(current) = stack.pop() {
            let Some(node) = self.get_node(current) else {
                continue;
            };
            if node.matches(name, kind) {
                return Some(current);
            }
            // Reverse push keeps siblings left to right
            stack.extend(node.children.iter().rev());
        }
        None
    }

    /// Detaches `target` from its parent and frees it and all descendants.
    /// Returns the number of nodes removed.
    fn remove_subtree(&mut self, target: NodeId) -> usize {
        let parent = self.get_node(target).and_then(|node| node.parent);
        if let Some(parent) = parent.and_then(|p| self.arena.get_mut(p.0)) {
            parent.children.retain(|&child| child != target);
        }

        let mut removed = 0;
        let mut stack = vec![target];
        while let Some(idx) = stack.pop() {
            if let Some(node) = self.arena.remove(idx.0) {
                stack.extend(node.children);
                removed += 1;
            }
        }
        removed
    }

    /// Number of levels, root counting as one.
    #[instrument(level = "debug", skip(self))]
    pub fn depth(&self) -> usize {
        self.iter().map(|(_, depth, _)| depth).max().map_or(0, |depth| depth + 1)
    }

    /// Pre-order traversal from the root yielding each node with its depth.
    pub fn iter(&self) -> TreeIterator<'_> {
        TreeIterator::new(self)
    }
}

pub struct TreeIterator<'a> {
    tree: &'a HospitalTree,
    stack: Vec<(NodeId, usize)>,
}

impl<'a> TreeIterator<'a> {
    fn new(tree: &'a HospitalTree) -> Self {
        Self {
            tree,
            stack: vec![(tree.root(), 0)],
        }
    }
}

impl<'a> Iterator for TreeIterator<'a> {
    type Item = (NodeId, usize, &'a TreeNode);

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((current_idx, depth)) = self.stack.pop() {
            if let Some(node) = self.tree.get_node(current_idx) {
                // Push children in reverse order for left-to-right traversal
                for &child in node.children.iter().rev() {
                    self.stack.push((child, depth + 1));
                }
                return Some((current_idx, depth, node));
            }
        }
        None
    }
}
