//! Arena-backed class forest
//!
//! All nodes live in one `Vec`; parent and child links are `NodeId`
//! indices into it. Non-lambda nodes are also indexed by qualified name,
//! which is unique because every class is attached at most once.

use ahash::AHashMap;
use serde::Serialize;

use super::node::{ClassNode, NodeId};
use crate::shared::models::{ClassgraphError, Result};
use crate::shared::utils::intern::InternedString;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct ClassForest {
    nodes: Vec<ClassNode>,
    roots: Vec<NodeId>,
    /// Indexed nested names never reached from a root
    unattached: Vec<InternedString>,
    #[serde(skip)]
    by_name: AHashMap<InternedString, NodeId>,
}

/// Arena length captured before a unit is built
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Checkpoint {
    nodes: usize,
    roots: usize,
}

impl ClassForest {
    pub fn new() -> Self {
        Self::default()
    }

    // ============================================================
    // Construction (build phase only)
    // ============================================================

    fn push(&mut self, node: ClassNode) -> Result<NodeId> {
        let id = u32::try_from(self.nodes.len())
            .map(NodeId)
            .map_err(|_| ClassgraphError::internal("class forest arena is full"))?;
        if !node.is_lambda() {
            self.by_name.insert(node.qualified_name.clone(), id);
        }
        self.nodes.push(node);
        Ok(id)
    }

    pub fn add_root(&mut self, node: ClassNode) -> Result<NodeId> {
        let id = self.push(node)?;
        self.roots.push(id);
        Ok(id)
    }

    /// Append `node` as the last child of `parent`
    pub fn attach(&mut self, parent: NodeId, mut node: ClassNode) -> Result<NodeId> {
        if parent.index() >= self.nodes.len() {
            return Err(ClassgraphError::internal(format!(
                "attach under unknown node {}",
                parent
            )));
        }
        node.parent = Some(parent);
        let id = self.push(node)?;
        self.nodes[parent.index()].children.push(id);
        Ok(id)
    }

    pub fn checkpoint(&self) -> Checkpoint {
        Checkpoint {
            nodes: self.nodes.len(),
            roots: self.roots.len(),
        }
    }

    /// Drop every node added since `mark`
    pub fn rollback(&mut self, mark: Checkpoint) {
        if mark.nodes >= self.nodes.len() && mark.roots >= self.roots.len() {
            return;
        }
        let limit = mark.nodes;
        self.nodes.truncate(limit);
        self.roots.truncate(mark.roots);
        self.by_name.retain(|_, id| id.index() < limit);
        for node in &mut self.nodes {
            node.children.retain(|child| child.index() < limit);
        }
    }

    pub(crate) fn set_unattached(&mut self, names: Vec<InternedString>) {
        self.unattached = names;
    }

    // ============================================================
    // Queries
    // ============================================================

    pub fn len(&self) -> usize {
        self.nodes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    pub fn node(&self, id: NodeId) -> &ClassNode {
        &self.nodes[id.index()]
    }

    pub fn get(&self, id: NodeId) -> Option<&ClassNode> {
        self.nodes.get(id.index())
    }

    pub fn roots(&self) -> &[NodeId] {
        &self.roots
    }

    pub fn unattached(&self) -> &[InternedString] {
        &self.unattached
    }

    pub fn parent(&self, id: NodeId) -> Option<NodeId> {
        self.node(id).parent
    }

    pub fn children(&self, id: NodeId) -> &[NodeId] {
        &self.node(id).children
    }

    /// Node backed by the class `name` (never a LAMBDA node)
    pub fn node_of(&self, name: &str) -> Option<NodeId> {
        self.by_name.get(name).copied()
    }

    /// Root of the tree containing class `name`
    pub fn root_of(&self, name: &str) -> Option<NodeId> {
        let id = self.node_of(name)?;
        Some(self.ancestors(id).last().unwrap_or(id))
    }

    /// Direct non-lambda child of `parent` backed by `qualified_name`
    pub fn find_child(&self, parent: NodeId, qualified_name: &str) -> Option<NodeId> {
        self.children(parent).iter().copied().find(|&child| {
            let node = self.node(child);
            !node.is_lambda() && &*node.qualified_name == qualified_name
        })
    }

    /// Nearest non-lambda node at or above `id`
    pub fn owning_class(&self, id: NodeId) -> NodeId {
        let mut current = id;
        while self.node(current).is_lambda() {
            match self.parent(current) {
                Some(parent) => current = parent,
                None => break,
            }
        }
        current
    }

    /// Strict ancestors of `id`, nearest first
    pub fn ancestors(&self, id: NodeId) -> impl Iterator<Item = NodeId> + '_ {
        std::iter::successors(self.parent(id), move |&current| self.parent(current))
    }

    /// All nodes in arena order
    pub fn iter(&self) -> impl Iterator<Item = (NodeId, &ClassNode)> {
        self.nodes
            .iter()
            .enumerate()
            .map(|(index, node)| (NodeId(index as u32), node))
    }

    /// Nodes of the subtree at `id` in depth-first pre-order
    pub fn subtree(&self, id: NodeId) -> Vec<NodeId> {
        let mut order = Vec::new();
        let mut stack = vec![id];
        while let Some(current) = stack.pop() {
            order.push(current);
            stack.extend(self.children(current).iter().rev().copied());
        }
        order
    }
}
