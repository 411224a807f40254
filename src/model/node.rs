// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sidetree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidetree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::entity::{EntityKind, DEFAULT_ICON};
use super::ids::NodeId;

/// A node in the sidebar hierarchy.
///
/// Droppable nodes are folders that accept drops; non-droppable nodes are
/// leaf items linking to a record. Children are owned: a node appears under
/// exactly one parent, and the parent relation is recomputed on demand
/// (see [`crate::tree::build_parent_map`]) instead of being stored back.
///
/// Ordering invariant within `children`: droppable subfolders precede leaf
/// items; the most recently created subfolder comes first, the most
/// recently added leaf item last within the leaf run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TreeNode {
    id: NodeId,
    label: String,
    icon: String,
    expanded: bool,
    draggable: bool,
    droppable: bool,
    link: Option<String>,
    kind: Option<EntityKind>,
    children: Vec<TreeNode>,
}

impl TreeNode {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
            icon: DEFAULT_ICON.to_owned(),
            expanded: false,
            draggable: false,
            droppable: false,
            link: None,
            kind: None,
            children: Vec::new(),
        }
    }

    pub fn with_icon(mut self, icon: impl Into<String>) -> Self {
        self.icon = icon.into();
        self
    }

    pub fn with_link(mut self, link: impl Into<String>) -> Self {
        self.link = Some(link.into());
        self
    }

    pub fn with_kind(mut self, kind: EntityKind) -> Self {
        self.kind = Some(kind);
        self
    }

    pub fn with_children(mut self, children: Vec<TreeNode>) -> Self {
        self.children = children;
        self
    }

    pub fn draggable(mut self, draggable: bool) -> Self {
        self.draggable = draggable;
        self
    }

    pub fn droppable(mut self, droppable: bool) -> Self {
        self.droppable = droppable;
        self
    }

    pub fn expanded(mut self, expanded: bool) -> Self {
        self.expanded = expanded;
        self
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn set_label(&mut self, label: impl Into<String>) {
        self.label = label.into();
    }

    pub fn icon(&self) -> &str {
        &self.icon
    }

    pub fn set_icon(&mut self, icon: impl Into<String>) {
        self.icon = icon.into();
    }

    pub fn is_expanded(&self) -> bool {
        self.expanded
    }

    pub fn set_expanded(&mut self, expanded: bool) {
        self.expanded = expanded;
    }

    pub fn is_draggable(&self) -> bool {
        self.draggable
    }

    pub fn is_droppable(&self) -> bool {
        self.droppable
    }

    pub fn link(&self) -> Option<&str> {
        self.link.as_deref()
    }

    pub fn set_link(&mut self, link: Option<String>) {
        self.link = link;
    }

    pub fn kind(&self) -> Option<EntityKind> {
        self.kind
    }

    pub fn set_kind(&mut self, kind: Option<EntityKind>) {
        self.kind = kind;
    }

    pub fn children(&self) -> &[TreeNode] {
        &self.children
    }

    pub fn children_mut(&mut self) -> &mut Vec<TreeNode> {
        &mut self.children
    }

    pub fn has_children(&self) -> bool {
        !self.children.is_empty()
    }
}

/// Storage projection of a [`TreeNode`]: parent id plus sibling order
/// instead of owned children.
///
/// Round-trips losslessly with the tree form provided ids are unique and
/// `order`/`parent_id` are honored (see [`crate::tree::tree_to_flat_nodes`]
/// and [`crate::tree::flat_nodes_to_tree`]).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FlatTreeNode {
    pub id: NodeId,
    pub parent_id: Option<NodeId>,
    pub label: String,
    pub icon: String,
    pub order: usize,
    pub draggable: bool,
    pub droppable: bool,
    pub expanded: bool,
    pub link: Option<String>,
    pub kind: Option<EntityKind>,
}
