// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sidetree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidetree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::entity::DraggedEntity;
use super::ids::NodeId;
use super::node::TreeNode;

/// What is being dragged.
///
/// The variant is decided once at drag start and threaded through the whole
/// gesture; handling sites match on it instead of re-inferring the payload
/// shape from its fields.
#[derive(Debug, Clone, PartialEq)]
pub enum DragPayload {
    /// An existing tree node being moved inside the tree.
    Node(TreeNode),
    /// An external record entering the tree for the first time.
    Entity(DraggedEntity),
}

impl DragPayload {
    pub fn id(&self) -> &NodeId {
        match self {
            Self::Node(node) => node.id(),
            Self::Entity(entity) => entity.id(),
        }
    }

    pub fn label(&self) -> &str {
        match self {
            Self::Node(node) => node.label(),
            Self::Entity(entity) => entity.label(),
        }
    }

    pub fn is_node(&self) -> bool {
        matches!(self, Self::Node(_))
    }

    pub fn is_entity(&self) -> bool {
        matches!(self, Self::Entity(_))
    }
}

/// Where a drop would land relative to the hovered node.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DropPosition {
    Before,
    Into,
    After,
}

impl DropPosition {
    /// Maps the pointer's vertical position within the hovered row
    /// (`0.0` = top edge, `1.0` = bottom edge) to a drop position:
    /// top quarter is `Before`, bottom quarter `After`, the middle `Into`.
    pub fn from_ratio(ratio: f32) -> Self {
        if ratio < 0.25 {
            Self::Before
        } else if ratio > 0.75 {
            Self::After
        } else {
            Self::Into
        }
    }
}
