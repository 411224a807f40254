// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sidetree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidetree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use super::entity::EntityKind;
use super::ids::NodeId;
use super::node::TreeNode;

/// Hard-coded starter tree used when no valid persisted state exists.
///
/// One droppable folder per primary record kind; the ids reuse the kind
/// tags, which keeps them stable across sessions and collision-free with
/// record ids coming from the backend.
pub fn default_tree_items() -> Vec<TreeNode> {
    [
        EntityKind::Candidates,
        EntityKind::Consultants,
        EntityKind::Jobs,
        EntityKind::Companies,
        EntityKind::Contacts,
        EntityKind::Leads,
    ]
    .into_iter()
    .map(default_folder)
    .collect()
}

fn default_folder(kind: EntityKind) -> TreeNode {
    let id = NodeId::new(kind.as_str()).expect("hard-coded kind tags are valid ids");
    TreeNode::new(id, kind.as_str())
        .with_icon(kind.icon())
        .with_link(format!("/{}", kind.as_str()))
        .with_kind(kind)
        .droppable(true)
}
