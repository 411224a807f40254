// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sidetree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidetree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Drag/drop engine and state management for the sidebar tree.
//!
//! The service is the single owner and single mutator of the live tree.
//! Every committed mutation bumps a revision counter, re-flattens the tree
//! and writes it through to the state store; every failure is recovered
//! locally as an error notification with the tree left untouched.

use std::fmt;
use std::time::{Duration, Instant};

use crate::model::{
    default_tree_items, DragPayload, DraggedEntity, DropPosition, EntityKind, EntityListing,
    FlatTreeNode, NodeId, TreeNode,
};
use crate::notify::{Notification, Notifier};
use crate::store::TreeStateStore;
use crate::tree;
use crate::tree::ParentLookup;

/// Hover dwell before a collapsed folder auto-expands.
const EXPAND_DELAY: Duration = Duration::from_millis(800);

/// Why a drop or tree mutation was rejected.
///
/// `Display` is the user-facing detail line; the first failing rule wins
/// and determines the reported reason.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TreeOpError {
    NoTarget,
    NotDraggable,
    TargetNotFolder,
    SelfDrop,
    ItemNotFound,
    IntoOwnSubtree,
    AlreadyInFolder,
    AllAlreadyInFolder,
    KindMismatch {
        dragged: Option<EntityKind>,
        target: Option<EntityKind>,
    },
    SourceNotFound,
    DuplicateId {
        id: NodeId,
    },
    NodeNotFound,
    RootDelete,
    EmptyLabel,
    NotASubfolder,
    SubfolderNotFound,
    DuplicateLabel {
        label: String,
    },
}

fn kind_label(kind: Option<EntityKind>) -> &'static str {
    kind.map(EntityKind::as_str).unwrap_or("untyped")
}

impl fmt::Display for TreeOpError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::NoTarget => f.write_str("Please drop on a folder"),
            Self::NotDraggable => f.write_str("This item cannot be moved"),
            Self::TargetNotFolder => f.write_str("Cannot drop here - this is not a folder"),
            Self::SelfDrop => f.write_str("Cannot drop item onto itself"),
            Self::ItemNotFound => f.write_str("Item not found"),
            Self::IntoOwnSubtree => {
                f.write_str("Cannot drop a folder into itself or its children")
            }
            Self::AlreadyInFolder => f.write_str("This item is already in this folder"),
            Self::AllAlreadyInFolder => f.write_str("All items are already in this folder"),
            Self::KindMismatch { dragged, target } => write!(
                f,
                "Cannot drop {} into {} list",
                kind_label(*dragged),
                kind_label(*target)
            ),
            Self::SourceNotFound => f.write_str("Cannot find source location"),
            Self::DuplicateId { id } => {
                write!(f, "An item with id \"{id}\" already exists")
            }
            Self::NodeNotFound => f.write_str("Node not found"),
            Self::RootDelete => f.write_str("Cannot delete root-level items"),
            Self::EmptyLabel => f.write_str("Name cannot be empty"),
            Self::NotASubfolder => f.write_str("Only subfolders can be renamed"),
            Self::SubfolderNotFound => f.write_str("Subfolder not found"),
            Self::DuplicateLabel { .. } => {
                f.write_str("A subfolder with this name already exists")
            }
        }
    }
}

impl std::error::Error for TreeOpError {}

#[derive(Debug, Clone, PartialEq, Eq)]
struct PendingExpand {
    target_id: NodeId,
    deadline: Instant,
}

/// Owner of the live tree and mediator of drag gestures.
pub struct DragService {
    items: Vec<TreeNode>,
    rev: u64,
    dragged: Option<DragPayload>,
    hovered_target: Option<NodeId>,
    drop_position: Option<DropPosition>,
    pending_expand: Option<PendingExpand>,
    store: TreeStateStore,
    notifier: Box<dyn Notifier>,
}

impl DragService {
    /// Builds the service from persisted state, falling back to the
    /// hard-coded starter tree when the entry is absent, corrupt or from
    /// another schema version. Loaded state is deduplicated to recover
    /// from previously corrupted writes.
    pub fn new(store: TreeStateStore, notifier: Box<dyn Notifier>) -> Self {
        let items = match store.load() {
            Ok(Some(flat_nodes)) => {
                let items = tree::flat_nodes_to_tree(&flat_nodes);
                if items.is_empty() {
                    default_tree_items()
                } else {
                    tree::deduplicate_tree(items)
                }
            }
            Ok(None) => default_tree_items(),
            Err(err) => {
                log::warn!("failed to load tree state, falling back to defaults: {err}");
                default_tree_items()
            }
        };

        Self {
            items,
            rev: 0,
            dragged: None,
            hovered_target: None,
            drop_position: None,
            pending_expand: None,
            store,
            notifier,
        }
    }

    // ------------------------------------------------------------------
    // Observable state
    // ------------------------------------------------------------------

    pub fn items(&self) -> &[TreeNode] {
        &self.items
    }

    /// Revision counter; bumped whenever observers should re-read the tree.
    pub fn rev(&self) -> u64 {
        self.rev
    }

    pub fn dragged(&self) -> Option<&DragPayload> {
        self.dragged.as_ref()
    }

    pub fn hovered_target(&self) -> Option<&NodeId> {
        self.hovered_target.as_ref()
    }

    pub fn drop_position(&self) -> Option<DropPosition> {
        self.drop_position
    }

    /// Flat export of the current tree, for backend synchronization.
    pub fn get_flat_nodes(&self) -> Vec<FlatTreeNode> {
        tree::tree_to_flat_nodes(&self.items)
    }

    /// Replaces the tree wholesale (e.g. from a backend payload). Not
    /// persisted; the caller decides whether the new tree is durable.
    pub fn set_items(&mut self, items: Vec<TreeNode>) {
        self.items = items;
        self.rev = self.rev.saturating_add(1);
    }

    // ------------------------------------------------------------------
    // Drag lifecycle
    // ------------------------------------------------------------------

    pub fn start_drag(&mut self, payload: DragPayload) {
        self.dragged = Some(payload);
    }

    /// Clears all gesture state; called after every drop regardless of
    /// outcome and on drag abort.
    pub fn end_drag(&mut self) {
        self.dragged = None;
        self.hovered_target = None;
        self.drop_position = None;
        self.pending_expand = None;
    }

    /// Updates the hover target. An invalid target clears the hover. The
    /// auto-expand deadline is cancelled whenever the target changes and
    /// armed for valid, collapsed folders with children.
    pub fn set_hovered_target(&mut self, target: Option<&NodeId>) {
        self.set_hovered_target_at(target, Instant::now());
    }

    fn set_hovered_target_at(&mut self, target: Option<&NodeId>, now: Instant) {
        let valid = target.is_some_and(|id| self.is_valid_drop_target(id));
        let new_target = if valid { target.cloned() } else { None };

        if self.hovered_target != new_target {
            self.pending_expand = None;
        }
        self.hovered_target = new_target.clone();

        let Some(target_id) = new_target else {
            return;
        };
        let Some(node) = tree::find_node_by_id(&self.items, &target_id) else {
            return;
        };
        if node.is_droppable()
            && node.has_children()
            && !node.is_expanded()
            && self.pending_expand.is_none()
        {
            self.pending_expand = Some(PendingExpand {
                target_id,
                deadline: now + EXPAND_DELAY,
            });
        }
    }

    pub fn set_drop_position(&mut self, position: Option<DropPosition>) {
        self.drop_position = position;
    }

    /// Applies an expired auto-expand deadline. Returns whether a folder
    /// was expanded (and the revision bumped).
    pub fn poll_auto_expand(&mut self) -> bool {
        self.poll_auto_expand_at(Instant::now())
    }

    fn poll_auto_expand_at(&mut self, now: Instant) -> bool {
        let Some(pending) = self.pending_expand.as_ref() else {
            return false;
        };
        if now < pending.deadline {
            return false;
        }
        let target_id = pending.target_id.clone();
        self.pending_expand = None;

        let Some(node) = tree::find_node_by_id_mut(&mut self.items, &target_id) else {
            return false;
        };
        if !node.has_children() || node.is_expanded() {
            return false;
        }
        node.set_expanded(true);
        self.rev = self.rev.saturating_add(1);
        true
    }

    // ------------------------------------------------------------------
    // Drop validation
    // ------------------------------------------------------------------

    /// Silent validity predicate for hover feedback; duplicate checks are
    /// deferred to the drop handlers where the error message is shown.
    pub fn is_valid_drop_target(&self, target_id: &NodeId) -> bool {
        let Some(dragged) = self.dragged.as_ref() else {
            return false;
        };
        let Some(target) = tree::find_node_by_id(&self.items, target_id) else {
            return false;
        };
        if !target.is_droppable() {
            return false;
        }
        match dragged {
            DragPayload::Node(node) => self.can_drop_tree_node(node, target_id),
            DragPayload::Entity(entity) => self.can_drop_entity(entity, target_id),
        }
    }

    fn can_drop_tree_node(&self, node: &TreeNode, target_id: &NodeId) -> bool {
        if node.id() == target_id || !node.is_draggable() {
            return false;
        }
        // The payload may be a copy; only trust ids resolved in the tree.
        let Some(actual) = tree::find_node_by_id(&self.items, node.id()) else {
            return false;
        };
        let parent_map = tree::build_parent_map(&self.items);
        if tree::is_descendant(&parent_map, actual.id(), target_id) {
            return false;
        }
        tree::effective_kind(&self.items, &parent_map, actual.id())
            == tree::effective_kind(&self.items, &parent_map, target_id)
    }

    fn can_drop_entity(&self, entity: &DraggedEntity, target_id: &NodeId) -> bool {
        let parent_map = tree::build_parent_map(&self.items);
        Some(entity.kind()) == tree::effective_kind(&self.items, &parent_map, target_id)
    }

    // ------------------------------------------------------------------
    // Drop handling
    // ------------------------------------------------------------------

    /// Computes and applies the outcome of a drop, emits the outcome
    /// notification and returns the gesture to idle.
    pub fn handle_drop(&mut self, payload: &DragPayload, target: Option<&NodeId>) {
        let outcome = match payload {
            DragPayload::Node(node) => self.try_drop_node(node, target),
            DragPayload::Entity(entity) => self.try_drop_entity(entity, target),
        };
        match outcome {
            Ok(detail) => self.notifier.notify(Notification::success(detail)),
            Err(err) => self.notifier.notify(Notification::error(err.to_string())),
        }
        self.end_drag();
    }

    /// Drops the currently dragged payload onto `target`.
    pub fn drop_on_target(&mut self, target: Option<&NodeId>) {
        let Some(payload) = self.dragged.take() else {
            return;
        };
        self.handle_drop(&payload, target);
    }

    fn try_drop_node(
        &mut self,
        dropped: &TreeNode,
        target: Option<&NodeId>,
    ) -> Result<String, TreeOpError> {
        let target_id = target.ok_or(TreeOpError::NoTarget)?;
        if !dropped.is_draggable() {
            return Err(TreeOpError::NotDraggable);
        }

        let target_node =
            tree::find_node_by_id(&self.items, target_id).ok_or(TreeOpError::ItemNotFound)?;
        if !target_node.is_droppable() {
            return Err(TreeOpError::TargetNotFolder);
        }
        if dropped.id() == target_id {
            return Err(TreeOpError::SelfDrop);
        }

        // Resolve the actual node; the drag transport may hand back a
        // shallow copy of a node that has since changed or vanished.
        let actual =
            tree::find_node_by_id(&self.items, dropped.id()).ok_or(TreeOpError::ItemNotFound)?;
        let actual_id = actual.id().clone();
        let label = actual.label().to_owned();
        let target_label = target_node.label().to_owned();

        let parent_map = tree::build_parent_map(&self.items);
        if tree::is_descendant(&parent_map, &actual_id, target_id) {
            return Err(TreeOpError::IntoOwnSubtree);
        }

        let dragged_kind = tree::effective_kind(&self.items, &parent_map, &actual_id);
        let target_kind = tree::effective_kind(&self.items, &parent_map, target_id);
        if dragged_kind != target_kind {
            return Err(TreeOpError::KindMismatch {
                dragged: dragged_kind,
                target: target_kind,
            });
        }

        if target_node
            .children()
            .iter()
            .any(|child| child.id() == &actual_id)
        {
            return Err(TreeOpError::AlreadyInFolder);
        }

        match tree::find_parent_by_child_id(&self.items, &actual_id) {
            ParentLookup::Parent(_) => {}
            ParentLookup::Root | ParentLookup::NotFound => {
                return Err(TreeOpError::SourceNotFound)
            }
        }

        let parent = tree::find_parent_by_child_id_mut(&mut self.items, &actual_id)
            .ok_or(TreeOpError::SourceNotFound)?;
        let from_index = parent
            .children()
            .iter()
            .position(|child| child.id() == &actual_id)
            .ok_or(TreeOpError::SourceNotFound)?;
        let node = parent.children_mut().remove(from_index);

        let target_node = tree::find_node_by_id_mut(&mut self.items, target_id)
            .expect("drop target verified present outside the moved subtree");
        tree::insert_node_sorted(target_node.children_mut(), node);
        target_node.set_expanded(true);

        self.update_and_save();
        Ok(format!("Moved \"{label}\" to \"{target_label}\""))
    }

    fn try_drop_entity(
        &mut self,
        entity: &DraggedEntity,
        target: Option<&NodeId>,
    ) -> Result<String, TreeOpError> {
        let target_id = target.ok_or(TreeOpError::NoTarget)?;
        let target_node =
            tree::find_node_by_id(&self.items, target_id).ok_or(TreeOpError::ItemNotFound)?;
        if !target_node.is_droppable() {
            return Err(TreeOpError::TargetNotFolder);
        }

        let parent_map = tree::build_parent_map(&self.items);
        let target_kind = tree::effective_kind(&self.items, &parent_map, target_id);
        if Some(entity.kind()) != target_kind {
            return Err(TreeOpError::KindMismatch {
                dragged: Some(entity.kind()),
                target: target_kind,
            });
        }
        let target_label = target_node.label().to_owned();

        // Primary record plus any multi-select companions.
        let mut listings = vec![EntityListing::new(entity.id().clone(), entity.label())];
        listings.extend(entity.additional_items().iter().cloned());
        let total = listings.len();

        let primary_in_folder = target_node
            .children()
            .iter()
            .any(|child| child.id() == entity.id());

        let mut to_add = Vec::new();
        let mut skipped = 0usize;
        for listing in listings {
            let duplicate = tree::find_node_by_id(&self.items, listing.id()).is_some()
                || to_add
                    .iter()
                    .any(|queued: &EntityListing| queued.id() == listing.id());
            if duplicate {
                skipped += 1;
            } else {
                to_add.push(listing);
            }
        }

        if to_add.is_empty() {
            return Err(if total > 1 {
                TreeOpError::AllAlreadyInFolder
            } else if primary_in_folder {
                TreeOpError::AlreadyInFolder
            } else {
                TreeOpError::DuplicateId {
                    id: entity.id().clone(),
                }
            });
        }

        let added = to_add.len();
        let kind = entity.kind();
        let target_node = tree::find_node_by_id_mut(&mut self.items, target_id)
            .expect("drop target verified present");
        for listing in to_add {
            let leaf = leaf_from_entity(listing.id().clone(), listing.label(), kind);
            tree::insert_node_sorted(target_node.children_mut(), leaf);
        }
        target_node.set_expanded(true);
        self.update_and_save();

        if total == 1 {
            return Ok(format!(
                "Added \"{}\" to \"{target_label}\"",
                entity.label()
            ));
        }
        let mut detail = format!("Added {added} item{} to \"{target_label}\"", plural(added));
        if skipped > 0 {
            detail.push_str(&format!(
                " ({skipped} duplicate{} skipped)",
                plural(skipped)
            ));
        }
        Ok(detail)
    }

    // ------------------------------------------------------------------
    // Other mutations
    // ------------------------------------------------------------------

    /// Inserts a new node under `parent_id` with the canonical sorted
    /// insert. Ids are unique across the whole tree; collisions are
    /// rejected here rather than repaired at load time.
    pub fn add_node(&mut self, node: TreeNode, parent_id: &NodeId) {
        if let Err(err) = self.try_add_node(node, parent_id) {
            self.notifier.notify(Notification::error(err.to_string()));
        }
    }

    fn try_add_node(&mut self, node: TreeNode, parent_id: &NodeId) -> Result<(), TreeOpError> {
        if tree::find_node_by_id(&self.items, node.id()).is_some() {
            return Err(TreeOpError::DuplicateId {
                id: node.id().clone(),
            });
        }
        let parent = tree::find_node_by_id_mut(&mut self.items, parent_id)
            .ok_or(TreeOpError::ItemNotFound)?;
        tree::insert_node_sorted(parent.children_mut(), node);
        self.update_and_save();
        Ok(())
    }

    /// Deletes a node. With `delete_children` false the children are
    /// promoted into the deleted node's position instead of removed.
    pub fn delete_node(&mut self, id: &NodeId, delete_children: bool) {
        match self.try_delete_node(id, delete_children) {
            Ok(()) => self
                .notifier
                .notify(Notification::success("Item deleted successfully")),
            Err(err) => self.notifier.notify(Notification::error(err.to_string())),
        }
    }

    fn try_delete_node(&mut self, id: &NodeId, delete_children: bool) -> Result<(), TreeOpError> {
        match tree::find_parent_by_child_id(&self.items, id) {
            ParentLookup::Root => return Err(TreeOpError::RootDelete),
            ParentLookup::NotFound => return Err(TreeOpError::NodeNotFound),
            ParentLookup::Parent(_) => {}
        }

        let parent = tree::find_parent_by_child_id_mut(&mut self.items, id)
            .ok_or(TreeOpError::NodeNotFound)?;
        let index = parent
            .children()
            .iter()
            .position(|child| child.id() == id)
            .ok_or(TreeOpError::NodeNotFound)?;

        if delete_children {
            parent.children_mut().remove(index);
        } else {
            let mut removed = parent.children_mut().remove(index);
            let grandchildren = std::mem::take(removed.children_mut());
            parent.children_mut().splice(index..index, grandchildren);
        }

        self.update_and_save();
        Ok(())
    }

    /// Renames a subfolder and optionally swaps its icon.
    pub fn rename_subfolder(&mut self, id: &NodeId, new_label: &str, new_icon: Option<&str>) {
        match self.try_rename_subfolder(id, new_label, new_icon) {
            Ok(()) => self
                .notifier
                .notify(Notification::success("Subfolder updated successfully")),
            Err(err) => self.notifier.notify(Notification::error(err.to_string())),
        }
    }

    fn try_rename_subfolder(
        &mut self,
        id: &NodeId,
        new_label: &str,
        new_icon: Option<&str>,
    ) -> Result<(), TreeOpError> {
        let label = new_label.trim();
        if label.is_empty() {
            return Err(TreeOpError::EmptyLabel);
        }

        let node =
            tree::find_node_by_id(&self.items, id).ok_or(TreeOpError::SubfolderNotFound)?;
        if !node.is_droppable() {
            return Err(TreeOpError::NotASubfolder);
        }

        if let ParentLookup::Parent(parent) = tree::find_parent_by_child_id(&self.items, id) {
            let duplicate = parent
                .children()
                .iter()
                .any(|child| child.id() != id && child.label().eq_ignore_ascii_case(label));
            if duplicate {
                return Err(TreeOpError::DuplicateLabel {
                    label: label.to_owned(),
                });
            }
        }

        let node = tree::find_node_by_id_mut(&mut self.items, id)
            .expect("subfolder verified present above");
        node.set_label(label);
        if let Some(icon) = new_icon {
            node.set_icon(icon);
        }
        self.update_and_save();
        Ok(())
    }

    /// Drops the persisted entry and resets the tree to the starter
    /// folders.
    pub fn clear_storage(&mut self) {
        if let Err(err) = self.store.clear() {
            log::warn!("failed to clear stored tree state: {err}");
        }
        self.items = default_tree_items();
        self.rev = self.rev.saturating_add(1);
    }

    // ------------------------------------------------------------------
    // State management
    // ------------------------------------------------------------------

    /// Publishes the mutation (revision bump) and writes the flattened
    /// tree through to the store. A failing write is logged and swallowed;
    /// the in-memory tree stays authoritative for the session.
    fn update_and_save(&mut self) {
        self.rev = self.rev.saturating_add(1);
        let flat_nodes = tree::tree_to_flat_nodes(&self.items);
        if let Err(err) = self.store.save(&flat_nodes) {
            log::warn!("failed to save tree state: {err}");
        }
    }
}

fn leaf_from_entity(id: NodeId, label: &str, kind: EntityKind) -> TreeNode {
    let link = kind.profile_link(&id);
    TreeNode::new(id, label)
        .with_icon(kind.icon())
        .with_link(link)
        .with_kind(kind)
        .draggable(true)
}

fn plural(count: usize) -> &'static str {
    if count == 1 {
        ""
    } else {
        "s"
    }
}
