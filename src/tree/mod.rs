// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sidetree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidetree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Pure functions over the sidebar tree.
//!
//! Every function takes the root slice explicitly; nothing here holds
//! state. Parent relations are recomputed on demand into an id-keyed map
//! instead of being stored on nodes, so shallow copies handed back by a
//! drag transport can never poison a lookup.

use std::collections::{BTreeMap, BTreeSet};

use percent_encoding::percent_decode_str;

use crate::model::{EntityKind, FlatTreeNode, NodeId, TreeNode};

/// Direct-parent lookup result; root-level nodes have no parent but are
/// still present in the tree.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParentLookup<'a> {
    Parent(&'a TreeNode),
    Root,
    NotFound,
}

/// Depth-first search by id, first match wins.
///
/// Duplicate ids must not occur, but a corrupted tree must not break the
/// search either.
pub fn find_node_by_id<'a>(nodes: &'a [TreeNode], id: &NodeId) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_node_by_id(node.children(), id) {
            return Some(found);
        }
    }
    None
}

pub fn find_node_by_id_mut<'a>(
    nodes: &'a mut [TreeNode],
    id: &NodeId,
) -> Option<&'a mut TreeNode> {
    for node in nodes.iter_mut() {
        if node.id() == id {
            return Some(node);
        }
        if let Some(found) = find_node_by_id_mut(node.children_mut(), id) {
            return Some(found);
        }
    }
    None
}

/// Finds the direct parent of the node with `child_id`.
pub fn find_parent_by_child_id<'a>(nodes: &'a [TreeNode], child_id: &NodeId) -> ParentLookup<'a> {
    if nodes.iter().any(|node| node.id() == child_id) {
        return ParentLookup::Root;
    }
    match find_parent_inner(nodes, child_id) {
        Some(parent) => ParentLookup::Parent(parent),
        None => ParentLookup::NotFound,
    }
}

fn find_parent_inner<'a>(nodes: &'a [TreeNode], child_id: &NodeId) -> Option<&'a TreeNode> {
    for node in nodes {
        if node.children().iter().any(|child| child.id() == child_id) {
            return Some(node);
        }
        if let Some(found) = find_parent_inner(node.children(), child_id) {
            return Some(found);
        }
    }
    None
}

pub fn find_parent_by_child_id_mut<'a>(
    nodes: &'a mut [TreeNode],
    child_id: &NodeId,
) -> Option<&'a mut TreeNode> {
    for node in nodes.iter_mut() {
        if node.children().iter().any(|child| child.id() == child_id) {
            return Some(node);
        }
        if let Some(found) = find_parent_by_child_id_mut(node.children_mut(), child_id) {
            return Some(found);
        }
    }
    None
}

/// Builds the id-keyed child-to-parent map, one entry per non-root node.
///
/// Recomputed on demand (O(n)) rather than maintained incrementally; the
/// tree is mutated directly and incremental maintenance would drift.
pub fn build_parent_map(nodes: &[TreeNode]) -> BTreeMap<NodeId, NodeId> {
    let mut map = BTreeMap::new();
    collect_parents(nodes, &mut map);
    map
}

fn collect_parents(nodes: &[TreeNode], map: &mut BTreeMap<NodeId, NodeId>) {
    for node in nodes {
        for child in node.children() {
            map.insert(child.id().clone(), node.id().clone());
        }
        collect_parents(node.children(), map);
    }
}

/// Whether `node_id` sits anywhere below `ancestor_id`.
///
/// The hop bound keeps the walk finite even if a corrupted map contains a
/// parent cycle.
pub fn is_descendant(
    parent_map: &BTreeMap<NodeId, NodeId>,
    ancestor_id: &NodeId,
    node_id: &NodeId,
) -> bool {
    let mut current = parent_map.get(node_id);
    let mut hops = 0usize;
    while let Some(parent_id) = current {
        if parent_id == ancestor_id {
            return true;
        }
        hops += 1;
        if hops > parent_map.len() {
            break;
        }
        current = parent_map.get(parent_id);
    }
    false
}

/// Effective entity kind of a node: its own, or the nearest ancestor's.
pub fn effective_kind(
    nodes: &[TreeNode],
    parent_map: &BTreeMap<NodeId, NodeId>,
    id: &NodeId,
) -> Option<EntityKind> {
    let mut current = Some(id);
    let mut hops = 0usize;
    while let Some(current_id) = current {
        let node = find_node_by_id(nodes, current_id)?;
        if let Some(kind) = node.kind() {
            return Some(kind);
        }
        hops += 1;
        if hops > parent_map.len() {
            break;
        }
        current = parent_map.get(current_id);
    }
    None
}

/// Stable reordering with droppable subfolders ahead of leaf items, for
/// presentational use.
pub fn sorted_subfolders_first(children: &[TreeNode]) -> Vec<&TreeNode> {
    let mut sorted: Vec<&TreeNode> = children.iter().collect();
    sorted.sort_by_key(|child| !child.is_droppable());
    sorted
}

/// The canonical insertion rule.
///
/// Subfolders go to the front (most recent first); leaf items go after the
/// existing leaf run, ahead of any trailing subfolders a corrupted order
/// may have left behind.
pub fn insert_node_sorted(children: &mut Vec<TreeNode>, node: TreeNode) {
    if node.is_droppable() {
        children.insert(0, node);
        return;
    }
    let insert_at = children
        .iter()
        .rposition(|child| !child.is_droppable())
        .map(|index| index + 1)
        .unwrap_or(children.len());
    children.insert(insert_at, node);
}

/// Depth-first flatten; `order` is the index within each level's children
/// at the time of flattening, `parent_id` is `None` for roots.
pub fn tree_to_flat_nodes(nodes: &[TreeNode]) -> Vec<FlatTreeNode> {
    let mut flat = Vec::new();
    flatten_level(nodes, None, &mut flat);
    flat
}

fn flatten_level(nodes: &[TreeNode], parent_id: Option<&NodeId>, out: &mut Vec<FlatTreeNode>) {
    for (index, node) in nodes.iter().enumerate() {
        out.push(FlatTreeNode {
            id: node.id().clone(),
            parent_id: parent_id.cloned(),
            label: node.label().to_owned(),
            icon: node.icon().to_owned(),
            order: index,
            draggable: node.is_draggable(),
            droppable: node.is_droppable(),
            expanded: node.is_expanded(),
            link: node.link().map(ToOwned::to_owned),
            kind: node.kind(),
        });
        flatten_level(node.children(), Some(node.id()), out);
    }
}

/// Rebuilds the tree from its flat projection.
///
/// Defensive against corrupted persisted data: duplicate ids keep the
/// first occurrence only, and nodes whose `parent_id` never resolves (or
/// sits on a parent cycle) are dropped silently.
pub fn flat_nodes_to_tree(flat_nodes: &[FlatTreeNode]) -> Vec<TreeNode> {
    let mut seen = BTreeSet::new();
    let mut deduplicated: Vec<&FlatTreeNode> = flat_nodes
        .iter()
        .filter(|flat| seen.insert(flat.id.clone()))
        .collect();
    deduplicated.sort_by_key(|flat| flat.order);

    let mut by_parent: BTreeMap<Option<NodeId>, Vec<&FlatTreeNode>> = BTreeMap::new();
    for flat in deduplicated {
        by_parent
            .entry(flat.parent_id.clone())
            .or_default()
            .push(flat);
    }

    attach_children(&mut by_parent, None)
}

fn attach_children(
    by_parent: &mut BTreeMap<Option<NodeId>, Vec<&FlatTreeNode>>,
    parent_id: Option<NodeId>,
) -> Vec<TreeNode> {
    let Some(group) = by_parent.remove(&parent_id) else {
        return Vec::new();
    };
    group
        .into_iter()
        .map(|flat| {
            let children = attach_children(by_parent, Some(flat.id.clone()));
            node_from_flat(flat, children)
        })
        .collect()
}

fn node_from_flat(flat: &FlatTreeNode, children: Vec<TreeNode>) -> TreeNode {
    let mut node = TreeNode::new(flat.id.clone(), flat.label.clone())
        .with_icon(flat.icon.clone())
        .with_children(children)
        .draggable(flat.draggable)
        .droppable(flat.droppable)
        .expanded(flat.expanded);
    node.set_link(flat.link.clone());
    node.set_kind(flat.kind);
    node
}

/// Removes children with duplicate ids within each parent's children list,
/// first occurrence wins. Idempotent.
pub fn deduplicate_tree(nodes: Vec<TreeNode>) -> Vec<TreeNode> {
    let mut seen = BTreeSet::new();
    let mut result = Vec::with_capacity(nodes.len());
    for mut node in nodes {
        if !seen.insert(node.id().clone()) {
            continue;
        }
        let children = std::mem::take(node.children_mut());
        *node.children_mut() = deduplicate_tree(children);
        result.push(node);
    }
    result
}

/// Percent-decodes a link so encoded (`%20`) and raw (space) forms compare
/// equal; undecodable input is compared as-is.
pub fn normalize_link(link: &str) -> String {
    match percent_decode_str(link).decode_utf8() {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => link.to_owned(),
    }
}

/// Whether a node link and a url refer to the same location.
pub fn matches_url(node_link: &str, url: &str) -> bool {
    normalize_link(node_link) == normalize_link(url)
}

/// Whether a node or any of its descendants matches the url, exactly or as
/// a `/`-bounded sub-path (`/A` covers `/A/B` but not `/AB`).
pub fn has_active_descendant(node: &TreeNode, url: &str) -> bool {
    if let Some(link) = node.link() {
        let url_norm = normalize_link(url);
        let link_norm = normalize_link(link);
        if link_norm == url_norm || url_norm.starts_with(&format!("{link_norm}/")) {
            return true;
        }
    }
    node.children()
        .iter()
        .any(|child| has_active_descendant(child, url))
}

/// Ancestor trail (root first) for the node matching `url`.
///
/// Exact link matches win; otherwise the node with the longest link that is
/// a `/`-bounded prefix of the url is picked, which keeps breadcrumbs
/// working on detail pages no node links to directly.
pub fn find_node_trail<'a>(nodes: &'a [TreeNode], url: &str) -> Vec<&'a TreeNode> {
    for node in nodes {
        if let Some(trail) = match_node_exact(node, url) {
            return trail;
        }
    }

    let url_norm = normalize_link(url);
    let mut best: Vec<&TreeNode> = Vec::new();
    let mut best_link_len = 0usize;
    let mut trail = Vec::new();
    for node in nodes {
        collect_closest_prefix(node, &url_norm, &mut trail, &mut best, &mut best_link_len);
    }
    best
}

fn match_node_exact<'a>(node: &'a TreeNode, url: &str) -> Option<Vec<&'a TreeNode>> {
    if node.link().is_some_and(|link| matches_url(link, url)) {
        return Some(vec![node]);
    }
    for child in node.children() {
        if let Some(mut trail) = match_node_exact(child, url) {
            trail.insert(0, node);
            return Some(trail);
        }
    }
    None
}

fn collect_closest_prefix<'a>(
    node: &'a TreeNode,
    url_norm: &str,
    trail: &mut Vec<&'a TreeNode>,
    best: &mut Vec<&'a TreeNode>,
    best_link_len: &mut usize,
) {
    trail.push(node);
    if let Some(link) = node.link() {
        let link_norm = normalize_link(link);
        let bounded_prefix = url_norm == link_norm
            || (url_norm.starts_with(&link_norm)
                && (link_norm.ends_with('/')
                    || url_norm.as_bytes().get(link_norm.len()) == Some(&b'/')));
        let better = link_norm.len() > *best_link_len
            || (link_norm.len() == *best_link_len && trail.len() > best.len());
        if bounded_prefix && better {
            *best = trail.clone();
            *best_link_len = link_norm.len();
        }
    }
    for child in node.children() {
        collect_closest_prefix(child, url_norm, trail, best, best_link_len);
    }
    trail.pop();
}

#[cfg(test)]
mod tests;
