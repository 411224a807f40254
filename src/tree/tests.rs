// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sidetree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidetree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use rstest::rstest;

use super::{
    build_parent_map, deduplicate_tree, effective_kind, find_node_by_id, find_node_trail,
    find_parent_by_child_id, flat_nodes_to_tree, has_active_descendant, insert_node_sorted,
    is_descendant, matches_url, normalize_link, sorted_subfolders_first, tree_to_flat_nodes,
    ParentLookup,
};
use crate::model::{EntityKind, NodeId, TreeNode};

fn id(raw: &str) -> NodeId {
    NodeId::new(raw).expect("test id")
}

fn folder(raw: &str) -> TreeNode {
    TreeNode::new(id(raw), raw).droppable(true)
}

fn leaf(raw: &str) -> TreeNode {
    TreeNode::new(id(raw), raw).draggable(true)
}

/// Candidates folder holding one subfolder (with a nested leaf) and one
/// leaf item.
fn sample_tree() -> Vec<TreeNode> {
    vec![
        folder("Candidates")
            .with_kind(EntityKind::Candidates)
            .with_link("/Candidates")
            .with_children(vec![
                folder("shortlist").with_children(vec![leaf("c2")]),
                leaf("c1").with_link("/Candidates/profile/c1"),
            ]),
        folder("Jobs")
            .with_kind(EntityKind::Jobs)
            .with_link("/Jobs"),
    ]
}

#[test]
fn find_node_by_id_searches_depth_first() {
    let items = sample_tree();
    let found = find_node_by_id(&items, &id("c2")).expect("nested leaf");
    assert_eq!(found.label(), "c2");
    assert!(find_node_by_id(&items, &id("missing")).is_none());
}

#[test]
fn find_parent_distinguishes_root_from_not_found() {
    let items = sample_tree();

    match find_parent_by_child_id(&items, &id("c2")) {
        ParentLookup::Parent(parent) => assert_eq!(parent.id(), &id("shortlist")),
        other => panic!("expected Parent, got {other:?}"),
    }
    assert_eq!(
        find_parent_by_child_id(&items, &id("Candidates")),
        ParentLookup::Root
    );
    assert_eq!(
        find_parent_by_child_id(&items, &id("missing")),
        ParentLookup::NotFound
    );
}

#[test]
fn parent_map_answers_descendant_queries() {
    let items = sample_tree();
    let parent_map = build_parent_map(&items);

    assert!(is_descendant(&parent_map, &id("Candidates"), &id("c2")));
    assert!(is_descendant(&parent_map, &id("shortlist"), &id("c2")));
    assert!(!is_descendant(&parent_map, &id("Jobs"), &id("c2")));
    // A node is not its own descendant.
    assert!(!is_descendant(&parent_map, &id("c2"), &id("c2")));
}

#[test]
fn effective_kind_inherits_from_nearest_ancestor() {
    let items = sample_tree();
    let parent_map = build_parent_map(&items);

    assert_eq!(
        effective_kind(&items, &parent_map, &id("Candidates")),
        Some(EntityKind::Candidates)
    );
    // "shortlist" and "c2" carry no kind of their own.
    assert_eq!(
        effective_kind(&items, &parent_map, &id("c2")),
        Some(EntityKind::Candidates)
    );

    let untyped = vec![folder("loose").with_children(vec![leaf("x")])];
    let untyped_map = build_parent_map(&untyped);
    assert_eq!(effective_kind(&untyped, &untyped_map, &id("x")), None);
}

#[test]
fn insert_node_sorted_puts_new_subfolders_first() {
    let mut children = vec![folder("old-folder"), leaf("item-1")];
    insert_node_sorted(&mut children, folder("new-folder"));

    let ids: Vec<&str> = children.iter().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, ["new-folder", "old-folder", "item-1"]);
}

#[test]
fn insert_node_sorted_appends_leaf_items_after_existing_ones() {
    let mut children = vec![folder("sub"), leaf("item-1")];
    insert_node_sorted(&mut children, leaf("item-2"));

    let ids: Vec<&str> = children.iter().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, ["sub", "item-1", "item-2"]);
}

#[test]
fn insert_node_sorted_keeps_leaf_ahead_of_trailing_subfolder() {
    // Corrupted order with a subfolder at the end.
    let mut children = vec![leaf("item-1"), folder("sub")];
    insert_node_sorted(&mut children, leaf("item-2"));

    let ids: Vec<&str> = children.iter().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, ["item-1", "item-2", "sub"]);
}

#[test]
fn insert_node_sorted_appends_leaf_when_only_subfolders_exist() {
    let mut children = vec![folder("a"), folder("b")];
    insert_node_sorted(&mut children, leaf("item-1"));

    let ids: Vec<&str> = children.iter().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, ["a", "b", "item-1"]);
}

#[test]
fn sorted_subfolders_first_is_stable() {
    let children = vec![leaf("i1"), folder("f1"), leaf("i2"), folder("f2")];
    let sorted = sorted_subfolders_first(&children);
    let ids: Vec<&str> = sorted.iter().map(|c| c.id().as_str()).collect();
    assert_eq!(ids, ["f1", "f2", "i1", "i2"]);
}

#[test]
fn flatten_and_rebuild_round_trips() {
    let items = sample_tree();
    let flat = tree_to_flat_nodes(&items);
    let rebuilt = flat_nodes_to_tree(&flat);
    assert_eq!(rebuilt, items);
}

#[test]
fn flatten_assigns_per_level_order_and_parent_ids() {
    let items = sample_tree();
    let flat = tree_to_flat_nodes(&items);

    let candidates = flat.iter().find(|n| n.id == id("Candidates")).expect("root");
    assert_eq!(candidates.parent_id, None);
    assert_eq!(candidates.order, 0);

    let c1 = flat.iter().find(|n| n.id == id("c1")).expect("leaf");
    assert_eq!(c1.parent_id, Some(id("Candidates")));
    assert_eq!(c1.order, 1);
}

#[test]
fn rebuild_sorts_siblings_by_stored_order() {
    let mut flat = tree_to_flat_nodes(&sample_tree());
    flat.reverse();
    let rebuilt = flat_nodes_to_tree(&flat);
    assert_eq!(rebuilt, sample_tree());
}

#[test]
fn rebuild_drops_duplicate_ids_keeping_first_occurrence() {
    let mut flat = tree_to_flat_nodes(&sample_tree());
    let mut duplicate = flat[0].clone();
    duplicate.label = "imposter".to_owned();
    flat.push(duplicate);

    let rebuilt = flat_nodes_to_tree(&flat);
    assert_eq!(rebuilt, sample_tree());
}

#[test]
fn rebuild_drops_nodes_with_unresolvable_parent() {
    let mut flat = tree_to_flat_nodes(&sample_tree());
    let mut orphan = flat
        .iter()
        .find(|n| n.id == id("c1"))
        .expect("leaf")
        .clone();
    orphan.id = id("orphan");
    orphan.parent_id = Some(id("missing-parent"));
    flat.push(orphan);

    let rebuilt = flat_nodes_to_tree(&flat);
    assert_eq!(rebuilt, sample_tree());
}

#[test]
fn deduplicate_tree_removes_later_duplicates_and_is_idempotent() {
    let items = vec![folder("Candidates").with_children(vec![
        leaf("c1"),
        leaf("c1"),
        leaf("c3"),
    ])];

    let deduplicated = deduplicate_tree(items);
    let ids: Vec<&str> = deduplicated[0]
        .children()
        .iter()
        .map(|c| c.id().as_str())
        .collect();
    assert_eq!(ids, ["c1", "c3"]);

    let again = deduplicate_tree(deduplicated.clone());
    assert_eq!(again, deduplicated);
}

#[rstest]
#[case("/lists/saved%20lists", "/lists/saved lists")]
#[case("/plain", "/plain")]
fn normalize_link_decodes_percent_escapes(#[case] raw: &str, #[case] expected: &str) {
    assert_eq!(normalize_link(raw), expected);
}

#[test]
fn matches_url_compares_encoded_and_raw_forms_equal() {
    assert!(matches_url("/lists/saved%20lists", "/lists/saved lists"));
    assert!(!matches_url("/lists/a", "/lists/b"));
}

#[test]
fn has_active_descendant_respects_path_boundary() {
    let node = folder("Candidates").with_link("/A");
    assert!(has_active_descendant(&node, "/A"));
    assert!(has_active_descendant(&node, "/A/B"));
    assert!(!has_active_descendant(&node, "/AB"));
}

#[test]
fn find_node_trail_prefers_exact_match() {
    let items = sample_tree();
    let trail = find_node_trail(&items, "/Candidates/profile/c1");
    let ids: Vec<&str> = trail.iter().map(|n| n.id().as_str()).collect();
    assert_eq!(ids, ["Candidates", "c1"]);
}

#[test]
fn find_node_trail_falls_back_to_longest_bounded_prefix() {
    let items = sample_tree();
    // No node links to the profile page of c9; the Candidates folder is
    // the closest ancestor by link prefix.
    let trail = find_node_trail(&items, "/Candidates/profile/c9");
    let ids: Vec<&str> = trail.iter().map(|n| n.id().as_str()).collect();
    assert_eq!(ids, ["Candidates"]);
}

#[test]
fn find_node_trail_does_not_cross_path_boundaries() {
    let items = vec![folder("a").with_link("/A")];
    assert!(find_node_trail(&items, "/AB").is_empty());
}

#[test]
fn find_node_trail_returns_empty_when_nothing_matches() {
    let items = sample_tree();
    assert!(find_node_trail(&items, "/Reports").is_empty());
}
