// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sidetree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidetree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! End-to-end flow over the public API: derive the menu from a catalog,
//! drop records in, organize them into a subfolder, resolve breadcrumbs
//! and survive a "reload".

use std::cell::RefCell;
use std::rc::Rc;

use sidetree::drag::DragService;
use sidetree::menu::{EntityDefinition, EntityView, MenuBuilder, ViewKind};
use sidetree::model::{DragPayload, DraggedEntity, EntityKind, NodeId, TreeNode};
use sidetree::notify::{Notification, Notifier, Severity};
use sidetree::store::{KeyValueStore, MemoryStore, StoreError, TreeStateStore};
use sidetree::tree;

fn id(raw: &str) -> NodeId {
    NodeId::new(raw).expect("test id")
}

#[derive(Clone, Default)]
struct SharedStore {
    inner: Rc<RefCell<MemoryStore>>,
}

impl KeyValueStore for SharedStore {
    fn get(&self, key: &str) -> Option<String> {
        self.inner.borrow().get(key)
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.inner.borrow_mut().set(key, value)
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.inner.borrow_mut().remove(key)
    }
}

#[derive(Clone, Default)]
struct RecordingNotifier {
    log: Rc<RefCell<Vec<Notification>>>,
}

impl Notifier for RecordingNotifier {
    fn notify(&mut self, notification: Notification) {
        self.log.borrow_mut().push(notification);
    }
}

fn catalog() -> Vec<EntityDefinition> {
    vec![
        EntityDefinition {
            kind: EntityKind::Candidates,
            caption: "Candidates".to_owned(),
            properties: 0,
            views: vec![EntityView {
                id: "All".to_owned(),
                caption: "All Candidates".to_owned(),
                kind: ViewKind::Dynamic,
                properties: 0,
            }],
        },
        EntityDefinition {
            kind: EntityKind::Jobs,
            caption: "Jobs".to_owned(),
            properties: 0,
            views: Vec::new(),
        },
    ]
}

fn drop_candidate(service: &mut DragService, record_id: &str, label: &str, target: &str) {
    let payload = DragPayload::Entity(DraggedEntity::new(
        id(record_id),
        label,
        EntityKind::Candidates,
    ));
    service.start_drag(payload.clone());
    service.handle_drop(&payload, Some(&id(target)));
}

#[test]
fn organize_candidates_into_a_saved_list() {
    let backend = SharedStore::default();
    let notifier = RecordingNotifier::default();
    let log = notifier.log.clone();

    let mut service = DragService::new(
        TreeStateStore::new(Box::new(backend.clone())),
        Box::new(notifier),
    );
    service.set_items(MenuBuilder::new().build_menu(&catalog()));

    // Two records dragged in from the candidates table.
    drop_candidate(&mut service, "c1", "Jane Doe", "Candidates");
    drop_candidate(&mut service, "c2", "John Smith", "Candidates");

    // A user-created sublist, then one record moved into it.
    service.add_node(
        TreeNode::new(id("top-picks"), "Top Picks")
            .with_icon("pi pi-fw pi-star")
            .droppable(true)
            .draggable(true)
            .with_kind(EntityKind::Candidates),
        &id("Candidates"),
    );
    let jane = tree::find_node_by_id(service.items(), &id("c1"))
        .expect("dropped record")
        .clone();
    let payload = DragPayload::Node(jane);
    service.start_drag(payload.clone());
    service.handle_drop(&payload, Some(&id("top-picks")));

    let candidates =
        tree::find_node_by_id(service.items(), &id("Candidates")).expect("folder");
    let child_ids: Vec<&str> = candidates
        .children()
        .iter()
        .map(|c| c.id().as_str())
        .collect();
    // Subfolders first, then the remaining leaf items.
    assert_eq!(child_ids, ["top-picks", "All", "c2"]);

    let top_picks = tree::find_node_by_id(service.items(), &id("top-picks")).expect("sublist");
    assert_eq!(top_picks.children().len(), 1);
    assert_eq!(top_picks.children()[0].label(), "Jane Doe");

    // Every outcome surfaced as a notification, all successful.
    let severities: Vec<Severity> = log.borrow().iter().map(|n| n.severity).collect();
    assert_eq!(
        severities,
        [Severity::Success, Severity::Success, Severity::Success]
    );

    // Breadcrumbs resolve through the moved record's profile link.
    let trail = tree::find_node_trail(service.items(), "/Candidates/profile/c1");
    let trail_ids: Vec<&str> = trail.iter().map(|n| n.id().as_str()).collect();
    assert_eq!(trail_ids, ["Candidates", "top-picks", "c1"]);

    // A fresh service over the same backend sees the same tree.
    let reloaded = DragService::new(
        TreeStateStore::new(Box::new(backend)),
        Box::new(RecordingNotifier::default()),
    );
    assert_eq!(reloaded.items(), service.items());
}

#[test]
fn breadcrumbs_fall_back_to_the_owning_section() {
    let backend = SharedStore::default();
    let mut service = DragService::new(
        TreeStateStore::new(Box::new(backend)),
        Box::new(RecordingNotifier::default()),
    );
    service.set_items(MenuBuilder::new().build_menu(&catalog()));

    // No node links to this record; the section folder is the closest
    // bounded link prefix.
    let trail = tree::find_node_trail(service.items(), "/Candidates/profile/c42");
    let trail_ids: Vec<&str> = trail.iter().map(|n| n.id().as_str()).collect();
    assert_eq!(trail_ids, ["Candidates"]);
}
