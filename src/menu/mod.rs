// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sidetree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidetree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Derives the presentational sidebar menu from a backend entity catalog.
//!
//! The catalog is the per-user entity/permission payload: which record
//! kinds exist, their captions, their views and the property bitmasks that
//! hide entries. The builder filters, groups pipeline entities and orders
//! the result into a tree ready for rendering.

use crate::model::{EntityKind, NodeId, TreeNode};

pub mod item_props {
    //! Property bitmask on catalog entries.

    pub const HIDABLE: u64 = 1 << 0;
    pub const HIDDEN: u64 = 1 << 1;
    pub const CAPTION_MODIFIABLE: u64 = 1 << 2;

    pub fn is_hidden(properties: u64) -> bool {
        properties & HIDDEN != 0
    }
}

/// One entity in the backend catalog.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityDefinition {
    pub kind: EntityKind,
    pub caption: String,
    pub properties: u64,
    pub views: Vec<EntityView>,
}

/// One saved view of an entity.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityView {
    pub id: String,
    pub caption: String,
    pub kind: ViewKind,
    pub properties: u64,
}

/// Backend discriminant for a view.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ViewKind {
    Static,
    Saved,
    Dynamic,
    Counts,
    Other(u32),
}

/// Which entities pin to the top/bottom of the menu and which group under
/// "Pipelines".
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MenuOrderConfig {
    pub top_entities: Vec<EntityKind>,
    pub bottom_entities: Vec<EntityKind>,
    pub pipeline_entities: Vec<EntityKind>,
}

impl Default for MenuOrderConfig {
    fn default() -> Self {
        Self {
            top_entities: vec![
                EntityKind::Dashboards,
                EntityKind::Candidates,
                EntityKind::Consultants,
                EntityKind::CandidateSourcing,
                EntityKind::Jobs,
                EntityKind::Requirements,
                EntityKind::Companies,
                EntityKind::Contacts,
                EntityKind::Leads,
            ],
            bottom_entities: vec![
                EntityKind::SavedLists,
                EntityKind::OnBoarding,
                EntityKind::RecycleBin,
            ],
            pipeline_entities: vec![EntityKind::Pipeline],
        }
    }
}

/// Transforms the catalog into sidebar tree nodes.
#[derive(Debug, Clone, Default)]
pub struct MenuBuilder {
    order_config: MenuOrderConfig,
}

impl MenuBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_order_config(mut self, order_config: MenuOrderConfig) -> Self {
        self.order_config = order_config;
        self
    }

    pub fn build_menu(&self, entities: &[EntityDefinition]) -> Vec<TreeNode> {
        if entities.is_empty() {
            return Vec::new();
        }

        let visible: Vec<&EntityDefinition> = entities
            .iter()
            .filter(|entity| !item_props::is_hidden(entity.properties))
            .collect();

        let (pipeline_entities, regular_entities): (Vec<_>, Vec<_>) = visible
            .into_iter()
            .partition(|entity| self.is_pipeline_entity(entity));

        let regular_nodes: Vec<TreeNode> = regular_entities
            .iter()
            .filter_map(|entity| entity_node(entity))
            .collect();
        let pipeline_node = pipelines_node(&pipeline_entities);

        self.assemble_menu(regular_nodes, pipeline_node)
    }

    fn is_pipeline_entity(&self, entity: &EntityDefinition) -> bool {
        entity.kind == EntityKind::Pipeline
            || entity.caption.contains("Pipeline")
            || self.order_config.pipeline_entities.contains(&entity.kind)
    }

    fn assemble_menu(
        &self,
        regular_nodes: Vec<TreeNode>,
        pipeline_node: Option<TreeNode>,
    ) -> Vec<TreeNode> {
        let mut result = Vec::with_capacity(regular_nodes.len() + 1);
        let mut remaining: Vec<Option<TreeNode>> = regular_nodes.into_iter().map(Some).collect();

        let take_by_kind = |remaining: &mut Vec<Option<TreeNode>>, kind: EntityKind| {
            remaining
                .iter_mut()
                .find(|slot| {
                    slot.as_ref()
                        .is_some_and(|node| node.kind() == Some(kind))
                })
                .and_then(Option::take)
        };

        for &kind in &self.order_config.top_entities {
            if let Some(node) = take_by_kind(&mut remaining, kind) {
                result.push(node);
            }
        }

        for slot in remaining.iter_mut() {
            let bottom = slot
                .as_ref()
                .is_some_and(|node| {
                    node.kind()
                        .is_some_and(|kind| self.order_config.bottom_entities.contains(&kind))
                });
            if !bottom {
                if let Some(node) = slot.take() {
                    result.push(node);
                }
            }
        }

        if let Some(pipeline_node) = pipeline_node {
            result.push(pipeline_node);
        }

        for &kind in &self.order_config.bottom_entities {
            if let Some(node) = take_by_kind(&mut remaining, kind) {
                result.push(node);
            }
        }

        result
    }
}

fn entity_node(entity: &EntityDefinition) -> Option<TreeNode> {
    let id = NodeId::new(entity.kind.as_str()).ok()?;
    let children = view_nodes(entity);

    Some(
        TreeNode::new(id, entity.caption.clone())
            .with_link(format!("/{}", entity.kind))
            .with_icon(entity_icon(entity.kind))
            .with_kind(entity.kind)
            .with_children(children)
            .droppable(true),
    )
}

fn view_nodes(entity: &EntityDefinition) -> Vec<TreeNode> {
    entity
        .views
        .iter()
        .filter(|view| is_view_visible(view))
        .filter_map(|view| {
            let id = NodeId::new(view.id.clone()).ok()?;
            Some(
                TreeNode::new(id, view.caption.clone())
                    .with_icon("pi pi-fw pi-list")
                    .with_link(format!("/{}/{}", entity.kind, view.id))
                    .with_kind(entity.kind)
                    .droppable(true),
            )
        })
        .collect()
}

fn is_view_visible(view: &EntityView) -> bool {
    // Static/saved views and count views never show in the menu.
    if matches!(view.kind, ViewKind::Static | ViewKind::Saved | ViewKind::Counts) {
        return false;
    }
    !item_props::is_hidden(view.properties)
}

fn pipelines_node(pipeline_entities: &[&EntityDefinition]) -> Option<TreeNode> {
    if pipeline_entities.is_empty() {
        return None;
    }

    let children: Vec<TreeNode> = pipeline_entities
        .iter()
        .flat_map(|entity| {
            entity
                .views
                .iter()
                .filter(|view| is_view_visible(view))
                .filter_map(|view| {
                    let id = NodeId::new(view.id.clone()).ok()?;
                    Some(
                        TreeNode::new(id, entity.caption.clone())
                            .with_icon(pipeline_icon(entity.kind))
                            .with_link(format!("/grid/{}/{}/DView", entity.kind, view.id))
                            .with_kind(entity.kind),
                    )
                })
                .collect::<Vec<_>>()
        })
        .collect();

    let id = NodeId::new("Pipelines").expect("hard-coded id is valid");
    Some(
        TreeNode::new(id, "Pipelines")
            .with_icon("pi pi-fw pi-sitemap")
            .with_children(children),
    )
}

fn entity_icon(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Candidates => "pi pi-fw pi-users",
        EntityKind::CandidateSourcing => "pi pi-fw pi-search",
        EntityKind::Companies => "pi pi-fw pi-building",
        EntityKind::Consultants => "pi pi-fw pi-users",
        EntityKind::Contacts => "pi pi-fw pi-id-card",
        EntityKind::Dashboards => "pi pi-fw pi-chart-bar",
        EntityKind::EmailCampaigns => "pi pi-fw pi-send",
        EntityKind::Jobs => "pi pi-fw pi-briefcase",
        EntityKind::Leads => "pi pi-fw pi-user-plus",
        EntityKind::OnBoarding => "pi pi-fw pi-check-circle",
        EntityKind::Opportunities => "pi pi-fw pi-money-bill",
        EntityKind::Pipeline => "pi pi-fw pi-sitemap",
        EntityKind::RecycleBin => "pi pi-fw pi-trash",
        EntityKind::Reports => "pi pi-fw pi-chart-line",
        EntityKind::Requirements => "pi pi-fw pi-check-square",
        EntityKind::SavedLists => "pi pi-fw pi-bookmark",
    }
}

fn pipeline_icon(kind: EntityKind) -> &'static str {
    match kind {
        EntityKind::Candidates | EntityKind::Consultants => "pi pi-fw pi-users",
        EntityKind::Contacts => "pi pi-fw pi-id-card",
        EntityKind::Leads => "pi pi-fw pi-user-plus",
        EntityKind::Requirements => "pi pi-fw pi-check-square",
        _ => "pi pi-fw pi-sitemap",
    }
}
