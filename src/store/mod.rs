// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sidetree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidetree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

//! Persistence of the flattened tree to an opaque key-value store.
//!
//! One fixed key holds the whole serialized envelope `{version, nodes}`.
//! The stored format stays stable for a given [`TREE_STATE_VERSION`]; a
//! version bump is the only sanctioned way to invalidate old data.

use std::collections::BTreeMap;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::model::{EntityKind, FlatTreeNode, IdError, NodeId, ParseEntityKindError};

/// Fixed key under which the serialized tree lives.
pub const TREE_STATE_KEY: &str = "sidetree.tree-state";

/// Stored schema version; increment to invalidate persisted state when the
/// envelope shape changes.
///
/// History: v1-3 initial forms, v4 kind tags on dropped nodes, v5 subfolder
/// ordering rework, v6 per-kind starter folders.
pub const TREE_STATE_VERSION: u32 = 6;

/// Opaque synchronous key-value backend (browser local storage, a file, an
/// in-memory map). The engine uses exactly one key.
pub trait KeyValueStore {
    fn get(&self, key: &str) -> Option<String>;
    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError>;
    fn remove(&mut self, key: &str) -> Result<(), StoreError>;
}

impl fmt::Debug for dyn KeyValueStore {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str("KeyValueStore")
    }
}

/// BTreeMap-backed [`KeyValueStore`]; never fails.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: BTreeMap<String, String>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &BTreeMap<String, String> {
        &self.entries
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Option<String> {
        self.entries.get(key).cloned()
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StoreError> {
        self.entries.insert(key.to_owned(), value.to_owned());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StoreError> {
        self.entries.remove(key);
        Ok(())
    }
}

#[derive(Debug)]
pub enum StoreError {
    Backend {
        key: String,
        message: String,
    },
    Json {
        key: String,
        source: serde_json::Error,
    },
    VersionMismatch {
        found: u32,
        expected: u32,
    },
    InvalidId {
        field: &'static str,
        value: String,
        source: IdError,
    },
    InvalidKind {
        field: &'static str,
        value: String,
        source: ParseEntityKindError,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Backend { key, message } => {
                write!(f, "backend error for key {key:?}: {message}")
            }
            Self::Json { key, source } => write!(f, "json error for key {key:?}: {source}"),
            Self::VersionMismatch { found, expected } => write!(
                f,
                "stored tree state version mismatch (found={found}, expected={expected})"
            ),
            Self::InvalidId {
                field,
                value,
                source,
            } => write!(f, "invalid id for {field}: {value:?}: {source}"),
            Self::InvalidKind {
                field,
                value,
                source,
            } => write!(f, "invalid entity kind for {field}: {value:?}: {source}"),
        }
    }
}

impl std::error::Error for StoreError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Json { source, .. } => Some(source),
            Self::InvalidId { source, .. } => Some(source),
            Self::InvalidKind { source, .. } => Some(source),
            Self::Backend { .. } | Self::VersionMismatch { .. } => None,
        }
    }
}

/// Load/save of the versioned tree envelope over a [`KeyValueStore`].
#[derive(Debug)]
pub struct TreeStateStore {
    backend: Box<dyn KeyValueStore>,
    key: String,
}

impl TreeStateStore {
    pub fn new(backend: Box<dyn KeyValueStore>) -> Self {
        Self {
            backend,
            key: TREE_STATE_KEY.to_owned(),
        }
    }

    pub fn with_key(mut self, key: impl Into<String>) -> Self {
        self.key = key.into();
        self
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// Reads and validates the stored envelope.
    ///
    /// `Ok(None)` means no entry exists; a version mismatch or corrupt
    /// entry is an error so the caller can log it before falling back.
    pub fn load(&self) -> Result<Option<Vec<FlatTreeNode>>, StoreError> {
        let Some(raw) = self.backend.get(&self.key) else {
            return Ok(None);
        };

        let state: StoredTreeStateJson =
            serde_json::from_str(&raw).map_err(|source| StoreError::Json {
                key: self.key.clone(),
                source,
            })?;

        if state.version != TREE_STATE_VERSION {
            return Err(StoreError::VersionMismatch {
                found: state.version,
                expected: TREE_STATE_VERSION,
            });
        }

        let mut nodes = Vec::with_capacity(state.nodes.len());
        for node_json in state.nodes {
            nodes.push(flat_node_from_json(node_json)?);
        }
        Ok(Some(nodes))
    }

    /// Serializes and writes the whole envelope under the fixed key.
    pub fn save(&mut self, nodes: &[FlatTreeNode]) -> Result<(), StoreError> {
        let state = StoredTreeStateJson {
            version: TREE_STATE_VERSION,
            nodes: nodes.iter().map(flat_node_to_json).collect(),
        };
        let raw = serde_json::to_string(&state).map_err(|source| StoreError::Json {
            key: self.key.clone(),
            source,
        })?;
        self.backend.set(&self.key, &raw)
    }

    /// Drops the stored entry entirely.
    pub fn clear(&mut self) -> Result<(), StoreError> {
        self.backend.remove(&self.key)
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct StoredTreeStateJson {
    version: u32,
    #[serde(default)]
    nodes: Vec<FlatTreeNodeJson>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct FlatTreeNodeJson {
    id: String,
    #[serde(default)]
    parent_id: Option<String>,
    label: String,
    icon: String,
    order: usize,
    #[serde(default)]
    draggable: bool,
    #[serde(default)]
    droppable: bool,
    #[serde(default)]
    expanded: bool,
    #[serde(default)]
    link: Option<String>,
    #[serde(default)]
    kind: Option<String>,
}

fn flat_node_to_json(node: &FlatTreeNode) -> FlatTreeNodeJson {
    FlatTreeNodeJson {
        id: node.id.to_string(),
        parent_id: node.parent_id.as_ref().map(ToString::to_string),
        label: node.label.clone(),
        icon: node.icon.clone(),
        order: node.order,
        draggable: node.draggable,
        droppable: node.droppable,
        expanded: node.expanded,
        link: node.link.clone(),
        kind: node.kind.map(|kind| kind.as_str().to_owned()),
    }
}

fn flat_node_from_json(node_json: FlatTreeNodeJson) -> Result<FlatTreeNode, StoreError> {
    let id = NodeId::new(node_json.id.clone()).map_err(|source| StoreError::InvalidId {
        field: "nodes[].id",
        value: node_json.id.clone(),
        source,
    })?;

    let parent_id = match node_json.parent_id {
        Some(raw) => Some(
            NodeId::new(raw.clone()).map_err(|source| StoreError::InvalidId {
                field: "nodes[].parent_id",
                value: raw,
                source,
            })?,
        ),
        None => None,
    };

    let kind = match node_json.kind {
        Some(raw) => Some(EntityKind::from_str(&raw).map_err(|source| {
            StoreError::InvalidKind {
                field: "nodes[].kind",
                value: raw,
                source,
            }
        })?),
        None => None,
    };

    Ok(FlatTreeNode {
        id,
        parent_id,
        label: node_json.label,
        icon: node_json.icon,
        order: node_json.order,
        draggable: node_json.draggable,
        droppable: node_json.droppable,
        expanded: node_json.expanded,
        link: node_json.link,
        kind,
    })
}
