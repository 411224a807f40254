// SPDX-FileCopyrightText: 2026 Bruno Meilick
// SPDX-License-Identifier: LicenseRef-Sidetree-FreeUse-NoCopy-NoDerivatives
//
// All rights reserved.
//
// This file is part of Sidetree and is proprietary software.
// Unauthorized copying, modification, or distribution is prohibited.

use std::fmt;
use std::str::FromStr;

use super::ids::NodeId;

/// Entity-type tag carried by folders and record links.
///
/// A folder only accepts payloads whose effective kind equals its own; the
/// kind also selects the drop icon and the record profile link template.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum EntityKind {
    Candidates,
    CandidateSourcing,
    Companies,
    Contacts,
    Consultants,
    Dashboards,
    EmailCampaigns,
    Jobs,
    Leads,
    OnBoarding,
    Opportunities,
    Pipeline,
    RecycleBin,
    Reports,
    Requirements,
    SavedLists,
}

impl EntityKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Candidates => "Candidates",
            Self::CandidateSourcing => "CandidateSourcing",
            Self::Companies => "Companies",
            Self::Contacts => "Contacts",
            Self::Consultants => "Consultants",
            Self::Dashboards => "Dashboards",
            Self::EmailCampaigns => "EmailCampaigns",
            Self::Jobs => "Jobs",
            Self::Leads => "Leads",
            Self::OnBoarding => "OnBoarding",
            Self::Opportunities => "Opportunities",
            Self::Pipeline => "Pipeline",
            Self::RecycleBin => "RecycleBin",
            Self::Reports => "Reports",
            Self::Requirements => "Requirements",
            Self::SavedLists => "SavedLists",
        }
    }

    /// Icon shown for leaf nodes created from a dropped record of this kind.
    pub fn icon(self) -> &'static str {
        match self {
            Self::Candidates => "pi pi-fw pi-users",
            Self::CandidateSourcing => "pi pi-fw pi-users",
            Self::Companies => "pi pi-fw pi-building",
            Self::Contacts => "pi pi-fw pi-id-card",
            Self::Consultants => "pi pi-fw pi-user",
            Self::Dashboards => "pi pi-fw pi-chart-bar",
            Self::EmailCampaigns => "pi pi-fw pi-envelope",
            Self::Jobs => "pi pi-fw pi-briefcase",
            Self::Leads => "pi pi-fw pi-user-plus",
            Self::OnBoarding => "pi pi-fw pi-check",
            Self::Opportunities => "pi pi-fw pi-lightbulb",
            Self::Pipeline => "pi pi-fw pi-sitemap",
            Self::RecycleBin => "pi pi-fw pi-trash",
            Self::Reports => "pi pi-fw pi-chart-line",
            Self::Requirements => "pi pi-fw pi-file",
            Self::SavedLists => "pi pi-fw pi-list",
        }
    }

    /// Link for the profile page of a record of this kind.
    pub fn profile_link(self, id: &NodeId) -> String {
        format!("/{}/profile/{}", self.as_str(), id)
    }
}

impl fmt::Display for EntityKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for EntityKind {
    type Err = ParseEntityKindError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "Candidates" => Ok(Self::Candidates),
            "CandidateSourcing" => Ok(Self::CandidateSourcing),
            "Companies" => Ok(Self::Companies),
            "Contacts" => Ok(Self::Contacts),
            "Consultants" => Ok(Self::Consultants),
            "Dashboards" => Ok(Self::Dashboards),
            "EmailCampaigns" => Ok(Self::EmailCampaigns),
            "Jobs" => Ok(Self::Jobs),
            "Leads" => Ok(Self::Leads),
            "OnBoarding" => Ok(Self::OnBoarding),
            "Opportunities" => Ok(Self::Opportunities),
            "Pipeline" => Ok(Self::Pipeline),
            "RecycleBin" => Ok(Self::RecycleBin),
            "Reports" => Ok(Self::Reports),
            "Requirements" => Ok(Self::Requirements),
            "SavedLists" => Ok(Self::SavedLists),
            _ => Err(ParseEntityKindError {
                value: s.to_owned(),
            }),
        }
    }
}

/// Fallback icon for kinds without a dedicated one and for untyped nodes.
pub const DEFAULT_ICON: &str = "pi pi-fw pi-file";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseEntityKindError {
    value: String,
}

impl ParseEntityKindError {
    pub fn value(&self) -> &str {
        &self.value
    }
}

impl fmt::Display for ParseEntityKindError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "unknown entity kind: {:?}", self.value)
    }
}

impl std::error::Error for ParseEntityKindError {}

/// An external record being dragged into the tree for the first time.
///
/// Multi-select drags carry the extra records as `additional_items`; the
/// drop handler continues past per-item duplicates and reports an aggregate
/// count. `extra_fields` is passthrough data from the originating view and
/// is never interpreted here.
#[derive(Debug, Clone, PartialEq)]
pub struct DraggedEntity {
    id: NodeId,
    label: String,
    kind: EntityKind,
    additional_items: Vec<EntityListing>,
    extra_fields: serde_json::Map<String, serde_json::Value>,
}

impl DraggedEntity {
    pub fn new(id: NodeId, label: impl Into<String>, kind: EntityKind) -> Self {
        Self {
            id,
            label: label.into(),
            kind,
            additional_items: Vec::new(),
            extra_fields: serde_json::Map::new(),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }

    pub fn kind(&self) -> EntityKind {
        self.kind
    }

    pub fn additional_items(&self) -> &[EntityListing] {
        &self.additional_items
    }

    pub fn additional_items_mut(&mut self) -> &mut Vec<EntityListing> {
        &mut self.additional_items
    }

    pub fn extra_fields(&self) -> &serde_json::Map<String, serde_json::Value> {
        &self.extra_fields
    }

    pub fn extra_fields_mut(&mut self) -> &mut serde_json::Map<String, serde_json::Value> {
        &mut self.extra_fields
    }
}

/// One `(id, label)` record listing inside a multi-select drag.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct EntityListing {
    id: NodeId,
    label: String,
}

impl EntityListing {
    pub fn new(id: NodeId, label: impl Into<String>) -> Self {
        Self {
            id,
            label: label.into(),
        }
    }

    pub fn id(&self) -> &NodeId {
        &self.id
    }

    pub fn label(&self) -> &str {
        &self.label
    }
}
