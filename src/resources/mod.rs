//! Per-resource configuration.
//!
//! Every resource the console knows about is described once in
//! [`DESCRIPTORS`]; the adapter, the views and the routes all read from that
//! table instead of carrying their own copy of paths, key fields or labels.

use std::{fmt, str::FromStr};

use serde::{Serialize, de::DeserializeOwned};

pub mod forms;
pub mod models;

pub use forms::{Editable, FormField, PlayerForm, PlayerPayload, TeamForm, TeamPayload};
pub use models::{Coach, Parent, Player, PlayerParent, Team};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ResourceKind {
    Player,
    Team,
    Coach,
    Parent,
    PlayerParent,
}

impl ResourceKind {
    /// Tab order.
    pub const ALL: [ResourceKind; 5] = [
        ResourceKind::Player,
        ResourceKind::Team,
        ResourceKind::Coach,
        ResourceKind::Parent,
        ResourceKind::PlayerParent,
    ];

    pub fn descriptor(self) -> &'static ResourceDescriptor {
        let idx = match self {
            Self::Player => 0,
            Self::Team => 1,
            Self::Coach => 2,
            Self::Parent => 3,
            Self::PlayerParent => 4,
        };
        &DESCRIPTORS[idx]
    }

    pub fn slug(self) -> &'static str {
        self.descriptor().slug
    }
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.slug())
    }
}

impl FromStr for ResourceKind {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.slug() == value)
            .ok_or_else(|| format!("unknown resource: {value}"))
    }
}

#[derive(Debug)]
pub struct ResourceDescriptor {
    pub kind: ResourceKind,
    pub slug: &'static str,
    /// REST path, also the console path of the tab.
    pub path: &'static str,
    /// Column used for `eq.` targeting; junction rows have none.
    pub key_field: Option<&'static str>,
    pub singular: &'static str,
    pub plural: &'static str,
    pub empty_message: &'static str,
    pub columns: &'static [&'static str],
    /// Column searched with `ilike` from the tab's search box.
    pub search_field: Option<&'static str>,
    pub editable: bool,
}

pub static DESCRIPTORS: [ResourceDescriptor; 5] = [
    ResourceDescriptor {
        kind: ResourceKind::Player,
        slug: "player",
        path: "/player",
        key_field: Some("player_id"),
        singular: "Player",
        plural: "Players",
        empty_message: "No players found",
        columns: &["First Name", "Last Name", "Age", "Team ID"],
        search_field: Some("first_name"),
        editable: true,
    },
    ResourceDescriptor {
        kind: ResourceKind::Team,
        slug: "team",
        path: "/team",
        key_field: Some("team_id"),
        singular: "Team",
        plural: "Teams",
        empty_message: "No teams found",
        columns: &["Team ID", "Name", "Colors"],
        search_field: None,
        editable: true,
    },
    ResourceDescriptor {
        kind: ResourceKind::Coach,
        slug: "coach",
        path: "/coach",
        key_field: Some("coach_id"),
        singular: "Coach",
        plural: "Coaches",
        empty_message: "No coaches found",
        columns: &["Coach ID", "First Name", "Last Name", "Phone", "Team ID"],
        search_field: None,
        editable: false,
    },
    ResourceDescriptor {
        kind: ResourceKind::Parent,
        slug: "parent",
        path: "/parent",
        key_field: Some("parent_id"),
        singular: "Parent",
        plural: "Parents",
        empty_message: "No parents found",
        columns: &["Parent ID", "First Name", "Last Name", "Phone", "Address"],
        search_field: None,
        editable: false,
    },
    ResourceDescriptor {
        kind: ResourceKind::PlayerParent,
        slug: "player_parent",
        path: "/player_parent",
        key_field: None,
        singular: "Relationship",
        plural: "Player-Parent",
        empty_message: "No relationships found",
        columns: &["Player ID", "Parent ID", "Relationship"],
        search_field: None,
        editable: false,
    },
];

/// A row type the adapter can fetch and the console can display.
pub trait Resource: Serialize + DeserializeOwned + Send + Sync + 'static {
    const KIND: ResourceKind;

    fn descriptor() -> &'static ResourceDescriptor {
        Self::KIND.descriptor()
    }

    fn key(&self) -> Option<i64>;

    /// Table cells, in the order of the descriptor's columns.
    fn cells(&self) -> Vec<String>;

    fn card_title(&self) -> String;

    fn card_fields(&self) -> Vec<(&'static str, String)>;
}
