use std::fmt::Display;

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::{Resource, ResourceKind};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Player {
    pub player_id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub age: Option<i64>,
    #[serde(default)]
    pub team_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Team {
    pub team_id: i64,
    #[serde(default)]
    pub team_name: Option<String>,
    #[serde(default, deserialize_with = "lenient_colors")]
    pub team_colors: Option<Vec<String>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Coach {
    pub coach_id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub home_phone: Option<String>,
    #[serde(default)]
    pub team_id: Option<i64>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Parent {
    pub parent_id: i64,
    #[serde(default)]
    pub first_name: Option<String>,
    #[serde(default)]
    pub last_name: Option<String>,
    #[serde(default)]
    pub home_phone: Option<String>,
    #[serde(default)]
    pub street: Option<String>,
    #[serde(default)]
    pub city: Option<String>,
    #[serde(default)]
    pub state: Option<String>,
    #[serde(default)]
    pub zip_code: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlayerParent {
    #[serde(default)]
    pub player_id: Option<i64>,
    #[serde(default)]
    pub parent_id: Option<i64>,
    #[serde(default)]
    pub relationship_type: Option<String>,
}

/// Anything but an array reads as no colors; null entries are skipped so
/// one odd row never fails the whole list.
fn lenient_colors<'de, D>(deserializer: D) -> Result<Option<Vec<String>>, D::Error>
where
    D: Deserializer<'de>,
{
    let Value::Array(items) = Value::deserialize(deserializer)? else {
        return Ok(None);
    };
    let colors = items
        .into_iter()
        .filter_map(|item| match item {
            Value::Null => None,
            Value::String(color) => Some(color),
            other => Some(other.to_string()),
        })
        .collect();
    Ok(Some(colors))
}

impl Team {
    pub fn colors_display(&self) -> String {
        self.team_colors
            .as_deref()
            .map(super::forms::join_colors)
            .unwrap_or_default()
    }
}

impl Parent {
    /// Non-empty address parts joined with ", ".
    pub fn address(&self) -> String {
        [&self.street, &self.city, &self.state, &self.zip_code]
            .into_iter()
            .filter_map(|part| part.as_deref())
            .filter(|part| !part.is_empty())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

fn text<T: Display>(value: &Option<T>) -> String {
    value.as_ref().map(ToString::to_string).unwrap_or_default()
}

fn full_name(first: &Option<String>, last: &Option<String>) -> String {
    format!("{} {}", text(first), text(last)).trim().to_string()
}

impl Resource for Player {
    const KIND: ResourceKind = ResourceKind::Player;

    fn key(&self) -> Option<i64> {
        Some(self.player_id)
    }

    fn cells(&self) -> Vec<String> {
        vec![
            text(&self.first_name),
            text(&self.last_name),
            text(&self.age),
            text(&self.team_id),
        ]
    }

    fn card_title(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    fn card_fields(&self) -> Vec<(&'static str, String)> {
        vec![("Age", text(&self.age)), ("Team ID", text(&self.team_id))]
    }
}

impl Resource for Team {
    const KIND: ResourceKind = ResourceKind::Team;

    fn key(&self) -> Option<i64> {
        Some(self.team_id)
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.team_id.to_string(),
            text(&self.team_name),
            self.colors_display(),
        ]
    }

    fn card_title(&self) -> String {
        match self.team_name.as_deref() {
            Some(name) if !name.is_empty() => name.to_string(),
            _ => "Team".to_string(),
        }
    }

    fn card_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Team ID", self.team_id.to_string()),
            ("Team Colors", self.colors_display()),
        ]
    }
}

impl Resource for Coach {
    const KIND: ResourceKind = ResourceKind::Coach;

    fn key(&self) -> Option<i64> {
        Some(self.coach_id)
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.coach_id.to_string(),
            text(&self.first_name),
            text(&self.last_name),
            text(&self.home_phone),
            text(&self.team_id),
        ]
    }

    fn card_title(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    fn card_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Coach ID", self.coach_id.to_string()),
            ("Phone", text(&self.home_phone)),
            ("Team ID", text(&self.team_id)),
        ]
    }
}

impl Resource for Parent {
    const KIND: ResourceKind = ResourceKind::Parent;

    fn key(&self) -> Option<i64> {
        Some(self.parent_id)
    }

    fn cells(&self) -> Vec<String> {
        vec![
            self.parent_id.to_string(),
            text(&self.first_name),
            text(&self.last_name),
            text(&self.home_phone),
            self.address(),
        ]
    }

    fn card_title(&self) -> String {
        full_name(&self.first_name, &self.last_name)
    }

    fn card_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Parent ID", self.parent_id.to_string()),
            ("Phone", text(&self.home_phone)),
            ("Address", self.address()),
        ]
    }
}

impl Resource for PlayerParent {
    const KIND: ResourceKind = ResourceKind::PlayerParent;

    fn key(&self) -> Option<i64> {
        None
    }

    fn cells(&self) -> Vec<String> {
        vec![
            text(&self.player_id),
            text(&self.parent_id),
            text(&self.relationship_type),
        ]
    }

    fn card_title(&self) -> String {
        match self.relationship_type.as_deref() {
            Some(kind) if !kind.is_empty() => kind.to_string(),
            _ => "Relationship".to_string(),
        }
    }

    fn card_fields(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Player ID", text(&self.player_id)),
            ("Parent ID", text(&self.parent_id)),
        ]
    }
}
