//! Create/update forms for the editable resources.

use serde::{Deserialize, Serialize, de::DeserializeOwned};

use super::{Player, Resource, Team};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FormField {
    pub name: &'static str,
    pub label: &'static str,
    pub value: String,
    pub input_type: &'static str,
    pub required: bool,
    pub placeholder: &'static str,
}

impl FormField {
    fn text(name: &'static str, label: &'static str, value: &str) -> Self {
        Self {
            name,
            label,
            value: value.to_string(),
            input_type: "text",
            required: true,
            placeholder: "",
        }
    }

    fn number(name: &'static str, label: &'static str, value: &str) -> Self {
        Self {
            input_type: "number",
            required: false,
            ..Self::text(name, label, value)
        }
    }
}

/// A resource the console can create, update and delete.
pub trait Editable: Resource {
    /// Raw form submission, exactly as the browser sent it.
    type Form: DeserializeOwned + Default + Clone + Send + Sync + 'static;
    /// JSON body sent to the REST layer.
    type Payload: Serialize + Send + Sync;

    fn to_form(&self) -> Self::Form;

    fn payload(form: &Self::Form) -> Self::Payload;

    fn form_fields(form: &Self::Form) -> Vec<FormField>;
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct PlayerForm {
    pub first_name: String,
    pub last_name: String,
    pub age: String,
    pub team_id: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PlayerPayload {
    pub first_name: String,
    pub last_name: String,
    pub age: Option<i64>,
    pub team_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
#[serde(default)]
pub struct TeamForm {
    pub team_name: String,
    pub team_colors: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct TeamPayload {
    pub team_name: String,
    pub team_colors: Vec<String>,
}

/// Blank or non-numeric input is sent as `null`.
pub fn parse_optional_int(raw: &str) -> Option<i64> {
    raw.trim().parse().ok()
}

pub fn split_colors(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|color| !color.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_colors(colors: &[String]) -> String {
    colors.join(", ")
}

impl Editable for Player {
    type Form = PlayerForm;
    type Payload = PlayerPayload;

    fn to_form(&self) -> PlayerForm {
        PlayerForm {
            first_name: self.first_name.clone().unwrap_or_default(),
            last_name: self.last_name.clone().unwrap_or_default(),
            age: self.age.map(|age| age.to_string()).unwrap_or_default(),
            team_id: self.team_id.map(|id| id.to_string()).unwrap_or_default(),
        }
    }

    fn payload(form: &PlayerForm) -> PlayerPayload {
        PlayerPayload {
            first_name: form.first_name.clone(),
            last_name: form.last_name.clone(),
            age: parse_optional_int(&form.age),
            team_id: parse_optional_int(&form.team_id),
        }
    }

    fn form_fields(form: &PlayerForm) -> Vec<FormField> {
        vec![
            FormField::text("first_name", "First Name", &form.first_name),
            FormField::text("last_name", "Last Name", &form.last_name),
            FormField::number("age", "Age", &form.age),
            FormField::number("team_id", "Team ID", &form.team_id),
        ]
    }
}

impl Editable for Team {
    type Form = TeamForm;
    type Payload = TeamPayload;

    fn to_form(&self) -> TeamForm {
        TeamForm {
            team_name: self.team_name.clone().unwrap_or_default(),
            team_colors: self.colors_display(),
        }
    }

    fn payload(form: &TeamForm) -> TeamPayload {
        TeamPayload {
            team_name: form.team_name.clone(),
            team_colors: split_colors(&form.team_colors),
        }
    }

    fn form_fields(form: &TeamForm) -> Vec<FormField> {
        vec![
            FormField::text("team_name", "Team Name", &form.team_name),
            FormField {
                required: false,
                placeholder: "red, blue",
                ..FormField::text("team_colors", "Team Colors", &form.team_colors)
            },
        ]
    }
}
