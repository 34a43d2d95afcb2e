//! View models shared by the console templates.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

use crate::resources::{Editable, FormField, Resource, ResourceDescriptor, ResourceKind};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ViewMode {
    #[default]
    Table,
    Cards,
}

impl ViewMode {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Table => "table",
            Self::Cards => "cards",
        }
    }

    /// Unknown or missing values fall back to `default`.
    pub fn from_query(raw: Option<&str>, default: ViewMode) -> Self {
        raw.and_then(|value| value.parse().ok()).unwrap_or(default)
    }
}

impl fmt::Display for ViewMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for ViewMode {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value {
            "table" => Ok(Self::Table),
            "cards" | "card" => Ok(Self::Cards),
            other => Err(format!("unknown view: {other}")),
        }
    }
}

#[derive(Debug, Clone)]
pub struct TabView {
    pub label: &'static str,
    pub href: String,
    pub selected: bool,
}

impl TabView {
    pub fn all(active: ResourceKind, view: ViewMode) -> Vec<TabView> {
        ResourceKind::ALL
            .into_iter()
            .map(|kind| {
                let descriptor = kind.descriptor();
                TabView {
                    label: descriptor.plural,
                    href: tab_href(descriptor, view),
                    selected: kind == active,
                }
            })
            .collect()
    }
}

#[derive(Debug, Clone)]
pub struct RowView {
    pub key: Option<i64>,
    pub cells: Vec<String>,
}

#[derive(Debug, Clone)]
pub struct FieldView {
    pub label: &'static str,
    pub value: String,
}

#[derive(Debug, Clone)]
pub struct CardView {
    pub key: Option<i64>,
    pub title: String,
    pub fields: Vec<FieldView>,
}

/// One resource's rows, ready for both layouts.
#[derive(Debug, Clone)]
pub struct SectionView {
    pub columns: &'static [&'static str],
    pub rows: Vec<RowView>,
    pub cards: Vec<CardView>,
    pub editable: bool,
    pub empty_message: &'static str,
    /// Header cells plus the actions column, for the empty row's colspan.
    pub column_span: usize,
}

impl SectionView {
    pub fn build<R: Resource>(records: &[R]) -> Self {
        let descriptor = R::descriptor();
        let rows = records
            .iter()
            .map(|record| RowView {
                key: record.key(),
                cells: record.cells(),
            })
            .collect();
        let cards = records
            .iter()
            .map(|record| CardView {
                key: record.key(),
                title: record.card_title(),
                fields: record
                    .card_fields()
                    .into_iter()
                    .map(|(label, value)| FieldView { label, value })
                    .collect(),
            })
            .collect();

        Self {
            columns: descriptor.columns,
            rows,
            cards,
            editable: descriptor.editable,
            empty_message: descriptor.empty_message,
            column_span: descriptor.columns.len() + usize::from(descriptor.editable),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

#[derive(Debug, Clone)]
pub struct FormView {
    pub title: String,
    pub action: String,
    pub cancel_href: String,
    pub fields: Vec<FormField>,
}

impl FormView {
    pub fn create<R: Editable>(form: &R::Form, view: ViewMode) -> Self {
        let descriptor = R::descriptor();
        Self {
            title: format!("Add New {}", descriptor.singular),
            action: format!("{}?view={view}", descriptor.path),
            cancel_href: tab_href(descriptor, view),
            fields: R::form_fields(form),
        }
    }

    pub fn edit<R: Editable>(key: i64, form: &R::Form, view: ViewMode) -> Self {
        let descriptor = R::descriptor();
        Self {
            title: format!("Edit {}", descriptor.singular),
            action: format!("{}/{key}?view={view}", descriptor.path),
            cancel_href: tab_href(descriptor, view),
            fields: R::form_fields(form),
        }
    }
}

pub fn tab_href(descriptor: &ResourceDescriptor, view: ViewMode) -> String {
    format!("{}?view={view}", descriptor.path)
}

/// `league_console` -> `League Console`.
pub fn project_name() -> String {
    let name = env!("CARGO_PKG_NAME")
        .split(['_', '-'])
        .filter(|word| !word.is_empty())
        .map(|word| {
            let mut chars = word.chars();
            match chars.next() {
                Some(first) => first.to_ascii_uppercase().to_string() + &chars.as_str().to_ascii_lowercase(),
                None => String::new(),
            }
        })
        .collect::<Vec<_>>()
        .join(" ");
    if name.is_empty() { "Console".to_string() } else { name }
}
