use std::fmt::Display;

/// A row predicate in the REST layer's `<column>=<op>.<value>` dialect.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Filter {
    Eq { column: String, value: String },
    /// Case-insensitive substring match on `column`.
    Contains { column: String, term: String },
}

impl Filter {
    pub fn eq(column: impl Into<String>, value: impl Display) -> Self {
        Self::Eq {
            column: column.into(),
            value: value.to_string(),
        }
    }

    /// `None` for a blank term, which means "no filter".
    pub fn contains(column: impl Into<String>, term: &str) -> Option<Self> {
        if term.trim().is_empty() {
            return None;
        }
        Some(Self::Contains {
            column: column.into(),
            term: term.to_string(),
        })
    }

    pub fn to_query(&self) -> String {
        match self {
            Self::Eq { column, value } => {
                format!("{column}=eq.{}", urlencoding::encode(value))
            }
            Self::Contains { column, term } => {
                let pattern = format!("*{term}*");
                format!("{column}=ilike.{}", urlencoding::encode(&pattern))
            }
        }
    }
}
