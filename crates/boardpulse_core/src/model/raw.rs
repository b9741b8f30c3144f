//! Raw board export records.
//!
//! # Responsibility
//! - Give every export field an explicit Rust type and a documented default.
//! - Extract records from an already-validated JSON value exactly once.
//!
//! # Invariants
//! - Extraction never fails: missing or wrong-typed fields fall back to their
//!   defaults instead of aborting the board.
//! - Card, list and member order mirrors the export order.

use chrono::{DateTime, NaiveDate, NaiveDateTime, Utc};
use log::warn;
use serde_json::{Map, Value};

/// Whole board export as read from the source tool.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawBoard {
    /// Board identifier. Default: `""`.
    pub id: String,
    /// Board display name. Default: `""`.
    pub name: String,
    /// Cards in export order, closed ones included.
    pub cards: Vec<RawCard>,
    /// Lists (columns) in export order.
    pub lists: Vec<RawList>,
    /// Board members in export order.
    pub members: Vec<RawMember>,
}

/// One exported card.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RawCard {
    /// Default: `""`.
    pub id: String,
    /// Default: `""`.
    pub name: String,
    /// Free-text description. Default: `""`.
    pub desc: String,
    /// Due instant. Default: `None`; unparseable values also become `None`.
    pub due: Option<DateTime<Utc>>,
    /// Last activity instant. Default: `None`.
    pub date_last_activity: Option<DateTime<Utc>>,
    /// Owning list id. Default: `""`, which resolves to the unknown list.
    pub id_list: String,
    /// Assigned member ids in export order. Default: empty.
    pub id_members: Vec<String>,
    /// Default: empty.
    pub labels: Vec<RawLabel>,
    /// Archived flag. Default: `false`.
    pub closed: bool,
    /// Default: `""`.
    pub url: String,
}

/// One exported list.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawList {
    pub id: String,
    pub name: String,
}

/// One exported board member.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawMember {
    /// Default: `""`.
    pub id: String,
    /// `None` when absent or empty.
    pub full_name: Option<String>,
    /// Default: `""`.
    pub username: String,
    /// `None` when absent or empty.
    pub initials: Option<String>,
}

/// Card label.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RawLabel {
    /// Default: `""`. Unnamed labels are kept but ignored by observations.
    pub name: String,
    pub color: Option<String>,
}

impl RawBoard {
    /// Extracts a board from a JSON value.
    ///
    /// Callers are expected to run `validate_board` first; on an unvalidated
    /// value this still returns a (possibly empty) board.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            return Self::default();
        };

        Self {
            id: text(object, "id"),
            name: text(object, "name"),
            cards: array(object, "cards").iter().map(RawCard::from_value).collect(),
            lists: array(object, "lists").iter().map(RawList::from_value).collect(),
            members: array(object, "members")
                .iter()
                .map(RawMember::from_value)
                .collect(),
        }
    }
}

impl RawCard {
    /// Extracts one card; a non-object value yields an all-default card.
    pub fn from_value(value: &Value) -> Self {
        let Some(object) = value.as_object() else {
            warn!("event=card_shape_invalid module=model status=defaulted");
            return Self::default();
        };

        let id = text(object, "id");
        let due = instant(object, "due", &id);
        let date_last_activity = instant(object, "dateLastActivity", &id);

        Self {
            name: text(object, "name"),
            desc: text(object, "desc"),
            due,
            date_last_activity,
            id_list: text(object, "idList"),
            id_members: array(object, "idMembers")
                .iter()
                .filter_map(|member| member.as_str().map(str::to_string))
                .collect(),
            labels: array(object, "labels")
                .iter()
                .map(RawLabel::from_value)
                .collect(),
            closed: object
                .get("closed")
                .and_then(Value::as_bool)
                .unwrap_or(false),
            url: text(object, "url"),
            id,
        }
    }
}

impl RawList {
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(object) => Self {
                id: text(object, "id"),
                name: text(object, "name"),
            },
            None => Self::default(),
        }
    }
}

impl RawMember {
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(object) => Self {
                id: text(object, "id"),
                full_name: optional_text(object, "fullName"),
                username: text(object, "username"),
                initials: optional_text(object, "initials"),
            },
            None => Self::default(),
        }
    }
}

impl RawLabel {
    pub fn from_value(value: &Value) -> Self {
        match value.as_object() {
            Some(object) => Self {
                name: text(object, "name"),
                color: optional_text(object, "color"),
            },
            None => Self::default(),
        }
    }
}

/// Parses an export timestamp.
///
/// Accepts RFC 3339, naive `YYYY-MM-DDTHH:MM:SS[.fff]` (read as UTC) and bare
/// `YYYY-MM-DD` (UTC midnight). Returns `None` for anything else.
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return None;
    }

    if let Ok(parsed) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(naive) = NaiveDateTime::parse_from_str(trimmed, "%Y-%m-%dT%H:%M:%S%.f") {
        return Some(naive.and_utc());
    }
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}

fn instant(object: &Map<String, Value>, key: &str, card_id: &str) -> Option<DateTime<Utc>> {
    let parsed = match object.get(key)? {
        Value::Null => return None,
        Value::String(raw) if raw.trim().is_empty() => return None,
        Value::String(raw) => parse_instant(raw),
        Value::Number(millis) => millis.as_i64().and_then(DateTime::from_timestamp_millis),
        _ => None,
    };

    if parsed.is_none() {
        warn!(
            "event=card_date_invalid module=model status=defaulted card_id={} field={}",
            card_id, key
        );
    }
    parsed
}

fn text(object: &Map<String, Value>, key: &str) -> String {
    match object.get(key) {
        Some(Value::String(value)) => value.clone(),
        Some(Value::Number(value)) => value.to_string(),
        _ => String::new(),
    }
}

fn optional_text(object: &Map<String, Value>, key: &str) -> Option<String> {
    Some(text(object, key)).filter(|value| !value.is_empty())
}

fn array<'a>(object: &'a Map<String, Value>, key: &str) -> &'a [Value] {
    object
        .get(key)
        .and_then(Value::as_array)
        .map(Vec::as_slice)
        .unwrap_or(&[])
}
