//! Board export shape validation.
//!
//! # Responsibility
//! - Reject payloads that are not JSON or lack the required top-level shape.
//! - Hand validated payloads to record extraction without copying them.
//!
//! # Invariants
//! - Only top-level fields are inspected; card shapes are defaulted later.
//! - Checks run in a fixed order and the first failure wins.

use crate::model::raw::RawBoard;
use log::warn;
use serde_json::Value;
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Top-level fields every board export must carry.
const REQUIRED_FIELDS: &[&str] = &["id", "name", "cards", "lists", "members"];

/// Payload parsed but does not look like a board export.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    /// Required top-level field is absent, null, false or empty.
    MissingField(&'static str),
    /// `cards` is present but not a list.
    CardsNotList,
    /// `cards` is an empty list.
    NoCards,
}

impl Display for ValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MissingField(field) => write!(
                f,
                "invalid board export: missing `{field}`; make sure this is a complete board export"
            ),
            Self::CardsNotList => write!(f, "invalid board export: `cards` must be a list"),
            Self::NoCards => write!(f, "no cards found on the board"),
        }
    }
}

impl Error for ValidationError {}

/// Failure to turn raw text into a board.
#[derive(Debug)]
pub enum BoardError {
    /// Text is not parseable JSON.
    MalformedInput(serde_json::Error),
    /// JSON parsed but failed shape validation.
    Validation(ValidationError),
}

impl Display for BoardError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::MalformedInput(err) => write!(
                f,
                "malformed board export: {err}; check that the full content was copied"
            ),
            Self::Validation(err) => write!(f, "{err}"),
        }
    }
}

impl Error for BoardError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::MalformedInput(err) => Some(err),
            Self::Validation(err) => Some(err),
        }
    }
}

impl From<serde_json::Error> for BoardError {
    fn from(value: serde_json::Error) -> Self {
        Self::MalformedInput(value)
    }
}

impl From<ValidationError> for BoardError {
    fn from(value: ValidationError) -> Self {
        Self::Validation(value)
    }
}

/// Checks the minimal board export shape.
///
/// Returns the same payload on success so callers can chain extraction.
///
/// # Errors
/// - `MissingField` for the first of `id|name|cards|lists|members` that is
///   absent or falsy.
/// - `CardsNotList` when `cards` is not an array.
/// - `NoCards` when `cards` is empty.
pub fn validate_board(payload: &Value) -> Result<&Value, ValidationError> {
    if let Some(field) = REQUIRED_FIELDS
        .iter()
        .find(|field| !is_present(payload.get(**field)))
    {
        return Err(ValidationError::MissingField(*field));
    }

    let cards = payload
        .get("cards")
        .and_then(Value::as_array)
        .ok_or(ValidationError::CardsNotList)?;
    if cards.is_empty() {
        return Err(ValidationError::NoCards);
    }

    Ok(payload)
}

/// Parses, validates and extracts a board export in one step.
pub fn parse_board(text: &str) -> Result<RawBoard, BoardError> {
    let payload: Value = serde_json::from_str(text).map_err(|err| {
        warn!(
            "event=board_rejected module=ingest status=error reason=malformed line={} column={}",
            err.line(),
            err.column()
        );
        BoardError::from(err)
    })?;

    if let Err(err) = validate_board(&payload) {
        warn!(
            "event=board_rejected module=ingest status=error reason={:?}",
            err
        );
        return Err(err.into());
    }

    Ok(RawBoard::from_value(&payload))
}

fn is_present(value: Option<&Value>) -> bool {
    match value {
        None | Some(Value::Null) | Some(Value::Bool(false)) => false,
        Some(Value::String(text)) => !text.is_empty(),
        Some(Value::Number(number)) => number.as_f64() != Some(0.0),
        Some(_) => true,
    }
}
