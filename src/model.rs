// Record model: the validated movie entry, the in-memory catalog and the
// pure operations over it. Everything here is free of terminal and file
// I/O so the logic can be tested directly.

use std::collections::BTreeMap;

use serde::Serialize;
use serde_json::{json, Map, Value};
use thiserror::Error;

/// The full in-memory catalog, keyed by movie title. A `BTreeMap` keeps
/// the iteration order deterministic, so listings and the saved file are
/// stable across runs.
pub type Catalog = BTreeMap<String, Record>;

/// Raised when a record cannot be built from the given fields. The
/// offending record is skipped (on load and sync) or the action is
/// aborted (on add and modify); it never takes down the program.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("record must be a JSON object")]
    NotAnObject,

    #[error("missing required field `{0}`")]
    MissingField(&'static str),

    #[error("field `{0}` must be a string")]
    WrongType(&'static str),

    #[error("title must not be empty")]
    EmptyTitle,
}

/// One validated movie entry. Field names follow the storage format used
/// by the catalog file and the OMDb search endpoint.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Record {
    #[serde(rename = "Title")]
    pub title: String,

    #[serde(rename = "Year")]
    pub year: String,

    #[serde(rename = "imdbID")]
    pub imdb_id: String,

    #[serde(rename = "Type")]
    pub kind: String,

    #[serde(rename = "Poster")]
    pub poster: Option<String>,
}

impl Record {
    /// Build a record from already-typed fields. This is the single
    /// construction path: add, modify, load and sync all go through it.
    pub fn new(
        title: String,
        year: String,
        imdb_id: String,
        kind: String,
        poster: Option<String>,
    ) -> Result<Self, ValidationError> {
        if title.trim().is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        Ok(Record {
            title,
            year,
            imdb_id,
            kind,
            poster,
        })
    }

    /// Build a record from a loose JSON object (a catalog file entry or
    /// one item of an API search result). Every required field must be
    /// present and be a string; `Poster` may be absent or null.
    pub fn from_value(value: &Value) -> Result<Self, ValidationError> {
        let fields = value.as_object().ok_or(ValidationError::NotAnObject)?;

        let title = required_string(fields, "Title")?;
        let year = required_string(fields, "Year")?;
        let imdb_id = required_string(fields, "imdbID")?;
        let kind = required_string(fields, "Type")?;
        let poster = match fields.get("Poster") {
            None | Some(Value::Null) => None,
            Some(Value::String(url)) => Some(url.clone()),
            Some(_) => return Err(ValidationError::WrongType("Poster")),
        };

        Record::new(title, year, imdb_id, kind, poster)
    }

    /// Convert the record back to its storage shape. `from_value` on the
    /// result returns an equal record.
    pub fn to_value(&self) -> Value {
        json!({
            "Title": self.title,
            "Year": self.year,
            "imdbID": self.imdb_id,
            "Type": self.kind,
            "Poster": self.poster,
        })
    }
}

fn required_string(
    fields: &Map<String, Value>,
    field: &'static str,
) -> Result<String, ValidationError> {
    match fields.get(field) {
        None | Some(Value::Null) => Err(ValidationError::MissingField(field)),
        Some(Value::String(text)) => Ok(text.clone()),
        Some(_) => Err(ValidationError::WrongType(field)),
    }
}

/// Case-insensitive substring match of `term` against every title in the
/// catalog. Returns the matching entries in catalog order.
pub fn search_titles<'a>(catalog: &'a Catalog, term: &str) -> Vec<(&'a str, &'a Record)> {
    let needle = term.to_lowercase();
    catalog
        .iter()
        .filter(|(title, _)| title.to_lowercase().contains(&needle))
        .map(|(title, record)| (title.as_str(), record))
        .collect()
}

/// Merge `incoming` into the catalog keyed by each record's title. On a
/// title collision the incoming record wins.
pub fn merge_records(catalog: &mut Catalog, incoming: Vec<Record>) {
    for record in incoming {
        catalog.insert(record.title.clone(), record);
    }
}
