//! Folder document serialization
//!
//! A document is a JSON array of [`FolderNode`] trees, indented with four
//! spaces so it stays readable when inspected or hand-edited between
//! discovery and replication.
//!
//! Reading has no nesting limit, so any tree discovery produces can be read
//! back; deep input grows the stack on the heap instead of overflowing it.

use crate::error::{Error, IoError, Result, ValidationError};
use crate::model::FolderNode;
use serde::{Deserialize, Serialize};
use serde::de::DeserializeOwned;
use serde_json::ser::{PrettyFormatter, Serializer};
use std::path::Path;
use tokio::fs;

const INDENT: &[u8] = b"    ";

/// Render folders as a document
pub fn to_json_string(folders: &[FolderNode]) -> Result<String> {
    to_pretty_json(&folders)
}

/// Parse a document
pub fn from_json_str(json: &str) -> Result<Vec<FolderNode>> {
    parse_json(json).map_err(|e| ValidationError::malformed_document(e.to_string()).into())
}

/// Write folders as a document to `path`
pub async fn write_document(path: &Path, folders: &[FolderNode]) -> Result<()> {
    write_json(path, &folders).await
}

/// Read a document from `path`
pub async fn read_document(path: &Path) -> Result<Vec<FolderNode>> {
    read_json(path).await
}

pub(crate) fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> Result<String> {
    let mut buffer = Vec::new();
    let mut serializer = Serializer::with_formatter(&mut buffer, PrettyFormatter::with_indent(INDENT));
    value.serialize(&mut serializer)?;
    let mut json = String::from_utf8(buffer)
        .map_err(|e| crate::error::InternalError::serialization(e.to_string()))?;
    json.push('\n');
    Ok(json)
}

pub(crate) async fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<()> {
    let json = to_pretty_json(value)?;
    fs::write(path, json)
        .await
        .map_err(|e| Error::Io(IoError::from_std(e).with_path(path)))
}

pub(crate) async fn read_json<T: DeserializeOwned>(path: &Path) -> Result<T> {
    let data = fs::read_to_string(path)
        .await
        .map_err(|e| Error::Io(IoError::from_std(e).with_path(path)))?;
    parse_json(&data).map_err(|e| {
        ValidationError::malformed_document(format!("{}: {e}", path.display())).into()
    })
}

fn parse_json<T: DeserializeOwned>(json: &str) -> serde_json::Result<T> {
    let mut deserializer = serde_json::Deserializer::from_str(json);
    deserializer.disable_recursion_limit();
    let value = T::deserialize(serde_stacker::Deserializer::new(&mut deserializer))?;
    deserializer.end()?;
    Ok(value)
}
