// Run Request Domain Model

use serde::{Deserialize, Serialize};
use serde_json::Value;

use super::error::{MarshalError, Result};

/// A single "run this executable" request.
///
/// `path` and `workdir` are opaque: no existence or permission checks happen
/// here, validation belongs to the external host. Built fresh for every
/// dispatch and consumed when the outbound message is constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunRequest {
    pub path: String,
    pub arguments: Vec<String>,
    pub workdir: String,
    pub background: bool,
}

impl RunRequest {
    pub fn new(
        path: impl Into<String>,
        arguments: Vec<String>,
        workdir: impl Into<String>,
        background: bool,
    ) -> Self {
        Self {
            path: path.into(),
            arguments,
            workdir: workdir.into(),
            background,
        }
    }

    /// Build a request from loosely typed caller arguments.
    ///
    /// # Errors
    /// - MarshalError::NotAString if any element is not a JSON string
    pub fn from_raw(
        path: impl Into<String>,
        arguments: &[Value],
        workdir: impl Into<String>,
        background: bool,
    ) -> Result<Self> {
        let arguments = marshal_arguments(arguments)?;
        Ok(Self::new(path, arguments, workdir, background))
    }
}

/// Convert caller arguments into a same-length string array.
///
/// Only `Value::String` elements are accepted; numbers, booleans and the rest
/// are rejected rather than stringified.
pub fn marshal_arguments(raw: &[Value]) -> Result<Vec<String>> {
    let mut out = Vec::with_capacity(raw.len());
    for (index, value) in raw.iter().enumerate() {
        match value {
            Value::String(s) => out.push(s.clone()),
            other => {
                return Err(MarshalError::NotAString {
                    index,
                    found: json_kind(other),
                })
            }
        }
    }
    Ok(out)
}

fn json_kind(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}
