//! Untyped request envelopes and the field validator.
//!
//! Every request arrives as a JSON object. Before it is decoded into a typed
//! [`Request`](crate::Request) the individual fields are checked here, so that
//! a missing or mistyped field produces the same error text regardless of
//! which service ends up handling the message.

use serde_json::{Map, Value};
use std::fmt;
use thiserror::Error;

/// One JSON object as it arrived on the wire.
pub type Envelope = Map<String, Value>;

/// The JSON type a handler expected to find under a key.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldType {
    String,
    Int,
    Array,
}

impl fmt::Display for FieldType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            FieldType::String => "String",
            FieldType::Int => "int",
            FieldType::Array => "Array",
        };
        f.write_str(name)
    }
}

/// A required field was absent or could not be read as the expected type.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ValidationError {
    #[error("Field '{0}' does not exist in request")]
    MissingField(String),
    #[error("Field '{0}' needs to be of type: {1}")]
    WrongType(String, FieldType),
}

/// Errors raised before a request reaches any handler.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ProtocolError {
    #[error("Request is not valid JSON")]
    NotJson,
    #[error("No request type was given")]
    NoType,
    #[error("Type '{0}' is not supported")]
    UnsupportedType(String),
    #[error(transparent)]
    Invalid(#[from] ValidationError),
}

/// Parses raw frame bytes into an envelope.
///
/// Anything that is not UTF-8 text holding a JSON object is rejected with
/// [`ProtocolError::NotJson`].
pub fn parse_envelope(bytes: &[u8]) -> Result<Envelope, ProtocolError> {
    let text = std::str::from_utf8(bytes).map_err(|_| ProtocolError::NotJson)?;
    match serde_json::from_str::<Value>(text) {
        Ok(Value::Object(map)) => Ok(map),
        _ => Err(ProtocolError::NotJson),
    }
}

/// Returns the declared request type exactly as the peer sent it.
pub fn request_type(envelope: &Envelope) -> Result<&str, ProtocolError> {
    match envelope.get("type") {
        None => Err(ProtocolError::NoType),
        Some(Value::String(kind)) => Ok(kind),
        Some(_) => Err(ValidationError::WrongType("type".into(), FieldType::String).into()),
    }
}

pub fn require<'a>(envelope: &'a Envelope, key: &str) -> Result<&'a Value, ValidationError> {
    envelope
        .get(key)
        .ok_or_else(|| ValidationError::MissingField(key.to_string()))
}

pub fn require_str<'a>(envelope: &'a Envelope, key: &str) -> Result<&'a str, ValidationError> {
    require(envelope, key)?
        .as_str()
        .ok_or_else(|| ValidationError::WrongType(key.to_string(), FieldType::String))
}

/// Reads an integer field. Numeric strings such as `"12"` are coerced.
pub fn require_i64(envelope: &Envelope, key: &str) -> Result<i64, ValidationError> {
    let value = require(envelope, key)?;
    as_i64(value).ok_or_else(|| ValidationError::WrongType(key.to_string(), FieldType::Int))
}

pub fn require_array<'a>(envelope: &'a Envelope, key: &str) -> Result<&'a [Value], ValidationError> {
    require(envelope, key)?
        .as_array()
        .map(Vec::as_slice)
        .ok_or_else(|| ValidationError::WrongType(key.to_string(), FieldType::Array))
}

/// Integer coercion shared by [`require_i64`] and array element checks.
pub fn as_i64(value: &Value) -> Option<i64> {
    match value {
        Value::Number(number) => number.as_i64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}
