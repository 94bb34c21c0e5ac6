//! Query parameter values and their text rendering.
//!
//! Parameters are encoded as JSON for display. Encoding can fail when a
//! `Param::Shared` cell refers back to itself; in that case the raw value is
//! rendered instead through the cycle-safe `Debug` implementation, so a log
//! call never fails because of what the parameters contain.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::fmt;
use std::rc::Rc;

use serde::ser::{Error as _, Serializer};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

/// A single bound parameter, or a payload of a leveled message.
#[derive(Clone, Default)]
pub enum Param {
    #[default]
    Null,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    Bytes(Vec<u8>),
    List(Vec<Param>),
    Map(BTreeMap<String, Param>),
    /// A value that may be referenced from several places, including from
    /// inside itself.
    Shared(Rc<RefCell<Param>>),
}

impl Param {
    /// Wrap a value so it can be aliased.
    pub fn shared(value: Param) -> Self {
        Param::Shared(Rc::new(RefCell::new(value)))
    }
}

impl Serialize for Param {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        match self {
            Param::Null => serializer.serialize_unit(),
            Param::Bool(b) => serializer.serialize_bool(*b),
            Param::Int(i) => serializer.serialize_i64(*i),
            Param::Float(f) => serializer.serialize_f64(*f),
            Param::Text(s) => serializer.serialize_str(s),
            Param::Bytes(bytes) => serializer.collect_seq(bytes),
            Param::List(items) => serializer.collect_seq(items),
            Param::Map(entries) => serializer.collect_map(entries),
            // The cell stays mutably borrowed while its contents are written,
            // so reaching it again means the value contains itself.
            Param::Shared(cell) => match cell.try_borrow_mut() {
                Ok(inner) => inner.serialize(serializer),
                Err(_) => Err(S::Error::custom("circular reference in parameter")),
            },
        }
    }
}

impl fmt::Debug for Param {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Param::Null => f.write_str("null"),
            Param::Bool(b) => write!(f, "{}", b),
            Param::Int(i) => write!(f, "{}", i),
            Param::Float(x) => write!(f, "{}", x),
            Param::Text(s) => write!(f, "{:?}", s),
            Param::Bytes(bytes) => write!(f, "<Buffer {} bytes>", bytes.len()),
            Param::List(items) => f.debug_list().entries(items).finish(),
            Param::Map(entries) => f.debug_map().entries(entries).finish(),
            Param::Shared(cell) => match cell.try_borrow_mut() {
                Ok(inner) => fmt::Debug::fmt(&*inner, f),
                Err(_) => f.write_str("[Circular]"),
            },
        }
    }
}

impl From<serde_json::Value> for Param {
    fn from(value: serde_json::Value) -> Self {
        use serde_json::Value;

        match value {
            Value::Null => Param::Null,
            Value::Bool(b) => Param::Bool(b),
            Value::Number(n) => match n.as_i64() {
                Some(i) => Param::Int(i),
                None => Param::Float(n.as_f64().unwrap_or(f64::NAN)),
            },
            Value::String(s) => Param::Text(s),
            Value::Array(items) => Param::List(items.into_iter().map(Param::from).collect()),
            Value::Object(entries) => {
                Param::Map(entries.into_iter().map(|(k, v)| (k, Param::from(v))).collect())
            }
        }
    }
}

impl<'de> Deserialize<'de> for Param {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        serde_json::Value::deserialize(deserializer).map(Param::from)
    }
}

impl From<bool> for Param {
    fn from(b: bool) -> Self {
        Param::Bool(b)
    }
}

impl From<i32> for Param {
    fn from(i: i32) -> Self {
        Param::Int(i.into())
    }
}

impl From<i64> for Param {
    fn from(i: i64) -> Self {
        Param::Int(i)
    }
}

impl From<u32> for Param {
    fn from(i: u32) -> Self {
        Param::Int(i.into())
    }
}

impl From<f64> for Param {
    fn from(x: f64) -> Self {
        Param::Float(x)
    }
}

impl From<&str> for Param {
    fn from(s: &str) -> Self {
        Param::Text(s.to_string())
    }
}

impl From<String> for Param {
    fn from(s: String) -> Self {
        Param::Text(s)
    }
}

impl From<Vec<u8>> for Param {
    fn from(bytes: Vec<u8>) -> Self {
        Param::Bytes(bytes)
    }
}

impl From<Vec<Param>> for Param {
    fn from(items: Vec<Param>) -> Self {
        Param::List(items)
    }
}

impl<T: Into<Param>> From<Option<T>> for Param {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or(Param::Null)
    }
}

/// Parameters could not be turned into text.
#[derive(Debug, Error)]
#[error("parameter serialization failed: {0}")]
pub struct SerializationError(#[from] serde_json::Error);

/// Turns a parameter sequence into display text.
pub trait ParamEncoder: Send + Sync {
    fn encode(&self, params: &[Param]) -> Result<String, SerializationError>;
}

/// Compact JSON encoding.
#[derive(Debug, Clone, Copy, Default)]
pub struct JsonEncoder;

impl ParamEncoder for JsonEncoder {
    fn encode(&self, params: &[Param]) -> Result<String, SerializationError> {
        Ok(serde_json::to_string(params)?)
    }
}

/// Parameter text ready for display, remembering which path produced it.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RenderedParams {
    /// Output of the encoder.
    Encoded(String),
    /// Raw rendering used after the encoder failed.
    Raw(String),
}

impl RenderedParams {
    pub fn as_str(&self) -> &str {
        match self {
            RenderedParams::Encoded(s) | RenderedParams::Raw(s) => s,
        }
    }

    pub fn is_fallback(&self) -> bool {
        matches!(self, RenderedParams::Raw(_))
    }
}

impl fmt::Display for RenderedParams {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Encode `params`, substituting the raw rendering if encoding fails.
pub fn render_params(encoder: &dyn ParamEncoder, params: &[Param]) -> RenderedParams {
    match encoder.encode(params) {
        Ok(text) => RenderedParams::Encoded(text),
        Err(e) => {
            tracing::debug!(error = %e, "Falling back to raw parameter rendering");
            RenderedParams::Raw(format!("{:?}", params))
        }
    }
}

/// Text of a leveled message payload: strings verbatim, anything else as
/// JSON, or the raw rendering if it cannot be encoded.
pub fn render_payload(payload: &Param) -> String {
    match payload {
        Param::Text(s) => s.clone(),
        other => serde_json::to_string(other).unwrap_or_else(|e| {
            tracing::debug!(error = %e, "Falling back to raw payload rendering");
            format!("{:?}", other)
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cyclic_list() -> Param {
        let cell = Rc::new(RefCell::new(Param::Null));
        *cell.borrow_mut() = Param::List(vec![Param::Int(1), Param::Shared(cell.clone())]);
        Param::Shared(cell)
    }

    #[test]
    fn test_json_encoding() {
        let params = vec![Param::from(1), Param::from("a")];
        let text = JsonEncoder.encode(&params).unwrap();
        assert_eq!(text, r#"[1,"a"]"#);

        let decoded: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, serde_json::json!([1, "a"]));
    }

    #[test]
    fn test_cycle_fails_encoding() {
        let params = vec![cyclic_list()];
        assert!(JsonEncoder.encode(&params).is_err());
    }

    #[test]
    fn test_cycle_falls_back_to_raw() {
        let params = vec![Param::from("x"), cyclic_list()];
        let rendered = render_params(&JsonEncoder, &params);
        assert!(rendered.is_fallback());
        assert_eq!(rendered.as_str(), r#"["x", [1, [Circular]]]"#);
    }

    #[test]
    fn test_shared_without_cycle_encodes() {
        let shared = Param::shared(Param::from("dup"));
        let params = vec![shared.clone(), shared];
        let rendered = render_params(&JsonEncoder, &params);
        assert_eq!(rendered, RenderedParams::Encoded(r#"["dup","dup"]"#.to_string()));
    }

    #[test]
    fn test_from_json_value() {
        let param = Param::from(serde_json::json!({"id": 3, "tags": ["a", null], "ratio": 0.5}));
        assert_eq!(
            serde_json::to_string(&param).unwrap(),
            r#"{"id":3,"ratio":0.5,"tags":["a",null]}"#
        );
    }

    #[test]
    fn test_payload_rendering() {
        assert_eq!(render_payload(&Param::from("plain text")), "plain text");
        assert_eq!(render_payload(&Param::from(vec![Param::from(true), Param::Null])), "[true,null]");
        assert_eq!(render_payload(&cyclic_list()), "[1, [Circular]]");
    }

    #[test]
    fn test_payload_is_json_for_bytes_and_control_chars() {
        let payload = Param::from(vec![Param::from("tab\u{1}x"), Param::from(vec![1u8, 2, 3])]);
        let text = render_payload(&payload);
        assert_eq!(text, r#"["tab\u0001x",[1,2,3]]"#);

        let decoded: serde_json::Value = serde_json::from_str(&text).unwrap();
        assert_eq!(decoded, serde_json::json!(["tab\u{1}x", [1, 2, 3]]));
    }
}
