//! Purpose: Turn decoded conversion requests into ordered decimal results.
//! Exports: `ConversionRequest`, `ConversionResult`, `Converter`, `decode_requests`.
//! Role: Core batch operation behind the CLI; owns request decoding and base coercion.
//! Invariants: Output length and order always match the input requests.
//! Invariants: Per-item parse failures become `ConversionResult::ValueError`, never an `Error`.
//! Invariants: Structural problems (bad JSON, missing fields, uncoercible base) fail the whole batch.

use std::fmt;

use num_bigint::BigInt;
use num_traits::{Signed, ToPrimitive};
use serde::de::{self, Deserializer};
use serde::{Deserialize, Serialize, Serializer};
use serde_json::Value;

use crate::core::error::{Error, ErrorKind};
use crate::core::radix::RadixParser;
use crate::json::parse;

#[derive(Clone, Debug, Deserialize, Eq, PartialEq)]
pub struct ConversionRequest {
    pub input: String,
    #[serde(deserialize_with = "deserialize_base")]
    pub base: i64,
}

impl ConversionRequest {
    pub fn new(input: impl Into<String>, base: i64) -> Self {
        Self {
            input: input.into(),
            base,
        }
    }
}

#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ConversionResult {
    Value(BigInt),
    ValueError,
}

impl ConversionResult {
    pub const VALUE_ERROR: &'static str = "ValueError";

    pub fn is_value_error(&self) -> bool {
        matches!(self, ConversionResult::ValueError)
    }
}

impl fmt::Display for ConversionResult {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ConversionResult::Value(value) => write!(f, "{value}"),
            ConversionResult::ValueError => f.write_str(Self::VALUE_ERROR),
        }
    }
}

impl Serialize for ConversionResult {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.collect_str(self)
    }
}

#[derive(Clone, Copy, Debug, Default)]
pub struct Converter {
    parser: RadixParser,
}

impl Converter {
    pub fn new(parser: RadixParser) -> Self {
        Self { parser }
    }

    pub fn convert(&self, request: &ConversionRequest) -> ConversionResult {
        match self.parser.parse(&request.input, request.base) {
            Ok(value) => ConversionResult::Value(value),
            Err(err) => {
                tracing::debug!(base = request.base, reason = %err, "conversion failed");
                ConversionResult::ValueError
            }
        }
    }

    pub fn convert_all(&self, requests: &[ConversionRequest]) -> Vec<ConversionResult> {
        requests.iter().map(|request| self.convert(request)).collect()
    }
}

/// Decodes the top-level argument: a JSON array of request objects.
pub fn decode_requests(input: &str) -> Result<Vec<ConversionRequest>, Error> {
    let items: Vec<Value> = parse::from_str(input).map_err(|err| {
        Error::new(ErrorKind::InvalidInput)
            .with_message("requests must be a JSON array of objects")
            .with_hint(parse::hint_for_error(&err, "requests"))
            .with_source(err)
    })?;

    items
        .into_iter()
        .enumerate()
        .map(|(index, item)| {
            ConversionRequest::deserialize(item).map_err(|err| {
                Error::new(ErrorKind::InvalidInput)
                    .with_message(format!("invalid request: {err}"))
                    .with_hint("Each request needs a string `input` and an integer `base`.")
                    .with_index(index)
            })
        })
        .collect()
}

fn deserialize_base<'de, D>(deserializer: D) -> Result<i64, D::Error>
where
    D: Deserializer<'de>,
{
    let value = Value::deserialize(deserializer)?;
    coerce_base(&value).map_err(de::Error::custom)
}

fn coerce_base(value: &Value) -> Result<i64, String> {
    match value {
        Value::Number(number) => {
            if let Some(base) = number.as_i64() {
                Ok(base)
            } else if number.is_u64() {
                Ok(i64::MAX)
            } else {
                // Saturating cast; serde_json never yields a non-finite number.
                let float = number.as_f64().unwrap_or_default();
                Ok(float.trunc() as i64)
            }
        }
        Value::Bool(flag) => Ok(i64::from(*flag)),
        Value::String(text) => RadixParser::new()
            .parse(text, 10)
            .map(|base| saturate(&base))
            .map_err(|err| format!("base {text:?} is not a decimal integer: {err}")),
        Value::Null => Err("base must be an integer, got null".to_string()),
        Value::Array(_) => Err("base must be an integer, got an array".to_string()),
        Value::Object(_) => Err("base must be an integer, got an object".to_string()),
    }
}

fn saturate(value: &BigInt) -> i64 {
    value.to_i64().unwrap_or(if value.is_negative() {
        i64::MIN
    } else {
        i64::MAX
    })
}
