//! Purpose: Define the stable public Rust API boundary for parse-ints.
//! Exports: Request/result types, the converter, the radix parser, and output layouts.
//! Role: Public, additive-only surface used by the CLI and integration tests.
//! Invariants: This module is the only public path to core and JSON boundary types.

pub use crate::core::convert::{ConversionRequest, ConversionResult, Converter, decode_requests};
#[doc(hidden)]
pub use crate::core::error::to_exit_code;
pub use crate::core::error::{Error, ErrorKind};
pub use crate::core::radix::{
    DEFAULT_MAX_STR_DIGITS, ParseIntError, ParseIntErrorKind, RadixParser, parse_int,
};
pub use crate::json::emit::{OutputLayout, to_string as results_to_string, write_results};
