//! Purpose: Library crate backing the `parse-ints` CLI and its tests.
//! Exports: `api` (requests, results, radix parsing, errors, output layouts).
//! Role: Keeps conversion logic testable without spawning the binary.
//! Invariants: Core modules prefer explicit inputs/outputs over hidden state.
pub mod api;
mod core;
mod json;
