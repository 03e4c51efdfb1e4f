//! Purpose: Internal JSON boundary shared by the converter and the CLI.
//! Exports: `parse` (decode helpers) and `emit` (result encoding layouts).
//! Role: Single seam for serde_json details so callsites avoid ad hoc encode/decode logic.
//! Invariants: Helper APIs stay small and deterministic (no hidden global state).

pub(crate) mod emit;
pub(crate) mod parse;
