//! Workspace-level integration tests for the SlabVec crates.
//!
//! This package carries only `tests/`; the library code lives in the
//! member crates under `crates/`.
