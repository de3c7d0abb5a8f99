//! Test helpers for fixture-loaders tests.
//!
//! This module locates the fixture files shipped under `tests/fixtures/data`.

#[path = "helpers/test_data.rs"]
pub mod test_data;
