//! Shared constants for integration tests.
//!
//! Integration tests are compiled as separate crates (one per top-level file in
//! `tests/`). Placing shared constants under `tests/common/` avoids creating an
//! additional integration test binary while still allowing reuse via:
//!
//! ```rust
//! #[path = "common/test_constants.rs"]
//! mod test_constants;
//! ```

/// Bearer token used against mocked endpoints.
pub const TEST_API_KEY: &str = "test-token";

/// Region code used by the integration tests.
pub const TEST_REGION: &str = "LON1";
