//! Helpers shared by unit tests that need a local mock server.
//!
//! The socket guard source lives with the integration-test support code so
//! both test targets build the same file.

#[path = "../../tests/support/socket_guard.rs"]
pub mod socket_guard;
