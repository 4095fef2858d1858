//! Helpers shared by integration tests.

#![allow(dead_code)]

pub mod partner;
pub mod socket_guard;
