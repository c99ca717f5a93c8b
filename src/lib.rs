//! Verification lifecycle service.
//!
//! A `Verification` is created as a draft and then approved or declined
//! exactly once. Changes go through the command bus, reads through the query
//! bus, and storage sits behind `VerificationRepository`.

pub mod application;
pub mod config;
pub mod context;
pub mod domain;
pub mod infrastructure;
pub mod logging;
pub mod metrics;
