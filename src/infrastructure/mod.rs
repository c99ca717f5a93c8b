//! Infrastructure layer - storage adapters and the HTTP surface

pub mod http;
pub mod persistence;
