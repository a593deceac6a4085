//! HTTP handlers for entity CRUD and nested user reads.

pub mod entity;
pub mod user;
