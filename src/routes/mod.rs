//! Route tables.

mod common;
mod entity;

pub use common::common_routes;
pub use entity::{api_routes, entity_routes};
