//! Service layer: forwards handler calls to the gateway unchanged.

mod crud;
mod relations;
pub use crud::Service;
pub use relations::RelationService;
