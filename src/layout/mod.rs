//! Geometry records, the layout cache and the recursive flex engine.

pub(crate) mod axis;
pub(crate) mod cache;
pub(crate) mod engine;
pub(crate) mod record;
