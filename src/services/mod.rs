//! Storage backends behind the REST surface.

pub mod pg_store;
