//! Progress display while providers are working

pub mod reporter;
