//! Command implementations

pub mod deploy;
pub mod validate;
pub mod version;
