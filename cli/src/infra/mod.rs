//! Infrastructure layer — concrete implementations of application port traits.
//!
//! This module contains all I/O-performing code: AWS API calls, filesystem
//! access, configuration loading and timers.
//!
//! Imports from `crate::domain` and `crate::application::ports` are allowed.
//! Imports from `crate::commands` or `crate::output` are forbidden.

pub mod aws;
pub mod clock;
pub mod config;
pub mod ecs;
pub mod fs;
