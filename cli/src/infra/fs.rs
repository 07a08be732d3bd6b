//! Filesystem infrastructure — implements `TaskFileSource`.

use std::path::Path;

use anyhow::{Context, Result};

use crate::application::ports::TaskFileSource;

/// Production filesystem implementation of `TaskFileSource`.
pub struct LocalFs;

impl TaskFileSource for LocalFs {
    fn exists(&self, path: &Path) -> bool {
        path.is_file()
    }

    fn read_to_string(&self, path: &Path) -> Result<String> {
        std::fs::read_to_string(path).with_context(|| format!("cannot read {}", path.display()))
    }
}
