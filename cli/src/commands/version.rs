//! Version command

use anyhow::{Context, Result};

use crate::app::AppContext;

/// Run the version command.
///
/// # Errors
///
/// Returns an error if JSON serialization fails.
pub fn run(app: &AppContext) -> Result<()> {
    let version = env!("CARGO_PKG_VERSION");

    if app.is_json() {
        let out = serde_json::json!({ "version": version });
        println!(
            "{}",
            serde_json::to_string_pretty(&out).context("JSON serialization failed")?
        );
    } else {
        app.human().render_version(version);
    }
    Ok(())
}
