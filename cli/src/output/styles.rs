//! Terminal stylesheet (owo-colors)

use owo_colors::Style;

/// Colors for deployment progress and the final report.
///
/// `Styles::default()` is colorless; `colorize` switches colors on.
#[derive(Default, Clone)]
pub struct Styles {
    /// Completed steps
    pub success: Style,
    /// Recoverable problems
    pub warning: Style,
    /// Step arrows
    pub step: Style,
    /// Step titles
    pub step_title: Style,
    /// Report keys, polling dots
    pub dim: Style,
    /// Deployment headers
    pub header: Style,
}

impl Styles {
    /// Enable ANSI colors.
    pub fn colorize(&mut self) {
        self.success = Style::new().green();
        self.warning = Style::new().yellow();
        self.step = Style::new().cyan();
        self.step_title = Style::new().bold();
        self.dim = Style::new().dimmed();
        self.header = Style::new().bold().cyan();
    }
}
