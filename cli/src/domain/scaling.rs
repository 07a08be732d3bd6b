//! Downscale decision for the service rolling update.

/// What to do with the current service before swapping the task definition.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScalePlan {
    /// Fewer tasks are running than requested: leave the service alone.
    Skip,
    /// Free one slot so the new revision can be placed.
    Downscale { from: i32, to: i32 },
}

impl ScalePlan {
    /// Decide from the running count and the requested amount.
    ///
    /// `requested` is at least 1 (enforced by `DeploymentPlan`), so a
    /// downscale target is never negative.
    #[must_use]
    pub fn decide(running: i32, requested: i32) -> Self {
        if running < requested {
            Self::Skip
        } else {
            Self::Downscale {
                from: running,
                to: (running - 1).max(0),
            }
        }
    }
}
