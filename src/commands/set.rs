//! Set command - stores the session that later commands fall back to.

use owo_colors::OwoColorize;

use super::current;
use crate::error_fmt::AppError;
use crate::session::SessionStore;

/// Runs the same pipeline as `current` (so the task order is resolved and
/// stored immediately) but prints a confirmation instead of the summary.
pub fn set(
    store: &SessionStore,
    jobname: String,
    target: String,
    profile: String,
) -> Result<(), AppError> {
    current(
        store,
        Some(jobname.clone()),
        Some(target.clone()),
        Some(profile.clone()),
        false,
    )?;

    println!(
        "session set: job {} target {} profile {}",
        jobname.bright_green(),
        target.cyan(),
        profile.cyan()
    );

    Ok(())
}
