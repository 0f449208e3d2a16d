//! Run command - runs the effective job, optionally restricted to a subset
//! of its tasks.

use owo_colors::OwoColorize;

use super::resolve_effective;
use crate::bundle;
use crate::error_fmt::AppError;
use crate::session::SessionStore;

/// `tasks` is a comma-separated subset of the job's tasks, as produced by
/// the completion hook. It is passed through to the databricks CLI, which
/// does the final validation.
pub fn run(
    store: &SessionStore,
    jobname: Option<String>,
    target: Option<String>,
    profile: Option<String>,
    tasks: Option<String>,
) -> Result<(), AppError> {
    let session = resolve_effective(store, jobname, target, profile)?;

    bundle::run(&session.jobname, tasks.as_deref())?;

    match tasks {
        Some(tasks) => println!(
            "{} job {} tasks {}",
            "ran:".bright_green(),
            session.jobname.cyan(),
            tasks.cyan()
        ),
        None => println!("{} job {}", "ran:".bright_green(), session.jobname.cyan()),
    }

    Ok(())
}
