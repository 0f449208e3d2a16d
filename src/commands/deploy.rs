//! Deploy command - deploys the bundle to the effective target.

use owo_colors::OwoColorize;

use super::resolve_effective;
use crate::bundle;
use crate::error_fmt::AppError;
use crate::session::SessionStore;

pub fn deploy(
    store: &SessionStore,
    jobname: Option<String>,
    target: Option<String>,
    profile: Option<String>,
) -> Result<(), AppError> {
    let session = resolve_effective(store, jobname, target, profile)?;

    bundle::deploy(&session.target)?;

    println!(
        "{} target {}",
        "deployed:".bright_green(),
        session.target.cyan()
    );

    Ok(())
}
