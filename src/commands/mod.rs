//! CLI command implementations.
//!
//! Each command resolves omitted arguments from the session store,
//! validates that the session is complete, and delegates to the databricks
//! CLI.

mod complete_tasks;
mod current;
mod deploy;
mod run;
mod set;

pub use complete_tasks::complete_tasks;
pub use current::current;
pub use deploy::deploy;
pub use run::run;
pub use set::set;

use crate::error_fmt::AppError;
use crate::session::SessionStore;

/// The jobname/target/profile a command actually operates on, after merging
/// explicit arguments with the stored session.
#[derive(Debug, PartialEq)]
pub(crate) struct EffectiveSession {
    pub jobname: String,
    pub target: String,
    pub profile: String,
}

/// Merge explicit arguments with the stored session; an argument always wins
/// over the stored value. Any field still unset is an incomplete session.
pub(crate) fn resolve_effective(
    store: &SessionStore,
    jobname: Option<String>,
    target: Option<String>,
    profile: Option<String>,
) -> Result<EffectiveSession, AppError> {
    // Only touch the store when something is actually missing.
    let stored = if jobname.is_some() && target.is_some() && profile.is_some() {
        Default::default()
    } else {
        store.load()?
    };

    let jobname = jobname.or(stored.jobname).ok_or(AppError::IncompleteSession)?;
    let target = target.or(stored.target).ok_or(AppError::IncompleteSession)?;
    let profile = profile.or(stored.profile).ok_or(AppError::IncompleteSession)?;

    Ok(EffectiveSession {
        jobname,
        target,
        profile,
    })
}
