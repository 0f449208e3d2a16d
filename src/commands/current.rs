//! Current command - refreshes the session against the deployed bundle.
//!
//! Fetches the bundle summary, resolves the job's task order, persists the
//! refreshed session, and reports the order plus the deployed bundle
//! versions found under the artifact path.

use serde::Serialize;

use super::resolve_effective;
use crate::error_fmt::AppError;
use crate::session::{SessionState, SessionStore};
use crate::{bundle, graph};

/// What `bricks current` prints, as JSON.
#[derive(Debug, Serialize)]
pub struct CurrentSummary {
    pub task_keys: Vec<String>,
    pub deployed_bundle_version_numbers: Vec<String>,
}

pub fn current(
    store: &SessionStore,
    jobname: Option<String>,
    target: Option<String>,
    profile: Option<String>,
    show_output: bool,
) -> Result<(), AppError> {
    let session = resolve_effective(store, jobname, target, profile)?;

    let summary = bundle::summary(&session.target)?;
    let nodes = summary.job_tasks(&session.jobname)?;
    let task_keys = graph::resolve(&nodes).map_err(|source| AppError::Graph {
        jobname: session.jobname.clone(),
        source,
    })?;

    // Persist only once the summary resolved cleanly; a failed fetch or an
    // unresolvable graph must not clobber the previously stored order.
    store.merge_update(&SessionState {
        jobname: Some(session.jobname.clone()),
        target: Some(session.target.clone()),
        profile: Some(session.profile.clone()),
        tasks: Some(task_keys.clone()),
    })?;

    let internal_path = format!("{}/.internal", summary.workspace.artifact_path);
    let listing = bundle::workspace_list(&session.profile, &internal_path)?;
    let deployed_bundle_version_numbers = bundle::deployed_versions(&listing);

    if show_output {
        let summary = CurrentSummary {
            task_keys,
            deployed_bundle_version_numbers,
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    }

    Ok(())
}
