//! Thin wrapper around the `databricks` CLI.
//!
//! Every operation is one subprocess invocation. Summary and workspace
//! listings are captured and parsed; deploy and run inherit stdio so the
//! CLI streams its own progress. Only the summary fields this tool needs
//! are modeled; unknown fields are ignored.

use std::collections::HashMap;
use std::process::Command;
use std::sync::LazyLock;

use regex::Regex;
use serde::Deserialize;
use thiserror::Error;

use crate::graph::TaskNode;

#[derive(Debug, Error)]
pub enum BundleError {
    #[error("databricks command failed: {0}")]
    CommandFailed(String),

    #[error("failed to execute databricks: {0}")]
    Io(#[from] std::io::Error),

    #[error("failed to parse bundle summary: {0}")]
    SummaryParse(#[from] serde_json::Error),

    #[error("job '{0}' not found in bundle summary")]
    JobNotFound(String),
}

/// The slice of `databricks bundle summary` output this tool reads.
#[derive(Debug, Deserialize)]
pub struct BundleSummary {
    pub resources: Resources,
    pub workspace: Workspace,
}

#[derive(Debug, Deserialize)]
pub struct Resources {
    #[serde(default)]
    pub jobs: HashMap<String, Job>,
}

#[derive(Debug, Deserialize)]
pub struct Job {
    #[serde(default)]
    pub tasks: Vec<JobTask>,
}

#[derive(Debug, Deserialize)]
pub struct JobTask {
    pub task_key: String,
    #[serde(default)]
    pub depends_on: Vec<TaskRef>,
}

#[derive(Debug, Deserialize)]
pub struct TaskRef {
    pub task_key: String,
}

#[derive(Debug, Deserialize)]
pub struct Workspace {
    pub artifact_path: String,
}

impl BundleSummary {
    /// Extract the named job's tasks as dependency nodes, preserving the
    /// summary's task order.
    pub fn job_tasks(&self, jobname: &str) -> Result<Vec<TaskNode>, BundleError> {
        let job = self
            .resources
            .jobs
            .get(jobname)
            .ok_or_else(|| BundleError::JobNotFound(jobname.to_string()))?;

        Ok(job
            .tasks
            .iter()
            .map(|t| TaskNode {
                key: t.task_key.clone(),
                depends_on: t.depends_on.iter().map(|d| d.task_key.clone()).collect(),
            })
            .collect())
    }
}

/// Fetches the bundle summary for a target as structured data.
pub fn summary(target: &str) -> Result<BundleSummary, BundleError> {
    let output = Command::new("databricks")
        .args(["bundle", "summary", "--output", "json", "--target", target])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(BundleError::CommandFailed(stderr));
    }

    Ok(serde_json::from_slice(&output.stdout)?)
}

/// Deploys the bundle to a target. Output streams to the user's terminal.
pub fn deploy(target: &str) -> Result<(), BundleError> {
    let status = Command::new("databricks")
        .args(["bundle", "deploy", "-t", target])
        .status()?;

    if !status.success() {
        return Err(BundleError::CommandFailed(format!(
            "databricks bundle deploy -t {target} exited with {status}"
        )));
    }

    Ok(())
}

/// Runs a job, optionally restricted to a comma-separated task subset.
/// Output streams to the user's terminal.
pub fn run(jobname: &str, tasks: Option<&str>) -> Result<(), BundleError> {
    let mut command = Command::new("databricks");
    command.args(["bundle", "run", jobname]);
    if let Some(tasks) = tasks {
        command.args(["--only", tasks]);
    }

    let status = command.status()?;

    if !status.success() {
        return Err(BundleError::CommandFailed(format!(
            "databricks bundle run {jobname} exited with {status}"
        )));
    }

    Ok(())
}

/// Lists workspace contents under a path, returning the raw newline-separated
/// listing.
pub fn workspace_list(profile: &str, path: &str) -> Result<String, BundleError> {
    let output = Command::new("databricks")
        .args(["workspace", "list", "--profile", profile, path])
        .output()?;

    if !output.status.success() {
        let stderr = String::from_utf8_lossy(&output.stderr).to_string();
        return Err(BundleError::CommandFailed(stderr));
    }

    Ok(String::from_utf8_lossy(&output.stdout).to_string())
}

static VERSION_RE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"/([^/]*?-\d+\.\d+\.\d+)-").expect("version pattern is valid")
});

/// Pulls `<name>-<major>.<minor>.<patch>` identifiers out of a workspace
/// listing. Best-effort: lines that do not match the pattern are dropped.
pub fn deployed_versions(listing: &str) -> Vec<String> {
    listing
        .lines()
        .filter_map(|line| VERSION_RE.captures(line))
        .map(|caps| caps[1].to_string())
        .collect()
}
