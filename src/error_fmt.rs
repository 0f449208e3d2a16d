use std::fmt;

use owo_colors::OwoColorize;

use crate::bundle::BundleError;
use crate::graph::GraphError;
use crate::session::SessionError;

/// Application error with context for actionable error messages.
#[derive(Debug)]
pub enum AppError {
    /// jobname/target/profile still unset after merging args with the session
    IncompleteSession,
    /// Session file could not be read or written
    Session(SessionError),
    /// The databricks CLI failed or its output was unusable
    Bundle(BundleError),
    /// The job's dependency graph has no valid execution order
    Graph { jobname: String, source: GraphError },
    /// Command output could not be rendered as JSON
    Json(serde_json::Error),
}

impl fmt::Display for AppError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            AppError::IncompleteSession => write!(f, "{}", format_incomplete_session()),
            AppError::Session(source) => write!(f, "{}", format_session_error(source)),
            AppError::Bundle(source) => write!(f, "{}", format_bundle_error(source)),
            AppError::Graph { jobname, source } => {
                write!(f, "{}", format_graph_error(jobname, source))
            }
            AppError::Json(source) => {
                writeln!(
                    f,
                    "{}: failed to render output: {}",
                    "error".red().bold(),
                    source
                )
            }
        }
    }
}

impl std::error::Error for AppError {}

impl From<SessionError> for AppError {
    fn from(e: SessionError) -> Self {
        AppError::Session(e)
    }
}

impl From<BundleError> for AppError {
    fn from(e: BundleError) -> Self {
        AppError::Bundle(e)
    }
}

impl From<serde_json::Error> for AppError {
    fn from(e: serde_json::Error) -> Self {
        AppError::Json(e)
    }
}

// ============================================================================
// Formatting functions (internal implementation)
// ============================================================================

fn format_incomplete_session() -> String {
    let mut out = String::new();

    out.push_str(&format!(
        "{}: jobname, target and profile are not all set\n",
        "error".red().bold()
    ));
    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        "Commands fall back to the remembered session for omitted arguments,".dimmed()
    ));
    out.push_str(&format!(
        "  {}\n",
        "but no session has been stored yet.".dimmed()
    ));
    out.push('\n');
    out.push_str(&format!("  {}:\n", "To fix this".bold()));
    out.push_str(&format!(
        "    Run {} once, or pass all three arguments explicitly\n",
        "bricks set <jobname> <target> <profile>".cyan()
    ));

    out
}

fn format_session_error(error: &SessionError) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}: ", "error".red().bold()));

    match error {
        SessionError::Io(io_err) => {
            out.push_str("could not access the session file\n");
            out.push('\n');
            out.push_str(&format!("  {}\n", io_err.to_string().dimmed()));
        }
        SessionError::Unreadable(parse_err) => {
            out.push_str("the session file exists but is not readable\n");
            out.push('\n');
            out.push_str(&format!("  {}\n", parse_err.to_string().dimmed()));
            out.push('\n');
            out.push_str(&format!("  {}:\n", "To fix this".bold()));
            out.push_str(&format!(
                "    Delete {} and run {} again\n",
                "~/.config/bricks/session.yml".cyan(),
                "bricks set".cyan()
            ));
        }
    }

    out
}

fn format_bundle_error(error: &BundleError) -> String {
    let mut out = String::new();

    out.push_str(&format!("{}: ", "error".red().bold()));

    match error {
        BundleError::CommandFailed(diagnostic) => {
            out.push_str("databricks command failed\n");
            if !diagnostic.trim().is_empty() {
                out.push('\n');
                for line in diagnostic.trim_end().lines() {
                    out.push_str(&format!("  {}\n", line.dimmed()));
                }
            }
        }
        BundleError::Io(io_err) => {
            out.push_str("failed to execute databricks\n");
            out.push('\n');
            out.push_str(&format!("  {}\n", io_err.to_string().dimmed()));
            out.push('\n');
            out.push_str(&format!("  {}:\n", "To fix this".bold()));
            out.push_str(&format!(
                "    Make sure the {} CLI is installed and on your PATH\n",
                "databricks".cyan()
            ));
        }
        BundleError::SummaryParse(json_err) => {
            out.push_str("could not parse the bundle summary\n");
            out.push('\n');
            out.push_str(&format!("  {}\n", json_err.to_string().dimmed()));
        }
        BundleError::JobNotFound(jobname) => {
            out.push_str(&format!(
                "job '{}' not found in the bundle summary\n",
                jobname.yellow()
            ));
            out.push('\n');
            out.push_str(&format!("  {}:\n", "To fix this".bold()));
            out.push_str("    Check the job name against the bundle's resources\n");
        }
    }

    out
}

fn format_graph_error(jobname: &str, error: &GraphError) -> String {
    let GraphError::UnresolvableDependency { remaining } = error;

    let mut out = String::new();
    out.push_str(&format!(
        "{}: job '{}' has no valid task order\n",
        "error".red().bold(),
        jobname.yellow()
    ));
    out.push('\n');
    out.push_str(&format!(
        "  {}\n",
        format!(
            "Tasks {} depend on each other in a cycle or reference unknown tasks.",
            remaining.join(", ")
        )
        .dimmed()
    ));
    out.push('\n');
    out.push_str(&format!("  {}:\n", "To fix this".bold()));
    out.push_str("    Break the dependency cycle in the job definition and redeploy\n");

    out
}
