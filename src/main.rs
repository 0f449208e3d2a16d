use clap::{Parser, Subcommand};

use bricks::commands;
use bricks::session::SessionStore;

#[derive(Parser)]
#[command(name = "bricks")]
#[command(about = "Session-aware front end for the Databricks bundle CLI")]
struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Remember the job, target and profile for later commands
    Set {
        jobname: String,
        target: String,
        profile: String,
    },
    /// Show the job's resolved task order and deployed bundle versions
    Current {
        /// Job name (falls back to the stored session)
        jobname: Option<String>,
        /// Deployment target (falls back to the stored session)
        target: Option<String>,
        /// Credential profile (falls back to the stored session)
        profile: Option<String>,
    },
    /// Deploy the bundle to the target
    Deploy {
        jobname: Option<String>,
        target: Option<String>,
        profile: Option<String>,
    },
    /// Run the job, optionally restricted to a subset of its tasks
    Run {
        jobname: Option<String>,
        target: Option<String>,
        profile: Option<String>,
        /// Comma-separated tasks to run, in stored order
        #[arg(long)]
        tasks: Option<String>,
    },
    /// Suggest task completions for a partial --tasks value
    #[command(name = "complete-tasks", hide = true)]
    CompleteTasks {
        partial: Option<String>,
    },
}

fn main() {
    let cli = Cli::parse();
    let store = SessionStore::open_default();

    match cli.command {
        Commands::Set {
            jobname,
            target,
            profile,
        } => {
            if let Err(e) = commands::set(&store, jobname, target, profile) {
                eprint!("{}", e);
                std::process::exit(1);
            }
        }
        Commands::Current {
            jobname,
            target,
            profile,
        } => {
            if let Err(e) = commands::current(&store, jobname, target, profile, true) {
                eprint!("{}", e);
                std::process::exit(1);
            }
        }
        Commands::Deploy {
            jobname,
            target,
            profile,
        } => {
            if let Err(e) = commands::deploy(&store, jobname, target, profile) {
                eprint!("{}", e);
                std::process::exit(1);
            }
        }
        Commands::Run {
            jobname,
            target,
            profile,
            tasks,
        } => {
            if let Err(e) = commands::run(&store, jobname, target, profile, tasks) {
                eprint!("{}", e);
                std::process::exit(1);
            }
        }
        Commands::CompleteTasks { partial } => {
            commands::complete_tasks(&store, partial.as_deref().unwrap_or(""));
        }
    }
}
