//! Tracegate - documentation-driven delivery compliance CLI
//!
//! ## Commands
//!
//! - `check-pr`: evaluate a pull request against the compliance rules,
//!   either from a local JSON input file or live against GitHub
//! - `check-commit`: classify a single commit message (commit-msg hook
//!   surface)

use std::io::Read;
use std::path::PathBuf;
use std::process::ExitCode;

use anyhow::{bail, Context, Result};
use clap::{Parser, Subcommand};
use tracing::Level;

use tracegate_core::{
    check_commit_message, evaluate, init_tracing, CommitMessage, EvaluationInput, Verdict,
};
use tracegate_github::{evaluate_pull_request, GithubHost};

#[derive(Parser)]
#[command(name = "tracegate")]
#[command(version = env!("CARGO_PKG_VERSION"))]
#[command(about = "Documentation-driven delivery compliance checks", long_about = None)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Emit JSON-formatted log lines
    #[arg(long, global = true)]
    json_logs: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Evaluate a pull request's compliance verdict
    CheckPr {
        /// Local evaluation input (JSON file with the full input contract)
        #[arg(long, conflicts_with_all = ["repo", "pr"])]
        input: Option<PathBuf>,

        /// Repository as owner/name (live evaluation)
        #[arg(long, requires = "pr")]
        repo: Option<String>,

        /// Pull request number (live evaluation)
        #[arg(long, requires = "repo")]
        pr: Option<u64>,

        /// GitHub token for the live path
        #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
        token: Option<String>,

        /// Print the verdict as JSON instead of annotation lines
        #[arg(long)]
        json: bool,
    },

    /// Classify a single commit message (usable as a commit-msg hook)
    CheckCommit {
        /// File containing the commit message; stdin when omitted
        message_file: Option<PathBuf>,
    },
}

#[tokio::main]
async fn main() -> Result<ExitCode> {
    let cli = Cli::parse();

    let level = if cli.verbose { Level::DEBUG } else { Level::WARN };
    init_tracing(cli.json_logs, level);

    match cli.command {
        Commands::CheckPr {
            input,
            repo,
            pr,
            token,
            json,
        } => {
            let verdict = match (input, repo, pr) {
                (Some(path), _, _) => evaluate_from_file(&path)?,
                (None, Some(repo), Some(pr)) => {
                    let (owner, name) = repo
                        .split_once('/')
                        .context("--repo must be owner/name")?;
                    let host = GithubHost::new(owner, name, token)?;
                    evaluate_pull_request(&host, pr).await?
                }
                _ => bail!("provide either --input FILE or --repo owner/name --pr N"),
            };

            if json {
                println!("{}", serde_json::to_string_pretty(&verdict)?);
            } else {
                render_annotations(&verdict);
            }

            Ok(if verdict.blocking() {
                ExitCode::FAILURE
            } else {
                ExitCode::SUCCESS
            })
        }

        Commands::CheckCommit { message_file } => {
            let raw = match message_file {
                Some(path) => std::fs::read_to_string(&path)
                    .with_context(|| format!("reading commit message {}", path.display()))?,
                None => {
                    let mut buf = String::new();
                    std::io::stdin()
                        .read_to_string(&mut buf)
                        .context("reading commit message from stdin")?;
                    buf
                }
            };

            let check = check_commit_message(&CommitMessage::parse(&raw));
            println!("{}", check.message);
            Ok(if check.valid {
                ExitCode::SUCCESS
            } else {
                ExitCode::FAILURE
            })
        }
    }
}

/// Evaluate from a serialized input-contract file (offline path).
fn evaluate_from_file(path: &std::path::Path) -> Result<Verdict> {
    let text = std::fs::read_to_string(path)
        .with_context(|| format!("reading input file {}", path.display()))?;
    let input: EvaluationInput =
        serde_json::from_str(&text).context("parsing evaluation input")?;
    Ok(evaluate(&input))
}

fn render_annotations(verdict: &Verdict) {
    for finding in &verdict.findings {
        println!("{}: {}", finding.severity, finding.message);
    }
}
