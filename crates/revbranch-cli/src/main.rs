//! Recovers per-revision branch labels for a git repository from its branch
//! tips, and can export the result as a changelog-only mercurial bundle.

mod bundle;
mod error;
mod infer;

use std::path::PathBuf;
use std::process::ExitCode;

use clap::{Parser, Subcommand};

use infer::DEFAULT_NOTES_REF;

#[derive(Parser, Debug)]
#[command(name = "revbranch", author, version, about, long_about = None)]
struct Cli {
    /// Path to the git repository
    #[arg(long, global = true, default_value = ".")]
    repo: PathBuf,

    /// Notes ref under which revision branch labels are stored
    #[arg(long, global = true, default_value = DEFAULT_NOTES_REF)]
    notes_ref: String,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// Infer missing branch labels from known tips and write them back as notes
    Infer {
        /// Branch names treated as the default master branch when a root is unlabeled
        #[arg(long = "master-branch")]
        common_master: Vec<String>,
    },
    /// Export a changelog-only mercurial bundle using the recorded branch labels
    Bundle {
        /// Path to write the bundle to
        #[arg(short, long)]
        output: PathBuf,
    },
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let result = match &cli.command {
        Command::Infer { common_master } => infer::run_infer(&cli.repo, &cli.notes_ref, common_master),
        Command::Bundle { output } => bundle::run_bundle(&cli.repo, output, &cli.notes_ref),
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            log::error!("{e}");
            ExitCode::FAILURE
        }
    }
}
