use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use git_repo_info::{GitInfo, OpenOptions, DEFAULT_GIT_DIR_NAME};

/// Print branch, sha, origin URL and HEAD commit of a repository as JSON.
#[derive(Parser, Debug)]
#[command(name = "git-repo-info", version, about)]
struct Cli {
    /// Directory to start searching from (default: current directory).
    path: Option<PathBuf>,

    /// Name of the metadata directory to look for.
    #[arg(long, env = "GIT_REPO_INFO_DIR_NAME", default_value = DEFAULT_GIT_DIR_NAME)]
    git_dir_name: String,

    /// Pretty-print the JSON output.
    #[arg(long)]
    pretty: bool,
}

fn main() -> ExitCode {
    env_logger::init();
    let cli = Cli::parse();

    let mut options = OpenOptions::new().git_dir_name(cli.git_dir_name);
    if let Some(path) = cli.path {
        options = options.start_dir(path);
    }
    let meta = GitInfo::open(options).metadata();

    let json = if cli.pretty {
        serde_json::to_string_pretty(&meta)
    } else {
        serde_json::to_string(&meta)
    };
    match json {
        Ok(s) => {
            println!("{}", s);
            ExitCode::SUCCESS
        }
        Err(e) => {
            eprintln!("error: {}", e);
            ExitCode::FAILURE
        }
    }
}
