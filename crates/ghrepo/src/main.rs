//! ghrepo - delete GitHub repositories, or create a private one and push the
//! current checkout to it.

use clap::{CommandFactory, Parser};
use tracing_subscriber::EnvFilter;

use ghrepo_cmd::Request;
use ghrepo_cmd::factory::Factory;
use ghrepo_core::cmdutil::is_silent;
use ghrepo_core::config::Settings;

mod exit_codes {
    pub const OK: i32 = 0;
    pub const ERROR: i32 = 1;
}

/// Manage GitHub repositories: delete them or create and push new ones.
#[derive(Debug, Parser)]
#[command(name = "ghrepo", version)]
struct Cli {
    /// Names of repositories to delete.
    #[arg(short = 'r', long = "repos", value_name = "NAME", num_args = 1..)]
    repos: Vec<String>,

    /// The GitHub username or organization that owns the repositories. If
    /// not provided, it is read from git config user.name.
    #[arg(short = 'o', long = "owner", value_name = "OWNER")]
    owner: Option<String>,

    /// Create a new private repository with this name and push the current
    /// directory to it. Takes precedence over --repos.
    #[arg(short = 'c', long = "create-and-push", value_name = "NAME")]
    create_and_push: Option<String>,
}

#[tokio::main]
async fn main() {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_env("GHREPO_DEBUG").unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .with_target(false)
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    let Some(request) = Request::select(cli.repos, cli.owner, cli.create_and_push) else {
        Cli::command().print_help().ok();
        println!();
        std::process::exit(exit_codes::ERROR);
    };

    let settings = match Settings::from_env() {
        Ok(settings) => settings,
        Err(e) => {
            eprintln!("{e:#}");
            std::process::exit(exit_codes::ERROR);
        }
    };

    let factory = Factory::new(env!("CARGO_PKG_VERSION").to_string(), settings);

    let exit_code = match request.run(&factory).await {
        Ok(()) => exit_codes::OK,
        Err(e) => {
            tracing::debug!(error = ?e, "command failed");
            if !is_silent(&e) {
                eprintln!("{e:#}");
            }
            exit_codes::ERROR
        }
    };

    std::process::exit(exit_code);
}
