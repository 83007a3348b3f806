use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

use git_bump::cli::{self, TagRequest};
use git_bump::config;
use git_bump::domain::BumpType;
use git_bump::git::Git2Repository;
use git_bump::ui;

#[derive(Parser)]
#[command(
    name = "git-bump",
    version,
    about = "Resolve the next semantic version from commit markers and publish it as a git tag"
)]
struct Args {
    #[arg(
        short = 'C',
        long = "repo",
        default_value = ".",
        global = true,
        help = "Path inside the git repository"
    )]
    repo: PathBuf,

    #[arg(short, long, global = true, help = "Custom configuration file path")]
    config: Option<String>,

    #[arg(short, long, global = true, help = "Enable debug logging")]
    verbose: bool,

    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand)]
enum Command {
    /// Print the next version, or "skip" when no bump applies
    Next {
        #[command(flatten)]
        resolve: ResolveArgs,
    },

    /// Create the next version tag and push it to the remote
    Tag {
        #[command(flatten)]
        resolve: ResolveArgs,

        #[arg(long, help = "Tag this exact version instead of resolving one")]
        version: Option<String>,

        #[arg(short, long, help = "Tag annotation [default: \"Release <tag>\"]")]
        message: Option<String>,

        #[arg(long, help = "Preview what would happen without making changes")]
        dry_run: bool,
    },
}

#[derive(clap::Args)]
struct ResolveArgs {
    #[arg(
        long,
        value_name = "BUMP",
        help = "Force a bump type: skip, patch, minor or major"
    )]
    force_bump: Option<String>,

    #[arg(long, help = "Remote to fetch tags from and push to [default: origin]")]
    remote: Option<String>,

    #[arg(long, help = "Use local tags without fetching from the remote")]
    no_fetch: bool,
}

impl ResolveArgs {
    fn into_request(self) -> Result<TagRequest> {
        let force_bump = self
            .force_bump
            .as_deref()
            .filter(|value| !value.trim().is_empty())
            .map(str::parse::<BumpType>)
            .transpose()?;

        Ok(TagRequest {
            remote: self.remote,
            force_bump,
            fetch: if self.no_fetch { Some(false) } else { None },
            ..TagRequest::default()
        })
    }
}

fn main() {
    let args = Args::parse();
    init_tracing(args.verbose);

    if let Err(e) = run(args) {
        ui::display_error(&format!("{:#}", e));
        std::process::exit(1);
    }
}

fn init_tracing(verbose: bool) {
    let default_filter = if verbose { "git_bump=debug" } else { "warn" };

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| default_filter.into()),
        )
        .with_writer(std::io::stderr)
        .with_target(false)
        .init();
}

fn run(args: Args) -> Result<()> {
    let config = config::load_config(args.config.as_deref()).context("Error loading config")?;

    let repo = Git2Repository::open(&args.repo)
        .with_context(|| format!("Not in a git repository: {}", args.repo.display()))?
        .with_tagger(config.tagger.clone());

    match args.command {
        Command::Next { resolve } => {
            let request = resolve.into_request()?;
            let next = cli::next_version(&repo, &request, &config)
                .context("Failed to determine next version")?;

            ui::display_warnings(&next.warnings);
            ui::display_resolution(next.latest_tag.as_deref(), &next.resolution);

            // stdout carries only the result so scripts can capture it
            match next.resolution.version() {
                Some(version) => println!("{}", version),
                None => println!("skip"),
            }
        }
        Command::Tag {
            resolve,
            version,
            message,
            dry_run,
        } => {
            let request = TagRequest {
                version: version.filter(|v| !v.trim().is_empty()),
                message,
                dry_run,
                ..resolve.into_request()?
            };

            let result =
                cli::run_tag_workflow(&repo, &request, &config).context("Tagging failed")?;

            ui::display_warnings(&result.warnings);
            ui::display_outcome(&result.outcome);
            println!("{}", ui::outcome_result(&result.outcome));
        }
    }

    Ok(())
}
