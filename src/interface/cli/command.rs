//! CLI 명령 파싱 모듈.

use clap::{Parser, Subcommand};

use crate::domain::pull_request::{RunOptions, Topology};

#[derive(Debug, Parser)]
#[command(name = "prnudge")]
#[command(about = "Slack review reminders for open GitHub PRs")]
pub struct Cli {
    #[command(subcommand)]
    command: Option<Commands>,

    /// Repository URL (e.g. https://github.com/owner/repo)
    url: Option<String>,

    /// Send one direct message per reviewer instead of a channel broadcast
    #[arg(long)]
    dm: bool,

    /// Destination channel, overrides defaults.channel from config
    #[arg(long)]
    channel: Option<String>,

    /// Include draft PRs even when config says to skip them
    #[arg(long)]
    include_drafts: bool,

    /// Print rendered blocks to stdout, do not post
    #[arg(long)]
    dry_run: bool,
}

#[derive(Debug, Subcommand)]
enum Commands {
    /// Show effective merged config and token resolution state
    Config,
}

pub enum CliAction {
    InspectConfig,
    Notify(RunOptions),
}

impl Cli {
    pub fn parse_action() -> Result<CliAction, String> {
        let cli = Cli::parse();

        match cli.command {
            Some(Commands::Config) => Ok(CliAction::InspectConfig),
            None => {
                let Some(url) = cli.url else {
                    return Err("repository URL is required (e.g. prnudge https://github.com/owner/repo)".to_string());
                };

                Ok(CliAction::Notify(RunOptions {
                    url,
                    topology: if cli.dm {
                        Topology::DirectMessage
                    } else {
                        Topology::Channel
                    },
                    channel: cli.channel,
                    include_drafts: cli.include_drafts,
                    dry_run: cli.dry_run,
                }))
            }
        }
    }
}
