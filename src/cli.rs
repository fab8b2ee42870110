use anyhow::Result;
use clap::{ArgAction, Args, Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "gitsheet")]
#[command(about = "Estimate hours worked from git commit history and export timesheets")]
#[command(version)]
pub struct Cli {
    #[clap(flatten)]
    pub common: CommonArgs,

    /// Defaults to `report`
    #[command(subcommand)]
    pub command: Option<Commands>,
}

#[derive(Args, Clone, Debug, Default)]
pub struct CommonArgs {
    #[arg(long, global = true, help = "Path to git repository")]
    pub repo: Option<PathBuf>,

    #[arg(
        short = 'f',
        long,
        global = true,
        help = "Case-insensitive filter on commit message or author name/email"
    )]
    pub filter: Option<String>,

    #[arg(
        short = 's',
        long,
        global = true,
        help = "First day to include (YYYY-MM-DD, YY-MM-DD, RFC3339, or 'N days ago')"
    )]
    pub start: Option<String>,

    #[arg(
        short = 'e',
        long,
        global = true,
        help = "Last day to include (YYYY-MM-DD, YY-MM-DD, RFC3339, or 'N days ago')"
    )]
    pub end: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Longest gap credited between commits, in minutes or as a duration like 90m [default: 60]"
    )]
    pub max_timeout: Option<String>,

    #[arg(
        long,
        global = true,
        help = "Round time worked to this unit, in minutes or as a duration like 15m [default: 60]"
    )]
    pub min_unit_worked: Option<String>,

    #[arg(long, global = true, help = "Leave merge commits out of the history")]
    pub exclude_merges: bool,

    #[arg(long, global = true, help = "Group by UTC dates instead of local dates")]
    pub utc: bool,

    #[arg(long, global = true, help = "Path to a gitsheet.toml config file")]
    pub config: Option<PathBuf>,

    #[arg(short = 'v', long, global = true, action = ArgAction::Count, help = "Increase log verbosity")]
    pub verbose: u8,

    #[arg(short = 'q', long, global = true, help = "Suppress the console summary")]
    pub quiet: bool,
}

#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Write detailed, weekly, daily and total CSV reports
    Report {
        #[arg(long, help = "Directory for the CSV files [default: output]")]
        output_dir: Option<PathBuf>,
    },
    /// Print the timesheet to stdout as structured data
    Export {
        #[arg(long, help = "Output as JSON (default)")]
        json: bool,

        #[arg(long, conflicts_with = "json", help = "Output detailed entries as NDJSON")]
        ndjson: bool,
    },
}

impl Cli {
    pub fn parse() -> Self {
        <Self as Parser>::parse()
    }

    pub fn execute(self) -> Result<()> {
        match self.command {
            None => crate::sheet::exec(self.common, None),
            Some(Commands::Report { output_dir }) => crate::sheet::exec(self.common, output_dir),
            Some(Commands::Export { json, ndjson }) => crate::export::exec(self.common, json, ndjson),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn export_flags(args: &[&str]) -> std::result::Result<(bool, bool), clap::Error> {
        let mut argv = vec!["gitsheet", "export"];
        argv.extend_from_slice(args);
        match Cli::try_parse_from(argv)?.command {
            Some(Commands::Export { json, ndjson }) => Ok((json, ndjson)),
            other => panic!("expected export, got {other:?}"),
        }
    }

    #[test]
    fn export_format_flags() {
        assert_eq!(export_flags(&[]).unwrap(), (false, false));
        assert_eq!(export_flags(&["--json"]).unwrap(), (true, false));
        assert_eq!(export_flags(&["--ndjson"]).unwrap(), (false, true));
        assert!(export_flags(&["--json", "--ndjson"]).is_err());
    }
}
