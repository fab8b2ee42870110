use anyhow::Result;
use gitsheet::cli::Cli;

fn main() -> Result<()> {
    let cli = Cli::parse();
    gitsheet::logging::init(cli.common.verbose);
    cli.execute()
}
