use crate::cli::CommonArgs;
use crate::sheet::{build_timesheet, output_json, output_ndjson, prepare, Prepared};
use anyhow::Context;

/// Print the timesheet on stdout: pretty JSON, or one detailed entry per line.
/// JSON is the default when neither format is asked for.
pub fn exec(common: CommonArgs, json: bool, ndjson: bool) -> anyhow::Result<()> {
    let Prepared { repo, settings, commits } = prepare(&common, None)?;

    let timesheet = build_timesheet(&commits, &settings.options, settings.utc);

    if json || !ndjson {
        output_json(&timesheet, repo.path(), &settings).context("Failed to write JSON")?;
    } else {
        output_ndjson(&timesheet).context("Failed to write NDJSON")?;
    }

    Ok(())
}
