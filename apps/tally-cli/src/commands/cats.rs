use crate::error::CliResult;
use crate::report::Reporter;
use std::io::Write;
use std::path::PathBuf;
use tally_records::{collect_cats, write_cats_csv, LineSource, RecordsError};

/// Validate an `id,name,age` cats inventory and print the accepted cats
pub fn execute<C: Write, L: Write>(
    path: PathBuf,
    export: Option<PathBuf>,
    reporter: &mut Reporter<C, L>,
) -> CliResult<()> {
    let source = LineSource::from_path(&path)?;

    let result = match collect_cats(&source) {
        Ok(result) => result,
        Err(err @ RecordsError::SourceEmpty(_)) => {
            reporter.warning(&err.to_string())?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    reporter.report_content_errors(&result.diagnostics)?;

    if !result.cats.is_empty() {
        reporter.print(&serde_json::to_string_pretty(&result.cats)?)?;
    } else if !result.diagnostics.is_empty() {
        reporter.warning(&format!(
            "After processing \"{}\" file, no valid data found in the file.",
            path.display()
        ))?;
    }

    if let Some(export) = export {
        write_cats_csv(&export, &result.cats)?;
        reporter.print(&format!(
            "Exported {} cats to {}",
            result.cats.len(),
            export.display()
        ))?;
    }

    Ok(())
}
