use crate::error::CliResult;
use crate::report::Reporter;
use std::io::Write;
use std::path::PathBuf;
use tally_records::{summarize_salaries, write_salaries_csv, LineSource, RecordsError};

/// Total and average salary of a `name,salary` file
pub fn execute<C: Write, L: Write>(
    path: PathBuf,
    export: Option<PathBuf>,
    reporter: &mut Reporter<C, L>,
) -> CliResult<()> {
    let source = LineSource::from_path(&path)?;

    let result = match summarize_salaries(&source) {
        Ok(result) => result,
        Err(err @ RecordsError::SourceEmpty(_)) => {
            reporter.warning(&err.to_string())?;
            return Ok(());
        }
        Err(err) => return Err(err.into()),
    };

    reporter.report_content_errors(&result.diagnostics)?;

    let summary = result.summary;
    if summary.total == 0 || summary.average == 0 {
        reporter.warning(
            "The salary data contains invalid or zero values, all or some lines may be invalid.",
        )?;
    }
    reporter.print(&format!(
        "Total salary: {}, Average salary: {}",
        summary.total, summary.average
    ))?;

    if let Some(export) = export {
        write_salaries_csv(&export, &result.records)?;
        reporter.print(&format!(
            "Exported {} salaries to {}",
            result.records.len(),
            export.display()
        ))?;
    }

    Ok(())
}
