/*!
# Tally Records

Line-oriented record validation with partial-failure semantics.

A source is read top to bottom; every line is validated on its own against a
declarative [`RecordSchema`] and ends up either as an accepted record or as a
[`Diagnostic`] explaining why it was rejected. Accepted records are aggregated;
diagnostics are returned next to the aggregate instead of aborting the run.

## Schemas

### Salary (`name,salary`)
Aggregates to a total and an average. Zero and negative salaries are counted
but produce a `(Valid)` warning. Validation stops at the first cause.

### Cat (`id,name,age`)
Aggregates to the ordered list of accepted cats. The 24-digit hex `id` must be
unique; the first accepted occurrence wins. Validation collects every cause
into one comma-separated message.

## Errors

Only the source itself can fail an aggregation: not found, access denied, not
a file, other I/O, a zero-byte source ([`RecordsError::SourceEmpty`]), or a
salary total outside the `i128` range ([`RecordsError::TotalOverflow`]).

## Logging

Progress is emitted as `tracing` events: one `DEBUG` event per warned or
rejected line and one `INFO` summary per aggregation. Install a subscriber to
see them.

## Usage

```rust
use tally_records::{summarize_salaries, LineSource, RecordsResult};

fn example() -> RecordsResult<()> {
    let source = LineSource::from_path("salary_file.txt")?;
    let result = summarize_salaries(&source)?;

    println!(
        "Total salary: {}, Average salary: {}",
        result.summary.total, result.summary.average
    );
    for diagnostic in &result.diagnostics {
        println!("Line {}: {}", diagnostic.line_index, diagnostic.cause);
    }

    Ok(())
}
```
*/

pub mod aggregation;
pub mod diagnostics;
pub mod errors;
pub mod export;
pub mod schemas;
pub mod source;
pub mod validation;

// Re-export main types for convenience
pub use aggregation::{
    aggregate, calculate_average, calculate_total, collect_cats, summarize_salaries,
    Aggregation, CatAggregation, SalaryAggregation, SalarySummary,
};
pub use diagnostics::{Diagnostic, Severity};
pub use errors::{RecordsError, RecordsResult};
pub use export::{write_cats_csv, write_salaries_csv};
pub use schemas::{
    CatRecord, FieldSpec, Record, RecordSchema, SalaryRecord, SchemaKind, CAT_SCHEMA,
    SALARY_SCHEMA,
};
pub use source::{LineSource, RawLine};
pub use validation::{validate_line, ValidationOutcome};
