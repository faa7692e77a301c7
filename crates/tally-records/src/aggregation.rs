/*!
# File Aggregation

Drives [`validate_line`] over every line of a [`LineSource`] in order,
partitions the outcomes into accepted records and diagnostics, and computes
the schema-specific aggregate.

Only source-level problems fail an aggregation. A source whose lines are all
rejected is a successful run with an empty aggregate and a non-empty
diagnostic list; telling those apart from a zero-byte source
([`RecordsError::SourceEmpty`]) is up to the caller.
*/

use crate::{
    diagnostics::{Diagnostic, Severity},
    errors::{RecordsError, RecordsResult},
    schemas::{CatRecord, Record, RecordSchema, SalaryRecord, SchemaKind, CAT_SCHEMA, SALARY_SCHEMA},
    source::LineSource,
    validation::{validate_line, ValidationOutcome},
};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use tracing::{debug, info};

// ================================================================================================
// Results
// ================================================================================================

/// Total and average of accepted salaries
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalarySummary {
    pub total: i128,
    pub average: i128,
    pub count: usize,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SalaryAggregation {
    pub summary: SalarySummary,
    /// Accepted records in file order, warned ones included
    pub records: Vec<SalaryRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CatAggregation {
    /// Accepted cats in file order, ids unique
    pub cats: Vec<CatRecord>,
    pub diagnostics: Vec<Diagnostic>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Aggregation {
    Salary(SalaryAggregation),
    Cats(CatAggregation),
}

impl Aggregation {
    pub fn diagnostics(&self) -> &[Diagnostic] {
        match self {
            Aggregation::Salary(s) => &s.diagnostics,
            Aggregation::Cats(c) => &c.diagnostics,
        }
    }

    pub fn accepted_count(&self) -> usize {
        match self {
            Aggregation::Salary(s) => s.records.len(),
            Aggregation::Cats(c) => c.cats.len(),
        }
    }

    /// Rejected lines only, in source order
    pub fn rejections(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics().iter().filter(|d| d.is_rejection())
    }
}

// ================================================================================================
// Aggregation
// ================================================================================================

/// Aggregate `source` with any schema.
pub fn aggregate(source: &LineSource, schema: &RecordSchema) -> RecordsResult<Aggregation> {
    let (records, diagnostics) = partition(source, schema)?;

    Ok(match schema.kind {
        SchemaKind::Salary => {
            Aggregation::Salary(salary_aggregation(source, records, diagnostics)?)
        }
        SchemaKind::Cat => Aggregation::Cats(cat_aggregation(records, diagnostics)),
    })
}

/// Total and average salary of a `name,salary` source.
pub fn summarize_salaries(source: &LineSource) -> RecordsResult<SalaryAggregation> {
    let (records, diagnostics) = partition(source, &SALARY_SCHEMA)?;
    salary_aggregation(source, records, diagnostics)
}

/// Accepted cats of an `id,name,age` source.
pub fn collect_cats(source: &LineSource) -> RecordsResult<CatAggregation> {
    let (records, diagnostics) = partition(source, &CAT_SCHEMA)?;
    Ok(cat_aggregation(records, diagnostics))
}

fn partition(
    source: &LineSource,
    schema: &RecordSchema,
) -> RecordsResult<(Vec<Record>, Vec<Diagnostic>)> {
    if source.is_empty() {
        return Err(RecordsError::SourceEmpty(source.name().to_string()));
    }

    let mut seen_keys = HashSet::new();
    let mut records = Vec::new();
    let mut diagnostics = Vec::new();

    for line in source.lines() {
        match validate_line(&line, schema, &mut seen_keys) {
            ValidationOutcome::Accepted { record, warning } => {
                if let Some(cause) = warning {
                    debug!(line = line.index, %cause, "Accepted with warning");
                    diagnostics.push(Diagnostic {
                        line_index: line.index,
                        line: line.text.to_string(),
                        cause,
                        severity: Severity::ValidWithWarning,
                    });
                }
                records.push(record);
            }
            ValidationOutcome::Rejected { cause } => {
                debug!(line = line.index, %cause, "Rejected");
                diagnostics.push(Diagnostic {
                    line_index: line.index,
                    line: line.text.to_string(),
                    cause,
                    severity: Severity::Invalid,
                });
            }
        }
    }

    info!(
        source = source.name(),
        lines = source.line_count(),
        accepted = records.len(),
        rejected = diagnostics.iter().filter(|d| d.is_rejection()).count(),
        "Aggregation complete"
    );

    Ok((records, diagnostics))
}

fn salary_aggregation(
    source: &LineSource,
    records: Vec<Record>,
    diagnostics: Vec<Diagnostic>,
) -> RecordsResult<SalaryAggregation> {
    let records: Vec<SalaryRecord> = records
        .into_iter()
        .filter_map(|record| match record {
            Record::Salary(salary) => Some(salary),
            Record::Cat(_) => None,
        })
        .collect();

    let salaries: Vec<i128> = records.iter().map(|r| r.salary).collect();
    let overflow = || RecordsError::TotalOverflow(source.name().to_string());
    let summary = SalarySummary {
        total: calculate_total(&salaries).ok_or_else(overflow)?,
        average: calculate_average(&salaries).ok_or_else(overflow)?,
        count: salaries.len(),
    };

    Ok(SalaryAggregation {
        summary,
        records,
        diagnostics,
    })
}

fn cat_aggregation(records: Vec<Record>, diagnostics: Vec<Diagnostic>) -> CatAggregation {
    let cats = records
        .into_iter()
        .filter_map(|record| match record {
            Record::Cat(cat) => Some(cat),
            Record::Salary(_) => None,
        })
        .collect();

    CatAggregation { cats, diagnostics }
}

// ================================================================================================
// Arithmetic
// ================================================================================================

/// Sum of `values`, `None` if it leaves the `i128` range.
pub fn calculate_total(values: &[i128]) -> Option<i128> {
    values.iter().try_fold(0i128, |total, &v| total.checked_add(v))
}

/// Mean rounded to the nearest integer; an exact .5 rounds away from zero.
/// Empty input averages to 0. `None` when the total overflows.
pub fn calculate_average(values: &[i128]) -> Option<i128> {
    if values.is_empty() {
        return Some(0);
    }

    let total = calculate_total(values)?;
    let count = values.len() as i128;
    let quotient = total / count;
    let remainder = total % count;

    if remainder.abs() * 2 >= count {
        Some(quotient + total.signum())
    } else {
        Some(quotient)
    }
}
