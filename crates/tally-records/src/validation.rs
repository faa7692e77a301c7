/*!
# Line Validation

Applies a [`RecordSchema`] to one raw line. The checks run in a fixed order and
the order decides which cause is reported for a line with several defects:

1. blank line
2. field count
3. structural parse and required-field check, per field in order
4. uniqueness key against keys already accepted in this run
5. field predicates (hard rejection or soft warning)

Short-circuiting schemas report only the first cause found. Collecting schemas
keep going through steps 3-5 and join every cause with `", "`; a blank line or
a field-count mismatch always ends validation on its own.
*/

use crate::{
    schemas::{
        FieldSpec, FieldValue, Record, RecordSchema, Violation, CAUSE_INVALID_FORMAT, DELIMITER,
    },
    source::RawLine,
};
use std::collections::HashSet;

/// Result of validating one line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    /// Parsed and counted. `warning` flags a suspicious but usable value.
    Accepted {
        record: Record,
        warning: Option<String>,
    },
    /// Excluded from every aggregate
    Rejected { cause: String },
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted { .. })
    }

    fn rejected(cause: impl Into<String>) -> Self {
        ValidationOutcome::Rejected {
            cause: cause.into(),
        }
    }
}

/// Validate one line against `schema`.
///
/// `seen_keys` holds the uniqueness keys of records accepted earlier in the
/// same run; the key of an accepted record is added to it here. Rejected lines
/// never touch it, so the first *accepted* occurrence of a key wins.
pub fn validate_line(
    line: &RawLine<'_>,
    schema: &RecordSchema,
    seen_keys: &mut HashSet<String>,
) -> ValidationOutcome {
    let trimmed = line.text.trim();
    if trimmed.is_empty() {
        return ValidationOutcome::rejected(schema.empty_line_cause);
    }

    let raw_fields: Vec<&str> = trimmed.split(DELIMITER).collect();
    if raw_fields.len() != schema.expected_field_count() {
        let cause = match schema.missing_delimiter_cause {
            Some(cause) if raw_fields.len() == 1 => cause,
            _ => schema.field_count_cause,
        };
        return ValidationOutcome::rejected(cause);
    }

    let mut causes: Vec<&'static str> = Vec::new();

    // Structural parse + required check
    let mut values: Vec<Option<FieldValue>> = Vec::with_capacity(raw_fields.len());
    for (spec, raw) in schema.fields.iter().zip(raw_fields.iter()) {
        let value = match spec.parse(raw) {
            Ok(value) if spec.required && value.is_blank() => {
                causes.push(spec.empty_cause);
                None
            }
            Ok(value) => Some(value),
            Err(cause) => {
                causes.push(cause);
                None
            }
        };
        if let Some(outcome) = first_cause(schema, &causes) {
            return outcome;
        }
        values.push(value);
    }

    // Uniqueness
    let key = schema
        .unique_key
        .and_then(|index| values.get(index))
        .and_then(Option::as_ref)
        .map(FieldValue::as_key);
    if let Some(key) = &key {
        if seen_keys.contains(key) {
            causes.push(schema.duplicate_cause);
            if let Some(outcome) = first_cause(schema, &causes) {
                return outcome;
            }
        }
    }

    // Predicates
    let mut warning = None;
    for (spec, value) in schema.fields.iter().zip(values.iter()) {
        let (Some(check), Some(FieldValue::Integer(n))) = (spec.check, value) else {
            continue;
        };
        if check.predicate.holds(*n) {
            continue;
        }
        match check.violation {
            Violation::Reject(cause) => causes.push(cause),
            Violation::Warn => warning = Some(warning_text(spec, *n)),
        }
        if let Some(outcome) = first_cause(schema, &causes) {
            return outcome;
        }
    }

    if !causes.is_empty() {
        return ValidationOutcome::rejected(causes.join(", "));
    }

    let record = values
        .into_iter()
        .collect::<Option<Vec<_>>>()
        .and_then(|values| schema.build_record(values));

    match record {
        Some(record) => {
            if let Some(key) = key {
                seen_keys.insert(key);
            }
            ValidationOutcome::Accepted { record, warning }
        }
        None => ValidationOutcome::rejected(CAUSE_INVALID_FORMAT),
    }
}

fn first_cause(schema: &RecordSchema, causes: &[&'static str]) -> Option<ValidationOutcome> {
    if !schema.short_circuit {
        return None;
    }
    causes.first().map(|cause| ValidationOutcome::rejected(*cause))
}

fn warning_text(spec: &FieldSpec, value: i128) -> String {
    let reason = if value == 0 { "zero" } else { "negative" };
    format!(
        "Please check if {} {} is a valid {} value",
        reason, spec.name, spec.name
    )
}
