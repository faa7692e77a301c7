/*!
# Record Schemas

Declarative descriptions of the two supported line formats. A schema is a
table of [`FieldSpec`]s plus the record-level policies (uniqueness key, first
cause vs. all causes); the generic validator in [`crate::validation`]
interprets it.

## Salary (`name,salary`)
- `name`: free text, may be empty
- `salary`: integer; zero or negative values are accepted with a warning

## Cat (`id,name,age`)
- `id`: exactly 24 hexadecimal digits, unique within one run
- `name`: non-blank text
- `age`: integer, zero or greater
*/

use serde::{Deserialize, Serialize};
use std::num::IntErrorKind;

/// Field delimiter for every schema. No quoting or escaping is supported.
pub const DELIMITER: char = ',';

/// Length of a cat identifier in hex digits
pub const CAT_ID_LEN: usize = 24;

// ================================================================================================
// Cause strings
// ================================================================================================

pub const CAUSE_EMPTY_LINE: &str = "Empty line";
pub const CAUSE_MISSING_DELIMITER: &str = "Line is missing a comma separator";
pub const CAUSE_FIELD_COUNT: &str = "Invalid data format or missing/extra data";
pub const CAUSE_INVALID_FORMAT: &str = "Invalid format";
pub const CAUSE_SALARY_NOT_INTEGER: &str = "Salary should be a numeric integer";
pub const CAUSE_SALARY_OUT_OF_RANGE: &str = "Salary is out of range";
pub const CAUSE_INVALID_ID: &str = "Invalid or missing ID";
pub const CAUSE_DUPLICATE_ID: &str = "Duplicate ID";
pub const CAUSE_EMPTY_NAME: &str = "Missing or empty name";
pub const CAUSE_AGE_NOT_INTEGER: &str = "Age must be a numeric integer";
pub const CAUSE_NEGATIVE_AGE: &str = "Age cannot be negative";
pub const CAUSE_AGE_OUT_OF_RANGE: &str = "Age is out of range";

// ================================================================================================
// Field specifications
// ================================================================================================

/// How the raw text of a field is structurally parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldKind {
    /// Any text, kept as written
    Text,
    /// Signed integer within `min..=max`, surrounding whitespace ignored
    Integer { min: i128, max: i128 },
    /// Fixed-length hexadecimal identifier (either case)
    HexId { len: usize },
}

/// Predicate applied to an integer field once every field parsed
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Predicate {
    /// value >= 0
    NonNegative,
    /// value > 0
    Positive,
}

impl Predicate {
    pub fn holds(&self, value: i128) -> bool {
        match self {
            Predicate::NonNegative => value >= 0,
            Predicate::Positive => value > 0,
        }
    }
}

/// What happens when a [`Predicate`] fails
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Violation {
    /// The line is rejected with the given cause
    Reject(&'static str),
    /// The record is accepted and counted, with a "zero"/"negative" warning
    Warn,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldCheck {
    pub predicate: Predicate,
    pub violation: Violation,
}

/// One positional field of a record
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FieldSpec {
    pub name: &'static str,
    pub kind: FieldKind,
    /// Blank values are rejected with `empty_cause`
    pub required: bool,
    /// Cause reported when structural parsing fails
    pub parse_cause: &'static str,
    /// Cause reported for a well-formed integer outside the field's bounds
    pub range_cause: &'static str,
    pub empty_cause: &'static str,
    pub check: Option<FieldCheck>,
}

/// Parsed value of one field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FieldValue {
    Text(String),
    Integer(i128),
}

impl FieldSpec {
    /// Structural parse. `Err` carries this field's parse cause.
    pub fn parse(&self, raw: &str) -> Result<FieldValue, &'static str> {
        match self.kind {
            FieldKind::Text => Ok(FieldValue::Text(raw.to_string())),
            FieldKind::Integer { min, max } => {
                let value = raw.trim().parse::<i128>().map_err(|e| match e.kind() {
                    IntErrorKind::PosOverflow | IntErrorKind::NegOverflow => self.range_cause,
                    _ => self.parse_cause,
                })?;
                if value < min || value > max {
                    return Err(self.range_cause);
                }
                Ok(FieldValue::Integer(value))
            }
            FieldKind::HexId { len } => {
                if raw.len() == len && hex::decode(raw).is_ok() {
                    Ok(FieldValue::Text(raw.to_string()))
                } else {
                    Err(self.parse_cause)
                }
            }
        }
    }
}

impl FieldValue {
    pub fn is_blank(&self) -> bool {
        match self {
            FieldValue::Text(s) => s.trim().is_empty(),
            FieldValue::Integer(_) => false,
        }
    }

    pub fn as_key(&self) -> String {
        match self {
            FieldValue::Text(s) => s.clone(),
            FieldValue::Integer(n) => n.to_string(),
        }
    }
}

// ================================================================================================
// Record schemas
// ================================================================================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SchemaKind {
    Salary,
    Cat,
}

/// A complete line format: field table plus record-level policies
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RecordSchema {
    pub kind: SchemaKind,
    pub fields: &'static [FieldSpec],
    /// Index into `fields` whose value may not repeat across accepted records
    pub unique_key: Option<usize>,
    /// Stop at the first cause (Salary) or collect every cause (Cat)
    pub short_circuit: bool,
    pub empty_line_cause: &'static str,
    /// Reported instead of the field-count cause when the line has no delimiter at all
    pub missing_delimiter_cause: Option<&'static str>,
    pub field_count_cause: &'static str,
    pub duplicate_cause: &'static str,
}

const SALARY_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "name",
        kind: FieldKind::Text,
        required: false,
        parse_cause: CAUSE_INVALID_FORMAT,
        range_cause: CAUSE_INVALID_FORMAT,
        empty_cause: CAUSE_INVALID_FORMAT,
        check: None,
    },
    FieldSpec {
        name: "salary",
        kind: FieldKind::Integer {
            min: i128::MIN,
            max: i128::MAX,
        },
        required: true,
        parse_cause: CAUSE_SALARY_NOT_INTEGER,
        range_cause: CAUSE_SALARY_OUT_OF_RANGE,
        empty_cause: CAUSE_SALARY_NOT_INTEGER,
        check: Some(FieldCheck {
            predicate: Predicate::Positive,
            violation: Violation::Warn,
        }),
    },
];

const CAT_FIELDS: &[FieldSpec] = &[
    FieldSpec {
        name: "id",
        kind: FieldKind::HexId { len: CAT_ID_LEN },
        required: true,
        parse_cause: CAUSE_INVALID_ID,
        range_cause: CAUSE_INVALID_ID,
        empty_cause: CAUSE_INVALID_ID,
        check: None,
    },
    FieldSpec {
        name: "name",
        kind: FieldKind::Text,
        required: true,
        parse_cause: CAUSE_EMPTY_NAME,
        range_cause: CAUSE_EMPTY_NAME,
        empty_cause: CAUSE_EMPTY_NAME,
        check: None,
    },
    FieldSpec {
        name: "age",
        // Negative values parse so the predicate can name them
        kind: FieldKind::Integer {
            min: i64::MIN as i128,
            max: u64::MAX as i128,
        },
        required: true,
        parse_cause: CAUSE_AGE_NOT_INTEGER,
        range_cause: CAUSE_AGE_OUT_OF_RANGE,
        empty_cause: CAUSE_AGE_NOT_INTEGER,
        check: Some(FieldCheck {
            predicate: Predicate::NonNegative,
            violation: Violation::Reject(CAUSE_NEGATIVE_AGE),
        }),
    },
];

pub const SALARY_SCHEMA: RecordSchema = RecordSchema {
    kind: SchemaKind::Salary,
    fields: SALARY_FIELDS,
    unique_key: None,
    short_circuit: true,
    empty_line_cause: CAUSE_EMPTY_LINE,
    missing_delimiter_cause: Some(CAUSE_MISSING_DELIMITER),
    field_count_cause: CAUSE_FIELD_COUNT,
    duplicate_cause: CAUSE_DUPLICATE_ID,
};

pub const CAT_SCHEMA: RecordSchema = RecordSchema {
    kind: SchemaKind::Cat,
    fields: CAT_FIELDS,
    unique_key: Some(0),
    short_circuit: false,
    empty_line_cause: CAUSE_FIELD_COUNT,
    missing_delimiter_cause: None,
    field_count_cause: CAUSE_FIELD_COUNT,
    duplicate_cause: CAUSE_DUPLICATE_ID,
};

impl RecordSchema {
    pub fn for_kind(kind: SchemaKind) -> &'static RecordSchema {
        match kind {
            SchemaKind::Salary => &SALARY_SCHEMA,
            SchemaKind::Cat => &CAT_SCHEMA,
        }
    }

    pub fn expected_field_count(&self) -> usize {
        self.fields.len()
    }

    /// Column names in field order, used as the CSV export header
    pub fn headers(&self) -> Vec<&'static str> {
        self.fields.iter().map(|f| f.name).collect()
    }

    /// Turn fully validated field values into a typed record.
    ///
    /// Returns `None` when the values do not have the shape this schema
    /// produces; the validator reports that as a generic invalid format.
    pub fn build_record(&self, values: Vec<FieldValue>) -> Option<Record> {
        let mut values = values.into_iter();
        match self.kind {
            SchemaKind::Salary => match (values.next()?, values.next()?, values.next()) {
                (FieldValue::Text(name), FieldValue::Integer(salary), None) => {
                    Some(Record::Salary(SalaryRecord { name, salary }))
                }
                _ => None,
            },
            SchemaKind::Cat => {
                match (values.next()?, values.next()?, values.next()?, values.next()) {
                    (
                        FieldValue::Text(id),
                        FieldValue::Text(name),
                        FieldValue::Integer(age),
                        None,
                    ) => {
                        let age = u64::try_from(age).ok()?;
                        Some(Record::Cat(CatRecord { id, name, age }))
                    }
                    _ => None,
                }
            }
        }
    }
}

// ================================================================================================
// Records
// ================================================================================================

/// One accepted salary line. `name` is informational only.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SalaryRecord {
    pub name: String,
    pub salary: i128,
}

/// One accepted cat line. Identity is `id`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CatRecord {
    pub id: String,
    pub name: String,
    pub age: u64,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Record {
    Salary(SalaryRecord),
    Cat(CatRecord),
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_hex_id_field_parsing() {
        let id = &CAT_FIELDS[0];

        assert_eq!(
            id.parse("60b90c1c13067a15887e1ae1"),
            Ok(FieldValue::Text("60b90c1c13067a15887e1ae1".to_string()))
        );
        assert!(id.parse("60B90C1C13067A15887E1AE1").is_ok());
        assert_eq!(id.parse("60b90c1c13067a15887e1ae"), Err(CAUSE_INVALID_ID));
        assert_eq!(id.parse("60b90c1c13067a15887e1ag1"), Err(CAUSE_INVALID_ID));
        assert_eq!(id.parse(""), Err(CAUSE_INVALID_ID));
    }

    #[test]
    fn test_integer_field_parsing() {
        let salary = &SALARY_FIELDS[1];

        assert_eq!(salary.parse(" 3000 "), Ok(FieldValue::Integer(3000)));
        assert_eq!(salary.parse("-50"), Ok(FieldValue::Integer(-50)));
        assert_eq!(salary.parse("3000.5"), Err(CAUSE_SALARY_NOT_INTEGER));
        assert_eq!(salary.parse(""), Err(CAUSE_SALARY_NOT_INTEGER));
    }

    #[test]
    fn test_integer_field_bounds() {
        let salary = &SALARY_FIELDS[1];
        assert_eq!(
            salary.parse("9223372036854775808"),
            Ok(FieldValue::Integer(i128::from(i64::MAX) + 1))
        );
        assert_eq!(
            salary.parse("170141183460469231731687303715884105728"),
            Err(CAUSE_SALARY_OUT_OF_RANGE)
        );
        assert_eq!(
            salary.parse("-170141183460469231731687303715884105729"),
            Err(CAUSE_SALARY_OUT_OF_RANGE)
        );

        let age = &CAT_FIELDS[2];
        assert_eq!(
            age.parse("18446744073709551615"),
            Ok(FieldValue::Integer(i128::from(u64::MAX)))
        );
        assert_eq!(age.parse("18446744073709551616"), Err(CAUSE_AGE_OUT_OF_RANGE));
        assert_eq!(age.parse("-4"), Ok(FieldValue::Integer(-4)));
    }

    #[test]
    fn test_predicates() {
        assert!(Predicate::NonNegative.holds(0));
        assert!(!Predicate::NonNegative.holds(-1));
        assert!(Predicate::Positive.holds(1));
        assert!(!Predicate::Positive.holds(0));
    }

    #[test]
    fn test_schema_shapes() {
        assert_eq!(SALARY_SCHEMA.expected_field_count(), 2);
        assert_eq!(CAT_SCHEMA.headers(), vec!["id", "name", "age"]);
        assert!(SALARY_SCHEMA.short_circuit);
        assert!(!CAT_SCHEMA.short_circuit);
        assert_eq!(RecordSchema::for_kind(SchemaKind::Cat), &CAT_SCHEMA);
    }

    #[test]
    fn test_build_record_rejects_wrong_shape() {
        let record = CAT_SCHEMA.build_record(vec![
            FieldValue::Text("60b90c1c13067a15887e1ae1".to_string()),
            FieldValue::Text("Tayson".to_string()),
            FieldValue::Integer(3),
        ]);
        assert_eq!(
            record,
            Some(Record::Cat(CatRecord {
                id: "60b90c1c13067a15887e1ae1".to_string(),
                name: "Tayson".to_string(),
                age: 3,
            }))
        );

        assert_eq!(
            SALARY_SCHEMA.build_record(vec![FieldValue::Integer(1), FieldValue::Integer(2)]),
            None
        );
    }
}
