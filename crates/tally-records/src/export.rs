/*!
# CSV Export

Writes accepted records back out. The header row comes from the schema, so
it is written even when no record was accepted. Only records that passed
validation ever reach these writers.
*/

use crate::{
    errors::RecordsResult,
    schemas::{CatRecord, SalaryRecord, CAT_SCHEMA, SALARY_SCHEMA},
};
use csv::WriterBuilder;
use serde::Serialize;
use std::fs::File;
use std::io::Write;
use std::path::Path;

/// Write accepted salaries as `name,salary`
pub fn write_salaries_csv<P: AsRef<Path>>(path: P, rows: &[SalaryRecord]) -> RecordsResult<()> {
    write_rows(File::create(path)?, &SALARY_SCHEMA.headers(), rows)
}

/// Write accepted cats as `id,name,age`
pub fn write_cats_csv<P: AsRef<Path>>(path: P, rows: &[CatRecord]) -> RecordsResult<()> {
    write_rows(File::create(path)?, &CAT_SCHEMA.headers(), rows)
}

pub fn write_rows<W: Write, T: Serialize>(
    writer: W,
    headers: &[&str],
    rows: &[T],
) -> RecordsResult<()> {
    let mut wtr = WriterBuilder::new().has_headers(false).from_writer(writer);

    wtr.write_record(headers)?;
    for row in rows {
        wtr.serialize(row)?;
    }

    wtr.flush()?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;
    use tempfile::NamedTempFile;

    #[test]
    fn test_write_cats_csv() {
        let rows = vec![
            CatRecord {
                id: "60b90c1c13067a15887e1ae1".to_string(),
                name: "Tayson".to_string(),
                age: 3,
            },
            CatRecord {
                id: "60b90c2413067a15887e1ae2".to_string(),
                name: "Vika".to_string(),
                age: 1,
            },
        ];

        let temp_file = NamedTempFile::new().unwrap();
        write_cats_csv(temp_file.path(), &rows).unwrap();

        let written = fs::read_to_string(temp_file.path()).unwrap();
        assert_eq!(
            written,
            "id,name,age\n60b90c1c13067a15887e1ae1,Tayson,3\n60b90c2413067a15887e1ae2,Vika,1\n"
        );
    }

    #[test]
    fn test_write_salaries_quotes_commas_in_names() {
        let rows = vec![SalaryRecord {
            name: "Korp, Alex".to_string(),
            salary: 3000,
        }];

        let mut buffer = Vec::new();
        write_rows(&mut buffer, &SALARY_SCHEMA.headers(), &rows).unwrap();

        assert_eq!(
            String::from_utf8(buffer).unwrap(),
            "name,salary\n\"Korp, Alex\",3000\n"
        );
    }

    #[test]
    fn test_header_written_without_records() {
        let temp_file = NamedTempFile::new().unwrap();
        write_cats_csv(temp_file.path(), &[]).unwrap();
        assert_eq!(fs::read_to_string(temp_file.path()).unwrap(), "id,name,age\n");

        write_salaries_csv(temp_file.path(), &[]).unwrap();
        assert_eq!(fs::read_to_string(temp_file.path()).unwrap(), "name,salary\n");
    }
}
