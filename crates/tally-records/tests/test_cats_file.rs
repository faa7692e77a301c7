use std::io::Write;
use tally_records::{collect_cats, CatRecord, LineSource};
use tempfile::NamedTempFile;

/// Test a cats inventory file end to end
///
/// Checks:
/// - Accepted cats keep file order
/// - A repeated id is rejected even when the repeat is otherwise valid
/// - Several defects on one line are joined into one cause
/// - Field-count mismatch is reported on its own
#[test]
fn test_cats_file_inventory() {
    let mut file = NamedTempFile::new().unwrap();
    write!(
        file,
        "60b90c1c13067a15887e1ae1,Tayson,3\n\
         60b90c2413067a15887e1ae2,Vika,1\n\
         60b90c1c13067a15887e1ae1,Tayson,3\n\
         zzz,Barsik,-2\n\
         60b90c3b13067a15887e1ae4,Dariy\n\
         60b90c4613067a15887e1ae5,,5\n\
         60B90C4F13067A15887E1AE6,Murzik,4\n"
    )
    .unwrap();

    let source = LineSource::from_path(file.path()).unwrap();
    let result = collect_cats(&source).unwrap();

    assert_eq!(
        result.cats,
        vec![
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
            CatRecord {
                id: "60B90C4F13067A15887E1AE6".to_string(),
                name: "Murzik".to_string(),
                age: 4,
            },
        ]
    );

    let found: Vec<(usize, &str)> = result
        .diagnostics
        .iter()
        .map(|d| (d.line_index, d.cause.as_str()))
        .collect();

    assert_eq!(
        found,
        vec![
            (3, "Duplicate ID"),
            (4, "Invalid or missing ID, Age cannot be negative"),
            (5, "Invalid data format or missing/extra data"),
            (6, "Missing or empty name"),
        ]
    );
    assert!(result.diagnostics.iter().all(|d| d.is_rejection()));
}
