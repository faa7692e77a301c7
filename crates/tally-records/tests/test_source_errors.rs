use tally_records::{collect_cats, summarize_salaries, LineSource, RecordsError};
use tempfile::{tempdir, NamedTempFile};

/// Test that source-level failures abort before any line is looked at
///
/// Checks:
/// - Missing file -> SourceNotFound
/// - Directory -> SourceIsNotAFile
/// - Zero-byte file -> SourceEmpty, from the aggregator rather than the loader
#[test]
fn test_source_error_taxonomy() {
    let dir = tempdir().unwrap();

    let err = LineSource::from_path(dir.path().join("salary_file.txt")).unwrap_err();
    assert!(matches!(err, RecordsError::SourceNotFound(_)));
    assert!(err.is_fatal());

    let err = LineSource::from_path(dir.path()).unwrap_err();
    assert!(matches!(err, RecordsError::SourceIsNotAFile(_)));
    assert!(err.to_string().starts_with("Expected a file, but found a"));

    let empty = NamedTempFile::new().unwrap();
    let source = LineSource::from_path(empty.path()).unwrap();
    assert!(source.is_empty());

    let err = summarize_salaries(&source).unwrap_err();
    assert!(matches!(err, RecordsError::SourceEmpty(_)));
    assert!(!err.is_fatal());
    assert!(matches!(
        collect_cats(&source),
        Err(RecordsError::SourceEmpty(_))
    ));
}

/// Test permission errors on unix, where a mode of 000 blocks reads
#[cfg(unix)]
#[test]
fn test_source_access_denied() {
    use std::fs::{self, Permissions};
    use std::os::unix::fs::PermissionsExt;

    let dir = tempdir().unwrap();
    let path = dir.path().join("locked.txt");
    fs::write(&path, "Alex,3000\n").unwrap();
    fs::set_permissions(&path, Permissions::from_mode(0o000)).unwrap();

    // root ignores file modes; nothing to check in that case
    if fs::read(&path).is_ok() {
        return;
    }

    let err = LineSource::from_path(&path).unwrap_err();
    assert!(matches!(err, RecordsError::SourceAccessDenied(_)));
}
