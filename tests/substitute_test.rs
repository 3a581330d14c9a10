use std::fs;

use forge::constants::{DESCRIPTION_TOKEN, MODULE_PATH_TOKEN, PROJECT_NAME_TOKEN};
use forge::error::Error;
use forge::ignore::{parse_ignore_file, IGNORE_FILE};
use forge::substitute::{substitute_file, substitute_tokens, TokenSet};
use globset::GlobSet;
use tempfile::TempDir;

const NAME: &str = "projectname";
const MODULE: &str = "github.com/username/projectname";

fn tokens() -> TokenSet {
    TokenSet::new(NAME, MODULE, "")
}

#[test_log::test]
fn test_counts_match_byte_delta() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    let content = "module {{module_path}}\n// {{project_name}} {{project_name}} {{project_name}}\n\
                   import \"{{module_path}}/internal\"\n";
    fs::create_dir_all(root.join("nested/deeper")).unwrap();
    fs::write(root.join("nested/deeper/main.go"), content).unwrap();

    let report = substitute_tokens(root, &tokens(), &GlobSet::empty()).unwrap();
    let after = fs::read_to_string(root.join("nested/deeper/main.go")).unwrap();

    let (n, m) = (3, 2);
    assert_eq!(report.count(PROJECT_NAME_TOKEN), n);
    assert_eq!(report.count(MODULE_PATH_TOKEN), m);
    assert!(!after.contains(PROJECT_NAME_TOKEN));
    assert!(!after.contains(MODULE_PATH_TOKEN));

    let delta = after.len() as isize - content.len() as isize;
    let expected = n as isize * (NAME.len() as isize - PROJECT_NAME_TOKEN.len() as isize)
        + m as isize * (MODULE.len() as isize - MODULE_PATH_TOKEN.len() as isize);
    assert_eq!(delta, expected);
    assert_eq!(report.files_visited, 1);
    assert_eq!(report.files_rewritten, 1);
}

#[test]
fn test_file_without_tokens_is_unchanged() {
    let temp_dir = TempDir::new().unwrap();
    let pristine = temp_dir.path().join("pristine");
    let work = temp_dir.path().join("work");
    for dir in [&pristine, &work] {
        fs::create_dir_all(dir.join("docs")).unwrap();
        fs::write(dir.join("docs/notes.txt"), "{{ not_a_token }} {project_name}\n").unwrap();
        fs::write(dir.join("blob.bin"), [0u8, 255, 123, 123, 0]).unwrap();
    }

    let report = substitute_tokens(&work, &tokens(), &GlobSet::empty()).unwrap();

    assert_eq!(report.files_visited, 2);
    assert_eq!(report.files_rewritten, 0);
    assert!(!dir_diff::is_different(&pristine, &work).unwrap());
}

#[test]
fn test_description_token_defaults_to_empty() {
    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("README.md");
    fs::write(&path, "# {{project_name}}\n\n{{project_description}}\n").unwrap();

    let counts = substitute_file(&path, &tokens()).unwrap();

    assert_eq!(counts, vec![1, 0, 1]);
    assert_eq!(fs::read_to_string(&path).unwrap(), "# projectname\n\n\n");

    fs::write(&path, "{{project_description}}").unwrap();
    substitute_file(&path, &TokenSet::new(NAME, MODULE, "A tool")).unwrap();
    assert_eq!(fs::read_to_string(&path).unwrap(), "A tool");
    assert!(!fs::read_to_string(&path).unwrap().contains(DESCRIPTION_TOKEN));
}

#[test]
fn test_ignored_files_are_left_alone() {
    let temp_dir = TempDir::new().unwrap();
    let root = temp_dir.path();
    fs::create_dir_all(root.join("assets")).unwrap();
    fs::write(root.join("assets/raw.txt"), "{{project_name}}").unwrap();
    fs::write(root.join("main.go"), "{{project_name}}").unwrap();
    let ignore_path = root.join(IGNORE_FILE);
    fs::write(&ignore_path, "# keep assets verbatim\n\nassets/**\n").unwrap();
    let ignored = parse_ignore_file(&ignore_path).unwrap();
    fs::remove_file(&ignore_path).unwrap();

    let report = substitute_tokens(root, &tokens(), &ignored).unwrap();

    assert_eq!(report.files_ignored, 1);
    assert_eq!(fs::read_to_string(root.join("assets/raw.txt")).unwrap(), "{{project_name}}");
    assert_eq!(fs::read_to_string(root.join("main.go")).unwrap(), NAME);
}

#[test]
fn test_invalid_ignore_pattern() {
    let temp_dir = TempDir::new().unwrap();
    let ignore_path = temp_dir.path().join(IGNORE_FILE);
    fs::write(&ignore_path, "a[\n").unwrap();

    assert!(matches!(parse_ignore_file(&ignore_path), Err(Error::IgnoreError(_))));
}

#[test]
fn test_missing_root_fails() {
    let err = substitute_tokens("/some/invalid/path", &tokens(), &GlobSet::empty()).unwrap_err();
    assert!(matches!(err, Error::Filesystem { .. }));
}

#[test]
fn test_missing_file_fails() {
    let err = substitute_file("/some/invalid/path", &tokens()).unwrap_err();
    assert!(matches!(err, Error::Filesystem { .. }));
}

#[cfg(unix)]
#[test]
fn test_unwritable_file_fails_fast() {
    use std::os::unix::fs::PermissionsExt;

    let temp_dir = TempDir::new().unwrap();
    let path = temp_dir.path().join("locked.go");
    fs::write(&path, "{{project_name}}").unwrap();
    fs::set_permissions(&path, fs::Permissions::from_mode(0o444)).unwrap();

    // Privileged users can write read-only files; nothing to assert then.
    if fs::OpenOptions::new().write(true).open(&path).is_ok() {
        return;
    }

    let err = substitute_tokens(temp_dir.path(), &tokens(), &GlobSet::empty()).unwrap_err();
    assert!(matches!(err, Error::Filesystem { .. }));
}
