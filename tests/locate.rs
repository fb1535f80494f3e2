use std::path::{Path, PathBuf};

use tsconfig_files::{
    files_by_project, files_from_tsconfig, files_from_tsconfig_sync, io::FromFileErrorKind, Error,
};

const HAPPY_PATH: &[&str] = &[
    "src/index.ts",
    "src/legacy.js",
    "src/nested/deep.ts",
    "src/types.d.ts",
    "src/view.tsx",
];

fn expected(paths: &[&str]) -> Vec<PathBuf> {
    paths.iter().map(PathBuf::from).collect()
}

fn check(cwd: &str, expected_files: &[&str]) {
    match files_from_tsconfig_sync(cwd) {
        Ok(actual) => assert_eq!(actual, expected(expected_files)),
        // Don't care what went wrong for now
        Err(err) => panic!("Unexpected error: {:?}", err),
    };
}

async fn check_async(cwd: &str, expected_files: &[&str]) {
    match files_from_tsconfig(cwd).await {
        Ok(actual) => assert_eq!(actual, expected(expected_files)),
        Err(err) => panic!("Unexpected error: {:?}", err),
    };
}

#[test]
fn list_happy_path_from_project_directory() {
    check("test-data/happy-path", HAPPY_PATH);
}

#[test]
fn list_happy_path_from_nested_directory() {
    check("test-data/happy-path/src/nested", HAPPY_PATH);
}

#[test]
fn list_files_only_project() {
    check("test-data/files-only", &["main.ts"]);
}

#[tokio::test]
async fn list_happy_path_async() {
    check_async("test-data/happy-path", HAPPY_PATH).await;
}

#[tokio::test]
async fn list_happy_path_from_nested_directory_async() {
    check_async("test-data/happy-path/src/nested", HAPPY_PATH).await;
}

#[test]
fn missing_tsconfig_is_reported() {
    let temp_dir = tempfile::tempdir().unwrap();
    std::fs::write(temp_dir.path().join("index.ts"), "").unwrap();

    let err = files_from_tsconfig_sync(temp_dir.path()).unwrap_err();
    match err {
        Error::ConfigNotFound { cwd } => assert!(cwd.ends_with(temp_dir.path())),
        err => panic!("Unexpected error: {:?}", err),
    }
}

#[tokio::test]
async fn missing_tsconfig_is_reported_async() {
    let temp_dir = tempfile::tempdir().unwrap();

    let err = files_from_tsconfig(temp_dir.path()).await.unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound { .. }));
}

#[test]
fn invalid_tsconfig_is_a_parse_error() {
    let err = files_from_tsconfig_sync("test-data/invalid-json").unwrap_err();
    match err {
        Error::ReadConfig(err) => {
            assert!(err.path().ends_with("invalid-json/tsconfig.json"));
            assert!(matches!(err.kind(), FromFileErrorKind::Parse { .. }));
        }
        err => panic!("Unexpected error: {:?}", err),
    }
}

#[tokio::test]
async fn invalid_tsconfig_is_a_parse_error_async() {
    let err = files_from_tsconfig("test-data/invalid-json")
        .await
        .unwrap_err();
    assert!(matches!(err, Error::ReadConfig(_)));
}

#[test]
fn list_by_project() {
    let actual = files_by_project([
        "test-data/happy-path",
        "test-data/happy-path/src",
        "test-data/files-only",
    ])
    .unwrap();

    assert_eq!(actual.len(), 2);
    let happy_path = std::path::absolute(Path::new("test-data/happy-path")).unwrap();
    let files_only = std::path::absolute(Path::new("test-data/files-only")).unwrap();
    assert_eq!(actual[&happy_path], expected(HAPPY_PATH));
    assert_eq!(actual[&files_only], expected(&["main.ts"]));
}

#[test]
fn list_by_project_fails_as_a_whole() {
    let temp_dir = tempfile::tempdir().unwrap();
    let err = files_by_project([Path::new("test-data/files-only"), temp_dir.path()]).unwrap_err();
    assert!(matches!(err, Error::ConfigNotFound { .. }));
}
