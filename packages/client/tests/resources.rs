//! Resource store loading from a directory tree

use std::fs;

use projson_client::prelude::*;
use tempfile::TempDir;

fn write(root: &TempDir, relative: &str, contents: &str) {
    let path = root.path().join(relative);
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).expect("Failed to create resource directory");
    }
    fs::write(path, contents).expect("Failed to write resource file");
}

#[test]
fn test_load_nested_resources() {
    let root = TempDir::new().expect("Failed to create temp dir");
    write(&root, "summary.json", r#"[{"source": "$.a", "target": "$.b"}]"#);
    write(
        &root,
        "loans/fees.json",
        r#"[{"source": "$.fee", "target": "$.fees[?(@.type=='late')].amount"}]"#,
    );
    write(&root, "loans/README.md", "not a resource");
    write(&root, "loans/broken.json", "[{");

    let store = ResourceStore::load(&ResourceConfig::with_root(root.path()))
        .expect("resource root should load");

    assert_eq!(
        store.names().collect::<Vec<_>>(),
        vec!["loans.broken", "loans.fees", "summary"]
    );
    assert_eq!(store.get("summary"), Some(&[Rule::new("$.a", "$.b")][..]));
    assert_eq!(store.get("loans.broken").map(<[Rule]>::len), Some(0));
    assert!(store.get("loans.README").is_none());
}

#[test]
fn test_custom_extension() {
    let root = TempDir::new().expect("Failed to create temp dir");
    write(&root, "a.rules", r#"[{"source": "$.a", "target": "$.b"}]"#);
    write(&root, "b.json", r#"[{"source": "$.a", "target": "$.b"}]"#);

    let config = ResourceConfig {
        root: root.path().to_path_buf(),
        extension: "rules".to_string(),
    };
    let store = ResourceStore::load(&config).expect("resource root should load");
    assert_eq!(store.names().collect::<Vec<_>>(), vec!["a"]);
}

#[test]
fn test_missing_root_is_an_error() {
    let root = TempDir::new().expect("Failed to create temp dir");
    let config = ResourceConfig::with_root(root.path().join("absent"));
    let err = ResourceStore::load(&config).expect_err("missing root cannot be listed");
    assert!(matches!(err, ProjectionError::Resource { .. }));
}

#[cfg(unix)]
#[test]
fn test_symlinked_directories_are_not_followed() {
    let root = TempDir::new().expect("Failed to create temp dir");
    write(&root, "ok.json", r#"[{"source": "$.a", "target": "$.b"}]"#);
    write(&root, "sub/inner.json", r#"[{"source": "$.c", "target": "$.d"}]"#);
    std::os::unix::fs::symlink(root.path(), root.path().join("sub/loop"))
        .expect("Failed to create directory symlink");
    std::os::unix::fs::symlink(root.path().join("ok.json"), root.path().join("sub/alias.json"))
        .expect("Failed to create file symlink");

    let store = ResourceStore::load(&ResourceConfig::with_root(root.path()))
        .expect("resource root should load");

    assert_eq!(
        store.names().collect::<Vec<_>>(),
        vec!["ok", "sub.alias", "sub.inner"]
    );
    assert_eq!(store.get("sub.alias"), store.get("ok"));
}
