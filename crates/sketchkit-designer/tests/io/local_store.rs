use sketchkit_core::{Error, StorageError};
use sketchkit_designer::LocalStore;

#[test]
fn test_missing_file_opens_empty() {
    let dir = tempfile::tempdir().unwrap();
    let store = LocalStore::open(dir.path().join("store.json")).unwrap();
    assert!(store.is_empty());
    assert!(store.path().is_some());
}

#[test]
fn test_documents_persist_across_opens() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("nested").join("store.json");

    let mut store = LocalStore::open(&path).unwrap();
    store.save("beta", "[]").unwrap();
    store.save("alpha", "[\n]\n").unwrap();
    store.save("beta", "[{\"type\":\"meta\",\"size\":[1,1]}]").unwrap();

    let reopened = LocalStore::open(&path).unwrap();
    assert_eq!(reopened.list(), vec!["alpha".to_string(), "beta".to_string()]);
    assert_eq!(
        reopened.load("beta").unwrap(),
        "[{\"type\":\"meta\",\"size\":[1,1]}]"
    );
}

#[test]
fn test_delete_and_missing_names() {
    let mut store = LocalStore::in_memory();
    store.save("one", "[]").unwrap();
    store.delete("one").unwrap();
    assert!(store.is_empty());

    let err = store.load("one").unwrap_err();
    assert!(matches!(err, Error::Storage(StorageError::NotFound(_))));
    assert!(store.delete("one").is_err());
    assert!(matches!(
        store.save("", "[]"),
        Err(Error::Storage(StorageError::EmptyName))
    ));
}

#[test]
fn test_corrupted_store_is_reported() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("store.json");
    std::fs::write(&path, "{ not json").unwrap();
    let err = LocalStore::open(&path).unwrap_err();
    assert!(matches!(err, Error::Storage(StorageError::Corrupted(_))));
}
