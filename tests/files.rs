use stitchlog::storage::{FileStorage, LocalFileStorage};
use tempfile::TempDir;

#[tokio::test]
async fn test_save_read_delete() {
    let dir = TempDir::new().unwrap();
    let storage = LocalFileStorage::new(dir.path().join("uploads")).await.unwrap();

    let stored = storage.save(b"fake png", "My Bear.png").await.unwrap();
    assert!(stored.ends_with("_My_Bear.png"), "unexpected name {stored}");
    assert!(storage.root().join(&stored).exists());

    assert_eq!(storage.read(&stored).await.unwrap(), Some(b"fake png".to_vec()));

    storage.delete(&stored).await.unwrap();
    assert!(!storage.root().join(&stored).exists());
    assert_eq!(storage.read(&stored).await.unwrap(), None);
}

#[tokio::test]
async fn test_delete_missing_file_is_ok() {
    let dir = TempDir::new().unwrap();
    let storage = LocalFileStorage::new(dir.path()).await.unwrap();
    assert!(storage.delete("20250101_000000_gone.jpg").await.is_ok());
}

#[tokio::test]
async fn test_path_traversal_is_rejected() {
    let dir = TempDir::new().unwrap();
    let storage = LocalFileStorage::new(dir.path().join("uploads")).await.unwrap();
    std::fs::write(dir.path().join("secret.txt"), "x").unwrap();

    for name in ["../secret.txt", "..", "", "a/b", "a\\b"] {
        let err = storage.read(name).await.unwrap_err();
        assert_eq!(err.kind(), std::io::ErrorKind::InvalidInput, "{name:?}");
    }
    assert!(storage.delete("../secret.txt").await.is_err());
    assert!(dir.path().join("secret.txt").exists());
}

#[tokio::test]
async fn test_saved_name_never_escapes_directory() {
    let dir = TempDir::new().unwrap();
    let storage = LocalFileStorage::new(dir.path()).await.unwrap();

    let stored = storage.save(b"x", "../../evil name.jpg").await.unwrap();
    assert!(!stored.contains('/'));
    assert!(stored.ends_with("_evil_name.jpg"));
}
