//! Shared helpers for the integration suite.

use arbor::path::AbsolutePath;
use arbor::store::NamespaceStore;

pub fn abs(s: &str) -> AbsolutePath {
    s.parse().unwrap()
}

/// Build a store pre-populated with directories and empty files.
pub fn store_with(directories: &[&str], files: &[&str]) -> NamespaceStore {
    let store = NamespaceStore::new();
    for dir in directories {
        store.make_directory(&abs(dir)).unwrap();
    }
    for file in files {
        store.create_file(&abs(file)).unwrap();
    }
    store
}
