//! Synthetic entry modules.
//!
//! A build starts from a tiny ES module that imports exactly the requested
//! symbols from the compiled library entry and re-exports them, so the
//! bundler keeps those symbols and nothing else reachable only through the
//! library's index.

use std::fs::OpenOptions;
use std::io::Write;
use std::path::{Path, PathBuf};
use std::time::{SystemTime, UNIX_EPOCH};

use crate::{Error, Result};

const CREATE_ATTEMPTS: usize = 8;

/// Source of the synthetic entry for `symbols`.
///
/// Duplicate names are dropped, keeping the first occurrence. An empty list
/// is rejected. Names are not validated further: a misspelled symbol
/// surfaces as a bundler resolution error.
pub fn entry_source(library_entry: &Path, symbols: &[String]) -> Result<String> {
    let mut unique: Vec<&str> = Vec::with_capacity(symbols.len());
    for symbol in symbols {
        let symbol = symbol.trim();
        if !symbol.is_empty() && !unique.contains(&symbol) {
            unique.push(symbol);
        }
    }
    if unique.is_empty() {
        return Err(Error::InvalidInput(
            "at least one symbol name is required".to_string(),
        ));
    }

    let specifier = serde_json::to_string(&library_entry.to_string_lossy())?;
    let names = unique.join(", ");
    Ok(format!(
        "import {{ {names} }} from {specifier};\nexport const used = {{ {names} }};\n"
    ))
}

/// A synthesized entry file, removed when dropped.
///
/// Removal happens on every exit path of the owning build, including early
/// returns on bundler errors and futures dropped on interrupt.
#[derive(Debug)]
pub struct TempEntry {
    path: PathBuf,
}

impl TempEntry {
    /// Write the entry for `symbols` into the system temp directory.
    pub fn create(library_entry: &Path, symbols: &[String]) -> Result<Self> {
        Self::create_in(&std::env::temp_dir(), library_entry, symbols)
    }

    /// Write the entry for `symbols` into `dir`.
    ///
    /// The file name combines a millisecond timestamp and a random suffix and
    /// is created exclusively, so an existing file is never overwritten.
    pub fn create_in(dir: &Path, library_entry: &Path, symbols: &[String]) -> Result<Self> {
        let source = entry_source(library_entry, symbols)?;
        let millis = SystemTime::now()
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_millis())
            .unwrap_or_default();

        let mut last_error = None;
        for _ in 0..CREATE_ATTEMPTS {
            let suffix = uuid::Uuid::new_v4().simple().to_string();
            let path = dir.join(format!("shakeout-entry-{millis}-{}.mjs", &suffix[..12]));

            match OpenOptions::new().write(true).create_new(true).open(&path) {
                Ok(mut file) => {
                    // Guard first so a failed write still cleans up.
                    let entry = TempEntry { path };
                    file.write_all(source.as_bytes())?;
                    tracing::debug!(path = %entry.path.display(), symbols = symbols.len(), "entry synthesized");
                    return Ok(entry);
                }
                Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {
                    last_error = Some(err);
                }
                Err(err) => return Err(err.into()),
            }
        }

        Err(last_error
            .map(Error::Io)
            .unwrap_or_else(|| Error::InvalidInput("could not create entry file".into())))
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl Drop for TempEntry {
    fn drop(&mut self) {
        match std::fs::remove_file(&self.path) {
            Ok(()) => tracing::trace!(path = %self.path.display(), "entry removed"),
            Err(err) if err.kind() == std::io::ErrorKind::NotFound => {}
            Err(err) => {
                tracing::warn!(path = %self.path.display(), error = %err, "failed to remove entry")
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn names(list: &[&str]) -> Vec<String> {
        list.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn source_imports_and_reexports() {
        let source = entry_source(Path::new("/pkg/es6/index.js"), &names(&["Line", "Area"])).unwrap();
        assert_eq!(
            source,
            "import { Line, Area } from \"/pkg/es6/index.js\";\nexport const used = { Line, Area };\n"
        );
    }

    #[test]
    fn duplicates_are_tolerated() {
        let source = entry_source(Path::new("/lib.js"), &names(&["A", "B", "A"])).unwrap();
        assert!(source.starts_with("import { A, B } from"));
    }

    #[test]
    fn empty_symbol_list_is_rejected() {
        let err = entry_source(Path::new("/lib.js"), &[]).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));

        let err = entry_source(Path::new("/lib.js"), &names(&["  "])).unwrap_err();
        assert!(matches!(err, Error::InvalidInput(_)));
    }

    #[test]
    fn rejected_input_writes_no_file() {
        let dir = TempDir::new().unwrap();
        assert!(TempEntry::create_in(dir.path(), Path::new("/lib.js"), &[]).is_err());
        assert_eq!(std::fs::read_dir(dir.path()).unwrap().count(), 0);
    }

    #[test]
    fn entry_file_is_removed_on_drop() {
        let dir = TempDir::new().unwrap();
        let entry = TempEntry::create_in(dir.path(), Path::new("/lib.js"), &names(&["A"])).unwrap();
        let path = entry.path().to_path_buf();

        assert!(path.exists());
        assert_eq!(path.extension().unwrap(), "mjs");
        assert!(std::fs::read_to_string(&path).unwrap().contains("export const used"));

        drop(entry);
        assert!(!path.exists());
    }

    #[test]
    fn concurrent_entries_get_distinct_files() {
        let dir = TempDir::new().unwrap();
        let a = TempEntry::create_in(dir.path(), Path::new("/lib.js"), &names(&["A"])).unwrap();
        let b = TempEntry::create_in(dir.path(), Path::new("/lib.js"), &names(&["A"])).unwrap();
        assert_ne!(a.path(), b.path());
    }
}
