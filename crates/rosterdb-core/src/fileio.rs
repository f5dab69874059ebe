use crate::{
    Error,
    db::{Catalog, LoadReport, Store, load_str},
};
use std::{
    fs::{self, OpenOptions},
    io::{BufWriter, Write},
    path::{Path, PathBuf},
};
use thiserror::Error as ThisError;
use tracing::debug;

///
/// FileError
///

#[derive(Debug, ThisError)]
#[remain::sorted]
pub enum FileError {
    #[error("base name is blank")]
    BlankName,

    #[error(transparent)]
    Io(#[from] std::io::Error),

    #[error("snapshot '{path}' is not valid UTF-8")]
    NotUtf8 { path: PathBuf },
}

/// Write snapshot text under `dir`, never overwriting. The directory tree
/// is created if absent; one trailing `.json` is stripped from the base
/// name (case-insensitive); a taken name gets ` (1)`, ` (2)`, … before the
/// extension.
pub fn write_json(dir: &Path, base_name: &str, text: &str) -> Result<PathBuf, FileError> {
    let stem = stem(base_name)?;
    fs::create_dir_all(dir)?;

    for attempt in 0u32.. {
        let file_name = if attempt == 0 {
            format!("{stem}.json")
        } else {
            format!("{stem} ({attempt}).json")
        };
        let path = dir.join(file_name);

        // create_new is the whole collision check: losing a race surfaces
        // as AlreadyExists and moves to the next suffix.
        match OpenOptions::new().write(true).create_new(true).open(&path) {
            Ok(file) => {
                let mut writer = BufWriter::new(file);
                writer.write_all(text.as_bytes())?;
                writer.flush()?;
                debug!(path = %path.display(), bytes = text.len(), "snapshot written");

                return Ok(path);
            }
            Err(err) if err.kind() == std::io::ErrorKind::AlreadyExists => {}
            Err(err) => return Err(err.into()),
        }
    }

    unreachable!("suffix counter exhausted")
}

fn stem(base_name: &str) -> Result<&str, FileError> {
    let trimmed = base_name.trim();
    if trimmed.is_empty() {
        return Err(FileError::BlankName);
    }

    let stripped = match trimmed.len().checked_sub(5).and_then(|at| trimmed.get(at..)) {
        Some(tail) if tail.eq_ignore_ascii_case(".json") => &trimmed[..trimmed.len() - 5],
        _ => trimmed,
    };

    if stripped.is_empty() {
        return Err(FileError::BlankName);
    }

    Ok(stripped)
}

/// Read and load one snapshot file. Malformed JSON is fatal for the file;
/// per-record failures land in the report.
pub fn read_json(path: &Path, store: &mut Store, catalog: &Catalog) -> Result<LoadReport, Error> {
    let bytes = fs::read(path).map_err(FileError::from)?;
    let text = String::from_utf8(bytes).map_err(|_| FileError::NotUtf8 {
        path: path.to_path_buf(),
    })?;

    Ok(load_str(store, &text, catalog)?)
}

///
/// TESTS
///

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn collisions_get_numbered_suffixes() {
        let dir = tempdir().unwrap();

        let first = write_json(dir.path(), "report", "one").unwrap();
        let second = write_json(dir.path(), "report", "two").unwrap();
        let third = write_json(dir.path(), "report.json", "three").unwrap();

        assert_eq!(first.file_name().unwrap(), "report.json");
        assert_eq!(second.file_name().unwrap(), "report (1).json");
        assert_eq!(third.file_name().unwrap(), "report (2).json");

        assert_eq!(fs::read_to_string(&first).unwrap(), "one");
        assert_eq!(fs::read_to_string(&second).unwrap(), "two");
        assert_eq!(fs::read_to_string(&third).unwrap(), "three");
    }

    #[test]
    fn extension_strip_is_case_insensitive() {
        let dir = tempdir().unwrap();

        let path = write_json(dir.path(), "Backup.JSON", "{}").unwrap();

        assert_eq!(path.file_name().unwrap(), "Backup.json");
    }

    #[test]
    fn missing_directories_are_created() {
        let dir = tempdir().unwrap();
        let nested = dir.path().join("a/b/c");

        let path = write_json(&nested, "snap", "{}").unwrap();

        assert!(path.starts_with(&nested));
        assert!(path.exists());
    }

    #[test]
    fn blank_names_are_rejected() {
        let dir = tempdir().unwrap();

        assert!(matches!(
            write_json(dir.path(), "   ", "{}"),
            Err(FileError::BlankName)
        ));
        assert!(matches!(
            write_json(dir.path(), ".json", "{}"),
            Err(FileError::BlankName)
        ));
    }

    #[test]
    fn read_surfaces_parse_failures() {
        let dir = tempdir().unwrap();
        let path = write_json(dir.path(), "broken", "{\"models\":").unwrap();

        let mut store = Store::new();
        let catalog = Catalog::new();

        assert!(matches!(
            read_json(&path, &mut store, &catalog),
            Err(Error::Parse(_))
        ));
    }
}
