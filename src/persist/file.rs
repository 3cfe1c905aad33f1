use std::fmt;
use std::fs;
use std::io;
use std::path::Path;

use serde_json::Value;

use crate::autocat::{load_autocat_from_element, AutoCat};

#[derive(Debug)]
pub enum PersistError {
    Io(io::Error),
    Json(serde_json::Error),
}

impl fmt::Display for PersistError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            PersistError::Io(err) => write!(f, "autocat file error: {}", err),
            PersistError::Json(err) => write!(f, "autocat document malformed: {}", err),
        }
    }
}

impl std::error::Error for PersistError {}

impl From<io::Error> for PersistError {
    fn from(err: io::Error) -> Self {
        PersistError::Io(err)
    }
}

impl From<serde_json::Error> for PersistError {
    fn from(err: serde_json::Error) -> Self {
        PersistError::Json(err)
    }
}

/// Result of loading a configuration file: the schemes that loaded, and
/// how many elements were skipped as unrecognized.
pub struct LoadedAutoCats {
    pub autocats: Vec<Box<dyn AutoCat>>,
    pub skipped: usize,
}

/// Write every scheme's element into one pretty-printed JSON array.
pub fn save_autocats(path: &Path, autocats: &[Box<dyn AutoCat>]) -> Result<(), PersistError> {
    let elements: Vec<Value> = autocats
        .iter()
        .map(|autocat| autocat.write_to_element())
        .collect();
    let body = serde_json::to_string_pretty(&Value::Array(elements))?;
    fs::write(path, body)?;
    Ok(())
}

/// Read a configuration file back. Elements with an unrecognized tag are
/// skipped and counted, so one stray entry never loses the rest.
pub fn load_autocats(path: &Path) -> Result<LoadedAutoCats, PersistError> {
    let body = fs::read_to_string(path)?;
    let elements: Vec<Value> = serde_json::from_str(&body)?;

    let mut autocats = Vec::new();
    let mut skipped = 0;
    for element in &elements {
        match load_autocat_from_element(element) {
            Some(autocat) => autocats.push(autocat),
            None => skipped += 1,
        }
    }

    if skipped > 0 {
        log::warn!(
            "loaded {} autocats from {}, skipped {} unrecognized",
            autocats.len(),
            path.display(),
            skipped
        );
    }

    Ok(LoadedAutoCats { autocats, skipped })
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;
    use crate::autocat::{create, AutoCatKind};

    #[test]
    fn save_then_load_preserves_everything() {
        let autocats: Vec<Box<dyn AutoCat>> = vec![
            create(AutoCatKind::Genre, "genres"),
            create(AutoCatKind::UserScore, "scores"),
            create(AutoCatKind::Name, "letters"),
        ];

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autocats.json");
        save_autocats(&path, &autocats).unwrap();

        let loaded = load_autocats(&path).unwrap();

        assert_eq!(loaded.skipped, 0);
        assert_eq!(loaded.autocats.len(), 3);
        for (original, loaded) in autocats.iter().zip(&loaded.autocats) {
            assert_eq!(original.kind(), loaded.kind());
            assert_eq!(original.name(), loaded.name());
            assert_eq!(original.write_to_element(), loaded.write_to_element());
        }
    }

    #[test]
    fn unrecognized_elements_are_counted_not_fatal() {
        let document = json!([
            { "AutoCatGenre": { "Name": "genres" } },
            { "AutoCatFranchise": { "Name": "future" } },
            { "AutoCatYear": { "Name": "years" } },
        ]);

        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autocats.json");
        std::fs::write(&path, document.to_string()).unwrap();

        let loaded = load_autocats(&path).unwrap();

        assert_eq!(loaded.skipped, 1);
        assert_eq!(loaded.autocats.len(), 2);
        assert_eq!(loaded.autocats[0].name(), "genres");
        assert_eq!(loaded.autocats[1].name(), "years");
    }

    #[test]
    fn missing_file_is_an_io_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = load_autocats(&dir.path().join("absent.json"));

        assert!(matches!(result, Err(PersistError::Io(_))));
    }

    #[test]
    fn non_array_document_is_a_json_error() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("autocats.json");
        std::fs::write(&path, "{}").unwrap();

        let result = load_autocats(&path);

        assert!(matches!(result, Err(PersistError::Json(_))));
    }
}
