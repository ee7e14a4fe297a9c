use crate::extractor::DocumentExtractor;
use crate::models::{load_observations, ExtractionResult};
use crate::utils::{DocScanError, Result};
use log::{info, warn};
use std::fs;
use std::path::{Path, PathBuf};

/// Outcome for one OCR dump in a batch run.
#[derive(Debug)]
pub struct BatchEntry {
    pub path: PathBuf,
    pub outcome: std::result::Result<ExtractionResult, String>,
}

/// Runs extraction on every `*.json` OCR dump in `directory`, sorted by path.
/// Files that cannot be read or parsed are reported in their entry; only an
/// unreadable directory fails the whole batch.
pub fn batch_extract<P: AsRef<Path>>(directory: P, extractor: &DocumentExtractor) -> Result<Vec<BatchEntry>> {
    let dir = directory.as_ref();
    let entries = fs::read_dir(dir).map_err(|e| DocScanError::io(dir, e))?;
    info!("Processing OCR dumps in {}...", dir.display());

    let mut paths: Vec<PathBuf> = entries
        .filter_map(|entry| entry.ok().map(|e| e.path()))
        .filter(|path| path.is_file() && is_json(path))
        .collect();
    paths.sort();

    let results = paths
        .into_iter()
        .map(|path| {
            let outcome = match load_observations(&path) {
                Ok(observations) => Ok(extractor.extract(&observations)),
                Err(e) => {
                    warn!("Skipping {}: {}", path.display(), e);
                    Err(e.to_string())
                }
            };
            BatchEntry { path, outcome }
        })
        .collect();

    Ok(results)
}

fn is_json(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map_or(false, |ext| ext.eq_ignore_ascii_case("json"))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::DocumentType;
    use std::fs;

    const ID_CARD: &str = r#"[
        {"text": "Surname", "confidence": 0.98, "bounding_box": {"x": 0.10, "y": 0.80, "width": 0.15, "height": 0.04}},
        {"text": "Doe", "confidence": 0.95, "bounding_box": {"x": 0.30, "y": 0.80, "width": 0.10, "height": 0.04}}
    ]"#;

    #[test]
    fn test_batch_reports_each_file() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("b_card.json"), ID_CARD).unwrap();
        fs::write(dir.path().join("a_broken.json"), "{not json").unwrap();
        fs::write(dir.path().join("notes.txt"), "ignored").unwrap();
        fs::write(dir.path().join("c_empty.JSON"), "[]").unwrap();

        let entries = batch_extract(dir.path(), &DocumentExtractor::new()).unwrap();
        let names: Vec<String> = entries
            .iter()
            .map(|e| e.path.file_name().unwrap().to_string_lossy().into_owned())
            .collect();
        assert_eq!(names, vec!["a_broken.json", "b_card.json", "c_empty.JSON"]);

        assert!(entries[0].outcome.is_err());
        let card = entries[1].outcome.as_ref().unwrap();
        assert_eq!(card.document_type, DocumentType::IdCard);
        assert_eq!(card.fields[0].value.as_deref(), Some("DOE"));
        assert_eq!(entries[2].outcome.as_ref().unwrap().document_type, DocumentType::Unknown);
    }

    #[test]
    fn test_missing_directory_fails() {
        let result = batch_extract("/nonexistent/docscan/dumps", &DocumentExtractor::new());
        assert!(matches!(result, Err(DocScanError::Io { .. })));
    }
}
