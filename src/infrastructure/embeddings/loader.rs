use std::collections::HashMap;
use std::path::Path;

use anyhow::{Context, Result};
use tracing::warn;

use crate::services::similarity::EmbeddingTable;

/// Load a whitespace-separated `word v1 v2 ... vn` vector file (§6 Input 2).
/// `path: None`, or a path that can't be read, yields an empty vocabulary
/// (§7 "Path empty or unreadable → Proceed with empty vocabulary; similarity
/// falls back to identity/sense rules only.").
///
/// # Errors
/// Returns an error if the file is readable but a line's dimension count
/// disagrees with the first line read.
pub fn load_vectors(path: Option<&Path>) -> Result<EmbeddingTable> {
    let Some(path) = path else {
        return Ok(EmbeddingTable::empty());
    };

    let text = match std::fs::read_to_string(path) {
        Ok(text) => text,
        Err(err) => {
            warn!(path = %path.display(), error = %err, "vector file unreadable; proceeding with empty vocabulary");
            return Ok(EmbeddingTable::empty());
        }
    };

    let mut vectors = HashMap::new();
    let mut dim = None;

    for (line_no, line) in text.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() {
            continue;
        }
        let mut fields = line.split_whitespace();
        let word = fields
            .next()
            .with_context(|| format!("empty vector line {} in {}", line_no + 1, path.display()))?;
        let values: Vec<f64> = fields
            .map(str::parse)
            .collect::<std::result::Result<_, _>>()
            .with_context(|| format!("non-numeric vector component on line {} in {}", line_no + 1, path.display()))?;

        match dim {
            None => dim = Some(values.len()),
            Some(d) if d != values.len() => {
                anyhow::bail!(
                    "vector dimension mismatch on line {} in {}: expected {d}, got {}",
                    line_no + 1,
                    path.display(),
                    values.len()
                );
            }
            Some(_) => {}
        }

        vectors.insert(word.to_string(), values);
    }

    Ok(EmbeddingTable::new(vectors))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn none_path_yields_empty_vocabulary() {
        let table = load_vectors(None).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn parses_whitespace_separated_vectors() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hit 1.0 0.0 0.5").unwrap();
        writeln!(file, "boy 0.0 1.0 0.2").unwrap();
        file.flush().unwrap();

        let table = load_vectors(Some(file.path())).unwrap();
        assert_eq!(table.len(), 2);
        assert_eq!(table.get("hit"), Some(&vec![1.0, 0.0, 0.5]));
    }

    #[test]
    fn rejects_inconsistent_dimensions() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hit 1.0 0.0").unwrap();
        writeln!(file, "boy 0.0 1.0 0.2").unwrap();
        file.flush().unwrap();

        assert!(load_vectors(Some(file.path())).is_err());
    }

    #[test]
    fn unreadable_path_yields_empty_vocabulary() {
        let table = load_vectors(Some(Path::new("/nonexistent/does-not-exist.vec"))).unwrap();
        assert!(table.is_empty());
    }

    #[test]
    fn skips_blank_lines() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "hit 1.0 0.0").unwrap();
        writeln!(file).unwrap();
        writeln!(file, "boy 0.0 1.0").unwrap();
        file.flush().unwrap();

        let table = load_vectors(Some(file.path())).unwrap();
        assert_eq!(table.len(), 2);
    }
}
