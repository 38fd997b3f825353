//! Authors file parsing.
//!
//! One author per line as `Name` or `Name, PID`. Blank lines and lines
//! starting with `#` are ignored.
//!
//! ```text
//! # Security group
//! Jane Doe, 12/3456
//! John Roe
//! ```

use std::path::{Path, PathBuf};

use crate::models::AuthorEntry;

/// Errors reading the authors file
#[derive(Debug, thiserror::Error)]
pub enum AuthorsError {
    #[error("Failed to read authors file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Parse authors from file contents
pub fn parse_authors(content: &str) -> Vec<AuthorEntry> {
    content
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !line.starts_with('#'))
        .filter_map(|line| {
            let mut parts = line.split(',').map(str::trim);
            let name = parts.next().filter(|n| !n.is_empty())?;
            let pid = parts.next().filter(|p| !p.is_empty());

            Some(AuthorEntry {
                name: name.to_string(),
                pid: pid.map(str::to_string),
            })
        })
        .collect()
}

/// Load authors from a file
pub fn load_authors(path: &Path) -> Result<Vec<AuthorEntry>, AuthorsError> {
    let content = std::fs::read_to_string(path).map_err(|source| AuthorsError::Io {
        path: path.to_path_buf(),
        source,
    })?;

    let authors = parse_authors(&content);
    tracing::info!("Loaded {} authors from {}", authors.len(), path.display());

    Ok(authors)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn test_parse_authors() {
        let content = "\
# Research group
Jane Doe, 12/3456

John Roe
  Alice Smith ,  s/AliceSmith
, 99/999
Bob Jones,
";
        let authors = parse_authors(content);

        assert_eq!(
            authors,
            vec![
                AuthorEntry::new("Jane Doe").with_pid("12/3456"),
                AuthorEntry::new("John Roe"),
                AuthorEntry::new("Alice Smith").with_pid("s/AliceSmith"),
                AuthorEntry::new("Bob Jones"),
            ]
        );
    }

    #[test]
    fn test_parse_authors_only_comments() {
        assert!(parse_authors("# nothing here\n\n   \n").is_empty());
    }

    #[test]
    fn test_load_authors_file() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("authors.txt");
        std::fs::write(&path, "Jane Doe, 12/3456\n# skip\nJohn Roe\n").unwrap();

        let authors = load_authors(&path).unwrap();
        assert_eq!(authors.len(), 2);
        assert_eq!(authors[0].pid.as_deref(), Some("12/3456"));
        assert_eq!(authors[1].pid, None);
    }

    #[test]
    fn test_load_authors_missing_file() {
        let result = load_authors(Path::new("/nonexistent/authors.txt"));
        assert!(matches!(result, Err(AuthorsError::Io { .. })));
    }
}
