//! MIME utilities for upload validation

use std::path::Path;

/// Returns whether the file at `path` looks like JSON content, judged by its
/// extension.
pub fn is_json_file(path: &Path) -> bool {
    mime_guess::from_path(path)
        .iter()
        .any(|mime| mime.essence_str() == "application/json")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn accepts_json_extensions() {
        assert!(is_json_file(Path::new("hosts.json")));
        assert!(is_json_file(Path::new("/tmp/HOSTS.JSON")));
    }

    #[test]
    fn rejects_other_extensions() {
        assert!(!is_json_file(Path::new("hosts.txt")));
        assert!(!is_json_file(Path::new("hosts")));
        assert!(!is_json_file(Path::new("hosts.csv")));
    }
}
