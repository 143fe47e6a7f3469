use crate::error::OrganizeError;
use std::path::Path;

pub fn validate_directory_exists(path: &Path) -> Result<(), OrganizeError> {
    if !path.exists() {
        return Err(OrganizeError::SourceNotFound(path.to_path_buf()));
    }
    if !path.is_dir() {
        return Err(OrganizeError::NotADirectory(path.to_path_buf()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_validate_missing_directory() {
        let temp_dir = TempDir::new().unwrap();
        let missing = temp_dir.path().join("missing");

        let err = validate_directory_exists(&missing).unwrap_err();
        assert!(matches!(err, OrganizeError::SourceNotFound(_)));
    }

    #[test]
    fn test_validate_file_is_not_directory() {
        let temp_dir = TempDir::new().unwrap();
        let file_path = temp_dir.path().join("photo.jpg");
        std::fs::write(&file_path, "x").unwrap();

        let err = validate_directory_exists(&file_path).unwrap_err();
        assert!(matches!(err, OrganizeError::NotADirectory(_)));
    }
}
