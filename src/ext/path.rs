use std::path::Path;

use crate::error::{Error, Result};

/// Extension trait for Path to provide convenient string conversion methods
pub trait PathExt {
    /// Converts a path to a string slice, returning an error if the path contains invalid Unicode characters.
    ///
    /// # Examples
    /// ```
    /// use plates::ext::PathExt;
    /// use std::path::Path;
    ///
    /// let path = Path::new("views/home.phtml");
    /// assert_eq!(path.to_str_checked().unwrap(), "views/home.phtml");
    /// ```
    fn to_str_checked(&self) -> Result<&str>;

    /// Returns the file extension as UTF-8, if there is one.
    ///
    /// # Examples
    /// ```
    /// use plates::ext::PathExt;
    /// use std::path::Path;
    ///
    /// assert_eq!(Path::new("img/logo.png").file_extension(), Some("png"));
    /// assert_eq!(Path::new("users/list").file_extension(), None);
    /// ```
    fn file_extension(&self) -> Option<&str>;
}

impl PathExt for Path {
    fn to_str_checked(&self) -> Result<&str> {
        self.to_str().ok_or_else(|| {
            Error::Other(anyhow::anyhow!(
                "Path '{}' contains invalid Unicode characters",
                self.display()
            ))
        })
    }

    fn file_extension(&self) -> Option<&str> {
        self.extension().and_then(|ext| ext.to_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::Path;

    #[test]
    fn test_to_str_checked_valid() {
        let path = Path::new("valid_path");
        assert_eq!(path.to_str_checked().unwrap(), "valid_path");
    }

    #[test]
    fn test_file_extension() {
        assert_eq!(Path::new("layout.phtml").file_extension(), Some("phtml"));
        assert_eq!(Path::new("archive.tar.gz").file_extension(), Some("gz"));
        assert_eq!(Path::new(".hidden").file_extension(), None);
    }
}
