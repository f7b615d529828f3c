//! Asset resolution errors

use thiserror::Error;

/// Asset resolution and loading errors
#[derive(Error, Debug)]
pub enum AssetError {
    /// The resolver has no archives to search
    #[error("No asset archives registered")]
    NoArchivesConfigured,

    /// No registered archive holds the resource
    #[error("No such asset '{name}' (searched: {})", .archives.join(", "))]
    NoSuchResource {
        /// Resource name as it was looked up
        name: String,
        /// Description of every archive searched, in search order
        archives: Vec<String>,
    },

    /// The archive does not hold the resource at open time
    #[error("[{archive}] asset not found: {name}")]
    NotFound {
        /// Description of the archive that was asked
        archive: String,
        /// Resource name within the archive
        name: String,
    },

    /// The archive holds the resource but failed to open it
    #[error("[{archive}] failed to load asset '{name}': {source}")]
    LoadError {
        /// Description of the archive that was asked
        archive: String,
        /// Resource name within the archive
        name: String,
        /// Underlying I/O failure
        source: std::io::Error,
    },
}

impl AssetError {
    /// Resource name this error refers to, if any
    pub fn resource_name(&self) -> Option<&str> {
        match self {
            Self::NoArchivesConfigured => None,
            Self::NoSuchResource { name, .. }
            | Self::NotFound { name, .. }
            | Self::LoadError { name, .. } => Some(name),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_such_resource_lists_archives() {
        let err = AssetError::NoSuchResource {
            name: "missing.png".to_string(),
            archives: vec!["first".to_string(), "second".to_string()],
        };
        assert_eq!(
            err.to_string(),
            "No such asset 'missing.png' (searched: first, second)"
        );
        assert_eq!(err.resource_name(), Some("missing.png"));
    }

    #[test]
    fn test_load_error_exposes_source() {
        use std::error::Error as _;

        let err = AssetError::LoadError {
            archive: "fs".to_string(),
            name: "a.obj".to_string(),
            source: std::io::Error::new(std::io::ErrorKind::PermissionDenied, "denied"),
        };
        assert!(err.source().is_some());
        assert!(err.to_string().contains("denied"));
    }

    #[test]
    fn test_no_archives_has_no_name() {
        assert_eq!(AssetError::NoArchivesConfigured.resource_name(), None);
    }
}
