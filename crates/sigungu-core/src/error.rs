use std::fmt;
use std::path::PathBuf;

use crate::lock::LockError;

/// Machine-readable error codes for scripts and agents driving `sgg`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    NotInitialized,
    ConfigParseError,
    DatasetMissing,
    DatasetParseError,
    InvalidFeature,
    DistrictNotFound,
    AmbiguousDistrict,
    StateWriteFailed,
    LockContention,
    FileReadFailed,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::NotInitialized => "E1001",
            Self::ConfigParseError => "E1002",
            Self::DatasetMissing => "E1003",
            Self::DatasetParseError => "E2001",
            Self::InvalidFeature => "E2002",
            Self::DistrictNotFound => "E3001",
            Self::AmbiguousDistrict => "E3002",
            Self::StateWriteFailed => "E5001",
            Self::LockContention => "E5002",
            Self::FileReadFailed => "E5003",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::NotInitialized => "Project not initialized",
            Self::ConfigParseError => "Config file parse error",
            Self::DatasetMissing => "District dataset not found",
            Self::DatasetParseError => "District dataset is not valid JSON",
            Self::InvalidFeature => "District feature is missing code or name",
            Self::DistrictNotFound => "District not found",
            Self::AmbiguousDistrict => "Ambiguous district name",
            Self::StateWriteFailed => "State file write failed",
            Self::LockContention => "Lock contention",
            Self::FileReadFailed => "File read failed",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::NotInitialized => Some("Run `sgg init` to initialize this directory."),
            Self::ConfigParseError => Some("Fix syntax in .sigungu/config.toml and retry."),
            Self::DatasetMissing => {
                Some("Point `data.districts` in .sigungu/config.toml or `--dataset` at a GeoJSON file.")
            }
            Self::DatasetParseError => Some("Check that the dataset is a GeoJSON FeatureCollection."),
            Self::InvalidFeature => {
                Some("Every feature needs `properties.code` and `properties.name`; fix the dataset.")
            }
            Self::DistrictNotFound => Some("Use the full display name, e.g. \"대구광역시 군위군\"."),
            Self::AmbiguousDistrict => Some("Prefix the district with its province name or use its code."),
            Self::StateWriteFailed => Some("Check disk space and write permissions."),
            Self::LockContention => Some("Retry after the other `sgg` process releases its lock."),
            Self::FileReadFailed => Some("Check that the file exists and is readable."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

/// Feature property that failed ingestion.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FeatureField {
    Code,
    Name,
    Properties,
}

impl fmt::Display for FeatureField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Code => "properties.code",
            Self::Name => "properties.name",
            Self::Properties => "properties",
        })
    }
}

/// Errors surfaced by `sigungu-core`.
///
/// Unknown provinces and malformed persisted snapshots are not errors: the
/// former degrades the display name, the latter restores as empty state.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("{}: feature #{index} has missing or invalid {field}", ErrorCode::InvalidFeature)]
    InvalidFeature { index: usize, field: FeatureField },

    #[error("{}: {source}", ErrorCode::DatasetParseError)]
    Dataset {
        #[from]
        source: serde_json::Error,
    },

    #[error("{}: dataset {} does not exist", ErrorCode::DatasetMissing, .path.display())]
    DatasetMissing { path: PathBuf },

    #[error("{}: {} ({source})", ErrorCode::StateWriteFailed, .path.display())]
    Storage {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error("{}: {} ({source})", ErrorCode::FileReadFailed, .path.display())]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },

    #[error(transparent)]
    Lock(#[from] LockError),

    #[error("{}: {} ({source})", ErrorCode::ConfigParseError, .path.display())]
    Config {
        path: PathBuf,
        source: toml::de::Error,
    },

    #[error("{}: no district matches '{query}'", ErrorCode::DistrictNotFound)]
    DistrictNotFound { query: String },

    #[error("{}: '{query}' matches {} districts: {}", ErrorCode::AmbiguousDistrict, .candidates.len(), .candidates.join(", "))]
    AmbiguousDistrict {
        query: String,
        candidates: Vec<String>,
    },
}

impl Error {
    /// Machine-readable code associated with this error.
    #[must_use]
    pub const fn code(&self) -> ErrorCode {
        match self {
            Self::InvalidFeature { .. } => ErrorCode::InvalidFeature,
            Self::Dataset { .. } => ErrorCode::DatasetParseError,
            Self::DatasetMissing { .. } => ErrorCode::DatasetMissing,
            Self::Storage { .. } => ErrorCode::StateWriteFailed,
            Self::Read { .. } => ErrorCode::FileReadFailed,
            Self::Lock(err) => err.code(),
            Self::Config { .. } => ErrorCode::ConfigParseError,
            Self::DistrictNotFound { .. } => ErrorCode::DistrictNotFound,
            Self::AmbiguousDistrict { .. } => ErrorCode::AmbiguousDistrict,
        }
    }

    /// Optional remediation hint for operators and agents.
    #[must_use]
    pub const fn hint(&self) -> Option<&'static str> {
        self.code().hint()
    }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::{Error, ErrorCode, FeatureField};
    use std::collections::HashSet;

    #[test]
    fn all_codes_are_unique() {
        let all = [
            ErrorCode::NotInitialized,
            ErrorCode::ConfigParseError,
            ErrorCode::DatasetMissing,
            ErrorCode::DatasetParseError,
            ErrorCode::InvalidFeature,
            ErrorCode::DistrictNotFound,
            ErrorCode::AmbiguousDistrict,
            ErrorCode::StateWriteFailed,
            ErrorCode::LockContention,
            ErrorCode::FileReadFailed,
        ];

        let mut seen = HashSet::new();
        for code in all {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        let code = ErrorCode::InvalidFeature.code();
        assert_eq!(code.len(), 5);
        assert!(code.starts_with('E'));
        assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
    }

    #[test]
    fn invalid_feature_message_names_the_field() {
        let err = Error::InvalidFeature {
            index: 3,
            field: FeatureField::Name,
        };
        let text = err.to_string();
        assert!(text.starts_with("E2002"));
        assert!(text.contains("#3"));
        assert!(text.contains("properties.name"));
        assert_eq!(err.code(), ErrorCode::InvalidFeature);
        assert!(err.hint().is_some());
    }

    #[test]
    fn ambiguous_district_lists_candidates() {
        let err = Error::AmbiguousDistrict {
            query: "중구".to_string(),
            candidates: vec!["서울특별시 중구".to_string(), "부산광역시 중구".to_string()],
        };
        let text = err.to_string();
        assert!(text.contains("2 districts"));
        assert!(text.contains("부산광역시 중구"));
    }

    #[test]
    fn read_and_write_failures_have_distinct_codes() {
        let read = Error::Read {
            path: "sigungu.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        let write = Error::Storage {
            path: ".sigungu/state.json".into(),
            source: std::io::Error::from(std::io::ErrorKind::PermissionDenied),
        };
        assert_eq!(read.code(), ErrorCode::FileReadFailed);
        assert!(read.to_string().starts_with("E5003"));
        assert_eq!(write.code(), ErrorCode::StateWriteFailed);
        assert!(write.to_string().starts_with("E5001"));
    }
}
