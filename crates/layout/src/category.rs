//! Code vs test classification of file paths.

use serde::{Deserialize, Serialize};

/// Substrings that mark a path as test code (matched against the lowercased path).
pub const TEST_PATH_MARKERS: &[&str] = &[
    "test", "spec", "_test.", ".test.", "tests/", "spec/", "__tests__", "testing", ".spec.", "_spec.",
];

/// Which quarter of the city a file is built in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum FileCategory {
    Code,
    Test,
}

impl FileCategory {
    /// Classify a path. Any marker match makes it a test file.
    pub fn of(path: &str) -> Self {
        let lower = path.to_lowercase();
        if TEST_PATH_MARKERS.iter().any(|marker| lower.contains(marker)) {
            Self::Test
        } else {
            Self::Code
        }
    }

    pub fn is_test(self) -> bool {
        self == Self::Test
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Code => "code",
            Self::Test => "test",
        }
    }
}
