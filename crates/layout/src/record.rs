//! Per-file input records as produced by the repository analyzer.

use serde::{Deserialize, Serialize};

/// Structured smell flags. Carried through the layout untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Smells {
    #[serde(default)]
    pub long_file: bool,
    /// Functions longer than 50 lines.
    #[serde(default)]
    pub long_functions: u32,
    /// Indent levels beyond the fourth.
    #[serde(default)]
    pub deep_nesting: u32,
    /// Lines longer than 120 characters.
    #[serde(default)]
    pub long_lines: u32,
    #[serde(default)]
    pub low_comments: bool,
}

/// One source file of the analyzed repository.
///
/// Missing numeric fields take explicit defaults: `commits` is 1, `bugs` and
/// `smell_score` are 0. A stored `commits` of 0 is kept as-is; use
/// [`FileRecord::effective_commits`] wherever a building size is derived.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FileRecord {
    /// Repository-relative path; unique key.
    pub path: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub extension: String,
    #[serde(default)]
    pub directory: String,
    #[serde(default)]
    pub loc: u64,
    #[serde(default = "default_commits")]
    pub commits: u32,
    /// Number of bug-fix commits touching the file.
    #[serde(default)]
    pub bugs: u32,
    /// 0..=100.
    #[serde(default)]
    pub smell_score: u32,
    #[serde(default)]
    pub smells: Smells,
}

fn default_commits() -> u32 {
    1
}

impl FileRecord {
    /// Minimal record for a path, every metric at its default.
    pub fn new(path: impl Into<String>) -> Self {
        let path = path.into();
        let name = path.rsplit('/').next().unwrap_or(&path).to_string();
        let extension = name
            .trim_start_matches('.')
            .rsplit_once('.')
            .map(|(_, ext)| format!(".{}", ext.to_lowercase()))
            .unwrap_or_else(|| "none".to_string());
        Self {
            name,
            extension,
            directory: path.rsplit_once('/').map(|(dir, _)| dir.to_string()).unwrap_or_default(),
            path,
            loc: 0,
            commits: default_commits(),
            bugs: 0,
            smell_score: 0,
            smells: Smells::default(),
        }
    }

    pub fn with_commits(mut self, commits: u32) -> Self {
        self.commits = commits;
        self
    }

    pub fn with_bugs(mut self, bugs: u32) -> Self {
        self.bugs = bugs;
        self
    }

    pub fn with_smell_score(mut self, smell_score: u32) -> Self {
        self.smell_score = smell_score;
        self
    }

    pub fn with_loc(mut self, loc: u64) -> Self {
        self.loc = loc;
        self
    }

    /// Commit count used for sizing: zero counts as one so every building stays visible.
    pub fn effective_commits(&self) -> u32 {
        self.commits.max(1)
    }

    /// Smell score clamped into 0..=100.
    pub fn clamped_smell_score(&self) -> u32 {
        self.smell_score.min(100)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_fields_take_documented_defaults() {
        let record: FileRecord = serde_json::from_str(r#"{"path": "src/main.rs"}"#).unwrap();
        assert_eq!(record.commits, 1);
        assert_eq!(record.bugs, 0);
        assert_eq!(record.smell_score, 0);
        assert_eq!(record.smells, Smells::default());
    }

    #[test]
    fn explicit_zero_commits_is_kept_but_sized_as_one() {
        let record: FileRecord =
            serde_json::from_str(r#"{"path": "a.rs", "commits": 0}"#).unwrap();
        assert_eq!(record.commits, 0);
        assert_eq!(record.effective_commits(), 1);
    }

    #[test]
    fn new_derives_name_extension_and_directory() {
        let record = FileRecord::new("src/net/Fetch.RS");
        assert_eq!(record.name, "Fetch.RS");
        assert_eq!(record.extension, ".rs");
        assert_eq!(record.directory, "src/net");
        assert_eq!(FileRecord::new("Makefile").extension, "none");
    }

    #[test]
    fn dotfiles_have_no_extension() {
        assert_eq!(FileRecord::new(".gitignore").extension, "none");
        assert_eq!(FileRecord::new("config/.env").extension, "none");
        assert_eq!(FileRecord::new(".eslintrc.json").extension, ".json");
    }

    #[test]
    fn smell_score_is_clamped() {
        assert_eq!(FileRecord::new("a.rs").with_smell_score(250).clamped_smell_score(), 100);
    }
}
