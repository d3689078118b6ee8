//! Analyzed repository dataset: the JSON document the analyzer writes and the
//! city loads.

use std::fs;
use std::path::Path;

use layout::{FileCategory, FileRecord};
use serde::{Deserialize, Serialize};

use crate::error::{DatasetError, Result};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Dataset {
    #[serde(default)]
    pub repo_url: String,
    #[serde(default)]
    pub org: String,
    #[serde(default)]
    pub repo: String,
    #[serde(default)]
    pub total_files: usize,
    #[serde(default)]
    pub total_loc: u64,
    #[serde(default)]
    pub total_commits: u64,
    #[serde(default)]
    pub total_bugs: u64,
    #[serde(default)]
    pub files_with_bugs: usize,
    #[serde(default)]
    pub files: Vec<FileRecord>,
}

/// Summary shown next to the city.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DatasetStats {
    /// Highest commit count, at least 1.
    pub max_commits: u32,
    pub code_files: usize,
    pub test_files: usize,
    /// Sum of per-file bug-fix commits.
    pub total_bugs: u64,
}

impl Dataset {
    /// Build a dataset from analyzed files, computing every total.
    pub fn from_records(
        repo_url: impl Into<String>,
        org: impl Into<String>,
        repo: impl Into<String>,
        files: Vec<FileRecord>,
    ) -> Self {
        Self {
            repo_url: repo_url.into(),
            org: org.into(),
            repo: repo.into(),
            total_files: files.len(),
            total_loc: files.iter().map(|f| f.loc).sum(),
            total_commits: files.iter().map(|f| u64::from(f.commits)).sum(),
            total_bugs: files.iter().map(|f| u64::from(f.bugs)).sum(),
            files_with_bugs: files.iter().filter(|f| f.bugs > 0).count(),
            files,
        }
    }

    /// Parse a dataset document. Records missing `name`, `extension` or
    /// `directory` get them derived from their path.
    pub fn from_json_str(json: &str) -> Result<Self> {
        let mut dataset: Dataset = serde_json::from_str(json)?;
        for file in &mut dataset.files {
            fill_derived_fields(file);
        }
        Ok(dataset)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        if !path.exists() {
            return Err(DatasetError::MissingPath { path: path.to_path_buf() });
        }
        let json = fs::read_to_string(path).map_err(|e| DatasetError::io(path, e))?;
        let dataset = Self::from_json_str(&json)?;
        log::info!(
            "Loaded {} ({} files) from {}",
            dataset.title(),
            dataset.files.len(),
            path.display()
        );
        Ok(dataset)
    }

    pub fn save(&self, path: impl AsRef<Path>) -> Result<()> {
        let path = path.as_ref();
        let json = serde_json::to_string_pretty(self)?;
        fs::write(path, json).map_err(|e| DatasetError::io(path, e))
    }

    /// `org/repo` when known, otherwise the repository URL.
    pub fn title(&self) -> String {
        if self.org.is_empty() && self.repo.is_empty() {
            self.repo_url.clone()
        } else {
            format!("{}/{}", self.org, self.repo)
        }
    }

    pub fn stats(&self) -> DatasetStats {
        let test_files = self
            .files
            .iter()
            .filter(|f| FileCategory::of(&f.path).is_test())
            .count();
        DatasetStats {
            max_commits: self
                .files
                .iter()
                .map(FileRecord::effective_commits)
                .max()
                .unwrap_or(1),
            code_files: self.files.len() - test_files,
            test_files,
            total_bugs: self.files.iter().map(|f| u64::from(f.bugs)).sum(),
        }
    }

    /// One-line summary, noting when the building budget hides files.
    pub fn info_line(&self, max_buildings: usize) -> String {
        let mut line = format!(
            "{} files | {} LOC | {} changes",
            self.total_files, self.total_loc, self.total_commits
        );
        if self.total_files > max_buildings {
            line.push_str(&format!(" (showing top {max_buildings})"));
        }
        line
    }

    /// Files whose name contains `query`, ignoring case. An empty query matches nothing.
    pub fn search(&self, query: &str) -> Vec<&FileRecord> {
        if query.is_empty() {
            return Vec::new();
        }
        let needle = query.to_lowercase();
        self.files
            .iter()
            .filter(|f| f.name.to_lowercase().contains(&needle))
            .collect()
    }
}

fn fill_derived_fields(file: &mut FileRecord) {
    if !file.name.is_empty() && !file.extension.is_empty() && !file.directory.is_empty() {
        return;
    }
    let derived = FileRecord::new(file.path.clone());
    if file.name.is_empty() {
        file.name = derived.name;
    }
    if file.extension.is_empty() {
        file.extension = derived.extension;
    }
    if file.directory.is_empty() {
        file.directory = derived.directory;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const SAMPLE: &str = r#"{
        "repo_url": "https://github.com/google/gson",
        "org": "google",
        "repo": "gson",
        "total_files": 3,
        "total_loc": 1200,
        "total_commits": 42,
        "files": [
            { "path": "gson/src/main/java/Gson.java", "name": "Gson.java", "loc": 900, "commits": 30, "bugs": 4, "smell_score": 60 },
            { "path": "gson/src/test/java/GsonTest.java", "loc": 250, "commits": 10, "bugs": 1 },
            { "path": "README.sh", "loc": 50 }
        ]
    }"#;

    #[test]
    fn parses_with_defaults() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(dataset.files.len(), 3);
        let readme = &dataset.files[2];
        assert_eq!(readme.commits, 1);
        assert_eq!(readme.bugs, 0);
        assert_eq!(readme.smell_score, 0);
        assert_eq!(readme.name, "README.sh");
        assert_eq!(readme.extension, ".sh");
        assert_eq!(dataset.files[1].name, "GsonTest.java");
        assert_eq!(dataset.title(), "google/gson");
    }

    #[test]
    fn directory_is_derived_even_when_name_and_extension_are_given() {
        let json = r#"{ "files": [ { "path": "src/net/fetch.rs", "name": "fetch.rs", "extension": ".rs" } ] }"#;
        let dataset = Dataset::from_json_str(json).unwrap();
        let file = &dataset.files[0];
        assert_eq!(file.name, "fetch.rs");
        assert_eq!(file.extension, ".rs");
        assert_eq!(file.directory, "src/net");
    }

    #[test]
    fn malformed_json_is_an_error() {
        assert!(matches!(Dataset::from_json_str("{ nope"), Err(DatasetError::Json(_))));
    }

    #[test]
    fn stats_split_code_and_test() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        let stats = dataset.stats();
        assert_eq!(stats.max_commits, 30);
        assert_eq!(stats.code_files, 2);
        assert_eq!(stats.test_files, 1);
        assert_eq!(stats.total_bugs, 5);
    }

    #[test]
    fn info_line_mentions_budget_only_when_exceeded() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        assert_eq!(dataset.info_line(500), "3 files | 1200 LOC | 42 changes");
        assert_eq!(dataset.info_line(2), "3 files | 1200 LOC | 42 changes (showing top 2)");
    }

    #[test]
    fn search_ignores_case() {
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        let hits: Vec<_> = dataset.search("gSoN").iter().map(|f| f.path.as_str()).collect();
        assert_eq!(hits, vec!["gson/src/main/java/Gson.java", "gson/src/test/java/GsonTest.java"]);
        assert!(dataset.search("").is_empty());
        assert!(dataset.search("missing").is_empty());
    }

    #[test]
    fn from_records_computes_totals() {
        let files = vec![
            FileRecord::new("a.rs").with_loc(10).with_commits(3).with_bugs(2),
            FileRecord::new("b.rs").with_loc(5).with_commits(1),
        ];
        let dataset = Dataset::from_records("url", "org", "repo", files);
        assert_eq!(dataset.total_files, 2);
        assert_eq!(dataset.total_loc, 15);
        assert_eq!(dataset.total_commits, 4);
        assert_eq!(dataset.total_bugs, 2);
        assert_eq!(dataset.files_with_bugs, 1);
    }

    #[test]
    fn save_then_load() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("org_repo.json");
        let dataset = Dataset::from_json_str(SAMPLE).unwrap();
        dataset.save(&path).unwrap();
        assert_eq!(Dataset::load(&path).unwrap(), dataset);
    }

    #[test]
    fn missing_file_is_reported() {
        let dir = tempfile::tempdir().unwrap();
        let err = Dataset::load(dir.path().join("nope.json")).unwrap_err();
        assert!(matches!(err, DatasetError::MissingPath { .. }));
    }
}
