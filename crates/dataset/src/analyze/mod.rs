//! Repository analyzer: git history plus source heuristics into a [`Dataset`].

pub mod git;
pub mod smells;

use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};

use layout::FileRecord;

use crate::catalogue::register_dataset;
use crate::error::{DatasetError, Result};
use crate::model::Dataset;

pub use git::{clone_repo, BugMatcher};
pub use smells::{SmellReport, SmellScanner};

/// Directories never descended into.
pub const SKIP_DIRS: &[&str] = &[
    ".git", "node_modules", "vendor", "target", "build", "dist", "__pycache__", ".idea", ".vscode",
];

/// Extensions (lowercased, with dot) treated as source code.
#[rustfmt::skip]
pub const CODE_EXTENSIONS: &[&str] = &[
    ".py", ".js", ".ts", ".tsx", ".jsx", ".java", ".go", ".rs", ".c", ".cpp", ".h", ".hpp",
    ".cs", ".rb", ".php", ".swift", ".kt", ".scala", ".clj", ".ex", ".exs", ".erl",
    ".hs", ".ml", ".fs", ".r", ".m", ".mm", ".sh", ".bash", ".zsh", ".zig",
];

/// Result of [`analyze_repository`].
#[derive(Debug)]
pub struct Analysis {
    pub dataset: Dataset,
    /// Where the dataset was written.
    pub output: PathBuf,
    /// Files with a smell score above 50.
    pub smelly_files: usize,
}

/// `(org, repo)` from a repository URL or path, `("unknown", "unknown")` when
/// it has fewer than two segments.
pub fn extract_org_repo(url: &str) -> (String, String) {
    let url = url.trim_end_matches('/');
    let url = url.strip_suffix(".git").unwrap_or(url);
    let mut parts = url.rsplit('/');
    match (parts.next(), parts.next()) {
        (Some(repo), Some(org)) if !repo.is_empty() && !org.is_empty() => (org.to_string(), repo.to_string()),
        _ => ("unknown".to_string(), "unknown".to_string()),
    }
}

pub fn is_code_extension(extension: &str) -> bool {
    CODE_EXTENSIONS.contains(&extension)
}

/// Analyze every source file under `root`, busiest first.
///
/// Without usable git history every file counts one commit and no bugs.
pub fn analyze_codebase(root: &Path) -> Result<Vec<FileRecord>> {
    if !root.is_dir() {
        return Err(DatasetError::MissingPath { path: root.to_path_buf() });
    }
    let scanner = SmellScanner::new()?;
    let matcher = BugMatcher::new()?;
    let (commit_counts, bug_counts) = match git::history(root, &matcher) {
        Ok(history) => history,
        Err(e) => {
            log::warn!("No git history for {}: {}", root.display(), e);
            (HashMap::new(), HashMap::new())
        }
    };

    let mut sources = Vec::new();
    collect_sources(root, "", &mut sources)?;

    let mut files = Vec::with_capacity(sources.len());
    for (rel_path, abs_path) in sources {
        let bytes = match fs::read(&abs_path) {
            Ok(bytes) => bytes,
            Err(e) => {
                log::warn!("Skipping unreadable {}: {}", abs_path.display(), e);
                continue;
            }
        };
        let text = String::from_utf8_lossy(&bytes);
        let report = scanner.scan(&text);
        if report.lines == 0 {
            continue;
        }

        let commits = commit_counts.get(&rel_path).copied().unwrap_or(1);
        let bugs = bug_counts.get(&rel_path).copied().unwrap_or(0);
        let mut record = FileRecord::new(rel_path)
            .with_loc(report.lines as u64)
            .with_commits(commits)
            .with_bugs(bugs)
            .with_smell_score(smells::final_smell_score(report.score, bugs, commits));
        record.smells = report.smells;
        files.push(record);
    }

    files.sort_by(|a, b| b.commits.cmp(&a.commits));
    log::info!("Analyzed {} source files under {}", files.len(), root.display());
    Ok(files)
}

/// Analyze a local checkout or clone a URL into `checkout_dir` first, then
/// write `<org>_<repo>.json` into `data_dir` and register it in the index.
pub fn analyze_repository(source: &str, data_dir: &Path, checkout_dir: &Path) -> Result<Analysis> {
    let local = Path::new(source);
    let root = if local.is_dir() {
        local.to_path_buf()
    } else {
        clone_repo(source, checkout_dir)?;
        checkout_dir.to_path_buf()
    };

    let files = analyze_codebase(&root)?;
    let (org, repo) = extract_org_repo(source);
    let smelly_files = files.iter().filter(|f| f.smell_score > 50).count();
    let dataset = Dataset::from_records(source, org.as_str(), repo.as_str(), files);

    fs::create_dir_all(data_dir).map_err(|e| DatasetError::io(data_dir, e))?;
    let file_name = format!("{org}_{repo}.json");
    let output = data_dir.join(&file_name);
    dataset.save(&output)?;
    register_dataset(data_dir, &file_name)?;

    log::info!(
        "Found {} bug-related commits affecting {} files, {} smelly files",
        dataset.total_bugs,
        dataset.files_with_bugs,
        smelly_files
    );
    Ok(Analysis {
        dataset,
        output,
        smelly_files,
    })
}

/// Depth-first walk in name order, collecting `(relative path, absolute path)` of code files.
fn collect_sources(dir: &Path, rel_dir: &str, out: &mut Vec<(String, PathBuf)>) -> Result<()> {
    let mut entries = fs::read_dir(dir)
        .map_err(|e| DatasetError::io(dir, e))?
        .collect::<std::io::Result<Vec<_>>>()
        .map_err(|e| DatasetError::io(dir, e))?;
    entries.sort_by_key(|e| e.file_name());

    for entry in entries {
        let name = entry.file_name().to_string_lossy().into_owned();
        let rel_path = if rel_dir.is_empty() {
            name.clone()
        } else {
            format!("{rel_dir}/{name}")
        };
        let path = entry.path();
        if path.is_dir() {
            if !SKIP_DIRS.contains(&name.as_str()) {
                collect_sources(&path, &rel_path, out)?;
            }
        } else if is_code_extension(&FileRecord::new(name.as_str()).extension) {
            out.push((rel_path, path));
        }
    }
    Ok(())
}
