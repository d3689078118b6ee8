use std::collections::HashMap;
use std::fs;
use std::path::Path;
use std::process::Command;

use regex::Regex;

use crate::error::{DatasetError, Result};

/// Commit-subject words that mark a bug fix. Issue references (`#123`) count too.
#[rustfmt::skip]
pub const BUG_KEYWORDS: &[&str] = &[
    r"\bfix\b", r"\bfixed\b", r"\bfixes\b", r"\bfixing\b",
    r"\bbug\b", r"\bbugs\b", r"\bbugfix\b",
    r"\berror\b", r"\berrors\b",
    r"\bissue\b", r"\bissues\b",
    r"\bpatch\b", r"\bpatched\b",
    r"\brepair\b", r"\brepaired\b",
    r"\bresolve\b", r"\bresolved\b", r"\bresolves\b",
    r"\bhotfix\b",
    r"\bdefect\b", r"\bdefects\b",
    r"\bcorrect\b", r"\bcorrected\b", r"\bcorrection\b",
    r"\bcrash\b", r"\bcrashes\b", r"\bcrashing\b",
    r"\bfail\b", r"\bfailed\b", r"\bfailing\b", r"\bfailure\b",
    r"\bbroken\b", r"\bbreak\b",
    r"\bnull\s*pointer\b", r"\bnpe\b",
    r"\bexception\b", r"\bexceptions\b",
    r"\bregression\b",
    r"#\d+",
];

const SUBJECT_SEPARATOR: &str = "|||";

pub(crate) fn run_git(dir: Option<&Path>, args: &[&str]) -> Result<String> {
    let mut command = Command::new("git");
    if let Some(dir) = dir {
        command.current_dir(dir);
    }
    let output = command.args(args).output().map_err(|e| DatasetError::GitFailed {
        args: args.join(" "),
        stderr: e.to_string(),
    })?;

    if output.status.success() {
        Ok(String::from_utf8(output.stdout)?)
    } else {
        Err(DatasetError::GitFailed {
            args: args.join(" "),
            stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
        })
    }
}

/// Full-history clone of `url` into `target`, replacing anything already there.
pub fn clone_repo(url: &str, target: &Path) -> Result<()> {
    if target.exists() {
        fs::remove_dir_all(target).map_err(|e| DatasetError::io(target, e))?;
    }
    let target_str = target.to_string_lossy();
    log::info!("Cloning {} (full history) into {}", url, target.display());
    run_git(None, &["clone", url, &target_str])?;
    Ok(())
}

/// Case-insensitive matcher over [`BUG_KEYWORDS`].
pub struct BugMatcher {
    pattern: Regex,
}

impl BugMatcher {
    pub fn new() -> Result<Self> {
        Ok(Self {
            pattern: Regex::new(&format!("(?i){}", BUG_KEYWORDS.join("|")))?,
        })
    }

    pub fn is_bug_fix(&self, subject: &str) -> bool {
        self.pattern.is_match(subject)
    }
}

/// Commits touching each path in a `git log --pretty=format: --name-only` listing.
pub fn parse_commit_counts(log: &str) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    for line in log.lines().map(str::trim).filter(|l| !l.is_empty()) {
        *counts.entry(line.to_string()).or_insert(0) += 1;
    }
    counts
}

/// Bug-fix commits touching each path in a
/// `git log --pretty=format:%H|||%s --name-only` listing.
pub fn parse_bug_counts(log: &str, matcher: &BugMatcher) -> HashMap<String, u32> {
    let mut counts = HashMap::new();
    let mut in_bug_fix = false;
    for line in log.lines().map(str::trim).filter(|l| !l.is_empty()) {
        if let Some((_, subject)) = line.split_once(SUBJECT_SEPARATOR) {
            in_bug_fix = matcher.is_bug_fix(subject);
        } else if in_bug_fix {
            *counts.entry(line.to_string()).or_insert(0) += 1;
        }
    }
    counts
}

/// Per-path commit and bug-fix counts for the repository at `dir`.
pub fn history(dir: &Path, matcher: &BugMatcher) -> Result<(HashMap<String, u32>, HashMap<String, u32>)> {
    let names = run_git(Some(dir), &["log", "--pretty=format:", "--name-only"])?;
    let subjects = run_git(Some(dir), &["log", "--pretty=format:%H|||%s", "--name-only"])?;
    Ok((parse_commit_counts(&names), parse_bug_counts(&subjects, matcher)))
}
