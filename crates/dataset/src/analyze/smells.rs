//! Line-based code smell heuristics.

use layout::Smells;
use regex::Regex;

use crate::error::Result;

pub const LONG_FILE_LINES: usize = 500;
pub const LONG_FUNCTION_LINES: usize = 50;
pub const LONG_LINE_CHARS: usize = 120;
pub const NESTING_ALLOWANCE: u32 = 4;
const SPACES_PER_LEVEL: usize = 4;

/// Smells and score of one file.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SmellReport {
    pub smells: Smells,
    /// 0..=100, before the bug ratio bonus.
    pub score: u32,
    pub lines: usize,
}

pub struct SmellScanner {
    comment: Regex,
    function: Regex,
}

impl SmellScanner {
    pub fn new() -> Result<Self> {
        Ok(Self {
            comment: Regex::new(r"^\s*(#|//|/\*|\*|<!--)")?,
            function: Regex::new(
                r"^\s*(def |function |fn |func |public |private |protected |void |int |string |async )",
            )?,
        })
    }

    pub fn scan(&self, text: &str) -> SmellReport {
        let lines: Vec<&str> = text.lines().collect();
        let total = lines.len();

        let mut smells = Smells {
            long_file: total > LONG_FILE_LINES,
            ..Smells::default()
        };
        let mut comment_lines = 0usize;
        let mut max_level = 0usize;
        let mut function_start: Option<usize> = None;
        let mut function_lengths = Vec::new();

        for (i, line) in lines.iter().enumerate() {
            let trimmed = line.trim_end();
            if trimmed.is_empty() {
                continue;
            }
            if trimmed.chars().count() > LONG_LINE_CHARS {
                smells.long_lines += 1;
            }
            if self.comment.is_match(trimmed) {
                comment_lines += 1;
            }

            let indent = line.chars().take_while(|c| c.is_whitespace()).count();
            max_level = max_level.max(indent / SPACES_PER_LEVEL);

            if self.function.is_match(line) {
                if let Some(start) = function_start {
                    function_lengths.push(i - start);
                }
                function_start = Some(i);
            }
        }
        // The last function runs to the end of the file.
        if let Some(start) = function_start {
            function_lengths.push(total - start);
        }

        smells.deep_nesting = (max_level as u32).saturating_sub(NESTING_ALLOWANCE);
        smells.long_functions = function_lengths
            .iter()
            .filter(|&&len| len > LONG_FUNCTION_LINES)
            .count() as u32;
        smells.low_comments = total > 20 && (comment_lines as f64 / total as f64) < 0.05;

        SmellReport {
            score: smell_score(&smells),
            smells,
            lines: total,
        }
    }
}

/// Weighted smell score, capped at 100.
pub fn smell_score(smells: &Smells) -> u32 {
    let mut score = 0;
    if smells.long_file {
        score += 25;
    }
    score += (smells.long_functions * 10).min(30);
    score += (smells.deep_nesting * 5).min(20);
    score += smells.long_lines.min(15);
    if smells.low_comments {
        score += 10;
    }
    score.min(100)
}

/// Bonus for files whose history is dominated by bug fixes, at most 30.
pub fn bug_ratio_score(bugs: u32, commits: u32) -> u32 {
    let ratio = bugs as f64 / commits.max(1) as f64;
    ((ratio * 50.0) as u32).min(30)
}

/// Smell score stored in the dataset.
pub fn final_smell_score(smell_score: u32, bugs: u32, commits: u32) -> u32 {
    (smell_score + bug_ratio_score(bugs, commits)).min(100)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn scanner() -> SmellScanner {
        SmellScanner::new().unwrap()
    }

    #[test]
    fn clean_short_file_scores_zero() {
        let text = "// adds numbers\nfn add(a: i32, b: i32) -> i32 {\n    a + b\n}\n";
        let report = scanner().scan(text);
        assert_eq!(report.lines, 4);
        assert_eq!(report.smells, Smells::default());
        assert_eq!(report.score, 0);
    }

    #[test]
    fn long_uncommented_file() {
        let text = "x = 1\n".repeat(501);
        let report = scanner().scan(&text);
        assert!(report.smells.long_file);
        assert!(report.smells.low_comments);
        assert_eq!(report.score, 35);
    }

    #[test]
    fn long_functions_are_counted_and_capped() {
        let mut text = String::from("# module\n");
        for f in 0..4 {
            text.push_str(&format!("def f{f}():\n"));
            for _ in 0..55 {
                text.push_str("    # body\n");
            }
        }
        let report = scanner().scan(&text);
        assert_eq!(report.smells.long_functions, 4);
        assert_eq!(smell_score(&report.smells), 30);
    }

    #[test]
    fn nesting_beyond_four_levels() {
        let text = format!("# c\n{}x\n{}y\n", " ".repeat(24), " ".repeat(8));
        let report = scanner().scan(&text);
        assert_eq!(report.smells.deep_nesting, 2);
        assert_eq!(report.score, 10);
    }

    #[test]
    fn long_lines_cap_at_fifteen() {
        let text = format!("// c\n{}", format!("{}\n", "a".repeat(121)).repeat(18));
        let report = scanner().scan(&text);
        assert_eq!(report.smells.long_lines, 18);
        assert_eq!(smell_score(&report.smells), 15);
    }

    #[test]
    fn blank_lines_count_toward_length_only() {
        let report = scanner().scan("\n\n\n   \nfn main() {}\n");
        assert_eq!(report.lines, 5);
        assert_eq!(report.smells.long_lines, 0);
    }

    #[test]
    fn bug_ratio_bonus() {
        assert_eq!(bug_ratio_score(0, 10), 0);
        assert_eq!(bug_ratio_score(1, 10), 5);
        assert_eq!(bug_ratio_score(5, 5), 30);
        assert_eq!(bug_ratio_score(3, 0), 30);
        assert_eq!(final_smell_score(90, 5, 5), 100);
        assert_eq!(final_smell_score(20, 1, 10), 25);
    }
}
