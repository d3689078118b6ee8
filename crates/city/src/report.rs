//! Plain-text city summaries for the terminal.

use std::fmt::Write;

use dataset::{display_name, Dataset};
use layout::PlacementPlan;
use scene::Census;

pub fn legend(dataset: &Dataset) -> String {
    let stats = dataset.stats();
    let mut out = String::from("Code City Legend\n");
    let _ = writeln!(out, "  Height        = git commits (max {})", stats.max_commits);
    let _ = writeln!(out, "  Left quarter  : {} code files", stats.code_files);
    let _ = writeln!(out, "  Right quarter : {} test files", stats.test_files);
    let _ = writeln!(out, "  Bugs          : {} bug-related commits", stats.total_bugs);
    out
}

pub fn summary(
    file_name: &str,
    dataset: &Dataset,
    max_buildings: usize,
    plan: &PlacementPlan,
    census: &Census,
) -> String {
    let mut out = String::new();
    let _ = writeln!(out, "{} ({})", display_name(file_name), dataset.repo_url);
    let _ = writeln!(out, "{}", dataset.info_line(max_buildings));
    let _ = writeln!(
        out,
        "Ground {:.1} x {:.1}: {} buildings ({} test), {} bugs, {} smoke plumes, {} pedestrians, {} cars",
        plan.ground_width(),
        plan.ground_height(),
        census.buildings,
        census.test_buildings,
        census.bugs,
        census.smoke_emitters,
        census.pedestrians,
        census.cars
    );
    let _ = writeln!(
        out,
        "Planned: {} bug visuals, {} pedestrians, {} smelly files",
        plan.total_bug_visuals(),
        plan.total_pedestrians(),
        plan.smoking().count()
    );
    out
}

/// The `limit` tallest buildings, one per line.
pub fn tallest(plan: &PlacementPlan, limit: usize) -> String {
    let mut out = String::new();
    for (rank, b) in plan.tallest(limit).into_iter().enumerate() {
        let _ = writeln!(
            out,
            "{:>3}. {:<48} h {:>5.2}  commits {:>4}  bugs {:>3}  smell {:>3}  [{}]",
            rank + 1,
            b.file.path,
            b.height,
            b.file.commits,
            b.file.bugs,
            b.file.smell_score,
            b.category.label()
        );
    }
    out
}
