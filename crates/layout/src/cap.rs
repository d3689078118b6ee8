//! Building budget: proportional truncation of the code and test subsets.

/// Result of [`cap_subsets`].
#[derive(Debug, Clone, PartialEq)]
pub struct Capped<T> {
    pub code: Vec<T>,
    pub test: Vec<T>,
    /// Files removed to meet the limit.
    pub dropped: usize,
}

/// Trim `code` and `test` so together they hold at most `limit` items.
///
/// The code share is `floor(limit * code / total)` and the test subset gets the
/// remainder, so a truncated result holds exactly `limit` items. Each subset
/// keeps its prefix: callers sort by priority first, this function never reorders.
pub fn cap_subsets<T>(mut code: Vec<T>, mut test: Vec<T>, limit: usize) -> Capped<T> {
    let total = code.len() + test.len();
    if total <= limit {
        return Capped {
            code,
            test,
            dropped: 0,
        };
    }

    // Integer floor(limit * code / total); f64 ratios undershoot on shares like 0.7.
    let max_code = (limit as u128 * code.len() as u128 / total as u128) as usize;
    let max_test = limit - max_code;
    code.truncate(max_code);
    test.truncate(max_test);

    let dropped = total - code.len() - test.len();
    log::info!(
        "Limited to {} buildings ({} code, {} test) from {} total files, {} dropped",
        limit,
        code.len(),
        test.len(),
        total,
        dropped
    );

    Capped { code, test, dropped }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn under_limit_is_untouched() {
        let capped = cap_subsets(vec![1, 2, 3], vec![4], 10);
        assert_eq!(capped.code, vec![1, 2, 3]);
        assert_eq!(capped.test, vec![4]);
        assert_eq!(capped.dropped, 0);
    }

    #[test]
    fn exactly_at_limit_is_untouched() {
        let capped = cap_subsets(vec![1, 2], vec![3, 4], 4);
        assert_eq!(capped.code.len() + capped.test.len(), 4);
        assert_eq!(capped.dropped, 0);
    }

    #[test]
    fn truncation_preserves_ratio_and_sums_to_limit() {
        let code: Vec<u32> = (0..700).collect();
        let test: Vec<u32> = (0..300).collect();
        let capped = cap_subsets(code, test, 500);
        assert_eq!(capped.code.len(), 350);
        assert_eq!(capped.test.len(), 150);
        assert_eq!(capped.dropped, 500);
    }

    #[test]
    fn test_subset_takes_the_rounding_remainder() {
        // 2/3 of 10 floors to 6 code, test gets 4 rather than a rounded 3.
        let capped = cap_subsets(vec![0; 20], vec![0; 10], 10);
        assert_eq!(capped.code.len(), 6);
        assert_eq!(capped.test.len(), 4);
    }

    #[test]
    fn keeps_prefix_of_each_subset() {
        let capped = cap_subsets(vec!["a", "b", "c", "d"], vec!["t1", "t2", "t3", "t4"], 4);
        assert_eq!(capped.code, vec!["a", "b"]);
        assert_eq!(capped.test, vec!["t1", "t2"]);
    }

    #[test]
    fn one_sided_inputs() {
        let capped = cap_subsets(Vec::<u8>::new(), vec![0; 9], 5);
        assert!(capped.code.is_empty());
        assert_eq!(capped.test.len(), 5);

        let capped = cap_subsets(vec![0u8; 9], Vec::new(), 5);
        assert_eq!(capped.code.len(), 5);
        assert!(capped.test.is_empty());
    }

    #[test]
    fn zero_limit_drops_everything() {
        let capped = cap_subsets(vec![1, 2], vec![3], 0);
        assert!(capped.code.is_empty() && capped.test.is_empty());
        assert_eq!(capped.dropped, 3);
    }
}
