use crate::key::GroupKey;
use crate::summarize::GroupTable;
use running_stats::RunningStats;
use std::cmp::Ordering;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Criterion {
    Average,
    StdDev,
}
impl Criterion {
    pub fn score(self, stats: &RunningStats) -> f64 {
        match self {
            Criterion::Average => stats.mean(),
            Criterion::StdDev => stats.std_dev(),
        }
    }
}
impl fmt::Display for Criterion {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Criterion::Average => f.write_str("Highest Average"),
            Criterion::StdDev => f.write_str("Highest Variability (Std Dev)"),
        }
    }
}

/// The `n` highest-scoring groups, best first.
///
/// Groups with equal scores come out in key order.
pub fn top_n(
    table: &GroupTable,
    n: usize,
    criterion: Criterion,
) -> Vec<(&GroupKey, &RunningStats)> {
    let mut groups = table.iter().collect::<Vec<_>>();
    groups.sort_by(|(k1, s1), (k2, s2)| {
        criterion
            .score(s2)
            .partial_cmp(&criterion.score(s1))
            .unwrap_or(Ordering::Equal)
            .then_with(|| k1.cmp(k2))
    });
    groups.truncate(n);
    groups
}
