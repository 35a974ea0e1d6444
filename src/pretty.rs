use crate::key::GroupKey;
use crate::rank::{top_n, Criterion};
use crate::summarize::GroupTable;
use anyhow::Result;
use running_stats::RunningStats;
use serde::Serialize;
use std::fmt;
use std::io::Write;

/// The two rankings we print: highest average and highest spread.
pub struct Report<'a> {
    top: usize,
    by_average: Vec<(&'a GroupKey, &'a RunningStats)>,
    by_std_dev: Vec<(&'a GroupKey, &'a RunningStats)>,
}

impl<'a> Report<'a> {
    pub fn new(table: &'a GroupTable, top: usize) -> Report<'a> {
        Report {
            top,
            by_average: top_n(table, top, Criterion::Average),
            by_std_dev: top_n(table, top, Criterion::StdDev),
        }
    }

    pub fn write_text(&self, mut out: impl Write) -> Result<()> {
        for (criterion, ranked) in [
            (Criterion::Average, &self.by_average),
            (Criterion::StdDev, &self.by_std_dev),
        ] {
            writeln!(out, "\nTop {} by {}:", self.top, criterion)?;
            for (key, stats) in ranked {
                writeln!(out, "{}", PrettyGroup(key, stats))?;
            }
        }
        Ok(())
    }

    pub fn write_json(&self, mut out: impl Write) -> Result<()> {
        let json = JsonReport {
            by_average: summaries(&self.by_average),
            by_std_dev: summaries(&self.by_std_dev),
        };
        serde_json::to_writer(&mut out, &json)?;
        writeln!(out)?;
        Ok(())
    }
}

pub struct PrettyGroup<'a>(pub &'a GroupKey, pub &'a RunningStats);

impl fmt::Display for PrettyGroup<'_> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        let PrettyGroup(key, stats) = self;
        write!(
            f,
            "{} -> count={} avg={:.2} min={:.2} max={:.2} stddev={:.2}",
            key,
            stats.count(),
            stats.mean(),
            stats.min(),
            stats.max(),
            stats.std_dev(),
        )
    }
}

#[derive(Serialize)]
struct JsonReport<'a> {
    by_average: Vec<GroupSummary<'a>>,
    by_std_dev: Vec<GroupSummary<'a>>,
}

#[derive(Serialize)]
struct GroupSummary<'a> {
    #[serde(flatten)]
    key: &'a GroupKey,
    count: u64,
    avg: f64,
    min: f64,
    max: f64,
    stddev: f64,
}

fn summaries<'a>(ranked: &[(&'a GroupKey, &'a RunningStats)]) -> Vec<GroupSummary<'a>> {
    ranked
        .iter()
        .map(|&(key, stats)| GroupSummary::new(key, stats))
        .collect()
}

impl<'a> GroupSummary<'a> {
    fn new(key: &'a GroupKey, stats: &RunningStats) -> GroupSummary<'a> {
        GroupSummary {
            key,
            count: stats.count(),
            avg: stats.mean(),
            min: stats.min(),
            max: stats.max(),
            stddev: stats.std_dev(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn table() -> GroupTable {
        let mut t = GroupTable::new();
        for x in [10., 20., 30.] {
            t.observe(GroupKey::new("A", "dev1", "temp"), x);
        }
        t.observe(GroupKey::new("B", "dev2", "hum"), 55.5);
        t
    }

    #[test]
    fn pretty_group() {
        let stats = vec![1.005, 2., 3.333].into_iter().collect::<RunningStats>();
        let key = GroupKey::new("S", "D", "M");
        assert_eq!(
            PrettyGroup(&key, &stats).to_string(),
            "S | D | M -> count=3 avg=2.11 min=1.00 max=3.33 stddev=1.17"
        );
    }

    #[test]
    fn text() {
        let t = table();
        let mut out = vec![];
        Report::new(&t, 10).write_text(&mut out).unwrap();
        assert_eq!(
            String::from_utf8(out).unwrap(),
            "\nTop 10 by Highest Average:\n\
             B | dev2 | hum -> count=1 avg=55.50 min=55.50 max=55.50 stddev=0.00\n\
             A | dev1 | temp -> count=3 avg=20.00 min=10.00 max=30.00 stddev=10.00\n\
             \nTop 10 by Highest Variability (Std Dev):\n\
             A | dev1 | temp -> count=3 avg=20.00 min=10.00 max=30.00 stddev=10.00\n\
             B | dev2 | hum -> count=1 avg=55.50 min=55.50 max=55.50 stddev=0.00\n"
        );
    }

    #[test]
    fn text_truncated() {
        let t = table();
        let mut out = vec![];
        Report::new(&t, 1).write_text(&mut out).unwrap();
        let out = String::from_utf8(out).unwrap();
        assert_eq!(out.lines().filter(|l| l.contains("->")).count(), 2);
        assert!(out.contains("Top 1 by Highest Average:"));
    }

    #[test]
    fn json() {
        let t = table();
        let mut out = vec![];
        Report::new(&t, 10).write_json(&mut out).unwrap();
        let v: serde_json::Value = serde_json::from_slice(&out).unwrap();
        assert_eq!(v["by_average"].as_array().unwrap().len(), 2);
        assert_eq!(v["by_average"][0]["site"], "B");
        assert_eq!(v["by_std_dev"][0]["site"], "A");
        assert_eq!(v["by_std_dev"][0]["device"], "dev1");
        assert_eq!(v["by_std_dev"][0]["metric"], "temp");
        assert_eq!(v["by_std_dev"][0]["count"], 3);
        assert_eq!(v["by_std_dev"][0]["avg"], 20.);
        assert_eq!(v["by_std_dev"][0]["stddev"], 10.);
    }
}
