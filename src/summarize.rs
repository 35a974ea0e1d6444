use crate::key::GroupKey;
use crate::parse::{self, Skip};
use anyhow::Result;
use log::debug;
use running_stats::RunningStats;
use std::collections::BTreeMap;
use std::io::{BufRead, BufReader, Read};

/// Bookkeeping about the rows we've been fed.  This never affects the
/// statistics.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RowCounts {
    /// Data rows read, including the ones which were skipped
    pub rows: u64,
    pub malformed: u64,
    pub non_numeric: u64,
}
impl RowCounts {
    pub fn skipped(&self) -> u64 {
        self.malformed + self.non_numeric
    }
}

/// The statistics of every group seen so far.
#[derive(Debug, Clone, Default)]
pub struct GroupTable {
    groups: BTreeMap<GroupKey, RunningStats>,
    pub counts: RowCounts,
}
impl GroupTable {
    pub fn new() -> GroupTable {
        GroupTable::default()
    }

    /// Add a value to the group, creating the group if this is the first
    /// time we've seen it.
    pub fn observe(&mut self, key: GroupKey, value: f64) {
        self.groups
            .entry(key)
            .or_insert_with(RunningStats::new)
            .update(value);
    }

    pub fn update(&mut self, row: Result<parse::Reading, Skip>) {
        self.counts.rows += 1;
        match row {
            Ok(reading) => self.observe(reading.key, reading.value),
            Err(Skip::Malformed) => self.counts.malformed += 1,
            Err(Skip::NonNumeric) => self.counts.non_numeric += 1,
        }
    }

    /// Fold in a table built from a different set of rows.
    pub fn merge(&mut self, other: GroupTable) {
        for (key, stats) in other.groups {
            self.groups
                .entry(key)
                .or_insert_with(RunningStats::new)
                .merge(&stats);
        }
        self.counts.rows += other.counts.rows;
        self.counts.malformed += other.counts.malformed;
        self.counts.non_numeric += other.counts.non_numeric;
    }

    pub fn get(&self, key: &GroupKey) -> Option<&RunningStats> {
        self.groups.get(key)
    }

    /// Iterates in key order.
    pub fn iter(&self) -> impl Iterator<Item = (&GroupKey, &RunningStats)> {
        self.groups.iter()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }
}

/// Read delimited records from `input` and group them.
///
/// The first line is a header and is thrown away unread, even if it's
/// blank.  Returns `None` if there's no first line at all.  Bad rows are
/// counted but otherwise ignored; only a failure to read the input is an
/// error.
pub fn summarize(input: impl Read, delimiter: u8) -> Result<Option<GroupTable>> {
    let mut input = BufReader::new(input);
    let mut header = vec![];
    if input.read_until(b'\n', &mut header)? == 0 {
        return Ok(None);
    }
    debug!("Skipping header ({} bytes)", header.len());

    let rdr = csv::ReaderBuilder::new()
        .has_headers(false)
        .flexible(true)
        .quoting(false)
        .delimiter(delimiter)
        .from_reader(input);
    let mut table = GroupTable::new();
    for record in rdr.into_byte_records() {
        let record = record?;
        table.update(parse::parse_record(record.iter()));
    }
    Ok(Some(table))
}
