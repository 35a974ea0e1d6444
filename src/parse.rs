use crate::key::GroupKey;
use std::fmt;

/// Records with fewer fields than this are dropped.
pub const MIN_FIELDS: usize = 6;

#[derive(Debug, Clone, PartialEq)]
pub struct Reading {
    pub key: GroupKey,
    pub value: f64,
}

/// Why a record didn't produce a reading.  Neither case is fatal.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Skip {
    Malformed,
    NonNumeric,
}

impl fmt::Display for Skip {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Skip::Malformed => write!(f, "Record has fewer than {} fields", MIN_FIELDS),
            Skip::NonNumeric => f.write_str("Value is not a finite decimal number"),
        }
    }
}
impl std::error::Error for Skip {}

/// Extract a reading from the fields of one record.
///
/// The columns are `timestamp, site, device, metric, unit, value`.  The
/// timestamp and unit are never looked at.  Any fields past the sixth are
/// ignored.  Bytes which aren't valid UTF-8 are replaced with U+FFFD rather
/// than rejected.
pub fn parse_record<'a>(fields: impl IntoIterator<Item = &'a [u8]>) -> Result<Reading, Skip> {
    let mut fields = fields.into_iter();
    let empty: &[u8] = &[];
    let mut cols = [empty; MIN_FIELDS];
    for col in cols.iter_mut() {
        *col = fields.next().ok_or(Skip::Malformed)?;
    }
    let [_timestamp, site, device, metric, _unit, value] = cols;

    let value = trim(&String::from_utf8_lossy(value))
        .parse::<f64>()
        .ok()
        .filter(|x| x.is_finite())
        .ok_or(Skip::NonNumeric)?;
    Ok(Reading {
        key: GroupKey::new(field(site), field(device), field(metric)),
        value,
    })
}

fn field(x: &[u8]) -> String {
    trim(&String::from_utf8_lossy(x)).to_string()
}

/// Strips spaces and ASCII control characters only; other Unicode
/// whitespace (eg. U+00A0) is part of the value.
fn trim(x: &str) -> &str {
    x.trim_matches(|c: char| c <= ' ')
}

#[cfg(test)]
mod tests {
    use super::*;

    fn parse(line: &str) -> Result<Reading, Skip> {
        parse_record(line.as_bytes().split(|&b| b == b','))
    }

    #[test]
    fn well_formed() {
        assert_eq!(
            parse("t1,A,dev1,temp,C,10"),
            Ok(Reading {
                key: GroupKey::new("A", "dev1", "temp"),
                value: 10.,
            })
        );
        assert_eq!(parse("t1,A,dev1,temp,C,-3.25e2").map(|r| r.value), Ok(-325.));
    }

    #[test]
    fn trims_fields() {
        let reading = parse(" t1 ,  A , dev1\t, temp ,C,  21.5  ").unwrap();
        assert_eq!(reading.key, GroupKey::new("A", "dev1", "temp"));
        assert_eq!(reading.value, 21.5);
    }

    #[test]
    fn too_few_fields() {
        assert_eq!(parse("t1,A,dev1,temp,C"), Err(Skip::Malformed));
        assert_eq!(parse(""), Err(Skip::Malformed));
    }

    #[test]
    fn extra_fields_are_ignored() {
        let reading = parse("t1,A,dev1,temp,C,7,extra,more").unwrap();
        assert_eq!(reading.value, 7.);
    }

    #[test]
    fn non_numeric() {
        assert_eq!(parse("t1,A,dev1,temp,C,N/A"), Err(Skip::NonNumeric));
        assert_eq!(parse("t1,A,dev1,temp,C,"), Err(Skip::NonNumeric));
        assert_eq!(parse("t1,A,dev1,temp,C,12abc"), Err(Skip::NonNumeric));
    }

    #[test]
    fn non_finite() {
        assert_eq!(parse("t1,A,dev1,temp,C,NaN"), Err(Skip::NonNumeric));
        assert_eq!(parse("t1,A,dev1,temp,C,inf"), Err(Skip::NonNumeric));
        assert_eq!(parse("t1,A,dev1,temp,C,1e999"), Err(Skip::NonNumeric));
    }

    #[test]
    fn only_ascii_whitespace_is_trimmed() {
        let reading = parse("t1,\u{a0}A\u{a0}, dev1 ,temp\r,C,\t1\u{b}").unwrap();
        assert_eq!(reading.key, GroupKey::new("\u{a0}A\u{a0}", "dev1", "temp"));
        assert_eq!(reading.value, 1.);
    }

    #[test]
    fn invalid_utf8_is_decoded_lossily() {
        let fields: [&[u8]; 6] = [b"t1", b"Z\xfcrich", b"dev1", b"temp", b"C", b"4"];
        let reading = parse_record(fields.iter().copied()).unwrap();
        assert_eq!(reading.key, GroupKey::new("Z\u{fffd}rich", "dev1", "temp"));
        assert_eq!(reading.value, 4.);
    }

    #[test]
    fn empty_key_components_are_valid() {
        let reading = parse("t1,,,,C,1").unwrap();
        assert_eq!(reading.key, GroupKey::new("", "", ""));
    }
}
