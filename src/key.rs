use serde::Serialize;
use std::fmt;

/// Readings are grouped by the combination of these three columns.
///
/// Ordering is lexical by site, then device, then metric.
#[derive(Debug, PartialEq, Eq, Hash, Clone, PartialOrd, Ord, Serialize)]
pub struct GroupKey {
    pub site: String,
    pub device: String,
    pub metric: String,
}
impl GroupKey {
    pub fn new(
        site: impl Into<String>,
        device: impl Into<String>,
        metric: impl Into<String>,
    ) -> GroupKey {
        GroupKey {
            site: site.into(),
            device: device.into(),
            metric: metric.into(),
        }
    }
}
impl fmt::Display for GroupKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{} | {} | {}", self.site, self.device, self.metric)
    }
}
