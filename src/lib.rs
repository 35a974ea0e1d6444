//! Group sensor readings by site, device and metric, and find the groups
//! with the highest average and the highest spread.

pub mod analyze;
pub mod key;
pub mod parse;
pub mod pretty;
pub mod rank;
pub mod summarize;
