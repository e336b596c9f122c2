//! Calendar and unit primitives shared by every engine stage

pub mod calendar;
pub mod units;
