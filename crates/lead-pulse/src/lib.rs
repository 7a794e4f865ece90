//! Lead sheet reporting: acquisition metrics, funnel conversion, duplicate
//! detection, cost forecasting and budget allocation across lead sources.

pub mod allocation;
pub mod config;
pub mod error;
pub mod forecast;
pub mod leads;
pub mod reporting;
pub mod telemetry;
