pub mod charting;
pub mod config;
pub mod formatting;
