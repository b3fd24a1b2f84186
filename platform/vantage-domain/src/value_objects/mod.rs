pub mod chart_point;
pub mod display_mode;
pub mod equity_point;
pub mod numeric_input;
