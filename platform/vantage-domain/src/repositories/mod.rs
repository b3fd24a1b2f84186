pub mod equity_history;
