pub mod chart;
pub mod color;
pub mod duration;
pub mod numeric;
