mod calendar;
pub use calendar::*;
mod date;
pub use date::*;
mod week_day;
pub use week_day::*;
