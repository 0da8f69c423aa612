pub mod clock;
pub mod date_parser;

pub use clock::{Clock, FixedClock, SystemClock};
pub use date_parser::DateParser;
