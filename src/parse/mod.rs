pub mod quick;

pub use quick::{QuickInput, parse_quick};
