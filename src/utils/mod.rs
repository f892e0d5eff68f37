pub mod display;

pub use display::{display_field, display_value};
