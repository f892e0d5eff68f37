pub mod format;
pub mod list;

pub use format::{GenericFormat, RecordFormat, TypedFormat};
pub use list::{ListElement, RenderTarget, StdoutList};
