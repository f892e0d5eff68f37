//! Polls a product list endpoint and keeps a rendered list in sync with it.

pub mod clients;
pub mod config;
pub mod error;
pub mod models;
pub mod render;
pub mod services;
pub mod utils;

pub use clients::HttpClient;
pub use config::{Settings, Variant};
pub use error::{Error, Result};
pub use render::{GenericFormat, ListElement, RecordFormat, RenderTarget, StdoutList, TypedFormat};
pub use services::{CycleOutcome, Poller, PollerHandle, PollerOptions, ProductSource};
