pub mod poller;
pub mod source;

pub use poller::{CycleOutcome, Poller, PollerHandle, PollerOptions};
pub use source::ProductSource;
