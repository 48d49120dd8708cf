pub mod debounce;
pub mod service;
pub mod session;

pub use service::{SearchOutcome, SearchService};
