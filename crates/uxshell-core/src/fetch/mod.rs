pub mod errors;
pub mod types;

pub use errors::FetchError;
pub use types::{FetchOperation, Fetcher};
