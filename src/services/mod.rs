//! External service interactions
//!
//! - Detail report loading
//! - Session and bearer token lookup
//! - The manual scan HTTP client
//! - Background execution of scan requests

pub mod report;
pub mod scan_client;
pub mod scan_runner;
pub mod session;

pub use report::{domains_from_report, load_report};
pub use scan_client::build_client;
pub use scan_runner::ScanRunner;
pub use session::{SessionStore, TokenProvider};

#[cfg(test)]
pub use session::StaticToken;
