//! Model layer - centralized state management
//!
//! - report data and the tab descriptors derived from it
//! - category selection and "see all" routes
//! - the rescan state machine, its notifications and history
//! - modal overlay management

pub mod account;
pub mod category;
pub mod history;
pub mod modal;
pub mod notification;
pub mod report;
pub mod rescan;
pub mod route;
pub mod selection;
pub mod tabs;

pub use account::UserAccount;
pub use category::Category;
pub use report::ReportData;
pub use rescan::RescanDispatcher;
pub use tabs::{TabDescriptor, TabModel};
