//! UI Components
//!
//! Each component encapsulates its own state, event handling, and rendering logic.
//! Components communicate through Actions rather than direct state mutation.

pub mod help_dialog;
pub mod history_dialog;
pub mod home;
pub mod layout;
pub mod quit_dialog;
pub mod table;
pub mod target_selector;

pub use help_dialog::HelpDialog;
pub use history_dialog::HistoryDialog;
pub use home::{draw_home_screen, HomeComponent, HomeRenderContext};
pub use layout::{calculate_main_layout, centered_popup};
pub use quit_dialog::QuitDialog;
pub use table::TableComponent;
pub use target_selector::RescanTargetDialog;
