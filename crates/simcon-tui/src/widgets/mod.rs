//! Custom widget components

mod activity;
mod config_view;
mod confirm_dialog;
mod dashboard;
mod footer;
mod header;
pub mod modal_overlay;

pub use activity::ActivityPanel;
pub use config_view::ConfigPanel;
pub use confirm_dialog::ConfirmDialog;
pub use dashboard::DashboardPanel;
pub use footer::{hint, KeyHints, NoticeLine};
pub use header::MainHeader;
