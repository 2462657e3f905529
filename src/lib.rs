pub mod app;
pub mod common;

pub use app::Application;
pub use common::{render_outcome, render_summary, write_report};
