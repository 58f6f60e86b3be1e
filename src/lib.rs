//! Launch Dash: historical launch outcomes, by site and payload mass.
//!
//! The `data` module is the GUI-free core: load the launch table once, then
//! aggregate successes per site and filter launches by payload range. The
//! remaining modules wrap it in an eframe dashboard.

pub mod app;
pub mod color;
pub mod config;
pub mod data;
pub mod error;
pub mod state;
pub mod ui;

pub use error::{DashError, Result};
