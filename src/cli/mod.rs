//! Terminal rendering for the app's views

pub mod convert;
pub mod history;
pub mod multi;
pub mod settings;
pub mod setup;
pub mod sync;
pub mod ui;
