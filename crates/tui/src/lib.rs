//! Terminal interface: application state, forms, and rendering.

pub mod app;
pub mod form;
pub mod ui;
