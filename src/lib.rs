//! Construction schedule timeline: lane layout, date/pixel mapping and
//! pointer-driven editing of task spans, hosted in an `eframe` window.

pub mod app;
pub mod config;
pub mod interaction;
pub mod layout;
pub mod logging;
pub mod model;
pub mod store;
pub mod ui;
