//! Triagectl library - exposes modules for testing

pub mod commands;
pub mod display;
pub mod errors;
pub mod form;
pub mod logging;
