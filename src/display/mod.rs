//! Display rendering
//!
//! Turns a classified verdict into the short text + icon pair shown on a
//! single-line display, and serializes it for the device and the static
//! file publisher.

pub mod types;
pub mod generator;
pub mod formatters;

pub use types::{DisplayFrame, DisplayPayload, PublishReport, FAILURE_TEXT, NO_DATA_TEXT, WARNING_ICON};
pub use generator::{format, icon_for, render_payload};
pub use formatters::{JsonFormatter, MarkdownFormatter};
