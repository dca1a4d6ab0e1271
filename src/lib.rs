//! Fluxo Assist — guided dialog for generating administrative routine
//! templates per segment and department, exported as CSV, JSON or Markdown.

pub mod config;
pub mod dialog;
pub mod error;
pub mod events;
pub mod export;
pub mod library;
