//! TUI module for mechlab.
//!
//! Reusable application state for the `lab-tui` binary. Terminal I/O stays
//! in the binary; key handling and frame stepping live here for testing.

#[cfg(feature = "tui")]
pub mod lab_app;

#[cfg(feature = "tui")]
pub use lab_app::LabApp;
