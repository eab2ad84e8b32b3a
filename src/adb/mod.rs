// ADB module - Android Debug Bridge transport
// This module provides abstractions for running shell commands on Android
// devices, either through the external `adb` binary or the pure Rust client.

pub mod backend;
pub mod error;
pub mod rust_impl;
pub mod shell;
pub mod types;

#[cfg(test)]
mod tests;

// Re-export the main types and functions for easy access
pub use backend::AdbBackend;
pub use error::{AdbError, AdbResult};
pub use rust_impl::RustAdb;
pub use shell::AdbShell;
pub use types::{AdbClient, Device};
