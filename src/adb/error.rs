use thiserror::Error;

/// A specialized `Result` type for ADB operations.
pub type AdbResult<T> = Result<T, AdbError>;

/// The error type for all ADB-related operations.
#[derive(Debug, Error)]
pub enum AdbError {
    #[error(
        "'adb' binary not usable: {description}. Install Android Platform Tools or run with --impl=rust."
    )]
    AdbBinaryUnavailable { description: String },

    #[error("Failed to enumerate devices: {description}")]
    DeviceEnumerationFailed { description: String },

    #[error("No devices available. Connect a device and authorize USB debugging.")]
    NoDevices,

    #[error("Device '{name}' not found")]
    DeviceNotFound { name: String },

    #[error("Failed to connect to device: {description}")]
    ConnectionFailed { description: String },

    #[error("Shell command '{command}' failed: {description}")]
    ShellCommandFailed {
        command: String,
        description: String,
    },

    #[error("Operation timed out after {duration:?}: {description}")]
    Timeout {
        duration: std::time::Duration,
        description: String,
    },

    #[error("Task failed to complete: {source}")]
    JoinError {
        #[from]
        source: tokio::task::JoinError,
    },

    #[error("Could not parse screen size from 'wm size' output.")]
    ScreenSizeParseFailed,

    #[error("Could not parse UI hierarchy dump: {description}")]
    HierarchyParseFailed { description: String },

    #[error("Coordinates are out of bounds: x={x}, y={y}")]
    OutOfBounds { x: u32, y: u32 },

    #[error("Refusing to read property with unsafe name '{name}'")]
    InvalidPropertyName { name: String },
}

impl AdbError {
    /// Check whether the error means the device link is gone rather than a
    /// single command misbehaving.
    pub fn is_disconnect(&self) -> bool {
        match self {
            AdbError::ShellCommandFailed { description, .. } => is_disconnect_message(description),
            AdbError::Timeout { .. } | AdbError::NoDevices | AdbError::DeviceNotFound { .. } => {
                true
            }
            _ => false,
        }
    }
}

/// Heuristic match on transport error text from either backend.
pub fn is_disconnect_message(message: &str) -> bool {
    let lower = message.to_lowercase();
    lower.contains("device offline")
        || lower.contains("no devices/emulators found")
        || lower.contains("device not found")
        || lower.contains("broken pipe")
        || lower.contains("connection reset")
        || message.contains("CLSE")
        || lower.contains("no write endpoint")
}
