pub mod adb;
pub mod args;
pub mod device;
pub mod unlock;

pub use adb::AdbBackend;
pub use unlock::{Credential, UnlockConfig, UnlockOutcome, Unlocker};
