// Unlock module - keyguard automation
// Detects the lock screen skin, clears the notification layer and enters the
// credential through the matching strategy. Everything here talks to the
// device only through `device::UiProbe`.

pub mod config;
pub mod context;
pub mod credential;
pub mod error;
pub mod grid;
pub mod miui;
pub mod miui10;
pub mod native;
pub mod strategy;
pub mod unlocker;
pub mod variant;


pub use config::{UnlockConfig, create_english_config};
pub use context::LockContext;
pub use credential::{Credential, MIN_CREDENTIAL_LEN};
pub use error::{FailureReason, UnlockError, UnlockResult};
pub use grid::{PATTERN_SIZES, PatternGrid, pattern_cell_count};
pub use strategy::{LockScreen, UnlockStrategy};
pub use unlocker::{UnlockOutcome, UnlockState, Unlocker};
pub use variant::{DeviceVariant, MIUI_VERSION_PROP};
