//! Configuration for the unlock flow

use std::time::Duration;

#[derive(Debug, Clone, PartialEq)]
pub struct UnlockConfig {
    /// Ceiling shared by the overlay, unlock and ambient-wake loops
    pub max_retry_times: u32,
    /// Pattern grid dimension (3 for the usual 3x3 pattern)
    pub pattern_size: u32,
    /// How long a single element lookup keeps polling
    pub find_timeout: Duration,
    /// Wait between wake requests while the screen is off
    pub screen_on_poll: Duration,
    /// UI settle time after a swipe, key press or credential entry
    pub settle_delay: Duration,
    /// Cooldown before retrying an ambient display that ignored the power key
    pub ambient_backoff: Duration,
    /// Duration of the swipe that lifts the notification layer
    pub layer_swipe_duration: Duration,
    /// Distance from the bottom edge where the layer swipe starts
    pub layer_swipe_bottom_margin: u32,
    /// Pattern gesture time per point
    pub gesture_step: Duration,
    /// Fragment of the stock keyguard message shown after a wrong credential
    pub wrong_credential_hint: String,
    /// Label of the password confirm button
    pub confirm_label: String,
}

impl Default for UnlockConfig {
    fn default() -> Self {
        Self {
            max_retry_times: 10,
            pattern_size: 3,
            find_timeout: Duration::from_millis(1000),
            screen_on_poll: Duration::from_millis(1000),
            settle_delay: Duration::from_millis(1500),
            ambient_backoff: Duration::from_millis(5000),
            layer_swipe_duration: Duration::from_millis(500),
            layer_swipe_bottom_margin: 300,
            gesture_step: Duration::from_millis(100),
            wrong_credential_hint: "重试".to_string(),
            confirm_label: "确认".to_string(),
        }
    }
}

/// Preset for English-language system UI
pub fn create_english_config() -> UnlockConfig {
    UnlockConfig {
        wrong_credential_hint: "Try again".to_string(),
        confirm_label: "OK".to_string(),
        ..UnlockConfig::default()
    }
}
