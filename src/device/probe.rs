// Capabilities the unlock flow needs from the device
use super::geometry::Point;
use super::hierarchy::UiNode;
use super::selector::Selector;
use crate::adb::AdbResult;
use serde::Serialize;
use std::fmt;
use std::time::Duration;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum KeyCode {
    Power,
    Enter,
    Wakeup,
}

impl KeyCode {
    pub fn as_str(&self) -> &'static str {
        match self {
            KeyCode::Power => "KEYCODE_POWER",
            KeyCode::Enter => "KEYCODE_ENTER",
            KeyCode::Wakeup => "KEYCODE_WAKEUP",
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Brand/product/release triple used in diagnostics.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
pub struct DeviceIdentity {
    pub brand: String,
    pub product: String,
    pub release: String,
}

impl fmt::Display for DeviceIdentity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {} {}", self.brand, self.product, self.release)
    }
}

/// Queries and input injection against the live device UI.
///
/// `exists` is a single snapshot check; `find_one` and `find_within` keep
/// looking until `timeout` elapses.
#[allow(async_fn_in_trait)]
pub trait UiProbe {
    async fn exists(&self, selector: &Selector) -> AdbResult<bool>;
    async fn find_one(&self, selector: &Selector, timeout: Duration) -> AdbResult<Option<UiNode>>;
    async fn find_within(
        &self,
        ancestor: &Selector,
        target: &Selector,
        timeout: Duration,
    ) -> AdbResult<Option<UiNode>>;

    async fn click(&self, x: u32, y: u32) -> AdbResult<()>;
    async fn click_node(&self, node: &UiNode) -> AdbResult<()> {
        let (x, y) = node.bounds.center().to_pixels();
        self.click(x, y).await
    }
    async fn swipe(&self, from: (u32, u32), to: (u32, u32), duration: Duration) -> AdbResult<()>;
    async fn gesture(&self, duration: Duration, points: &[Point]) -> AdbResult<()>;
    async fn input_text(&self, text: &str) -> AdbResult<()>;
    async fn key_event(&self, key: KeyCode) -> AdbResult<()>;

    async fn is_screen_on(&self) -> AdbResult<bool>;
    async fn wake_up(&self) -> AdbResult<()>;
    async fn current_package(&self) -> AdbResult<String>;
    fn screen_size(&self) -> (u32, u32);
    async fn device_identity(&self) -> AdbResult<DeviceIdentity>;
    async fn get_prop(&self, name: &str) -> AdbResult<String>;

    /// Keyguard is restricting input.
    async fn is_keyguard_locked(&self) -> AdbResult<bool>;
    /// Keyguard is protected by a PIN, pattern or password.
    async fn is_keyguard_secure(&self) -> AdbResult<bool>;

    /// Short user-facing notice.
    fn notify(&self, message: &str);
}
