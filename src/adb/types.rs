// Core ADB types and traits
use super::error::AdbResult;
use serde::Serialize;

// Trait defining ADB capabilities (shell or rust implementations)
#[allow(async_fn_in_trait)]
pub trait AdbClient: Send + Sync {
    async fn list_devices() -> AdbResult<Vec<Device>>
    where
        Self: Sized;
    async fn new_with_device(device_name: &str) -> AdbResult<Self>
    where
        Self: Sized;

    /// Run one command line in the device shell and return its stdout.
    async fn shell(&self, command: &str) -> AdbResult<String>;

    async fn tap(&self, x: u32, y: u32) -> AdbResult<()>;
    async fn swipe(
        &self,
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
        duration: Option<u32>,
    ) -> AdbResult<()>;
    fn screen_dimensions(&self) -> (u32, u32);
    fn device_name(&self) -> &str;
    fn transport_id(&self) -> Option<u32>;
}

#[derive(Debug, PartialEq, Serialize, Clone)]
pub struct Device {
    pub name: String,
    pub transport_id: Option<String>,
}

/// Parse `wm size` output, preferring an override size when present.
pub fn parse_screen_size(stdout: &str) -> Option<(u32, u32)> {
    let mut physical = None;
    for line in stdout.lines() {
        let line = line.trim();
        let (is_override, size_str) = if let Some(rest) = line.strip_prefix("Override size: ") {
            (true, rest)
        } else if let Some(rest) = line.strip_prefix("Physical size: ") {
            (false, rest)
        } else {
            continue;
        };
        let parts: Vec<&str> = size_str.trim().split('x').collect();
        if parts.len() == 2
            && let (Ok(x), Ok(y)) = (parts[0].parse::<u32>(), parts[1].parse::<u32>())
        {
            if is_override {
                return Some((x, y));
            }
            physical = Some((x, y));
        }
    }
    physical
}
