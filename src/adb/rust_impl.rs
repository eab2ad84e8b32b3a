// https://crates.io/crates/adb_client
use super::error::{AdbError, AdbResult, is_disconnect_message};
use super::types::{AdbClient, Device, parse_screen_size};
use adb_client::{ADBDeviceExt, ADBServer, ADBServerDevice};
use std::sync::Arc;
use std::time::Duration;
use tokio::sync::Mutex;

// uiautomator dumps on slow devices take several seconds
const SHELL_TIMEOUT: Duration = Duration::from_secs(15);

pub struct RustAdb {
    device: Device,
    server_device: Arc<Mutex<ADBServerDevice>>,
    screen_x: u32,
    screen_y: u32,
}

impl RustAdb {
    async fn run_shell(&self, command: &str) -> AdbResult<String> {
        // Clone Arc for move into spawn_blocking
        let server_device = Arc::clone(&self.server_device);
        let owned = command.to_string();

        // Wrap the blocking shell_command in spawn_blocking so timeout can work
        let shell_future = tokio::task::spawn_blocking(move || -> AdbResult<Vec<u8>> {
            let mut out: Vec<u8> = Vec::new();
            let mut dev = server_device.blocking_lock();
            dev.shell_command(&[owned.as_str()], &mut out)
                .map_err(|e| AdbError::ShellCommandFailed {
                    command: owned.clone(),
                    description: e.to_string(),
                })?;
            Ok(out)
        });

        let out = tokio::time::timeout(SHELL_TIMEOUT, shell_future)
            .await
            .map_err(|_| AdbError::Timeout {
                duration: SHELL_TIMEOUT,
                description: format!("shell '{command}' (device may be disconnected)"),
            })???;
        Ok(String::from_utf8_lossy(&out).into_owned())
    }

    async fn read_screen_size(&self) -> AdbResult<(u32, u32)> {
        let stdout = self.run_shell("wm size").await?;
        parse_screen_size(&stdout).ok_or(AdbError::ScreenSizeParseFailed)
    }

    fn check_bounds(&self, x: u32, y: u32) -> AdbResult<()> {
        if x >= self.screen_x || y >= self.screen_y {
            return Err(AdbError::OutOfBounds { x, y });
        }
        Ok(())
    }
}

impl AdbClient for RustAdb {
    async fn list_devices() -> AdbResult<Vec<Device>> {
        let mut server = ADBServer::default();
        let device_list = tokio::task::spawn_blocking(move || server.devices())
            .await?
            .map_err(|e| AdbError::DeviceEnumerationFailed {
                description: e.to_string(),
            })?;
        Ok(device_list
            .into_iter()
            .map(|d| Device {
                name: d.identifier,
                transport_id: None,
            })
            .collect())
    }

    async fn new_with_device(device_name: &str) -> AdbResult<Self> {
        let mut server = ADBServer::default();
        let name = device_name.to_string();
        let server_device = tokio::task::spawn_blocking(move || {
            if name.is_empty() {
                server.get_device()
            } else {
                server.get_device_by_name(&name)
            }
        })
        .await?
        .map_err(|e| {
            let description = e.to_string();
            if is_disconnect_message(&description) {
                AdbError::DeviceNotFound {
                    name: device_name.to_string(),
                }
            } else {
                AdbError::ConnectionFailed { description }
            }
        })?;

        let mut adb = RustAdb {
            device: Device {
                name: device_name.to_string(),
                transport_id: None,
            },
            server_device: Arc::new(Mutex::new(server_device)),
            screen_x: 0,
            screen_y: 0,
        };
        let (sx, sy) = adb.read_screen_size().await?;
        adb.screen_x = sx;
        adb.screen_y = sy;
        Ok(adb)
    }

    async fn shell(&self, command: &str) -> AdbResult<String> {
        self.run_shell(command).await
    }

    async fn tap(&self, x: u32, y: u32) -> AdbResult<()> {
        self.check_bounds(x, y)?;
        self.run_shell(&format!("input tap {x} {y}")).await?;
        Ok(())
    }

    async fn swipe(
        &self,
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
        duration: Option<u32>,
    ) -> AdbResult<()> {
        for &(x, y) in &[(x1, y1), (x2, y2)] {
            self.check_bounds(x, y)?;
        }
        let mut command = format!("input swipe {x1} {y1} {x2} {y2}");
        if let Some(d) = duration {
            command.push_str(&format!(" {d}"));
        }
        self.run_shell(&command).await?;
        Ok(())
    }

    fn screen_dimensions(&self) -> (u32, u32) {
        (self.screen_x, self.screen_y)
    }

    fn device_name(&self) -> &str {
        &self.device.name
    }

    fn transport_id(&self) -> Option<u32> {
        None
    }
}
