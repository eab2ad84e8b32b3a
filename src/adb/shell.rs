use super::error::{AdbError, AdbResult};
use super::types::{AdbClient, Device, parse_screen_size};
use std::time::Duration;
use tokio::process::Command;

// uiautomator dumps on slow devices take several seconds
const SHELL_TIMEOUT: Duration = Duration::from_secs(15);

pub struct AdbShell {
    pub device: Device,
    pub transport_id: u32,
    pub screen_x: u32,
    pub screen_y: u32,
}

impl AdbShell {
    fn ensure_adb_available() -> AdbResult<()> {
        match std::process::Command::new("adb").arg("version").output() {
            Ok(out) => {
                if !out.status.success() {
                    return Err(AdbError::AdbBinaryUnavailable {
                        description: format!("'adb version' returned non-zero ({})", out.status),
                    });
                }
                Ok(())
            }
            Err(e) => {
                let description = if e.kind() == std::io::ErrorKind::NotFound {
                    "'adb' binary not found in PATH".to_string()
                } else {
                    format!("failed to invoke 'adb': {e}")
                };
                Err(AdbError::AdbBinaryUnavailable { description })
            }
        }
    }

    /// Bind to a listed device by its transport id and read the screen size.
    pub(super) async fn open(device: Device) -> AdbResult<Self> {
        let transport_id = device
            .transport_id
            .as_ref()
            .and_then(|tid| tid.parse::<u32>().ok())
            .ok_or_else(|| AdbError::ConnectionFailed {
                description: format!("device '{}' has no usable transport_id", device.name),
            })?;
        let mut shell = Self {
            device,
            transport_id,
            screen_x: 0,
            screen_y: 0,
        };
        let size_output = shell.run_shell("wm size").await?;
        let (screen_x, screen_y) =
            parse_screen_size(&size_output).ok_or(AdbError::ScreenSizeParseFailed)?;
        shell.screen_x = screen_x;
        shell.screen_y = screen_y;
        Ok(shell)
    }

    pub async fn new_with_device(device_name: &str) -> AdbResult<Self> {
        let devices = Self::list_devices().await?;
        if let Some(device) = devices.into_iter().find(|d| d.name == device_name) {
            return Self::open(device).await;
        }
        let output = Command::new("adb")
            .arg("connect")
            .arg(device_name)
            .output()
            .await
            .map_err(|e| AdbError::ConnectionFailed {
                description: format!("failed to run adb connect: {e}"),
            })?;
        let stdout_str = String::from_utf8_lossy(&output.stdout);
        let stderr_str = String::from_utf8_lossy(&output.stderr);
        if !output.status.success()
            || stdout_str.contains("Connection refused")
            || stderr_str.contains("Connection refused")
        {
            return Err(AdbError::ConnectionFailed {
                description: format!(
                    "adb connect failed: Out:{stdout_str} Err:{stderr_str} Try: 'adb tcpip 5555'"
                ),
            });
        }
        let devices = Self::list_devices().await?;
        if let Some(device) = devices.into_iter().find(|d| d.name == device_name) {
            return Self::open(device).await;
        }
        Err(AdbError::DeviceNotFound {
            name: device_name.to_string(),
        })
    }

    pub fn parse_devices(output: &str) -> Vec<Device> {
        output
            .lines()
            .skip(1)
            .filter_map(|line| {
                let parts: Vec<&str> = line.split_whitespace().collect();
                if parts.len() >= 2 && parts[1] == "device" {
                    let name = parts[0].to_string();
                    let transport_id = parts
                        .iter()
                        .find_map(|part| part.strip_prefix("transport_id:"))
                        .map(str::to_string);
                    Some(Device { name, transport_id })
                } else {
                    None
                }
            })
            .collect()
    }

    pub async fn list_devices() -> AdbResult<Vec<Device>> {
        Self::ensure_adb_available()?;
        let output = Command::new("adb")
            .arg("devices")
            .arg("-l")
            .output()
            .await
            .map_err(|e| AdbError::DeviceEnumerationFailed {
                description: format!("failed to execute adb: {e}"),
            })?;
        if !output.status.success() {
            return Err(AdbError::DeviceEnumerationFailed {
                description: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        let stdout = String::from_utf8_lossy(&output.stdout);
        Ok(Self::parse_devices(&stdout))
    }

    async fn run_shell(&self, command: &str) -> AdbResult<String> {
        let mut cmd = Command::new("adb");
        cmd.arg("-t")
            .arg(self.transport_id.to_string())
            .arg("shell")
            .arg(command)
            .kill_on_drop(true);

        let output = tokio::time::timeout(SHELL_TIMEOUT, cmd.output())
            .await
            .map_err(|_| AdbError::Timeout {
                duration: SHELL_TIMEOUT,
                description: format!("adb shell {command}"),
            })?
            .map_err(|e| AdbError::ShellCommandFailed {
                command: command.to_string(),
                description: e.to_string(),
            })?;
        if !output.status.success() {
            return Err(AdbError::ShellCommandFailed {
                command: command.to_string(),
                description: String::from_utf8_lossy(&output.stderr).into_owned(),
            });
        }
        Ok(String::from_utf8_lossy(&output.stdout).into_owned())
    }

    fn check_bounds(&self, x: u32, y: u32) -> AdbResult<()> {
        if x >= self.screen_x || y >= self.screen_y {
            return Err(AdbError::OutOfBounds { x, y });
        }
        Ok(())
    }
}

impl AdbClient for AdbShell {
    async fn list_devices() -> AdbResult<Vec<Device>> {
        Self::list_devices().await
    }

    async fn new_with_device(device_name: &str) -> AdbResult<Self> {
        Self::new_with_device(device_name).await
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
        self.check_bounds(x1, y1)?;
        self.check_bounds(x2, y2)?;
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
        Some(self.transport_id)
    }
}
