use super::error::{AdbError, AdbResult};
use super::rust_impl::RustAdb;
use super::shell::AdbShell;
use super::types::{AdbClient, Device};

pub enum AdbBackend {
    Shell(AdbShell),
    Rust(RustAdb),
}

impl AdbBackend {
    pub async fn list_devices(use_rust: bool) -> AdbResult<Vec<Device>> {
        if use_rust {
            <RustAdb as AdbClient>::list_devices().await
        } else {
            AdbShell::list_devices().await
        }
    }

    pub async fn connect_first(use_rust: bool) -> AdbResult<Self> {
        let devices = Self::list_devices(use_rust).await?;
        let first = devices.into_iter().next().ok_or(AdbError::NoDevices)?;
        Self::new_with_device(&first.name, use_rust).await
    }

    pub async fn new_with_device(name: &str, use_rust: bool) -> AdbResult<Self> {
        if use_rust {
            Ok(AdbBackend::Rust(
                <RustAdb as AdbClient>::new_with_device(name).await?,
            ))
        } else {
            Ok(AdbBackend::Shell(AdbShell::new_with_device(name).await?))
        }
    }

    pub fn impl_str(&self) -> &'static str {
        match self {
            AdbBackend::Shell(_) => "shell",
            AdbBackend::Rust(_) => "rust",
        }
    }

    pub fn device_name(&self) -> &str {
        match self {
            AdbBackend::Shell(s) => s.device_name(),
            AdbBackend::Rust(r) => r.device_name(),
        }
    }

    pub fn screen_dimensions(&self) -> (u32, u32) {
        match self {
            AdbBackend::Shell(s) => s.screen_dimensions(),
            AdbBackend::Rust(r) => r.screen_dimensions(),
        }
    }

    pub fn transport_id(&self) -> Option<u32> {
        match self {
            AdbBackend::Shell(s) => s.transport_id(),
            AdbBackend::Rust(r) => r.transport_id(),
        }
    }

    pub async fn shell(&self, command: &str) -> AdbResult<String> {
        match self {
            AdbBackend::Shell(s) => s.shell(command).await,
            AdbBackend::Rust(r) => r.shell(command).await,
        }
    }

    pub async fn tap(&self, x: u32, y: u32) -> AdbResult<()> {
        match self {
            AdbBackend::Shell(s) => s.tap(x, y).await,
            AdbBackend::Rust(r) => r.tap(x, y).await,
        }
    }

    pub async fn swipe(
        &self,
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
        duration: Option<u32>,
    ) -> AdbResult<()> {
        match self {
            AdbBackend::Shell(s) => s.swipe(x1, y1, x2, y2, duration).await,
            AdbBackend::Rust(r) => r.swipe(x1, y1, x2, y2, duration).await,
        }
    }
}

impl AdbClient for AdbBackend {
    async fn list_devices() -> AdbResult<Vec<Device>>
    where
        Self: Sized,
    {
        // trait-level construction has no impl flag; use the adb_client transport
        AdbBackend::list_devices(true).await
    }

    async fn new_with_device(device_name: &str) -> AdbResult<Self>
    where
        Self: Sized,
    {
        AdbBackend::new_with_device(device_name, true).await
    }

    async fn shell(&self, command: &str) -> AdbResult<String> {
        self.shell(command).await
    }

    async fn tap(&self, x: u32, y: u32) -> AdbResult<()> {
        self.tap(x, y).await
    }

    async fn swipe(
        &self,
        x1: u32,
        y1: u32,
        x2: u32,
        y2: u32,
        duration: Option<u32>,
    ) -> AdbResult<()> {
        self.swipe(x1, y1, x2, y2, duration).await
    }

    fn screen_dimensions(&self) -> (u32, u32) {
        self.screen_dimensions()
    }

    fn device_name(&self) -> &str {
        self.device_name()
    }

    fn transport_id(&self) -> Option<u32> {
        self.transport_id()
    }
}
