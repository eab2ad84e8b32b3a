// Lock screen strategies
// One implementation per skin; `UnlockStrategy` picks one at runtime and
// forwards to it the same way `AdbBackend` forwards to its transports.

use super::context::LockContext;
use super::credential::Credential;
use super::error::UnlockResult;
use super::miui::MiuiLockScreen;
use super::miui10::Miui10LockScreen;
use super::native::NativeLockScreen;
use super::variant::DeviceVariant;
use crate::device::UiProbe;

#[allow(async_fn_in_trait)]
pub trait LockScreen {
    /// The notification/clock layer covering the credential entry is up.
    async fn has_layer<P: UiProbe>(&self, ctx: &LockContext<'_, P>) -> UnlockResult<bool>;

    /// One unlock attempt. `Ok(false)` means "try again"; a wrong credential
    /// comes back as a terminal error.
    async fn unlock<P: UiProbe>(
        &self,
        ctx: &LockContext<'_, P>,
        credential: &Credential,
        pattern_size: u32,
    ) -> UnlockResult<bool>;
}

#[derive(Debug, Clone)]
pub enum UnlockStrategy {
    Native(NativeLockScreen),
    Miui(MiuiLockScreen),
    Miui10(Miui10LockScreen),
}

impl UnlockStrategy {
    pub fn for_variant(variant: DeviceVariant) -> Self {
        match variant {
            DeviceVariant::Native => UnlockStrategy::Native(NativeLockScreen),
            DeviceVariant::Miui => UnlockStrategy::Miui(MiuiLockScreen),
            DeviceVariant::Miui10 => UnlockStrategy::Miui10(Miui10LockScreen::default()),
        }
    }

    pub fn variant(&self) -> DeviceVariant {
        match self {
            UnlockStrategy::Native(_) => DeviceVariant::Native,
            UnlockStrategy::Miui(_) => DeviceVariant::Miui,
            UnlockStrategy::Miui10(_) => DeviceVariant::Miui10,
        }
    }
}

impl LockScreen for UnlockStrategy {
    async fn has_layer<P: UiProbe>(&self, ctx: &LockContext<'_, P>) -> UnlockResult<bool> {
        match self {
            UnlockStrategy::Native(s) => s.has_layer(ctx).await,
            UnlockStrategy::Miui(s) => s.has_layer(ctx).await,
            UnlockStrategy::Miui10(s) => s.has_layer(ctx).await,
        }
    }

    async fn unlock<P: UiProbe>(
        &self,
        ctx: &LockContext<'_, P>,
        credential: &Credential,
        pattern_size: u32,
    ) -> UnlockResult<bool> {
        match self {
            UnlockStrategy::Native(s) => s.unlock(ctx, credential, pattern_size).await,
            UnlockStrategy::Miui(s) => s.unlock(ctx, credential, pattern_size).await,
            UnlockStrategy::Miui10(s) => s.unlock(ctx, credential, pattern_size).await,
        }
    }
}
