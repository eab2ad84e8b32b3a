//! MIUI 10 keyguard: its own layer ids, stock credential entry

use super::context::LockContext;
use super::credential::Credential;
use super::error::UnlockResult;
use super::native::NativeLockScreen;
use super::strategy::LockScreen;
use crate::device::UiProbe;

const LAYER_IDS: [&str; 5] = [
    "com.android.systemui:id/awesome_lock_screen_container",
    "com.android.systemui:id/notification_container_parent",
    "com.android.systemui:id/keyguard_header",
    "com.android.systemui:id/keyguard_carrier_text",
    "com.android.systemui:id/notification_panel",
];

#[derive(Debug, Clone, Copy, Default)]
pub struct Miui10LockScreen {
    native: NativeLockScreen,
}

impl LockScreen for Miui10LockScreen {
    async fn has_layer<P: UiProbe>(&self, ctx: &LockContext<'_, P>) -> UnlockResult<bool> {
        ctx.any_exists(&LAYER_IDS).await
    }

    async fn unlock<P: UiProbe>(
        &self,
        ctx: &LockContext<'_, P>,
        credential: &Credential,
        pattern_size: u32,
    ) -> UnlockResult<bool> {
        self.native.unlock(ctx, credential, pattern_size).await
    }
}
