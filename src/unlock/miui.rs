//! MIUI keyguard (every MIUI release except 10)

use super::context::LockContext;
use super::credential::Credential;
use super::error::UnlockResult;
use super::strategy::LockScreen;
use crate::device::{Selector, UiProbe};

const LAYER_IDS: [&str; 4] = [
    "com.android.keyguard:id/unlock_screen_sim_card_info",
    "com.android.keyguard:id/miui_unlock_screen_digital_clock",
    "com.android.keyguard:id/miui_porch_notification_and_music_control_container",
    "com.android.keyguard:id/notification_message_view",
];
const PATTERN_VIEW: &str = "com.android.keyguard:id/lockPattern";
const PASSWORD_FIELD: &str = "com.android.keyguard:id/miui_mixed_password_input_field";
const KEYPAD: &str = "com.android.keyguard:id/numeric_inputview";
const LOCKED_HINT: &str = "com.android.keyguard:id/phone_locked_textview";

#[derive(Debug, Clone, Copy, Default)]
pub struct MiuiLockScreen;

impl MiuiLockScreen {
    fn wrong_credential_marker() -> Selector {
        Selector::id(LOCKED_HINT)
    }

    async fn unlock_pattern<P: UiProbe>(
        &self,
        ctx: &LockContext<'_, P>,
        credential: &Credential,
        pattern_size: u32,
    ) -> UnlockResult<bool> {
        let Some(view) = ctx
            .probe
            .find_one(&Selector::id(PATTERN_VIEW), ctx.config.find_timeout)
            .await?
        else {
            return Ok(false);
        };
        ctx.gesture_unlock(view.bounds, credential, pattern_size).await?;
        ctx.check_unlock(&Self::wrong_credential_marker()).await
    }

    async fn unlock_password<P: UiProbe>(
        &self,
        ctx: &LockContext<'_, P>,
        credential: &Credential,
    ) -> UnlockResult<bool> {
        ctx.enter_password(credential).await?;
        ctx.check_unlock(&Self::wrong_credential_marker()).await
    }

    /// Digits are matched by label, scoped to the keypad so that clock or
    /// date text elsewhere on the keyguard is never tapped.
    async fn unlock_key<P: UiProbe>(
        &self,
        ctx: &LockContext<'_, P>,
        credential: &Credential,
    ) -> UnlockResult<bool> {
        let keypad = Selector::id(KEYPAD);
        for key in credential.keys() {
            let button = ctx
                .probe
                .find_within(&keypad, &Selector::text(key), ctx.config.find_timeout)
                .await?;
            let Some(button) = button else {
                log::debug!("🔢 MIUI keypad is missing a credential key");
                return Ok(false);
            };
            ctx.probe.click_node(&button).await?;
        }
        ctx.check_unlock(&Self::wrong_credential_marker()).await
    }
}

impl LockScreen for MiuiLockScreen {
    async fn has_layer<P: UiProbe>(&self, ctx: &LockContext<'_, P>) -> UnlockResult<bool> {
        ctx.any_exists(&LAYER_IDS).await
    }

    async fn unlock<P: UiProbe>(
        &self,
        ctx: &LockContext<'_, P>,
        credential: &Credential,
        pattern_size: u32,
    ) -> UnlockResult<bool> {
        if ctx.exists(&Selector::id(PATTERN_VIEW)).await? {
            log::debug!("🔐 MIUI lock method: pattern");
            self.unlock_pattern(ctx, credential, pattern_size).await
        } else if ctx.exists(&Selector::id(PASSWORD_FIELD)).await? {
            log::debug!("🔐 MIUI lock method: password");
            self.unlock_password(ctx, credential).await
        } else if ctx.exists(&Selector::id(KEYPAD)).await? {
            log::debug!("🔐 MIUI lock method: PIN");
            self.unlock_key(ctx, credential).await
        } else {
            ctx.unrecognized_layout(&Self::wrong_credential_marker())
                .await
        }
    }
}
