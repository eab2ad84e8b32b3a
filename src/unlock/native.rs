//! Stock Android (AOSP SystemUI) keyguard

use super::context::LockContext;
use super::credential::Credential;
use super::error::UnlockResult;
use super::strategy::LockScreen;
use crate::device::{Selector, UiProbe};
use std::time::Duration;

const LAYER_SCRIM: &str = "com.android.systemui:id/backgroundDimmed";
const PATTERN_VIEW: &str = "com.android.systemui:id/lockPatternView";
const PASSWORD_ENTRY: &str = "com.android.systemui:id/passwordEntry";
const PIN_ENTRY: &str = "com.android.systemui:id/pinEntry";
const KEY_ENTER: &str = "com.android.systemui:id/key_enter";
const MESSAGE: &str = "android:id/message";

fn key_id(key: &str) -> String {
    format!("com.android.systemui:id/key{key}")
}

#[derive(Debug, Clone, Copy, Default)]
pub struct NativeLockScreen;

impl NativeLockScreen {
    fn wrong_credential_marker<P: UiProbe>(&self, ctx: &LockContext<'_, P>) -> Selector {
        Selector::id(MESSAGE).text_contains(ctx.config.wrong_credential_hint.as_str())
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
        ctx.check_unlock(&self.wrong_credential_marker(ctx)).await
    }

    async fn unlock_password<P: UiProbe>(
        &self,
        ctx: &LockContext<'_, P>,
        credential: &Credential,
    ) -> UnlockResult<bool> {
        ctx.enter_password(credential).await?;
        ctx.check_unlock(&self.wrong_credential_marker(ctx)).await
    }

    async fn unlock_pin<P: UiProbe>(
        &self,
        ctx: &LockContext<'_, P>,
        credential: &Credential,
    ) -> UnlockResult<bool> {
        for key in credential.keys() {
            // a missing button aborts the attempt without pressing anything else
            match ctx
                .probe
                .find_one(&Selector::id(key_id(&key)), Duration::ZERO)
                .await?
            {
                Some(button) => ctx.probe.click_node(&button).await?,
                None => {
                    log::debug!("🔢 Keypad has no button for one of the credential keys");
                    return Ok(false);
                }
            }
        }
        if let Some(enter) = ctx
            .probe
            .find_one(&Selector::id(KEY_ENTER), Duration::ZERO)
            .await?
        {
            ctx.probe.click_node(&enter).await?;
        }
        ctx.check_unlock(&self.wrong_credential_marker(ctx)).await
    }
}

impl LockScreen for NativeLockScreen {
    async fn has_layer<P: UiProbe>(&self, ctx: &LockContext<'_, P>) -> UnlockResult<bool> {
        ctx.exists(&Selector::id(LAYER_SCRIM).visible_to_user(true))
            .await
    }

    async fn unlock<P: UiProbe>(
        &self,
        ctx: &LockContext<'_, P>,
        credential: &Credential,
        pattern_size: u32,
    ) -> UnlockResult<bool> {
        if ctx.exists(&Selector::id(PATTERN_VIEW)).await? {
            log::debug!("🔐 Native lock method: pattern");
            self.unlock_pattern(ctx, credential, pattern_size).await
        } else if ctx.exists(&Selector::id(PASSWORD_ENTRY)).await? {
            log::debug!("🔐 Native lock method: password");
            self.unlock_password(ctx, credential).await
        } else if ctx.exists(&Selector::id(PIN_ENTRY)).await? {
            log::debug!("🔐 Native lock method: PIN");
            self.unlock_pin(ctx, credential).await
        } else {
            ctx.unrecognized_layout(&self.wrong_credential_marker(ctx))
                .await
        }
    }
}
