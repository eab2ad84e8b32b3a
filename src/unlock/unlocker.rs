// Unlock orchestrator
// Wakes the screen, clears the notification layer, then drives the
// variant's credential entry with a bounded retry budget.

use super::config::UnlockConfig;
use super::context::LockContext;
use super::credential::Credential;
use super::error::{FailureReason, UnlockError, UnlockResult};
use super::strategy::{LockScreen, UnlockStrategy};
use super::variant::{DeviceVariant, MIUI_VERSION_PROP};
use crate::device::{KeyCode, Selector, UiProbe};
use serde::Serialize;
use std::cell::Cell;
use tokio::time::sleep;

const SYSTEMUI_PACKAGE: &str = "com.android.systemui";
const AMBIENT_SCRIM: &str = "com.android.systemui:id/scrim_notifications";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UnlockState {
    Idle,
    AwaitingWake,
    DismissingOverlay,
    CheckingProtection,
    Unlocking,
    Success,
    Failed,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum UnlockOutcome {
    /// The keyguard let go while the layer was being dismissed
    AlreadyUnlocked,
    /// Nothing to enter: not locked, or locked without a credential
    NotSecured,
    /// A credential attempt succeeded
    Unlocked,
}

pub struct Unlocker<P: UiProbe> {
    probe: P,
    config: UnlockConfig,
    strategy: UnlockStrategy,
    state: Cell<UnlockState>,
}

impl<P: UiProbe> Unlocker<P> {
    /// Pick the strategy from the device's MIUI version property.
    pub async fn detect(probe: P, config: UnlockConfig) -> UnlockResult<Self> {
        let version = probe.get_prop(MIUI_VERSION_PROP).await?;
        let variant = DeviceVariant::detect(&version);
        log::info!("📱 Lock screen variant: {variant} ({MIUI_VERSION_PROP}='{}')", version.trim());
        Ok(Self::with_variant(probe, config, variant))
    }

    pub fn with_variant(probe: P, config: UnlockConfig, variant: DeviceVariant) -> Self {
        Self {
            probe,
            config,
            strategy: UnlockStrategy::for_variant(variant),
            state: Cell::new(UnlockState::Idle),
        }
    }

    pub fn variant(&self) -> DeviceVariant {
        self.strategy.variant()
    }

    pub fn state(&self) -> UnlockState {
        self.state.get()
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    fn context(&self) -> LockContext<'_, P> {
        LockContext::new(&self.probe, &self.config)
    }

    fn change_state(&self, new_state: UnlockState) {
        let old = self.state.get();
        if old != new_state {
            log::debug!("🔐 Unlock state: {old:?} -> {new_state:?}");
            self.state.set(new_state);
        }
    }

    async fn fail(&self, reason: FailureReason) -> UnlockError {
        self.change_state(UnlockState::Failed);
        self.context().fail(reason).await
    }

    pub async fn is_locked(&self) -> UnlockResult<bool> {
        Ok(self.probe.is_keyguard_locked().await?)
    }

    /// Always-on display: screen reports on but only the ambient scrim of
    /// SystemUI is showing.
    pub async fn is_ambient(&self) -> UnlockResult<bool> {
        if !self.probe.is_screen_on().await? {
            return Ok(false);
        }
        if self.probe.current_package().await? != SYSTEMUI_PACKAGE {
            return Ok(false);
        }
        Ok(self
            .probe
            .exists(&Selector::id(AMBIENT_SCRIM).clickable(false))
            .await?)
    }

    /// Turn the screen on and leave ambient display. Waiting for the screen
    /// itself is unbounded; the ambient power-key retries share the budget.
    pub async fn wake_up(&self) -> UnlockResult<()> {
        let budget = self.config.max_retry_times;
        for attempt in 0..=budget {
            while !self.probe.is_screen_on().await? {
                self.probe.wake_up().await?;
                sleep(self.config.screen_on_poll).await;
            }
            if !self.is_ambient().await? {
                return Ok(());
            }
            log::debug!("🌙 Ambient display, pressing power (attempt {attempt})");
            self.probe.key_event(KeyCode::Power).await?;
            sleep(self.config.settle_delay).await;
            if attempt >= budget || !self.is_ambient().await? {
                return Ok(());
            }
            sleep(self.config.ambient_backoff).await;
        }
        Ok(())
    }

    /// Swipe up from near the bottom edge to mid screen.
    pub async fn open_layer(&self) -> UnlockResult<()> {
        let (width, height) = self.probe.screen_size();
        let x = width / 2;
        let from = (x, height.saturating_sub(self.config.layer_swipe_bottom_margin));
        let to = (x, height / 2);
        self.probe
            .swipe(from, to, self.config.layer_swipe_duration)
            .await?;
        sleep(self.config.settle_delay).await;
        Ok(())
    }

    /// One credential attempt through the variant strategy.
    pub async fn unlock(&self, credential: &Credential, pattern_size: u32) -> UnlockResult<bool> {
        credential.validate()?;
        self.strategy
            .unlock(&self.context(), credential, pattern_size)
            .await
    }

    /// Full flow from a dark screen to an unlocked device. Terminal failures
    /// have already blanked the screen; the caller is expected to shut down.
    pub async fn open_lock(&self, credential: &Credential) -> UnlockResult<UnlockOutcome> {
        credential.validate()?;
        let ctx = self.context();
        let pattern_size = self.config.pattern_size;

        self.change_state(UnlockState::AwaitingWake);
        self.wake_up().await?;

        let locked = self.is_locked().await?;
        let secure = self.probe.is_keyguard_secure().await?;
        log::debug!("🔐 Keyguard: locked={locked} secure={secure}");

        self.change_state(UnlockState::DismissingOverlay);
        let mut swipes = 0;
        while self.strategy.has_layer(&ctx).await? {
            if !self.is_locked().await? {
                self.change_state(UnlockState::Success);
                return Ok(UnlockOutcome::AlreadyUnlocked);
            }
            if swipes >= self.config.max_retry_times {
                self.probe.notify("Failed to open the lock screen layer");
                return Err(self.fail(FailureReason::LayerNotDismissed).await);
            }
            log::debug!("⬆️ Swiping up the lock screen layer");
            self.open_layer().await?;
            swipes += 1;
        }

        self.change_state(UnlockState::CheckingProtection);
        if !(locked && secure) {
            self.change_state(UnlockState::Success);
            return Ok(UnlockOutcome::NotSecured);
        }

        self.change_state(UnlockState::Unlocking);
        for attempt in 1..=self.config.max_retry_times {
            match self.unlock(credential, pattern_size).await {
                Ok(true) => {
                    log::info!("🔓 Unlocked on attempt {attempt}");
                    self.change_state(UnlockState::Success);
                    return Ok(UnlockOutcome::Unlocked);
                }
                Ok(false) => self.probe.notify("Unlock failed, retrying"),
                Err(e) => {
                    if e.is_terminal() {
                        self.change_state(UnlockState::Failed);
                    }
                    return Err(e);
                }
            }
        }

        self.probe.notify("Unlock failed, giving up");
        Err(self.fail(FailureReason::RetriesExhausted).await)
    }
}
