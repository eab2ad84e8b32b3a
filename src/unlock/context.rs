// Helpers shared by every lock screen variant
use super::config::UnlockConfig;
use super::credential::Credential;
use super::error::{FailureReason, UnlockError, UnlockResult};
use super::grid::PatternGrid;
use crate::device::{KeyCode, Rect, Selector, UiProbe};
use std::time::Duration;
use tokio::time::sleep;

/// Borrowed view of the probe and configuration handed to strategies.
pub struct LockContext<'a, P: UiProbe> {
    pub probe: &'a P,
    pub config: &'a UnlockConfig,
}

impl<'a, P: UiProbe> LockContext<'a, P> {
    pub fn new(probe: &'a P, config: &'a UnlockConfig) -> Self {
        Self { probe, config }
    }

    pub async fn is_locked(&self) -> UnlockResult<bool> {
        Ok(self.probe.is_keyguard_locked().await?)
    }

    pub async fn exists(&self, selector: &Selector) -> UnlockResult<bool> {
        Ok(self.probe.exists(selector).await?)
    }

    /// True when any of `resource_ids` is on screen.
    pub async fn any_exists(&self, resource_ids: &[&str]) -> UnlockResult<bool> {
        for id in resource_ids {
            if self.exists(&Selector::id(*id)).await? {
                return Ok(true);
            }
        }
        Ok(false)
    }

    /// Blank the screen and produce the terminal error for `reason`.
    pub async fn fail(&self, reason: FailureReason) -> UnlockError {
        log::error!("❌ Unlock failed: {reason}");
        if let Err(e) = self.probe.key_event(KeyCode::Power).await {
            log::warn!("⚠️ Could not press power after failure: {e}");
        }
        UnlockError::Terminal { reason }
    }

    /// Draw the pattern over the view at `bounds`. Cells are checked against
    /// the grid before anything touches the screen.
    pub async fn gesture_unlock(
        &self,
        bounds: Rect,
        credential: &Credential,
        pattern_size: u32,
    ) -> UnlockResult<()> {
        let cells = credential.pattern_cells(pattern_size)?;
        let grid = PatternGrid::new(bounds, pattern_size)?;
        let points = grid.trace(&cells)?;
        let duration = self.config.gesture_step * cells.len() as u32;
        log::debug!(
            "🖐️ Pattern gesture: {} points over {}ms",
            points.len(),
            duration.as_millis()
        );
        self.probe.gesture(duration, &points).await?;
        Ok(())
    }

    /// Type the credential into the focused field and submit it.
    pub async fn enter_password(&self, credential: &Credential) -> UnlockResult<()> {
        self.probe.input_text(&credential.joined()).await?;
        let confirm = Selector::text(self.config.confirm_label.as_str());
        match self.probe.find_one(&confirm, Duration::ZERO).await? {
            Some(button) => self.probe.click_node(&button).await?,
            None => self.probe.key_event(KeyCode::Enter).await?,
        }
        sleep(self.config.settle_delay).await;
        Ok(())
    }

    /// Wait for the keyguard to react, then decide. The wrong-credential
    /// marker is terminal; otherwise success means the keyguard let go.
    pub async fn check_unlock(&self, wrong_credential: &Selector) -> UnlockResult<bool> {
        sleep(self.config.settle_delay).await;
        if self.exists(wrong_credential).await? {
            self.probe.notify("Wrong password");
            return Err(self.fail(FailureReason::WrongCredential).await);
        }
        Ok(!self.is_locked().await?)
    }

    /// None of the modality markers matched; record the device for later
    /// support and fall back to the plain locked-state check.
    pub async fn unrecognized_layout(&self, wrong_credential: &Selector) -> UnlockResult<bool> {
        let identity = self.probe.device_identity().await?;
        log::warn!("🔍 Unrecognized lock screen layout on {identity}");
        self.probe.notify("Could not identify the lock method");
        self.check_unlock(wrong_credential).await
    }
}
