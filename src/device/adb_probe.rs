// UiProbe backed by ADB shell commands (uiautomator, dumpsys, input)
use super::dumpsys::{KeyguardState, parse_focused_package, parse_identity, parse_screen_on};
use super::geometry::Point;
use super::hierarchy::{UiHierarchy, UiNode};
use super::input::{escape_input_text, motionevent_script};
use super::probe::{DeviceIdentity, KeyCode, UiProbe};
use super::selector::Selector;
use crate::adb::{AdbClient, AdbError, AdbResult};
use std::time::Duration;
use tokio::time::{Instant, sleep};

const DUMP_COMMAND: &str = "uiautomator dump /dev/tty";
const FOCUS_COMMAND: &str = "dumpsys window | grep mCurrentFocus || true";
const POLICY_COMMAND: &str = "dumpsys window policy";
const POWER_COMMAND: &str = "dumpsys power";
const IDENTITY_COMMAND: &str =
    "getprop ro.product.brand; getprop ro.product.name; getprop ro.build.version.release";

pub struct AdbProbe<C: AdbClient> {
    client: C,
    poll_interval: Duration,
}

impl<C: AdbClient> AdbProbe<C> {
    pub fn new(client: C) -> Self {
        Self {
            client,
            poll_interval: Duration::from_millis(250),
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Current UI tree. A dump taken mid-transition comes back as an error
    /// message instead of XML; that is reported as an empty screen.
    async fn snapshot(&self) -> AdbResult<UiHierarchy> {
        let output = self.client.shell(DUMP_COMMAND).await?;
        match UiHierarchy::parse(&output) {
            Ok(hierarchy) => Ok(hierarchy),
            Err(AdbError::HierarchyParseFailed { description }) => {
                log::debug!("uiautomator dump unusable ({description}), treating as empty");
                Ok(UiHierarchy::default())
            }
            Err(e) => Err(e),
        }
    }

    async fn poll<F>(&self, timeout: Duration, lookup: F) -> AdbResult<Option<UiNode>>
    where
        F: Fn(&UiHierarchy) -> Option<UiNode>,
    {
        let deadline = Instant::now() + timeout;
        loop {
            let hierarchy = self.snapshot().await?;
            if let Some(node) = lookup(&hierarchy) {
                return Ok(Some(node));
            }
            if Instant::now() >= deadline {
                return Ok(None);
            }
            sleep(self.poll_interval).await;
        }
    }

    async fn keyguard_state(&self) -> AdbResult<KeyguardState> {
        let output = self.client.shell(POLICY_COMMAND).await?;
        KeyguardState::parse(&output).ok_or_else(|| AdbError::ShellCommandFailed {
            command: POLICY_COMMAND.to_string(),
            description: "no keyguard state in output".to_string(),
        })
    }
}

impl<C: AdbClient> UiProbe for AdbProbe<C> {
    async fn exists(&self, selector: &Selector) -> AdbResult<bool> {
        Ok(self.snapshot().await?.exists(selector))
    }

    async fn find_one(&self, selector: &Selector, timeout: Duration) -> AdbResult<Option<UiNode>> {
        self.poll(timeout, |h| h.find(selector).cloned()).await
    }

    async fn find_within(
        &self,
        ancestor: &Selector,
        target: &Selector,
        timeout: Duration,
    ) -> AdbResult<Option<UiNode>> {
        self.poll(timeout, |h| h.find_within(ancestor, target).cloned())
            .await
    }

    async fn click(&self, x: u32, y: u32) -> AdbResult<()> {
        self.client.tap(x, y).await
    }

    async fn swipe(&self, from: (u32, u32), to: (u32, u32), duration: Duration) -> AdbResult<()> {
        let millis = u32::try_from(duration.as_millis()).unwrap_or(u32::MAX);
        self.client
            .swipe(from.0, from.1, to.0, to.1, Some(millis))
            .await
    }

    async fn gesture(&self, duration: Duration, points: &[Point]) -> AdbResult<()> {
        let (max_x, max_y) = self.client.screen_dimensions();
        for point in points {
            let (x, y) = point.to_pixels();
            if x >= max_x || y >= max_y {
                return Err(AdbError::OutOfBounds { x, y });
            }
        }
        let Some(script) = motionevent_script(duration, points) else {
            return Ok(());
        };
        self.client.shell(&script).await?;
        Ok(())
    }

    async fn input_text(&self, text: &str) -> AdbResult<()> {
        self.client
            .shell(&format!("input text {}", escape_input_text(text)))
            .await?;
        Ok(())
    }

    async fn key_event(&self, key: KeyCode) -> AdbResult<()> {
        self.client
            .shell(&format!("input keyevent {}", key.as_str()))
            .await?;
        Ok(())
    }

    async fn is_screen_on(&self) -> AdbResult<bool> {
        let output = self.client.shell(POWER_COMMAND).await?;
        parse_screen_on(&output).ok_or_else(|| AdbError::ShellCommandFailed {
            command: POWER_COMMAND.to_string(),
            description: "no wakefulness in output".to_string(),
        })
    }

    async fn wake_up(&self) -> AdbResult<()> {
        self.key_event(KeyCode::Wakeup).await
    }

    async fn current_package(&self) -> AdbResult<String> {
        let output = self.client.shell(FOCUS_COMMAND).await?;
        Ok(parse_focused_package(&output).unwrap_or_default())
    }

    fn screen_size(&self) -> (u32, u32) {
        self.client.screen_dimensions()
    }

    async fn device_identity(&self) -> AdbResult<DeviceIdentity> {
        let output = self.client.shell(IDENTITY_COMMAND).await?;
        Ok(parse_identity(&output))
    }

    async fn get_prop(&self, name: &str) -> AdbResult<String> {
        let safe = !name.is_empty()
            && name
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | '_' | '-'));
        if !safe {
            return Err(AdbError::InvalidPropertyName {
                name: name.to_string(),
            });
        }
        let output = self.client.shell(&format!("getprop {name}")).await?;
        Ok(output.trim().to_string())
    }

    async fn is_keyguard_locked(&self) -> AdbResult<bool> {
        Ok(self.keyguard_state().await?.locked)
    }

    async fn is_keyguard_secure(&self) -> AdbResult<bool> {
        Ok(self.keyguard_state().await?.secure)
    }

    fn notify(&self, message: &str) {
        log::warn!("📢 {message}");
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::adb::Device;
    use std::collections::HashMap;
    use std::sync::Mutex;

    /// Canned shell responses keyed by exact command line.
    struct FakeClient {
        responses: HashMap<String, String>,
        commands: Mutex<Vec<String>>,
    }

    impl FakeClient {
        fn new(responses: &[(&str, &str)]) -> Self {
            Self {
                responses: responses
                    .iter()
                    .map(|(k, v)| (k.to_string(), v.to_string()))
                    .collect(),
                commands: Mutex::new(Vec::new()),
            }
        }

        fn commands(&self) -> Vec<String> {
            self.commands.lock().unwrap().clone()
        }
    }

    impl AdbClient for FakeClient {
        async fn list_devices() -> AdbResult<Vec<Device>> {
            Ok(Vec::new())
        }
        async fn new_with_device(_device_name: &str) -> AdbResult<Self> {
            Ok(FakeClient::new(&[]))
        }
        async fn shell(&self, command: &str) -> AdbResult<String> {
            self.commands.lock().unwrap().push(command.to_string());
            Ok(self.responses.get(command).cloned().unwrap_or_default())
        }
        async fn tap(&self, x: u32, y: u32) -> AdbResult<()> {
            self.commands.lock().unwrap().push(format!("tap {x} {y}"));
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
            self.commands
                .lock()
                .unwrap()
                .push(format!("swipe {x1} {y1} {x2} {y2} {duration:?}"));
            Ok(())
        }
        fn screen_dimensions(&self) -> (u32, u32) {
            (1080, 2340)
        }
        fn device_name(&self) -> &str {
            "fake"
        }
        fn transport_id(&self) -> Option<u32> {
            None
        }
    }

    const DUMP: &str = r#"<?xml version='1.0' encoding='UTF-8' standalone='yes' ?><hierarchy rotation="0"><node index="0" text="" resource-id="com.android.keyguard:id/numeric_inputview" class="android.widget.LinearLayout" package="com.android.systemui" content-desc="" clickable="false" bounds="[0,1200][1080,2100]"><node index="0" text="7" resource-id="" class="android.widget.TextView" package="com.android.systemui" content-desc="" clickable="true" bounds="[0,1200][360,1400]" /></node></hierarchy>"#;

    #[tokio::test]
    async fn test_find_within_and_click_center() {
        let probe = AdbProbe::new(FakeClient::new(&[(DUMP_COMMAND, DUMP)]));
        let key = probe
            .find_within(
                &Selector::id("com.android.keyguard:id/numeric_inputview"),
                &Selector::text("7"),
                Duration::ZERO,
            )
            .await
            .unwrap()
            .expect("key 7 present");
        probe.click_node(&key).await.unwrap();
        assert_eq!(probe.client().commands().last().unwrap(), "tap 180 1300");
    }

    #[tokio::test(start_paused = true)]
    async fn test_find_one_times_out_on_transient_dump_error() {
        let probe = AdbProbe::new(FakeClient::new(&[(
            DUMP_COMMAND,
            "ERROR: null root node returned by UiTestAutomationBridge.",
        )]));
        let found = probe
            .find_one(&Selector::id("anything"), Duration::from_secs(1))
            .await
            .unwrap();
        assert!(found.is_none());
        // one dump up front plus one per poll interval until the deadline
        assert_eq!(probe.client().commands().len(), 5);
    }

    #[tokio::test]
    async fn test_keyguard_and_power_queries() {
        let probe = AdbProbe::new(FakeClient::new(&[
            (
                POLICY_COMMAND,
                "  KeyguardServiceDelegate\n    showing=true\n    inputRestricted=true\n    secure=true\n",
            ),
            (POWER_COMMAND, "  mWakefulness=Asleep\n"),
            (
                FOCUS_COMMAND,
                "  mCurrentFocus=Window{1 u0 NotificationShade}\n",
            ),
        ]));
        assert!(probe.is_keyguard_locked().await.unwrap());
        assert!(probe.is_keyguard_secure().await.unwrap());
        assert!(!probe.is_screen_on().await.unwrap());
        assert_eq!(probe.current_package().await.unwrap(), "com.android.systemui");
    }

    #[tokio::test]
    async fn test_unparseable_state_is_an_error() {
        let probe = AdbProbe::new(FakeClient::new(&[]));
        assert!(probe.is_keyguard_locked().await.is_err());
        assert!(probe.is_screen_on().await.is_err());
    }

    #[tokio::test]
    async fn test_input_commands() {
        let probe = AdbProbe::new(FakeClient::new(&[("getprop ro.miui.ui.version.name", "V12\n")]));
        probe.input_text("ab cd;").await.unwrap();
        probe.key_event(KeyCode::Power).await.unwrap();
        probe
            .swipe((540, 2040), (540, 1170), Duration::from_millis(500))
            .await
            .unwrap();
        assert_eq!(probe.get_prop("ro.miui.ui.version.name").await.unwrap(), "V12");
        assert!(probe.get_prop("x; reboot").await.is_err());

        assert_eq!(
            probe.client().commands(),
            vec![
                "input text ab%scd\\;".to_string(),
                "input keyevent KEYCODE_POWER".to_string(),
                "swipe 540 2040 540 1170 Some(500)".to_string(),
                "getprop ro.miui.ui.version.name".to_string(),
            ]
        );
    }

    #[tokio::test]
    async fn test_gesture_rejects_offscreen_points() {
        let probe = AdbProbe::new(FakeClient::new(&[]));
        let result = probe
            .gesture(Duration::from_millis(400), &[Point::new(5000.0, 10.0)])
            .await;
        assert!(matches!(result, Err(AdbError::OutOfBounds { x: 5000, y: 10 })));

        // width and height are one past the last pixel
        for edge in [Point::new(1080.0, 10.0), Point::new(10.0, 2340.0)] {
            let result = probe.gesture(Duration::from_millis(400), &[edge]).await;
            assert!(matches!(result, Err(AdbError::OutOfBounds { .. })));
        }
        assert!(probe.client().commands().is_empty());

        probe
            .gesture(Duration::from_millis(400), &[Point::new(1079.0, 2339.0)])
            .await
            .unwrap();
        assert_eq!(probe.client().commands().len(), 1);
    }
}
