//! Parsers for `dumpsys` output used to read power and keyguard state

const SYSTEM_UI_PACKAGE: &str = "com.android.systemui";

// Window titles owned by SystemUI that carry no package prefix
const SYSTEM_UI_WINDOWS: &[&str] = &["NotificationShade", "StatusBar", "Keyguard", "DreamOverlay"];

/// Interactive state from `dumpsys power`.
///
/// `mWakefulness=Awake` is authoritative; older builds only report
/// `Display Power: state=ON`.
pub fn parse_screen_on(power_dump: &str) -> Option<bool> {
    let mut display_on = None;
    for line in power_dump.lines() {
        let line = line.trim();
        if let Some(value) = line.strip_prefix("mWakefulness=") {
            return Some(value.trim() == "Awake");
        }
        if let Some(value) = line.strip_prefix("Display Power: state=") {
            display_on = Some(value.trim() == "ON");
        }
    }
    display_on
}

/// Package of the focused window from `dumpsys window`.
pub fn parse_focused_package(window_dump: &str) -> Option<String> {
    let line = window_dump
        .lines()
        .map(str::trim)
        .find(|l| l.starts_with("mCurrentFocus="))?;
    // mCurrentFocus=Window{4f3a2b1 u0 com.android.settings/com.android.settings.Settings}
    let inner = line
        .split_once('{')
        .and_then(|(_, rest)| rest.rsplit_once('}'))
        .map(|(inner, _)| inner)?;
    let title = inner.split_whitespace().last()?;
    if let Some((package, _)) = title.split_once('/') {
        return Some(package.to_string());
    }
    if SYSTEM_UI_WINDOWS.iter().any(|w| title.starts_with(w)) {
        return Some(SYSTEM_UI_PACKAGE.to_string());
    }
    Some(title.to_string())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct KeyguardState {
    /// Keyguard is restricting input.
    pub locked: bool,
    /// A PIN, pattern or password is configured.
    pub secure: bool,
}

impl KeyguardState {
    /// Read the `KeyguardServiceDelegate` block of `dumpsys window policy`.
    pub fn parse(policy_dump: &str) -> Option<Self> {
        let mut in_delegate = false;
        let mut input_restricted = None;
        let mut showing = None;
        let mut secure = None;
        let mut legacy_showing = None;

        for line in policy_dump.lines() {
            let trimmed = line.trim();
            if trimmed.starts_with("KeyguardServiceDelegate") {
                in_delegate = true;
                continue;
            }
            if let Some(value) = trimmed.strip_prefix("mShowingLockscreen=") {
                legacy_showing = Some(value.starts_with("true"));
            }
            if !in_delegate {
                continue;
            }
            let Some((key, value)) = trimmed.split_once('=') else {
                // the delegate block is a run of key=value lines
                if input_restricted.is_some() || showing.is_some() {
                    in_delegate = false;
                }
                continue;
            };
            let flag = value.trim() == "true";
            match key {
                "inputRestricted" => input_restricted = input_restricted.or(Some(flag)),
                "showing" => showing = showing.or(Some(flag)),
                "secure" => secure = secure.or(Some(flag)),
                _ => {}
            }
        }

        let locked = input_restricted.or(showing).or(legacy_showing)?;
        Some(Self {
            locked,
            secure: secure.unwrap_or(false),
        })
    }
}

/// Split the three lines printed by
/// `getprop ro.product.brand; getprop ro.product.name; getprop ro.build.version.release`.
pub fn parse_identity(output: &str) -> super::probe::DeviceIdentity {
    let mut lines = output.lines().map(|l| l.trim().to_string());
    super::probe::DeviceIdentity {
        brand: lines.next().unwrap_or_default(),
        product: lines.next().unwrap_or_default(),
        release: lines.next().unwrap_or_default(),
    }
}
