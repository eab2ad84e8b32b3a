//! Lock screen skin detection from the vendor UI version property

use regex::Regex;
use std::fmt;
use std::sync::LazyLock;

/// System property carrying the MIUI version name (e.g. `V10`, `V125`).
pub const MIUI_VERSION_PROP: &str = "ro.miui.ui.version.name";

static VERSION_RE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\d+").expect("valid version regex"));

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceVariant {
    Native,
    Miui,
    Miui10,
}

impl DeviceVariant {
    /// Classify the value of [`MIUI_VERSION_PROP`]. Only the first digit run
    /// counts; an empty or digit-free value means stock Android.
    pub fn detect(version_name: &str) -> Self {
        match VERSION_RE.find(version_name).map(|m| m.as_str()) {
            Some("10") => DeviceVariant::Miui10,
            Some(_) => DeviceVariant::Miui,
            None => DeviceVariant::Native,
        }
    }
}

impl fmt::Display for DeviceVariant {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            DeviceVariant::Native => "native",
            DeviceVariant::Miui => "miui",
            DeviceVariant::Miui10 => "miui10",
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_detect() {
        assert_eq!(DeviceVariant::detect("V10"), DeviceVariant::Miui10);
        assert_eq!(DeviceVariant::detect("V12"), DeviceVariant::Miui);
        assert_eq!(DeviceVariant::detect("V9"), DeviceVariant::Miui);
        assert_eq!(DeviceVariant::detect("V125"), DeviceVariant::Miui);
        assert_eq!(DeviceVariant::detect("V100"), DeviceVariant::Miui);
        assert_eq!(DeviceVariant::detect(""), DeviceVariant::Native);
        assert_eq!(DeviceVariant::detect("\n"), DeviceVariant::Native);
    }

    #[test]
    fn test_first_digit_run_decides() {
        assert_eq!(DeviceVariant::detect("V10.2"), DeviceVariant::Miui10);
        assert_eq!(DeviceVariant::detect("V11-10"), DeviceVariant::Miui);
    }
}
