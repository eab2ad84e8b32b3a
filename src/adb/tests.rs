// Tests for the transport layer parsers
// Focus: device listing, screen size, disconnect classification

use super::error::{AdbError, is_disconnect_message};
use super::shell::AdbShell;
use super::types::{Device, parse_screen_size};

#[test]
fn parse_devices_basic() {
    let adb_output = "List of devices attached\nabc123 device transport_id:5\n";
    let devs = AdbShell::parse_devices(adb_output);
    assert_eq!(devs.len(), 1);
    assert_eq!(devs[0].name, "abc123");
    assert_eq!(devs[0].transport_id, Some("5".to_string()));
}

#[test]
fn test_parse_devices_multiple() {
    let adb_output = "List of devices attached\n1d36d8f1               device usb:1-4 product:OnePlus6 model:ONEPLUS_A6000 device:OnePlus6 transport_id:2\noneplus6:5555          device product:OnePlus6 model:ONEPLUS_A6000 device:OnePlus6 transport_id:3\n";
    let devices = AdbShell::parse_devices(adb_output);
    assert_eq!(
        devices,
        vec![
            Device {
                name: "1d36d8f1".to_string(),
                transport_id: Some("2".to_string())
            },
            Device {
                name: "oneplus6:5555".to_string(),
                transport_id: Some("3".to_string())
            },
        ]
    );
}

#[test]
fn test_parse_devices_skips_unauthorized() {
    let adb_output = "List of devices attached\nR58M123 unauthorized usb:1-1 transport_id:7\nemulator-5554 device product:sdk_gphone64 transport_id:1\n";
    let devices = AdbShell::parse_devices(adb_output);
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0].name, "emulator-5554");
}

#[test]
fn test_parse_screen_size_physical() {
    assert_eq!(parse_screen_size("Physical size: 1080x2340\n"), Some((1080, 2340)));
}

#[test]
fn test_parse_screen_size_prefers_override() {
    let output = "Physical size: 1440x3120\nOverride size: 1080x2340\n";
    assert_eq!(parse_screen_size(output), Some((1080, 2340)));
}

#[test]
fn test_parse_screen_size_garbage() {
    assert_eq!(parse_screen_size("error: closed"), None);
    assert_eq!(parse_screen_size("Physical size: axb"), None);
}

#[test]
fn test_disconnect_classification() {
    assert!(is_disconnect_message("error: device offline"));
    assert!(is_disconnect_message("adb: CLSE received"));
    assert!(!is_disconnect_message("/system/bin/sh: foo: not found"));

    let timeout = AdbError::Timeout {
        duration: std::time::Duration::from_secs(15),
        description: "shell 'wm size'".into(),
    };
    assert!(timeout.is_disconnect());
    assert!(!AdbError::ScreenSizeParseFailed.is_disconnect());
}

#[tokio::test]
async fn test_shell_open_requires_numeric_transport_id() {
    for transport_id in [None, Some("usb:1-4".to_string())] {
        let device = Device {
            name: "emulator-5554".to_string(),
            transport_id,
        };
        match AdbShell::open(device).await {
            Err(AdbError::ConnectionFailed { description }) => {
                assert!(description.contains("emulator-5554"), "{description}");
            }
            Err(other) => panic!("expected connection failure, got {other:?}"),
            Ok(_) => panic!("device without a transport id should not open"),
        }
    }
}
