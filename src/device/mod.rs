// Device module - live UI probing and input injection
// The unlock flow only talks to `UiProbe`; `AdbProbe` implements it on top of
// the ADB transport using uiautomator dumps, dumpsys and `input`.

pub mod adb_probe;
pub mod dumpsys;
pub mod geometry;
pub mod hierarchy;
pub mod input;
pub mod probe;
pub mod selector;

pub use adb_probe::AdbProbe;
pub use geometry::{Point, Rect};
pub use hierarchy::{UiHierarchy, UiNode};
pub use probe::{DeviceIdentity, KeyCode, UiProbe};
pub use selector::{Selector, TextMatch};
