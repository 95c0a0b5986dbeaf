//! Virtual device implementations — relay, cover, light.

mod cover;
mod light;
mod relay;

pub use cover::VirtualCover;
pub use light::VirtualLight;
pub use relay::VirtualRelay;

use serde_json::Value;

/// Point-in-time state of a simulated device.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeviceSnapshot {
    Relay { on: bool },
    Cover { position: u8 },
    Light { on: bool, brightness_pct: u8 },
}

/// Wrapper enum for the concrete virtual device types.
pub enum VirtualDevice {
    Relay(VirtualRelay),
    Cover(VirtualCover),
    Light(VirtualLight),
}

impl VirtualDevice {
    /// Create the simulated device matching a family tag.
    ///
    /// Unknown tags behave like relays, mirroring the action resolver's
    /// fallback.
    #[must_use]
    pub fn for_family(tag: &str) -> Self {
        match tag {
            "cover" => Self::Cover(VirtualCover::default()),
            "light" => Self::Light(VirtualLight::default()),
            _ => Self::Relay(VirtualRelay::default()),
        }
    }

    /// Apply a service call to the device.
    pub fn apply(&self, service: &str, data: &Value) {
        match self {
            Self::Relay(d) => d.apply(service),
            Self::Cover(d) => d.apply(service, data),
            Self::Light(d) => d.apply(service, data),
        }
    }

    /// The device's current state.
    #[must_use]
    pub fn snapshot(&self) -> DeviceSnapshot {
        match self {
            Self::Relay(d) => d.snapshot(),
            Self::Cover(d) => d.snapshot(),
            Self::Light(d) => d.snapshot(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_create_cover_for_cover_tag() {
        let device = VirtualDevice::for_family("cover");
        assert!(matches!(device.snapshot(), DeviceSnapshot::Cover { .. }));
    }

    #[test]
    fn should_create_light_for_light_tag() {
        let device = VirtualDevice::for_family("light");
        assert!(matches!(device.snapshot(), DeviceSnapshot::Light { .. }));
    }

    #[test]
    fn should_create_relay_for_unknown_tag() {
        let device = VirtualDevice::for_family("fan");
        assert!(matches!(device.snapshot(), DeviceSnapshot::Relay { .. }));
    }
}
