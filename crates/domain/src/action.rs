//! Device-family action resolution.
//!
//! A schedule edge stores one concrete [`ServiceCall`] (command plus
//! parameter map). At configuration time the stored call is reshaped once
//! per device family present in the target list, so a mixed-family schedule
//! fires family-correct commands without any hot-path resolution.

use std::fmt;

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Parameter key carrying a cover position (0–100).
const KEY_POSITION: &str = "position";
/// Parameter key carrying a light brightness percentage (0–100).
const KEY_BRIGHTNESS: &str = "brightness_pct";

/// A device category determining which actions and parameters are valid.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DeviceFamily {
    Relay,
    Cover,
    Light,
}

/// A human-chosen action prior to resolution into a concrete call.
///
/// `On`/`Off` are spelled `open`/`close` for covers in editor-facing tags;
/// levels clamp to 0–100 at resolution time.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SymbolicAction {
    On,
    Off,
    Position(u8),
    Brightness(u8),
}

impl SymbolicAction {
    /// The parameter value for parameterized actions.
    #[must_use]
    pub fn level(self) -> Option<u8> {
        match self {
            Self::Position(v) | Self::Brightness(v) => Some(v),
            Self::On | Self::Off => None,
        }
    }

    /// The editor-facing tag of this action for the given family.
    #[must_use]
    pub fn tag_for(self, family: DeviceFamily) -> &'static str {
        match (self, family) {
            (Self::On, DeviceFamily::Cover) => "open",
            (Self::Off, DeviceFamily::Cover) => "close",
            (Self::On, _) => "on",
            (Self::Off, _) => "off",
            (Self::Position(_), _) => "position",
            (Self::Brightness(_), _) => "brightness",
        }
    }
}

/// A concrete (command, parameter-map) pair issued at an edge.
///
/// `data` holds the resolver-owned parameters plus any extra keys the
/// caller wants forwarded to the device boundary untouched.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ServiceCall {
    pub service: String,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub data: Map<String, Value>,
}

impl ServiceCall {
    /// A call with an empty parameter map.
    #[must_use]
    pub fn new(service: impl Into<String>) -> Self {
        Self {
            service: service.into(),
            data: Map::new(),
        }
    }

    /// Add one parameter.
    #[must_use]
    pub fn with(mut self, key: &str, value: impl Into<Value>) -> Self {
        self.data.insert(key.to_string(), value.into());
        self
    }
}

impl fmt::Display for ServiceCall {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.service)
    }
}

impl DeviceFamily {
    /// Map a target prefix to a family.
    ///
    /// Unknown tags (including `"switch"`, `"fan"`, …) use the relay
    /// action set.
    #[must_use]
    pub fn from_tag(tag: &str) -> Self {
        match tag {
            "cover" => Self::Cover,
            "light" => Self::Light,
            _ => Self::Relay,
        }
    }

    /// Resolve a symbolic action into this family's concrete call.
    ///
    /// An action the family does not support resolves to its simple
    /// "on-like" call, so a position intent still does something sensible
    /// on a light or relay sharing the schedule.
    #[must_use]
    pub fn resolve(self, action: SymbolicAction) -> ServiceCall {
        match (self, action) {
            (Self::Relay | Self::Light, SymbolicAction::Off) => ServiceCall::new("turn_off"),
            (Self::Cover, SymbolicAction::Off) => ServiceCall::new("close"),
            (Self::Cover, SymbolicAction::Position(v)) => {
                ServiceCall::new("set_position").with(KEY_POSITION, u64::from(v.min(100)))
            }
            (Self::Cover, _) => ServiceCall::new("open"),
            (Self::Light, SymbolicAction::Brightness(v)) => {
                ServiceCall::new("turn_on").with(KEY_BRIGHTNESS, u64::from(v.min(100)))
            }
            (Self::Relay | Self::Light, _) => ServiceCall::new("turn_on"),
        }
    }

    /// Recover the symbolic action a stored call was resolved from.
    ///
    /// Parameter keys take precedence over the service name, so
    /// `set_position`/`{position: 0}` reverses to `Position(0)`, not `Off`.
    #[must_use]
    pub fn reverse(self, call: &ServiceCall) -> SymbolicAction {
        if let Some(v) = call.data.get(KEY_POSITION).and_then(Value::as_u64) {
            return SymbolicAction::Position(clamp_level(v));
        }
        if let Some(v) = call.data.get(KEY_BRIGHTNESS).and_then(Value::as_u64) {
            return SymbolicAction::Brightness(clamp_level(v));
        }
        match call.service.as_str() {
            "turn_off" | "close" => SymbolicAction::Off,
            _ => SymbolicAction::On,
        }
    }

    /// The level an editor should display for `action`.
    ///
    /// Parameterized actions show their stored value; the rest show a
    /// per-family default that must never be written back unchanged.
    #[must_use]
    pub fn display_level(self, action: SymbolicAction) -> u8 {
        action.level().unwrap_or(match self {
            Self::Light => 10,
            Self::Cover => 50,
            Self::Relay => 0,
        })
    }

    /// Shape a stored call for this family.
    ///
    /// Recovers the symbolic action, resolves it against this family's
    /// action set, and carries through extra parameters the resolver does
    /// not own (without overwriting resolved keys).
    #[must_use]
    pub fn reshape(self, stored: &ServiceCall) -> ServiceCall {
        let mut shaped = self.resolve(self.reverse(stored));
        for (key, value) in &stored.data {
            if key == KEY_POSITION || key == KEY_BRIGHTNESS || shaped.data.contains_key(key) {
                continue;
            }
            shaped.data.insert(key.clone(), value.clone());
        }
        shaped
    }
}

fn clamp_level(value: u64) -> u8 {
    u8::try_from(value.min(100)).expect("value is clamped to 100")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn should_map_known_tags_to_their_family() {
        assert_eq!(DeviceFamily::from_tag("cover"), DeviceFamily::Cover);
        assert_eq!(DeviceFamily::from_tag("light"), DeviceFamily::Light);
    }

    #[test]
    fn should_fall_back_to_relay_for_unknown_tags() {
        assert_eq!(DeviceFamily::from_tag("switch"), DeviceFamily::Relay);
        assert_eq!(DeviceFamily::from_tag("fan"), DeviceFamily::Relay);
        assert_eq!(DeviceFamily::from_tag(""), DeviceFamily::Relay);
    }

    #[test]
    fn should_resolve_relay_actions() {
        assert_eq!(
            DeviceFamily::Relay.resolve(SymbolicAction::On),
            ServiceCall::new("turn_on")
        );
        assert_eq!(
            DeviceFamily::Relay.resolve(SymbolicAction::Off),
            ServiceCall::new("turn_off")
        );
    }

    #[test]
    fn should_resolve_cover_actions() {
        assert_eq!(
            DeviceFamily::Cover.resolve(SymbolicAction::On),
            ServiceCall::new("open")
        );
        assert_eq!(
            DeviceFamily::Cover.resolve(SymbolicAction::Off),
            ServiceCall::new("close")
        );
        assert_eq!(
            DeviceFamily::Cover.resolve(SymbolicAction::Position(40)),
            ServiceCall::new("set_position").with("position", 40u64)
        );
    }

    #[test]
    fn should_resolve_light_actions() {
        assert_eq!(
            DeviceFamily::Light.resolve(SymbolicAction::On),
            ServiceCall::new("turn_on")
        );
        assert_eq!(
            DeviceFamily::Light.resolve(SymbolicAction::Off),
            ServiceCall::new("turn_off")
        );
        assert_eq!(
            DeviceFamily::Light.resolve(SymbolicAction::Brightness(75)),
            ServiceCall::new("turn_on").with("brightness_pct", 75u64)
        );
    }

    #[test]
    fn should_resolve_unsupported_action_to_simple_call() {
        // A position intent on a light dispatches the plain turn_on, not a
        // brightness crossover.
        assert_eq!(
            DeviceFamily::Light.resolve(SymbolicAction::Position(40)),
            ServiceCall::new("turn_on")
        );
        assert_eq!(
            DeviceFamily::Relay.resolve(SymbolicAction::Position(40)),
            ServiceCall::new("turn_on")
        );
        assert_eq!(
            DeviceFamily::Cover.resolve(SymbolicAction::Brightness(40)),
            ServiceCall::new("open")
        );
    }

    #[test]
    fn should_clamp_levels_to_one_hundred() {
        let call = DeviceFamily::Cover.resolve(SymbolicAction::Position(200));
        assert_eq!(call.data["position"], 100);
    }

    #[test]
    fn should_reverse_position_even_at_zero() {
        let stored = ServiceCall::new("set_position").with("position", 0u64);
        assert_eq!(
            DeviceFamily::Cover.reverse(&stored),
            SymbolicAction::Position(0)
        );
    }

    #[test]
    fn should_reverse_turn_off_to_off() {
        assert_eq!(
            DeviceFamily::Light.reverse(&ServiceCall::new("turn_off")),
            SymbolicAction::Off
        );
        assert_eq!(
            DeviceFamily::Cover.reverse(&ServiceCall::new("close")),
            SymbolicAction::Off
        );
    }

    #[test]
    fn should_reverse_brightness_with_stored_value() {
        let stored = ServiceCall::new("turn_on").with("brightness_pct", 30u64);
        assert_eq!(
            DeviceFamily::Light.reverse(&stored),
            SymbolicAction::Brightness(30)
        );
    }

    #[test]
    fn should_reverse_plain_calls_to_the_simple_action() {
        assert_eq!(
            DeviceFamily::Cover.reverse(&ServiceCall::new("open")),
            SymbolicAction::On
        );
        assert_eq!(
            DeviceFamily::Relay.reverse(&ServiceCall::new("turn_on")),
            SymbolicAction::On
        );
    }

    #[test]
    fn should_display_stored_level_for_parameterized_actions() {
        assert_eq!(
            DeviceFamily::Cover.display_level(SymbolicAction::Position(0)),
            0
        );
        assert_eq!(
            DeviceFamily::Light.display_level(SymbolicAction::Brightness(80)),
            80
        );
    }

    #[test]
    fn should_display_family_default_for_simple_actions() {
        assert_eq!(DeviceFamily::Light.display_level(SymbolicAction::Off), 10);
        assert_eq!(DeviceFamily::Cover.display_level(SymbolicAction::On), 50);
        assert_eq!(DeviceFamily::Relay.display_level(SymbolicAction::On), 0);
    }

    #[test]
    fn should_reshape_stored_position_for_each_family() {
        let stored = ServiceCall::new("set_position").with("position", 40u64);

        assert_eq!(DeviceFamily::Cover.reshape(&stored), stored);
        assert_eq!(
            DeviceFamily::Light.reshape(&stored),
            ServiceCall::new("turn_on")
        );
        assert_eq!(
            DeviceFamily::Relay.reshape(&stored),
            ServiceCall::new("turn_on")
        );
    }

    #[test]
    fn should_reshape_off_intent_across_families() {
        let stored = ServiceCall::new("turn_off");
        assert_eq!(
            DeviceFamily::Cover.reshape(&stored),
            ServiceCall::new("close")
        );
        assert_eq!(
            DeviceFamily::Light.reshape(&stored),
            ServiceCall::new("turn_off")
        );
    }

    #[test]
    fn should_carry_extra_parameters_through_reshape() {
        let stored = ServiceCall::new("turn_on").with("transition", 2u64);
        let shaped = DeviceFamily::Light.reshape(&stored);
        assert_eq!(shaped.service, "turn_on");
        assert_eq!(shaped.data["transition"], 2);
    }

    #[test]
    fn should_not_leak_resolver_keys_through_the_escape_hatch() {
        let stored = ServiceCall::new("set_position").with("position", 40u64);
        let shaped = DeviceFamily::Light.reshape(&stored);
        assert!(!shaped.data.contains_key("position"));
    }

    #[test]
    fn should_tag_on_off_as_open_close_for_covers() {
        assert_eq!(SymbolicAction::On.tag_for(DeviceFamily::Cover), "open");
        assert_eq!(SymbolicAction::Off.tag_for(DeviceFamily::Cover), "close");
        assert_eq!(SymbolicAction::On.tag_for(DeviceFamily::Light), "on");
        assert_eq!(
            SymbolicAction::Position(10).tag_for(DeviceFamily::Cover),
            "position"
        );
    }

    #[test]
    fn should_roundtrip_service_call_through_serde_json() {
        let call = ServiceCall::new("set_position").with("position", 40u64);
        let json = serde_json::to_string(&call).unwrap();
        let parsed: ServiceCall = serde_json::from_str(&json).unwrap();
        assert_eq!(parsed, call);
    }

    #[test]
    fn should_deserialize_missing_data_as_empty_map() {
        let parsed: ServiceCall = serde_json::from_str(r#"{"service":"turn_on"}"#).unwrap();
        assert_eq!(parsed, ServiceCall::new("turn_on"));
    }
}
