mod interface;
mod routing;

pub use interface::*;
pub use routing::*;

use std::collections::BTreeMap;

/// Where a template block is emitted relative to the per-device sections
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Position {
    #[default]
    Start,
    End,
}

impl Position {
    /// Parse a position cell; an empty cell means `Start`
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_lowercase().as_str() {
            "" | "start" => Some(Self::Start),
            "end" => Some(Self::End),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Start => "start",
            Self::End => "end",
        }
    }
}

/// DeviceTemplate attaches a named template to a device
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceTemplate {
    pub name: String,
    pub position: Position,
}

/// Device is the assembled model of one network device.
/// Maps are ordered so emission order follows the sorted keys.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Device {
    /// Lowercase, trimmed
    pub name: String,
    pub templates: BTreeMap<String, DeviceTemplate>,
    /// Keyed by VLAN id text, so ids emit in text order ("100" before "20")
    pub vlans: BTreeMap<String, Vlan>,
    pub interfaces: BTreeMap<String, Interface>,
    pub vrfs: BTreeMap<String, Vrf>,
    /// Keyed by prefix only; a later row for the same prefix replaces the earlier one
    pub static_routes: BTreeMap<String, StaticRoute>,
}

impl Device {
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    pub fn has_logical_interfaces(&self) -> bool {
        self.interfaces.values().any(Interface::is_logical)
    }

    pub fn has_physical_interfaces(&self) -> bool {
        self.interfaces.values().any(|i| !i.is_logical())
    }

    /// Attached templates for one position, in name order
    pub fn templates_at(&self, position: Position) -> impl Iterator<Item = &DeviceTemplate> {
        self.templates.values().filter(move |t| t.position == position)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_position_parse() {
        assert_eq!(Position::parse(""), Some(Position::Start));
        assert_eq!(Position::parse("Start"), Some(Position::Start));
        assert_eq!(Position::parse(" END "), Some(Position::End));
        assert_eq!(Position::parse("middle"), None);
    }

    #[test]
    fn test_logical_and_physical_detection() {
        let mut device = Device::new("sw1");
        assert!(!device.has_logical_interfaces());
        assert!(!device.has_physical_interfaces());

        device.interfaces.insert("gi0/1".into(), Interface::new("gi0/1", LayerType::Layer2));
        assert!(device.has_physical_interfaces());
        assert!(!device.has_logical_interfaces());

        device.interfaces.insert("vlan10".into(), Interface::new("vlan10", LayerType::Layer3));
        assert!(device.has_logical_interfaces());
    }

    #[test]
    fn test_templates_at_filters_and_sorts() {
        let mut device = Device::new("sw1");
        let attached = [
            ("zz-aaa", Position::Start),
            ("banner", Position::End),
            ("base", Position::Start),
        ];
        for (name, position) in attached {
            device.templates.insert(name.into(), DeviceTemplate { name: name.into(), position });
        }
        let start: Vec<&str> = device
            .templates_at(Position::Start)
            .map(|t| t.name.as_str())
            .collect();
        assert_eq!(start, vec!["base", "zz-aaa"]);
        let end: Vec<&str> = device.templates_at(Position::End).map(|t| t.name.as_str()).collect();
        assert_eq!(end, vec!["banner"]);
    }
}
