/// Name fragments that mark port-channel, tunnel, loopback and vlan interfaces
const LOGICAL_NAME_MARKERS: &[&str] = &["po", "tu", "lo", "vl"];

/// Which layer sheet an interface row came from
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum LayerType {
    #[default]
    Layer2,
    Layer3,
}

impl LayerType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Layer2 => "layer2",
            Self::Layer3 => "layer3",
        }
    }
}

/// The "Interface Enabled (yes/no)" cell
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Enabled {
    Yes,
    No,
    #[default]
    Unset,
}

impl Enabled {
    pub fn parse(value: &str) -> Self {
        match value.trim().to_lowercase().as_str() {
            "yes" => Self::Yes,
            "no" => Self::No,
            _ => Self::Unset,
        }
    }
}

/// Derived interface classification, first match wins in declaration order
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogicalType {
    Layer3PortChannel,
    Layer2PortChannel,
    Layer2Access,
    Layer2Trunk,
    Layer3Routed,
    Unknown,
}

impl LogicalType {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Layer3PortChannel => "layer3_pc",
            Self::Layer2PortChannel => "layer2_pc",
            Self::Layer2Access => "layer2_access",
            Self::Layer2Trunk => "layer2_trunk",
            Self::Layer3Routed => "layer3_routed",
            Self::Unknown => "unknown",
        }
    }
}

/// Interface on a device, built from an l2/l3 row or synthesized as a
/// port-channel member. Empty strings mean "not set".
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Interface {
    pub name: String,
    pub layer: LayerType,
    pub enabled: Enabled,
    pub speed: String,
    pub duplex: String,
    pub mtu: String,
    pub description: String,
    pub variable1: String,
    pub variable2: String,
    pub data_vlan: String,
    pub voice_vlan: String,
    pub native_vlan: String,
    /// Raw trunk list as entered, e.g. "10,20-22"
    pub trunk_vlans: String,
    pub vrf: String,
    /// CIDR, e.g. "10.0.0.1/24"
    pub ip_address: String,
    pub pc_group: String,
    pub pc_mode: String,
    /// Layer of the parent port-channel, set on members only
    pub pc_type: Option<LayerType>,
    /// Member names, set on port-channel parents only
    pub pc_members: Vec<String>,
    /// Parent port-channel name, set on members only
    pub pc_parent: String,
    /// Set by port-channel synthesis, never by input
    pub comment: String,
}

impl Interface {
    pub fn new(name: impl Into<String>, layer: LayerType) -> Self {
        Self {
            name: name.into(),
            layer,
            ..Default::default()
        }
    }

    /// Port-channel, tunnel, loopback or vlan interface, judged by name
    pub fn is_logical(&self) -> bool {
        LOGICAL_NAME_MARKERS.iter().any(|m| self.name.contains(m))
    }

    pub fn is_pc_member(&self) -> bool {
        !self.pc_parent.is_empty()
    }

    pub fn is_pc_parent(&self) -> bool {
        !self.pc_members.is_empty()
    }

    /// Member of a routed port-channel; the parent must be created by hand
    pub fn is_layer3_pc_member(&self) -> bool {
        self.is_pc_member() && self.pc_type == Some(LayerType::Layer3)
    }

    pub fn logical_type(&self) -> LogicalType {
        let has_pc = !self.pc_group.is_empty();
        let has_ip = !self.ip_address.is_empty();
        if has_pc && has_ip {
            LogicalType::Layer3PortChannel
        } else if has_pc {
            LogicalType::Layer2PortChannel
        } else if !self.data_vlan.is_empty() {
            LogicalType::Layer2Access
        } else if !self.trunk_vlans.is_empty() {
            LogicalType::Layer2Trunk
        } else if has_ip {
            LogicalType::Layer3Routed
        } else {
            LogicalType::Unknown
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_logical_by_name() {
        for name in ["po1", "port-channel10", "tunnel0", "loopback0", "vlan100"] {
            assert!(Interface::new(name, LayerType::Layer3).is_logical(), "{}", name);
        }
        for name in ["gi0/1", "te1/0/1", "ethernet1"] {
            assert!(!Interface::new(name, LayerType::Layer2).is_logical(), "{}", name);
        }
    }

    #[test]
    fn test_enabled_parse() {
        assert_eq!(Enabled::parse("yes"), Enabled::Yes);
        assert_eq!(Enabled::parse(" No "), Enabled::No);
        assert_eq!(Enabled::parse(""), Enabled::Unset);
        assert_eq!(Enabled::parse("maybe"), Enabled::Unset);
    }

    #[test]
    fn test_logical_type_precedence() {
        let mut intf = Interface::new("po1", LayerType::Layer3);
        assert_eq!(intf.logical_type(), LogicalType::Unknown);

        intf.ip_address = "10.0.0.1/30".to_string();
        assert_eq!(intf.logical_type(), LogicalType::Layer3Routed);

        intf.trunk_vlans = "10".to_string();
        assert_eq!(intf.logical_type(), LogicalType::Layer2Trunk);

        intf.data_vlan = "20".to_string();
        assert_eq!(intf.logical_type(), LogicalType::Layer2Access);

        intf.pc_group = "1".to_string();
        assert_eq!(intf.logical_type(), LogicalType::Layer3PortChannel);

        intf.ip_address.clear();
        assert_eq!(intf.logical_type(), LogicalType::Layer2PortChannel);
        assert_eq!(intf.logical_type().as_str(), "layer2_pc");
    }

    #[test]
    fn test_pc_roles() {
        let mut parent = Interface::new("po1", LayerType::Layer2);
        parent.pc_members = vec!["gi0/1".to_string()];
        assert!(parent.is_pc_parent());
        assert!(!parent.is_pc_member());

        let mut member = Interface::new("gi0/1", LayerType::Layer3);
        member.pc_parent = "po1".to_string();
        member.pc_type = Some(LayerType::Layer3);
        assert!(member.is_pc_member());
        assert!(member.is_layer3_pc_member());
        assert!(!member.is_pc_parent());
    }
}
