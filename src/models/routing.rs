use crate::utils;

/// Vlan represents a VLAN defined on a device
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vlan {
    /// Kept as text; ids may carry leading context
    pub number: String,
    pub name: String,
}

/// Vrf represents an IP VRF with its route-targets
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Vrf {
    pub name: String,
    pub rd: String,
    pub import_rt: Vec<String>,
    pub export_rt: Vec<String>,
    /// Variable name or placeholder text for one extra config line
    pub variable: String,
}

/// StaticRoute represents one `ip route` statement
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StaticRoute {
    /// CIDR, e.g. "10.0.0.0/8"
    pub prefix: String,
    pub next_hop: String,
    pub name: String,
    pub vrf: String,
}

impl StaticRoute {
    /// Render the route statement, e.g.
    /// "ip route vrf RED 10.0.0.0 255.0.0.0 192.0.2.1 name to-core"
    pub fn render(&self) -> Result<String, String> {
        let mut line = String::from("ip route");
        if !self.vrf.is_empty() {
            line.push_str(&format!(" vrf {}", self.vrf));
        }
        line.push_str(&format!(" {}", utils::cidr_to_address_mask(&self.prefix)?));
        line.push_str(&format!(" {}", self.next_hop));
        if !self.name.is_empty() {
            line.push_str(&format!(" name {}", self.name));
        }
        Ok(line)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route_render_minimal() {
        let route = StaticRoute {
            prefix: "0.0.0.0/0".to_string(),
            next_hop: "192.0.2.1".to_string(),
            ..Default::default()
        };
        assert_eq!(route.render().unwrap(), "ip route 0.0.0.0 0.0.0.0 192.0.2.1");
    }

    #[test]
    fn test_route_render_with_vrf_and_name() {
        let route = StaticRoute {
            prefix: "10.10.0.0/16".to_string(),
            next_hop: "10.0.0.2".to_string(),
            name: "to-dc".to_string(),
            vrf: "RED".to_string(),
        };
        assert_eq!(
            route.render().unwrap(),
            "ip route vrf RED 10.10.0.0 255.255.0.0 10.0.0.2 name to-dc"
        );
    }

    #[test]
    fn test_route_render_bad_prefix() {
        let route = StaticRoute {
            prefix: "10.10.0.0".to_string(),
            next_hop: "10.0.0.2".to_string(),
            ..Default::default()
        };
        assert!(route.render().is_err());
    }
}
