use crate::models::{Enabled, Interface, LayerType};
use crate::registry::VariableRegistry;
use crate::utils;

/// Render one interface block.
///
/// Every populated field contributes its own line, independent of the
/// interface's logical type, in a fixed order.
pub fn render_interface(
    intf: &Interface,
    variables: &VariableRegistry,
) -> Result<Vec<String>, String> {
    let mut out = Vec::new();

    if intf.is_layer3_pc_member() {
        out.push("!......................................................................".to_string());
        out.push(format!(
            "!  Warning: L3 PC detected, you need to manually create {} first",
            intf.pc_parent
        ));
        out.push("!......................................................................".to_string());
    }

    out.push("!".to_string());
    out.push(format!("interface {}", intf.name));
    if !intf.comment.is_empty() {
        out.push(intf.comment.clone());
    }
    out.push(
        match intf.layer {
            LayerType::Layer2 => "  switchport",
            LayerType::Layer3 => "  no switchport",
        }
        .to_string(),
    );
    if !intf.description.is_empty() {
        out.push(format!("  description {}", intf.description));
    }

    // access
    if !intf.data_vlan.is_empty() {
        out.push(format!("  switchport access vlan {}", intf.data_vlan));
    }
    if !intf.voice_vlan.is_empty() {
        out.push(format!("  switchport voice vlan {}", intf.voice_vlan));
    }

    // trunk
    if !intf.trunk_vlans.is_empty() {
        let allowed = utils::format_trunk_vlans(&intf.trunk_vlans).map_err(|e| {
            format!("interface {}: trunk VLANs '{}': {}", intf.name, intf.trunk_vlans, e)
        })?;
        out.push("  switchport mode trunk".to_string());
        out.push(format!("  switchport trunk allowed vlan {}", allowed));
    }
    if !intf.native_vlan.is_empty() {
        out.push(format!("  switchport trunk native vlan {}", intf.native_vlan));
    }

    // routed
    if !intf.vrf.is_empty() {
        out.push(format!("  ip vrf forwarding {}", intf.vrf));
    }
    if !intf.ip_address.is_empty() {
        let address = utils::cidr_to_address_mask(&intf.ip_address)
            .map_err(|e| format!("interface {}: {}", intf.name, e))?;
        out.push(format!("  ip address {}", address));
    }

    if !intf.mtu.is_empty() {
        out.push(format!("  mtu {}", intf.mtu));
    }
    for variable in [&intf.variable1, &intf.variable2] {
        if !variable.is_empty() {
            out.push(format!("  {}", variables.resolve(variable)));
        }
    }
    if !intf.speed.is_empty() {
        out.push(format!("  speed {}", intf.speed));
    }
    if !intf.duplex.is_empty() {
        out.push(format!("  duplex {}", intf.duplex));
    }

    if intf.is_pc_member() {
        out.push(format!("  channel-group {} mode {}", intf.pc_group, intf.pc_mode));
    }

    match intf.enabled {
        Enabled::Yes => out.push("  no shutdown".to_string()),
        Enabled::No => out.push("  shutdown".to_string()),
        Enabled::Unset => {}
    }

    Ok(out)
}
