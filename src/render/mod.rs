//! Device configuration emitter.
//!
//! Sections are emitted in a fixed order: global templates at `start`, VRFs,
//! VLANs, physical interfaces, logical interfaces, static routes, global
//! templates at `end`. A section with nothing to show emits no lines at all,
//! header included. Rendering is a pure function of the device and the
//! registries.

mod interface;

pub use interface::render_interface;

use crate::builder::NetworkModel;
use crate::error::{CcgError, CcgResult};
use crate::models::{Device, Position};
use crate::registry::{TemplateRegistry, VariableRegistry};

const SECTION_RULE: &str = "!---------------------------------";

/// Which interfaces an interface section covers
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum InterfaceKind {
    Physical,
    Logical,
}

impl InterfaceKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Physical => "physical",
            Self::Logical => "logical",
        }
    }
}

/// ConfigRenderer turns a device into its configuration text
#[derive(Debug, Clone, Copy)]
pub struct ConfigRenderer<'a> {
    variables: &'a VariableRegistry,
    templates: &'a TemplateRegistry,
}

impl<'a> ConfigRenderer<'a> {
    pub fn new(variables: &'a VariableRegistry, templates: &'a TemplateRegistry) -> Self {
        Self { variables, templates }
    }

    pub fn for_model(model: &'a NetworkModel) -> Self {
        Self::new(&model.variables, &model.templates)
    }

    /// Complete configuration text for one device
    pub fn render(&self, device: &Device) -> CcgResult<String> {
        let mut out = Vec::new();
        self.global_section(device, Position::Start, &mut out);
        self.vrf_section(device, &mut out);
        self.vlan_section(device, &mut out);
        self.interface_section(device, InterfaceKind::Physical, &mut out)?;
        self.interface_section(device, InterfaceKind::Logical, &mut out)?;
        self.route_section(device, &mut out)?;
        self.global_section(device, Position::End, &mut out);

        let mut text = out.join("\n");
        if !text.is_empty() {
            text.push('\n');
        }
        Ok(text)
    }

    fn global_section(&self, device: &Device, position: Position, out: &mut Vec<String>) {
        let templates: Vec<_> = device
            .templates_at(position)
            .filter_map(|t| self.templates.get(&t.name))
            .collect();
        if templates.is_empty() {
            return;
        }

        out.push(String::new());
        out.push("!----------------------------------------------------".to_string());
        out.push(format!("! Global configuration for ({}) @ {}", device.name, position.as_str()));
        out.push("!------------------------------------------------------".to_string());
        for template in templates {
            out.push(String::new());
            out.push(format!("! [{} template used]:", template.name));
            out.extend(template.lines.iter().cloned());
        }
    }

    fn vrf_section(&self, device: &Device, out: &mut Vec<String>) {
        if device.vrfs.is_empty() {
            return;
        }
        section_header("VRF configuration", out);
        for vrf in device.vrfs.values() {
            out.push(format!("ip vrf {}", vrf.name));
            if !vrf.rd.is_empty() {
                out.push(format!(" rd {}", vrf.rd));
            }
            for target in &vrf.import_rt {
                out.push(format!(" route-target import {}", target));
            }
            for target in &vrf.export_rt {
                out.push(format!(" route-target export {}", target));
            }
            if !vrf.variable.is_empty() {
                out.push(format!(" {}", self.variables.resolve(&vrf.variable)));
            }
        }
    }

    fn vlan_section(&self, device: &Device, out: &mut Vec<String>) {
        if device.vlans.is_empty() {
            return;
        }
        section_header("VLAN configuration", out);
        for vlan in device.vlans.values() {
            out.push(format!("vlan {}", vlan.number));
            out.push(format!(" name {}", vlan.name));
        }
    }

    fn interface_section(
        &self,
        device: &Device,
        kind: InterfaceKind,
        out: &mut Vec<String>,
    ) -> CcgResult<()> {
        let present = match kind {
            InterfaceKind::Physical => device.has_physical_interfaces(),
            InterfaceKind::Logical => device.has_logical_interfaces(),
        };
        if !present {
            return Ok(());
        }

        section_header(&format!("Interface configuration [{}]", kind.as_str()), out);
        let wanted = kind == InterfaceKind::Logical;
        for intf in device.interfaces.values().filter(|i| i.is_logical() == wanted) {
            tracing::trace!("{}: {} is {}", device.name, intf.name, intf.logical_type().as_str());
            let lines = render_interface(intf, self.variables).map_err(|message| CcgError::Render {
                device: device.name.clone(),
                message,
            })?;
            out.extend(lines);
        }
        Ok(())
    }

    fn route_section(&self, device: &Device, out: &mut Vec<String>) -> CcgResult<()> {
        if device.static_routes.is_empty() {
            return Ok(());
        }
        section_header("Static Routes", out);
        for route in device.static_routes.values() {
            let line = route.render().map_err(|e| CcgError::Render {
                device: device.name.clone(),
                message: format!("route {}: {}", route.prefix, e),
            })?;
            out.push(line);
        }
        Ok(())
    }
}

fn section_header(title: &str, out: &mut Vec<String>) {
    out.push(SECTION_RULE.to_string());
    out.push(format!("! {}", title));
    out.push(SECTION_RULE.to_string());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::builder::device_row;
    use crate::builder::rows::column;
    use crate::registry::TEMPLATE_COLUMN;
    use crate::workbook::{sheet, Row, Workbook};

    fn template_line(text: &str) -> Row {
        Row::new([(TEMPLATE_COLUMN, text)])
    }

    fn full_workbook() -> Workbook {
        let mut wb = Workbook::default();
        wb.insert_sheet(
            sheet::VARIABLES,
            vec![
                Row::new([("Variable", "NTP1"), ("Variable Value", "10.1.1.1")]),
                Row::new([
                    ("Variable", "VRF_EXTRA"),
                    ("Variable Value", "description customer red"),
                ]),
            ],
        );
        wb.insert_sheet(
            sheet::CONFIG_TEMPLATES,
            vec![
                template_line("Config Template: [base]"),
                template_line("service timestamps log datetime"),
                template_line("ntp server [NTP1]"),
                template_line("Config Template: [tail]"),
                template_line("end"),
            ],
        );
        wb.insert_sheet(
            sheet::DEVICE_TEMPLATES,
            vec![
                device_row("sw1", &[("Config Template", "base"), (column::POSITION, "start")]),
                device_row("sw1", &[("Config Template", "tail"), (column::POSITION, "end")]),
            ],
        );
        wb.insert_sheet(
            sheet::VRF,
            vec![device_row(
                "sw1",
                &[
                    ("VRF", "RED"),
                    ("RD", "65000:1"),
                    (column::IMPORT_RT, "65000:1"),
                    (column::EXPORT_RT, "65000:1,65000:2"),
                    ("Variable", "VRF_EXTRA"),
                ],
            )],
        );
        wb.insert_sheet(
            sheet::VLANS,
            vec![
                device_row("sw1", &[("VLAN No", "100"), ("VLAN Name", "servers")]),
                device_row("sw1", &[("VLAN No", "20"), ("VLAN Name", "users")]),
            ],
        );
        wb.insert_sheet(
            sheet::L2_INTERFACES,
            vec![device_row(
                "sw1",
                &[
                    ("Interface", "Po1"),
                    (column::PC_MEMBERS, "Gi0/1"),
                    (column::PC_GROUP, "1"),
                    (column::PC_MODE, "active"),
                    (column::TRUNK_VLANS, "20,100-101"),
                    (column::ENABLED, "yes"),
                ],
            )],
        );
        wb.insert_sheet(
            sheet::STATIC_ROUTES,
            vec![device_row(
                "sw1",
                &[
                    ("Route (x.x.x.x/x)", "0.0.0.0/0"),
                    ("Next Hop", "192.0.2.1"),
                    (column::ROUTE_NAME, "default"),
                ],
            )],
        );
        wb
    }

    fn render(wb: &Workbook, device: &str) -> String {
        let model = NetworkModel::build(wb).unwrap();
        ConfigRenderer::for_model(&model)
            .render(model.devices.get(device).unwrap())
            .unwrap()
    }

    #[test]
    fn test_full_device_output() {
        let text = render(&full_workbook(), "sw1");
        let expected = "
!----------------------------------------------------
! Global configuration for (sw1) @ start
!------------------------------------------------------

! [base template used]:
service timestamps log datetime
ntp server 10.1.1.1
!---------------------------------
! VRF configuration
!---------------------------------
ip vrf RED
 rd 65000:1
 route-target import 65000:1
 route-target export 65000:1
 route-target export 65000:2
 description customer red
!---------------------------------
! VLAN configuration
!---------------------------------
vlan 100
 name servers
vlan 20
 name users
!---------------------------------
! Interface configuration [physical]
!---------------------------------
!
interface gi0/1
  switchport
  channel-group 1 mode active
  no shutdown
!---------------------------------
! Interface configuration [logical]
!---------------------------------
!
interface po1
!- member interfaces: gi0/1
  switchport
  switchport mode trunk
  switchport trunk allowed vlan 20,100,101
  no shutdown
!---------------------------------
! Static Routes
!---------------------------------
ip route 0.0.0.0 0.0.0.0 192.0.2.1 name default

!----------------------------------------------------
! Global configuration for (sw1) @ end
!------------------------------------------------------

! [tail template used]:
end
";
        assert_eq!(text, expected);
    }

    #[test]
    fn test_empty_sections_emit_nothing() {
        let mut wb = Workbook::default();
        wb.insert_sheet(
            sheet::L3_INTERFACES,
            vec![device_row(
                "r1",
                &[("Interface", "Loopback0"), (column::IP_ADDRESS, "10.255.0.1/32")],
            )],
        );
        let text = render(&wb, "r1");
        assert!(!text.contains("VRF configuration"));
        assert!(!text.contains("VLAN configuration"));
        assert!(!text.contains("[physical]"));
        assert!(!text.contains("Static Routes"));
        assert!(!text.contains("Global configuration"));
        assert!(text.contains("! Interface configuration [logical]"));
        assert!(text.contains("  ip address 10.255.0.1 255.255.255.255"));
    }

    #[test]
    fn test_device_with_nothing_renders_empty() {
        let mut wb = Workbook::default();
        wb.insert_sheet(sheet::VLANS, vec![device_row("sw9", &[("VLAN No", "10")])]);
        assert_eq!(render(&wb, "sw9"), "");
    }

    #[test]
    fn test_undefined_template_is_not_rendered() {
        let mut wb = Workbook::default();
        wb.insert_sheet(
            sheet::DEVICE_TEMPLATES,
            vec![device_row("sw1", &[("Config Template", "missing")])],
        );
        assert_eq!(render(&wb, "sw1"), "");
    }

    #[test]
    fn test_vlans_emit_in_text_order() {
        let mut wb = Workbook::default();
        wb.insert_sheet(
            sheet::VLANS,
            vec![
                device_row("sw1", &[("VLAN No", "3"), ("VLAN Name", "three")]),
                device_row("sw1", &[("VLAN No", "100"), ("VLAN Name", "hundred")]),
                device_row("sw1", &[("VLAN No", "20"), ("VLAN Name", "twenty")]),
            ],
        );
        let text = render(&wb, "sw1");
        let ids: Vec<&str> = text.lines().filter_map(|l| l.strip_prefix("vlan ")).collect();
        assert_eq!(ids, vec!["100", "20", "3"]);
    }

    #[test]
    fn test_section_order() {
        let text = render(&full_workbook(), "sw1");
        let markers = [
            "@ start",
            "! VRF configuration",
            "! VLAN configuration",
            "[physical]",
            "[logical]",
            "! Static Routes",
            "@ end",
        ];
        let positions: Vec<usize> = markers.iter().map(|m| text.find(m).unwrap()).collect();
        let mut sorted = positions.clone();
        sorted.sort_unstable();
        assert_eq!(positions, sorted);
    }
}
