mod port_channels;
pub mod rows;

use std::collections::BTreeMap;

use crate::error::{CcgError, CcgResult};
use crate::models::{Device, DeviceTemplate, Interface, LayerType, StaticRoute, Vlan, Vrf};
use crate::registry::{TemplateRegistry, Variable, VariableRegistry};
use crate::utils;
use crate::workbook::{sheet, Workbook};

use rows::{
    DeviceTemplateRow, InterfaceRow, StaticRouteRow, VariableRow, VlanRow, VrfRow,
};

/// Spreadsheet row number of a data row (header is row 1)
fn row_number(idx: usize) -> usize {
    idx + 2
}

/// NetworkModel is the immutable result of a build
#[derive(Debug, Clone, Default)]
pub struct NetworkModel {
    pub devices: BTreeMap<String, Device>,
    pub variables: VariableRegistry,
    pub templates: TemplateRegistry,
}

impl NetworkModel {
    /// Build the full model from a workbook
    pub fn build(workbook: &Workbook) -> CcgResult<Self> {
        ModelBuilder::new(workbook).build()
    }
}

/// ModelBuilder carries the in-progress model through the build steps.
///
/// Steps must run in order: templates need variables, and port-channel
/// synthesis needs every device's interfaces loaded.
pub struct ModelBuilder<'a> {
    workbook: &'a Workbook,
    model: NetworkModel,
}

impl<'a> ModelBuilder<'a> {
    pub fn new(workbook: &'a Workbook) -> Self {
        Self {
            workbook,
            model: NetworkModel::default(),
        }
    }

    pub fn build(mut self) -> CcgResult<NetworkModel> {
        self.discover_devices();
        self.load_variables();
        self.load_templates();
        self.attach_device_templates();
        self.load_vlans();
        self.load_vrfs();
        self.load_static_routes()?;
        self.load_interfaces(sheet::L2_INTERFACES, LayerType::Layer2)?;
        self.load_interfaces(sheet::L3_INTERFACES, LayerType::Layer3)?;
        self.synthesize_port_channels();

        tracing::info!(
            "Model built: {} devices, {} variables, {} templates",
            self.model.devices.len(),
            self.model.variables.len(),
            self.model.templates.len()
        );
        Ok(self.model)
    }

    /// Step 1: register every device named in a device-bearing sheet
    pub fn discover_devices(&mut self) {
        for sheet_name in sheet::DEVICE_SHEETS {
            for row in self.workbook.sheet(sheet_name) {
                if let Some(name) = rows::device_name(row) {
                    self.model
                        .devices
                        .entry(name.clone())
                        .or_insert_with(|| Device::new(name));
                }
            }
        }
        tracing::debug!("Discovered {} devices", self.model.devices.len());
    }

    /// Step 2
    pub fn load_variables(&mut self) {
        for row in self.workbook.sheet(sheet::VARIABLES) {
            let Some(var) = VariableRow::decode(row) else {
                continue;
            };
            let variable = Variable {
                name: var.name,
                value: var.value,
                comment: var.comment,
            };
            if !variable.comment.is_empty() {
                tracing::debug!("variable {}: {}", variable.name, variable.comment);
            }
            self.model.variables.insert(variable);
        }
    }

    /// Step 3: collect template bodies, then substitute variables once
    pub fn load_templates(&mut self) {
        let mut templates = TemplateRegistry::from_rows(self.workbook.template_sheet());
        if templates.is_empty() {
            tracing::debug!("No config templates defined");
        } else if self.model.variables.is_empty() {
            tracing::debug!("No variables defined, templates used as written");
        }
        templates.apply_variables(&self.model.variables);
        self.model.templates = templates;
    }

    /// Step 4
    pub fn attach_device_templates(&mut self) {
        let workbook = self.workbook;
        let rows = workbook.sheet(sheet::DEVICE_TEMPLATES);
        for (idx, row) in rows.iter().enumerate() {
            let Some(decoded) = DeviceTemplateRow::decode(row) else {
                continue;
            };
            let Some(position) = decoded.position else {
                tracing::warn!(
                    "device_templates row {}: unknown position '{}' for template {}, skipped",
                    row_number(idx),
                    decoded.raw_position,
                    decoded.template
                );
                continue;
            };
            if self.model.templates.get(&decoded.template).is_none() {
                tracing::warn!(
                    "device_templates row {}: template '{}' is not defined in config_templates",
                    row_number(idx),
                    decoded.template
                );
            }
            if let Some(device) = self.device_mut(&decoded.device) {
                device.templates.insert(
                    decoded.template.clone(),
                    DeviceTemplate {
                        name: decoded.template,
                        position,
                    },
                );
            }
        }
    }

    /// Step 5
    pub fn load_vlans(&mut self) {
        let workbook = self.workbook;
        for row in workbook.sheet(sheet::VLANS) {
            let Some(vlan) = VlanRow::decode(row) else {
                continue;
            };
            if let Some(device) = self.device_mut(&vlan.device) {
                device.vlans.insert(
                    vlan.number.clone(),
                    Vlan {
                        number: vlan.number,
                        name: vlan.name,
                    },
                );
            }
        }
    }

    /// Step 6
    pub fn load_vrfs(&mut self) {
        let workbook = self.workbook;
        for row in workbook.sheet(sheet::VRF) {
            let Some(vrf) = VrfRow::decode(row) else {
                continue;
            };
            if let Some(device) = self.device_mut(&vrf.device) {
                device.vrfs.insert(
                    vrf.name.clone(),
                    Vrf {
                        name: vrf.name,
                        rd: vrf.rd,
                        import_rt: vrf.import_rt,
                        export_rt: vrf.export_rt,
                        variable: vrf.variable,
                    },
                );
            }
        }
    }

    /// Step 7: routes are keyed by prefix alone, last row wins
    pub fn load_static_routes(&mut self) -> CcgResult<()> {
        let workbook = self.workbook;
        let rows = workbook.sheet(sheet::STATIC_ROUTES);
        for (idx, row) in rows.iter().enumerate() {
            let Some(route) = StaticRouteRow::decode(row) else {
                continue;
            };
            utils::parse_cidr(&route.prefix).map_err(|reason| CcgError::InvalidCidr {
                sheet: sheet::STATIC_ROUTES.to_string(),
                row: row_number(idx),
                device: route.device.clone(),
                field: "route".to_string(),
                value: route.prefix.clone(),
                reason,
            })?;

            if let Some(device) = self.device_mut(&route.device) {
                if let Some(previous) = device.static_routes.get(&route.prefix) {
                    tracing::warn!(
                        "{}: route {} (vrf '{}') replaced by row {} (vrf '{}')",
                        device.name,
                        route.prefix,
                        previous.vrf,
                        row_number(idx),
                        route.vrf
                    );
                }
                device.static_routes.insert(
                    route.prefix.clone(),
                    StaticRoute {
                        prefix: route.prefix,
                        next_hop: route.next_hop,
                        name: route.name,
                        vrf: route.vrf,
                    },
                );
            }
        }
        Ok(())
    }

    /// Step 8: both layer sheets write into the same map, so a name in
    /// both keeps the layer-3 record
    pub fn load_interfaces(&mut self, sheet_name: &str, layer: LayerType) -> CcgResult<()> {
        let workbook = self.workbook;
        let rows = workbook.sheet(sheet_name);
        for (idx, row) in rows.iter().enumerate() {
            let Some(decoded) = InterfaceRow::decode(row, layer) else {
                continue;
            };
            validate_interface(sheet_name, row_number(idx), &decoded)?;

            if let Some(device) = self.device_mut(&decoded.device) {
                if let Some(previous) = device.interfaces.get(&decoded.name) {
                    tracing::warn!(
                        "{}: interface {} ({}) replaced by {} row {}",
                        device.name,
                        decoded.name,
                        previous.layer.as_str(),
                        sheet_name,
                        row_number(idx)
                    );
                }
                let intf = interface_from_row(decoded);
                device.interfaces.insert(intf.name.clone(), intf);
            }
        }
        Ok(())
    }

    /// Step 9
    pub fn synthesize_port_channels(&mut self) {
        let created = port_channels::synthesize_members(&mut self.model.devices);
        tracing::debug!("Synthesized {} port-channel member interfaces", created);
    }

    /// Lookup of a registered device; absence means the row is skipped
    fn device_mut(&mut self, name: &str) -> Option<&mut Device> {
        self.model.devices.get_mut(name)
    }
}

/// Reject trunk lists and addresses that cannot be rendered
fn validate_interface(sheet_name: &str, row: usize, intf: &InterfaceRow) -> CcgResult<()> {
    if !intf.trunk_vlans.is_empty() {
        utils::expand_vlan_ranges(&intf.trunk_vlans).map_err(|reason| CcgError::InvalidVlanRange {
            sheet: sheet_name.to_string(),
            row,
            device: intf.device.clone(),
            interface: intf.name.clone(),
            value: intf.trunk_vlans.clone(),
            reason,
        })?;
    }
    if !intf.ip_address.is_empty() {
        utils::parse_cidr(&intf.ip_address).map_err(|reason| CcgError::InvalidCidr {
            sheet: sheet_name.to_string(),
            row,
            device: intf.device.clone(),
            field: format!("interface '{}'", intf.name),
            value: intf.ip_address.clone(),
            reason,
        })?;
    }
    Ok(())
}

fn interface_from_row(row: InterfaceRow) -> Interface {
    Interface {
        name: row.name,
        layer: row.layer,
        enabled: row.enabled,
        speed: row.speed,
        duplex: row.duplex,
        mtu: row.mtu,
        description: row.description,
        variable1: row.variable1,
        variable2: row.variable2,
        data_vlan: row.data_vlan,
        voice_vlan: row.voice_vlan,
        native_vlan: row.native_vlan,
        trunk_vlans: row.trunk_vlans,
        vrf: row.vrf,
        ip_address: row.ip_address,
        pc_group: row.pc_group,
        pc_mode: row.pc_mode,
        pc_type: None,
        pc_members: row.pc_members,
        pc_parent: String::new(),
        comment: String::new(),
    }
}

/// Rows for tests: a device row with extra cells
#[cfg(test)]
pub(crate) fn device_row(device: &str, cells: &[(&str, &str)]) -> crate::workbook::Row {
    let mut all = vec![("Device Name", device)];
    all.extend_from_slice(cells);
    crate::workbook::Row::new(all)
}
