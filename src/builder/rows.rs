//! Typed decoding of workbook rows.
//!
//! Each decoder checks the required fields of its sheet and returns `None`
//! when one is empty. `None` is the skip signal: sparse spreadsheets routinely
//! carry half-filled rows and those are not errors.

use crate::models::{Enabled, LayerType, Position};
use crate::utils::{csv_to_vec, normalize_name};
use crate::workbook::Row;

/// Column headers as they appear in the workbook
pub mod column {
    pub const DEVICE_NAME: &str = "Device Name";

    pub const VARIABLE: &str = "Variable";
    pub const VARIABLE_VALUE: &str = "Variable Value";
    pub const COMMENTS: &str = "Comments";

    pub const CONFIG_TEMPLATE: &str = "Config Template";
    pub const POSITION: &str = "Position (Default: Start)";

    pub const VLAN_NO: &str = "VLAN No";
    pub const VLAN_NAME: &str = "VLAN Name";

    pub const VRF: &str = "VRF";
    pub const RD: &str = "RD";
    pub const IMPORT_RT: &str = "Import RT (separated by commas)";
    pub const EXPORT_RT: &str = "Export RT (separated by commas)";

    pub const ROUTE: &str = "Route (x.x.x.x/x)";
    pub const NEXT_HOP: &str = "Next Hop";
    pub const ROUTE_NAME: &str = "Route Name (no spaces)";
    pub const ROUTE_VRF: &str = "VRF (if applicable)";

    pub const INTERFACE: &str = "Interface";
    pub const ENABLED: &str = "Interface Enabled (yes/no)";
    pub const SPEED: &str = "Speed";
    pub const DUPLEX: &str = "Duplex";
    pub const MTU: &str = "MTU";
    pub const DESCRIPTION: &str = "Description";
    pub const VARIABLE_1: &str = "Variable 1";
    pub const VARIABLE_2: &str = "Variable 2";
    pub const PC_GROUP: &str = "Port-Channel Group No";
    pub const PC_MODE: &str = "Port-Channel Mode (active/on/etc)";
    pub const PC_MEMBERS: &str = "Port-Channel Members (separated by commas)";
    pub const DATA_VLAN: &str = "Data VLAN";
    pub const VOICE_VLAN: &str = "Voice VLAN";
    pub const NATIVE_VLAN: &str = "Trunk Native VLAN";
    pub const TRUNK_VLANS: &str = "Trunk Allowed VLANs (separated by commas)";
    pub const INTERFACE_VRF: &str = "VRF (leave blank if global)";
    pub const IP_ADDRESS: &str = "IP Address (x.x.x.x/x)";
}

/// Normalized device name of a row, `None` when the cell is empty
pub fn device_name(row: &Row) -> Option<String> {
    let name = normalize_name(row.text(column::DEVICE_NAME));
    (!name.is_empty()).then_some(name)
}

/// True when every listed column has a value
fn has_all(row: &Row, columns: &[&str]) -> bool {
    columns.iter().all(|c| row.has_value(c))
}

#[derive(Debug, Clone, PartialEq)]
pub struct VariableRow {
    pub name: String,
    pub value: String,
    pub comment: String,
}

impl VariableRow {
    pub fn decode(row: &Row) -> Option<Self> {
        if !has_all(row, &[column::VARIABLE, column::VARIABLE_VALUE]) {
            return None;
        }
        Some(Self {
            name: row.text(column::VARIABLE).to_string(),
            value: row.text(column::VARIABLE_VALUE).to_string(),
            comment: row.text(column::COMMENTS).to_string(),
        })
    }
}

/// Position cell as written; parsed by the builder so an unknown value can be reported
#[derive(Debug, Clone, PartialEq)]
pub struct DeviceTemplateRow {
    pub device: String,
    pub template: String,
    pub position: Option<Position>,
    pub raw_position: String,
}

impl DeviceTemplateRow {
    pub fn decode(row: &Row) -> Option<Self> {
        let device = device_name(row)?;
        if !row.has_value(column::CONFIG_TEMPLATE) {
            return None;
        }
        let raw_position = row.text(column::POSITION).to_string();
        Some(Self {
            device,
            template: row.text(column::CONFIG_TEMPLATE).to_string(),
            position: Position::parse(&raw_position),
            raw_position,
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VlanRow {
    pub device: String,
    pub number: String,
    pub name: String,
}

impl VlanRow {
    pub fn decode(row: &Row) -> Option<Self> {
        let device = device_name(row)?;
        if !has_all(row, &[column::VLAN_NO, column::VLAN_NAME]) {
            return None;
        }
        Some(Self {
            device,
            number: row.text(column::VLAN_NO).to_string(),
            name: row.text(column::VLAN_NAME).to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct VrfRow {
    pub device: String,
    pub name: String,
    pub rd: String,
    pub import_rt: Vec<String>,
    pub export_rt: Vec<String>,
    pub variable: String,
}

impl VrfRow {
    pub fn decode(row: &Row) -> Option<Self> {
        let device = device_name(row)?;
        if !row.has_value(column::VRF) {
            return None;
        }
        Some(Self {
            device,
            name: row.text(column::VRF).to_string(),
            rd: row.text(column::RD).to_string(),
            import_rt: csv_to_vec(row.text(column::IMPORT_RT)),
            export_rt: csv_to_vec(row.text(column::EXPORT_RT)),
            variable: row.text(column::VARIABLE).to_string(),
        })
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct StaticRouteRow {
    pub device: String,
    pub prefix: String,
    pub next_hop: String,
    pub name: String,
    pub vrf: String,
}

impl StaticRouteRow {
    pub fn decode(row: &Row) -> Option<Self> {
        let device = device_name(row)?;
        if !has_all(row, &[column::ROUTE, column::NEXT_HOP]) {
            return None;
        }
        Some(Self {
            device,
            prefix: row.text(column::ROUTE).to_string(),
            next_hop: row.text(column::NEXT_HOP).to_string(),
            name: row.text(column::ROUTE_NAME).to_string(),
            vrf: row.text(column::ROUTE_VRF).to_string(),
        })
    }
}

/// An l2_interfaces or l3_interfaces row. Layer-2 rows read the VLAN
/// columns; layer-3 rows read VRF and IP address.
#[derive(Debug, Clone, PartialEq)]
pub struct InterfaceRow {
    pub device: String,
    pub name: String,
    pub layer: LayerType,
    pub enabled: Enabled,
    pub speed: String,
    pub duplex: String,
    pub mtu: String,
    pub description: String,
    pub variable1: String,
    pub variable2: String,
    pub pc_group: String,
    pub pc_mode: String,
    pub pc_members: Vec<String>,
    pub data_vlan: String,
    pub voice_vlan: String,
    pub native_vlan: String,
    pub trunk_vlans: String,
    pub vrf: String,
    pub ip_address: String,
}

impl InterfaceRow {
    pub fn decode(row: &Row, layer: LayerType) -> Option<Self> {
        let device = device_name(row)?;
        let name = normalize_name(row.text(column::INTERFACE));
        if name.is_empty() {
            return None;
        }

        let text = |c: &str| row.text(c).to_string();
        let (data_vlan, voice_vlan, native_vlan, trunk_vlans, vrf, ip_address) = match layer {
            LayerType::Layer2 => (
                text(column::DATA_VLAN),
                text(column::VOICE_VLAN),
                text(column::NATIVE_VLAN),
                text(column::TRUNK_VLANS),
                String::new(),
                String::new(),
            ),
            LayerType::Layer3 => (
                String::new(),
                String::new(),
                String::new(),
                String::new(),
                text(column::INTERFACE_VRF),
                text(column::IP_ADDRESS),
            ),
        };

        Some(Self {
            device,
            name,
            layer,
            enabled: Enabled::parse(row.text(column::ENABLED)),
            speed: text(column::SPEED),
            duplex: text(column::DUPLEX),
            mtu: text(column::MTU),
            description: text(column::DESCRIPTION),
            variable1: text(column::VARIABLE_1),
            variable2: text(column::VARIABLE_2),
            pc_group: text(column::PC_GROUP),
            pc_mode: text(column::PC_MODE),
            pc_members: csv_to_vec(row.text(column::PC_MEMBERS))
                .into_iter()
                .map(|m| m.to_lowercase())
                .collect(),
            data_vlan,
            voice_vlan,
            native_vlan,
            trunk_vlans,
            vrf,
            ip_address,
        })
    }
}
