use std::collections::BTreeMap;

use crate::models::{Device, Enabled, Interface, LayerType};

/// The parts of a port-channel parent that its members inherit
#[derive(Debug, Clone)]
struct Bundle {
    parent: String,
    layer: LayerType,
    enabled: Enabled,
    mtu: String,
    group: String,
    mode: String,
    members: Vec<String>,
}

impl Bundle {
    fn from_parent(intf: &Interface) -> Self {
        Self {
            parent: intf.name.clone(),
            layer: intf.layer,
            enabled: intf.enabled,
            mtu: intf.mtu.clone(),
            group: intf.pc_group.clone(),
            mode: intf.pc_mode.clone(),
            members: intf.pc_members.clone(),
        }
    }

    fn comment(&self) -> String {
        format!("!- member interfaces: {}", self.members.join(","))
    }

    /// Overwrite only the linkage fields of a user-defined member
    fn link(&self, member: &mut Interface) {
        member.pc_parent = self.parent.clone();
        member.pc_type = Some(self.layer);
        member.pc_group = self.group.clone();
        member.pc_mode = self.mode.clone();
    }

    fn synthesize(&self, name: &str) -> Interface {
        let mut member = Interface::new(name, self.layer);
        member.enabled = self.enabled;
        member.mtu = self.mtu.clone();
        self.link(&mut member);
        member
    }
}

/// Create or link the member interfaces of every port-channel parent.
///
/// Members that already exist keep their own fields and only gain the
/// linkage. Missing members are collected per device and merged after the
/// scan, so a synthesized member never influences the scan that made it.
/// Returns the number of synthesized interfaces.
pub fn synthesize_members(devices: &mut BTreeMap<String, Device>) -> usize {
    let mut created = 0;

    for device in devices.values_mut() {
        let bundles: Vec<Bundle> = device
            .interfaces
            .values()
            .filter(|i| i.is_pc_parent())
            .map(Bundle::from_parent)
            .collect();

        let mut synthesized: BTreeMap<String, Interface> = BTreeMap::new();
        for bundle in &bundles {
            if let Some(parent) = device.interfaces.get_mut(&bundle.parent) {
                parent.comment = bundle.comment();
            }

            for member in &bundle.members {
                match device.interfaces.get_mut(member) {
                    Some(existing) => {
                        tracing::debug!("{}: linking {} to {}", device.name, member, bundle.parent);
                        bundle.link(existing);
                    }
                    None => {
                        synthesized.insert(member.clone(), bundle.synthesize(member));
                    }
                }
            }
        }

        created += synthesized.len();
        device.interfaces.extend(synthesized);
    }

    created
}
