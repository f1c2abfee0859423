use std::net::Ipv4Addr;

/// Normalize a device or interface name to lowercase without surrounding whitespace
pub fn normalize_name(name: &str) -> String {
    name.trim().to_lowercase()
}

/// Split a comma-separated cell into its items.
/// All whitespace is removed first; empty items are dropped.
pub fn csv_to_vec(csv: &str) -> Vec<String> {
    let compact: String = csv.chars().filter(|c| !c.is_whitespace()).collect();
    if compact.is_empty() {
        return vec![];
    }
    compact
        .split(',')
        .filter(|s| !s.is_empty())
        .map(|s| s.to_string())
        .collect()
}

/// Parse an IPv4 CIDR string (e.g., "10.0.0.1/24").
/// Returns the address as written (not the network address) and the prefix length.
pub fn parse_cidr(cidr: &str) -> Result<(Ipv4Addr, u8), String> {
    let (addr, len) = cidr
        .trim()
        .split_once('/')
        .ok_or_else(|| format!("missing prefix length in {}", cidr))?;

    let address: Ipv4Addr = addr
        .parse()
        .map_err(|_| format!("invalid IPv4 address {}", addr))?;
    let prefix_len: u8 = len
        .parse()
        .map_err(|_| format!("invalid prefix length {}", len))?;
    if prefix_len > 32 {
        return Err(format!("prefix length {} out of range", prefix_len));
    }

    Ok((address, prefix_len))
}

/// Dotted-decimal subnet mask for a prefix length (0-32)
pub fn prefix_len_to_netmask(prefix_len: u8) -> Ipv4Addr {
    let mask = match prefix_len {
        0 => 0,
        n if n >= 32 => u32::MAX,
        n => u32::MAX << (32 - u32::from(n)),
    };
    Ipv4Addr::from(mask)
}

/// Convert CIDR notation to the "address mask" form used on IOS
/// e.g., "10.0.0.1/24" -> "10.0.0.1 255.255.255.0"
pub fn cidr_to_address_mask(cidr: &str) -> Result<String, String> {
    let (address, prefix_len) = parse_cidr(cidr)?;
    Ok(format!("{} {}", address, prefix_len_to_netmask(prefix_len)))
}

/// Usable 802.1Q VLAN ids
pub const VLAN_ID_RANGE: std::ops::RangeInclusive<u32> = 1..=4094;

fn check_vlan_id(id: u32, token: &str) -> Result<u32, String> {
    if VLAN_ID_RANGE.contains(&id) {
        Ok(id)
    } else {
        Err(format!("vlan id out of range in {} (1-4094)", token))
    }
}

/// Expand a trunk VLAN list such as "10,20-22" into individual ids.
/// Token order is preserved and each range expands ascending.
/// Numeric ids and range bounds must lie in 1-4094.
pub fn expand_vlan_ranges(list: &str) -> Result<Vec<String>, String> {
    let mut vlans = Vec::new();

    for token in csv_to_vec(list) {
        let Some((start, end)) = token.split_once('-') else {
            if token.bytes().all(|b| b.is_ascii_digit()) {
                check_vlan_id(token.parse().unwrap_or(0), &token)?;
            }
            vlans.push(token);
            continue;
        };

        let start: u32 = start
            .parse()
            .map_err(|_| format!("range {} has a non-numeric start", token))?;
        let end: u32 = end
            .parse()
            .map_err(|_| format!("range {} has a non-numeric end", token))?;
        let start = check_vlan_id(start, &token)?;
        let end = check_vlan_id(end, &token)?;
        if start > end {
            return Err(format!("range {} runs backwards", token));
        }

        vlans.extend((start..=end).map(|vlan| vlan.to_string()));
    }

    Ok(vlans)
}

/// Expanded trunk VLAN list as the comma-joined text used on the allowed-vlan line
pub fn format_trunk_vlans(list: &str) -> Result<String, String> {
    Ok(expand_vlan_ranges(list)?.join(","))
}
