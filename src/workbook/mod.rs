use serde::Deserialize;
use serde_json::Value;
use std::collections::BTreeMap;
use std::path::Path;

use crate::error::{CcgError, CcgResult};

/// Sheet names read by the generator
pub mod sheet {
    pub const VARIABLES: &str = "variables";
    pub const CONFIG_TEMPLATES: &str = "config_templates";
    pub const CONFIG_TEMPLATES_LEGACY: &str = "config-templates";
    pub const DEVICE_TEMPLATES: &str = "device_templates";
    pub const VLANS: &str = "vlans";
    pub const VRF: &str = "vrf";
    pub const STATIC_ROUTES: &str = "static_routes";
    pub const L2_INTERFACES: &str = "l2_interfaces";
    pub const L3_INTERFACES: &str = "l3_interfaces";
    pub const INSTRUCTIONS: &str = "Instructions";

    /// Sheets whose rows carry a `Device Name` column
    pub const DEVICE_SHEETS: &[&str] = &[
        DEVICE_TEMPLATES,
        L2_INTERFACES,
        L3_INTERFACES,
        VLANS,
        VRF,
        STATIC_ROUTES,
    ];
}

/// One spreadsheet row: column header -> cell text
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Row {
    cells: BTreeMap<String, String>,
}

impl Row {
    pub fn new<K, V, I>(cells: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        Self {
            cells: cells.into_iter().map(|(k, v)| (k.into(), v.into())).collect(),
        }
    }

    /// Trimmed cell text for a column, empty when the column is absent.
    ///
    /// An exact header match wins; otherwise headers are compared without
    /// case and without a trailing "(...)" hint, so `Route` finds
    /// `Route (x.x.x.x/x)`.
    pub fn text(&self, column: &str) -> &str {
        if let Some(value) = self.cells.get(column) {
            return value.trim();
        }
        let wanted = header_key(column);
        self.cells
            .iter()
            .find(|(header, _)| header_key(header) == wanted)
            .map(|(_, value)| value.trim())
            .unwrap_or("")
    }

    /// Untrimmed cell text, for free-text columns such as template lines
    pub fn raw(&self, column: &str) -> Option<&str> {
        self.cells.get(column).map(String::as_str)
    }

    /// The only cell of a single-column row
    pub fn sole_cell(&self) -> Option<&str> {
        if self.cells.len() == 1 {
            self.cells.values().next().map(String::as_str)
        } else {
            None
        }
    }

    pub fn has_value(&self, column: &str) -> bool {
        !self.text(column).is_empty()
    }
}

/// Header comparison key: lowercase, trailing parenthesised hint removed
fn header_key(header: &str) -> String {
    let base = match header.find('(') {
        Some(idx) => &header[..idx],
        None => header,
    };
    base.trim().to_lowercase()
}

/// Coerce a JSON cell the way the spreadsheet reader does:
/// whole numbers become integer text, null becomes empty.
fn cell_text(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Bool(b) => b.to_string(),
        Value::Number(n) => {
            if let Some(i) = n.as_i64() {
                i.to_string()
            } else if let Some(u) = n.as_u64() {
                u.to_string()
            } else {
                match n.as_f64() {
                    Some(f) if f.fract() == 0.0 && f.abs() < 9.0e15 => format!("{}", f as i64),
                    _ => n.to_string(),
                }
            }
        }
        other => other.to_string(),
    }
}

#[derive(Debug, Deserialize)]
#[serde(transparent)]
struct RawWorkbook(BTreeMap<String, Vec<BTreeMap<String, Value>>>);

/// Workbook holds every sheet of the input, keyed by sheet name
#[derive(Debug, Clone, Default)]
pub struct Workbook {
    sheets: BTreeMap<String, Vec<Row>>,
}

impl Workbook {
    /// Read a JSON workbook from disk
    pub fn load(path: &Path) -> CcgResult<Self> {
        let content = std::fs::read_to_string(path).map_err(|source| CcgError::Read {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&content).map_err(|source| CcgError::Parse {
            path: path.to_path_buf(),
            source,
        })
    }

    /// Parse a workbook from JSON text: `{ "<sheet>": [ { "<column>": <cell> } ] }`
    pub fn from_json_str(content: &str) -> Result<Self, serde_json::Error> {
        let RawWorkbook(raw) = serde_json::from_str(content)?;
        let mut workbook = Workbook::default();
        for (name, rows) in raw {
            if name == sheet::INSTRUCTIONS {
                continue;
            }
            let rows = rows
                .iter()
                .map(|cells| Row::new(cells.iter().map(|(k, v)| (k.clone(), cell_text(v)))))
                .collect();
            workbook.sheets.insert(name, rows);
        }
        Ok(workbook)
    }

    #[cfg(test)]
    pub fn insert_sheet(&mut self, name: impl Into<String>, rows: Vec<Row>) {
        self.sheets.insert(name.into(), rows);
    }

    /// Rows of a sheet; a sheet missing from the workbook reads as empty
    pub fn sheet(&self, name: &str) -> &[Row] {
        self.sheets.get(name).map(Vec::as_slice).unwrap_or(&[])
    }

    /// The template sheet, under either its current or legacy name
    pub fn template_sheet(&self) -> &[Row] {
        let rows = self.sheet(sheet::CONFIG_TEMPLATES);
        if rows.is_empty() {
            self.sheet(sheet::CONFIG_TEMPLATES_LEGACY)
        } else {
            rows
        }
    }

    pub fn sheet_names(&self) -> impl Iterator<Item = &str> {
        self.sheets.keys().map(String::as_str)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_numeric_cells_become_integer_text() {
        let wb = Workbook::from_json_str(
            r#"{"vlans": [{"Device Name": "SW1", "VLAN No": 10.0, "VLAN Name": "users", "MTU": 1500, "Note": null}]}"#,
        )
        .unwrap();
        let row = &wb.sheet("vlans")[0];
        assert_eq!(row.text("VLAN No"), "10");
        assert_eq!(row.text("MTU"), "1500");
        assert_eq!(row.text("Note"), "");
    }

    #[test]
    fn test_instructions_sheet_is_ignored() {
        let wb = Workbook::from_json_str(r#"{"Instructions": [{"A": "read me"}], "vrf": []}"#)
            .unwrap();
        let names: Vec<&str> = wb.sheet_names().collect();
        assert_eq!(names, vec!["vrf"]);
    }

    #[test]
    fn test_missing_sheet_reads_empty() {
        let wb = Workbook::default();
        assert!(wb.sheet("static_routes").is_empty());
    }

    #[test]
    fn test_decorated_header_lookup() {
        let row = Row::new([("Route (x.x.x.x/x)", " 10.0.0.0/8 "), ("Next Hop", "1.1.1.1")]);
        assert_eq!(row.text("Route (x.x.x.x/x)"), "10.0.0.0/8");
        assert_eq!(row.text("Route"), "10.0.0.0/8");
        assert_eq!(row.text("next hop"), "1.1.1.1");
        assert_eq!(row.text("Route Name"), "");
        assert!(!row.has_value("VRF (if applicable)"));
    }

    #[test]
    fn test_legacy_template_sheet_name() {
        let mut wb = Workbook::default();
        wb.insert_sheet("config-templates", vec![Row::new([("Lines", "hostname x")])]);
        assert_eq!(wb.template_sheet().len(), 1);
    }

    #[test]
    fn test_load_reports_unreadable_file() {
        let err = Workbook::load(Path::new("/nonexistent/ccg-input.json")).unwrap_err();
        assert!(matches!(err, CcgError::Read { .. }));
        assert_eq!(err.exit_code(), 3);
    }
}
