use regex_lite::Regex;
use std::collections::BTreeMap;
use std::sync::OnceLock;

use crate::workbook::Row;

/// Column holding template text in the template sheet
pub const TEMPLATE_COLUMN: &str = "Enter config templates below this line:";

/// A line that starts a new template body
const TEMPLATE_MARKER: &str = r"(?i)Config Template:\s*\[(.*?)\]";

/// A `[name]` placeholder
const PLACEHOLDER: &str = r"\[([^\[\]]+)\]";

fn placeholder_regex() -> Option<&'static Regex> {
    static RE: OnceLock<Option<Regex>> = OnceLock::new();
    RE.get_or_init(|| Regex::new(PLACEHOLDER).ok()).as_ref()
}

/// Upper-case identifiers such as `VRF_EXTRA` are how variables are named;
/// a cell holding only one is almost certainly a missing variable.
fn looks_like_variable_name(cell: &str) -> bool {
    let mut chars = cell.chars();
    matches!(chars.next(), Some(c) if c.is_ascii_uppercase())
        && chars.all(|c| c.is_ascii_uppercase() || c.is_ascii_digit() || c == '_')
}

/// Variable represents a named value from the variables sheet
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Variable {
    pub name: String,
    pub value: String,
    pub comment: String,
}

/// Process-wide variables, keyed by name
#[derive(Debug, Clone, Default)]
pub struct VariableRegistry {
    variables: BTreeMap<String, Variable>,
}

impl VariableRegistry {
    pub fn insert(&mut self, variable: Variable) {
        self.variables.insert(variable.name.clone(), variable);
    }

    pub fn get(&self, name: &str) -> Option<&Variable> {
        self.variables.get(name)
    }

    pub fn len(&self) -> usize {
        self.variables.len()
    }

    pub fn is_empty(&self) -> bool {
        self.variables.is_empty()
    }

    /// Replace every `[name]` whose variable is known, in one pass.
    /// Unknown placeholders stay as written and substituted values are not rescanned.
    pub fn substitute(&self, text: &str) -> String {
        let Some(re) = placeholder_regex() else {
            return text.to_string();
        };
        re.replace_all(text, |caps: &regex_lite::Captures<'_>| {
            match self.variables.get(&caps[1]) {
                Some(var) => var.value.clone(),
                None => caps[0].to_string(),
            }
        })
        .into_owned()
    }

    /// Resolve an extra-config cell: a bare variable name yields its value,
    /// anything else goes through placeholder substitution.
    pub fn resolve(&self, cell: &str) -> String {
        match self.variables.get(cell) {
            Some(var) => var.value.clone(),
            None => {
                if looks_like_variable_name(cell) {
                    tracing::warn!("'{}' is not a defined variable, emitted as written", cell);
                }
                self.substitute(cell)
            }
        }
    }
}

/// Template is a named block of config lines, variables already substituted
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Template {
    pub name: String,
    pub lines: Vec<String>,
}

/// Process-wide templates, keyed by name
#[derive(Debug, Clone, Default)]
pub struct TemplateRegistry {
    templates: BTreeMap<String, Template>,
}

impl TemplateRegistry {
    /// Collect template bodies from the template sheet.
    ///
    /// Rows are one line each. A "Config Template: [name]" line opens a new
    /// body; the lines after it belong to that body until the next marker.
    /// Lines before the first marker belong to nothing and are dropped.
    pub fn from_rows(rows: &[Row]) -> Self {
        let marker = Regex::new(TEMPLATE_MARKER).ok();
        let mut registry = Self::default();
        let mut current: Option<String> = None;

        for (idx, row) in rows.iter().enumerate() {
            let Some(line) = row.raw(TEMPLATE_COLUMN).or_else(|| row.sole_cell()) else {
                continue;
            };
            if line.is_empty() {
                continue;
            }

            if let Some(caps) = marker.as_ref().and_then(|re| re.captures(line)) {
                let name = caps[1].trim().to_string();
                registry.templates.insert(
                    name.clone(),
                    Template {
                        name: name.clone(),
                        lines: Vec::new(),
                    },
                );
                current = Some(name);
                continue;
            }

            match current.as_ref().and_then(|name| registry.templates.get_mut(name)) {
                Some(template) => template.lines.push(line.to_string()),
                None => tracing::debug!(
                    "config_templates row {}: line outside any template, skipped",
                    idx + 2
                ),
            }
        }

        registry
    }

    /// Substitute variables into every line of every template
    pub fn apply_variables(&mut self, variables: &VariableRegistry) {
        for template in self.templates.values_mut() {
            for line in template.lines.iter_mut() {
                *line = variables.substitute(line);
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&Template> {
        self.templates.get(name)
    }

    pub fn len(&self) -> usize {
        self.templates.len()
    }

    pub fn is_empty(&self) -> bool {
        self.templates.is_empty()
    }
}
