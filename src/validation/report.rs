// Mon Oct 19 2026 - Alex

use crate::validation::violation::Violation;
use colored::Colorize;
use serde::ser::SerializeStruct;
use serde::Serialize;

#[derive(Debug, Clone)]
pub struct ValidationReport {
    pub violations: Vec<Violation>,
    pub summary: ValidationSummary,
}

impl ValidationReport {
    pub fn new() -> Self {
        Self {
            violations: Vec::new(),
            summary: ValidationSummary::new(),
        }
    }

    pub fn add_violation(&mut self, violation: Violation) {
        self.summary.add_violation(&violation);
        self.violations.push(violation);
    }

    pub fn add_violations(&mut self, violations: Vec<Violation>) {
        for violation in violations {
            self.add_violation(violation);
        }
    }

    pub fn is_compatible(&self) -> bool {
        self.violations.is_empty()
    }

    pub fn format_report(&self) -> String {
        let mut output = String::new();

        output.push_str(&format!("{}\n", "=== Memory Hotplug Validation ===".bold()));

        if self.violations.is_empty() {
            output.push_str(&format!("{} Compatible with memory hotplug\n", "[+]".green()));
            return output;
        }

        output.push_str(&format!(
            "{} {} incompatibilit{} found\n",
            "[!]".red(),
            self.summary.violation_count,
            if self.summary.violation_count == 1 { "y" } else { "ies" }
        ));

        for violation in &self.violations {
            output.push_str(&format!(
                "  - [{}] {}: {}\n",
                violation.cause_type.as_str().yellow(),
                violation.field.cyan(),
                violation.message
            ));
        }

        output
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string_pretty(self).unwrap_or_else(|_| "{}".to_string())
    }
}

impl Default for ValidationReport {
    fn default() -> Self {
        Self::new()
    }
}

impl Serialize for ValidationReport {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("ValidationReport", 3)?;
        state.serialize_field("compatible", &self.is_compatible())?;
        state.serialize_field("violations", &self.violations)?;
        state.serialize_field("summary", &self.summary)?;
        state.end()
    }
}

#[derive(Debug, Clone, Default, Serialize)]
pub struct ValidationSummary {
    pub violation_count: usize,
    pub fields_affected: Vec<String>,
}

impl ValidationSummary {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_violation(&mut self, violation: &Violation) {
        self.violation_count += 1;

        if !self.fields_affected.contains(&violation.field) {
            self.fields_affected.push(violation.field.clone());
        }
    }

    pub fn is_clean(&self) -> bool {
        self.violation_count == 0
    }
}
