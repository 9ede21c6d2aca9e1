// Mon Oct 19 2026 - Alex

use crate::field_path::FieldPath;
use serde::Serialize;
use std::fmt;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
pub enum CauseType {
    FieldValueInvalid,
}

impl CauseType {
    pub fn as_str(&self) -> &'static str {
        match self {
            CauseType::FieldValueInvalid => "FieldValueInvalid",
        }
    }

    pub fn description(&self) -> &'static str {
        match self {
            CauseType::FieldValueInvalid => "invalid field value",
        }
    }
}

impl fmt::Display for CauseType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.description())
    }
}

/// One incompatibility, shaped like an API status cause.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Violation {
    #[serde(rename = "type")]
    pub cause_type: CauseType,
    pub message: String,
    pub field: String,
}

impl Violation {
    pub fn invalid_value(message: impl Into<String>, field: &FieldPath) -> Self {
        Self {
            cause_type: CauseType::FieldValueInvalid,
            message: message.into(),
            field: field.to_string(),
        }
    }
}

impl fmt::Display for Violation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}: {}", self.field, self.message)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_serializes_as_status_cause() {
        let path = FieldPath::template_spec().child(&["architecture"]);
        let violation = Violation::invalid_value("bad arch", &path);
        let json = serde_json::to_value(&violation).unwrap();
        assert_eq!(json["type"], "FieldValueInvalid");
        assert_eq!(json["message"], "bad arch");
        assert_eq!(json["field"], "spec.template.spec.architecture");
        assert_eq!(violation.to_string(), "spec.template.spec.architecture: bad arch");
        assert_eq!(violation.cause_type.to_string(), "invalid field value");
    }
}
