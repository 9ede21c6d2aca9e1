// Mon Oct 19 2026 - Alex

use crate::error::Result;
use crate::machine::domain::MachineSpec;
use serde::Deserialize;
use std::fs;
use std::path::Path;

#[derive(Debug, Deserialize)]
pub struct VirtualMachine {
    pub spec: VirtualMachineSpec,
}

#[derive(Debug, Deserialize)]
pub struct VirtualMachineSpec {
    pub template: InstanceTemplate,
}

#[derive(Debug, Deserialize)]
pub struct InstanceTemplate {
    pub spec: MachineSpec,
}

/// Either a full virtual machine object or a bare instance spec.
#[derive(Debug)]
pub enum MachineDocument {
    VirtualMachine(VirtualMachine),
    Instance(MachineSpec),
}

impl MachineDocument {
    /// A top-level `spec` key marks a virtual machine object.
    pub fn from_json(json: &str) -> Result<Self> {
        let value: serde_json::Value = serde_json::from_str(json)?;
        if value.get("spec").is_some() {
            Ok(MachineDocument::VirtualMachine(serde_json::from_value(value)?))
        } else {
            Ok(MachineDocument::Instance(serde_json::from_value(value)?))
        }
    }

    pub fn into_spec(self) -> MachineSpec {
        match self {
            MachineDocument::VirtualMachine(vm) => vm.spec.template.spec,
            MachineDocument::Instance(spec) => spec,
        }
    }
}

pub fn load_machine_spec(path: &Path) -> Result<MachineSpec> {
    let content = fs::read_to_string(path)?;
    let document = MachineDocument::from_json(&content)?;
    log::debug!("Loaded machine spec from {}", path.display());
    Ok(document.into_spec())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_virtual_machine_document() {
        let json = r#"{
            "kind": "VirtualMachine",
            "spec": { "template": { "spec": {
                "architecture": "arm64",
                "domain": { "memory": { "guest": "2Gi" } }
            } } }
        }"#;
        let spec = MachineDocument::from_json(json).unwrap().into_spec();
        assert_eq!(spec.architecture, "arm64");
        assert!(spec.domain.memory.unwrap().guest.is_some());
    }

    #[test]
    fn test_instance_document() {
        let json = r#"{ "architecture": "amd64", "domain": {} }"#;
        let spec = MachineDocument::from_json(json).unwrap().into_spec();
        assert_eq!(spec.architecture, "amd64");
        assert!(spec.domain.memory.is_none());
    }

    #[test]
    fn test_invalid_document() {
        assert!(MachineDocument::from_json("[1, 2]").is_err());
        assert!(MachineDocument::from_json(r#"{ "domain": { "memory": { "guest": "lots" } } }"#).is_err());
        let bad_vm = r#"{ "spec": { "template": { "spec": { "domain": { "memory": { "guest": "-1Gi" } } } } } }"#;
        assert!(MachineDocument::from_json(bad_vm).is_err());
    }
}
