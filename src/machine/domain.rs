// Mon Oct 19 2026 - Alex

use crate::quantity::Quantity;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

pub const RESOURCE_MEMORY: &str = "memory";

/// Instance-level spec: the domain plus the target architecture.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MachineSpec {
    #[serde(default)]
    pub domain: DomainSpec,
    #[serde(default)]
    pub architecture: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DomainSpec {
    #[serde(default)]
    pub resources: ResourceRequirements,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cpu: Option<Cpu>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub memory: Option<Memory>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub launch_security: Option<LaunchSecurity>,
}

pub type ResourceList = BTreeMap<String, Quantity>;

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ResourceRequirements {
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub requests: ResourceList,
    #[serde(default, skip_serializing_if = "BTreeMap::is_empty")]
    pub limits: ResourceList,
}

impl ResourceRequirements {
    pub fn memory_limit(&self) -> Option<&Quantity> {
        self.limits.get(RESOURCE_MEMORY)
    }

    pub fn memory_request(&self) -> Option<&Quantity> {
        self.requests.get(RESOURCE_MEMORY)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Cpu {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub cores: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sockets: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub threads: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub model: Option<String>,
    #[serde(default)]
    pub dedicated_cpu_placement: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub realtime: Option<Realtime>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub numa: Option<Numa>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Realtime {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub mask: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Numa {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_mapping_passthrough: Option<GuestMappingPassthrough>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct GuestMappingPassthrough {}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Memory {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub max_guest: Option<Quantity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub hugepages: Option<Hugepages>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Hugepages {
    #[serde(default)]
    pub page_size: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct LaunchSecurity {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sev: Option<Sev>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sev {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub policy: Option<SevPolicy>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SevPolicy {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub encrypted_state: Option<bool>,
}

impl MachineSpec {
    pub fn new(architecture: &str) -> Self {
        Self {
            architecture: architecture.to_string(),
            ..Self::default()
        }
    }

    pub fn with_guest_memory(mut self, guest: Quantity) -> Self {
        self.memory_mut().guest = Some(guest);
        self
    }

    pub fn with_max_guest(mut self, max_guest: Quantity) -> Self {
        self.memory_mut().max_guest = Some(max_guest);
        self
    }

    pub fn with_hugepages(mut self, page_size: &str) -> Self {
        self.memory_mut().hugepages = Some(Hugepages {
            page_size: page_size.to_string(),
        });
        self
    }

    pub fn with_memory_limit(mut self, limit: Quantity) -> Self {
        self.domain
            .resources
            .limits
            .insert(RESOURCE_MEMORY.to_string(), limit);
        self
    }

    pub fn with_realtime(mut self) -> Self {
        self.cpu_mut().realtime = Some(Realtime::default());
        self
    }

    pub fn with_guest_mapping_passthrough(mut self) -> Self {
        self.cpu_mut().numa = Some(Numa {
            guest_mapping_passthrough: Some(GuestMappingPassthrough {}),
        });
        self
    }

    pub fn with_dedicated_cpus(mut self) -> Self {
        self.cpu_mut().dedicated_cpu_placement = true;
        self
    }

    pub fn with_launch_security(mut self) -> Self {
        self.domain.launch_security = Some(LaunchSecurity {
            sev: Some(Sev::default()),
        });
        self
    }

    fn memory_mut(&mut self) -> &mut Memory {
        self.domain.memory.get_or_insert_with(Memory::default)
    }

    fn cpu_mut(&mut self) -> &mut Cpu {
        self.domain.cpu.get_or_insert_with(Cpu::default)
    }
}
