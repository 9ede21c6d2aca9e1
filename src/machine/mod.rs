// Mon Oct 19 2026 - Alex

pub mod document;
pub mod domain;

pub use document::{load_machine_spec, MachineDocument};
pub use domain::{
    Cpu, DomainSpec, GuestMappingPassthrough, Hugepages, LaunchSecurity, MachineSpec, Memory, Numa,
    Realtime, ResourceList, ResourceRequirements, Sev, SevPolicy, RESOURCE_MEMORY,
};
