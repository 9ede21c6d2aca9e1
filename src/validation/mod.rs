// Mon Oct 19 2026 - Alex

pub mod report;
pub mod rules;
pub mod validator;
pub mod violation;

pub use report::{ValidationReport, ValidationSummary};
pub use rules::{HotplugRule, RuleBuilder, RuleContext, HOTPLUG_ARCHITECTURE};
pub use validator::{validate_memory_hotplug, MemoryHotplugValidator, MEMORY_HOTPLUG_BLOCK_ALIGNMENT_BYTES};
pub use violation::{CauseType, Violation};
