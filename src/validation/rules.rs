// Mon Oct 19 2026 - Alex

use crate::field_path::FieldPath;
use crate::machine::MachineSpec;
use crate::quantity::{Quantity, QuantityFormat};
use crate::validation::violation::Violation;
use std::num::NonZeroU64;

/// Architecture name that supports memory hotplug (x86_64).
pub const HOTPLUG_ARCHITECTURE: &str = "amd64";

/// State shared by every rule during one validation pass.
pub struct RuleContext<'a> {
    pub root: &'a FieldPath,
    pub block_alignment: NonZeroU64,
}

impl RuleContext<'_> {
    fn field(&self, names: &[&str]) -> FieldPath {
        self.root.child(names)
    }

    fn is_aligned(&self, quantity: &Quantity) -> bool {
        quantity.is_multiple_of(self.block_alignment.get())
    }

    fn alignment_display(&self) -> Quantity {
        Quantity::from_bytes(self.block_alignment.get(), QuantityFormat::BinarySI)
    }
}

pub trait HotplugRule: Send + Sync {
    fn name(&self) -> &str;
    fn check(&self, spec: &MachineSpec, ctx: &RuleContext) -> Option<Violation>;
}

pub struct RuleBuilder {
    rules: Vec<Box<dyn HotplugRule>>,
}

impl RuleBuilder {
    pub fn new() -> Self {
        Self { rules: Vec::new() }
    }

    pub fn add_rule(mut self, rule: Box<dyn HotplugRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// Rules in evaluation order. Violations come out in this order.
    pub fn with_default_rules(self) -> Self {
        self.add_rule(Box::new(MemoryLimitRule))
            .add_rule(Box::new(RealtimeRule))
            .add_rule(Box::new(GuestMappingPassthroughRule))
            .add_rule(Box::new(LaunchSecurityRule))
            .add_rule(Box::new(DedicatedCpuRule))
            .add_rule(Box::new(HugepagesRule))
            .add_rule(Box::new(GuestMemoryRule))
            .add_rule(Box::new(MaxGuestAlignmentRule))
            .add_rule(Box::new(ArchitectureRule))
    }

    pub fn build(self) -> Vec<Box<dyn HotplugRule>> {
        self.rules
    }
}

impl Default for RuleBuilder {
    fn default() -> Self {
        Self::new()
    }
}

struct MemoryLimitRule;

impl HotplugRule for MemoryLimitRule {
    fn name(&self) -> &str {
        "MemoryLimit"
    }

    fn check(&self, spec: &MachineSpec, ctx: &RuleContext) -> Option<Violation> {
        spec.domain.resources.memory_limit()?;
        Some(Violation::invalid_value(
            "Configuration of Memory limits is not allowed when Memory live update is enabled",
            &ctx.field(&["domain", "resources"]),
        ))
    }
}

struct RealtimeRule;

impl HotplugRule for RealtimeRule {
    fn name(&self) -> &str {
        "Realtime"
    }

    fn check(&self, spec: &MachineSpec, ctx: &RuleContext) -> Option<Violation> {
        spec.domain.cpu.as_ref()?.realtime.as_ref()?;
        Some(Violation::invalid_value(
            "Memory hotplug is not compatible with realtime VMs",
            &ctx.field(&["domain", "cpu", "realtime"]),
        ))
    }
}

struct GuestMappingPassthroughRule;

impl HotplugRule for GuestMappingPassthroughRule {
    fn name(&self) -> &str {
        "GuestMappingPassthrough"
    }

    fn check(&self, spec: &MachineSpec, ctx: &RuleContext) -> Option<Violation> {
        spec.domain
            .cpu
            .as_ref()?
            .numa
            .as_ref()?
            .guest_mapping_passthrough
            .as_ref()?;
        Some(Violation::invalid_value(
            "Memory hotplug is not compatible with guest mapping passthrough",
            &ctx.field(&["domain", "cpu", "numa", "guestMappingPassthrough"]),
        ))
    }
}

struct LaunchSecurityRule;

impl HotplugRule for LaunchSecurityRule {
    fn name(&self) -> &str {
        "LaunchSecurity"
    }

    fn check(&self, spec: &MachineSpec, ctx: &RuleContext) -> Option<Violation> {
        spec.domain.launch_security.as_ref()?;
        Some(Violation::invalid_value(
            "Memory hotplug is not compatible with encrypted VMs",
            &ctx.field(&["domain", "launchSecurity"]),
        ))
    }
}

struct DedicatedCpuRule;

impl HotplugRule for DedicatedCpuRule {
    fn name(&self) -> &str {
        "DedicatedCpu"
    }

    fn check(&self, spec: &MachineSpec, ctx: &RuleContext) -> Option<Violation> {
        if !spec.domain.cpu.as_ref()?.dedicated_cpu_placement {
            return None;
        }
        Some(Violation::invalid_value(
            "Memory hotplug is not compatible with dedicated CPUs",
            &ctx.field(&["domain", "cpu", "dedicatedCpuPlacement"]),
        ))
    }
}

struct HugepagesRule;

impl HotplugRule for HugepagesRule {
    fn name(&self) -> &str {
        "Hugepages"
    }

    fn check(&self, spec: &MachineSpec, ctx: &RuleContext) -> Option<Violation> {
        spec.domain.memory.as_ref()?.hugepages.as_ref()?;
        Some(Violation::invalid_value(
            "Memory hotplug is not compatible with hugepages",
            &ctx.field(&["domain", "memory", "hugepages"]),
        ))
    }
}

/// Guest memory must be set, within maxGuest, and block aligned.
/// Only the first failing condition is reported.
struct GuestMemoryRule;

impl HotplugRule for GuestMemoryRule {
    fn name(&self) -> &str {
        "GuestMemory"
    }

    fn check(&self, spec: &MachineSpec, ctx: &RuleContext) -> Option<Violation> {
        let field = ctx.field(&["domain", "memory", "guest"]);
        let memory = spec.domain.memory.as_ref();

        let Some(guest) = memory.and_then(|m| m.guest.as_ref()) else {
            return Some(Violation::invalid_value(
                "Guest memory must be configured when memory hotplug is enabled",
                &field,
            ));
        };

        if let Some(max_guest) = memory.and_then(|m| m.max_guest.as_ref()) {
            if guest > max_guest {
                return Some(Violation::invalid_value(
                    "Guest memory is greater than the configured maxGuest memory",
                    &field,
                ));
            }
        }

        if !ctx.is_aligned(guest) {
            return Some(Violation::invalid_value(
                format!("Guest memory must be {} aligned", ctx.alignment_display()),
                &field,
            ));
        }

        None
    }
}

/// Independent of `GuestMemoryRule`: a missing memory section is simply a pass here.
struct MaxGuestAlignmentRule;

impl HotplugRule for MaxGuestAlignmentRule {
    fn name(&self) -> &str {
        "MaxGuestAlignment"
    }

    fn check(&self, spec: &MachineSpec, ctx: &RuleContext) -> Option<Violation> {
        let max_guest = spec.domain.memory.as_ref()?.max_guest.as_ref()?;
        if ctx.is_aligned(max_guest) {
            return None;
        }
        Some(Violation::invalid_value(
            format!("MaxGuest must be {} aligned", ctx.alignment_display()),
            &ctx.field(&["domain", "memory", "maxGuest"]),
        ))
    }
}

struct ArchitectureRule;

impl HotplugRule for ArchitectureRule {
    fn name(&self) -> &str {
        "Architecture"
    }

    fn check(&self, spec: &MachineSpec, ctx: &RuleContext) -> Option<Violation> {
        if spec.architecture == HOTPLUG_ARCHITECTURE {
            return None;
        }
        Some(Violation::invalid_value(
            "Memory hotplug is only available for x86_64 VMs",
            &ctx.field(&["architecture"]),
        ))
    }
}
