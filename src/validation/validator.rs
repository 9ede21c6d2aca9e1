// Mon Oct 19 2026 - Alex

use crate::config::Config;
use crate::error::Result;
use crate::field_path::FieldPath;
use crate::machine::MachineSpec;
use crate::validation::report::ValidationReport;
use crate::validation::rules::{HotplugRule, RuleBuilder, RuleContext};
use crate::validation::violation::Violation;
use std::num::NonZeroU64;

/// Memory hotplug block size in bytes (2 MiB). Must match the size used when
/// the hotplug device is actually configured.
pub const MEMORY_HOTPLUG_BLOCK_ALIGNMENT_BYTES: u64 = 0x200000;

/// Decides whether a machine spec can have its memory resized while running.
///
/// Every rule runs on every call; the result lists all incompatibilities
/// found, in rule order. An empty list means the spec is compatible.
pub struct MemoryHotplugValidator {
    rules: Vec<Box<dyn HotplugRule>>,
    root: FieldPath,
    block_alignment: NonZeroU64,
}

impl MemoryHotplugValidator {
    pub fn new() -> Self {
        Self {
            rules: RuleBuilder::new().with_default_rules().build(),
            root: FieldPath::template_spec(),
            block_alignment: NonZeroU64::new(MEMORY_HOTPLUG_BLOCK_ALIGNMENT_BYTES)
                .unwrap_or(NonZeroU64::MIN),
        }
    }

    pub fn from_config(config: &Config) -> Result<Self> {
        Ok(Self::new()
            .with_block_alignment(config.block_alignment()?)
            .with_root(config.root_path()?))
    }

    pub fn with_block_alignment(mut self, bytes: NonZeroU64) -> Self {
        self.block_alignment = bytes;
        self
    }

    pub fn with_root(mut self, root: FieldPath) -> Self {
        self.root = root;
        self
    }

    pub fn with_rules(mut self, rules: Vec<Box<dyn HotplugRule>>) -> Self {
        self.rules = rules;
        self
    }

    pub fn block_alignment(&self) -> NonZeroU64 {
        self.block_alignment
    }

    pub fn rule_names(&self) -> Vec<&str> {
        self.rules.iter().map(|r| r.name()).collect()
    }

    pub fn validate(&self, spec: &MachineSpec) -> Vec<Violation> {
        let ctx = RuleContext {
            root: &self.root,
            block_alignment: self.block_alignment,
        };

        let mut violations = Vec::new();
        for rule in &self.rules {
            log::trace!("Evaluating hotplug rule {}", rule.name());
            if let Some(violation) = rule.check(spec, &ctx) {
                log::debug!("Rule {} failed: {}", rule.name(), violation);
                violations.push(violation);
            }
        }
        violations
    }

    pub fn report(&self, spec: &MachineSpec) -> ValidationReport {
        let mut report = ValidationReport::new();
        report.add_violations(self.validate(spec));
        report
    }
}

impl Default for MemoryHotplugValidator {
    fn default() -> Self {
        Self::new()
    }
}

/// Checks `spec` with the platform block size and the `spec.template.spec` root.
pub fn validate_memory_hotplug(spec: &MachineSpec) -> Vec<Violation> {
    MemoryHotplugValidator::new().validate(spec)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::quantity::{Quantity, QuantityFormat};
    use crate::validation::HOTPLUG_ARCHITECTURE;

    const BLOCK: u64 = MEMORY_HOTPLUG_BLOCK_ALIGNMENT_BYTES;

    fn bytes(n: u64) -> Quantity {
        Quantity::from_bytes(n, QuantityFormat::BinarySI)
    }

    fn clean_spec() -> MachineSpec {
        MachineSpec::new(HOTPLUG_ARCHITECTURE).with_guest_memory(bytes(BLOCK))
    }

    fn fields(violations: &[Violation]) -> Vec<&str> {
        violations.iter().map(|v| v.field.as_str()).collect()
    }

    #[test]
    fn test_clean_spec_has_no_violations() {
        assert!(validate_memory_hotplug(&clean_spec()).is_empty());
    }

    #[test]
    fn test_deterministic() {
        let spec = MachineSpec::new("s390x").with_realtime().with_memory_limit(bytes(BLOCK));
        let validator = MemoryHotplugValidator::new();
        assert_eq!(validator.validate(&spec), validator.validate(&spec));
    }

    #[test]
    fn test_max_guest_exceeded() {
        let spec = MachineSpec::new(HOTPLUG_ARCHITECTURE)
            .with_guest_memory(bytes(2 * BLOCK))
            .with_max_guest(bytes(BLOCK));
        let violations = validate_memory_hotplug(&spec);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Guest memory is greater than the configured maxGuest memory");
        assert_eq!(violations[0].field, "spec.template.spec.domain.memory.guest");
    }

    #[test]
    fn test_architecture_only() {
        let mut spec = clean_spec();
        spec.architecture = "arm64".to_string();
        let violations = validate_memory_hotplug(&spec);
        assert_eq!(fields(&violations), vec!["spec.template.spec.architecture"]);
        assert_eq!(violations[0].message, "Memory hotplug is only available for x86_64 VMs");
    }

    #[test]
    fn test_missing_guest_memory_with_memory_section() {
        let spec = MachineSpec::new(HOTPLUG_ARCHITECTURE).with_hugepages("2Mi");
        let violations = validate_memory_hotplug(&spec);
        assert_eq!(
            fields(&violations),
            vec![
                "spec.template.spec.domain.memory.hugepages",
                "spec.template.spec.domain.memory.guest",
            ]
        );

        let mut spec = MachineSpec::new(HOTPLUG_ARCHITECTURE);
        spec.domain.memory = Some(Default::default());
        let violations = validate_memory_hotplug(&spec);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Guest memory must be configured when memory hotplug is enabled");
    }

    #[test]
    fn test_missing_memory_section_does_not_fault() {
        let violations = validate_memory_hotplug(&MachineSpec::new(HOTPLUG_ARCHITECTURE));
        assert_eq!(fields(&violations), vec!["spec.template.spec.domain.memory.guest"]);
    }

    #[test]
    fn test_every_rule_reports_in_order() {
        let spec = MachineSpec::new("arm64")
            .with_memory_limit(bytes(BLOCK))
            .with_realtime()
            .with_guest_mapping_passthrough()
            .with_launch_security()
            .with_dedicated_cpus()
            .with_hugepages("1Gi")
            .with_guest_memory(bytes(BLOCK + 1))
            .with_max_guest(bytes(4 * BLOCK + 1));
        let violations = validate_memory_hotplug(&spec);
        assert_eq!(
            fields(&violations),
            vec![
                "spec.template.spec.domain.resources",
                "spec.template.spec.domain.cpu.realtime",
                "spec.template.spec.domain.cpu.numa.guestMappingPassthrough",
                "spec.template.spec.domain.launchSecurity",
                "spec.template.spec.domain.cpu.dedicatedCpuPlacement",
                "spec.template.spec.domain.memory.hugepages",
                "spec.template.spec.domain.memory.guest",
                "spec.template.spec.domain.memory.maxGuest",
                "spec.template.spec.architecture",
            ]
        );
        assert_eq!(violations[6].message, "Guest memory must be 2Mi aligned");
        assert!(violations
            .iter()
            .all(|v| v.cause_type == crate::validation::CauseType::FieldValueInvalid));
    }

    #[test]
    fn test_guest_chain_is_exclusive() {
        let guest_field = "spec.template.spec.domain.memory.guest";
        let cases = [
            (None, None),
            (Some(BLOCK + 1), None),
            (Some(3 * BLOCK + 1), Some(BLOCK + 1)),
            (Some(BLOCK + 1), Some(4 * BLOCK)),
            (Some(2 * BLOCK), Some(BLOCK)),
        ];
        for (guest, max_guest) in cases {
            let mut spec = MachineSpec::new(HOTPLUG_ARCHITECTURE);
            if let Some(g) = guest {
                spec = spec.with_guest_memory(bytes(g));
            }
            if let Some(m) = max_guest {
                spec = spec.with_max_guest(bytes(m));
            }
            let count = validate_memory_hotplug(&spec)
                .iter()
                .filter(|v| v.field == guest_field)
                .count();
            assert_eq!(count, 1, "guest={:?} max_guest={:?}", guest, max_guest);
        }
    }

    #[test]
    fn test_alignment_iff_remainder() {
        let validator = MemoryHotplugValidator::new();
        for guest in [BLOCK, 2 * BLOCK, BLOCK - 1, BLOCK + 4096, 7 * BLOCK, 7 * BLOCK + 1] {
            let spec = MachineSpec::new(HOTPLUG_ARCHITECTURE).with_guest_memory(bytes(guest));
            let misaligned = !validator.validate(&spec).is_empty();
            assert_eq!(misaligned, guest % BLOCK != 0, "guest={}", guest);
        }
    }

    #[test]
    fn test_custom_alignment_and_root() {
        let validator = MemoryHotplugValidator::new()
            .with_block_alignment(NonZeroU64::new(128 << 20).unwrap())
            .with_root(FieldPath::new("spec", &[]));
        let spec = MachineSpec::new(HOTPLUG_ARCHITECTURE).with_guest_memory(bytes(64 << 20));
        let violations = validator.validate(&spec);
        assert_eq!(violations.len(), 1);
        assert_eq!(violations[0].message, "Guest memory must be 128Mi aligned");
        assert_eq!(violations[0].field, "spec.domain.memory.guest");
    }

    #[test]
    fn test_from_config() {
        let config = Config::new().with_block_alignment(1 << 30);
        let validator = MemoryHotplugValidator::from_config(&config).unwrap();
        assert_eq!(validator.block_alignment().get(), 1 << 30);
        assert!(MemoryHotplugValidator::from_config(&Config::new().with_block_alignment(0)).is_err());
    }

    #[test]
    fn test_with_rules_subset() {
        let validator = MemoryHotplugValidator::new().with_rules(Vec::new());
        assert!(validator.rule_names().is_empty());
        assert!(validator.validate(&MachineSpec::default()).is_empty());
    }

    #[test]
    fn test_parsed_quantities() {
        let spec = MachineSpec::new(HOTPLUG_ARCHITECTURE)
            .with_guest_memory(Quantity::parse("1Gi").unwrap())
            .with_max_guest(Quantity::parse("4G").unwrap());
        let violations = validate_memory_hotplug(&spec);
        assert_eq!(fields(&violations), vec!["spec.template.spec.domain.memory.maxGuest"]);
    }
}
