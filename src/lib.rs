// Mon Oct 19 2026 - Alex

pub mod config;
pub mod error;
pub mod field_path;
pub mod machine;
pub mod quantity;
pub mod ui;
pub mod validation;

pub use config::Config;
pub use error::{HotplugError, Result};
pub use field_path::FieldPath;
pub use machine::MachineSpec;
pub use quantity::{Quantity, QuantityError, QuantityFormat};
pub use validation::{
    validate_memory_hotplug, MemoryHotplugValidator, ValidationReport, Violation,
    MEMORY_HOTPLUG_BLOCK_ALIGNMENT_BYTES,
};
