// Mon Oct 19 2026 - Alex

use super::args::{Args, CheckArgs, Command};
use crate::config::Config;
use crate::machine::load_machine_spec;
use crate::ui::print_info;
use crate::validation::{MemoryHotplugValidator, ValidationReport};
use anyhow::Context;

pub const EXIT_COMPATIBLE: i32 = 0;
pub const EXIT_INCOMPATIBLE: i32 = 1;
pub const EXIT_ERROR: i32 = 2;

pub fn exit_code(report: &ValidationReport) -> i32 {
    if report.is_compatible() {
        EXIT_COMPATIBLE
    } else {
        EXIT_INCOMPATIBLE
    }
}

pub struct CommandHandler;

impl CommandHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn execute(&self, args: Args) -> anyhow::Result<i32> {
        self.setup_logging(&args);

        if args.no_color {
            colored::control::set_override(false);
        }

        match &args.command {
            Command::Check(check_args) => self.handle_check(check_args, &args),
            Command::Rules => self.handle_rules(),
        }
    }

    fn setup_logging(&self, args: &Args) {
        let level = match args.log_level.to_lowercase().as_str() {
            "trace" => log::LevelFilter::Trace,
            "debug" => log::LevelFilter::Debug,
            "info" => log::LevelFilter::Info,
            "warn" => log::LevelFilter::Warn,
            "error" => log::LevelFilter::Error,
            "off" => log::LevelFilter::Off,
            _ => log::LevelFilter::Warn,
        };

        env_logger::Builder::new()
            .filter_level(level)
            .format_timestamp(None)
            .init();
    }

    fn handle_check(&self, check: &CheckArgs, args: &Args) -> anyhow::Result<i32> {
        log::info!("Executing check command");

        if !args.quiet && !args.json_output {
            print_info(&format!("Checking {}", check.spec.display()));
        }

        let report = self.run_check(check)?;

        if args.json_output {
            println!("{}", report.to_json());
        } else if !args.quiet || !report.is_compatible() {
            print!("{}", report.format_report());
        }

        Ok(exit_code(&report))
    }

    pub fn run_check(&self, check: &CheckArgs) -> anyhow::Result<ValidationReport> {
        check.validate().map_err(|e| anyhow::anyhow!(e))?;

        let config = self.load_config(check)?;
        let validator = MemoryHotplugValidator::from_config(&config)?;

        let spec = load_machine_spec(&check.spec)
            .with_context(|| format!("Failed to load machine spec {}", check.spec.display()))?;
        Ok(validator.report(&spec))
    }

    fn load_config(&self, check: &CheckArgs) -> anyhow::Result<Config> {
        let mut config = match &check.config {
            Some(path) => Config::from_file(path)
                .with_context(|| format!("Failed to load config {}", path.display()))?,
            None => Config::default(),
        };

        if let Some(raw) = &check.block_alignment {
            config = config
                .with_block_alignment_quantity(raw)
                .with_context(|| format!("Invalid --block-alignment {}", raw))?;
        }

        log::debug!("Using block alignment of {} bytes", config.block_alignment_bytes);
        Ok(config)
    }

    fn handle_rules(&self) -> anyhow::Result<i32> {
        log::info!("Executing rules command");
        let validator = MemoryHotplugValidator::new();
        for (index, name) in validator.rule_names().iter().enumerate() {
            println!("{:>2}. {}", index + 1, name);
        }
        Ok(EXIT_COMPATIBLE)
    }
}

impl Default for CommandHandler {
    fn default() -> Self {
        Self::new()
    }
}
