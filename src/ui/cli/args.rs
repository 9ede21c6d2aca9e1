// Mon Oct 19 2026 - Alex

use clap::{Parser, Subcommand};
use std::path::PathBuf;

#[derive(Parser, Debug)]
#[command(name = "hotplug-validator")]
#[command(author = "Alex")]
#[command(version = "1.0.0")]
#[command(about = "Checks whether a virtual machine spec supports memory hotplug", long_about = None)]
pub struct Args {
    #[command(subcommand)]
    pub command: Command,

    #[arg(short, long, global = true, default_value = "warn")]
    pub log_level: String,

    #[arg(short, long, global = true)]
    pub quiet: bool,

    #[arg(long, global = true)]
    pub no_color: bool,

    #[arg(long, global = true)]
    pub json_output: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    Check(CheckArgs),
    Rules,
}

#[derive(Parser, Debug)]
pub struct CheckArgs {
    /// Virtual machine or instance spec, as JSON
    #[arg(short, long)]
    pub spec: PathBuf,

    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Overrides the configured block size, e.g. "2Mi"
    #[arg(long)]
    pub block_alignment: Option<String>,
}

impl CheckArgs {
    pub fn validate(&self) -> Result<(), String> {
        if !self.spec.exists() {
            return Err(format!("Spec file does not exist: {:?}", self.spec));
        }
        if let Some(config) = &self.config {
            if !config.exists() {
                return Err(format!("Config file does not exist: {:?}", config));
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_check_command() {
        let args = Args::parse_from([
            "hotplug-validator",
            "--json-output",
            "check",
            "--spec",
            "vm.json",
            "--block-alignment",
            "128Mi",
        ]);
        assert!(args.json_output);
        assert_eq!(args.log_level, "warn");
        match args.command {
            Command::Check(check) => {
                assert_eq!(check.spec, PathBuf::from("vm.json"));
                assert_eq!(check.block_alignment.as_deref(), Some("128Mi"));
                assert!(check.config.is_none());
            }
            Command::Rules => panic!("expected check command"),
        }
    }

    #[test]
    fn test_missing_spec_file_rejected() {
        let check = CheckArgs {
            spec: PathBuf::from("/nonexistent/vm.json"),
            config: None,
            block_alignment: None,
        };
        assert!(check.validate().is_err());
    }
}
