// Mon Oct 19 2026 - Alex

use hotplug_validator::ui::{self, cli};

fn main() {
    let code = match cli::run() {
        Ok(code) => code,
        Err(e) => {
            ui::print_error(&format!("{:#}", e));
            cli::EXIT_ERROR
        }
    };
    std::process::exit(code);
}
