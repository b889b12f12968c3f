use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::notify::ConsoleNotifier;
use crate::core::sweep::run_sweep;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Sweep { batch_size } = cmd {
        let batch = batch_size.unwrap_or(cfg.sweep_batch_size);

        let notifier = ConsoleNotifier::new(cfg.reminder_note.clone());
        let report = run_sweep(&cfg.database, &notifier, batch)?;

        success(format!(
            "Sweep completed: {} profile(s) checked out",
            report.processed
        ));
        if !report.failures.is_empty() {
            warning(format!(
                "Sweep failed for profile(s): {:?}",
                report.failures
            ));
        }
    }

    Ok(())
}
