use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::presence_status::PresenceStatus;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Roster { lab, status } = cmd {
        let status_filter = match status {
            Some(code) => Some(
                PresenceStatus::from_code(code)
                    .ok_or_else(|| AppError::InvalidStatus(code.clone()))?,
            ),
            None => None,
        };

        let pool = DbPool::new(&cfg.database)?;
        let profiles = queries::list_profiles(&pool.conn, lab.as_deref(), status_filter)?;

        if profiles.is_empty() {
            println!("No matching profiles.");
            return Ok(());
        }

        println!("ROSTER:");
        for p in &profiles {
            let mark = if p.is_checked_in { "●" } else { " " };
            println!(
                "  {mark} {:<20} {:<12} {:<12} {}",
                p.name,
                p.user_id,
                p.presence_status.label(),
                p.lab
            );
        }
    }

    Ok(())
}
