use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::models::attendance::AttendanceEntry;
use crate::utils::time;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::History { user_id, limit } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        let profile = queries::find_profile_by_user(&pool.conn, user_id)?
            .ok_or_else(|| AppError::ProfileNotFound(user_id.clone()))?;

        let entries = ledger::list_by_profile(&pool.conn, profile.id, *limit)?;

        if entries.is_empty() {
            println!("No attendance history for {user_id}");
            return Ok(());
        }

        println!("HISTORY for {} ({user_id}):", profile.name);
        for entry in &entries {
            print_entry(entry);
        }
    }

    Ok(())
}

fn print_entry(entry: &AttendanceEntry) {
    let check_out = match entry.check_out {
        Some(out) => time::format_local(out),
        None => "(open)".to_string(),
    };
    let duration = entry
        .duration_minutes()
        .map(time::format_duration_label)
        .unwrap_or_default();
    let comment = entry.comment.as_deref().unwrap_or("");

    println!(
        "  {:>5}  {}  →  {:<16}  {:>7}  {}",
        entry.id,
        time::format_local(entry.check_in),
        check_out,
        duration,
        comment
    );
}
