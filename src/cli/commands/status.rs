use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::utils::time;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Status { user_id } = cmd {
        let pool = DbPool::new(&cfg.database)?;

        let profile = queries::find_profile_by_user(&pool.conn, user_id)?
            .ok_or_else(|| AppError::ProfileNotFound(user_id.clone()))?;

        println!("{} ({})", profile.name, profile.user_id);
        if !profile.lab.is_empty() {
            println!("Lab:      {}", profile.lab);
        }
        println!("Presence: {}", profile.presence_status.label());

        match queries::find_open_entry(&pool.conn, profile.id)? {
            Some(entry) => {
                let open_for = (time::now_utc() - entry.check_in).num_minutes();
                println!(
                    "In lab since {} ({})",
                    time::format_local(entry.check_in),
                    time::format_duration_label(open_for)
                );
                if let Some(c) = &entry.comment {
                    println!("Comment:  {c}");
                }
            }
            None => println!("No open attendance entry."),
        }
    }

    Ok(())
}
