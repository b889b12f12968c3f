use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::ledger;
use crate::db::pool::DbPool;
use crate::db::queries;
use crate::errors::{AppError, AppResult};
use crate::export::{EntryExport, write_history};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Export {
        user_id,
        format,
        out,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        let profile = queries::find_profile_by_user(&pool.conn, user_id)?
            .ok_or_else(|| AppError::ProfileNotFound(user_id.clone()))?;

        let entries = ledger::list_by_profile(&pool.conn, profile.id, None)?;
        let rows: Vec<EntryExport> = entries
            .iter()
            .map(|e| EntryExport::from_entry(e, &profile.user_id))
            .collect();

        write_history(format, out, &rows)?;
    }

    Ok(())
}
