use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::migrate::run_pending_migrations;
use crate::db::pool::DbPool;
use crate::db::stats;
use crate::errors::AppResult;
use crate::ui::messages::{success, warning};

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Db {
        migrate,
        check,
        info,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        if *migrate {
            run_pending_migrations(&pool.conn)?;
            success("Database migrations completed.");
        }

        if *check {
            let integrity = stats::integrity_check(&pool.conn)?;
            println!("Integrity check: {integrity}");

            let inconsistent = stats::inconsistent_profiles(&pool.conn)?;
            if inconsistent.is_empty() {
                success("Presence and ledger are consistent.");
            } else {
                warning(format!(
                    "Inconsistent profile(s): {inconsistent:?} (their next transition will self-heal)"
                ));
            }
        }

        if *info {
            let i = stats::db_info(&pool.conn)?;
            println!("Database: {}", cfg.database);
            println!("  profiles:        {}", i.profiles);
            println!("  entries:         {}", i.entries);
            println!("  open entries:    {}", i.open_entries);
            println!("  in-lab profiles: {}", i.in_lab_profiles);
        }
    }

    Ok(())
}
