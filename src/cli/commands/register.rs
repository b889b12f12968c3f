use crate::cli::parser::Commands;
use crate::config::Config;
use crate::db::pool::DbPool;
use crate::db::{log, queries};
use crate::errors::AppResult;
use crate::ui::messages::success;

pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    if let Commands::Register {
        user_id,
        name,
        email,
        lab,
    } = cmd
    {
        let pool = DbPool::new(&cfg.database)?;

        let profile_id = queries::insert_profile(
            &pool.conn,
            user_id,
            name,
            email.as_deref().unwrap_or(""),
            lab.as_deref().unwrap_or(""),
        )?;

        log::ttlog(
            &pool.conn,
            "register",
            user_id,
            &format!("profile {profile_id} registered for {name}"),
        )?;

        success(format!("Registered {name} ({user_id}), profile id {profile_id}"));
    }

    Ok(())
}
