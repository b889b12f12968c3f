use crate::cli::parser::Commands;
use crate::config::Config;
use crate::core::transition::transition_user;
use crate::db::pool::DbPool;
use crate::db::log;
use crate::errors::AppResult;
use crate::models::outcome::TransitionOutcome;
use crate::models::presence_status::PresenceStatus;
use crate::ui::messages::{info, success, warning};

/// Handles the three transition commands (`in`, `out`, `campus`).
pub fn handle(cmd: &Commands, cfg: &Config) -> AppResult<()> {
    let (user_id, target, comment) = match cmd {
        Commands::In { user_id, comment } => (user_id, PresenceStatus::InLab, comment),
        Commands::Out { user_id, comment } => (user_id, PresenceStatus::OffCampus, comment),
        Commands::Campus { user_id, comment } => (user_id, PresenceStatus::OnCampus, comment),
        _ => return Ok(()),
    };

    let pool = DbPool::new(&cfg.database)?;

    let result = transition_user(&pool.conn, user_id, target, comment.as_deref())?;

    match result.outcome {
        TransitionOutcome::Applied => {
            success(format!("{user_id} is now {}", result.new_status.label()));
        }
        TransitionOutcome::AlreadyInState => {
            info(format!("{user_id} is already {}", result.new_status.label()));
        }
        TransitionOutcome::Reset => {
            warning(format!(
                "Presence state for {user_id} was inconsistent and has been reset to {}; please retry",
                result.new_status.label()
            ));
        }
    }

    // Best effort audit trail.
    let _ = log::ttlog(
        &pool.conn,
        "transition",
        user_id,
        &format!(
            "target {} → outcome {:?}, status {}",
            target.to_db_str(),
            result.outcome,
            result.new_status.to_db_str()
        ),
    );

    Ok(())
}
