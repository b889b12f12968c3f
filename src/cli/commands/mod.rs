pub mod attendance;
pub mod config;
pub mod db;
pub mod export;
pub mod history;
pub mod init;
pub mod log;
pub mod register;
pub mod roster;
pub mod status;
pub mod sweep;
