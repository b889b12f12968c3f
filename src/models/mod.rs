pub mod attendance;
pub mod outcome;
pub mod presence_status;
pub mod profile;
