pub mod ledger;
pub mod notify;
pub mod reconcile;
pub mod sweep;
pub mod transition;
