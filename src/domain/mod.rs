pub mod goals;
pub mod ledger;
pub mod progress;
pub mod recommend;
