pub mod booking;
pub mod fragmentation;
pub mod ledger;
pub mod statistics;
pub mod suggestions;
