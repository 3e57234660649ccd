pub mod reports;
pub mod summary;

pub use reports::View;
pub use summary::{ShipSummary, SquadronSummary};
