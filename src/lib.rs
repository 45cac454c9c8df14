pub mod cli;
pub mod error;
pub mod interface;
pub mod logging;
pub mod models;
pub mod splitter;
pub mod state;

pub use error::{Result, SplitError};
pub use models::{Assignment, Bill, BillStatus, LineItem, Participant};
pub use splitter::{cost_of_assignment, total_owed_by_participant, Totals};
