pub mod calculations;
pub mod constants;
pub mod summary;

pub use calculations::{
    bill_subtotal, bill_totals, cost_of_assignment, cost_of_claim, settled_cost_of_assignment,
    split_count, total_owed_by_participant, total_owed_with_policy, SplitPolicy, Totals,
};
pub use constants::*;
pub use summary::{
    collection_progress, summarize_bill, BillSummary, ClaimLine, CollectionProgress,
    ParticipantBreakdown,
};
