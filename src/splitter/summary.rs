use serde::Serialize;

use crate::models::{BillDetails, LineItem};
use crate::splitter::calculations::{
    bill_totals, settled_cost_of_assignment, split_count, total_owed_by_participant, Totals,
};

/// One claimed item in a participant's breakdown.
#[derive(Debug, Clone, Serialize)]
pub struct ClaimLine {
    pub item_id: String,
    pub item_name: String,
    pub item_total: f64,
    pub split_count: usize,
    pub cost: f64,
}

/// What one participant owes and why.
#[derive(Debug, Clone, Serialize)]
pub struct ParticipantBreakdown {
    pub user_id: String,
    pub name: String,
    pub has_paid: bool,
    pub claims: Vec<ClaimLine>,
    pub totals: Totals,
}

/// Per-participant breakdown of a bill plus what is still unclaimed.
#[derive(Debug, Clone, Serialize)]
pub struct BillSummary {
    pub bill_totals: Totals,
    pub participants: Vec<ParticipantBreakdown>,
    pub unassigned: Vec<LineItem>,
    /// Number of line items on the bill.
    pub item_count: usize,
    /// Raw cost of unassigned items, before tax/service.
    pub unassigned_total: f64,
    /// Sum of every participant's total including tax/service.
    pub participants_total: f64,
}

impl BillSummary {
    pub fn assigned_count(&self) -> usize {
        self.item_count.saturating_sub(self.unassigned.len())
    }

    pub fn is_fully_assigned(&self) -> bool {
        self.unassigned.is_empty()
    }

    pub fn participant(&self, user_id: &str) -> Option<&ParticipantBreakdown> {
        self.participants.iter().find(|p| p.user_id == user_id)
    }
}

/// How much of the bill has been paid back to the host.
#[derive(Debug, Clone, Copy, Serialize)]
pub struct CollectionProgress {
    pub collected: f64,
    pub grand_total: f64,
    /// 0 to 100; 0 when the bill total is 0.
    pub percent: f64,
    pub paid_count: usize,
    pub pending_count: usize,
}

/// Ids of everyone with a stake in the bill, in first-seen order.
fn participant_ids(details: &BillDetails) -> Vec<String> {
    let mut ids: Vec<String> = details.participants.iter().map(|p| p.id.clone()).collect();
    for assignment in &details.assignments {
        if !ids.contains(&assignment.user_id) {
            ids.push(assignment.user_id.clone());
        }
    }
    ids
}

fn breakdown_for(details: &BillDetails, user_id: &str) -> ParticipantBreakdown {
    let claims: Vec<ClaimLine> = details
        .assignments
        .iter()
        .filter(|a| a.user_id == user_id)
        .filter_map(|a| details.items.iter().find(|i| i.id == a.item_id))
        .map(|item| ClaimLine {
            item_id: item.id.clone(),
            item_name: item.name.clone(),
            item_total: item.total_cost(),
            split_count: split_count(&item.id, &details.assignments),
            cost: settled_cost_of_assignment(item, &details.assignments).unwrap_or_default(),
        })
        .collect();

    let totals = total_owed_by_participant(
        user_id,
        &details.items,
        &details.assignments,
        details.bill.tax_service_rate,
    );

    let has_paid = details
        .participants
        .iter()
        .any(|p| p.id == user_id && p.has_paid);

    ParticipantBreakdown {
        user_id: user_id.to_string(),
        name: details.participant_name(user_id).unwrap_or(user_id).to_string(),
        has_paid,
        claims,
        totals,
    }
}

/// Build the per-participant breakdown for a bill.
pub fn summarize_bill(details: &BillDetails) -> BillSummary {
    let participants: Vec<ParticipantBreakdown> = participant_ids(details)
        .iter()
        .map(|id| breakdown_for(details, id))
        .collect();

    let unassigned: Vec<LineItem> = details.unassigned_items().into_iter().cloned().collect();
    let unassigned_total = unassigned.iter().map(LineItem::total_cost).sum();
    let participants_total = participants.iter().map(|p| p.totals.total).sum();

    BillSummary {
        bill_totals: bill_totals(&details.items, details.bill.tax_service_rate),
        participants,
        unassigned,
        item_count: details.items.len(),
        unassigned_total,
        participants_total,
    }
}

/// Amount collected from participants marked as paid, against the bill total.
pub fn collection_progress(details: &BillDetails) -> CollectionProgress {
    let summary = summarize_bill(details);

    let collected: f64 = summary
        .participants
        .iter()
        .filter(|p| p.has_paid)
        .map(|p| p.totals.total)
        .sum();
    let paid_count = summary.participants.iter().filter(|p| p.has_paid).count();
    let pending_count = summary.participants.len() - paid_count;

    let grand_total = summary.bill_totals.total;
    let percent = if grand_total > 0.0 {
        collected / grand_total * 100.0
    } else {
        0.0
    };

    CollectionProgress {
        collected,
        grand_total,
        percent,
        paid_count,
        pending_count,
    }
}
