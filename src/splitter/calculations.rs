use serde::Serialize;

use crate::models::{Assignment, LineItem};

/// How an item's cost is divided among its assignees.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum SplitPolicy {
    /// Every assignee pays `item_total / split_count`, no matter how many
    /// units each of them actually had.
    #[default]
    Equal,

    /// Each assignee pays `item_total * weight / sum_of_weights`.
    /// Falls back to an equal split when the weights sum to zero.
    Weighted,
}

/// Subtotal, tax/service and total owed, either by one participant or for a whole bill.
///
/// `total` is always computed as `subtotal + tax`, never re-derived.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize)]
pub struct Totals {
    pub subtotal: f64,
    pub tax: f64,
    pub total: f64,
}

impl Totals {
    /// Apply a tax/service percentage to a subtotal.
    pub fn from_subtotal(subtotal: f64, tax_service_rate: f64) -> Self {
        let tax = subtotal * (tax_service_rate / 100.0);
        Self {
            subtotal,
            tax,
            total: subtotal + tax,
        }
    }
}

/// Number of assignment records that reference `item_id`.
///
/// Counts records, not distinct users: duplicate claims by one user each count.
pub fn split_count(item_id: &str, assignments: &[Assignment]) -> usize {
    assignments.iter().filter(|a| a.claims(item_id)).count()
}

/// Preview cost of one share of `item`.
///
/// An unassigned item is treated as split one way so summaries show its full
/// cost before anyone claims it. Do not use this to compute collected
/// amounts; see [`settled_cost_of_assignment`].
pub fn cost_of_assignment(item: &LineItem, assignments: &[Assignment]) -> f64 {
    let count = split_count(&item.id, assignments).max(1);
    item.total_cost() / count as f64
}

/// Cost of one share of `item` for settlement, or `None` if nobody claimed it.
pub fn settled_cost_of_assignment(item: &LineItem, assignments: &[Assignment]) -> Option<f64> {
    match split_count(&item.id, assignments) {
        0 => None,
        n => Some(item.total_cost() / n as f64),
    }
}

/// Cost carried by one specific `claim` on `item` under the given policy.
///
/// Under [`SplitPolicy::Equal`] this is identical to [`cost_of_assignment`].
pub fn cost_of_claim(
    item: &LineItem,
    claim: &Assignment,
    assignments: &[Assignment],
    policy: SplitPolicy,
) -> f64 {
    match policy {
        SplitPolicy::Equal => cost_of_assignment(item, assignments),
        SplitPolicy::Weighted => {
            let weight_sum: f64 = assignments
                .iter()
                .filter(|a| a.claims(&item.id))
                .map(Assignment::share_weight)
                .sum();

            if weight_sum > 0.0 {
                item.total_cost() * claim.share_weight() / weight_sum
            } else {
                cost_of_assignment(item, assignments)
            }
        }
    }
}

/// Subtotal, tax and total owed by `user_id` using the equal split.
///
/// Claims whose item cannot be found contribute nothing. A user with no
/// claims owes zero.
pub fn total_owed_by_participant(
    user_id: &str,
    items: &[LineItem],
    assignments: &[Assignment],
    tax_service_rate: f64,
) -> Totals {
    total_owed_with_policy(
        user_id,
        items,
        assignments,
        tax_service_rate,
        SplitPolicy::Equal,
    )
}

/// [`total_owed_by_participant`] with an explicit split policy.
pub fn total_owed_with_policy(
    user_id: &str,
    items: &[LineItem],
    assignments: &[Assignment],
    tax_service_rate: f64,
    policy: SplitPolicy,
) -> Totals {
    let subtotal = assignments
        .iter()
        .filter(|a| a.user_id == user_id)
        .fold(0.0, |sum, claim| {
            match items.iter().find(|i| i.id == claim.item_id) {
                // Split count is taken over every claim on the bill, not just this user's.
                Some(item) => sum + cost_of_claim(item, claim, assignments, policy),
                None => sum,
            }
        });

    Totals::from_subtotal(subtotal, tax_service_rate)
}

/// Raw cost of every item on the bill, before tax/service.
pub fn bill_subtotal(items: &[LineItem]) -> f64 {
    items.iter().map(LineItem::total_cost).sum()
}

/// Grand totals for the whole bill, regardless of who claimed what.
pub fn bill_totals(items: &[LineItem], tax_service_rate: f64) -> Totals {
    Totals::from_subtotal(bill_subtotal(items), tax_service_rate)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: &str, price: f64, qty: u32) -> LineItem {
        LineItem::new(id, "bill-1", id, price, qty)
    }

    fn claim(id: &str, item_id: &str, user_id: &str) -> Assignment {
        Assignment::new(id, item_id, user_id, user_id)
    }

    #[test]
    fn test_split_count_counts_records() {
        let assignments = vec![
            claim("a-1", "item-1", "rina"),
            claim("a-2", "item-1", "budi"),
            claim("a-3", "item-2", "rina"),
        ];
        assert_eq!(split_count("item-1", &assignments), 2);
        assert_eq!(split_count("item-2", &assignments), 1);
        assert_eq!(split_count("item-3", &assignments), 0);
    }

    #[test]
    fn test_unassigned_preview_is_full_cost() {
        let i = item("item-1", 8000.0, 2);
        assert_eq!(cost_of_assignment(&i, &[]), 16000.0);
        assert_eq!(settled_cost_of_assignment(&i, &[]), None);
    }

    #[test]
    fn test_settled_matches_preview_when_assigned() {
        let i = item("item-1", 5000.0, 3);
        let assignments = vec![claim("a-1", "item-1", "rina"), claim("a-2", "item-1", "budi")];
        assert_eq!(settled_cost_of_assignment(&i, &assignments), Some(7500.0));
        assert_eq!(cost_of_assignment(&i, &assignments), 7500.0);
    }

    #[test]
    fn test_zero_price_is_zero() {
        let i = item("item-1", 0.0, 4);
        let assignments = vec![claim("a-1", "item-1", "rina")];
        assert_eq!(cost_of_assignment(&i, &assignments), 0.0);
    }

    #[test]
    fn test_weighted_policy_divides_by_weight() {
        let i = item("item-1", 5000.0, 3);
        let mut rina = claim("a-1", "item-1", "rina");
        rina.weight = Some(2.0);
        let budi = claim("a-2", "item-1", "budi");
        let assignments = vec![rina.clone(), budi.clone()];

        let rina_cost = cost_of_claim(&i, &rina, &assignments, SplitPolicy::Weighted);
        let budi_cost = cost_of_claim(&i, &budi, &assignments, SplitPolicy::Weighted);
        assert!((rina_cost - 10000.0).abs() < 1e-9);
        assert!((budi_cost - 5000.0).abs() < 1e-9);

        // Equal policy ignores the weight entirely.
        assert_eq!(cost_of_claim(&i, &rina, &assignments, SplitPolicy::Equal), 7500.0);
    }

    #[test]
    fn test_weighted_policy_with_zero_weights_falls_back_to_equal() {
        let i = item("item-1", 9000.0, 1);
        let mut a = claim("a-1", "item-1", "rina");
        a.weight = Some(0.0);
        let mut b = claim("a-2", "item-1", "budi");
        b.weight = Some(0.0);
        let assignments = vec![a.clone(), b];
        assert_eq!(cost_of_claim(&i, &a, &assignments, SplitPolicy::Weighted), 4500.0);
    }

    #[test]
    fn test_totals_from_subtotal() {
        let t = Totals::from_subtotal(22500.0, 10.0);
        assert_eq!(t.subtotal, 22500.0);
        assert!((t.tax - 2250.0).abs() < 1e-9);
        assert_eq!(t.total, t.subtotal + t.tax);
    }

    #[test]
    fn test_missing_item_is_skipped() {
        let items = vec![item("item-1", 10000.0, 1)];
        let assignments = vec![claim("a-1", "item-1", "rina"), claim("a-2", "ghost", "rina")];
        let t = total_owed_by_participant("rina", &items, &assignments, 0.0);
        assert_eq!(t.subtotal, 10000.0);
    }

    #[test]
    fn test_bill_totals() {
        let items = vec![item("item-1", 25000.0, 1), item("item-2", 5000.0, 3)];
        let t = bill_totals(&items, 10.0);
        assert_eq!(t.subtotal, 40000.0);
        assert!((t.tax - 4000.0).abs() < 1e-9);
        assert!((t.total - 44000.0).abs() < 1e-9);
    }
}
