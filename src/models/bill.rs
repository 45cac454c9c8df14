use std::fmt;

use serde::{Deserialize, Serialize};

use super::{Assignment, LineItem, Participant};

/// Lifecycle of a bill.
///
/// `PendingOcr -> Open -> Review -> Finalized`, with `Review -> Open` allowed
/// so the host can unlock selections again.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BillStatus {
    PendingOcr,
    Open,
    Review,
    Finalized,
}

impl BillStatus {
    pub fn can_transition_to(self, next: BillStatus) -> bool {
        matches!(
            (self, next),
            (BillStatus::PendingOcr, BillStatus::Open)
                | (BillStatus::Open, BillStatus::Review)
                | (BillStatus::Review, BillStatus::Open)
                | (BillStatus::Review, BillStatus::Finalized)
        )
    }

    /// Items can be edited until participants are locked out.
    pub fn allows_item_edits(self) -> bool {
        matches!(self, BillStatus::PendingOcr | BillStatus::Open)
    }

    /// Participants can only claim or release items while the bill is open.
    pub fn allows_assignments(self) -> bool {
        self == BillStatus::Open
    }
}

impl fmt::Display for BillStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            BillStatus::PendingOcr => "pending",
            BillStatus::Open => "open",
            BillStatus::Review => "in review",
            BillStatus::Finalized => "finalized",
        };
        f.write_str(label)
    }
}

/// Where participants send their share once the bill is finalized.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PaymentInfo {
    pub bank: String,
    pub account: String,
    pub name: String,
}

impl PaymentInfo {
    pub fn is_valid(&self) -> bool {
        [&self.bank, &self.account, &self.name]
            .iter()
            .all(|s| !s.trim().is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Bill {
    pub id: String,

    pub host_id: String,

    pub host_name: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub restaurant_name: Option<String>,

    pub status: BillStatus,

    /// Tax and service surcharge as a percentage (10 means 10%).
    pub tax_service_rate: f64,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub payment_info: Option<PaymentInfo>,

    /// Seconds since the Unix epoch.
    pub created_at: u64,
}

impl Bill {
    /// Display title: restaurant name if known, otherwise the host's bill.
    pub fn title(&self) -> String {
        match &self.restaurant_name {
            Some(name) if !name.trim().is_empty() => name.clone(),
            _ => format!("{}'s bill", self.host_name),
        }
    }
}

/// A bill together with the records that belong to it.
#[derive(Debug, Clone)]
pub struct BillDetails {
    pub bill: Bill,
    pub items: Vec<LineItem>,
    pub assignments: Vec<Assignment>,
    pub participants: Vec<Participant>,
}

impl BillDetails {
    /// Items nobody has claimed yet.
    pub fn unassigned_items(&self) -> Vec<&LineItem> {
        self.items
            .iter()
            .filter(|item| !self.assignments.iter().any(|a| a.claims(&item.id)))
            .collect()
    }

    /// Participant's display name, falling back to the name on their assignments.
    pub fn participant_name(&self, user_id: &str) -> Option<&str> {
        self.participants
            .iter()
            .find(|p| p.id == user_id)
            .map(|p| p.name.as_str())
            .or_else(|| {
                self.assignments
                    .iter()
                    .find(|a| a.user_id == user_id)
                    .map(|a| a.user_name.as_str())
            })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_status_transitions() {
        assert!(BillStatus::PendingOcr.can_transition_to(BillStatus::Open));
        assert!(BillStatus::Open.can_transition_to(BillStatus::Review));
        assert!(BillStatus::Review.can_transition_to(BillStatus::Open));
        assert!(BillStatus::Review.can_transition_to(BillStatus::Finalized));

        assert!(!BillStatus::Open.can_transition_to(BillStatus::Finalized));
        assert!(!BillStatus::Finalized.can_transition_to(BillStatus::Open));
        assert!(!BillStatus::Open.can_transition_to(BillStatus::Open));
    }

    #[test]
    fn test_status_serializes_screaming_snake() {
        let json = serde_json::to_string(&BillStatus::PendingOcr).unwrap();
        assert_eq!(json, "\"PENDING_OCR\"");
    }

    #[test]
    fn test_payment_info_validation() {
        let info = PaymentInfo {
            bank: "BCA".to_string(),
            account: "1234567890".to_string(),
            name: "Citra Dewi".to_string(),
        };
        assert!(info.is_valid());

        let blank = PaymentInfo {
            account: " ".to_string(),
            ..info
        };
        assert!(!blank.is_valid());
    }

    #[test]
    fn test_unassigned_items() {
        let bill = Bill {
            id: "bill-1".to_string(),
            host_id: "host".to_string(),
            host_name: "Adzi".to_string(),
            restaurant_name: None,
            status: BillStatus::Open,
            tax_service_rate: 10.0,
            payment_info: None,
            created_at: 0,
        };
        let details = BillDetails {
            bill,
            items: vec![
                LineItem::new("item-1", "bill-1", "Nasi Goreng", 25000.0, 1),
                LineItem::new("item-2", "bill-1", "Ayam Bakar", 30000.0, 1),
            ],
            assignments: vec![Assignment::new("a-1", "item-1", "user-1", "Rina")],
            participants: vec![],
        };

        let unassigned = details.unassigned_items();
        assert_eq!(unassigned.len(), 1);
        assert_eq!(unassigned[0].id, "item-2");
        assert_eq!(details.participant_name("user-1"), Some("Rina"));
        assert_eq!(details.bill.title(), "Adzi's bill");
    }
}
