use rand::distributions::Alphanumeric;
use rand::Rng;

use crate::error::{Result, SplitError};
use crate::models::{Bill, BillDetails, BillStatus, Participant, PaymentInfo};
use crate::splitter::constants::ID_SUFFIX_LEN;

/// Partial update to a line item. `None` leaves the field untouched.
#[derive(Debug, Clone, Default)]
pub struct ItemUpdate {
    pub name: Option<String>,
    pub unit_price: Option<f64>,
    pub quantity: Option<u32>,
}

impl ItemUpdate {
    pub fn is_empty(&self) -> bool {
        self.name.is_none() && self.unit_price.is_none() && self.quantity.is_none()
    }
}

/// Data access for bills, items, assignments and participants.
///
/// The splitting engine never touches a store; callers fetch a
/// [`BillDetails`] snapshot and hand its slices to the engine.
pub trait BillStore {
    /// Create a bill in `PendingOcr` with the default tax/service rate.
    fn create_bill(&mut self, host_name: &str, restaurant_name: Option<&str>) -> Result<String>;

    fn bill(&self, bill_id: &str) -> Result<&Bill>;

    fn bills(&self) -> Vec<&Bill>;

    fn update_rate(&mut self, bill_id: &str, tax_service_rate: f64) -> Result<()>;

    /// Move a bill along its lifecycle. Finalizing requires payment info.
    fn set_status(&mut self, bill_id: &str, status: BillStatus) -> Result<()>;

    fn set_payment_info(&mut self, bill_id: &str, info: PaymentInfo) -> Result<()>;

    /// Snapshot of a bill with its items, the assignments on those items and
    /// the participants holding at least one of them.
    fn bill_details(&self, bill_id: &str) -> Result<BillDetails>;

    fn add_item(
        &mut self,
        bill_id: &str,
        name: &str,
        unit_price: f64,
        quantity: u32,
    ) -> Result<String>;

    fn update_item(&mut self, item_id: &str, update: ItemUpdate) -> Result<()>;

    /// Remove an item together with every assignment on it.
    fn remove_item(&mut self, item_id: &str) -> Result<()>;

    /// Claim an item for a participant. Claiming twice is a no-op.
    fn assign_item(&mut self, item_id: &str, user_id: &str, user_name: &str) -> Result<()>;

    fn unassign_item(&mut self, item_id: &str, user_id: &str) -> Result<()>;

    /// Register a participant if they are not known yet.
    fn join(&mut self, user_id: &str, user_name: &str) -> Result<()>;

    fn participant_by_name(&self, name: &str) -> Option<&Participant>;

    /// Record whether a participant has paid their share of one bill.
    fn set_paid(&mut self, bill_id: &str, user_id: &str, has_paid: bool) -> Result<()>;

    /// Record payment details and finalize in one step.
    fn finalize(&mut self, bill_id: &str, info: PaymentInfo) -> Result<()> {
        let status = self.bill(bill_id)?.status;
        if !status.can_transition_to(BillStatus::Finalized) {
            return Err(SplitError::InvalidTransition {
                from: status,
                to: BillStatus::Finalized,
            });
        }
        self.set_payment_info(bill_id, info)?;
        self.set_status(bill_id, BillStatus::Finalized)
    }
}

/// Generate an id such as `item-x3k9q2ma`.
pub fn generate_id(prefix: &str) -> String {
    let suffix: String = rand::thread_rng()
        .sample_iter(&Alphanumeric)
        .take(ID_SUFFIX_LEN)
        .map(char::from)
        .collect::<String>()
        .to_lowercase();
    format!("{}-{}", prefix, suffix)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_generate_id_shape() {
        let id = generate_id("bill");
        assert!(id.starts_with("bill-"));
        assert_eq!(id.len(), "bill-".len() + ID_SUFFIX_LEN);
        assert_ne!(generate_id("bill"), generate_id("bill"));
    }

    #[test]
    fn test_item_update_is_empty() {
        assert!(ItemUpdate::default().is_empty());
        let update = ItemUpdate {
            quantity: Some(2),
            ..Default::default()
        };
        assert!(!update.is_empty());
    }
}
