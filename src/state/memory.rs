use std::time::{SystemTime, UNIX_EPOCH};

use serde::{Deserialize, Serialize};
use tracing::{debug, info, warn};

use crate::error::{Result, SplitError};
use crate::models::{
    Assignment, Bill, BillDetails, BillStatus, LineItem, Participant, PaymentInfo,
};
use crate::splitter::constants::{is_valid_rate, DEFAULT_TAX_SERVICE_RATE};
use crate::state::store::{generate_id, BillStore, ItemUpdate};

/// In-memory [`BillStore`], serialized whole to the state file.
#[derive(Debug, Default, Clone, Serialize, Deserialize)]
pub struct MemoryBillStore {
    #[serde(default)]
    bills: Vec<Bill>,

    #[serde(default)]
    items: Vec<LineItem>,

    #[serde(default)]
    assignments: Vec<Assignment>,

    #[serde(default)]
    participants: Vec<Participant>,

    /// Who has paid which bill.
    #[serde(default)]
    payments: Vec<PaidMark>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
struct PaidMark {
    bill_id: String,
    user_id: String,
}

fn now_secs() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs())
        .unwrap_or(0)
}

fn require_name(label: &str, name: &str) -> Result<String> {
    let trimmed = name.trim();
    if trimmed.is_empty() {
        return Err(SplitError::InvalidInput(format!("{} must not be blank", label)));
    }
    Ok(trimmed.to_string())
}

fn require_price(price: f64) -> Result<f64> {
    if !price.is_finite() || price < 0.0 {
        return Err(SplitError::InvalidInput(format!(
            "price must be a non-negative amount, got {}",
            price
        )));
    }
    Ok(price)
}

fn require_quantity(quantity: u32) -> Result<u32> {
    if quantity == 0 {
        return Err(SplitError::InvalidInput(
            "quantity must be at least 1".to_string(),
        ));
    }
    Ok(quantity)
}

impl MemoryBillStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Drop records that point at missing bills or items.
    ///
    /// Returns how many records were removed.
    pub fn prune_dangling(&mut self) -> usize {
        let before = self.items.len() + self.assignments.len() + self.payments.len();

        let bills = &self.bills;
        self.items
            .retain(|item| bills.iter().any(|b| b.id == item.bill_id));

        self.payments
            .retain(|m| bills.iter().any(|b| b.id == m.bill_id));

        let items = &self.items;
        self.assignments
            .retain(|a| items.iter().any(|i| i.id == a.item_id));

        let removed =
            before - (self.items.len() + self.assignments.len() + self.payments.len());
        if removed > 0 {
            warn!(removed, "Dropped records referencing missing bills or items");
        }
        removed
    }

    pub fn item(&self, item_id: &str) -> Result<&LineItem> {
        self.items
            .iter()
            .find(|i| i.id == item_id)
            .ok_or_else(|| SplitError::ItemNotFound(item_id.to_string()))
    }

    pub fn participants(&self) -> &[Participant] {
        &self.participants
    }

    pub fn len(&self) -> usize {
        self.bills.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bills.is_empty()
    }

    /// Whether `user_id` has paid their share of `bill_id`.
    pub fn has_paid(&self, bill_id: &str, user_id: &str) -> bool {
        self.payments
            .iter()
            .any(|m| m.bill_id == bill_id && m.user_id == user_id)
    }

    fn bill_mut(&mut self, bill_id: &str) -> Result<&mut Bill> {
        self.bills
            .iter_mut()
            .find(|b| b.id == bill_id)
            .ok_or_else(|| SplitError::BillNotFound(bill_id.to_string()))
    }

    /// Status of the bill owning `item_id`.
    fn item_bill_status(&self, item_id: &str) -> Result<BillStatus> {
        let bill_id = self.item(item_id)?.bill_id.clone();
        Ok(self.bill(&bill_id)?.status)
    }

    fn ensure_items_editable(&self, status: BillStatus) -> Result<()> {
        if status.allows_item_edits() {
            Ok(())
        } else {
            Err(SplitError::BillLocked(status))
        }
    }

    fn ensure_assignable(&self, status: BillStatus) -> Result<()> {
        if status.allows_assignments() {
            Ok(())
        } else {
            Err(SplitError::BillLocked(status))
        }
    }
}

impl BillStore for MemoryBillStore {
    fn create_bill(&mut self, host_name: &str, restaurant_name: Option<&str>) -> Result<String> {
        let host_name = require_name("host name", host_name)?;
        let restaurant_name = restaurant_name
            .map(str::trim)
            .filter(|s| !s.is_empty())
            .map(str::to_string);

        let bill = Bill {
            id: generate_id("bill"),
            host_id: generate_id("user"),
            host_name,
            restaurant_name,
            status: BillStatus::PendingOcr,
            tax_service_rate: DEFAULT_TAX_SERVICE_RATE,
            payment_info: None,
            created_at: now_secs(),
        };

        info!(bill_id = %bill.id, host = %bill.host_name, "Created bill");
        let id = bill.id.clone();
        self.participants
            .push(Participant::new(bill.host_id.clone(), bill.host_name.clone()));
        self.bills.push(bill);
        Ok(id)
    }

    fn bill(&self, bill_id: &str) -> Result<&Bill> {
        self.bills
            .iter()
            .find(|b| b.id == bill_id)
            .ok_or_else(|| SplitError::BillNotFound(bill_id.to_string()))
    }

    fn bills(&self) -> Vec<&Bill> {
        self.bills.iter().collect()
    }

    fn update_rate(&mut self, bill_id: &str, tax_service_rate: f64) -> Result<()> {
        if !is_valid_rate(tax_service_rate) {
            return Err(SplitError::InvalidInput(format!(
                "tax/service rate must be between 0 and 100, got {}",
                tax_service_rate
            )));
        }

        let bill = self.bill_mut(bill_id)?;
        if bill.status == BillStatus::Finalized {
            return Err(SplitError::BillLocked(bill.status));
        }
        bill.tax_service_rate = tax_service_rate;
        debug!(bill_id, tax_service_rate, "Updated tax/service rate");
        Ok(())
    }

    fn set_status(&mut self, bill_id: &str, status: BillStatus) -> Result<()> {
        let bill = self.bill_mut(bill_id)?;
        if !bill.status.can_transition_to(status) {
            return Err(SplitError::InvalidTransition {
                from: bill.status,
                to: status,
            });
        }
        if status == BillStatus::Finalized && bill.payment_info.is_none() {
            return Err(SplitError::InvalidInput(
                "payment info is required before finalizing".to_string(),
            ));
        }

        info!(bill_id, from = %bill.status, to = %status, "Bill status changed");
        bill.status = status;
        Ok(())
    }

    fn set_payment_info(&mut self, bill_id: &str, info: PaymentInfo) -> Result<()> {
        if !info.is_valid() {
            return Err(SplitError::InvalidInput(
                "bank, account and account name are all required".to_string(),
            ));
        }

        let bill = self.bill_mut(bill_id)?;
        if bill.status == BillStatus::Finalized {
            return Err(SplitError::BillLocked(bill.status));
        }
        bill.payment_info = Some(info);
        Ok(())
    }

    fn bill_details(&self, bill_id: &str) -> Result<BillDetails> {
        let bill = self.bill(bill_id)?.clone();

        let items: Vec<LineItem> = self
            .items
            .iter()
            .filter(|i| i.bill_id == bill_id)
            .cloned()
            .collect();

        let assignments: Vec<Assignment> = self
            .assignments
            .iter()
            .filter(|a| items.iter().any(|i| i.id == a.item_id))
            .cloned()
            .collect();

        let participants: Vec<Participant> = self
            .participants
            .iter()
            .filter(|p| assignments.iter().any(|a| a.user_id == p.id))
            .map(|p| Participant {
                has_paid: self.has_paid(bill_id, &p.id),
                ..p.clone()
            })
            .collect();

        Ok(BillDetails {
            bill,
            items,
            assignments,
            participants,
        })
    }

    fn add_item(
        &mut self,
        bill_id: &str,
        name: &str,
        unit_price: f64,
        quantity: u32,
    ) -> Result<String> {
        let status = self.bill(bill_id)?.status;
        self.ensure_items_editable(status)?;

        let item = LineItem::new(
            generate_id("item"),
            bill_id,
            require_name("item name", name)?,
            require_price(unit_price)?,
            require_quantity(quantity)?,
        );

        debug!(bill_id, item_id = %item.id, name = %item.name, "Added item");
        let id = item.id.clone();
        self.items.push(item);
        Ok(id)
    }

    fn update_item(&mut self, item_id: &str, update: ItemUpdate) -> Result<()> {
        let status = self.item_bill_status(item_id)?;
        self.ensure_items_editable(status)?;

        let name = update
            .name
            .as_deref()
            .map(|n| require_name("item name", n))
            .transpose()?;
        let unit_price = update.unit_price.map(require_price).transpose()?;
        let quantity = update.quantity.map(require_quantity).transpose()?;

        let item = self
            .items
            .iter_mut()
            .find(|i| i.id == item_id)
            .ok_or_else(|| SplitError::ItemNotFound(item_id.to_string()))?;

        if let Some(name) = name {
            item.name = name;
        }
        if let Some(price) = unit_price {
            item.unit_price = price;
        }
        if let Some(qty) = quantity {
            item.quantity = qty;
        }

        debug!(item_id, "Updated item");
        Ok(())
    }

    fn remove_item(&mut self, item_id: &str) -> Result<()> {
        let status = self.item_bill_status(item_id)?;
        self.ensure_items_editable(status)?;

        self.items.retain(|i| i.id != item_id);
        let before = self.assignments.len();
        self.assignments.retain(|a| !a.claims(item_id));

        debug!(
            item_id,
            assignments_removed = before - self.assignments.len(),
            "Removed item"
        );
        Ok(())
    }

    fn assign_item(&mut self, item_id: &str, user_id: &str, user_name: &str) -> Result<()> {
        let status = self.item_bill_status(item_id)?;
        self.ensure_assignable(status)?;
        let user_name = require_name("participant name", user_name)?;

        if self
            .assignments
            .iter()
            .any(|a| a.claims(item_id) && a.user_id == user_id)
        {
            debug!(item_id, user_id, "Item already claimed by participant");
            return Ok(());
        }

        self.assignments.push(Assignment::new(
            generate_id("assign"),
            item_id,
            user_id,
            user_name.clone(),
        ));
        self.join(user_id, &user_name)?;

        debug!(item_id, user_id, "Assigned item");
        Ok(())
    }

    fn unassign_item(&mut self, item_id: &str, user_id: &str) -> Result<()> {
        let status = self.item_bill_status(item_id)?;
        self.ensure_assignable(status)?;

        self.assignments
            .retain(|a| !(a.claims(item_id) && a.user_id == user_id));
        debug!(item_id, user_id, "Unassigned item");
        Ok(())
    }

    fn join(&mut self, user_id: &str, user_name: &str) -> Result<()> {
        let user_name = require_name("participant name", user_name)?;
        if !self.participants.iter().any(|p| p.id == user_id) {
            info!(user_id, name = %user_name, "Participant joined");
            self.participants.push(Participant::new(user_id, user_name));
        }
        Ok(())
    }

    fn participant_by_name(&self, name: &str) -> Option<&Participant> {
        let wanted = name.trim().to_lowercase();
        self.participants
            .iter()
            .find(|p| p.name.to_lowercase() == wanted)
    }

    fn set_paid(&mut self, bill_id: &str, user_id: &str, has_paid: bool) -> Result<()> {
        self.bill(bill_id)?;

        let items = &self.items;
        let has_claim = self.assignments.iter().any(|a| {
            a.user_id == user_id
                && items
                    .iter()
                    .any(|i| i.id == a.item_id && i.bill_id == bill_id)
        });
        if !has_claim {
            return Err(SplitError::ParticipantNotFound(user_id.to_string()));
        }

        self.payments
            .retain(|m| !(m.bill_id == bill_id && m.user_id == user_id));
        if has_paid {
            self.payments.push(PaidMark {
                bill_id: bill_id.to_string(),
                user_id: user_id.to_string(),
            });
        }

        info!(bill_id, user_id, has_paid, "Updated payment status");
        Ok(())
    }
}
