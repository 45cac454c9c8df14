use serde::{Deserialize, Serialize};

/// One priced entry on a bill, possibly ordered several times.
///
/// `unit_price` is per unit; the amount divided among assignees is
/// `unit_price * quantity`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LineItem {
    pub id: String,

    pub bill_id: String,

    pub name: String,

    pub unit_price: f64,

    pub quantity: u32,
}

impl LineItem {
    pub fn new(
        id: impl Into<String>,
        bill_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: f64,
        quantity: u32,
    ) -> Self {
        Self {
            id: id.into(),
            bill_id: bill_id.into(),
            name: name.into(),
            unit_price,
            quantity,
        }
    }

    /// Full cost of the item across all units.
    #[inline]
    pub fn total_cost(&self) -> f64 {
        self.unit_price * self.quantity as f64
    }

    /// Basic validation: non-blank name, finite non-negative price, at least one unit.
    pub fn is_valid(&self) -> bool {
        !self.name.trim().is_empty()
            && self.unit_price.is_finite()
            && self.unit_price >= 0.0
            && self.quantity > 0
    }

    /// Canonical key for name lookups (trimmed, lowercase).
    pub fn key(&self) -> String {
        self.name.trim().to_lowercase()
    }
}
