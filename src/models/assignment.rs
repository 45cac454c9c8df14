use serde::{Deserialize, Serialize};

/// A claim by one participant on a share of one item.
///
/// Every assignee of an item pays the same share unless a weighted split
/// policy is requested explicitly; see [`crate::splitter::SplitPolicy`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assignment {
    pub id: String,

    pub item_id: String,

    pub user_id: String,

    pub user_name: String,

    /// Relative share weight. Only consulted by the weighted policy.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub weight: Option<f64>,
}

impl Assignment {
    pub fn new(
        id: impl Into<String>,
        item_id: impl Into<String>,
        user_id: impl Into<String>,
        user_name: impl Into<String>,
    ) -> Self {
        Self {
            id: id.into(),
            item_id: item_id.into(),
            user_id: user_id.into(),
            user_name: user_name.into(),
            weight: None,
        }
    }

    /// Share weight, defaulting to 1. Non-finite or negative weights count as 0.
    pub fn share_weight(&self) -> f64 {
        match self.weight {
            Some(w) if w.is_finite() && w >= 0.0 => w,
            Some(_) => 0.0,
            None => 1.0,
        }
    }

    /// Whether this assignment claims the given item.
    #[inline]
    pub fn claims(&self, item_id: &str) -> bool {
        self.item_id == item_id
    }
}
