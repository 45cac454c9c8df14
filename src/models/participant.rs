use serde::{Deserialize, Serialize};

/// Someone who joined a bill via its share link.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Participant {
    pub id: String,

    pub name: String,

    /// Paid status for the bill this record was fetched with. Not stored.
    #[serde(default, skip_serializing)]
    pub has_paid: bool,
}

impl Participant {
    pub fn new(id: impl Into<String>, name: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            name: name.into(),
            has_paid: false,
        }
    }
}
