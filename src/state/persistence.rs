use std::fs;
use std::path::Path;

use tracing::{debug, info};

use crate::error::Result;
use crate::state::MemoryBillStore;

/// Load the bill store from a JSON file.
///
/// A missing file yields an empty store. Records pointing at missing bills
/// or items are dropped.
pub fn load_store<P: AsRef<Path>>(path: P) -> Result<MemoryBillStore> {
    let path = path.as_ref();
    if !path.exists() {
        info!(path = %path.display(), "State file not found, starting empty");
        return Ok(MemoryBillStore::new());
    }

    let content = fs::read_to_string(path)?;
    let mut store: MemoryBillStore = serde_json::from_str(&content)?;
    store.prune_dangling();

    debug!(path = %path.display(), bills = store.len(), "Loaded state");
    Ok(store)
}

/// Save the bill store to a JSON file.
pub fn save_store<P: AsRef<Path>>(path: P, store: &MemoryBillStore) -> Result<()> {
    let json = serde_json::to_string_pretty(store)?;
    fs::write(path.as_ref(), json)?;
    debug!(path = %path.as_ref().display(), "Saved state");
    Ok(())
}
