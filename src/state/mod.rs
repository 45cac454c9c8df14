mod memory;
mod persistence;
mod store;

pub use memory::MemoryBillStore;
pub use persistence::{load_store, save_store};
pub use store::{generate_id, BillStore, ItemUpdate};
