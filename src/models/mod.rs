mod assignment;
mod bill;
mod item;
mod participant;

pub use assignment::Assignment;
pub use bill::{Bill, BillDetails, BillStatus, PaymentInfo};
pub use item::LineItem;
pub use participant::Participant;
