pub mod export;
pub mod prompts;
pub mod render;

pub use export::write_settlement_csv;
pub use prompts::{
    prompt_participant_name, prompt_payment_info, prompt_yes_no, rank_item_matches, resolve_item,
    select_items_to_claim,
};
pub use render::{
    display_bill_list, display_bill_overview, display_participant, display_progress,
    display_summary, format_currency,
};
