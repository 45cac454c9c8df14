use clap::{Parser, Subcommand};

use crate::splitter::constants::DEFAULT_CURRENCY;

/// SplitBill: split a shared restaurant bill by who had what.
#[derive(Parser, Debug)]
#[command(name = "split_bill")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Option<Command>,

    /// Path to the bill state JSON file.
    #[arg(short, long, default_value = "bill_state.json", global = true)]
    pub file: String,

    /// Currency prefix used when displaying amounts.
    #[arg(long, default_value = DEFAULT_CURRENCY, global = true)]
    pub currency: String,

    /// Enable debug logging.
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

#[derive(Subcommand, Debug)]
pub enum Command {
    /// List all bills.
    List,

    /// Create a new bill as host.
    Create {
        /// Host's display name.
        host: String,

        /// Restaurant name shown to participants.
        #[arg(long)]
        restaurant: Option<String>,
    },

    /// Add a line item to a bill.
    AddItem {
        bill: String,
        name: String,
        /// Price per unit.
        price: f64,
        #[arg(long, default_value = "1")]
        qty: u32,
    },

    /// Change an item's name, price or quantity.
    UpdateItem {
        bill: String,
        /// Item id or name.
        item: String,
        #[arg(long)]
        name: Option<String>,
        #[arg(long)]
        price: Option<f64>,
        #[arg(long)]
        qty: Option<u32>,
    },

    /// Remove an item and every claim on it.
    RemoveItem {
        bill: String,
        /// Item id or name.
        item: String,
    },

    /// Set the tax & service percentage.
    Rate { bill: String, percent: f64 },

    /// Open the bill so participants can claim items.
    Open { bill: String },

    /// Lock selections and move the bill into review.
    Lock { bill: String },

    /// Re-open a bill in review.
    Unlock { bill: String },

    /// Finalize the bill with payment details.
    Finalize {
        bill: String,
        #[arg(long)]
        bank: Option<String>,
        #[arg(long)]
        account: Option<String>,
        #[arg(long)]
        account_name: Option<String>,
    },

    /// Claim an item for a participant.
    Assign {
        bill: String,
        /// Item id or name.
        item: String,
        /// Participant name.
        participant: String,
    },

    /// Release a participant's claim on an item.
    Unassign {
        bill: String,
        /// Item id or name.
        item: String,
        /// Participant name.
        participant: String,
    },

    /// Join a bill and pick your items interactively.
    Join {
        bill: String,
        /// Skip the name prompt.
        #[arg(long)]
        name: Option<String>,
    },

    /// Show what everyone owes.
    Summary {
        bill: String,
        /// Only show this participant.
        #[arg(long)]
        participant: Option<String>,
    },

    /// Show how much has been collected.
    Progress { bill: String },

    /// Mark a participant as paid (or unpaid).
    MarkPaid {
        bill: String,
        participant: String,
        #[arg(long)]
        unpaid: bool,
    },

    /// Export the settlement as CSV.
    Export {
        bill: String,
        #[arg(short, long, default_value = "settlement.csv")]
        output: String,
    },
}

impl Default for Command {
    fn default() -> Self {
        Command::List
    }
}
