use clap::Parser;
use tracing::{debug, info};

use split_bill_rs::cli::{Cli, Command};
use split_bill_rs::error::{Result, SplitError};
use split_bill_rs::interface::{
    display_bill_list, display_bill_overview, display_participant, display_progress,
    display_summary, format_currency, prompt_participant_name, prompt_payment_info,
    prompt_yes_no, resolve_item, select_items_to_claim, write_settlement_csv,
};
use split_bill_rs::logging::init_cli_logger;
use split_bill_rs::models::{BillStatus, PaymentInfo};
use split_bill_rs::splitter::{collection_progress, cost_of_assignment, summarize_bill};
use split_bill_rs::state::{generate_id, load_store, save_store, BillStore, ItemUpdate, MemoryBillStore};

fn main() {
    let cli = Cli::parse();
    init_cli_logger(cli.verbose);

    if let Err(e) = run(cli) {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run(cli: Cli) -> Result<()> {
    let mut store = load_store(&cli.file)?;
    let currency = cli.currency.as_str();
    let command = cli.command.unwrap_or_default();
    debug!(?command, file = %cli.file, "Running command");

    let changed = match command {
        Command::List => {
            display_bill_list(&store.bills());
            false
        }
        Command::Create { host, restaurant } => {
            cmd_create(&mut store, &host, restaurant.as_deref())?;
            true
        }
        Command::AddItem {
            bill,
            name,
            price,
            qty,
        } => {
            store.add_item(&bill, &name, price, qty)?;
            show_overview(&store, &bill, currency)?;
            true
        }
        Command::UpdateItem {
            bill,
            item,
            name,
            price,
            qty,
        } => {
            let update = ItemUpdate {
                name,
                unit_price: price,
                quantity: qty,
            };
            if update.is_empty() {
                println!("Nothing to update. Pass --name, --price or --qty.");
                return Ok(());
            }
            let item_id = item_id_for(&store, &bill, &item)?;
            store.update_item(&item_id, update)?;
            show_overview(&store, &bill, currency)?;
            true
        }
        Command::RemoveItem { bill, item } => {
            let item_id = item_id_for(&store, &bill, &item)?;
            store.remove_item(&item_id)?;
            show_overview(&store, &bill, currency)?;
            true
        }
        Command::Rate { bill, percent } => {
            store.update_rate(&bill, percent)?;
            show_overview(&store, &bill, currency)?;
            true
        }
        Command::Open { bill } => {
            cmd_open(&mut store, &bill)?;
            true
        }
        Command::Lock { bill } => {
            cmd_lock(&mut store, &bill, currency)?;
            true
        }
        Command::Unlock { bill } => {
            store.set_status(&bill, BillStatus::Open)?;
            println!("Bill re-opened for selections.");
            true
        }
        Command::Finalize {
            bill,
            bank,
            account,
            account_name,
        } => {
            cmd_finalize(&mut store, &bill, bank, account, account_name, currency)?;
            true
        }
        Command::Assign {
            bill,
            item,
            participant,
        } => {
            let item_id = item_id_for(&store, &bill, &item)?;
            let user_id = participant_id_for(&store, &participant);
            store.assign_item(&item_id, &user_id, &participant)?;
            show_overview(&store, &bill, currency)?;
            true
        }
        Command::Unassign {
            bill,
            item,
            participant,
        } => {
            let item_id = item_id_for(&store, &bill, &item)?;
            let user_id = store
                .participant_by_name(&participant)
                .map(|p| p.id.clone())
                .ok_or_else(|| SplitError::ParticipantNotFound(participant.clone()))?;
            store.unassign_item(&item_id, &user_id)?;
            show_overview(&store, &bill, currency)?;
            true
        }
        Command::Join { bill, name } => cmd_join(&mut store, &bill, name, currency)?,
        Command::Summary { bill, participant } => {
            cmd_summary(&store, &bill, participant.as_deref(), currency)?;
            false
        }
        Command::Progress { bill } => {
            let details = store.bill_details(&bill)?;
            display_progress(&details, &collection_progress(&details), currency);
            false
        }
        Command::MarkPaid {
            bill,
            participant,
            unpaid,
        } => {
            cmd_mark_paid(&mut store, &bill, &participant, !unpaid, currency)?;
            true
        }
        Command::Export { bill, output } => {
            let details = store.bill_details(&bill)?;
            let rows = write_settlement_csv(&output, &summarize_bill(&details))?;
            println!("Wrote {} participant(s) to {}", rows, output);
            false
        }
    };

    if changed {
        save_store(&cli.file, &store)?;
        info!(file = %cli.file, "Bill state saved");
    }

    Ok(())
}

fn show_overview(store: &MemoryBillStore, bill_id: &str, currency: &str) -> Result<()> {
    let details = store.bill_details(bill_id)?;
    display_bill_overview(&details, &summarize_bill(&details), currency);
    Ok(())
}

/// Resolve an item id or name within one bill.
fn item_id_for(store: &MemoryBillStore, bill_id: &str, query: &str) -> Result<String> {
    let details = store.bill_details(bill_id)?;
    Ok(resolve_item(&details.items, query)?.id.clone())
}

/// Existing participant id for `name`, or a fresh one.
fn participant_id_for(store: &MemoryBillStore, name: &str) -> String {
    store
        .participant_by_name(name)
        .map(|p| p.id.clone())
        .unwrap_or_else(|| generate_id("user"))
}

/// Create a bill and print the link participants join with.
fn cmd_create(store: &mut MemoryBillStore, host: &str, restaurant: Option<&str>) -> Result<()> {
    let bill_id = store.create_bill(host, restaurant)?;
    println!("Created bill {}", bill_id);
    println!("Add items with: split_bill add-item {} <name> <price> --qty <n>", bill_id);
    println!("Then share:     split_bill join {}", bill_id);
    Ok(())
}

/// Open a bill for participants once items are entered.
fn cmd_open(store: &mut MemoryBillStore, bill_id: &str) -> Result<()> {
    let details = store.bill_details(bill_id)?;
    if details.items.is_empty() {
        return Err(SplitError::InvalidInput(
            "add at least one item before opening the bill".to_string(),
        ));
    }

    store.set_status(bill_id, BillStatus::Open)?;
    println!("Bill is open. Share it with: split_bill join {}", bill_id);
    Ok(())
}

/// Move into review, warning about items nobody claimed.
fn cmd_lock(store: &mut MemoryBillStore, bill_id: &str, currency: &str) -> Result<()> {
    let details = store.bill_details(bill_id)?;
    let unassigned = details.unassigned_items();

    if !unassigned.is_empty() {
        println!("{} item(s) still unassigned:", unassigned.len());
        for item in &unassigned {
            println!("  - {} ({})", item.name, format_currency(item.total_cost(), currency));
        }
        if !prompt_yes_no("Lock the bill anyway?", false)? {
            return Ok(());
        }
    }

    store.set_status(bill_id, BillStatus::Review)?;
    let details = store.bill_details(bill_id)?;
    display_summary(&details, &summarize_bill(&details), currency);
    println!("Selections are locked. Finalize once the breakdown looks right.");
    Ok(())
}

fn cmd_finalize(
    store: &mut MemoryBillStore,
    bill_id: &str,
    bank: Option<String>,
    account: Option<String>,
    account_name: Option<String>,
    currency: &str,
) -> Result<()> {
    let info = match (bank, account, account_name) {
        (Some(bank), Some(account), Some(name)) => PaymentInfo {
            bank,
            account,
            name,
        },
        _ => match store.bill(bill_id)?.payment_info.clone() {
            Some(existing) => existing,
            None => prompt_payment_info()?,
        },
    };

    store.finalize(bill_id, info)?;

    let details = store.bill_details(bill_id)?;
    println!("Bill finalized!");
    display_progress(&details, &collection_progress(&details), currency);
    Ok(())
}

/// Interactive participant flow. Returns whether anything changed.
fn cmd_join(
    store: &mut MemoryBillStore,
    bill_id: &str,
    name: Option<String>,
    currency: &str,
) -> Result<bool> {
    let details = store.bill_details(bill_id)?;
    println!("Joining {} hosted by {}", details.bill.title(), details.bill.host_name);

    let name = match name {
        Some(n) => n,
        None => prompt_participant_name()?,
    };
    let user_id = participant_id_for(store, &name);
    store.join(&user_id, &name)?;

    match details.bill.status {
        BillStatus::Open => {}
        BillStatus::PendingOcr => {
            println!("The host is still entering items. Try again shortly.");
            return Ok(true);
        }
        BillStatus::Review | BillStatus::Finalized => {
            println!("Selections are locked ({}).", details.bill.status);
            cmd_summary(store, bill_id, Some(&name), currency)?;
            return Ok(true);
        }
    }

    if details.items.is_empty() {
        println!("This bill has no items yet.");
        return Ok(true);
    }

    let claimed: Vec<String> = details
        .assignments
        .iter()
        .filter(|a| a.user_id == user_id)
        .map(|a| a.item_id.clone())
        .collect();

    let labels: Vec<String> = details
        .items
        .iter()
        .map(|item| {
            let others = details
                .assignments
                .iter()
                .filter(|a| a.claims(&item.id) && a.user_id != user_id)
                .count();
            format!(
                "{} x{} - {} ({} share now, {} other(s))",
                item.name,
                item.quantity,
                format_currency(item.total_cost(), currency),
                format_currency(cost_of_assignment(item, &details.assignments), currency),
                others
            )
        })
        .collect();

    let selected = select_items_to_claim(&details.items, &claimed, &labels)?;

    for item_id in &selected {
        if !claimed.contains(item_id) {
            store.assign_item(item_id, &user_id, &name)?;
        }
    }
    for item_id in &claimed {
        if !selected.contains(item_id) {
            store.unassign_item(item_id, &user_id)?;
        }
    }

    info!(user_id = %user_id, claimed = selected.len(), "Updated selections");
    cmd_summary(store, bill_id, Some(&name), currency)?;
    Ok(true)
}

fn cmd_summary(
    store: &MemoryBillStore,
    bill_id: &str,
    participant: Option<&str>,
    currency: &str,
) -> Result<()> {
    let details = store.bill_details(bill_id)?;
    let summary = summarize_bill(&details);

    match participant {
        None => {
            display_bill_overview(&details, &summary, currency);
            display_summary(&details, &summary, currency);
        }
        Some(name) => {
            let found = store
                .participant_by_name(name)
                .and_then(|p| summary.participant(&p.id));
            match found {
                Some(breakdown) => {
                    println!();
                    display_participant(breakdown, details.bill.tax_service_rate, currency);
                }
                None => println!("{} has not claimed any items yet.", name),
            }
            if details.bill.status != BillStatus::Finalized {
                println!("Waiting for the host to finalize.");
            } else if let Some(info) = &details.bill.payment_info {
                println!("Pay to: {} {} ({})", info.bank, info.account, info.name);
            }
        }
    }
    Ok(())
}

fn cmd_mark_paid(
    store: &mut MemoryBillStore,
    bill_id: &str,
    participant: &str,
    has_paid: bool,
    currency: &str,
) -> Result<()> {
    let user_id = store
        .participant_by_name(participant)
        .map(|p| p.id.clone())
        .ok_or_else(|| SplitError::ParticipantNotFound(participant.to_string()))?;

    store.set_paid(bill_id, &user_id, has_paid)?;

    let details = store.bill_details(bill_id)?;
    display_progress(&details, &collection_progress(&details), currency);
    Ok(())
}
