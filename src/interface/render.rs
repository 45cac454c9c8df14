use crate::models::{Bill, BillDetails};
use crate::splitter::{BillSummary, CollectionProgress, ParticipantBreakdown, Totals};

/// Format an amount rounded to whole units with thousands separators.
///
/// `format_currency(24750.4, "Rp")` gives `"Rp 24,750"`.
pub fn format_currency(amount: f64, currency: &str) -> String {
    let rounded = amount.round();
    let sign = if rounded < 0.0 { "-" } else { "" };
    let digits = format!("{:.0}", rounded.abs());

    let mut grouped = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(ch);
    }

    if currency.is_empty() {
        format!("{}{}", sign, grouped)
    } else {
        format!("{}{} {}", sign, currency, grouped)
    }
}

fn print_totals(totals: &Totals, rate: f64, currency: &str, indent: &str) {
    println!("{}Subtotal:            {:>16}", indent, format_currency(totals.subtotal, currency));
    println!(
        "{}Tax & Service ({:>4}%): {:>14}",
        indent,
        rate,
        format_currency(totals.tax, currency)
    );
    println!("{}Total:               {:>16}", indent, format_currency(totals.total, currency));
}

/// Display a list of bills, one per line.
pub fn display_bill_list(bills: &[&Bill]) {
    if bills.is_empty() {
        println!("No bills yet. Use 'create' to start one.");
        return;
    }

    println!();
    println!("=== Bills ({}) ===", bills.len());
    println!();
    for bill in bills {
        println!("  {}  {:<30} [{}]", bill.id, bill.title(), bill.status);
    }
    println!();
}

/// Display the bill's items with the current per-share preview cost.
pub fn display_bill_overview(details: &BillDetails, summary: &BillSummary, currency: &str) {
    let bill = &details.bill;

    println!();
    println!("=== {} [{}] ===", bill.title(), bill.status);
    println!("Host: {}   Bill id: {}", bill.host_name, bill.id);
    println!();

    if details.items.is_empty() {
        println!("  (no items)");
    } else {
        let max_name_len = details
            .items
            .iter()
            .map(|i| i.name.len())
            .max()
            .unwrap_or(10);

        for (i, item) in details.items.iter().enumerate() {
            let claimants: Vec<&str> = details
                .assignments
                .iter()
                .filter(|a| a.claims(&item.id))
                .map(|a| a.user_name.as_str())
                .collect();

            let who = if claimants.is_empty() {
                "unassigned".to_string()
            } else {
                claimants.join(", ")
            };

            println!(
                "{:>3}. {:<width$} {:>3} x {:>12} = {:>14}  ({})",
                i + 1,
                item.name,
                item.quantity,
                format_currency(item.unit_price, currency),
                format_currency(item.total_cost(), currency),
                who,
                width = max_name_len
            );
        }
    }

    println!();
    print_totals(&summary.bill_totals, bill.tax_service_rate, currency, "");

    if !summary.is_fully_assigned() {
        println!();
        println!(
            "{} item(s) still unassigned ({} before tax/service)",
            summary.unassigned.len(),
            format_currency(summary.unassigned_total, currency)
        );
    }
    println!();
}

/// Display one participant's claims and totals.
pub fn display_participant(participant: &ParticipantBreakdown, rate: f64, currency: &str) {
    let paid = if participant.has_paid { "  [paid]" } else { "" };
    println!(
        "{} - {}{}",
        participant.name,
        format_currency(participant.totals.total, currency),
        paid
    );

    for claim in &participant.claims {
        let split = if claim.split_count > 1 {
            format!(" (split {} ways)", claim.split_count)
        } else {
            String::new()
        };
        println!(
            "    {}{}: {}",
            claim.item_name,
            split,
            format_currency(claim.cost, currency)
        );
    }
    print_totals(&participant.totals, rate, currency, "    ");
    println!();
}

/// Display the full per-participant breakdown.
pub fn display_summary(details: &BillDetails, summary: &BillSummary, currency: &str) {
    println!();
    println!("=== Breakdown: {} ===", details.bill.title());
    println!();

    if summary.participants.is_empty() {
        println!("Nobody has claimed any items yet.");
        println!();
        return;
    }

    for participant in &summary.participants {
        display_participant(participant, details.bill.tax_service_rate, currency);
    }

    println!("--- Summary ---");
    println!(
        "Participants: {}   Grand total: {}   Claimed: {}",
        summary.participants.len(),
        format_currency(summary.bill_totals.total, currency),
        format_currency(summary.participants_total, currency)
    );
    if !summary.is_fully_assigned() {
        println!(
            "Unassigned: {}",
            summary
                .unassigned
                .iter()
                .map(|i| i.name.as_str())
                .collect::<Vec<_>>()
                .join(", ")
        );
    }
    println!();
}

/// Display how much has been collected so far.
pub fn display_progress(details: &BillDetails, progress: &CollectionProgress, currency: &str) {
    println!();
    println!("=== Collection: {} ===", details.bill.title());
    println!(
        "Collected {} of {} ({:.0}%)",
        format_currency(progress.collected, currency),
        format_currency(progress.grand_total, currency),
        progress.percent
    );
    println!(
        "Paid: {}   Pending: {}",
        progress.paid_count, progress.pending_count
    );

    if let Some(info) = &details.bill.payment_info {
        println!("Pay to: {} {} ({})", info.bank, info.account, info.name);
    }
    println!();
}
