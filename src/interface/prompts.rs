use dialoguer::{Confirm, Input, MultiSelect, Select};
use strsim::jaro_winkler;

use crate::error::{Result, SplitError};
use crate::models::{LineItem, PaymentInfo};
use crate::splitter::constants::{FUZZY_MATCH_THRESHOLD, FUZZY_MAX_CANDIDATES};

/// Items whose names resemble `query`, best match first.
///
/// An exact (case-insensitive) name match is returned alone with a score of 1.
pub fn rank_item_matches<'a>(items: &'a [LineItem], query: &str) -> Vec<(&'a LineItem, f64)> {
    let query = query.trim().to_lowercase();
    if query.is_empty() {
        return Vec::new();
    }

    if let Some(item) = items.iter().find(|i| i.key() == query) {
        return vec![(item, 1.0)];
    }

    let mut candidates: Vec<(&LineItem, f64)> = items
        .iter()
        .map(|i| (i, jaro_winkler(&i.key(), &query)))
        .filter(|(_, score)| *score > FUZZY_MATCH_THRESHOLD)
        .collect();

    candidates.sort_by(|a, b| b.1.partial_cmp(&a.1).unwrap_or(std::cmp::Ordering::Equal));
    candidates.truncate(FUZZY_MAX_CANDIDATES);
    candidates
}

/// Resolve an item by id or name, asking the user to confirm fuzzy matches.
pub fn resolve_item<'a>(items: &'a [LineItem], query: &str) -> Result<&'a LineItem> {
    if let Some(item) = items.iter().find(|i| i.id == query) {
        return Ok(item);
    }

    let candidates = rank_item_matches(items, query);

    match candidates.as_slice() {
        [] => Err(SplitError::ItemNotFound(query.to_string())),
        [(item, score)] if *score >= 1.0 => Ok(*item),
        [(item, _)] => {
            let confirm = Confirm::new()
                .with_prompt(format!("Did you mean '{}'?", item.name))
                .default(true)
                .interact()?;
            if confirm {
                Ok(*item)
            } else {
                Err(SplitError::ItemNotFound(query.to_string()))
            }
        }
        _ => {
            let mut options: Vec<String> = candidates.iter().map(|(i, _)| i.name.clone()).collect();
            options.push("None of these".to_string());

            let selection = Select::new()
                .with_prompt("Which item did you mean?")
                .items(&options)
                .default(0)
                .interact()?;

            candidates
                .get(selection)
                .map(|(item, _)| *item)
                .ok_or_else(|| SplitError::ItemNotFound(query.to_string()))
        }
    }
}

/// Prompt for a participant's display name.
pub fn prompt_participant_name() -> Result<String> {
    let name: String = Input::new()
        .with_prompt("Enter your name")
        .interact_text()?;

    let name = name.trim();
    if name.is_empty() {
        return Err(SplitError::InvalidInput("name must not be blank".to_string()));
    }
    Ok(name.to_string())
}

/// Let the participant tick the items they had. Current claims start ticked.
///
/// Returns the ids of the ticked items.
pub fn select_items_to_claim(
    items: &[LineItem],
    claimed: &[String],
    labels: &[String],
) -> Result<Vec<String>> {
    let defaults: Vec<bool> = items.iter().map(|i| claimed.contains(&i.id)).collect();

    let selection = MultiSelect::new()
        .with_prompt("Select the items you had (space to toggle, enter to confirm)")
        .items(labels)
        .defaults(&defaults)
        .interact()?;

    Ok(selection
        .into_iter()
        .filter_map(|idx| items.get(idx).map(|i| i.id.clone()))
        .collect())
}

/// Prompt for where participants should send their payment.
pub fn prompt_payment_info() -> Result<PaymentInfo> {
    let bank: String = Input::new().with_prompt("Bank").interact_text()?;
    let account: String = Input::new().with_prompt("Account number").interact_text()?;
    let name: String = Input::new().with_prompt("Account name").interact_text()?;

    let info = PaymentInfo {
        bank: bank.trim().to_string(),
        account: account.trim().to_string(),
        name: name.trim().to_string(),
    };

    if !info.is_valid() {
        return Err(SplitError::InvalidInput(
            "bank, account and account name are all required".to_string(),
        ));
    }
    Ok(info)
}

/// Prompt for yes/no confirmation.
pub fn prompt_yes_no(prompt: &str, default: bool) -> Result<bool> {
    Ok(Confirm::new()
        .with_prompt(prompt)
        .default(default)
        .interact()?)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn menu() -> Vec<LineItem> {
        vec![
            LineItem::new("item-1", "bill-1", "Nasi Goreng Spesial", 25000.0, 1),
            LineItem::new("item-2", "bill-1", "Ayam Bakar", 30000.0, 1),
            LineItem::new("item-3", "bill-1", "Es Teh Manis", 5000.0, 3),
        ]
    }

    #[test]
    fn test_exact_match_case_insensitive() {
        let items = menu();
        let matches = rank_item_matches(&items, "ayam bakar");
        assert_eq!(matches.len(), 1);
        assert_eq!(matches[0].0.id, "item-2");
        assert_eq!(matches[0].1, 1.0);
    }

    #[test]
    fn test_fuzzy_match_typo() {
        let items = menu();
        let matches = rank_item_matches(&items, "es teh manos");
        assert!(!matches.is_empty());
        assert_eq!(matches[0].0.id, "item-3");
    }

    #[test]
    fn test_no_match() {
        let items = menu();
        assert!(rank_item_matches(&items, "rendang").is_empty());
        assert!(rank_item_matches(&items, "   ").is_empty());
    }

    #[test]
    fn test_resolve_by_id_or_exact_name() {
        let items = menu();
        assert_eq!(resolve_item(&items, "item-1").unwrap().name, "Nasi Goreng Spesial");
        assert_eq!(resolve_item(&items, "Es Teh Manis").unwrap().id, "item-3");
        assert!(matches!(
            resolve_item(&items, "rendang"),
            Err(SplitError::ItemNotFound(_))
        ));
    }
}
