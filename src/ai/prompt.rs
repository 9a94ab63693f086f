use crate::usecases::snapshot::SpendingSnapshot;

/// Convert a spending snapshot to a compact text block for LLM consumption.
pub fn serialize_snapshot(s: &SpendingSnapshot) -> String {
    let mut out = String::with_capacity(512);

    out.push_str(&format!("INCOME: {} {}/month\n", s.monthly_income, s.currency));
    out.push_str(&format!(
        "SPENT: {} {} over the last {} days\n",
        s.total_spent, s.currency, s.window_days
    ));

    if s.by_category.is_empty() {
        out.push_str("BY CATEGORY: (no expenses recorded)\n");
    } else {
        out.push_str("BY CATEGORY:\n");
        for (category, total) in &s.by_category {
            out.push_str(&format!("  {} {}\n", category, total));
        }
    }

    out.push_str(&format!(
        "BILLS: {} recurring, {} {} combined\n",
        s.bill_count, s.bill_total, s.currency
    ));
    out.push_str(&format!("CHECK-IN STREAK: {} consecutive days\n", s.streak_days));

    match &s.active_goal {
        Some(goal) => out.push_str(&format!("ACTIVE WEEKLY GOAL: \"{}\"\n", goal)),
        None => out.push_str("ACTIVE WEEKLY GOAL: none\n"),
    }

    out
}

pub fn wise_score_system() -> &'static str {
    "You are a personal finance coach rating a user's spending snapshot.\n\
     Rate overall financial wellness on a 0-1000 scale (the Wise Score):\n\
     - 0-300: spending is out of control relative to income\n\
     - 300-600: getting by, but with clear problem areas\n\
     - 600-850: healthy habits with room to improve\n\
     - 850-1000: excellent control, saving consistently\n\
     Weigh spending against income, bill load, category balance and the\n\
     check-in streak. Do NOT reward low spending when income is zero or\n\
     unknown.\n\n\
     Output ONLY a JSON object: {\"score\": <integer 0-1000>, \"summary\": \"<1-2 sentence explanation>\"}.\n\
     No markdown, no extra text."
}

pub fn wise_score_user(snapshot: &SpendingSnapshot) -> String {
    format!(
        "Rate this user's financial snapshot:\n\n{}",
        serialize_snapshot(snapshot)
    )
}

pub fn coach_tip_system() -> &'static str {
    "You are a personal finance coach. Given a spending snapshot, give ONE\n\
     specific, actionable tip for the coming week.\n\
     - Tie the tip to the largest or fastest-growing category when you can\n\
     - If the user has an active weekly goal, reinforce it instead of\n\
       suggesting a competing habit\n\
     - Do NOT give generic advice (\"make a budget\", \"spend less\") --\n\
       name the category, the behavior and a concrete target\n\n\
     Output ONLY a JSON object: {\"tip\": \"<the tip>\", \"focus\": \"<category or habit it targets>\"}.\n\
     No markdown, no extra text."
}

pub fn coach_tip_user(snapshot: &SpendingSnapshot) -> String {
    format!(
        "Here is the user's snapshot. Suggest this week's tip:\n\n{}",
        serialize_snapshot(snapshot)
    )
}

pub fn receipt_scan_system() -> &'static str {
    "You read retail receipts from photos. Extract the purchase details.\n\
     Categories: groceries, dining, transport, utilities, entertainment,\n\
     health, shopping, bills, other. Pick the closest one.\n\n\
     Output ONLY a JSON object:\n\
     {\"merchant\": \"<store name>\", \"total\": <final amount paid>,\n\
      \"currency\": \"<ISO code, best guess>\", \"spent_on\": \"<YYYY-MM-DD>\",\n\
      \"category\": \"<one of the categories>\"}.\n\
     Use null for anything you cannot read. No markdown, no extra text."
}

pub fn receipt_scan_user() -> &'static str {
    "Extract the purchase details from this receipt image."
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal::Decimal;
    use std::str::FromStr;

    fn snapshot() -> SpendingSnapshot {
        SpendingSnapshot {
            currency: "USD".into(),
            monthly_income: Decimal::from_str("4200").unwrap(),
            window_days: 30,
            total_spent: Decimal::from_str("1310.75").unwrap(),
            by_category: vec![
                ("groceries".into(), Decimal::from_str("610.25").unwrap()),
                ("dining".into(), Decimal::from_str("700.50").unwrap()),
            ],
            bill_count: 3,
            bill_total: Decimal::from_str("240.00").unwrap(),
            streak_days: 5,
            active_goal: Some("No takeout on weekdays".into()),
        }
    }

    #[test]
    fn snapshot_lines_present() {
        let text = serialize_snapshot(&snapshot());
        assert!(text.contains("INCOME: 4200 USD/month"));
        assert!(text.contains("SPENT: 1310.75 USD over the last 30 days"));
        assert!(text.contains("  groceries 610.25"));
        assert!(text.contains("BILLS: 3 recurring, 240.00 USD combined"));
        assert!(text.contains("CHECK-IN STREAK: 5 consecutive days"));
        assert!(text.contains("ACTIVE WEEKLY GOAL: \"No takeout on weekdays\""));
    }

    #[test]
    fn missing_goal_and_expenses_render() {
        let mut s = snapshot();
        s.active_goal = None;
        s.by_category.clear();
        let text = serialize_snapshot(&s);
        assert!(text.contains("BY CATEGORY: (no expenses recorded)"));
        assert!(text.contains("ACTIVE WEEKLY GOAL: none"));
    }

    #[test]
    fn system_prompts_demand_json() {
        assert!(wise_score_system().contains("\"score\""));
        assert!(coach_tip_system().contains("\"tip\""));
        assert!(receipt_scan_system().contains("\"merchant\""));
    }
}
