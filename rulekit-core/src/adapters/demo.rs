//! Demo data generator
//!
//! Deterministic sample accounts, budgets, transactions, and starter rules
//! so every command has something to work against in demo mode. 90 days of
//! transactions with weekday/monthly patterns; no randomness, so repeated
//! seeds produce the same data.

use chrono::{Datelike, Duration, Utc};
use rust_decimal::Decimal;
use uuid::Uuid;

use crate::domain::{Account, Budget, Rule, RuleAction, RuleCondition, Transaction};

fn fixed_uuid(s: &str) -> Uuid {
    Uuid::parse_str(s).unwrap()
}

/// Generate demo accounts
pub fn generate_demo_accounts() -> Vec<Account> {
    let now = Utc::now();
    let mk = |id: &str, name: &str, account_type: &str| Account {
        id: fixed_uuid(id),
        name: name.to_string(),
        account_type: Some(account_type.to_string()),
        created_at: now,
        updated_at: now,
    };

    vec![
        mk(
            "11111111-1111-1111-1111-111111111111",
            "Everyday Checking",
            "checking",
        ),
        mk(
            "22222222-2222-2222-2222-222222222222",
            "Rainy Day Savings",
            "savings",
        ),
        mk(
            "33333333-3333-3333-3333-333333333333",
            "Cashback Card",
            "credit",
        ),
    ]
}

/// Generate demo budgets
pub fn generate_demo_budgets() -> Vec<Budget> {
    let now = Utc::now();
    let mk = |id: &str, name: &str, amount: Decimal| Budget {
        id: fixed_uuid(id),
        name: name.to_string(),
        description: None,
        amount,
        start_date: now - Duration::days(90),
        end_date: None,
        created_at: now,
        updated_at: now,
    };

    vec![
        mk(
            "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa",
            "Groceries",
            Decimal::new(60000, 2), // $600.00 / month
        ),
        mk(
            "bbbbbbbb-bbbb-bbbb-bbbb-bbbbbbbbbbbb",
            "Dining Out",
            Decimal::new(25000, 2),
        ),
        mk(
            "cccccccc-cccc-cccc-cccc-cccccccccccc",
            "Housing",
            Decimal::new(190000, 2),
        ),
    ]
}

/// Generate 90 days of patterned demo transactions
pub fn generate_demo_transactions() -> Vec<Transaction> {
    let checking = fixed_uuid("11111111-1111-1111-1111-111111111111");
    let card = fixed_uuid("33333333-3333-3333-3333-333333333333");
    let now = Utc::now();

    let mut transactions = Vec::new();
    let mut push = |account: Uuid,
                    days_ago: i64,
                    description: &str,
                    destination: Option<&str>,
                    amount: Decimal| {
        let date = now - Duration::days(days_ago);
        let mut tx = Transaction::new(Uuid::new_v4(), account, description, amount, date);
        tx.destination_name = destination.map(|d| d.to_string());
        transactions.push(tx);
    };

    for days_ago in 0..90i64 {
        let date = now - Duration::days(days_ago);
        let weekday = date.weekday().number_from_monday();
        let day_of_month = date.day();

        // Weekday coffee, price wobbles with the weekday
        if weekday <= 5 {
            let cents = 450 + (weekday as i64) * 25;
            push(
                card,
                days_ago,
                "BLUE DOOR COFFEE #104",
                Some("Blue Door Coffee"),
                Decimal::new(-cents, 2),
            );
        }

        // Groceries every fourth day
        if days_ago % 4 == 0 {
            let cents = 5200 + (days_ago % 7) * 310;
            push(
                card,
                days_ago,
                "FRESHMART MARKET 0041",
                Some("FreshMart"),
                Decimal::new(-cents, 2),
            );
        }

        // Monthly fixtures
        if day_of_month == 1 {
            push(
                checking,
                days_ago,
                "ACME CORP PAYROLL",
                None,
                Decimal::new(420000, 2),
            );
        }
        if day_of_month == 3 {
            push(
                checking,
                days_ago,
                "RENT PAYMENT",
                Some("Hillside Properties"),
                Decimal::new(-185000, 2),
            );
        }
        if day_of_month == 8 {
            push(
                card,
                days_ago,
                "STREAMFLIX SUBSCRIPTION",
                Some("Streamflix"),
                Decimal::new(-1599, 2),
            );
        }
    }

    transactions
}

/// Generate starter rules wired to the demo budgets
pub fn generate_demo_rules() -> Vec<Rule> {
    let groceries_budget = fixed_uuid("aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa");
    let dining_budget = fixed_uuid("bbbbbbbb-bbbb-bbbb-bbbb-bbbbbbbbbbbb");
    let housing_budget = fixed_uuid("cccccccc-cccc-cccc-cccc-cccccccccccc");
    let now = Utc::now();

    let mk = |id: &str,
              name: &str,
              priority: i32,
              conditions: Vec<RuleCondition>,
              actions: Vec<RuleAction>| Rule {
        id: fixed_uuid(id),
        name: name.to_string(),
        description: None,
        is_active: true,
        priority,
        group_id: None,
        conditions_json: serde_json::to_string(&conditions).unwrap(),
        actions_json: serde_json::to_string(&actions).unwrap(),
        created_at: now,
        updated_at: now,
    };

    vec![
        mk(
            "d1111111-0000-0000-0000-000000000001",
            "Coffee shops",
            10,
            vec![RuleCondition::DescriptionContains("coffee".into())],
            vec![
                RuleAction::SetCategory("Dining Out".into()),
                RuleAction::SetBudget(dining_budget),
            ],
        ),
        mk(
            "d1111111-0000-0000-0000-000000000002",
            "Groceries",
            20,
            vec![RuleCondition::DescriptionContains("freshmart".into())],
            vec![
                RuleAction::SetCategory("Groceries".into()),
                RuleAction::SetBudget(groceries_budget),
            ],
        ),
        mk(
            "d1111111-0000-0000-0000-000000000003",
            "Payroll",
            10,
            vec![RuleCondition::DescriptionContains("payroll".into())],
            vec![RuleAction::SetCategory("Income".into())],
        ),
        mk(
            "d1111111-0000-0000-0000-000000000004",
            "Rent",
            30,
            vec![RuleCondition::DestinationNameEquals("Hillside Properties".into())],
            vec![
                RuleAction::SetCategory("Housing".into()),
                RuleAction::SetBudget(housing_budget),
                RuleAction::SetDescription("Monthly rent".into()),
            ],
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::UNCATEGORIZED;

    #[test]
    fn test_demo_transactions_start_uncategorized() {
        let txs = generate_demo_transactions();
        assert!(!txs.is_empty());
        assert!(txs.iter().all(|t| t.category == UNCATEGORIZED));
    }

    #[test]
    fn test_demo_rules_decode() {
        for rule in generate_demo_rules() {
            let details = rule.details().unwrap();
            assert!(!details.conditions.is_empty());
            assert!(!details.actions.is_empty());
        }
    }
}
