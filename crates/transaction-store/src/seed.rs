//! Illustrative records inserted into empty stores.

use chrono::{DateTime, Duration, SubsecRound, Utc};
use rust_decimal::Decimal;

use crate::{Transaction, TransactionId, TransactionStatus, TransactionType};

fn sample(
    account_id: &str,
    amount: Decimal,
    transaction_type: TransactionType,
    description: &str,
    created_at: DateTime<Utc>,
) -> Transaction {
    Transaction {
        id: TransactionId::generate(),
        account_id: account_id.to_string(),
        amount,
        transaction_type,
        description: description.to_string(),
        created_at: created_at.trunc_subsecs(6),
        status: TransactionStatus::Completed,
    }
}

/// Sample records for an empty durable store.
pub fn durable_samples(now: DateTime<Utc>) -> Vec<Transaction> {
    vec![
        sample(
            "ACC001",
            Decimal::new(150000, 2),
            TransactionType::Credit,
            "Monthly salary",
            now - Duration::days(3),
        ),
        sample(
            "ACC001",
            Decimal::new(-25075, 2),
            TransactionType::Debit,
            "Grocery shopping",
            now - Duration::days(2),
        ),
        sample(
            "ACC002",
            Decimal::new(50000, 2),
            TransactionType::Credit,
            "Incoming transfer",
            now - Duration::days(1),
        ),
    ]
}

/// Sample records for a store running without its database.
pub fn fallback_samples(now: DateTime<Utc>) -> Vec<Transaction> {
    vec![
        sample(
            "ACC001",
            Decimal::new(25075, 2),
            TransactionType::Credit,
            "Initial deposit (fallback)",
            now - Duration::days(2),
        ),
        sample(
            "ACC002",
            Decimal::new(-8950, 2),
            TransactionType::Debit,
            "Online purchase (fallback)",
            now - Duration::hours(5),
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use rust_decimal_macros::dec;

    #[test]
    fn samples_are_completed_and_in_the_past() {
        let now = Utc::now();
        for tx in durable_samples(now).iter().chain(fallback_samples(now).iter()) {
            assert_eq!(tx.status, TransactionStatus::Completed);
            assert!(tx.created_at < now);
        }
    }

    #[test]
    fn debit_samples_carry_negative_amounts() {
        let samples = durable_samples(Utc::now());
        assert_eq!(samples.len(), 3);
        assert_eq!(samples[1].amount, dec!(-250.75));
        assert_eq!(samples[1].transaction_type, TransactionType::Debit);

        let fallback = fallback_samples(Utc::now());
        assert_eq!(fallback.len(), 2);
        assert_eq!(fallback[0].amount, dec!(250.75));
    }
}
