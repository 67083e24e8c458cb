use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

/// An invoice payment made by a property.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Payment {
    pub id: String,
    pub invoice_code: Option<String>,
    pub invoice: Option<String>,
    pub amount_paid: i64,
    pub amount_due: i64,
    pub date: NaiveDate,
    pub invoice_period_start_date: Option<NaiveDate>,
    pub invoice_period_end_date: Option<NaiveDate>,
    pub payment_method: PaymentMethod,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum PaymentMethod {
    Ach,
    Credit,
    Debit,
    Wire,
    Other,
}

/// Sort payments by the end of their invoice period, latest first.
///
/// Payments without a period end keep their relative order after the dated
/// ones.
pub fn newest_first(payments: &mut [Payment]) {
    payments.sort_by(|a, b| match (a.invoice_period_end_date, b.invoice_period_end_date) {
        (Some(a), Some(b)) => b.cmp(&a),
        (Some(_), None) => std::cmp::Ordering::Less,
        (None, Some(_)) => std::cmp::Ordering::Greater,
        (None, None) => std::cmp::Ordering::Equal,
    });
}
