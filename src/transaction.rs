use crate::error::Result;
use crate::schema::TransactionType;
use crate::utils::{parse_iso_date, validate_amount};
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Serialize;

/// Anything that can be coerced into a calendar date: a `NaiveDate` or an ISO `YYYY-MM-DD` string.
pub trait IntoStatementDate {
    fn into_statement_date(self) -> Result<NaiveDate>;
}

impl IntoStatementDate for NaiveDate {
    fn into_statement_date(self) -> Result<NaiveDate> {
        Ok(self)
    }
}

impl IntoStatementDate for &NaiveDate {
    fn into_statement_date(self) -> Result<NaiveDate> {
        Ok(*self)
    }
}

impl IntoStatementDate for &str {
    fn into_statement_date(self) -> Result<NaiveDate> {
        parse_iso_date(self)
    }
}

impl IntoStatementDate for String {
    fn into_statement_date(self) -> Result<NaiveDate> {
        parse_iso_date(&self)
    }
}

impl IntoStatementDate for &String {
    fn into_statement_date(self) -> Result<NaiveDate> {
        parse_iso_date(self)
    }
}

/// A single classified ledger entry. Immutable once constructed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, JsonSchema)]
pub struct Transaction {
    date: NaiveDate,
    description: String,
    amount: Decimal,
    category: String,
    transaction_type: TransactionType,
}

impl Transaction {
    pub fn new(
        date: impl IntoStatementDate,
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        transaction_type: TransactionType,
    ) -> Result<Self> {
        let date = date.into_statement_date()?;
        let amount = validate_amount("amount", amount)?;

        Ok(Self {
            date,
            description: description.into(),
            amount,
            category: category.into(),
            transaction_type,
        })
    }

    /// Builds a transaction from an untyped kind string such as `"cost_of_sales"`.
    pub fn parse(
        date: impl IntoStatementDate,
        description: impl Into<String>,
        amount: Decimal,
        category: impl Into<String>,
        transaction_type: &str,
    ) -> Result<Self> {
        let transaction_type = transaction_type.parse::<TransactionType>()?;
        Self::new(date, description, amount, category, transaction_type)
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn description(&self) -> &str {
        &self.description
    }

    pub fn amount(&self) -> Decimal {
        self.amount
    }

    pub fn category(&self) -> &str {
        &self.category
    }

    pub fn transaction_type(&self) -> TransactionType {
        self.transaction_type
    }
}
