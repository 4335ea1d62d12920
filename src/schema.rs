use crate::error::{IncomeStatementError, Result};
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum TransactionType {
    #[schemars(description = "Money earned from selling goods or services (e.g., product sales, consulting fees)")]
    Revenue,

    #[schemars(
        description = "Operating costs not tied to producing goods: rent, utilities, payroll, marketing, supplies, equipment"
    )]
    Expense,

    #[schemars(
        description = "Direct costs of goods sold: raw materials, inventory purchases, manufacturing labor"
    )]
    CostOfSales,

    #[schemars(
        description = "Inventory movements recorded for classification only. Accepted but not aggregated into any total."
    )]
    Inventory,
}

impl TransactionType {
    pub const ALL: [TransactionType; 4] = [
        TransactionType::Revenue,
        TransactionType::Expense,
        TransactionType::CostOfSales,
        TransactionType::Inventory,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            TransactionType::Revenue => "revenue",
            TransactionType::Expense => "expense",
            TransactionType::CostOfSales => "cost_of_sales",
            TransactionType::Inventory => "inventory",
        }
    }
}

impl fmt::Display for TransactionType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for TransactionType {
    type Err = IncomeStatementError;

    fn from_str(s: &str) -> Result<Self> {
        Self::ALL
            .into_iter()
            .find(|kind| kind.as_str() == s)
            .ok_or_else(|| {
                IncomeStatementError::validation(
                    "transaction_type",
                    format!(
                        "'{}' is not one of revenue, expense, cost_of_sales, inventory",
                        s
                    ),
                )
            })
    }
}

/// A transaction tuple as produced by the ingestion layer, before validation.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct TransactionInput {
    #[schemars(description = "Transaction date in YYYY-MM-DD format")]
    pub date: String,

    #[schemars(description = "Free-text description of the transaction (e.g., 'Office Rent', 'Product Sale - Customer A')")]
    pub description: String,

    #[schemars(
        description = "Non-negative amount. The sign is implied by transaction_type, never by the amount itself."
    )]
    pub amount: Decimal,

    #[schemars(description = "Line item the amount is grouped under (e.g., 'Sales', 'Rent', 'Payroll')")]
    pub category: String,

    #[schemars(description = "One of: revenue, expense, cost_of_sales, inventory")]
    pub transaction_type: String,
}

/// A complete statement request: reporting window, inventory figures and transactions.
#[derive(Debug, Clone, Serialize, Deserialize, JsonSchema)]
pub struct StatementConfig {
    #[schemars(description = "The legal or trading name of the business")]
    pub business_name: String,

    #[schemars(description = "First day of the reporting period (inclusive), YYYY-MM-DD")]
    pub start_date: String,

    #[schemars(description = "Last day of the reporting period (inclusive), YYYY-MM-DD")]
    pub end_date: String,

    #[serde(default)]
    #[schemars(description = "Inventory on hand at the start of the period. Defaults to 0.")]
    pub beginning_inventory: Decimal,

    #[serde(default)]
    #[schemars(
        description = "Inventory on hand at the end of the period. When present, cost of sales is computed as beginning inventory + purchases - ending inventory. Omit when unknown."
    )]
    pub ending_inventory: Option<Decimal>,

    #[serde(default)]
    #[schemars(
        description = "Transactions to include. Entries dated outside the reporting period are ignored."
    )]
    pub transactions: Vec<TransactionInput>,
}

impl StatementConfig {
    pub fn generate_json_schema() -> schemars::schema::RootSchema {
        schemars::schema_for!(StatementConfig)
    }

    pub fn schema_as_json() -> std::result::Result<String, serde_json::Error> {
        let schema = Self::generate_json_schema();
        serde_json::to_string_pretty(&schema)
    }

    pub fn from_json(json: &str) -> Result<Self> {
        Ok(serde_json::from_str(json)?)
    }
}
