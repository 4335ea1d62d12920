use crate::aggregator::{AggregateResult, Aggregator};
use crate::error::{IncomeStatementError, Result};
use crate::text_report::render_text;
use crate::transaction::{IntoStatementDate, Transaction};
use crate::utils::{format_period, validate_amount};
use crate::workbook::write_workbook;
use chrono::NaiveDate;
use rust_decimal::Decimal;
use schemars::JsonSchema;
use serde::Serialize;
use std::path::{Path, PathBuf};

/// Inclusive `[start_date, end_date]` reporting window.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct StatementPeriod {
    start_date: NaiveDate,
    end_date: NaiveDate,
}

impl StatementPeriod {
    pub fn new(start_date: impl IntoStatementDate, end_date: impl IntoStatementDate) -> Result<Self> {
        let start_date = start_date.into_statement_date()?;
        let end_date = end_date.into_statement_date()?;

        if start_date > end_date {
            return Err(IncomeStatementError::validation(
                "period",
                format!(
                    "start_date {} is after end_date {}",
                    start_date, end_date
                ),
            ));
        }

        Ok(Self {
            start_date,
            end_date,
        })
    }

    pub fn start_date(&self) -> NaiveDate {
        self.start_date
    }

    pub fn end_date(&self) -> NaiveDate {
        self.end_date
    }

    pub fn contains(&self, date: NaiveDate) -> bool {
        self.start_date <= date && date <= self.end_date
    }

    pub fn label(&self) -> String {
        format_period(self.start_date, self.end_date)
    }
}

/// Statement builder for one business and one reporting period.
///
/// Owns its transaction list exclusively. One instance per request or conversation;
/// callers sharing an instance across threads must serialize access themselves.
#[derive(Debug, Clone)]
pub struct IncomeStatement {
    business_name: String,
    period: StatementPeriod,
    beginning_inventory: Decimal,
    ending_inventory: Option<Decimal>,
    transactions: Vec<Transaction>,
    excluded: usize,
}

impl IncomeStatement {
    pub fn new(
        business_name: impl Into<String>,
        start_date: impl IntoStatementDate,
        end_date: impl IntoStatementDate,
    ) -> Result<Self> {
        Self::with_beginning_inventory(business_name, start_date, end_date, Decimal::ZERO)
    }

    pub fn with_beginning_inventory(
        business_name: impl Into<String>,
        start_date: impl IntoStatementDate,
        end_date: impl IntoStatementDate,
        beginning_inventory: Decimal,
    ) -> Result<Self> {
        let period = StatementPeriod::new(start_date, end_date)?;
        let beginning_inventory = validate_amount("beginning_inventory", beginning_inventory)?;

        Ok(Self {
            business_name: business_name.into(),
            period,
            beginning_inventory,
            ending_inventory: None,
            transactions: Vec::new(),
            excluded: 0,
        })
    }

    /// Overwrites any previously set ending inventory.
    pub fn set_ending_inventory(&mut self, ending_inventory: Decimal) -> Result<()> {
        self.ending_inventory = Some(validate_amount("ending_inventory", ending_inventory)?);
        Ok(())
    }

    /// Appends the transaction if it falls inside the period; silently ignores it otherwise.
    pub fn add_transaction(&mut self, transaction: Transaction) {
        if self.period.contains(transaction.date()) {
            self.transactions.push(transaction);
        } else {
            self.excluded += 1;
        }
    }

    pub fn add_transactions(&mut self, transactions: impl IntoIterator<Item = Transaction>) {
        for transaction in transactions {
            self.add_transaction(transaction);
        }
    }

    pub fn compute_totals(&self) -> Result<AggregateResult> {
        Aggregator::new(self.beginning_inventory, self.ending_inventory)
            .aggregate(&self.transactions)
    }

    pub fn render_text(&self) -> Result<String> {
        Ok(render_text(self, &self.compute_totals()?))
    }

    /// Writes the statement workbook to `path`, creating parent directories, and returns the path.
    pub fn render_workbook(&self, path: impl AsRef<Path>) -> Result<PathBuf> {
        write_workbook(self, &self.compute_totals()?, path.as_ref())
    }

    pub fn report(&self) -> Result<StatementReport> {
        let totals = self.compute_totals()?;
        Ok(StatementReport {
            business_name: self.business_name.clone(),
            date_range: self.period.label(),
            transactions_processed: self.transactions.len(),
            transactions_excluded: self.excluded,
            transactions: self.transactions.clone(),
            statement: render_text(self, &totals),
            totals,
            workbook_path: None,
        })
    }

    pub fn business_name(&self) -> &str {
        &self.business_name
    }

    pub fn period(&self) -> StatementPeriod {
        self.period
    }

    pub fn beginning_inventory(&self) -> Decimal {
        self.beginning_inventory
    }

    pub fn ending_inventory(&self) -> Option<Decimal> {
        self.ending_inventory
    }

    pub fn transactions(&self) -> &[Transaction] {
        &self.transactions
    }

    /// How many offered transactions fell outside the period.
    pub fn excluded_count(&self) -> usize {
        self.excluded
    }
}

/// Everything a caller needs to answer a statement request, ready for JSON.
#[derive(Debug, Clone, Serialize, JsonSchema)]
pub struct StatementReport {
    pub business_name: String,
    pub date_range: String,
    pub transactions_processed: usize,
    pub transactions_excluded: usize,
    /// Accepted in-period transactions, in arrival order.
    pub transactions: Vec<Transaction>,
    pub totals: AggregateResult,
    pub statement: String,
    pub workbook_path: Option<PathBuf>,
}

impl StatementReport {
    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}
