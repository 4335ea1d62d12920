//! # Income Statement Engine
//!
//! A library for turning classified transactions into a period-bounded income
//! statement, rendered both as plain text and as a styled `.xlsx` workbook.
//!
//! ## Core Concepts
//!
//! - **Transaction**: An immutable, validated ledger entry (date, description, amount, category, kind)
//! - **Reporting Period**: The inclusive `[start_date, end_date]` window; entries outside it are ignored
//! - **Cost of Sales**: Purchases alone, or beginning inventory + purchases - ending inventory once ending inventory is known
//! - **Gross Profit**: Total revenue minus total cost of sales
//! - **Net Income**: Gross profit minus total expenses
//!
//! All amounts are `rust_decimal::Decimal`, so the statement identities hold exactly.
//!
//! ## Example
//!
//! ```rust,ignore
//! use income_statement_engine::*;
//! use rust_decimal_macros::dec;
//!
//! let mut statement = IncomeStatement::new("Corner Shop", "2025-01-01", "2025-01-31")?;
//! statement.add_transactions(vec![
//!     Transaction::new("2025-01-05", "Sale", dec!(1500), "Sales", TransactionType::Revenue)?,
//!     Transaction::new("2025-01-10", "Rent", dec!(800), "Rent", TransactionType::Expense)?,
//! ]);
//!
//! let totals = statement.compute_totals()?;
//! assert_eq!(totals.net_income, dec!(700));
//!
//! println!("{}", statement.render_text()?);
//! statement.render_workbook("output/income_statement.xlsx")?;
//! ```

pub mod aggregator;
pub mod error;
pub mod ingestion;
pub mod schema;
pub mod statement;
pub mod text_report;
pub mod transaction;
pub mod utils;
pub mod workbook;

pub use aggregator::{
    AggregateResult, Aggregator, CategoryTotals, CostOfSalesLine, CostOfSalesMethod,
    BEGINNING_INVENTORY_LABEL, ENDING_INVENTORY_LABEL, TOTAL_GOODS_AVAILABLE_LABEL,
};
pub use error::{IncomeStatementError, Result};
pub use ingestion::{build_statement, convert_inputs};
pub use schema::*;
pub use statement::{IncomeStatement, StatementPeriod, StatementReport};
pub use text_report::render_text;
pub use transaction::{IntoStatementDate, Transaction};
pub use utils::*;
pub use workbook::{write_workbook, SheetLayout};

use log::{debug, info};
use std::path::Path;

pub struct StatementProcessor;

impl StatementProcessor {
    pub fn process(config: &StatementConfig) -> Result<StatementReport> {
        let statement = Self::ingest(config)?;
        statement.report()
    }

    pub fn process_with_workbook(
        config: &StatementConfig,
        path: impl AsRef<Path>,
    ) -> Result<StatementReport> {
        let statement = Self::ingest(config)?;
        let workbook_path = statement.render_workbook(path)?;

        let mut report = statement.report()?;
        report.workbook_path = Some(workbook_path);
        Ok(report)
    }

    fn ingest(config: &StatementConfig) -> Result<IncomeStatement> {
        info!(
            "Building income statement for {} ({} to {})",
            config.business_name, config.start_date, config.end_date
        );

        let statement = build_statement(config)?;

        debug!(
            "{} transactions accepted, {} outside the reporting period",
            statement.transactions().len(),
            statement.excluded_count()
        );

        Ok(statement)
    }
}

pub fn process_statement(config: &StatementConfig) -> Result<StatementReport> {
    StatementProcessor::process(config)
}

pub fn process_statement_with_workbook(
    config: &StatementConfig,
    path: impl AsRef<Path>,
) -> Result<StatementReport> {
    StatementProcessor::process_with_workbook(config, path)
}
