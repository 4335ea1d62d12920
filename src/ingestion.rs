use crate::error::{IncomeStatementError, Result};
use crate::schema::{StatementConfig, TransactionInput};
use crate::statement::IncomeStatement;
use crate::transaction::Transaction;

impl TryFrom<&TransactionInput> for Transaction {
    type Error = IncomeStatementError;

    fn try_from(input: &TransactionInput) -> Result<Self> {
        Transaction::parse(
            input.date.as_str(),
            input.description.clone(),
            input.amount,
            input.category.clone(),
            &input.transaction_type,
        )
    }
}

/// Validates every tuple up front. Fails on the first bad entry, naming its index,
/// so no partially-converted batch is ever returned.
pub fn convert_inputs(inputs: &[TransactionInput]) -> Result<Vec<Transaction>> {
    inputs
        .iter()
        .enumerate()
        .map(|(idx, input)| {
            Transaction::try_from(input).map_err(|e| match e {
                IncomeStatementError::Validation { field, details } => {
                    IncomeStatementError::Validation {
                        field: format!("transactions[{}].{}", idx, field),
                        details,
                    }
                }
                IncomeStatementError::Parse { input, details } => IncomeStatementError::Parse {
                    input,
                    details: format!("transaction #{}: {}", idx, details),
                },
                other => other,
            })
        })
        .collect()
}

pub fn build_statement(config: &StatementConfig) -> Result<IncomeStatement> {
    let mut statement = IncomeStatement::with_beginning_inventory(
        config.business_name.clone(),
        config.start_date.as_str(),
        config.end_date.as_str(),
        config.beginning_inventory,
    )?;

    if let Some(ending_inventory) = config.ending_inventory {
        statement.set_ending_inventory(ending_inventory)?;
    }

    let transactions = convert_inputs(&config.transactions)?;
    statement.add_transactions(transactions);

    Ok(statement)
}
