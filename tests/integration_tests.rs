use chrono::NaiveDate;
use income_statement_engine::*;
use rust_decimal::Decimal;
use rust_decimal_macros::dec;

fn sample_transactions() -> anyhow::Result<Vec<Transaction>> {
    let rows = [
        ("2023-01-05", "Product Sale - Customer A", dec!(1500.00), "Sales", "revenue"),
        ("2023-01-12", "Consulting Service", dec!(2500.00), "Services", "revenue"),
        ("2023-01-08", "Raw Materials Purchase", dec!(700.00), "Plus goods purchased or manufactured", "cost_of_sales"),
        ("2023-01-10", "Inventory Purchase", dec!(900.00), "Plus goods purchased or manufactured", "cost_of_sales"),
        ("2023-01-15", "Office Rent", dec!(800.00), "Rent", "expense"),
        ("2023-01-20", "Product Sale - Customer B", dec!(1200.00), "Sales", "revenue"),
        ("2023-01-22", "Utilities", dec!(150.00), "Utilities", "expense"),
        ("2023-01-25", "Salaries", dec!(3000.00), "Payroll", "expense"),
        ("2023-02-05", "Product Sale - Customer C", dec!(1800.00), "Sales", "revenue"),
        ("2023-02-10", "Marketing Campaign", dec!(500.00), "Marketing", "expense"),
        ("2023-02-15", "Office Supplies", dec!(200.00), "Supplies", "expense"),
        ("2023-02-20", "Online Course Sales", dec!(3500.00), "Services", "revenue"),
        ("2023-02-28", "Equipment Purchase", dec!(1200.00), "Equipment", "expense"),
    ];

    let mut transactions = Vec::new();
    for (date, description, amount, category, kind) in rows {
        transactions.push(Transaction::parse(date, description, amount, category, kind)?);
    }
    Ok(transactions)
}

fn q1_statement(ending_inventory: Option<Decimal>) -> anyhow::Result<IncomeStatement> {
    let mut statement = IncomeStatement::with_beginning_inventory(
        "Sample Business LLC",
        "2023-01-01",
        "2023-03-31",
        dec!(2000.00),
    )?;
    if let Some(value) = ending_inventory {
        statement.set_ending_inventory(value)?;
    }
    statement.add_transactions(sample_transactions()?);
    Ok(statement)
}

#[test]
fn test_january_scenario() {
    let mut statement = IncomeStatement::new("Scenario Co", "2025-01-01", "2025-01-31").unwrap();
    statement.add_transaction(
        Transaction::parse("2025-01-05", "Sale", dec!(1500), "Sales", "revenue").unwrap(),
    );
    statement.add_transaction(
        Transaction::parse("2025-01-10", "Rent", dec!(800), "Rent", "expense").unwrap(),
    );

    let totals = statement.compute_totals().unwrap();
    assert_eq!(totals.total_revenue, dec!(1500));
    assert_eq!(totals.total_cost_of_sales, dec!(0));
    assert_eq!(totals.gross_profit, dec!(1500));
    assert_eq!(totals.total_expenses, dec!(800));
    assert_eq!(totals.net_income, dec!(700));
}

#[test]
fn test_sample_business_with_ending_inventory() {
    let statement = q1_statement(Some(dec!(1500.00))).unwrap();
    let totals = statement.compute_totals().unwrap();

    assert_eq!(totals.total_revenue, dec!(10500));
    assert_eq!(totals.total_cost_of_sales, dec!(2100));
    assert_eq!(totals.gross_profit, dec!(8400));
    assert_eq!(totals.total_expenses, dec!(5850));
    assert_eq!(totals.net_income, dec!(2550));

    let breakdown: Vec<(&str, Decimal)> = totals
        .cost_of_sales_breakdown
        .iter()
        .map(|line| (line.label.as_str(), line.amount))
        .collect();
    assert_eq!(
        breakdown,
        vec![
            ("Beginning Inventory", dec!(2000)),
            ("Plus goods purchased or manufactured", dec!(1600)),
            ("TOTAL GOODS AVAILABLE", dec!(3600)),
            ("Less: Ending Inventory", dec!(-1500)),
        ]
    );
    totals.verify().unwrap();
}

#[test]
fn test_sample_business_without_ending_inventory() {
    let statement = q1_statement(None).unwrap();
    let totals = statement.compute_totals().unwrap();

    assert_eq!(totals.total_cost_of_sales, dec!(1600));
    assert_eq!(totals.cost_of_sales_breakdown.len(), 1);
    assert_eq!(
        totals.cost_of_sales_breakdown[0].label,
        "Plus goods purchased or manufactured"
    );
    assert_eq!(totals.cost_of_sales_method, CostOfSalesMethod::DirectPurchases);
}

#[test]
fn test_invalid_type_is_never_appended() {
    let mut statement = IncomeStatement::new("X", "2025-01-01", "2025-01-31").unwrap();

    let result = Transaction::parse("2025-01-05", "Refund", dec!(50), "Sales", "refund");
    assert!(matches!(result, Err(IncomeStatementError::Validation { .. })));

    if let Ok(transaction) = result {
        statement.add_transaction(transaction);
    }
    assert!(statement.transactions().is_empty());
    assert_eq!(statement.compute_totals().unwrap().total_revenue, Decimal::ZERO);
}

#[test]
fn test_day_after_end_is_excluded() {
    let mut statement = IncomeStatement::new("X", "2025-01-01", "2025-01-31").unwrap();
    let end = statement.period().end_date();
    let day_after = end.succ_opt().unwrap();

    statement.add_transaction(
        Transaction::new(day_after, "Late", dec!(5000), "Sales", TransactionType::Revenue).unwrap(),
    );
    statement.add_transaction(
        Transaction::new(end, "On time", dec!(10), "Sales", TransactionType::Revenue).unwrap(),
    );

    let totals = statement.compute_totals().unwrap();
    assert_eq!(totals.total_revenue, dec!(10));
    assert_eq!(statement.transactions().len(), 1);
}

#[test]
fn test_out_of_window_transactions_never_affect_totals() {
    let inside = q1_statement(Some(dec!(1500))).unwrap().compute_totals().unwrap();

    let mut noisy = q1_statement(Some(dec!(1500))).unwrap();
    let outside_dates = [
        NaiveDate::from_ymd_opt(2022, 12, 31).unwrap(),
        NaiveDate::from_ymd_opt(2023, 4, 1).unwrap(),
        NaiveDate::from_ymd_opt(2030, 1, 1).unwrap(),
    ];
    for date in outside_dates {
        for kind in TransactionType::ALL {
            noisy.add_transaction(
                Transaction::new(date, "Noise", dec!(12345.67), "Noise", kind).unwrap(),
            );
        }
    }

    assert_eq!(noisy.compute_totals().unwrap(), inside);
}

#[test]
fn test_identities_hold_across_many_sets() {
    let kinds = TransactionType::ALL;
    let mut statement = IncomeStatement::with_beginning_inventory(
        "Identity Co",
        "2024-01-01",
        "2024-12-31",
        dec!(333.33),
    )
    .unwrap();

    for i in 0..200u32 {
        let date = NaiveDate::from_ymd_opt(2024, 1 + (i % 12), 1 + (i % 28)).unwrap();
        let amount = Decimal::new(i64::from(i) * 137 + 1, 2);
        let kind = kinds[(i % 4) as usize];
        let category = format!("Category {}", i % 7);
        statement.add_transaction(Transaction::new(date, "Generated", amount, category, kind).unwrap());

        if i == 100 {
            statement.set_ending_inventory(dec!(1000.01)).unwrap();
        }

        let totals = statement.compute_totals().unwrap();
        assert_eq!(totals.total_revenue - totals.total_cost_of_sales, totals.gross_profit);
        assert_eq!(totals.gross_profit - totals.total_expenses, totals.net_income);
        totals.verify().unwrap();
    }
}

#[test]
fn test_compute_totals_idempotent() {
    let statement = q1_statement(Some(dec!(1500))).unwrap();
    let first = statement.compute_totals().unwrap();
    let second = statement.compute_totals().unwrap();

    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}

#[test]
fn test_text_and_workbook_agree() {
    let statement = q1_statement(Some(dec!(1500))).unwrap();
    let totals = statement.compute_totals().unwrap();
    let text = render_text(&statement, &totals);
    let layout = SheetLayout::build(&statement, &totals);

    for (text_label, sheet_label, value) in [
        ("Total Revenue", "Total Revenue", totals.total_revenue),
        ("Total Cost of Sales", "Total Cost of Sales", totals.total_cost_of_sales),
        ("GROSS PROFIT", "GROSS PROFIT", totals.gross_profit),
        ("Total Expenses", "Total Expenses", totals.total_expenses),
        ("Net Income", "NET INCOME", totals.net_income),
    ] {
        assert!(text.contains(&format!("{}: {}", text_label, format_currency(value))));
        let (_, row) = layout.find_row(sheet_label).unwrap();
        assert_eq!(row.amount(), Some(value));
    }
}

#[test]
fn test_workbook_written_from_config() {
    let json = r#"{
        "business_name": "Json Bakery",
        "start_date": "2024-06-01",
        "end_date": "2024-06-30",
        "beginning_inventory": "250.00",
        "ending_inventory": "100.00",
        "transactions": [
            {"date": "2024-06-02", "description": "Bread", "amount": "1200.50", "category": "Sales", "transaction_type": "revenue"},
            {"date": "2024-06-03", "description": "Flour", "amount": "300", "category": "Ingredients", "transaction_type": "cost_of_sales"},
            {"date": "2024-06-04", "description": "Stock count", "amount": "100", "category": "Stock", "transaction_type": "inventory"},
            {"date": "2024-07-01", "description": "Next month", "amount": "50", "category": "Sales", "transaction_type": "revenue"}
        ]
    }"#;
    let config = StatementConfig::from_json(json).unwrap();

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("out").join("bakery.xlsx");
    let report = process_statement_with_workbook(&config, &path).unwrap();

    assert!(path.exists());
    assert_eq!(report.transactions_processed, 3);
    assert_eq!(report.transactions_excluded, 1);
    assert_eq!(report.totals.total_cost_of_sales, dec!(450));
    assert_eq!(report.totals.net_income, dec!(750.50));
    assert!(report.statement.contains("Ingredients: $300.00"));

    let descriptions: Vec<&str> = report.transactions.iter().map(|t| t.description()).collect();
    assert_eq!(descriptions, vec!["Bread", "Flour", "Stock count"]);
}

#[test]
fn test_unwritable_workbook_path_surfaces_io_error() {
    let dir = tempfile::tempdir().unwrap();
    let blocker = dir.path().join("not_a_dir");
    std::fs::write(&blocker, b"file").unwrap();

    let statement = q1_statement(None).unwrap();
    let err = statement
        .render_workbook(blocker.join("statement.xlsx"))
        .unwrap_err();
    assert!(matches!(err, IncomeStatementError::Io(_)));
}

#[test]
fn test_extreme_amounts_are_rejected_or_summed_exactly() {
    let mut statement = IncomeStatement::new("Big Co", "2025-01-01", "2025-01-31").unwrap();

    let err = Transaction::new("2025-01-05", "Huge", Decimal::MAX, "Sales", TransactionType::Revenue)
        .unwrap_err();
    assert!(matches!(err, IncomeStatementError::Validation { .. }));

    for _ in 0..2 {
        statement.add_transaction(
            Transaction::new("2025-01-05", "Large", MAX_AMOUNT, "Sales", TransactionType::Revenue)
                .unwrap(),
        );
    }
    statement.add_transaction(
        Transaction::new("2025-01-06", "Large", MAX_AMOUNT, "Payroll", TransactionType::Expense)
            .unwrap(),
    );

    let totals = statement.compute_totals().unwrap();
    assert_eq!(totals.total_revenue, MAX_AMOUNT * dec!(2));
    assert_eq!(totals.net_income, MAX_AMOUNT);
    totals.verify().unwrap();
    assert!(statement.render_text().unwrap().contains("Net Income: $1,000,000,000,000,000.00"));
}

#[test]
fn test_config_amount_above_ceiling_is_rejected() {
    let json = format!(
        r#"{{
        "business_name": "Big Co",
        "start_date": "2025-01-01",
        "end_date": "2025-01-31",
        "transactions": [
            {{"date": "2025-01-05", "description": "Huge", "amount": "{}", "category": "Sales", "transaction_type": "revenue"}}
        ]
    }}"#,
        Decimal::MAX
    );
    let config = StatementConfig::from_json(&json).unwrap();

    let err = process_statement(&config).unwrap_err();
    assert!(matches!(
        err,
        IncomeStatementError::Validation { ref field, .. } if field == "transactions[0].amount"
    ));
}
