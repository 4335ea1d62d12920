use income_statement_engine::*;
use rust_decimal_macros::dec;

fn main() -> std::result::Result<(), Box<dyn std::error::Error>> {
    let mut statement = IncomeStatement::with_beginning_inventory(
        "Sample Business LLC",
        "2023-01-01",
        "2023-03-31",
        dec!(2000.00),
    )?;

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
        ("2023-02-08", "Manufacturing Labor", dec!(600.00), "Plus goods purchased or manufactured", "cost_of_sales"),
        ("2023-02-10", "Marketing Campaign", dec!(500.00), "Marketing", "expense"),
        ("2023-02-15", "Office Supplies", dec!(200.00), "Supplies", "expense"),
        ("2023-02-20", "Online Course Sales", dec!(3500.00), "Services", "revenue"),
        ("2023-02-28", "Equipment Purchase", dec!(1200.00), "Equipment", "expense"),
    ];

    statement.set_ending_inventory(dec!(1500.00))?;
    for (date, description, amount, category, kind) in rows {
        statement.add_transaction(Transaction::parse(date, description, amount, category, kind)?);
    }

    println!("{}", statement.render_text()?);

    let path = statement.render_workbook("output/income_statement.xlsx")?;
    println!("Income statement exported to: {}", path.display());

    println!("{}", serde_json::to_string_pretty(&statement.compute_totals()?)?);

    Ok(())
}
