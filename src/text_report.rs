use crate::aggregator::AggregateResult;
use crate::statement::IncomeStatement;
use crate::utils::format_currency;
use rust_decimal::Decimal;

fn line(out: &mut String, label: &str, amount: Decimal) {
    out.push_str(&format!("{}: {}\n", label, format_currency(amount)));
}

/// Renders the plain-text statement. Section order is fixed.
pub fn render_text(statement: &IncomeStatement, totals: &AggregateResult) -> String {
    let mut out = String::new();

    out.push_str(statement.business_name());
    out.push('\n');
    out.push_str("Income Statement\n");
    out.push_str(&format!("For the period: {}\n", statement.period().label()));
    out.push('\n');

    out.push_str("REVENUE:\n");
    for (category, amount) in totals.revenue_by_category.iter() {
        line(&mut out, category, amount);
    }
    line(&mut out, "Total Revenue", totals.total_revenue);
    out.push('\n');

    out.push_str("COST OF SALES:\n");
    for entry in &totals.cost_of_sales_breakdown {
        line(&mut out, &entry.label, entry.amount);
    }
    line(&mut out, "Total Cost of Sales", totals.total_cost_of_sales);
    out.push('\n');

    line(&mut out, "GROSS PROFIT", totals.gross_profit);
    out.push('\n');

    out.push_str("EXPENSES:\n");
    for (category, amount) in totals.expense_by_category.iter() {
        line(&mut out, category, amount);
    }
    line(&mut out, "Total Expenses", totals.total_expenses);
    out.push('\n');

    line(&mut out, "Net Income", totals.net_income);

    out
}
