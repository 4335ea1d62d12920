use crate::error::{IncomeStatementError, Result};
use crate::schema::TransactionType;
use crate::transaction::Transaction;
use log::debug;
use rust_decimal::Decimal;
use schemars::gen::SchemaGenerator;
use schemars::schema::Schema;
use schemars::JsonSchema;
use serde::de::{self, MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::BTreeMap;
use std::fmt;

pub const BEGINNING_INVENTORY_LABEL: &str = "Beginning Inventory";
pub const TOTAL_GOODS_AVAILABLE_LABEL: &str = "TOTAL GOODS AVAILABLE";
pub const ENDING_INVENTORY_LABEL: &str = "Less: Ending Inventory";

/// Per-category sums that iterate in the order each category was first seen.
///
/// Serializes as a JSON object whose keys keep that order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CategoryTotals {
    entries: Vec<(String, Decimal)>,
}

impl CategoryTotals {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add(&mut self, category: &str, amount: Decimal) -> Result<()> {
        match self.entries.iter_mut().find(|(name, _)| name == category) {
            Some((_, total)) => {
                *total = checked_add(*total, amount, &format!("category {}", category))?
            }
            None => self.entries.push((category.to_string(), amount)),
        }
        Ok(())
    }

    pub fn get(&self, category: &str) -> Option<Decimal> {
        self.entries
            .iter()
            .find(|(name, _)| name == category)
            .map(|(_, amount)| *amount)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, Decimal)> + '_ {
        self.entries
            .iter()
            .map(|(name, amount)| (name.as_str(), *amount))
    }

    pub fn categories(&self) -> impl Iterator<Item = &str> + '_ {
        self.entries.iter().map(|(name, _)| name.as_str())
    }

    pub fn total(&self) -> Result<Decimal> {
        checked_sum(self.entries.iter().map(|(_, amount)| *amount), "category total")
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl Serialize for CategoryTotals {
    fn serialize<S: Serializer>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (category, amount) in &self.entries {
            map.serialize_entry(category, amount)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for CategoryTotals {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        struct CategoryTotalsVisitor;

        impl<'de> Visitor<'de> for CategoryTotalsVisitor {
            type Value = CategoryTotals;

            fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
                f.write_str("a map of category names to amounts")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> std::result::Result<Self::Value, A::Error> {
                let mut totals = CategoryTotals::new();
                while let Some((category, amount)) = access.next_entry::<String, Decimal>()? {
                    totals.add(&category, amount).map_err(de::Error::custom)?;
                }
                Ok(totals)
            }
        }

        deserializer.deserialize_map(CategoryTotalsVisitor)
    }
}

impl JsonSchema for CategoryTotals {
    fn schema_name() -> String {
        "CategoryTotals".to_string()
    }

    fn json_schema(gen: &mut SchemaGenerator) -> Schema {
        <BTreeMap<String, Decimal>>::json_schema(gen)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct CostOfSalesLine {
    pub label: String,
    pub amount: Decimal,
}

impl CostOfSalesLine {
    fn new(label: impl Into<String>, amount: Decimal) -> Self {
        Self {
            label: label.into(),
            amount,
        }
    }

    pub fn is_total_goods_available(&self) -> bool {
        self.label == TOTAL_GOODS_AVAILABLE_LABEL
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum CostOfSalesMethod {
    /// No ending inventory known: cost of sales is the sum of purchases.
    DirectPurchases,
    /// Beginning inventory + purchases - ending inventory.
    PeriodicInventory,
}

/// Computed totals for one reporting period. Rebuilt on every call, never cached.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct AggregateResult {
    pub revenue_by_category: CategoryTotals,
    pub cost_of_sales_breakdown: Vec<CostOfSalesLine>,
    pub expense_by_category: CategoryTotals,
    pub cost_of_sales_method: CostOfSalesMethod,
    pub total_revenue: Decimal,
    pub total_cost_of_sales: Decimal,
    pub gross_profit: Decimal,
    pub total_expenses: Decimal,
    pub net_income: Decimal,
}

impl AggregateResult {
    /// Re-derives every scalar from the breakdowns and checks the statement identities.
    pub fn verify(&self) -> Result<()> {
        check_identity("total_revenue", self.revenue_by_category.total()?, self.total_revenue)?;
        check_identity("total_expenses", self.expense_by_category.total()?, self.total_expenses)?;

        match self.cost_of_sales_method {
            CostOfSalesMethod::DirectPurchases => {
                let purchases = checked_sum(
                    self.cost_of_sales_breakdown.iter().map(|l| l.amount),
                    "total_cost_of_sales",
                )?;
                check_identity("total_cost_of_sales", purchases, self.total_cost_of_sales)?;
            }
            CostOfSalesMethod::PeriodicInventory => {
                let lines = &self.cost_of_sales_breakdown;
                let n = lines.len();
                let well_formed = n >= 3
                    && lines[0].label == BEGINNING_INVENTORY_LABEL
                    && lines[n - 2].label == TOTAL_GOODS_AVAILABLE_LABEL
                    && lines[n - 1].label == ENDING_INVENTORY_LABEL;
                if !well_formed {
                    return Err(IncomeStatementError::validation(
                        "cost_of_sales_breakdown",
                        "periodic inventory breakdown must start with Beginning Inventory and end with TOTAL GOODS AVAILABLE and Less: Ending Inventory",
                    ));
                }

                let goods_available = checked_sum(
                    lines[..n - 2].iter().map(|l| l.amount),
                    "total_goods_available",
                )?;
                check_identity("total_goods_available", goods_available, lines[n - 2].amount)?;
                check_identity(
                    "total_cost_of_sales",
                    checked_add(lines[n - 2].amount, lines[n - 1].amount, "total_cost_of_sales")?,
                    self.total_cost_of_sales,
                )?;
            }
        }

        check_identity(
            "gross_profit",
            checked_sub(self.total_revenue, self.total_cost_of_sales, "gross_profit")?,
            self.gross_profit,
        )?;
        check_identity(
            "net_income",
            checked_sub(self.gross_profit, self.total_expenses, "net_income")?,
            self.net_income,
        )
    }
}

fn checked_add(lhs: Decimal, rhs: Decimal, what: &str) -> Result<Decimal> {
    lhs.checked_add(rhs)
        .ok_or_else(|| IncomeStatementError::Overflow(what.to_string()))
}

fn checked_sub(lhs: Decimal, rhs: Decimal, what: &str) -> Result<Decimal> {
    lhs.checked_sub(rhs)
        .ok_or_else(|| IncomeStatementError::Overflow(what.to_string()))
}

fn checked_sum(amounts: impl IntoIterator<Item = Decimal>, what: &str) -> Result<Decimal> {
    amounts
        .into_iter()
        .try_fold(Decimal::ZERO, |acc, amount| checked_add(acc, amount, what))
}

fn check_identity(identity: &str, expected: Decimal, actual: Decimal) -> Result<()> {
    if expected != actual {
        return Err(IncomeStatementError::IdentityViolation {
            identity: identity.to_string(),
            expected,
            actual,
        });
    }
    Ok(())
}

pub struct Aggregator {
    beginning_inventory: Decimal,
    ending_inventory: Option<Decimal>,
}

impl Aggregator {
    pub fn new(beginning_inventory: Decimal, ending_inventory: Option<Decimal>) -> Self {
        Self {
            beginning_inventory,
            ending_inventory,
        }
    }

    /// Groups already period-filtered transactions and applies the cost-of-sales formula.
    ///
    /// Fails with [`IncomeStatementError::Overflow`] if any sum leaves `Decimal`'s range.
    pub fn aggregate(&self, transactions: &[Transaction]) -> Result<AggregateResult> {
        let mut revenue_by_category = CategoryTotals::new();
        let mut expense_by_category = CategoryTotals::new();
        let mut cost_of_sales_by_category = CategoryTotals::new();
        let mut inventory_count = 0usize;

        for transaction in transactions {
            match transaction.transaction_type() {
                TransactionType::Revenue => {
                    revenue_by_category.add(transaction.category(), transaction.amount())?
                }
                TransactionType::Expense => {
                    expense_by_category.add(transaction.category(), transaction.amount())?
                }
                TransactionType::CostOfSales => {
                    cost_of_sales_by_category.add(transaction.category(), transaction.amount())?
                }
                TransactionType::Inventory => inventory_count += 1,
            }
        }

        debug!(
            "Aggregating {} transactions: {} revenue, {} expense, {} cost of sales categories",
            transactions.len(),
            revenue_by_category.len(),
            expense_by_category.len(),
            cost_of_sales_by_category.len()
        );
        if inventory_count > 0 {
            debug!(
                "{} inventory transactions observed; they do not contribute to any total",
                inventory_count
            );
        }

        let purchases = cost_of_sales_by_category.total()?;
        let total_goods_available =
            checked_add(self.beginning_inventory, purchases, "total_goods_available")?;

        let (cost_of_sales_method, total_cost_of_sales, cost_of_sales_breakdown) =
            match self.ending_inventory {
                None => {
                    let breakdown = cost_of_sales_by_category
                        .iter()
                        .map(|(category, amount)| CostOfSalesLine::new(category, amount))
                        .collect();
                    (CostOfSalesMethod::DirectPurchases, purchases, breakdown)
                }
                Some(ending_inventory) => {
                    let mut breakdown = Vec::with_capacity(cost_of_sales_by_category.len() + 3);
                    breakdown.push(CostOfSalesLine::new(
                        BEGINNING_INVENTORY_LABEL,
                        self.beginning_inventory,
                    ));
                    breakdown.extend(
                        cost_of_sales_by_category
                            .iter()
                            .map(|(category, amount)| CostOfSalesLine::new(category, amount)),
                    );
                    breakdown.push(CostOfSalesLine::new(
                        TOTAL_GOODS_AVAILABLE_LABEL,
                        total_goods_available,
                    ));
                    breakdown.push(CostOfSalesLine::new(ENDING_INVENTORY_LABEL, -ending_inventory));
                    (
                        CostOfSalesMethod::PeriodicInventory,
                        checked_sub(total_goods_available, ending_inventory, "total_cost_of_sales")?,
                        breakdown,
                    )
                }
            };

        let total_revenue = revenue_by_category.total()?;
        let gross_profit = checked_sub(total_revenue, total_cost_of_sales, "gross_profit")?;
        let total_expenses = expense_by_category.total()?;
        let net_income = checked_sub(gross_profit, total_expenses, "net_income")?;

        Ok(AggregateResult {
            revenue_by_category,
            cost_of_sales_breakdown,
            expense_by_category,
            cost_of_sales_method,
            total_revenue,
            total_cost_of_sales,
            gross_profit,
            total_expenses,
            net_income,
        })
    }
}
