//! Spreadsheet rendering.
//!
//! The sheet is first laid out as a [`SheetLayout`] grid (columns A..E) so its
//! structure can be inspected without reading an `.xlsx` file back, then
//! written out with `rust_xlsxwriter`.

use crate::aggregator::{AggregateResult, CategoryTotals};
use crate::error::Result;
use crate::statement::IncomeStatement;
use log::info;
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::Decimal;
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatBorder, Workbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};

pub const SHEET_NAME: &str = "Income Statement";
pub const COLUMN_COUNT: u16 = 5;
pub const COLUMN_WIDTHS: [f64; COLUMN_COUNT as usize] = [5.0, 25.0, 20.0, 15.0, 5.0];
pub const CURRENCY_FORMAT: &str = "$#,##0.00";

const FONT_NAME: &str = "Arial";
const HEADER_FILL: u32 = 0xDDDDDD;

const COL_LABEL: usize = 1;
const COL_TOTAL_LABEL: usize = 2;
const COL_AMOUNT: usize = 3;

#[derive(Debug, Clone, PartialEq)]
pub enum CellValue {
    Blank,
    Text(String),
    Currency(Decimal),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellStyle {
    Normal,
    Title,
    Subtitle,
    Period,
    SectionHeader,
    /// Bold 11pt, used for section totals and the goods-available subtotal.
    Emphasis,
    /// Bold 12pt, used for gross profit and net income.
    Summary,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CellBorder {
    None,
    Thin,
    DoubleBottom,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetCell {
    pub value: CellValue,
    pub style: CellStyle,
    pub border: CellBorder,
}

impl Default for SheetCell {
    fn default() -> Self {
        Self {
            value: CellValue::Blank,
            style: CellStyle::Normal,
            border: CellBorder::None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct SheetRow {
    /// The whole row is a single merged A:E cell holding `cells[0]`.
    pub merged: bool,
    pub cells: Vec<SheetCell>,
}

impl SheetRow {
    fn blank() -> Self {
        Self {
            merged: false,
            cells: vec![SheetCell::default(); COLUMN_COUNT as usize],
        }
    }

    fn merged(text: impl Into<String>, style: CellStyle) -> Self {
        let mut row = Self::blank();
        row.merged = true;
        for cell in &mut row.cells {
            cell.style = style;
        }
        row.cells[0].value = CellValue::Text(text.into());
        row
    }

    fn item(label: &str, amount: Decimal) -> Self {
        let mut row = Self::blank();
        row.cells[COL_LABEL].value = CellValue::Text(label.to_string());
        row.cells[COL_AMOUNT].value = CellValue::Currency(amount);
        row
    }

    fn total(label: &str, amount: Decimal, style: CellStyle) -> Self {
        let mut row = Self::blank();
        row.cells[COL_TOTAL_LABEL] = SheetCell {
            value: CellValue::Text(label.to_string()),
            style,
            border: CellBorder::None,
        };
        row.cells[COL_AMOUNT] = SheetCell {
            value: CellValue::Currency(amount),
            style,
            border: CellBorder::None,
        };
        for cell in &mut row.cells {
            cell.border = CellBorder::DoubleBottom;
        }
        row
    }

    pub fn text(&self, col: usize) -> Option<&str> {
        match &self.cells.get(col)?.value {
            CellValue::Text(text) => Some(text),
            _ => None,
        }
    }

    pub fn amount(&self) -> Option<Decimal> {
        match self.cells.get(COL_AMOUNT)?.value {
            CellValue::Currency(amount) => Some(amount),
            _ => None,
        }
    }

    /// The row's descriptive text wherever it sits (merged header, item label or total label).
    pub fn label(&self) -> Option<&str> {
        self.text(0)
            .or_else(|| self.text(COL_LABEL))
            .or_else(|| self.text(COL_TOTAL_LABEL))
    }
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct SheetLayout {
    pub rows: Vec<SheetRow>,
}

impl SheetLayout {
    pub fn build(statement: &IncomeStatement, totals: &AggregateResult) -> Self {
        let mut layout = Self::default();

        layout.push(SheetRow::merged(statement.business_name(), CellStyle::Title));
        layout.push(SheetRow::merged(SHEET_NAME, CellStyle::Subtitle));
        layout.push(SheetRow::merged(
            format!("For the period: {}", statement.period().label()),
            CellStyle::Period,
        ));
        layout.push(SheetRow::blank());

        layout.category_section(
            "REVENUE",
            &totals.revenue_by_category,
            "Total Revenue",
            totals.total_revenue,
        );
        layout.push(SheetRow::blank());

        layout.push(SheetRow::merged("COST OF SALES", CellStyle::SectionHeader));
        for entry in &totals.cost_of_sales_breakdown {
            let mut row = SheetRow::item(&entry.label, entry.amount);
            if entry.is_total_goods_available() {
                for col in COL_LABEL..=COL_AMOUNT {
                    row.cells[col].border = CellBorder::Thin;
                }
                row.cells[COL_LABEL].style = CellStyle::Emphasis;
                row.cells[COL_AMOUNT].style = CellStyle::Emphasis;
            }
            layout.push(row);
        }
        layout.push(SheetRow::total(
            "Total Cost of Sales",
            totals.total_cost_of_sales,
            CellStyle::Emphasis,
        ));
        layout.push(SheetRow::blank());

        layout.push(SheetRow::total(
            "GROSS PROFIT",
            totals.gross_profit,
            CellStyle::Summary,
        ));
        layout.push(SheetRow::blank());

        layout.category_section(
            "EXPENSES",
            &totals.expense_by_category,
            "Total Expenses",
            totals.total_expenses,
        );
        layout.push(SheetRow::blank());

        layout.push(SheetRow::total(
            "NET INCOME",
            totals.net_income,
            CellStyle::Summary,
        ));

        layout.apply_default_borders();
        layout
    }

    fn push(&mut self, row: SheetRow) {
        self.rows.push(row);
    }

    fn category_section(
        &mut self,
        header: &str,
        categories: &CategoryTotals,
        total_label: &str,
        total: Decimal,
    ) {
        self.push(SheetRow::merged(header, CellStyle::SectionHeader));
        for (category, amount) in categories.iter() {
            self.push(SheetRow::item(category, amount));
        }
        self.push(SheetRow::total(total_label, total, CellStyle::Emphasis));
    }

    fn apply_default_borders(&mut self) {
        for cell in self.rows.iter_mut().flat_map(|row| row.cells.iter_mut()) {
            if cell.border == CellBorder::None {
                cell.border = CellBorder::Thin;
            }
        }
    }

    pub fn find_row(&self, label: &str) -> Option<(usize, &SheetRow)> {
        self.rows
            .iter()
            .enumerate()
            .find(|(_, row)| row.label() == Some(label))
    }
}

fn cell_format(cell: &SheetCell) -> Format {
    let mut format = Format::new().set_font_name(FONT_NAME);

    format = match cell.style {
        CellStyle::Normal => format.set_font_size(11),
        CellStyle::Title => format
            .set_font_size(14)
            .set_bold()
            .set_align(FormatAlign::Center),
        CellStyle::Subtitle => format
            .set_font_size(12)
            .set_bold()
            .set_align(FormatAlign::Center),
        CellStyle::Period => format.set_font_size(11).set_align(FormatAlign::Center),
        CellStyle::SectionHeader => format
            .set_font_size(12)
            .set_bold()
            .set_background_color(Color::RGB(HEADER_FILL)),
        CellStyle::Emphasis => format.set_font_size(11).set_bold(),
        CellStyle::Summary => format.set_font_size(12).set_bold(),
    };

    format = match cell.border {
        CellBorder::None => format,
        CellBorder::Thin => format.set_border(FormatBorder::Thin),
        CellBorder::DoubleBottom => format
            .set_border(FormatBorder::Thin)
            .set_border_bottom(FormatBorder::Double),
    };

    if matches!(cell.value, CellValue::Currency(_)) {
        format = format.set_num_format(CURRENCY_FORMAT);
    }

    format
}

fn write_row(worksheet: &mut Worksheet, row_idx: u32, row: &SheetRow) -> Result<()> {
    if row.merged {
        let head = &row.cells[0];
        let text = match &head.value {
            CellValue::Text(text) => text.as_str(),
            _ => "",
        };
        worksheet.merge_range(row_idx, 0, row_idx, COLUMN_COUNT - 1, text, &cell_format(head))?;
        return Ok(());
    }

    for (col, cell) in (0u16..).zip(row.cells.iter()) {
        let format = cell_format(cell);
        match &cell.value {
            CellValue::Blank => {
                worksheet.write_blank(row_idx, col, &format)?;
            }
            CellValue::Text(text) => {
                worksheet.write_string_with_format(row_idx, col, text, &format)?;
            }
            CellValue::Currency(amount) => {
                let value = amount.to_f64().unwrap_or_default();
                worksheet.write_number_with_format(row_idx, col, value, &format)?;
            }
        }
    }

    Ok(())
}

pub fn write_layout(layout: &SheetLayout, path: &Path) -> Result<()> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    for (row_idx, row) in (0u32..).zip(layout.rows.iter()) {
        write_row(worksheet, row_idx, row)?;
    }

    for (col, width) in (0u16..).zip(COLUMN_WIDTHS) {
        worksheet.set_column_width(col, width)?;
    }

    workbook.save(path)?;
    Ok(())
}

/// Lays out and writes the statement workbook, replacing any existing file at `path`.
pub fn write_workbook(
    statement: &IncomeStatement,
    totals: &AggregateResult,
    path: &Path,
) -> Result<PathBuf> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        fs::create_dir_all(parent)?;
    }

    let layout = SheetLayout::build(statement, totals);
    write_layout(&layout, path)?;

    info!(
        "Wrote income statement workbook for {} to {}",
        statement.business_name(),
        path.display()
    );

    Ok(path.to_path_buf())
}
