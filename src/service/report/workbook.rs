use std::ops::RangeInclusive;
use std::path::Path;

use chrono::NaiveDate;
use rust_xlsxwriter::{Format, Workbook, Worksheet, XlsxError};

use crate::service::report::{format_growth, EarningsReport, ReportRow};

pub const SHEET_NAME: &str = "Earnings Report";
pub const HEADERS: [&str; 8] = [
    "Stock Ticker",
    "Date",
    "EPS",
    "Revenue",
    "EPS Growth YoY",
    "Revenue Growth YoY",
    "Market Cap",
    "Short Interest",
];
pub const NUMBER_FORMAT: &str = "#,##0.00";
/// EPS through Revenue Growth YoY; market cap stays unformatted.
pub const FORMATTED_COLUMNS: RangeInclusive<u16> = 2..=5;

/// `Earnings_report_<YYYY-MM-DD>.xlsx`
pub fn report_file_name(date: NaiveDate) -> String {
    format!("Earnings_report_{}.xlsx", date.format("%Y-%m-%d"))
}

/// A single spreadsheet cell value.
#[derive(Debug, Clone, PartialEq)]
pub enum Cell {
    Number(f64),
    Text(String),
    Empty,
}

impl Cell {
    fn number_or(value: Option<f64>, missing: &str) -> Self {
        match value {
            Some(v) => Cell::Number(v),
            None => Cell::Text(missing.to_string()),
        }
    }
}

/// Cell values for one report row, in header order.
pub fn row_cells(row: &ReportRow) -> [Cell; 8] {
    [
        Cell::Text(row.symbol.clone()),
        Cell::Text(row.date.format("%Y-%m-%d").to_string()),
        Cell::number_or(row.eps, "N/A"),
        Cell::number_or(row.revenue, "N/A"),
        Cell::Text(format_growth(row.eps_growth)),
        Cell::Text(format_growth(row.revenue_growth)),
        Cell::number_or(row.market_cap.value(), "NA"),
        Cell::Empty, // short interest has no source yet
    ]
}

pub fn write_workbook(report: &EarningsReport, path: &Path) -> Result<(), XlsxError> {
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    worksheet.set_name(SHEET_NAME)?;

    let header_format = Format::new().set_bold();
    for (col, header) in HEADERS.iter().enumerate() {
        worksheet.write_string_with_format(0, col as u16, *header, &header_format)?;
        worksheet.set_column_width(col as u16, 18)?;
    }

    let number_format = Format::new().set_num_format(NUMBER_FORMAT);
    let mut data_row: u32 = 1;
    for row in &report.rows {
        write_row(worksheet, data_row, &row_cells(row), &number_format)?;
        data_row += 1;
    }

    workbook.save(path)?;
    Ok(())
}

fn write_row(
    worksheet: &mut Worksheet,
    row: u32,
    cells: &[Cell],
    number_format: &Format,
) -> Result<(), XlsxError> {
    for (col, cell) in cells.iter().enumerate() {
        let col = col as u16;
        match cell {
            Cell::Number(v) if FORMATTED_COLUMNS.contains(&col) => {
                worksheet.write_number_with_format(row, col, *v, number_format)?;
            }
            Cell::Number(v) => {
                worksheet.write_number(row, col, *v)?;
            }
            Cell::Text(s) => {
                worksheet.write_string(row, col, s)?;
            }
            Cell::Empty => {}
        }
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::MarketCap;
    use std::io::Read;

    fn row(eps: Option<f64>, market_cap: MarketCap) -> ReportRow {
        ReportRow {
            symbol: "AAPL".to_string(),
            date: NaiveDate::from_ymd_opt(2026, 10, 22).unwrap(),
            eps,
            revenue: None,
            eps_growth: Some(25.0),
            revenue_growth: None,
            market_cap,
        }
    }

    #[test]
    fn file_name_uses_iso_date() {
        let date = NaiveDate::from_ymd_opt(2026, 3, 7).unwrap();
        assert_eq!(report_file_name(date), "Earnings_report_2026-03-07.xlsx");
    }

    #[test]
    fn cells_follow_header_order() {
        let cells = row_cells(&row(Some(1.64), MarketCap::Value(3.5e12)));
        assert_eq!(cells.len(), HEADERS.len());
        assert_eq!(cells[0], Cell::Text("AAPL".into()));
        assert_eq!(cells[1], Cell::Text("2026-10-22".into()));
        assert_eq!(cells[2], Cell::Number(1.64));
        assert_eq!(cells[3], Cell::Text("N/A".into()));
        assert_eq!(cells[4], Cell::Text("25.00%".into()));
        assert_eq!(cells[5], Cell::Text("N/A".into()));
        assert_eq!(cells[6], Cell::Number(3.5e12));
        assert_eq!(cells[7], Cell::Empty);
    }

    #[test]
    fn missing_market_cap_is_na() {
        let cells = row_cells(&row(None, MarketCap::NotAvailable));
        assert_eq!(cells[2], Cell::Text("N/A".into()));
        assert_eq!(cells[6], Cell::Text("NA".into()));
    }

    fn archive_entry(path: &Path, name: &str) -> String {
        let file = std::fs::File::open(path).unwrap();
        let mut archive = zip::ZipArchive::new(file).unwrap();
        let mut entry = archive.by_name(name).unwrap();
        let mut out = String::new();
        entry.read_to_string(&mut out).unwrap();
        out
    }

    #[test]
    fn saves_named_sheet_with_header_row() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("report.xlsx");
        let report = EarningsReport {
            rows: vec![row(Some(1.64), MarketCap::Value(3.5e12))],
            skipped: Vec::new(),
        };

        write_workbook(&report, &path).unwrap();

        let workbook = archive_entry(&path, "xl/workbook.xml");
        assert!(workbook.contains(r#"name="Earnings Report""#), "{workbook}");

        let strings = archive_entry(&path, "xl/sharedStrings.xml");
        let mut last = 0;
        for header in HEADERS {
            let pos = strings
                .find(&format!("<t>{header}</t>"))
                .unwrap_or_else(|| panic!("missing header {header}: {strings}"));
            assert!(pos >= last, "header {header} out of order");
            last = pos;
        }

        let sheet = archive_entry(&path, "xl/worksheets/sheet1.xml");
        assert!(sheet.contains(r#"r="H1""#), "short interest header written");
        assert!(!sheet.contains(r#"r="H2""#), "short interest stays empty");
        assert!(sheet.contains(r#"<c r="C2" s="#), "eps carries the number format");
        assert!(sheet.contains(r#"<c r="G2">"#), "market cap is unformatted");

        let styles = archive_entry(&path, "xl/styles.xml");
        // #,##0.00 is builtin format 4
        assert!(
            styles.contains(r#"numFmtId="4""#) || styles.contains(r##"formatCode="#,##0.00""##),
            "{styles}"
        );
    }
}
