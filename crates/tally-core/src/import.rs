//! Transaction list loading
//!
//! Supports CSV exports with a header row and JSON arrays of records.
//!
//! CSV columns are matched by header name (case-insensitive):
//! `id`, `date`, `description`, `category`, `amount`, `type`.
//! Only `date` and `amount` are required. A missing or blank `type` is derived
//! from the amount sign; a missing `id` becomes the 1-based row number.

use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use chrono::NaiveDate;
use csv::{ReaderBuilder, StringRecord, Trim};
use tracing::{debug, warn};

use crate::error::{Error, Result};
use crate::models::{TransactionRecord, TransactionType};

/// Column positions resolved from the header row
struct Columns {
    id: Option<usize>,
    date: usize,
    description: Option<usize>,
    category: Option<usize>,
    amount: usize,
    transaction_type: Option<usize>,
}

impl Columns {
    fn from_headers(headers: &StringRecord) -> Result<Self> {
        let find = |name: &str| {
            headers
                .iter()
                .position(|h| h.trim().eq_ignore_ascii_case(name))
        };

        Ok(Self {
            id: find("id"),
            date: find("date").ok_or_else(|| Error::Import("Missing 'date' column".into()))?,
            description: find("description"),
            category: find("category"),
            amount: find("amount")
                .ok_or_else(|| Error::Import("Missing 'amount' column".into()))?,
            transaction_type: find("type"),
        })
    }
}

/// Parse a CSV transaction list
pub fn parse_csv<R: Read>(reader: R) -> Result<Vec<TransactionRecord>> {
    let mut rdr = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .trim(Trim::All)
        .from_reader(reader);

    let headers = rdr.headers()?.clone();
    let columns = Columns::from_headers(&headers)?;
    let mut transactions = Vec::new();

    for (index, result) in rdr.records().enumerate() {
        let record = result?;
        let row = index + 1;

        if record.iter().all(|field| field.is_empty()) {
            warn!("Skipping blank row {}", row);
            continue;
        }

        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("");

        let date = parse_date(field(Some(columns.date)))
            .map_err(|e| Error::Import(format!("Row {}: {}", row, e)))?;
        let amount = parse_amount(field(Some(columns.amount)))
            .map_err(|e| Error::Import(format!("Row {}: {}", row, e)))?;

        let type_str = field(columns.transaction_type);
        let transaction_type = if type_str.is_empty() {
            TransactionType::from_amount(amount)
        } else {
            type_str
                .parse::<TransactionType>()
                .map_err(|e| Error::Import(format!("Row {}: {}", row, e)))?
        };

        let id = match field(columns.id) {
            "" => row.to_string(),
            id => id.to_string(),
        };

        transactions.push(TransactionRecord {
            id,
            amount,
            category: field(columns.category).to_string(),
            description: field(columns.description).to_string(),
            date,
            transaction_type,
        });
    }

    debug!("Parsed {} CSV transactions", transactions.len());
    Ok(transactions)
}

/// Parse a JSON array of transaction records
pub fn parse_json<R: Read>(reader: R) -> Result<Vec<TransactionRecord>> {
    let transactions: Vec<TransactionRecord> = serde_json::from_reader(reader)?;
    debug!("Parsed {} JSON transactions", transactions.len());
    Ok(transactions)
}

/// Load a transaction list, choosing the format by file extension
///
/// `.json` files are parsed as JSON; anything else as CSV.
pub fn load_transactions(path: &Path) -> Result<Vec<TransactionRecord>> {
    let reader = BufReader::new(File::open(path)?);
    let is_json = path
        .extension()
        .and_then(|e| e.to_str())
        .is_some_and(|e| e.eq_ignore_ascii_case("json"));

    if is_json {
        parse_json(reader)
    } else {
        parse_csv(reader)
    }
}

/// Parse a date in one of the accepted formats
fn parse_date(s: &str) -> Result<NaiveDate> {
    let s = s.trim();

    let formats = [
        "%Y-%m-%d", // 2024-01-15
        "%m/%d/%Y", // 01/15/2024
        "%d.%m.%Y", // 15.01.2024
    ];

    for fmt in formats {
        if let Ok(date) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(date);
        }
    }

    Err(Error::Import(format!("Unable to parse date: {}", s)))
}

/// Parse an amount string, handling currency symbols and separators
///
/// A comma is the decimal mark for lira amounts (`₺`, `TL`), when a dot
/// precedes it (`1.234,56`), or when it is not followed by exactly three
/// digits (`250,50`). Otherwise commas are thousands separators (`1,234.56`).
fn parse_amount(s: &str) -> Result<f64> {
    let trimmed = s.trim();
    let is_lira = trimmed.contains('₺') || trimmed.contains("TL");

    let stripped: String = trimmed
        .replace(['$', '€', '₺', ' '], "")
        .replace("TL", "")
        .replace('(', "-")
        .replace(')', "");

    let comma_is_decimal = match stripped.rfind(',') {
        Some(pos) => {
            let digits_after = stripped[pos + 1..]
                .chars()
                .take_while(char::is_ascii_digit)
                .count();
            is_lira || stripped[..pos].contains('.') || digits_after != 3
        }
        None => false,
    };

    let cleaned = if comma_is_decimal {
        stripped.replace('.', "").replace(',', ".")
    } else {
        stripped.replace(',', "")
    };

    cleaned
        .parse::<f64>()
        .ok()
        .filter(|amount| amount.is_finite())
        .ok_or_else(|| Error::Import(format!("Unable to parse amount: {}", s)))
}
