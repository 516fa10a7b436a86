use std::io::Write;

use anyhow::Result;
use serde::Serialize;
use serde_json::Value;
use tabled::builder::Builder;
use tabled::settings::Style;
use tabled::Table;

#[derive(Clone, Debug)]
pub enum OutputFormat {
    Table,
    Json,
    Csv,
    Markdown,
}

/// Column names plus stringified cells, in the order records serialize.
#[derive(Debug, Default, PartialEq)]
struct Rows {
    headers: Vec<String>,
    cells: Vec<Vec<String>>,
}

// -- Row builders --

/// Flattens records into rows. Columns are the union of top-level keys in
/// first-seen order; nested values are rendered as compact JSON.
fn build_rows<T: Serialize>(records: &[T]) -> Result<Rows> {
    let values = records
        .iter()
        .map(serde_json::to_value)
        .collect::<Result<Vec<_>, _>>()?;

    let mut headers: Vec<String> = Vec::new();
    for value in &values {
        if let Value::Object(map) = value {
            for key in map.keys() {
                if !headers.contains(key) {
                    headers.push(key.clone());
                }
            }
        }
    }
    if headers.is_empty() && !values.is_empty() {
        headers.push("value".to_string());
    }

    let cells = values
        .iter()
        .map(|value| match value {
            Value::Object(map) => headers
                .iter()
                .map(|h| map.get(h).map(format_cell).unwrap_or_default())
                .collect(),
            other => vec![format_cell(other)],
        })
        .collect();

    Ok(Rows { headers, cells })
}

fn format_cell(value: &Value) -> String {
    match value {
        Value::Null => String::new(),
        Value::String(s) => s.clone(),
        Value::Number(n) => format_number(n),
        other => other.to_string(),
    }
}

/// Integral floats print without a trailing `.0`.
fn format_number(n: &serde_json::Number) -> String {
    match n.as_f64() {
        Some(f) if n.is_f64() && f.fract() == 0.0 && f.abs() < 1e15 => format!("{}", f as i64),
        _ => n.to_string(),
    }
}

fn build_table(rows: &Rows) -> Table {
    let mut builder = Builder::default();
    builder.push_record(rows.headers.iter().cloned());
    for row in &rows.cells {
        builder.push_record(row.iter().cloned());
    }
    builder.build()
}

fn render_table(rows: &Rows) -> String {
    build_table(rows).to_string()
}

fn render_markdown(rows: &Rows) -> String {
    let mut table = build_table(rows);
    table.with(Style::markdown());
    table.to_string()
}

fn write_csv<W: Write>(writer: W, rows: &Rows) -> Result<()> {
    let mut wtr = csv::Writer::from_writer(writer);
    wtr.write_record(&rows.headers)?;
    for row in &rows.cells {
        wtr.write_record(row)?;
    }
    wtr.flush()?;
    Ok(())
}

// -- Entry points --

/// Prints records in the requested format.
pub fn print_records<T: Serialize>(records: &[T], format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => print_json(&records),
        OutputFormat::Table => println!("{}", render_table(&build_rows(records)?)),
        OutputFormat::Markdown => println!("{}", render_markdown(&build_rows(records)?)),
        OutputFormat::Csv => write_csv(std::io::stdout(), &build_rows(records)?)?,
    }
    Ok(())
}

/// Prints a single record; JSON output is the bare object, not a list.
pub fn print_record<T: Serialize>(record: &T, format: &OutputFormat) -> Result<()> {
    match format {
        OutputFormat::Json => {
            print_json(record);
            Ok(())
        }
        _ => print_records(std::slice::from_ref(record), format),
    }
}

pub fn print_json<T: Serialize + ?Sized>(data: &T) {
    match serde_json::to_string_pretty(data) {
        Ok(json) => println!("{}", json),
        Err(e) => eprintln!("Failed to serialize to JSON: {}", e),
    }
}

#[cfg(test)]
mod tests {
    use bizadmin_lib::types::{Contract, ListEnvelope};
    use serde_json::json;

    use super::*;

    fn load_contracts_fixture() -> Vec<Contract> {
        let json_str = include_str!("../../bizadmin_api/tests/fixtures/contracts.json");
        let env: ListEnvelope<Contract> = serde_json::from_str(json_str).unwrap();
        env.items().to_vec()
    }

    #[test]
    fn test_build_rows_follow_field_order() {
        let rows = build_rows(&load_contracts_fixture()).unwrap();
        assert_eq!(
            rows.headers,
            vec![
                "id",
                "contractNumber",
                "customerId",
                "customerName",
                "contractType",
                "signDate",
                "expiryDate",
                "totalValue",
                "status"
            ]
        );
        assert_eq!(rows.cells.len(), 2);
        assert_eq!(rows.cells[0][0], "ct-1001");
        assert_eq!(rows.cells[0][5], "2024-02-01");
        assert_eq!(rows.cells[0][7], "120000000");
        assert_eq!(rows.cells[0][8], "active");
    }

    #[test]
    fn test_build_rows_nulls_are_blank() {
        let rows = build_rows(&load_contracts_fixture()).unwrap();
        let second = &rows.cells[1];
        assert_eq!(second[3], "");
        assert_eq!(second[5], "");
        assert_eq!(second[7], "0");
    }

    #[test]
    fn test_build_rows_union_of_keys() {
        let records = vec![json!({"a": 1}), json!({"b": [1, 2], "a": 2.5})];
        let rows = build_rows(&records).unwrap();
        assert_eq!(rows.headers, vec!["a", "b"]);
        assert_eq!(rows.cells[0], vec!["1", ""]);
        assert_eq!(rows.cells[1], vec!["2.5", "[1,2]"]);
    }

    #[test]
    fn test_build_rows_empty() {
        let rows = build_rows::<Contract>(&[]).unwrap();
        assert_eq!(rows, Rows::default());
    }

    #[test]
    fn test_csv_headers() {
        let rows = build_rows(&load_contracts_fixture()).unwrap();
        let mut buf = Vec::new();
        write_csv(&mut buf, &rows).unwrap();
        let csv = String::from_utf8(buf).unwrap();
        let header = csv.lines().next().unwrap();
        assert_eq!(
            header,
            "id,contractNumber,customerId,customerName,contractType,signDate,expiryDate,totalValue,status"
        );
        assert_eq!(csv.lines().count(), 3);
    }

    #[test]
    fn test_markdown_structure() {
        let rows = build_rows(&load_contracts_fixture()).unwrap();
        let md = render_markdown(&rows);

        assert!(md.contains('|'));
        assert!(md.contains("---"));
        let header_line = md.lines().next().unwrap();
        assert!(header_line.contains("contractNumber"));
        assert!(header_line.contains("status"));
    }

    #[test]
    fn test_table_contains_values() {
        let rows = build_rows(&load_contracts_fixture()).unwrap();
        let table = render_table(&rows);
        assert!(table.contains("HD-2024-001"));
        assert!(table.contains("Minh Phat Trading"));
    }

    #[test]
    fn test_json_contracts_serializable() {
        let contracts = load_contracts_fixture();
        let val = serde_json::to_value(&contracts).unwrap();
        assert_eq!(val.as_array().unwrap().len(), 2);
    }
}
