//! In-memory table of named columns and typed rows.
//!
//! This is what spreadsheets are read into and what the cache stores as
//! records. It carries just enough column arithmetic for the demos:
//! summaries, filters, computed columns and simple group-bys.

use crate::error::{DemoError, Result};
use chrono::NaiveDateTime;
use serde_json::{Map, Number, Value as JsonValue};
use std::cmp::Ordering;
use std::collections::BTreeMap;
use std::fmt;

pub const DATETIME_FORMAT: &str = "%Y-%m-%d %H:%M:%S";

#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    Empty,
    Bool(bool),
    Int(i64),
    Float(f64),
    Text(String),
    DateTime(NaiveDateTime),
}

impl Value {
    pub fn as_f64(&self) -> Option<f64> {
        match self {
            Value::Int(i) => Some(*i as f64),
            Value::Float(f) => Some(*f),
            _ => None,
        }
    }

    pub fn as_str(&self) -> Option<&str> {
        match self {
            Value::Text(s) => Some(s),
            _ => None,
        }
    }

    pub fn is_empty(&self) -> bool {
        matches!(self, Value::Empty)
    }

    pub fn is_numeric(&self) -> bool {
        matches!(self, Value::Int(_) | Value::Float(_))
    }

    /// Total order for sorting: empty, bools, numbers (by value), datetimes, text.
    pub fn sort_cmp(&self, other: &Value) -> Ordering {
        fn rank(v: &Value) -> u8 {
            match v {
                Value::Empty => 0,
                Value::Bool(_) => 1,
                Value::Int(_) | Value::Float(_) => 2,
                Value::DateTime(_) => 3,
                Value::Text(_) => 4,
            }
        }
        match (self, other) {
            (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
            (Value::Int(a), Value::Int(b)) => a.cmp(b),
            (Value::DateTime(a), Value::DateTime(b)) => a.cmp(b),
            (Value::Text(a), Value::Text(b)) => a.cmp(b),
            (a, b) => match (a.as_f64(), b.as_f64()) {
                (Some(x), Some(y)) => x.total_cmp(&y),
                _ => rank(a).cmp(&rank(b)),
            },
        }
    }

    pub fn to_json(&self) -> JsonValue {
        match self {
            Value::Empty => JsonValue::Null,
            Value::Bool(b) => JsonValue::Bool(*b),
            Value::Int(i) => JsonValue::from(*i),
            Value::Float(f) => Number::from_f64(*f).map(JsonValue::Number).unwrap_or(JsonValue::Null),
            Value::Text(s) => JsonValue::String(s.clone()),
            Value::DateTime(dt) => JsonValue::String(dt.format(DATETIME_FORMAT).to_string()),
        }
    }

    /// Integers stay integers; datetimes come back as text since JSON has no date type.
    pub fn from_json(value: &JsonValue) -> Value {
        match value {
            JsonValue::Null => Value::Empty,
            JsonValue::Bool(b) => Value::Bool(*b),
            JsonValue::Number(n) => match n.as_i64() {
                Some(i) => Value::Int(i),
                None => n.as_f64().map(Value::Float).unwrap_or(Value::Empty),
            },
            JsonValue::String(s) => Value::Text(s.clone()),
            other => Value::Text(other.to_string()),
        }
    }
}

impl fmt::Display for Value {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Value::Empty => write!(f, "NaN"),
            Value::Bool(b) => write!(f, "{}", if *b { "True" } else { "False" }),
            Value::Int(i) => write!(f, "{}", i),
            Value::Float(v) => {
                if v.fract() == 0.0 && v.abs() < 1e15 {
                    write!(f, "{:.1}", v)
                } else {
                    write!(f, "{}", (v * 1e6).round() / 1e6)
                }
            }
            Value::Text(s) => write!(f, "{}", s),
            Value::DateTime(dt) => write!(f, "{}", dt.format(DATETIME_FORMAT)),
        }
    }
}

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Text(s.to_string())
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Text(s)
    }
}

impl From<i64> for Value {
    fn from(i: i64) -> Self {
        Value::Int(i)
    }
}

impl From<f64> for Value {
    fn from(f: f64) -> Self {
        Value::Float(f)
    }
}

impl From<bool> for Value {
    fn from(b: bool) -> Self {
        Value::Bool(b)
    }
}

impl From<NaiveDateTime> for Value {
    fn from(dt: NaiveDateTime) -> Self {
        Value::DateTime(dt)
    }
}

/// Per-column summary statistics (sample standard deviation, linear quantiles).
#[derive(Debug, Clone, PartialEq)]
pub struct Summary {
    pub count: usize,
    pub mean: f64,
    pub std: Option<f64>,
    pub min: f64,
    pub q25: f64,
    pub median: f64,
    pub q75: f64,
    pub max: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Agg {
    Mean,
    Count,
    Sum,
}

#[derive(Debug, Clone, PartialEq, Default)]
pub struct Table {
    columns: Vec<String>,
    rows: Vec<Vec<Value>>,
}

impl Table {
    pub fn new<S: Into<String>>(columns: impl IntoIterator<Item = S>) -> Self {
        Self {
            columns: columns.into_iter().map(Into::into).collect(),
            rows: Vec::new(),
        }
    }

    /// Builds a table column by column; every column must have the same length.
    pub fn from_columns(columns: Vec<(&str, Vec<Value>)>) -> Result<Self> {
        let height = columns.first().map(|(_, values)| values.len()).unwrap_or(0);
        if let Some((name, values)) = columns.iter().find(|(_, v)| v.len() != height) {
            return Err(DemoError::Spreadsheet(format!(
                "column '{}' has {} values, expected {}",
                name,
                values.len(),
                height
            )));
        }
        let mut table = Table::new(columns.iter().map(|(name, _)| *name));
        for i in 0..height {
            table.rows.push(columns.iter().map(|(_, values)| values[i].clone()).collect());
        }
        Ok(table)
    }

    pub fn push_row(&mut self, row: Vec<Value>) -> Result<()> {
        if row.len() != self.columns.len() {
            return Err(DemoError::Spreadsheet(format!(
                "row has {} cells but the table has {} columns",
                row.len(),
                self.columns.len()
            )));
        }
        self.rows.push(row);
        Ok(())
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn rows(&self) -> &[Vec<Value>] {
        &self.rows
    }

    /// (rows, columns)
    pub fn shape(&self) -> (usize, usize) {
        (self.rows.len(), self.columns.len())
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    pub fn column_index(&self, name: &str) -> Option<usize> {
        self.columns.iter().position(|c| c == name)
    }

    pub fn column(&self, name: &str) -> Option<Vec<&Value>> {
        let idx = self.column_index(name)?;
        Some(self.rows.iter().map(|row| &row[idx]).collect())
    }

    pub fn has_columns(&self, names: &[&str]) -> bool {
        names.iter().all(|n| self.column_index(n).is_some())
    }

    /// `MissingColumns` naming every absent column.
    pub fn require_columns(&self, names: &[&str]) -> Result<()> {
        let missing: Vec<String> = names
            .iter()
            .filter(|n| self.column_index(n).is_none())
            .map(|n| n.to_string())
            .collect();
        if missing.is_empty() {
            Ok(())
        } else {
            Err(DemoError::MissingColumns(missing))
        }
    }

    pub fn head(&self, n: usize) -> Table {
        Table {
            columns: self.columns.clone(),
            rows: self.rows.iter().take(n).cloned().collect(),
        }
    }

    pub fn select(&self, names: &[&str]) -> Result<Table> {
        self.require_columns(names)?;
        let indices: Vec<usize> = names.iter().filter_map(|n| self.column_index(n)).collect();
        Ok(Table {
            columns: names.iter().map(|n| n.to_string()).collect(),
            rows: self
                .rows
                .iter()
                .map(|row| indices.iter().map(|&i| row[i].clone()).collect())
                .collect(),
        })
    }

    /// Keeps the rows for which `pred` returns true. The closure gets a lookup by column name.
    pub fn filter<F>(&self, pred: F) -> Table
    where
        F: Fn(&RowRef<'_>) -> bool,
    {
        Table {
            columns: self.columns.clone(),
            rows: self
                .rows
                .iter()
                .filter(|row| {
                    pred(&RowRef {
                        columns: &self.columns,
                        cells: row,
                    })
                })
                .cloned()
                .collect(),
        }
    }

    /// Returns a copy with one more column computed from each row.
    pub fn with_column<F>(&self, name: &str, f: F) -> Table
    where
        F: Fn(&RowRef<'_>) -> Value,
    {
        let mut out = self.clone();
        out.columns.push(name.to_string());
        for row in out.rows.iter_mut() {
            let value = f(&RowRef {
                columns: &self.columns,
                cells: row.as_slice(),
            });
            row.push(value);
        }
        out
    }

    fn non_empty(&self, idx: usize) -> impl Iterator<Item = &Value> {
        self.rows.iter().map(move |row| &row[idx]).filter(|v| !v.is_empty())
    }

    /// Columns whose non-empty cells are all numbers (and at least one exists).
    pub fn numeric_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .enumerate()
            .filter(|(i, _)| {
                let mut cells = self.non_empty(*i).peekable();
                cells.peek().is_some() && cells.all(Value::is_numeric)
            })
            .map(|(_, c)| c.as_str())
            .collect()
    }

    /// Columns holding text (mixed-type columns count as text).
    pub fn text_columns(&self) -> Vec<&str> {
        self.columns
            .iter()
            .map(|c| c.as_str())
            .filter(|c| self.column_kind(c) == Some("object"))
            .collect()
    }

    /// A dtype-like label for a column: int64, float64, bool, datetime64, object.
    pub fn column_kind(&self, name: &str) -> Option<&'static str> {
        let idx = self.column_index(name)?;
        let cells: Vec<&Value> = self.non_empty(idx).collect();
        let has_empty = cells.len() < self.rows.len();
        let kind = if cells.is_empty() {
            "float64"
        } else if cells.iter().all(|v| matches!(v, Value::Int(_))) {
            if has_empty {
                "float64"
            } else {
                "int64"
            }
        } else if cells.iter().all(|v| v.is_numeric()) {
            "float64"
        } else if cells.iter().all(|v| matches!(v, Value::Bool(_))) {
            "bool"
        } else if cells.iter().all(|v| matches!(v, Value::DateTime(_))) {
            "datetime64"
        } else {
            "object"
        };
        Some(kind)
    }

    fn numbers(&self, name: &str) -> Result<Vec<f64>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| DemoError::MissingColumns(vec![name.to_string()]))?;
        Ok(self.rows.iter().filter_map(|row| row[idx].as_f64()).collect())
    }

    /// Linear-interpolated quantile of a numeric column; `None` when it has no numbers.
    pub fn quantile(&self, name: &str, q: f64) -> Result<Option<f64>> {
        let mut values = self.numbers(name)?;
        values.sort_by(|a, b| a.total_cmp(b));
        Ok(quantile_sorted(&values, q))
    }

    pub fn describe(&self, name: &str) -> Result<Option<Summary>> {
        let mut values = self.numbers(name)?;
        if values.is_empty() {
            return Ok(None);
        }
        values.sort_by(|a, b| a.total_cmp(b));
        let count = values.len();
        let mean = values.iter().sum::<f64>() / count as f64;
        let std = (count > 1).then(|| {
            let var = values.iter().map(|v| (v - mean).powi(2)).sum::<f64>() / (count - 1) as f64;
            var.sqrt()
        });
        Ok(Some(Summary {
            count,
            mean,
            std,
            min: values[0],
            q25: quantile_sorted(&values, 0.25).unwrap_or(values[0]),
            median: quantile_sorted(&values, 0.5).unwrap_or(values[0]),
            q75: quantile_sorted(&values, 0.75).unwrap_or(values[0]),
            max: values[count - 1],
        }))
    }

    /// Empty cells per column, in column order.
    pub fn missing_counts(&self) -> Vec<(String, usize)> {
        self.columns
            .iter()
            .enumerate()
            .map(|(i, c)| (c.clone(), self.rows.iter().filter(|r| r[i].is_empty()).count()))
            .collect()
    }

    /// Distinct non-empty values in first-seen order.
    pub fn unique_values(&self, name: &str) -> Result<Vec<Value>> {
        let idx = self
            .column_index(name)
            .ok_or_else(|| DemoError::MissingColumns(vec![name.to_string()]))?;
        let mut seen: Vec<Value> = Vec::new();
        for v in self.non_empty(idx) {
            if !seen.contains(v) {
                seen.push(v.clone());
            }
        }
        Ok(seen)
    }

    /// Groups rows by `key` and aggregates each `(column, agg, output name)`.
    /// Groups are sorted by key value; means are rounded to two decimals.
    pub fn group_by(&self, key: &str, aggs: &[(&str, Agg, &str)]) -> Result<Table> {
        let mut needed = vec![key];
        needed.extend(aggs.iter().map(|(c, _, _)| *c));
        self.require_columns(&needed)?;

        let key_idx = self.column_index(key).unwrap_or_default();
        let mut groups: BTreeMap<String, (Value, Vec<&Vec<Value>>)> = BTreeMap::new();
        for row in &self.rows {
            let k = &row[key_idx];
            if k.is_empty() {
                continue;
            }
            groups
                .entry(k.to_string())
                .or_insert_with(|| (k.clone(), Vec::new()))
                .1
                .push(row);
        }

        let mut groups: Vec<(Value, Vec<&Vec<Value>>)> = groups.into_values().collect();
        groups.sort_by(|a, b| a.0.sort_cmp(&b.0));

        let mut out = Table::new(std::iter::once(key).chain(aggs.iter().map(|(_, _, out)| *out)));
        for (key_value, rows) in groups {
            let mut cells = vec![key_value];
            for (col, agg, _) in aggs {
                let idx = self.column_index(col).unwrap_or_default();
                let nums: Vec<f64> = rows.iter().filter_map(|r| r[idx].as_f64()).collect();
                let cell = match agg {
                    Agg::Count => Value::Int(rows.iter().filter(|r| !r[idx].is_empty()).count() as i64),
                    Agg::Sum => {
                        let ints: Option<Vec<i64>> = rows
                            .iter()
                            .filter(|r| !r[idx].is_empty())
                            .map(|r| match r[idx] {
                                Value::Int(i) => Some(i),
                                _ => None,
                            })
                            .collect();
                        match ints {
                            Some(ints) => Value::Int(ints.iter().sum()),
                            None => Value::Float(nums.iter().sum()),
                        }
                    }
                    Agg::Mean => {
                        if nums.is_empty() {
                            Value::Empty
                        } else {
                            Value::Float(round2(nums.iter().sum::<f64>() / nums.len() as f64))
                        }
                    }
                };
                cells.push(cell);
            }
            out.rows.push(cells);
        }
        Ok(out)
    }

    /// One JSON object per row, keyed by column name.
    pub fn to_records(&self) -> Vec<Map<String, JsonValue>> {
        self.rows
            .iter()
            .map(|row| {
                self.columns
                    .iter()
                    .zip(row)
                    .map(|(c, v)| (c.clone(), v.to_json()))
                    .collect()
            })
            .collect()
    }

    /// Inverse of `to_records`; keys absent from a record become empty cells.
    pub fn from_records(columns: &[String], records: &[Map<String, JsonValue>]) -> Table {
        Table {
            columns: columns.to_vec(),
            rows: records
                .iter()
                .map(|rec| {
                    columns
                        .iter()
                        .map(|c| rec.get(c).map(Value::from_json).unwrap_or(Value::Empty))
                        .collect()
                })
                .collect(),
        }
    }
}

/// Borrowed view of one row, addressed by column name.
pub struct RowRef<'a> {
    columns: &'a [String],
    cells: &'a [Value],
}

impl<'a> RowRef<'a> {
    pub fn get(&self, name: &str) -> Option<&'a Value> {
        let idx = self.columns.iter().position(|c| c == name)?;
        self.cells.get(idx)
    }

    pub fn number(&self, name: &str) -> Option<f64> {
        self.get(name).and_then(Value::as_f64)
    }

    pub fn text(&self, name: &str) -> Option<&'a str> {
        self.get(name).and_then(Value::as_str)
    }
}

pub fn round2(v: f64) -> f64 {
    (v * 100.0).round() / 100.0
}

fn quantile_sorted(sorted: &[f64], q: f64) -> Option<f64> {
    if sorted.is_empty() {
        return None;
    }
    let pos = q.clamp(0.0, 1.0) * (sorted.len() - 1) as f64;
    let lower = pos.floor() as usize;
    let upper = pos.ceil() as usize;
    let frac = pos - lower as f64;
    Some(sorted[lower] + (sorted[upper] - sorted[lower]) * frac)
}

impl fmt::Display for Table {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.columns.is_empty() {
            return write!(f, "Empty Table\nColumns: []\nIndex: []");
        }
        let cells: Vec<Vec<String>> = self
            .rows
            .iter()
            .map(|row| row.iter().map(ToString::to_string).collect())
            .collect();
        let index_width = self.rows.len().saturating_sub(1).to_string().len();
        let widths: Vec<usize> = self
            .columns
            .iter()
            .enumerate()
            .map(|(i, c)| {
                cells
                    .iter()
                    .map(|r| r[i].chars().count())
                    .chain(std::iter::once(c.chars().count()))
                    .max()
                    .unwrap_or(0)
            })
            .collect();

        write!(f, "{:width$}", "", width = index_width)?;
        for (c, w) in self.columns.iter().zip(&widths) {
            write!(f, "  {:>w$}", c, w = w)?;
        }
        for (i, row) in cells.iter().enumerate() {
            write!(f, "\n{:<width$}", i, width = index_width)?;
            for (j, (cell, w)) in row.iter().zip(&widths).enumerate() {
                if self.rows[i][j].is_numeric() || self.rows[i][j].is_empty() {
                    write!(f, "  {:>w$}", cell, w = w)?;
                } else {
                    write!(f, "  {:<w$}", cell, w = w)?;
                }
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use assert_approx_eq::assert_approx_eq;
    use pretty_assertions::assert_eq;

    fn staff() -> Table {
        Table::from_columns(vec![
            ("Name", vec!["Ann".into(), "Bo".into(), "Cy".into(), "Di".into()]),
            ("Age", vec![Value::Int(25), Value::Int(30), Value::Int(35), Value::Int(28)]),
            ("Department", vec!["IT".into(), "HR".into(), "IT".into(), "HR".into()]),
            ("Salary", vec![Value::Int(50000), Value::Int(55000), Value::Int(60000), Value::Empty]),
        ])
        .unwrap()
    }

    #[test]
    fn shape_and_kinds() {
        let t = staff();
        assert_eq!(t.shape(), (4, 4));
        assert_eq!(t.numeric_columns(), vec!["Age", "Salary"]);
        assert_eq!(t.text_columns(), vec!["Name", "Department"]);
        assert_eq!(t.column_kind("Age"), Some("int64"));
        assert_eq!(t.column_kind("Salary"), Some("float64"));
        assert_eq!(t.column_kind("Nope"), None);
    }

    #[test]
    fn ragged_columns_are_rejected() {
        let err = Table::from_columns(vec![
            ("A", vec![Value::Int(1)]),
            ("B", vec![]),
        ]);
        assert!(err.is_err());
        let mut t = Table::new(["A", "B"]);
        assert!(t.push_row(vec![Value::Int(1)]).is_err());
    }

    #[test]
    fn describe_matches_linear_quantiles() {
        let t = staff();
        let s = t.describe("Age").unwrap().unwrap();
        assert_eq!(s.count, 4);
        assert_approx_eq!(s.mean, 29.5);
        assert_approx_eq!(s.std.unwrap(), 4.203173, 1e-6);
        assert_approx_eq!(s.q25, 27.25);
        assert_approx_eq!(s.median, 29.0);
        assert_approx_eq!(s.q75, 31.25);
        assert_eq!((s.min, s.max), (25.0, 35.0));
        assert_approx_eq!(t.quantile("Salary", 0.75).unwrap().unwrap(), 57500.0);
    }

    #[test]
    fn missing_and_unique() {
        let t = staff();
        let missing: Vec<usize> = t.missing_counts().into_iter().map(|(_, n)| n).collect();
        assert_eq!(missing, vec![0, 0, 0, 1]);
        assert_eq!(t.unique_values("Department").unwrap(), vec![Value::from("IT"), Value::from("HR")]);
    }

    #[test]
    fn group_by_sorts_groups_and_rounds_means() {
        let t = staff();
        let g = t
            .group_by(
                "Department",
                &[("Salary", Agg::Mean, "Avg Salary"), ("Salary", Agg::Count, "Count"), ("Age", Agg::Sum, "Age Total")],
            )
            .unwrap();
        assert_eq!(g.columns(), &["Department", "Avg Salary", "Count", "Age Total"]);
        assert_eq!(
            g.rows()[0],
            vec![Value::from("HR"), Value::Float(55000.0), Value::Int(1), Value::Int(58)]
        );
        assert_eq!(
            g.rows()[1],
            vec![Value::from("IT"), Value::Float(55000.0), Value::Int(2), Value::Int(60)]
        );
    }

    #[test]
    fn numeric_group_keys_sort_by_value() {
        let t = Table::from_columns(vec![
            ("Floor", vec![Value::Int(10), Value::Int(9), Value::Int(2), Value::Int(10)]),
            ("Rooms", vec![Value::Int(1), Value::Int(2), Value::Int(3), Value::Int(4)]),
        ])
        .unwrap();
        let g = t.group_by("Floor", &[("Rooms", Agg::Sum, "Rooms")]).unwrap();
        let floors: Vec<&Value> = g.column("Floor").unwrap();
        assert_eq!(floors, vec![&Value::Int(2), &Value::Int(9), &Value::Int(10)]);
        assert_eq!(g.rows()[2][1], Value::Int(5));
    }

    #[test]
    fn sort_order_across_kinds() {
        assert_eq!(Value::Int(2).sort_cmp(&Value::Float(10.0)), Ordering::Less);
        assert_eq!(Value::Float(2.5).sort_cmp(&Value::Int(2)), Ordering::Greater);
        assert_eq!(Value::Int(99).sort_cmp(&Value::from("1")), Ordering::Less);
        assert_eq!(Value::from("HR").sort_cmp(&Value::from("IT")), Ordering::Less);
    }

    #[test]
    fn filter_select_and_computed_columns() {
        let t = staff();
        let young = t.filter(|r| r.number("Age").is_some_and(|a| a < 30.0));
        assert_eq!(young.shape().0, 2);
        let names = young.select(&["Name"]).unwrap();
        assert_eq!(names.rows(), &[vec![Value::from("Ann")], vec![Value::from("Di")]]);

        let bonus = t.with_column("Bonus", |r| {
            r.number("Salary").map(|s| Value::Float(s * 0.1)).unwrap_or(Value::Empty)
        });
        assert_eq!(bonus.column("Bonus").unwrap()[0], &Value::Float(5000.0));
        assert_eq!(bonus.column("Bonus").unwrap()[3], &Value::Empty);
        assert!(matches!(t.select(&["Missing"]), Err(DemoError::MissingColumns(_))));
    }

    #[test]
    fn records_keep_types_except_dates() {
        let when = NaiveDateTime::parse_from_str("2023-01-15 00:00:00", DATETIME_FORMAT).unwrap();
        let t = Table::from_columns(vec![
            ("ID", vec![Value::Int(1)]),
            ("Score", vec![Value::Float(2.5)]),
            ("Start", vec![Value::DateTime(when)]),
            ("Note", vec![Value::Empty]),
        ])
        .unwrap();
        let records = t.to_records();
        assert_eq!(records[0]["Start"], JsonValue::from("2023-01-15 00:00:00"));
        let back = Table::from_records(t.columns(), &records);
        assert_eq!(
            back.rows()[0],
            vec![Value::Int(1), Value::Float(2.5), Value::from("2023-01-15 00:00:00"), Value::Empty]
        );
    }

    #[test]
    fn display_aligns_columns() {
        let t = staff().select(&["Name", "Age"]).unwrap().head(2);
        let printed = t.to_string();
        let lines: Vec<&str> = printed.lines().collect();
        assert_eq!(lines.len(), 3);
        assert_eq!(lines[0], "   Name  Age");
        assert_eq!(lines[1], "0  Ann    25");
    }
}
