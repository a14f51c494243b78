// src/spreadsheet.rs
//! Spreadsheet file I/O on top of `calamine` (reading) and `rust_xlsxwriter`
//! (writing), CSV through `csv`, and the analysis/transform steps the demos
//! run on employee data.

use crate::config::Config;
use crate::error::{DemoError, Result};
use crate::table::{Agg, Summary, Table, Value, DATETIME_FORMAT};
use calamine::{open_workbook_auto, Data, Reader};
use chrono::{NaiveDate, NaiveDateTime};
use log::{debug, info, warn};
use rust_xlsxwriter::{Color, Format, FormatAlign, FormatPattern, Workbook, Worksheet};
use std::fs;
use std::path::{Path, PathBuf};

pub const FORMATTED_SHEET_NAME: &str = "Formatted Data";
const HEADER_FILL: u32 = 0x366092;
const MAX_COLUMN_WIDTH: usize = 30;
const EXCEL_DATETIME_FORMAT: &str = "yyyy-mm-dd hh:mm:ss";

/// Name and dimensions of a worksheet as reported by the low-level reader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SheetInfo {
    pub name: String,
    pub rows: usize,
    pub columns: usize,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategoricalSummary {
    pub column: String,
    pub unique_count: usize,
    /// Only filled in when there are at most ten distinct values.
    pub values: Option<Vec<Value>>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Analysis {
    pub shape: (usize, usize),
    pub columns: Vec<String>,
    pub kinds: Vec<(String, &'static str)>,
    pub numeric_summary: Vec<(String, Summary)>,
    pub missing_values: Vec<(String, usize)>,
    pub categorical_summary: Vec<CategoricalSummary>,
}

impl Analysis {
    pub fn total_missing(&self) -> usize {
        self.missing_values.iter().map(|(_, n)| n).sum()
    }
}

/// Output of `filter_and_transform`. Sections whose source columns are
/// absent stay `None`.
#[derive(Debug, Clone, PartialEq)]
pub struct Transformed {
    pub under_30: Option<Table>,
    pub it_department: Option<Table>,
    pub salary_by_department: Option<Table>,
    /// The input plus `Annual Bonus` and `Monthly Salary` when `Salary` exists.
    pub enriched: Table,
}

#[derive(Debug, Clone)]
pub struct SpreadsheetProcessor {
    data_dir: PathBuf,
    default_sheet: String,
    sample_file: PathBuf,
    max_rows: usize,
}

impl SpreadsheetProcessor {
    /// Creates the data directory if it does not exist yet.
    pub fn new(config: &Config) -> Result<Self> {
        fs::create_dir_all(&config.data_dir)?;
        debug!("Spreadsheet processor using {}", config.data_dir.display());
        Ok(Self {
            data_dir: config.data_dir.clone(),
            default_sheet: config.default_sheet_name.clone(),
            sample_file: config.sample_file(),
            max_rows: config.max_rows,
        })
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn default_sheet(&self) -> &str {
        &self.default_sheet
    }

    pub fn data_path(&self, file_name: &str) -> PathBuf {
        self.data_dir.join(file_name)
    }

    pub fn sample_file(&self) -> PathBuf {
        self.sample_file.clone()
    }

    /// Writes the five-employee sample workbook and returns its path.
    pub fn create_sample_data(&self) -> Result<PathBuf> {
        let path = self.sample_file();
        self.write_table(&sample_employees()?, &path, &self.default_sheet)?;
        info!("Created sample workbook {}", path.display());
        Ok(path)
    }

    pub fn sheet_names(&self, path: &Path) -> Result<Vec<String>> {
        ensure_exists(path)?;
        let workbook = open_workbook_auto(path)?;
        Ok(workbook.sheet_names())
    }

    /// Reads `sheet` with its first row as the header. At most `max_rows` data
    /// rows are kept; short rows are padded with empty cells. Trailing rows
    /// with no values are not stored in xlsx and do not come back.
    pub fn read_sheet(&self, path: &Path, sheet: &str) -> Result<Table> {
        ensure_exists(path)?;
        let mut workbook = open_workbook_auto(path)?;
        if !workbook.sheet_names().iter().any(|s| s == sheet) {
            return Err(DemoError::Spreadsheet(format!(
                "worksheet '{}' not found in {}",
                sheet,
                path.display()
            )));
        }
        let range = workbook.worksheet_range(sheet)?;
        let mut rows = range.rows();
        let header = rows
            .next()
            .ok_or_else(|| DemoError::EmptySheet(format!("{} [{}]", path.display(), sheet)))?;
        let columns: Vec<String> = header
            .iter()
            .enumerate()
            .map(|(i, cell)| match cell {
                Data::Empty => format!("Unnamed: {}", i),
                other => convert_cell(other).to_string(),
            })
            .collect();

        let mut body = Vec::new();
        for (n, row) in rows.enumerate() {
            if n >= self.max_rows {
                warn!(
                    "{} [{}] has more than {} rows, the rest were skipped",
                    path.display(),
                    sheet,
                    self.max_rows
                );
                break;
            }
            let mut cells: Vec<Value> = row.iter().map(convert_cell).collect();
            cells.resize(columns.len(), Value::Empty);
            body.push(cells);
        }
        unify_numeric_columns(&mut body);

        let mut table = Table::new(columns);
        for cells in body {
            table.push_row(cells)?;
        }
        debug!("Read {:?} from {} [{}]", table.shape(), path.display(), sheet);
        Ok(table)
    }

    pub fn read_default_sheet(&self, path: &Path) -> Result<Table> {
        self.read_sheet(path, &self.default_sheet)
    }

    /// Every worksheet in workbook order.
    pub fn read_all_sheets(&self, path: &Path) -> Result<Vec<(String, Table)>> {
        self.sheet_names(path)?
            .into_iter()
            .map(|name| {
                let table = self.read_sheet(path, &name)?;
                Ok((name, table))
            })
            .collect()
    }

    /// The first worksheet as raw rows, header included, with its dimensions.
    pub fn read_raw(&self, path: &Path) -> Result<(SheetInfo, Vec<Vec<Value>>)> {
        ensure_exists(path)?;
        let mut workbook = open_workbook_auto(path)?;
        let name = workbook
            .sheet_names()
            .into_iter()
            .next()
            .ok_or_else(|| DemoError::EmptySheet(path.display().to_string()))?;
        let range = workbook.worksheet_range(&name)?;
        let (rows, columns) = range.get_size();
        let mut data: Vec<Vec<Value>> = range
            .rows()
            .map(|row| row.iter().map(convert_cell).collect())
            .collect();
        unify_numeric_columns(&mut data);
        Ok((SheetInfo { name, rows, columns }, data))
    }

    pub fn write_table(&self, table: &Table, path: &Path, sheet: &str) -> Result<()> {
        self.write_sheets(path, &[(sheet, table)])
    }

    /// One worksheet per `(name, table)`, in order.
    pub fn write_sheets(&self, path: &Path, sheets: &[(&str, &Table)]) -> Result<()> {
        let mut workbook = Workbook::new();
        let date_format = Format::new().set_num_format(EXCEL_DATETIME_FORMAT);
        for (name, table) in sheets {
            let worksheet = workbook.add_worksheet();
            worksheet.set_name(*name)?;
            write_header(worksheet, table, None)?;
            write_body(worksheet, table, &date_format)?;
        }
        workbook.save(path)?;
        debug!("Wrote {} sheet(s) to {}", sheets.len(), path.display());
        Ok(())
    }

    /// Bold white header on a blue fill, centered, and each column sized to
    /// its longest value plus two (capped at 30).
    pub fn write_formatted(&self, table: &Table, path: &Path) -> Result<()> {
        let mut workbook = Workbook::new();
        let header_format = Format::new()
            .set_bold()
            .set_font_color(Color::White)
            .set_background_color(Color::RGB(HEADER_FILL))
            .set_pattern(FormatPattern::Solid)
            .set_align(FormatAlign::Center);
        let date_format = Format::new().set_num_format(EXCEL_DATETIME_FORMAT);

        let worksheet = workbook.add_worksheet();
        worksheet.set_name(FORMATTED_SHEET_NAME)?;
        write_header(worksheet, table, Some(&header_format))?;
        write_body(worksheet, table, &date_format)?;
        for (col, width) in column_widths(table).into_iter().enumerate() {
            worksheet.set_column_width(col as u16, width as f64)?;
        }
        workbook.save(path)?;
        Ok(())
    }

    pub fn write_csv(&self, table: &Table, path: &Path) -> Result<()> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record(table.columns())?;
        for row in table.rows() {
            writer.write_record(row.iter().map(csv_field))?;
        }
        writer.flush()?;
        Ok(())
    }

    /// Reads a CSV with a header row, inferring int, float, bool and datetime cells.
    pub fn read_csv(&self, path: &Path) -> Result<Table> {
        ensure_exists(path)?;
        let mut reader = csv::Reader::from_path(path)?;
        let columns: Vec<String> = reader.headers()?.iter().map(str::to_string).collect();
        let mut table = Table::new(columns.clone());
        for (n, record) in reader.records().enumerate() {
            if n >= self.max_rows {
                warn!("{} has more than {} rows, the rest were skipped", path.display(), self.max_rows);
                break;
            }
            let record = record?;
            let mut cells: Vec<Value> = record.iter().map(infer_value).collect();
            cells.resize(columns.len(), Value::Empty);
            table.push_row(cells)?;
        }
        Ok(table)
    }
}

/// Floats keep full precision and a decimal point, so they read back as floats.
fn csv_field(value: &Value) -> String {
    match value {
        Value::Empty => String::new(),
        Value::Float(v) if v.is_finite() && v.fract() != 0.0 => v.to_string(),
        other => other.to_string(),
    }
}

fn ensure_exists(path: &Path) -> Result<()> {
    if path.exists() {
        Ok(())
    } else {
        Err(DemoError::FileNotFound(path.display().to_string()))
    }
}

fn convert_cell(cell: &Data) -> Value {
    match cell {
        Data::Empty => Value::Empty,
        Data::Int(i) => Value::Int(*i),
        Data::Float(f) => Value::Float(*f),
        Data::String(s) => Value::Text(s.clone()),
        Data::Bool(b) => Value::Bool(*b),
        Data::DateTime(dt) => dt
            .as_datetime()
            .map(Value::DateTime)
            .unwrap_or_else(|| Value::Float(dt.as_f64())),
        Data::DateTimeIso(s) => parse_datetime(s)
            .map(Value::DateTime)
            .unwrap_or_else(|| Value::Text(s.clone())),
        Data::DurationIso(s) => Value::Text(s.clone()),
        Data::Error(e) => Value::Text(format!("#{:?}", e)),
    }
}

fn is_integral(v: f64) -> bool {
    v.fract() == 0.0 && v.abs() < 9.0e15
}

/// xlsx stores every number as a double. A column whose numbers are all
/// integral becomes `Int`; any other column with numbers becomes all `Float`.
fn unify_numeric_columns(rows: &mut [Vec<Value>]) {
    let width = rows.iter().map(Vec::len).max().unwrap_or(0);
    for col in 0..width {
        let mut numbers = rows.iter().filter_map(|r| r.get(col)).filter(|v| v.is_numeric());
        let all_integral = numbers.all(|v| match v {
            Value::Float(f) => is_integral(*f),
            _ => true,
        });
        for cell in rows.iter_mut().filter_map(|r| r.get_mut(col)) {
            *cell = match *cell {
                Value::Float(f) if all_integral => Value::Int(f as i64),
                Value::Int(i) if !all_integral => Value::Float(i as f64),
                _ => continue,
            };
        }
    }
}

fn parse_datetime(s: &str) -> Option<NaiveDateTime> {
    NaiveDateTime::parse_from_str(s, DATETIME_FORMAT)
        .or_else(|_| NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S"))
        .ok()
        .or_else(|| {
            NaiveDate::parse_from_str(s, "%Y-%m-%d")
                .ok()
                .and_then(|d| d.and_hms_opt(0, 0, 0))
        })
}

fn infer_value(raw: &str) -> Value {
    let s = raw.trim();
    if s.is_empty() {
        return Value::Empty;
    }
    if let Ok(i) = s.parse::<i64>() {
        return Value::Int(i);
    }
    if let Ok(f) = s.parse::<f64>() {
        return Value::Float(f);
    }
    if s.eq_ignore_ascii_case("true") {
        return Value::Bool(true);
    }
    if s.eq_ignore_ascii_case("false") {
        return Value::Bool(false);
    }
    if let Ok(dt) = NaiveDateTime::parse_from_str(s, DATETIME_FORMAT) {
        return Value::DateTime(dt);
    }
    Value::Text(raw.to_string())
}

fn write_header(worksheet: &mut Worksheet, table: &Table, format: Option<&Format>) -> Result<()> {
    for (col, name) in table.columns().iter().enumerate() {
        match format {
            Some(format) => worksheet.write_string_with_format(0, col as u16, name, format)?,
            None => worksheet.write_string(0, col as u16, name)?,
        };
    }
    Ok(())
}

fn write_body(worksheet: &mut Worksheet, table: &Table, date_format: &Format) -> Result<()> {
    for (r, row) in table.rows().iter().enumerate() {
        let r = (r + 1) as u32;
        for (c, value) in row.iter().enumerate() {
            let c = c as u16;
            match value {
                Value::Empty => continue,
                Value::Bool(b) => worksheet.write_boolean(r, c, *b)?,
                Value::Int(i) => worksheet.write_number(r, c, *i as f64)?,
                Value::Float(f) => worksheet.write_number(r, c, *f)?,
                Value::Text(s) => worksheet.write_string(r, c, s)?,
                Value::DateTime(dt) => worksheet.write_datetime_with_format(r, c, dt, date_format)?,
            };
        }
    }
    Ok(())
}

/// `min(longest rendered value + 2, 30)` per column, header included.
pub fn column_widths(table: &Table) -> Vec<usize> {
    table
        .columns()
        .iter()
        .enumerate()
        .map(|(i, name)| {
            let longest = table
                .rows()
                .iter()
                .map(|row| row[i].to_string().chars().count())
                .chain(std::iter::once(name.chars().count()))
                .max()
                .unwrap_or(0);
            (longest + 2).min(MAX_COLUMN_WIDTH)
        })
        .collect()
}

pub fn analyze(table: &Table) -> Result<Analysis> {
    let mut numeric_summary = Vec::new();
    for column in table.numeric_columns() {
        if let Some(summary) = table.describe(column)? {
            numeric_summary.push((column.to_string(), summary));
        }
    }

    let mut categorical_summary = Vec::new();
    for column in table.text_columns() {
        let unique = table.unique_values(column)?;
        categorical_summary.push(CategoricalSummary {
            column: column.to_string(),
            unique_count: unique.len(),
            values: (unique.len() <= 10).then_some(unique),
        });
    }

    Ok(Analysis {
        shape: table.shape(),
        columns: table.columns().to_vec(),
        kinds: table
            .columns()
            .iter()
            .filter_map(|c| table.column_kind(c).map(|k| (c.clone(), k)))
            .collect(),
        numeric_summary,
        missing_values: table.missing_counts(),
        categorical_summary,
    })
}

/// Keeps whichever of `names` the table has, in the given order. With none
/// of them present the table is returned whole.
fn select_available(table: &Table, names: &[&str]) -> Result<Table> {
    let present: Vec<&str> = names.iter().copied().filter(|n| table.column_index(n).is_some()).collect();
    if present.is_empty() {
        return Ok(table.clone());
    }
    table.select(&present)
}

pub fn filter_and_transform(table: &Table) -> Result<Transformed> {
    let under_30 = match table.column_index("Age") {
        Some(_) => {
            let young = table.filter(|r| r.number("Age").is_some_and(|age| age < 30.0));
            Some(select_available(&young, &["Name", "Age", "Department"])?)
        }
        None => None,
    };

    let it_department = match table.column_index("Department") {
        Some(_) => {
            let it = table.filter(|r| r.text("Department") == Some("IT"));
            Some(select_available(&it, &["Name", "Age", "Salary"])?)
        }
        None => None,
    };

    let salary_by_department = if table.has_columns(&["Department", "Salary"]) {
        Some(table.group_by(
            "Department",
            &[("Salary", Agg::Mean, "mean"), ("Salary", Agg::Count, "count")],
        )?)
    } else {
        None
    };

    let enriched = if table.column_index("Salary").is_some() {
        table
            .with_column("Annual Bonus", |r| {
                r.number("Salary").map(|s| Value::Float(s * 0.1)).unwrap_or(Value::Empty)
            })
            .with_column("Monthly Salary", |r| {
                r.number("Salary").map(|s| Value::Float(s / 12.0)).unwrap_or(Value::Empty)
            })
    } else {
        table.clone()
    };

    Ok(Transformed {
        under_30,
        it_department,
        salary_by_department,
        enriched,
    })
}

fn date(y: i32, m: u32, d: u32) -> Value {
    NaiveDate::from_ymd_opt(y, m, d)
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(Value::DateTime)
        .unwrap_or(Value::Empty)
}

fn texts(values: &[&str]) -> Vec<Value> {
    values.iter().map(|v| Value::from(*v)).collect()
}

fn ints(values: &[i64]) -> Vec<Value> {
    values.iter().map(|v| Value::Int(*v)).collect()
}

fn build(columns: Vec<(&str, Vec<Value>)>) -> Result<Table> {
    Table::from_columns(columns)
}

pub fn sample_employees() -> Result<Table> {
    build(vec![
        ("ID", ints(&[1, 2, 3, 4, 5])),
        (
            "Name",
            texts(&["John Doe", "Jane Smith", "Bob Johnson", "Alice Brown", "Charlie Wilson"]),
        ),
        ("Age", ints(&[25, 30, 35, 28, 42])),
        ("Department", texts(&["IT", "HR", "Finance", "IT", "Marketing"])),
        ("Salary", ints(&[50000, 55000, 60000, 52000, 65000])),
        (
            "Start Date",
            vec![
                date(2023, 1, 15),
                date(2022, 3, 20),
                date(2021, 7, 10),
                date(2023, 2, 1),
                date(2020, 11, 5),
            ],
        ),
    ])
}

pub fn sample_employee_roster() -> Result<Table> {
    build(vec![
        ("ID", ints(&[1, 2, 3, 4])),
        ("Name", texts(&["John", "Jane", "Bob", "Alice"])),
        ("Department", texts(&["IT", "HR", "Finance", "IT"])),
    ])
}

pub fn sample_departments() -> Result<Table> {
    build(vec![
        ("Department", texts(&["IT", "HR", "Finance", "Marketing"])),
        ("Budget", ints(&[100000, 80000, 120000, 90000])),
        ("Head", texts(&["Smith", "Johnson", "Williams", "Brown"])),
    ])
}
