use pretty_assertions::assert_eq;
use redis_excel::config::Config;
use redis_excel::error::DemoError;
use redis_excel::spreadsheet::{
    filter_and_transform, sample_departments, sample_employee_roster, sample_employees,
    SpreadsheetProcessor, FORMATTED_SHEET_NAME,
};
use redis_excel::table::{Table, Value};
use tempfile::TempDir;

fn processor() -> (TempDir, SpreadsheetProcessor) {
    let _ = env_logger::try_init();
    let dir = tempfile::tempdir().expect("create temp dir");
    let data_dir = dir.path().join("data");
    let config = Config::from_lookup(|key| match key {
        "DATA_DIR" => Some(data_dir.display().to_string()),
        _ => None,
    });
    let processor = SpreadsheetProcessor::new(&config).expect("create processor");
    (dir, processor)
}

#[test]
fn processor_creates_data_dir() {
    let (dir, processor) = processor();
    assert!(dir.path().join("data").is_dir());
    assert_eq!(processor.default_sheet(), "Sheet1");
}

#[test]
fn sample_workbook_reads_back_unchanged() {
    let (_dir, processor) = processor();
    let path = processor.create_sample_data().unwrap();
    assert_eq!(path, processor.sample_file());

    let table = processor.read_default_sheet(&path).unwrap();
    assert_eq!(table, sample_employees().unwrap());
    assert_eq!(processor.sheet_names(&path).unwrap(), vec!["Sheet1"]);
}

#[test]
fn raw_read_reports_dimensions() {
    let (_dir, processor) = processor();
    let path = processor.create_sample_data().unwrap();
    let (info, rows) = processor.read_raw(&path).unwrap();
    assert_eq!(info.name, "Sheet1");
    assert_eq!((info.rows, info.columns), (6, 6));
    assert_eq!(rows[0][1], Value::from("Name"));
    assert_eq!(rows[1][1], Value::from("John Doe"));
}

#[test]
fn multiple_sheets_keep_their_order() {
    let (_dir, processor) = processor();
    let path = processor.data_path("multi_sheet_data.xlsx");
    processor
        .write_sheets(
            &path,
            &[("Employees", &sample_employee_roster().unwrap()), ("Departments", &sample_departments().unwrap())],
        )
        .unwrap();

    let all = processor.read_all_sheets(&path).unwrap();
    let names: Vec<&str> = all.iter().map(|(n, _)| n.as_str()).collect();
    assert_eq!(names, vec!["Employees", "Departments"]);
    assert_eq!(all[0].1, sample_employee_roster().unwrap());
    assert_eq!(all[1].1, sample_departments().unwrap());
}

#[test]
fn missing_sheet_and_missing_file() {
    let (_dir, processor) = processor();
    let path = processor.create_sample_data().unwrap();
    assert!(matches!(
        processor.read_sheet(&path, "Nope"),
        Err(DemoError::Spreadsheet(_))
    ));

    let missing = processor.data_path("does_not_exist.xlsx");
    assert!(matches!(
        processor.read_default_sheet(&missing),
        Err(DemoError::FileNotFound(_))
    ));
    assert!(matches!(processor.read_csv(&missing), Err(DemoError::FileNotFound(_))));
}

#[test]
fn formatted_workbook_is_readable() {
    let (_dir, processor) = processor();
    let path = processor.data_path("formatted_data.xlsx");
    let table = sample_employees().unwrap();
    processor.write_formatted(&table, &path).unwrap();

    let back = processor.read_sheet(&path, FORMATTED_SHEET_NAME).unwrap();
    assert_eq!(back.columns(), table.columns());
    assert_eq!(back.shape(), table.shape());
}

#[test]
fn csv_round_trip() {
    let (_dir, processor) = processor();
    let path = processor.data_path("sample_data.csv");
    processor.write_csv(&sample_employees().unwrap(), &path).unwrap();

    let text = std::fs::read_to_string(&path).unwrap();
    assert!(text.starts_with("ID,Name,Age,Department,Salary,Start Date"));
    assert_eq!(processor.read_csv(&path).unwrap(), sample_employees().unwrap());
}

#[test]
fn row_limit_truncates_reads() {
    let _ = env_logger::try_init();
    let dir = tempfile::tempdir().unwrap();
    let data_dir = dir.path().to_path_buf();
    let config = Config::from_lookup(|key| match key {
        "DATA_DIR" => Some(data_dir.display().to_string()),
        "MAX_ROWS" => Some("2".to_string()),
        _ => None,
    });
    let processor = SpreadsheetProcessor::new(&config).unwrap();
    let path = processor.create_sample_data().unwrap();
    assert_eq!(processor.read_default_sheet(&path).unwrap().shape(), (2, 6));
}

fn mixed_table() -> Table {
    Table::from_columns(vec![
        ("Name", vec![Value::from("a"), Value::from("b"), Value::from("c")]),
        ("Score", vec![Value::Float(1.5), Value::Float(2.0), Value::Empty]),
        ("Active", vec![Value::Bool(true), Value::Bool(false), Value::Bool(true)]),
        ("Count", vec![Value::Int(1), Value::Int(2), Value::Int(3)]),
        ("Note", vec![Value::from("x"), Value::Empty, Value::from("z")]),
    ])
    .unwrap()
}

#[test]
fn mixed_types_survive_an_xlsx_round_trip() {
    let (_dir, processor) = processor();
    let path = processor.data_path("mixed.xlsx");
    processor.write_table(&mixed_table(), &path, "Sheet1").unwrap();
    assert_eq!(processor.read_default_sheet(&path).unwrap(), mixed_table());
}

#[test]
fn fractional_columns_stay_float_in_xlsx() {
    let (_dir, processor) = processor();
    let enriched = filter_and_transform(&sample_employees().unwrap()).unwrap().enriched;
    let path = processor.data_path("processed_data.xlsx");
    processor.write_table(&enriched, &path, "Sheet1").unwrap();

    let back = processor.read_default_sheet(&path).unwrap();
    let monthly: Vec<&Value> = back.column("Monthly Salary").unwrap();
    assert!(monthly.iter().all(|v| matches!(v, Value::Float(_))));
    assert_eq!(back.column("Monthly Salary"), enriched.column("Monthly Salary"));
    // every bonus is a whole number, so that column reads back as integers
    assert_eq!(back.column("Annual Bonus").unwrap()[0], &Value::Int(5000));
}

#[test]
fn trailing_empty_rows_are_not_stored() {
    let (_dir, processor) = processor();
    let table = Table::from_columns(vec![
        ("A", vec![Value::Int(1), Value::Empty]),
        ("B", vec![Value::from("x"), Value::Empty]),
    ])
    .unwrap();
    let path = processor.data_path("trailing.xlsx");
    processor.write_table(&table, &path, "Sheet1").unwrap();
    assert_eq!(processor.read_default_sheet(&path).unwrap().shape(), (1, 2));
}

#[test]
fn csv_round_trip_keeps_float_precision() {
    let (_dir, processor) = processor();
    let table = Table::from_columns(vec![
        ("x", vec![Value::Float(55000.0 / 12.0), Value::Float(0.1234567891), Value::Float(5000.0)]),
        ("flag", vec![Value::Bool(true), Value::Empty, Value::Bool(false)]),
    ])
    .unwrap();
    let path = processor.data_path("floats.csv");
    processor.write_csv(&table, &path).unwrap();
    assert_eq!(processor.read_csv(&path).unwrap(), table);

    let enriched = filter_and_transform(&sample_employees().unwrap()).unwrap().enriched;
    processor.write_csv(&enriched, &path).unwrap();
    assert_eq!(processor.read_csv(&path).unwrap(), enriched);
}
