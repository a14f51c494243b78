// src/demo/spreadsheet.rs
use super::{print_error, report};
use crate::config::Config;
use crate::error::Result;
use crate::spreadsheet::{
    analyze, filter_and_transform, sample_departments, sample_employee_roster, Analysis,
    SpreadsheetProcessor, Transformed,
};
use crate::table::Table;
use crate::utils::print_banner;

pub fn run_excel_operations(config: &Config) {
    print_banner("📊 Excel Operations Demo", 30);
    let processor = match SpreadsheetProcessor::new(config) {
        Ok(p) => {
            println!("📁 Excel processor initialized. Data directory: {}", p.data_dir().display());
            p
        }
        Err(e) => return print_error(&e),
    };

    report(processor.create_sample_data(), |path| {
        format!("Created sample Excel file: {}", path.display())
    });

    println!("\n📖 Reading as a table:");
    let sample = processor.sample_file();
    let table = report(processor.read_default_sheet(&sample), |t: &Table| {
        format!("Read Excel file: {} {:?}", sample.display(), t.shape())
    });
    if let Some(table) = &table {
        println!("📋 Columns: {:?}", table.columns());
        println!("\n🔍 First 5 rows:");
        println!("{}", table.head(5));
    }

    println!("\n📖 Reading raw rows:");
    match processor.read_raw(&sample) {
        Ok((info, rows)) => {
            println!("✅ Loaded Excel file: {}", sample.display());
            println!("📋 Sheet name: {}", info.name);
            println!("📊 Dimensions: {} rows x {} columns", info.rows, info.columns);
            println!("\n🔍 First 3 rows:");
            for (i, row) in rows.iter().take(3).enumerate() {
                let cells: Vec<String> = row.iter().map(ToString::to_string).collect();
                println!("Row {}: ({})", i + 1, cells.join(", "));
            }
        }
        Err(e) => print_error(&e),
    }

    let Some(table) = table else {
        println!("❌ No data to analyze");
        return;
    };

    match analyze(&table) {
        Ok(analysis) => print_analysis(&analysis),
        Err(e) => print_error(&e),
    }

    let transformed = match filter_and_transform(&table) {
        Ok(t) => t,
        Err(e) => return print_error(&e),
    };
    print_transformed(&transformed);

    let processed = processor.data_path("processed_data.xlsx");
    report(
        processor.write_table(&transformed.enriched, &processed, processor.default_sheet()),
        |_| format!("Written Excel file: {} {:?}", processed.display(), transformed.enriched.shape()),
    );

    let formatted = processor.data_path("formatted_data.xlsx");
    report(processor.write_formatted(&transformed.enriched, &formatted), |_| {
        format!("Created formatted Excel file: {}", formatted.display())
    });

    println!("\n📄 CSV round trip:");
    let csv_path = processor.data_path("sample_data.csv");
    report(processor.write_csv(&table, &csv_path), |_| {
        format!("Written CSV file: {}", csv_path.display())
    });
    if let Some(from_csv) = report(processor.read_csv(&csv_path), |t: &Table| {
        format!("Read CSV file: {:?}", t.shape())
    }) {
        println!("{}", from_csv.head(3));
    }
}

fn print_analysis(analysis: &Analysis) {
    print_banner("📈 Data Analysis:", 30);
    println!("📊 Dataset shape: {:?}", analysis.shape);
    println!("📋 Columns: {:?}", analysis.columns);

    println!("\n🔢 Data types:");
    let width = analysis.kinds.iter().map(|(c, _)| c.len()).max().unwrap_or(0);
    for (column, kind) in &analysis.kinds {
        println!("{:<width$}  {}", column, kind, width = width);
    }

    if !analysis.numeric_summary.is_empty() {
        println!("\n📊 Numeric columns summary:");
        print!("{:<6}", "");
        for (column, _) in &analysis.numeric_summary {
            print!("  {:>14}", column);
        }
        println!();
        let rows: [(&str, fn(&crate::table::Summary) -> f64); 8] = [
            ("count", |s| s.count as f64),
            ("mean", |s| s.mean),
            ("std", |s| s.std.unwrap_or(f64::NAN)),
            ("min", |s| s.min),
            ("25%", |s| s.q25),
            ("50%", |s| s.median),
            ("75%", |s| s.q75),
            ("max", |s| s.max),
        ];
        for (label, stat) in rows {
            print!("{:<6}", label);
            for (_, summary) in &analysis.numeric_summary {
                print!("  {:>14.6}", stat(summary));
            }
            println!();
        }
    }

    if analysis.total_missing() > 0 {
        println!("\n❓ Missing values:");
        for (column, n) in analysis.missing_values.iter().filter(|(_, n)| *n > 0) {
            println!("{}  {}", column, n);
        }
    } else {
        println!("\n✅ No missing values found");
    }

    if !analysis.categorical_summary.is_empty() {
        println!("\n📝 Categorical columns:");
        for cat in &analysis.categorical_summary {
            println!("  {}: {} unique values", cat.column, cat.unique_count);
            if let Some(values) = &cat.values {
                let values: Vec<String> = values.iter().map(ToString::to_string).collect();
                println!("    Values: {:?}", values);
            }
        }
    }
}

fn print_transformed(out: &Transformed) {
    print_banner("🔄 Data Filtering and Transformation:", 40);
    if let Some(young) = &out.under_30 {
        println!("👥 Employees under 30: {}", young.shape().0);
        println!("{}", young);
    }
    if let Some(it) = &out.it_department {
        println!("\n💻 IT Department employees: {}", it.shape().0);
        println!("{}", it);
    }
    if let Some(by_dept) = &out.salary_by_department {
        println!("\n💰 Average salary by department:");
        println!("{}", by_dept);
    }
    if let Ok(preview) = out
        .enriched
        .select(&["Name", "Salary", "Annual Bonus", "Monthly Salary"])
    {
        println!("\n💡 Added calculated columns:");
        println!("{}", preview.head(5));
    }
}

fn write_multi_sheet(processor: &SpreadsheetProcessor) -> Result<()> {
    let path = processor.data_path("multi_sheet_data.xlsx");
    let employees = sample_employee_roster()?;
    let departments = sample_departments()?;
    processor.write_sheets(&path, &[("Employees", &employees), ("Departments", &departments)])?;
    println!("✅ Created multi-sheet Excel file: {}", path.display());

    let employees = processor.read_sheet(&path, "Employees")?;
    println!("\n📋 Employees sheet:");
    println!("{}", employees);

    let departments = processor.read_sheet(&path, "Departments")?;
    println!("\n🏢 Departments sheet:");
    println!("{}", departments);

    let all = processor.read_all_sheets(&path)?;
    let names: Vec<&str> = all.iter().map(|(name, _)| name.as_str()).collect();
    println!("\n📚 All sheets: {:?}", names);
    Ok(())
}

pub fn run_multiple_sheets(config: &Config) {
    print_banner("📚 Multiple Sheets Demo", 30);
    let result = SpreadsheetProcessor::new(config).and_then(|p| write_multi_sheet(&p));
    if let Err(e) = result {
        println!("❌ Error with multiple sheets:");
        print_error(&e);
    }
}
