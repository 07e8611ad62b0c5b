//! CSV reporter for the tabular export

use std::fmt::Write;

use anyhow::Result;

use super::{export_rows, ExportRow};
use crate::report::ValidationReport;

pub struct CsvReporter;

impl CsvReporter {
    pub fn format(report: &ValidationReport) -> Result<String> {
        let mut output = String::new();
        write_record(&mut output, ExportRow::HEADERS.iter().copied())?;

        for row in export_rows(report) {
            let execution_time = format!("{:.2}", row.execution_time_ms);
            write_record(
                &mut output,
                [
                    row.rule_id.as_str(),
                    row.description.as_str(),
                    row.category.as_str(),
                    row.severity.as_str(),
                    row.status.as_str(),
                    row.details.as_str(),
                    execution_time.as_str(),
                ],
            )?;
        }
        Ok(output)
    }
}

fn write_record<'a, I>(output: &mut String, fields: I) -> Result<()>
where
    I: IntoIterator<Item = &'a str>,
{
    let line = fields.into_iter().map(escape).collect::<Vec<_>>().join(",");
    write!(output, "{}\r\n", line)?;
    Ok(())
}

/// Quote a field when it contains a delimiter, quote or line break
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}
