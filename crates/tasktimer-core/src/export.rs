//! CSV export of the task collection.

use std::io::Write;

use crate::task::Task;

const HEADER: [&str; 7] = [
    "ID",
    "Name",
    "Duration (minutes)",
    "Completed",
    "Created At",
    "Completed At",
    "Tags",
];

/// Quote a field when it contains a separator, quote or line break.
fn escape(field: &str) -> String {
    if field.contains([',', '"', '\n', '\r']) {
        format!("\"{}\"", field.replace('"', "\"\""))
    } else {
        field.to_string()
    }
}

fn write_row<W: Write>(out: &mut W, fields: &[String]) -> std::io::Result<()> {
    let line: Vec<String> = fields.iter().map(|f| escape(f)).collect();
    writeln!(out, "{}", line.join(","))
}

/// Write `tasks` as CSV with a header row. Tags are joined with `;`.
pub fn write_csv<'a, W, I>(out: &mut W, tasks: I) -> std::io::Result<usize>
where
    W: Write,
    I: IntoIterator<Item = &'a Task>,
{
    write_row(out, &HEADER.map(String::from))?;
    let mut rows = 0;
    for task in tasks {
        write_row(
            out,
            &[
                task.id.to_string(),
                task.name.clone(),
                task.duration_minutes.to_string(),
                task.completed.to_string(),
                task.created_at.to_rfc3339(),
                task.completed_at.map(|t| t.to_rfc3339()).unwrap_or_default(),
                task.tags.join(";"),
            ],
        )?;
        rows += 1;
    }
    Ok(rows)
}
