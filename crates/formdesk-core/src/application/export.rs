//! CSV export of recorded responses.

use crate::domain::aggregates::{FormSchema, ResponseRecord};

const RESPONSE_ID_HEADER: &str = "Response ID";
const SUBMITTED_HEADER: &str = "Submitted Date";
const SUBMITTED_FORMAT: &str = "%Y-%m-%d %H:%M:%S UTC";

/// Quote a cell, doubling embedded quotes.
fn quote(cell: &str) -> String {
    format!("\"{}\"", cell.replace('"', "\"\""))
}

fn row<I, S>(cells: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    cells
        .into_iter()
        .map(|c| quote(c.as_ref()))
        .collect::<Vec<_>>()
        .join(",")
}

/// Render responses as CSV, one column per schema field in schema order.
///
/// Answers to fields that are no longer in the schema are not exported.
pub fn to_csv(schema: &FormSchema, responses: &[ResponseRecord]) -> String {
    let header = row(
        [RESPONSE_ID_HEADER, SUBMITTED_HEADER]
            .into_iter()
            .map(str::to_string)
            .chain(schema.fields().iter().map(|f| f.label.clone())),
    );

    let mut lines = Vec::with_capacity(responses.len() + 1);
    lines.push(header);
    for response in responses {
        let cells = [
            response.id().to_string(),
            response.submitted_at().format(SUBMITTED_FORMAT).to_string(),
        ]
        .into_iter()
        .chain(schema.fields().iter().map(|field| {
            response
                .value(&field.id)
                .map(ToString::to_string)
                .unwrap_or_default()
        }));
        lines.push(row(cells));
    }
    lines.join("\n")
}

/// Download name for a form's export: non-alphanumerics become `_`.
pub fn file_name(form_name: &str) -> String {
    let stem: String = form_name
        .chars()
        .map(|c| if c.is_ascii_alphanumeric() { c } else { '_' })
        .collect();
    format!("{stem}_responses.csv")
}
