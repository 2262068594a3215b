//! HTML pages

use std::fmt::Write;
use veil_core::{HistoryRecord, SensitiveCounts};
use veil_engine::ProcessResult;

pub const UPLOAD_FORM: &str = include_str!("assets/upload_form.html");

/// Escape text for element content and double-quoted attributes
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, body: &str) -> String {
    format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
    <meta charset="utf-8">
    <title>veil - {title}</title>
    <style>
        body {{ font-family: system-ui, sans-serif; max-width: 60rem; margin: 2rem auto; }}
        table {{ border-collapse: collapse; }}
        th, td {{ border: 1px solid #ccc; padding: 0.3rem 0.6rem; text-align: left; }}
        img {{ max-width: 100%; }}
        nav a {{ margin-right: 1rem; }}
        .notice {{ color: #8a5a00; }}
    </style>
</head>
<body>
    <nav><a href="/">Upload</a><a href="/history">History</a></nav>
{body}
</body>
</html>
"#,
        title = escape(title),
        body = body
    )
}

fn counts_list(counts: Option<SensitiveCounts>) -> String {
    match counts {
        Some(c) => format!(
            "<ul><li>Emails: {}</li><li>Phones: {}</li><li>Cards: {}</li></ul>",
            c.email, c.phone, c.card
        ),
        None => "<p>No category breakdown.</p>".to_string(),
    }
}

fn optional_count(count: Option<u32>) -> String {
    count.map(|n| n.to_string()).unwrap_or_else(|| "-".to_string())
}

pub fn result_page(result: &ProcessResult) -> String {
    let record = &result.record;
    let processed = escape(&record.processed_filename);

    let mut body = String::new();
    let _ = writeln!(body, "    <h1>Done</h1>");
    let _ = writeln!(
        body,
        "    <p>Original: {}</p>",
        escape(&record.original_filename)
    );
    let _ = writeln!(body, "    <p>Output: {}</p>", processed);
    let _ = writeln!(body, "    <p>Mode: {}</p>", record.mode);
    if let Some(fallback) = &result.fallback {
        let _ = writeln!(
            body,
            "    <p class=\"notice\">{}</p>",
            escape(&fallback.to_string())
        );
    }
    let _ = writeln!(body, "    <h2>Sensitive data</h2>");
    let _ = writeln!(body, "    {}", counts_list(result.counts));
    let _ = writeln!(
        body,
        "    <p><a href=\"/uploads/{0}\" download>Download</a></p>\n    <img src=\"/uploads/{0}\" alt=\"{0}\">",
        processed
    );

    layout("result", &body)
}

pub fn history_page(records: &[HistoryRecord]) -> String {
    let mut body = String::new();
    let _ = writeln!(body, "    <h1>History</h1>");

    if records.is_empty() {
        let _ = writeln!(body, "    <p>Nothing processed yet.</p>");
        return layout("history", &body);
    }

    let _ = writeln!(
        body,
        "    <table>\n      <tr><th>Original</th><th>Processed</th><th>Mode</th><th>Blur</th><th>Emails</th><th>Phones</th><th>Cards</th><th>Time</th></tr>"
    );
    for record in records {
        let processed = escape(&record.processed_filename);
        let _ = writeln!(
            body,
            "      <tr><td>{original}</td><td><a href=\"/uploads/{processed}\">{processed}</a></td><td>{mode}</td><td>{blur}</td><td>{emails}</td><td>{phones}</td><td>{cards}</td><td>{created_at}</td></tr>",
            original = escape(&record.original_filename),
            processed = processed,
            mode = record.mode,
            blur = record.blur_level,
            emails = optional_count(record.emails),
            phones = optional_count(record.phones),
            cards = optional_count(record.cards),
            created_at = escape(&record.created_at),
        );
    }
    let _ = writeln!(body, "    </table>");

    layout("history", &body)
}
