//! HTML escaping and severity badges

use crate::model::{Severity, SeverityCounts};

/// Escape text for insertion into HTML content or attribute values.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#039;"),
            _ => out.push(c),
        }
    }
    out
}

/// Badge markup for every severity with a non-zero count, ordered
/// Error, Warning, Info and separated by a single space.
pub fn severity_badges(counts: &SeverityCounts) -> String {
    Severity::BADGE_ORDER
        .iter()
        .filter_map(|severity| {
            let count = counts.get(*severity);
            (count > 0).then(|| {
                format!(
                    r#"<span class="badge badge-{}">{}: {}</span>"#,
                    severity.as_str(),
                    severity.label(),
                    count
                )
            })
        })
        .collect::<Vec<_>>()
        .join(" ")
}
