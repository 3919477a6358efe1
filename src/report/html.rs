//! HTML rendering of the level-grouped aggregation.

use chrono::NaiveDate;

use crate::domain::{AddressGroups, AddressRecord, LevelCatalog, WIRE_DATE_FORMAT};

const TABLE_STYLE: &str = "table { width: 100%; border-collapse: collapse; } \
th, td { border: 1px solid black; padding: 8px; text-align: left; } \
th { background-color: #f2f2f2; }";

/// A rendered document plus the level codes that had no catalog entry.
#[derive(Debug, Clone)]
pub struct RenderedReport {
    pub html: String,
    /// Levels present in the aggregation but absent from the catalog; their
    /// sections are skipped and the caller decides how loudly to say so.
    pub unknown_levels: Vec<u32>,
}

/// Render the grouped records into a self-contained HTML document.
///
/// Sections appear in ascending level order. Rows within a section are
/// sorted by name ascending, case-sensitive ordinal comparison (the sort is
/// stable, so equal names keep scan order). Two renders of the same
/// aggregation produce identical bytes.
pub fn render_report(
    catalog: &LevelCatalog,
    groups: &AddressGroups,
    report_date: NaiveDate,
) -> RenderedReport {
    let mut html = String::new();
    let mut unknown_levels = Vec::new();

    html.push_str("<html><body>\n");
    html.push_str(&format!(
        "<h1>Отчет по добавленным адресам за {}</h1>\n",
        report_date.format(WIRE_DATE_FORMAT)
    ));
    html.push_str(&format!("<style>{TABLE_STYLE}</style>\n"));

    for (&level, records) in groups {
        let Some(title) = catalog.get(&level) else {
            unknown_levels.push(level);
            continue;
        };

        let mut rows: Vec<&AddressRecord> = records.iter().collect();
        rows.sort_by(|a, b| a.name.cmp(&b.name));

        html.push_str(&format!("<h2>{}</h2>\n", escape(title)));
        html.push_str("<table>\n<tr><th>Тип объекта</th><th>Наименование</th></tr>\n");
        for row in rows {
            html.push_str(&format!(
                "<tr><td>{}</td><td>{}</td></tr>\n",
                escape(&row.type_name),
                escape(&row.name)
            ));
        }
        html.push_str("</table>\n");
    }

    html.push_str("</body></html>\n");
    RenderedReport {
        html,
        unknown_levels,
    }
}

/// Escape text for HTML element content.
///
/// quick-xml unescapes entities on read, so anything attribute-derived must
/// be re-escaped on the way out.
fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            _ => out.push(ch),
        }
    }
    out
}
