// src/merge/parse.rs
//
// Update files are markdown tables, one announcement per row:
//
//   ||**Name** ([CODE](link))|DD.MM.YYYY|amount|type|DD.MM.YYYY|yield|
//
// Lines that are not announcement rows (headers, separators, date-group
// titles, prose) are skipped silently. Rows that look like announcements are
// returned as text; validation happens in the merger.

use crate::config::consts::{COL_COMPANY, MD_DAY_MARKER, MD_MONTH_MARKERS, MD_SEP};
use crate::core::sanitize::canonical_company;
use crate::model::RawEntry;

const MIN_CELLS: usize = 6;

fn is_date_group_header(line: &str) -> bool {
    line.contains(MD_DAY_MARKER) && MD_MONTH_MARKERS.iter().any(|m| line.contains(m))
}

/// Cells of a table row, with the outer empty cells dropped.
fn split_cells(line: &str) -> Vec<&str> {
    let mut parts: Vec<&str> = line.split(MD_SEP).map(str::trim).collect();
    if parts.first().is_some_and(|p| p.is_empty()) { parts.remove(0); }
    if parts.last().is_some_and(|p| p.is_empty()) { parts.pop(); }
    parts
}

/// One line → entry, or None when the line is not an announcement row.
pub fn parse_line(line: &str, line_no: usize) -> Option<RawEntry> {
    let line = line.trim();
    if line.is_empty() || line.contains(COL_COMPANY) || is_date_group_header(line) {
        return None;
    }
    if line.contains("--") || !line.starts_with(MD_SEP) {
        return None;
    }

    let cells = split_cells(line);
    if cells.len() < MIN_CELLS || cells[1].is_empty() {
        return None;
    }

    let cell = |i: usize| cells.get(i).map(|c| c.to_string()).unwrap_or_default();
    Some(RawEntry {
        line: line_no,
        company: canonical_company(cells[1]),
        ex_date: cell(2),
        amount: cell(3),
        payment_date: cell(5),
        yield_text: cell(6),
    })
}

pub fn parse_entries(text: &str) -> Vec<RawEntry> {
    text.lines()
        .enumerate()
        .filter_map(|(i, l)| parse_line(l, i + 1))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_markdown_row() {
        let line = "||**בנק לאומי** ([LUMI](https://x/604611))|15.06.2025|0.55|רגיל|25.06.2025|1.2%|";
        let e = parse_line(line, 7).unwrap();
        assert_eq!(e.line, 7);
        assert_eq!(e.company, "בנק לאומי (LUMI)");
        assert_eq!(e.ex_date, "15.06.2025");
        assert_eq!(e.amount, "0.55");
        assert_eq!(e.payment_date, "25.06.2025");
        assert_eq!(e.yield_text, "1.2%");
    }

    #[test]
    fn yield_is_optional() {
        let e = parse_line("||Alpha (ALP)|15.06.2025|1||25.06.2025|", 1).unwrap();
        assert_eq!(e.payment_date, "25.06.2025");
        assert_eq!(e.yield_text, "");
    }

    #[test]
    fn skips_non_rows() {
        for l in [
            "",
            "| |חברה|יום אקס|דיבידנד|סוג|תשלום|תשואה|",
            "|---|---|---|---|---|---|---|",
            "|יום ראשון, 15 ביוני||||||",
            "# Weekly update",
            "||Alpha|15.06.2025|1|",
            "|||15.06.2025|1||25.06.2025|",
        ] {
            assert_eq!(parse_line(l, 1), None, "line {l:?}");
        }
    }

    #[test]
    fn incomplete_rows_still_surface() {
        // shape is fine, content is not: left for validation to reject
        let e = parse_line("||Alpha|15.06.2025|||||", 3).unwrap();
        assert_eq!(e.amount, "");
        assert_eq!(e.payment_date, "");
    }

    #[test]
    fn parse_entries_numbers_lines() {
        let text = "# title\n\n||A (X)|01.01.2025|1||02.01.2025|\n||B (Y)|01.01.2025|2||02.01.2025|\n";
        let es = parse_entries(text);
        assert_eq!(es.iter().map(|e| e.line).collect::<Vec<_>>(), vec![3, 4]);
    }
}
