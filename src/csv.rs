// src/csv.rs
use std::io::Write;

use crate::error::Result;

pub const BOM: &str = "\u{feff}";
pub const SEP: u8 = b',';

/* ---------------- Parsing ---------------- */

/// One data row and the 1-based line it started on.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Row {
    pub line: u64,
    pub cells: Vec<String>,
}

impl Row {
    pub fn get(&self, ix: usize) -> &str {
        self.cells.get(ix).map(String::as_str).unwrap_or("")
    }

    pub fn is_blank(&self) -> bool {
        self.cells.iter().all(|c| c.trim().is_empty())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct Table {
    pub headers: Vec<String>,
    pub rows: Vec<Row>,
    /// A fully blank row sat directly under the header and was dropped.
    pub blank_lead: bool,
}

impl Table {
    /// Index of a header, ignoring surrounding whitespace.
    pub fn column(&self, name: &str) -> Option<usize> {
        self.headers.iter().position(|h| h.trim() == name)
    }
}

/// Parse a headed CSV document. A UTF-8 BOM is tolerated, rows may be ragged,
/// and one fully blank row right under the header is discarded.
pub fn parse_table(text: &str) -> Result<Table> {
    let text = text.strip_prefix(BOM).unwrap_or(text);
    let mut rdr = ::csv::ReaderBuilder::new()
        .delimiter(SEP)
        .has_headers(true)
        .flexible(true)
        .from_reader(text.as_bytes());

    let headers = rdr.headers()?.iter().map(|h| h.trim().to_string()).collect();

    let mut rows = Vec::new();
    for rec in rdr.records() {
        let rec = rec?;
        let line = rec.position().map(|p| p.line()).unwrap_or(0);
        rows.push(Row { line, cells: rec.iter().map(str::to_string).collect() });
    }

    let blank_lead = rows.first().is_some_and(Row::is_blank);
    if blank_lead {
        rows.remove(0);
    }

    Ok(Table { headers, rows, blank_lead })
}

/* ---------------- Writing ---------------- */

/// Write headers, the optional blank lead row, then rows.
pub fn write_table<W: Write>(
    w: W,
    headers: &[&str],
    rows: &[Vec<String>],
    blank_lead: bool,
) -> Result<()> {
    let mut wtr = ::csv::WriterBuilder::new()
        .delimiter(SEP)
        .flexible(true)
        .from_writer(w);

    wtr.write_record(headers)?;
    if blank_lead {
        wtr.write_record(std::iter::repeat_n("", headers.len()))?;
    }
    for r in rows {
        wtr.write_record(r)?;
    }
    wtr.flush().map_err(::csv::Error::from)?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn drops_bom_and_blank_lead() {
        let text = "\u{feff}a,b,c\n,,\n1,2,3\n";
        let t = parse_table(text).unwrap();
        assert_eq!(t.headers, vec!["a", "b", "c"]);
        assert!(t.blank_lead);
        assert_eq!(t.rows.len(), 1);
        assert_eq!(t.rows[0].cells, vec!["1", "2", "3"]);
        assert_eq!(t.column("b"), Some(1));
    }

    #[test]
    fn keeps_quoted_commas_and_ragged_rows() {
        let text = "a,b\n\"x, y\",2\n3\n";
        let t = parse_table(text).unwrap();
        assert!(!t.blank_lead);
        assert_eq!(t.rows[0].get(0), "x, y");
        assert_eq!(t.rows[1].get(1), "");
    }

    #[test]
    fn write_restores_blank_lead() {
        let mut buf = Vec::new();
        write_table(&mut buf, &["a", "b"], &[vec!["1".into(), "x, y".into()]], true).unwrap();
        let s = String::from_utf8(buf).unwrap();
        assert_eq!(s, "a,b\n,\n1,\"x, y\"\n");
        let back = parse_table(&s).unwrap();
        assert!(back.blank_lead);
        assert_eq!(back.rows[0].get(1), "x, y");
    }
}
