// src/store.rs
//
// The dividend store: one headed CSV file, one row per announced dividend.
// Read once at the start of a run, written at most once at the end.

use std::{
    fs,
    io::{BufWriter, Write},
    path::Path,
};

use tracing::{debug, warn};

use crate::config::consts::*;
use crate::core::{dates, sanitize};
use crate::csv::{self, Row, Table, BOM};
use crate::error::{Error, Result};
use crate::model::HistoricalRecord;

/// A row that could not be turned into a record.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SkippedRow {
    pub line: u64,
    pub reason: String,
    /// The row in `STORE_HEADERS` order, written back untouched on save.
    pub cells: Vec<String>,
}

#[derive(Clone, Debug, Default, PartialEq)]
pub struct Dataset {
    pub records: Vec<HistoricalRecord>,
    pub skipped: Vec<SkippedRow>,
    /// Restored on save so the file keeps its layout.
    pub blank_lead: bool,
}

impl Dataset {
    pub fn sort_by_ex_date(&mut self) {
        // stable: same-day rows keep their file order
        self.records.sort_by_key(|r| r.ex_date);
    }
}

struct Columns {
    company: usize,
    ex_date: usize,
    amount: usize,
    kind: Option<usize>,
    payment_date: Option<usize>,
    yield_text: Option<usize>,
    iso_date: Option<usize>,
}

impl Columns {
    fn locate(t: &Table) -> Result<Self> {
        let need = |name: &str| t.column(name).ok_or_else(|| Error::MissingColumn(s!(name)));
        Ok(Self {
            company: need(COL_COMPANY)?,
            ex_date: need(COL_EX_DATE)?,
            amount: need(COL_AMOUNT)?,
            kind: t.column(COL_KIND),
            payment_date: t.column(COL_PAYMENT_DATE),
            yield_text: t.column(COL_YIELD),
            iso_date: t.column(COL_ISO_DATE),
        })
    }

    /// Cells reordered to `STORE_HEADERS`; absent columns become empty.
    fn canonical_cells(&self, row: &Row) -> Vec<String> {
        [
            Some(self.company), Some(self.ex_date), Some(self.amount),
            self.kind, self.payment_date, self.yield_text, self.iso_date,
        ]
        .into_iter()
        .map(|ix| ix.map(|i| s!(row.get(i))).unwrap_or_default())
        .collect()
    }
}

/// Parse store text. Malformed rows are skipped and listed, never fatal.
pub fn parse_dataset(text: &str) -> Result<Dataset> {
    let table = csv::parse_table(text)?;
    let cols = Columns::locate(&table)?;

    let mut records = Vec::with_capacity(table.rows.len());
    let mut skipped = Vec::new();

    for row in &table.rows {
        // Blank rows hold nothing; only the lead one is remembered.
        if row.is_blank() { continue; }

        let company = sanitize::normalize_nbsp(row.get(cols.company)).trim().to_string();
        let ex_raw = row.get(cols.ex_date);
        let amount_raw = row.get(cols.amount);

        let reason = if company.is_empty() {
            Some(s!("missing company"))
        } else if dates::parse_date(ex_raw).is_none() {
            Some(format!("bad ex-date '{ex_raw}'"))
        } else if dates::parse_amount(amount_raw).is_none() {
            Some(format!("bad amount '{amount_raw}'"))
        } else {
            None
        };
        if let Some(reason) = reason {
            warn!(line = row.line, %reason, "skipping malformed row");
            skipped.push(SkippedRow { line: row.line, reason, cells: cols.canonical_cells(row) });
            continue;
        }

        // Both checked above.
        let (Some(ex_date), Some(amount)) = (dates::parse_date(ex_raw), dates::parse_amount(amount_raw))
        else { continue };

        let opt = |ix: Option<usize>| ix.map(|i| row.get(i).trim().to_string()).unwrap_or_default();
        let pay_raw = opt(cols.payment_date);
        let payment_date = dates::parse_date(&pay_raw);
        if payment_date.is_none() && !pay_raw.is_empty() {
            debug!(line = row.line, payment = %pay_raw, "payment date kept as text");
        }

        records.push(HistoricalRecord {
            company,
            ex_date,
            payment_text: if payment_date.is_some() { s!() } else { pay_raw },
            payment_date,
            amount,
            kind: opt(cols.kind),
            yield_text: opt(cols.yield_text),
        });
    }

    debug!(records = records.len(), skipped = skipped.len(), "store parsed");
    Ok(Dataset { records, skipped, blank_lead: table.blank_lead })
}

pub fn load(path: &Path) -> Result<Dataset> {
    if !path.is_file() {
        return Err(Error::MissingFile(path.to_path_buf()));
    }
    let text = fs::read_to_string(path).map_err(|e| Error::io(path, e))?;
    parse_dataset(&text)
}

/// Store row shape, in `STORE_HEADERS` order.
pub fn record_row(r: &HistoricalRecord) -> Vec<String> {
    vec![
        r.company.clone(),
        dates::format_date(r.ex_date),
        dates::format_amount(r.amount),
        r.kind.clone(),
        r.payment_date.map(dates::format_date).unwrap_or_else(|| r.payment_text.clone()),
        r.yield_text.clone(),
        dates::format_iso(r.ex_date),
    ]
}

/// Serialize the whole store: BOM, header, optional blank lead row, records,
/// then any rows that failed to parse, as they were read. Other blank rows
/// are not written.
pub fn write_dataset<W: Write>(mut w: W, ds: &Dataset) -> Result<()> {
    w.write_all(BOM.as_bytes()).map_err(::csv::Error::from)?;
    let rows: Vec<Vec<String>> = ds
        .records
        .iter()
        .map(record_row)
        .chain(ds.skipped.iter().map(|s| s.cells.clone()))
        .collect();
    csv::write_table(w, &STORE_HEADERS, &rows, ds.blank_lead)
}

/// Replace the store file in one step: write a sibling temp file, then rename
/// it over the original. On any error the old file is left as it was.
pub fn save(path: &Path, ds: &Dataset) -> Result<()> {
    let dir = match path.parent() {
        Some(p) if !p.as_os_str().is_empty() => p,
        _ => Path::new("."),
    };
    let tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| Error::io(dir, e))?;
    {
        let mut out = BufWriter::new(tmp.as_file());
        write_dataset(&mut out, ds)?;
        out.flush().map_err(|e| Error::io(tmp.path(), e))?;
    }
    tmp.persist(path).map_err(|e| Error::io(path, e.error))?;
    debug!(path = %path.display(), records = ds.records.len(), "store written");
    Ok(())
}
