// src/config/consts.rs

// Prediction
pub const DEFAULT_HORIZON_DAYS: u32 = 30;
pub const DEFAULT_MIN_FREQUENCY: usize = 2;
/// Companies with an ex-date inside this many days before today are left out.
pub const RECENT_WINDOW_DAYS: i64 = 60;
/// A (month, day) slot must recur in at least this many distinct years.
pub const MIN_PATTERN_YEARS: usize = 2;
/// Frequency at which the frequency score saturates.
pub const FREQUENCY_SATURATION: f64 = 5.0;
pub const FREQUENCY_WEIGHT: f64 = 0.7;
pub const RECENCY_WEIGHT: f64 = 0.3;
/// Recency score lost per year beyond the first since the last occurrence.
pub const RECENCY_DECAY_PER_YEAR: f64 = 0.2;

// Merge
pub const AMOUNT_TOLERANCE: f64 = 0.01;

// Dates
pub const DATE_FORMAT: &str = "%d.%m.%Y";
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

// Discovery
pub const STORE_HINT: &str = "Historical_Dividend";
pub const UPDATE_HINT: &str = "Update";
pub const STORE_EXT: &str = "csv";
pub const UPDATE_EXT: &str = "md";

// Output
pub const OUTPUT_PREFIX: &str = "predicted_dividends_";
pub const OUTPUT_TIMESTAMP_FORMAT: &str = "%Y_%m_%d_%H%M";

// Store columns, in file order
pub const COL_COMPANY: &str = "חברה";
pub const COL_EX_DATE: &str = "יום אקס דיבידנד";
pub const COL_AMOUNT: &str = "דיבידנד";
pub const COL_KIND: &str = "סוג";
pub const COL_PAYMENT_DATE: &str = "תאריך תשלום";
pub const COL_YIELD: &str = "תשואה";
pub const COL_ISO_DATE: &str = "Comfortable Date X";

pub const STORE_HEADERS: [&str; 7] = [
    COL_COMPANY, COL_EX_DATE, COL_AMOUNT, COL_KIND, COL_PAYMENT_DATE, COL_YIELD, COL_ISO_DATE,
];

// Markdown update files
pub const MD_SEP: char = '|';
/// Hebrew month names as they appear in date-group header lines ("יום ... במאי").
pub const MD_MONTH_MARKERS: [&str; 12] = [
    "בינואר", "בפברואר", "במרץ", "באפריל", "במאי", "ביוני",
    "ביולי", "באוגוסט", "בספטמבר", "באוקטובר", "בנובמבר", "בדצמבר",
];
pub const MD_DAY_MARKER: &str = "יום";
