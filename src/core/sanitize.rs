// src/core/sanitize.rs
use std::sync::LazyLock;

use regex::Regex;

static MD_LINK: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\[([^\]]*)\]\([^)]*\)").expect("static regex"));
static NAME_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^([^(]+?)\s*\(([^)]+)\)").expect("static regex"));
static PARENS: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\([^)]+\)").expect("static regex"));

pub fn normalize_nbsp(s: &str) -> String {
    s.replace('\u{a0}', " ")
}

pub fn normalize_ws(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_space = false;
    for ch in s.chars() {
        if ch.is_whitespace() {
            if !prev_space { out.push(' '); prev_space = true; }
        } else { out.push(ch); prev_space = false; }
    }
    out.trim().to_string()
}

/// Emphasis markers or link syntax left over from a markdown source.
pub fn has_markdown(s: &str) -> bool {
    s.contains(['*', '`', '~']) || MD_LINK.is_match(s)
}

/// Drop emphasis markers and unwrap `[text](url)` links.
pub fn strip_markdown(s: &str) -> String {
    let unlinked = MD_LINK.replace_all(s, "$1");
    let out: String = unlinked
        .chars()
        .filter(|&c| c != '*' && c != '`' && c != '~')
        .collect();
    normalize_ws(&out)
}

/// Canonical display name: `**Name** ([CODE](link))` → `Name (CODE)`.
/// Names without a code keep their (cleaned) text.
pub fn canonical_company(raw: &str) -> String {
    let clean = strip_markdown(&normalize_nbsp(raw));
    match NAME_CODE.captures(&clean) {
        Some(c) => {
            let name = c[1].trim();
            let code = c[2].trim();
            if name.is_empty() { clean } else { format!("{name} ({code})") }
        }
        None => clean,
    }
}

/// Comparison key for store dedup: no whitespace, no parenthetical parts.
pub fn dedup_name(s: &str) -> String {
    let no_ws: String = s.chars().filter(|c| !c.is_whitespace()).collect();
    PARENS.replace_all(&no_ws, "").trim().to_string()
}
