// src/core/html.rs
// Low-level HTML string scanning, tailored to the schedule and staff pages.
// Case-insensitive on ASCII tag/attribute names; no DOM is built.

use super::sanitize::{normalize_entities, normalize_ws};

pub fn to_lower(s: &str) -> String {
    s.chars()
        .map(|c| {
            if c.is_ascii() {
                c.to_ascii_lowercase()
            } else {
                c
            }
        })
        .collect()
}

/// The tag name ends at `at` (so `<th` does not match `<thead`).
fn ends_tag_name(lc: &str, at: usize) -> bool {
    match lc.as_bytes().get(at) {
        None => true,
        Some(b) => b.is_ascii_whitespace() || *b == b'>' || *b == b'/',
    }
}

/// Next complete `<tag …>…</tag>` block at or after `from`, as byte offsets
/// from the start of the opening tag to the end of the closing tag.
pub fn next_tag_block_ci(s: &str, o: &str, c: &str, from: usize) -> Option<(usize, usize)> {
    let lc = to_lower(s);
    let ol = to_lower(o);
    let cl = to_lower(c);
    let mut at = from;
    loop {
        let start = lc.get(at..)?.find(&ol)? + at;
        if !ends_tag_name(&lc, start + ol.len()) {
            at = start + ol.len();
            continue;
        }
        let open_end = s[start..].find('>')? + start + 1;
        let end_rel = lc[open_end..].find(&cl)?;
        return Some((start, open_end + end_rel + cl.len()));
    }
}

/// `<td …>INNER</td>` → `INNER` (may still contain nested tags).
pub fn inner_after_open_tag(block: &str) -> String {
    if let Some(oe) = block.find('>') {
        if let Some(cs) = block.rfind('<') {
            if cs > oe {
                return block[oe + 1..cs].to_string();
            }
        }
    }
    s!()
}

/// `<td class="x">…</td>` → `<td class="x">`.
pub fn opening_tag(block: &str) -> &str {
    match block.find('>') {
        Some(i) => &block[..=i],
        None => block,
    }
}

pub fn strip_tags<S: AsRef<str>>(s: S) -> String {
    let s = s.as_ref();

    let mut out = String::with_capacity(s.len());
    let mut in_tag = false;

    for ch in s.chars() {
        match ch {
            '<' => in_tag = true,
            '>' => in_tag = false,
            _ if !in_tag => out.push(ch),
            _ => {}
        }
    }
    normalize_ws(&out)
}

/// Visible text of a cell block: tags stripped, entities decoded,
/// whitespace collapsed.
pub fn cell_text(block: &str) -> String {
    strip_tags(normalize_entities(&inner_after_open_tag(block)))
}

/// Every `name=` attribute value inside tags of `fragment`, in document order.
/// The attribute must be preceded by whitespace (`data-id=` is not `id=`).
pub fn attr_values_ci(fragment: &str, name: &str) -> Vec<String> {
    let lc = to_lower(fragment);
    let needle = format!("{}=", to_lower(name));
    let mut out = Vec::new();
    let mut pos = 0usize;

    while let Some(rel) = lc[pos..].find(&needle) {
        let at = pos + rel;
        pos = at + needle.len();

        let after_ws = at > 0 && lc.as_bytes()[at - 1].is_ascii_whitespace();
        if !after_ws || !inside_tag(&lc, at) {
            continue;
        }
        out.push(normalize_entities(&read_attr_value(&fragment[pos..])));
    }
    out
}

pub fn attr_value_ci(opener: &str, name: &str) -> Option<String> {
    attr_values_ci(opener, name).into_iter().next()
}

fn inside_tag(lc: &str, at: usize) -> bool {
    let head = &lc[..at];
    match (head.rfind('<'), head.rfind('>')) {
        (Some(lt), Some(gt)) => lt > gt,
        (Some(_), None) => true,
        _ => false,
    }
}

fn read_attr_value(rest: &str) -> String {
    match rest.chars().next() {
        Some(q @ ('"' | '\'')) => rest[1..].split(q).next().unwrap_or("").to_string(),
        _ => rest
            .split(|c: char| c.is_ascii_whitespace() || c == '>')
            .next()
            .unwrap_or("")
            .to_string(),
    }
}

/// First `<tag id="…">…</tag>` block whose id matches exactly.
pub fn element_by_id_ci<'a>(s: &'a str, tag: &str, id: &str) -> Option<&'a str> {
    let open = format!("<{tag}");
    let close = format!("</{tag}>");
    let mut pos = 0usize;
    while let Some((start, end)) = next_tag_block_ci(s, &open, &close, pos) {
        let block = &s[start..end];
        if attr_value_ci(opening_tag(block), "id").as_deref() == Some(id) {
            return Some(block);
        }
        pos = end;
    }
    None
}

/// Raw `<td>`/`<th>` blocks of one row, in order.
pub fn row_cell_blocks(tr: &str) -> Vec<&str> {
    let mut cells = Vec::new();
    let mut pos = 0usize;
    loop {
        let td = next_tag_block_ci(tr, "<td", "</td>", pos);
        let th = next_tag_block_ci(tr, "<th", "</th>", pos);
        let (s, e) = match (td, th) {
            (Some(a), Some(b)) => if a.0 <= b.0 { a } else { b },
            (Some(a), None) | (None, Some(a)) => a,
            (None, None) => break,
        };
        cells.push(&tr[s..e]);
        pos = e;
    }
    cells
}

/// Cell texts of one row.
pub fn row_cells(tr: &str) -> Vec<String> {
    row_cell_blocks(tr).into_iter().map(cell_text).collect()
}

/// Every `<tr>` block of `fragment`, in order.
pub fn rows(fragment: &str) -> Vec<&str> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(fragment, "<tr", "</tr>", pos) {
        out.push(&fragment[s..e]);
        pos = e;
    }
    out
}

/// Text of every `<li>` in `fragment`.
pub fn list_items(fragment: &str) -> Vec<String> {
    let mut out = Vec::new();
    let mut pos = 0usize;
    while let Some((s, e)) = next_tag_block_ci(fragment, "<li", "</li>", pos) {
        out.push(cell_text(&fragment[s..e]));
        pos = e;
    }
    out
}

/// A `<form>` reduced to what is needed to post it back.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct HtmlForm {
    pub action: String,
    /// `(name, value)` of every named `<input>`.
    pub fields: Vec<(String, String)>,
}

pub fn first_form(doc: &str) -> Option<HtmlForm> {
    let (fs, fe) = next_tag_block_ci(doc, "<form", "</form>", 0)?;
    let form = &doc[fs..fe];
    let action = attr_value_ci(opening_tag(form), "action").unwrap_or_default();

    let lc = to_lower(form);
    let mut fields = Vec::new();
    let mut pos = 0usize;
    while let Some(rel) = lc[pos..].find("<input") {
        let start = pos + rel;
        pos = start + "<input".len();
        if !ends_tag_name(&lc, pos) {
            continue;
        }
        let Some(end) = form[start..].find('>') else { break };
        let opener = &form[start..=start + end];
        if let Some(name) = attr_value_ci(opener, "name") {
            let value = attr_value_ci(opener, "value").unwrap_or_default();
            fields.push((name, value));
        }
    }
    Some(HtmlForm { action, fields })
}
