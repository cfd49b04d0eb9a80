//! Plain-text table output.

use unicode_width::{UnicodeWidthChar, UnicodeWidthStr};

pub fn display_width(s: &str) -> usize {
    s.width()
}

/// Cut `s` to `max_width` columns, ending in `…` when anything was dropped.
pub fn truncate_to_width(s: &str, max_width: usize) -> String {
    if display_width(s) <= max_width {
        return s.to_string();
    }
    if max_width == 0 {
        return String::new();
    }

    let target = max_width - 1;
    let mut out = String::new();
    let mut width = 0;
    for ch in s.chars() {
        let w = ch.width().unwrap_or(0);
        if width + w > target {
            break;
        }
        out.push(ch);
        width += w;
    }
    out.push('…');
    out
}

fn pad(s: &str, width: usize) -> String {
    let fill = width.saturating_sub(display_width(s));
    format!("{s}{}", " ".repeat(fill))
}

/// Render `rows` under `labels` as aligned columns separated by ` | `.
///
/// `max_width` caps each column; `0` leaves columns at their natural width.
pub fn render_table(labels: &[String], rows: &[Vec<String>], max_width: usize) -> String {
    let fit = |s: &str| {
        if max_width == 0 {
            s.to_string()
        } else {
            truncate_to_width(s, max_width)
        }
    };

    let header: Vec<String> = labels.iter().map(|l| fit(l)).collect();
    let body: Vec<Vec<String>> = rows
        .iter()
        .map(|row| {
            (0..labels.len())
                .map(|i| fit(row.get(i).map(String::as_str).unwrap_or("")))
                .collect()
        })
        .collect();

    let widths: Vec<usize> = (0..labels.len())
        .map(|i| {
            body.iter()
                .map(|row| display_width(&row[i]))
                .chain(std::iter::once(display_width(&header[i])))
                .max()
                .unwrap_or(0)
        })
        .collect();

    let line = |cells: &[String]| {
        let padded: Vec<String> = cells
            .iter()
            .zip(&widths)
            .map(|(cell, w)| pad(cell, *w))
            .collect();
        padded.join(" | ").trim_end().to_string()
    };

    let mut out = String::new();
    out.push_str(&line(&header));
    out.push('\n');
    let rule: Vec<String> = widths.iter().map(|w| "-".repeat(*w)).collect();
    out.push_str(&rule.join("-+-"));
    out.push('\n');
    for row in &body {
        out.push_str(&line(row));
        out.push('\n');
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_truncate_adds_ellipsis() {
        assert_eq!(truncate_to_width("recommendation", 6), "recom…");
        assert_eq!(truncate_to_width("short", 6), "short");
        assert_eq!(truncate_to_width("abc", 0), "");
    }

    #[test]
    fn test_wide_chars_count_double() {
        assert_eq!(display_width("日本"), 4);
        assert_eq!(truncate_to_width("日本語", 4), "日…");
    }
}
