

/// Format a packet count with thousands separators (e.g. 14204 -> "14,204")
pub fn format_count(count: u64) -> String {
    let digits = count.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    let offset = digits.len() % 3;

    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (i + 3 - offset) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }

    out
}

/// Format a percentage value for axis/bar labels
pub fn format_percent(value: f64) -> String {
    format!("{:.1}%", value)
}

/// Format a statistical metric, rendering undefined values as "n/a"
pub fn format_metric(value: Option<f64>) -> String {
    match value {
        Some(v) if v.is_finite() => format!("{:.4}", v),
        _ => "n/a".to_string(),
    }
}

/// Truncate string to specified length with ellipsis, cutting only at
/// character boundaries
pub fn truncate_string(s: &str, max_len: usize) -> String {
    if s.len() <= max_len {
        s.to_string()
    } else if max_len <= 3 {
        "...".to_string()
    } else {
        let mut cut = max_len - 3;
        while !s.is_char_boundary(cut) {
            cut -= 1;
        }
        format!("{}...", &s[..cut])
    }
}
