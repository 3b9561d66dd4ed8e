// File: crates/chartmesh-core/src/format.rs
// Summary: Numeric format codes and `{a}`/`{b}`/`{c}`/`{d}`/`{.}` label templates.

/// Values one template placeholder may reference.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct TemplateParam {
    /// `{a}`
    pub series_name: String,
    /// `{b}`
    pub data_name: String,
    /// `{c}`
    pub value: f64,
    /// Denominator for `{d}`.
    pub total: f64,
    /// `{.}`
    pub marker: String,
    /// Format code applied to `{c}`/`{d}` without an explicit override.
    pub numeric_formatter: Option<String>,
}

impl TemplateParam {
    pub fn percent(&self) -> f64 {
        if self.total == 0.0 || !self.total.is_finite() { 0.0 } else { self.value / self.total * 100.0 }
    }
}

/// Format `value` with a numeric code: `fN` fixed, `nN` grouped, `pN` percent,
/// `eN` exponent, `d` integer, or a `0.00` / `#,##0.0` pattern.
/// Unknown or missing codes use the shortest round-trip representation.
pub fn format_number(value: f64, code: Option<&str>) -> String {
    let Some(code) = code.map(str::trim).filter(|c| !c.is_empty()) else {
        return plain(value);
    };
    if !value.is_finite() {
        return plain(value);
    }
    let mut chars = code.chars();
    let head = chars.next().map(|c| c.to_ascii_lowercase());
    let rest = chars.as_str();
    let digits = if rest.is_empty() { None } else { rest.parse::<usize>().ok() };
    match (head, digits, rest.is_empty()) {
        (Some('f'), d, _) if d.is_some() || rest.is_empty() => format!("{:.*}", d.unwrap_or(2), value),
        (Some('n'), d, _) if d.is_some() || rest.is_empty() => group_thousands(&format!("{:.*}", d.unwrap_or(2), value)),
        (Some('p'), d, _) if d.is_some() || rest.is_empty() => format!("{:.*}%", d.unwrap_or(2), value * 100.0),
        (Some('e'), d, _) if d.is_some() || rest.is_empty() => format!("{:.*e}", d.unwrap_or(6), value),
        (Some('d'), None, true) => format!("{}", value.round() as i64),
        _ if code.chars().all(|c| matches!(c, '0' | '#' | '.' | ',')) => pattern(value, code),
        _ => plain(value),
    }
}

fn plain(value: f64) -> String {
    // `-0` prints as "-0" otherwise.
    if value == 0.0 { "0".to_string() } else { value.to_string() }
}

fn pattern(value: f64, code: &str) -> String {
    let decimals = code.split_once('.').map(|(_, frac)| frac.chars().filter(|c| matches!(c, '0' | '#')).count());
    let s = format!("{:.*}", decimals.unwrap_or(0), value);
    let s = if code.contains(',') { group_thousands(&s) } else { s };
    // `#` fraction digits are optional.
    match code.split_once('.') {
        Some((_, frac)) if frac.starts_with('#') && s.contains('.') => {
            let trimmed = s.trim_end_matches('0');
            trimmed.trim_end_matches('.').to_string()
        }
        _ => s,
    }
}

fn group_thousands(s: &str) -> String {
    let (sign, body) = match s.strip_prefix('-') {
        Some(b) => ("-", b),
        None => ("", s),
    };
    let (int, frac) = match body.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (body, None),
    };
    let mut grouped = String::with_capacity(int.len() + int.len() / 3);
    for (i, c) in int.chars().enumerate() {
        if i > 0 && (int.len() - i) % 3 == 0 {
            grouped.push(',');
        }
        grouped.push(c);
    }
    match frac {
        Some(f) => format!("{sign}{grouped}.{f}"),
        None => format!("{sign}{grouped}"),
    }
}

/// Expand a template against `params`. Placeholders without an index refer to
/// `params[default_index]`; `{c1}` refers to `params[1]`; `{c:f2}` overrides the code.
/// Unknown placeholders are kept verbatim.
pub fn format_template(template: &str, params: &[TemplateParam], default_index: usize) -> String {
    let mut out = String::with_capacity(template.len() + 16);
    let mut rest = template;
    while let Some(open) = rest.find('{') {
        out.push_str(&rest[..open]);
        let after = &rest[open + 1..];
        let Some(close) = after.find('}') else {
            out.push_str(&rest[open..]);
            return out;
        };
        let inner = &after[..close];
        match expand(inner, params, default_index) {
            Some(s) => out.push_str(&s),
            None => {
                out.push('{');
                out.push_str(inner);
                out.push('}');
            }
        }
        rest = &after[close + 1..];
    }
    out.push_str(rest);
    out.replace("\\n", "\n")
}

fn expand(inner: &str, params: &[TemplateParam], default_index: usize) -> Option<String> {
    let (key, code) = match inner.split_once(':') {
        Some((k, c)) => (k, Some(c)),
        None => (inner, None),
    };
    let mut chars = key.chars();
    let tag = chars.next()?;
    let index_str = chars.as_str();
    let index = if index_str.is_empty() { default_index } else { index_str.parse::<usize>().ok()? };
    let p = params.get(index)?;
    let code = code.or(p.numeric_formatter.as_deref());
    match tag {
        'a' | 'A' => Some(p.series_name.clone()),
        'b' | 'B' => Some(p.data_name.clone()),
        'c' | 'C' => Some(format_number(p.value, code)),
        'd' | 'D' => Some(format_number(p.percent(), code.or(Some("0.#")))),
        '.' => Some(p.marker.clone()),
        _ => None,
    }
}

/// Split formatted item text into tooltip columns on `|`.
pub fn split_columns(s: &str) -> Vec<String> {
    s.split('|').map(str::to_string).collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn numeric_codes() {
        assert_eq!(format_number(3.14159, Some("f2")), "3.14");
        assert_eq!(format_number(1234567.891, Some("n1")), "1,234,567.9");
        assert_eq!(format_number(0.256, Some("p1")), "25.6%");
        assert_eq!(format_number(42.6, Some("d")), "43");
        assert_eq!(format_number(1234.5, Some("#,##0.00")), "1,234.50");
        assert_eq!(format_number(2.5, Some("0.##")), "2.5");
        assert_eq!(format_number(42.0, None), "42");
    }

    #[test]
    fn placeholders_and_indices() {
        let params = vec![
            TemplateParam { series_name: "A".into(), data_name: "x".into(), value: 1.0, total: 4.0, ..Default::default() },
            TemplateParam { series_name: "B".into(), value: 3.5, total: 4.0, ..Default::default() },
        ];
        assert_eq!(format_template("{a}:{c}", &params, 0), "A:1");
        assert_eq!(format_template("{a1} {c1:f2} {d}%", &params, 0), "B 3.50 25%");
        assert_eq!(format_template("{z} {b", &params, 0), "{z} {b");
    }
}
