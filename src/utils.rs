use once_cell::sync::Lazy;
use regex::Regex;

// Leading number (optionally comma-grouped, optionally fractional) plus suffix.
static STAT_NUMBER_REGEX: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^\s*(\d[\d,]*(?:\.\d+)?)(.*)$").unwrap());

/// Round to two decimal places.
pub fn round_to_hundredths(value: f64) -> f64 {
    (value * 100.0).round() / 100.0
}

/// Scrollable distance of the document. Never negative.
pub fn max_scroll_offset(document_height: f64, viewport_height: f64) -> f64 {
    (document_height - viewport_height).max(0.0)
}

/// CSS transform shifting the page up by `offset` pixels.
pub fn translate_y_css(offset: f64) -> String {
    format!("translateY(-{}px)", offset)
}

/// `"#admissions"` → `Some("admissions")`. Bare `"#"` and other hrefs yield `None`.
pub fn anchor_target_id(href: &str) -> Option<&str> {
    href.strip_prefix('#').filter(|id| !id.is_empty())
}

/// Scroll target for an in-page anchor, leaving room for the fixed nav.
pub fn anchor_scroll_target(element_top: f64, nav_offset: f64) -> f64 {
    element_top - nav_offset
}

/// A statistic such as `"12,000+"` split into its value and trailing text.
#[derive(Debug, Clone, PartialEq)]
pub struct StatValue {
    pub value: f64,
    pub suffix: String,
}

/// Parse text that starts with a number. Grouping commas belong to the number.
///
/// # Examples
/// ```
/// use yufeng_motion::utils::parse_stat_number;
/// let stat = parse_stat_number("12,000+").unwrap();
/// assert_eq!(stat.value, 12_000.0);
/// assert_eq!(stat.suffix, "+");
/// ```
pub fn parse_stat_number(text: &str) -> Option<StatValue> {
    let captures = STAT_NUMBER_REGEX.captures(text)?;
    let digits: String = captures[1].chars().filter(|c| *c != ',').collect();
    let value = digits.parse::<f64>().ok()?;
    Some(StatValue {
        value,
        suffix: captures[2].to_string(),
    })
}

/// Format with comma thousands separators: `1234567` → `"1,234,567"`.
pub fn format_grouped(value: u64) -> String {
    let digits = value.to_string();
    let mut out = String::with_capacity(digits.len() + digits.len() / 3);
    for (i, ch) in digits.chars().enumerate() {
        if i > 0 && (digits.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    out
}
