//! Keyword template expansion for rename operations.
//!
//! A template is a plain file-name string that may contain the placeholders
//! `$[today]`, `$[ext]` and `$[type]`. There is deliberately no escaping
//! mechanism: a literal `$[today]` cannot be expressed.
//!
//! Date and time formats use the `YYYY-MM-DD` / `HH:mm:ss` token style users
//! configure in preferences; they are translated to chrono specifiers at
//! expansion time. "Now" is an explicit argument so the expansion is pure
//! and tests can pin the clock.

use crate::file_category::Category;
use chrono::{DateTime, Local};

/// Placeholder replaced by the current date (and time, when configured).
pub const TOKEN_TODAY: &str = "$[today]";
/// Placeholder replaced by the file's extension.
pub const TOKEN_EXT: &str = "$[ext]";
/// Placeholder replaced by the file's category name.
pub const TOKEN_TYPE: &str = "$[type]";

/// Expands every placeholder occurrence in `template`.
///
/// `time_format` extends the `$[today]` stamp with a time component when
/// present. The result is the file-name body only; callers append the
/// extension separately.
///
/// # Examples
///
/// ```
/// use chrono::{Local, TimeZone};
/// use sortdesk::file_category::Category;
/// use sortdesk::template::expand_template;
///
/// let now = Local.with_ymd_and_hms(2024, 1, 15, 9, 30, 0).unwrap();
/// let name = expand_template("$[today]_$[ext]_$[type]", "png", Category::Image, "YYYY-MM-DD", None, now);
/// assert_eq!(name, "2024-01-15_png_image");
/// ```
pub fn expand_template(
    template: &str,
    ext: &str,
    category: Category,
    date_format: &str,
    time_format: Option<&str>,
    now: DateTime<Local>,
) -> String {
    let stamp = format_stamp(date_format, time_format, now);
    template
        .replace(TOKEN_TODAY, &stamp)
        .replace(TOKEN_EXT, ext)
        .replace(TOKEN_TYPE, category.name())
}

/// Returns true if the template contains any recognized placeholder.
pub fn has_placeholders(template: &str) -> bool {
    template.contains(TOKEN_TODAY) || template.contains(TOKEN_EXT) || template.contains(TOKEN_TYPE)
}

fn format_stamp(date_format: &str, time_format: Option<&str>, now: DateTime<Local>) -> String {
    let mut pattern = pattern_to_chrono(date_format);
    if let Some(time) = time_format {
        pattern.push(' ');
        pattern.push_str(&pattern_to_chrono(time));
    }
    now.format(&pattern).to_string()
}

/// Translates a `YYYY-MM-DD HH:mm:ss` style pattern into chrono specifiers.
///
/// Unrecognized characters pass through literally; `%` is escaped so user
/// input cannot inject specifiers.
fn pattern_to_chrono(pattern: &str) -> String {
    const TOKENS: &[(&str, &str)] = &[
        ("YYYY", "%Y"),
        ("YY", "%y"),
        ("MM", "%m"),
        ("DD", "%d"),
        ("HH", "%H"),
        ("mm", "%M"),
        ("ss", "%S"),
    ];

    let mut out = String::with_capacity(pattern.len());
    let mut rest = pattern;
    'scan: while !rest.is_empty() {
        for (token, spec) in TOKENS {
            if let Some(stripped) = rest.strip_prefix(token) {
                out.push_str(spec);
                rest = stripped;
                continue 'scan;
            }
        }
        let ch = rest.chars().next().unwrap_or_default();
        if ch == '%' {
            out.push_str("%%");
        } else {
            out.push(ch);
        }
        rest = &rest[ch.len_utf8()..];
    }
    out
}
