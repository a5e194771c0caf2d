//! Display names for raw MARTA identifiers.
//!
//! The feed only gives upper-case ids ("FIVE POINTS STATION", "GOLD"), and
//! there is no lookup API for proper names, so labels are derived from the
//! ids themselves.

/// Suffix dropped from station ids so they read like destination names.
const STATION_SUFFIX: &str = " STATION";

/// Convert a raw id into a label for display.
///
/// # Examples
///
/// ```
/// use arrivals_server::domain::display_name;
///
/// assert_eq!(display_name("FIVE POINTS STATION"), "Five Points");
/// assert_eq!(display_name("GOLD"), "Gold");
/// assert_eq!(display_name("DOME"), "GWCC/CNN Center");
/// ```
pub fn display_name(raw: &str) -> String {
    let trimmed = raw.trim();
    let base = trimmed.strip_suffix(STATION_SUFFIX).unwrap_or(trimmed);

    match base {
        "DOME" => "GWCC/CNN Center".to_string(),
        "HE HOLMES" => "H.E. Holmes".to_string(),
        _ => title_case(base),
    }
}

/// Lower-case everything, then upper-case each character that starts a word.
///
/// A character starts a word when it is not whitespace and its word-ness
/// differs from the character before it, so "CENTER/NORTH" becomes
/// "Center/North".
fn title_case(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    let mut prev_is_word = false;

    for c in s.chars() {
        let is_word = c.is_alphanumeric() || c == '_';
        if is_word != prev_is_word && !c.is_whitespace() {
            out.extend(c.to_uppercase());
        } else {
            out.extend(c.to_lowercase());
        }
        prev_is_word = is_word;
    }

    out
}
