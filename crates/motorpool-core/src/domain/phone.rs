//! Phone handling for drivers. Numbers are keyed to the Philippine numbering
//! plan: local `09XXXXXXXXX` and subscriber `9XXXXXXXXX` forms canonicalize
//! to `+639XXXXXXXXX`; anything else passes through with a leading `+`
//! enforced. Every function here is total and returns `None` instead of
//! failing on malformed input.

const COUNTRY_PREFIX: &str = "+63";

/// Canonical dialable form, or `None` for empty input.
pub fn normalize(raw: &str) -> Option<String> {
    let trimmed = raw.trim();
    if trimmed.is_empty() {
        return None;
    }

    let mut digits = String::new();
    for ch in trimmed.chars() {
        if ch.is_ascii_digit() {
            digits.push(ch);
        }
    }
    if digits.is_empty() {
        return None;
    }

    if digits.len() == 11 && digits.starts_with('0') {
        return Some(format!("{COUNTRY_PREFIX}{}", &digits[1..]));
    }
    if digits.len() == 10 && digits.starts_with('9') {
        return Some(format!("{COUNTRY_PREFIX}{digits}"));
    }
    if digits.len() >= 12 && digits.starts_with("63") {
        return Some(format!("+{digits}"));
    }

    // Best effort: not a shape we know, keep the digits as-is behind a '+'.
    Some(format!("+{digits}"))
}

/// Spaced grouping (`+63 XXX XXX XXXX`) for the regional form, the canonical
/// value otherwise.
pub fn display(raw: &str) -> Option<String> {
    let canonical = normalize(raw)?;
    if canonical.len() == 13 && canonical.starts_with(COUNTRY_PREFIX) {
        return Some(format!(
            "+63 {} {} {}",
            &canonical[3..6],
            &canonical[6..9],
            &canonical[9..13]
        ));
    }
    Some(canonical)
}

/// Redacted form revealing only the country code and the last four digits.
/// The middle is replaced with exactly as many `*` as digits removed.
pub fn mask(raw: &str) -> Option<String> {
    let canonical = normalize(raw)?;
    if canonical.len() == 13 && canonical.starts_with("+639") {
        return Some(format!("+63 9** *** {}", &canonical[9..13]));
    }
    if canonical.len() > 7 {
        let stars = "*".repeat(canonical.len() - 7);
        return Some(format!(
            "{}{}{}",
            &canonical[..3],
            stars,
            &canonical[canonical.len() - 4..]
        ));
    }
    Some(canonical)
}

pub fn tel_link(raw: &str) -> Option<String> {
    normalize(raw).map(|canonical| format!("tel:{canonical}"))
}

/// Deep link into the chat app, preferring `primary` over `fallback`.
pub fn chat_link(chat_domain: &str, primary: Option<&str>, fallback: Option<&str>) -> Option<String> {
    let raw = primary
        .filter(|value| !value.trim().is_empty())
        .or_else(|| fallback.filter(|value| !value.trim().is_empty()))?;
    let canonical = normalize(raw)?;
    Some(format!("https://{chat_domain}/{canonical}"))
}
