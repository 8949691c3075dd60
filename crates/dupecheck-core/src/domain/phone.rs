/// Canonicalizes a phone number to a `+`-prefixed digit string.
///
/// Ten-digit numbers are treated as North American and get a `+1` country
/// code; eleven-digit numbers starting with `1` only get the `+`. Anything
/// else is passed through as `+` followed by whatever digits remain, so
/// malformed input degrades to `"+"` instead of being rejected.
pub fn normalize_phone(value: &str) -> String {
    if value.is_empty() {
        return String::new();
    }

    let digits = phone_digits(value);
    if digits.len() == 10 {
        return format!("+1{digits}");
    }
    format!("+{digits}")
}

/// Strips everything except ASCII digits.
pub fn phone_digits(value: &str) -> String {
    value.chars().filter(|ch| ch.is_ascii_digit()).collect()
}

#[cfg(test)]
mod tests {
    use super::{normalize_phone, phone_digits};

    #[test]
    fn normalize_phone_adds_country_code_to_ten_digits() {
        assert_eq!(normalize_phone("5551234567"), "+15551234567");
        assert_eq!(normalize_phone("(555) 123-4567"), "+15551234567");
    }

    #[test]
    fn normalize_phone_keeps_existing_country_code() {
        assert_eq!(normalize_phone("15551234567"), "+15551234567");
        assert_eq!(normalize_phone("+1 555 123 4567"), "+15551234567");
    }

    #[test]
    fn normalize_phone_passes_other_lengths_through() {
        assert_eq!(normalize_phone("+44 20 7946 0958"), "+442079460958");
        assert_eq!(normalize_phone("25551234567"), "+25551234567");
    }

    #[test]
    fn normalize_phone_empty_and_garbage() {
        assert_eq!(normalize_phone(""), "");
        assert_eq!(normalize_phone("abc"), "+");
        assert_eq!(phone_digits(&normalize_phone("abc")), "");
    }
}
