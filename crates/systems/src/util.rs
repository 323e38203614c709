//! Shared content filters for string settings.

/// Accepts names that are safe as stable identifiers and file names.
pub fn name_filter(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '.' | ' '))
}

/// Accepts host names, IPv4 and IPv6 textual addresses.
pub fn address_filter(text: &str) -> bool {
    text.chars()
        .all(|c| c.is_ascii_alphanumeric() || matches!(c, '.' | ':' | '-'))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn name_filter_rejects_separators() {
        assert!(name_filter("profile-1"));
        assert!(name_filter(""));
        assert!(!name_filter("a/b"));
    }

    #[test]
    fn address_filter_accepts_hosts_and_ips() {
        assert!(address_filter("127.0.0.1"));
        assert!(address_filter("::1"));
        assert!(address_filter("play.example.org"));
        assert!(!address_filter("bad host"));
    }
}
