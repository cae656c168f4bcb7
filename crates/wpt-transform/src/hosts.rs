//! Own-host classification.

/// Host substrings that mark a request as served by our own infrastructure.
pub const DEFAULT_OWN_HOSTS: &[&str] = &["vistaprint.com", "vphosted.com"];

/// True if `host` contains any of `own_hosts` (case-sensitive).
pub fn is_own_host<S: AsRef<str>>(host: &str, own_hosts: &[S]) -> bool {
    own_hosts
        .iter()
        .any(|own| host.contains(own.as_ref()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_hosts() {
        assert!(is_own_host("www.vistaprint.com", DEFAULT_OWN_HOSTS));
        assert!(is_own_host("images.vphosted.com", DEFAULT_OWN_HOSTS));
        assert!(!is_own_host("cdn.example.com", DEFAULT_OWN_HOSTS));
        assert!(!is_own_host("WWW.VISTAPRINT.COM", DEFAULT_OWN_HOSTS));
    }

    #[test]
    fn test_no_hosts_configured() {
        let none: &[String] = &[];
        assert!(!is_own_host("www.vistaprint.com", none));
    }
}
