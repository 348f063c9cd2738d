//! Configuration constants and source-addressing helpers for the templater.

use std::time::Duration;

/// HTTP timeout in seconds for remote templates.
pub const HTTP_TIMEOUT_SECS: u64 = 30;

/// Default maximum size of a remote template body in bytes (10 MB).
///
/// Templates are small documents; anything larger is almost certainly the
/// wrong URL.
pub const DEFAULT_MAX_RESPONSE_SIZE: u64 = 10 * 1024 * 1024;

/// Port assigned to an SMTP server entry that does not specify one.
pub const DEFAULT_SMTP_PORT: u16 = 25;

/// Scheme prefixes fetched over HTTP(S).
pub const REMOTE_SCHEMES: [&str; 2] = ["http://", "https://"];

/// Scheme prefix stripped from local file sources.
pub const FILE_SCHEME: &str = "file://";

/// Options for the content loader.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoaderOptions {
    /// Timeout applied to the whole HTTP request.
    pub timeout: Duration,

    /// Largest accepted remote body.
    pub max_response_size: u64,
}

impl Default for LoaderOptions {
    fn default() -> Self {
        Self {
            timeout: Duration::from_secs(HTTP_TIMEOUT_SECS),
            max_response_size: DEFAULT_MAX_RESPONSE_SIZE,
        }
    }
}

/// Check whether `source` begins with `prefix`, ignoring ASCII case.
fn has_prefix_ignore_case(source: &str, prefix: &str) -> bool {
    source
        .get(..prefix.len())
        .is_some_and(|head| head.eq_ignore_ascii_case(prefix))
}

/// Check whether a source string addresses a remote template.
///
/// # Examples
/// ```
/// use mail_templater::config::is_remote_source;
///
/// assert!(is_remote_source("https://example.com/welcome.xml"));
/// assert!(is_remote_source("HTTP://example.com/welcome.xml"));
/// assert!(!is_remote_source("templates/welcome.xml"));
/// ```
pub fn is_remote_source(source: &str) -> bool {
    REMOTE_SCHEMES
        .iter()
        .any(|scheme| has_prefix_ignore_case(source, scheme))
}

/// Strip a leading `file://` (any case) from a local source.
///
/// # Examples
/// ```
/// use mail_templater::config::strip_file_scheme;
///
/// assert_eq!(strip_file_scheme("file:///tmp/a.xml"), "/tmp/a.xml");
/// assert_eq!(strip_file_scheme("FILE://a.xml"), "a.xml");
/// assert_eq!(strip_file_scheme("a.xml"), "a.xml");
/// ```
pub fn strip_file_scheme(source: &str) -> &str {
    if has_prefix_ignore_case(source, FILE_SCHEME) {
        &source[FILE_SCHEME.len()..]
    } else {
        source
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_is_remote_source() {
        assert!(is_remote_source("http://example.com/t.xml"));
        assert!(is_remote_source("https://example.com/t.xml"));
        assert!(is_remote_source("HtTpS://example.com/t.xml"));
        assert!(!is_remote_source("ftp://example.com/t.xml"));
        assert!(!is_remote_source("file:///tmp/t.xml"));
        assert!(!is_remote_source("http"));
        assert!(!is_remote_source(""));
    }

    #[test]
    fn test_strip_file_scheme() {
        assert_eq!(strip_file_scheme("file:///etc/t.xml"), "/etc/t.xml");
        assert_eq!(strip_file_scheme("File://t.xml"), "t.xml");
        assert_eq!(strip_file_scheme("t.xml"), "t.xml");
        assert_eq!(strip_file_scheme(""), "");
    }

    #[test]
    fn test_strip_file_scheme_multibyte_input() {
        // Prefix probing must not split a multi-byte character.
        assert_eq!(strip_file_scheme("é.xml"), "é.xml");
        assert!(!is_remote_source("ééééé.xml"));
    }

    #[test]
    fn test_loader_options_default() {
        let options = LoaderOptions::default();
        assert_eq!(options.timeout, Duration::from_secs(HTTP_TIMEOUT_SECS));
        assert_eq!(options.max_response_size, DEFAULT_MAX_RESPONSE_SIZE);
    }
}
