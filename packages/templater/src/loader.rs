//! Template content loading from local files and HTTP(S) URLs.
//!
//! The loader only turns a source string into raw text; it knows nothing
//! about the template vocabulary.

use std::fs::File;
use std::io::Read;
use std::path::{Path, PathBuf};

use crate::config::{is_remote_source, strip_file_scheme, LoaderOptions};
use crate::error::{Result, TemplaterError};
use crate::http::{bytes_to_string, create_client, fetch_bytes};

/// Where a template is read from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TemplateSource {
    /// Fetched over HTTP(S).
    Remote(String),
    /// Read from the local filesystem.
    Local(PathBuf),
}

impl TemplateSource {
    /// Classify a source string.
    ///
    /// # Examples
    /// ```
    /// use std::path::PathBuf;
    /// use mail_templater::loader::TemplateSource;
    ///
    /// assert_eq!(
    ///     TemplateSource::parse("https://example.com/t.xml"),
    ///     TemplateSource::Remote("https://example.com/t.xml".to_string())
    /// );
    /// assert_eq!(
    ///     TemplateSource::parse("file:///srv/t.xml"),
    ///     TemplateSource::Local(PathBuf::from("/srv/t.xml"))
    /// );
    /// ```
    pub fn parse(source: &str) -> Self {
        if is_remote_source(source) {
            Self::Remote(source.to_string())
        } else {
            Self::Local(PathBuf::from(strip_file_scheme(source)))
        }
    }
}

/// Resolves template sources into raw text.
#[derive(Debug, Clone, Default)]
pub struct ContentLoader {
    options: LoaderOptions,
}

impl ContentLoader {
    /// Create a loader with default options.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a loader with explicit options.
    #[must_use]
    pub fn with_options(options: LoaderOptions) -> Self {
        Self { options }
    }

    /// The options this loader was built with.
    #[must_use]
    pub fn options(&self) -> &LoaderOptions {
        &self.options
    }

    /// Load the full text of a template source.
    ///
    /// An existing but empty local file yields an empty string; a remote
    /// source with an empty body is `SourceUnavailable`.
    ///
    /// # Errors
    /// `SourceUnavailable` when the file does not exist or cannot be read,
    /// or when the HTTP request fails or returns no body.
    pub fn load(&self, source: &str) -> Result<String> {
        match TemplateSource::parse(source) {
            TemplateSource::Remote(url) => self.load_remote(&url),
            TemplateSource::Local(path) => load_local(&path),
        }
    }

    fn load_remote(&self, url: &str) -> Result<String> {
        tracing::debug!(url, "Fetching remote template");
        let client = create_client(&self.options)?;
        let bytes = fetch_bytes(&client, url, self.options.max_response_size)?;
        if bytes.is_empty() {
            return Err(TemplaterError::unavailable(url, "response has no body"));
        }
        Ok(bytes_to_string(&bytes, url))
    }
}

/// Read a local template file.
fn load_local(path: &Path) -> Result<String> {
    let location = path.display().to_string();
    if !path.exists() {
        return Err(TemplaterError::unavailable(location, "file does not exist"));
    }

    tracing::debug!(path = %location, "Reading local template");
    let mut file = File::open(path).map_err(|e| TemplaterError::unavailable(&location, e))?;
    let mut bytes = Vec::new();
    file.read_to_end(&mut bytes)
        .map_err(|e| TemplaterError::unavailable(&location, e))?;

    Ok(bytes_to_string(&bytes, &location))
}

/// Load a template source with default loader options.
///
/// # Examples
/// ```
/// use mail_templater::loader::load_content;
/// use mail_templater::TemplaterError;
///
/// let err = load_content("/definitely/not/here.xml").unwrap_err();
/// assert!(matches!(err, TemplaterError::SourceUnavailable { .. }));
/// ```
pub fn load_content(source: &str) -> Result<String> {
    ContentLoader::new().load(source)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_parse_remote_sources() {
        assert_eq!(
            TemplateSource::parse("HTTP://example.com/a.xml"),
            TemplateSource::Remote("HTTP://example.com/a.xml".to_string())
        );
        assert_eq!(
            TemplateSource::parse("https://example.com/a.xml"),
            TemplateSource::Remote("https://example.com/a.xml".to_string())
        );
    }

    #[test]
    fn test_parse_local_sources() {
        assert_eq!(
            TemplateSource::parse("templates/a.xml"),
            TemplateSource::Local(PathBuf::from("templates/a.xml"))
        );
        assert_eq!(
            TemplateSource::parse("FILE://templates/a.xml"),
            TemplateSource::Local(PathBuf::from("templates/a.xml"))
        );
    }

    #[test]
    fn test_load_missing_file() {
        let err = load_content("/no/such/dir/template.xml").unwrap_err();
        match err {
            TemplaterError::SourceUnavailable { location, .. } => {
                assert_eq!(location, "/no/such/dir/template.xml");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_load_existing_file() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<MESSAGE/>").unwrap();

        let content = load_content(file.path().to_str().unwrap()).unwrap();
        assert_eq!(content, "<MESSAGE/>");
    }

    #[test]
    fn test_load_file_scheme() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(file, "<MESSAGE/>").unwrap();

        let source = format!("file://{}", file.path().display());
        assert_eq!(load_content(&source).unwrap(), "<MESSAGE/>");
    }

    #[test]
    fn test_load_empty_file_returns_empty_string() {
        let file = tempfile::NamedTempFile::new().unwrap();
        assert_eq!(load_content(file.path().to_str().unwrap()).unwrap(), "");
    }

    #[test]
    fn test_load_read_failure_is_unavailable() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_content(dir.path().to_str().unwrap()).unwrap_err();
        assert!(matches!(err, TemplaterError::SourceUnavailable { .. }));
    }

    #[test]
    fn test_load_unreachable_host() {
        // Port 9 on localhost is the discard service and is not expected to listen.
        let err = load_content("http://127.0.0.1:9/template.xml").unwrap_err();
        assert!(matches!(err, TemplaterError::SourceUnavailable { .. }));
    }
}
