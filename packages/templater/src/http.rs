//! HTTP client wrapper for fetching remote templates.

use std::io::Read;

use reqwest::blocking::Client;

use crate::config::LoaderOptions;
use crate::error::{Result, TemplaterError};

/// User agent string identifying this templater.
const USER_AGENT: &str = concat!("mail-templater/", env!("CARGO_PKG_VERSION"));

/// Create a configured HTTP client.
///
/// # Returns
/// A `reqwest::blocking::Client` configured with the loader timeout and user agent.
pub fn create_client(options: &LoaderOptions) -> Result<Client> {
    let client = Client::builder()
        .timeout(options.timeout)
        .user_agent(USER_AGENT)
        .build()?;
    Ok(client)
}

/// Fetch the body of a URL in a single attempt.
///
/// Transport errors, non-success statuses and bodies larger than
/// `max_size` are all reported as `SourceUnavailable` for `url`.
///
/// # Arguments
/// * `client` - HTTP client to use
/// * `url` - URL to download from
/// * `max_size` - Largest accepted body in bytes
///
/// # Returns
/// Raw bytes of the response body
pub fn fetch_bytes(client: &Client, url: &str, max_size: u64) -> Result<Vec<u8>> {
    let response = client
        .get(url)
        .send()
        .and_then(|response| response.error_for_status())
        .map_err(|e| TemplaterError::unavailable(url, e))?;

    if let Some(length) = response.content_length() {
        if length > max_size {
            return Err(TemplaterError::unavailable(
                url,
                format!("response of {length} bytes exceeds limit of {max_size} bytes"),
            ));
        }
    }

    // Content-Length may be absent or wrong, so cap the read as well.
    let mut bytes = Vec::new();
    response
        .take(max_size + 1)
        .read_to_end(&mut bytes)
        .map_err(|e| TemplaterError::unavailable(url, e))?;

    if bytes.len() as u64 > max_size {
        return Err(TemplaterError::unavailable(
            url,
            format!("response exceeds limit of {max_size} bytes"),
        ));
    }

    tracing::debug!(url, bytes = bytes.len(), "Fetched remote template");
    Ok(bytes)
}

/// Decode bytes as UTF-8, replacing invalid sequences.
///
/// # Arguments
/// * `bytes` - Raw content
/// * `what` - Description of the content, used in the warning
pub fn bytes_to_string(bytes: &[u8], what: &str) -> String {
    match String::from_utf8(bytes.to_vec()) {
        Ok(text) => text,
        Err(e) => {
            tracing::warn!(
                what,
                valid_up_to = e.utf8_error().valid_up_to(),
                "Content is not valid UTF-8, replacing invalid sequences"
            );
            String::from_utf8_lossy(bytes).into_owned()
        }
    }
}
