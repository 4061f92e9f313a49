//! URL list loading for urlpoll
//!
//! The monitored set is read once at startup from a plain text file with one
//! URL per line. Blank lines and lines starting with `#` are ignored. Any
//! failure here is fatal: the monitor never starts with a partial list.

use crate::ConfigError;
use std::path::Path;
use url::Url;

/// Reads and validates the URL list at `path`
///
/// # Arguments
///
/// * `path` - Path to the URL list file
///
/// # Returns
///
/// * `Ok(Vec<String>)` - The URLs in file order
/// * `Err(ConfigError)` - The file is unreadable, empty, or holds an invalid URL
///
/// # Example
///
/// ```no_run
/// use std::path::Path;
/// use urlpoll::urls::load_urls;
///
/// let urls = load_urls(Path::new("urls.txt")).unwrap();
/// println!("Monitoring {} URLs", urls.len());
/// ```
pub fn load_urls(path: &Path) -> Result<Vec<String>, ConfigError> {
    let content = std::fs::read_to_string(path).map_err(|source| ConfigError::UrlFile {
        path: path.display().to_string(),
        source,
    })?;
    let urls = parse_url_list(&content)?;

    if urls.is_empty() {
        return Err(ConfigError::Validation(format!(
            "URL list '{}' contains no URLs",
            path.display()
        )));
    }

    Ok(urls)
}

/// Parses URL list content, one URL per line
pub fn parse_url_list(content: &str) -> Result<Vec<String>, ConfigError> {
    let mut urls = Vec::new();

    for (index, line) in content.lines().enumerate() {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            continue;
        }

        validate_url(line).map_err(|reason| {
            ConfigError::InvalidUrl(format!("line {}: '{}': {}", index + 1, line, reason))
        })?;

        urls.push(line.to_string());
    }

    Ok(urls)
}

/// Checks that a list entry is an absolute http(s) URL
fn validate_url(candidate: &str) -> Result<(), String> {
    let url = Url::parse(candidate).map_err(|e| e.to_string())?;

    match url.scheme() {
        "http" | "https" => {}
        other => return Err(format!("unsupported scheme '{}'", other)),
    }

    if url.host_str().is_none() {
        return Err("missing host".to_string());
    }

    Ok(())
}
