use reqwest::header::{HeaderMap, HeaderName, HeaderValue};
use std::collections::HashMap;

use crate::{ConfigError, ConfigResult};

/// Resolved HTTP header sets for fetching
///
/// Holds the default header set plus per-site overrides. An override
/// replaces the default set entirely rather than merging with it, so a site
/// entry carrying only a `Cookie` sends no custom `User-Agent` at all.
#[derive(Debug, Clone)]
pub struct HeaderTable {
    default: HeaderMap,
    per_site: HashMap<String, HeaderMap>,
}

impl HeaderTable {
    /// Builds the table from configured header name/value maps
    ///
    /// # Arguments
    ///
    /// * `default` - headers used when no site override applies
    /// * `per_site` - header sets keyed by site name
    ///
    /// # Returns
    ///
    /// * `Ok(HeaderTable)` - all names and values were valid HTTP headers
    /// * `Err(ConfigError::InvalidHeader)` - a name or value was malformed
    pub fn build(
        default: &HashMap<String, String>,
        per_site: &HashMap<String, HashMap<String, String>>,
    ) -> ConfigResult<Self> {
        let mut sites = HashMap::with_capacity(per_site.len());
        for (site, headers) in per_site {
            sites.insert(site.clone(), build_header_map(headers)?);
        }
        Ok(Self {
            default: build_header_map(default)?,
            per_site: sites,
        })
    }

    /// Returns the header set for a site, falling back to the default set
    pub fn for_site(&self, site: &str) -> &HeaderMap {
        self.per_site.get(site).unwrap_or(&self.default)
    }
}

fn build_header_map(headers: &HashMap<String, String>) -> ConfigResult<HeaderMap> {
    let mut map = HeaderMap::with_capacity(headers.len());
    for (name, value) in headers {
        let header_name = HeaderName::from_bytes(name.as_bytes())
            .map_err(|_| ConfigError::InvalidHeader(name.clone()))?;
        let header_value = HeaderValue::from_str(value)
            .map_err(|_| ConfigError::InvalidHeader(format!("{}: {}", name, value)))?;
        map.insert(header_name, header_value);
    }
    Ok(map)
}
