use tracing::debug;

use chaincfg_core::{ConfigurationError, EnvSnapshot};

/// A resolved RPC endpoint.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Endpoint {
    pub url: String,
    pub is_custom: bool,
}

/// Pick the RPC endpoint: the environment override when set, otherwise the
/// declared default.
///
/// Returns `Err` if the override is not a valid http(s) URL.
pub fn resolve_endpoint(
    env: &EnvSnapshot,
    variable: Option<&str>,
    default_url: &str,
) -> Result<Endpoint, ConfigurationError> {
    let Some((variable, url)) = variable.and_then(|var| env.get(var).map(|url| (var, url))) else {
        debug!(url = default_url, "using default RPC endpoint");
        return Ok(Endpoint {
            url: default_url.to_string(),
            is_custom: false,
        });
    };

    let url = url.trim();
    if !validate_url(url) {
        return Err(ConfigurationError::InvalidUrl {
            variable: variable.to_string(),
            value: url.to_string(),
        });
    }
    debug!(variable, "using RPC endpoint override");
    Ok(Endpoint {
        url: url.to_string(),
        is_custom: true,
    })
}

/// Validate that a URL is well-formed and uses HTTP or HTTPS.
pub fn validate_url(url: &str) -> bool {
    match url::Url::parse(url) {
        Ok(parsed) => {
            let scheme = parsed.scheme();
            (scheme == "http" || scheme == "https") && parsed.host().is_some()
        }
        Err(_) => false,
    }
}
