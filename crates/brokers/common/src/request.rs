use lykke_core::{ExchangeError, Params};

/// HTTP verbs used by REST exchange endpoints.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HttpMethod {
    Get,
    Post,
}

impl HttpMethod {
    pub fn as_str(&self) -> &'static str {
        match self {
            HttpMethod::Get => "GET",
            HttpMethod::Post => "POST",
        }
    }
}

impl std::fmt::Display for HttpMethod {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A fully built request, ready for a [`crate::Transport`].
#[derive(Debug, Clone, PartialEq)]
pub struct SignedRequest {
    pub url: String,
    pub method: HttpMethod,
    pub headers: Vec<(String, String)>,
    pub body: Option<String>,
}

impl SignedRequest {
    /// Look up a header value (case-insensitive).
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers
            .iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// URL without its query string.
    pub fn path(&self) -> &str {
        self.url.split('?').next().unwrap_or(&self.url)
    }

    pub fn query(&self) -> Option<&str> {
        self.url.split_once('?').map(|(_, q)| q)
    }
}

/// Render a parameter value the way it appears in a URL.
pub fn param_to_string(value: &serde_json::Value) -> String {
    match value {
        serde_json::Value::String(s) => s.clone(),
        serde_json::Value::Null => String::new(),
        other => other.to_string(),
    }
}

/// Names of the `{placeholder}` segments in a path template, in order.
pub fn extract_params(path: &str) -> Vec<String> {
    let mut names = Vec::new();
    let mut rest = path;
    while let Some(start) = rest.find('{') {
        let after = &rest[start + 1..];
        match after.find('}') {
            Some(end) => {
                names.push(after[..end].to_string());
                rest = &after[end + 1..];
            }
            None => break,
        }
    }
    names
}

fn placeholder(segment: &str) -> Option<&str> {
    segment.strip_prefix('{')?.strip_suffix('}')
}

/// Append the path template `path` to `base`, substituting `{placeholder}`
/// segments from `params`.
///
/// Each substituted value is percent-encoded as exactly one path segment, so
/// `/`, `?` and `#` inside a value stay part of it. Values that cannot be a
/// segment on their own (empty, `.` or `..`) are rejected. Placeholders
/// without a matching parameter are kept by name.
pub fn implode_params(base: &str, path: &str, params: &Params) -> Result<String, ExchangeError> {
    let mut segments = Vec::new();
    for segment in path.split('/').filter(|s| !s.is_empty()) {
        match placeholder(segment).and_then(|name| params.get(name)) {
            Some(value) => {
                let value = param_to_string(value);
                if matches!(value.as_str(), "" | "." | "..") {
                    return Err(ExchangeError::BadRequest(format!(
                        "{:?} is not a valid value for {}",
                        value, segment
                    )));
                }
                segments.push(value);
            }
            None => segments.push(segment.to_string()),
        }
    }

    let mut url = reqwest::Url::parse(base)
        .map_err(|e| ExchangeError::Network(format!("Invalid URL {}: {}", base, e)))?;
    url.path_segments_mut()
        .map_err(|_| ExchangeError::Network(format!("Invalid base URL {}", base)))?
        .pop_if_empty()
        .extend(&segments);
    Ok(url.to_string())
}

/// Copy of `params` without the given keys.
pub fn omit(params: &Params, keys: &[String]) -> Params {
    params
        .iter()
        .filter(|(k, _)| !keys.contains(k))
        .map(|(k, v)| (k.clone(), v.clone()))
        .collect()
}

/// Append `params` to `url` as a urlencoded query string.
pub fn append_query(url: &str, params: &Params) -> Result<String, ExchangeError> {
    if params.is_empty() {
        return Ok(url.to_string());
    }
    let mut parsed = reqwest::Url::parse(url)
        .map_err(|e| ExchangeError::Network(format!("Invalid URL {}: {}", url, e)))?;
    {
        let mut pairs = parsed.query_pairs_mut();
        for (key, value) in params {
            pairs.append_pair(key, &param_to_string(value));
        }
    }
    Ok(parsed.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn params(value: serde_json::Value) -> Params {
        value.as_object().cloned().unwrap_or_default()
    }

    #[test]
    fn test_extract_params() {
        assert_eq!(extract_params("Orders/{id}/Cancel"), vec!["id"]);
        assert_eq!(extract_params("a/{x}/b/{y}"), vec!["x", "y"]);
        assert!(extract_params("Wallets").is_empty());
    }

    const BASE: &str = "https://example.com/api";

    #[test]
    fn test_implode_params() {
        let p = params(json!({"id": "abc", "status": "Matched"}));
        assert_eq!(
            implode_params(BASE, "Orders/{id}/Cancel", &p).unwrap(),
            "https://example.com/api/Orders/abc/Cancel"
        );
        assert_eq!(
            implode_params(BASE, "Orders/{missing}", &p).unwrap(),
            "https://example.com/api/Orders/%7Bmissing%7D"
        );
        assert_eq!(
            implode_params("http://127.0.0.1:8080/", "Wallets", &p).unwrap(),
            "http://127.0.0.1:8080/Wallets"
        );
    }

    #[test]
    fn test_implode_params_keeps_values_in_one_segment() {
        let p = params(json!({"id": "../Wallets"}));
        assert_eq!(
            implode_params(BASE, "Orders/{id}", &p).unwrap(),
            "https://example.com/api/Orders/..%2FWallets"
        );

        let p = params(json!({"id": "x?status=Matched"}));
        assert_eq!(
            implode_params(BASE, "Orders/{id}/Cancel", &p).unwrap(),
            "https://example.com/api/Orders/x%3Fstatus=Matched/Cancel"
        );
    }

    #[test]
    fn test_implode_params_rejects_dot_segments() {
        for id in ["", ".", ".."] {
            let p = params(json!({ "id": id }));
            assert!(matches!(
                implode_params(BASE, "Orders/{id}", &p),
                Err(ExchangeError::BadRequest(_))
            ));
        }
    }

    #[test]
    fn test_omit_removes_path_params() {
        let p = params(json!({"id": "abc", "status": "Matched"}));
        let rest = omit(&p, &extract_params("Orders/{id}"));
        assert_eq!(rest.len(), 1);
        assert_eq!(rest["status"], json!("Matched"));
    }

    #[test]
    fn test_append_query_encodes_values() {
        let p = params(json!({"status": "In Book", "take": 10}));
        let url = append_query("https://example.com/api/Orders", &p).unwrap();
        assert_eq!(url, "https://example.com/api/Orders?status=In+Book&take=10");
    }

    #[test]
    fn test_append_query_empty_leaves_url_untouched() {
        let url = append_query("https://example.com/api/Wallets", &Params::new()).unwrap();
        assert_eq!(url, "https://example.com/api/Wallets");
    }

    #[test]
    fn test_header_lookup_is_case_insensitive() {
        let request = SignedRequest {
            url: "https://example.com/api/Wallets?x=1".to_string(),
            method: HttpMethod::Get,
            headers: vec![("api-key".to_string(), "k".to_string())],
            body: None,
        };
        assert_eq!(request.header("API-KEY"), Some("k"));
        assert_eq!(request.path(), "https://example.com/api/Wallets");
        assert_eq!(request.query(), Some("x=1"));
    }
}
