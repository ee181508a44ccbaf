//! Path rewriting for the development proxy.
//!
//! `/api/webhook/abc?x=1` is forwarded to the dev target as
//! `/webhook/abc?x=1`. Only whole-segment `/api` prefixes match.

/// Prefix stripped by the development proxy.
pub const DEV_PROXY_PREFIX: &str = "/api";

/// Strip [`DEV_PROXY_PREFIX`] from `path_and_query`.
///
/// Returns `None` when the path is not under the prefix.
pub fn rewrite_api_path(path_and_query: &str) -> Option<String> {
    let rest = path_and_query.strip_prefix(DEV_PROXY_PREFIX)?;

    if rest.is_empty() {
        return Some("/".to_string());
    }

    match rest.as_bytes()[0] {
        b'/' => Some(rest.to_string()),
        b'?' => Some(format!("/{rest}")),
        _ => None,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn strips_prefix() {
        assert_eq!(
            rewrite_api_path("/api/webhook/chat").as_deref(),
            Some("/webhook/chat")
        );
    }

    #[test]
    fn keeps_query_string() {
        assert_eq!(
            rewrite_api_path("/api/webhook-test/chat?debug=1").as_deref(),
            Some("/webhook-test/chat?debug=1")
        );
        assert_eq!(rewrite_api_path("/api?x=1").as_deref(), Some("/?x=1"));
    }

    #[test]
    fn bare_prefix_maps_to_root() {
        assert_eq!(rewrite_api_path("/api").as_deref(), Some("/"));
        assert_eq!(rewrite_api_path("/api/").as_deref(), Some("/"));
    }

    #[test]
    fn non_matching_paths_are_rejected() {
        assert!(rewrite_api_path("/apix/webhook").is_none());
        assert!(rewrite_api_path("/webhook/chat").is_none());
        assert!(rewrite_api_path("/").is_none());
    }
}
