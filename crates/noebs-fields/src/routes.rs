//! Route catalogue
//!
//! A flat `{http_method, path}` listing of the routes the transport layer
//! exposes, for documentation tooling. Built once from a route snapshot.

use serde::{Deserialize, Serialize};

/// One exposed route
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "openapi", derive(utoipa::ToSchema))]
pub struct RouteEntry {
    pub http_method: String,
    /// Path without its leading separator
    pub path: String,
}

impl RouteEntry {
    pub fn new(method: impl Into<String>, path: &str) -> Self {
        Self {
            http_method: method.into(),
            path: path.strip_prefix('/').unwrap_or(path).to_string(),
        }
    }
}

/// Build the catalogue from `(method, path)` pairs, keeping their order.
pub fn build_route_catalogue<I, M, P>(routes: I) -> Vec<RouteEntry>
where
    I: IntoIterator<Item = (M, P)>,
    M: Into<String>,
    P: AsRef<str>,
{
    routes
        .into_iter()
        .map(|(method, path)| RouteEntry::new(method, path.as_ref()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_catalogue_order_and_prefix() {
        let catalogue = build_route_catalogue([("POST", "/cashOut"), ("GET", "/dashboard/all")]);
        assert_eq!(
            catalogue,
            vec![
                RouteEntry { http_method: "POST".into(), path: "cashOut".into() },
                RouteEntry { http_method: "GET".into(), path: "dashboard/all".into() },
            ]
        );
    }

    #[test]
    fn test_only_one_separator_stripped() {
        assert_eq!(RouteEntry::new("GET", "//double").path, "/double");
        assert_eq!(RouteEntry::new("GET", "plain").path, "plain");
        assert_eq!(RouteEntry::new("GET", "/").path, "");
    }

    #[test]
    fn test_empty_snapshot() {
        let catalogue = build_route_catalogue(Vec::<(String, String)>::new());
        assert!(catalogue.is_empty());
    }

    #[test]
    fn test_wire_format() {
        let json = serde_json::to_value(RouteEntry::new("POST", "/balance")).unwrap();
        assert_eq!(json, serde_json::json!({"http_method": "POST", "path": "balance"}));
    }
}
