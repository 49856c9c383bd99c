use serde::{Deserialize, Serialize};

/// Timestamp value meaning "no constraint" for `starts_on` / `stops_on`.
pub const UNSET_TIMESTAMP: i64 = 0;

/// A redirect rule as stored by the redirect-management API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Redirect {
    pub id: i64,
    pub from_path: String,
    pub to_url: String,
    /// Epoch milliseconds, or [`UNSET_TIMESTAMP`].
    pub starts_on: i64,
    /// Epoch milliseconds, or [`UNSET_TIMESTAMP`].
    pub stops_on: i64,
}

impl Redirect {
    pub fn has_start(&self) -> bool {
        self.starts_on != UNSET_TIMESTAMP
    }

    pub fn has_stop(&self) -> bool {
        self.stops_on != UNSET_TIMESTAMP
    }
}

/// Body of a create or update call. All four fields are always sent.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RedirectRequest {
    pub from_path: String,
    pub to_url: String,
    pub starts_on: i64,
    pub stops_on: i64,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn redirect_uses_camel_case_wire_names() {
        let raw = r#"{"id":7,"fromPath":"/old","toUrl":"https://new.example.com","startsOn":0,"stopsOn":1700000000000}"#;
        let redirect: Redirect = serde_json::from_str(raw).unwrap();

        assert_eq!(redirect.id, 7);
        assert_eq!(redirect.from_path, "/old");
        assert_eq!(redirect.to_url, "https://new.example.com");
        assert!(!redirect.has_start());
        assert!(redirect.has_stop());
    }

    #[test]
    fn request_body_never_carries_an_id() {
        let body = RedirectRequest {
            from_path: "/old".to_string(),
            to_url: "https://new.example.com".to_string(),
            starts_on: 0,
            stops_on: 0,
        };

        assert_eq!(
            serde_json::to_value(&body).unwrap(),
            serde_json::json!({
                "fromPath": "/old",
                "toUrl": "https://new.example.com",
                "startsOn": 0,
                "stopsOn": 0,
            })
        );
    }
}
