use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::error;

/// Default page element the loader's error message is written into.
pub const DEFAULT_ERROR_TARGET: &str = "#resultCount";

/// Options for the generic JSON resource loader.
#[derive(Debug, Clone)]
pub struct LoadOptions {
    /// Returned in place of the payload when the load fails.
    pub fallback: Value,
    /// Page-element selector the error message is written into.
    pub error_target: String,
}

impl Default for LoadOptions {
    fn default() -> Self {
        Self {
            fallback: Value::Null,
            error_target: DEFAULT_ERROR_TARGET.to_string(),
        }
    }
}

/// A user-visible message destined for one page element.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LoadNotice {
    pub target: String,
    pub message: String,
}

/// Result of a load: always a value (payload or fallback), plus a notice
/// when the load failed.
#[derive(Debug, Clone)]
pub struct LoadOutcome {
    pub value: Value,
    pub notice: Option<LoadNotice>,
}

/// Fetch and parse a JSON resource by relative path. One-shot, no retry.
/// Any failure is converted into the fallback value and a notice; it is
/// never surfaced as an error.
pub fn load_json(path: &Path, options: &LoadOptions) -> LoadOutcome {
    let loaded = fs::read_to_string(path)
        .map_err(|err| err.to_string())
        .and_then(|raw| serde_json::from_str(&raw).map_err(|err| err.to_string()));
    match loaded {
        Ok(value) => LoadOutcome {
            value,
            notice: None,
        },
        Err(err) => {
            error!(path = %path.display(), error = %err, "failed to load JSON resource");
            LoadOutcome {
                value: options.fallback.clone(),
                notice: Some(LoadNotice {
                    target: options.error_target.clone(),
                    message: format!("Could not load {}. {}.", path.display(), err),
                }),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn load_json_returns_the_parsed_payload() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("careers.json");
        fs::write(&path, r#"[{"title": "Data Analyst"}]"#).unwrap();
        let outcome = load_json(&path, &LoadOptions::default());
        assert!(outcome.notice.is_none());
        assert_eq!(outcome.value[0]["title"], "Data Analyst");
    }

    #[test]
    fn missing_resource_yields_fallback_and_notice() {
        let options = LoadOptions {
            fallback: json!([]),
            error_target: "#resultCount".to_string(),
        };
        let outcome = load_json(Path::new("/no/such/file.json"), &options);
        assert_eq!(outcome.value, json!([]));
        let notice = outcome.notice.unwrap();
        assert_eq!(notice.target, "#resultCount");
        assert!(notice.message.starts_with("Could not load /no/such/file.json."));
    }

    #[test]
    fn malformed_resource_yields_fallback_too() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("broken.json");
        fs::write(&path, "{oops").unwrap();
        let outcome = load_json(&path, &LoadOptions::default());
        assert_eq!(outcome.value, Value::Null);
        assert!(outcome.notice.is_some());
    }

    #[test]
    fn default_options_use_the_fixed_target() {
        let options = LoadOptions::default();
        assert_eq!(options.error_target, DEFAULT_ERROR_TARGET);
        assert_eq!(options.fallback, Value::Null);
    }
}
