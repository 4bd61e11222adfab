//! Routing flat form parameters to a split accessor

use indexmap::IndexMap;
use serde_json::{Map, Value};

use crate::component::Component;
use crate::error::{SplitError, SplitResult};

/// Derived parameter names for a base attribute, in conventional form
/// layout order: `starts_at` yields `starts_at_date`, `starts_at_year`,
/// and so on.
///
/// For callers that maintain mass-assignment allow-lists; the library
/// itself never needs the list.
pub fn param_names(base: &str) -> Vec<String> {
    Component::ALL
        .iter()
        .map(|component| format!("{base}_{}", component.suffix()))
        .collect()
}

/// Filter a flat parameter list down to one attribute's derived
/// parameters, stripping the `<base>_` prefix and preserving submission
/// order. Keys that do not start with the prefix are ignored; keys that
/// do but name no derived accessor are kept so that
/// [`Split::apply`](crate::Split::apply) can reject them loudly.
pub fn for_attr<'a, I>(base: &str, params: I) -> IndexMap<String, String>
where
    I: IntoIterator<Item = (&'a str, &'a str)>,
{
    let prefix = format!("{base}_");
    let mut selected = IndexMap::new();
    for (name, value) in params {
        if let Some(suffix) = name.strip_prefix(&prefix) {
            selected.insert(suffix.to_string(), value.to_string());
        }
    }
    selected
}

/// Convert a JSON object of form values into string parameters.
///
/// Strings pass through, integers are rendered, `null` becomes the empty
/// string (a no-op on assign). Any other value shape is malformed input
/// for the key it arrived under.
pub fn params_from_json(object: &Map<String, Value>) -> SplitResult<IndexMap<String, String>> {
    let mut params = IndexMap::new();
    for (name, value) in object {
        let rendered = match value {
            Value::String(s) => s.clone(),
            Value::Number(n) => n.to_string(),
            Value::Null => String::new(),
            other => {
                return Err(SplitError::MalformedInput {
                    component: name.clone(),
                    input: other.to_string(),
                    expected: "a string, integer or null".to_string(),
                });
            }
        };
        params.insert(name.clone(), rendered);
    }
    Ok(params)
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn param_names_cover_the_whole_family() {
        assert_eq!(
            param_names("starts_at"),
            vec![
                "starts_at_date",
                "starts_at_year",
                "starts_at_month",
                "starts_at_day",
                "starts_at_hour",
                "starts_at_min",
                "starts_at_time",
            ]
        );
    }

    #[test]
    fn for_attr_strips_prefix_and_keeps_order() {
        let params = for_attr(
            "starts_at",
            [
                ("starts_at_date", "2024-06-03"),
                ("title", "picnic"),
                ("starts_at_hour", "14"),
                ("ends_at_hour", "16"),
            ],
        );
        let collected: Vec<_> = params
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_str()))
            .collect();
        assert_eq!(collected, vec![("date", "2024-06-03"), ("hour", "14")]);
    }

    #[test]
    fn for_attr_keeps_unknown_suffixes_for_loud_rejection() {
        let params = for_attr("starts_at", [("starts_at_sec", "30")]);
        assert_eq!(params.get("sec").map(String::as_str), Some("30"));
    }

    #[test]
    fn json_values_render_to_form_strings() {
        let payload = json!({
            "starts_at_date": "2024-06-03",
            "starts_at_hour": 14,
            "starts_at_min": null,
        });
        let params = params_from_json(payload.as_object().unwrap()).unwrap();
        assert_eq!(params.get("starts_at_date").map(String::as_str), Some("2024-06-03"));
        assert_eq!(params.get("starts_at_hour").map(String::as_str), Some("14"));
        assert_eq!(params.get("starts_at_min").map(String::as_str), Some(""));
    }

    #[test]
    fn json_rejects_non_scalar_values() {
        let payload = json!({ "starts_at_date": ["2024", "06", "03"] });
        assert!(matches!(
            params_from_json(payload.as_object().unwrap()),
            Err(SplitError::MalformedInput { .. })
        ));
    }
}
