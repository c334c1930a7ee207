//! Method-dependent request construction.
//!
//! GET turns arguments into query parameters and never sends a body. POST, PUT and
//! PATCH always send a JSON body.
//!
//! ```rust
//! use ptooling::{HttpMethod, WorkingInput, build_request};
//! use reqwest::Url;
//! use serde_json::json;
//!
//! let url = Url::parse("https://api.example.com/weather").expect("valid url");
//! let input = WorkingInput::from_value(json!({"location": "Paris"}));
//! let built = build_request(HttpMethod::Get, url, &Default::default(), input);
//!
//! assert_eq!(built.request.url.as_str(), "https://api.example.com/weather?location=Paris");
//! assert!(built.request.body.is_none());
//! ```

use std::collections::BTreeMap;

use reqwest::Url;
use serde_json::{Map, Value};

use crate::{HttpMethod, InputAdjustment, Scalar, WorkingInput};

/// A fully resolved request, ready for a transport.
#[derive(Debug, Clone, PartialEq)]
pub struct PreparedRequest {
    pub method: HttpMethod,
    pub url: Url,
    pub headers: BTreeMap<String, String>,
    pub body: Option<Value>,
}

impl PreparedRequest {
    pub fn query_pairs(&self) -> Vec<(String, String)> {
        self.url
            .query_pairs()
            .map(|(key, value)| (key.into_owned(), value.into_owned()))
            .collect()
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct BuiltRequest {
    pub request: PreparedRequest,
    pub adjustment: Option<InputAdjustment>,
}

pub fn build_request(
    method: HttpMethod,
    url: Url,
    headers: &BTreeMap<String, String>,
    input: WorkingInput,
) -> BuiltRequest {
    let (url, body, adjustment) = if method.carries_body() {
        let (body, adjustment) = json_body(input);
        (url, Some(body), adjustment)
    } else {
        let (url, adjustment) = with_query(url, input);
        (url, None, adjustment)
    };

    BuiltRequest {
        request: PreparedRequest {
            method,
            url,
            headers: headers.clone(),
            body,
        },
        adjustment,
    }
}

fn with_query(mut url: Url, input: WorkingInput) -> (Url, Option<InputAdjustment>) {
    let fields = match input {
        WorkingInput::Object(fields) => fields,
        WorkingInput::Scalar(Scalar::Null) => return (url, None),
        WorkingInput::Scalar(_) => {
            return (url, Some(InputAdjustment::IgnoredForQuery { input_kind: "scalar" }));
        }
        WorkingInput::Array(_) => {
            return (url, Some(InputAdjustment::IgnoredForQuery { input_kind: "array" }));
        }
    };

    let pairs = query_pairs(&fields);
    if !pairs.is_empty() {
        url.query_pairs_mut().extend_pairs(pairs);
    }

    (url, None)
}

/// Flattens an argument object into query pairs.
///
/// Arrays repeat their key once per element; nested objects are sent as JSON text.
pub fn query_pairs(fields: &Map<String, Value>) -> Vec<(String, String)> {
    let mut pairs = Vec::with_capacity(fields.len());
    for (key, value) in fields {
        match value {
            Value::Array(items) => {
                pairs.extend(items.iter().map(|item| (key.clone(), query_value(item))));
            }
            other => pairs.push((key.clone(), query_value(other))),
        }
    }
    pairs
}

fn query_value(value: &Value) -> String {
    match value {
        Value::String(text) => text.clone(),
        Value::Null => String::new(),
        Value::Bool(flag) => flag.to_string(),
        Value::Number(number) => number.to_string(),
        nested => nested.to_string(),
    }
}

fn json_body(input: WorkingInput) -> (Value, Option<InputAdjustment>) {
    match input {
        WorkingInput::Object(fields) => (Value::Object(fields), None),
        WorkingInput::Array(items) => (Value::Array(items), None),
        WorkingInput::Scalar(Scalar::Null) => (Value::Object(Map::new()), None),
        WorkingInput::Scalar(Scalar::Text(text)) => match serde_json::from_str::<Value>(&text) {
            Ok(decoded) => (decoded, Some(InputAdjustment::DecodedEmbeddedJson)),
            Err(_) => (wrap_value(Value::String(text)), Some(InputAdjustment::WrappedAsValue)),
        },
        WorkingInput::Scalar(scalar) => {
            (wrap_value(scalar.to_value()), Some(InputAdjustment::WrappedAsValue))
        }
    }
}

fn wrap_value(value: Value) -> Value {
    let mut wrapper = Map::new();
    wrapper.insert("value".to_string(), value);
    Value::Object(wrapper)
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn endpoint() -> Url {
        Url::parse("https://api.example.com/weather").expect("valid url")
    }

    fn build(method: HttpMethod, input: Value) -> BuiltRequest {
        build_request(method, endpoint(), &BTreeMap::new(), WorkingInput::from_value(input))
    }

    #[test]
    fn get_stringifies_query_values() {
        let built = build(
            HttpMethod::Get,
            json!({"city": "São Paulo", "days": 3, "metric": true, "hint": null}),
        );

        assert_eq!(
            built.request.query_pairs(),
            vec![
                ("city".to_string(), "São Paulo".to_string()),
                ("days".to_string(), "3".to_string()),
                ("hint".to_string(), String::new()),
                ("metric".to_string(), "true".to_string()),
            ]
        );
        assert!(built.request.body.is_none());
    }

    #[test]
    fn get_repeats_keys_for_arrays_and_encodes_nested_objects() {
        let built = build(
            HttpMethod::Get,
            json!({"tag": ["a", "b"], "filter": {"min": 1}}),
        );

        assert_eq!(
            built.request.query_pairs(),
            vec![
                ("filter".to_string(), "{\"min\":1}".to_string()),
                ("tag".to_string(), "a".to_string()),
                ("tag".to_string(), "b".to_string()),
            ]
        );
    }

    #[test]
    fn get_keeps_existing_query_and_skips_empty_objects() {
        let url = Url::parse("https://api.example.com/search?v=2").expect("valid url");
        let built = build_request(
            HttpMethod::Get,
            url,
            &BTreeMap::new(),
            WorkingInput::from_value(json!({"q": "rust"})),
        );
        assert_eq!(built.request.url.as_str(), "https://api.example.com/search?v=2&q=rust");

        let built = build(HttpMethod::Get, json!({}));
        assert_eq!(built.request.url.as_str(), "https://api.example.com/weather");
    }

    #[test]
    fn get_never_sends_a_body_even_for_unusable_input() {
        let built = build(HttpMethod::Get, json!("Paris"));
        assert!(built.request.body.is_none());
        assert_eq!(built.request.url.query(), None);
        assert_eq!(
            built.adjustment,
            Some(InputAdjustment::IgnoredForQuery { input_kind: "scalar" })
        );
    }

    #[test]
    fn body_methods_send_objects_and_arrays_verbatim() {
        for method in [HttpMethod::Post, HttpMethod::Put, HttpMethod::Patch] {
            let built = build(method, json!({"a": 1}));
            assert_eq!(built.request.body, Some(json!({"a": 1})));
            assert_eq!(built.adjustment, None);
        }

        let built = build(HttpMethod::Post, json!([1, 2]));
        assert_eq!(built.request.body, Some(json!([1, 2])));
    }

    #[test]
    fn body_methods_wrap_plain_text_as_value() {
        let built = build(HttpMethod::Post, json!("not valid json"));
        assert_eq!(built.request.body, Some(json!({"value": "not valid json"})));
        assert_eq!(built.adjustment, Some(InputAdjustment::WrappedAsValue));

        let built = build(HttpMethod::Put, json!(7));
        assert_eq!(built.request.body, Some(json!({"value": 7})));
    }

    #[test]
    fn body_methods_decode_json_held_in_a_string() {
        let built = build(HttpMethod::Patch, json!("{\"status\":\"done\"}"));
        assert_eq!(built.request.body, Some(json!({"status": "done"})));
        assert_eq!(built.adjustment, Some(InputAdjustment::DecodedEmbeddedJson));
    }

    #[test]
    fn body_methods_send_empty_object_for_missing_input() {
        let built = build(HttpMethod::Post, Value::Null);
        assert_eq!(built.request.body, Some(json!({})));
    }

    #[test]
    fn headers_are_copied_onto_the_request() {
        let mut headers = BTreeMap::new();
        headers.insert("X-API-Key".to_string(), "secret".to_string());

        let built = build_request(
            HttpMethod::Get,
            endpoint(),
            &headers,
            WorkingInput::Scalar(Scalar::Null),
        );
        assert_eq!(built.request.headers.get("X-API-Key").map(String::as_str), Some("secret"));
    }
}
