//! Parameter schemas and the checks run on agent arguments before a request is built.
//!
//! Validation is delegated to [`jsonschema`], so `$ref`, `$defs`, combinators and format
//! keywords behave the way any JSON Schema tool would treat them. Failures are reported as
//! [`SchemaViolation`]s addressed by a readable field path rather than a JSON pointer.
//!
//! ```rust
//! use ptooling::ParameterSchema;
//! use serde_json::json;
//!
//! let schema = ParameterSchema::new(json!({
//!     "type": "object",
//!     "properties": {"location": {"type": "string"}},
//!     "required": ["location"]
//! }));
//!
//! assert_eq!(schema.single_parameter(), Some("location"));
//! assert!(schema.validate(&json!({"location": "Paris"})).is_ok());
//!
//! let violations = schema.validate(&json!({})).expect_err("location is required");
//! assert_eq!(violations[0].path, "location");
//! ```

use std::fmt::{Debug, Display, Formatter};
use std::sync::{Arc, OnceLock};

use jsonschema::JSONSchema;
use jsonschema::error::{TypeKind, ValidationError, ValidationErrorKind};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::ToolError;

/// One failed constraint, addressed by a dotted/indexed field path (`address.city`, `tags[1]`).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchemaViolation {
    pub path: String,
    pub message: String,
}

impl SchemaViolation {
    pub fn new(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl Display for SchemaViolation {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        if self.path.is_empty() {
            write!(f, "arguments: {}", self.message)
        } else {
            write!(f, "{}: {}", self.path, self.message)
        }
    }
}

/// A tool's parameter schema, compiled on first use and shared by every clone.
#[derive(Clone, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ParameterSchema {
    document: Value,
    #[serde(skip)]
    compiled: Arc<OnceLock<Result<JSONSchema, String>>>,
}

impl ParameterSchema {
    pub fn new(schema: Value) -> Self {
        Self {
            document: schema,
            compiled: Arc::default(),
        }
    }

    pub fn from_json_str(schema_json: &str) -> Result<Self, ToolError> {
        serde_json::from_str(schema_json)
            .map(Self::new)
            .map_err(|err| ToolError::invalid_config(format!("invalid parameter schema: {err}")))
    }

    pub fn as_value(&self) -> &Value {
        &self.document
    }

    /// The compiled validator, or a config error if the document is not a usable schema.
    pub fn compile(&self) -> Result<&JSONSchema, ToolError> {
        self.compiled
            .get_or_init(|| JSONSchema::compile(&self.document).map_err(|err| err.to_string()))
            .as_ref()
            .map_err(|reason| {
                ToolError::invalid_config(format!(
                    "Parameter schema is not valid JSON Schema: {reason}"
                ))
            })
    }

    pub fn properties(&self) -> Option<&Map<String, Value>> {
        self.document.get("properties").and_then(Value::as_object)
    }

    pub fn property_names(&self) -> Vec<&str> {
        self.properties()
            .map(|properties| properties.keys().map(String::as_str).collect())
            .unwrap_or_default()
    }

    pub fn required(&self) -> Vec<&str> {
        self.document
            .get("required")
            .and_then(Value::as_array)
            .map(|names| names.iter().filter_map(Value::as_str).collect())
            .unwrap_or_default()
    }

    /// First declared `type` of a property, if the schema names one.
    pub fn property_type(&self, name: &str) -> Option<&str> {
        let declared = self.properties()?.get(name)?.get("type")?;
        match declared {
            Value::String(kind) => Some(kind.as_str()),
            Value::Array(kinds) => kinds.iter().find_map(Value::as_str),
            _ => None,
        }
    }

    /// The parameter a bare scalar argument should be bound to.
    ///
    /// That is the only declared property, or failing that the only required property.
    pub fn single_parameter(&self) -> Option<&str> {
        let names = self.property_names();
        if names.len() == 1 {
            return names.first().copied();
        }

        match self.required().as_slice() {
            [only] if names.is_empty() || names.contains(only) => Some(*only),
            _ => None,
        }
    }

    /// Checks `value`, returning every violation ordered by field path.
    ///
    /// A schema that does not compile yields a single root violation; callers that need to
    /// tell the two apart should call [`ParameterSchema::compile`] first.
    pub fn validate(&self, value: &Value) -> Result<(), Vec<SchemaViolation>> {
        let validator = self.compile().map_err(|error| {
            vec![SchemaViolation::new(
                "",
                format!("cannot be checked: {}", error.message),
            )]
        })?;

        let Err(errors) = validator.validate(value) else {
            return Ok(());
        };

        let mut violations: Vec<SchemaViolation> = errors
            .flat_map(|error| violations_for(&error, value))
            .collect();
        violations.sort_by(|left, right| left.path.cmp(&right.path));
        Err(violations)
    }
}

impl PartialEq for ParameterSchema {
    fn eq(&self, other: &Self) -> bool {
        self.document == other.document
    }
}

impl Debug for ParameterSchema {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        f.debug_tuple("ParameterSchema").field(&self.document).finish()
    }
}

impl From<Value> for ParameterSchema {
    fn from(schema: Value) -> Self {
        Self::new(schema)
    }
}

/// Checks `value` against a raw schema document, returning every violation found.
pub fn validate_value(schema: &Value, value: &Value) -> Vec<SchemaViolation> {
    ParameterSchema::new(schema.clone())
        .validate(value)
        .err()
        .unwrap_or_default()
}

fn violations_for(error: &ValidationError<'_>, root: &Value) -> Vec<SchemaViolation> {
    let path = field_path(&error.instance_path.to_string(), root);

    match &error.kind {
        ValidationErrorKind::Required { property } => {
            let name = property
                .as_str()
                .map(str::to_string)
                .unwrap_or_else(|| property.to_string());
            vec![SchemaViolation::new(join_field(&path, &name), "is required")]
        }
        ValidationErrorKind::AdditionalProperties { unexpected } => unexpected
            .iter()
            .map(|name| SchemaViolation::new(join_field(&path, name), "is not an allowed property"))
            .collect(),
        ValidationErrorKind::Enum { options } => {
            vec![SchemaViolation::new(path, format!("must be one of {options}"))]
        }
        ValidationErrorKind::Type { kind } => vec![SchemaViolation::new(
            path,
            format!(
                "expected {}, got {}",
                describe_type_kind(kind),
                json_type_name(&error.instance)
            ),
        )],
        _ => vec![SchemaViolation::new(path, error.to_string())],
    }
}

/// Turns a JSON pointer such as `/tags/1` into `tags[1]`, using `root` to tell array
/// indexes from object keys that happen to be numeric.
fn field_path(pointer: &str, root: &Value) -> String {
    let mut path = String::new();
    let mut node = Some(root);

    for raw in pointer.split('/').skip(1) {
        let segment = raw.replace("~1", "/").replace("~0", "~");
        match (node, segment.parse::<usize>()) {
            (Some(Value::Array(items)), Ok(index)) => {
                path = join_index(&path, index);
                node = items.get(index);
            }
            (current, _) => {
                path = join_field(&path, &segment);
                node = current.and_then(|value| value.get(&segment));
            }
        }
    }

    path
}

fn describe_type_kind(kind: &TypeKind) -> String {
    match kind {
        TypeKind::Single(primitive) => primitive.to_string(),
        TypeKind::Multiple(types) => (*types)
            .into_iter()
            .map(|primitive| primitive.to_string())
            .collect::<Vec<_>>()
            .join(" or "),
    }
}

fn is_integer(value: &Value) -> bool {
    match value {
        Value::Number(number) if number.is_i64() || number.is_u64() => true,
        Value::Number(number) => number.as_f64().is_some_and(|float| float.fract() == 0.0),
        _ => false,
    }
}

/// JSON type name as a schema author would write it.
pub fn json_type_name(value: &Value) -> &'static str {
    match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) if is_integer(value) => "integer",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "array",
        Value::Object(_) => "object",
    }
}

fn join_field(path: &str, name: &str) -> String {
    if path.is_empty() {
        name.to_string()
    } else {
        format!("{path}.{name}")
    }
}

fn join_index(path: &str, index: usize) -> String {
    format!("{path}[{index}]")
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    fn weather_schema() -> ParameterSchema {
        ParameterSchema::new(json!({
            "type": "object",
            "properties": {
                "city": {"type": "string", "minLength": 2},
                "days": {"type": "integer", "minimum": 1, "maximum": 14},
                "units": {"type": "string", "enum": ["metric", "imperial"]}
            },
            "required": ["city"]
        }))
    }

    #[test]
    fn valid_object_passes() {
        let schema = weather_schema();
        assert!(schema
            .validate(&json!({"city": "Paris", "days": 3, "units": "metric"}))
            .is_ok());
    }

    #[test]
    fn missing_required_property_names_the_field() {
        let violations = weather_schema()
            .validate(&json!({}))
            .expect_err("city is required");

        assert_eq!(violations, vec![SchemaViolation::new("city", "is required")]);
    }

    #[test]
    fn collects_every_violation_ordered_by_path() {
        let violations = weather_schema()
            .validate(&json!({"units": "kelvin", "days": "three", "city": "P"}))
            .expect_err("three violations");

        let paths: Vec<&str> = violations.iter().map(|v| v.path.as_str()).collect();
        assert_eq!(paths, vec!["city", "days", "units"]);
        assert_eq!(violations[1].message, "expected integer, got string");
        assert_eq!(
            violations[2].to_string(),
            "units: must be one of [\"metric\",\"imperial\"]"
        );
    }

    #[test]
    fn fractional_number_is_not_an_integer() {
        let violations = validate_value(&json!({"type": "integer"}), &json!(4.5));
        assert_eq!(violations, vec![SchemaViolation::new("", "expected integer, got number")]);
    }

    #[test]
    fn nested_paths_include_objects_and_indexes() {
        let schema = json!({
            "type": "object",
            "properties": {
                "address": {
                    "type": "object",
                    "properties": {"zip": {"type": "string", "pattern": "^[0-9]{5}$"}},
                    "required": ["zip"]
                },
                "tags": {"type": "array", "items": {"type": "string"}, "maxItems": 3}
            }
        });

        let violations = validate_value(
            &schema,
            &json!({"address": {"zip": "75O01"}, "tags": ["a", 2]}),
        );

        assert_eq!(violations.len(), 2);
        assert_eq!(violations[0].path, "address.zip");
        assert!(violations[0].message.contains("^[0-9]{5}$"));
        assert_eq!(
            violations[1],
            SchemaViolation::new("tags[1]", "expected string, got integer")
        );
    }

    #[test]
    fn numeric_object_keys_stay_dotted() {
        let schema = json!({
            "type": "object",
            "properties": {"slots": {"type": "object", "additionalProperties": {"type": "string"}}}
        });

        let violations = validate_value(&schema, &json!({"slots": {"9": true}}));
        assert_eq!(
            violations,
            vec![SchemaViolation::new("slots.9", "expected string, got boolean")]
        );
    }

    #[test]
    fn additional_properties_false_rejects_unknown_fields() {
        let schema = json!({
            "type": "object",
            "properties": {"q": {"type": "string"}},
            "additionalProperties": false
        });

        let violations = validate_value(&schema, &json!({"q": "rust", "limit": 5}));
        assert_eq!(
            violations,
            vec![SchemaViolation::new("limit", "is not an allowed property")]
        );
    }

    #[test]
    fn root_type_mismatch_uses_arguments_label() {
        let violations = weather_schema()
            .validate(&json!(["Paris"]))
            .expect_err("array is not an object");

        assert_eq!(violations[0].to_string(), "arguments: expected object, got array");
    }

    #[test]
    fn type_lists_and_nullable_fields() {
        let schema = json!({"type": ["string", "null"]});
        assert!(validate_value(&schema, &json!(null)).is_empty());

        let violations = validate_value(&schema, &json!(1));
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.ends_with(", got integer"));
        assert!(violations[0].message.contains("string"));
        assert!(violations[0].message.contains(" or "));
    }

    #[test]
    fn exclusive_minimum_is_enforced() {
        let schema = json!({"type": "number", "exclusiveMinimum": 0});

        assert_eq!(validate_value(&schema, &json!(0)).len(), 1);
        assert!(validate_value(&schema, &json!(0.5)).is_empty());
    }

    #[test]
    fn any_of_and_one_of_branches() {
        let any_of = json!({"anyOf": [{"type": "string"}, {"type": "integer"}]});
        assert!(validate_value(&any_of, &json!(3)).is_empty());
        assert!(!validate_value(&any_of, &json!(true)).is_empty());

        let one_of = json!({"oneOf": [{"type": "number"}, {"type": "integer"}]});
        assert!(!validate_value(&one_of, &json!(3)).is_empty());
    }

    #[test]
    fn local_refs_are_resolved_through_defs() {
        let schema = ParameterSchema::new(json!({
            "type": "object",
            "properties": {"city": {"$ref": "#/$defs/name"}},
            "required": ["city"],
            "$defs": {"name": {"type": "string", "minLength": 2}}
        }));

        assert!(schema.validate(&json!({"city": "Oslo"})).is_ok());

        let wrong_type = schema.validate(&json!({"city": 42})).expect_err("42 is not a name");
        assert_eq!(
            wrong_type,
            vec![SchemaViolation::new("city", "expected string, got integer")]
        );

        let too_short = schema.validate(&json!({"city": "O"})).expect_err("too short");
        assert_eq!(too_short.len(), 1);
        assert_eq!(too_short[0].path, "city");
    }

    #[test]
    fn schema_that_does_not_compile_is_a_config_error() {
        let schema = ParameterSchema::new(json!({"type": "string", "pattern": "("}));

        let error = schema.compile().expect_err("pattern is not a regex");
        assert_eq!(error.kind, crate::ToolErrorKind::InvalidConfig);
        assert!(error.message.starts_with("Parameter schema is not valid JSON Schema: "));

        let violations = schema.validate(&json!({})).expect_err("cannot be checked");
        assert_eq!(violations.len(), 1);
        assert!(violations[0].message.starts_with("cannot be checked: "));
    }

    #[test]
    fn clones_share_the_compiled_validator() {
        let schema = weather_schema();
        let clone = schema.clone();

        let first = schema.compile().expect("compiles") as *const JSONSchema;
        let second = clone.compile().expect("compiles") as *const JSONSchema;

        assert_eq!(first, second);
        assert_eq!(schema, clone);
    }

    #[test]
    fn serializes_as_the_bare_document() {
        let schema = weather_schema();
        let text = serde_json::to_string(&schema).expect("serialize");
        let parsed: ParameterSchema = serde_json::from_str(&text).expect("deserialize");

        assert_eq!(serde_json::from_str::<Value>(&text).expect("json"), *schema.as_value());
        assert_eq!(parsed, schema);
    }

    #[test]
    fn single_parameter_prefers_sole_property_then_sole_required() {
        assert_eq!(
            ParameterSchema::new(json!({"properties": {"q": {"type": "string"}}}))
                .single_parameter(),
            Some("q")
        );
        assert_eq!(weather_schema().single_parameter(), Some("city"));
        assert_eq!(
            ParameterSchema::new(json!({
                "properties": {"a": {}, "b": {}},
                "required": ["a", "b"]
            }))
            .single_parameter(),
            None
        );
        assert_eq!(ParameterSchema::new(json!({"type": "object"})).single_parameter(), None);
    }

    #[test]
    fn property_type_reads_first_declared_type() {
        let schema = ParameterSchema::new(json!({
            "properties": {"zip": {"type": ["string", "null"]}, "n": {"type": "integer"}}
        }));
        assert_eq!(schema.property_type("zip"), Some("string"));
        assert_eq!(schema.property_type("n"), Some("integer"));
        assert_eq!(schema.property_type("missing"), None);
    }

    #[test]
    fn malformed_schema_json_is_a_config_error() {
        let error = ParameterSchema::from_json_str("{").expect_err("should fail");
        assert_eq!(error.kind, crate::ToolErrorKind::InvalidConfig);
    }
}
