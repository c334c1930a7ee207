//! Agent-supplied tool input and its normalized working form.
//!
//! Raw input arrives either as an argument map or as a bare scalar (often JSON text
//! the model forgot to decode). [`WorkingInput::normalize`] decodes text where it can,
//! and [`prepare_arguments`] fits the result to the tool's parameter schema.
//!
//! ```rust
//! use ptooling::{ToolInput, WorkingInput};
//! use serde_json::json;
//!
//! let working = WorkingInput::normalize(&ToolInput::from(r#"{"city":"Paris"}"#));
//! assert_eq!(working.to_value(), json!({"city": "Paris"}));
//!
//! let plain = WorkingInput::normalize(&ToolInput::from("not valid json"));
//! assert_eq!(plain.to_value(), json!("not valid json"));
//! ```

use std::fmt::{Display, Formatter};

use serde::{Deserialize, Deserializer};
use serde_json::{Map, Number, Value};

use crate::{ParameterSchema, SchemaViolation, ToolError, schema::json_type_name};

#[derive(Debug, Clone, PartialEq)]
pub enum Scalar {
    Text(String),
    Number(Number),
    Bool(bool),
    Null,
}

impl Scalar {
    pub fn to_value(&self) -> Value {
        match self {
            Self::Text(text) => Value::String(text.clone()),
            Self::Number(number) => Value::Number(number.clone()),
            Self::Bool(flag) => Value::Bool(*flag),
            Self::Null => Value::Null,
        }
    }

    pub fn is_null(&self) -> bool {
        matches!(self, Self::Null)
    }
}

impl Display for Scalar {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Text(text) => f.write_str(text),
            Self::Number(number) => write!(f, "{number}"),
            Self::Bool(flag) => write!(f, "{flag}"),
            Self::Null => f.write_str("null"),
        }
    }
}

/// Raw, untrusted input exactly as the agent supplied it.
#[derive(Debug, Clone, PartialEq)]
pub enum ToolInput {
    Object(Map<String, Value>),
    Scalar(Scalar),
}

impl ToolInput {
    pub fn none() -> Self {
        Self::Scalar(Scalar::Null)
    }

    pub fn text(text: impl Into<String>) -> Self {
        Self::Scalar(Scalar::Text(text.into()))
    }
}

impl Default for ToolInput {
    fn default() -> Self {
        Self::none()
    }
}

impl From<Value> for ToolInput {
    fn from(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::Object(fields),
            // Arrays travel as their JSON text and are decoded again during normalization.
            Value::Array(_) => Self::Scalar(Scalar::Text(value.to_string())),
            Value::String(text) => Self::Scalar(Scalar::Text(text)),
            Value::Number(number) => Self::Scalar(Scalar::Number(number)),
            Value::Bool(flag) => Self::Scalar(Scalar::Bool(flag)),
            Value::Null => Self::none(),
        }
    }
}

impl From<Map<String, Value>> for ToolInput {
    fn from(fields: Map<String, Value>) -> Self {
        Self::Object(fields)
    }
}

impl From<&str> for ToolInput {
    fn from(text: &str) -> Self {
        Self::text(text)
    }
}

impl From<String> for ToolInput {
    fn from(text: String) -> Self {
        Self::text(text)
    }
}

impl<'de> Deserialize<'de> for ToolInput {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Value::deserialize(deserializer).map(Self::from)
    }
}

/// Input after JSON decoding, the shape validation and request building work on.
#[derive(Debug, Clone, PartialEq)]
pub enum WorkingInput {
    Object(Map<String, Value>),
    Array(Vec<Value>),
    Scalar(Scalar),
}

impl WorkingInput {
    /// Decodes textual input as JSON, keeping the text verbatim when it is not JSON.
    pub fn normalize(input: &ToolInput) -> Self {
        match input {
            ToolInput::Object(fields) => Self::Object(fields.clone()),
            ToolInput::Scalar(Scalar::Text(text)) => match serde_json::from_str::<Value>(text) {
                Ok(decoded) => Self::from_value(decoded),
                Err(_) => Self::Scalar(Scalar::Text(text.clone())),
            },
            ToolInput::Scalar(scalar) => Self::Scalar(scalar.clone()),
        }
    }

    pub fn from_value(value: Value) -> Self {
        match value {
            Value::Object(fields) => Self::Object(fields),
            Value::Array(items) => Self::Array(items),
            Value::String(text) => Self::Scalar(Scalar::Text(text)),
            Value::Number(number) => Self::Scalar(Scalar::Number(number)),
            Value::Bool(flag) => Self::Scalar(Scalar::Bool(flag)),
            Value::Null => Self::Scalar(Scalar::Null),
        }
    }

    pub fn to_value(&self) -> Value {
        match self {
            Self::Object(fields) => Value::Object(fields.clone()),
            Self::Array(items) => Value::Array(items.clone()),
            Self::Scalar(scalar) => scalar.to_value(),
        }
    }
}

/// A reshaping applied to the agent's input on its way to the request.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputAdjustment {
    /// No input was given; the arguments are an empty object.
    NullAsEmptyObject,
    /// A bare scalar was bound to the schema's single parameter.
    WrappedSingleParameter { parameter: String, coerced_to_string: bool },
    /// A text scalar held JSON and was sent decoded as the body.
    DecodedEmbeddedJson,
    /// A scalar body was wrapped as `{"value": ...}`.
    WrappedAsValue,
    /// A GET tool received input it could not turn into query parameters.
    IgnoredForQuery { input_kind: &'static str },
}

impl Display for InputAdjustment {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::NullAsEmptyObject => f.write_str("null_as_empty_object"),
            Self::WrappedSingleParameter { .. } => f.write_str("wrapped_single_parameter"),
            Self::DecodedEmbeddedJson => f.write_str("decoded_embedded_json"),
            Self::WrappedAsValue => f.write_str("wrapped_as_value"),
            Self::IgnoredForQuery { .. } => f.write_str("ignored_for_query"),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct PreparedArguments {
    pub input: WorkingInput,
    pub adjustment: Option<InputAdjustment>,
}

impl PreparedArguments {
    fn unchanged(input: WorkingInput) -> Self {
        Self {
            input,
            adjustment: None,
        }
    }
}

/// Fits working input to `schema` and validates it.
///
/// Without a schema the input passes through untouched. With one, missing input becomes
/// `{}`, and a bare scalar is bound to the schema's single parameter; a scalar with no
/// parameter to bind to is rejected rather than passed through.
pub fn prepare_arguments(
    tool_name: &str,
    schema: Option<&ParameterSchema>,
    input: WorkingInput,
) -> Result<PreparedArguments, ToolError> {
    let Some(schema) = schema else {
        return Ok(PreparedArguments::unchanged(input));
    };
    schema.compile().map_err(|error| error.with_tool_name(tool_name))?;

    let prepared = match input {
        WorkingInput::Scalar(Scalar::Null) => PreparedArguments {
            input: WorkingInput::Object(Map::new()),
            adjustment: Some(InputAdjustment::NullAsEmptyObject),
        },
        WorkingInput::Scalar(scalar) => bind_scalar(tool_name, schema, scalar)?,
        other => PreparedArguments::unchanged(other),
    };

    schema
        .validate(&prepared.input.to_value())
        .map_err(|violations| ToolError::schema_violations(tool_name, violations))?;

    Ok(prepared)
}

fn bind_scalar(
    tool_name: &str,
    schema: &ParameterSchema,
    scalar: Scalar,
) -> Result<PreparedArguments, ToolError> {
    let Some(parameter) = schema.single_parameter() else {
        let got = json_type_name(&scalar.to_value());
        let mut error = ToolError::invalid_arguments(format!(
            "Tool '{tool_name}' expects a JSON object with properties [{}], but received a plain value: {scalar}",
            schema.property_names().join(", ")
        ));
        error.violations = vec![SchemaViolation::new("", format!("expected object, got {got}"))];
        return Err(error);
    };

    // JSON decoding turns "75001" into a number; undo that for string parameters.
    let coerced_to_string = schema.property_type(parameter) == Some("string")
        && matches!(scalar, Scalar::Number(_) | Scalar::Bool(_));
    let value = if coerced_to_string {
        Value::String(scalar.to_string())
    } else {
        scalar.to_value()
    };

    let mut fields = Map::new();
    fields.insert(parameter.to_string(), value);

    Ok(PreparedArguments {
        input: WorkingInput::Object(fields),
        adjustment: Some(InputAdjustment::WrappedSingleParameter {
            parameter: parameter.to_string(),
            coerced_to_string,
        }),
    })
}
