/// Builds an [`ApiToolSpec`](crate::ApiToolSpec) from a method shorthand and URL.
///
/// Optional sections must appear in the order `description`, `params`, `headers`.
///
/// ```rust
/// use patchbay::pb_tool;
/// use serde_json::json;
///
/// let spec = pb_tool!(
///     "get_weather",
///     GET "https://api.example.com/weather",
///     description: "Fetches weather information for a given location.",
///     params: json!({"type": "object", "properties": {"location": {"type": "string"}}}),
///     headers: {"X-Api-Key" => "secret"},
/// );
///
/// let config = spec.api_config.expect("macro always sets a config");
/// assert_eq!(config.method, "GET");
/// assert_eq!(config.headers.get("X-Api-Key").map(String::as_str), Some("secret"));
/// ```
#[macro_export]
macro_rules! pb_tool {
    (
        $name:expr,
        $method:ident $url:expr
        $(, description: $description:expr)?
        $(, params: $params:expr)?
        $(, headers: { $($header:expr => $value:expr),* $(,)? })?
        $(,)?
    ) => {{
        #[allow(unused_mut)]
        let mut config = $crate::ApiConfig::get($url).with_method(stringify!($method));
        $($(config = config.with_header($header, $value);)*)?
        #[allow(unused_mut)]
        let mut spec = $crate::ApiToolSpec::new($name, config);
        $(spec = spec.with_description($description);)?
        $(spec = spec.with_parameters($crate::ParameterSchema::new($params));)?
        spec
    }};
}

/// Creates a `Vec<ApiToolSpec>` from `pb_tool!` argument groups.
///
/// ```rust
/// use patchbay::pb_tools;
///
/// let specs = pb_tools![
///     ("now", GET "http://localhost:8080/time"),
///     ("add_note", POST "http://localhost:8080/notes"),
/// ];
///
/// assert_eq!(specs.len(), 2);
/// assert_eq!(specs[1].name, "add_note");
/// ```
#[macro_export]
macro_rules! pb_tools {
    () => {
        Vec::<$crate::ApiToolSpec>::new()
    };
    ($(($($tool:tt)+)),+ $(,)?) => {
        vec![$($crate::pb_tool!($($tool)+)),+]
    };
}
