use serde_json::{Map, Value};

/// Caller-defined facts carried in the payload segment.
///
/// Values are open JSON: strings, numbers, booleans, null, arrays and nested
/// objects all survive the round trip. Numbers come back as whatever
/// `serde_json` parsed them into, so `1` and `1.0` are not interchangeable.
pub type Claims = Map<String, Value>;
