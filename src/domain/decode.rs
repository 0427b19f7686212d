use serde_json::{Map, Value};

/// Tolerant accessors over a decoded JSON object.
///
/// A key that is missing, `null`, or holds a value of another type reads as
/// `None`. Nothing here fails.
pub trait FieldAccess {
    fn get_if_set(&self, key: &str) -> Option<&Value>;

    fn str_if_set(&self, key: &str) -> Option<&str> {
        self.get_if_set(key).and_then(Value::as_str)
    }

    fn i64_if_set(&self, key: &str) -> Option<i64> {
        self.get_if_set(key).and_then(Value::as_i64)
    }

    fn u32_if_set(&self, key: &str) -> Option<u32> {
        self.get_if_set(key)
            .and_then(Value::as_u64)
            .and_then(|n| u32::try_from(n).ok())
    }

    fn object_if_set(&self, key: &str) -> Option<&Map<String, Value>> {
        self.get_if_set(key).and_then(Value::as_object)
    }
}

impl FieldAccess for Map<String, Value> {
    fn get_if_set(&self, key: &str) -> Option<&Value> {
        self.get(key).filter(|value| !value.is_null())
    }
}
