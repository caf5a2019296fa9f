//! TOML record flattening.
//!
//! A record table becomes the [`RawField`] stream the catalog builders read,
//! keeping the authored key order:
//!
//! | TOML value                 | fields                           |
//! |----------------------------|----------------------------------|
//! | scalar                     | one field with one value         |
//! | array of scalars           | one field, one value per element |
//! | array of arrays            | one field per inner array        |
//!
//! Repeated keys such as `post_effect` and `loot` are written as arrays of
//! arrays.

use ability_core::RawField;

pub(crate) fn record_fields(record: &toml::Table) -> Vec<RawField> {
    let mut fields = Vec::with_capacity(record.len());
    for (key, value) in record {
        match value {
            toml::Value::Array(items) if items.iter().all(toml::Value::is_array) => {
                for item in items {
                    if let Some(values) = item.as_array() {
                        fields.push(RawField::new(key.as_str(), scalars(key, values)));
                    }
                }
            }
            toml::Value::Array(items) => {
                fields.push(RawField::new(key.as_str(), scalars(key, items)));
            }
            value => {
                if let Some(value) = scalar(key, value) {
                    fields.push(RawField::scalar(key.as_str(), value));
                }
            }
        }
    }
    fields
}

fn scalars(key: &str, values: &[toml::Value]) -> Vec<String> {
    values.iter().filter_map(|value| scalar(key, value)).collect()
}

fn scalar(key: &str, value: &toml::Value) -> Option<String> {
    match value {
        toml::Value::String(text) => Some(text.clone()),
        toml::Value::Integer(number) => Some(number.to_string()),
        toml::Value::Float(number) => Some(number.to_string()),
        toml::Value::Boolean(flag) => Some(flag.to_string()),
        other => {
            tracing::warn!(key, kind = other.type_str(), "unsupported value ignored");
            None
        }
    }
}
