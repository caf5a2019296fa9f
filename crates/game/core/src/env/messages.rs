/// Localized message catalog.
///
/// Keys are the English source strings; implementations return the
/// translation for the active locale.
pub trait MessageOracle {
    fn get(&self, key: &str) -> String;

    /// Translates `key` and substitutes the first `%d` with `value`.
    fn format_number(&self, key: &str, value: i32) -> String {
        self.get(key).replacen("%d", &value.to_string(), 1)
    }
}

/// Returns every key untranslated.
#[derive(Clone, Copy, Debug, Default)]
pub struct PassthroughMessages;

impl MessageOracle for PassthroughMessages {
    fn get(&self, key: &str) -> String {
        key.to_string()
    }
}
