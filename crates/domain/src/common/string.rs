//! Helpers for optional text fragments.
//!
//! Service payloads routinely send `""` for fields they mean to omit, so
//! empty strings are treated as absent before they reach an output record.

/// `None` for absent or empty text.
pub trait StringExt {
    fn into_option(self) -> Option<String>;
}

impl StringExt for String {
    fn into_option(self) -> Option<String> {
        (!self.is_empty()).then_some(self)
    }
}

impl StringExt for Option<String> {
    fn into_option(self) -> Option<String> {
        self.and_then(StringExt::into_option)
    }
}

/// Appends `value` to `target` unless it is absent or empty.
///
/// ```
/// use actions_test_domain::common::push_if_not_empty;
///
/// let mut speech = Vec::new();
/// push_if_not_empty(&mut speech, Some("Hi!".to_string()));
/// push_if_not_empty(&mut speech, Some(String::new()));
/// push_if_not_empty(&mut speech, None);
/// assert_eq!(speech, vec!["Hi!".to_string()]);
/// ```
pub fn push_if_not_empty(target: &mut Vec<String>, value: Option<String>) {
    if let Some(value) = value.into_option() {
        target.push(value);
    }
}
