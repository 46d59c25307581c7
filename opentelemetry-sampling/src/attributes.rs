use opentelemetry::{Key, KeyValue, Value};
use std::sync::Arc;

/// Read-only attributes attached to a sampling decision.
///
/// The attributes are copied in once, when the [`SamplingResult`] is built,
/// and can only be read afterwards. Iteration follows insertion order, while
/// equality ignores it. When the same key is given more than once the last
/// value wins and the key keeps its first position.
///
/// [`SamplingResult`]: crate::SamplingResult
#[derive(Clone, Debug, Default)]
pub struct SamplingAttributes {
    inner: Arc<[KeyValue]>,
}

impl SamplingAttributes {
    /// Attributes with no entries.
    pub fn empty() -> Self {
        Self::default()
    }

    /// The value stored under `key`, if any.
    pub fn get(&self, key: &Key) -> Option<&Value> {
        self.inner
            .iter()
            .find(|kv| &kv.key == key)
            .map(|kv| &kv.value)
    }

    /// Iterate over the attributes in insertion order.
    pub fn iter(&self) -> std::slice::Iter<'_, KeyValue> {
        self.inner.iter()
    }

    /// The attributes as a slice, in insertion order.
    pub fn as_slice(&self) -> &[KeyValue] {
        &self.inner
    }

    /// Number of distinct keys.
    pub fn len(&self) -> usize {
        self.inner.len()
    }

    /// Returns `true` if there are no attributes.
    pub fn is_empty(&self) -> bool {
        self.inner.is_empty()
    }
}

impl FromIterator<KeyValue> for SamplingAttributes {
    fn from_iter<T: IntoIterator<Item = KeyValue>>(iter: T) -> Self {
        let mut attributes: Vec<KeyValue> = Vec::new();
        for kv in iter {
            match attributes.iter_mut().find(|existing| existing.key == kv.key) {
                Some(existing) => existing.value = kv.value,
                None => attributes.push(kv),
            }
        }
        SamplingAttributes {
            inner: attributes.into(),
        }
    }
}

impl PartialEq for SamplingAttributes {
    fn eq(&self, other: &Self) -> bool {
        self.len() == other.len()
            && self
                .iter()
                .all(|kv| other.get(&kv.key) == Some(&kv.value))
    }
}

impl<'a> IntoIterator for &'a SamplingAttributes {
    type Item = &'a KeyValue;
    type IntoIter = std::slice::Iter<'a, KeyValue>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use opentelemetry::{Array, StringValue};

    #[test]
    fn empty_by_default() {
        let attributes = SamplingAttributes::default();
        assert!(attributes.is_empty());
        assert_eq!(attributes, SamplingAttributes::empty());
    }

    #[test]
    fn keeps_insertion_order() {
        let attributes: SamplingAttributes = [
            KeyValue::new("foo", "bar"),
            KeyValue::new("bar", "baz"),
            KeyValue::new("count", 3_i64),
        ]
        .into_iter()
        .collect();

        let keys: Vec<&str> = attributes.iter().map(|kv| kv.key.as_str()).collect();
        assert_eq!(keys, vec!["foo", "bar", "count"]);
        assert_eq!(attributes.get(&Key::new("count")), Some(&Value::I64(3)));
    }

    #[test]
    fn last_duplicate_wins_in_first_position() {
        let attributes: SamplingAttributes = [
            KeyValue::new("a", "first"),
            KeyValue::new("b", "b-value"),
            KeyValue::new("a", "final"),
        ]
        .into_iter()
        .collect();

        assert_eq!(attributes.len(), 2);
        assert_eq!(attributes.as_slice()[0], KeyValue::new("a", "final"));
    }

    #[test]
    fn equality_ignores_order() {
        let a: SamplingAttributes = [KeyValue::new("foo", "bar"), KeyValue::new("bar", "baz")]
            .into_iter()
            .collect();
        let b: SamplingAttributes = [KeyValue::new("bar", "baz"), KeyValue::new("foo", "bar")]
            .into_iter()
            .collect();
        let c: SamplingAttributes = [KeyValue::new("bar", "baz")].into_iter().collect();

        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn holds_array_values() {
        let tags = Value::Array(Array::String(vec![
            StringValue::from("a"),
            StringValue::from("b"),
        ]));
        let attributes: SamplingAttributes = [KeyValue::new("tags", tags.clone())]
            .into_iter()
            .collect();
        assert_eq!(attributes.get(&Key::new("tags")), Some(&tags));
    }
}
