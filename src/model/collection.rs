//! Identifier-keyed, insertion-ordered collections of records.

use serde_json::Value;

use super::record::{value_type_name, Record};
use crate::error::FdlError;

/// An ordered collection accepting one record type, keyed by each item's
/// identifier.
///
/// Identifiers must be present and unique: [`TypedCollection::add`] never
/// overwrites an existing item.
#[derive(Clone, Debug, PartialEq)]
pub struct TypedCollection<T> {
    items: Vec<T>,
}

impl<T> Default for TypedCollection<T> {
    fn default() -> Self {
        Self { items: Vec::new() }
    }
}

impl<T: Record> TypedCollection<T> {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds an item.
    ///
    /// # Errors
    /// Fails if the item's identifier is missing or empty, or if an item with
    /// the same identifier already exists.
    pub fn add(&mut self, item: T) -> Result<(), FdlError> {
        let schema = T::schema();
        let id = match item.identifier() {
            Some(id) if !id.is_empty() => id,
            _ => {
                return Err(FdlError::MissingIdentifier {
                    record: schema.name,
                    attribute: schema.id_attribute,
                })
            }
        };

        if self.contains(id) {
            return Err(FdlError::DuplicateIdentifier {
                record: schema.name,
                attribute: schema.id_attribute,
                id: id.to_string(),
            });
        }

        self.items.push(item);
        Ok(())
    }

    pub fn get(&self, id: &str) -> Option<&T> {
        self.items.iter().find(|item| item.identifier() == Some(id))
    }

    /// Mutable access by identifier.
    ///
    /// Changing the identifier through this reference bypasses the
    /// uniqueness check; document validation reports duplicates.
    pub fn get_mut(&mut self, id: &str) -> Option<&mut T> {
        self.items
            .iter_mut()
            .find(|item| item.identifier() == Some(id))
    }

    /// Item at insertion position `index`.
    pub fn get_index(&self, index: usize) -> Option<&T> {
        self.items.get(index)
    }

    /// Removes and returns the item with the given identifier.
    pub fn remove(&mut self, id: &str) -> Option<T> {
        let position = self
            .items
            .iter()
            .position(|item| item.identifier() == Some(id))?;
        Some(self.items.remove(position))
    }

    pub fn contains(&self, id: &str) -> bool {
        self.get(id).is_some()
    }

    /// Membership test using the item's identifier.
    pub fn contains_item(&self, item: &T) -> bool {
        item.identifier().is_some_and(|id| self.contains(id))
    }

    /// Identifiers in insertion order.
    pub fn ids(&self) -> Vec<&str> {
        self.items.iter().filter_map(|item| item.identifier()).collect()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, T> {
        self.items.iter()
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    /// Mapping form of every item, in insertion order.
    pub fn to_list(&self) -> Result<Value, FdlError> {
        self.items
            .iter()
            .map(|item| item.to_mapping().map(Value::Object))
            .collect::<Result<Vec<_>, _>>()
            .map(Value::Array)
    }

    /// Rebuilds a collection from an array of mappings, inserting through
    /// [`TypedCollection::add`].
    pub fn from_value(record: &'static str, field: &str, value: Value) -> Result<Self, FdlError> {
        let raw_items = match value {
            Value::Array(items) => items,
            other => {
                return Err(FdlError::Shape {
                    record,
                    field: field.to_string(),
                    message: format!("expected an array, found {}", value_type_name(&other)),
                })
            }
        };

        let mut collection = Self::new();
        for raw in &raw_items {
            collection.add(T::from_value(raw)?)?;
        }
        Ok(collection)
    }
}

impl<'a, T> IntoIterator for &'a TypedCollection<T> {
    type Item = &'a T;
    type IntoIter = std::slice::Iter<'a, T>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::{Context, Dimensions, FramingIntent};

    fn intent(id: &str, label: &str) -> FramingIntent {
        FramingIntent {
            id: Some(id.to_string()),
            label: Some(label.to_string()),
            aspect_ratio: Some(Dimensions::integral(16.0, 9.0)),
            protection: Some(0.088),
        }
    }

    #[test]
    fn test_add_get_remove() {
        let mut collection = TypedCollection::new();
        let fi = intent("FDLSMP03", "1.78-1 Framing");
        collection.add(fi.clone()).unwrap();

        assert_eq!(collection.ids(), vec!["FDLSMP03"]);
        assert!(collection.contains("FDLSMP03"));
        assert!(collection.contains_item(&fi));
        assert_eq!(collection.get("FDLSMP03"), Some(&fi));
        assert_eq!(collection.iter().collect::<Vec<_>>(), vec![&fi]);
        assert_eq!(
            collection.to_list().unwrap(),
            Value::Array(vec![Value::Object(fi.to_mapping().unwrap())])
        );

        assert_eq!(collection.remove("FDLSMP03"), Some(fi));
        assert!(collection.is_empty());
        assert_eq!(collection.remove("FDLSMP03"), None);
    }

    #[test]
    fn test_missing_identifier_rejected() {
        let mut collection = TypedCollection::new();
        let err = collection.add(FramingIntent::default()).unwrap_err();
        assert!(err
            .to_string()
            .contains("Item must have a valid identifier (\"id\")"));

        let err = collection.add(intent("", "empty")).unwrap_err();
        assert!(matches!(err, FdlError::MissingIdentifier { .. }));
        assert!(collection.is_empty());
    }

    #[test]
    fn test_duplicate_identifier_rejected() {
        let mut collection = TypedCollection::new();
        collection.add(intent("FDLSMP03", "first")).unwrap();

        let err = collection.add(intent("FDLSMP03", "second")).unwrap_err();
        assert_eq!(
            err.to_string(),
            "FramingIntent.id (\"FDLSMP03\") already exists."
        );
        assert_eq!(collection.len(), 1);
        assert_eq!(
            collection.get("FDLSMP03").and_then(|fi| fi.label.as_deref()),
            Some("first")
        );
    }

    #[test]
    fn test_context_uses_label_as_identifier() {
        let mut collection = TypedCollection::new();
        let ctx = Context {
            label: Some("context1".into()),
            ..Default::default()
        };
        collection.add(ctx.clone()).unwrap();

        let err = collection.add(ctx).unwrap_err();
        assert!(err
            .to_string()
            .contains("Context.label (\"context1\") already exists."));
    }

    #[test]
    fn test_insertion_order_preserved() {
        let mut collection = TypedCollection::new();
        for id in ["c", "a", "b"] {
            collection.add(intent(id, id)).unwrap();
        }
        assert_eq!(collection.ids(), vec!["c", "a", "b"]);
        assert_eq!(
            collection.get_index(1).and_then(|fi| fi.id.as_deref()),
            Some("a")
        );
    }

    #[test]
    fn test_from_value_rejects_duplicates() {
        let raw = serde_json::json!([
            {"id": "A", "aspect_ratio": {"width": 16, "height": 9}},
            {"id": "A", "aspect_ratio": {"width": 4, "height": 3}}
        ]);
        let err = TypedCollection::<FramingIntent>::from_value("Fdl", "framing_intents", raw)
            .unwrap_err();
        assert!(matches!(err, FdlError::DuplicateIdentifier { .. }));
    }
}
