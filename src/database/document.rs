use serde_json::{Map, Value};

use super::{Document, StoreError};

/// Look up a dotted path ("goals.targetWeight") inside a document
pub fn get_path<'a>(document: &'a Document, path: &str) -> Option<&'a Value> {
    let mut parts = path.split('.');
    let mut current = document.get(parts.next()?)?;
    for part in parts {
        current = current.as_object()?.get(part)?;
    }
    Some(current)
}

/// Set a dotted path, creating intermediate objects as needed
pub fn set_path(document: &mut Document, path: &str, value: Value) -> Result<(), StoreError> {
    let (parents, leaf) = match path.rsplit_once('.') {
        Some((parents, leaf)) => (Some(parents), leaf),
        None => (None, path),
    };

    let mut target = document;
    if let Some(parents) = parents {
        for part in parents.split('.') {
            let entry = target
                .entry(part.to_string())
                .or_insert_with(|| Value::Object(Map::new()));
            target = entry
                .as_object_mut()
                .ok_or_else(|| StoreError::InvalidUpdate(format!("'{}' is not an object in path '{}'", part, path)))?;
        }
    }

    target.insert(leaf.to_string(), value);
    Ok(())
}

/// Equality match of every filter field against the document
pub fn matches(document: &Document, filter: &Document) -> bool {
    filter
        .iter()
        .all(|(path, expected)| get_path(document, path) == Some(expected))
}

/// Apply `$set` / `$push` operators in place
pub fn apply_update(document: &mut Document, update: &Document) -> Result<(), StoreError> {
    if update.is_empty() {
        return Err(StoreError::InvalidUpdate("update document is empty".to_string()));
    }

    for (operator, fields) in update {
        let fields = fields
            .as_object()
            .ok_or_else(|| StoreError::InvalidUpdate(format!("{} requires an object", operator)))?;

        match operator.as_str() {
            "$set" => {
                for (path, value) in fields {
                    set_path(document, path, value.clone())?;
                }
            }
            "$push" => {
                for (path, value) in fields {
                    match get_path(document, path) {
                        Some(Value::Array(existing)) => {
                            let mut items = existing.clone();
                            items.push(value.clone());
                            set_path(document, path, Value::Array(items))?;
                        }
                        Some(Value::Null) | None => {
                            set_path(document, path, Value::Array(vec![value.clone()]))?;
                        }
                        Some(_) => {
                            return Err(StoreError::InvalidUpdate(format!("$push target '{}' is not an array", path)));
                        }
                    }
                }
            }
            other => {
                return Err(StoreError::InvalidUpdate(format!("unsupported update operator: {}", other)));
            }
        }
    }

    Ok(())
}

/// Document an upsert starts from: the filter's equality fields
pub fn upsert_seed(filter: &Document) -> Result<Document, StoreError> {
    let mut seed = Map::new();
    for (path, value) in filter.iter().filter(|(path, _)| !path.starts_with('$')) {
        set_path(&mut seed, path, value.clone())?;
    }
    Ok(seed)
}

/// Render an `_id` value as the string handed back to callers
pub fn id_to_string(id: &Value) -> String {
    match id {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::document;
    use serde_json::json;

    #[test]
    fn test_matches_top_level_and_dotted() {
        let doc = document!({"email": "a@b.c", "goals": {"targetWeight": 70}});
        assert!(matches(&doc, &document!({"email": "a@b.c"})));
        assert!(matches(&doc, &document!({"goals.targetWeight": 70})));
        assert!(!matches(&doc, &document!({"email": "other"})));
        assert!(matches(&doc, &Map::new()));
    }

    #[test]
    fn test_set_creates_nested_objects() {
        let mut doc = document!({"email": "a@b.c"});
        apply_update(&mut doc, &document!({"$set": {"goals.targetCalories": 2000}})).unwrap();
        assert_eq!(doc["goals"], json!({"targetCalories": 2000}));
    }

    #[test]
    fn test_push_appends_and_creates() {
        let mut doc = document!({"email": "a@b.c"});
        apply_update(&mut doc, &document!({"$push": {"foodConsumed": {"item": "Apple"}}})).unwrap();
        apply_update(&mut doc, &document!({"$push": {"foodConsumed": {"item": "Pear"}}})).unwrap();
        assert_eq!(doc["foodConsumed"], json!([{"item": "Apple"}, {"item": "Pear"}]));
    }

    #[test]
    fn test_push_onto_scalar_fails() {
        let mut doc = document!({"foodConsumed": 3});
        let err = apply_update(&mut doc, &document!({"$push": {"foodConsumed": 1}}));
        assert!(matches!(err, Err(StoreError::InvalidUpdate(_))));
    }

    #[test]
    fn test_unknown_operator_rejected() {
        let mut doc = Map::new();
        assert!(apply_update(&mut doc, &document!({"$inc": {"n": 1}})).is_err());
        assert!(apply_update(&mut doc, &document!({"plain": 1})).is_err());
    }

    #[test]
    fn test_upsert_seed_copies_filter() {
        let seed = upsert_seed(&document!({"email": "a@b.c", "eventTitle": "Yoga"})).unwrap();
        assert_eq!(seed, document!({"email": "a@b.c", "eventTitle": "Yoga"}));
    }
}
