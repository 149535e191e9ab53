//! Product record types and their document mapping

use serde::de::DeserializeOwned;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Number, Value};

use crate::store::{Document, ObjectId, StoreError, StoreResult, ID_FIELD};

/// One purchasable variation of a product, e.g. `{type: "size", value: "M"}`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Variant {
    #[serde(rename = "type")]
    pub kind: String,
    pub value: String,
}

impl Variant {
    pub fn new(kind: impl Into<String>, value: impl Into<String>) -> Self {
        Self {
            kind: kind.into(),
            value: value.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Inventory {
    /// Kept as the JSON number that was sent, so integers stay integers
    pub quantity: Number,
    pub in_stock: bool,
}

/// Every product field except the id.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductFields {
    pub name: String,
    pub description: String,
    pub price: Number,
    pub category: String,
    pub tags: Vec<String>,
    pub variants: Vec<Variant>,
    pub inventory: Inventory,
}

impl ProductFields {
    /// Converts into a store document
    pub fn to_document(&self) -> StoreResult<Document> {
        match serde_json::to_value(self) {
            Ok(Value::Object(map)) => Ok(map),
            Ok(other) => Err(StoreError::Decode {
                id: String::new(),
                reason: format!("expected an object, serialized to {}", other),
            }),
            Err(e) => Err(StoreError::Decode {
                id: String::new(),
                reason: e.to_string(),
            }),
        }
    }
}

/// A stored product
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Product {
    pub id: ObjectId,
    #[serde(flatten)]
    pub fields: ProductFields,
}

impl Product {
    /// Decodes a store document (with `_id`) into a product.
    ///
    /// # Errors
    ///
    /// Returns `StoreError::Decode` if the document lost a field or a field
    /// changed type.
    pub fn from_document(mut document: Document) -> StoreResult<Self> {
        let raw_id = document.remove(ID_FIELD).unwrap_or(Value::Null);
        let id = raw_id
            .as_str()
            .ok_or_else(|| StoreError::Decode {
                id: raw_id.to_string(),
                reason: "missing _id".to_string(),
            })
            .and_then(ObjectId::parse)?;

        let fields = serde_json::from_value(Value::Object(document)).map_err(|e| {
            StoreError::Decode {
                id: id.to_hex(),
                reason: e.to_string(),
            }
        })?;

        Ok(Self { id, fields })
    }
}

/// Casts an update body into `$set` assignments.
///
/// Unknown keys and `id`/`_id` are dropped. `inventory` is merged field by
/// field; every other key replaces the stored field.
///
/// # Errors
///
/// Returns `StoreError::Cast` for a non-object body or a value of the wrong
/// type (including `null`).
pub fn cast_patch(body: &Value) -> StoreResult<Document> {
    let Some(obj) = body.as_object() else {
        return Err(cast_error("", "Object", body));
    };

    let mut set = Map::new();
    for (key, value) in obj {
        let cast = match key.as_str() {
            "name" | "description" | "category" => cast_value::<String>(key, value, "string")?,
            "price" => cast_value::<Number>(key, value, "Number")?,
            "tags" => cast_value::<Vec<String>>(key, value, "[string]")?,
            "variants" => cast_value::<Vec<Variant>>(key, value, "[Variant]")?,
            "inventory" => {
                let Some(inventory) = value.as_object() else {
                    return Err(cast_error(key, "Object", value));
                };
                for (field, nested) in inventory {
                    let path = format!("inventory.{}", field);
                    let cast = match field.as_str() {
                        "quantity" => cast_value::<Number>(&path, nested, "Number")?,
                        "inStock" => cast_value::<bool>(&path, nested, "Boolean")?,
                        _ => continue,
                    };
                    set.insert(path, cast);
                }
                continue;
            }
            _ => continue,
        };
        set.insert(key.clone(), cast);
    }

    Ok(set)
}

fn cast_value<T>(path: &str, value: &Value, expected: &'static str) -> StoreResult<Value>
where
    T: DeserializeOwned + Serialize,
{
    if value.is_null() {
        return Err(cast_error(path, expected, value));
    }
    serde_json::from_value::<T>(value.clone())
        .ok()
        .and_then(|typed| serde_json::to_value(typed).ok())
        .ok_or_else(|| cast_error(path, expected, value))
}

fn cast_error(path: &str, expected: &'static str, value: &Value) -> StoreError {
    let actual = match value {
        Value::Null => "null",
        Value::Bool(_) => "boolean",
        Value::Number(_) => "number",
        Value::String(_) => "string",
        Value::Array(_) => "Array",
        Value::Object(_) => "Object",
    };
    let rendered = match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    };
    StoreError::Cast {
        path: path.to_string(),
        expected,
        actual,
        value: rendered,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn shirt() -> ProductFields {
        ProductFields {
            name: "Shirt".into(),
            description: "Cotton".into(),
            price: Number::from(10),
            category: "apparel".into(),
            tags: vec!["new".into()],
            variants: vec![Variant::new("size", "M")],
            inventory: Inventory {
                quantity: Number::from(5),
                in_stock: true,
            },
        }
    }

    #[test]
    fn test_wire_shape() {
        let product = Product {
            id: ObjectId::parse("0123456789abcdef01234567").unwrap(),
            fields: shirt(),
        };
        let json = serde_json::to_value(&product).unwrap();
        assert_eq!(json["id"], "0123456789abcdef01234567");
        assert_eq!(json["name"], "Shirt");
        assert_eq!(json["variants"][0]["type"], "size");
        assert_eq!(json["inventory"]["inStock"], true);
        assert!(json.get("fields").is_none());
    }

    #[test]
    fn test_numbers_keep_their_encoding() {
        let fields: ProductFields = serde_json::from_value(json!({
            "name": "Shirt",
            "description": "Cotton",
            "price": 10,
            "category": "apparel",
            "tags": [],
            "variants": [],
            "inventory": { "quantity": 5, "inStock": true }
        }))
        .unwrap();
        let json = serde_json::to_value(&fields).unwrap();
        assert_eq!(json["price"].to_string(), "10");
        assert_eq!(json["inventory"]["quantity"].to_string(), "5");

        let set = cast_patch(&json!({ "price": 9.5 })).unwrap();
        assert_eq!(set["price"].to_string(), "9.5");
    }

    #[test]
    fn test_document_round_trip() {
        let mut doc = shirt().to_document().unwrap();
        doc.insert(ID_FIELD.into(), json!("0123456789abcdef01234567"));
        let product = Product::from_document(doc).unwrap();
        assert_eq!(product.fields, shirt());
        assert_eq!(product.id.to_hex(), "0123456789abcdef01234567");
    }

    #[test]
    fn test_decode_failure() {
        let mut doc = shirt().to_document().unwrap();
        doc.insert(ID_FIELD.into(), json!("0123456789abcdef01234567"));
        doc.remove("name");
        let err = Product::from_document(doc).unwrap_err();
        assert_eq!(err.name(), "DecodeError");
        assert!(err.to_string().contains("name"));
    }

    #[test]
    fn test_cast_patch_drops_unknown_and_id() {
        let set = cast_patch(&json!({
            "price": 12,
            "id": "abc",
            "_id": "abc",
            "color": "red"
        }))
        .unwrap();
        assert_eq!(Value::Object(set), json!({ "price": 12 }));
    }

    #[test]
    fn test_cast_patch_merges_inventory() {
        let set = cast_patch(&json!({ "inventory": { "quantity": 3, "shelf": "A" } })).unwrap();
        assert_eq!(Value::Object(set), json!({ "inventory.quantity": 3 }));
    }

    #[test]
    fn test_cast_patch_type_errors() {
        let err = cast_patch(&json!({ "price": "cheap" })).unwrap_err();
        assert_eq!(
            err.to_string(),
            "Cast to Number failed for value \"cheap\" (type string) at path \"price\""
        );

        let err = cast_patch(&json!({ "inventory": { "inStock": 1 } })).unwrap_err();
        assert_eq!(err.path(), Some("inventory.inStock"));

        let err = cast_patch(&json!({ "name": null })).unwrap_err();
        assert_eq!(err.name(), "CastError");

        let err = cast_patch(&json!([1])).unwrap_err();
        assert_eq!(err.name(), "CastError");
    }

    #[test]
    fn test_cast_patch_keeps_invalid_but_well_typed_values() {
        // Range rules belong to the validator, not to casting
        let set = cast_patch(&json!({ "name": "", "price": -1 })).unwrap();
        assert_eq!(set["name"], "");
        assert_eq!(set["price"], -1);
    }
}
