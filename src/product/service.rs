//! Product persistence accessor
//!
//! Five operations, each a direct mapping onto the product collection. Store
//! errors are returned as-is; not-found is `None`, never an error.

use std::sync::Arc;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, instrument};

use crate::schema::{product_schema, SchemaValidator, ValidationError, ValidationIssue};
use crate::store::{
    CollectionSpec, DocumentStore, Filter, MemoryCollection, ReturnDocument, StoreError,
};

use super::model::{cast_patch, Product, ProductFields};

/// Product pipeline errors
#[derive(Debug, Clone, PartialEq, Error)]
pub enum ProductError {
    #[error(transparent)]
    Validation(#[from] ValidationError),

    #[error(transparent)]
    Store(#[from] StoreError),
}

impl ProductError {
    /// Structured error object echoed to callers
    pub fn to_json(&self) -> Value {
        match self {
            ProductError::Validation(err) => {
                serde_json::to_value(err).unwrap_or_else(|_| Value::String(err.message()))
            }
            ProductError::Store(err) => err.to_json(),
        }
    }

    pub fn is_validation(&self) -> bool {
        matches!(self, ProductError::Validation(_))
    }
}

/// Result type for product operations
pub type ProductResult<T> = Result<T, ProductError>;

/// Product collection settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductConfig {
    /// Collection name (default: "products")
    #[serde(default = "default_collection")]
    pub collection: String,

    /// Check present patch fields against the schema on update (default: false)
    #[serde(default)]
    pub validate_updates: bool,

    /// Snapshot returned by update (default: before)
    #[serde(default)]
    pub return_document: ReturnDocument,

    /// Fields searched by `searchTerm`
    #[serde(default = "default_text_index")]
    pub text_index: Vec<String>,

    /// Fields that must be unique across products (default: none)
    #[serde(default)]
    pub unique_fields: Vec<String>,
}

fn default_collection() -> String {
    "products".to_string()
}

fn default_text_index() -> Vec<String> {
    ["name", "description", "category", "tags"]
        .into_iter()
        .map(String::from)
        .collect()
}

impl Default for ProductConfig {
    fn default() -> Self {
        Self {
            collection: default_collection(),
            validate_updates: false,
            return_document: ReturnDocument::default(),
            text_index: default_text_index(),
            unique_fields: Vec::new(),
        }
    }
}

impl ProductConfig {
    pub fn collection_spec(&self) -> CollectionSpec {
        CollectionSpec::new(self.collection.clone())
            .with_text_index(self.text_index.clone())
            .with_unique(self.unique_fields.clone())
    }
}

/// Persistence accessor for products
pub struct ProductService {
    store: Arc<dyn DocumentStore>,
    validator: SchemaValidator,
    validate_updates: bool,
    return_document: ReturnDocument,
}

impl ProductService {
    pub fn new(store: Arc<dyn DocumentStore>, config: &ProductConfig) -> Self {
        Self {
            store,
            validator: SchemaValidator::new(product_schema()),
            validate_updates: config.validate_updates,
            return_document: config.return_document,
        }
    }

    /// Service over a fresh in-memory collection
    pub fn in_memory(config: &ProductConfig) -> Self {
        let store = Arc::new(MemoryCollection::new(config.collection_spec()));
        Self::new(store, config)
    }

    pub fn store(&self) -> &Arc<dyn DocumentStore> {
        &self.store
    }

    /// Runs the product schema over raw input.
    pub fn validate(&self, input: &Value) -> ProductResult<ProductFields> {
        let normalized = self.validator.validate(input)?;
        serde_json::from_value(Value::Object(normalized)).map_err(|e| {
            ProductError::Validation(ValidationError::new(vec![ValidationIssue::new(
                "",
                e.to_string(),
            )]))
        })
    }

    #[instrument(skip(self, product), fields(collection = self.store.name()))]
    pub async fn create(&self, product: ProductFields) -> ProductResult<Product> {
        let stored = self.store.insert_one(product.to_document()?).await?;
        let created = Product::from_document(stored)?;
        debug!(id = %created.id, "product created");
        Ok(created)
    }

    /// Lists every product, or the text-search matches of a non-empty term
    #[instrument(skip(self), fields(collection = self.store.name()))]
    pub async fn list(&self, search_term: Option<&str>) -> ProductResult<Vec<Product>> {
        let filter = match search_term {
            Some(term) if !term.is_empty() => Filter::Text(term.to_string()),
            _ => Filter::All,
        };
        let documents = self.store.find(filter).await?;
        let products = documents
            .into_iter()
            .map(Product::from_document)
            .collect::<Result<Vec<_>, _>>()?;
        debug!(count = products.len(), "products listed");
        Ok(products)
    }

    #[instrument(skip(self), fields(collection = self.store.name()))]
    pub async fn get(&self, id: &str) -> ProductResult<Option<Product>> {
        let document = self.store.find_by_id(id).await?;
        Ok(document.map(Product::from_document).transpose()?)
    }

    /// Applies a partial update.
    ///
    /// The merged document is not re-validated. With `validate_updates` set,
    /// fields present in the patch are checked against the schema first.
    #[instrument(skip(self, patch), fields(collection = self.store.name()))]
    pub async fn update(&self, id: &str, patch: &Value) -> ProductResult<Option<Product>> {
        if self.validate_updates {
            self.validator.validate_partial(patch)?;
        }
        let set = cast_patch(patch)?;
        let document = self
            .store
            .find_by_id_and_update(id, set, self.return_document)
            .await?;
        Ok(document.map(Product::from_document).transpose()?)
    }

    #[instrument(skip(self), fields(collection = self.store.name()))]
    pub async fn delete(&self, id: &str) -> ProductResult<Option<Product>> {
        let document = self.store.find_by_id_and_delete(id).await?;
        Ok(document.map(Product::from_document).transpose()?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Number};

    fn shirt_json() -> Value {
        json!({
            "name": "Shirt",
            "description": "Cotton",
            "price": 10,
            "category": "apparel",
            "tags": ["new"],
            "variants": [{ "type": "size", "value": "M" }],
            "inventory": { "quantity": 5, "inStock": true }
        })
    }

    fn service() -> ProductService {
        ProductService::in_memory(&ProductConfig::default())
    }

    async fn create(service: &ProductService, body: Value) -> Product {
        let fields = service.validate(&body).unwrap();
        service.create(fields).await.unwrap()
    }

    #[tokio::test]
    async fn test_create_then_get_round_trip() {
        let service = service();
        let created = create(&service, shirt_json()).await;
        let fetched = service.get(&created.id.to_hex()).await.unwrap().unwrap();
        assert_eq!(fetched, created);
        assert_eq!(fetched.fields.name, "Shirt");
    }

    #[test]
    fn test_validate_rejects_negative_price() {
        let mut body = shirt_json();
        body["price"] = json!(-5);
        let err = service().validate(&body).unwrap_err();
        assert!(err.is_validation());
        assert!(err.to_string().contains("Price must be a positive number"));
    }

    #[tokio::test]
    async fn test_list_and_search() {
        let service = service();
        create(&service, shirt_json()).await;
        let mut hat = shirt_json();
        hat["name"] = json!("Hat");
        hat["description"] = json!("Wool");
        hat["tags"] = json!(["winter"]);
        create(&service, hat).await;

        assert_eq!(service.list(None).await.unwrap().len(), 2);
        assert_eq!(service.list(Some("")).await.unwrap().len(), 2);

        let found = service.list(Some("winter")).await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].fields.name, "Hat");
    }

    #[tokio::test]
    async fn test_update_returns_pre_update_snapshot_by_default() {
        let service = service();
        let created = create(&service, shirt_json()).await;
        let id = created.id.to_hex();

        let returned = service
            .update(&id, &json!({ "price": 20, "inventory": { "inStock": false } }))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(returned, created);

        let current = service.get(&id).await.unwrap().unwrap();
        assert_eq!(current.fields.price, Number::from(20));
        assert!(!current.fields.inventory.in_stock);
        assert_eq!(current.fields.inventory.quantity, Number::from(5));
        assert_eq!(current.id, created.id);
    }

    #[tokio::test]
    async fn test_update_after_snapshot_when_configured() {
        let config = ProductConfig {
            return_document: ReturnDocument::After,
            ..ProductConfig::default()
        };
        let service = ProductService::in_memory(&config);
        let created = create(&service, shirt_json()).await;

        let returned = service
            .update(&created.id.to_hex(), &json!({ "name": "Polo" }))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(returned.fields.name, "Polo");
    }

    #[tokio::test]
    async fn test_update_skips_validation_by_default() {
        let service = service();
        let created = create(&service, shirt_json()).await;
        let id = created.id.to_hex();

        service.update(&id, &json!({ "price": -1 })).await.unwrap();
        let current = service.get(&id).await.unwrap().unwrap();
        assert_eq!(current.fields.price, Number::from(-1));
    }

    #[tokio::test]
    async fn test_update_validation_when_enabled() {
        let config = ProductConfig {
            validate_updates: true,
            ..ProductConfig::default()
        };
        let service = ProductService::in_memory(&config);
        let created = create(&service, shirt_json()).await;

        let err = service
            .update(&created.id.to_hex(), &json!({ "price": -1 }))
            .await
            .unwrap_err();
        assert!(err.is_validation());
        assert_eq!(err.to_string(), "Price must be a positive number");
    }

    #[tokio::test]
    async fn test_validated_update_accepts_partial_inventory() {
        let config = ProductConfig {
            validate_updates: true,
            return_document: ReturnDocument::After,
            ..ProductConfig::default()
        };
        let service = ProductService::in_memory(&config);
        let created = create(&service, shirt_json()).await;

        let updated = service
            .update(&created.id.to_hex(), &json!({ "inventory": { "quantity": 0 } }))
            .await
            .unwrap()
            .unwrap();
        assert_eq!(updated.fields.inventory.quantity, Number::from(0));
        assert!(updated.fields.inventory.in_stock);

        let err = service
            .update(&created.id.to_hex(), &json!({ "inventory": { "quantity": -2 } }))
            .await
            .unwrap_err();
        assert_eq!(err.to_string(), "Quantity must be a positive number");
    }

    #[tokio::test]
    async fn test_update_missing_product_is_none() {
        let result = service()
            .update("000000000000000000000000", &json!({ "name": "x" }))
            .await
            .unwrap();
        assert!(result.is_none());
    }

    #[tokio::test]
    async fn test_delete_twice() {
        let service = service();
        let created = create(&service, shirt_json()).await;
        let id = created.id.to_hex();

        assert_eq!(service.delete(&id).await.unwrap(), Some(created));
        assert_eq!(service.delete(&id).await.unwrap(), None);
        assert_eq!(service.delete(&id).await.unwrap(), None);
    }

    #[tokio::test]
    async fn test_malformed_id_propagates() {
        let err = service().get("not-an-id").await.unwrap_err();
        assert!(!err.is_validation());
        assert_eq!(err.to_json()["name"], "CastError");
    }

    #[tokio::test]
    async fn test_unique_fields_conflict() {
        let config = ProductConfig {
            unique_fields: vec!["name".into()],
            ..ProductConfig::default()
        };
        let service = ProductService::in_memory(&config);
        create(&service, shirt_json()).await;

        let fields = service.validate(&shirt_json()).unwrap();
        let err = service.create(fields).await.unwrap_err();
        assert_eq!(err.to_json()["name"], "DuplicateKeyError");
    }

    #[test]
    fn test_config_defaults_from_empty_json() {
        let config: ProductConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(config, ProductConfig::default());
        assert_eq!(config.collection_spec().text_index.len(), 4);
    }
}
