//! The product record schema

use super::types::{FieldDef, FieldType, Schema};

/// Builds the schema every new product must satisfy.
pub fn product_schema() -> Schema {
    Schema::new(
        "product",
        vec![
            FieldDef::required("name", FieldType::non_empty_string("Name is required")),
            FieldDef::required(
                "description",
                FieldType::non_empty_string("Description is required"),
            ),
            FieldDef::required(
                "price",
                FieldType::non_negative_number("Price must be a positive number"),
            ),
            FieldDef::required("category", FieldType::non_empty_string("Category is required")),
            FieldDef::required_array(
                "tags",
                FieldType::non_empty_string("Tag must be a non-empty string"),
            ),
            FieldDef::required_array(
                "variants",
                FieldType::Object {
                    fields: vec![
                        FieldDef::required(
                            "type",
                            FieldType::non_empty_string("Variant type is required"),
                        ),
                        FieldDef::required(
                            "value",
                            FieldType::non_empty_string("Variant value is required"),
                        ),
                    ],
                },
            ),
            FieldDef::required_object(
                "inventory",
                vec![
                    FieldDef::required(
                        "quantity",
                        FieldType::non_negative_number("Quantity must be a positive number"),
                    ),
                    FieldDef::required("inStock", FieldType::Bool),
                ],
            ),
        ],
    )
}
