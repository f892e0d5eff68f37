use serde::de::DeserializeOwned;

use crate::models::{Product, ProductWithQuantity};
use crate::utils::{display_field, display_value};

/// Turns one decoded record into the single line shown for it in the list.
pub trait RecordFormat: Send + Sync + 'static {
    type Record: DeserializeOwned + Send;

    fn format(&self, record: &Self::Record) -> String;
}

/// Every field of an open product record as `key: value`, joined by ` - `.
#[derive(Debug, Clone, Copy, Default)]
pub struct GenericFormat;

impl RecordFormat for GenericFormat {
    type Record = Product;

    fn format(&self, record: &Product) -> String {
        record
            .fields_in_key_order()
            .into_iter()
            .map(|(key, value)| format!("{}: {}", key, display_value(value)))
            .collect::<Vec<_>>()
            .join(" - ")
    }
}

/// Fixed `name - description - date - $price - quantity` template.
#[derive(Debug, Clone, Copy, Default)]
pub struct TypedFormat;

impl RecordFormat for TypedFormat {
    type Record = ProductWithQuantity;

    fn format(&self, record: &ProductWithQuantity) -> String {
        let product = &record.product;
        format!(
            "{} - {} - {} - ${} - {}",
            display_field(product.get("name")),
            display_field(product.get("description")),
            display_field(product.get("dateOfManufacture")),
            display_field(product.get("price")),
            display_field(record.quantity.as_ref())
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn generic(json: &str) -> String {
        GenericFormat.format(&serde_json::from_str(json).unwrap())
    }

    fn typed(json: &str) -> String {
        TypedFormat.format(&serde_json::from_str(json).unwrap())
    }

    #[test]
    fn generic_joins_every_field_in_order() {
        assert_eq!(generic(r#"{"name":"Bolt","price":5}"#), "name: Bolt - price: 5");
        assert_eq!(
            generic(r#"{"price":5.0,"name":"Bolt","tags":["a","b"],"stock":null}"#),
            "price: 5 - name: Bolt - tags: a,b - stock: null"
        );
    }

    #[test]
    fn generic_lists_index_keys_first() {
        assert_eq!(
            generic(r#"{"name":"x","2":"b","1":"a"}"#),
            "1: a - 2: b - name: x"
        );
    }

    #[test]
    fn generic_shows_numbers_like_a_browser() {
        assert_eq!(
            generic(r#"{"id":12345678901234567890,"tolerance":1e-7,"mass":2e21}"#),
            "id: 12345678901234567000 - tolerance: 1e-7 - mass: 2e+21"
        );
    }

    #[test]
    fn generic_empty_record_renders_empty_line() {
        assert_eq!(generic("{}"), "");
    }

    #[test]
    fn typed_uses_positional_template() {
        assert_eq!(
            typed(
                r#"{"product":{"name":"Bolt","description":"Steel","dateOfManufacture":"2024-01-01","price":5},"quantity":3}"#
            ),
            "Bolt - Steel - 2024-01-01 - $5 - 3"
        );
    }

    #[test]
    fn typed_ignores_extra_fields_and_marks_missing_ones() {
        assert_eq!(
            typed(r#"{"product":{"id":"9","name":"Apple","price":0.75},"quantity":12}"#),
            "Apple - undefined - undefined - $0.75 - 12"
        );
    }

    #[test]
    fn typed_shows_missing_or_odd_quantity_verbatim() {
        assert_eq!(
            typed(r#"{"product":{"name":"Pear","description":"Green","dateOfManufacture":"2024-05-01","price":1}}"#),
            "Pear - Green - 2024-05-01 - $1 - undefined"
        );
        assert_eq!(
            typed(r#"{"product":{"name":"Pear","description":"Green","dateOfManufacture":"2024-05-01","price":1},"quantity":"a few"}"#),
            "Pear - Green - 2024-05-01 - $1 - a few"
        );
    }

    #[test]
    fn typed_shows_array_dates_comma_joined() {
        assert_eq!(
            typed(
                r#"{"product":{"name":"Kale","description":"Leafy","dateOfManufacture":[2024,3,9],"price":2.5},"quantity":0}"#
            ),
            "Kale - Leafy - 2024,3,9 - $2.5 - 0"
        );
    }
}
