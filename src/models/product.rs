use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// A product record as served by the API. The field set is open, so the record is
/// kept as an ordered map rather than a fixed struct.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Product {
    fields: Map<String, Value>,
}

impl Product {
    pub fn new(fields: Map<String, Value>) -> Self {
        Self { fields }
    }

    pub fn get(&self, key: &str) -> Option<&Value> {
        self.fields.get(key)
    }

    /// Fields in the order they appeared in the response body.
    pub fn fields(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.fields.iter()
    }

    /// Fields in object key order: array-index keys ascending, then every other key
    /// in response order.
    pub fn fields_in_key_order(&self) -> Vec<(&String, &Value)> {
        let (mut indexed, named): (Vec<_>, Vec<_>) = self
            .fields
            .iter()
            .partition(|(key, _)| array_index(key).is_some());
        indexed.sort_by_key(|(key, _)| array_index(key));
        indexed.extend(named);
        indexed
    }

    pub fn len(&self) -> usize {
        self.fields.len()
    }

    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }
}

/// Canonical array index: decimal without leading zeros, below 2^32 - 1.
fn array_index(key: &str) -> Option<u32> {
    let index: u32 = key.parse().ok()?;
    (index != u32::MAX && index.to_string() == key).then_some(index)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductWithQuantity {
    pub product: Product,
    /// Normally an integer; whatever the server sent is displayed as-is.
    #[serde(default, deserialize_with = "present")]
    pub quantity: Option<Value>,
}

// keeps an explicit `null` distinct from an absent field
fn present<'de, D>(deserializer: D) -> Result<Option<Value>, D::Error>
where
    D: Deserializer<'de>,
{
    Value::deserialize(deserializer).map(Some)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn keeps_response_key_order() {
        let product: Product =
            serde_json::from_str(r#"{"price":5,"name":"Bolt","description":"Steel"}"#).unwrap();

        let keys: Vec<&str> = product.fields().map(|(k, _)| k.as_str()).collect();
        assert_eq!(keys, ["price", "name", "description"]);
    }

    #[test]
    fn index_keys_come_first_in_ascending_order() {
        let product: Product =
            serde_json::from_str(r#"{"name":"x","2":"b","1":"a","10":"c"}"#).unwrap();

        let keys: Vec<&str> = product
            .fields_in_key_order()
            .into_iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, ["1", "2", "10", "name"]);
    }

    #[test]
    fn non_canonical_numeric_keys_keep_response_order() {
        let product: Product = serde_json::from_str(
            r#"{"b":1,"01":2,"-1":3,"4294967295":4,"1.5":5,"7":6}"#,
        )
        .unwrap();

        let keys: Vec<&str> = product
            .fields_in_key_order()
            .into_iter()
            .map(|(k, _)| k.as_str())
            .collect();
        assert_eq!(keys, ["7", "b", "01", "-1", "4294967295", "1.5"]);
    }

    #[test]
    fn product_with_quantity_accepts_extra_product_fields() {
        let record: ProductWithQuantity = serde_json::from_str(
            r#"{"product":{"id":"7","name":"Bolt","weight":1.5},"quantity":3}"#,
        )
        .unwrap();

        assert_eq!(record.quantity, Some(Value::from(3)));
        assert_eq!(record.product.len(), 3);
        assert_eq!(record.product.get("weight"), Some(&Value::from(1.5)));
    }

    #[test]
    fn quantity_is_optional_and_untyped() {
        let missing: ProductWithQuantity =
            serde_json::from_str(r#"{"product":{"name":"Bolt"}}"#).unwrap();
        assert_eq!(missing.quantity, None);

        let text: ProductWithQuantity =
            serde_json::from_str(r#"{"product":{"name":"Bolt"},"quantity":"three"}"#).unwrap();
        assert_eq!(text.quantity, Some(Value::from("three")));

        let null: ProductWithQuantity =
            serde_json::from_str(r#"{"product":{"name":"Bolt"},"quantity":null}"#).unwrap();
        assert_eq!(null.quantity, Some(Value::Null));
    }

    #[test]
    fn product_with_quantity_requires_product() {
        let result = serde_json::from_str::<ProductWithQuantity>(r#"{"quantity":3}"#);

        assert!(result.is_err());
    }
}
