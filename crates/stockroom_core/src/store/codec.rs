//! JSON snapshot codec.
//!
//! The snapshot is a top-level JSON array; each element is one record object
//! produced by `Record::to_fields`. Formatting (pretty or compact) never
//! changes the decoded result.

use super::record::{describe_value, FieldReader, Record};
use super::{StoreError, StoreResult};
use serde_json::Value;

/// Output formatting for encoded snapshots.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CodecOptions {
    /// Indent the JSON for human readers.
    pub pretty: bool,
}

impl Default for CodecOptions {
    fn default() -> Self {
        Self { pretty: true }
    }
}

/// Encodes `entities` in order as a JSON array of records.
pub fn encode<E: Record>(entities: &[E], options: CodecOptions) -> StoreResult<Vec<u8>> {
    let snapshot = Value::Array(
        entities
            .iter()
            .map(|entity| Value::Object(entity.to_fields()))
            .collect(),
    );

    let encoded = if options.pretty {
        serde_json::to_vec_pretty(&snapshot)
    } else {
        serde_json::to_vec(&snapshot)
    };
    encoded.map_err(|err| {
        StoreError::MalformedData(format!("failed to encode {} snapshot: {err}", E::KIND))
    })
}

/// Decodes a snapshot produced by `encode`.
///
/// # Errors
/// - `MalformedData` when the bytes are not JSON, the top level is not an
///   array, or an element is not an object.
/// - `FieldMismatch` when a record lacks a field, holds the wrong type, or
///   fails `Entity::validate`.
pub fn decode<E: Record>(bytes: &[u8]) -> StoreResult<Vec<E>> {
    let snapshot: Value = serde_json::from_slice(bytes)
        .map_err(|err| StoreError::MalformedData(format!("snapshot is not valid JSON: {err}")))?;

    let records = match snapshot {
        Value::Array(records) => records,
        other => {
            return Err(StoreError::MalformedData(format!(
                "expected an array of {} records, found {}",
                E::KIND,
                describe_value(&other)
            )));
        }
    };

    records
        .iter()
        .enumerate()
        .map(|(index, record)| decode_record::<E>(index, record))
        .collect()
}

fn decode_record<E: Record>(index: usize, record: &Value) -> StoreResult<E> {
    let fields = match record {
        Value::Object(fields) => fields,
        other => {
            return Err(StoreError::MalformedData(format!(
                "record {index} must be an object, found {}",
                describe_value(other)
            )));
        }
    };

    let entity = E::from_fields(&FieldReader::new(fields)).map_err(|err| {
        StoreError::FieldMismatch {
            index,
            field: err.field,
            expected: err.expected,
            found: err.found,
        }
    })?;

    entity
        .validate()
        .map_err(|violation| StoreError::FieldMismatch {
            index,
            field: violation.field.to_string(),
            expected: violation.expected,
            found: violation.value,
        })?;

    Ok(entity)
}

#[cfg(test)]
mod tests {
    use super::{decode, encode, CodecOptions};
    use crate::model::inventory::InventoryItem;
    use crate::store::StoreError;
    use chrono::{TimeZone, Utc};
    use serde_json::json;

    fn stapler() -> InventoryItem {
        InventoryItem::new(
            1,
            "Stapler",
            12,
            Utc.with_ymd_and_hms(2026, 10, 19, 9, 30, 0).unwrap(),
        )
    }

    #[test]
    fn compact_and_pretty_encodings_decode_identically() {
        let items = vec![stapler()];
        let pretty = encode(&items, CodecOptions { pretty: true }).unwrap();
        let compact = encode(&items, CodecOptions { pretty: false }).unwrap();

        assert_ne!(pretty, compact);
        assert_eq!(decode::<InventoryItem>(&pretty).unwrap(), items);
        assert_eq!(decode::<InventoryItem>(&compact).unwrap(), items);
    }

    #[test]
    fn encoded_record_uses_documented_field_names() {
        let bytes = encode(&[stapler()], CodecOptions { pretty: false }).unwrap();
        let value: serde_json::Value = serde_json::from_slice(&bytes).unwrap();

        assert_eq!(
            value,
            json!([{
                "id": 1,
                "name": "Stapler",
                "quantity": 12,
                "date_added": "2026-10-19T09:30:00Z"
            }])
        );
    }

    #[test]
    fn empty_snapshot_decodes_to_empty_list() {
        assert!(decode::<InventoryItem>(b"[]").unwrap().is_empty());
    }

    #[test]
    fn non_object_record_is_malformed() {
        let err = decode::<InventoryItem>(b"[1]").unwrap_err();
        assert!(matches!(err, StoreError::MalformedData(message) if message.contains("record 0")));
    }
}
