// SPDX-FileCopyrightText: 2026 Hyperpolymath
// SPDX-License-Identifier: PMPL-1.0-or-later

//! Wire models for the registry document-create call.
//!
//! Field names follow the registry schema exactly, including
//! `importRequest`, the one camelCase identifier in an otherwise
//! snake_case schema. Dates render as `YYYY-MM-DD`. Absent optional
//! fields serialize as explicit JSON `null`; no declared field is ever
//! omitted.

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A goods-introduction document.
///
/// The `description` map uses a `BTreeMap` so serialization is
/// deterministic.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Document {
    pub description: Option<BTreeMap<String, String>>,
    pub doc_id: Option<String>,
    pub doc_status: Option<String>,
    pub doc_type: Option<String>,
    #[serde(rename = "importRequest")]
    pub import_request: bool,
    pub owner_inn: Option<String>,
    pub participant_inn: Option<String>,
    pub producer_inn: Option<String>,
    pub production_date: Option<NaiveDate>,
    pub production_type: Option<String>,
    pub products: Option<Vec<Product>>,
    pub reg_date: Option<NaiveDate>,
    pub reg_number: Option<String>,
}

/// A line item of a [`Document`].
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Product {
    pub certificate_document: Option<String>,
    pub certificate_document_date: Option<NaiveDate>,
    pub certificate_document_number: Option<String>,
    pub owner_inn: Option<String>,
    pub producer_inn: Option<String>,
    pub production_date: Option<NaiveDate>,
    pub tnved_code: Option<String>,
    pub uit_code: Option<String>,
    pub uitu_code: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn sample_document() -> Document {
        Document {
            description: Some(BTreeMap::from([(
                "participantInn".to_string(),
                "1234567890".to_string(),
            )])),
            doc_id: Some("doc-42".to_string()),
            doc_status: Some("DRAFT".to_string()),
            doc_type: Some("LP_INTRODUCE_GOODS".to_string()),
            import_request: true,
            owner_inn: Some("1234567890".to_string()),
            participant_inn: Some("1234567890".to_string()),
            producer_inn: Some("0987654321".to_string()),
            production_date: NaiveDate::from_ymd_opt(2026, 2, 28),
            production_type: Some("OWN_PRODUCTION".to_string()),
            products: Some(vec![Product {
                owner_inn: Some("1234567890".to_string()),
                production_date: NaiveDate::from_ymd_opt(2026, 2, 28),
                tnved_code: Some("6401100000".to_string()),
                uit_code: Some("010463003407002921wGqz5".to_string()),
                ..Default::default()
            }]),
            reg_date: NaiveDate::from_ymd_opt(2026, 3, 1),
            reg_number: Some("RU-2026-000001".to_string()),
        }
    }

    #[test]
    fn serializes_wire_field_names_and_date_format() {
        let value = serde_json::to_value(sample_document()).unwrap();

        assert_eq!(value["doc_id"], json!("doc-42"));
        assert_eq!(value["importRequest"], json!(true));
        assert_eq!(value["owner_inn"], json!("1234567890"));
        assert_eq!(value["production_date"], json!("2026-02-28"));
        assert_eq!(value["reg_date"], json!("2026-03-01"));
        assert_eq!(value["products"][0]["tnved_code"], json!("6401100000"));
        assert_eq!(
            value["products"][0]["production_date"],
            json!("2026-02-28")
        );
    }

    #[test]
    fn empty_document_serializes_every_field_as_null() {
        let value = serde_json::to_value(Document::default()).unwrap();
        let object = value.as_object().unwrap();

        let expected = [
            "description",
            "doc_id",
            "doc_status",
            "doc_type",
            "importRequest",
            "owner_inn",
            "participant_inn",
            "producer_inn",
            "production_date",
            "production_type",
            "products",
            "reg_date",
            "reg_number",
        ];
        assert_eq!(object.len(), expected.len());
        for field in expected {
            assert!(object.contains_key(field), "missing field {field}");
        }
        assert_eq!(value["importRequest"], json!(false));
        assert_eq!(value["doc_id"], Value::Null);
        assert_eq!(value["products"], Value::Null);
    }

    #[test]
    fn document_round_trips() {
        let document = sample_document();
        let encoded = serde_json::to_string(&document).unwrap();
        let decoded: Document = serde_json::from_str(&encoded).unwrap();
        assert_eq!(decoded, document);
    }

    #[test]
    fn missing_fields_deserialize_as_absent() {
        let decoded: Document = serde_json::from_str(r#"{"doc_id":"d1"}"#).unwrap();
        assert_eq!(decoded.doc_id.as_deref(), Some("d1"));
        assert!(!decoded.import_request);
        assert!(decoded.products.is_none());
    }
}
