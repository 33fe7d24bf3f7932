//! Wire shapes of the remote record API.
//!
//! Read shapes are lenient: every field is optional and defaults
//! when absent, so a sparse or partially populated response still decodes.
//! Write payloads never carry `id` or `admission_code`; the server assigns both.

use serde::{Deserialize, Deserializer, Serialize};

/// Patient as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemotePatient {
    pub id: Option<i64>,
    pub document: Option<String>,
    pub first_name: Option<String>,
    pub last_name: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub admission_code: Option<String>,
}

/// Patient create/update body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct PatientPayload {
    pub document: String,
    pub first_name: String,
    pub last_name: String,
    pub address: String,
    pub phone: String,
}

/// Lab specialist as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemoteSpecialist {
    pub id: Option<i64>,
    pub internal_code: Option<String>,
    pub name: Option<String>,
    /// Short title code (`BACT`, `MICR`, `BIOL`)
    pub title: Option<String>,
    pub phone: Option<String>,
}

/// Specialist create/update body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct SpecialistPayload {
    pub internal_code: String,
    pub name: String,
    pub title: String,
    pub phone: String,
}

/// Nested patient reference inside a result read shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct PatientDetails {
    pub admission_code: Option<String>,
}

/// Nested specialist reference inside a result read shape.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct SpecialistDetails {
    pub internal_code: Option<String>,
}

/// Lipid-profile result as returned by the API.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct RemoteResult {
    pub id: Option<i64>,
    /// Patient surrogate key
    pub patient: Option<i64>,
    /// Specialist surrogate key
    pub specialist: Option<i64>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub total_cholesterol: Option<f64>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub hdl_cholesterol: Option<f64>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub ldl_cholesterol: Option<f64>,
    #[serde(deserialize_with = "lenient_decimal")]
    pub triglycerides: Option<f64>,
    pub created_at: Option<String>,
    pub patient_details: Option<PatientDetails>,
    pub specialist_details: Option<SpecialistDetails>,
}

/// Result create/update body.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ResultPayload {
    pub patient: i64,
    pub specialist: i64,
    pub total_cholesterol: f64,
    pub hdl_cholesterol: f64,
    pub ldl_cholesterol: f64,
    pub triglycerides: f64,
}

/// Decimal fields arrive as JSON numbers or as fixed-point strings ("210.00").
/// Anything unparseable decodes as absent.
fn lenient_decimal<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Decimal {
        Number(f64),
        Text(String),
        Other(serde_json::Value),
    }

    Ok(match Option::<Decimal>::deserialize(deserializer)? {
        Some(Decimal::Number(n)) => Some(n),
        Some(Decimal::Text(s)) => s.trim().parse::<f64>().ok(),
        Some(Decimal::Other(_)) | None => None,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_sparse_response() {
        let json = r#"{"id": 7, "document": "10203040"}"#;
        let patient: RemotePatient = serde_json::from_str(json).unwrap();
        assert_eq!(patient.id, Some(7));
        assert_eq!(patient.document.as_deref(), Some("10203040"));
        assert!(patient.admission_code.is_none());
        assert!(patient.first_name.is_none());
    }

    #[test]
    fn test_result_decimal_strings() {
        let json = r#"{
            "id": 3,
            "patient": 1,
            "specialist": 2,
            "total_cholesterol": "210.00",
            "hdl_cholesterol": 45,
            "ldl_cholesterol": "130.5",
            "triglycerides": "n/a",
            "created_at": "2024-01-15T10:00:00Z",
            "patient_details": {"id": 1, "admission_code": "P0001"},
            "specialist_details": {"internal_code": "LT-01", "title": "BACT"}
        }"#;
        let result: RemoteResult = serde_json::from_str(json).unwrap();
        assert_eq!(result.total_cholesterol, Some(210.0));
        assert_eq!(result.hdl_cholesterol, Some(45.0));
        assert_eq!(result.ldl_cholesterol, Some(130.5));
        assert_eq!(result.triglycerides, None);
        assert_eq!(
            result.patient_details.unwrap().admission_code.as_deref(),
            Some("P0001")
        );
        assert_eq!(
            result.specialist_details.unwrap().internal_code.as_deref(),
            Some("LT-01")
        );
    }

    #[test]
    fn test_result_missing_measurements() {
        let result: RemoteResult = serde_json::from_str(r#"{"id": 1}"#).unwrap();
        assert_eq!(result.total_cholesterol, None);
        assert!(result.patient_details.is_none());
    }

    #[test]
    fn test_payload_has_no_server_fields() {
        let payload = PatientPayload {
            document: "999".into(),
            first_name: "X".into(),
            last_name: "Y".into(),
            address: String::new(),
            phone: String::new(),
        };
        let value = serde_json::to_value(&payload).unwrap();
        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("id"));
        assert!(!obj.contains_key("admission_code"));
        assert_eq!(obj["first_name"], "X");
    }

    mod prop {
        use super::*;
        use proptest::prelude::*;

        proptest! {
            #[test]
            fn decimal_string_and_number_decode_alike(cents in 0u32..100_000) {
                let value = f64::from(cents) / 100.0;
                let as_text = format!(r#"{{"total_cholesterol": "{:.2}"}}"#, value);
                let as_number = serde_json::json!({ "total_cholesterol": value }).to_string();

                let from_text: RemoteResult = serde_json::from_str(&as_text).unwrap();
                let from_number: RemoteResult = serde_json::from_str(&as_number).unwrap();

                prop_assert_eq!(from_text.total_cholesterol, Some(value));
                prop_assert_eq!(from_number.total_cholesterol, Some(value));
            }
        }
    }
}
