//! Patient-facing view models: admin list rows, personal data, registration.

use serde::de::{self, SeqAccess, Visitor};
use serde::{Deserialize, Deserializer, Serialize};
use zeroize::{Zeroize, ZeroizeOnDrop};

/// One row of the administrator patient list.
///
/// The backend sends a positional tuple:
/// `[id, username, nombre, apellido, total_diagnosticos, ultimo_diagnostico]`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PatientSummary {
    pub id: i64,
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub diagnosis_count: u64,
    pub last_diagnosis: Option<String>,
}

impl PatientSummary {
    /// `nombre apellido`, tolerating missing parts.
    #[must_use]
    pub fn full_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

impl<'de> Deserialize<'de> for PatientSummary {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        struct RowVisitor;

        impl<'de> Visitor<'de> for RowVisitor {
            type Value = PatientSummary;

            fn expecting(&self, f: &mut std::fmt::Formatter) -> std::fmt::Result {
                f.write_str("a 6-element patient row")
            }

            fn visit_seq<A>(self, mut seq: A) -> Result<PatientSummary, A::Error>
            where
                A: SeqAccess<'de>,
            {
                let id: i64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(0, &self))?;
                let username: String = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(1, &self))?;
                let first_name: Option<String> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(2, &self))?;
                let last_name: Option<String> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(3, &self))?;
                let diagnosis_count: u64 = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(4, &self))?;
                let last_diagnosis: Option<String> = seq
                    .next_element()?
                    .ok_or_else(|| de::Error::invalid_length(5, &self))?;

                Ok(PatientSummary {
                    id,
                    username,
                    first_name: first_name.unwrap_or_default(),
                    last_name: last_name.unwrap_or_default(),
                    diagnosis_count,
                    last_diagnosis,
                })
            }
        }

        deserializer.deserialize_seq(RowVisitor)
    }
}

/// Personal data editable from the settings page (`/configuracion`).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct PersonalData {
    #[serde(default, deserialize_with = "super::de_nullable_string")]
    pub nombre: String,
    #[serde(default, deserialize_with = "super::de_nullable_string")]
    pub apellido: String,
    #[serde(default, deserialize_with = "super::de_nullable_string")]
    pub fecha_nacimiento: String,
    #[serde(default, deserialize_with = "super::de_nullable_string")]
    pub genero: String,
    #[serde(default, deserialize_with = "super::de_nullable_string")]
    pub telefono: String,
    #[serde(default, deserialize_with = "super::de_nullable_string")]
    pub direccion: String,
    #[serde(default, deserialize_with = "super::de_nullable_string")]
    pub dni: String,
}

/// Username/password pair for `POST /login`.
#[derive(Clone, Serialize, Zeroize, ZeroizeOnDrop)]
pub struct Credentials {
    pub username: String,
    pub password: String,
}

impl std::fmt::Debug for Credentials {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Credentials")
            .field("username", &self.username)
            .field("password", &"<redacted>")
            .finish()
    }
}

/// Payload of `POST /registro`. New accounts are always patients.
#[derive(Clone, Serialize)]
pub struct Registration {
    #[serde(flatten)]
    pub credentials: Credentials,
    #[serde(flatten)]
    pub personal: PersonalData,
}

impl std::fmt::Debug for Registration {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Registration")
            .field("credentials", &self.credentials)
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_patient_row_from_tuple() {
        let json = r#"[7, "ana", "Ana", "Pérez", 3, "2024-10-15 10:30:05"]"#;
        let p: PatientSummary = serde_json::from_str(json).expect("Should parse");
        assert_eq!(p.id, 7);
        assert_eq!(p.username, "ana");
        assert_eq!(p.full_name(), "Ana Pérez");
        assert_eq!(p.diagnosis_count, 3);
        assert_eq!(p.last_diagnosis.as_deref(), Some("2024-10-15 10:30:05"));
    }

    #[test]
    fn test_patient_row_with_nulls() {
        let json = r#"[8, "luis", null, null, 0, null]"#;
        let p: PatientSummary = serde_json::from_str(json).expect("Should parse");
        assert_eq!(p.full_name(), "");
        assert!(p.last_diagnosis.is_none());
    }

    #[test]
    fn test_short_row_is_rejected() {
        assert!(serde_json::from_str::<PatientSummary>(r#"[1, "x", "a"]"#).is_err());
    }

    #[test]
    fn test_personal_data_null_columns() {
        let json = r#"{
            "nombre": "Admin", "apellido": null, "fecha_nacimiento": null,
            "genero": "masculino", "telefono": null, "dni": "00000001"
        }"#;
        let data: PersonalData = serde_json::from_str(json).expect("Should parse");
        assert_eq!(data.nombre, "Admin");
        assert_eq!(data.apellido, "");
        assert_eq!(data.telefono, "");
        assert_eq!(data.direccion, "");
        assert_eq!(data.dni, "00000001");
    }

    #[test]
    fn test_registration_is_flat() {
        let reg = Registration {
            credentials: Credentials {
                username: "ana".into(),
                password: "secreto".into(),
            },
            personal: PersonalData {
                nombre: "Ana".into(),
                dni: "12345678".into(),
                ..Default::default()
            },
        };
        let v = serde_json::to_value(&reg).expect("Should serialize");
        assert_eq!(v["username"], "ana");
        assert_eq!(v["password"], "secreto");
        assert_eq!(v["dni"], "12345678");
        assert!(v.get("credentials").is_none());
    }

    #[test]
    fn test_credentials_debug_redacts_password() {
        let c = Credentials {
            username: "ana".into(),
            password: "secreto".into(),
        };
        assert!(!format!("{c:?}").contains("secreto"));
    }
}
