//! Diagnosis types.
//!
//! The risk classification is produced by the backend model; this client
//! only labels and displays it.

use serde::{Deserialize, Deserializer, Serialize};

/// Discrete risk level assigned by the backend (`riesgo`).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(from = "i64", into = "i64")]
pub enum RiskLevel {
    /// riesgo = 0
    Low,
    /// riesgo = 1
    Medium,
    /// riesgo = 2 (and anything the backend may add above it)
    High,
}

impl From<i64> for RiskLevel {
    fn from(code: i64) -> Self {
        match code {
            0 => Self::Low,
            1 => Self::Medium,
            _ => Self::High,
        }
    }
}

impl From<RiskLevel> for i64 {
    fn from(level: RiskLevel) -> Self {
        level.code()
    }
}

impl RiskLevel {
    #[must_use]
    pub fn code(&self) -> i64 {
        match self {
            Self::Low => 0,
            Self::Medium => 1,
            Self::High => 2,
        }
    }

    /// Spanish label shown in tables and on the results page.
    #[must_use]
    pub fn label(&self) -> &'static str {
        match self {
            Self::Low => "Bajo",
            Self::Medium => "Medio",
            Self::High => "Alto",
        }
    }

    /// Alert shown next to the chart.
    #[must_use]
    pub fn alert(&self) -> &'static str {
        match self {
            Self::Low => "¡Estás en buen estado!",
            Self::Medium => "Precaución: cuida tus hábitos",
            Self::High => "¡Alerta! Riesgo alto, consulta urgente",
        }
    }

    /// Recommendation paragraph.
    #[must_use]
    pub fn recommendation(&self) -> &'static str {
        match self {
            Self::Low => "Continúa con tus hábitos saludables. Realiza chequeos anuales.",
            Self::Medium => {
                "Mejora tu dieta y aumenta la actividad física. Consulta a un especialista."
            }
            Self::High => {
                "Consulta urgentemente con un cardiólogo. Necesitas atención médica inmediata."
            }
        }
    }

    /// Chart colour (RGB).
    #[must_use]
    pub fn color(&self) -> (u8, u8, u8) {
        match self {
            Self::Low => (40, 167, 69),     // #28a745
            Self::Medium => (255, 193, 7),  // #ffc107
            Self::High => (220, 53, 69),    // #dc3545
        }
    }
}

impl std::fmt::Display for RiskLevel {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.label())
    }
}

/// Confidence as a percentage string with the given number of decimals.
#[must_use]
pub fn confidence_percent(confianza: f64, decimals: usize) -> String {
    format!("{:.*}%", decimals, confianza.clamp(0.0, 1.0) * 100.0)
}

/// Latest diagnosis of the logged-in patient (`GET /resultados`).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LatestDiagnosis {
    pub riesgo: RiskLevel,
    #[serde(deserialize_with = "de_number")]
    pub confianza: f64,
    #[serde(default)]
    pub fecha: Option<String>,
}

/// Immediate response of `POST /diagnostico`.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisOutcome {
    pub riesgo: RiskLevel,
    #[serde(deserialize_with = "de_number")]
    pub confianza: f64,
}

/// One row of a patient's diagnostic history.
///
/// The backend returns numeric columns either as JSON numbers or, for
/// decimal columns, as strings; both are accepted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosticRecord {
    pub fecha_diagnostico: String,
    #[serde(deserialize_with = "de_number")]
    pub ps: f64,
    #[serde(deserialize_with = "de_number")]
    pub pd: f64,
    #[serde(deserialize_with = "de_number")]
    pub colesterol: f64,
    #[serde(deserialize_with = "de_number")]
    pub glucosa: f64,
    #[serde(default, deserialize_with = "super::de_nullable_string")]
    pub actividad: String,
    #[serde(deserialize_with = "de_number")]
    pub peso: f64,
    #[serde(deserialize_with = "de_number")]
    pub estatura: f64,
    pub riesgo: RiskLevel,
    #[serde(deserialize_with = "de_number")]
    pub confianza: f64,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub edad: Option<f64>,
    #[serde(default)]
    pub genero: Option<String>,
    #[serde(default)]
    pub fuma: Option<String>,
    #[serde(default)]
    pub alcohol: Option<String>,
    #[serde(default, deserialize_with = "de_opt_number")]
    pub imc: Option<f64>,
}

/// Payload of `POST /diagnostico`.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DiagnosisRequest {
    pub edad: u32,
    pub genero: String,
    pub ps: u32,
    pub pd: u32,
    pub colesterol: f64,
    pub glucosa: f64,
    /// `"s"` or `"n"`
    pub fuma: String,
    /// `"s"` or `"n"`
    pub alcohol: String,
    pub actividad: String,
    pub peso: f64,
    pub estatura: u32,
}

/// Format a measurement without a trailing `.0` for whole numbers.
#[must_use]
pub fn format_measure(value: f64) -> String {
    if value.fract() == 0.0 && value.abs() < 1e15 {
        format!("{}", value as i64)
    } else {
        format!("{value:.1}")
    }
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrString {
    Number(f64),
    Text(String),
}

impl NumberOrString {
    fn into_f64<E: serde::de::Error>(self) -> Result<f64, E> {
        match self {
            Self::Number(n) => Ok(n),
            Self::Text(s) => s
                .trim()
                .parse::<f64>()
                .map_err(|_| E::custom(format!("invalid number: {s:?}"))),
        }
    }
}

fn de_number<'de, D>(deserializer: D) -> Result<f64, D::Error>
where
    D: Deserializer<'de>,
{
    NumberOrString::deserialize(deserializer)?.into_f64()
}

fn de_opt_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<NumberOrString>::deserialize(deserializer)?
        .map(NumberOrString::into_f64)
        .transpose()
}
