use serde::{Deserialize, Serialize};

/// One set of vital signs plus the language the advice should be written in.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthReading {
    /// Body temperature in °C.
    #[serde(rename = "temp")]
    pub temperature: f64,
    /// Pulse rate in BPM.
    pub pulse: f64,
    /// Blood oxygen saturation in percent.
    #[serde(rename = "spO2")]
    pub oxygen_saturation: f64,
    pub language: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct SuggestionResult {
    pub text: String,
}
