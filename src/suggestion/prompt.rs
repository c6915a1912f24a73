use super::types::HealthReading;

/// Renders the assessment prompt. Readings are shown with one decimal digit.
pub fn build_prompt(reading: &HealthReading) -> String {
    format!(
        "A patient has the following health readings:\n\
         - Body Temperature: {:.1}°C\n\
         - Pulse Rate: {:.1} BPM\n\
         - SpO₂ Level: {:.1}%\n\
         \n\
         Based on these values, please provide a health assessment and any recommendations in {}.",
        reading.temperature, reading.pulse, reading.oxygen_saturation, reading.language
    )
}
