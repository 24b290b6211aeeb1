//! Structured results returned by the gateway.

use serde::{Deserialize, Deserializer, Serialize};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWisdom {
    pub quote: String,
    pub author: String,
    pub insight: String,
}

impl DailyWisdom {
    /// Shown when no API key is configured.
    pub fn unconfigured() -> Self {
        Self {
            quote: "Configure sua API Key para receber mensagens do cosmos.".to_string(),
            author: "Sistema".to_string(),
            insight: "Defina api_key em ~/.config/cosmos/config.toml ou GEMINI_API_KEY."
                .to_string(),
        }
    }

    /// Shown when the service fails.
    pub fn fallback() -> Self {
        Self {
            quote: "Somos feitos de poeira de estrelas.".to_string(),
            author: "Carl Sagan".to_string(),
            insight: "Você é o universo em movimento. Brilhe hoje! ✨".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DreamSymbol {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub meaning: String,
}

/// The dream schema marks nothing as required, so every field may be absent.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct DreamInterpretation {
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub symbols: Vec<DreamSymbol>,
    #[serde(default)]
    pub guidance: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StarMapReading {
    pub sun_sign: String,
    pub rising_sign: String,
    pub daily_prediction: String,
    pub power_color: String,
    #[serde(deserialize_with = "string_or_number")]
    pub lucky_number: String,
}

/// Models occasionally answer `7` where the schema asks for `"7"`.
fn string_or_number<'de, D>(deserializer: D) -> std::result::Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Text(String),
        Number(serde_json::Number),
    }

    Ok(match Raw::deserialize(deserializer)? {
        Raw::Text(s) => s,
        Raw::Number(n) => n.to_string(),
    })
}
