use serde::{Deserialize, Deserializer};

/// Accepts a number or a numeric string. Values of flattened env structs
/// reach serde as strings.
pub fn string_to_u64<'de, D: Deserializer<'de>>(deserializer: D) -> Result<u64, D::Error> {
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Raw {
        Number(u64),
        Text(String),
    }

    match Raw::deserialize(deserializer)? {
        Raw::Number(n) => Ok(n),
        Raw::Text(s) => s.trim().parse().map_err(serde::de::Error::custom),
    }
}

/// Treats an empty variable as absent.
pub fn filter_empty<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<String>, D::Error> {
    let value = Option::<String>::deserialize(deserializer)?;
    Ok(value.filter(|s| !s.trim().is_empty()))
}

fn default_groq_api_base() -> String {
    "https://api.groq.com/openai/v1".to_string()
}

fn default_completion_model() -> String {
    "llama3-8b-8192".to_string()
}

fn default_completion_timeout_secs() -> u64 {
    60
}

#[derive(Clone, Deserialize)]
pub struct CompletionEnv {
    pub groq_api_key: String,
    #[serde(default = "default_groq_api_base")]
    pub groq_api_base: String,
    #[serde(default = "default_completion_model")]
    pub completion_model: String,
    #[serde(
        default = "default_completion_timeout_secs",
        deserialize_with = "string_to_u64"
    )]
    pub completion_timeout_secs: u64,
}
