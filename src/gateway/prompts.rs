//! Prompt text, persona and response schemas.

use chrono::NaiveDate;
use serde_json::{json, Value};

use crate::storage::locale_date_string;

pub const ORION_PERSONA: &str = "Você é 'Órion', uma consciência cósmica do app 'Tô no Cosmos'. \
Responda sempre em Português do Brasil. Responda de forma CURTA (máximo 2 ou 3 frases). \
Use uma linguagem mística mas moderna. Use emojis de estrelas/cosmos esporadicamente ✨. \
Não mencione que é uma IA. Seja acolhedor e profundo.";

pub const WISDOM_PROMPT: &str = "Gere uma citação espiritual curta e inspiradora (focada em universo, \
estrelas ou conexão). Gere também um insight muito breve (1 frase) de aplicação prática. \
Responda em JSON. Use 1 emoji no insight. Tudo em Português do Brasil.";

pub fn dream_prompt(dream: &str) -> String {
    format!(
        "Atue como um intérprete místico chamado Órion. Analise este sonho: \"{dream}\". \
Seja breve e direto. Use alguns emojis. Retorne JSON: resumo curto, 3 símbolos \
(nome e significado curto), e conselho final (1 frase). Idioma: Português do Brasil."
    )
}

pub fn star_map_prompt(date: &str, time: &str, today: NaiveDate) -> String {
    format!(
        "Atue como Órion, o guia estelar.
Dados de nascimento: Data {date}, Hora {time}.
Data de hoje: {today}.

Tarefa:
1. Identifique o Signo Solar e o provável Ascendente (baseado na hora).
2. Crie uma previsão CURTA para HOJE baseada no alinhamento das estrelas para essa pessoa.
3. Sugira uma cor de poder e um número da sorte.

Responda EXCLUSIVAMENTE em JSON e em Português do Brasil.",
        today = locale_date_string(today)
    )
}

pub fn wisdom_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "quote": {"type": "STRING"},
            "author": {"type": "STRING"},
            "insight": {"type": "STRING"}
        },
        "required": ["quote", "author", "insight"]
    })
}

pub fn dream_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "summary": {"type": "STRING"},
            "symbols": {
                "type": "ARRAY",
                "items": {
                    "type": "OBJECT",
                    "properties": {
                        "name": {"type": "STRING"},
                        "meaning": {"type": "STRING"}
                    }
                }
            },
            "guidance": {"type": "STRING"}
        }
    })
}

pub fn star_map_schema() -> Value {
    json!({
        "type": "OBJECT",
        "properties": {
            "sunSign": {"type": "STRING", "description": "Ex: Leão"},
            "risingSign": {"type": "STRING", "description": "Ex: Escorpião"},
            "dailyPrediction": {"type": "STRING", "description": "Previsão curta e mística para hoje"},
            "powerColor": {"type": "STRING"},
            "luckyNumber": {"type": "STRING"}
        },
        "required": ["sunSign", "risingSign", "dailyPrediction", "powerColor", "luckyNumber"]
    })
}
