//! Tool selection: free text in, validated invocation out.

use mcp::ToolDescriptor;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::{Error, Result};
use crate::llm::Client;
use crate::schema::validate_weather_parameters;

/// Low temperature: selection favors determinism over fluency.
const SELECTION_TEMPERATURE: f32 = 0.1;
const SELECTION_MAX_TOKENS: u32 = 500;

const SELECTION_SYSTEM_PROMPT: &str =
    "Sen bir hava durumu asistanısın. Sadece JSON formatında yanıt ver.";

/// The contract object handed from selection through the invoker to the
/// tool server. Immutable once validated.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ToolInvocation {
    #[serde(rename = "toolName")]
    pub tool_name: String,
    pub parameters: Value,
}

/// Ask the model to choose and parameterize a tool call for `question`.
///
/// The model response is parsed strictly: no content is
/// [`Error::ResponseEmpty`], unparseable content is
/// [`Error::ResponseNotJson`], and parameters that do not satisfy the
/// weather schema are [`Error::SchemaValidation`]. There is no repair
/// loop; a malformed response fails the request.
pub async fn select_tool(
    llm: &Client,
    tools: &[ToolDescriptor],
    question: &str,
) -> Result<ToolInvocation> {
    let today = chrono::Local::now().format("%Y-%m-%d").to_string();
    let prompt = build_selection_prompt(question, &today, tools);

    let content = llm
        .complete(
            SELECTION_SYSTEM_PROMPT,
            &prompt,
            SELECTION_TEMPERATURE,
            SELECTION_MAX_TOKENS,
        )
        .await?;

    let invocation: ToolInvocation = serde_json::from_str(content.trim())
        .map_err(|err| Error::ResponseNotJson(err.to_string()))?;

    validate_weather_parameters(&invocation.parameters)?;

    tracing::info!(tool = %invocation.tool_name, "tool selected");
    Ok(invocation)
}

fn build_selection_prompt(question: &str, today: &str, tools: &[ToolDescriptor]) -> String {
    let catalog = tools
        .iter()
        .map(|tool| {
            format!(
                "- {}: {}",
                tool.name,
                tool.description.as_deref().unwrap_or("(açıklama yok)")
            )
        })
        .collect::<Vec<_>>()
        .join("\n");

    format!(
        r#"Kullanıcının sorusunu analiz et ve uygun aracı seç.

Mevcut araçlar:
{catalog}

Bugünün tarihi: {today}

Kullanıcı sorusu: "{question}"

Yanıtını şu JSON formatında ver:
{{
    "toolName": "get_weather_by_date",
    "parameters": {{
        "city": "şehir adı",
        "country": "ülke kodu (opsiyonel)",
        "date": "YYYY-MM-DD formatında tarih"
    }}
}}

Önemli:
- Tarihi mutlaka YYYY-MM-DD formatına çevir
- Şehir adını Türkçe olarak kullan
- Ülke kodu varsa ekle (TR, US, DE gibi)
- Sadece JSON formatında yanıt ver, başka açıklama ekleme"#
    )
}
