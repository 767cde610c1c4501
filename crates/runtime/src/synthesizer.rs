//! Answer synthesis: structured tool result back into natural language.

use mcp::CallToolResult;

use crate::error::Result;
use crate::llm::Client;

/// Higher temperature than selection: fluency over determinism.
const SYNTHESIS_TEMPERATURE: f32 = 0.7;
const SYNTHESIS_MAX_TOKENS: u32 = 300;

const SYNTHESIS_SYSTEM_PROMPT: &str =
    "Sen bir hava durumu asistanısın. Sadece Türkçe doğal dilde yanıt ver.";

/// Turn the tool result plus the original question into a short answer.
///
/// The output is free text by design; non-emptiness (enforced by the
/// completion client) is the only check applied.
pub async fn synthesize(llm: &Client, question: &str, result: &CallToolResult) -> Result<String> {
    let serialized = serde_json::to_string_pretty(result)?;
    let prompt = build_synthesis_prompt(question, &serialized);

    let answer = llm
        .complete(
            SYNTHESIS_SYSTEM_PROMPT,
            &prompt,
            SYNTHESIS_TEMPERATURE,
            SYNTHESIS_MAX_TOKENS,
        )
        .await?;

    tracing::debug!(chars = answer.len(), "answer synthesized");
    Ok(answer)
}

fn build_synthesis_prompt(question: &str, serialized_result: &str) -> String {
    format!(
        r#"Araçtan gelen teknik veriyi kullanarak, kullanıcının orijinal sorusuna Türkçe doğal dilde yanıt ver.

Kullanıcının orijinal sorusu: "{question}"

Araçtan gelen veri: {serialized_result}

Lütfen:
1. Veriyi anlaşılır Türkçe ile açıkla
2. Sıcaklık, yağış gibi bilgileri kullanıcı dostu şekilde sun
3. Sadece Türkçe yanıt ver, JSON formatında değil
4. Yanıtı kısa ve öz tut"#
    )
}
