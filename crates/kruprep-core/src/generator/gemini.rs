//! Gemini API client for generating exam questions.
//!
//! One POST per batch against `models/{model}:generateContent`, asking for a
//! strict JSON array; the response text is fence-stripped, parsed, and run
//! through candidate validation. The base URL is swappable so tests can
//! point the client at a local mock server.

use chrono::Utc;
use serde::{Deserialize, Serialize};
use serde_json::Value;

use crate::error::GeneratorError;
use crate::events::Event;
use crate::generator::candidate::{strip_code_fences, validate_candidates, GeneratedQuestion};
use crate::storage::GeneratorConfig;

const DEFAULT_BASE_URL: &str = "https://generativelanguage.googleapis.com";

pub struct GeminiGenerator {
    http: reqwest::Client,
    api_key: String,
    model: String,
    base_url: String,
    batch_size: usize,
}

impl GeminiGenerator {
    /// Builds a client from the generator config. Fails with
    /// [`GeneratorError::MissingApiKey`] when no key resolves from the
    /// config or the `GEMINI_API_KEY` environment variable.
    pub fn new(config: &GeneratorConfig) -> Result<Self, GeneratorError> {
        let api_key = config
            .resolve_api_key()
            .ok_or(GeneratorError::MissingApiKey)?;
        let http = reqwest::Client::builder()
            .timeout(std::time::Duration::from_secs(config.request_timeout_secs))
            .build()?;
        Ok(Self {
            http,
            api_key,
            model: config.model.clone(),
            base_url: DEFAULT_BASE_URL.to_string(),
            batch_size: config.batch_size,
        })
    }

    /// Points the client at a different endpoint root.
    pub fn with_base_url(mut self, base_url: impl Into<String>) -> Self {
        self.base_url = base_url.into();
        self
    }

    /// Questions to request per batch in the review flow.
    pub fn batch_size(&self) -> usize {
        self.batch_size
    }

    /// Requests `count` questions for `category` and validates the response.
    /// A batch where every candidate failed validation comes back empty
    /// rather than as an error; the review flow reports that to the user.
    pub async fn generate(
        &self,
        category: &str,
        count: usize,
    ) -> Result<GeneratedBatch, GeneratorError> {
        let prompt = build_prompt(category, count);
        let request = GenerateContentRequest {
            contents: vec![RequestContent {
                parts: vec![RequestPart { text: &prompt }],
            }],
            generation_config: GenerationConfig {
                response_mime_type: "application/json",
                temperature: if count > 1 { 0.78 } else { 0.65 },
            },
        };
        let url = format!(
            "{}/v1beta/models/{}:generateContent?key={}",
            self.base_url, self.model, self.api_key
        );

        log::debug!("requesting {count} questions for {category}");
        let response = self.http.post(&url).json(&request).send().await?;
        let status = response.status();
        if !status.is_success() {
            let body = response.text().await.unwrap_or_default();
            if body.contains("API key not valid") || body.contains("API_KEY_INVALID") {
                return Err(GeneratorError::InvalidApiKey);
            }
            return Err(GeneratorError::Api {
                status: status.as_u16(),
                message: truncate(&body, 500),
            });
        }

        let payload: GenerateContentResponse = response.json().await?;
        let text = payload
            .candidates
            .into_iter()
            .next()
            .and_then(|c| c.content)
            .and_then(|c| c.parts.into_iter().next())
            .map(|p| p.text)
            .ok_or_else(|| {
                GeneratorError::UnusableResponse("model response contained no text".to_string())
            })?;

        let cleaned = strip_code_fences(&text);
        let parsed: Value = serde_json::from_str(cleaned).map_err(|e| {
            GeneratorError::UnusableResponse(format!(
                "model did not return JSON ({e}); payload starts: {}",
                truncate(cleaned, 200)
            ))
        })?;
        let Value::Array(items) = parsed else {
            return Err(GeneratorError::UnusableResponse(
                "model response was not a JSON array".to_string(),
            ));
        };

        let questions = validate_candidates(items);
        log::info!(
            "generator returned {} usable of {} requested questions for {}",
            questions.len(),
            count,
            category
        );
        Ok(GeneratedBatch {
            category: category.to_string(),
            requested: count,
            questions,
        })
    }
}

/// A validated batch together with the request that produced it.
#[derive(Debug, Clone)]
pub struct GeneratedBatch {
    pub category: String,
    pub requested: usize,
    pub questions: Vec<GeneratedQuestion>,
}

impl GeneratedBatch {
    pub fn is_empty(&self) -> bool {
        self.questions.is_empty()
    }

    pub fn event(&self) -> Event {
        Event::QuestionsGenerated {
            category: self.category.clone(),
            requested: self.requested,
            accepted: self.questions.len(),
            at: Utc::now(),
        }
    }
}

fn build_prompt(category: &str, count: usize) -> String {
    format!(
        r#"คุณเป็น AI ผู้เชี่ยวชาญในการสร้างคำถามสำหรับการสอบใบอนุญาตประกอบวิชาชีพครูในประเทศไทย
โปรดสร้างคำถามปรนัย {count} ข้อ สำหรับหมวดหมู่: "{category}"
แต่ละคำถามควรเป็นปรนัย มี 4 ตัวเลือก โดยมีเพียง 1 ตัวเลือกที่ถูกต้อง
กรุณาให้คำตอบที่ถูกต้องพร้อมคำอธิบายสั้นๆ เกี่ยวกับเหตุผลที่คำตอบนั้นถูกต้อง

โปรดตอบกลับในรูปแบบ JSON array เสมอ (แม้ว่าจะมีเพียงคำถามเดียวหรือไม่มีคำถามเลยก็ตาม)
แต่ละ object ภายใน array นั้น จะต้องมีโครงสร้างดังนี้:
{{
  "question": "คำถามภาษาไทยที่สร้างขึ้น",
  "choices": ["ตัวเลือกที่ 1 (ภาษาไทย)", "ตัวเลือกที่ 2 (ภาษาไทย)", "ตัวเลือกที่ 3 (ภาษาไทย)", "ตัวเลือกที่ 4 (ภาษาไทย)"],
  "answer": "ตัวเลือกที่เป็นคำตอบที่ถูกต้อง (ต้องตรงกับหนึ่งใน choices ทุกประการ)",
  "explanation": "คำอธิบายสำหรับคำตอบที่ถูกต้อง (ภาษาไทย)"
}}

ตัวอย่างเช่น หากคุณสร้าง 2 คำถาม ผลลัพธ์ควรเป็น array ที่มี 2 objects ตามโครงสร้างด้านบน
ถ้าไม่สามารถสร้างคำถามได้เลย ให้ส่งกลับเป็น array ว่าง []
ห้ามใส่ comment หรือข้อความอื่นใดนอกเหนือจาก JSON array ที่ถูกต้อง"#
    )
}

/// Truncates on a char boundary; payload snippets may be Thai text.
fn truncate(text: &str, max: usize) -> String {
    if text.len() <= max {
        return text.to_string();
    }
    let mut end = max;
    while !text.is_char_boundary(end) {
        end -= 1;
    }
    format!("{}...", &text[..end])
}

#[derive(Debug, Serialize)]
struct GenerateContentRequest<'a> {
    contents: Vec<RequestContent<'a>>,
    #[serde(rename = "generationConfig")]
    generation_config: GenerationConfig,
}

#[derive(Debug, Serialize)]
struct RequestContent<'a> {
    parts: Vec<RequestPart<'a>>,
}

#[derive(Debug, Serialize)]
struct RequestPart<'a> {
    text: &'a str,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
struct GenerationConfig {
    response_mime_type: &'static str,
    temperature: f32,
}

#[derive(Debug, Deserialize)]
struct GenerateContentResponse {
    #[serde(default)]
    candidates: Vec<ResponseCandidate>,
}

#[derive(Debug, Deserialize)]
struct ResponseCandidate {
    content: Option<ResponseContent>,
}

#[derive(Debug, Deserialize)]
struct ResponseContent {
    #[serde(default)]
    parts: Vec<ResponsePart>,
}

#[derive(Debug, Deserialize)]
struct ResponsePart {
    #[serde(default)]
    text: String,
}
