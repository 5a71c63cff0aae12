//! Structured workload estimate produced by the model for an order proposal.

use indexmap::IndexMap;
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Workload, difficulty and test cases for one screen, event or the database.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct WorkItemEstimate {
    #[serde(default, deserialize_with = "string_or_number")]
    pub workload: String,
    #[serde(default, alias = "hourly_rate", deserialize_with = "string_or_number")]
    pub difficulty: String,
    #[serde(default)]
    pub tests: Vec<String>,
}

/// Per-screen and per-event estimates plus a database-level estimate.
///
/// Screens and events keep the order the model listed them in. Keys the
/// model adds beyond these (totals, notes) are carried through in `extra`.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct AiEstimate {
    #[serde(default)]
    pub screens: IndexMap<String, WorkItemEstimate>,
    #[serde(default)]
    pub events: IndexMap<String, WorkItemEstimate>,
    #[serde(default)]
    pub database: Option<WorkItemEstimate>,
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

/// AI output attached to an accepted order: either the structured estimate
/// or whatever free-form text/JSON the caller captured.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum AiResponsePayload {
    Structured(AiEstimate),
    FreeForm(Value),
}

impl<'de> Deserialize<'de> for AiResponsePayload {
    /// Objects carrying `screens` or `events` that fit [`AiEstimate`] are
    /// structured; anything else is kept verbatim.
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let value = Value::deserialize(deserializer)?;
        let has_estimate_keys = value
            .as_object()
            .is_some_and(|o| o.contains_key("screens") || o.contains_key("events"));

        if has_estimate_keys {
            if let Ok(estimate) = serde_json::from_value::<AiEstimate>(value.clone()) {
                return Ok(Self::Structured(estimate));
            }
        }
        Ok(Self::FreeForm(value))
    }
}

impl AiResponsePayload {
    /// Free-form payloads rendered as text for the `raw_response` column.
    pub fn raw_text(&self) -> Option<String> {
        match self {
            Self::Structured(_) => None,
            Self::FreeForm(Value::String(s)) => Some(s.clone()),
            Self::FreeForm(other) => Some(other.to_string()),
        }
    }
}

fn string_or_number<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    match Value::deserialize(deserializer)? {
        Value::String(s) => Ok(s),
        Value::Null => Ok(String::new()),
        other => Ok(other.to_string()),
    }
}

/// Pull the JSON object out of a model reply: a fenced ```json block when
/// present, otherwise the outermost `{ ... }` span.
pub fn extract_json_block(text: &str) -> Option<&str> {
    if let Some(start) = text.find("```json") {
        let body = &text[start + "```json".len()..];
        if let Some(end) = body.find("```") {
            return Some(body[..end].trim());
        }
    }

    let start = text.find('{')?;
    let end = text.rfind('}')?;
    (end > start).then(|| &text[start..=end])
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn hourly_rate_is_accepted_as_difficulty() {
        let item: WorkItemEstimate = serde_json::from_value(json!({
            "workload": 3,
            "hourly_rate": "時給:5000円",
            "tests": ["ログイン成功", "ログイン失敗"]
        }))
        .unwrap();
        assert_eq!(item.workload, "3");
        assert_eq!(item.difficulty, "時給:5000円");
        assert_eq!(item.tests.len(), 2);
    }

    #[test]
    fn payload_prefers_structured_shape() {
        let structured: AiResponsePayload = serde_json::from_value(json!({
            "screens": {"ログイン": {"workload": "2 日"}},
            "events": {}
        }))
        .unwrap();
        assert!(matches!(structured, AiResponsePayload::Structured(_)));
        assert!(structured.raw_text().is_none());

        let free: AiResponsePayload = serde_json::from_value(json!("全体で20人日")).unwrap();
        assert_eq!(free.raw_text().as_deref(), Some("全体で20人日"));

        let other: AiResponsePayload =
            serde_json::from_value(json!({"summary": "ok"})).unwrap();
        assert!(matches!(other, AiResponsePayload::FreeForm(_)));
    }

    #[test]
    fn estimate_keeps_model_order_and_extra_keys() {
        let estimate: AiEstimate = serde_json::from_value(json!({
            "screens": {"一覧": {"workload": "1"}, "ログイン": {"workload": "2"}},
            "total": "5 日"
        }))
        .unwrap();

        let names: Vec<&str> = estimate.screens.keys().map(String::as_str).collect();
        assert_eq!(names, vec!["一覧", "ログイン"]);
        assert!(estimate.events.is_empty());
        assert_eq!(estimate.extra["total"], "5 日");

        let echoed = serde_json::to_value(&estimate).unwrap();
        assert_eq!(echoed["total"], "5 日");
    }

    #[test]
    fn work_item_without_workload_defaults_to_empty() {
        let item: WorkItemEstimate =
            serde_json::from_value(json!({"difficulty": "高"})).unwrap();
        assert_eq!(item.workload, "");
        assert_eq!(item.difficulty, "高");
    }

    #[test]
    fn extracts_fenced_json() {
        let reply = "見積もりです。\n```json\n{\"screens\": {}}\n```\n以上";
        assert_eq!(extract_json_block(reply), Some("{\"screens\": {}}"));
    }

    #[test]
    fn extracts_bare_json_span() {
        let reply = "結果: {\"events\": {\"a\": 1}} です";
        assert_eq!(extract_json_block(reply), Some("{\"events\": {\"a\": 1}}"));
        assert_eq!(extract_json_block("no json here"), None);
    }
}
