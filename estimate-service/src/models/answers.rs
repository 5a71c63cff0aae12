//! Questionnaire answers keyed by question id.

use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fmt;

/// Mapping of question id to a free-form answer: a string, a list of
/// strings, or any other JSON scalar.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Answers(BTreeMap<String, Value>);

impl Answers {
    pub fn new(map: BTreeMap<String, Value>) -> Self {
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// The answer to `question` when it is a plain string.
    pub fn text(&self, question: &str) -> Option<&str> {
        self.0.get(question).and_then(Value::as_str)
    }

    /// The answer to `question` flattened into individual choices.
    pub fn choices(&self, question: &str) -> Vec<String> {
        self.0.get(question).map(flatten).unwrap_or_default()
    }

    /// Answers that are plain strings, in question order.
    pub fn string_answers(&self) -> impl Iterator<Item = &str> {
        self.0.values().filter_map(Value::as_str)
    }

    /// Every answer flattened to text fragments: strings as-is, list items
    /// individually, anything else via its JSON rendering.
    pub fn text_fragments(&self) -> Vec<String> {
        self.0.values().flat_map(flatten).collect()
    }
}

fn flatten(value: &Value) -> Vec<String> {
    match value {
        Value::String(s) => vec![s.clone()],
        Value::Array(items) => items.iter().map(render_scalar).collect(),
        Value::Null => Vec::new(),
        other => vec![render_scalar(other)],
    }
}

fn render_scalar(value: &Value) -> String {
    match value {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}

/// Renders the answers as a prompt block, one `質問{id}: {answer}` per line.
impl fmt::Display for Answers {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (question, answer) in &self.0 {
            let rendered = match answer {
                Value::Array(_) => flatten(answer).join(", "),
                Value::Null => String::new(),
                other => render_scalar(other),
            };
            writeln!(f, "質問{}: {}", question, rendered)?;
        }
        Ok(())
    }
}

impl FromIterator<(String, Value)> for Answers {
    fn from_iter<I: IntoIterator<Item = (String, Value)>>(iter: I) -> Self {
        Self(iter.into_iter().collect())
    }
}
