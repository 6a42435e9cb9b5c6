use serde::{Deserialize, Serialize};
use serde_json::Value;

/// A timed span of transcript text. Offsets are in seconds.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TranscriptSegment {
    pub text: String,
    pub start: f64,
    pub duration: f64,
}

impl TranscriptSegment {
    pub fn new(text: impl Into<String>, start: f64, duration: f64) -> Self {
        Self {
            text: text.into(),
            start,
            duration,
        }
    }

    pub fn end(&self) -> f64 {
        self.start + self.duration
    }
}

/// Candidate segment from an untrusted source. Any field may be missing or
/// hold an unexpected JSON type; numeric fields also accept numeric strings.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawSegment {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub text: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub start: Option<Value>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub duration: Option<Value>,
}

impl RawSegment {
    pub fn text(&self) -> String {
        match &self.text {
            Some(Value::String(s)) => s.clone(),
            Some(Value::Number(n)) => n.to_string(),
            Some(Value::Bool(b)) => b.to_string(),
            _ => String::new(),
        }
    }

    pub fn start(&self) -> Option<f64> {
        self.start.as_ref().and_then(finite_number)
    }

    pub fn duration(&self) -> Option<f64> {
        self.duration.as_ref().and_then(finite_number)
    }

    /// Converts to a typed segment when both offsets are finite numbers.
    /// Sign checks are left to the segment filter.
    pub fn to_segment(&self) -> Option<TranscriptSegment> {
        Some(TranscriptSegment {
            text: self.text(),
            start: self.start()?,
            duration: self.duration()?,
        })
    }
}

impl From<&TranscriptSegment> for RawSegment {
    fn from(segment: &TranscriptSegment) -> Self {
        Self {
            text: Some(Value::from(segment.text.clone())),
            start: Some(Value::from(segment.start)),
            duration: Some(Value::from(segment.duration)),
        }
    }
}

/// Reads a candidate out of any JSON value. Non-objects become an empty
/// candidate, which the segment filter always drops.
impl From<&Value> for RawSegment {
    fn from(value: &Value) -> Self {
        let field = |name: &str| value.get(name).filter(|v| !v.is_null()).cloned();
        Self {
            text: field("text"),
            start: field("start"),
            duration: field("duration"),
        }
    }
}

fn finite_number(value: &Value) -> Option<f64> {
    let n = match value {
        Value::Number(n) => n.as_f64()?,
        Value::String(s) => s.trim().parse::<f64>().ok()?,
        _ => return None,
    };
    n.is_finite().then_some(n)
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Transcript {
    pub segments: Vec<TranscriptSegment>,
    pub full_text: String,
}

/// Summary of one chunk, labelled with its time range.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SummaryResult {
    pub time: String,
    pub summary: String,
}
