//! Form field descriptions shared by both flows

use domain::catalog::Catalog;
use serde::Serialize;
use serde_json::Value;

/// Input widget of a form field
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum FieldKind {
    /// Pick one of `(value, label)` pairs
    Select { options: Vec<(String, String)> },
    /// On/off switch
    Boolean,
    /// Bounded number
    Number { min: f64, max: f64, step: f64 },
    /// Free text, hidden when `secret`
    Text { secret: bool, multiline: bool },
}

/// One field of a form
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct FormField {
    pub key: &'static str,
    pub kind: FieldKind,
    pub required: bool,
    /// Pre-filled value
    pub default: Option<Value>,
}

impl FormField {
    pub(crate) fn optional(key: &'static str, kind: FieldKind, default: Value) -> Self {
        Self {
            key,
            kind,
            required: false,
            default: Some(default),
        }
    }

    /// Select field over identifiers whose label is the identifier itself
    pub(crate) fn plain_select<I, T>(key: &'static str, values: I, default: Value) -> Self
    where
        I: IntoIterator<Item = T>,
        T: ToString,
    {
        Self::optional(
            key,
            FieldKind::Select {
                options: values
                    .into_iter()
                    .map(|v| (v.to_string(), v.to_string()))
                    .collect(),
            },
            default,
        )
    }

    /// Select field over a labelled catalog
    pub(crate) fn catalog_select(key: &'static str, catalog: Catalog, default: Value) -> Self {
        Self::optional(
            key,
            FieldKind::Select {
                options: catalog
                    .iter()
                    .map(|(value, label)| (value.to_string(), label.to_string()))
                    .collect(),
            },
            default,
        )
    }

    /// Whether `value` is acceptable for this field
    pub fn accepts(&self, value: &Value) -> bool {
        match &self.kind {
            FieldKind::Select { options } => {
                let candidate = match value {
                    Value::String(s) => s.clone(),
                    Value::Number(n) => n.to_string(),
                    _ => return false,
                };
                options.iter().any(|(v, _)| *v == candidate)
            },
            FieldKind::Boolean => value.is_boolean(),
            FieldKind::Number { min, max, .. } => value
                .as_f64()
                .is_some_and(|n| (*min..=*max).contains(&n)),
            FieldKind::Text { .. } => value.is_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::*;

    #[test]
    fn select_accepts_listed_values_only() {
        let field = FormField::plain_select("pace", &["slow", "fast"], json!("slow"));
        assert!(field.accepts(&json!("fast")));
        assert!(!field.accepts(&json!("warp")));
        assert!(!field.accepts(&json!(true)));
    }

    #[test]
    fn numeric_select_matches_number_values() {
        let field = FormField::plain_select("stt_sample_rate", &["8000", "16000"], json!(16000));
        assert!(field.accepts(&json!(8000)));
        assert!(!field.accepts(&json!(44100)));
    }

    #[test]
    fn number_respects_bounds() {
        let field = FormField::optional(
            "conversation_temperature",
            FieldKind::Number {
                min: 0.0,
                max: 2.0,
                step: 0.1,
            },
            json!(0.7),
        );
        assert!(field.accepts(&json!(1.5)));
        assert!(!field.accepts(&json!(2.5)));
        assert!(!field.accepts(&json!("1.0")));
    }
}
