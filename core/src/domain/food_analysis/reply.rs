use std::sync::LazyLock;

use regex::Regex;
use serde_json::Value;

use crate::domain::{
    common::{entities::app_errors::CoreError, truncate_chars},
    food_analysis::entities::AnalysisReply,
};

const RAW_LOG_LIMIT: usize = 500;

/// Opening fence with an optional language tag such as `json` or `javascript`.
static LEADING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^```[\w+-]*\s*").expect("valid regex"));
static TRAILING_FENCE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*```$").expect("valid regex"));

/// Removes markdown code fences the model sometimes wraps its JSON in.
pub fn strip_code_fences(text: &str) -> String {
    let text = text.trim();
    let text = LEADING_FENCE.replace(text, "");
    let text = TRAILING_FENCE.replace(&text, "");
    text.trim().to_string()
}

/// Turns the model's text reply into a typed reply.
pub fn decode_reply(raw: &str) -> Result<AnalysisReply, CoreError> {
    let cleaned = strip_code_fences(raw);

    let value: Value = serde_json::from_str(&cleaned).map_err(|e| {
        tracing::error!(
            error = %e,
            raw = %truncate_chars(&cleaned, RAW_LOG_LIMIT),
            "failed to parse AI response"
        );
        CoreError::UnexpectedFormat
    })?;

    AnalysisReply::from_value(value).inspect_err(|e| {
        if let CoreError::InvalidResultSchema(reason) = e {
            tracing::error!(
                reason = %reason,
                raw = %truncate_chars(&cleaned, RAW_LOG_LIMIT),
                "AI response does not match the result schema"
            );
        }
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::food_analysis::entities::AnalysisError;

    const BODY: &str = r#"{"foods":[{"name":"Apple","estimated_portion":"1 medium","calories":95,"protein_g":0.5,"carbs_g":25,"fat_g":0.3,"fiber_g":4.4}],"total_nutrition":{"calories":95,"protein_g":0.5,"carbs_g":25,"fat_g":0.3,"fiber_g":4.4},"confidence_score":0.9,"analysis_summary":"A single apple."}"#;

    #[test]
    fn strips_tagged_and_untagged_fences() {
        assert_eq!(strip_code_fences("```json\n{\"a\":1}\n```"), r#"{"a":1}"#);
        assert_eq!(strip_code_fences("```JSON {\"a\":1}```"), r#"{"a":1}"#);
        assert_eq!(strip_code_fences("```\n{\"a\":1}\n```\n"), r#"{"a":1}"#);
        assert_eq!(strip_code_fences("  {\"a\":1}  "), r#"{"a":1}"#);
    }

    #[test]
    fn strips_fences_with_any_language_tag() {
        assert_eq!(strip_code_fences("```javascript\n{\"a\":1}\n```"), r#"{"a":1}"#);
        assert_eq!(strip_code_fences("```jsonc\n{\"a\":1}\n```"), r#"{"a":1}"#);
        assert_eq!(strip_code_fences("```c++ {\"a\":1}```"), r#"{"a":1}"#);
    }

    #[test]
    fn refusal_decodes_under_non_json_tags() {
        for tag in ["javascript", "jsonc", "JSON", ""] {
            let reply = decode_reply(&format!("```{tag}\n{{\"error\":\"X\"}}\n```"))
                .expect("tagged refusal");
            assert_eq!(
                reply,
                AnalysisReply::Rejected(AnalysisError {
                    error: "X".to_string()
                }),
                "tag `{tag}`"
            );
        }
    }

    #[test]
    fn fenced_reply_decodes_like_bare_reply() {
        let fenced = format!("```json\n{BODY}\n```");
        let bare = decode_reply(BODY).expect("bare reply");
        let unwrapped = decode_reply(&fenced).expect("fenced reply");
        assert_eq!(bare, unwrapped);
        assert!(matches!(bare, AnalysisReply::Result(ref r) if r.foods.len() == 1));
    }

    #[test]
    fn refusal_is_returned_verbatim() {
        let reply = decode_reply(r#"{"error":"Image does not contain recognizable food"}"#)
            .expect("refusal");
        assert_eq!(
            reply,
            AnalysisReply::Rejected(AnalysisError {
                error: "Image does not contain recognizable food".to_string()
            })
        );
    }

    #[test]
    fn prose_is_unexpected_format() {
        assert_eq!(
            decode_reply("Sure! Here is your analysis: ..."),
            Err(CoreError::UnexpectedFormat)
        );
        assert_eq!(decode_reply(""), Err(CoreError::UnexpectedFormat));
    }
}
