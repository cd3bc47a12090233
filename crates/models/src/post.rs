use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use validator::{Validate, ValidationError, ValidationErrors};

use crate::errors::ModelError;

/// Namespace prefix used in validation messages, e.g. `request.Content`.
const REQUEST_NAMESPACE: &str = "request";
const REQUIRED: &str = "required";

#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct Post {
    pub id: i64,
    pub content: String,
    #[serde(rename = "createAt")]
    pub created_at: DateTime<Utc>,
}

impl Post {
    pub fn new(id: i64, content: impl Into<String>) -> Self {
        Self { id, content: content.into(), created_at: Utc::now() }
    }
}

/// Body of `POST /posts` and `PATCH /posts/:id`.
#[derive(Clone, Debug, Default, PartialEq, Serialize, Deserialize, Validate)]
pub struct PostInput {
    #[serde(default)]
    #[validate(required, length(min = 5, code = "min"))]
    pub content: Option<String>,
}

impl PostInput {
    pub fn new(content: impl Into<String>) -> Self {
        Self { content: Some(content.into()) }
    }

    /// Run the field rules and hand back the content on success.
    ///
    /// Only the first failure is reported: fields are visited in name order,
    /// rules in declaration order. An empty string counts as missing.
    pub fn check(&self) -> Result<&str, ModelError> {
        if self.content.as_deref() == Some("") {
            return Err(ModelError::Validation(field_message("content", REQUIRED, "")));
        }
        if let Err(errors) = self.validate() {
            return Err(ModelError::Validation(first_failure(&errors)));
        }
        // `required` passed, so the field is present
        Ok(self.content.as_deref().unwrap_or_default())
    }
}

fn first_failure(errors: &ValidationErrors) -> String {
    let mut fields: Vec<(String, &Vec<ValidationError>)> = errors
        .field_errors()
        .into_iter()
        .map(|(field, errs)| (field.to_string(), errs))
        .collect();
    fields.sort_by(|a, b| a.0.cmp(&b.0));

    for (field, errs) in fields {
        if let Some(err) = errs.first() {
            let param = err
                .params
                .get(&*err.code)
                .map(|v| match v {
                    serde_json::Value::String(s) => s.clone(),
                    other => other.to_string(),
                })
                .unwrap_or_default();
            return field_message(&field, &err.code, &param);
        }
    }
    "Field is not valid".to_string()
}

/// Struct-side spelling of a wire field: `content` -> `Content`.
fn struct_field_name(field: &str) -> String {
    let mut chars = field.chars();
    match chars.next() {
        Some(first) => first.to_uppercase().chain(chars).collect(),
        None => String::new(),
    }
}

fn field_message(field: &str, tag: &str, param: &str) -> String {
    format!(
        "Field is not valid {REQUEST_NAMESPACE}.{} : {tag} : {param}",
        struct_field_name(field)
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_serializes_with_create_at_key() {
        let post = Post::new(7, "hello world");
        let json = serde_json::to_value(&post).unwrap();
        assert_eq!(json["id"], 7);
        assert_eq!(json["content"], "hello world");
        assert!(json.get("createAt").is_some());
        assert!(json.get("created_at").is_none());

        let back: Post = serde_json::from_value(json).unwrap();
        assert_eq!(back, post);
    }

    #[test]
    fn check_accepts_five_characters() {
        let input = PostInput::new("abcde");
        assert_eq!(input.check().unwrap(), "abcde");
    }

    #[test]
    fn check_counts_characters_not_bytes() {
        // 4 characters, 8+ bytes
        let input = PostInput::new("👋👋👋👋");
        assert!(input.check().is_err());
        let input = PostInput::new("héllo");
        assert!(input.check().is_ok());
    }

    #[test]
    fn short_content_reports_min_rule() {
        let err = PostInput::new("hi").check().unwrap_err();
        assert_eq!(
            err,
            ModelError::Validation("Field is not valid request.Content : min : 5".into())
        );
    }

    #[test]
    fn missing_content_reports_required_rule() {
        let input: PostInput = serde_json::from_str("{}").unwrap();
        let err = input.check().unwrap_err();
        assert_eq!(err.to_string(), "Field is not valid request.Content : required : ");
    }

    #[test]
    fn empty_content_reports_required_rule() {
        let input: PostInput = serde_json::from_str(r#"{"content":""}"#).unwrap();
        let err = input.check().unwrap_err();
        assert_eq!(err.to_string(), "Field is not valid request.Content : required : ");

        // whitespace is present, so it falls through to the length rule
        let err = PostInput::new("   ").check().unwrap_err();
        assert_eq!(err.to_string(), "Field is not valid request.Content : min : 5");
    }

    #[test]
    fn struct_field_name_capitalizes_first_letter() {
        assert_eq!(struct_field_name("content"), "Content");
        assert_eq!(struct_field_name(""), "");
    }

    #[test]
    fn unknown_fields_are_ignored() {
        let input: PostInput =
            serde_json::from_str(r#"{"content":"long enough","id":99}"#).unwrap();
        assert_eq!(input.check().unwrap(), "long enough");
    }
}
