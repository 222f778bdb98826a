use serde::Deserialize;
use validator::Validate;

use crate::domain::types::CommentText;
use crate::forms::FieldErrors;

#[derive(Debug, Clone, Default, Deserialize, Validate)]
pub struct CommentForm {
    #[serde(default)]
    #[validate(length(max = 255))]
    pub text: String,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CommentFormPayload {
    /// `None` for an empty comment.
    pub text: Option<CommentText>,
}

impl TryFrom<CommentForm> for CommentFormPayload {
    type Error = FieldErrors;

    fn try_from(value: CommentForm) -> Result<Self, Self::Error> {
        value.validate()?;
        if value.text.trim().is_empty() {
            return Ok(Self { text: None });
        }
        let mut errors = FieldErrors::new();
        let text = errors.check("text", CommentText::new(value.text));
        errors.into_result()?;
        Ok(Self { text })
    }
}
