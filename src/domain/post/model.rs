//! Post domain entity

use serde::{Deserialize, Serialize};
use validator::Validate;

use crate::shared::validations::not_blank;

/// Server-assigned post identifier
pub type PostId = i64;

/// A post as stored by the remote resource
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    /// Owning user on the remote side. Not shown or edited, only carried through.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    pub id: PostId,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(id: PostId, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            user_id: None,
            id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Copy of this post with title and body replaced, id kept.
    pub fn with_changes(&self, title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            user_id: self.user_id,
            id: self.id,
            title: title.into(),
            body: body.into(),
        }
    }

    /// Whether title and body match the given draft
    pub fn matches_draft(&self, draft: &PostDraft) -> bool {
        self.title == draft.title && self.body == draft.body
    }
}

impl std::fmt::Display for Post {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "#{} {}", self.id, self.title)
    }
}

/// Content for a post that does not exist yet. The id comes from the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, Validate)]
#[serde(rename_all = "camelCase")]
pub struct PostDraft {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub user_id: Option<i64>,
    #[validate(custom(function = "not_blank"))]
    pub title: String,
    #[validate(custom(function = "not_blank"))]
    pub body: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            user_id: None,
            title: title.into(),
            body: body.into(),
        }
    }

    pub fn with_user_id(mut self, user_id: Option<i64>) -> Self {
        self.user_id = user_id;
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn post_deserializes_jsonplaceholder_shape() {
        let json = r#"{"userId":1,"id":7,"title":"magnam facilis","body":"line one\nline two"}"#;
        let post: Post = serde_json::from_str(json).unwrap();

        assert_eq!(post.user_id, Some(1));
        assert_eq!(post.id, 7);
        assert_eq!(post.title, "magnam facilis");
        assert_eq!(post.body, "line one\nline two");
    }

    #[test]
    fn post_without_user_id_omits_it_on_the_wire() {
        let post = Post::new(3, "C", "c");
        let value = serde_json::to_value(&post).unwrap();

        assert_eq!(value, serde_json::json!({"id": 3, "title": "C", "body": "c"}));
    }

    #[test]
    fn with_changes_keeps_identity() {
        let mut post = Post::new(2, "B", "b");
        post.user_id = Some(5);

        let edited = post.with_changes("B2", "b2");

        assert_eq!(edited.id, 2);
        assert_eq!(edited.user_id, Some(5));
        assert_eq!(edited.title, "B2");
        assert_eq!(edited.body, "b2");
    }

    #[test]
    fn draft_requires_both_fields() {
        assert!(PostDraft::new("Title", "Body").validate().is_ok());

        let errors = PostDraft::new("  ", "Body").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("title"));

        let errors = PostDraft::new("Title", "").validate().unwrap_err();
        assert!(errors.field_errors().contains_key("body"));
    }
}
