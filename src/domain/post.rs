//! Post and Comment Entities

use serde::{Deserialize, Serialize};
use super::entity::Entity;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Post {
    pub id: u32,
    #[serde(default)]
    pub user_id: u32,
    pub title: String,
    pub body: String,
}

impl Post {
    pub fn new(id: u32, title: &str, body: &str) -> Self {
        Self {
            id,
            user_id: 1,
            title: title.to_string(),
            body: body.to_string(),
        }
    }

    /// Preview of the body: the first `limit` characters plus "..." when cut
    pub fn excerpt(&self, limit: usize) -> String {
        match self.body.char_indices().nth(limit) {
            Some((cut, _)) => format!("{}...", &self.body[..cut]),
            None => self.body.clone(),
        }
    }
}

impl Entity for Post {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Comment {
    pub id: u32,
    pub post_id: u32,
    pub name: String,
    pub email: String,
    pub body: String,
}

impl Entity for Comment {
    type Id = u32;

    fn id(&self) -> Self::Id {
        self.id
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_excerpt_cuts_long_bodies() {
        let post = Post::new(1, "t", &"a".repeat(150));
        let excerpt = post.excerpt(100);
        assert_eq!(excerpt.len(), 103);
        assert!(excerpt.ends_with("..."));
    }

    #[test]
    fn test_excerpt_keeps_short_bodies() {
        let post = Post::new(1, "t", "short body");
        assert_eq!(post.excerpt(100), "short body");
        let exact = Post::new(2, "t", &"b".repeat(100));
        assert_eq!(exact.excerpt(100), "b".repeat(100));
    }

    #[test]
    fn test_excerpt_respects_char_boundaries() {
        let post = Post::new(1, "t", "ééééé");
        assert_eq!(post.excerpt(2), "éé...");
    }

    #[test]
    fn test_comment_camel_case_fields() {
        let json = r#"{"postId":5,"id":21,"name":"n","email":"e@x.io","body":"b"}"#;
        let comment: Comment = serde_json::from_str(json).unwrap();
        assert_eq!(comment.post_id, 5);
        assert_eq!(comment.id(), 21);
    }
}
