//! Forum posts and comments.
//!
//! The backend stores a post as a single `content` field. Posts created by
//! this client encode a title and body into it as `"{title}\n\n{body}"`;
//! older posts may use a single newline or have no title at all.
//! [`PostDraft`] is the explicit two-field form and owns that codec.

use serde::{Deserialize, Serialize};

use super::lenient::{bool_or_false, count_lenient, string_or_empty, vec_or_empty};

/// Separator between title and body in the stored content.
pub const TITLE_SEPARATOR: &str = "\n\n";

/// Longest title shown, in characters.
pub const MAX_TITLE_CHARS: usize = 80;

/// Author shown when the backend does not name one.
pub const UNKNOWN_AUTHOR: &str = "Unknown";

/// A post title and body, before they are packed into one content field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PostDraft {
    pub title: String,
    pub body: String,
}

impl PostDraft {
    pub fn new(title: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            title: title.into(),
            body: body.into(),
        }
    }

    /// Pack into the single content field the backend stores.
    ///
    /// A blank title stores a single-line body alone. A multi-line body
    /// keeps a leading separator so its first line is not decoded as the
    /// title.
    pub fn encode(&self) -> String {
        if self.title.trim().is_empty() {
            if self.body.contains('\n') {
                format!("{TITLE_SEPARATOR}{}", self.body)
            } else {
                self.body.clone()
            }
        } else {
            format!("{}{TITLE_SEPARATOR}{}", self.title, self.body)
        }
    }

    /// Unpack stored content, tolerating legacy layouts:
    /// 1. `title\n\nbody`
    /// 2. `title\nbody`
    /// 3. a single line, used as both title and body
    ///
    /// The title is truncated to [`MAX_TITLE_CHARS`] characters.
    pub fn decode(content: &str) -> Self {
        let (title, body) = if let Some(idx) = content.find(TITLE_SEPARATOR) {
            (&content[..idx], &content[idx + TITLE_SEPARATOR.len()..])
        } else if let Some(idx) = content.find('\n') {
            (&content[..idx], &content[idx + 1..])
        } else {
            (content, content)
        };

        Self {
            title: truncate_chars(title, MAX_TITLE_CHARS),
            body: body.to_string(),
        }
    }

    /// Same title, new body. Used when editing a post.
    pub fn with_body(&self, body: impl Into<String>) -> Self {
        Self {
            title: self.title.clone(),
            body: body.into(),
        }
    }
}

fn truncate_chars(s: &str, max: usize) -> String {
    match s.char_indices().nth(max) {
        Some((idx, _)) => s[..idx].to_string(),
        None => s.to_string(),
    }
}

// ── Wire records ────────────────────────────────────────────────────

/// A post exactly as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForumPost {
    pub id: i64,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub content: String,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default, deserialize_with = "count_lenient")]
    pub like_count: u64,

    #[serde(default, deserialize_with = "bool_or_false")]
    pub liked_by_current_user: bool,

    #[serde(default, deserialize_with = "bool_or_false")]
    pub editable: bool,

    #[serde(default, deserialize_with = "vec_or_empty")]
    pub comments: Vec<RawForumComment>,
}

/// A comment exactly as the backend returns it.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RawForumComment {
    pub id: i64,

    #[serde(default)]
    pub author: Option<String>,

    #[serde(default, deserialize_with = "string_or_empty")]
    pub content: String,

    #[serde(default)]
    pub created_at: Option<String>,

    #[serde(default)]
    pub updated_at: Option<String>,

    #[serde(default, deserialize_with = "count_lenient")]
    pub like_count: u64,

    #[serde(default, deserialize_with = "bool_or_false")]
    pub liked_by_current_user: bool,

    #[serde(default, deserialize_with = "bool_or_false")]
    pub editable: bool,
}

// ── Display records ─────────────────────────────────────────────────

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumComment {
    pub id: i64,
    pub author: String,
    pub content: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub likes: u64,
    pub liked: bool,
    pub editable: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForumPost {
    pub id: i64,
    pub title: String,
    pub body: String,
    pub author: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
    pub likes: u64,
    pub liked: bool,
    pub editable: bool,
    pub comments: Vec<ForumComment>,
}

impl ForumPost {
    /// The title/body pair, for re-encoding after an edit.
    pub fn draft(&self) -> PostDraft {
        PostDraft::new(self.title.clone(), self.body.clone())
    }
}

fn author_or_unknown(author: Option<String>) -> String {
    author
        .filter(|a| !a.trim().is_empty())
        .unwrap_or_else(|| UNKNOWN_AUTHOR.to_string())
}

impl From<RawForumComment> for ForumComment {
    fn from(raw: RawForumComment) -> Self {
        Self {
            id: raw.id,
            author: author_or_unknown(raw.author),
            content: raw.content,
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            likes: raw.like_count,
            liked: raw.liked_by_current_user,
            editable: raw.editable,
        }
    }
}

impl From<RawForumPost> for ForumPost {
    fn from(raw: RawForumPost) -> Self {
        let PostDraft { title, body } = PostDraft::decode(&raw.content);
        Self {
            id: raw.id,
            title,
            body,
            author: author_or_unknown(raw.author),
            created_at: raw.created_at,
            updated_at: raw.updated_at,
            likes: raw.like_count,
            liked: raw.liked_by_current_user,
            editable: raw.editable,
            comments: raw.comments.into_iter().map(ForumComment::from).collect(),
        }
    }
}
