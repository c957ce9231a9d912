use posts_shared::PostPayload;

/// Caller-supplied post fields, stripped of everything the server assigns.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PostDraft {
    pub title: String,
    pub excerpt: Option<String>,
    pub content: String,
    pub author: String,
    pub published: bool,
    /// `None` means "no opinion": creation attaches nothing, update keeps the current tags.
    pub tags: Option<Vec<String>>,
}

impl From<PostPayload> for PostDraft {
    fn from(payload: PostPayload) -> Self {
        Self {
            title: payload.title,
            excerpt: payload.excerpt,
            content: payload.content,
            author: payload.author,
            published: payload.is_published,
            tags: payload.tags,
        }
    }
}

/// Trim tag names, drop blank ones and repeats. First occurrence wins.
pub fn normalize_tag_names(names: &[String]) -> Vec<String> {
    let mut out: Vec<String> = Vec::with_capacity(names.len());
    for name in names {
        let trimmed = name.trim();
        if trimmed.is_empty() || out.iter().any(|n| n == trimmed) {
            continue;
        }
        out.push(trimmed.to_string());
    }
    out
}
