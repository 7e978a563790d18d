//! Unit tests for the Stash translator.

use serde_json::{Value, json};

use crate::stash::api::{ActivityEntry, ApiComment, ApiCommentActivity, ApiCommentAnchor};


/// Builds a raw comment with the given id, text and direct replies.
fn raw_comment(id: u64, text: &str, replies: Vec<ApiComment>) -> ApiComment {
    ApiComment {
        id,
        text: text.to_owned(),
        comments: replies,
        ..ApiComment::default()
    }
}

/// Builds a `COMMENTED` activity around a comment and optional anchor.
fn comment_activity(comment: ApiComment, anchor: Option<ApiCommentAnchor>) -> ActivityEntry {
    ActivityEntry::Commented(Box::new(ApiCommentActivity {
        action: "COMMENTED".to_owned(),
        comment_action: "ADDED".to_owned(),
        comment,
        comment_anchor: anchor,
        ..ApiCommentActivity::default()
    }))
}

/// A code anchor on `path` line `line`.
fn code_anchor(path: &str, line: u32) -> ApiCommentAnchor {
    ApiCommentAnchor {
        from_hash: "src-sha".to_owned(),
        to_hash: "base-sha".to_owned(),
        line,
        line_type: "ADDED".to_owned(),
        file_type: "TO".to_owned(),
        path: path.to_owned(),
        diff_type: "EFFECTIVE".to_owned(),
        orphaned: false,
    }
}

/// A user document as Stash embeds it.
fn user_json(slug: &str, display_name: &str, email: &str) -> Value {
    json!({
        "name": slug,
        "emailAddress": email,
        "id": 1,
        "displayName": display_name,
        "active": true,
        "slug": slug,
        "type": "NORMAL"
    })
}
