//! Comment extraction, classification and flattening.
//!
//! Stash has no flat comment listing for pull requests. Comments are read
//! from the activity feed, where each `COMMENTED` entry holds a top-level
//! comment and its reply tree. The normalized model wants a flat list where
//! every comment says what it is attached to.
//!
//! Only the first level of replies is flattened. Replies to replies are not
//! emitted; whether Stash produces them in practice is unknown.

use tracing::debug;

use crate::stash::api::{
    ActivityEntry, ApiActivityPage, ApiComment, ApiCommentActivity, ApiCommentAnchor,
    COMMENTED_ACTION,
};
use crate::stash::models::{CodeCommentMetadata, Comment, CommentMetadata, ReplyCommentMetadata};

use super::timestamp_from_millis;

/// Keeps the comment entries of an activity feed, in feed order.
///
/// Non-comment entries are dropped without error. Entries built by hand as
/// [`ActivityEntry::Commented`] must still carry the `COMMENTED` action.
#[must_use]
pub fn extract_comments(feed: Vec<ActivityEntry>) -> Vec<ApiCommentActivity> {
    feed.into_iter()
        .filter_map(ActivityEntry::into_comment)
        .filter(|activity| activity.action == COMMENTED_ACTION)
        .collect()
}

/// Flattens comment activities into an ordered comment list.
///
/// Each top-level comment is emitted first, classified by its anchor, and is
/// followed by its direct replies in their original order.
#[must_use]
pub fn flatten_comments(activities: Vec<ApiCommentActivity>) -> Vec<Comment> {
    let mut flattened = Vec::with_capacity(activities.len());

    for activity in activities {
        let mut top_level = activity.comment;
        let replies = std::mem::take(&mut top_level.comments);
        let parent_id = top_level.id;

        flattened.push(normalize_comment(
            top_level,
            0,
            activity.comment_anchor.as_ref(),
        ));

        for reply in replies {
            if !reply.comments.is_empty() {
                debug!(
                    comment_id = reply.id,
                    nested = reply.comments.len(),
                    "nested replies are not flattened"
                );
            }
            flattened.push(normalize_comment(reply, parent_id, None));
        }
    }

    flattened
}

/// Extracts and flattens the comments of one activity page.
#[must_use]
pub fn normalize_activity_comments(page: ApiActivityPage) -> Vec<Comment> {
    flatten_comments(extract_comments(page.values))
}

/// Chooses the metadata for a comment.
///
/// A nonzero `parent_id` always wins, so a reply carrying anchor data is
/// still a reply. Otherwise an anchor with a path makes a code comment, and
/// anything else is general.
#[must_use]
pub fn classify_comment(parent_id: u64, anchor: Option<&ApiCommentAnchor>) -> CommentMetadata {
    if parent_id != 0 {
        return CommentMetadata::Reply(ReplyCommentMetadata { parent_id });
    }

    match anchor {
        Some(anchor) if !anchor.path.is_empty() => CommentMetadata::Code(CodeCommentMetadata {
            path: anchor.path.clone(),
            line: anchor.line,
            line_span: 1,
            source_sha: anchor.from_hash.clone(),
            merge_base_sha: anchor.to_hash.clone(),
        }),
        Some(_) | None => CommentMetadata::General,
    }
}

/// Normalizes a single comment, ignoring its nested replies.
#[must_use]
pub fn normalize_comment(
    from: ApiComment,
    parent_id: u64,
    anchor: Option<&ApiCommentAnchor>,
) -> Comment {
    Comment {
        id: from.id,
        body: from.text,
        author: from.author.into(),
        created: timestamp_from_millis(from.created_date),
        updated: timestamp_from_millis(from.updated_date),
        metadata: classify_comment(parent_id, anchor),
    }
}
