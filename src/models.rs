use chrono::{DateTime, Utc};
use serde::Serialize;
use sqlx::FromRow;
use uuid::Uuid;

/// What a reply's text becomes when its author deletes it. The row itself
/// is kept so the reply's id and timestamp stay visible in thread views.
pub const DELETED_TEXT: &str = "[deleted]";

/// A thread row as stored.
///
/// Deliberately not `Serialize`: `delete_password` and `reported` must
/// never appear in a response, so stored rows cannot be sent to a client
/// directly. Only the view structs below are serializable.
#[derive(Debug, Clone, FromRow)]
pub struct Thread {
    pub id: Uuid,
    /// The board this thread was posted on, lower-cased.
    pub board: String,
    pub text: String,
    pub delete_password: String,
    pub reported: bool,
    pub created_on: DateTime<Utc>,
    /// Equals `created_on` of the most recent reply, or the thread's own
    /// `created_on` while it has no replies.
    pub bumped_on: DateTime<Utc>,
    /// Maintained incrementally: +1 per reply, -1 (floored at zero) per
    /// reply deletion.
    pub reply_count: i32,
}

/// A reply row as stored. Not `Serialize`, same as [`Thread`].
#[derive(Debug, Clone, FromRow)]
pub struct Reply {
    pub id: Uuid,
    pub thread_id: Uuid,
    pub text: String,
    pub delete_password: String,
    pub reported: bool,
    pub created_on: DateTime<Utc>,
}

/// The client-visible shape of a reply.
#[derive(Debug, Serialize)]
pub struct ReplyView {
    pub id: Uuid,
    pub text: String,
    pub created_on: DateTime<Utc>,
}

impl ReplyView {
    pub fn project(reply: &Reply) -> ReplyView {
        ReplyView {
            id: reply.id,
            text: reply.text.clone(),
            created_on: reply.created_on,
        }
    }
}

/// The client-visible shape of a thread.
///
/// `replycount` is always the maintained total, independent of how many
/// replies the caller was handed (the board listing truncates to the most
/// recent few, the single-thread view carries them all).
#[derive(Debug, Serialize)]
pub struct ThreadView {
    pub id: Uuid,
    pub text: String,
    pub created_on: DateTime<Utc>,
    pub bumped_on: DateTime<Utc>,
    #[serde(rename = "replycount")]
    pub reply_count: i32,
    pub replies: Vec<ReplyView>,
}

impl ThreadView {
    pub fn project(thread: &Thread, replies: &[Reply]) -> ThreadView {
        ThreadView {
            id: thread.id,
            text: thread.text.clone(),
            created_on: thread.created_on,
            bumped_on: thread.bumped_on,
            reply_count: thread.reply_count,
            replies: replies.iter().map(ReplyView::project).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_thread() -> Thread {
        Thread {
            id: Uuid::new_v4(),
            board: "general".to_string(),
            text: "hello".to_string(),
            delete_password: "hunter2".to_string(),
            reported: true,
            created_on: Utc::now(),
            bumped_on: Utc::now(),
            reply_count: 5,
        }
    }

    fn sample_reply(thread_id: Uuid) -> Reply {
        Reply {
            id: Uuid::new_v4(),
            thread_id,
            text: "a reply".to_string(),
            delete_password: "swordfish".to_string(),
            reported: true,
            created_on: Utc::now(),
        }
    }

    #[test]
    fn thread_view_hides_password_and_report_flag() {
        let thread = sample_thread();
        let replies = vec![sample_reply(thread.id)];
        let value =
            serde_json::to_value(ThreadView::project(&thread, &replies)).unwrap();

        let obj = value.as_object().unwrap();
        assert!(!obj.contains_key("delete_password"));
        assert!(!obj.contains_key("reported"));

        let reply_obj = value["replies"][0].as_object().unwrap();
        assert!(!reply_obj.contains_key("delete_password"));
        assert!(!reply_obj.contains_key("reported"));
    }

    #[test]
    fn thread_view_reports_total_count_not_slice_length() {
        let thread = sample_thread();
        let replies = vec![sample_reply(thread.id)];
        let view = ThreadView::project(&thread, &replies);

        assert_eq!(view.reply_count, 5);
        assert_eq!(view.replies.len(), 1);

        let value = serde_json::to_value(view).unwrap();
        assert_eq!(value["replycount"], 5);
    }

    #[test]
    fn reply_view_preserves_id_and_timestamp() {
        let reply = sample_reply(Uuid::new_v4());
        let view = ReplyView::project(&reply);
        assert_eq!(view.id, reply.id);
        assert_eq!(view.created_on, reply.created_on);
        assert_eq!(view.text, "a reply");
    }
}
