//! Message windowing: keep only the most recent N messages.

use crate::core::models::Message;

/// Returns the last `n` messages in their original chronological order,
/// or all of them when there are `n` or fewer.
#[must_use]
pub fn last_n(messages: &[Message], n: usize) -> &[Message] {
    let start = messages.len().saturating_sub(n);
    &messages[start..]
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::models::Role;
    use chrono::{TimeZone, Utc};
    use uuid::Uuid;

    fn messages(count: usize) -> Vec<Message> {
        (0..count)
            .map(|i| Message {
                id: Uuid::from_u128(i as u128),
                user_id: Uuid::from_u128(500),
                content: format!("m{i}"),
                role: Role::User,
                created_at: Utc.timestamp_opt(1_700_000_000 + i as i64, 0).unwrap(),
            })
            .collect()
    }

    #[test]
    fn window_keeps_most_recent_in_order() {
        let all = messages(20);
        let windowed = last_n(&all, 10);

        assert_eq!(windowed.len(), 10);
        assert_eq!(windowed[0].content, "m10");
        assert_eq!(windowed[9].content, "m19");
    }

    #[test]
    fn window_returns_everything_when_under_limit() {
        let all = messages(5);
        let windowed = last_n(&all, 10);

        assert_eq!(windowed.len(), 5);
        assert_eq!(windowed[0].content, "m0");
        assert_eq!(windowed[4].content, "m4");
    }

    #[test]
    fn window_of_zero_is_empty() {
        let all = messages(3);
        assert!(last_n(&all, 0).is_empty());
    }
}
