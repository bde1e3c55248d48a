use chrono::{DateTime, FixedOffset, Utc};
use tracing::debug;

use crate::timeline::{GroupedBucket, TimelineItem};

pub const UNKNOWN_DATE: &str = "Unknown Date";

/// Formats a millisecond timestamp as `MMM d, yyyy` in the given offset,
/// e.g. `Nov 14, 2023`. Returns `None` for timestamps chrono can't represent.
pub fn format_date_label(timestamp_ms: i64, offset: &FixedOffset) -> Option<String> {
    let utc = DateTime::<Utc>::from_timestamp_millis(timestamp_ms)?;
    Some(utc.with_timezone(offset).format("%b %-d, %Y").to_string())
}

/// Splits a history timeline into titled buckets, one per date label.
///
/// Transactions seen before the first label land in an `Unknown Date`
/// bucket. Input order is kept as-is.
pub fn group_txs_by_date(items: Vec<TimelineItem>, offset: &FixedOffset) -> Vec<GroupedBucket> {
    let mut buckets: Vec<GroupedBucket> = Vec::new();

    for item in items {
        match item {
            TimelineItem::DateLabel { timestamp } => match format_date_label(timestamp, offset) {
                Some(title) => buckets.push(GroupedBucket {
                    title,
                    data: Vec::new(),
                }),
                None => debug!("dropping date label with invalid timestamp {}", timestamp),
            },
            TimelineItem::Label { label } => {
                debug!("ignoring section label {:?} in dated timeline", label);
            }
            TimelineItem::Transaction(group) => match buckets.last_mut() {
                Some(bucket) => bucket.data.push(group),
                None => buckets.push(GroupedBucket {
                    title: UNKNOWN_DATE.to_string(),
                    data: vec![group],
                }),
            },
        }
    }

    buckets
}
