use tracing::debug;

use crate::models::TransactionSummary;
use crate::timeline::TimelineItem;

/// Upper bound on how many queued transactions go into one multi-send.
pub const BATCH_LIMIT: usize = 20;

/// Picks the queued transactions that can be executed together right now.
///
/// See [`get_batchable_transactions_capped`]; this uses [`BATCH_LIMIT`].
pub fn get_batchable_transactions(
    items: &[TimelineItem],
    current_nonce: u64,
) -> Vec<TransactionSummary> {
    get_batchable_transactions_capped(items, current_nonce, BATCH_LIMIT)
}

/// Walks the queue group by group, starting at `current_nonce`, and takes
/// the most recently proposed fully-confirmed transaction for each nonce.
///
/// The result is nonce-contiguous: the first group with no executable
/// candidate for the expected nonce ends the scan. Groups that only hold
/// module transactions or nonces below the expected one are stepped over.
/// `limit` is clamped to [`BATCH_LIMIT`].
pub fn get_batchable_transactions_capped(
    items: &[TimelineItem],
    current_nonce: u64,
    limit: usize,
) -> Vec<TransactionSummary> {
    let limit = limit.min(BATCH_LIMIT);
    let mut batch = Vec::new();
    let mut expected = current_nonce;

    for group in items.iter().filter_map(TimelineItem::group) {
        if batch.len() >= limit {
            break;
        }

        let mut candidates: Vec<&TransactionSummary> = group
            .transactions()
            .iter()
            .filter(|tx| tx.multisig_info().is_some())
            .collect();

        if candidates.is_empty() {
            debug!("skipping queue entry without multisig execution info");
            continue;
        }
        if candidates
            .iter()
            .all(|tx| tx.nonce().is_some_and(|nonce| nonce < expected))
        {
            continue;
        }

        candidates.sort_by(|a, b| b.timestamp.cmp(&a.timestamp));

        let picked = candidates.into_iter().find(|tx| {
            tx.multisig_info()
                .is_some_and(|info| info.nonce == expected && info.is_fully_confirmed())
        });

        match picked {
            Some(tx) => {
                batch.push(tx.clone());
                match expected.checked_add(1) {
                    Some(next) => expected = next,
                    None => break,
                }
            }
            None => {
                debug!("no executable transaction for nonce {}, batch ends", expected);
                break;
            }
        }
    }

    batch
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grouping::fixtures::{header, item, item_with, queued, tx};
    use crate::grouping::group_conflicting_txs;
    use crate::models::{
        AddressEx, ConflictType, ExecutionInfo, ModuleExecutionInfo, TransactionListItem,
    };

    fn nonces(batch: &[TransactionSummary]) -> Vec<u64> {
        batch.iter().filter_map(TransactionSummary::nonce).collect()
    }

    #[test]
    fn stops_at_gap() {
        let queue = group_conflicting_txs(&[
            item(queued("a", 5, 2, 2)),
            item(queued("b", 6, 2, 2)),
            item(queued("c", 7, 1, 2)),
            item(queued("d", 8, 2, 2)),
        ]);

        let batch = get_batchable_transactions(&queue, 5);

        assert_eq!(nonces(&batch), vec![5, 6]);
    }

    #[test]
    fn picks_most_recent_conflicting_transaction() {
        let older = TransactionSummary {
            timestamp: 1_000,
            ..queued("older", 3, 2, 2)
        };
        let newer = TransactionSummary {
            timestamp: 2_000,
            ..queued("newer", 3, 2, 2)
        };
        let queue = group_conflicting_txs(&[
            header(3),
            item_with(older, ConflictType::HasNext),
            item_with(newer, ConflictType::End),
        ]);

        let batch = get_batchable_transactions(&queue, 3);

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, "newer");
    }

    #[test]
    fn falls_back_to_older_alternative_when_newer_is_unsigned() {
        let older = TransactionSummary {
            timestamp: 1_000,
            ..queued("older", 3, 2, 2)
        };
        let newer = TransactionSummary {
            timestamp: 2_000,
            ..queued("newer", 3, 0, 2)
        };
        let queue = group_conflicting_txs(&[
            header(3),
            item_with(newer, ConflictType::HasNext),
            item_with(older, ConflictType::End),
        ]);

        let batch = get_batchable_transactions(&queue, 3);

        assert_eq!(batch[0].id, "older");
    }

    #[test]
    fn caps_at_batch_limit() {
        let items: Vec<TransactionListItem> = (0..30u64)
            .map(|nonce| item(queued(&format!("tx{}", nonce), nonce, 1, 1)))
            .collect();
        let queue = group_conflicting_txs(&items);

        let batch = get_batchable_transactions(&queue, 0);
        assert_eq!(batch.len(), BATCH_LIMIT);
        assert_eq!(nonces(&batch), (0..20).collect::<Vec<_>>());

        let smaller = get_batchable_transactions_capped(&queue, 0, 3);
        assert_eq!(smaller.len(), 3);

        let larger = get_batchable_transactions_capped(&queue, 0, 100);
        assert_eq!(larger.len(), BATCH_LIMIT);
    }

    #[test]
    fn skips_module_transactions() {
        let module = TransactionSummary {
            execution_info: Some(ExecutionInfo::Module(ModuleExecutionInfo {
                address: AddressEx {
                    value: "0xmodule".to_string(),
                    name: None,
                },
            })),
            ..tx("module", 0)
        };
        let queue = group_conflicting_txs(&[
            item(queued("a", 1, 1, 1)),
            item(module),
            item(queued("b", 2, 1, 1)),
        ]);

        let batch = get_batchable_transactions(&queue, 1);

        assert_eq!(nonces(&batch), vec![1, 2]);
    }

    #[test]
    fn first_nonce_must_match_current() {
        let queue = group_conflicting_txs(&[item(queued("a", 6, 1, 1))]);
        assert!(get_batchable_transactions(&queue, 5).is_empty());
    }

    #[test]
    fn accepts_transaction_at_max_nonce() {
        let queue = group_conflicting_txs(&[
            item(queued("last", u64::MAX, 1, 1)),
            item(queued("after", u64::MAX, 1, 1)),
        ]);

        let batch = get_batchable_transactions(&queue, u64::MAX);

        assert_eq!(batch.len(), 1);
        assert_eq!(batch[0].id, "last");
    }

    #[test]
    fn steps_over_stale_lower_nonces() {
        let queue = group_conflicting_txs(&[
            item(queued("stale", 4, 1, 1)),
            item(queued("a", 5, 1, 1)),
        ]);
        let batch = get_batchable_transactions(&queue, 5);
        assert_eq!(nonces(&batch), vec![5]);
    }
}
