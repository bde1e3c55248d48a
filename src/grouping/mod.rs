pub mod batch;
pub mod bulk;
pub mod conflicts;
pub mod date_label;

pub use batch::{get_batchable_transactions, get_batchable_transactions_capped, BATCH_LIMIT};
pub use bulk::group_bulk_txs;
pub use conflicts::group_conflicting_txs;
pub use date_label::group_txs_by_date;

#[cfg(test)]
pub(crate) mod fixtures {
    use crate::models::{
        ConflictHeader, ConflictType, DateLabel, ExecutionInfo, Label, MultisigExecutionInfo,
        TransactionItem, TransactionListItem, TransactionSummary, TxInfo, TxStatus,
    };

    pub fn tx(id: &str, timestamp: i64) -> TransactionSummary {
        TransactionSummary {
            id: id.to_string(),
            timestamp,
            tx_status: TxStatus::Success,
            tx_info: TxInfo::Other,
            tx_hash: None,
            execution_info: None,
        }
    }

    pub fn queued(id: &str, nonce: u64, submitted: u32, required: u32) -> TransactionSummary {
        TransactionSummary {
            tx_status: if submitted >= required {
                TxStatus::AwaitingExecution
            } else {
                TxStatus::AwaitingConfirmations
            },
            execution_info: Some(ExecutionInfo::Multisig(MultisigExecutionInfo {
                nonce,
                confirmations_submitted: submitted,
                confirmations_required: required,
                missing_signers: None,
            })),
            ..tx(id, 0)
        }
    }

    pub fn item(tx: TransactionSummary) -> TransactionListItem {
        item_with(tx, ConflictType::None)
    }

    pub fn item_with(tx: TransactionSummary, conflict_type: ConflictType) -> TransactionListItem {
        TransactionListItem::Transaction(TransactionItem {
            transaction: tx,
            conflict_type,
        })
    }

    pub fn header(nonce: u64) -> TransactionListItem {
        TransactionListItem::ConflictHeader(ConflictHeader { nonce })
    }

    pub fn date(timestamp: i64) -> TransactionListItem {
        TransactionListItem::DateLabel(DateLabel { timestamp })
    }

    pub fn label(label: &str) -> TransactionListItem {
        TransactionListItem::Label(Label {
            label: label.to_string(),
        })
    }
}
