use tracing::{debug, warn};

use crate::models::{ConflictType, TransactionListItem};
use crate::timeline::{TimelineItem, TxGroup};

/// Collapses every run of same-nonce transactions that follows a conflict
/// header into a single [`TxGroup::Conflict`].
///
/// The header itself is a delimiter and never shows up in the output, and
/// transactions keep the order the gateway delivered them in. A header with
/// no transactions after it produces nothing.
pub fn group_conflicting_txs(items: &[TransactionListItem]) -> Vec<TimelineItem> {
    let mut out = Vec::with_capacity(items.len());
    let mut open: Option<TxGroup> = None;

    for item in items {
        match item {
            TransactionListItem::ConflictHeader(header) => {
                close_group(&mut open, &mut out);
                open = Some(TxGroup::Conflict {
                    nonce: header.nonce,
                    transactions: Vec::new(),
                });
            }
            TransactionListItem::Transaction(tx_item) => {
                let joins_open_group =
                    open.is_some() && tx_item.conflict_type != ConflictType::None;

                if joins_open_group {
                    if let Some(TxGroup::Conflict { transactions, .. }) = open.as_mut() {
                        transactions.push(tx_item.transaction.clone());
                    }
                    if tx_item.conflict_type == ConflictType::End {
                        close_group(&mut open, &mut out);
                    }
                } else {
                    close_group(&mut open, &mut out);
                    out.push(TimelineItem::Transaction(TxGroup::Single(
                        tx_item.transaction.clone(),
                    )));
                }
            }
            TransactionListItem::DateLabel(label) => {
                close_group(&mut open, &mut out);
                out.push(TimelineItem::DateLabel {
                    timestamp: label.timestamp,
                });
            }
            TransactionListItem::Label(label) => {
                close_group(&mut open, &mut out);
                out.push(TimelineItem::Label {
                    label: label.label.clone(),
                });
            }
            TransactionListItem::Unknown => {
                warn!("skipping unrecognized transaction list item");
            }
        }
    }

    close_group(&mut open, &mut out);
    out
}

fn close_group(open: &mut Option<TxGroup>, out: &mut Vec<TimelineItem>) {
    let Some(group) = open.take() else {
        return;
    };

    if group.transactions().is_empty() {
        if let TxGroup::Conflict { nonce, .. } = group {
            debug!("dropping empty conflict group for nonce {}", nonce);
        }
        return;
    }

    out.push(TimelineItem::Transaction(group));
}
