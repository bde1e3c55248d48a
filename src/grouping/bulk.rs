use crate::models::{OrderClass, TransactionSummary, TxInfo};
use crate::timeline::{TimelineItem, TxGroup};

#[derive(Debug, PartialEq, Eq)]
enum MergeKey<'a> {
    Order(&'a str),
    TxHash(&'a str),
}

/// Legs of one settlement share the order uid; everything else merges on the
/// on-chain hash of the multi-send that executed it.
fn merge_key(tx: &TransactionSummary) -> Option<MergeKey<'_>> {
    if let Some(uid) = tx.tx_info.order().and_then(|order| order.uid.as_deref()) {
        return Some(MergeKey::Order(uid));
    }
    tx.tx_hash.as_deref().map(MergeKey::TxHash)
}

fn same_key(a: &TransactionSummary, b: &TransactionSummary) -> bool {
    match (merge_key(a), merge_key(b)) {
        (Some(a), Some(b)) => a == b,
        _ => false,
    }
}

/// Display title for a bulk group, derived from its first member.
pub fn bulk_title(first: &TransactionSummary) -> String {
    let title = match &first.tx_info {
        TxInfo::TwapOrder(_) => "TWAP order settlement",
        TxInfo::SwapOrder(order) | TxInfo::SwapTransfer(order) => match order.order_class {
            OrderClass::Limit => "Limit order settlement",
            OrderClass::Liquidity => "Liquidity order settlement",
            OrderClass::Twap => "TWAP order settlement",
            OrderClass::Market | OrderClass::Unknown => "Swap order settlement",
        },
        _ => "Bulk transactions",
    };
    title.to_string()
}

/// Merges immediately adjacent single transactions that belong to the same
/// logical operation into one [`TxGroup::Bulk`].
///
/// Only neighbours are considered: two legs separated by anything else stay
/// apart. Existing conflict groups and labels pass through untouched.
pub fn group_bulk_txs(items: Vec<TimelineItem>) -> Vec<TimelineItem> {
    let mut out: Vec<TimelineItem> = Vec::with_capacity(items.len());

    for item in items {
        let TimelineItem::Transaction(TxGroup::Single(tx)) = item else {
            out.push(item);
            continue;
        };

        let Some(TimelineItem::Transaction(prev)) = out.last_mut() else {
            out.push(TimelineItem::Transaction(TxGroup::Single(tx)));
            continue;
        };

        match prev {
            TxGroup::Bulk { transactions, .. }
                if transactions.first().is_some_and(|first| same_key(first, &tx)) =>
            {
                transactions.push(tx);
            }
            TxGroup::Single(first) if same_key(first, &tx) => {
                let first = first.clone();
                *prev = TxGroup::Bulk {
                    title: bulk_title(&first),
                    transactions: vec![first, tx],
                };
            }
            _ => out.push(TimelineItem::Transaction(TxGroup::Single(tx))),
        }
    }

    out
}
