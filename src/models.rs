use serde::{Deserialize, Serialize};

/// One page of the gateway's history or queue endpoint.
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Page {
    #[serde(default)]
    pub count: Option<u64>,
    #[serde(default)]
    pub next: Option<String>,
    #[serde(default)]
    pub previous: Option<String>,
    #[serde(default)]
    pub results: Vec<TransactionListItem>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TransactionListItem {
    Transaction(TransactionItem),
    DateLabel(DateLabel),
    ConflictHeader(ConflictHeader),
    Label(Label),
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionItem {
    pub transaction: TransactionSummary,
    #[serde(default)]
    pub conflict_type: ConflictType,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct DateLabel {
    pub timestamp: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct ConflictHeader {
    pub nonce: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct Label {
    pub label: String,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
pub enum ConflictType {
    #[default]
    None,
    HasNext,
    End,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransactionSummary {
    pub id: String,
    /// Milliseconds since the unix epoch.
    pub timestamp: i64,
    pub tx_status: TxStatus,
    pub tx_info: TxInfo,
    #[serde(default)]
    pub tx_hash: Option<String>,
    #[serde(default)]
    pub execution_info: Option<ExecutionInfo>,
}

impl TransactionSummary {
    /// Execution details when the transaction goes through the multisig flow.
    pub fn multisig_info(&self) -> Option<&MultisigExecutionInfo> {
        match &self.execution_info {
            Some(ExecutionInfo::Multisig(info)) => Some(info),
            _ => None,
        }
    }

    pub fn nonce(&self) -> Option<u64> {
        self.multisig_info().map(|info| info.nonce)
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum TxStatus {
    AwaitingConfirmations,
    AwaitingExecution,
    Cancelled,
    Failed,
    Success,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(tag = "type", rename_all = "UPPERCASE")]
pub enum ExecutionInfo {
    Multisig(MultisigExecutionInfo),
    Module(ModuleExecutionInfo),
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MultisigExecutionInfo {
    pub nonce: u64,
    pub confirmations_submitted: u32,
    pub confirmations_required: u32,
    #[serde(default)]
    pub missing_signers: Option<Vec<AddressEx>>,
}

impl MultisigExecutionInfo {
    pub fn is_fully_confirmed(&self) -> bool {
        self.confirmations_submitted >= self.confirmations_required
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
pub struct ModuleExecutionInfo {
    pub address: AddressEx,
}

#[derive(Debug, Clone, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AddressEx {
    pub value: String,
    #[serde(default)]
    pub name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(tag = "type")]
pub enum TxInfo {
    SwapOrder(OrderInfo),
    SwapTransfer(OrderInfo),
    TwapOrder(OrderInfo),
    Custom(CustomInfo),
    Transfer(TransferInfo),
    #[serde(other)]
    Other,
}

impl TxInfo {
    /// Order settlement details for swap, swap-transfer and TWAP legs.
    pub fn order(&self) -> Option<&OrderInfo> {
        match self {
            TxInfo::SwapOrder(order) | TxInfo::SwapTransfer(order) | TxInfo::TwapOrder(order) => {
                Some(order)
            }
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OrderInfo {
    #[serde(default)]
    pub uid: Option<String>,
    #[serde(default)]
    pub order_class: OrderClass,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum OrderClass {
    #[default]
    Market,
    Limit,
    Liquidity,
    Twap,
    #[serde(other)]
    Unknown,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CustomInfo {
    #[serde(default)]
    pub method_name: Option<String>,
    #[serde(default)]
    pub action_count: Option<u32>,
    #[serde(default)]
    pub is_cancellation: bool,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransferInfo {
    #[serde(default)]
    pub direction: Option<String>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn decodes_gateway_transaction_item() {
        let raw = r#"{
            "type": "TRANSACTION",
            "conflictType": "HasNext",
            "transaction": {
                "id": "multisig_0xabc_0x01",
                "timestamp": 1700000000000,
                "txStatus": "AWAITING_EXECUTION",
                "txInfo": { "type": "SwapOrder", "uid": "0xorder", "orderClass": "limit" },
                "txHash": null,
                "executionInfo": {
                    "type": "MULTISIG",
                    "nonce": 4,
                    "confirmationsSubmitted": 2,
                    "confirmationsRequired": 2
                }
            }
        }"#;

        let item: TransactionListItem = serde_json::from_str(raw).unwrap();
        let TransactionListItem::Transaction(item) = item else {
            panic!("expected a transaction item");
        };
        assert_eq!(item.conflict_type, ConflictType::HasNext);
        assert_eq!(item.transaction.nonce(), Some(4));
        assert!(item.transaction.multisig_info().unwrap().is_fully_confirmed());
        let order = item.transaction.tx_info.order().unwrap();
        assert_eq!(order.order_class, OrderClass::Limit);
    }

    #[test]
    fn unknown_tags_fall_back() {
        let item: TransactionListItem =
            serde_json::from_str(r#"{"type": "SOMETHING_NEW", "x": 1}"#).unwrap();
        assert_eq!(item, TransactionListItem::Unknown);

        let info: TxInfo = serde_json::from_str(r#"{"type": "SettingsChange"}"#).unwrap();
        assert_eq!(info, TxInfo::Other);
    }

    #[test]
    fn module_execution_has_no_nonce() {
        let raw = r#"{
            "id": "module_1",
            "timestamp": 1,
            "txStatus": "SUCCESS",
            "txInfo": { "type": "Custom", "methodName": "execTransactionFromModule" },
            "executionInfo": { "type": "MODULE", "address": { "value": "0xmod" } }
        }"#;
        let tx: TransactionSummary = serde_json::from_str(raw).unwrap();
        assert_eq!(tx.nonce(), None);
        assert_eq!(tx.tx_hash, None);
    }
}
