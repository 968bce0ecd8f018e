//! Raw blockchain -> canonical view.
//!
//! Pure and deterministic: the same input always yields an identical view.
//! Byte fields are hex-encoded, numeric fields copied, `difficulty` becomes
//! `proof_of_work`, transaction ids pass through. Nothing is validated and
//! block order is kept exactly as received.

use shared_types::{
    BlockView, BlockchainView, InputView, OutputView, RawBlock, RawBlockchain, RawInput,
    RawOutput, RawTransaction, TransactionView,
};

use super::hex::encode_seq;

/// Decode a full chain.
pub fn decode_blockchain(raw: &RawBlockchain) -> BlockchainView {
    BlockchainView {
        length: raw.length,
        blocks: raw.blocks.iter().map(decode_block).collect(),
    }
}

/// Parse and decode a `rawBlockchainData` JSON document.
pub fn decode_blockchain_json(json: &str) -> Result<BlockchainView, serde_json::Error> {
    let raw: RawBlockchain = serde_json::from_str(json)?;
    Ok(decode_blockchain(&raw))
}

pub fn decode_block(raw: &RawBlock) -> BlockView {
    BlockView {
        index: raw.index,
        timestamp: raw.timestamp,
        hash: encode_seq(&raw.hash),
        proof_of_work: raw.difficulty,
        nonce: raw.nonce,
        transactions: raw.transactions.iter().map(decode_transaction).collect(),
    }
}

fn decode_transaction(raw: &RawTransaction) -> TransactionView {
    TransactionView {
        id: raw.id.0.clone(),
        inputs: raw.inputs.iter().map(decode_input).collect(),
        outputs: raw.outputs.iter().map(decode_output).collect(),
    }
}

fn decode_input(raw: &RawInput) -> InputView {
    InputView {
        id: encode_seq(&raw.id),
        out: raw.out,
        signature: encode_seq(&raw.signature),
        public_key: encode_seq(&raw.public_key),
    }
}

fn decode_output(raw: &RawOutput) -> OutputView {
    OutputView {
        value: raw.value,
        public_key_hash: encode_seq(&raw.public_key_hash),
    }
}
