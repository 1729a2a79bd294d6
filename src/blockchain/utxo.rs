//! Parsing and aggregation of `query utxo` output.
//!
//! # Format
//! ```text
//!                            TxHash                                 TxIx        Amount
//! --------------------------------------------------------------------------------------
//! 4e3a...b1c2     0        1000000 lovelace + TxOutDatumNone
//! ```
//! Two header lines, then one whitespace-separated row per output. Only the
//! first three columns (hash, index, amount) are read; anything after the
//! amount (unit, datum, native assets) is ignored.

use std::collections::HashSet;

use crate::blockchain::types::{OrchestratorError, OrchestratorResult, UnspentOutput};

/// Number of header lines preceding the data rows.
const HEADER_LINES: usize = 2;

/// Parse the tool's tabular output into records, preserving row order.
pub fn parse_utxo_table(output: &str) -> OrchestratorResult<Vec<UnspentOutput>> {
    let mut utxos = Vec::new();

    for (idx, line) in output.lines().enumerate().skip(HEADER_LINES) {
        // 1-based for error messages
        let line_no = idx + 1;
        let mut fields = line.split_whitespace();

        let Some(tx_hash) = fields.next() else {
            continue;
        };
        let (Some(output_index), Some(raw_amount)) = (fields.next(), fields.next()) else {
            return Err(OrchestratorError::DataFormat {
                line: line_no,
                reason: format!("expected hash, index and amount, got {:?}", line.trim()),
            });
        };

        let amount = raw_amount
            .parse::<u64>()
            .map_err(|e| OrchestratorError::DataFormat {
                line: line_no,
                reason: format!("amount {:?} is not an integer: {}", raw_amount, e),
            })?;

        utxos.push(UnspentOutput {
            tx_hash: tx_hash.to_string(),
            output_index: output_index.to_string(),
            amount,
        });
    }

    Ok(utxos)
}

/// Sum of the amounts. Overflow is reported rather than wrapped.
pub fn total_amount(utxos: &[UnspentOutput]) -> OrchestratorResult<u64> {
    utxos.iter().try_fold(0u64, |acc, utxo| {
        acc.checked_add(utxo.amount)
            .ok_or_else(|| OrchestratorError::DataFormat {
                line: 0,
                reason: "total amount overflows u64".to_string(),
            })
    })
}

/// Pick the outputs named by `<hash>#<index>` references.
///
/// An empty selection means "all of them". Every reference must match one
/// of `available` and appear at most once; order follows `selected`.
pub fn select_inputs(
    available: &[UnspentOutput],
    selected: &[String],
) -> OrchestratorResult<Vec<UnspentOutput>> {
    if selected.is_empty() {
        return Ok(available.to_vec());
    }

    let mut seen = HashSet::new();
    selected
        .iter()
        .map(|reference| {
            if !reference.contains('#') {
                return Err(OrchestratorError::InvalidArgument {
                    name: "tx-in",
                    reason: format!("{:?} is not of the form <hash>#<index>", reference),
                });
            }
            if !seen.insert(reference.as_str()) {
                return Err(OrchestratorError::InvalidArgument {
                    name: "tx-in",
                    reason: format!("{:?} is selected more than once", reference),
                });
            }
            available
                .iter()
                .find(|utxo| &utxo.input_ref() == reference)
                .cloned()
                .ok_or_else(|| {
                    OrchestratorError::Precondition(format!(
                        "{} is not an unspent output of the sender",
                        reference
                    ))
                })
        })
        .collect()
}
