//! Shared transaction confirmation tracking.

use alloy_primitives::{Address, B256};
use superrecords_chainio::{TxReceipt, WalletClient};
use tracing::{info, warn};

use crate::error::FlowError;

/// Phases a tracked transaction passes through before its receipt decides
/// the outcome.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum TxPhase {
    /// Waiting for the wallet to sign and hand back a hash.
    Submitting,
    /// Submitted, waiting for inclusion.
    Pending,
}

/// Submits one call and waits for its receipt.
///
/// `Submitting` ends when the wallet returns a hash (a declined prompt is an
/// immediate [`FlowError::UserRejected`]); `Pending` ends at inclusion, and
/// a receipt with a failure status becomes
/// [`FlowError::TransactionReverted`]. Callers that need to observe the
/// phases (the migration state machine does) pass an `on_phase` hook;
/// everyone else passes a no-op closure. Re-fetching any baseline after
/// success is the caller's policy, not a guarantee made here.
pub async fn submit_and_confirm<E, P>(
    wallet: &impl WalletClient,
    chain_id: u64,
    to: Address,
    calldata: Vec<u8>,
    explorer_url: E,
    mut on_phase: P,
) -> Result<TxReceipt, FlowError>
where
    E: Fn(B256) -> String,
    P: FnMut(TxPhase),
{
    on_phase(TxPhase::Submitting);
    info!(chain_id, %to, "requesting transaction signature");

    let txid = wallet.submit_call(chain_id, to, calldata).await?;

    on_phase(TxPhase::Pending);
    info!(%txid, url = %explorer_url(txid), "transaction submitted, awaiting confirmation");

    let receipt = wallet.await_receipt(chain_id, txid).await?;
    if !receipt.success {
        warn!(%txid, "transaction reverted");
        return Err(FlowError::TransactionReverted { txid });
    }

    info!(%txid, "transaction confirmed");
    Ok(receipt)
}

#[cfg(test)]
mod tests {
    use superrecords_test_utils::FakeWallet;

    use super::*;

    const TO: Address = Address::ZERO;

    #[tokio::test]
    async fn success_passes_through_both_phases() {
        let wallet = FakeWallet::on_chain(10);
        let mut phases = Vec::new();

        let receipt = submit_and_confirm(
            &wallet,
            10,
            TO,
            vec![0xaa],
            |txid| format!("https://exp/tx/{txid}"),
            |phase| phases.push(phase),
        )
        .await
        .unwrap();

        assert!(receipt.success);
        assert_eq!(phases, vec![TxPhase::Submitting, TxPhase::Pending]);
        assert_eq!(wallet.submitted().len(), 1);
    }

    #[tokio::test]
    async fn rejection_is_terminal_before_pending() {
        let wallet = FakeWallet::on_chain(10).rejecting_submissions();
        let mut phases = Vec::new();

        let err = submit_and_confirm(&wallet, 10, TO, vec![], |_| String::new(), |phase| {
            phases.push(phase)
        })
        .await
        .unwrap_err();

        assert!(matches!(err, FlowError::UserRejected));
        assert_eq!(phases, vec![TxPhase::Submitting]);
    }

    #[tokio::test]
    async fn reverted_receipt_is_classified() {
        let wallet = FakeWallet::on_chain(10).with_reverted_receipts();

        let err = submit_and_confirm(&wallet, 10, TO, vec![], |_| String::new(), |_| {})
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::TransactionReverted { .. }));
    }
}
