//! Scripted wallet.

use alloy_primitives::{Address, B256};
use async_trait::async_trait;
use parking_lot::Mutex;
use superrecords_chainio::{TxReceipt, WalletClient, WalletError};

/// One call a [`FakeWallet`] was asked to sign.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct SubmittedCall {
    pub chain_id: u64,
    pub to: Address,
    pub calldata: Vec<u8>,
    pub txid: B256,
}

#[derive(Debug)]
struct WalletState {
    active_chain: u64,
    refuse_switches: bool,
    reject_submissions: bool,
    revert_receipts: bool,
    submitted: Vec<SubmittedCall>,
    switch_requests: Vec<u64>,
    next_txid: u8,
}

/// A wallet that approves everything unless told otherwise, recording every
/// interaction for assertions.
#[derive(Debug)]
pub struct FakeWallet {
    state: Mutex<WalletState>,
}

impl FakeWallet {
    /// Wallet connected to `chain_id`, approving switches and submissions,
    /// confirming every receipt.
    pub fn on_chain(chain_id: u64) -> Self {
        Self {
            state: Mutex::new(WalletState {
                active_chain: chain_id,
                refuse_switches: false,
                reject_submissions: false,
                revert_receipts: false,
                submitted: Vec::new(),
                switch_requests: Vec::new(),
                next_txid: 0,
            }),
        }
    }

    /// Every network switch request fails.
    pub fn refusing_switches(self) -> Self {
        self.state.lock().refuse_switches = true;
        self
    }

    /// Every signature prompt is declined by the user.
    pub fn rejecting_submissions(self) -> Self {
        self.state.lock().reject_submissions = true;
        self
    }

    /// Transactions get included but revert.
    pub fn with_reverted_receipts(self) -> Self {
        self.state.lock().revert_receipts = true;
        self
    }

    /// Calls signed so far, in order.
    pub fn submitted(&self) -> Vec<SubmittedCall> {
        self.state.lock().submitted.clone()
    }

    /// Chains the flows asked to switch to, in order.
    pub fn switch_requests(&self) -> Vec<u64> {
        self.state.lock().switch_requests.clone()
    }

    /// Chain the wallet currently reports.
    pub fn current_chain(&self) -> u64 {
        self.state.lock().active_chain
    }
}

#[async_trait]
impl WalletClient for FakeWallet {
    async fn active_chain(&self) -> Result<u64, WalletError> {
        Ok(self.state.lock().active_chain)
    }

    async fn switch_chain(&self, chain_id: u64) -> Result<(), WalletError> {
        let mut state = self.state.lock();
        state.switch_requests.push(chain_id);
        if state.refuse_switches {
            return Err(WalletError::switch_failed("user kept the old network"));
        }
        state.active_chain = chain_id;
        Ok(())
    }

    async fn submit_call(
        &self,
        chain_id: u64,
        to: Address,
        calldata: Vec<u8>,
    ) -> Result<B256, WalletError> {
        let mut state = self.state.lock();
        if state.reject_submissions {
            return Err(WalletError::Rejected);
        }
        state.next_txid += 1;
        let txid = B256::repeat_byte(state.next_txid);
        state.submitted.push(SubmittedCall {
            chain_id,
            to,
            calldata,
            txid,
        });
        Ok(txid)
    }

    async fn await_receipt(&self, _chain_id: u64, txid: B256) -> Result<TxReceipt, WalletError> {
        let state = self.state.lock();
        Ok(TxReceipt {
            txid,
            success: !state.revert_receipts,
        })
    }
}
