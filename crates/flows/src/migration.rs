//! Resolver migration state machine.

use alloy_primitives::{Address, B256};
use superrecords_chainio::{
    check_resolver, contracts, resolve_wrap_status, ResolverCheck, RootChainReader, WalletClient,
};
use superrecords_primitives::{
    chain::{root_explorer_tx_url, REGISTRY_ADDRESS, ROOT_CHAIN_ID, TARGET_RESOLVER, WRAPPER_ADDRESS},
    NsName,
};
use tracing::{debug, info};

use crate::{
    error::FlowError,
    tracker::{submit_and_confirm, TxPhase},
};

/// States of the resolver migration flow.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum MigrationState {
    Idle,
    Checking,
    /// Pointer already correct; record operations unblocked.
    UpToDate,
    /// Pointer differs from the target; migration required.
    Mismatched,
    /// Confirming the wallet is on the root chain.
    SwitchingNetwork,
    AwaitingSignature,
    PendingConfirmation,
    Confirmed,
    Failed,
}

impl MigrationState {
    /// Legal transitions. Anything outside this table is a programming
    /// error, not a runtime condition.
    fn can_transition_to(self, next: MigrationState) -> bool {
        use MigrationState::*;
        matches!(
            (self, next),
            (Idle, Checking)
                | (Checking, UpToDate)
                | (Checking, Mismatched)
                | (Checking, Failed)
                | (Mismatched, SwitchingNetwork)
                | (Mismatched, Failed)
                | (SwitchingNetwork, AwaitingSignature)
                | (SwitchingNetwork, Failed)
                | (AwaitingSignature, PendingConfirmation)
                | (AwaitingSignature, Failed)
                | (PendingConfirmation, Confirmed)
                | (PendingConfirmation, Failed)
        )
    }
}

/// Root-chain parameters for a migration.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct MigrationParams {
    pub root_chain_id: u64,
    pub registry: Address,
    pub wrapper: Address,
    /// The resolver the name must end up pointing at.
    pub target_resolver: Address,
}

impl Default for MigrationParams {
    fn default() -> Self {
        Self {
            root_chain_id: ROOT_CHAIN_ID,
            registry: REGISTRY_ADDRESS,
            wrapper: WRAPPER_ADDRESS,
            target_resolver: TARGET_RESOLVER,
        }
    }
}

/// Outcome of a completed migration request.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum MigrationOutcome {
    /// The pointer was already correct; no transaction was submitted.
    AlreadyUpToDate,
    /// The migration transaction confirmed.
    Migrated { txid: B256, explorer_url: String },
}

/// Drives the multi-step resolver migration for one name.
///
/// A failed flow stays in `Failed` until re-entered: both [`check`] and
/// [`migrate`] restart from the top, so recovery is always a fresh
/// user-initiated attempt. Abandoned wallet prompts simply leave the future
/// parked in `AwaitingSignature`/`SwitchingNetwork`.
///
/// [`check`]: MigrationFlow::check
/// [`migrate`]: MigrationFlow::migrate
#[derive(Clone, Debug)]
pub struct MigrationFlow {
    name: NsName,
    params: MigrationParams,
    state: MigrationState,
}

fn advance(name: &NsName, state: &mut MigrationState, next: MigrationState) {
    debug_assert!(
        state.can_transition_to(next),
        "illegal migration transition {state:?} -> {next:?}"
    );
    debug!(name = %name, from = ?state, to = ?next, "migration transition");
    *state = next;
}

impl MigrationFlow {
    pub fn new(name: NsName, params: MigrationParams) -> Self {
        Self {
            name,
            params,
            state: MigrationState::Idle,
        }
    }

    pub fn state(&self) -> MigrationState {
        self.state
    }

    pub fn name(&self) -> &NsName {
        &self.name
    }

    fn fail(&mut self, err: FlowError) -> FlowError {
        debug!(name = %self.name, from = ?self.state, err = %err, "migration failed");
        self.state = MigrationState::Failed;
        err
    }

    /// Checks the resolver pointer, landing in `UpToDate` or `Mismatched`.
    ///
    /// A read failure lands in `Failed` with
    /// [`FlowError::ResolverCheckFailed`], deliberately distinct from
    /// `Mismatched`, so a flaky node never makes the host offer migration.
    pub async fn check(
        &mut self,
        reader: &impl RootChainReader,
    ) -> Result<ResolverCheck, FlowError> {
        self.state = MigrationState::Idle;
        advance(&self.name, &mut self.state, MigrationState::Checking);

        let check = check_resolver(reader, &self.name, self.params.target_resolver)
            .await
            .map_err(|e| self.fail(FlowError::ResolverCheckFailed(e)))?;

        let next = if check.is_correct {
            MigrationState::UpToDate
        } else {
            MigrationState::Mismatched
        };
        advance(&self.name, &mut self.state, next);

        Ok(check)
    }

    /// Runs the migration. Calling this *is* the user's confirmation.
    ///
    /// Re-checks the pointer first and short-circuits without submitting
    /// anything when it is already correct. The write is only valid on the
    /// root chain: a wallet connected elsewhere fails fast with
    /// [`FlowError::WrongNetwork`] before any signature request.
    pub async fn migrate(
        &mut self,
        reader: &impl RootChainReader,
        wallet: &impl WalletClient,
    ) -> Result<MigrationOutcome, FlowError> {
        let check = self.check(reader).await?;
        if check.is_correct {
            info!(name = %self.name, "resolver already up to date, nothing to migrate");
            return Ok(MigrationOutcome::AlreadyUpToDate);
        }

        advance(&self.name, &mut self.state, MigrationState::SwitchingNetwork);
        let active = wallet.active_chain().await.map_err(|e| self.fail(e.into()))?;
        if active != self.params.root_chain_id {
            return Err(self.fail(FlowError::WrongNetwork {
                expected: self.params.root_chain_id,
                actual: active,
            }));
        }

        let wrap = resolve_wrap_status(reader, &self.name, self.params.wrapper)
            .await
            .map_err(|e| self.fail(FlowError::ResolverCheckFailed(e)))?;
        let admin_target = wrap.admin_target(self.params.registry, self.params.wrapper);
        info!(
            name = %self.name,
            %admin_target,
            is_wrapped = wrap.is_wrapped,
            "migrating resolver"
        );

        let calldata = contracts::encode_set_resolver(self.name.node(), self.params.target_resolver);

        let result = {
            let name = self.name.clone();
            let state = &mut self.state;
            submit_and_confirm(
                wallet,
                self.params.root_chain_id,
                admin_target,
                calldata,
                root_explorer_tx_url,
                |phase| {
                    let next = match phase {
                        TxPhase::Submitting => MigrationState::AwaitingSignature,
                        TxPhase::Pending => MigrationState::PendingConfirmation,
                    };
                    advance(&name, state, next);
                },
            )
            .await
        };

        let receipt = result.map_err(|e| self.fail(e))?;
        advance(&self.name, &mut self.state, MigrationState::Confirmed);

        Ok(MigrationOutcome::Migrated {
            txid: receipt.txid,
            explorer_url: root_explorer_tx_url(receipt.txid),
        })
    }
}
