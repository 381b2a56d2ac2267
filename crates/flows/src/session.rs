//! Per-name orchestration session.

use std::{collections::BTreeSet, fmt, sync::Arc, time::Duration};

use alloy_primitives::Address;
use parking_lot::Mutex;
use superrecords_chainio::{ResolverCheck, RootChainReader, WalletClient};
use superrecords_diff::DraftState;
use superrecords_primitives::{NsName, RecordSnapshot, SpokeChain};
use superrecords_recsvc::RecordService;
use tracing::{info, warn};

use crate::{
    error::FlowError,
    migration::{MigrationFlow, MigrationOutcome, MigrationParams, MigrationState},
    publish::{publish_records, PublishReceipt},
};

/// Operation kinds subject to the per-name single-flight rule.
#[derive(Copy, Clone, Debug, PartialEq, Eq, PartialOrd, Ord)]
pub enum OpKind {
    ResolverCheck,
    Migration,
    Refresh,
    Publish,
}

impl fmt::Display for OpKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            OpKind::ResolverCheck => "resolver check",
            OpKind::Migration => "resolver migration",
            OpKind::Refresh => "record refresh",
            OpKind::Publish => "record publish",
        };
        f.write_str(label)
    }
}

/// What the session currently knows about the resolver pointer.
///
/// `Unknown` covers both "never checked" and "last check failed to read";
/// record operations stay blocked, but the host must not present either as a
/// confirmed mismatch.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum ResolverGate {
    Unknown,
    Correct,
    Incorrect,
}

/// Releases the in-flight slot when a flow finishes or its future is
/// dropped (an abandoned wallet prompt must not wedge the slot forever).
#[derive(Debug)]
struct OpGuard {
    inflight: Arc<Mutex<BTreeSet<OpKind>>>,
    op: OpKind,
}

impl Drop for OpGuard {
    fn drop(&mut self) {
        self.inflight.lock().remove(&self.op);
    }
}

/// Orchestration state for exactly one name.
///
/// Owns the resolver gate, the migration flow and the baseline snapshot.
/// Selecting a different name means dropping this session and creating a
/// fresh one, nothing carries over. The baseline is replaced wholesale on
/// every refresh, never merged.
#[expect(
    missing_debug_implementations,
    reason = "client type parameters are not required to implement Debug"
)]
pub struct ProfileSession<R, S, W> {
    name: NsName,
    /// Wallet account the record service keys snapshots by.
    owner: Address,
    reader: Arc<R>,
    service: Arc<S>,
    wallet: Arc<W>,
    refresh_delay: Duration,
    gate: ResolverGate,
    migration: MigrationFlow,
    baseline: Option<RecordSnapshot>,
    inflight: Arc<Mutex<BTreeSet<OpKind>>>,
}

impl<R, S, W> ProfileSession<R, S, W>
where
    R: RootChainReader,
    S: RecordService,
    W: WalletClient,
{
    pub fn new(
        name: NsName,
        owner: Address,
        reader: Arc<R>,
        service: Arc<S>,
        wallet: Arc<W>,
        params: MigrationParams,
        refresh_delay: Duration,
    ) -> Self {
        Self {
            migration: MigrationFlow::new(name.clone(), params),
            name,
            owner,
            reader,
            service,
            wallet,
            refresh_delay,
            gate: ResolverGate::Unknown,
            baseline: None,
            inflight: Arc::new(Mutex::new(BTreeSet::new())),
        }
    }

    pub fn name(&self) -> &NsName {
        &self.name
    }

    pub fn resolver_gate(&self) -> ResolverGate {
        self.gate
    }

    pub fn migration_state(&self) -> MigrationState {
        self.migration.state()
    }

    pub fn baseline(&self) -> Option<&RecordSnapshot> {
        self.baseline.as_ref()
    }

    /// Checks the resolver pointer and updates the gate.
    ///
    /// A failed read leaves the gate `Unknown`, not `Incorrect`.
    pub async fn check_resolver(&mut self) -> Result<ResolverCheck, FlowError> {
        let _guard = self.begin(OpKind::ResolverCheck)?;
        let reader = self.reader.clone();

        match self.migration.check(reader.as_ref()).await {
            Ok(check) => {
                self.gate = if check.is_correct {
                    ResolverGate::Correct
                } else {
                    ResolverGate::Incorrect
                };
                Ok(check)
            }
            Err(err) => {
                self.gate = ResolverGate::Unknown;
                Err(err)
            }
        }
    }

    /// Migrates the resolver. Calling this is the user's confirmation.
    ///
    /// On success (including the no-transaction short-circuit) the gate
    /// opens and a fresh baseline fetch is attempted; a failed fetch only
    /// logs; the migration itself still succeeded.
    pub async fn migrate_resolver(&mut self) -> Result<MigrationOutcome, FlowError> {
        let outcome = {
            let _guard = self.begin(OpKind::Migration)?;
            let reader = self.reader.clone();
            let wallet = self.wallet.clone();

            match self
                .migration
                .migrate(reader.as_ref(), wallet.as_ref())
                .await
            {
                Ok(outcome) => outcome,
                Err(err) => {
                    self.gate = if matches!(err, FlowError::ResolverCheckFailed(_)) {
                        ResolverGate::Unknown
                    } else {
                        // the pointer is confirmed wrong, only the fix failed
                        ResolverGate::Incorrect
                    };
                    return Err(err);
                }
            }
        };

        self.gate = ResolverGate::Correct;
        info!(name = %self.name, "resolver confirmed, record operations unblocked");

        if let Err(err) = self.refresh_baseline().await {
            warn!(name = %self.name, %err, "baseline fetch after migration failed");
        }

        Ok(outcome)
    }

    /// Fetches the published records and replaces the baseline wholesale.
    ///
    /// Blocked until the resolver gate is `Correct`.
    pub async fn refresh_baseline(&mut self) -> Result<&RecordSnapshot, FlowError> {
        self.ensure_gate()?;
        let _guard = self.begin(OpKind::Refresh)?;

        let snapshot = self
            .service
            .fetch_records(self.name.node(), self.owner)
            .await?;
        self.baseline = Some(snapshot);

        Ok(self.baseline.as_ref().expect("baseline just replaced"))
    }

    /// Opens an editor draft initialized from the current baseline.
    ///
    /// Call [`refresh_baseline`] first; with no baseline fetched yet the
    /// draft starts from an empty snapshot.
    ///
    /// [`refresh_baseline`]: ProfileSession::refresh_baseline
    pub fn open_draft(&self) -> Result<DraftState, FlowError> {
        self.ensure_gate()?;
        let empty = RecordSnapshot::new();
        Ok(DraftState::from_snapshot(self.baseline.as_ref().unwrap_or(&empty)))
    }

    /// Publishes the draft to `target` and, on success, waits out the
    /// configured sync delay before re-fetching the baseline.
    ///
    /// The wait exists because an L2 write is not instantly visible through
    /// the read path that produced the pre-edit baseline; it is caller-side
    /// policy, not a confirmation guarantee.
    pub async fn publish(
        &mut self,
        draft: &DraftState,
        target: SpokeChain,
    ) -> Result<PublishReceipt, FlowError> {
        self.ensure_gate()?;
        let receipt = {
            let _guard = self.begin(OpKind::Publish)?;
            let service = self.service.clone();
            let wallet = self.wallet.clone();
            let baseline = self.baseline.clone().unwrap_or_default();

            publish_records(
                service.as_ref(),
                wallet.as_ref(),
                &self.name,
                &baseline,
                draft,
                target,
            )
            .await?
        };

        tokio::time::sleep(self.refresh_delay).await;
        if let Err(err) = self.refresh_baseline().await {
            warn!(name = %self.name, %err, "baseline refresh after publish failed");
        }

        Ok(receipt)
    }

    fn ensure_gate(&self) -> Result<(), FlowError> {
        if self.gate != ResolverGate::Correct {
            return Err(FlowError::ResolverNotVerified {
                name: self.name.name().to_owned(),
            });
        }
        Ok(())
    }

    fn begin(&self, op: OpKind) -> Result<OpGuard, FlowError> {
        if !self.inflight.lock().insert(op) {
            return Err(FlowError::Busy {
                op,
                name: self.name.name().to_owned(),
            });
        }
        Ok(OpGuard {
            inflight: self.inflight.clone(),
            op,
        })
    }
}
