//! Record publish pipeline.

use alloy_primitives::B256;
use superrecords_chainio::{contracts, WalletClient};
use superrecords_codec::encode_changeset;
use superrecords_diff::{diff, DraftState};
use superrecords_primitives::{NsName, RecordSnapshot, SpokeChain};
use superrecords_recsvc::RecordService;
use tracing::info;

use crate::{error::FlowError, tracker::submit_and_confirm};

/// Outcome of a confirmed record publish.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct PublishReceipt {
    pub txid: B256,
    pub chain: SpokeChain,
    pub explorer_url: String,
    /// Number of records the changeset touched.
    pub records_changed: usize,
}

/// Diffs, encodes and publishes the draft for `name` on `target`.
///
/// The target spoke chain is an explicit parameter; there is no default
/// chain. An empty changeset short-circuits with
/// [`FlowError::EmptyChangeset`] before the record service is ever
/// contacted. When the wallet is connected to a different chain, a switch is
/// requested and the active chain re-verified before anything is signed.
/// The returned call blobs are submitted as one `multicall` transaction and
/// are never inspected locally.
pub async fn publish_records(
    service: &impl RecordService,
    wallet: &impl WalletClient,
    name: &NsName,
    baseline: &RecordSnapshot,
    draft: &DraftState,
    target: SpokeChain,
) -> Result<PublishReceipt, FlowError> {
    let changes = diff(baseline, draft);
    if changes.is_empty() {
        return Err(FlowError::EmptyChangeset);
    }
    let records_changed = changes.len();

    let payload = encode_changeset(name.name(), &changes);
    let bundle = service.build_multicall(&payload).await?;
    info!(
        name = %name,
        records = records_changed,
        calls = bundle.calls.len(),
        chain = %target,
        "record calls received"
    );

    ensure_active_chain(wallet, target.chain_id()).await?;

    let calldata = contracts::encode_multicall(bundle.calls);
    let receipt = submit_and_confirm(
        wallet,
        target.chain_id(),
        target.resolver_address(),
        calldata,
        |txid| target.explorer_tx_url(txid),
        |_| {},
    )
    .await?;

    Ok(PublishReceipt {
        txid: receipt.txid,
        chain: target,
        explorer_url: target.explorer_tx_url(receipt.txid),
        records_changed,
    })
}

/// Requests a network switch when needed and confirms it took effect.
///
/// Submission only proceeds once the wallet's active chain matches the
/// selection; a switch that silently lands elsewhere is a
/// [`FlowError::WrongNetwork`].
async fn ensure_active_chain(
    wallet: &impl WalletClient,
    chain_id: u64,
) -> Result<(), FlowError> {
    let active = wallet.active_chain().await?;
    if active == chain_id {
        return Ok(());
    }

    info!(from = active, to = chain_id, "requesting network switch");
    wallet.switch_chain(chain_id).await?;

    let active = wallet.active_chain().await?;
    if active != chain_id {
        return Err(FlowError::WrongNetwork {
            expected: chain_id,
            actual: active,
        });
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use superrecords_primitives::RecordField;
    use superrecords_test_utils::{snapshot, test_name, FakeRecordService, FakeWallet};

    use super::*;

    fn baseline() -> RecordSnapshot {
        snapshot(&[
            (RecordField::Name, "Ada Lovelace"),
            (RecordField::Twitter, "ada"),
        ])
    }

    #[tokio::test]
    async fn empty_changeset_never_contacts_the_service() {
        let service = FakeRecordService::new();
        let wallet = FakeWallet::on_chain(10);
        let base = baseline();
        let draft = DraftState::from_snapshot(&base);

        let err = publish_records(&service, &wallet, &test_name(), &base, &draft, SpokeChain::Optimism)
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::EmptyChangeset));
        assert!(service.recorded_payloads().is_empty());
        assert!(wallet.submitted().is_empty());
    }

    #[tokio::test]
    async fn publish_sends_expected_payload_and_submits_multicall() {
        let service = FakeRecordService::new()
            .with_calls(vec![vec![0xde, 0xad].into(), vec![0xbe, 0xef].into()]);
        let wallet = FakeWallet::on_chain(SpokeChain::Optimism.chain_id());
        let base = baseline();
        let mut draft = DraftState::from_snapshot(&base);
        draft.twitter = "@bob".to_owned();

        let receipt = publish_records(
            &service,
            &wallet,
            &test_name(),
            &base,
            &draft,
            SpokeChain::Optimism,
        )
        .await
        .unwrap();

        assert_eq!(receipt.records_changed, 1);
        assert_eq!(receipt.chain, SpokeChain::Optimism);
        assert!(receipt.explorer_url.starts_with("https://optimistic.etherscan.io/tx/0x"));

        let payloads = service.recorded_payloads();
        assert_eq!(payloads.len(), 1);
        assert_eq!(payloads[0].ens_name, test_name().name());
        assert_eq!(payloads[0].text_array.len(), 1);
        assert_eq!(payloads[0].text_array[0].key, "com.twitter");
        assert_eq!(payloads[0].text_array[0].value, "bob");

        let submitted = wallet.submitted();
        assert_eq!(submitted.len(), 1);
        assert_eq!(submitted[0].chain_id, SpokeChain::Optimism.chain_id());
        assert_eq!(submitted[0].to, SpokeChain::Optimism.resolver_address());
        // multicall(bytes[]) selector
        assert_eq!(&submitted[0].calldata[..4], [0xac, 0x96, 0x50, 0xd8]);
    }

    #[tokio::test]
    async fn mismatched_wallet_chain_triggers_switch_before_submission() {
        let service = FakeRecordService::new().with_calls(vec![vec![0x01].into()]);
        let wallet = FakeWallet::on_chain(1);
        let base = baseline();
        let mut draft = DraftState::from_snapshot(&base);
        draft.email = "ada@a.com".to_owned();

        publish_records(&service, &wallet, &test_name(), &base, &draft, SpokeChain::Base)
            .await
            .unwrap();

        assert_eq!(wallet.switch_requests(), vec![SpokeChain::Base.chain_id()]);
        assert_eq!(wallet.submitted()[0].chain_id, SpokeChain::Base.chain_id());
    }

    #[tokio::test]
    async fn refused_switch_aborts_before_signature() {
        let service = FakeRecordService::new().with_calls(vec![vec![0x01].into()]);
        let wallet = FakeWallet::on_chain(1).refusing_switches();
        let base = baseline();
        let mut draft = DraftState::from_snapshot(&base);
        draft.email = "ada@a.com".to_owned();

        let err = publish_records(&service, &wallet, &test_name(), &base, &draft, SpokeChain::Base)
            .await
            .unwrap_err();

        assert!(matches!(err, FlowError::Wallet(_)));
        assert!(wallet.submitted().is_empty());
    }

    #[tokio::test]
    async fn service_failure_surfaces_without_submission() {
        let service = FakeRecordService::new().failing_builds();
        let wallet = FakeWallet::on_chain(10);
        let base = baseline();
        let mut draft = DraftState::from_snapshot(&base);
        draft.bio = "new bio".to_owned();

        let err = publish_records(
            &service,
            &wallet,
            &test_name(),
            &base,
            &draft,
            SpokeChain::Optimism,
        )
        .await
        .unwrap_err();

        assert!(matches!(err, FlowError::RecordService(_)));
        assert!(wallet.submitted().is_empty());
    }
}
