use crate::store::MarketStore;
use crate::tests::test_utils::*;
use crate::EngineError;

#[tokio::test]
async fn onboarding_creates_account_with_flags_off() {
    let bed = new_engine();
    let link = bed.engine.start_onboarding(&seller()).await.unwrap();

    assert!(link.onboarding_url.starts_with("https://"));
    assert!(link.account.has_account);
    assert!(!link.account.details_submitted);
    assert!(!link.account.charges_enabled);
    assert!(!link.account.payouts_enabled);
}

#[tokio::test]
async fn onboarding_is_resumable() {
    let bed = new_engine();
    let first = bed.engine.start_onboarding(&seller()).await.unwrap();

    // Partially enabled account: resume must not reset the known flags.
    bed.processor.set_connect_status(true, false, false);
    bed.engine.refresh_status(&seller()).await.unwrap();

    let second = bed.engine.start_onboarding(&seller()).await.unwrap();
    assert_eq!(second.account.account_id, first.account.account_id);
    assert!(second.account.details_submitted);
}

#[tokio::test]
async fn refresh_pulls_flags_from_processor() {
    let bed = new_engine();
    bed.engine.start_onboarding(&seller()).await.unwrap();

    bed.processor.set_connect_status(true, true, true);
    let account = bed.engine.refresh_status(&seller()).await.unwrap();
    assert!(account.details_submitted);
    assert!(account.charges_enabled);
    assert!(account.payouts_enabled);
    assert!(account.fully_enabled());
}

#[tokio::test]
async fn repeated_refresh_is_a_noop() {
    let bed = new_engine();
    bed.engine.start_onboarding(&seller()).await.unwrap();
    bed.processor.set_connect_status(true, true, false);

    let first = bed.engine.refresh_status(&seller()).await.unwrap();
    let second = bed.engine.refresh_status(&seller()).await.unwrap();
    assert_eq!(first.updated_at, second.updated_at);
}

#[tokio::test]
async fn refresh_without_account_fails() {
    let bed = new_engine();
    let err = bed.engine.refresh_status(&seller()).await.unwrap_err();
    assert!(matches!(err, EngineError::NotFound(_)));
}

#[tokio::test]
async fn flags_never_advance_without_refresh() {
    let bed = new_engine();
    bed.engine.start_onboarding(&seller()).await.unwrap();

    // Processor says enabled, but nobody has refreshed yet.
    bed.processor.set_connect_status(true, true, true);
    let stored = bed
        .store
        .get_seller_account(&seller())
        .await
        .unwrap()
        .unwrap();
    assert!(!stored.charges_enabled);
}
