use chrono::Utc;
use codebay_types::IntentId;
use rust_decimal_macros::dec;

use crate::external::IntentOutcome;
use crate::store::MarketStore;
use crate::tests::test_utils::*;
use crate::types::{IntentRecord, IntentStatus};
use crate::EngineError;

// --- create_intent preconditions ---

#[tokio::test]
async fn create_intent_locks_billed_total() {
    let bed = new_engine();
    let project = published_paid_project(&bed, dec!(25.00)).await;

    let intent = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();
    assert_eq!(intent.amount, dec!(30));
    assert!(!intent.client_secret.is_empty());
}

#[tokio::test]
async fn create_intent_on_draft_fails() {
    let bed = new_engine();
    enable_charges(&bed, &seller()).await;
    let project = bed
        .engine
        .create_draft(&seller(), draft_input(paid_license(dec!(25.00))))
        .await
        .unwrap();

    let err = bed
        .engine
        .create_intent(&buyer(), &project.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
}

#[tokio::test]
async fn create_intent_on_free_project_fails() {
    let bed = new_engine();
    let project = bed
        .engine
        .create_draft(&seller(), draft_input(free_license()))
        .await
        .unwrap();
    let project = bed.engine.publish(&seller(), &project.id).await.unwrap();

    let err = bed
        .engine
        .create_intent(&buyer(), &project.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
}

#[tokio::test]
async fn author_cannot_buy_own_project() {
    let bed = new_engine();
    let project = published_paid_project(&bed, dec!(25.00)).await;

    let err = bed
        .engine
        .create_intent(&seller(), &project.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
}

#[tokio::test]
async fn create_intent_rejected_after_purchase() {
    let bed = new_engine();
    let project = published_paid_project(&bed, dec!(25.00)).await;

    let intent = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();
    bed.engine.confirm_purchase(&intent.intent_id).await.unwrap();

    let err = bed
        .engine
        .create_intent(&buyer(), &project.id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::DuplicatePurchase(_)));
}

#[tokio::test]
async fn create_intent_reuses_pending_intent() {
    let bed = new_engine();
    let project = published_paid_project(&bed, dec!(25.00)).await;

    let first = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();
    let second = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();
    assert_eq!(first.intent_id, second.intent_id);
    assert_eq!(first.amount, second.amount);
}

// --- confirm_purchase ---

#[tokio::test]
async fn confirm_records_active_purchase() {
    let bed = new_engine();
    let project = published_paid_project(&bed, dec!(25.00)).await;

    let intent = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();
    let purchase = bed.engine.confirm_purchase(&intent.intent_id).await.unwrap();

    assert!(purchase.is_active);
    assert_eq!(purchase.price_paid, dec!(30));
    assert_eq!(purchase.buyer, buyer());
    assert_eq!(purchase.project, project.id);
    assert_eq!(purchase.intent_id, intent.intent_id);
}

#[tokio::test]
async fn confirm_is_idempotent() {
    let bed = new_engine();
    let project = published_paid_project(&bed, dec!(25.00)).await;

    let intent = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();
    let first = bed.engine.confirm_purchase(&intent.intent_id).await.unwrap();
    let second = bed.engine.confirm_purchase(&intent.intent_id).await.unwrap();

    assert_eq!(first.id, second.id);
    assert_eq!(
        bed.store.count_active_purchases(&project.id).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn confirm_unknown_intent_fails() {
    let bed = new_engine();
    let err = bed
        .engine
        .confirm_purchase(&IntentId::new("pi_missing"))
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::IntentNotFound(_)));
}

#[tokio::test]
async fn declined_payment_leaves_no_purchase() {
    let bed = new_engine();
    let project = published_paid_project(&bed, dec!(25.00)).await;

    let intent = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();
    bed.processor
        .set_outcome(IntentOutcome::Failed("card_declined".into()));

    let err = bed
        .engine
        .confirm_purchase(&intent.intent_id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::PaymentDeclined(_)));
    assert_eq!(
        bed.store.count_active_purchases(&project.id).await.unwrap(),
        0
    );

    // The buyer retries with a fresh intent once the card works again.
    bed.processor.set_outcome(IntentOutcome::Succeeded);
    let retry = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();
    assert_ne!(retry.intent_id, intent.intent_id);
    bed.engine.confirm_purchase(&retry.intent_id).await.unwrap();
}

#[tokio::test]
async fn confirm_on_failed_intent_stays_declined() {
    let bed = new_engine();
    let project = published_paid_project(&bed, dec!(25.00)).await;

    let intent = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();
    bed.processor
        .set_outcome(IntentOutcome::Failed("card_declined".into()));
    let _ = bed.engine.confirm_purchase(&intent.intent_id).await;

    bed.processor.set_outcome(IntentOutcome::Succeeded);
    let err = bed
        .engine
        .confirm_purchase(&intent.intent_id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::PaymentDeclined(_)));
}

#[tokio::test]
async fn pending_outcome_does_not_grant() {
    let bed = new_engine();
    let project = published_paid_project(&bed, dec!(25.00)).await;

    let intent = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();
    bed.processor.set_outcome(IntentOutcome::Pending);

    let err = bed
        .engine
        .confirm_purchase(&intent.intent_id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::InvalidState(_)));
    assert_eq!(
        bed.store.count_active_purchases(&project.id).await.unwrap(),
        0
    );
}

// --- Price changes between browse and purchase ---

#[tokio::test]
async fn intent_amount_survives_reprice() {
    let bed = new_engine();
    let project = published_paid_project(&bed, dec!(25.00)).await;

    let intent = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();
    bed.engine
        .reprice(&seller(), &project.id, dec!(40.00))
        .await
        .unwrap();

    let purchase = bed.engine.confirm_purchase(&intent.intent_id).await.unwrap();
    assert_eq!(purchase.price_paid, dec!(30));

    // A later buyer pays the new price.
    let later = bed
        .engine
        .create_intent(&other_buyer(), &project.id)
        .await
        .unwrap();
    assert_eq!(later.amount, dec!(48));
}

// --- Races ---

#[tokio::test]
async fn two_intents_settle_at_most_one_purchase() {
    let bed = new_engine();
    let project = published_paid_project(&bed, dec!(25.00)).await;

    // Two intents for the same pair, as if created before either confirmed.
    let first = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();
    let second = IntentRecord {
        intent_id: IntentId::new("pi_shadow"),
        client_secret: "pi_shadow_secret".into(),
        project: project.id,
        buyer: buyer(),
        amount: first.amount,
        currency: first.currency,
        status: IntentStatus::Pending,
        created_at: Utc::now(),
    };
    bed.store.insert_intent(second.clone()).await.unwrap();

    bed.engine.confirm_purchase(&first.intent_id).await.unwrap();
    let err = bed
        .engine
        .confirm_purchase(&second.intent_id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::DuplicatePurchase(_)));
    assert_eq!(
        bed.store.count_active_purchases(&project.id).await.unwrap(),
        1
    );
}

#[tokio::test]
async fn concurrent_confirms_create_one_purchase() {
    let bed = new_engine();
    let project = published_paid_project(&bed, dec!(25.00)).await;
    let intent = bed.engine.create_intent(&buyer(), &project.id).await.unwrap();

    let (a, b) = tokio::join!(
        bed.engine.confirm_purchase(&intent.intent_id),
        bed.engine.confirm_purchase(&intent.intent_id),
    );
    let a = a.unwrap();
    let b = b.unwrap();
    assert_eq!(a.id, b.id);
    assert_eq!(
        bed.store.count_active_purchases(&project.id).await.unwrap(),
        1
    );
}
