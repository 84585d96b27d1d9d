//! End-to-end settlement flows through the engine.

use codebay_engine::external::IntentOutcome;
use codebay_engine::store::MarketStore;
use codebay_engine::{compute_breakdown, AccessDecision, EngineError};
use rust_decimal_macros::dec;

use crate::utils::*;

#[tokio::test]
async fn full_purchase_flow_grants_paid_access() {
    let stack = stack();
    enable_charges(&stack, &seller()).await;

    let project = stack
        .engine()
        .create_draft(&seller(), draft_input(paid_license(dec!(25.00))))
        .await
        .unwrap();
    let project = stack.engine().publish(&seller(), &project.id).await.unwrap();

    // No access before payment.
    let before = stack
        .engine()
        .can_access(&project.id, Some(&buyer()))
        .await
        .unwrap();
    assert!(!before.granted);

    let intent = stack
        .engine()
        .create_intent(&buyer(), &project.id)
        .await
        .unwrap();
    let purchase = stack
        .engine()
        .confirm_purchase(&intent.intent_id)
        .await
        .unwrap();

    // Recorded price audits against a recomputation.
    let breakdown = compute_breakdown(dec!(25.00), 20).unwrap();
    assert_eq!(purchase.price_paid, breakdown.customer_total);

    let after = stack
        .engine()
        .can_access(&project.id, Some(&buyer()))
        .await
        .unwrap();
    assert_eq!(after, AccessDecision::paid());

    // Access stays granted on every subsequent call.
    for _ in 0..5 {
        let again = stack
            .engine()
            .can_access(&project.id, Some(&buyer()))
            .await
            .unwrap();
        assert_eq!(again, AccessDecision::paid());
    }
}

#[tokio::test]
async fn rapid_double_checkout_settles_once() {
    let stack = stack();
    enable_charges(&stack, &seller()).await;
    let project = stack
        .engine()
        .create_draft(&seller(), draft_input(paid_license(dec!(25.00))))
        .await
        .unwrap();
    let project = stack.engine().publish(&seller(), &project.id).await.unwrap();

    // Two checkout starts before either confirms: the pending intent is
    // reused rather than double-charging.
    let first = stack
        .engine()
        .create_intent(&buyer(), &project.id)
        .await
        .unwrap();
    let second = stack
        .engine()
        .create_intent(&buyer(), &project.id)
        .await
        .unwrap();
    assert_eq!(first.intent_id, second.intent_id);

    let (a, b) = tokio::join!(
        stack.engine().confirm_purchase(&first.intent_id),
        stack.engine().confirm_purchase(&second.intent_id),
    );
    assert_eq!(a.unwrap().id, b.unwrap().id);
    assert_eq!(
        stack
            .store
            .count_active_purchases(&project.id)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn declined_then_retried_checkout() {
    let stack = stack();
    enable_charges(&stack, &seller()).await;
    let project = stack
        .engine()
        .create_draft(&seller(), draft_input(paid_license(dec!(25.00))))
        .await
        .unwrap();
    let project = stack.engine().publish(&seller(), &project.id).await.unwrap();

    let intent = stack
        .engine()
        .create_intent(&buyer(), &project.id)
        .await
        .unwrap();
    stack
        .processor
        .set_outcome(IntentOutcome::Failed("insufficient_funds".into()));
    let err = stack
        .engine()
        .confirm_purchase(&intent.intent_id)
        .await
        .unwrap_err();
    assert!(matches!(err, EngineError::PaymentDeclined(_)));

    // No access after the decline.
    let denied = stack
        .engine()
        .can_access(&project.id, Some(&buyer()))
        .await
        .unwrap();
    assert!(!denied.granted);

    stack.processor.set_outcome(IntentOutcome::Succeeded);
    let retry = stack
        .engine()
        .create_intent(&buyer(), &project.id)
        .await
        .unwrap();
    stack
        .engine()
        .confirm_purchase(&retry.intent_id)
        .await
        .unwrap();
    assert_eq!(
        stack
            .store
            .count_active_purchases(&project.id)
            .await
            .unwrap(),
        1
    );
}

#[tokio::test]
async fn reprice_never_touches_settled_purchases() {
    let stack = stack();
    enable_charges(&stack, &seller()).await;
    let project = stack
        .engine()
        .create_draft(&seller(), draft_input(paid_license(dec!(25.00))))
        .await
        .unwrap();
    let project = stack.engine().publish(&seller(), &project.id).await.unwrap();

    let intent = stack
        .engine()
        .create_intent(&buyer(), &project.id)
        .await
        .unwrap();
    let purchase = stack
        .engine()
        .confirm_purchase(&intent.intent_id)
        .await
        .unwrap();

    stack
        .engine()
        .reprice(&seller(), &project.id, dec!(99.00))
        .await
        .unwrap();

    let stored = stack
        .store
        .active_purchase(&buyer(), &project.id)
        .await
        .unwrap()
        .unwrap();
    assert_eq!(stored.price_paid, purchase.price_paid);
    assert_eq!(stored.price_paid, dec!(30));
}
