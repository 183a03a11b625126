//! End-to-end behaviour of the session engine through its public API.

use std::sync::Arc;
use std::time::Duration;

use scam_honeypot::adapters::ai::MockReplyGenerator;
use scam_honeypot::adapters::evaluator::RecordingEvaluatorClient;
use scam_honeypot::adapters::storage::InMemorySessionStore;
use scam_honeypot::application::{
    CallbackDispatcher, HandleMessageCommand, LifecycleConfig, ReplySource,
    SessionLifecycleManager,
};
use scam_honeypot::domain::detection::EntityExtractor;
use scam_honeypot::domain::foundation::{SessionKey, Timestamp};
use scam_honeypot::domain::intelligence::{IntelligenceAggregator, IntelligenceCategory};
use scam_honeypot::domain::session::{FinalizationReason, SessionStatus};
use scam_honeypot::ports::{EvaluatorError, ReplyError, SessionStore};

fn at(secs: u64) -> Timestamp {
    Timestamp::from_unix_secs(1_750_000_000 + secs)
}

fn cmd(session: &str, text: &str) -> HandleMessageCommand {
    HandleMessageCommand::new(SessionKey::new(session).unwrap(), text)
}

fn quiet_config() -> LifecycleConfig {
    LifecycleConfig {
        sweep_probability: 0.0,
        ..LifecycleConfig::default()
    }
}

async fn wait_for_reports(evaluator: &RecordingEvaluatorClient, expected: usize) {
    for _ in 0..50 {
        if evaluator.report_count().await >= expected {
            return;
        }
        tokio::time::sleep(Duration::from_millis(5)).await;
    }
}

// =============================================================================
// Intelligence accumulation
// =============================================================================

#[test]
fn merging_an_extraction_twice_changes_nothing() {
    let aggregator = IntelligenceAggregator::new();
    let extraction = EntityExtractor::new().extract("Pay fraud@ybl or visit https://x.example");

    let once = aggregator.merge(&Default::default(), &extraction);
    assert_eq!(aggregator.merge(&once, &extraction), once);
}

// =============================================================================
// Lifecycle properties
// =============================================================================

#[tokio::test]
async fn full_scam_conversation() {
    let generator = MockReplyGenerator::new()
        .with_reply("Oh no! What should I do sir?")
        .with_error(ReplyError::Timeout { timeout_secs: 5 })
        .with_reply("Okay, which account number?");
    let evaluator = RecordingEvaluatorClient::new();
    let store = InMemorySessionStore::new();
    let manager = SessionLifecycleManager::new(
        Arc::new(store.clone()),
        Arc::new(generator.clone()),
        CallbackDispatcher::new(Arc::new(evaluator.clone())),
        quiet_config(),
    );

    let opening = manager
        .handle_at(cmd("conv", "Dear customer your KYC is pending, act now"), at(0))
        .await;
    assert!(opening.scam_detected);
    assert_eq!(opening.reply_source, ReplySource::Generated);
    assert_eq!(opening.status, SessionStatus::ActiveScamUnfinalized);

    let fallback = manager.handle_at(cmd("conv", "hello?"), at(30)).await;
    assert!(fallback.scam_detected, "scam flag is sticky");
    assert_eq!(fallback.reply_source, ReplySource::Fallback);
    assert!(fallback.finalized.is_none());

    let reveal = manager
        .handle_at(
            cmd("conv", "Transfer to bank account 001234567890 or call 9123456789"),
            at(60),
        )
        .await;
    assert_eq!(reveal.finalized, Some(FinalizationReason::SufficientIntelligence));
    assert_eq!(reveal.status, SessionStatus::ActiveScamFinalized);
    assert_eq!(reveal.total_messages, 6);

    let after = manager.handle_at(cmd("conv", "pay fast, also ok@upi"), at(90)).await;
    assert!(after.finalized.is_none());
    assert_eq!(after.reply_source, ReplySource::Generated);
    assert!(after
        .intelligence
        .get(IntelligenceCategory::UpiIds)
        .contains("ok@upi"));

    wait_for_reports(&evaluator, 1).await;
    let reports = evaluator.reports().await;
    assert_eq!(reports.len(), 1);
    assert_eq!(reports[0].total_messages_exchanged, 6);
    assert!(reports[0]
        .extracted_intelligence
        .get(IntelligenceCategory::BankAccounts)
        .contains("001234567890"));
    assert_eq!(generator.call_count(), 4);
    assert_eq!(store.len().await, 1);
}

#[tokio::test]
async fn evaluator_failure_never_reaches_caller() {
    let evaluator = RecordingEvaluatorClient::new().failing_with(EvaluatorError::Rejected {
        status: 503,
        body: "unavailable".to_string(),
    });
    let manager = SessionLifecycleManager::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(MockReplyGenerator::new()),
        CallbackDispatcher::new(Arc::new(evaluator.clone())),
        quiet_config(),
    );

    let result = manager
        .handle_at(
            cmd("s", "Urgent! Pay x@paytm or open http://bad.example now"),
            at(0),
        )
        .await;
    wait_for_reports(&evaluator, 1).await;

    assert_eq!(result.finalized, Some(FinalizationReason::SufficientIntelligence));
    assert_eq!(evaluator.report_count().await, 1);

    let again = manager.handle_at(cmd("s", "hello"), at(5)).await;
    tokio::time::sleep(Duration::from_millis(20)).await;
    assert!(again.finalized.is_none());
    assert_eq!(evaluator.report_count().await, 1, "no retry");
}

#[tokio::test]
async fn concurrent_sessions_each_finalize_once() {
    let evaluator = RecordingEvaluatorClient::new();
    let manager = Arc::new(SessionLifecycleManager::new(
        Arc::new(InMemorySessionStore::new()),
        Arc::new(MockReplyGenerator::new()),
        CallbackDispatcher::new(Arc::new(evaluator.clone())),
        quiet_config(),
    ));

    let mut tasks = Vec::new();
    for session in 0..4 {
        for message in 0..3u64 {
            let manager = manager.clone();
            tasks.push(tokio::spawn(async move {
                manager
                    .handle_at(
                        cmd(
                            &format!("s{}", session),
                            "Verify now: pay a@ybl, link http://x.example",
                        ),
                        at(message),
                    )
                    .await
            }));
        }
    }

    let mut finalized = 0;
    for task in tasks {
        if task.await.unwrap().finalized.is_some() {
            finalized += 1;
        }
    }
    wait_for_reports(&evaluator, 4).await;

    assert_eq!(finalized, 4);
    assert_eq!(evaluator.report_count().await, 4);
}
