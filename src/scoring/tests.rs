use super::*;
use crate::client::{AuthError, ClientError, Completion, MockCompletionClient};

#[test]
fn test_parse_em_dash_reply() {
    let parsed = parse_score_response("Score: 8/10 — strong provenance").unwrap();
    assert_eq!(parsed.score, 8.0);
    assert_eq!(parsed.scale, 10.0);
    assert_eq!(parsed.rationale, "strong provenance");
}

#[test]
fn test_parse_accepts_common_separators() {
    for reply in [
        "Score: 7/10 - consistent set details",
        "score: 7/10: consistent set details",
        "SCORE = 7 / 10 | consistent set details",
        "Credibility score: 7 out of 10, consistent set details",
        "**Score:** 7/10 – consistent set details",
    ] {
        let parsed = parse_score_response(reply).unwrap();
        assert_eq!(parsed.score, 7.0, "reply: {}", reply);
        assert_eq!(parsed.rationale, "consistent set details", "reply: {}", reply);
    }
}

#[test]
fn test_parse_decimal_score_and_other_scale() {
    let parsed = parse_score_response("Score: 72.5/100 — mostly plausible").unwrap();
    assert_eq!(parsed.score, 72.5);
    assert_eq!(parsed.scale, 100.0);
}

#[test]
fn test_parse_skips_preamble_lines() {
    let reply = "Here is my assessment.\nScore: 3/10 — serial numbering does not exist for this set";
    let parsed = parse_score_response(reply).unwrap();
    assert_eq!(parsed.score, 3.0);
    assert_eq!(
        parsed.rationale,
        "serial numbering does not exist for this set"
    );
}

#[test]
fn test_parse_rationale_on_following_lines() {
    let reply = "Score: 6/10\n\nThe grade is plausible\nbut the year is missing.";
    let parsed = parse_score_response(reply).unwrap();
    assert_eq!(parsed.score, 6.0);
    assert_eq!(parsed.rationale, "The grade is plausible but the year is missing.");
}

#[test]
fn test_parse_rejects_missing_score() {
    let result = parse_score_response("This card looks great!");
    assert!(matches!(result, Err(ScoringError::Parse { .. })));
}

#[test]
fn test_parse_rejects_zero_scale() {
    let result = parse_score_response("Score: 0/0 — nothing");
    assert!(matches!(result, Err(ScoringError::Parse { .. })));
}

#[test]
fn test_parse_rejects_score_above_scale() {
    let result = parse_score_response("Score: 12/10 — amazing");
    assert!(matches!(result, Err(ScoringError::Parse { .. })));
}

#[test]
fn test_parse_rejects_empty_rationale() {
    let result = parse_score_response("Score: 8/10 —   ");
    assert!(matches!(result, Err(ScoringError::Parse { .. })));
}

#[test]
fn test_parse_error_keeps_response_text() {
    match parse_score_response("no score here") {
        Err(ScoringError::Parse { response, .. }) => assert_eq!(response, "no score here"),
        other => panic!("expected parse error, got {:?}", other),
    }
}

#[test]
fn test_build_prompt_includes_context() {
    let request = ScoreRequest::new("  Card X, mint condition ")
        .with_player("Bukayo Saka")
        .with_year(2020)
        .with_grade("PSA 10");

    let prompt = Scorer::<MockCompletionClient>::build_prompt(&request).unwrap();

    assert!(prompt.system.contains("Score: <n>/10"));
    assert!(prompt.user.starts_with("Card: Card X, mint condition\n"));
    assert!(prompt.user.contains("Player: Bukayo Saka"));
    assert!(prompt.user.contains("Year: 2020"));
    assert!(prompt.user.contains("Grade: PSA 10"));
    assert!(!prompt.user.contains("Set:"));
}

#[test]
fn test_build_prompt_rejects_blank_description() {
    let result = Scorer::<MockCompletionClient>::build_prompt(&ScoreRequest::new("   "));
    assert!(matches!(result, Err(ScoringError::InvalidInput { .. })));
}

#[tokio::test]
async fn test_score_example_request() {
    let scorer = Scorer::new(MockCompletionClient::replying(
        "Score: 8/10 — strong provenance",
    ));

    let result = scorer
        .score(&ScoreRequest::new("Card X, mint condition"))
        .await
        .unwrap();

    assert_eq!(result.score, 8.0);
    assert_eq!(result.rationale, "strong provenance");
    assert_eq!(result.model, "sonar-pro");
    assert_eq!(result.normalized(), 80.0);
    assert_eq!(scorer.client().calls(), 1);
}

#[tokio::test]
async fn test_score_missing_key_is_auth_error_without_call() {
    let scorer = Scorer::new(MockCompletionClient::without_key());

    let err = scorer
        .score(&ScoreRequest::new("Card X, mint condition"))
        .await
        .unwrap_err();

    assert!(matches!(err, ScoringError::Auth(AuthError::MissingKey)));
    assert_eq!(scorer.client().calls(), 0);
}

#[tokio::test]
async fn test_score_malformed_reply_is_parse_error() {
    let scorer = Scorer::new(MockCompletionClient::replying(
        "I think this card is probably fine.",
    ));

    let err = scorer
        .score(&ScoreRequest::new("Card X, mint condition"))
        .await
        .unwrap_err();

    assert!(matches!(err, ScoringError::Parse { .. }));
}

#[tokio::test]
async fn test_score_blank_description_never_calls_client() {
    let scorer = Scorer::new(MockCompletionClient::replying("Score: 8/10 — x"));

    let err = scorer.score(&ScoreRequest::new("")).await.unwrap_err();

    assert!(matches!(err, ScoringError::InvalidInput { .. }));
    assert_eq!(scorer.client().calls(), 0);
}

#[tokio::test]
async fn test_score_network_error_passes_through() {
    let client = MockCompletionClient::new();
    client.push_error(ClientError::Network {
        url: "mock://".to_string(),
        status: Some(503),
        message: "unavailable".to_string(),
    });
    let scorer = Scorer::new(client);

    let err = scorer
        .score(&ScoreRequest::new("Card X"))
        .await
        .unwrap_err();

    assert!(matches!(err, ScoringError::Network(_)));
}

#[tokio::test]
async fn test_score_malformed_body_maps_to_parse_error() {
    let client = MockCompletionClient::new();
    client.push_error(ClientError::MalformedResponse {
        message: "expected value".to_string(),
    });
    let scorer = Scorer::new(client);

    let err = scorer
        .score(&ScoreRequest::new("Card X"))
        .await
        .unwrap_err();

    assert!(matches!(err, ScoringError::Parse { .. }));
}

#[tokio::test]
async fn test_score_body_without_message_content_is_parse_error() {
    let client = MockCompletionClient::new();
    let body = r#"{"choices":[{"text":"Score: 8/10 — fine"}]}"#;
    client.push_reply(Completion::from_response_body(body).unwrap());
    let scorer = Scorer::new(client);

    let err = scorer
        .score(&ScoreRequest::new("Card X, mint condition"))
        .await
        .unwrap_err();

    match err {
        ScoringError::Parse { reason, response } => {
            assert!(reason.contains("no message content"));
            assert!(response.contains("Score: 8/10"));
        }
        other => panic!("expected Parse, got {:?}", other),
    }
}

#[tokio::test]
async fn test_score_uses_source_url_in_prompt() {
    let client = MockCompletionClient::new();
    client.push_reply(Completion::text("Score: 6/10 — listing photos match"));
    let scorer = Scorer::new(client);

    let request = ScoreRequest::new("2020 Prizm Saka RC")
        .with_source_url("https://www.ebay.com/itm/123");
    scorer.score(&request).await.unwrap();

    let prompts = scorer.client().prompts();
    assert!(prompts[0].user.contains("Source: https://www.ebay.com/itm/123"));
}

#[tokio::test]
async fn test_score_sends_built_prompt() {
    let client = MockCompletionClient::new();
    client.push_reply(Completion::text("Score: 5/10 — generic"));
    let scorer = Scorer::new(client);

    scorer
        .score(&ScoreRequest::new("2024 Topps Chrome Refractor").with_set_name("Topps Chrome"))
        .await
        .unwrap();

    let prompts = scorer.client().prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].user.contains("Set: Topps Chrome"));
}

#[test]
fn test_score_result_display_and_serde() {
    let result = ScoreResult {
        score: 8.0,
        scale: 10.0,
        rationale: "strong provenance".to_string(),
        model: "sonar-pro".to_string(),
    };
    assert_eq!(result.to_string(), "8/10 (strong provenance)");

    let json = serde_json::to_value(&result).unwrap();
    assert_eq!(json["rationale"], "strong provenance");
    assert_eq!(json["score"], 8.0);
}
