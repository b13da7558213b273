use postmark_client::PostmarkError;
use wiremock::matchers::{any, method, path};
use wiremock::{Mock, ResponseTemplate};
use crate::helpers::{ok_result, random_message, spawn_app};

#[tokio::test]
async fn test_batch_results_match_the_order_of_messages() {
    let app = spawn_app().await;

    Mock::given(path("/email/batch"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            ok_result("first@x.com"),
            {
                "ErrorCode": 406,
                "Message": "You tried to send to a recipient that has been marked as inactive."
            },
        ])))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let results = app
        .email_client
        .send_email_batch(vec![random_message(), random_message()])
        .await
        .unwrap();

    assert_eq!(results.len(), 2);
    assert!(results[0].is_success());
    assert_eq!(results[0].to(), "first@x.com");
    assert_eq!(results[1].error_code(), 406);
}

#[tokio::test]
async fn test_batch_body_is_an_array_of_messages_in_order() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([
            ok_result("a@x.com"),
            ok_result("b@x.com"),
        ])))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let first = random_message().subject("first");
    let second = random_message().subject("second");
    app.email_client
        .send_email_batch(vec![first, second])
        .await
        .unwrap();

    let body = app.received_bodies().await.pop().unwrap();
    let subjects: Vec<&str> = body
        .as_array()
        .unwrap()
        .iter()
        .map(|message| message["Subject"].as_str().unwrap())
        .collect();
    assert_eq!(subjects, vec!["first", "second"]);
}

#[tokio::test]
async fn test_empty_batch_sends_an_empty_array() {
    let app = spawn_app().await;

    Mock::given(path("/email/batch"))
        .respond_with(ResponseTemplate::new(200).set_body_json(serde_json::json!([])))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let results = app.email_client.send_email_batch(Vec::new()).await.unwrap();

    assert!(results.is_empty());
    assert_eq!(app.received_bodies().await, vec![serde_json::json!([])]);
}

#[tokio::test]
async fn test_whole_batch_rejection_is_returned_as_a_result() {
    let app = spawn_app().await;

    Mock::given(path("/email/batch"))
        .respond_with(ResponseTemplate::new(401).set_body_json(serde_json::json!({
            "ErrorCode": 10,
            "Message": "Bad or missing Server API token."
        })))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let results = app
        .email_client
        .send_email_batch(vec![random_message(), random_message()])
        .await
        .unwrap();

    assert_eq!(results.len(), 1);
    assert!(!results[0].is_success());
    assert_eq!(results[0].error_code(), 10);
    assert_eq!(results[0].message(), "Bad or missing Server API token.");
}

#[tokio::test]
async fn test_undecodable_batch_response_is_an_error() {
    let app = spawn_app().await;

    Mock::given(any())
        .respond_with(ResponseTemplate::new(502).set_body_string("Bad Gateway"))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let outcome = app
        .email_client
        .send_email_batch(vec![random_message()])
        .await;

    assert!(matches!(outcome, Err(PostmarkError::Decode { status: 502, .. })));
}
