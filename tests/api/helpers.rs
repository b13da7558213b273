use fake::faker::internet::en::SafeEmail;
use fake::faker::lorem::en::{Paragraph, Sentence};
use fake::faker::name::en::FirstName;
use fake::Fake;
use once_cell::sync::Lazy;
use postmark_client::telemetry::{get_subscriber, init_subscriber};
use postmark_client::{Address, EmailAddress, EmailClient, Message};
use wiremock::MockServer;

pub const API_KEY: &str = "test-server-token";

// Ensure that the `tracing` stack is only initialized once rather than for each test case
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_lvl = "info".into();
    let subscriber_name = "test".into();

    // The sink is part of the type returned by `get_subscriber`, hence the two branches
    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(subscriber_name, default_filter_lvl, std::io::stdout);
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(subscriber_name, default_filter_lvl, std::io::sink);
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub email_server: MockServer,
    pub email_client: EmailClient,
}

/// Starts a mock Postmark server and a client pointed at it over plain HTTP.
pub async fn spawn_app() -> TestApp {
    Lazy::force(&TRACING);

    let email_server = MockServer::start().await;
    let host = email_server
        .uri()
        .trim_start_matches("http://")
        .to_owned();
    let email_client = EmailClient::new(API_KEY, false).host(host);

    TestApp {
        email_server,
        email_client,
    }
}

impl TestApp {
    /// Request bodies received by the mock server, decoded as JSON.
    pub async fn received_bodies(&self) -> Vec<serde_json::Value> {
        self.email_server
            .received_requests()
            .await
            .unwrap()
            .iter()
            .map(|request| serde_json::from_slice(&request.body).unwrap())
            .collect()
    }
}

pub fn random_address() -> Address {
    let email = EmailAddress::parse(SafeEmail().fake()).unwrap();
    Address::new(FirstName().fake::<String>(), email)
}

pub fn random_message() -> Message {
    let subject: String = Sentence(1..2).fake();
    let content: String = Paragraph(1..10).fake();
    Message::new(random_address())
        .to(random_address())
        .subject(subject)
        .text_body(content)
}

pub fn ok_result(to: &str) -> serde_json::Value {
    serde_json::json!({
        "To": to,
        "SubmittedAt": "2014-02-17T07:25:01.4178645-05:00",
        "MessageID": "0a129aee-e1cd-480d-b08d-4f48548ff48d",
        "ErrorCode": 0,
        "Message": "OK"
    })
}

