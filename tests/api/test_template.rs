use wiremock::matchers::{method, path};
use wiremock::{Mock, ResponseTemplate};
use crate::helpers::{ok_result, random_message, spawn_app};

#[tokio::test]
async fn test_template_id_routes_to_the_template_endpoint() {
    let app = spawn_app().await;

    Mock::given(path("/email/withTemplate"))
        .and(method("POST"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_result("b@x.com")))
        .expect(1)
        .mount(&app.email_server)
        .await;

    let model = serde_json::json!({"product_name": "Newsletter", "name": "Ursula"})
        .as_object()
        .cloned()
        .unwrap();
    let message = random_message().template(1234, model);

    let result = app.email_client.send_email(message).await.unwrap();
    assert!(result.is_success());

    let body = app.received_bodies().await.pop().unwrap();
    assert_eq!(body["TemplateId"], 1234);
    assert_eq!(body["TemplateModel"]["name"], "Ursula");
}

#[tokio::test]
async fn test_zero_template_id_routes_to_the_plain_endpoint() {
    let app = spawn_app().await;

    Mock::given(path("/email"))
        .respond_with(ResponseTemplate::new(200).set_body_json(ok_result("b@x.com")))
        .expect(1)
        .mount(&app.email_server)
        .await;
    Mock::given(path("/email/withTemplate"))
        .respond_with(ResponseTemplate::new(200))
        .expect(0)
        .mount(&app.email_server)
        .await;

    let message = random_message().template(0, serde_json::Map::new());

    app.email_client.send_email(message).await.unwrap();

    let body = app.received_bodies().await.pop().unwrap();
    assert!(body.get("TemplateId").is_none());
    assert!(body.get("TemplateModel").is_none());
}
