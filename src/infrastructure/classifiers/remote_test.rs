use anyhow::Result;

use super::ClassifyResponse;
use super::Remote;
use crate::domain::models::Message;
use crate::domain::models::Role;
use crate::domain::models::TopicClassifier;

impl Remote {
    fn with_url(url: String) -> Remote {
        return Remote {
            url,
            token: "".to_string(),
            timeout: "200".to_string(),
        };
    }
}

fn history() -> Vec<Message> {
    return vec![Message::new(Role::User, "The budget is 40k.")];
}

#[tokio::test]
async fn it_successfully_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/api/health").with_status(200).create();

    let classifier = Remote::with_url(server.url());
    let res = classifier.health_check().await;

    assert!(res.is_ok());
    mock.assert();
}

#[tokio::test]
async fn it_fails_health_checks() {
    let mut server = mockito::Server::new();
    let mock = server.mock("GET", "/api/health").with_status(500).create();

    let classifier = Remote::with_url(server.url());
    let res = classifier.health_check().await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_classifies_a_topic() -> Result<()> {
    let body = serde_json::to_string(&ClassifyResponse { completed: true })?;

    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/topics/classify")
        .with_status(200)
        .with_body(body)
        .create();

    let classifier = Remote::with_url(server.url());
    let res = classifier.classify(&history(), "budget").await?;

    assert!(res);
    mock.assert();

    return Ok(());
}

#[tokio::test]
async fn it_fails_on_a_non_success_status() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/topics/classify")
        .with_status(503)
        .create();

    let classifier = Remote::with_url(server.url());
    let res = classifier.classify(&history(), "budget").await;

    assert!(res.is_err());
    mock.assert();
}

#[tokio::test]
async fn it_fails_on_a_malformed_body() {
    let mut server = mockito::Server::new();
    let mock = server
        .mock("POST", "/api/topics/classify")
        .with_status(200)
        .with_body("not json")
        .create();

    let classifier = Remote::with_url(server.url());
    let res = classifier.classify(&history(), "budget").await;

    assert!(res.is_err());
    mock.assert();
}
