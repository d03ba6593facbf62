//! HTTP transport against an in-process fake `/chatbot` endpoint.

use std::net::SocketAddr;

use axum::{Json, Router, http::StatusCode, response::IntoResponse, routing::post};
use medi_diagnosis_ui::chat::{ChatOutcome, ChatReply, ChatTransport, HttpTransport, TransportError};
use serde_json::{Value, json};

async fn chatbot(Json(body): Json<Value>) -> impl IntoResponse {
    let message = body["message"].as_str().unwrap_or_default().to_lowercase();
    match message.as_str() {
        "boom" => (StatusCode::OK, Json(json!({ "error": "Model unavailable" }))).into_response(),
        "down" => (StatusCode::SERVICE_UNAVAILABLE, "maintenance").into_response(),
        "garbled" => (StatusCode::OK, "<html>not json</html>").into_response(),
        "odd" => (StatusCode::OK, Json(json!({ "status": "ok" }))).into_response(),
        _ => Json(json!({ "response": format!("You said: {message}") })).into_response(),
    }
}

async fn serve() -> SocketAddr {
    let app = Router::new().route("/chatbot", post(chatbot));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    addr
}

async fn transport() -> HttpTransport {
    let addr = serve().await;
    HttpTransport::new(format!("http://{addr}"), "/chatbot").unwrap()
}

#[tokio::test]
async fn test_response_is_returned_verbatim() {
    let transport = transport().await;
    let reply = transport.exchange("Hello").await.unwrap();
    assert_eq!(reply, ChatReply::Response("You said: hello".to_string()));
}

#[tokio::test]
async fn test_error_flag_is_a_server_error() {
    let transport = transport().await;
    let reply = transport.exchange("boom").await.unwrap();
    assert_eq!(reply, ChatReply::ServerError(json!("Model unavailable")));
    assert_eq!(ChatOutcome::from(Ok(reply)), ChatOutcome::ServerError);
}

#[tokio::test]
async fn test_failures_map_to_transport_errors() {
    let transport = transport().await;

    let err = transport.exchange("down").await.unwrap_err();
    assert!(matches!(err, TransportError::Status(503)));

    let err = transport.exchange("garbled").await.unwrap_err();
    assert!(matches!(err, TransportError::Json(_)));

    let err = transport.exchange("odd").await.unwrap_err();
    assert!(matches!(err, TransportError::UnexpectedShape));
}

#[tokio::test]
async fn test_unreachable_endpoint_is_an_http_error() {
    // Bind then drop to get a port nothing listens on.
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);

    let transport = HttpTransport::new(format!("http://{addr}"), "/chatbot").unwrap();
    let result = transport.exchange("hello").await;
    assert!(matches!(result, Err(TransportError::Http(_))));
    assert_eq!(ChatOutcome::from(result), ChatOutcome::TransportFailure);
}
