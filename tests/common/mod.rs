#![allow(dead_code)]

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{
    Json, Router,
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::post,
};
use chat_widget::{config::WidgetConfig, services::message_client::MessageClient};
use serde_json::{Value, json};
use tokio::{net::TcpListener, sync::Mutex};

/// What the stub `/chat` endpoint answers with.
#[derive(Clone)]
pub enum StubReply {
    Json(Value),
    Text(&'static str),
    Status(StatusCode, Value),
    /// `{"response": "echo: <message>"}`, delayed when the message starts
    /// with "slow".
    Echo,
}

#[derive(Clone)]
struct StubState {
    reply: StubReply,
    requests: Arc<Mutex<Vec<Value>>>,
}

pub struct StubBackend {
    pub addr: SocketAddr,
    requests: Arc<Mutex<Vec<Value>>>,
}

impl StubBackend {
    pub async fn spawn(reply: StubReply) -> Self {
        let requests = Arc::new(Mutex::new(Vec::new()));
        let state = StubState {
            reply,
            requests: Arc::clone(&requests),
        };
        let app = Router::new()
            .route("/chat", post(stub_chat))
            .with_state(state);

        let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
        let addr = listener.local_addr().unwrap();
        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self { addr, requests }
    }

    pub fn url(&self) -> String {
        format!("http://{}", self.addr)
    }

    pub fn client(&self) -> MessageClient {
        MessageClient::new(WidgetConfig::new(&self.url(), "acme").unwrap())
    }

    /// Request bodies received so far, in arrival order.
    pub async fn requests(&self) -> Vec<Value> {
        self.requests.lock().await.clone()
    }
}

async fn stub_chat(State(state): State<StubState>, Json(body): Json<Value>) -> Response {
    state.requests.lock().await.push(body.clone());

    match state.reply {
        StubReply::Json(value) => Json(value).into_response(),
        StubReply::Text(text) => text.into_response(),
        StubReply::Status(status, value) => (status, Json(value)).into_response(),
        StubReply::Echo => {
            let message = body["message"].as_str().unwrap_or_default().to_string();
            if message.starts_with("slow") {
                tokio::time::sleep(Duration::from_millis(300)).await;
            }
            Json(json!({ "response": format!("echo: {message}") })).into_response()
        }
    }
}

/// A client pointed at a local port nobody listens on.
pub async fn unreachable_client() -> MessageClient {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    MessageClient::new(WidgetConfig::new(&format!("http://{addr}"), "acme").unwrap())
}
