//! In-process fake of the dinostory endpoints on an ephemeral port.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};

use axum::Router;
use axum::http::Uri;
use serde_json::Value;
use tokio::net::TcpListener;

/// One request the fake endpoint received.
#[derive(Debug, Clone)]
pub struct Hit {
    pub path: String,
    pub query: Option<String>,
    pub body: Value,
}

#[derive(Clone, Default)]
pub struct Recorder(Arc<Mutex<Vec<Hit>>>);

impl Recorder {
    pub fn record(&self, uri: &Uri, body: Value) {
        self.0.lock().unwrap().push(Hit {
            path: uri.path().to_string(),
            query: uri.query().map(str::to_string),
            body,
        });
    }

    pub fn hits(&self) -> Vec<Hit> {
        self.0.lock().unwrap().clone()
    }
}

/// Serve `router` on `127.0.0.1:0` and return its `http://host:port` origin.
pub async fn serve(router: Router) -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{addr}")
}

/// An origin nothing listens on.
pub async fn closed_origin() -> String {
    let listener = TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    format!("http://{addr}")
}
