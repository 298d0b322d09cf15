#![allow(dead_code)]
#![allow(clippy::unwrap_used, clippy::expect_used)]

use apidock::HttpTransport;
use std::collections::BTreeMap;
use std::sync::Mutex;

/// One request as seen by the transport double.
#[derive(Debug, Clone, PartialEq)]
pub struct SentRequest {
    pub method: String,
    pub url: String,
    pub headers: BTreeMap<String, String>,
    pub body: Option<String>,
}

/// Transport double that records every dispatch and replies with a canned body.
#[derive(Debug, Default)]
pub struct RecordingTransport {
    calls: Mutex<Vec<SentRequest>>,
    response: String,
}

impl RecordingTransport {
    pub fn with_response(response: &str) -> Self {
        RecordingTransport {
            calls: Mutex::new(Vec::new()),
            response: response.to_string(),
        }
    }

    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    pub fn last_call(&self) -> Option<SentRequest> {
        self.calls.lock().unwrap().last().cloned()
    }
}

impl HttpTransport for RecordingTransport {
    fn send(
        &self,
        method: &str,
        url: &str,
        headers: &BTreeMap<String, String>,
        body: Option<&[u8]>,
    ) -> anyhow::Result<String> {
        self.calls.lock().unwrap().push(SentRequest {
            method: method.to_string(),
            url: url.to_string(),
            headers: headers.clone(),
            body: body.map(|b| String::from_utf8_lossy(b).into_owned()),
        });
        Ok(self.response.clone())
    }
}
