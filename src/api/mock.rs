//! In-memory Transport
//!
//! Canned responses keyed by URL, with a log of every request issued.
//! Used by the test suites and by hosts that want to run views offline.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, MutexGuard};
use std::time::Duration;

use async_trait::async_trait;

use super::transport::{RawResponse, Transport};
use crate::domain::{FetchError, FetchResult};

#[derive(Debug, Clone)]
pub enum MockReply {
    Response(RawResponse),
    Fail(FetchError),
}

#[derive(Default)]
struct Route {
    queued: VecDeque<MockReply>,
    sticky: Option<MockReply>,
    delay: Option<Duration>,
}

/// Unknown URLs answer 404 with an empty body
#[derive(Default)]
pub struct MockTransport {
    routes: Mutex<HashMap<String, Route>>,
    requests: Mutex<Vec<String>>,
}

impl MockTransport {
    pub fn new() -> Self {
        Self::default()
    }

    /// Answer every request to `url` with `reply` (until replaced)
    pub fn respond(&self, url: &str, reply: MockReply) {
        lock(&self.routes).entry(url.to_string()).or_default().sticky = Some(reply);
    }

    /// Answer the next request to `url` with `reply`, ahead of the sticky reply
    pub fn respond_once(&self, url: &str, reply: MockReply) {
        lock(&self.routes)
            .entry(url.to_string())
            .or_default()
            .queued
            .push_back(reply);
    }

    pub fn respond_json(&self, url: &str, status: u16, body: &serde_json::Value) {
        self.respond(url, MockReply::Response(RawResponse::new(status, body.to_string())));
    }

    pub fn fail(&self, url: &str, error: FetchError) {
        self.respond(url, MockReply::Fail(error));
    }

    /// Hold replies for `url` back by `delay`
    pub fn delay(&self, url: &str, delay: Duration) {
        lock(&self.routes).entry(url.to_string()).or_default().delay = Some(delay);
    }

    /// Every URL requested so far, in issue order
    pub fn requests(&self) -> Vec<String> {
        lock(&self.requests).clone()
    }

    pub fn request_count(&self, url: &str) -> usize {
        lock(&self.requests).iter().filter(|u| u.as_str() == url).count()
    }

    fn next_reply(&self, url: &str) -> (MockReply, Option<Duration>) {
        let mut routes = lock(&self.routes);
        match routes.get_mut(url) {
            Some(route) => {
                let reply = route
                    .queued
                    .pop_front()
                    .or_else(|| route.sticky.clone())
                    .unwrap_or_else(not_found);
                (reply, route.delay)
            }
            None => (not_found(), None),
        }
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn get(&self, url: &str) -> FetchResult<RawResponse> {
        lock(&self.requests).push(url.to_string());
        let (reply, delay) = self.next_reply(url);
        if let Some(delay) = delay {
            tokio::time::sleep(delay).await;
        }
        match reply {
            MockReply::Response(response) => Ok(response),
            MockReply::Fail(error) => Err(error),
        }
    }
}

fn not_found() -> MockReply {
    MockReply::Response(RawResponse::new(404, Vec::new()))
}

fn lock<T>(mutex: &Mutex<T>) -> MutexGuard<'_, T> {
    mutex.lock().unwrap_or_else(|poisoned| poisoned.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[tokio::test]
    async fn test_queued_reply_precedes_sticky() {
        let mock = MockTransport::new();
        mock.respond_json("http://t/a", 200, &json!([1]));
        mock.respond_once("http://t/a", MockReply::Response(RawResponse::new(500, "")));

        assert_eq!(mock.get("http://t/a").await.unwrap().status, 500);
        assert_eq!(mock.get("http://t/a").await.unwrap().status, 200);
        assert_eq!(mock.request_count("http://t/a"), 2);
    }

    #[tokio::test]
    async fn test_unknown_url_is_404() {
        let mock = MockTransport::new();
        assert_eq!(mock.get("http://t/missing").await.unwrap().status, 404);
        assert_eq!(mock.requests(), vec!["http://t/missing".to_string()]);
    }

    #[tokio::test]
    async fn test_failures_pass_through() {
        let mock = MockTransport::new();
        mock.fail("http://t/down", FetchError::Network("offline".to_string()));
        assert_eq!(
            mock.get("http://t/down").await,
            Err(FetchError::Network("offline".to_string()))
        );
    }
}
