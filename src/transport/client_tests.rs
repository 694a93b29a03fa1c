//! Tests for `ReqwestClient`.
//!
//! These cover construction only. Exchanges against a router are exercised
//! through the mock client in the API tests.

use std::time::Duration;

use super::*;

mod reqwest_client {
    use super::*;

    #[test]
    fn with_settings_accepts_timeout_and_strict_tls() {
        let client = ReqwestClient::with_settings(Duration::from_secs(5), false);
        assert!(client.is_ok());
    }

    #[test]
    fn with_settings_accepts_skip_tls_verify() {
        let client = ReqwestClient::with_settings(Duration::from_secs(5), true);
        assert!(client.is_ok());
    }

    #[test]
    fn with_settings_accepts_zero_timeout() {
        let client = ReqwestClient::with_settings(Duration::ZERO, false);
        assert!(client.is_ok());
    }

    #[test]
    fn client_is_send_sync() {
        fn assert_send_sync<T: Send + Sync>() {}
        assert_send_sync::<ReqwestClient>();
    }

    #[tokio::test]
    async fn request_to_invalid_host_returns_error_or_proxy_response() {
        let client = ReqwestClient::with_settings(Duration::from_secs(5), false).unwrap();
        let url = url::Url::parse("http://invalid.invalid.invalid/configure").unwrap();

        let result = client.request(HttpRequest::post(url)).await;

        // Behind a proxy the failure may come back as a 502 instead.
        match result {
            Err(HttpError::Connection(_) | HttpError::Timeout) => {}
            Ok(resp) if !resp.is_success() => {}
            other => panic!("Expected connection error or proxy error response, got {other:?}"),
        }
    }
}
