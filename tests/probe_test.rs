//! Integration tests for the HTTP probe executor

use httpscan::http::{AuthConfig, CookieConfig, HttpProber, Prober, UserAgentMode};
use httpscan::models::{FailureKind, ProbeOutcome, ScanConfig};
use std::time::Duration;
use wiremock::matchers::{header, method, path};
use wiremock::{Mock, MockServer, ResponseTemplate};

fn test_config() -> ScanConfig {
    ScanConfig {
        timeout_secs: 2,
        ..ScanConfig::default()
    }
}

#[tokio::test]
async fn test_probe_success_with_content_length() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ok"))
        .respond_with(ResponseTemplate::new(200).set_body_string("hello world"))
        .mount(&server)
        .await;

    let prober = HttpProber::from_config(&test_config()).expect("prober");
    let outcome = prober.probe(&format!("{}/ok", server.uri())).await;

    match outcome {
        ProbeOutcome::Success {
            status,
            body,
            length,
            headers,
        } => {
            assert_eq!(status, 200);
            assert_eq!(body, "hello world");
            assert_eq!(length, 11);
            assert!(headers
                .iter()
                .any(|(name, _)| name.eq_ignore_ascii_case("content-length")));
        }
        ProbeOutcome::Failure { kind, message } => {
            panic!("expected success, got {kind}: {message}")
        }
    }
}

#[tokio::test]
async fn test_probe_length_falls_back_to_body_text() {
    let server = MockServer::start().await;
    // Chunked response: no content-length header
    Mock::given(method("GET"))
        .and(path("/chunked"))
        .respond_with(ResponseTemplate::new(200).set_body_raw("abcdef".as_bytes(), "text/plain"))
        .mount(&server)
        .await;

    let prober = HttpProber::from_config(&test_config()).expect("prober");
    let outcome = prober.probe(&format!("{}/chunked", server.uri())).await;

    match outcome {
        ProbeOutcome::Success { length, .. } => assert_eq!(length, 6),
        ProbeOutcome::Failure { kind, message } => {
            panic!("expected success, got {kind}: {message}")
        }
    }
}

#[tokio::test]
async fn test_probe_non_2xx_is_still_success() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/missing"))
        .respond_with(ResponseTemplate::new(404).set_body_string("nope"))
        .mount(&server)
        .await;

    let prober = HttpProber::from_config(&test_config()).expect("prober");
    let outcome = prober.probe(&format!("{}/missing", server.uri())).await;

    assert_eq!(outcome.status(), Some(404));
}

#[tokio::test]
async fn test_probe_timeout_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/slow"))
        .respond_with(
            ResponseTemplate::new(200).set_delay(Duration::from_secs(5)),
        )
        .mount(&server)
        .await;

    let config = ScanConfig {
        timeout_secs: 1,
        ..ScanConfig::default()
    };
    let prober = HttpProber::from_config(&config).expect("prober");
    let outcome = prober.probe(&format!("{}/slow", server.uri())).await;

    match outcome {
        ProbeOutcome::Failure { kind, .. } => assert_eq!(kind, FailureKind::Timeout),
        ProbeOutcome::Success { status, .. } => panic!("expected timeout, got {status}"),
    }
}

#[tokio::test]
async fn test_probe_connection_error_classified() {
    // Bind and immediately drop a listener so the port is closed
    let listener = std::net::TcpListener::bind("127.0.0.1:0").expect("bind");
    let addr = listener.local_addr().expect("addr");
    drop(listener);

    let prober = HttpProber::from_config(&test_config()).expect("prober");
    let outcome = prober.probe(&format!("http://{addr}/x")).await;

    match outcome {
        ProbeOutcome::Failure { kind, .. } => assert_eq!(kind, FailureKind::Connection),
        ProbeOutcome::Success { status, .. } => {
            panic!("expected connection error, got {status}")
        }
    }
}

#[tokio::test]
async fn test_probe_redirect_loop_classified() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/loop"))
        .respond_with(
            ResponseTemplate::new(302).insert_header("location", "/loop"),
        )
        .mount(&server)
        .await;

    let config = ScanConfig {
        follow_redirects: true,
        timeout_secs: 5,
        ..ScanConfig::default()
    };
    let prober = HttpProber::from_config(&config).expect("prober");
    let outcome = prober.probe(&format!("{}/loop", server.uri())).await;

    match outcome {
        ProbeOutcome::Failure { kind, .. } => {
            assert_eq!(kind, FailureKind::TooManyRedirects)
        }
        ProbeOutcome::Success { status, .. } => {
            panic!("expected redirect failure, got {status}")
        }
    }
}

#[tokio::test]
async fn test_probe_redirect_not_followed_by_default() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/moved"))
        .respond_with(
            ResponseTemplate::new(301).insert_header("location", "/elsewhere"),
        )
        .mount(&server)
        .await;

    let prober = HttpProber::from_config(&test_config()).expect("prober");
    let outcome = prober.probe(&format!("{}/moved", server.uri())).await;

    assert_eq!(outcome.status(), Some(301));
}

#[tokio::test]
async fn test_probe_sends_basic_auth() {
    let server = MockServer::start().await;
    // "admin:s3cret" base64-encoded
    Mock::given(method("GET"))
        .and(path("/protected"))
        .and(header("authorization", "Basic YWRtaW46czNjcmV0"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = ScanConfig {
        auth: AuthConfig::parse("admin:s3cret").expect("auth"),
        ..test_config()
    };
    let prober = HttpProber::from_config(&config).expect("prober");
    let outcome = prober.probe(&format!("{}/protected", server.uri())).await;

    assert_eq!(outcome.status(), Some(200));
}

#[tokio::test]
async fn test_probe_sends_cookie_header() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/with-cookies"))
        .and(header("cookie", "session=abc123"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = ScanConfig {
        cookies: CookieConfig::Header("session=abc123".to_string()),
        ..test_config()
    };
    let prober = HttpProber::from_config(&config).expect("prober");
    let outcome = prober.probe(&format!("{}/with-cookies", server.uri())).await;

    assert_eq!(outcome.status(), Some(200));
}

#[tokio::test]
async fn test_probe_sends_fixed_user_agent() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/ua"))
        .and(header("user-agent", "custom-agent/9"))
        .respond_with(ResponseTemplate::new(200))
        .mount(&server)
        .await;

    let config = ScanConfig {
        user_agent: UserAgentMode::Fixed("custom-agent/9".to_string()),
        ..test_config()
    };
    let prober = HttpProber::from_config(&config).expect("prober");
    let outcome = prober.probe(&format!("{}/ua", server.uri())).await;

    assert_eq!(outcome.status(), Some(200));
}

#[tokio::test]
async fn test_missing_cookie_jar_aborts_construction() {
    let config = ScanConfig {
        cookies: CookieConfig::Jar("/nonexistent/cookies.txt".into()),
        ..ScanConfig::default()
    };
    assert!(HttpProber::from_config(&config).is_err());
}
