use async_trait::async_trait;
use federation_client::core::{HttpRequest, HttpResponse, Transport};
use federation_client::utils::error::CONFIGURATION_MISSING_MESSAGE;
use federation_client::{
    cancel_pair, ApiClient, ApiError, ClientConfig, Credentials, RegistrationRequest,
};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 只計算呼叫次數的 transport
#[derive(Clone, Default)]
struct CountingTransport {
    calls: Arc<AtomicUsize>,
}

impl CountingTransport {
    fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl Transport for CountingTransport {
    async fn send(&self, _request: HttpRequest) -> federation_client::Result<HttpResponse> {
        self.calls.fetch_add(1, Ordering::SeqCst);
        Ok(HttpResponse::new(200, "{}"))
    }
}

fn registration() -> RegistrationRequest {
    RegistrationRequest::new(Credentials::new("kata@federation.org", "12345678"), 4)
}

#[tokio::test]
async fn test_unconfigured_client_never_touches_transport() {
    let transport = CountingTransport::default();
    let client = ApiClient::new(&ClientConfig::default(), transport.clone());

    let results = vec![
        client
            .login(&Credentials::new("kata@federation.org", "pw"))
            .await
            .map(|_| ()),
        client.register(&registration()).await.map(|_| ()),
        client
            .create_user_as_admin(&registration(), "token")
            .await
            .map(|_| ()),
        client.list_users_paged("token", 1, 10).await.map(|_| ()),
        client.get_user_detail("token", 1).await.map(|_| ()),
    ];

    for result in results {
        let err = result.unwrap_err();
        assert!(matches!(err, ApiError::Configuration { .. }));
        let normalized = err.normalized();
        assert_eq!(normalized.message, CONFIGURATION_MISSING_MESSAGE);
        assert_eq!(normalized.http_status, None);
    }
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_blank_base_url_counts_as_missing() {
    let transport = CountingTransport::default();
    let client = ApiClient::new(&ClientConfig::new("   "), transport.clone());

    let err = client.list_users_paged("token", 1, 10).await.unwrap_err();
    assert!(matches!(err, ApiError::Configuration { .. }));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_empty_token_never_touches_transport() {
    let transport = CountingTransport::default();
    let client = ApiClient::new(&ClientConfig::new("http://localhost:3000"), transport.clone());

    let create = client.create_user_as_admin(&registration(), "").await;
    let list = client.list_users_paged("", 2, 5).await;
    let detail = client.get_user_detail("", 9).await;

    assert!(matches!(create, Err(ApiError::Precondition { .. })));
    assert!(matches!(list, Err(ApiError::Precondition { .. })));
    assert!(matches!(detail, Err(ApiError::Precondition { .. })));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_out_of_range_arguments_never_touch_transport() {
    let transport = CountingTransport::default();
    let client = ApiClient::new(&ClientConfig::new("http://localhost:3000"), transport.clone());

    assert!(matches!(
        client.list_users_paged("token", 0, 10).await,
        Err(ApiError::Validation { .. })
    ));
    assert!(matches!(
        client.list_users_paged("token", 1, 0).await,
        Err(ApiError::Validation { .. })
    ));
    assert!(matches!(
        client.get_user_detail("token", 0).await,
        Err(ApiError::Validation { .. })
    ));
    assert!(matches!(
        client
            .register(&RegistrationRequest::new(
                Credentials::new("kata@federation.org", "pw"),
                0
            ))
            .await,
        Err(ApiError::Validation { .. })
    ));
    assert_eq!(transport.calls(), 0);
}

#[tokio::test]
async fn test_cancelled_client_reports_cancelled() {
    let transport = CountingTransport::default();
    let (handle, signal) = cancel_pair();
    let client = ApiClient::new(&ClientConfig::new("http://localhost:3000"), transport.clone())
        .with_cancel_signal(signal);

    handle.cancel();
    let err = client.get_user_detail("token", 1).await.unwrap_err();

    assert!(matches!(err, ApiError::Cancelled));
    assert_eq!(err.http_status(), None);
    assert_eq!(transport.calls(), 0);
}
