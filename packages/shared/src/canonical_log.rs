//! # Canonical Log Line ミドルウェア
//!
//! 1 リクエストにつき 1 行のサマリログ（`log.type = "canonical"`）を出力する tower Layer。
//! Discord からの呼び出しは署名不正（401）も含めてすべてここで 1 行にまとまる。
//!
//! ```text
//! SetRequestId → TraceLayer → PropagateRequestId → CanonicalLogLineLayer → handler
//! ```
//!
//! | 結果 | レベル | `http.outcome` |
//! |------|--------|----------------|
//! | 2xx / 3xx | INFO | `success` |
//! | 4xx | INFO | `client_error` |
//! | 5xx | WARN | `server_error` |
//! | Service エラー | ERROR | `service_error` |
//!
//! ヘルスチェック（`/health` 配下）は死活監視で頻繁に呼ばれるため出力しない。

use std::{
    fmt,
    future::Future,
    pin::Pin,
    task::{Context, Poll},
    time::Instant,
};

use http::{Method, Request, Response, StatusCode};
use strum::IntoStaticStr;
use tower::{Layer, Service};

use crate::observability::REQUEST_ID_HEADER;

/// サマリログを出力しないパスの接頭辞
const SKIPPED_PATH_PREFIX: &str = "/health";

/// Canonical Log Line を出力する Layer
#[derive(Clone, Copy, Debug, Default)]
pub struct CanonicalLogLineLayer;

impl<S> Layer<S> for CanonicalLogLineLayer {
    type Service = CanonicalLogLineService<S>;

    fn layer(&self, inner: S) -> Self::Service {
        CanonicalLogLineService { inner }
    }
}

/// [`CanonicalLogLineLayer`] が生成する Service
#[derive(Clone, Debug)]
pub struct CanonicalLogLineService<S> {
    inner: S,
}

impl<S, ReqBody, ResBody> Service<Request<ReqBody>> for CanonicalLogLineService<S>
where
    S: Service<Request<ReqBody>, Response = Response<ResBody>> + Clone + Send + 'static,
    S::Future: Send + 'static,
    S::Error: fmt::Display + 'static,
    ReqBody: Send + 'static,
    ResBody: Send + 'static,
{
    type Error = S::Error;
    type Future = Pin<Box<dyn Future<Output = Result<Self::Response, Self::Error>> + Send>>;
    type Response = S::Response;

    fn poll_ready(&mut self, cx: &mut Context<'_>) -> Poll<Result<(), Self::Error>> {
        self.inner.poll_ready(cx)
    }

    fn call(&mut self, req: Request<ReqBody>) -> Self::Future {
        // ready になった inner を取り出し、代わりに clone を残す
        let ready = self.inner.clone();
        let mut inner = std::mem::replace(&mut self.inner, ready);

        let Some(summary) = RequestSummary::start(&req) else {
            return Box::pin(inner.call(req));
        };

        Box::pin(async move {
            let result = inner.call(req).await;
            match &result {
                Ok(response) => summary.finish(response.status()),
                Err(err) => summary.fail(err),
            }
            result
        })
    }
}

/// リクエスト 1 件分のサマリ
struct RequestSummary {
    method:     Method,
    path:       String,
    request_id: String,
    started_at: Instant,
}

impl RequestSummary {
    /// 出力対象のリクエストなら計測を開始する
    fn start<B>(req: &Request<B>) -> Option<Self> {
        let path = req.uri().path();
        if path.starts_with(SKIPPED_PATH_PREFIX) {
            return None;
        }

        let request_id = req
            .headers()
            .get(REQUEST_ID_HEADER)
            .and_then(|v| v.to_str().ok())
            .unwrap_or("-");

        Some(Self {
            method:     req.method().clone(),
            path:       path.to_owned(),
            request_id: request_id.to_owned(),
            started_at: Instant::now(),
        })
    }

    fn latency_ms(&self) -> u64 {
        u64::try_from(self.started_at.elapsed().as_millis()).unwrap_or(u64::MAX)
    }

    /// レスポンスを返せた場合のサマリ
    fn finish(&self, status: StatusCode) {
        let method = &self.method;
        let path = self.path.as_str();
        let request_id = self.request_id.as_str();
        let latency_ms = self.latency_ms();
        let outcome = Outcome::of(status);

        macro_rules! emit {
            ($level:ident) => {
                tracing::$level!(
                    log.r#type = "canonical",
                    http.method = %method,
                    http.path = path,
                    http.request_id = request_id,
                    http.status_code = status.as_u16(),
                    http.outcome = outcome.as_str(),
                    http.latency_ms = latency_ms,
                    "リクエスト完了"
                )
            };
        }

        match outcome {
            Outcome::ServerError => emit!(warn),
            Outcome::Success | Outcome::ClientError => emit!(info),
        }
    }

    /// Service 自体がエラーを返した場合のサマリ
    fn fail(&self, err: &dyn fmt::Display) {
        tracing::error!(
            log.r#type = "canonical",
            http.method = %self.method,
            http.path = self.path.as_str(),
            http.request_id = self.request_id.as_str(),
            http.outcome = "service_error",
            http.latency_ms = self.latency_ms(),
            error.message = %err,
            "リクエスト処理エラー"
        );
    }
}

/// ステータスコードの分類
#[derive(Clone, Copy, Debug, PartialEq, Eq, IntoStaticStr)]
#[strum(serialize_all = "snake_case")]
enum Outcome {
    Success,
    ClientError,
    ServerError,
}

impl Outcome {
    fn of(status: StatusCode) -> Self {
        if status.is_server_error() {
            Self::ServerError
        } else if status.is_client_error() {
            Self::ClientError
        } else {
            Self::Success
        }
    }

    fn as_str(self) -> &'static str {
        self.into()
    }
}
