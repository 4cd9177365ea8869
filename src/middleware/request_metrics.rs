use actix_web::{
    dev::{forward_ready, Service, ServiceRequest, ServiceResponse, Transform},
    Error,
};
use futures::future::LocalBoxFuture;
use std::future::{ready, Ready};
use std::sync::Arc;

use crate::api::metrics::HttpMetrics;

/// Counts every request, and every response with status >= 400
pub struct RequestMetrics {
    metrics: Arc<HttpMetrics>,
}

impl RequestMetrics {
    pub fn new(metrics: Arc<HttpMetrics>) -> Self {
        Self { metrics }
    }
}

impl<S, B> Transform<S, ServiceRequest> for RequestMetrics
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type InitError = ();
    type Transform = RequestMetricsMiddleware<S>;
    type Future = Ready<Result<Self::Transform, Self::InitError>>;

    fn new_transform(&self, service: S) -> Self::Future {
        ready(Ok(RequestMetricsMiddleware {
            service,
            metrics: Arc::clone(&self.metrics),
        }))
    }
}

pub struct RequestMetricsMiddleware<S> {
    service: S,
    metrics: Arc<HttpMetrics>,
}

impl<S, B> Service<ServiceRequest> for RequestMetricsMiddleware<S>
where
    S: Service<ServiceRequest, Response = ServiceResponse<B>, Error = Error>,
    S::Future: 'static,
    B: 'static,
{
    type Response = ServiceResponse<B>;
    type Error = Error;
    type Future = LocalBoxFuture<'static, Result<Self::Response, Self::Error>>;

    forward_ready!(service);

    fn call(&self, req: ServiceRequest) -> Self::Future {
        self.metrics.increment_request_count();

        let metrics = Arc::clone(&self.metrics);
        let fut = self.service.call(req);

        Box::pin(async move {
            let res = fut.await;

            let failed = match &res {
                Ok(response) => {
                    let status = response.status();
                    status.is_client_error() || status.is_server_error()
                }
                Err(_) => true,
            };
            if failed {
                metrics.increment_error_count();
            }

            res
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use actix_web::{test, web, App, HttpResponse};

    #[actix_web::test]
    async fn test_counts_requests_and_errors() {
        let metrics = Arc::new(HttpMetrics::default());
        let app = test::init_service(
            App::new()
                .wrap(RequestMetrics::new(Arc::clone(&metrics)))
                .route("/ok", web::get().to(|| async { HttpResponse::Ok().finish() }))
                .route("/boom", web::get().to(|| async { HttpResponse::InternalServerError().finish() })),
        )
        .await;

        test::call_service(&app, test::TestRequest::get().uri("/ok").to_request()).await;
        test::call_service(&app, test::TestRequest::get().uri("/boom").to_request()).await;
        test::call_service(&app, test::TestRequest::get().uri("/missing").to_request()).await;

        let snapshot = metrics.snapshot();
        assert_eq!(snapshot.http_requests_total, 3);
        assert_eq!(snapshot.http_errors_total, 2);
    }
}
