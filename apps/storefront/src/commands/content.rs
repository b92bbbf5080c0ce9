//! # Content Commands
//!
//! Landing page content and the transaction history.

use playzone_client::{ApiClient, ClientError};
use playzone_core::{Faq, Promo, Transaction};
use tracing::debug;

use super::expire_session;
use crate::error::{Notice, NoticeCode, NoticeResult};
use crate::state::SessionState;

pub async fn list_promos(api: &ApiClient) -> NoticeResult<Vec<Promo>> {
    debug!("list_promos command");
    Ok(api.list_promos().await?)
}

pub async fn list_faqs(api: &ApiClient) -> NoticeResult<Vec<Faq>> {
    debug!("list_faqs command");
    Ok(api.list_faqs().await?)
}

/// The user's transactions (every transaction for admins).
///
/// Needs a session; a 401 from the server ends it.
pub async fn list_transactions(
    api: &ApiClient,
    session: &SessionState,
) -> NoticeResult<Vec<Transaction>> {
    debug!(admin = session.is_admin(), "list_transactions command");

    if !session.is_signed_in() {
        return Err(Notice::new(
            NoticeCode::LoginRequired,
            ClientError::Unauthorized.user_message(),
        ));
    }

    match api.list_transactions().await {
        Ok(transactions) => Ok(transactions),
        Err(ClientError::Unauthorized) => {
            expire_session(api, session).await;
            Err(ClientError::Unauthorized.into())
        }
        Err(e) => Err(e.into()),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{api_for, signed_in};
    use axum::http::StatusCode;
    use axum::routing::get;
    use axum::{Json, Router};
    use playzone_client::MemorySessionStore;
    use serde_json::json;
    use std::sync::Arc;

    #[tokio::test]
    async fn test_transactions_need_a_session() {
        let api = api_for(Router::new()).await;
        let session = SessionState::load(Arc::new(MemorySessionStore::new()));

        let notice = list_transactions(&api, &session).await.unwrap_err();
        assert!(notice.is_login_required());
    }

    #[tokio::test]
    async fn test_transactions_401_signs_out() {
        let router = Router::new().route(
            "/api/transactions",
            get(|| async { StatusCode::UNAUTHORIZED }),
        );
        let api = api_for(router).await;
        let session = signed_in();

        let notice = list_transactions(&api, &session).await.unwrap_err();
        assert!(notice.is_login_required());
        assert!(!session.is_signed_in());
    }

    #[tokio::test]
    async fn test_transactions_listed() {
        let router = Router::new().route(
            "/api/transactions",
            get(|| async {
                Json(json!({ "data": [{
                    "id": 3,
                    "invoice": "INV-0003",
                    "customer_name": "Sari",
                    "total": "45000.50",
                    "status": "paid",
                    "created_at": "2026-10-01T08:00:00Z"
                }]}))
            }),
        );
        let api = api_for(router).await;

        let transactions = list_transactions(&api, &signed_in()).await.unwrap();
        assert_eq!(transactions[0].total.rupiah(), 45_001);
    }

    #[tokio::test]
    async fn test_faq_failure_is_generic() {
        let router = Router::new().route(
            "/api/faqs",
            get(|| async { StatusCode::SERVICE_UNAVAILABLE }),
        );
        let api = api_for(router).await;

        let notice = list_faqs(&api).await.unwrap_err();
        assert_eq!(notice.code, NoticeCode::RequestFailed);
    }
}
