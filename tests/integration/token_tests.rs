//! Flipkart token fetch and Shopify location listing

#[cfg(test)]
mod tests {
    use crate::common::fixtures::test_config;
    use serde_json::json;
    use sheet_sync::SyncError;
    use sheet_sync::core::jobs;
    use sheet_sync::core::providers::flipkart::fetch_access_token;
    use sheet_sync::core::providers::shopify::list_locations;
    use wiremock::matchers::{header, method, path, query_param};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_token() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/oauth-service/oauth/token"))
            .and(query_param("grant_type", "client_credentials"))
            .and(query_param("scope", "Seller_Api"))
            .and(header("authorization", "Basic YXBwOnNlY3JldA=="))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "access_token": "fresh",
                "token_type": "bearer",
                "expires_in": 5183999,
                "scope": "Seller_Api"
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        let executor = jobs::executor(&config).unwrap();
        let token = fetch_access_token(&executor, &config.flipkart).await.unwrap();

        assert_eq!(token.access_token, "fresh");
        assert_eq!(token.expires_in, Some(5183999));
    }

    #[tokio::test]
    async fn test_token_requires_app_credentials() {
        let server = MockServer::start().await;
        let mut config = test_config(&server.uri());
        config.flipkart.app_secret = None;
        let executor = jobs::executor(&config).unwrap();

        let err = fetch_access_token(&executor, &config.flipkart)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Config(_)));
    }

    #[tokio::test]
    async fn test_token_missing_from_response() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({ "error": "denied" })))
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        let executor = jobs::executor(&config).unwrap();
        let err = fetch_access_token(&executor, &config.flipkart)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Parse(_)));
    }

    #[tokio::test]
    async fn test_token_rejected() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .respond_with(ResponseTemplate::new(401).set_body_string("invalid client"))
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        let executor = jobs::executor(&config).unwrap();
        let err = fetch_access_token(&executor, &config.flipkart)
            .await
            .unwrap_err();
        assert!(matches!(err, SyncError::Http { status: 401, .. }));
    }

    #[tokio::test]
    async fn test_list_locations() {
        let server = MockServer::start().await;
        Mock::given(method("GET"))
            .and(path("/admin/api/2023-10/locations.json"))
            .and(header("x-shopify-access-token", "shpat_test"))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "locations": [
                    { "id": 60002631857_u64, "name": "Warehouse", "active": true },
                    { "id": 60002631858_u64, "name": "Shop floor" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        let executor = jobs::executor(&config).unwrap();
        let store = config.shopify_store("ptfs").unwrap();
        let locations = list_locations(&executor, store).await.unwrap();

        assert_eq!(locations.len(), 2);
        assert_eq!(locations[0].id, 60002631857);
        assert_eq!(locations[1].name, "Shop floor");
        assert_eq!(locations[1].active, None);
    }
}
