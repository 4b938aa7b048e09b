//! Shopify listing updates, row by row

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{listing_sheet, test_config};
    use crate::common::mocks::{limiter_expecting, notifier_expecting};
    use crate::common::server::{INVENTORY_LEVELS, mount_inventory_levels, mount_variant};
    use serde_json::json;
    use sheet_sync::core::jobs;
    use sheet_sync::core::providers::shopify::ListingSync;
    use sheet_sync::{CellValue, TabularStore};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    fn listing_job(base_url: &str) -> ListingSync {
        let config = test_config(base_url);
        let executor = jobs::executor(&config).unwrap();
        jobs::listing_update(&config, &executor, "ptfs").unwrap()
    }

    fn status(sheet: &sheet_sync::MemorySheet, row: usize) -> String {
        sheet.get(row, 6).as_text()
    }

    #[tokio::test]
    async fn test_successful_update() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INVENTORY_LEVELS))
            .and(body_json(json!({
                "location_id": 60002631857_u64,
                "inventory_item_id": 4001,
                "available": 12
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("PUT"))
            .and(path("/admin/api/2023-10/variants/9001.json"))
            .and(body_json(json!({
                "variant": { "id": 9001, "price": "399", "compare_at_price": "499" }
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({})))
            .expect(1)
            .mount(&server)
            .await;

        let mut sheet = listing_sheet(&[&["PT0078", "4001", "12", "399", "499", "9001", ""]]);
        let report = listing_job(&server.uri())
            .with_notifier(notifier_expecting("1 updated"))
            .run(&mut sheet)
            .await
            .unwrap();

        assert_eq!(report.succeeded, 1);
        assert_eq!(status(&sheet, 1), "✅ Inventory & Price Updated");
    }

    /// Row already marked successful: skipped, no call
    #[tokio::test]
    async fn test_successful_rows_are_skipped() {
        let server = MockServer::start().await;
        mount_inventory_levels(&server, 200, 0).await;

        let mut sheet = listing_sheet(&[&[
            "PT0078",
            "4001",
            "12",
            "399",
            "499",
            "9001",
            "✅ Inventory & Price Updated",
        ]]);
        let report = listing_job(&server.uri())
            .with_rate_limiter(limiter_expecting(0))
            .run(&mut sheet)
            .await
            .unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(sheet.writes(), 0);
    }

    /// Empty quantity: invalid status written, no call
    #[tokio::test]
    async fn test_missing_quantity_is_invalid() {
        let server = MockServer::start().await;
        mount_inventory_levels(&server, 200, 0).await;

        let mut sheet = listing_sheet(&[&["PT0078", "4001", "", "399", "499", "9001", ""]]);
        let report = listing_job(&server.uri())
            .with_rate_limiter(limiter_expecting(0))
            .run(&mut sheet)
            .await
            .unwrap();

        assert_eq!(report.invalid, 1);
        assert_eq!(status(&sheet, 1), "❌ Missing data");
    }

    #[tokio::test]
    async fn test_mrp_not_above_price_is_invalid() {
        let server = MockServer::start().await;
        mount_inventory_levels(&server, 200, 0).await;

        let mut sheet = listing_sheet(&[&["PT0078", "4001", "3", "499", "499", "9001", ""]]);
        listing_job(&server.uri()).run(&mut sheet).await.unwrap();

        assert_eq!(status(&sheet, 1), "❌ MRP missing or ≤ Price");
    }

    #[tokio::test]
    async fn test_partial_failures() {
        let server = MockServer::start().await;
        mount_inventory_levels(&server, 200, 2).await;
        mount_variant(&server, 9001, 422, 1).await;
        mount_variant(&server, 9002, 200, 1).await;

        let mut sheet = listing_sheet(&[
            &["PT0078", "4001", "12", "399", "499", "9001", ""],
            &["PT0079", "4002", "5", "199", "249", "9002", "✅ Inventory Updated ❌ Price Failed"],
        ]);
        let report = listing_job(&server.uri()).run(&mut sheet).await.unwrap();

        assert_eq!(report.partial, 1);
        assert_eq!(report.succeeded, 1);
        assert_eq!(status(&sheet, 1), "✅ Inventory Updated ❌ Price Failed");
        // partial rows are retried on the next run
        assert_eq!(status(&sheet, 2), "✅ Inventory & Price Updated");
    }

    #[tokio::test]
    async fn test_inventory_failure_with_price_success() {
        let server = MockServer::start().await;
        mount_inventory_levels(&server, 404, 1).await;
        mount_variant(&server, 9001, 200, 1).await;

        let mut sheet = listing_sheet(&[&["PT0078", "4001", "12", "399", "499", "9001", ""]]);
        listing_job(&server.uri()).run(&mut sheet).await.unwrap();

        assert_eq!(status(&sheet, 1), "❌ Inventory Failed ✅ Price Updated");
    }

    #[tokio::test]
    async fn test_both_calls_rejected() {
        let server = MockServer::start().await;
        mount_inventory_levels(&server, 500, 1).await;
        mount_variant(&server, 9001, 500, 1).await;

        let mut sheet = listing_sheet(&[&["PT0078", "4001", "12", "399", "499", "9001", ""]]);
        let report = listing_job(&server.uri()).run(&mut sheet).await.unwrap();

        assert_eq!(report.failed, 1);
        assert_eq!(status(&sheet, 1), "❌ Inventory & Price Failed");
    }

    #[tokio::test]
    async fn test_unreachable_store_aborts_row() {
        // nothing listens on port 1
        let mut sheet = listing_sheet(&[&["PT0078", "4001", "12", "399", "499", "9001", ""]]);
        let report = listing_job("http://127.0.0.1:1")
            .run(&mut sheet)
            .await
            .unwrap();

        assert_eq!(report.failed, 1);
        assert!(status(&sheet, 1).starts_with("❌ Inventory Error:"));
    }

    #[tokio::test]
    async fn test_rows_with_calls_are_paced() {
        let server = MockServer::start().await;
        mount_inventory_levels(&server, 200, 2).await;
        mount_variant(&server, 9001, 200, 1).await;
        mount_variant(&server, 9002, 200, 1).await;

        let mut sheet = listing_sheet(&[
            &["PT0078", "4001", "12", "399", "499", "9001", ""],
            &["PT0079", "", "", "", "", "", ""],
            &["PT0080", "4003", "", "199", "249", "9003", ""],
            &["PT0081", "4002", "5", "199", "249", "9002", ""],
        ]);
        let report = listing_job(&server.uri())
            .with_rate_limiter(limiter_expecting(2))
            .run(&mut sheet)
            .await
            .unwrap();

        assert_eq!(report.succeeded, 2);
        assert_eq!(report.invalid, 2);
        assert_eq!(sheet.get(2, 6), CellValue::from("❌ Missing data"));
        assert_eq!(sheet.rows().await.unwrap().len(), 5);
    }

    #[tokio::test]
    async fn test_unknown_store_is_config_error() {
        let config = test_config("http://127.0.0.1:1");
        let executor = jobs::executor(&config).unwrap();
        let err = crate::assert_err!(jobs::listing_update(&config, &executor, "vitashop"));
        assert!(err.is_fatal());
    }
}
