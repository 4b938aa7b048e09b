//! Batched lookup runs against a mock SKU details endpoint

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{fast, fk_sheet, test_config};
    use crate::common::mocks::{limiter_expecting, notifier_expecting};
    use crate::common::server::{SKU_DETAILS, mount_sku_details, sku_details};
    use serde_json::json;
    use sheet_sync::config::BatchJobSettings;
    use sheet_sync::core::batch::{RunState, SyncDriver};
    use sheet_sync::core::jobs;
    use sheet_sync::core::providers::flipkart::SkuDetailsEndpoint;
    use sheet_sync::{CellValue, TabularStore};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    async fn driver(
        server: &MockServer,
        settings: BatchJobSettings,
    ) -> SyncDriver<SkuDetailsEndpoint> {
        let config = test_config(&server.uri());
        let executor = jobs::executor(&config).unwrap();
        SyncDriver::new(
            jobs::FSN_LOOKUP_JOB,
            SkuDetailsEndpoint::new(&config.flipkart).unwrap(),
            executor,
            settings,
        )
        .unwrap()
    }

    /// Two keys, batch size 20: one batch, one call
    #[tokio::test]
    async fn test_small_worklist_is_one_call() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SKU_DETAILS))
            .and(body_json(json!({ "skuIds": ["SKU1", "SKU2"] })))
            .respond_with(
                ResponseTemplate::new(200)
                    .set_body_json(sku_details(&[("SKU1", "FSN1"), ("SKU2", "FSN2")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut sheet = fk_sheet(&[&["SKU1", "", ""], &["SKU2", "", ""]]);
        let report = driver(&server, fast(BatchJobSettings::fsn_lookup()))
            .await
            .run(&mut sheet)
            .await
            .unwrap();

        assert_eq!(report.batches, 1);
        assert_eq!(report.resolved, 2);
        assert_eq!(sheet.get(1, 1), CellValue::from("FSN1"));
        assert_eq!(sheet.get(2, 1), CellValue::from("FSN2"));
    }

    /// An entry without a SKU is dropped; its siblings still resolve
    #[tokio::test]
    async fn test_malformed_entry_does_not_fail_batch() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SKU_DETAILS))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "responses": [
                    { "skuId": "SKU1", "productId": "FSN1" },
                    { "productId": "FSNX" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let mut sheet = fk_sheet(&[&["SKU1", "", ""], &["SKU2", "", ""]]);
        let settings = BatchJobSettings {
            max_attempts: 3,
            ..fast(BatchJobSettings::fsn_lookup())
        };
        let report = driver(&server, settings).await.run(&mut sheet).await.unwrap();

        assert_eq!(report.failed_batches, 0);
        assert_eq!(report.resolved, 1);
        assert_eq!(report.not_found, 1);
        assert_eq!(sheet.get(1, 1), CellValue::from("FSN1"));
        assert_eq!(sheet.get(2, 1), CellValue::from("NOT FOUND"));
    }

    /// Three server errors with three attempts: batch fails, rows untouched
    #[tokio::test]
    async fn test_exhausted_batch_leaves_rows_untouched() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(SKU_DETAILS))
            .respond_with(ResponseTemplate::new(500).set_body_string("unavailable"))
            .expect(3)
            .mount(&server)
            .await;

        let mut sheet = fk_sheet(&[&["SKU1", "", ""], &["SKU2", "", ""]]);
        let settings = BatchJobSettings {
            max_attempts: 3,
            ..fast(BatchJobSettings::fsn_lookup())
        };
        let report = driver(&server, settings).await.run(&mut sheet).await.unwrap();

        assert_eq!(report.state, RunState::Done);
        assert_eq!(report.failed_batches, 1);
        assert_eq!(report.resolved + report.not_found, 0);
        assert_eq!(sheet.writes(), 0);
        assert!(sheet.get(1, 1).is_blank());
        assert!(sheet.get(2, 1).is_blank());
    }

    /// Response only names SKU1: SKU2 gets the sentinel
    #[tokio::test]
    async fn test_missing_record_gets_sentinel() {
        let server = MockServer::start().await;
        mount_sku_details(&server, sku_details(&[("SKU1", "FSN1")]), 1).await;

        let mut sheet = fk_sheet(&[&["SKU1", "", ""], &["SKU2", "", ""]]);
        let report = driver(&server, fast(BatchJobSettings::fsn_lookup()))
            .await
            .run(&mut sheet)
            .await
            .unwrap();

        assert_eq!(report.resolved, 1);
        assert_eq!(report.not_found, 1);
        assert_eq!(sheet.get(1, 1), CellValue::from("FSN1"));
        assert_eq!(sheet.get(2, 1), CellValue::from("NOT FOUND"));
    }

    #[tokio::test]
    async fn test_second_run_has_empty_worklist() {
        let server = MockServer::start().await;
        mount_sku_details(&server, sku_details(&[("SKU1", "FSN1")]), 1).await;

        let mut sheet = fk_sheet(&[&["SKU1", "", ""], &["SKU2", "", ""]]);
        let driver = driver(&server, fast(BatchJobSettings::fsn_lookup())).await;

        driver.run(&mut sheet).await.unwrap();
        let snapshot = sheet.rows().await.unwrap();

        let second = driver.run(&mut sheet).await.unwrap();
        assert_eq!(second.worklist, 0);
        assert_eq!(second.batches, 0);
        assert_eq!(second.skipped, 2);
        assert_eq!(sheet.rows().await.unwrap(), snapshot);
    }

    #[tokio::test]
    async fn test_batches_are_paced_and_notified_once() {
        let server = MockServer::start().await;
        mount_sku_details(&server, sku_details(&[]), 3).await;

        let rows: Vec<Vec<String>> = (1..=5).map(|i| vec![format!("SKU{}", i)]).collect();
        let rows: Vec<Vec<&str>> = rows
            .iter()
            .map(|r| r.iter().map(String::as_str).collect())
            .collect();
        let rows: Vec<&[&str]> = rows.iter().map(Vec::as_slice).collect();
        let mut sheet = fk_sheet(&rows);

        let settings = BatchJobSettings {
            batch_size: 2,
            ..fast(BatchJobSettings::fsn_lookup())
        };
        let report = driver(&server, settings)
            .await
            .with_rate_limiter(limiter_expecting(3))
            .with_notifier(notifier_expecting("5 not found"))
            .run(&mut sheet)
            .await
            .unwrap();

        assert_eq!(report.batches, 3);
        assert_eq!(report.not_found, 5);
    }

    #[tokio::test]
    async fn test_failed_batch_does_not_stop_later_batches() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({ "skuIds": ["SKU1"] })))
            .respond_with(ResponseTemplate::new(503))
            .expect(1)
            .mount(&server)
            .await;
        Mock::given(method("POST"))
            .and(body_json(json!({ "skuIds": ["SKU2"] })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(sku_details(&[("SKU2", "FSN2")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut sheet = fk_sheet(&[&["SKU1"], &["SKU2"]]);
        let settings = BatchJobSettings {
            batch_size: 1,
            max_attempts: 1,
            ..fast(BatchJobSettings::fsn_lookup())
        };
        let report = driver(&server, settings).await.run(&mut sheet).await.unwrap();

        assert_eq!(report.failed_batches, 1);
        assert_eq!(report.resolved, 1);
        assert!(sheet.get(1, 1).is_blank());
        assert_eq!(sheet.get(2, 1), CellValue::from("FSN2"));
    }

    #[tokio::test]
    async fn test_duplicate_keys_are_sent_once() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(body_json(json!({ "skuIds": ["SKU1"] })))
            .respond_with(
                ResponseTemplate::new(200).set_body_json(sku_details(&[("SKU1", "FSN1")])),
            )
            .expect(1)
            .mount(&server)
            .await;

        let mut sheet = fk_sheet(&[&["SKU1"], &["SKU1"]]);
        let report = driver(&server, fast(BatchJobSettings::fsn_lookup()))
            .await
            .run(&mut sheet)
            .await
            .unwrap();

        assert_eq!(report.skipped, 1);
        assert_eq!(sheet.get(1, 1), CellValue::from("FSN1"));
        assert!(sheet.get(2, 1).is_blank());
    }

    #[tokio::test]
    async fn test_status_column_records_outcome() {
        let server = MockServer::start().await;
        mount_sku_details(&server, sku_details(&[("SKU1", "FSN1")]), 1).await;

        let mut sheet = fk_sheet(&[&["SKU1", "", "", ""], &["SKU2", "", "", ""]]);
        let mut settings = fast(BatchJobSettings::fsn_lookup());
        settings.layout.status_column = Some(3);
        driver(&server, settings).await.run(&mut sheet).await.unwrap();

        assert_eq!(sheet.get(1, 3), CellValue::from("✅ Resolved"));
        assert_eq!(sheet.get(2, 3), CellValue::from("❌ Not found"));
    }

    #[tokio::test]
    async fn test_missing_token_fails_before_any_call() {
        let server = MockServer::start().await;
        mount_sku_details(&server, sku_details(&[]), 0).await;

        let mut config = test_config(&server.uri());
        config.flipkart.access_token = None;
        let executor = jobs::executor(&config).unwrap();

        let err = crate::assert_err!(jobs::fsn_lookup(&config, &executor));
        assert!(err.is_fatal());
    }
}
