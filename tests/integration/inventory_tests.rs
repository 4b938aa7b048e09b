//! Inventory fetch and the combined FSN and inventory job

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{fk_sheet, temp_file, test_config};
    use crate::common::mocks::notifier_expecting;
    use crate::common::server::{
        INVENTORY, inventory_details, mount_inventory, mount_sku_details, sku_details,
    };
    use serde_json::json;
    use sheet_sync::core::jobs;
    use sheet_sync::{CellValue, TabularStore, WorkbookFile};
    use wiremock::matchers::{body_json, method, path};
    use wiremock::{Mock, MockServer, ResponseTemplate};

    #[tokio::test]
    async fn test_fetch_writes_quantities() {
        let server = MockServer::start().await;
        Mock::given(method("POST"))
            .and(path(INVENTORY))
            .and(body_json(json!({
                "productIds": ["FSN1", "FSN2"],
                "locationId": "LOC123"
            })))
            .respond_with(ResponseTemplate::new(200).set_body_json(json!({
                "inventoryDetails": [
                    { "productId": "FSN1", "inventory": 7 },
                    { "productId": "FSN2" }
                ]
            })))
            .expect(1)
            .mount(&server)
            .await;

        let config = test_config(&server.uri());
        let executor = jobs::executor(&config).unwrap();
        let driver = jobs::inventory_fetch(&config, &executor).unwrap();

        let mut sheet = fk_sheet(&[
            &["SKU1", "FSN1", ""],
            &["SKU2", "FSN2", ""],
            &["SKU3", "NOT FOUND", ""],
            &["SKU4", "", ""],
            &["SKU5", "FSN5", "3"],
        ]);
        let report = driver.run(&mut sheet).await.unwrap();

        assert_eq!(report.resolved, 2);
        assert_eq!(sheet.get(1, 2), CellValue::Number(7.0));
        assert_eq!(sheet.get(2, 2), CellValue::Number(0.0));
        assert!(sheet.get(3, 2).is_blank());
        assert!(sheet.get(4, 2).is_blank());
        assert_eq!(sheet.get(5, 2), CellValue::from("3"));
    }

    #[tokio::test]
    async fn test_fetch_requires_location() {
        let server = MockServer::start().await;
        let mut config = test_config(&server.uri());
        config.flipkart.location_id = None;
        let executor = jobs::executor(&config).unwrap();

        let err = crate::assert_err!(jobs::inventory_fetch(&config, &executor));
        assert!(err.to_string().contains("location"));
    }

    #[tokio::test]
    async fn test_fsn_then_inventory_on_workbook() {
        let server = MockServer::start().await;
        mount_sku_details(
            &server,
            sku_details(&[("PT0078", "FSNA"), ("PT0079", "")]),
            1,
        )
        .await;
        mount_inventory(&server, inventory_details(&[("FSNA", 12), ("FSNB", 4)]), 1).await;

        let file = temp_file(
            r#"{"sheets": {"fk": [
                ["SKU", "FSN", "Inventory Qty"],
                ["PT0078", null, null],
                ["PT0079", null, null],
                ["PT0080", "FSNB", null]
            ]}}"#,
        );

        let config = test_config(&server.uri());
        let executor = jobs::executor(&config).unwrap();
        let notifier = notifier_expecting("Inventory fetch completed");

        let mut sheet = WorkbookFile::open(file.path(), "fk").await.unwrap();
        let (lookup, fetch) =
            jobs::fsn_and_inventory(&config, &executor, &mut sheet, notifier.as_ref())
                .await
                .unwrap();

        assert_eq!(lookup.resolved, 1);
        assert_eq!(lookup.not_found, 1);
        assert_eq!(fetch.resolved, 2);
        // the NOT FOUND row is ignored by the inventory fetch
        assert_eq!(fetch.skipped, 1);

        let reopened = WorkbookFile::open(file.path(), "fk").await.unwrap();
        let rows = reopened.rows().await.unwrap();
        assert_eq!(rows[1][1], CellValue::from("FSNA"));
        assert_eq!(rows[1][2], CellValue::Number(12.0));
        assert_eq!(rows[2][1], CellValue::from("NOT FOUND"));
        assert!(rows[2][2].is_blank());
        assert_eq!(rows[3][2], CellValue::Number(4.0));
    }
}
