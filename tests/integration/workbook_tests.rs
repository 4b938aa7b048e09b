//! Runs against workbook files on disk

#[cfg(test)]
mod tests {
    use crate::common::fixtures::{fast, temp_file, test_config};
    use crate::common::server::{mount_sku_details, sku_details};
    use sheet_sync::config::BatchJobSettings;
    use sheet_sync::core::batch::SyncDriver;
    use sheet_sync::core::jobs;
    use sheet_sync::core::providers::flipkart::SkuDetailsEndpoint;
    use sheet_sync::storage::Workbook;
    use sheet_sync::{CellValue, SyncError, WorkbookFile};
    use wiremock::MockServer;

    #[tokio::test]
    async fn test_each_batch_is_flushed() {
        let server = MockServer::start().await;
        mount_sku_details(&server, sku_details(&[("A", "FA"), ("B", "FB")]), 2).await;

        let file = temp_file(
            r#"{"sheets": {
                "fk": [["SKU", "FSN"], ["A", null], ["B", null]],
                "PTFS": [["SKU"]]
            }}"#,
        );
        let config = test_config(&server.uri());
        let driver = SyncDriver::new(
            jobs::FSN_LOOKUP_JOB,
            SkuDetailsEndpoint::new(&config.flipkart).unwrap(),
            jobs::executor(&config).unwrap(),
            BatchJobSettings {
                batch_size: 1,
                ..fast(BatchJobSettings::fsn_lookup())
            },
        )
        .unwrap();

        let mut sheet = WorkbookFile::open(file.path(), "fk").await.unwrap();
        driver.run(&mut sheet).await.unwrap();
        assert!(!sheet.is_dirty());

        let workbook = Workbook::load(file.path()).await.unwrap();
        assert_eq!(workbook.sheets["fk"][1][1], CellValue::from("FA"));
        assert_eq!(workbook.sheets["fk"][2][1], CellValue::from("FB"));
        assert_eq!(workbook.sheets["PTFS"].len(), 1);
    }

    #[tokio::test]
    async fn test_unknown_sheet() {
        let file = temp_file(r#"{"sheets": {"fk": []}}"#);
        let err = WorkbookFile::open(file.path(), "Flipkart").await.unwrap_err();
        assert!(matches!(err, SyncError::SheetNotFound(_)));
        assert!(err.is_fatal());
    }
}
