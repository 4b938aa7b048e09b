//! Integration tests for sheet-sync
//!
//! These tests run whole jobs against mock HTTP endpoints and check what
//! ends up in the sheet.

pub mod batch_sync_tests;
pub mod inventory_tests;
pub mod listing_tests;
pub mod token_tests;
pub mod workbook_tests;
