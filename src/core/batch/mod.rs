//! Batched remote sync
//!
//! Reads a worklist of keys from a tabular store, resolves it against a
//! remote endpoint one fixed-size batch at a time and writes each row's
//! outcome back into the store.

mod driver;
mod executor;
mod notify;
mod partition;
mod reconcile;
mod types;
mod writer;

pub use driver::{SyncDriver, Worklist};
pub use executor::{
    AuthHeader, BatchEndpoint, EndpointDescriptor, HttpMethod, KeyedRecord, RemoteCallExecutor,
};
pub use notify::{CompletionNotifier, LogNotifier};
pub use partition::{Batch, Batches, partition};
pub use reconcile::{Reconciliation, reconcile};
pub use types::{
    FAILURE_MARKER, RemoteResult, Resolution, RowOutcome, RunState, SUCCESS_MARKER, SyncReport,
    WorkItem, is_success_status,
};
pub use writer::{RowStatusWriter, render_status, write_status};
