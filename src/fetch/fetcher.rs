//! Concurrent form queries with child-table expansion.

use futures_util::future::join_all;
use serde_json::Value;
use thiserror::Error;
use tracing::{debug, info, instrument, warn};

use super::queries::{CHILD_TABLE_FIELDS, QUERY_DESCRIPTORS, child_detail_key};
use super::{NamedResult, QueryDescriptor, Record, TargetIds};
use crate::auth::AuthSession;
use crate::envelope::{EnvelopeError, unwrap_envelope};
use crate::transport::constants::{FORMS_CHILDREN_PATH, FORMS_ONLINE_PATH};
use crate::transport::{ApiRequest, PartnerTransport, TransportError};

/// Why a single query (or child-table call) failed.
///
/// Never escapes the fetcher: query failures become
/// [`NamedResult::failure`] entries and child failures become empty lists.
#[derive(Debug, Error)]
pub enum FetchError {
    /// Network, timeout, or decode failure.
    #[error(transparent)]
    Transport(#[from] TransportError),
    /// The partner answered without a success marker.
    #[error(transparent)]
    Envelope(#[from] EnvelopeError),
}

/// Runs the fixed form queries and expands their child tables.
#[derive(Debug, Clone)]
pub struct RecordFetcher {
    transport: PartnerTransport,
    descriptors: Vec<QueryDescriptor>,
}

impl RecordFetcher {
    /// Creates a fetcher for [`QUERY_DESCRIPTORS`].
    #[must_use]
    pub fn new(transport: PartnerTransport) -> Self {
        Self {
            transport,
            descriptors: QUERY_DESCRIPTORS.to_vec(),
        }
    }

    /// Runs every query concurrently.
    ///
    /// The result has one entry per descriptor, in declaration order
    /// regardless of completion order. A failed query yields a failure entry
    /// and never hides the others.
    #[instrument(skip(self, session, targets), fields(queries = self.descriptors.len()))]
    pub async fn fetch_all(&self, session: &AuthSession, targets: &TargetIds) -> Vec<NamedResult> {
        info!("fetching partner records");
        join_all(
            self.descriptors
                .iter()
                .map(|descriptor| self.fetch_named(session, targets, descriptor)),
        )
        .await
    }

    async fn fetch_named(
        &self,
        session: &AuthSession,
        targets: &TargetIds,
        descriptor: &QueryDescriptor,
    ) -> NamedResult {
        match self.fetch_query(session, targets, descriptor).await {
            Ok(payload) => {
                let records = payload.as_array().map_or(0, Vec::len);
                info!(query = descriptor.key, records, "query succeeded");
                NamedResult::success(descriptor, payload)
            }
            Err(error) => {
                warn!(query = descriptor.key, error = %error, "query failed");
                NamedResult::failure(descriptor, error.to_string())
            }
        }
    }

    /// Runs one query and expands the child tables of every returned record.
    ///
    /// # Errors
    ///
    /// Returns [`FetchError`] when the query itself fails. Child-table
    /// failures never surface here.
    #[instrument(skip(self, session, targets), fields(query = descriptor.key))]
    pub async fn fetch_query(
        &self,
        session: &AuthSession,
        targets: &TargetIds,
        descriptor: &QueryDescriptor,
    ) -> Result<Value, FetchError> {
        let request = descriptor
            .query_pairs(targets)
            .into_iter()
            .fold(ApiRequest::get(FORMS_ONLINE_PATH), |request, (key, value)| {
                request.query(key, value)
            })
            .headers(session.headers());

        let response = self.transport.send_json(&request).await?;
        let mut payload = unwrap_envelope(&response.body)?;

        if let Value::Array(records) = &mut payload {
            for record in records.iter_mut().filter_map(Value::as_object_mut) {
                self.expand_children(session, descriptor.form_id, record).await;
            }
        }
        Ok(payload)
    }

    /// Fetches every child table referenced by `record` and merges the rows
    /// under `<field>_detail`.
    ///
    /// Fields are fetched concurrently. Returns the number of child requests
    /// issued; a record without child-table fields costs none.
    pub async fn expand_children(
        &self,
        session: &AuthSession,
        form_id: &str,
        record: &mut Record,
    ) -> usize {
        let fields: Vec<&'static str> = CHILD_TABLE_FIELDS
            .iter()
            .copied()
            .filter(|field| record.get(*field).is_some_and(|value| !value.is_null()))
            .collect();
        if fields.is_empty() {
            return 0;
        }

        let snapshot: &Record = record;
        let issued = if record_id(snapshot).is_some() {
            fields.len()
        } else {
            0
        };
        let rows = join_all(
            fields
                .iter()
                .map(|field| self.fetch_children(session, form_id, snapshot, field)),
        )
        .await;

        for (field, rows) in fields.iter().zip(rows) {
            record.insert(child_detail_key(field), Value::Array(rows));
        }
        issued
    }

    /// Fetches the child rows of one field.
    ///
    /// Never fails: any error is logged and yields an empty list. A record
    /// without an `id` yields an empty list without a request.
    #[instrument(skip(self, session, record))]
    pub async fn fetch_children(
        &self,
        session: &AuthSession,
        form_id: &str,
        record: &Record,
        field_key: &str,
    ) -> Vec<Value> {
        let Some(record_id) = record_id(record) else {
            warn!("record has child-table data but no id; skipping expansion");
            return Vec::new();
        };

        match self
            .try_fetch_children(session, form_id, &record_id, field_key)
            .await
        {
            Ok(rows) => {
                debug!(record_id = %record_id, rows = rows.len(), "child rows fetched");
                rows
            }
            Err(error) => {
                warn!(record_id = %record_id, error = %error, "child table unavailable; using empty list");
                Vec::new()
            }
        }
    }

    async fn try_fetch_children(
        &self,
        session: &AuthSession,
        form_id: &str,
        record_id: &str,
        field_key: &str,
    ) -> Result<Vec<Value>, FetchError> {
        let request = ApiRequest::get(FORMS_CHILDREN_PATH)
            .query("field_uuid", field_key)
            .query("form_head_uuid", form_id)
            .query("record_id", record_id)
            .headers(session.headers());

        let response = self.transport.send_json(&request).await?;
        match unwrap_envelope(&response.body)? {
            Value::Array(rows) => Ok(rows),
            Value::Null => Ok(Vec::new()),
            other => {
                debug!(payload = %other, "child payload is not a list; ignoring");
                Ok(Vec::new())
            }
        }
    }
}

/// Returns the record's `id` as a string, accepting string or numeric ids.
fn record_id(record: &Record) -> Option<String> {
    match record.get("id")? {
        Value::String(id) if !id.trim().is_empty() => Some(id.clone()),
        Value::Number(id) => Some(id.to_string()),
        _ => None,
    }
}
