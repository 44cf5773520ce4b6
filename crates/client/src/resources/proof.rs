//! Proof accessor
//!
//! The metadata collection is paginated server-side; listing methods follow
//! the continuation token to the end before returning.

use std::path::Path;
use std::sync::Arc;

use async_trait::async_trait;
use reqwest::Method;

use hyperproof_core::ProofReader;
use hyperproof_domain::{ProofMetadata, ProofQuery, Result};

use crate::http::Dispatcher;

/// Access to the `/proof` endpoints.
#[derive(Clone)]
pub struct ProofApi {
    dispatcher: Arc<Dispatcher>,
}

impl ProofApi {
    pub(crate) fn new(dispatcher: Arc<Dispatcher>) -> Self {
        Self { dispatcher }
    }

    /// Retrieve proof metadata matching `query`, following pagination until
    /// the collection is exhausted.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors; any failing page fails the listing.
    pub async fn get_proof_metadata_collection(
        &self,
        query: &ProofQuery,
    ) -> Result<Vec<ProofMetadata>> {
        self.dispatcher.get_paged("/proof", &query.query_pairs()).await
    }

    /// Retrieve specific proof metadata by proof ID.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_proof_metadata(&self, proof_id: &str) -> Result<ProofMetadata> {
        self.dispatcher.request(Method::GET, &format!("/proof/{proof_id}"), &[], None).await
    }

    /// Raw-mode variant of [`Self::get_proof_metadata`].
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_proof_metadata_raw(&self, proof_id: &str) -> Result<String> {
        self.dispatcher.request_raw(Method::GET, &format!("/proof/{proof_id}"), &[], None).await
    }

    /// Retrieve the contents of a proof file. The body is returned
    /// uninterpreted; proof contents are arbitrary files, not JSON.
    ///
    /// # Errors
    ///
    /// Propagates dispatch errors.
    pub async fn get_proof_contents(&self, proof_id: &str, version: Option<u32>) -> Result<String> {
        let query = version.map_or_else(Vec::new, |v| vec![("version", v.to_string())]);
        self.dispatcher
            .request_raw(Method::GET, &format!("/proof/{proof_id}/contents"), &query, None)
            .await
    }

    /// Upload a new proof file, optionally attached to an object.
    ///
    /// `object_type` and `object_id` must be supplied together; supplying
    /// only one attaches nothing, matching the remote API's behaviour.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the file cannot be read; otherwise dispatch
    /// errors.
    pub async fn add_proof(
        &self,
        file_path: &Path,
        object_type: Option<&str>,
        object_id: Option<&str>,
    ) -> Result<ProofMetadata> {
        let mut fields = Vec::new();
        if let (Some(object_type), Some(object_id)) = (object_type, object_id) {
            fields.push(("objectType", object_type.to_owned()));
            fields.push(("objectId", object_id.to_owned()));
        }
        self.dispatcher.upload("/proof", "file", file_path, &fields).await
    }

    /// Upload a new version of an existing proof.
    ///
    /// # Errors
    ///
    /// `InvalidInput` when the file cannot be read; otherwise dispatch
    /// errors.
    pub async fn add_proof_version(
        &self,
        proof_id: &str,
        file_path: &Path,
    ) -> Result<ProofMetadata> {
        self.dispatcher.upload(&format!("/proof/{proof_id}/versions"), "file", file_path, &[]).await
    }
}

#[async_trait]
impl ProofReader for ProofApi {
    async fn proof_metadata(&self, query: &ProofQuery) -> Result<Vec<ProofMetadata>> {
        self.get_proof_metadata_collection(query).await
    }
}
