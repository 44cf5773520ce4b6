//! Correlated queries joining users and labels with their resource records
//!
//! Every operation follows the same two-phase algorithm: resolve an entity
//! set (users, or labels by name), then gather the records attached to each
//! resolved entity and return them as one ordered sequence. Results keep
//! resolution order first, fetch order second, and are never deduplicated.
//!
//! Failure policy: resolving the entity set is load-bearing and propagates
//! immediately. A failure fetching one entity's records is collected into
//! the result and the fan-out continues, unless fail-fast is enabled.
//!
//! Fan-outs issue one request per entity. "All tasks" costs O(users) HTTP
//! calls; the remote service may throttle long runs, which surfaces here as
//! collected transport failures.

use std::sync::Arc;

use hyperproof_domain::{
    Control, HyperproofError, Label, OrgUser, ProofMetadata, ProofQuery, Result, Risk, Task,
    TaskFilter, UserQuery,
};
use tokio_util::sync::CancellationToken;
use tracing::{debug, warn};

use crate::ports::{
    ControlReader, LabelReader, ProofReader, RiskReader, TaskReader, TaskStatusReader, UserReader,
};

/// A record tagged with the user or label that produced it.
#[derive(Debug, Clone)]
pub struct Matched<T> {
    /// Identifier of the matched user or label.
    pub matched_id: String,
    /// The record itself.
    pub record: T,
}

/// One failed per-entity fetch inside a fan-out.
#[derive(Debug, Clone)]
pub struct FanOutFailure {
    /// Identifier of the user or label whose fetch failed.
    pub entity_id: String,
    /// Rendered error.
    pub error: String,
}

/// Ordered result of a correlated query.
#[derive(Debug, Clone)]
pub struct Correlated<T> {
    /// Records in resolution-then-fetch order.
    pub records: Vec<Matched<T>>,
    /// Per-entity fetches that failed and were skipped.
    pub failures: Vec<FanOutFailure>,
    /// Set when cancellation stopped the fan-out before every entity was
    /// visited.
    pub incomplete: bool,
}

// Derived Default would require T: Default.
impl<T> Default for Correlated<T> {
    fn default() -> Self {
        Self { records: Vec::new(), failures: Vec::new(), incomplete: false }
    }
}

impl<T> Correlated<T> {
    /// True when the query produced no records and no failures.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.records.is_empty() && self.failures.is_empty()
    }

    /// Drop the match tags and return the plain records.
    #[must_use]
    pub fn into_records(self) -> Vec<T> {
        self.records.into_iter().map(|matched| matched.record).collect()
    }
}

/// The accessor set the engine reads from.
#[derive(Clone)]
pub struct QueryPorts {
    /// User directory.
    pub users: Arc<dyn UserReader>,
    /// Controls.
    pub controls: Arc<dyn ControlReader>,
    /// Labels.
    pub labels: Arc<dyn LabelReader>,
    /// Proof metadata.
    pub proof: Arc<dyn ProofReader>,
    /// Risks.
    pub risks: Arc<dyn RiskReader>,
    /// Tasks.
    pub tasks: Arc<dyn TaskReader>,
    /// Task statuses.
    pub task_statuses: Arc<dyn TaskStatusReader>,
}

/// Correlated-query engine over a [`QueryPorts`] set.
#[derive(Clone)]
pub struct CorrelatedQueries {
    ports: QueryPorts,
    fail_fast: bool,
    cancel: CancellationToken,
}

impl CorrelatedQueries {
    /// Create an engine with collect-and-continue failure handling and no
    /// cancellation.
    #[must_use]
    pub fn new(ports: QueryPorts) -> Self {
        Self { ports, fail_fast: false, cancel: CancellationToken::new() }
    }

    /// Abort on the first per-entity failure instead of collecting it.
    #[must_use]
    pub fn with_fail_fast(mut self, fail_fast: bool) -> Self {
        self.fail_fast = fail_fast;
        self
    }

    /// Observe `cancel` between per-entity fetches: once cancelled, no new
    /// fetch is started and the partial result is returned as incomplete.
    #[must_use]
    pub fn with_cancellation(mut self, cancel: CancellationToken) -> Self {
        self.cancel = cancel;
        self
    }

    /// Controls owned by the matched users.
    ///
    /// # Errors
    ///
    /// Fails when the query is empty, or when the user or control listing
    /// cannot be fetched.
    pub async fn controls_by_user(&self, query: &UserQuery) -> Result<Correlated<Control>> {
        let users = self.resolve_users(query).await?;
        if users.is_empty() {
            return Ok(Correlated::default());
        }
        let controls = self.ports.controls.controls().await?;
        Ok(join_by_owner(&users, &controls, |control| {
            control.owner.as_ref().map(|owner| owner.id.as_str())
        }))
    }

    /// Labels created by the matched users.
    ///
    /// # Errors
    ///
    /// Fails when the query is empty, or when the user or label listing
    /// cannot be fetched.
    pub async fn labels_by_user(&self, query: &UserQuery) -> Result<Correlated<Label>> {
        let users = self.resolve_users(query).await?;
        if users.is_empty() {
            return Ok(Correlated::default());
        }
        let labels = self.ports.labels.labels().await?;
        Ok(join_by_owner(&users, &labels, |label| label.created_by.as_deref()))
    }

    /// Risks owned by the matched users.
    ///
    /// # Errors
    ///
    /// Fails when the query is empty, or when the user or risk listing
    /// cannot be fetched.
    pub async fn risks_by_user(&self, query: &UserQuery) -> Result<Correlated<Risk>> {
        let users = self.resolve_users(query).await?;
        if users.is_empty() {
            return Ok(Correlated::default());
        }
        let risks = self.ports.risks.risks().await?;
        Ok(join_by_owner(&users, &risks, |risk| risk.owner_id.as_deref()))
    }

    /// Proof uploaded by the matched users, optionally scoped by
    /// `proof_query` to one object.
    ///
    /// # Errors
    ///
    /// Fails when the query is empty, or when the user or proof listing
    /// cannot be fetched.
    pub async fn proof_by_user(
        &self,
        query: &UserQuery,
        proof_query: &ProofQuery,
    ) -> Result<Correlated<ProofMetadata>> {
        let users = self.resolve_users(query).await?;
        if users.is_empty() {
            return Ok(Correlated::default());
        }
        let proof = self.ports.proof.proof_metadata(proof_query).await?;
        Ok(join_by_owner(&users, &proof, |item| item.created_by.as_deref()))
    }

    /// Tasks assigned to the matched users, one filter call per user.
    ///
    /// # Errors
    ///
    /// Fails when the query is empty or the user listing cannot be fetched;
    /// in fail-fast mode also on the first per-user failure.
    pub async fn tasks_by_user(&self, query: &UserQuery) -> Result<Correlated<Task>> {
        let users = self.resolve_users(query).await?;
        self.tasks_for_users(&users, None).await
    }

    /// Every task in the organization, one filter call per user.
    ///
    /// This is the most expensive operation the client offers: the remote
    /// API has no organization-wide task listing, so the cost is one call
    /// per user.
    ///
    /// # Errors
    ///
    /// Fails when the user listing cannot be fetched; in fail-fast mode
    /// also on the first per-user failure.
    pub async fn all_tasks(&self) -> Result<Correlated<Task>> {
        let users = self.ports.users.organization_users().await?;
        debug!(users = users.len(), "fanning out task fetches across the organization");
        self.tasks_for_users(&users, None).await
    }

    /// Every task in the given status, resolved by status ID or
    /// case-insensitive status name.
    ///
    /// # Errors
    ///
    /// Fails when the status is unknown, when the status or user listing
    /// cannot be fetched, or (fail-fast mode) on the first per-user failure.
    pub async fn all_tasks_by_status(&self, status: &str) -> Result<Correlated<Task>> {
        let statuses = self.ports.task_statuses.task_statuses().await?;
        let resolved = statuses
            .iter()
            .find(|candidate| {
                candidate.id == status || candidate.name.eq_ignore_ascii_case(status)
            })
            .ok_or_else(|| {
                HyperproofError::InvalidInput(format!("unknown task status: {status}"))
            })?;
        let users = self.ports.users.organization_users().await?;
        self.tasks_for_users(&users, Some(resolved.id.clone())).await
    }

    /// Proof attached to every label whose name contains `label_name`
    /// (case-insensitive substring match), concatenated in label order.
    ///
    /// # Errors
    ///
    /// Fails when the label listing cannot be fetched; in fail-fast mode
    /// also on the first per-label failure.
    pub async fn proof_by_label(&self, label_name: &str) -> Result<Correlated<ProofMetadata>> {
        let summaries = self.ports.labels.label_summaries().await?;
        let needle = label_name.to_lowercase();
        let matched: Vec<_> = summaries
            .into_iter()
            .filter(|label| label.name.to_lowercase().contains(&needle))
            .collect();
        debug!(label_name, matched = matched.len(), "resolved labels for proof lookup");

        let mut out = Correlated::default();
        for label in matched {
            if self.cancel.is_cancelled() {
                warn!("proof fan-out cancelled; returning partial result");
                out.incomplete = true;
                break;
            }
            let query = ProofQuery::default().with_object("label", label.id.clone());
            match self.ports.proof.proof_metadata(&query).await {
                Ok(proof) => out.records.extend(
                    proof
                        .into_iter()
                        .map(|record| Matched { matched_id: label.id.clone(), record }),
                ),
                Err(err) if self.fail_fast => return Err(err),
                Err(err) => {
                    warn!(label_id = %label.id, error = %err, "skipping label after failed proof fetch");
                    out.failures
                        .push(FanOutFailure { entity_id: label.id.clone(), error: err.to_string() });
                }
            }
        }
        Ok(out)
    }

    /// Resolve the user set for a by-user query. An empty query is rejected
    /// so a typo cannot silently turn into an organization-wide fan-out.
    async fn resolve_users(&self, query: &UserQuery) -> Result<Vec<OrgUser>> {
        if query.is_empty() {
            return Err(HyperproofError::InvalidInput(
                "at least one of user_id, given_name or surname is required".to_owned(),
            ));
        }
        let users = self.ports.users.organization_users().await?;
        let matched: Vec<_> = users.into_iter().filter(|user| query.matches(user)).collect();
        debug!(matched = matched.len(), "resolved user set");
        Ok(matched)
    }

    /// One task-filter call per user, in user order.
    async fn tasks_for_users(
        &self,
        users: &[OrgUser],
        status_id: Option<String>,
    ) -> Result<Correlated<Task>> {
        let mut out = Correlated::default();
        for user in users {
            if self.cancel.is_cancelled() {
                warn!("task fan-out cancelled; returning partial result");
                out.incomplete = true;
                break;
            }
            let mut filter = TaskFilter::default().with_assignee(user.id.clone());
            if let Some(status_id) = &status_id {
                filter = filter.with_task_status_id(status_id.clone());
            }
            match self.ports.tasks.filter_tasks(&filter).await {
                Ok(tasks) => out.records.extend(
                    tasks.into_iter().map(|record| Matched { matched_id: user.id.clone(), record }),
                ),
                Err(err) if self.fail_fast => return Err(err),
                Err(err) => {
                    warn!(user_id = %user.id, error = %err, "skipping user after failed task fetch");
                    out.failures
                        .push(FanOutFailure { entity_id: user.id.clone(), error: err.to_string() });
                }
            }
        }
        Ok(out)
    }
}

/// Join pre-fetched records against the matched users: user order first,
/// record order second.
fn join_by_owner<T: Clone>(
    users: &[OrgUser],
    records: &[T],
    owner_id: impl Fn(&T) -> Option<&str>,
) -> Correlated<T> {
    let mut out = Correlated::default();
    for user in users {
        for record in records {
            if owner_id(record).is_some_and(|id| user.has_id(id)) {
                out.records.push(Matched { matched_id: user.id.clone(), record: record.clone() });
            }
        }
    }
    out
}
