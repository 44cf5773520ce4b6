//! Lazy session façade
//!
//! Construction is free: the token manager, the dispatcher and the
//! accessor set are built on the first accessor lookup and shared by every
//! later one, so a session performs at most one token exchange per token
//! lifetime and keeps a single connection pool, no matter how many
//! accessors or correlated calls are in flight.
//!
//! `reset()` tears the shared state down; tests use it so a cached token
//! never leaks from one case into the next.

use std::sync::{Arc, PoisonError, RwLock};

use tracing::debug;

use hyperproof_core::{CorrelatedQueries, QueryPorts};
use hyperproof_domain::{ClientConfig, Result};

use crate::auth::TokenManager;
use crate::http::{Dispatcher, HttpClient};
use crate::resources::{
    ControlsApi, CustomAppsApi, LabelsApi, ProgramsApi, ProofApi, RisksApi, RolesApi,
    TaskStatusesApi, TasksApi, UsersApi,
};

/// Entry point of the client: owns configuration and the lazily-built
/// shared state.
pub struct Session {
    config: ClientConfig,
    shared: RwLock<Option<Arc<SessionCore>>>,
}

/// The state every accessor shares: one token manager behind one
/// dispatcher, and the accessor set bound to it.
struct SessionCore {
    users: UsersApi,
    controls: ControlsApi,
    proof: ProofApi,
    labels: LabelsApi,
    programs: ProgramsApi,
    risks: RisksApi,
    tasks: TasksApi,
    task_statuses: TaskStatusesApi,
    roles: RolesApi,
    custom_apps: CustomAppsApi,
    queries: CorrelatedQueries,
}

impl SessionCore {
    fn build(config: &ClientConfig) -> Result<Self> {
        debug!(api_base_url = %config.api_base_url, "constructing session state");

        let http = HttpClient::builder().timeout(config.timeout).build()?;
        let tokens = Arc::new(TokenManager::new(http.clone(), config));
        let dispatcher =
            Arc::new(Dispatcher::new(config.api_base_url.clone(), http, Arc::clone(&tokens)));

        let users = UsersApi::new(Arc::clone(&dispatcher));
        let controls = ControlsApi::new(Arc::clone(&dispatcher));
        let proof = ProofApi::new(Arc::clone(&dispatcher));
        let labels = LabelsApi::new(Arc::clone(&dispatcher));
        let programs = ProgramsApi::new(Arc::clone(&dispatcher));
        let risks = RisksApi::new(Arc::clone(&dispatcher));
        let tasks = TasksApi::new(Arc::clone(&dispatcher));
        let task_statuses = TaskStatusesApi::new(Arc::clone(&dispatcher));
        let roles = RolesApi::new(Arc::clone(&dispatcher));
        let custom_apps = CustomAppsApi::new(dispatcher);

        let queries = CorrelatedQueries::new(QueryPorts {
            users: Arc::new(users.clone()),
            controls: Arc::new(controls.clone()),
            labels: Arc::new(labels.clone()),
            proof: Arc::new(proof.clone()),
            risks: Arc::new(risks.clone()),
            tasks: Arc::new(tasks.clone()),
            task_statuses: Arc::new(task_statuses.clone()),
        })
        .with_fail_fast(config.fail_fast);

        Ok(Self {
            users,
            controls,
            proof,
            labels,
            programs,
            risks,
            tasks,
            task_statuses,
            roles,
            custom_apps,
            queries,
        })
    }
}

impl Session {
    /// Create a session. Nothing is constructed and no request is made
    /// until the first accessor is used.
    #[must_use]
    pub fn new(config: ClientConfig) -> Self {
        Self { config, shared: RwLock::new(None) }
    }

    /// Create a session from environment variables (see
    /// [`crate::config::load_from_env`]).
    ///
    /// # Errors
    ///
    /// Returns a configuration error when required variables are missing
    /// or unparsable.
    pub fn from_env() -> Result<Self> {
        Ok(Self::new(crate::config::load_from_env()?))
    }

    /// The configuration this session was created with.
    #[must_use]
    pub fn config(&self) -> &ClientConfig {
        &self.config
    }

    /// Users accessor.
    ///
    /// # Errors
    ///
    /// Fails when the shared HTTP state cannot be constructed.
    pub fn users(&self) -> Result<UsersApi> {
        Ok(self.core()?.users.clone())
    }

    /// Controls accessor.
    ///
    /// # Errors
    ///
    /// Fails when the shared HTTP state cannot be constructed.
    pub fn controls(&self) -> Result<ControlsApi> {
        Ok(self.core()?.controls.clone())
    }

    /// Proof accessor.
    ///
    /// # Errors
    ///
    /// Fails when the shared HTTP state cannot be constructed.
    pub fn proof(&self) -> Result<ProofApi> {
        Ok(self.core()?.proof.clone())
    }

    /// Labels accessor.
    ///
    /// # Errors
    ///
    /// Fails when the shared HTTP state cannot be constructed.
    pub fn labels(&self) -> Result<LabelsApi> {
        Ok(self.core()?.labels.clone())
    }

    /// Programs accessor.
    ///
    /// # Errors
    ///
    /// Fails when the shared HTTP state cannot be constructed.
    pub fn programs(&self) -> Result<ProgramsApi> {
        Ok(self.core()?.programs.clone())
    }

    /// Risks accessor.
    ///
    /// # Errors
    ///
    /// Fails when the shared HTTP state cannot be constructed.
    pub fn risks(&self) -> Result<RisksApi> {
        Ok(self.core()?.risks.clone())
    }

    /// Tasks accessor.
    ///
    /// # Errors
    ///
    /// Fails when the shared HTTP state cannot be constructed.
    pub fn tasks(&self) -> Result<TasksApi> {
        Ok(self.core()?.tasks.clone())
    }

    /// Task statuses accessor.
    ///
    /// # Errors
    ///
    /// Fails when the shared HTTP state cannot be constructed.
    pub fn task_statuses(&self) -> Result<TaskStatusesApi> {
        Ok(self.core()?.task_statuses.clone())
    }

    /// Roles accessor.
    ///
    /// # Errors
    ///
    /// Fails when the shared HTTP state cannot be constructed.
    pub fn roles(&self) -> Result<RolesApi> {
        Ok(self.core()?.roles.clone())
    }

    /// Custom apps accessor.
    ///
    /// # Errors
    ///
    /// Fails when the shared HTTP state cannot be constructed.
    pub fn custom_apps(&self) -> Result<CustomAppsApi> {
        Ok(self.core()?.custom_apps.clone())
    }

    /// Correlated queries over the session's accessors.
    ///
    /// The returned handle is cheap to clone; attach a cancellation token
    /// with [`CorrelatedQueries::with_cancellation`] for long fan-outs.
    ///
    /// # Errors
    ///
    /// Fails when the shared HTTP state cannot be constructed.
    pub fn queries(&self) -> Result<CorrelatedQueries> {
        Ok(self.core()?.queries.clone())
    }

    /// Tear down the shared state. The next accessor lookup reconstructs
    /// everything and re-authenticates.
    pub fn reset(&self) {
        debug!("resetting session state");
        *self.shared.write().unwrap_or_else(PoisonError::into_inner) = None;
    }

    fn core(&self) -> Result<Arc<SessionCore>> {
        if let Some(core) =
            self.shared.read().unwrap_or_else(PoisonError::into_inner).as_ref()
        {
            return Ok(Arc::clone(core));
        }

        let mut shared = self.shared.write().unwrap_or_else(PoisonError::into_inner);
        // A writer may have beaten us between the locks.
        if let Some(core) = shared.as_ref() {
            return Ok(Arc::clone(core));
        }
        let core = Arc::new(SessionCore::build(&self.config)?);
        *shared = Some(Arc::clone(&core));
        Ok(core)
    }
}
