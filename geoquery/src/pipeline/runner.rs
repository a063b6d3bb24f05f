//! Task execution pipeline.
//!
//! [`TaskRunner`] drives one invocation through a fixed, linear sequence:
//! validate → resolve working directory → connect to the cube → coerce and
//! compute → record the request → package → upload → announce. There is no
//! branching, retry, or rollback inside the pipeline; any failure aborts
//! the invocation and propagates to the job framework, leaving whatever
//! already landed in the working directory on disk for inspection.
//!
//! Everything the pipeline needs is injected at construction: settings, the
//! cube source, the storage client, and (optionally) the notifier. Distinct
//! request identifiers give distinct working directories, so many runner
//! calls may execute in parallel without coordination.

use super::context::{QueryRecord, RequestContext};
use super::package::{package_outputs, CollisionPolicy, PackageError};
use crate::cube::{ConnectError, CubeSource};
use crate::delivery::{CompletionNotice, Notifier, ObjectStorage, StorageError, WebhookNotifier};
use crate::param::{coerce_kwargs, validate_kwargs, CoerceError, ValidationError};
use crate::settings::Settings;
use crate::task::{ComputeError, CubeTask};
use std::fs;
use std::path::PathBuf;
use thiserror::Error;
use tracing::{debug, info, warn};

/// Errors that abort a task invocation.
#[derive(Debug, Error)]
pub enum RunError {
    /// The raw request failed validation; computation never started.
    #[error("request rejected: {0}")]
    Validation(#[from] ValidationError),

    /// A validated value could not be converted to its native type.
    #[error(transparent)]
    Coerce(#[from] CoerceError),

    /// No data-access handle could be obtained.
    #[error(transparent)]
    Connect(#[from] ConnectError),

    /// The task's computation function failed.
    #[error("computation failed: {0}")]
    Compute(ComputeError),

    /// The result package could not be built.
    #[error(transparent)]
    Package(#[from] PackageError),

    /// The result package could not be uploaded.
    #[error(transparent)]
    Upload(#[from] StorageError),

    /// Working directory or request record I/O failed.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

/// What a completed invocation produced.
#[derive(Debug, Clone)]
pub struct RunOutcome {
    /// Output files reported by the computation, in order.
    pub outputs: Vec<PathBuf>,
    /// Local path of the result package.
    pub archive: PathBuf,
    /// Destination location of the uploaded package.
    pub location: String,
}

/// Executes task invocations against injected collaborators.
pub struct TaskRunner<C, S, N = WebhookNotifier> {
    settings: Settings,
    source: C,
    storage: S,
    notifier: Option<N>,
    collision_policy: CollisionPolicy,
}

impl<C, S> TaskRunner<C, S, WebhookNotifier>
where
    C: CubeSource,
    S: ObjectStorage,
{
    /// Creates a runner from settings and collaborators.
    ///
    /// When `settings.result_url` is set, completion notices are POSTed
    /// there by a [`WebhookNotifier`]; otherwise the notification step is a
    /// no-op. Use [`with_notifier`](TaskRunner::with_notifier) to substitute
    /// another delivery mechanism.
    pub fn new(settings: Settings, source: C, storage: S) -> Self {
        let notifier = settings.result_url.as_deref().map(WebhookNotifier::new);
        Self {
            settings,
            source,
            storage,
            notifier,
            collision_policy: CollisionPolicy::default(),
        }
    }
}

impl<C, S, N> TaskRunner<C, S, N>
where
    C: CubeSource,
    S: ObjectStorage,
    N: Notifier,
{
    /// Replaces the completion notifier.
    pub fn with_notifier<T: Notifier>(self, notifier: T) -> TaskRunner<C, S, T> {
        TaskRunner {
            settings: self.settings,
            source: self.source,
            storage: self.storage,
            notifier: Some(notifier),
            collision_policy: self.collision_policy,
        }
    }

    /// Removes the notifier; the notification step becomes a no-op.
    pub fn without_notifier(mut self) -> Self {
        self.notifier = None;
        self
    }

    /// Sets the archive entry collision policy.
    pub fn with_collision_policy(mut self, policy: CollisionPolicy) -> Self {
        self.collision_policy = policy;
        self
    }

    /// Runs one task invocation to completion.
    ///
    /// The request is validated before any side effect; a rejected request
    /// never reaches the computation function. Notification failures are
    /// logged and do not fail the invocation.
    pub async fn run<T>(&self, task: &T, request: RequestContext) -> Result<RunOutcome, RunError>
    where
        T: CubeTask<C::Handle>,
    {
        let RequestContext { request_id, kwargs } = request;

        debug!(task = task.name(), request = %request_id, "validating request");
        validate_kwargs(task.parameters(), &kwargs)?;

        let workdir = self.settings.result_root.join(request_id.as_str());
        fs::create_dir_all(&workdir)?;
        debug!(path = %workdir.display(), "working directory ready");

        let cube = self.source.connect(task.name())?;

        let native = coerce_kwargs(task.parameters(), &kwargs)?;
        info!(task = task.name(), request = %request_id, "running computation");
        let outputs = task
            .compute(&cube, &workdir, &native)
            .map_err(RunError::Compute)?;
        debug!(outputs = outputs.len(), "computation finished");

        QueryRecord::new(task.name(), &request_id, kwargs).write_to(&workdir)?;

        let archive = package_outputs(&workdir, &request_id, &outputs, self.collision_policy)?;

        let key = self.settings.storage.result_key(request_id.as_str());
        let location = self.storage.put_file(&archive, &key).await?;
        info!(task = task.name(), request = %request_id, location = %location, "result package uploaded");

        if let Some(notifier) = &self.notifier {
            let notice = CompletionNotice::for_location(location.clone());
            if let Err(e) = notifier.notify(&notice).await {
                warn!(error = %e, request = %request_id, "completion notice delivery failed");
            }
        }

        Ok(RunOutcome {
            outputs,
            archive,
            location,
        })
    }
}
