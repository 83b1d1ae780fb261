//! ManageRedirectsUseCase: download and upload of the redirects file.
//!
//! [`RedirectsService`] is the persistence coordinator.  It owns no state
//! besides the resource path and its collaborators; every call goes to disk.
//!
//! # Upload pipeline (for beginners)
//!
//! ```text
//! PermissionCheck ─► Rotating ─► ReadingCandidate ─► Validating ─► Writing ─► NotifyingReload ─► Done
//!        │              │               │                 │            │
//!        └──────────────┴───────────────┴─────────────────┴────────────┴──► Failed(reason)
//! ```
//!
//! - `Rotating` moves the current file into its timestamped backup slot.
//!   From here on the previous configuration is safe on disk.
//! - `ReadingCandidate` and `Validating` reject bad uploads *before* anything
//!   is written to `redirects.json`.
//! - `Writing` replaces `redirects.json` atomically.
//! - `NotifyingReload` tells consumers to re-read the file.
//!
//! No step is retried and the rotation is never rolled back: after a failed
//! upload the previous file sits in the backup slot and `redirects.json` may
//! be absent until the operator uploads again.
//!
//! # Concurrency
//!
//! Uploads through one service are serialized by an async mutex, so two
//! administrators cannot interleave rotation and write on the same file.
//! Downloads never take the lock.

use std::fmt;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use redirects_core::{
    validate_redirects, Action, FormatError, RedirectSet, Requester, ValidationError,
    REDIRECTS_RESOURCE,
};
use thiserror::Error;
use tokio::sync::Mutex;
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::application::ports::{
    Clock, PermissionChecker, PermissionDenied, ReloadNotifier, SystemClock,
};
use crate::infrastructure::storage::{
    read_redirects, rotate_backup, write_redirects, RedirectsPaths,
};

/// Error type for the manage-redirects use case.
///
/// Every failure is classified exactly once, where it happens.  Callers
/// further up propagate with `?` and never re-wrap.
#[derive(Debug, Error)]
pub enum RedirectsError {
    /// The content is not parseable as a redirects file.
    #[error("bad request: {0}")]
    BadRequest(#[from] FormatError),

    /// The file exists but could not be read.
    #[error("redirects file {path} could not be read: {source}")]
    NotFound {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// The candidate parsed but breaks a structural rule.
    #[error("invalid redirects: {0}")]
    Validation(#[from] ValidationError),

    /// The requester lacks the capability for the action.
    #[error("no permission: {0}")]
    NoPermission(#[from] PermissionDenied),

    /// Rotation or write failed at the file-system level.
    #[error("I/O error at {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

/// Discriminant of [`RedirectsError`], for transports that map errors to codes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    BadRequest,
    NotFound,
    Validation,
    NoPermission,
    Io,
}

impl ErrorKind {
    /// HTTP status an API layer would answer with.
    pub fn status_code(self) -> u16 {
        match self {
            ErrorKind::BadRequest => 400,
            ErrorKind::NoPermission => 403,
            ErrorKind::NotFound => 404,
            ErrorKind::Validation => 422,
            ErrorKind::Io => 500,
        }
    }
}

impl RedirectsError {
    pub fn kind(&self) -> ErrorKind {
        match self {
            RedirectsError::BadRequest(_) => ErrorKind::BadRequest,
            RedirectsError::NotFound { .. } => ErrorKind::NotFound,
            RedirectsError::Validation(_) => ErrorKind::Validation,
            RedirectsError::NoPermission(_) => ErrorKind::NoPermission,
            RedirectsError::Io { .. } => ErrorKind::Io,
        }
    }
}

/// Position of an upload in its pipeline.  Logged on every transition and on
/// failure, so an operator can tell how far a failed upload got.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UploadStage {
    PermissionCheck,
    Rotating,
    ReadingCandidate,
    Validating,
    Writing,
    NotifyingReload,
    Done,
}

impl fmt::Display for UploadStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            UploadStage::PermissionCheck => "permission-check",
            UploadStage::Rotating => "rotating",
            UploadStage::ReadingCandidate => "reading-candidate",
            UploadStage::Validating => "validating",
            UploadStage::Writing => "writing",
            UploadStage::NotifyingReload => "notifying-reload",
            UploadStage::Done => "done",
        };
        f.write_str(name)
    }
}

/// Who is asking, plus an id to correlate log lines of one request.
#[derive(Debug, Clone)]
pub struct RequestContext {
    pub requester: Requester,
    pub request_id: Uuid,
}

impl RequestContext {
    pub fn new(requester: Requester) -> Self {
        Self {
            requester,
            request_id: Uuid::new_v4(),
        }
    }
}

/// Outcome of a successful upload.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UploadReport {
    /// Where the previous file went, or `None` on a first upload.
    pub backup_path: Option<PathBuf>,
    /// Number of rules now in `redirects.json`.
    pub rule_count: usize,
}

/// The persistence coordinator for the redirects file.
pub struct RedirectsService {
    paths: RedirectsPaths,
    permissions: Arc<dyn PermissionChecker>,
    reload: Arc<dyn ReloadNotifier>,
    clock: Arc<dyn Clock>,
    upload_lock: Mutex<()>,
}

impl RedirectsService {
    /// Creates a service using the system clock for backup names.
    pub fn new(
        paths: RedirectsPaths,
        permissions: Arc<dyn PermissionChecker>,
        reload: Arc<dyn ReloadNotifier>,
    ) -> Self {
        Self {
            paths,
            permissions,
            reload,
            clock: Arc::new(SystemClock),
            upload_lock: Mutex::new(()),
        }
    }

    /// Replaces the clock used to timestamp backups.
    pub fn with_clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    pub fn paths(&self) -> &RedirectsPaths {
        &self.paths
    }

    /// Returns the current redirects, or an empty set if none are configured.
    ///
    /// # Errors
    ///
    /// [`RedirectsError::NoPermission`] when the check fails (nothing is read),
    /// otherwise the errors of [`read_redirects`].
    pub async fn download(&self, ctx: &RequestContext) -> Result<RedirectSet, RedirectsError> {
        self.authorize(Action::Download, ctx).await?;

        let set = read_redirects(&self.paths.current()).await?;
        info!(
            request_id = %ctx.request_id,
            requester = %ctx.requester,
            rules = set.len(),
            "redirects downloaded"
        );
        Ok(set)
    }

    /// Makes the file at `candidate` the current redirects configuration.
    ///
    /// # Errors
    ///
    /// Any [`RedirectsError`]; the failing stage is logged.  See the module
    /// docs for what is left on disk after a failure.
    pub async fn upload(
        &self,
        ctx: &RequestContext,
        candidate: &Path,
    ) -> Result<UploadReport, RedirectsError> {
        let mut stage = UploadStage::PermissionCheck;
        let result = self.run_upload(ctx, candidate, &mut stage).await;

        match &result {
            Ok(report) => info!(
                request_id = %ctx.request_id,
                requester = %ctx.requester,
                rules = report.rule_count,
                backup = ?report.backup_path,
                "redirects uploaded"
            ),
            Err(e) => warn!(
                request_id = %ctx.request_id,
                requester = %ctx.requester,
                %stage,
                error = %e,
                "redirects upload failed"
            ),
        }
        result
    }

    async fn run_upload(
        &self,
        ctx: &RequestContext,
        candidate: &Path,
        stage: &mut UploadStage,
    ) -> Result<UploadReport, RedirectsError> {
        self.authorize(Action::Upload, ctx).await?;
        let _guard = self.upload_lock.lock().await;

        advance(stage, UploadStage::Rotating, ctx);
        let backup_path = rotate_backup(&self.paths, &self.clock.now()).await?;

        advance(stage, UploadStage::ReadingCandidate, ctx);
        let set = read_redirects(candidate).await?;

        advance(stage, UploadStage::Validating, ctx);
        validate_redirects(&set)?;

        advance(stage, UploadStage::Writing, ctx);
        write_redirects(&self.paths, &set).await?;

        advance(stage, UploadStage::NotifyingReload, ctx);
        self.reload.notify_reload();

        advance(stage, UploadStage::Done, ctx);
        Ok(UploadReport {
            backup_path,
            rule_count: set.len(),
        })
    }

    async fn authorize(&self, action: Action, ctx: &RequestContext) -> Result<(), RedirectsError> {
        self.permissions
            .check(REDIRECTS_RESOURCE, action, &ctx.requester)
            .await?;
        Ok(())
    }
}

fn advance(stage: &mut UploadStage, next: UploadStage, ctx: &RequestContext) {
    debug!(request_id = %ctx.request_id, from = %stage, to = %next, "upload stage");
    *stage = next;
}
