//! Workflow step contract and the named step variants.

use crate::announce;
use crate::checksum;
use crate::context::Context;
use crate::error::{Error, Result};
use crate::packager;
use crate::release;
use crate::signing;
use crate::upload;

/// One named unit of release work.
///
/// A step is invoked exactly once per run with the shared read-only
/// context. On failure it returns the one distinguished `step.failed`
/// error kind; the runner treats any error as the signal to halt.
pub trait WorkflowStep {
    fn name(&self) -> &'static str;
    fn invoke(&self, context: &Context) -> Result<()>;
}

pub struct ChecksumStep;
pub struct SignStep;
pub struct PrepareStep;
pub struct PackageStep;
pub struct ReleaseStep;
pub struct UploadStep;
pub struct AnnounceStep;

impl WorkflowStep for ChecksumStep {
    fn name(&self) -> &'static str {
        "checksum"
    }

    fn invoke(&self, context: &Context) -> Result<()> {
        checksum::collect(context).map_err(|e| Error::step_failed(self.name(), e))
    }
}

impl WorkflowStep for SignStep {
    fn name(&self) -> &'static str {
        "sign"
    }

    fn invoke(&self, context: &Context) -> Result<()> {
        signing::sign(context).map_err(|e| Error::step_failed(self.name(), e))
    }
}

impl WorkflowStep for PrepareStep {
    fn name(&self) -> &'static str {
        "prepare"
    }

    fn invoke(&self, context: &Context) -> Result<()> {
        packager::prepare(context).map_err(|e| Error::step_failed(self.name(), e))
    }
}

impl WorkflowStep for PackageStep {
    fn name(&self) -> &'static str {
        "package"
    }

    fn invoke(&self, context: &Context) -> Result<()> {
        packager::package(context).map_err(|e| Error::step_failed(self.name(), e))
    }
}

impl WorkflowStep for ReleaseStep {
    fn name(&self) -> &'static str {
        "release"
    }

    fn invoke(&self, context: &Context) -> Result<()> {
        release::create(context).map_err(|e| Error::step_failed(self.name(), e))
    }
}

impl WorkflowStep for UploadStep {
    fn name(&self) -> &'static str {
        "upload"
    }

    fn invoke(&self, context: &Context) -> Result<()> {
        upload::send(context).map_err(|e| Error::step_failed(self.name(), e))
    }
}

impl WorkflowStep for AnnounceStep {
    fn name(&self) -> &'static str {
        "announce"
    }

    fn invoke(&self, context: &Context) -> Result<()> {
        announce::post(context).map_err(|e| Error::step_failed(self.name(), e))
    }
}
