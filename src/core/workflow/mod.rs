//! Named release workflows.
//!
//! Each factory assembles a fixed, hand-authored step sequence bound to the
//! given context. This module is the single source of truth for which named
//! workflows exist and for their step ordering; adding a workflow means
//! adding one factory here.

mod runner;
mod steps;

pub use runner::Workflow;
pub use steps::{
    AnnounceStep, ChecksumStep, PackageStep, PrepareStep, ReleaseStep, SignStep, UploadStep,
    WorkflowStep,
};

use crate::context::Context;

pub fn checksum(context: &Context) -> Workflow<'_> {
    Workflow::new(context, vec![Box::new(ChecksumStep)])
}

pub fn sign(context: &Context) -> Workflow<'_> {
    Workflow::new(context, vec![Box::new(ChecksumStep), Box::new(SignStep)])
}

pub fn prepare(context: &Context) -> Workflow<'_> {
    Workflow::new(context, vec![Box::new(ChecksumStep), Box::new(PrepareStep)])
}

pub fn package(context: &Context) -> Workflow<'_> {
    Workflow::new(context, vec![Box::new(PackageStep)])
}

pub fn release(context: &Context) -> Workflow<'_> {
    Workflow::new(
        context,
        vec![
            Box::new(ChecksumStep),
            Box::new(SignStep),
            Box::new(ReleaseStep),
        ],
    )
}

pub fn upload(context: &Context) -> Workflow<'_> {
    Workflow::new(context, vec![Box::new(UploadStep)])
}

pub fn announce(context: &Context) -> Workflow<'_> {
    Workflow::new(context, vec![Box::new(AnnounceStep)])
}

pub fn full_release(context: &Context) -> Workflow<'_> {
    Workflow::new(
        context,
        vec![
            Box::new(ChecksumStep),
            Box::new(SignStep),
            Box::new(ReleaseStep),
            Box::new(PrepareStep),
            Box::new(PackageStep),
            Box::new(UploadStep),
            Box::new(AnnounceStep),
        ],
    )
}
