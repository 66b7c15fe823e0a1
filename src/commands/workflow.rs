use serde::Serialize;

use shipmate::{workflow, Logger};

use super::{create_context, CmdResult, ModelArgs};

#[derive(Debug, Clone, Copy)]
pub enum WorkflowKind {
    Checksum,
    Sign,
    Prepare,
    Package,
    Release,
    Upload,
    Announce,
    FullRelease,
}

impl WorkflowKind {
    pub fn label(&self) -> &'static str {
        match self {
            WorkflowKind::Checksum => "checksum",
            WorkflowKind::Sign => "sign",
            WorkflowKind::Prepare => "prepare",
            WorkflowKind::Package => "package",
            WorkflowKind::Release => "release",
            WorkflowKind::Upload => "upload",
            WorkflowKind::Announce => "announce",
            WorkflowKind::FullRelease => "full-release",
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct WorkflowOutput {
    pub workflow: &'static str,
    pub dry_run: bool,
}

pub fn run(kind: WorkflowKind, args: ModelArgs) -> CmdResult<WorkflowOutput> {
    let context = create_context(&args, Logger::stderr())?;

    let flow = match kind {
        WorkflowKind::Checksum => workflow::checksum(&context),
        WorkflowKind::Sign => workflow::sign(&context),
        WorkflowKind::Prepare => workflow::prepare(&context),
        WorkflowKind::Package => workflow::package(&context),
        WorkflowKind::Release => workflow::release(&context),
        WorkflowKind::Upload => workflow::upload(&context),
        WorkflowKind::Announce => workflow::announce(&context),
        WorkflowKind::FullRelease => workflow::full_release(&context),
    };

    flow.execute()?;

    Ok((
        WorkflowOutput {
            workflow: kind.label(),
            dry_run: context.dry_run(),
        },
        0,
    ))
}
