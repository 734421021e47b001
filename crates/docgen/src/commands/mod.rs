//! CLI command implementations.

pub(crate) mod diagrams;
pub(crate) mod export;
pub(crate) mod gantt;
pub(crate) mod init;

pub(crate) use diagrams::DiagramsArgs;
pub(crate) use export::ExportArgs;
pub(crate) use gantt::GanttArgs;
pub(crate) use init::InitArgs;
