// Outbound RUN_COMMAND message (wire shape expected by the external host)

use serde::{Serialize, Serializer};

use super::request::RunRequest;
use super::target::DispatchTarget;

/// Extra keys understood by the host's command-execution entry point.
/// Names are a compatibility boundary with a versioned collaborator.
pub mod extra {
    pub const PATH: &str = "com.termux.RUN_COMMAND_PATH";
    pub const ARGUMENTS: &str = "com.termux.RUN_COMMAND_ARGUMENTS";
    pub const WORKDIR: &str = "com.termux.RUN_COMMAND_WORKDIR";
    pub const BACKGROUND: &str = "com.termux.RUN_COMMAND_BACKGROUND";
    pub const SESSION_ACTION: &str = "com.termux.RUN_COMMAND_SESSION_ACTION";
}

/// Session handling requested from the host.
///
/// The bridge never attaches to an existing session, so there is one variant.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SessionAction {
    #[default]
    NewSession,
}

impl SessionAction {
    pub fn as_wire(&self) -> &'static str {
        match self {
            SessionAction::NewSession => "0",
        }
    }
}

impl Serialize for SessionAction {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_wire())
    }
}

/// Typed value of a single intent extra.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ExtraValue {
    Str(String),
    StrArray(Vec<String>),
    Bool(bool),
}

/// The message handed to the operating environment for delivery.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RunCommandIntent {
    pub target: DispatchTarget,
    pub path: String,
    pub arguments: Vec<String>,
    pub workdir: String,
    pub background: bool,
    pub session_action: SessionAction,
}

impl RunCommandIntent {
    /// Address `request` to `target`. Consumes the request.
    pub fn new(target: DispatchTarget, request: RunRequest) -> Self {
        let RunRequest {
            path,
            arguments,
            workdir,
            background,
        } = request;

        Self {
            target,
            path,
            arguments,
            workdir,
            background,
            session_action: SessionAction::NewSession,
        }
    }

    /// Extras in wire order: path, arguments, workdir, background, session action.
    pub fn extras(&self) -> Vec<(&'static str, ExtraValue)> {
        vec![
            (extra::PATH, ExtraValue::Str(self.path.clone())),
            (extra::ARGUMENTS, ExtraValue::StrArray(self.arguments.clone())),
            (extra::WORKDIR, ExtraValue::Str(self.workdir.clone())),
            (extra::BACKGROUND, ExtraValue::Bool(self.background)),
            (
                extra::SESSION_ACTION,
                ExtraValue::Str(self.session_action.as_wire().to_string()),
            ),
        ]
    }
}
