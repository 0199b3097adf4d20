// Dispatch Target - fixed addressing of the external host

use serde::Serialize;

/// Identity of the external host process and the action it serves.
///
/// Defined once as a constant; every dispatch reads the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct DispatchTarget {
    pub package: &'static str,
    pub service: &'static str,
    pub action: &'static str,
}

impl DispatchTarget {
    /// Termux `RunCommandService`.
    pub const TERMUX: DispatchTarget = DispatchTarget {
        package: "com.termux",
        service: "com.termux.app.RunCommandService",
        action: "com.termux.RUN_COMMAND",
    };

    /// Component name in `package/class` form.
    pub fn component(&self) -> String {
        format!("{}/{}", self.package, self.service)
    }
}

impl Default for DispatchTarget {
    fn default() -> Self {
        Self::TERMUX
    }
}
