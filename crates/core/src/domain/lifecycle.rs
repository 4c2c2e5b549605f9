// Lifecycle Domain Model

/// State token emitted by the host server's lifecycle
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum LifecycleEvent {
    Booted,
    Running,
    Halt,
    Restart,
    Stop,
    Other(String),
}

impl LifecycleEvent {
    /// Parse a lifecycle token (`"halt"`, `"restart"`, ...); unknown tokens are kept as `Other`
    pub fn from_token(token: &str) -> Self {
        match token.trim().to_ascii_lowercase().as_str() {
            "booted" => LifecycleEvent::Booted,
            "running" => LifecycleEvent::Running,
            "halt" => LifecycleEvent::Halt,
            "restart" => LifecycleEvent::Restart,
            "stop" => LifecycleEvent::Stop,
            _ => LifecycleEvent::Other(token.to_string()),
        }
    }

    /// halt, restart and stop end the monitor; everything else is ignored
    pub fn stops_monitor(&self) -> bool {
        matches!(
            self,
            LifecycleEvent::Halt | LifecycleEvent::Restart | LifecycleEvent::Stop
        )
    }
}

/// Monitor loop state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MonitorState {
    Stopped,
    Running,
}
