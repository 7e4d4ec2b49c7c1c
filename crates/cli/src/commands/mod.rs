pub mod catalog;
pub mod config;
pub mod demo;

use serde::Serialize;

/// What a command hands back to the binary: a process exit code and the
/// line to print.
#[derive(Debug, Clone)]
pub struct CommandResult {
    pub exit_code: u8,
    pub output: String,
}

#[derive(Debug, Serialize)]
#[serde(rename_all = "snake_case")]
enum Status {
    Ok,
    Error,
}

/// One-line JSON payload per command invocation.
#[derive(Debug, Serialize)]
struct CommandOutcome<'a> {
    command: &'a str,
    status: Status,
    #[serde(skip_serializing_if = "Option::is_none")]
    error_class: Option<&'a str>,
    message: String,
}

impl CommandResult {
    pub fn success(command: &str, message: impl Into<String>) -> Self {
        let outcome = CommandOutcome {
            command,
            status: Status::Ok,
            error_class: None,
            message: message.into(),
        };
        Self::from_outcome(0, outcome)
    }

    pub fn failure(
        command: &str,
        error_class: &str,
        message: impl Into<String>,
        exit_code: u8,
    ) -> Self {
        let outcome = CommandOutcome {
            command,
            status: Status::Error,
            error_class: Some(error_class),
            message: message.into(),
        };
        Self::from_outcome(exit_code, outcome)
    }

    fn from_outcome(exit_code: u8, outcome: CommandOutcome<'_>) -> Self {
        let output = serde_json::to_string(&outcome).unwrap_or_else(|error| {
            serde_json::json!({
                "command": outcome.command,
                "status": "error",
                "error_class": "serialization",
                "message": error.to_string(),
            })
            .to_string()
        });
        Self { exit_code, output }
    }
}
