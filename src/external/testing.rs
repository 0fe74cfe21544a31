//! Scripted command executor for tests

use super::command::{CommandError, CommandExecutor, CommandOutput};
use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::Mutex;

/// Replays canned responses keyed by `program args...` and records every call.
///
/// Unscripted commands fail with [`CommandError::CommandNotFound`].
#[derive(Default)]
pub struct ScriptedCommandExecutor {
    responses: HashMap<String, Result<CommandOutput, CommandError>>,
    calls: Mutex<Vec<String>>,
}

impl ScriptedCommandExecutor {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn expect_command(
        mut self,
        program: &str,
        args: &[&str],
        response: Result<CommandOutput, CommandError>,
    ) -> Self {
        self.responses.insert(Self::key(program, args), response);
        self
    }

    /// Shorthand for a command that exits 0 with the given stdout.
    pub fn succeed(self, program: &str, args: &[&str], stdout: &str) -> Self {
        self.expect_command(
            program,
            args,
            Ok(CommandOutput {
                status_code: 0,
                stdout: stdout.to_string(),
                stderr: String::new(),
            }),
        )
    }

    /// Commands executed so far, in order.
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().map(|calls| calls.clone()).unwrap_or_default()
    }

    fn key(program: &str, args: &[&str]) -> String {
        if args.is_empty() {
            program.to_string()
        } else {
            format!("{} {}", program, args.join(" "))
        }
    }
}

#[async_trait]
impl CommandExecutor for ScriptedCommandExecutor {
    async fn execute(&self, program: &str, args: &[&str]) -> Result<CommandOutput, CommandError> {
        let key = Self::key(program, args);
        if let Ok(mut calls) = self.calls.lock() {
            calls.push(key.clone());
        }
        self.responses
            .get(&key)
            .cloned()
            .unwrap_or(Err(CommandError::CommandNotFound {
                command: program.to_string(),
            }))
    }
}
