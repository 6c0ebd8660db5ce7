use crate::error::{AppError, Result};
use std::process::ExitStatus;
use tokio::process::{Child, Command};
use tracing::{error, info, warn};

/// Supervised group of child processes.
///
/// Every spawned child has `kill_on_drop` set, so the group is torn down
/// even on panic or early return; `shutdown` is the orderly path that kills
/// and reaps each child with logging.
pub struct Supervisor {
    children: Vec<SupervisedChild>,
}

struct SupervisedChild {
    name: String,
    child: Child,
}

impl Supervisor {
    pub fn new() -> Self {
        Self {
            children: Vec::new(),
        }
    }

    /// Spawn a child process under supervision
    pub fn spawn(&mut self, name: &str, command: &mut Command) -> Result<()> {
        command.kill_on_drop(true);

        let child = command
            .spawn()
            .map_err(|e| AppError::Internal(format!("failed to spawn {}: {}", name, e)))?;

        info!(name, pid = ?child.id(), "Child process started");

        self.children.push(SupervisedChild {
            name: name.to_string(),
            child,
        });
        Ok(())
    }

    /// Wait for the named child to exit
    pub async fn wait(&mut self, name: &str) -> Result<ExitStatus> {
        let entry = self
            .children
            .iter_mut()
            .find(|c| c.name == name)
            .ok_or_else(|| AppError::Internal(format!("no supervised child named {}", name)))?;

        entry
            .child
            .wait()
            .await
            .map_err(|e| AppError::Internal(format!("failed to wait on {}: {}", name, e)))
    }

    /// Kill and reap every child in the group
    pub async fn shutdown(&mut self) {
        for mut entry in self.children.drain(..) {
            // start_kill fails when the child already exited; reap either way
            if let Err(e) = entry.child.start_kill() {
                warn!(name = %entry.name, "Child already exited: {}", e);
            }
            match entry.child.wait().await {
                Ok(status) => info!(name = %entry.name, %status, "Child process stopped"),
                Err(e) => error!(name = %entry.name, "Failed to reap child: {}", e),
            }
        }
    }

    pub fn len(&self) -> usize {
        self.children.len()
    }

    pub fn is_empty(&self) -> bool {
        self.children.is_empty()
    }
}

impl Default for Supervisor {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn test_spawn_wait_and_shutdown() {
        let mut supervisor = Supervisor::new();
        supervisor
            .spawn("short", Command::new("true").arg("--"))
            .unwrap();
        assert_eq!(supervisor.len(), 1);

        let status = supervisor.wait("short").await.unwrap();
        assert!(status.success());

        // Shutdown reaps an already-exited child without error
        supervisor.shutdown().await;
        assert!(supervisor.is_empty());
    }

    #[tokio::test]
    async fn test_shutdown_kills_long_running_child() {
        let mut supervisor = Supervisor::new();
        supervisor
            .spawn("sleeper", Command::new("sleep").arg("600"))
            .unwrap();

        supervisor.shutdown().await;
        assert!(supervisor.is_empty());
    }

    #[tokio::test]
    async fn test_spawn_missing_binary_fails() {
        let mut supervisor = Supervisor::new();
        let result = supervisor.spawn(
            "ghost",
            &mut Command::new("/nonexistent/binary/for/this/test"),
        );
        assert!(result.is_err());
        assert!(supervisor.is_empty());
    }

    #[tokio::test]
    async fn test_wait_on_unknown_child_fails() {
        let mut supervisor = Supervisor::new();
        assert!(supervisor.wait("nobody").await.is_err());
    }
}
