//! External process invoker.
//!
//! `CommandSpec` builds the argument vector for an external command as a pure
//! function of the tool parameters; `run` spawns it, waits for completion and
//! captures exit status, stdout and stderr. No timeout is imposed: a hung
//! external process hangs the calling tool invocation. A caller disconnect
//! does not kill the child.

use std::process::Stdio;

use tokio::process::Command;

use tracing::{debug, warn};

use super::error::ToolError;

/// An ordered, deterministic description of one external command invocation.
///
/// Identical parameters always yield an identical token sequence; there is no
/// hidden state. The spec also carries the error-message context and the
/// install remediation hint for the program it targets.
#[derive(Debug, Clone)]
pub struct CommandSpec {
    program: String,
    hint: String,
    context: String,
    args: Vec<String>,
    envs: Vec<(String, String)>,
    sensitive: bool,
}

impl CommandSpec {
    /// Create a spec for `program`. `label` is the human name used in error
    /// messages ("Azure CLI"), `hint` the installation remedy shown when the
    /// binary is missing.
    pub fn new(
        program: impl Into<String>,
        label: impl Into<String>,
        hint: impl Into<String>,
    ) -> Self {
        Self {
            program: program.into(),
            context: format!("executing {} command", label.into()),
            hint: hint.into(),
            args: Vec::new(),
            envs: Vec::new(),
            sensitive: false,
        }
    }

    /// Override the error-context phrase ("creating AKS cluster").
    pub fn context(mut self, phrase: impl Into<String>) -> Self {
        self.context = phrase.into();
        self
    }

    /// Append a single argument token.
    pub fn arg(mut self, arg: impl Into<String>) -> Self {
        self.args.push(arg.into());
        self
    }

    /// Append several argument tokens.
    pub fn args<I, T>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = T>,
        T: Into<String>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    /// Append `--name value`.
    pub fn flag(mut self, name: &str, value: impl ToString) -> Self {
        self.args.push(name.to_string());
        self.args.push(value.to_string());
        self
    }

    /// Append `--name value` only when the value is present.
    pub fn flag_opt(self, name: &str, value: Option<impl ToString>) -> Self {
        match value {
            Some(value) => self.flag(name, value),
            None => self,
        }
    }

    /// Append a bare switch (`--yes`).
    pub fn switch(mut self, name: &str) -> Self {
        self.args.push(name.to_string());
        self
    }

    /// Append a bare switch only when `on` is true.
    pub fn switch_if(self, name: &str, on: bool) -> Self {
        if on { self.switch(name) } else { self }
    }

    /// Add an environment variable to the child's environment overlay.
    pub fn env(mut self, key: impl Into<String>, value: impl Into<String>) -> Self {
        self.envs.push((key.into(), value.into()));
        self
    }

    /// Mark the argument vector as carrying a secret; it is then redacted
    /// from log output.
    pub fn sensitive(mut self) -> Self {
        self.sensitive = true;
        self
    }

    /// The environment overlay applied to the child process.
    pub fn envs(&self) -> &[(String, String)] {
        &self.envs
    }

    /// The full token sequence: program followed by its arguments.
    pub fn tokens(&self) -> Vec<String> {
        let mut tokens = Vec::with_capacity(self.args.len() + 1);
        tokens.push(self.program.clone());
        tokens.extend(self.args.iter().cloned());
        tokens
    }
}

/// Captured output of a completed external command.
#[derive(Debug, Clone)]
pub struct CommandOutput {
    pub stdout: String,
    pub stderr: String,
}

/// Spawn the command described by `spec` and wait for it to exit.
///
/// Real external state mutation may already have happened when a failure is
/// reported; the invoker does not roll back.
pub async fn run(spec: &CommandSpec) -> Result<CommandOutput, ToolError> {
    if spec.sensitive {
        debug!(program = %spec.program, "spawning external command (arguments redacted)");
    } else {
        debug!(command = %spec.tokens().join(" "), "spawning external command");
    }

    let output = Command::new(&spec.program)
        .args(&spec.args)
        .envs(spec.envs.iter().map(|(k, v)| (k.as_str(), v.as_str())))
        .stdin(Stdio::null())
        .output()
        .await;

    match output {
        Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
            warn!("{} not found in PATH", spec.program);
            Err(ToolError::not_installed(&spec.program, &spec.hint))
        }
        Err(e) => Err(ToolError::unexpected(e.to_string())),
        Ok(out) => {
            let stdout = String::from_utf8_lossy(&out.stdout).into_owned();
            let stderr = String::from_utf8_lossy(&out.stderr).into_owned();

            if out.status.success() {
                Ok(CommandOutput { stdout, stderr })
            } else {
                warn!(
                    program = %spec.program,
                    code = out.status.code().unwrap_or(-1),
                    "external command exited nonzero"
                );
                // stderr is the diagnostic channel; some CLIs report on stdout
                let detail = if stderr.trim().is_empty() { stdout } else { stderr };
                Err(ToolError::process(&spec.context, detail))
            }
        }
    }
}

/// Run the command and return its stdout text.
pub async fn run_text(spec: &CommandSpec) -> Result<String, ToolError> {
    run(spec).await.map(|out| out.stdout)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_spec() -> CommandSpec {
        CommandSpec::new("az", "Azure CLI", "install it")
    }

    #[test]
    fn test_tokens_preserve_order() {
        let spec = sample_spec()
            .args(["aks", "create"])
            .flag("--resource-group", "rg1")
            .flag("--name", "cluster1")
            .flag("--node-count", 3)
            .switch("--generate-ssh-keys");

        assert_eq!(
            spec.tokens(),
            vec![
                "az",
                "aks",
                "create",
                "--resource-group",
                "rg1",
                "--name",
                "cluster1",
                "--node-count",
                "3",
                "--generate-ssh-keys",
            ]
        );
    }

    #[test]
    fn test_flag_opt_omitted_when_absent() {
        let spec = sample_spec()
            .args(["aks", "get-versions"])
            .flag_opt("--location", None::<String>);
        assert_eq!(spec.tokens(), vec!["az", "aks", "get-versions"]);
    }

    #[test]
    fn test_switch_if_and_bool_flags_render_lowercase() {
        let spec = sample_spec()
            .flag("--enable-node-public-ip", true)
            .switch_if("--yes", false);
        assert_eq!(spec.tokens(), vec!["az", "--enable-node-public-ip", "true"]);
    }

    #[test]
    fn test_same_params_same_tokens() {
        let a = sample_spec().args(["aks", "list"]).flag("--resource-group", "rg");
        let b = sample_spec().args(["aks", "list"]).flag("--resource-group", "rg");
        assert_eq!(a.tokens(), b.tokens());
    }

    #[tokio::test]
    async fn test_run_captures_stdout() {
        let spec = CommandSpec::new("echo", "echo", "install coreutils").arg("hello");
        let out = run(&spec).await.unwrap();
        assert_eq!(out.stdout, "hello\n");
    }

    #[tokio::test]
    async fn test_run_missing_binary_is_not_installed() {
        let spec = CommandSpec::new("definitely-not-a-real-binary-720", "test", "install it");
        let err = run(&spec).await.unwrap_err();
        assert_eq!(err.kind(), "not_installed");
        assert!(err.to_string().contains("install it"));
    }

    #[tokio::test]
    async fn test_run_nonzero_exit_surfaces_stderr() {
        let spec = CommandSpec::new("sh", "shell", "install sh")
            .arg("-c")
            .arg("echo oops >&2; exit 3")
            .context("doing the thing");
        let err = run(&spec).await.unwrap_err();
        assert_eq!(err.kind(), "process");
        assert_eq!(err.to_string(), "Error doing the thing: oops\n");
    }

    #[tokio::test]
    async fn test_run_nonzero_exit_falls_back_to_stdout() {
        let spec = CommandSpec::new("sh", "shell", "install sh")
            .arg("-c")
            .arg("echo failed-on-stdout; exit 2");
        let err = run(&spec).await.unwrap_err();
        assert!(err.to_string().contains("failed-on-stdout"));
    }

    #[tokio::test]
    async fn test_run_captures_stderr_on_success() {
        let spec = CommandSpec::new("sh", "shell", "install sh")
            .arg("-c")
            .arg("echo warning >&2; echo result");
        let out = run(&spec).await.unwrap();
        assert_eq!(out.stdout, "result\n");
        assert_eq!(out.stderr, "warning\n");
    }

    #[tokio::test]
    async fn test_run_applies_env_overlay() {
        let spec = CommandSpec::new("sh", "shell", "install sh")
            .arg("-c")
            .arg("printf '%s' \"$AKS_MCP_TEST_VAR\"")
            .env("AKS_MCP_TEST_VAR", "overlay-value");
        let out = run(&spec).await.unwrap();
        assert_eq!(out.stdout, "overlay-value");
    }
}
