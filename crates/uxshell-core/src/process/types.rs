use std::fmt;

/// A command to run for a fetcher.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CommandSpec {
    /// Program and arguments, executed directly.
    Argv(Vec<String>),
    /// A command line interpreted by `sh -c`.
    Shell(String),
}

impl CommandSpec {
    pub fn argv<I, S>(args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        CommandSpec::Argv(args.into_iter().map(Into::into).collect())
    }

    pub fn shell(command: impl Into<String>) -> Self {
        CommandSpec::Shell(command.into())
    }

    /// Program name and its arguments as they will be passed to the OS.
    pub(crate) fn program_and_args(&self) -> Option<(String, Vec<String>)> {
        match self {
            CommandSpec::Argv(args) => {
                let (program, rest) = args.split_first()?;
                if program.trim().is_empty() {
                    return None;
                }
                Some((program.clone(), rest.to_vec()))
            }
            CommandSpec::Shell(command) => {
                if command.trim().is_empty() {
                    return None;
                }
                Some(("sh".to_string(), vec!["-c".to_string(), command.clone()]))
            }
        }
    }
}

impl fmt::Display for CommandSpec {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            CommandSpec::Argv(args) => write!(f, "{}", args.join(" ")),
            CommandSpec::Shell(command) => write!(f, "{}", command),
        }
    }
}

/// Captured result of a finished command.
///
/// A non-zero exit is not an error here; callers decide what it means.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandOutput {
    /// Exit code, `None` if the process was killed by a signal.
    pub code: Option<i32>,
    pub stdout: String,
    pub stderr: String,
}

impl CommandOutput {
    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<std::process::Output> for CommandOutput {
    fn from(output: std::process::Output) -> Self {
        Self {
            code: output.status.code(),
            stdout: String::from_utf8_lossy(&output.stdout).into_owned(),
            stderr: String::from_utf8_lossy(&output.stderr).into_owned(),
        }
    }
}
