// ABOUTME: Runs the Graphviz layout program on DOT input
// ABOUTME: Pipes DOT text through stdin and collects the rendered output

use std::io::{ErrorKind, Write};
use std::path::Path;
use std::process::{Command, Stdio};
use tracing::debug;

use super::error::GraphvizError;

pub const DEFAULT_PROGRAM: &str = "dot";
pub const DEFAULT_LAYOUT: &str = "dot";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Graphviz {
    program: String,
    layout: String,
}

impl Graphviz {
    pub fn new(program: &str, layout: &str) -> Self {
        Self {
            program: program.to_string(),
            layout: layout.to_string(),
        }
    }

    pub fn program(&self) -> &str {
        &self.program
    }

    pub fn layout(&self) -> &str {
        &self.layout
    }

    /// Whether the configured program can be started at all
    pub fn is_available(&self) -> bool {
        Command::new(&self.program)
            .arg("-V")
            .stdout(Stdio::null())
            .stderr(Stdio::null())
            .status()
            .is_ok()
    }

    /// Lay out `dot` and produce `format`. With `output` set, Graphviz writes
    /// the file itself and the returned bytes are empty.
    pub fn run(
        &self,
        dot: &str,
        format: &str,
        output: Option<&Path>,
    ) -> Result<Vec<u8>, GraphvizError> {
        let mut command = Command::new(&self.program);
        command
            .arg(format!("-K{}", self.layout))
            .arg(format!("-T{}", format));
        if let Some(path) = output {
            command.arg("-o").arg(path);
        }

        debug!(
            "Running {} -K{} -T{} ({} bytes of DOT)",
            self.program,
            self.layout,
            format,
            dot.len()
        );

        let mut child = command
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| match e.kind() {
                ErrorKind::NotFound => GraphvizError::ProgramNotFound {
                    program: self.program.clone(),
                },
                _ => GraphvizError::IoError(e),
            })?;

        // A program that exits early breaks the pipe; its status and stderr win
        let written = match child.stdin.take() {
            Some(mut stdin) => stdin.write_all(dot.as_bytes()),
            None => Ok(()),
        };

        let output = child.wait_with_output()?;
        if !output.status.success() {
            return Err(GraphvizError::ProcessFailed {
                program: self.program.clone(),
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            });
        }
        written?;

        Ok(output.stdout)
    }
}

impl Default for Graphviz {
    fn default() -> Self {
        Self::new(DEFAULT_PROGRAM, DEFAULT_LAYOUT)
    }
}
