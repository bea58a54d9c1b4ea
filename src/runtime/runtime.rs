use tracing::{debug, warn};

use crate::{ast::ast::Program, errors::errors::Error, parser::parser::Parser};

/// Serializes a program into source text an [`Executor`] understands.
pub trait CodeGenerator {
    fn generate(&self, program: &Program) -> Result<String, String>;
}

/// Runs generated source in an isolated environment.
pub trait Executor {
    fn execute(&self, source: &str) -> ExecutionOutcome;
}

/// What came back from running a program. Output written before a failure
/// is kept in `logs`.
#[derive(Debug, Clone, PartialEq)]
pub enum ExecutionOutcome {
    Success {
        value: Option<String>,
        logs: Vec<String>,
    },
    Failure {
        error: String,
        logs: Vec<String>,
    },
}

impl ExecutionOutcome {
    pub fn logs(&self) -> &[String] {
        match self {
            ExecutionOutcome::Success { logs, .. } | ExecutionOutcome::Failure { logs, .. } => {
                logs
            }
        }
    }

    pub fn is_success(&self) -> bool {
        matches!(self, ExecutionOutcome::Success { .. })
    }
}

const RUNTIME_ERROR_PREFIX: &str = "RuntimeError: ";
const GENERATOR_ERROR_PREFIX: &str = "GeneratorError: ";

/// Compiles `source` with `parser` and runs the result.
///
/// Compile errors are returned as `Err`. Anything that goes wrong after a
/// successful compile is reported as an [`ExecutionOutcome::Failure`].
pub fn run_source(
    parser: &mut Parser,
    generator: &dyn CodeGenerator,
    executor: &dyn Executor,
    source: &str,
) -> Result<ExecutionOutcome, Error> {
    parser.feed(source)?;

    let mut generated = Vec::with_capacity(parser.results().len());
    for program in parser.results() {
        match generator.generate(program) {
            Ok(code) => generated.push(code),
            Err(error) => {
                warn!(%error, "code generation failed");
                return Ok(ExecutionOutcome::Failure {
                    error: format!("{}{}", GENERATOR_ERROR_PREFIX, error),
                    logs: vec![],
                });
            }
        }
    }

    let code = generated.join("\n");
    debug!(bytes = code.len(), "executing generated code");

    Ok(match executor.execute(&code) {
        ExecutionOutcome::Failure { error, logs } => ExecutionOutcome::Failure {
            error: format!("{}{}", RUNTIME_ERROR_PREFIX, error),
            logs,
        },
        success => success,
    })
}
