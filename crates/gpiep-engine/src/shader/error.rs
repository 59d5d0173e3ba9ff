use std::fmt;

use super::ShaderStage;

/// Upper bound on the diagnostic text kept for a failed compile or link.
pub const INFO_LOG_CAPACITY: usize = 512;

/// Which step of program construction failed.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderErrorKind {
    Compile(ShaderStage),
    Link,
}

/// Compile or link failure with its diagnostic log.
///
/// `log` is never empty and holds at most [`INFO_LOG_CAPACITY`] bytes.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ShaderError {
    pub kind: ShaderErrorKind,
    pub label: String,
    pub log: String,
}

impl ShaderError {
    pub(crate) fn compile(stage: ShaderStage, label: &str, log: impl Into<String>) -> Self {
        Self::new(ShaderErrorKind::Compile(stage), label, log.into())
    }

    pub(crate) fn link(label: &str, log: impl Into<String>) -> Self {
        Self::new(ShaderErrorKind::Link, label, log.into())
    }

    fn new(kind: ShaderErrorKind, label: &str, log: String) -> Self {
        let log = if log.trim().is_empty() {
            "no diagnostic available".to_string()
        } else {
            truncate_log(log)
        };
        Self { kind, label: label.to_string(), log }
    }
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.kind {
            ShaderErrorKind::Compile(stage) => {
                write!(f, "failed to compile {stage} shader `{}`: {}", self.label, self.log)
            }
            ShaderErrorKind::Link => {
                write!(f, "failed to link shader program `{}`: {}", self.label, self.log)
            }
        }
    }
}

impl std::error::Error for ShaderError {}

/// Every failure collected while building one program; never empty.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProgramError {
    pub errors: Vec<ShaderError>,
}

impl From<ShaderError> for ProgramError {
    fn from(err: ShaderError) -> Self {
        Self { errors: vec![err] }
    }
}

impl fmt::Display for ProgramError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, err) in self.errors.iter().enumerate() {
            if i > 0 {
                f.write_str("\n")?;
            }
            write!(f, "{err}")?;
        }
        Ok(())
    }
}

impl std::error::Error for ProgramError {}

/// Cuts `log` to at most [`INFO_LOG_CAPACITY`] bytes on a char boundary.
fn truncate_log(mut log: String) -> String {
    if log.len() > INFO_LOG_CAPACITY {
        let mut end = INFO_LOG_CAPACITY;
        while !log.is_char_boundary(end) {
            end -= 1;
        }
        log.truncate(end);
    }
    log
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn long_log_is_capped() {
        let err = ShaderError::link("p", "x".repeat(2000));
        assert_eq!(err.log.len(), INFO_LOG_CAPACITY);
    }

    #[test]
    fn truncation_respects_char_boundaries() {
        // 'é' is two bytes; 300 of them straddle the cap.
        let err = ShaderError::link("p", "é".repeat(300));
        assert!(err.log.len() <= INFO_LOG_CAPACITY);
        assert!(err.log.chars().all(|c| c == 'é'));
    }

    #[test]
    fn empty_log_gets_placeholder() {
        let err = ShaderError::compile(ShaderStage::Vertex, "p", "  ");
        assert!(!err.log.is_empty());
    }

    #[test]
    fn display_names_the_stage() {
        let err = ShaderError::compile(ShaderStage::Fragment, "cube", "bad token");
        assert_eq!(
            err.to_string(),
            "failed to compile fragment shader `cube`: bad token"
        );
    }

    #[test]
    fn program_error_lists_every_stage() {
        let err = ProgramError {
            errors: vec![
                ShaderError::compile(ShaderStage::Vertex, "cube vertex", "bad"),
                ShaderError::compile(ShaderStage::Fragment, "cube fragment", "worse"),
            ],
        };
        assert_eq!(
            err.to_string(),
            "failed to compile vertex shader `cube vertex`: bad\n\
             failed to compile fragment shader `cube fragment`: worse"
        );
    }
}
