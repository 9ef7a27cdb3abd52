//! WGSL validation ahead of pipeline creation.
//!
//! wgpu reports shader problems through its uncaptured-error path, which
//! panics by default. Sources are parsed and validated with naga first so a
//! broken shader becomes an ordinary error carrying the compiler diagnostic.

use std::error::Error as _;
use std::fmt;

/// Which compiler phase rejected the source.
#[derive(Debug, Copy, Clone, Eq, PartialEq)]
pub enum ShaderStage {
    Parse,
    Validate,
}

/// A rejected shader together with the compiler log.
#[derive(Debug, Clone, PartialEq)]
pub struct ShaderError {
    pub label: String,
    pub stage: ShaderStage,
    pub log: String,
}

impl fmt::Display for ShaderError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let phase = match self.stage {
            ShaderStage::Parse => "failed to compile",
            ShaderStage::Validate => "failed to link",
        };
        write!(f, "shader '{}' {}:\n{}", self.label, phase, self.log)
    }
}

impl std::error::Error for ShaderError {}

/// Parses and validates `source`.
pub fn validate_wgsl(label: &str, source: &str) -> Result<(), ShaderError> {
    let module = naga::front::wgsl::parse_str(source).map_err(|e| ShaderError {
        label: label.to_string(),
        stage: ShaderStage::Parse,
        log: e.emit_to_string(source),
    })?;

    let mut validator = naga::valid::Validator::new(
        naga::valid::ValidationFlags::all(),
        naga::valid::Capabilities::empty(),
    );

    validator.validate(&module).map_err(|e| {
        let inner = e.as_inner();
        let mut log = inner.to_string();
        let mut source_err = inner.source();
        while let Some(cause) = source_err {
            log.push_str("\n  caused by: ");
            log.push_str(&cause.to_string());
            source_err = cause.source();
        }
        ShaderError {
            label: label.to_string(),
            stage: ShaderStage::Validate,
            log,
        }
    })?;

    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn mesh_shader_is_valid() {
        validate_wgsl("mesh", super::super::mesh::MESH_SHADER).unwrap();
    }

    #[test]
    fn syntax_error_is_a_parse_failure_with_log() {
        let err = validate_wgsl("broken", "@vertex fn vs_main( -> {").unwrap_err();
        assert_eq!(err.stage, ShaderStage::Parse);
        assert_eq!(err.label, "broken");
        assert!(!err.log.is_empty());
    }

    #[test]
    fn unknown_identifier_is_rejected() {
        let src = "@fragment fn fs_main() -> @location(0) vec4<f32> { return missing; }";
        assert!(validate_wgsl("missing", src).is_err());
    }

    #[test]
    fn display_names_label_and_phase() {
        let err = ShaderError {
            label: "mesh".to_string(),
            stage: ShaderStage::Validate,
            log: "bad binding".to_string(),
        };
        let text = err.to_string();
        assert!(text.contains("'mesh'"));
        assert!(text.contains("failed to link"));
        assert!(text.contains("bad binding"));
    }
}
