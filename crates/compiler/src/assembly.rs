//! Template assembly
//!
//! Feeds the resolved descriptor trees to a rendering backend and plans the
//! output files. The template engine itself is a black box behind
//! [`TemplateRenderer`]; this module never inspects rendered output.
//!
//! Each entity produces a base file and a user-extension file. Base files
//! are always (re)written; extension files are written once and never
//! overwritten unless the force flag is supplied — a check-then-write
//! policy, with a single-process single-invocation assumption and no
//! locking.

use crate::descriptors::EntityArtifacts;
use crate::naming;
use entigen_core::{CompileError, CompileResult};
use serde_json::json;
use std::path::{Path, PathBuf};

// ============================================================================
// Template names
// ============================================================================

/// Template rendered into the always-rewritten base file.
pub const BASE_TEMPLATE: &str = "entity_base";

/// Template rendered into the write-once user-extension file.
pub const EXTENSION_TEMPLATE: &str = "entity_extension";

// ============================================================================
// TemplateRenderer
// ============================================================================

/// The opaque rendering backend: `render(template, data) → text`.
pub trait TemplateRenderer {
    /// Render the named template with the given data.
    fn render(&self, template: &str, data: &serde_json::Value) -> CompileResult<String>;
}

/// Built-in renderer that emits the descriptor tree as pretty-printed JSON.
///
/// This is the default backend so the CLI produces inspectable artifacts
/// without an external template engine plugged in.
#[derive(Debug, Clone, Copy, Default)]
pub struct DescriptorRenderer;

impl TemplateRenderer for DescriptorRenderer {
    fn render(&self, template: &str, data: &serde_json::Value) -> CompileResult<String> {
        serde_json::to_string_pretty(data)
            .map(|mut text| {
                text.push('\n');
                text
            })
            .map_err(|e| CompileError::TemplateRender {
                template: template.to_string(),
                message: e.to_string(),
            })
    }
}

// ============================================================================
// Output files
// ============================================================================

/// The overwrite role of a planned output file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileRole {
    /// Always (re)written
    Base,
    /// Written once; overwritten only with force
    Extension,
}

/// One planned output file.
#[derive(Debug, Clone)]
pub struct OutputFile {
    /// Path relative to the output directory
    pub path: PathBuf,

    /// Rendered content
    pub content: String,

    /// Overwrite role
    pub role: FileRole,
}

/// Plan the base and extension files for one compiled entity.
pub fn plan_entity_files(
    artifacts: &EntityArtifacts,
    renderer: &dyn TemplateRenderer,
    file_extension: &str,
) -> CompileResult<Vec<OutputFile>> {
    let stem = naming::snake(&artifacts.entity);

    let base_data = serde_json::to_value(artifacts)?;
    let base = OutputFile {
        path: PathBuf::from(format!("{stem}.base.{file_extension}")),
        content: renderer.render(BASE_TEMPLATE, &base_data)?,
        role: FileRole::Base,
    };

    // The extension file is a user-owned stub pointing at its base.
    let extension_data = json!({
        "entity": artifacts.entity,
        "extends": format!("{stem}.base.{file_extension}"),
    });
    let extension = OutputFile {
        path: PathBuf::from(format!("{stem}.{file_extension}")),
        content: renderer.render(EXTENSION_TEMPLATE, &extension_data)?,
        role: FileRole::Extension,
    };

    Ok(vec![base, extension])
}

// ============================================================================
// Writing
// ============================================================================

/// Result of a write pass.
#[derive(Debug, Clone, Default)]
pub struct WriteSummary {
    /// Files written in this pass
    pub written: Vec<PathBuf>,

    /// Extension files skipped because they already exist
    pub skipped: Vec<PathBuf>,
}

impl WriteSummary {
    /// Total number of files considered.
    pub fn total(&self) -> usize {
        self.written.len() + self.skipped.len()
    }
}

/// Write planned files under `out_dir` with the base/extension overwrite
/// policy.
pub fn write_files(
    files: &[OutputFile],
    out_dir: &Path,
    force: bool,
) -> CompileResult<WriteSummary> {
    std::fs::create_dir_all(out_dir).map_err(|e| CompileError::DirectoryCreate {
        path: out_dir.to_path_buf(),
        message: e.to_string(),
    })?;

    let mut summary = WriteSummary::default();

    for file in files {
        let full_path = out_dir.join(&file.path);

        if file.role == FileRole::Extension && full_path.exists() && !force {
            tracing::debug!(path = %full_path.display(), "extension file exists; skipping");
            summary.skipped.push(file.path.clone());
            continue;
        }

        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).map_err(|e| CompileError::DirectoryCreate {
                path: parent.to_path_buf(),
                message: e.to_string(),
            })?;
        }

        std::fs::write(&full_path, &file.content).map_err(|e| CompileError::FileWrite {
            path: full_path.clone(),
            message: e.to_string(),
        })?;
        summary.written.push(file.path.clone());
    }

    Ok(summary)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn artifacts() -> EntityArtifacts {
        EntityArtifacts::new("BlogPost")
    }

    #[test]
    fn test_plan_entity_files() {
        let files = plan_entity_files(&artifacts(), &DescriptorRenderer, "json").unwrap();
        assert_eq!(files.len(), 2);
        assert_eq!(files[0].path, PathBuf::from("blog_post.base.json"));
        assert_eq!(files[0].role, FileRole::Base);
        assert_eq!(files[1].path, PathBuf::from("blog_post.json"));
        assert_eq!(files[1].role, FileRole::Extension);

        assert!(files[0].content.contains("\"entity\": \"BlogPost\""));
        assert!(files[1].content.contains("\"extends\": \"blog_post.base.json\""));
    }

    #[test]
    fn test_descriptor_renderer_is_stable() {
        let data = serde_json::to_value(artifacts()).unwrap();
        let first = DescriptorRenderer.render(BASE_TEMPLATE, &data).unwrap();
        let second = DescriptorRenderer.render(BASE_TEMPLATE, &data).unwrap();
        assert_eq!(first, second);
        assert!(first.ends_with('\n'));
    }

    #[test]
    fn test_write_policy_base_rewritten() {
        let dir = TempDir::new().unwrap();
        let files = plan_entity_files(&artifacts(), &DescriptorRenderer, "json").unwrap();

        let first = write_files(&files, dir.path(), false).unwrap();
        assert_eq!(first.written.len(), 2);
        assert!(first.skipped.is_empty());

        // Second pass: base rewritten, extension preserved.
        let second = write_files(&files, dir.path(), false).unwrap();
        assert_eq!(second.written, vec![PathBuf::from("blog_post.base.json")]);
        assert_eq!(second.skipped, vec![PathBuf::from("blog_post.json")]);
    }

    #[test]
    fn test_write_policy_extension_preserved() {
        let dir = TempDir::new().unwrap();
        let files = plan_entity_files(&artifacts(), &DescriptorRenderer, "json").unwrap();
        write_files(&files, dir.path(), false).unwrap();

        // Simulate a user edit to the extension file.
        let extension_path = dir.path().join("blog_post.json");
        std::fs::write(&extension_path, "user content").unwrap();

        write_files(&files, dir.path(), false).unwrap();
        let content = std::fs::read_to_string(&extension_path).unwrap();
        assert_eq!(content, "user content");
    }

    #[test]
    fn test_write_policy_force_overwrites_extension() {
        let dir = TempDir::new().unwrap();
        let files = plan_entity_files(&artifacts(), &DescriptorRenderer, "json").unwrap();
        write_files(&files, dir.path(), false).unwrap();

        let extension_path = dir.path().join("blog_post.json");
        std::fs::write(&extension_path, "user content").unwrap();

        let summary = write_files(&files, dir.path(), true).unwrap();
        assert_eq!(summary.written.len(), 2);
        let content = std::fs::read_to_string(&extension_path).unwrap();
        assert_ne!(content, "user content");
    }

    #[test]
    fn test_renderer_error_carries_template_name() {
        struct FailingRenderer;
        impl TemplateRenderer for FailingRenderer {
            fn render(&self, template: &str, _data: &serde_json::Value) -> CompileResult<String> {
                Err(CompileError::TemplateRender {
                    template: template.to_string(),
                    message: "boom".to_string(),
                })
            }
        }

        let err = plan_entity_files(&artifacts(), &FailingRenderer, "json").unwrap_err();
        assert!(err.to_string().contains(BASE_TEMPLATE));
    }
}
