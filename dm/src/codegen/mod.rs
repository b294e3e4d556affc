//! Standalone server generation
//!
//! Renders a small cargo project whose binary embeds a fixed corpus and
//! serves it over stdio through this crate. Rendering is a pure function of
//! its inputs; only `write_project` touches the filesystem.

pub mod escape;
mod templates;

use std::fs;
use std::path::{Path, PathBuf};

use docstore::SearchConfig;
use eyre::{Context, Result, eyre};
use serde::Serialize;
use tracing::{debug, info};

use crate::tools::ServerLabels;

/// How the generated crate depends on docmcp
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DocmcpDependency {
    /// Registry version requirement
    Version(String),
    /// Local checkout of the docmcp crate
    Path(PathBuf),
}

impl Default for DocmcpDependency {
    fn default() -> Self {
        Self::Version(env!("CARGO_PKG_VERSION").to_string())
    }
}

impl DocmcpDependency {
    fn to_toml(&self) -> String {
        match self {
            Self::Version(version) => escape::toml_string(version),
            Self::Path(path) => format!("{{ path = {} }}", escape::toml_string(&path.to_string_lossy())),
        }
    }
}

/// Options for `generate`
#[derive(Debug, Clone, Default)]
pub struct GenerateOptions {
    /// Package name; derived from the server name when absent
    pub crate_name: Option<String>,
    pub dependency: DocmcpDependency,
    /// Baked into the generated binary
    pub search: SearchConfig,
}

/// One rendered file, path relative to the project root
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratedFile {
    pub path: PathBuf,
    pub contents: String,
}

#[derive(Debug, Clone)]
pub struct GeneratedProject {
    pub crate_name: String,
    pub files: Vec<GeneratedFile>,
}

impl GeneratedProject {
    pub fn file(&self, path: impl AsRef<Path>) -> Option<&GeneratedFile> {
        self.files.iter().find(|f| f.path == path.as_ref())
    }
}

#[derive(Serialize)]
struct EmbeddedDocument {
    id: String,
    content: String,
}

#[derive(Serialize)]
struct TemplateData {
    crate_name: String,
    description: String,
    docmcp_dependency: String,
    server_name: String,
    subject: String,
    search_config: String,
    document_count: usize,
    documents: Vec<EmbeddedDocument>,
}

/// Render the generated project
pub fn generate<K, V>(
    documents: &[(K, V)],
    labels: &ServerLabels,
    options: &GenerateOptions,
) -> Result<GeneratedProject>
where
    K: AsRef<str>,
    V: AsRef<str>,
{
    debug!(documents = documents.len(), name = %labels.name, "generate: called");
    options.search.validate().context("Invalid search configuration")?;

    let crate_name = escape::crate_name(options.crate_name.as_deref().unwrap_or(&labels.name));
    let search_yaml = serde_yaml::to_string(&options.search).context("Failed to serialize search configuration")?;

    let data = TemplateData {
        crate_name: crate_name.clone(),
        description: escape::toml_string(&format!("MCP server for {}", labels.documentation_phrase())),
        docmcp_dependency: options.dependency.to_toml(),
        server_name: escape::rust_string_literal(&labels.name),
        subject: match &labels.subject {
            Some(subject) => format!("Some({})", escape::rust_string_literal(subject)),
            None => "None".to_string(),
        },
        search_config: escape::rust_string_literal(&search_yaml),
        document_count: documents.len(),
        documents: documents
            .iter()
            .map(|(id, content)| EmbeddedDocument {
                id: escape::rust_string_literal(id.as_ref()),
                content: escape::rust_string_literal(content.as_ref()),
            })
            .collect(),
    };

    let hbs = templates::registry()?;
    let render = |name: &str| {
        hbs.render(name, &data)
            .map_err(|e| eyre!("Failed to render template {}: {}", name, e))
    };

    let files = vec![
        GeneratedFile {
            path: PathBuf::from("Cargo.toml"),
            contents: render(templates::CARGO_TOML_NAME)?,
        },
        GeneratedFile {
            path: PathBuf::from("src").join("main.rs"),
            contents: render(templates::MAIN_RS_NAME)?,
        },
        GeneratedFile {
            path: PathBuf::from(".gitignore"),
            contents: "/target\n".to_string(),
        },
    ];

    info!("Rendered project {} with {} documents", crate_name, documents.len());
    Ok(GeneratedProject { crate_name, files })
}

/// Write a rendered project under `out_dir`
///
/// Refuses a non-empty `out_dir` unless `force` is set; with `force`,
/// generated files are overwritten and anything else is left alone.
pub fn write_project(project: &GeneratedProject, out_dir: &Path, force: bool) -> Result<()> {
    debug!(out_dir = %out_dir.display(), %force, "write_project: called");
    if out_dir.exists() {
        if !out_dir.is_dir() {
            return Err(eyre!("Output path {} exists and is not a directory", out_dir.display()));
        }
        let non_empty = fs::read_dir(out_dir)
            .context(format!("Failed to read {}", out_dir.display()))?
            .next()
            .is_some();
        if non_empty && !force {
            return Err(eyre!(
                "Output directory {} is not empty (use --force to overwrite)",
                out_dir.display()
            ));
        }
    }

    for file in &project.files {
        let path = out_dir.join(&file.path);
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context(format!("Failed to create {}", parent.display()))?;
        }
        fs::write(&path, &file.contents).context(format!("Failed to write {}", path.display()))?;
        debug!(path = %path.display(), "write_project: wrote file");
    }

    info!("Wrote {} files to {}", project.files.len(), out_dir.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use docstore::PreviewMode;
    use tempfile::TempDir;

    fn labels() -> ServerLabels {
        ServerLabels::new("Acme Docs", Some("Acme SDK".to_string()))
    }

    fn docs() -> Vec<(&'static str, &'static str)> {
        vec![
            ("guide.md", "Say \"hello\"\nthen C:\\run"),
            ("api/ref.md", "naïve café"),
        ]
    }

    #[test]
    fn test_generate_files() {
        let project = generate(&docs(), &labels(), &GenerateOptions::default()).unwrap();
        assert_eq!(project.crate_name, "acme-docs");
        assert!(project.file("Cargo.toml").is_some());
        assert!(project.file("src/main.rs").is_some());
        assert!(project.file(".gitignore").is_some());
    }

    #[test]
    fn test_generate_cargo_toml() {
        let project = generate(&docs(), &labels(), &GenerateOptions::default()).unwrap();
        let cargo = &project.file("Cargo.toml").unwrap().contents;
        assert!(cargo.contains("name = \"acme-docs\""));
        assert!(cargo.contains("description = \"MCP server for Acme SDK documentation\""));
        assert!(cargo.contains(&format!("docmcp = \"{}\"", env!("CARGO_PKG_VERSION"))));
    }

    #[test]
    fn test_generate_path_dependency() {
        let options = GenerateOptions {
            dependency: DocmcpDependency::Path(PathBuf::from("/src/docmcp/dm")),
            ..Default::default()
        };
        let project = generate(&docs(), &labels(), &options).unwrap();
        let cargo = &project.file("Cargo.toml").unwrap().contents;
        assert!(cargo.contains("docmcp = { path = \"/src/docmcp/dm\" }"));
    }

    #[test]
    fn test_generate_main_embeds_escaped_documents() {
        let project = generate(&docs(), &labels(), &GenerateOptions::default()).unwrap();
        let main = &project.file("src/main.rs").unwrap().contents;
        assert!(main.contains(r#"    ("guide.md", "Say \"hello\"\nthen C:\\run"),"#));
        assert!(main.contains(r#"    ("api/ref.md", "naïve café"),"#));
        assert!(main.contains(r#"const SERVER_NAME: &str = "Acme Docs";"#));
        assert!(main.contains(r#"const SUBJECT: Option<&str> = Some("Acme SDK");"#));
        assert!(main.contains("serves 2 embedded documents"));
        assert!(main.contains("serve_stdio(labels, DOCUMENTS.iter().copied(), config)"));
    }

    #[test]
    fn test_generate_without_subject() {
        let labels = ServerLabels::new("docs", None);
        let project = generate(&docs(), &labels, &GenerateOptions::default()).unwrap();
        let main = &project.file("src/main.rs").unwrap().contents;
        assert!(main.contains("const SUBJECT: Option<&str> = None;"));
    }

    #[test]
    fn test_generate_embeds_search_config() {
        let options = GenerateOptions {
            search: SearchConfig {
                threshold: 0.1,
                preview: PreviewMode::Lines(2),
                ..Default::default()
            },
            ..Default::default()
        };
        let project = generate(&docs(), &labels(), &options).unwrap();
        let main = &project.file("src/main.rs").unwrap().contents;
        let yaml = serde_yaml::to_string(&options.search).unwrap();
        assert!(main.contains(&escape::rust_string_literal(&yaml)));

        let parsed: SearchConfig = serde_yaml::from_str(&yaml).unwrap();
        assert_eq!(parsed, options.search);
    }

    #[test]
    fn test_generate_rejects_invalid_search_config() {
        let options = GenerateOptions {
            search: SearchConfig {
                threshold: 2.0,
                ..Default::default()
            },
            ..Default::default()
        };
        assert!(generate(&docs(), &labels(), &options).is_err());
    }

    #[test]
    fn test_generate_is_deterministic() {
        let a = generate(&docs(), &labels(), &GenerateOptions::default()).unwrap();
        let b = generate(&docs(), &labels(), &GenerateOptions::default()).unwrap();
        assert_eq!(a.files, b.files);
    }

    #[test]
    fn test_generate_crate_name_override() {
        let options = GenerateOptions {
            crate_name: Some("My Server".to_string()),
            ..Default::default()
        };
        let project = generate(&docs(), &labels(), &options).unwrap();
        assert_eq!(project.crate_name, "my-server");
    }

    #[test]
    fn test_write_project_creates_files() {
        let temp = TempDir::new().unwrap();
        let out = temp.path().join("server");
        let project = generate(&docs(), &labels(), &GenerateOptions::default()).unwrap();

        write_project(&project, &out, false).unwrap();

        assert!(out.join("Cargo.toml").is_file());
        let main = fs::read_to_string(out.join("src/main.rs")).unwrap();
        assert_eq!(main, project.file("src/main.rs").unwrap().contents);
    }

    #[test]
    fn test_write_project_refuses_non_empty_without_force() {
        let temp = TempDir::new().unwrap();
        fs::write(temp.path().join("keep.txt"), "mine").unwrap();
        let project = generate(&docs(), &labels(), &GenerateOptions::default()).unwrap();

        let err = write_project(&project, temp.path(), false).unwrap_err();
        assert!(err.to_string().contains("not empty"));

        write_project(&project, temp.path(), true).unwrap();
        assert!(temp.path().join("Cargo.toml").is_file());
        assert_eq!(fs::read_to_string(temp.path().join("keep.txt")).unwrap(), "mine");
    }
}
