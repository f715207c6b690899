use std::path::{Path, PathBuf};

use ignore::WalkBuilder;
use tracing::{debug, warn};

use crate::config::ParsingConfig;
use crate::error::{MetricsError, Result};
use super::languages::{JavaParser, LanguageParser};
use super::syntax::ParsedUnit;

/// Outcome of walking the source root
#[derive(Debug, Default)]
pub struct Discovery {
    /// Files a registered parser handles, in walk order
    pub files: Vec<PathBuf>,

    /// Entries the walker could not read, with the cause
    pub errors: Vec<(PathBuf, String)>,
}

/// Source parser that delegates to language-specific parsers by extension
pub struct CodeParser {
    config: ParsingConfig,
    language_parsers: Vec<Box<dyn LanguageParser>>,
}

impl CodeParser {
    pub fn new(config: &ParsingConfig) -> Result<Self> {
        let mut language_parsers: Vec<Box<dyn LanguageParser>> = Vec::new();

        for language in &config.languages {
            match language.as_str() {
                "java" => {
                    let java_parser = JavaParser::new(config)?;
                    debug!("Registered {} parser", java_parser.language_name());
                    language_parsers.push(Box::new(java_parser));
                }
                other => {
                    warn!("Skipping unsupported language: {}", other);
                }
            }
        }

        if language_parsers.is_empty() {
            return Err(MetricsError::Config(
                "no supported language configured".to_string(),
            ));
        }

        Ok(Self {
            config: config.clone(),
            language_parsers,
        })
    }

    /// Collect every source file under `dir`.
    ///
    /// Entries are sorted by file name within each directory.
    pub fn discover<P: AsRef<Path>>(&self, dir: P) -> Discovery {
        let mut discovery = Discovery::default();
        let dir = dir.as_ref();

        let respect_ignores = self.config.respect_gitignore;
        let walker = WalkBuilder::new(dir)
            .hidden(false)
            .git_ignore(respect_ignores)
            .git_global(respect_ignores)
            .git_exclude(respect_ignores)
            .ignore(respect_ignores)
            .parents(respect_ignores)
            .follow_links(self.config.follow_links)
            .sort_by_file_name(|a, b| a.cmp(b))
            .build();

        for entry in walker {
            let entry = match entry {
                Ok(entry) => entry,
                Err(e) => {
                    let path = walk_error_path(&e).unwrap_or_else(|| dir.to_path_buf());
                    discovery.errors.push((path, e.to_string()));
                    continue;
                }
            };

            let is_file = entry.file_type().map(|ft| ft.is_file()).unwrap_or(false);
            if is_file && self.should_parse_file(entry.path()) {
                discovery.files.push(entry.into_path());
            }
        }

        debug!("Discovered {} source files under {}", discovery.files.len(), dir.display());
        discovery
    }

    /// Number of lines in a text file
    pub async fn count_lines<P: AsRef<Path>>(&self, file_path: P) -> Result<u64> {
        let content = tokio::fs::read_to_string(file_path.as_ref()).await?;
        Ok(count_text_lines(&content))
    }

    /// Parse a single source file
    pub async fn parse_file<P: AsRef<Path>>(&mut self, file_path: P) -> Result<ParsedUnit> {
        let path = file_path.as_ref();

        let bytes = tokio::fs::read(path).await?;
        let source_content = String::from_utf8_lossy(&bytes);

        let parser = self.parser_for(path).ok_or_else(|| {
            MetricsError::Parser(format!("Could not detect language for file: {}", path.display()))
        })?;

        parser.parse(&source_content, path)
    }

    /// Determine if a file should be parsed based on its extension
    fn should_parse_file(&self, path: &Path) -> bool {
        let Some(extension) = path.extension().and_then(|ext| ext.to_str()) else {
            return false;
        };

        self.language_parsers
            .iter()
            .any(|parser| parser.file_extensions().contains(&extension))
    }

    fn parser_for(&mut self, path: &Path) -> Option<&mut Box<dyn LanguageParser>> {
        let extension = path.extension().and_then(|ext| ext.to_str())?;
        self.language_parsers
            .iter_mut()
            .find(|parser| parser.file_extensions().contains(&extension))
    }
}

/// Lines ended by `\n`, `\r\n` or a lone `\r`, plus an unterminated last line
fn count_text_lines(content: &str) -> u64 {
    let normalized = content.replace("\r\n", "\n");
    let terminators = normalized.matches(['\n', '\r']).count();
    let unterminated = !normalized.is_empty() && !normalized.ends_with(['\n', '\r']);
    (terminators + usize::from(unterminated)) as u64
}

fn walk_error_path(error: &ignore::Error) -> Option<PathBuf> {
    match error {
        ignore::Error::WithPath { path, .. } => Some(path.clone()),
        ignore::Error::WithDepth { err, .. } | ignore::Error::WithLineNumber { err, .. } => {
            walk_error_path(err)
        }
        ignore::Error::Loop { child, .. } => Some(child.clone()),
        _ => None,
    }
}
