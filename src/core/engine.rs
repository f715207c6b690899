// src/core/engine.rs
use std::path::Path;

use tracing::{debug, info};

use crate::config::Config;
use crate::error::{MetricsError, Result};
use super::{
    classify, Aggregator, CodeParser, DiagnosticKind, FileDiagnostic, RouteExtractor, ScanReport,
};

/// Drives a scan: discovery, per-file extraction and aggregation
pub struct Engine {
    config: Config,
    parser: CodeParser,
    routes: RouteExtractor,
}

impl Engine {
    pub fn new(config: Config) -> Result<Self> {
        debug!("Loaded configuration: {:?}", config);

        let parser = CodeParser::new(&config.parsing)?;

        Ok(Self {
            config,
            parser,
            routes: RouteExtractor::new(),
        })
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Scan every source file under `root`, one file at a time.
    ///
    /// Only an invalid root is an error; per-file problems are reported on
    /// stderr and kept in the report.
    pub async fn scan(&mut self, root: &Path) -> Result<ScanReport> {
        if !root.is_dir() {
            return Err(MetricsError::InvalidRoot(root.to_path_buf()));
        }

        info!("Scanning {}", root.display());

        let mut totals = Aggregator::new();
        let discovery = self.parser.discover(root);

        for (path, message) in discovery.errors {
            report(
                &mut totals,
                FileDiagnostic {
                    path,
                    kind: DiagnosticKind::Walk,
                    message,
                },
            );
        }

        for path in &discovery.files {
            let file = self.process_file(path).await;
            totals.merge(file);
        }

        info!(
            "Scanned {} files, {} endpoints",
            discovery.files.len(),
            totals.route_count()
        );

        Ok(totals.finalize())
    }

    /// Everything one file contributes; line counting and parsing fail
    /// independently of each other.
    async fn process_file(&mut self, path: &Path) -> Aggregator {
        let mut file = Aggregator::new();

        match self.parser.count_lines(path).await {
            Ok(lines) => file.record_lines(lines),
            Err(e) => report(
                &mut file,
                FileDiagnostic {
                    path: path.to_path_buf(),
                    kind: DiagnosticKind::ReadLines,
                    message: e.to_string(),
                },
            ),
        }

        let unit = match self.parser.parse_file(path).await {
            Ok(unit) => unit,
            Err(e) => {
                report(
                    &mut file,
                    FileDiagnostic {
                        path: path.to_path_buf(),
                        kind: DiagnosticKind::Parse,
                        message: e.to_string(),
                    },
                );
                return file;
            }
        };

        debug!(
            "{}: package '{}', {} types",
            path.display(),
            unit.package,
            unit.types.len()
        );

        file.record_metrics(unit.metrics);
        for decl in &unit.types {
            let classification = classify(decl);
            if !classification.roles.is_empty() {
                let roles: Vec<String> =
                    classification.roles.iter().map(|r| r.to_string()).collect();
                debug!("{} -> {}", classification.qualified_name, roles.join(", "));
            }
            file.record_classification(&classification);
            file.record_routes(self.routes.extract(decl));
        }

        file
    }
}

/// Write the diagnostic line to stderr right away and keep it for the report
fn report(aggregator: &mut Aggregator, diagnostic: FileDiagnostic) {
    eprintln!("{}", diagnostic);
    aggregator.record_diagnostic(diagnostic);
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    const CONTROLLER: &str = r#"
package com.acme.web;

@RestController
@RequestMapping("/api")
public class UserController {
    @GetMapping("/users")
    public List<User> list() { return null; }

    public void helper() { }
}
"#;

    const DOMAIN: &str = r#"
package com.acme.domain;

@Entity
public class Order {
    public long id() { return 1; }
}

enum Status { OPEN, CLOSED }
"#;

    fn engine() -> Engine {
        Engine::new(Config::default()).unwrap()
    }

    #[tokio::test]
    async fn test_scan_collects_everything() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("web")).unwrap();
        fs::write(dir.path().join("web/UserController.java"), CONTROLLER).unwrap();
        fs::write(dir.path().join("Order.java"), DOMAIN).unwrap();

        let report = engine().scan(dir.path()).await.unwrap();

        assert_eq!(report.summary.classes, 2);
        assert_eq!(report.summary.enums, 1);
        assert_eq!(report.summary.methods, 3);
        assert_eq!(
            report.summary.loc,
            (CONTROLLER.lines().count() + DOMAIN.lines().count()) as u64
        );
        assert!(report.controllers.contains("com.acme.web.UserController"));
        assert!(report.entities.contains("com.acme.domain.Order"));
        assert!(report.domain_classes.contains("com.acme.domain.Order"));
        assert_eq!(report.endpoints.len(), 1);
        assert_eq!(report.endpoints[0].path, "/api/users");
        assert!(report.diagnostics.is_empty());
    }

    #[tokio::test]
    async fn test_unparsable_file_is_isolated() {
        let dir = tempfile::tempdir().unwrap();
        fs::write(dir.path().join("A_Broken.java"), "public class Broken { void x( {\n").unwrap();
        fs::write(dir.path().join("B_UserController.java"), CONTROLLER).unwrap();

        let report = engine().scan(dir.path()).await.unwrap();

        assert_eq!(report.summary.classes, 1);
        assert_eq!(report.summary.endpoints, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::Parse);
        // lines of the broken file still count
        assert_eq!(report.summary.loc, 1 + CONTROLLER.lines().count() as u64);
    }

    #[tokio::test]
    async fn test_unreadable_lines_do_not_stop_parsing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("UserController.java");
        // 0xE9 on its own is Latin-1 `é`, not UTF-8
        let (head, tail) = CONTROLLER.split_once("public void helper() { }").unwrap();
        let mut bytes = format!("{}// caf", head).into_bytes();
        bytes.push(0xE9);
        bytes.extend_from_slice(tail.as_bytes());
        fs::write(&path, bytes).unwrap();

        let report = engine().scan(dir.path()).await.unwrap();

        assert_eq!(report.summary.loc, 0);
        assert!(report.controllers.contains("com.acme.web.UserController"));
        assert_eq!(report.summary.endpoints, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::ReadLines);
    }

    #[cfg(unix)]
    #[tokio::test]
    async fn test_walk_error_is_a_diagnostic() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("web")).unwrap();
        fs::write(dir.path().join("web/UserController.java"), CONTROLLER).unwrap();
        std::os::unix::fs::symlink(dir.path(), dir.path().join("web/loop")).unwrap();

        let mut config = Config::default();
        config.parsing.follow_links = true;
        let report = Engine::new(config).unwrap().scan(dir.path()).await.unwrap();

        assert_eq!(report.summary.controllers, 1);
        assert_eq!(report.summary.endpoints, 1);
        assert_eq!(report.diagnostics.len(), 1);
        assert_eq!(report.diagnostics[0].kind, DiagnosticKind::Walk);
    }

    #[tokio::test]
    async fn test_same_type_twice_is_deduplicated() {
        let dir = tempfile::tempdir().unwrap();
        fs::create_dir_all(dir.path().join("copy")).unwrap();
        fs::write(dir.path().join("UserController.java"), CONTROLLER).unwrap();
        fs::write(dir.path().join("copy/UserController.java"), CONTROLLER).unwrap();

        let report = engine().scan(dir.path()).await.unwrap();

        assert_eq!(report.summary.controllers, 1);
        assert_eq!(report.summary.endpoints, 2);
    }

    #[tokio::test]
    async fn test_invalid_root_is_fatal() {
        let dir = tempfile::tempdir().unwrap();
        let file = dir.path().join("NotADir.java");
        fs::write(&file, "class A {}").unwrap();

        assert!(matches!(
            engine().scan(&file).await,
            Err(MetricsError::InvalidRoot(_))
        ));
        assert!(matches!(
            engine().scan(&dir.path().join("missing")).await,
            Err(MetricsError::InvalidRoot(_))
        ));
    }
}
