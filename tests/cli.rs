use assert_cmd::Command;
use assert_fs::prelude::*;
use predicates::prelude::*;

const USER_CONTROLLER: &str = r#"
package com.acme.web;

import org.springframework.web.bind.annotation.*;

@RestController
@RequestMapping("/api")
public class UserController {
    @GetMapping("/users")
    public List<User> list() { return null; }

    @PostMapping({"/users", "/members"})
    public User create(@RequestBody User user) { return user; }
}
"#;

const ITEM_RESOURCE: &str = r#"
package com.acme.rest;

@Path("/v1")
public class ItemResource {
    @GET
    @Path("/items")
    public List<Item> items() { return null; }
}
"#;

const ORDER: &str = r#"
package com.acme.domain;

@Entity
public class Order {
    public long getId() { return 0; }
}
"#;

const ORDER_REPOSITORY: &str = r#"
package com.acme.repo;

public interface OrderRepository {
    Order findById(long id);
}
"#;

fn archmetrics() -> Command {
    Command::cargo_bin("archmetrics").unwrap()
}

fn sample_tree() -> assert_fs::TempDir {
    let temp = assert_fs::TempDir::new().unwrap();
    temp.child("web/UserController.java").write_str(USER_CONTROLLER).unwrap();
    temp.child("rest/ItemResource.java").write_str(ITEM_RESOURCE).unwrap();
    temp.child("domain/Order.java").write_str(ORDER).unwrap();
    temp.child("repo/OrderRepository.java").write_str(ORDER_REPOSITORY).unwrap();
    temp.child("README.md").write_str("not java").unwrap();
    temp
}

#[test]
fn missing_root_is_a_usage_error() {
    archmetrics().assert().failure();
}

#[test]
fn non_directory_root_fails_before_scanning() {
    let temp = assert_fs::TempDir::new().unwrap();
    let file = temp.child("A.java");
    file.write_str("class A {}").unwrap();

    archmetrics()
        .arg(file.path())
        .assert()
        .failure()
        .stdout(predicate::str::is_empty())
        .stderr(predicate::str::contains("is not a directory"));
}

#[test]
fn text_report_lists_counters_roles_and_endpoints() {
    let temp = sample_tree();

    let assert = archmetrics().arg(temp.path()).assert().success();
    let stdout = String::from_utf8(assert.get_output().stdout.clone()).unwrap();

    assert!(stdout.starts_with(
        "methods,5\nclasses,3\ninterfaces,1\nenums,0\n"
    ));
    assert!(stdout.contains("controllers,1\n"));
    assert!(stdout.contains("repositories,1\n"));
    assert!(stdout.contains("entities,1\n"));
    assert!(stdout.contains("domainClasses,1\n"));
    assert!(stdout.contains("endpoints,4\n"));
    assert!(stdout.contains("Controllers:\ncom.acme.web.UserController\n\n"));
    assert!(stdout.contains("Entities (@Entity):\ncom.acme.domain.Order\n\n"));

    let endpoints: Vec<&str> = stdout
        .split("API Endpoints (method path -> Class#method):\n")
        .nth(1)
        .unwrap()
        .lines()
        .collect();
    assert_eq!(
        endpoints,
        vec![
            format!("{:<6} {:<30} -> com.acme.rest.ItemResource#items", "GET", "/v1/items"),
            format!("{:<6} {:<30} -> com.acme.web.UserController#list", "GET", "/api/users"),
            format!("{:<6} {:<30} -> com.acme.web.UserController#create", "POST", "/api/users"),
            format!("{:<6} {:<30} -> com.acme.web.UserController#create", "POST", "/api/members"),
        ]
    );
}

#[test]
fn json_report_is_machine_readable() {
    let temp = sample_tree();

    let assert = archmetrics()
        .arg(temp.path())
        .args(["--format", "json"])
        .assert()
        .success();
    let value: serde_json::Value = serde_json::from_slice(&assert.get_output().stdout).unwrap();

    assert_eq!(value["summary"]["endpoints"], 4);
    assert_eq!(value["repositories"][0], "com.acme.repo.OrderRepository");
    assert_eq!(value["endpoints"][0]["path"], "/v1/items");
}

#[test]
fn broken_file_is_reported_and_skipped() {
    let temp = sample_tree();
    temp.child("web/Broken.java")
        .write_str("public class Broken {\n  void x( {\n")
        .unwrap();

    archmetrics()
        .arg(temp.path())
        .assert()
        .success()
        .stderr(
            predicate::str::contains("Parse error in")
                .and(predicate::str::contains("Broken.java")),
        )
        .stdout(predicate::str::contains("classes,3\n"))
        .stdout(predicate::str::contains("endpoints,4\n"));
}
