//! Integration tests for Armada

mod cli_tests {
    use assert_cmd::Command;
    use predicates::prelude::*;
    use std::path::Path;
    use tempfile::TempDir;

    const INVENTORY: &str = r#"
[[instances]]
address = "10.0.0.1"
username = "root"
password = "aHVudGVyMg=="

[instances.labels]
mysql = "slave"
zone = "us"

[[instances]]
address = "10.0.0.2"
port = 2222
username = "ops"
password = "cGFzcw=="

[instances.labels]
mysql = "master"
"#;

    fn armada(temp: &Path) -> Command {
        let mut cmd = Command::cargo_bin("armada").unwrap();
        cmd.env("ARMADA_CACHE_DIR", temp.join("cache"));
        cmd.env("ARMADA_CONFIG", temp.join("no-config.toml"));
        cmd
    }

    fn write_inventory(temp: &TempDir) -> std::path::PathBuf {
        let path = temp.path().join("inventory.toml");
        std::fs::write(&path, INVENTORY).unwrap();
        path
    }

    #[test]
    fn help_displays() {
        Command::cargo_bin("armada")
            .unwrap()
            .arg("--help")
            .assert()
            .success()
            .stdout(predicate::str::contains("batch operations over an SSH host inventory"));
    }

    #[test]
    fn version_displays() {
        Command::cargo_bin("armada")
            .unwrap()
            .arg("--version")
            .assert()
            .success()
            .stdout(predicate::str::contains("armada"));
    }

    #[test]
    fn list_plain_prints_endpoints() {
        let temp = TempDir::new().unwrap();
        let inventory = write_inventory(&temp);

        armada(temp.path())
            .args(["list", inventory.to_str().unwrap(), "--format", "plain"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("10.0.0.1:22")
                    .and(predicate::str::contains("10.0.0.2:2222")),
            );
    }

    #[test]
    fn list_filters_by_label() {
        let temp = TempDir::new().unwrap();
        let inventory = write_inventory(&temp);

        armada(temp.path())
            .args([
                "list",
                inventory.to_str().unwrap(),
                "-l",
                "mysql=slave",
                "--format",
                "plain",
            ])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("10.0.0.1:22")
                    .and(predicate::str::contains("10.0.0.2").not()),
            );
    }

    #[test]
    fn list_decodes_password_on_request() {
        let temp = TempDir::new().unwrap();
        let inventory = write_inventory(&temp);

        armada(temp.path())
            .args(["list", inventory.to_str().unwrap(), "--decode-password"])
            .assert()
            .success()
            .stdout(predicate::str::contains("hunter2"));
    }

    #[test]
    fn list_twice_reuses_cache() {
        let temp = TempDir::new().unwrap();
        let inventory = write_inventory(&temp);

        armada(temp.path())
            .args(["list", inventory.to_str().unwrap(), "--format", "plain"])
            .assert()
            .success();

        assert!(temp.path().join("cache").join("cache_index.json").exists());

        // Second invocation resolves through the cache and prints the same hosts
        armada(temp.path())
            .args(["list", inventory.to_str().unwrap(), "--format", "plain"])
            .assert()
            .success()
            .stdout(predicate::str::contains("10.0.0.1:22"));
    }

    #[test]
    fn list_missing_inventory_fails() {
        let temp = TempDir::new().unwrap();

        armada(temp.path())
            .args(["list", "/definitely/not/there.toml"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Inventory file not found"));
    }

    #[test]
    fn list_malformed_inventory_fails() {
        let temp = TempDir::new().unwrap();
        let inventory = temp.path().join("broken.toml");
        std::fs::write(&inventory, "[[instances\n").unwrap();

        armada(temp.path())
            .args(["list", inventory.to_str().unwrap()])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid inventory"));
    }

    #[test]
    fn list_bad_label_filter_fails() {
        let temp = TempDir::new().unwrap();
        let inventory = write_inventory(&temp);

        armada(temp.path())
            .args(["list", inventory.to_str().unwrap(), "-l", "mysql"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("Invalid label filter"));
    }

    #[test]
    fn check_reports_unreachable_hosts() {
        // A port nothing listens on: bind, read it back, drop the listener
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();
        drop(listener);

        let temp = TempDir::new().unwrap();
        let inventory = temp.path().join("inventory.toml");
        std::fs::write(
            &inventory,
            format!(
                "[[instances]]\naddress = \"127.0.0.1\"\nport = {}\nusername = \"root\"\npassword = \"cGFzcw==\"\n",
                port
            ),
        )
        .unwrap();

        armada(temp.path())
            .args(["check", inventory.to_str().unwrap(), "-t", "1"])
            .assert()
            .failure()
            .stderr(predicate::str::contains("host(s) unreachable"));
    }

    #[test]
    fn check_succeeds_against_listening_port() {
        let listener = std::net::TcpListener::bind("127.0.0.1:0").unwrap();
        let port = listener.local_addr().unwrap().port();

        let temp = TempDir::new().unwrap();
        let inventory = temp.path().join("inventory.toml");
        std::fs::write(
            &inventory,
            format!(
                "[[instances]]\naddress = \"127.0.0.1\"\nport = {}\nusername = \"root\"\npassword = \"cGFzcw==\"\n",
                port
            ),
        )
        .unwrap();

        armada(temp.path())
            .args(["check", inventory.to_str().unwrap(), "-t", "1"])
            .assert()
            .success()
            .stdout(predicate::str::contains("reachable"));

        drop(listener);
    }

    #[test]
    fn cache_list_empty() {
        let temp = TempDir::new().unwrap();

        armada(temp.path())
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(predicate::str::contains("Cache index is empty"));
    }

    #[test]
    fn cache_list_shows_fresh_entry() {
        let temp = TempDir::new().unwrap();
        let inventory = write_inventory(&temp);

        armada(temp.path())
            .args(["list", inventory.to_str().unwrap(), "--format", "plain"])
            .assert()
            .success();

        armada(temp.path())
            .args(["cache", "list"])
            .assert()
            .success()
            .stdout(
                predicate::str::contains("inventory.toml").and(predicate::str::contains("fresh")),
            );
    }

    #[test]
    fn cache_clear_removes_everything() {
        let temp = TempDir::new().unwrap();
        let inventory = write_inventory(&temp);

        armada(temp.path())
            .args(["list", inventory.to_str().unwrap(), "--format", "plain"])
            .assert()
            .success();

        armada(temp.path())
            .args(["cache", "clear", "--yes"])
            .assert()
            .success()
            .stdout(predicate::str::contains("cleared"));

        assert!(!temp.path().join("cache").join("cache_index.json").exists());
    }

    #[test]
    fn config_path() {
        let temp = TempDir::new().unwrap();

        armada(temp.path())
            .args(["config", "path"])
            .assert()
            .success()
            .stdout(predicate::str::contains("no-config.toml"));
    }

    #[test]
    fn config_show_defaults() {
        let temp = TempDir::new().unwrap();

        armada(temp.path())
            .args(["config", "show"])
            .assert()
            .success()
            .stdout(predicate::str::contains("[cache]").and(predicate::str::contains("[probe]")));
    }
}
