mod check_test;
mod config_test;

use crate::common::{FEDORA_BANNER, KcheckTest};

#[test]
fn test_help_lists_subcommands() {
    let test = KcheckTest::new();
    let mut cmd = test.kcheck_command();
    cmd.arg("--help");
    let output = cmd.output().expect("Failed to execute kcheck command");
    let stdout = String::from_utf8_lossy(&output.stdout);

    assert!(output.status.success());
    for subcommand in ["check", "running", "installed", "clean", "compare"] {
        assert!(stdout.contains(subcommand), "missing {subcommand} in {stdout}");
    }
}

#[test]
fn test_no_command_runs_check() {
    let test = KcheckTest::new();
    test.set_banner(FEDORA_BANNER);
    test.install_kernel("4.0.3-301.fc22.x86_64");

    let result = test.kcheck(&[]);
    result.assert_success();
    assert_eq!(
        result.stdout(),
        "OK: running kernel 4.0.3-301 is the latest installed\n"
    );
}

#[test]
fn test_running() {
    let test = KcheckTest::new();
    test.set_banner(FEDORA_BANNER);

    let result = test.kcheck(&["running"]);
    result.assert_success();
    assert_eq!(result.stdout(), "4.0.3-301\n");
}

#[test]
fn test_running_debian() {
    let test = KcheckTest::new();
    test.set_banner("Linux version 3.16.0-4-amd64 (debian-kernel@lists.debian.org) (gcc version 4.8.4 (Debian 4.8.4-1) ) #1 SMP Debian 3.16.7-ckt9-3~deb8u1 (2015-04-24)");

    let result = test.kcheck(&["running", "--format", "json"]);
    result.assert_success();
    assert_eq!(result.stdout(), "\"3.16.7-ckt9-3~deb8u1\"\n");
}

#[test]
fn test_running_without_banner() {
    let test = KcheckTest::new();

    let result = test.kcheck(&["running"]);
    result.assert_code(3);
    assert!(
        result
            .stderr()
            .contains("Failed to read the running kernel version"),
        "{}",
        result.stderr()
    );
}

#[test]
fn test_installed() {
    let test = KcheckTest::new();
    test.set_banner(FEDORA_BANNER);
    test.install_kernel("4.0.4-301.fc22.x86_64");
    test.install_kernel("4.0.3-301.fc22.x86_64");
    test.install_kernel("0-rescue-0123456789abcdef");

    let result = test.kcheck(&["installed"]);
    result.assert_success();
    assert_eq!(result.stdout(), "* 4.0.3-301\n  4.0.4-301\n");
}

#[test]
fn test_installed_json() {
    let test = KcheckTest::new();
    test.set_banner(FEDORA_BANNER);
    test.install_kernel("4.0.3-301.fc22.x86_64");

    let result = test.kcheck(&["installed", "--format", "json"]);
    result.assert_success();

    let entries: serde_json::Value = serde_json::from_str(&result.stdout()).unwrap();
    assert_eq!(
        entries,
        serde_json::json!([
            {
                "release": "4.0.3-301.fc22.x86_64",
                "version": "4.0.3-301",
                "running": true,
            }
        ])
    );
}
