use crate::common::{FEDORA_BANNER, KcheckTest};

#[test]
fn test_check_up_to_date() {
    let test = KcheckTest::new();
    test.set_banner(FEDORA_BANNER);
    test.install_kernel("4.0.3-301.fc22.x86_64");
    test.install_kernel("3.19.8-200.fc21.x86_64");

    let result = test.kcheck(&["check"]);
    result.assert_success();
    assert_eq!(
        result.stdout(),
        "OK: running kernel 4.0.3-301 is the latest installed\n"
    );
}

#[test]
fn test_check_reboot_required() {
    let test = KcheckTest::new();
    test.set_banner(FEDORA_BANNER);
    test.install_kernel("4.0.3-301.fc22.x86_64");
    test.install_kernel("4.0.4-301.fc22.x86_64");

    let result = test.kcheck(&["check"]);
    result.assert_code(1);
    assert_eq!(
        result.stdout(),
        "WARNING: reboot required, running 4.0.3-301 but 4.0.4-301 is installed\n"
    );
}

#[test]
fn test_check_compares_numerically() {
    let test = KcheckTest::new();
    test.set_banner("Linux version 4.0.9-300.fc22.x86_64 (mockbuild@fedoraproject.org) #1 SMP");
    test.install_kernel("4.0.9-300.fc22.x86_64");
    test.install_kernel("4.0.10-300.fc22.x86_64");

    let result = test.kcheck(&["check"]);
    result.assert_code(1);
    assert_eq!(
        result.stdout(),
        "WARNING: reboot required, running 4.0.9-300 but 4.0.10-300 is installed\n"
    );
}

#[test]
fn test_check_no_installed_kernels() {
    let test = KcheckTest::new();
    test.set_banner(FEDORA_BANNER);

    let result = test.kcheck(&["check"]);
    result.assert_code(3);
    assert_eq!(
        result.stdout(),
        "UNKNOWN: No installed kernels found (source: boot)\n"
    );
}

#[test]
fn test_check_missing_boot_dir() {
    let test = KcheckTest::new();
    test.set_banner(FEDORA_BANNER);
    std::fs::remove_dir(test.boot_dir()).unwrap();

    let result = test.kcheck(&["check"]);
    result.assert_code(3);
    assert!(
        result
            .normalized_stdout()
            .starts_with("UNKNOWN: Failed to list kernel images in [ROOT]/boot: "),
        "{}",
        result.stdout()
    );
}

#[test]
fn test_check_missing_banner() {
    let test = KcheckTest::new();
    test.install_kernel("4.0.3-301.fc22.x86_64");

    let result = test.kcheck(&["check"]);
    result.assert_code(3);
    assert!(
        result
            .stdout()
            .starts_with("UNKNOWN: Failed to read the running kernel version: "),
        "{}",
        result.stdout()
    );
}

#[test]
fn test_check_json() {
    let test = KcheckTest::new();
    test.set_banner(FEDORA_BANNER);
    test.install_kernel("4.0.3-301.fc22.x86_64");
    test.install_kernel("4.0.4-301.fc22.x86_64");

    let result = test.kcheck(&["check", "--format", "json"]);
    result.assert_code(1);

    let report: serde_json::Value = serde_json::from_str(&result.stdout()).unwrap();
    assert_eq!(
        report,
        serde_json::json!({
            "status": "WARNING",
            "running": "4.0.3-301",
            "latest": "4.0.4-301",
            "needs_reboot": true,
            "message": "reboot required, running 4.0.3-301 but 4.0.4-301 is installed",
        })
    );
}

#[test]
fn test_check_debian_abi_bump() {
    let test = KcheckTest::new();
    test.set_banner("Linux version 3.16.0-4-amd64 (debian-kernel@lists.debian.org) (gcc version 4.8.4 (Debian 4.8.4-1) ) #1 SMP Debian 3.16.7-ckt9-3~deb8u1 (2015-04-24)");
    test.install_kernel("3.16.0-4-amd64");
    test.install_kernel("3.16.0-5-amd64");

    let result = test.kcheck(&["check"]);
    result.assert_code(1);
    assert_eq!(
        result.stdout(),
        "WARNING: reboot required, running 3.16.0-4-amd64 but 3.16.0-5-amd64 is installed\n"
    );
}
