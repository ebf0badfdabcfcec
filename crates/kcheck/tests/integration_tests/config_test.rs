use crate::common::{FEDORA_BANNER, KcheckTest};

#[test]
fn test_config_file() {
    let test = KcheckTest::new();
    test.set_banner(FEDORA_BANNER);
    test.install_kernel("4.0.3-301.fc22.x86_64");
    test.install_kernel("4.0.4-301.fc22.x86_64");

    let config_file = test.temp_dir.path().join("kcheck.yaml");
    std::fs::write(
        &config_file,
        format!(
            "proc_version: {}\nboot_dir: {}\nsource: boot\n",
            test.proc_version_path(),
            test.boot_dir()
        ),
    )
    .unwrap();

    let mut cmd = test.kcheck_command();
    cmd.args(["--config", config_file.as_str(), "check"]);
    let output = cmd.output().expect("Failed to execute kcheck command");

    assert_eq!(output.status.code(), Some(1));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "WARNING: reboot required, running 4.0.3-301 but 4.0.4-301 is installed\n"
    );
}

#[test]
fn test_env_overrides_config_file() {
    let mut test = KcheckTest::new();
    test.set_banner(FEDORA_BANNER);
    test.install_kernel("4.0.3-301.fc22.x86_64");

    let config_file = test.temp_dir.path().join("kcheck.yaml");
    std::fs::write(&config_file, "boot_dir: /nonexistent\nsource: boot\n").unwrap();

    test.env
        .insert("KCHECK_CONFIG_FILE".into(), config_file.to_string());
    test.env
        .insert("KCHECK_BOOT_DIR".into(), test.boot_dir().to_string());
    test.env
        .insert("KCHECK_PROC_VERSION".into(), test.proc_version_path().to_string());

    let mut cmd = test.kcheck_command();
    cmd.arg("check");
    let output = cmd.output().expect("Failed to execute kcheck command");

    assert_eq!(output.status.code(), Some(0));
    assert_eq!(
        String::from_utf8_lossy(&output.stdout),
        "OK: running kernel 4.0.3-301 is the latest installed\n"
    );
}

#[test]
fn test_missing_config_file() {
    let test = KcheckTest::new();
    test.set_banner(FEDORA_BANNER);

    let mut cmd = test.kcheck_command();
    cmd.args(["--config", "/nonexistent/kcheck.yaml", "check"]);
    let output = cmd.output().expect("Failed to execute kcheck command");

    assert_eq!(output.status.code(), Some(3));
    assert!(
        String::from_utf8_lossy(&output.stdout).starts_with("UNKNOWN: Failed to load configuration: "),
    );
}
