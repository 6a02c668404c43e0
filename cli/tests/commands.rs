use std::{fs, path::Path};

use assert_cmd::{cargo::cargo_bin_cmd, Command};
use predicates::prelude::*;
use tempfile::tempdir;

const OWNER: &str = "0x1";
const OTHER: &str = "0x2";

fn counter_dapp(dir: &Path) -> Command {
    let mut cmd = cargo_bin_cmd!("counter-dapp");
    cmd.current_dir(dir)
        .env("NO_COLOR", "1")
        .env_remove("COUNTER_DAPP_STATE")
        .env_remove("COUNTER_DAPP_ACCOUNT")
        .env_remove("RUST_LOG");
    cmd
}

fn init_devnet(dir: &Path) {
    counter_dapp(dir)
        .args(["devnet", "init", "--owner", OWNER])
        .assert()
        .success()
        .stderr(predicate::str::contains("Deployed CounterContract on devnet"));
}

#[test]
fn show_before_init_reports_missing_contract() {
    let tmp = tempdir().expect("tempdir");

    counter_dapp(tmp.path())
        .arg("show")
        .assert()
        .failure()
        .stdout(predicate::str::contains(
            "No contract found by the name of \"CounterContract\" on chain \"devnet\"!",
        ))
        .stdout(predicate::str::contains("Please deploy the contract first."));
}

#[test]
fn show_renders_fresh_contract() {
    let tmp = tempdir().expect("tempdir");
    init_devnet(tmp.path());
    assert!(tmp.path().join(".counter-devnet.json").exists());

    counter_dapp(tmp.path())
        .args(["show", "--account", OWNER])
        .assert()
        .success()
        .stdout(predicate::str::contains("Counter Contract\n  0\n"))
        .stdout(predicate::str::contains("You are the owner"))
        .stdout(predicate::str::contains("Reset Function Requirements"))
        .stdout(predicate::str::contains("No events found"));
}

#[test]
fn increment_updates_counter_and_history() {
    let tmp = tempdir().expect("tempdir");
    init_devnet(tmp.path());

    counter_dapp(tmp.path())
        .args(["increment", "--account", OTHER])
        .assert()
        .success()
        .stderr(predicate::str::contains("Included in block 1"))
        .stdout(predicate::str::contains("Counter Contract\n  1\n"))
        .stdout(predicate::str::contains("ok Counter incremented successfully!"))
        .stdout(predicate::str::contains("0 → 1  0x2  Block: 1"))
        .stdout(predicate::str::contains("You are the owner").not());

    counter_dapp(tmp.path())
        .arg("events")
        .assert()
        .success()
        .stdout(predicate::str::contains("Counter Events (1 events)"));
}

#[test]
fn set_validates_input_and_ownership() {
    let tmp = tempdir().expect("tempdir");
    init_devnet(tmp.path());

    counter_dapp(tmp.path())
        .args(["set", "", "--account", OWNER])
        .assert()
        .success()
        .stdout(predicate::str::contains("error Please enter a value"));

    counter_dapp(tmp.path())
        .args(["set", "ten", "--account", OWNER])
        .assert()
        .success()
        .stdout(predicate::str::contains("error Please enter a valid integer value"));

    counter_dapp(tmp.path())
        .args(["set", "42", "--account", OTHER])
        .assert()
        .success()
        .stderr(predicate::str::contains("only the contract owner can set the counter"))
        .stdout(predicate::str::contains("Caller is not the owner"));

    counter_dapp(tmp.path())
        .args(["set", "42", "--account", "0x0001"])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok Counter value set successfully!"))
        .stdout(predicate::str::contains("Counter Contract\n  42\n"));
}

#[test]
fn reset_requires_funds_and_allowance() {
    let tmp = tempdir().expect("tempdir");
    init_devnet(tmp.path());

    counter_dapp(tmp.path())
        .args(["increment", "--account", OTHER])
        .assert()
        .success();

    counter_dapp(tmp.path())
        .args(["reset", "--account", OTHER])
        .assert()
        .success()
        .stdout(predicate::str::contains("Insufficient STRK token balance"));

    counter_dapp(tmp.path())
        .args(["devnet", "fund", OTHER, "2"])
        .assert()
        .success()
        .stderr(predicate::str::contains("0x2 balance: 2 STRK"));

    counter_dapp(tmp.path())
        .args(["reset", "--account", OTHER])
        .assert()
        .success()
        .stdout(predicate::str::contains("Insufficient STRK token allowance"));

    counter_dapp(tmp.path())
        .args(["devnet", "approve", OTHER, "1"])
        .assert()
        .success()
        .stderr(predicate::str::contains("0x2 allowance: 1 STRK"));

    counter_dapp(tmp.path())
        .args(["reset", "--account", OTHER])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok Counter reset successfully!"))
        .stdout(predicate::str::contains("Counter Contract\n  0\n"));
}

#[test]
fn writes_without_account_fail_softly() {
    let tmp = tempdir().expect("tempdir");
    init_devnet(tmp.path());

    counter_dapp(tmp.path())
        .arg("decrement")
        .assert()
        .success()
        .stdout(predicate::str::contains("error Wallet not connected"));
}

#[test]
fn config_file_supplies_account_and_state() {
    let tmp = tempdir().expect("tempdir");
    fs::write(
        tmp.path().join("counter-dapp.toml"),
        "account = \"0x1\"\ntheme = \"dark\"\nstate = \"chain/devnet.json\"\n",
    )
    .expect("write config");

    init_devnet(tmp.path());
    assert!(tmp.path().join("chain/devnet.json").exists());

    counter_dapp(tmp.path())
        .arg("show")
        .assert()
        .success()
        .stdout(predicate::str::contains("You are the owner"));
}

#[test]
fn rejects_invalid_account_and_missing_config() {
    let tmp = tempdir().expect("tempdir");
    init_devnet(tmp.path());

    counter_dapp(tmp.path())
        .args(["show", "--account", "0xnope"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("invalid address '0xnope'"));

    counter_dapp(tmp.path())
        .args(["show", "--config", "missing.toml"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("config file not found"));
}

#[test]
fn init_refuses_to_overwrite_without_force() {
    let tmp = tempdir().expect("tempdir");
    init_devnet(tmp.path());

    counter_dapp(tmp.path())
        .args(["devnet", "init", "--owner", OTHER])
        .assert()
        .failure()
        .stderr(predicate::str::contains("devnet state already exists"));

    counter_dapp(tmp.path())
        .args(["devnet", "init", "--owner", OTHER, "--force", "--network", "local"])
        .assert()
        .success()
        .stderr(predicate::str::contains("on local owned by 0x2"));
}

#[test]
fn schema_prints_contract_description() {
    let tmp = tempdir().expect("tempdir");

    counter_dapp(tmp.path())
        .args(["schema", "--pretty"])
        .assert()
        .success()
        .stdout(predicate::str::contains("\"CounterContract\""))
        .stdout(predicate::str::contains("\"set_counter\""))
        .stdout(predicate::str::contains("\"CounterChanged\""));
}

#[test]
fn completions_name_the_binary() {
    let tmp = tempdir().expect("tempdir");

    counter_dapp(tmp.path())
        .args(["completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("counter-dapp"));
}
