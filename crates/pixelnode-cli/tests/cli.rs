use assert_cmd::Command;
use predicates::prelude::PredicateBooleanExt;
use predicates::str::contains;

fn cmd() -> Command {
    Command::new(assert_cmd::cargo::cargo_bin!("pixelnode"))
}

#[test]
fn help_lists_subcommands() {
    cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(contains("run").and(contains("resolve")));
}

#[test]
fn run_help_succeeds() {
    cmd().args(["run", "--help"]).assert().success();
}

#[test]
fn resolve_prints_port_address_and_delay() {
    cmd()
        .args(["resolve", "--ip", "10.0.1.37", "--netmask", "255.255.255.0"])
        .assert()
        .success()
        .stdout(
            contains("port address: 36")
                .and(contains("sub-net 2"))
                .and(contains("universe 4"))
                .and(contains("reply delay: 74 ms")),
        );
}

#[test]
fn resolve_requires_an_ip() {
    cmd().arg("resolve").assert().failure();
}

#[test]
fn run_rejects_malformed_mac() {
    cmd()
        .args([
            "run",
            "--ip",
            "192.168.1.200",
            "--netmask",
            "255.255.255.0",
            "--mac",
            "not-a-mac",
        ])
        .assert()
        .failure()
        .stderr(contains("error:").and(contains("hint:")));
}
