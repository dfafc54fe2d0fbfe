use assert_cmd::Command;
use predicates::prelude::*;

fn nrf24prog() -> Command {
    Command::cargo_bin("nrf24prog").unwrap()
}

#[test]
fn probe_lists_all_family_members() {
    nrf24prog()
        .args(["probe", "-p", "dummy"])
        .assert()
        .success()
        .stdout(predicate::str::contains("nRF24LE1"))
        .stdout(predicate::str::contains("nRF24LU1+ (32K)"))
        .stdout(predicate::str::contains("Use --chip"));
}

#[test]
fn probe_with_chip_name() {
    nrf24prog()
        .args(["probe", "-p", "dummy:chip=nrf24lu1p-32k", "-c", "nrf24lu1+ (32k)"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Name:     nRF24LU1+ (32K)"))
        .stdout(predicate::str::contains("32768 bytes"));
}

#[test]
fn probe_rejects_spi_nor() {
    nrf24prog()
        .args(["probe", "-p", "dummy:chip=spi-nor"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Probe failed: no supported chip found"));
}

#[test]
fn probe_with_failing_bus() {
    nrf24prog()
        .args(["probe", "-p", "dummy:fail=rdsr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Probe failed"));
}

#[test]
fn probe_with_denied_opcode() {
    nrf24prog()
        .args(["probe", "-p", "dummy:deny=wrsr"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Probe failed: no supported chip found"));
}

#[test]
fn probe_unknown_chip_name() {
    nrf24prog()
        .args(["probe", "-p", "dummy", "-c", "W25Q128.V"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown chip name"));
}

#[test]
fn status_decodes_fsr() {
    // INFEN is toggled by the probe and written back before the dump
    nrf24prog()
        .args(["status", "-p", "dummy:fsr=0x88", "-c", "nrf24le1"])
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Chip status register: Enable HW debugger (DBG) is set",
        ))
        .stdout(predicate::str::contains(
            "Chip status register: Flash write (or erase) enable (WEN) is not set",
        ))
        .stdout(predicate::str::contains(
            "Chip status register: InfoPage enable (INFEN) is set",
        ));
}

#[test]
fn status_read_failure_prints_nothing() {
    // The probe reads the FSR three times, the fourth read is the status dump
    nrf24prog()
        .args(["status", "-p", "dummy:fail=rdsr@3"])
        .assert()
        .failure()
        .stdout(predicate::str::contains("Chip status register").not())
        .stderr(predicate::str::contains("Failed to read status register"));
}

#[test]
fn bad_programmer_parameters() {
    nrf24prog()
        .args(["probe", "-p", "dummy:chip=w25q128"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid dummy parameters"));

    nrf24prog()
        .args(["probe", "-p", "ch341a"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Unknown programmer"));
}

#[test]
fn list_chips() {
    nrf24prog()
        .arg("list-chips")
        .assert()
        .success()
        .stdout(predicate::str::contains("nRF24LU1+ (16K)"))
        .stdout(predicate::str::contains("16 KiB"));
}
