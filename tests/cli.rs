//! End-to-end tests of the `maa-scan` binary.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn maa_scan() -> Command {
    Command::cargo_bin("maa-scan").unwrap()
}

#[test]
fn test_scan_unsafe_product() {
    maa_scan()
        .args(["scan", "8901030895567"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Not safe during pregnancy!"))
        .stdout(predicate::str::contains("Contains unsafe ingredients: msg"))
        .stdout(predicate::str::contains("exact match"));
}

#[test]
fn test_scan_caution_product_with_leading_zeros() {
    maa_scan()
        .args(["scan", "0008901764012273"])
        .assert()
        .success()
        .stdout(predicate::str::contains("zero-stripped match"))
        .stdout(predicate::str::contains(
            "Consume with caution during pregnancy",
        ))
        .stdout(predicate::str::contains("caffeine"));
}

#[test]
fn test_scan_not_found_is_not_an_error() {
    maa_scan()
        .args(["scan", "42"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product not found in catalog"));
}

#[test]
fn test_scan_json_output() {
    let output = maa_scan()
        .args(["--format", "json", "scan", "8901719101038", "42"])
        .output()
        .unwrap();
    assert!(output.status.success());

    let reports: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(reports[0]["found"], true);
    assert_eq!(reports[0]["match_strategy"], "exact");
    assert_eq!(reports[0]["verdict"]["status"], "safe");
    assert_eq!(reports[1]["found"], false);
    assert!(reports[1].get("verdict").is_none());
}

#[test]
fn test_scan_codes_from_stdin() {
    maa_scan()
        .args(["--format", "tsv", "scan", "-"])
        .write_stdin("8901117100136\n\n8901262010016\n")
        .assert()
        .success()
        .stdout(predicate::str::contains("8901117100136\ttrue"))
        .stdout(predicate::str::contains("ibuprofen"))
        .stdout(predicate::str::contains("8901262010016\ttrue"));
}

#[test]
fn test_exact_only_rejects_noisy_prefix() {
    maa_scan()
        .args(["scan", "]E08901764012273"])
        .assert()
        .success()
        .stdout(predicate::str::contains("suffix match"));

    maa_scan()
        .args(["scan", "--exact-only", "]E08901764012273"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Product not found in catalog"));
}

#[test]
fn test_scan_with_custom_catalog_and_rules() {
    let dir = TempDir::new().unwrap();
    let catalog = dir.path().join("products.json");
    let rules = dir.path().join("rules.json");

    std::fs::write(
        &catalog,
        r#"[{"code": "5000", "product_name": "Herbal Tea", "ingredients_text": "Chamomile, Licorice Root"}]"#,
    )
    .unwrap();
    std::fs::write(
        &rules,
        r#"{"version": "1.0.0", "rules": [{"term": "licorice root", "tier": "unsafe"}]}"#,
    )
    .unwrap();

    maa_scan()
        .args(["scan", "5000", "--catalog"])
        .arg(&catalog)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .success()
        .stdout(predicate::str::contains("Herbal Tea"))
        .stdout(predicate::str::contains("licorice root"));
}

#[test]
fn test_rules_file_with_blank_term_fails() {
    let dir = TempDir::new().unwrap();
    let rules = dir.path().join("rules.json");
    std::fs::write(
        &rules,
        r#"{"version": "1.0.0", "rules": [{"term": " - ", "tier": "caution"}]}"#,
    )
    .unwrap();

    maa_scan()
        .args(["scan", "8901030895567", "--rules"])
        .arg(&rules)
        .assert()
        .failure()
        .stderr(predicate::str::contains("empty after normalization"));
}

#[test]
fn test_rules_file_without_version_fails() {
    let dir = TempDir::new().unwrap();
    let rules = dir.path().join("rules.json");
    std::fs::write(&rules, r#"{"rules": [{"term": "caffeine", "tier": "caution"}]}"#).unwrap();

    maa_scan()
        .args(["scan", "8901030895567", "--rules"])
        .arg(&rules)
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing field `version`"));
}

#[test]
fn test_scan_text_shows_ingredients_and_additives() {
    maa_scan()
        .args(["scan", "8901491101837"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Ingredients: Rice meal"))
        .stdout(predicate::str::contains("Additives: en:e627, en:e631"));
}

#[test]
fn test_tsv_cells_stay_on_one_row() {
    let dir = TempDir::new().unwrap();
    let catalog = dir.path().join("products.json");
    std::fs::write(
        &catalog,
        r#"[{"code": "5000", "product_name": "Masala\tMunch\nSpicy", "brands": "Kur\tkure"}]"#,
    )
    .unwrap();

    let output = maa_scan()
        .args(["--format", "tsv", "scan", "5000", "--catalog"])
        .arg(&catalog)
        .output()
        .unwrap();
    assert!(output.status.success());

    let stdout = String::from_utf8(output.stdout).unwrap();
    let lines: Vec<&str> = stdout.lines().collect();
    assert_eq!(lines.len(), 2);
    assert_eq!(lines[1].split('\t').count(), 10);
    assert!(lines[1].contains("Masala Munch Spicy\tKur kure"));
}

#[test]
fn test_catalog_list_filtered_by_status() {
    maa_scan()
        .args(["catalog", "list", "--status", "unsafe"])
        .assert()
        .success()
        .stdout(predicate::str::contains("8901117100136"))
        .stdout(predicate::str::contains("8901719101038").not())
        .stdout(predicate::str::contains("Total: 3 products"));
}

#[test]
fn test_catalog_show_unknown_code_fails() {
    maa_scan()
        .args(["catalog", "show", "0000"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("not found"));
}

#[test]
fn test_catalog_export_round_trips() {
    let dir = TempDir::new().unwrap();
    let exported = dir.path().join("catalog.json");

    maa_scan()
        .args(["catalog", "export"])
        .arg(&exported)
        .assert()
        .success();

    maa_scan()
        .args(["scan", "8901491101837", "--catalog"])
        .arg(&exported)
        .assert()
        .success()
        .stdout(predicate::str::contains("e627, e631"));
}

#[test]
fn test_rules_list_by_tier() {
    maa_scan()
        .args(["rules", "list", "--tier", "caution"])
        .assert()
        .success()
        .stdout(predicate::str::contains("CAUTION (19 terms):"))
        .stdout(predicate::str::contains("UNSAFE").not());
}
