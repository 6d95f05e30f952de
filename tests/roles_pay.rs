// tests/roles_pay.rs
//
// Role normalization, group resolution and the pay model.
//
use std::collections::BTreeSet;

use acme_scrape::config::Settings;
use acme_scrape::pay::PayModel;
use acme_scrape::roles::{normalize, RoleCatalog, RoleColumn};

#[test]
fn normalize_strips_punctuation_and_case() {
    assert_eq!(normalize("Chat/Email (Remote)"), "chatemailremote");
    assert_eq!(normalize("Walk-in [Lead]"), "walkinlead");
    assert_eq!(normalize("Trainer\\Phones"), "trainerphones");
    assert_eq!(normalize("HDQA"), "hdqa");
}

#[test]
fn group_resolves_to_normalized_members() {
    let catalog = RoleCatalog::default();
    let expected: BTreeSet<RoleColumn> = ["Phones", "Phones (FTE)", "Phones (Remote)", "Trainer/Phones"]
        .iter()
        .map(|r| RoleColumn::new(r))
        .collect();
    assert_eq!(catalog.resolve_role_set("ALL_PHONES"), expected);
    assert!(catalog.is_group("MEETING_AND_EVENT"));
    assert_eq!(catalog.group_names().count(), 9);
}

#[test]
fn single_role_resolves_to_itself() {
    let catalog = RoleCatalog::default();
    let set = catalog.resolve_role_set("Chat/Email (Remote)");
    assert_eq!(set.len(), 1);
    assert!(set.contains("chatemailremote"));

    // Unknown roles are not validated.
    assert!(catalog.resolve_role_set("Nonexistent Desk").contains("nonexistentdesk"));
}

#[test]
fn base_pay_falls_back_to_default() {
    let pay = PayModel::default();
    assert_eq!(pay.base_pay("SLP Team Lead"), 13.75);
    assert_eq!(pay.base_pay("Mystery Title"), 10.25);
}

#[test]
fn raises_stack_for_regular_titles() {
    let pay = PayModel::default();
    assert_eq!(pay.effective_pay("Support Specialist", &["Chat/Email"]), 10.75);
    assert_eq!(pay.effective_pay("Support Specialist", &["Chat/Email", "HDQA", "Pick 3"]), 12.00);
    assert_eq!(pay.effective_pay("Support Specialist", &["Walk-in"]), 10.25);
}

#[test]
fn slp_titles_get_no_raises() {
    let pay = PayModel::default();
    assert_eq!(pay.effective_pay("SLP Developer", &["HDQA"]), 12.75);
    assert_eq!(pay.effective_pay("SLP Team Lead", &["HDQA", "Chat/Email"]), 13.75);
}

#[test]
fn pay_model_follows_settings() {
    let settings = Settings::from_toml_str(
        r#"
        [pay]
        default_rate = 11.0

        [pay.rates]
        "Support Specialist" = 11.0

        [pay.raises]
        "HDQA" = 1.0
        "#,
    )
    .unwrap();
    let pay = PayModel::from_settings(&settings.pay);
    assert_eq!(pay.default_rate(), 11.0);
    assert_eq!(pay.effective_pay("Support Specialist", &["HDQA", "Chat/Email"]), 12.0);
}
