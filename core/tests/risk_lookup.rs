//! Static fraud-risk lookup: normalization, table hits and the miss policy.

use finshield_core::{
    config::ShieldConfig,
    risk_lookup::{CheckCategory, RiskLevel, RiskLookup, RiskRecord},
    types::Language,
};

fn lookup() -> RiskLookup {
    ShieldConfig::builtin().unwrap().risk_lookup
}

fn safe(reason: &str) -> RiskRecord {
    RiskRecord {
        risk_level:      RiskLevel::Low,
        complaint_count: 0,
        reason:          reason.to_string(),
    }
}

/// Formatted and bare phone numbers resolve to the same entry.
#[test]
fn formatted_phone_matches_bare_key() {
    let lookup = lookup();
    let formatted = lookup.check(Language::Ru, CheckCategory::Phone, "+7 (777) 123-45-67");
    let bare = lookup.check(Language::Ru, CheckCategory::Phone, "+77771234567");

    assert_eq!(formatted, bare);
    assert_eq!(formatted.risk_level, RiskLevel::High);
    assert_eq!(formatted.complaint_count, 12);
    assert_eq!(formatted.reason, "Множественные жалобы на OLX и Telegram");
}

/// Same input, same record, every time.
#[test]
fn check_is_pure() {
    let lookup = lookup();
    let first = lookup.check(Language::Kk, CheckCategory::Card, "4400 4301 2345 6789");
    for _ in 0..10 {
        assert_eq!(lookup.check(Language::Kk, CheckCategory::Card, "4400 4301 2345 6789"), first);
    }
}

#[test]
fn every_table_entry_is_reproduced() {
    let lookup = lookup();
    let cases = [
        (CheckCategory::Phone, "+77779876543", RiskLevel::Medium, 3, "Подозрительная активность"),
        (CheckCategory::Phone, "+77012345678", RiskLevel::Low, 0, "Нет жалоб"),
        (CheckCategory::Card, "4400430123456789", RiskLevel::High, 8, "Связана с мошенничеством"),
        (CheckCategory::Card, "5500450187654321", RiskLevel::Low, 0, "Безопасная карта"),
        (CheckCategory::Website, "fake-kaspi.com", RiskLevel::High, 45, "Фишинговый сайт!"),
        (CheckCategory::Website, "olx-scam.kz", RiskLevel::High, 23, "Поддельный OLX"),
        (CheckCategory::Website, "kaspi.kz", RiskLevel::Low, 0, "Официальный сайт"),
    ];
    for (category, key, risk, complaints, reason) in cases {
        let record = lookup.check(Language::Ru, category, key);
        assert_eq!(record.risk_level, risk, "{category} {key}");
        assert_eq!(record.complaint_count, complaints, "{category} {key}");
        assert_eq!(record.reason, reason, "{category} {key}");
    }
}

#[test]
fn reason_follows_language() {
    let lookup = lookup();
    let record = lookup.check(Language::Kk, CheckCategory::Website, "olx-scam.kz");
    assert_eq!(record.reason, "Жалған OLX");
}

/// Unknown identifiers are low risk with the localized "safe" text.
#[test]
fn unknown_identifiers_fall_back_to_safe() {
    let lookup = lookup();
    for category in CheckCategory::ALL {
        assert_eq!(lookup.check(Language::Ru, category, "nothing-here"), safe("Безопасно"));
        assert_eq!(lookup.check(Language::Kk, category, "nothing-here"), safe("Қауіпсіз"));
    }
}

/// Websites are matched case-sensitively and without trimming.
#[test]
fn website_lookup_is_exact() {
    let lookup = lookup();
    assert_eq!(lookup.check(Language::Ru, CheckCategory::Website, "KASPI.KZ"), safe("Безопасно"));
    assert_eq!(lookup.check(Language::Ru, CheckCategory::Website, " kaspi.kz"), safe("Безопасно"));
    assert!(!lookup.contains(CheckCategory::Website, "kaspi.kz "));
    assert!(lookup.contains(CheckCategory::Website, "kaspi.kz"));
}

/// Tables are disjoint: a phone key is not a card.
#[test]
fn categories_do_not_share_entries() {
    let lookup = lookup();
    assert!(lookup.contains(CheckCategory::Phone, "+77771234567"));
    assert!(!lookup.contains(CheckCategory::Card, "+77771234567"));
    assert!(!lookup.contains(CheckCategory::Website, "4400430123456789"));
}
