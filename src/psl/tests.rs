use super::{
    LoadError, PublicSuffixTable, ResolvedDomain, Rule, RuleError, RuleSection, SuffixKind,
};
use crate::domain::Domain;

const FIXTURE: &str = include_str!("../../tests/fixtures/public_suffix_list.dat");

fn table() -> PublicSuffixTable {
    PublicSuffixTable::parse(FIXTURE).expect("fixture parses")
}

fn resolve(table: &PublicSuffixTable, name: &str) -> ResolvedDomain {
    table.resolve_str(name).expect("valid domain")
}

fn parts(resolved: &ResolvedDomain) -> (String, SuffixKind, String) {
    (
        resolved.suffix().domain().to_ascii(),
        resolved.suffix().kind(),
        resolved.registrable_domain().to_ascii(),
    )
}

#[test]
fn loads_fixture_with_sections_and_version() {
    let table = table();
    assert_eq!(table.rule_count(), 32);
    assert_eq!(table.version(), Some("2024-06-01_09-43-12_UTC"));
    assert!(!table.is_empty());
}

#[test]
fn resolves_simple_icann_suffix() {
    let table = table();
    let r = resolve(&table, "www.example.com");
    assert_eq!(
        parts(&r),
        ("com".to_string(), SuffixKind::Icann, "example.com".to_string())
    );
    assert_eq!(r.subdomain().map(|d| d.to_ascii()), Some("www".to_string()));
}

#[test]
fn longest_rule_wins() {
    let table = table();
    let r = resolve(&table, "example.no.co.uk");
    assert_eq!(
        parts(&r),
        ("co.uk".to_string(), SuffixKind::Icann, "no.co.uk".to_string())
    );
}

#[test]
fn private_section_is_reported() {
    let table = table();
    let r = resolve(&table, "test.example.github.io");
    assert_eq!(
        parts(&r),
        (
            "github.io".to_string(),
            SuffixKind::Private,
            "example.github.io".to_string()
        )
    );
}

#[test]
fn unknown_tld_falls_back_to_rightmost_label() {
    let table = table();
    let r = resolve(&table, "example.co.urk");
    assert_eq!(
        parts(&r),
        ("urk".to_string(), SuffixKind::Unknown, "co.urk".to_string())
    );
    assert!(!r.suffix().is_known());
}

#[test]
fn wildcard_rules_match_any_label() {
    let table = table();
    let r = resolve(&table, "shop.foo.ck");
    assert_eq!(
        parts(&r),
        ("foo.ck".to_string(), SuffixKind::Icann, "shop.foo.ck".to_string())
    );

    let r = resolve(&table, "a.b.school.sch.uk");
    assert_eq!(
        parts(&r),
        ("school.sch.uk".to_string(), SuffixKind::Icann, "b.school.sch.uk".to_string())
    );
}

#[test]
fn exception_rules_override_wildcards() {
    let table = table();
    let r = resolve(&table, "www.ck");
    assert_eq!(parts(&r), ("ck".to_string(), SuffixKind::Icann, "www.ck".to_string()));

    let r = resolve(&table, "shop.city.kawasaki.jp");
    assert_eq!(
        parts(&r),
        (
            "kawasaki.jp".to_string(),
            SuffixKind::Icann,
            "city.kawasaki.jp".to_string()
        )
    );

    let r = resolve(&table, "shop.other.kawasaki.jp");
    assert_eq!(r.suffix().domain().to_ascii(), "other.kawasaki.jp");
}

#[test]
fn domain_shorter_than_registrable_is_its_own_registrable() {
    let table = table();
    let r = resolve(&table, "github.io");
    assert_eq!(r.registrable_domain(), r.domain());
    assert_eq!(r.suffix().domain(), r.domain());
    assert!(r.subdomain().is_none());

    let r = resolve(&table, "foo.ck");
    assert_eq!(r.registrable_domain().to_ascii(), "foo.ck");
}

#[test]
fn unicode_rules_are_stored_as_punycode() {
    let table = table();
    let r = resolve(&table, "пример.рф");
    assert_eq!(r.suffix().domain().to_ascii(), "xn--p1ai");
    assert_eq!(r.suffix().kind(), SuffixKind::Icann);

    let r = resolve(&table, "shop.example.公司.cn");
    assert_eq!(r.registrable_domain().to_unicode(), "example.公司.cn");
}

#[test]
fn wildcard_beats_exact_rule_of_same_length() {
    let table = PublicSuffixTable::builder()
        .with_rule(Rule::parse("foo", RuleSection::Icann).unwrap())
        .with_rule(Rule::parse("bar.foo", RuleSection::Private).unwrap())
        .with_rule(Rule::parse("*.foo", RuleSection::Icann).unwrap())
        .build();
    let domain = Domain::parse("x.bar.foo").unwrap();
    let r = table.resolve(&domain);
    assert_eq!(r.suffix().domain().to_ascii(), "bar.foo");
    assert_eq!(r.suffix().kind(), SuffixKind::Icann);
}

#[test]
fn empty_table_resolves_everything_as_unknown() {
    let table = PublicSuffixTable::from_rules(Vec::new());
    assert!(table.is_empty());
    let r = table.resolve(&Domain::parse("a.b.example").unwrap());
    assert_eq!(
        parts(&r),
        ("example".to_string(), SuffixKind::Unknown, "b.example".to_string())
    );
}

#[test]
fn builder_version_is_trimmed() {
    let table = PublicSuffixTable::builder()
        .with_version("  2024-06-01_09-43-12_UTC ")
        .with_rule(Rule::parse("com", RuleSection::Icann).unwrap())
        .build();
    assert_eq!(table.version(), Some("2024-06-01_09-43-12_UTC"));
    assert_eq!(table.rule_count(), 1);

    let table = PublicSuffixTable::builder().with_version("   ").build();
    assert_eq!(table.version(), None);
}

#[test]
fn duplicate_rules_keep_first_section() {
    let mut builder = PublicSuffixTable::builder();
    assert!(builder.insert(Rule::parse("example.net", RuleSection::Private).unwrap()));
    assert!(!builder.insert(Rule::parse("example.net", RuleSection::Icann).unwrap()));
    let table = builder.build();
    assert_eq!(table.rule_count(), 1);
    let r = table.resolve_str("a.example.net").unwrap();
    assert_eq!(r.suffix().kind(), SuffixKind::Private);
}

#[test]
fn rule_parsing() {
    let rule = Rule::parse("!www.ck", RuleSection::Icann).unwrap();
    assert!(rule.is_exception());
    assert!(!rule.is_wildcard());
    assert_eq!(rule.to_string(), "!www.ck");

    let rule = Rule::parse("*.Kawasaki.JP", RuleSection::Icann).unwrap();
    assert!(rule.is_wildcard());
    assert_eq!(rule.labels(), ["*", "kawasaki", "jp"]);

    assert_eq!(Rule::parse("", RuleSection::Icann), Err(RuleError::Empty));
    assert_eq!(
        Rule::parse("a..b", RuleSection::Icann),
        Err(RuleError::EmptyLabel)
    );
    assert_eq!(
        Rule::parse("a.*.b", RuleSection::Icann),
        Err(RuleError::MisplacedWildcard)
    );
    assert_eq!(
        Rule::parse("!*.b", RuleSection::Icann),
        Err(RuleError::MisplacedWildcard)
    );
    assert_eq!(
        Rule::parse("!ck", RuleSection::Icann),
        Err(RuleError::ShortException)
    );
}

#[test]
fn load_error_reports_line_number() {
    let text = "// ===BEGIN ICANN DOMAINS===\ncom\na..b\n";
    match PublicSuffixTable::parse(text) {
        Err(LoadError::Rule { line, rule, source }) => {
            assert_eq!(line, 3);
            assert_eq!(rule, "a..b");
            assert_eq!(source, RuleError::EmptyLabel);
        }
        other => panic!("expected rule error, got {other:?}"),
    }
}

#[test]
fn rule_text_stops_at_whitespace() {
    let table = PublicSuffixTable::parse("co.uk  trailing comment\n").unwrap();
    let r = table.resolve_str("example.co.uk").unwrap();
    assert_eq!(r.suffix().domain().to_ascii(), "co.uk");
}

#[test]
fn missing_file_is_io_error() {
    let err = PublicSuffixTable::from_path("/definitely/not/here.dat").expect_err("missing");
    assert!(matches!(err, LoadError::Io { .. }));
    assert!(err.to_string().contains("/definitely/not/here.dat"));
}

#[test]
fn table_is_shared_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<PublicSuffixTable>();

    let table = table();
    let names = ["example.com", "example.github.io", "www.ck", "a.b.c.co.uk"];
    std::thread::scope(|scope| {
        for name in names {
            let table = &table;
            scope.spawn(move || {
                let r = table.resolve_str(name).unwrap();
                assert!(r.domain().ends_with(r.registrable_domain()));
            });
        }
    });
}
