use crate::engine::evaluate_active;
use crate::rules::catalogue::{self, Catalogue};
use crate::{Context, RuleFlags, RuleId};
use proptest::prelude::*;

fn check(id: RuleId, password: &str) -> bool {
    let catalogue = crate::catalogue();
    let rule = catalogue.get(id).unwrap_or_else(|| panic!("no rule {id}"));
    (rule.predicate)(password, &Context::default())
}

#[test]
fn rule_examples_matching() {
    // Array of (rule, password, expected). Context::default() under test is
    // 2013-02-12 04:30, a new-moon day.
    let cases: Vec<(RuleId, &str, bool)> = vec![
        (1, "abcd", false),
        (1, "abcde", true),
        (1, "🌑abc", true),
        (1, "éabc", false),
        (2, "abc", false),
        (2, "a1", true),
        (3, "abc", false),
        (3, "aBc", true),
        (4, "abc", false),
        (4, "a!c", true),
        (4, "a\\b", true),
        (4, "a~b", false),
        (5, "a1b2c3d4e5f9", false),
        (5, "799", true),
        (5, "", false),
        (6, "MARCH", true),
        (6, "mayhem", true),
        (6, "marc", false),
        (7, "pick", false),
        (7, "hat", false),
        (7, "IV", true),
        (7, "xi", true),
        (8, "iLovePepsi", true),
        (8, "Shel", false),
        (9, "XXXV", true),
        (9, "V VII", true),
        (9, "V VII I", true),
        (9, "Shell XXXV", true),
        (9, "VII", false),
        (9, "XXXV M", false),
        (9, "", false),
        (10, "pick #1a2b3c now", true),
        (10, "pick 1a2b3c now", false),
        (10, "#abc", true),
        (10, "#abcd", false),
        (10, "#12345g", false),
        (10, "#abcé", true),
        (10, "#abc!", true),
        (11, "Cat", true),
        (11, "Na", true),
        (11, "he", false),
        (11, "xyz", false),
        (12, "🌑", true),
        (12, "🌕", false),
        (13, "born 2012", true),
        (13, "2013", false),
        (14, "Nf3", true),
        (14, "nf3", false),
        (14, "O-O", true),
        (14, "e5", false),
        (15, "I am loved", true),
        (15, "i am loved", false),
        (16, "ABC", false),
        (16, "ABCz", true),
        (16, "123", false),
        (17, "c<b>a</b>t", true),
        (17, "cat", false),
        (17, "", true),
        (17, "BCD", true),
        (17, "<b>a</b>pple <b>e</b>", true),
        (18, "", true),
        (18, "<b>x</b><i>y</i>", false),
        (18, "<b>x</b><i>y</i><i>z</i>", true),
        (18, "<i>a</i><i>b</i>", false),
        (19, "#FFF", true),
        (19, "FFF", false),
        (19, "#fffé", true),
        (20, "ab", true),
        (20, "abcd", false),
        (20, "a", false),
        (20, "abcde", true),
        (20, "🌑ab", false),
        (20, "🌑a", true),
        (21, "length=8", true),
        (21, "length=9", false),
        (21, "xlength=9", true),
        (21, "🌑length=9", false),
        (21, "🌑length=11", true),
        (22, "04:30", true),
        (22, "4:30", false),
        (22, "16:30", false),
        (23, "", true),
        (24, "", true),
    ];

    for (id, password, expected) in cases {
        assert_eq!(check(id, password), expected, "rule {id} on {password:?}");
    }
}

#[test]
fn rule_macro_accepts_statement_blocks() {
    let rule = rule! {
        id: 7,
        description: "Your password must end in a digit.",
        examples: ["a1"],
        flags: RuleFlags::HIDDEN,
        check: |password, _| {
            let last = password.chars().last();
            last.is_some_and(|c| c.is_ascii_digit())
        }
    };

    assert_eq!(rule.id, 7);
    assert_eq!(rule.examples, &["a1"]);
    assert!(rule.is_hidden());
    assert_eq!(rule.visual, None);
    assert!((rule.predicate)("a1", &Context::default()));
    assert!(!(rule.predicate)("1a", &Context::default()));
}

#[test]
fn catalogue_is_ordered_and_complete() {
    let catalogue = Catalogue::standard();
    assert_eq!(catalogue.len(), 24);
    for (idx, rule) in catalogue.iter().enumerate() {
        assert_eq!(rule.id as usize, idx + 1);
    }
    assert!(catalogue.get(0).is_none());
    assert!(catalogue.get(25).is_none());

    let dynamic: Vec<RuleId> = catalogue.iter().filter(|r| r.is_dynamic()).map(|r| r.id).collect();
    assert_eq!(dynamic, vec![12, 16, 22]);
    assert_eq!(catalogue.get(23).map(|r| r.flags), Some(RuleFlags::HIDDEN));
    assert_eq!(catalogue.get(24).map(|r| r.flags), Some(RuleFlags::META));
}

#[test]
fn moon_description_matches_its_check() {
    let ctx = Context::default();
    let rule = catalogue::rule_moon_phase();
    let description = rule.description.render(&ctx);
    let emoji = description.rsplit(' ').next().unwrap();
    assert!((rule.predicate)(emoji, &ctx));
}

#[test]
fn every_affirmation_carries_a_roman_thousand() {
    // Each affirmation contains a standalone "m", so rule 9's product can never
    // be 35 while rule 15 holds.
    for phrase in ["I am loved", "I am worthy", "I am enough"] {
        let password = format!("XXXV {phrase}");
        assert!(check(15, &password));
        assert!(!check(9, &password));
    }
}

proptest! {
    #[test]
    fn evaluation_never_panics(password in ".{0,64}") {
        let ctx = Context::default();
        let out = evaluate_active(crate::catalogue(), 24, &password, &ctx);
        prop_assert_eq!(out.statuses.len(), 24);
        prop_assert!(out.passed(23).unwrap());
        prop_assert!(out.passed(24).unwrap());
    }

    #[test]
    fn duplicate_hex_rules_agree(password in "[#0-9a-fA-Fxyz ]{0,12}") {
        prop_assert_eq!(check(10, &password), check(19, &password));
    }
}
