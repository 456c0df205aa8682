//! The ordered rule catalogue.
//!
//! Rule `i` sits at index `i - 1` and is only ever activated after rule
//! `i - 1`. Predicates keep the game's literal substring/regex semantics, even
//! where those are naive (element symbols are raw case-sensitive substrings, so
//! `"Cat"` satisfies rule 11 through `"C"`).
//!
//! Rule 19 repeats rule 10's hex-color check verbatim. Both stay in the
//! catalogue so the progression length stays 24.

use crate::rules::helpers::{
    character_count, clock_time, digit_sum, extract_roman_numerals, is_prime, moon_phase_emoji, roman_to_decimal,
};
use crate::rules::tables::{
    AFFIRMATIONS, BANNED_LETTERS, CHESS_MOVES, ELEMENTS, LEAP_YEARS, MONTHS, SPECIAL_CHARACTERS, SPONSORS,
};
use crate::{Context, Description, Rule, RuleFlags, RuleId, RuleInfo};

/// Ordered, fixed list of rules. Ids are 1-based positions.
#[derive(Debug)]
pub struct Catalogue {
    rules: Vec<Rule>,
}

impl Catalogue {
    /// The 24-rule game catalogue.
    pub fn standard() -> Self {
        Self { rules: get() }
    }

    /// Build a catalogue from arbitrary rules. Ids must be `1..=len` in order;
    /// returns `None` otherwise.
    pub fn from_rules(rules: Vec<Rule>) -> Option<Self> {
        let ordered = rules.iter().enumerate().all(|(idx, rule)| rule.id as usize == idx + 1);
        ordered.then_some(Self { rules })
    }

    pub fn len(&self) -> usize {
        self.rules.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rules.is_empty()
    }

    pub fn get(&self, id: RuleId) -> Option<&Rule> {
        (id as usize).checked_sub(1).and_then(|idx| self.rules.get(idx))
    }

    pub fn rules(&self) -> &[Rule] {
        &self.rules
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Rule> {
        self.rules.iter()
    }

    /// Read-only metadata for every rule, descriptions rendered at `ctx.now`.
    pub fn info(&self, ctx: &Context) -> Vec<RuleInfo> {
        self.rules.iter().map(|rule| RuleInfo::from_rule(rule, ctx)).collect()
    }
}

/// All rules, in activation order.
pub fn get() -> Vec<Rule> {
    vec![
        rule_min_length(),
        rule_has_digit(),
        rule_has_uppercase(),
        rule_has_special_character(),
        rule_digit_sum(),
        rule_month_name(),
        rule_roman_numeral(),
        rule_sponsor(),
        rule_roman_product(),
        rule_hex_color(),
        rule_element_symbol(),
        rule_moon_phase(),
        rule_leap_year(),
        rule_chess_move(),
        rule_affirmation(),
        rule_banned_letter(),
        rule_bold_vowels(),
        rule_italic_ratio(),
        rule_hex_color_again(),
        rule_prime_length(),
        rule_own_length(),
        rule_clock_time(),
        rule_hidden(),
        rule_break_a_rule(),
    ]
}

// --- Basic -------------------------------------------------------------------

pub fn rule_min_length() -> Rule {
    rule! {
        id: 1,
        description: "Your password must be at least 5 characters long.",
        check: |password, _| { character_count(password) >= 5 }
    }
}

pub fn rule_has_digit() -> Rule {
    rule! {
        id: 2,
        description: "Your password must include a number.",
        check: |password, _| { password.bytes().any(|b| b.is_ascii_digit()) }
    }
}

pub fn rule_has_uppercase() -> Rule {
    rule! {
        id: 3,
        description: "Your password must include an uppercase letter.",
        check: |password, _| { password.bytes().any(|b| b.is_ascii_uppercase()) }
    }
}

pub fn rule_has_special_character() -> Rule {
    rule! {
        id: 4,
        description: "Your password must include a special character (e.g., !, @, #).",
        visual: SPECIAL_CHARACTERS,
        check: |password, _| { password.chars().any(|c| SPECIAL_CHARACTERS.contains(c)) }
    }
}

// --- Intermediate --------------------------------------------------------------

pub fn rule_digit_sum() -> Rule {
    rule! {
        id: 5,
        description: "All digits in your password must add up to 25.",
        check: |password, _| { digit_sum(password) == 25 }
    }
}

pub fn rule_month_name() -> Rule {
    rule! {
        id: 6,
        description: "Your password must include a month name (e.g., March, October).",
        examples: ["January", "March", "October", "December"],
        check: |password, _| {
            let lower = password.to_lowercase();
            MONTHS.iter().any(|month| lower.contains(month))
        }
    }
}

pub fn rule_roman_numeral() -> Rule {
    rule! {
        id: 7,
        description: "Your password must include a Roman numeral (e.g., IV, X, IX).",
        examples: ["IV", "X", "IX", "L", "C"],
        check: |password, _| { !extract_roman_numerals(password).is_empty() }
    }
}

pub fn rule_sponsor() -> Rule {
    rule! {
        id: 8,
        description: "Your password must include a sponsor name (Pepsi, Starbucks, or Shell).",
        examples: ["Pepsi", "Starbucks", "Shell"],
        check: |password, _| {
            let lower = password.to_lowercase();
            SPONSORS.iter().any(|sponsor| lower.contains(sponsor))
        }
    }
}

pub fn rule_roman_product() -> Rule {
    rule! {
        id: 9,
        description: "The product of all Roman numerals in your password must equal 35.",
        check: |password, _| {
            let numerals = extract_roman_numerals(password);
            // Saturating: anything past u64 is certainly not 35.
            !numerals.is_empty()
                && numerals.iter().fold(1u64, |product, numeral| product.saturating_mul(roman_to_decimal(numeral))) == 35
        }
    }
}

fn has_hex_color(password: &str) -> bool {
    regex!(r"#([0-9a-fA-F]{6}|[0-9a-fA-F]{3})(?-u:\b)").is_match(password)
}

pub fn rule_hex_color() -> Rule {
    rule! {
        id: 10,
        description: "Your password must include a valid hex color code (e.g., #FF5733).",
        examples: ["#FF0000", "#00FF00", "#0000FF", "#abc", "#123456"],
        check: |password, _| { has_hex_color(password) }
    }
}

pub fn rule_element_symbol() -> Rule {
    rule! {
        id: 11,
        description: "Your password must include a periodic table element symbol (e.g., Na, Fe).",
        examples: ["Na", "Fe", "Au", "Ag", "Cu"],
        check: |password, _| { ELEMENTS.iter().any(|symbol| password.contains(symbol)) }
    }
}

pub fn rule_moon_phase() -> Rule {
    rule! {
        id: 12,
        description: Description::Computed(|ctx| {
            format!("Your password must include today's moon phase emoji: {}", moon_phase_emoji(ctx.now.date()))
        }),
        flags: RuleFlags::DYNAMIC,
        check: |password, ctx| { password.contains(moon_phase_emoji(ctx.now.date())) }
    }
}

pub fn rule_leap_year() -> Rule {
    rule! {
        id: 13,
        description: "Your password must include a leap year (e.g., 2024, 2000).",
        examples: ["2000", "2004", "2020", "2024"],
        check: |password, _| { LEAP_YEARS.iter().any(|year| password.contains(year)) }
    }
}

pub fn rule_chess_move() -> Rule {
    rule! {
        id: 14,
        description: "Your password must include a chess move notation (e.g., Nf3, e4).",
        examples: ["e4", "Nf3", "Bc4", "O-O"],
        check: |password, _| { CHESS_MOVES.iter().any(|mv| password.contains(mv)) }
    }
}

// --- Advanced ----------------------------------------------------------------

pub fn rule_affirmation() -> Rule {
    rule! {
        id: 15,
        description: "Your password must include 'I am loved', 'I am worthy', or 'I am enough'.",
        examples: ["I am loved", "I am worthy", "I am enough"],
        check: |password, _| { AFFIRMATIONS.iter().any(|phrase| password.contains(phrase)) }
    }
}

pub fn rule_banned_letter() -> Rule {
    rule! {
        id: 16,
        description: "Your password must include a banned letter that you can never use again.",
        flags: RuleFlags::DYNAMIC,
        check: |password, _| { password.chars().any(|c| BANNED_LETTERS.contains(&c)) }
    }
}

pub fn rule_bold_vowels() -> Rule {
    rule! {
        id: 17,
        description: "All vowels in your password must be bold.",
        check: |password, _| {
            // Each vowel only needs one bolded occurrence of itself somewhere.
            password
                .chars()
                .filter(|c| "aeiouAEIOU".contains(*c))
                .all(|vowel| password.contains(&format!("<b>{vowel}</b>")))
        }
    }
}

pub fn rule_italic_ratio() -> Rule {
    rule! {
        id: 18,
        description: "Your password must have twice as many italic characters as bold characters.",
        check: |password, _| {
            let bold = regex!(r"<b>.*?</b>").find_iter(password).count();
            let italic = regex!(r"<i>.*?</i>").find_iter(password).count();
            italic == bold * 2
        }
    }
}

pub fn rule_hex_color_again() -> Rule {
    rule! {
        id: 19,
        description: "Your password must include a color hex code (e.g., #FF5733).",
        examples: ["#FF0000", "#00FF00", "#0000FF"],
        check: |password, _| { has_hex_color(password) }
    }
}

pub fn rule_prime_length() -> Rule {
    rule! {
        id: 20,
        description: "Your password length must be a prime number.",
        check: |password, _| { is_prime(character_count(password) as u64) }
    }
}

pub fn rule_own_length() -> Rule {
    rule! {
        id: 21,
        description: "Your password must include its own length (e.g., 'length=30').",
        check: |password, _| { password.contains(&format!("length={}", character_count(password))) }
    }
}

pub fn rule_clock_time() -> Rule {
    rule! {
        id: 22,
        description: "Your password must include the current time in HH:MM format.",
        flags: RuleFlags::DYNAMIC,
        check: |password, ctx| { password.contains(&clock_time(ctx.now)) }
    }
}

// --- Meta --------------------------------------------------------------------

/// Always true; "looks broken until discovered" is a presentation concern.
pub fn rule_hidden() -> Rule {
    rule! {
        id: 23,
        description: "Your password must include a hidden rule that's not visible until broken.",
        flags: RuleFlags::HIDDEN,
        check: |_, _| { true }
    }
}

/// Always true, same as the hidden rule.
pub fn rule_break_a_rule() -> Rule {
    rule! {
        id: 24,
        description: "Your password must intentionally break one of the previous rules.",
        flags: RuleFlags::META,
        check: |_, _| { true }
    }
}
