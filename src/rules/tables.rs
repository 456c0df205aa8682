//! Fixed word lists the catalogue and helpers draw from.

pub(crate) const MONTHS: &[&str] = &[
    "january",
    "february",
    "march",
    "april",
    "may",
    "june",
    "july",
    "august",
    "september",
    "october",
    "november",
    "december",
];

pub(crate) const SPONSORS: &[&str] = &["pepsi", "starbucks", "shell"];

/// First thirty symbols only, matched as raw case-sensitive substrings.
pub(crate) const ELEMENTS: &[&str] = &[
    "H", "He", "Li", "Be", "B", "C", "N", "O", "F", "Ne", "Na", "Mg", "Al", "Si", "P", "S", "Cl", "Ar", "K", "Ca", "Sc",
    "Ti", "V", "Cr", "Mn", "Fe", "Co", "Ni", "Cu", "Zn",
];

pub(crate) const LEAP_YEARS: &[&str] = &["2000", "2004", "2008", "2012", "2016", "2020", "2024"];

pub(crate) const CHESS_MOVES: &[&str] = &["e4", "d4", "Nf3", "Nc3", "Bc4", "Bf4", "O-O", "O-O-O"];

pub(crate) const AFFIRMATIONS: &[&str] = &["I am loved", "I am worthy", "I am enough"];

pub(crate) const BANNED_LETTERS: &[char] = &[
    'e', 't', 'a', 'o', 'i', 'n', 's', 'h', 'r', 'd', 'l', 'c', 'u', 'm', 'w', 'f', 'g', 'y', 'p', 'b', 'v', 'k', 'j',
    'x', 'q', 'z',
];

pub(crate) const SPECIAL_CHARACTERS: &str = "!@#$%^&*()_+-=[]{};':\"\\|,.<>/?";

pub(crate) const WORDLE_WORDS: &[&str] = &[
    "APPLE", "BRAVE", "CRATE", "DWARF", "EAGLE", "FLAME", "GRAPE", "HOTEL", "IGLOO", "JUMBO", "KAYAK", "LEMON", "MUSIC",
    "NOBLE", "OCEAN", "PIANO", "QUARK", "ROBOT", "SOLAR", "TIGER",
];

pub(crate) const HEADLINES: &[&str] = &[
    "Global Leaders Meet to Address Climate Change",
    "New Technology Breakthrough Promises Clean Energy",
    "Scientists Discover Potential Cure for Common Disease",
    "Space Agency Announces Mission to Distant Planet",
    "Economic Growth Exceeds Expectations in First Quarter",
    "Major Sports Team Wins Championship in Dramatic Fashion",
    "Award-Winning Film Opens to Critical Acclaim",
    "Tech Company Unveils Revolutionary New Product",
    "Researchers Find New Species in Remote Location",
    "Historic Peace Agreement Signed Between Nations",
];
