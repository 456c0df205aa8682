//! Primality, Roman numerals, and digit-run scanning.

/// Classic 6k±1 trial division.
pub fn is_prime(n: u64) -> bool {
    if n <= 1 {
        return false;
    }
    if n <= 3 {
        return true;
    }
    if n % 2 == 0 || n % 3 == 0 {
        return false;
    }

    let mut i = 5u64;
    while i.saturating_mul(i) <= n {
        if n % i == 0 || n % (i + 2) == 0 {
            return false;
        }
        i += 6;
    }
    true
}

/// Standard subtractive-notation grammar, case-insensitive. The grammar also
/// matches the empty string, which is not a numeral.
pub fn is_valid_roman_numeral(s: &str) -> bool {
    !s.is_empty() && regex!(r"(?i)^M{0,3}(CM|CD|D?C{0,3})(XC|XL|L?X{0,3})(IX|IV|V?I{0,3})$").is_match(s)
}

/// Maximal runs of Roman letters that also pass the grammar, in input order.
///
/// ```
/// use password_rules::helpers::extract_roman_numerals;
///
/// assert_eq!(extract_roman_numerals("Mix IV, vii"), vec!["Mix", "IV", "vii"]);
/// ```
pub fn extract_roman_numerals(s: &str) -> Vec<&str> {
    regex!(r"(?i)[IVXLCDM]+").find_iter(s).map(|m| m.as_str()).filter(|run| is_valid_roman_numeral(run)).collect()
}

fn roman_digit(c: char) -> Option<u64> {
    match c.to_ascii_uppercase() {
        'I' => Some(1),
        'V' => Some(5),
        'X' => Some(10),
        'L' => Some(50),
        'C' => Some(100),
        'D' => Some(500),
        'M' => Some(1000),
        _ => None,
    }
}

/// Right-to-left accumulation: add a digit when it is at least the previous
/// one, subtract it otherwise. Returns 0 when `s` is empty or holds anything
/// other than Roman letters. Does not check the grammar.
pub fn roman_to_decimal(s: &str) -> u64 {
    let Some(digits) = s.chars().map(roman_digit).collect::<Option<Vec<u64>>>() else {
        return 0;
    };

    let mut total: i64 = 0;
    let mut prev = 0u64;
    for &value in digits.iter().rev() {
        if value >= prev {
            total += value as i64;
        } else {
            total -= value as i64;
        }
        prev = value;
    }

    total.max(0) as u64
}

/// True when the decimal rendering of `n` reads the same reversed.
pub fn is_number_palindrome(n: u64) -> bool {
    is_digit_palindrome(&n.to_string())
}

fn is_digit_palindrome(digits: &str) -> bool {
    digits.bytes().eq(digits.bytes().rev())
}

/// Digit runs of length two or more that are palindromes. Runs are compared
/// as written, so leading zeros count (`"010"` qualifies).
pub fn find_palindrome_numbers(s: &str) -> Vec<&str> {
    regex!(r"[0-9]{2,}").find_iter(s).map(|m| m.as_str()).filter(|run| is_digit_palindrome(run)).collect()
}

/// Exactly-two-digit tokens that are prime. Boundaries are ASCII word
/// boundaries, so a trailing `é` still ends the token.
pub fn find_two_digit_primes(s: &str) -> Vec<&str> {
    regex!(r"(?-u:\b)[0-9]{2}(?-u:\b)")
        .find_iter(s)
        .map(|m| m.as_str())
        .filter(|token| token.parse::<u64>().map(is_prime).unwrap_or(false))
        .collect()
}
