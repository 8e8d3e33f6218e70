//! Number format parsing and application
//!
//! Excel number format codes are a mini-language. A code holds up to four
//! sections separated by semicolons:
//! - `positive;negative;zero;text`
//! - `positive;negative` (zero uses positive)
//! - `positive` (all numbers use this, negatives get a leading `-`)
//!
//! Supported here:
//! - `General` and `@`
//! - digit placeholders `0`, `#` and `?` with `.`, thousands `,` and
//!   scaling trailing commas
//! - percent, scientific (`0.00E+00`) and fractions (`# ?/?`, `# ?/8`)
//! - dates and times, including elapsed `[h]`, `[mm]` and `[ss]`
//! - literals: quoted text, `\x`, `_x` padding and `*x` fill
//!
//! Colors (`[Red]`) are dropped; conditions (`[>100]`) select sections.

use chrono::{Datelike, Days, NaiveDate};

/// Largest serial Excel displays as a date (9999-12-31)
const MAX_DATE_SERIAL: f64 = 2_958_466.0;

const MONTHS: [&str; 12] = [
    "January",
    "February",
    "March",
    "April",
    "May",
    "June",
    "July",
    "August",
    "September",
    "October",
    "November",
    "December",
];

const WEEKDAYS: [&str; 7] = [
    "Sunday",
    "Monday",
    "Tuesday",
    "Wednesday",
    "Thursday",
    "Friday",
    "Saturday",
];

#[derive(Debug, Clone, PartialEq)]
enum Token {
    Literal(String),
    /// `0`, `#` or `?`
    Digit(char),
    Point,
    Comma,
    Percent,
    Slash,
    Exponent { plus: bool },
    /// `@`
    Text,
    General,
    /// Date/time letter (lowercased) with its repeat count
    Date(char, usize),
    AmPm,
    AP,
    /// `[h]`, `[mm]`, `[ss]`
    Elapsed(char, usize),
}

#[derive(Debug, Clone, Copy, PartialEq)]
enum Operator {
    Lt,
    Le,
    Gt,
    Ge,
    Eq,
    Ne,
}

#[derive(Debug, Clone, Copy, PartialEq)]
struct Condition {
    op: Operator,
    value: f64,
}

impl Condition {
    fn parse(s: &str) -> Option<Self> {
        let (op, rest) = [
            ("<=", Operator::Le),
            (">=", Operator::Ge),
            ("<>", Operator::Ne),
            ("<", Operator::Lt),
            (">", Operator::Gt),
            ("=", Operator::Eq),
        ]
        .into_iter()
        .find_map(|(prefix, op)| s.strip_prefix(prefix).map(|rest| (op, rest)))?;
        Some(Self {
            op,
            value: rest.trim().parse().ok()?,
        })
    }

    #[allow(clippy::float_cmp)]
    fn matches(&self, v: f64) -> bool {
        match self.op {
            Operator::Lt => v < self.value,
            Operator::Le => v <= self.value,
            Operator::Gt => v > self.value,
            Operator::Ge => v >= self.value,
            Operator::Eq => v == self.value,
            Operator::Ne => v != self.value,
        }
    }
}

/// One tokenized section of a format code
#[derive(Debug, Clone, Default)]
struct Section {
    tokens: Vec<Token>,
    condition: Option<Condition>,
}

impl Section {
    fn parse(src: &str) -> Self {
        let chars: Vec<char> = src.chars().collect();
        let mut section = Section::default();
        let mut i = 0;

        while let Some(&c) = chars.get(i) {
            let next = chars.get(i + 1).copied();
            i += 1;
            match c {
                '"' => {
                    let end = chars[i..]
                        .iter()
                        .position(|&ch| ch == '"')
                        .map_or(chars.len(), |p| i + p);
                    section.push_literal(&chars[i..end].iter().collect::<String>());
                    i = end + 1;
                }
                '\\' => {
                    if let Some(n) = next {
                        section.push_literal(&n.to_string());
                    }
                    i += 1;
                }
                '_' => {
                    section.push_literal(" ");
                    i += 1;
                }
                '*' => i += 1,
                '[' => {
                    let end = chars[i..]
                        .iter()
                        .position(|&ch| ch == ']')
                        .map_or(chars.len(), |p| i + p);
                    let inner: String = chars[i..end].iter().collect();
                    section.push_bracket(&inner);
                    i = end + 1;
                }
                '0' | '#' | '?' => section.tokens.push(Token::Digit(c)),
                '.' => section.tokens.push(Token::Point),
                ',' => section.tokens.push(Token::Comma),
                '%' => section.tokens.push(Token::Percent),
                '/' => section.tokens.push(Token::Slash),
                '@' => section.tokens.push(Token::Text),
                'E' | 'e' if matches!(next, Some('+' | '-')) => {
                    section.tokens.push(Token::Exponent {
                        plus: next == Some('+'),
                    });
                    i += 1;
                }
                'G' | 'g' if starts_with_ci(&chars[i - 1..], "general") => {
                    section.tokens.push(Token::General);
                    i += "general".len() - 1;
                }
                'A' | 'a' if starts_with_ci(&chars[i - 1..], "am/pm") => {
                    section.tokens.push(Token::AmPm);
                    i += "am/pm".len() - 1;
                }
                'A' | 'a' if starts_with_ci(&chars[i - 1..], "a/p") => {
                    section.tokens.push(Token::AP);
                    i += "a/p".len() - 1;
                }
                'y' | 'Y' | 'm' | 'M' | 'd' | 'D' | 'h' | 'H' | 's' | 'S' => {
                    let letter = c.to_ascii_lowercase();
                    let mut count = 1;
                    while chars
                        .get(i)
                        .is_some_and(|ch| ch.to_ascii_lowercase() == letter)
                    {
                        count += 1;
                        i += 1;
                    }
                    section.tokens.push(Token::Date(letter, count));
                }
                other => section.push_literal(&other.to_string()),
            }
        }

        section
    }

    fn push_literal(&mut self, s: &str) {
        if let Some(Token::Literal(last)) = self.tokens.last_mut() {
            last.push_str(s);
        } else {
            self.tokens.push(Token::Literal(s.to_string()));
        }
    }

    /// `[h]`-style elapsed time, `[$€-407]` currency, `[>100]` condition;
    /// colors and locale codes are dropped
    fn push_bracket(&mut self, inner: &str) {
        let lower = inner.to_ascii_lowercase();
        if let Some(first) = lower.chars().next() {
            if matches!(first, 'h' | 'm' | 's') && lower.chars().all(|c| c == first) {
                self.tokens.push(Token::Elapsed(first, lower.len()));
                return;
            }
        }
        if let Some(currency) = inner.strip_prefix('$') {
            let symbol = currency.split('-').next().unwrap_or_default();
            if !symbol.is_empty() {
                self.push_literal(symbol);
            }
            return;
        }
        if let Some(condition) = Condition::parse(inner) {
            self.condition = Some(condition);
        }
    }

    fn is_date(&self) -> bool {
        self.tokens.iter().any(|t| {
            matches!(
                t,
                Token::Date(..) | Token::AmPm | Token::AP | Token::Elapsed(..)
            )
        })
    }

    fn has(&self, token: &Token) -> bool {
        self.tokens.contains(token)
    }

    fn is_fraction(&self) -> bool {
        self.tokens.iter().enumerate().any(|(i, t)| {
            *t == Token::Slash
                && i > 0
                && matches!(self.tokens.get(i - 1), Some(Token::Digit(_)))
                && matches!(
                    self.tokens.get(i + 1),
                    Some(Token::Digit(_)) | Some(Token::Literal(_))
                )
        })
    }
}

fn starts_with_ci(chars: &[char], word: &str) -> bool {
    chars.len() >= word.len()
        && chars
            .iter()
            .zip(word.chars())
            .all(|(a, b)| a.to_ascii_lowercase() == b)
}

fn is_general(code: &str) -> bool {
    let code = code.trim();
    code.is_empty() || code.eq_ignore_ascii_case("General")
}

/// Split a format code at the `;` separating its sections
fn split_sections(code: &str) -> Vec<&str> {
    let mut sections = Vec::new();
    let mut start = 0;
    let mut in_quotes = false;
    let mut in_brackets = false;
    let mut escaped = false;

    for (i, c) in code.char_indices() {
        if escaped {
            escaped = false;
            continue;
        }
        match c {
            '\\' if !in_quotes => escaped = true,
            '"' => in_quotes = !in_quotes,
            '[' if !in_quotes => in_brackets = true,
            ']' if !in_quotes => in_brackets = false,
            ';' if !in_quotes && !in_brackets => {
                sections.push(&code[start..i]);
                start = i + 1;
            }
            _ => {}
        }
    }
    sections.push(&code[start..]);
    sections
}

/// Pick the section for a number; negatives lose their sign when a
/// dedicated section handles them
fn pick_section(sections: &[Section], value: f64) -> Option<(&Section, f64)> {
    let numeric = &sections[..sections.len().min(3)];

    if numeric.iter().any(|s| s.condition.is_some()) {
        for (i, section) in numeric.iter().enumerate() {
            if section.condition.is_some_and(|c| c.matches(value)) {
                let v = if i > 0 && value < 0.0 { -value } else { value };
                return Some((section, v));
            }
        }
        return numeric
            .iter()
            .find(|s| s.condition.is_none())
            .or(numeric.first())
            .map(|s| (s, value));
    }

    match numeric {
        [only] => Some((only, value)),
        [positive, negative] => Some(if value < 0.0 {
            (negative, -value)
        } else {
            (positive, value)
        }),
        [positive, negative, zero, ..] => Some(if value < 0.0 {
            (negative, -value)
        } else if value == 0.0 {
            (zero, value)
        } else {
            (positive, value)
        }),
        [] => None,
    }
}

/// Format a number with an Excel format code
pub fn format_number(value: f64, code: &str, date1904: bool) -> String {
    if is_general(code) {
        return format_general(value);
    }

    let sections: Vec<Section> = split_sections(code).into_iter().map(Section::parse).collect();
    let Some((section, value)) = pick_section(&sections, value) else {
        return format_general(value);
    };

    if section.tokens.is_empty() {
        String::new()
    } else if section.is_date() {
        format_date(section, value, date1904)
    } else if section.has(&Token::General) {
        format_with_general(section, value)
    } else if section.has(&Token::Text)
        && !section.tokens.iter().any(|t| matches!(t, Token::Digit(_)))
    {
        format_general(value)
    } else if section.tokens.iter().any(|t| matches!(t, Token::Exponent { .. })) {
        format_scientific(section, value)
    } else if section.is_fraction() {
        format_fraction(section, value)
    } else {
        format_decimal(section, value)
    }
}

/// Format text with the text section of a format code
///
/// The text section is the fourth one, or the first section containing `@`.
/// Codes without one show the text unchanged.
pub fn format_text(text: &str, code: &str) -> String {
    if is_general(code) {
        return text.to_string();
    }

    let sections: Vec<Section> = split_sections(code).into_iter().map(Section::parse).collect();
    let section = match sections.get(3) {
        Some(section) => Some(section),
        None => sections.iter().find(|s| s.has(&Token::Text)),
    };
    let Some(section) = section else {
        return text.to_string();
    };

    let mut out = String::new();
    for token in &section.tokens {
        match token {
            Token::Text => out.push_str(text),
            Token::Literal(s) => out.push_str(s),
            _ => {}
        }
    }
    out
}

/// The `General` format: integers as-is, up to ten significant digits
/// otherwise, scientific notation for very large or small magnitudes
#[allow(clippy::float_cmp, clippy::cast_possible_truncation)]
pub fn format_general(value: f64) -> String {
    if value == 0.0 {
        return "0".to_string();
    }
    if !value.is_finite() {
        return value.to_string();
    }

    let abs = value.abs();
    if !(1e-9..1e11).contains(&abs) {
        let exp = abs.log10().floor() as i32;
        let mantissa = trim_fraction(format!("{:.5}", value / 10f64.powi(exp)));
        let sign = if exp < 0 { '-' } else { '+' };
        return format!("{mantissa}E{sign}{:02}", exp.abs());
    }
    if value.fract() == 0.0 {
        return format!("{}", value as i64);
    }

    let int_digits = (abs.log10().floor() as i32 + 1).max(1);
    let decimals = (10 - int_digits).clamp(0, 10) as usize;
    trim_fraction(format!("{value:.decimals$}"))
}

fn trim_fraction(s: String) -> String {
    if s.contains('.') {
        s.trim_end_matches('0').trim_end_matches('.').to_string()
    } else {
        s
    }
}

fn format_with_general(section: &Section, value: f64) -> String {
    let mut out = String::new();
    for token in &section.tokens {
        match token {
            Token::General => out.push_str(&format_general(value)),
            Token::Literal(s) => out.push_str(s),
            _ => {}
        }
    }
    out
}

fn group_thousands(digits: &str) -> String {
    let len = digits.len();
    let mut out = String::with_capacity(len + len / 3);
    for (i, c) in digits.chars().enumerate() {
        if i > 0 && (len - i) % 3 == 0 {
            out.push(',');
        }
        out.push(c);
    }
    out
}

fn format_decimal(section: &Section, value: f64) -> String {
    let tokens = &section.tokens;
    let is_digit = |t: &Token| matches!(t, Token::Digit(_));

    let (Some(first_digit), Some(last_digit)) = (
        tokens.iter().position(is_digit),
        tokens.iter().rposition(is_digit),
    ) else {
        // no placeholders: literals only
        let mut out = String::new();
        for token in tokens {
            match token {
                Token::Literal(s) => out.push_str(s),
                Token::Percent => out.push('%'),
                Token::Point => out.push('.'),
                Token::Slash => out.push('/'),
                _ => {}
            }
        }
        return out;
    };

    let point = tokens.iter().position(|t| *t == Token::Point);
    let mut int_places = Vec::new();
    let mut frac_places = Vec::new();
    let mut last_int_digit = None;
    for (i, token) in tokens.iter().enumerate() {
        if let Token::Digit(c) = token {
            if point.map_or(true, |p| i < p) {
                int_places.push(*c);
                last_int_digit = Some(i);
            } else {
                frac_places.push(*c);
            }
        }
    }

    let grouping = tokens.iter().enumerate().any(|(i, t)| {
        *t == Token::Comma && i > first_digit && last_int_digit.is_some_and(|last| i < last)
    });
    let scale = tokens
        .iter()
        .skip(last_digit + 1)
        .take_while(|t| **t == Token::Comma)
        .count();
    let percent = tokens.iter().filter(|t| **t == Token::Percent).count();

    let scaled = value * 100f64.powi(percent as i32) / 1000f64.powi(scale as i32);
    let rounded = format!("{:.*}", frac_places.len(), scaled.abs());
    let (int_str, frac_str) = rounded.split_once('.').unwrap_or((rounded.as_str(), ""));
    let negative = scaled < 0.0 && rounded.chars().any(|c| c.is_ascii_digit() && c != '0');

    // optional trailing decimals
    let mut frac: Vec<char> = frac_str.chars().collect();
    for k in (0..frac.len()).rev() {
        if frac[k] != '0' {
            break;
        }
        match frac_places.get(k) {
            Some('#') => {
                frac.pop();
            }
            Some('?') => frac[k] = ' ',
            _ => break,
        }
    }

    let mut int_part = if int_str == "0" && !int_places.contains(&'0') {
        String::new()
    } else {
        int_str.to_string()
    };
    let min_int = int_places.iter().filter(|c| **c == '0').count();
    while int_part.len() < min_int {
        int_part.insert(0, '0');
    }
    if grouping {
        int_part = group_thousands(&int_part);
    }
    let padding = int_places
        .iter()
        .filter(|c| **c != '#')
        .count()
        .saturating_sub(int_part.len());
    let padded: String = " ".repeat(padding.min(int_places.iter().filter(|c| **c == '?').count()));

    let mut body = padded + &int_part;
    if point.is_some() {
        body.push('.');
        body.extend(frac);
    }

    let body_at = point.map_or(first_digit, |p| p.min(first_digit));
    let mut out = String::new();
    if negative {
        out.push('-');
    }
    for (i, token) in tokens.iter().enumerate() {
        if i == body_at {
            out.push_str(&body);
        }
        match token {
            Token::Literal(s) => out.push_str(s),
            Token::Percent => out.push('%'),
            Token::Slash => out.push('/'),
            _ => {}
        }
    }
    out
}

#[allow(clippy::cast_possible_truncation)]
fn format_scientific(section: &Section, value: f64) -> String {
    let tokens = &section.tokens;
    let exp_at = tokens
        .iter()
        .position(|t| matches!(t, Token::Exponent { .. }))
        .unwrap_or(tokens.len());
    let plus = matches!(tokens.get(exp_at), Some(Token::Exponent { plus: true }));
    let point = tokens[..exp_at].iter().position(|t| *t == Token::Point);

    let mut int_places = Vec::new();
    let mut frac_digits = 0;
    let mut exp_digits = 0;
    for (i, token) in tokens.iter().enumerate() {
        if let Token::Digit(c) = token {
            if i > exp_at {
                exp_digits += 1;
            } else if point.map_or(true, |p| i < p) {
                int_places.push(*c);
            } else {
                frac_digits += 1;
            }
        }
    }

    let int_width = int_places.len().max(1) as i32;
    let engineering = int_width > 1 && int_places.contains(&'#');
    let abs = value.abs();

    let mut exp = if abs == 0.0 {
        0
    } else {
        abs.log10().floor() as i32
    };
    exp = if engineering {
        exp - exp.rem_euclid(int_width)
    } else {
        exp - (int_width - 1)
    };

    let mut mantissa = format!("{:.*}", frac_digits, abs / 10f64.powi(exp));
    // rounding may carry into another integer digit
    let int_len = mantissa.split('.').next().map_or(0, str::len) as i32;
    if abs != 0.0 && int_len > int_width {
        exp += if engineering { int_width } else { 1 };
        mantissa = format!("{:.*}", frac_digits, abs / 10f64.powi(exp));
    }

    let exp_sign = if exp < 0 {
        "-"
    } else if plus {
        "+"
    } else {
        ""
    };
    let width = exp_digits.max(1);

    let first_digit = tokens.iter().position(|t| matches!(t, Token::Digit(_)));
    let mut prefix = String::new();
    let mut suffix = String::new();
    for (i, token) in tokens.iter().enumerate() {
        if let Token::Literal(s) = token {
            if first_digit.map_or(true, |f| i < f) {
                prefix.push_str(s);
            } else if i > exp_at {
                suffix.push_str(s);
            }
        }
    }

    let sign = if value < 0.0 { "-" } else { "" };
    format!(
        "{sign}{prefix}{mantissa}E{exp_sign}{:0width$}{suffix}",
        exp.abs()
    )
}

#[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
fn format_fraction(section: &Section, value: f64) -> String {
    let tokens = &section.tokens;
    let Some(slash) = tokens.iter().position(|t| *t == Token::Slash) else {
        return format_general(value);
    };

    // numerator: the placeholder run right before the slash
    let num_start = tokens[..slash]
        .iter()
        .rposition(|t| !matches!(t, Token::Digit(_)))
        .map_or(0, |p| p + 1);
    let has_whole = tokens[..num_start]
        .iter()
        .any(|t| matches!(t, Token::Digit(_)));

    let fixed_denominator = match tokens.get(slash + 1) {
        Some(Token::Literal(s)) => s
            .chars()
            .take_while(char::is_ascii_digit)
            .collect::<String>()
            .parse::<u64>()
            .ok()
            .filter(|d| *d > 0),
        _ => None,
    };
    let max_denominator = {
        let places = tokens[slash + 1..]
            .iter()
            .take_while(|t| matches!(t, Token::Digit(_)))
            .count()
            .clamp(1, 4);
        10u64.pow(places as u32) - 1
    };

    let abs = value.abs();
    let (mut whole, frac) = if has_whole {
        (abs.trunc() as u64, abs.fract())
    } else {
        (0, abs)
    };

    let (mut numerator, denominator) = match fixed_denominator {
        Some(d) => ((frac * d as f64).round() as u64, d),
        None => {
            let mut best = (0u64, 1u64);
            let mut best_err = f64::MAX;
            for d in 1..=max_denominator {
                let n = (frac * d as f64).round();
                let err = (frac - n / d as f64).abs();
                if err < best_err - f64::EPSILON {
                    best = (n as u64, d);
                    best_err = err;
                }
            }
            best
        }
    };
    if has_whole && numerator == denominator {
        whole += 1;
        numerator = 0;
    }

    let sign = if value < 0.0 && (whole > 0 || numerator > 0) {
        "-"
    } else {
        ""
    };
    let first_digit = tokens.iter().position(|t| matches!(t, Token::Digit(_)));
    let prefix: String = tokens
        .iter()
        .enumerate()
        .filter(|(i, _)| first_digit.map_or(true, |f| *i < f))
        .filter_map(|(_, t)| match t {
            Token::Literal(s) => Some(s.as_str()),
            _ => None,
        })
        .collect();

    let body = if !has_whole {
        format!("{numerator}/{denominator}")
    } else if numerator == 0 {
        whole.to_string()
    } else if whole == 0 {
        format!("{numerator}/{denominator}")
    } else {
        format!("{whole} {numerator}/{denominator}")
    };
    format!("{sign}{prefix}{body}")
}

/// Calendar fields of a date serial
#[derive(Debug, Clone, Copy, PartialEq)]
struct DateParts {
    year: i32,
    month: u32,
    day: u32,
    /// 0 = Sunday
    weekday: u32,
}

fn date_parts(days: i64, date1904: bool) -> Option<DateParts> {
    let from = |base: NaiveDate, offset: i64| -> Option<DateParts> {
        let date = base.checked_add_days(Days::new(u64::try_from(offset).ok()?))?;
        Some(DateParts {
            year: date.year(),
            month: date.month(),
            day: date.day(),
            weekday: date.weekday().num_days_from_sunday(),
        })
    };

    if date1904 {
        return from(NaiveDate::from_ymd_opt(1904, 1, 1)?, days);
    }
    match days {
        // day 0 is shown as January 0, 1900
        0 => Some(DateParts {
            year: 1900,
            month: 1,
            day: 0,
            weekday: 6,
        }),
        // the 1900 leap-year bug: serial 60 is February 29, 1900
        60 => Some(DateParts {
            year: 1900,
            month: 2,
            day: 29,
            weekday: 3,
        }),
        d if d < 60 => from(NaiveDate::from_ymd_opt(1899, 12, 31)?, d),
        d => from(NaiveDate::from_ymd_opt(1899, 12, 30)?, d),
    }
}

/// Whether the `m` at `index` means minutes: it follows an hour or
/// precedes a second
fn is_minute(tokens: &[Token], index: usize) -> bool {
    let is_time_part = |t: &&Token| {
        matches!(
            t,
            Token::Date('h' | 's' | 'y' | 'd' | 'm', _) | Token::Elapsed(..)
        )
    };
    let before = tokens[..index].iter().rev().find(is_time_part);
    let after = tokens[index + 1..].iter().find(is_time_part);
    matches!(before, Some(Token::Date('h', _) | Token::Elapsed('h', _)))
        || matches!(after, Some(Token::Date('s', _) | Token::Elapsed('s', _)))
}

#[allow(clippy::cast_possible_truncation)]
fn format_date(section: &Section, value: f64, date1904: bool) -> String {
    if !(0.0..MAX_DATE_SERIAL).contains(&value) {
        return format_general(value);
    }
    let tokens = &section.tokens;

    // decimals of fractional seconds (`ss.000`)
    let subsecond_digits = tokens
        .iter()
        .position(|t| *t == Token::Point)
        .filter(|p| {
            tokens[..*p]
                .iter()
                .any(|t| matches!(t, Token::Date('s', _) | Token::Elapsed('s', _)))
        })
        .map_or(0, |p| {
            tokens[p + 1..]
                .iter()
                .take_while(|t| **t == Token::Digit('0'))
                .count()
                .min(3)
        });

    let total_ms = if subsecond_digits > 0 {
        let unit = 10f64.powi(3 - subsecond_digits as i32);
        ((value * 86_400_000.0 / unit).round() * unit) as i64
    } else {
        (value * 86_400.0).round() as i64 * 1000
    };
    let days = total_ms.div_euclid(86_400_000);
    let ms_of_day = total_ms.rem_euclid(86_400_000);
    let hour = (ms_of_day / 3_600_000) as u32;
    let minute = (ms_of_day / 60_000 % 60) as u32;
    let second = (ms_of_day / 1000 % 60) as u32;
    let millis = (ms_of_day % 1000) as u32;

    let Some(date) = date_parts(days, date1904) else {
        return format_general(value);
    };
    let twelve_hour = tokens.iter().any(|t| matches!(t, Token::AmPm | Token::AP));
    let display_hour = if twelve_hour {
        match hour % 12 {
            0 => 12,
            h => h,
        }
    } else {
        hour
    };
    let month_name = MONTHS
        .get(date.month.saturating_sub(1) as usize)
        .copied()
        .unwrap_or_default();
    let weekday_name = WEEKDAYS
        .get(date.weekday as usize)
        .copied()
        .unwrap_or_default();

    let mut out = String::new();
    let mut i = 0;
    while let Some(token) = tokens.get(i) {
        match token {
            Token::Date('y', n) if *n <= 2 => {
                out.push_str(&format!("{:02}", date.year.rem_euclid(100)))
            }
            Token::Date('y', _) => out.push_str(&format!("{:04}", date.year)),
            Token::Date('m', n) if *n <= 2 && is_minute(tokens, i) => {
                out.push_str(&pad(minute as u64, *n))
            }
            Token::Date('m', n) => match n {
                1 | 2 => out.push_str(&pad(date.month as u64, *n)),
                3 => out.push_str(month_name.get(..3).unwrap_or(month_name)),
                5 => out.push_str(month_name.get(..1).unwrap_or(month_name)),
                _ => out.push_str(month_name),
            },
            Token::Date('d', n) => match n {
                1 | 2 => out.push_str(&pad(date.day as u64, *n)),
                3 => out.push_str(weekday_name.get(..3).unwrap_or(weekday_name)),
                _ => out.push_str(weekday_name),
            },
            Token::Date('h', n) => out.push_str(&pad(display_hour as u64, *n)),
            Token::Date('s', n) => out.push_str(&pad(second as u64, *n)),
            Token::Date(other, n) => out.extend(std::iter::repeat(*other).take(*n)),
            Token::AmPm => out.push_str(if hour < 12 { "AM" } else { "PM" }),
            Token::AP => out.push(if hour < 12 { 'A' } else { 'P' }),
            Token::Elapsed(unit, n) => {
                let total_seconds = total_ms.div_euclid(1000) as u64;
                let amount = match unit {
                    'h' => total_seconds / 3600,
                    'm' => total_seconds / 60,
                    _ => total_seconds,
                };
                out.push_str(&pad(amount, *n));
            }
            Token::Point if subsecond_digits > 0 => {
                out.push('.');
                out.push_str(&format!("{millis:03}")[..subsecond_digits]);
                i += subsecond_digits;
            }
            Token::Point => out.push('.'),
            Token::Literal(s) => out.push_str(s),
            Token::Digit(c) => out.push(*c),
            Token::Comma => out.push(','),
            Token::Percent => out.push('%'),
            Token::Slash => out.push('/'),
            Token::Exponent { plus } => out.push_str(if *plus { "E+" } else { "E-" }),
            Token::Text | Token::General => {}
        }
        i += 1;
    }
    out
}

fn pad(value: u64, width: usize) -> String {
    format!("{value:0width$}")
}
