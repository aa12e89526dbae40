//! Single-field rules. Each returns the user-facing message when the value is invalid.

use crate::models::OptionRecord;

pub const NAME_TOO_SHORT: &str = "Name must be at least 3 characters long.";
pub const NAME_HAS_DIGITS: &str = "Name should not contain numbers.";
pub const NAME_INVALID_CHARS: &str = "Name should not contain numbers or special characters.";
pub const EMAIL_INVALID: &str = "Invalid email format.";
pub const PASSWORD_WEAK: &str =
    "Password min length 6, must contain one 1 uppercase letter and 1 number.";
pub const PASSWORD_MISMATCH: &str = "Passwords do not match.";
pub const SKILLS_REQUIRED: &str = "Please select at least one skill.";
pub const COMPANY_TOO_SHORT: &str = "Company name must be at least 2 characters long.";
pub const COMPANY_HAS_DIGITS: &str = "Company name should not contain numbers.";
pub const LOCATION_TOO_SHORT: &str = "Location must be at least 2 characters long.";
pub const LOCATION_NUMERIC: &str = "Location should not be numeric only.";
pub const POSITION_TOO_SHORT: &str = "Position must be at least 2 characters long.";
pub const PHONE_INVALID: &str = "Phone number must be 10 digits.";
pub const QUALIFICATION_REQUIRED: &str = "Please select a qualification.";
pub const RESUME_LINK_INVALID: &str = "Resume link must be a valid URL.";

const PASSWORD_SPECIALS: &[char] = &['@', '$', '!', '%', '*', '?', '&'];
const PASSWORD_MIN_LEN: usize = 6;
const PHONE_DIGITS: usize = 10;

fn char_len(s: &str) -> usize {
    s.chars().count()
}

fn has_ascii_digit(s: &str) -> bool {
    s.chars().any(|c| c.is_ascii_digit())
}

/// Candidate names: at least 3 characters and no digits.
pub fn candidate_name(name: &str) -> Option<&'static str> {
    if char_len(name) < 3 {
        Some(NAME_TOO_SHORT)
    } else if has_ascii_digit(name) {
        Some(NAME_HAS_DIGITS)
    } else {
        None
    }
}

/// Recruiter names: at least 3 characters, ASCII letters and whitespace only.
pub fn recruiter_name(name: &str) -> Option<&'static str> {
    if char_len(name) < 3 {
        Some(NAME_TOO_SHORT)
    } else if !name
        .chars()
        .all(|c| c.is_ascii_alphabetic() || c.is_whitespace())
    {
        Some(NAME_INVALID_CHARS)
    } else {
        None
    }
}

/// `local@domain.tld`: no whitespace, exactly one `@`, and a dot inside the domain
/// with at least one character on each side.
pub fn email(email: &str) -> Option<&'static str> {
    let well_formed = !email.chars().any(char::is_whitespace)
        && email.split_once('@').is_some_and(|(local, domain)| {
            !local.is_empty() && !domain.contains('@') && has_inner_dot(domain)
        });

    (!well_formed).then_some(EMAIL_INVALID)
}

fn has_inner_dot(domain: &str) -> bool {
    domain
        .char_indices()
        .any(|(i, c)| c == '.' && i > 0 && i + 1 < domain.len())
}

pub fn password(password: &str) -> Option<&'static str> {
    let allowed = password
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || PASSWORD_SPECIALS.contains(&c));
    let strong = allowed
        && char_len(password) >= PASSWORD_MIN_LEN
        && password.chars().any(|c| c.is_ascii_uppercase())
        && has_ascii_digit(password);

    (!strong).then_some(PASSWORD_WEAK)
}

pub fn confirm_password(password: &str, confirm: &str) -> Option<&'static str> {
    (password != confirm).then_some(PASSWORD_MISMATCH)
}

pub fn skills(selected: &[OptionRecord]) -> Option<&'static str> {
    selected.is_empty().then_some(SKILLS_REQUIRED)
}

pub fn company(company: &str) -> Option<&'static str> {
    if char_len(company) < 2 {
        Some(COMPANY_TOO_SHORT)
    } else if has_ascii_digit(company) {
        Some(COMPANY_HAS_DIGITS)
    } else {
        None
    }
}

/// Word characters and whitespace only, and not made purely of digits.
pub fn location(location: &str) -> Option<&'static str> {
    if char_len(location) < 2 {
        return Some(LOCATION_TOO_SHORT);
    }

    let word_chars = location
        .chars()
        .all(|c| c.is_ascii_alphanumeric() || c == '_' || c.is_whitespace());
    let numeric_only = location.chars().all(|c| c.is_ascii_digit());

    (!word_chars || numeric_only).then_some(LOCATION_NUMERIC)
}

pub fn position(position: &str) -> Option<&'static str> {
    (char_len(position) < 2).then_some(POSITION_TOO_SHORT)
}

pub fn phone(phone: &str) -> Option<&'static str> {
    let valid = phone.len() == PHONE_DIGITS && phone.chars().all(|c| c.is_ascii_digit());
    (!valid).then_some(PHONE_INVALID)
}

pub fn qualification(selected: Option<&OptionRecord>) -> Option<&'static str> {
    selected
        .map_or(true, |o| o.value.trim().is_empty())
        .then_some(QUALIFICATION_REQUIRED)
}

/// An absolute http(s) URL with a non-empty host.
pub fn resume_link(link: &str) -> Option<&'static str> {
    let rest = link
        .strip_prefix("https://")
        .or_else(|| link.strip_prefix("http://"));

    let valid = !link.chars().any(char::is_whitespace)
        && rest.is_some_and(|rest| {
            let host = rest.split(['/', '?', '#']).next().unwrap_or_default();
            !host.is_empty()
        });

    (!valid).then_some(RESUME_LINK_INVALID)
}
