use crate::model::Grade;

/// Extract a grade from a normalized product name.
///
/// Pattern families, first hit wins:
/// - elementary: 小N, 小学N年, N年生 (N in 1..=6)
/// - middle: 中N, 中学N年 (N in 1..=3)
/// - high school: 高校, 高N (N in 1..=3), 高等学校
///
/// Digits may still appear full-width when callers bypass normalization,
/// so both forms are accepted.
pub fn extract_grade(name: &str) -> Option<Grade> {
    let chars: Vec<char> = name.chars().collect();

    if let Some(n) = find_prefix_digit(&chars, &['小'], 6) {
        return Some(Grade::Elementary(n));
    }
    if let Some(n) = find_prefix_digit_suffix(&chars, &['小', '学'], 6, &['年']) {
        return Some(Grade::Elementary(n));
    }
    if let Some(n) = find_digit_suffix(&chars, 6, &['年', '生']) {
        return Some(Grade::Elementary(n));
    }

    if let Some(n) = find_prefix_digit(&chars, &['中'], 3) {
        return Some(Grade::Middle(n));
    }
    if let Some(n) = find_prefix_digit_suffix(&chars, &['中', '学'], 3, &['年']) {
        return Some(Grade::Middle(n));
    }

    if name.contains("高校")
        || name.contains("高等学校")
        || find_prefix_digit(&chars, &['高'], 3).is_some()
    {
        return Some(Grade::HighSchool);
    }

    None
}

fn digit_value(c: char, max: u8) -> Option<u8> {
    let n = match c {
        '1'..='9' => c as u8 - b'0',
        '１'..='９' => (c as u32 - '１' as u32 + 1) as u8,
        _ => return None,
    };
    (1..=max).contains(&n).then_some(n)
}

fn skip_whitespace(chars: &[char], mut i: usize) -> usize {
    while chars.get(i).is_some_and(|c| c.is_whitespace()) {
        i += 1;
    }
    i
}

fn starts_with_at(chars: &[char], start: usize, needle: &[char]) -> bool {
    needle
        .iter()
        .enumerate()
        .all(|(k, c)| chars.get(start + k) == Some(c))
}

/// `prefix`, optional whitespace, digit in 1..=max — anywhere in the string.
fn find_prefix_digit(chars: &[char], prefix: &[char], max: u8) -> Option<u8> {
    for start in 0..chars.len() {
        if !starts_with_at(chars, start, prefix) {
            continue;
        }
        let i = skip_whitespace(chars, start + prefix.len());
        if let Some(n) = chars.get(i).and_then(|&c| digit_value(c, max)) {
            return Some(n);
        }
    }
    None
}

/// `prefix`, ws, digit in 1..=max, ws, `suffix` — anywhere in the string.
fn find_prefix_digit_suffix(chars: &[char], prefix: &[char], max: u8, suffix: &[char]) -> Option<u8> {
    for start in 0..chars.len() {
        if !starts_with_at(chars, start, prefix) {
            continue;
        }
        let i = skip_whitespace(chars, start + prefix.len());
        let Some(n) = chars.get(i).and_then(|&c| digit_value(c, max)) else {
            continue;
        };
        let j = skip_whitespace(chars, i + 1);
        if starts_with_at(chars, j, suffix) {
            return Some(n);
        }
    }
    None
}

/// Digit in 1..=max, ws, `suffix` — anywhere in the string.
fn find_digit_suffix(chars: &[char], max: u8, suffix: &[char]) -> Option<u8> {
    for (start, &c) in chars.iter().enumerate() {
        let Some(n) = digit_value(c, max) else {
            continue;
        };
        let i = skip_whitespace(chars, start + 1);
        if starts_with_at(chars, i, suffix) {
            return Some(n);
        }
    }
    None
}
