//! Porter suffix stemmer for lowercase English words.
//!
//! Words that are shorter than three letters or contain anything other than
//! ASCII lowercase letters are returned as-is.

fn is_consonant(w: &[u8], i: usize) -> bool {
    match w[i] {
        b'a' | b'e' | b'i' | b'o' | b'u' => false,
        b'y' => i == 0 || !is_consonant(w, i - 1),
        _ => true,
    }
}

/// Number of vowel-consonant sequences in `stem`.
fn measure(stem: &[u8]) -> usize {
    let len = stem.len();
    let mut i = 0;
    let mut m = 0;
    while i < len && is_consonant(stem, i) {
        i += 1;
    }
    loop {
        while i < len && !is_consonant(stem, i) {
            i += 1;
        }
        if i >= len {
            return m;
        }
        while i < len && is_consonant(stem, i) {
            i += 1;
        }
        m += 1;
    }
}

fn has_vowel(stem: &[u8]) -> bool {
    (0..stem.len()).any(|i| !is_consonant(stem, i))
}

fn ends_double_consonant(w: &[u8]) -> bool {
    let len = w.len();
    len >= 2 && w[len - 1] == w[len - 2] && is_consonant(w, len - 1)
}

/// consonant-vowel-consonant, where the last consonant is not w, x or y.
fn ends_cvc(w: &[u8]) -> bool {
    let len = w.len();
    len >= 3
        && is_consonant(w, len - 3)
        && !is_consonant(w, len - 2)
        && is_consonant(w, len - 1)
        && !matches!(w[len - 1], b'w' | b'x' | b'y')
}

/// Applies the first rule whose suffix matches. Later rules are not tried
/// even if the condition on the matching rule fails.
fn apply_rules(w: &mut Vec<u8>, rules: &[(&str, &str)], cond: impl Fn(&[u8], &str) -> bool) {
    for (suffix, replacement) in rules {
        if w.ends_with(suffix.as_bytes()) {
            let stem_len = w.len() - suffix.len();
            if cond(&w[..stem_len], suffix) {
                w.truncate(stem_len);
                w.extend_from_slice(replacement.as_bytes());
            }
            return;
        }
    }
}

fn step_1a(w: &mut Vec<u8>) {
    if w.ends_with(b"sses") || w.ends_with(b"ies") {
        w.truncate(w.len() - 2);
    } else if w.ends_with(b"s") && !w.ends_with(b"ss") {
        w.pop();
    }
}

fn step_1b(w: &mut Vec<u8>) {
    if w.ends_with(b"eed") {
        if measure(&w[..w.len() - 3]) > 0 {
            w.pop();
        }
        return;
    }
    let removed = if w.ends_with(b"ed") && has_vowel(&w[..w.len() - 2]) {
        w.truncate(w.len() - 2);
        true
    } else if w.ends_with(b"ing") && has_vowel(&w[..w.len() - 3]) {
        w.truncate(w.len() - 3);
        true
    } else {
        false
    };
    if !removed {
        return;
    }
    if w.ends_with(b"at") || w.ends_with(b"bl") || w.ends_with(b"iz") {
        w.push(b'e');
    } else if ends_double_consonant(w) && !matches!(w[w.len() - 1], b'l' | b's' | b'z') {
        w.pop();
    } else if measure(w) == 1 && ends_cvc(w) {
        w.push(b'e');
    }
}

fn step_1c(w: &mut [u8]) {
    let len = w.len();
    if w.ends_with(b"y") && has_vowel(&w[..len - 1]) {
        w[len - 1] = b'i';
    }
}

const STEP_2: &[(&str, &str)] = &[
    ("ational", "ate"),
    ("tional", "tion"),
    ("enci", "ence"),
    ("anci", "ance"),
    ("izer", "ize"),
    ("bli", "ble"),
    ("alli", "al"),
    ("entli", "ent"),
    ("eli", "e"),
    ("ousli", "ous"),
    ("ization", "ize"),
    ("ation", "ate"),
    ("ator", "ate"),
    ("alism", "al"),
    ("iveness", "ive"),
    ("fulness", "ful"),
    ("ousness", "ous"),
    ("aliti", "al"),
    ("iviti", "ive"),
    ("biliti", "ble"),
    ("logi", "log"),
];

const STEP_3: &[(&str, &str)] = &[
    ("icate", "ic"),
    ("ative", ""),
    ("alize", "al"),
    ("iciti", "ic"),
    ("ical", "ic"),
    ("ful", ""),
    ("ness", ""),
];

const STEP_4: &[(&str, &str)] = &[
    ("al", ""),
    ("ance", ""),
    ("ence", ""),
    ("er", ""),
    ("ic", ""),
    ("able", ""),
    ("ible", ""),
    ("ant", ""),
    ("ement", ""),
    ("ment", ""),
    ("ent", ""),
    ("ion", ""),
    ("ou", ""),
    ("ism", ""),
    ("ate", ""),
    ("iti", ""),
    ("ous", ""),
    ("ive", ""),
    ("ize", ""),
];

fn step_5(w: &mut Vec<u8>) {
    if w.ends_with(b"e") {
        let stem = &w[..w.len() - 1];
        let m = measure(stem);
        if m > 1 || (m == 1 && !ends_cvc(stem)) {
            w.pop();
        }
    }
    if measure(w) > 1 && ends_double_consonant(w) && w.ends_with(b"l") {
        w.pop();
    }
}

pub fn stem(word: &str) -> String {
    if word.len() < 3 || !word.bytes().all(|b| b.is_ascii_lowercase()) {
        return word.to_string();
    }
    let mut w = word.as_bytes().to_vec();
    step_1a(&mut w);
    step_1b(&mut w);
    step_1c(&mut w);
    apply_rules(&mut w, STEP_2, |stem, _| measure(stem) > 0);
    apply_rules(&mut w, STEP_3, |stem, _| measure(stem) > 0);
    apply_rules(&mut w, STEP_4, |stem, suffix| {
        measure(stem) > 1 && (suffix != "ion" || matches!(stem.last(), Some(b's' | b't')))
    });
    step_5(&mut w);
    // Only ASCII bytes were ever pushed.
    String::from_utf8(w).unwrap_or_else(|_| word.to_string())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_measure() {
        assert_eq!(measure(b"tr"), 0);
        assert_eq!(measure(b"tree"), 0);
        assert_eq!(measure(b"trouble"), 1);
        assert_eq!(measure(b"oats"), 1);
        assert_eq!(measure(b"troubles"), 2);
        assert_eq!(measure(b"private"), 2);
    }

    #[test]
    fn test_plurals_and_participles() {
        assert_eq!(stem("caresses"), "caress");
        assert_eq!(stem("ponies"), "poni");
        assert_eq!(stem("cats"), "cat");
        assert_eq!(stem("agreed"), "agre");
        assert_eq!(stem("hopping"), "hop");
        assert_eq!(stem("filing"), "file");
        assert_eq!(stem("conflated"), "conflat");
    }

    #[test]
    fn test_inflections_share_a_stem() {
        assert_eq!(stem("loved"), stem("love"));
        assert_eq!(stem("loving"), stem("love"));
        assert_eq!(stem("hated"), stem("hate"));
        assert_eq!(stem("terribly"), stem("terrible"));
        assert_eq!(stem("happiness"), stem("happy"));
    }

    #[test]
    fn test_derivational_suffixes() {
        assert_eq!(stem("relational"), "relat");
        assert_eq!(stem("hopefulness"), "hope");
        assert_eq!(stem("adjustment"), "adjust");
        assert_eq!(stem("adoption"), "adopt");
    }

    #[test]
    fn test_untouched_words() {
        assert_eq!(stem("is"), "is");
        assert_eq!(stem("Good"), "Good");
        assert_eq!(stem("naïve"), "naïve");
        assert_eq!(stem("x42"), "x42");
    }
}
