/// Base character to shifted character for every non-letter key on the layout.
pub const SHIFT_PAIRS: &[(char, char)] = &[
    ('`', '~'),
    ('1', '!'),
    ('2', '@'),
    ('3', '#'),
    ('4', '$'),
    ('5', '%'),
    ('6', '^'),
    ('7', '&'),
    ('8', '*'),
    ('9', '('),
    ('0', ')'),
    ('-', '_'),
    ('=', '+'),
    ('[', '{'),
    (']', '}'),
    ('\\', '|'),
    (';', ':'),
    ('\'', '"'),
    (',', '<'),
    ('.', '>'),
    ('/', '?'),
];

/// Character produced by `ch` while Shift or Caps Lock is active.
///
/// Punctuation and digits go through [`SHIFT_PAIRS`], lowercase ASCII letters
/// are uppercased and everything else passes through unchanged.
pub fn shifted_char(ch: char) -> char {
    if let Some(&(_, shifted)) = SHIFT_PAIRS.iter().find(|(base, _)| *base == ch) {
        return shifted;
    }
    if ch.is_ascii_lowercase() {
        return ch.to_ascii_uppercase();
    }
    ch
}
