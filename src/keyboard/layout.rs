use serde::{Deserialize, Serialize};

/// Viewport width thresholds, in pixels, separating the layout tiers.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Breakpoints {
    pub mobile: u32,
    pub small: u32,
    pub tiny: u32,
}

impl Default for Breakpoints {
    fn default() -> Self {
        Self {
            mobile: 768,
            small: 480,
            tiny: 360,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum LayoutTier {
    Desktop,     // wider than the mobile breakpoint
    Mobile,      // <= mobile
    SmallMobile, // <= small
    Tiny,        // <= tiny
}

impl LayoutTier {
    pub fn from_width(width: u32, breakpoints: &Breakpoints) -> Self {
        if width <= breakpoints.tiny {
            LayoutTier::Tiny
        } else if width <= breakpoints.small {
            LayoutTier::SmallMobile
        } else if width <= breakpoints.mobile {
            LayoutTier::Mobile
        } else {
            LayoutTier::Desktop
        }
    }

    pub fn is_small(self) -> bool {
        matches!(self, LayoutTier::SmallMobile | LayoutTier::Tiny)
    }

    pub fn as_str(self) -> &'static str {
        match self {
            LayoutTier::Desktop => "desktop",
            LayoutTier::Mobile => "mobile",
            LayoutTier::SmallMobile => "small",
            LayoutTier::Tiny => "tiny",
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum KeyClass {
    Character,
    Function,
    Modifier,
    Space,
}

/// How many grid columns a key occupies at a given tier.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum SpanRule {
    Fixed(u16),
    /// `normal` columns, collapsing to `small` on small screens.
    Wide { normal: u16, small: u16 },
    /// The space bar shrinks in two steps.
    Space,
}

impl SpanRule {
    pub fn resolve(self, tier: LayoutTier) -> u16 {
        match self {
            SpanRule::Fixed(n) => n,
            SpanRule::Wide { normal, small } => {
                if tier.is_small() {
                    small
                } else {
                    normal
                }
            }
            SpanRule::Space => match tier {
                LayoutTier::Tiny => 2,
                LayoutTier::SmallMobile => 3,
                LayoutTier::Mobile | LayoutTier::Desktop => 6,
            },
        }
    }
}

/// One physical key: what it types, how it is drawn and how wide it is.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct KeyDefinition {
    /// Key name routed to the input handler when the key is clicked.
    pub key: &'static str,
    pub shifted: Option<char>,
    pub class: KeyClass,
    pub span: SpanRule,
    /// Label shown instead of `key`.
    pub display: Option<&'static str>,
}

impl KeyDefinition {
    const fn letter(key: &'static str) -> Self {
        Self {
            key,
            shifted: None,
            class: KeyClass::Character,
            span: SpanRule::Fixed(1),
            display: None,
        }
    }

    const fn symbol(key: &'static str, shifted: char) -> Self {
        Self {
            key,
            shifted: Some(shifted),
            class: KeyClass::Character,
            span: SpanRule::Fixed(1),
            display: None,
        }
    }

    const fn special(key: &'static str, class: KeyClass, span: SpanRule) -> Self {
        Self {
            key,
            shifted: None,
            class,
            span,
            display: None,
        }
    }

    pub fn label(&self) -> &'static str {
        self.display.unwrap_or(self.key)
    }
}

const WIDE: SpanRule = SpanRule::Wide {
    normal: 2,
    small: 1,
};

const SHIFT_RIGHT: SpanRule = SpanRule::Wide {
    normal: 3,
    small: 1,
};

const SPACE_BAR: KeyDefinition = KeyDefinition {
    key: " ",
    shifted: None,
    class: KeyClass::Space,
    span: SpanRule::Space,
    display: Some("Space"),
};

pub const QWERTY: &[&[KeyDefinition]] = &[
    &[
        KeyDefinition::symbol("`", '~'),
        KeyDefinition::symbol("1", '!'),
        KeyDefinition::symbol("2", '@'),
        KeyDefinition::symbol("3", '#'),
        KeyDefinition::symbol("4", '$'),
        KeyDefinition::symbol("5", '%'),
        KeyDefinition::symbol("6", '^'),
        KeyDefinition::symbol("7", '&'),
        KeyDefinition::symbol("8", '*'),
        KeyDefinition::symbol("9", '('),
        KeyDefinition::symbol("0", ')'),
        KeyDefinition::symbol("-", '_'),
        KeyDefinition::symbol("=", '+'),
        KeyDefinition::special("Backspace", KeyClass::Function, WIDE),
    ],
    &[
        KeyDefinition::special("Tab", KeyClass::Modifier, WIDE),
        KeyDefinition::letter("q"),
        KeyDefinition::letter("w"),
        KeyDefinition::letter("e"),
        KeyDefinition::letter("r"),
        KeyDefinition::letter("t"),
        KeyDefinition::letter("y"),
        KeyDefinition::letter("u"),
        KeyDefinition::letter("i"),
        KeyDefinition::letter("o"),
        KeyDefinition::letter("p"),
        KeyDefinition::symbol("[", '{'),
        KeyDefinition::symbol("]", '}'),
        KeyDefinition::symbol("\\", '|'),
    ],
    &[
        KeyDefinition::special("Caps", KeyClass::Modifier, WIDE),
        KeyDefinition::letter("a"),
        KeyDefinition::letter("s"),
        KeyDefinition::letter("d"),
        KeyDefinition::letter("f"),
        KeyDefinition::letter("g"),
        KeyDefinition::letter("h"),
        KeyDefinition::letter("j"),
        KeyDefinition::letter("k"),
        KeyDefinition::letter("l"),
        KeyDefinition::symbol(";", ':'),
        KeyDefinition::symbol("'", '"'),
        KeyDefinition::special("Enter", KeyClass::Function, WIDE),
    ],
    &[
        KeyDefinition::special("Shift", KeyClass::Modifier, WIDE),
        KeyDefinition::letter("z"),
        KeyDefinition::letter("x"),
        KeyDefinition::letter("c"),
        KeyDefinition::letter("v"),
        KeyDefinition::letter("b"),
        KeyDefinition::letter("n"),
        KeyDefinition::letter("m"),
        KeyDefinition::symbol(",", '<'),
        KeyDefinition::symbol(".", '>'),
        KeyDefinition::symbol("/", '?'),
        KeyDefinition::special("Shift", KeyClass::Modifier, SHIFT_RIGHT),
    ],
    &[
        KeyDefinition::special("Ctrl", KeyClass::Modifier, WIDE),
        KeyDefinition::special("Alt", KeyClass::Modifier, SpanRule::Fixed(1)),
        SPACE_BAR,
        KeyDefinition::special("Alt", KeyClass::Modifier, SpanRule::Fixed(1)),
        KeyDefinition::special("Ctrl", KeyClass::Modifier, WIDE),
    ],
];

/// Total column span of each row at `tier`.
pub fn row_spans(tier: LayoutTier) -> Vec<u16> {
    QWERTY
        .iter()
        .map(|row| row.iter().map(|k| k.span.resolve(tier)).sum())
        .collect()
}
