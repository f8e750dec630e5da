#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Lesson {
    pub title: &'static str,
    /// Keys the lesson practices, space separated.
    pub keys: &'static str,
    pub practice_text: &'static str,
}

impl Lesson {
    /// Keys highlighted on the keyboard while the lesson is active.
    pub fn key_names(&self) -> impl Iterator<Item = &'static str> {
        self.keys.split_whitespace()
    }
}

pub const LESSONS: &[Lesson] = &[
    Lesson {
        title: "Home Row",
        keys: "a s d f j k l ;",
        practice_text: "asdf jkl; sad lad fall flask; ask a lass; dad falls",
    },
    Lesson {
        title: "Top Row",
        keys: "q w e r t y u i o p",
        practice_text: "type your quiet power tower; we wrote pretty poetry",
    },
    Lesson {
        title: "Bottom Row",
        keys: "z x c v b n m , . /",
        practice_text: "zinc box, calm van. numb mix, brave comb.",
    },
    Lesson {
        title: "Numbers",
        keys: "1 2 3 4 5 6 7 8 9 0",
        practice_text: "10 29 38 47 56 1024 2048 4096 365 7 days",
    },
    Lesson {
        title: "Punctuation",
        keys: "` - = [ ] \\ ; ' , . /",
        practice_text: "don't stop; [ok] a-b=c, x/y. it's `code`",
    },
    Lesson {
        title: "Capitals",
        keys: "Shift Caps",
        practice_text: "Alice And Bob Meet At NOON In PARIS",
    },
    Lesson {
        title: "Sentences",
        keys: "Space Enter",
        practice_text: "The quick brown fox jumps over the lazy dog.",
    },
];

pub fn lesson(index: usize) -> Option<&'static Lesson> {
    LESSONS.get(index)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::keyboard::grid::{GridSettings, KeyGrid};

    #[test]
    fn test_catalog_order_is_stable() {
        assert_eq!(LESSONS[0].title, "Home Row");
        assert_eq!(lesson(LESSONS.len() - 1).unwrap().title, "Sentences");
        assert!(lesson(LESSONS.len()).is_none());
    }

    #[test]
    fn test_every_lesson_key_exists_on_the_keyboard() {
        let grid = KeyGrid::new(1024, GridSettings::default());
        for lesson in LESSONS {
            for key in lesson.key_names() {
                assert!(
                    !grid.find(key).is_empty(),
                    "lesson {:?} key {key:?} not on keyboard",
                    lesson.title
                );
            }
        }
    }

    #[test]
    fn test_practice_text_nonempty() {
        assert!(LESSONS.iter().all(|l| !l.practice_text.is_empty()));
    }
}
