use super::EffectError;
use std::time::Duration;

pub const GLOW_CLASS: &str = "glow-text";

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct TypingOptions {
    pub type_speed: Duration,
    pub start_delay: Duration,
    pub cursor: char,
}

impl Default for TypingOptions {
    fn default() -> Self {
        Self {
            type_speed: Duration::from_millis(100),
            start_delay: Duration::from_millis(500),
            cursor: '|',
        }
    }
}

/// Types each string of the script one character per tick, erasing it before
/// moving to the next. The last string stays on screen.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Typewriter {
    script: Vec<Vec<char>>,
    options: TypingOptions,
    current: usize,
    shown: usize,
    erasing: bool,
}

impl Typewriter {
    pub fn new<I, S>(script: I, options: TypingOptions) -> Result<Self, EffectError>
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        let script: Vec<Vec<char>> = script
            .into_iter()
            .map(|line| line.as_ref().chars().collect::<Vec<char>>())
            .filter(|line| !line.is_empty())
            .collect();

        if script.is_empty() {
            return Err(EffectError::EmptyScript);
        }

        Ok(Self {
            script,
            options,
            current: 0,
            shown: 0,
            erasing: false,
        })
    }

    pub fn options(&self) -> TypingOptions {
        self.options
    }

    pub fn text(&self) -> String {
        self.script[self.current][..self.shown].iter().collect()
    }

    pub fn is_complete(&self) -> bool {
        self.current + 1 == self.script.len()
            && self.shown == self.script[self.current].len()
            && !self.erasing
    }

    /// Advances one character. Returns `false` once the script is done.
    pub fn tick(&mut self) -> bool {
        if self.is_complete() {
            return false;
        }

        let line_len = self.script[self.current].len();
        if self.erasing {
            if self.shown > 0 {
                self.shown -= 1;
            } else {
                self.erasing = false;
                self.current += 1;
            }
        } else if self.shown < line_len {
            self.shown += 1;
        } else {
            self.erasing = true;
        }

        !self.is_complete()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn run(typewriter: &mut Typewriter) -> Vec<String> {
        let mut frames = Vec::new();
        loop {
            let running = typewriter.tick();
            frames.push(typewriter.text());
            if !running {
                break;
            }
        }
        frames
    }

    #[test]
    fn single_line_types_one_character_per_tick() {
        let mut typewriter = Typewriter::new(["Ada"], TypingOptions::default())
            .expect("script is not empty");

        assert_eq!(run(&mut typewriter), vec!["A", "Ad", "Ada"]);
        assert!(typewriter.is_complete());
        assert!(!typewriter.tick());
    }

    #[test]
    fn earlier_lines_are_erased_before_the_next() {
        let mut typewriter = Typewriter::new(["Hi", "Yo"], TypingOptions::default())
            .expect("script is not empty");

        let frames = run(&mut typewriter);

        assert_eq!(frames, vec!["H", "Hi", "Hi", "H", "", "", "Y", "Yo"]);
        assert_eq!(typewriter.text(), "Yo");
    }

    #[test]
    fn empty_script_is_rejected() {
        assert_eq!(
            Typewriter::new(["", ""], TypingOptions::default()),
            Err(EffectError::EmptyScript)
        );
    }

    #[test]
    fn default_timing_matches_the_hero_effect() {
        let options = TypingOptions::default();

        assert_eq!(options.type_speed, Duration::from_millis(100));
        assert_eq!(options.start_delay, Duration::from_millis(500));
        assert_eq!(options.cursor, '|');
    }
}
