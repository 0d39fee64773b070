use std::collections::HashSet;
use std::time::SystemTime;

use crate::layout::{self, KeyLayout};
use crate::runtime::{Key, KeyInput};
use crate::stats::{self, Summary};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Status {
    Idle,
    Active,
    Complete,
}

/// Display classification of one target-text position.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum CharClass {
    Unseen,
    Current,
    Correct,
    Incorrect,
    /// Initially wrong, fixed via backspace, now correct.
    Corrected,
}

/// One attempt at typing the target text.
///
/// Owns the current scrambled layout and the undo stack of layouts so
/// backspace can restore exactly the arrangement the user saw for the
/// character being un-typed. Counters only ever increase; backspace is
/// cosmetic bookkeeping, never an eraser for mistakes already made.
#[derive(Debug)]
pub struct Session {
    text: Vec<char>,
    cursor: usize,
    typed: Vec<Option<char>>,
    corrected: HashSet<usize>,
    keystrokes: usize,
    correct: usize,
    layout: KeyLayout,
    layout_history: Vec<KeyLayout>,
    started_at: Option<SystemTime>,
    elapsed_ms: u64,
    status: Status,
    shift_held: bool,
    last_physical: Option<char>,
    wpm: u32,
    accuracy: u32,
}

impl Session {
    pub fn new(text: &str) -> Self {
        let text: Vec<char> = text.chars().collect();
        let len = text.len();
        Self {
            text,
            cursor: 0,
            typed: vec![None; len],
            corrected: HashSet::new(),
            keystrokes: 0,
            correct: 0,
            layout: KeyLayout::qwerty(),
            layout_history: Vec::new(),
            started_at: None,
            elapsed_ms: 0,
            status: Status::Idle,
            shift_held: false,
            last_physical: None,
            wpm: 0,
            accuracy: 100,
        }
    }

    /// Back to Idle: clears all derived state and restores the reference
    /// layout. The target text is kept.
    pub fn reset(&mut self) {
        let len = self.text.len();
        self.cursor = 0;
        self.typed = vec![None; len];
        self.corrected.clear();
        self.keystrokes = 0;
        self.correct = 0;
        self.layout = KeyLayout::qwerty();
        self.layout_history.clear();
        self.started_at = None;
        self.elapsed_ms = 0;
        self.status = Status::Idle;
        self.shift_held = false;
        self.last_physical = None;
        self.wpm = 0;
        self.accuracy = 100;
    }

    pub fn status(&self) -> Status {
        self.status
    }

    pub fn has_started(&self) -> bool {
        self.status != Status::Idle
    }

    pub fn has_finished(&self) -> bool {
        self.status == Status::Complete
    }

    pub fn text(&self) -> &[char] {
        &self.text
    }

    pub fn cursor(&self) -> usize {
        self.cursor
    }

    pub fn keystrokes(&self) -> usize {
        self.keystrokes
    }

    pub fn correct(&self) -> usize {
        self.correct
    }

    pub fn layout(&self) -> &KeyLayout {
        &self.layout
    }

    pub fn elapsed_ms(&self) -> u64 {
        self.elapsed_ms
    }

    pub fn wpm(&self) -> u32 {
        self.wpm
    }

    pub fn accuracy(&self) -> u32 {
        self.accuracy
    }

    /// Physical key last pressed, for the keyboard diagram.
    pub fn last_physical_key(&self) -> Option<char> {
        self.last_physical
    }

    /// Physical key that currently carries the next expected character in
    /// the scrambled layout. None at completion or for non-letter targets.
    pub fn next_physical_key(&self) -> Option<char> {
        let expected = self.text.get(self.cursor)?;
        layout::physical_key_for(*expected, &self.layout)
    }

    pub fn summary(&self) -> Summary {
        Summary {
            wpm: self.wpm,
            accuracy: self.accuracy,
            elapsed_ms: self.elapsed_ms,
            keystrokes: self.keystrokes,
            correct: self.correct,
        }
    }

    /// Display class for one position of the target text.
    pub fn char_class(&self, idx: usize) -> CharClass {
        if idx == self.cursor && self.status != Status::Complete {
            return CharClass::Current;
        }
        if idx >= self.cursor {
            return CharClass::Unseen;
        }
        match self.typed.get(idx).copied().flatten() {
            Some(c) if c == self.text[idx] && self.corrected.contains(&idx) => {
                CharClass::Corrected
            }
            Some(c) if c == self.text[idx] => CharClass::Correct,
            _ => CharClass::Incorrect,
        }
    }

    /// Route one decoded key event through the state machine.
    pub fn handle(&mut self, input: KeyInput) {
        if input.released {
            self.key_up(input);
        } else {
            self.key_down(input);
        }
    }

    fn key_up(&mut self, input: KeyInput) {
        if input.key == Key::Shift || !input.shift {
            self.shift_held = false;
        }
    }

    fn key_down(&mut self, input: KeyInput) {
        if input.key == Key::Shift {
            self.shift_held = true;
            return;
        }
        // Plain terminals only deliver key-down events, so the modifier
        // bit on each of them is the authoritative shift state. Release
        // events (enhanced terminals) are handled in key_up.
        self.shift_held = input.shift;

        match input.key {
            Key::Letter(c) | Key::Punct(c) => self.type_char(c),
            Key::Space => self.type_char(' '),
            Key::Backspace => self.backspace(),
            Key::Shift | Key::Other => {}
        }
    }

    /// Process one character-class keystroke: map the physical key through
    /// the current scrambled layout, record and score it, advance the
    /// cursor, then push the layout onto the undo stack and scramble.
    ///
    /// The cursor always advances, correct or not; mistakes are fixed via
    /// backspace. Control keys never reach this path.
    pub fn type_char(&mut self, physical: char) {
        if self.status == Status::Complete || self.cursor >= self.text.len() {
            return;
        }
        if self.status == Status::Idle {
            self.start();
        }

        let expected = self.text[self.cursor];
        let virtual_char = layout::map_physical_to_virtual(physical, &self.layout, self.shift_held);
        self.last_physical = Some(physical);

        self.typed[self.cursor] = Some(virtual_char);
        self.keystrokes += 1;
        if virtual_char == expected {
            self.correct += 1;
        }
        self.cursor += 1;

        self.refresh_elapsed();
        self.recompute_stats();

        if self.cursor == self.text.len() {
            // Counters and elapsed time freeze at their final values.
            self.status = Status::Complete;
            return;
        }

        self.layout_history.push(self.layout.clone());
        self.layout = self.layout.scrambled(&mut rand::thread_rng());
    }

    /// Undo one position: step the cursor back, flag a wrong entry as
    /// corrected for display, and pop the layout that was current when
    /// that character was typed. Counters are untouched.
    pub fn backspace(&mut self) {
        if self.status != Status::Active || self.cursor == 0 {
            return;
        }
        self.cursor -= 1;

        if self.typed[self.cursor] != Some(self.text[self.cursor]) {
            self.corrected.insert(self.cursor);
        }

        // An empty history means the layout of that keystroke is already
        // displayed; skip the restore and keep cursor/typed updates.
        if let Some(previous) = self.layout_history.pop() {
            self.layout = previous;
        }
    }

    /// Explicit start; also driven implicitly by the first keystroke.
    pub fn start(&mut self) {
        if self.status == Status::Idle {
            self.started_at = Some(SystemTime::now());
            self.status = Status::Active;
        }
    }

    /// Periodic tick keeping elapsed time and wpm live between
    /// keystrokes. Self-cancels outside Active.
    pub fn on_tick(&mut self) {
        if self.status != Status::Active {
            return;
        }
        self.refresh_elapsed();
        self.recompute_stats();
    }

    fn refresh_elapsed(&mut self) {
        if let Some(started_at) = self.started_at {
            self.elapsed_ms = started_at
                .elapsed()
                .map(|d| d.as_millis() as u64)
                .unwrap_or(self.elapsed_ms);
        }
    }

    fn recompute_stats(&mut self) {
        self.accuracy = stats::accuracy(self.correct, self.keystrokes);
        self.wpm = stats::wpm(self.correct, self.elapsed_ms);
    }
}
