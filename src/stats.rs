/// Typing accuracy as a whole percentage, floored. With no keystrokes yet
/// there is nothing to hold against the user, so accuracy starts at 100.
pub fn accuracy(correct: usize, keystrokes: usize) -> u32 {
    if keystrokes == 0 {
        return 100;
    }
    (correct as f64 / keystrokes as f64 * 100.0).floor() as u32
}

/// Words per minute using the standard 5-characters-per-word convention,
/// floored. Zero until any time has elapsed.
pub fn wpm(correct: usize, elapsed_ms: u64) -> u32 {
    let elapsed_minutes = elapsed_ms as f64 / 60_000.0;
    if elapsed_minutes <= 0.0 {
        return 0;
    }
    ((correct as f64 / 5.0) / elapsed_minutes).floor() as u32
}

/// "M:SS" display form: minutes unpadded, seconds zero-padded.
pub fn format_time(elapsed_ms: u64) -> String {
    let minutes = elapsed_ms / 60_000;
    let seconds = (elapsed_ms % 60_000) / 1_000;
    format!("{}:{:02}", minutes, seconds)
}

/// Frozen end-of-test numbers for the results card.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Summary {
    pub wpm: u32,
    pub accuracy: u32,
    pub elapsed_ms: u64,
    pub keystrokes: usize,
    pub correct: usize,
}
