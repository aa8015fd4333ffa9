/// The visible game log: an ordered sequence of text lines. The
/// presentation layer renders these verbatim. Cleared and re-stamped at
/// the start of every round, mirroring a per-round log panel.
#[derive(Debug, Clone, Default)]
pub struct GameLog {
    lines: Vec<String>,
}

impl GameLog {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn append(&mut self, line: impl Into<String>) {
        self.lines.push(line.into());
    }

    pub fn extend(&mut self, lines: Vec<String>) {
        self.lines.extend(lines);
    }

    /// Clears the previous round's lines and stamps the new round number.
    pub fn begin_round(&mut self, round: u32) {
        self.lines.clear();
        self.lines.push(format!("Round {round}"));
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }
}
