/// A coordinate in the input.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct InputCoord {
    /// The character index, starting at 0 and increasing with each character read.
    pub pos: usize,
    /// The line number, starting at 1.
    pub line: usize,
    /// The column number, starting at 1, resetting to 1 when `line` increases.
    pub col: usize,
}

impl InputCoord {
    pub fn new() -> Self {
        Self { pos: 0, line: 1, col: 1 }
    }

    pub fn newline(&mut self) {
        self.pos += 1;
        self.line += 1;
        self.col = 1;
    }

    pub fn advance(&mut self) {
        self.pos += 1;
        self.col += 1;
    }
}

/// A range of [`InputCoord`]s.
#[derive(PartialEq, Eq, Clone, Copy, Debug)]
pub struct InputRange {
    pub from: InputCoord,
    pub to: InputCoord,
}
