/// Logical cursor and lazily-discovered file size
///
/// The cursor is set by seeks and advanced by reads; it is allowed to point
/// past the end of the file. The size stays unknown until the descriptor is
/// first acquired (stat) or a physical read comes back short.
#[derive(Debug, Default)]
pub(crate) struct Position {
    cursor: u64,
    size: Option<u64>,
}

impl Position {
    pub fn new() -> Self {
        Self::default()
    }

    /// Current read offset
    pub fn tell(&self) -> u64 {
        self.cursor
    }

    /// Advance the cursor by the number of bytes actually read
    pub fn advance(&mut self, n: u64) {
        self.cursor += n;
    }

    /// Absolute seek, unclamped
    pub fn seek_to(&mut self, offset: u64) {
        self.cursor = offset;
    }

    /// Seek counting back from the last byte of the file
    ///
    /// `back == 0` lands on the final byte. Requires the size to be known;
    /// saturates at offset 0 for empty files.
    pub fn seek_back_from_end(&mut self, back: u64) {
        if let Some(size) = self.size {
            self.cursor = size.saturating_sub(back + 1);
        }
    }

    pub fn size(&self) -> Option<u64> {
        self.size
    }

    pub fn set_size(&mut self, size: u64) {
        self.size = Some(size);
    }

    /// Whether the cursor sits at or past the end of file
    ///
    /// Undecidable while the size is unknown; treated as false until then.
    pub fn is_eof(&self) -> bool {
        self.size.is_some_and(|size| self.cursor >= size)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cursor_moves() {
        let mut pos = Position::new();
        assert_eq!(pos.tell(), 0);
        pos.seek_to(7);
        assert_eq!(pos.tell(), 7);
        pos.advance(3);
        assert_eq!(pos.tell(), 10);
    }

    #[test]
    fn eof_unknown_until_sized() {
        let mut pos = Position::new();
        pos.seek_to(999);
        assert!(!pos.is_eof());
        pos.set_size(20);
        assert!(pos.is_eof());
        pos.seek_to(19);
        assert!(!pos.is_eof());
        pos.seek_to(20);
        assert!(pos.is_eof());
    }

    #[test]
    fn from_end_lands_on_last_byte() {
        let mut pos = Position::new();
        pos.set_size(20);
        pos.seek_back_from_end(0);
        assert_eq!(pos.tell(), 19);
        pos.seek_back_from_end(5);
        assert_eq!(pos.tell(), 14);
    }

    #[test]
    fn from_end_saturates_on_empty_file() {
        let mut pos = Position::new();
        pos.set_size(0);
        pos.seek_back_from_end(0);
        assert_eq!(pos.tell(), 0);
        pos.seek_back_from_end(100);
        assert_eq!(pos.tell(), 0);
    }
}
