/// Modal dialogue state. While a line is open, scene movement is frozen and
/// the interact key advances (here: closes) the box instead of retargeting.
#[derive(Debug, Default)]
pub struct DialogueBox {
    line: Option<String>,
}

impl DialogueBox {
    pub fn start(&mut self, text: impl Into<String>) {
        self.line = Some(text.into());
    }

    pub fn is_open(&self) -> bool {
        self.line.is_some()
    }

    pub fn current_line(&self) -> Option<&str> {
        self.line.as_deref()
    }

    /// Advance past the current line. No-op when nothing is open.
    pub fn advance(&mut self) {
        self.line = None;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn starting_replaces_the_open_line() {
        let mut dialogue = DialogueBox::default();
        assert!(!dialogue.is_open());

        dialogue.start("First.");
        dialogue.start("Second.");
        assert_eq!(dialogue.current_line(), Some("Second."));

        dialogue.advance();
        assert!(!dialogue.is_open());
        assert_eq!(dialogue.current_line(), None);

        // Advancing a closed box stays closed.
        dialogue.advance();
        assert!(!dialogue.is_open());
    }
}
