//! Indentation-aware text writer.

use crate::frontend::java::view::Snippet;

/// Accumulates lines at the current indentation level.
///
/// Braces go on their own line. Blank lines never carry indentation.
pub struct IndentWriter {
    buf: String,
    level: usize,
    width: usize,
}

impl IndentWriter {
    pub fn new(width: usize) -> Self {
        Self {
            buf: String::new(),
            level: 0,
            width,
        }
    }

    pub fn line(&mut self, text: &str) {
        if text.is_empty() {
            self.blank();
            return;
        }
        for _ in 0..self.level * self.width {
            self.buf.push(' ');
        }
        self.buf.push_str(text);
        self.buf.push('\n');
    }

    pub fn blank(&mut self) {
        self.buf.push('\n');
    }

    /// Writes `{` and indents.
    pub fn open(&mut self) {
        self.line("{");
        self.level += 1;
    }

    /// Dedents and writes `}`.
    pub fn close(&mut self) {
        self.level = self.level.saturating_sub(1);
        self.line("}");
    }

    /// A header line followed by an indented block.
    pub fn block(&mut self, header: &str, body: impl FnOnce(&mut Self)) {
        self.line(header);
        self.open();
        body(self);
        self.close();
    }

    /// Writes source taken from an existing file at the current level.
    pub fn snippet(&mut self, snippet: &Snippet) {
        for line in snippet.dedented_lines() {
            self.line(line.trim_end());
        }
    }

    pub fn finish(self) -> String {
        self.buf
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn allman_blocks_with_configured_width() {
        let mut w = IndentWriter::new(2);
        w.block("public class A", |w| {
            w.block("private void run()", |w| w.line("go();"));
        });

        assert_eq!(
            w.finish(),
            "public class A\n{\n  private void run()\n  {\n    go();\n  }\n}\n"
        );
    }

    #[test]
    fn blank_lines_have_no_trailing_whitespace() {
        let mut w = IndentWriter::new(4);
        w.open();
        w.line("a();");
        w.blank();
        w.line("");
        w.close();

        assert_eq!(w.finish(), "{\n    a();\n\n\n}\n");
    }

    #[test]
    fn snippets_are_reindented() {
        let snippet = Snippet {
            text: "private int x()\n        {\n          return 1;\n        }".to_string(),
            column: 8,
        };
        let mut w = IndentWriter::new(2);
        w.open();
        w.snippet(&snippet);
        w.close();

        assert_eq!(w.finish(), "{\n  private int x()\n  {\n    return 1;\n  }\n}\n");
    }
}
