//! Line-oriented prompts for the interactive demos

use std::io::{self, BufRead, Stdout, Write};

/// True when `line` asks to leave the loop
pub fn is_exit(line: &str) -> bool {
    line.trim().eq_ignore_ascii_case("exit")
}

/// Prompts on `output`, reads answers from `input`
pub struct Prompter<R, W> {
    input: R,
    output: W,
}

impl Prompter<io::StdinLock<'static>, Stdout> {
    /// Prompter on the process's stdin/stdout
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompter<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    /// Print `prompt` and read one trimmed line; `None` at end of input
    pub fn read_line(&mut self, prompt: &str) -> io::Result<Option<String>> {
        write!(self.output, "{prompt}")?;
        self.output.flush()?;

        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            writeln!(self.output)?;
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    /// Next non-blank query; `None` on `exit` (any case) or end of input
    pub fn next_query(&mut self, prompt: &str) -> io::Result<Option<String>> {
        loop {
            match self.read_line(prompt)? {
                None => return Ok(None),
                Some(line) if is_exit(&line) => return Ok(None),
                Some(line) if line.is_empty() => {}
                Some(line) => return Ok(Some(line)),
            }
        }
    }

    pub fn println(&mut self, text: &str) -> io::Result<()> {
        writeln!(self.output, "{text}")
    }

    pub fn output(&self) -> &W {
        &self.output
    }
}
