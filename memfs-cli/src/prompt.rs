use std::io::{self, BufRead, StdinLock, Stdout, Write};
use std::path::Path;

use memfs::Confirm;

/// 交互式的覆盖确认：反复询问直到得到 `Y/y/N/n`，输入结束视为拒绝
pub struct Prompt<R, W> {
    input: R,
    output: W,
}

impl Prompt<StdinLock<'static>, Stdout> {
    pub fn stdio() -> Self {
        Self::new(io::stdin().lock(), io::stdout())
    }
}

impl<R: BufRead, W: Write> Prompt<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    pub fn into_inner(self) -> (R, W) {
        (self.input, self.output)
    }
}

impl<R: BufRead, W: Write> Confirm for Prompt<R, W> {
    fn confirm_overwrite(&mut self, path: &Path) -> io::Result<bool> {
        write!(
            self.output,
            "File exists, do you want to overwrite {} (Y/N)? ",
            path.display()
        )?;
        self.output.flush()?;

        let mut line = String::new();
        loop {
            line.clear();
            if self.input.read_line(&mut line)? == 0 {
                return Ok(false);
            }
            for answer in line.chars().filter(|c| !c.is_whitespace()) {
                match answer {
                    'Y' | 'y' => return Ok(true),
                    'N' | 'n' => return Ok(false),
                    _ => {}
                }
            }
        }
    }
}
