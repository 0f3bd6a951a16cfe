//! User-facing terminal output. Colors are enabled only when stdout is a TTY.

use owo_colors::OwoColorize;
use std::io::{self, BufRead, Write};

fn is_tty() -> bool {
    atty::is(atty::Stream::Stdout)
}

/// True when both stdin and stdout are terminals, so questions can be asked.
pub fn is_interactive() -> bool {
    atty::is(atty::Stream::Stdin) && is_tty()
}

pub fn print_info(msg: &str) {
    if is_tty() {
        println!("{} {}", "info:".cyan().bold(), msg);
    } else {
        println!("info: {}", msg);
    }
}

pub fn print_warn(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "warn:".yellow().bold(), msg);
    } else {
        eprintln!("warn: {}", msg);
    }
}

pub fn print_error(msg: &str) {
    if is_tty() {
        eprintln!("{} {}", "error:".red().bold(), msg);
    } else {
        eprintln!("error: {}", msg);
    }
}

pub fn print_success(msg: &str) {
    if is_tty() {
        println!("{} {}", "ok:".green().bold(), msg);
    } else {
        println!("ok: {}", msg);
    }
}

/// Plain line without prefix, for rows users may script against.
pub fn print_user(msg: &str) {
    println!("{}", msg);
}

/// Ask a yes/no question on stdin; anything but y/yes is "no".
pub fn confirm(question: &str) -> io::Result<bool> {
    let mut stdout = io::stdout();
    if is_tty() {
        write!(stdout, "{} {} [y/N] ", "?".magenta().bold(), question)?;
    } else {
        write!(stdout, "? {} [y/N] ", question)?;
    }
    stdout.flush()?;
    let mut line = String::new();
    io::stdin().lock().read_line(&mut line)?;
    Ok(parse_answer(&line))
}

fn parse_answer(line: &str) -> bool {
    matches!(line.trim().to_ascii_lowercase().as_str(), "y" | "yes")
}

#[cfg(test)]
mod tests {
    use super::parse_answer;

    #[test]
    fn only_yes_confirms() {
        assert!(parse_answer("y\n"));
        assert!(parse_answer(" YES "));
        assert!(!parse_answer(""));
        assert!(!parse_answer("no"));
        assert!(!parse_answer("yep"));
    }
}
