//! Colored output helpers for the CLI.

use owo_colors::OwoColorize;

/// Output style configuration.
pub struct Output {
    colored: bool,
}

impl Output {
    pub fn new(colored: bool) -> Self {
        Self { colored }
    }

    /// Print a success message with a checkmark.
    pub fn success(&self, message: &str) {
        if self.colored {
            println!("{} {}", "✓".green().bold(), message.green());
        } else {
            println!("[OK] {}", message);
        }
    }

    /// Print an info message.
    pub fn info(&self, message: &str) {
        if self.colored {
            println!("{} {}", "•".blue(), message);
        } else {
            println!("[INFO] {}", message);
        }
    }

    /// Print an error message to stderr.
    pub fn error(&self, message: &str) {
        if self.colored {
            eprintln!("{} {}", "✗".red().bold(), message.red());
        } else {
            eprintln!("[ERROR] {}", message);
        }
    }

    /// Print a model answer.
    pub fn answer(&self, text: &str) {
        if self.colored {
            println!("\n{}\n{}", "Answer:".bright_white().bold(), text);
        } else {
            println!("\nAnswer:\n{}", text);
        }
    }

    /// Print one retrieved chunk with its score.
    pub fn chunk(&self, rank: usize, score: f32, source: &str, text: &str) {
        if self.colored {
            println!(
                "{} {} {}",
                format!("[{}]", rank).dimmed(),
                format!("score {:.3}", score).dimmed(),
                source.cyan()
            );
        } else {
            println!("[{}] score {:.3} {}", rank, score, source);
        }
        println!("{}\n", text);
    }

    /// Print the user input prompt (no trailing newline).
    pub fn prompt(&self, label: &str) {
        use std::io::Write;
        if self.colored {
            print!("{} ", label.bright_white().bold());
        } else {
            print!("{} ", label);
        }
        let _ = std::io::stdout().flush();
    }
}
