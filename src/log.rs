use colored::Colorize;

/// Console tag printed in front of every log line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Tag {
    State,
    Print,
    Config,
    Screen,
    Thread,
    Warn,
    Error,
}

pub const STATE: Tag = Tag::State;
pub const PRINT: Tag = Tag::Print;
pub const CONFIG: Tag = Tag::Config;
pub const SCREEN: Tag = Tag::Screen;
pub const THREAD: Tag = Tag::Thread;
pub const WARN: Tag = Tag::Warn;
pub const ERROR: Tag = Tag::Error;

impl std::fmt::Display for Tag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let tag = match self {
            Tag::State => "[STATE ]".cyan(),
            Tag::Print => "[PRINT ]".green(),
            Tag::Config => "[CONFIG]".blue(),
            Tag::Screen => "[SCREEN]".magenta(),
            Tag::Thread => "[THREAD]".white().dimmed(),
            Tag::Warn => "[WARN  ]".yellow().bold(),
            Tag::Error => "[ERROR ]".red().bold(),
        };
        write!(f, "{}", tag)
    }
}
