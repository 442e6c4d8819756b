// Presentation: stateless rendering plus the terminal observer used by the CLI.

pub mod render;
pub mod terminal;

pub use terminal::TerminalObserver;
