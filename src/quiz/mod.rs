mod scheduler;
mod session;

pub use session::{Effect, Notice, Phase, QuizSession, Route, SessionSettings};
