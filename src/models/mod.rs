pub mod question;
pub mod session;

pub use question::{QuestionRecord, QuestionSet};
pub use session::{AnswerSelection, SessionMeta};
