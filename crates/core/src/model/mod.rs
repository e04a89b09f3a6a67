mod ids;
mod question;
mod source;
mod summary;
mod topic;

pub use ids::{ParseIdError, TopicId};
pub use question::{MIN_ANSWERS, Question, QuestionError};
pub use source::{DEFAULT_SOURCE_URL, SourceUrl, SourceUrlError};
pub use summary::{ScoreBand, ScoreSummary};
pub use topic::{Topic, TopicError, TopicList};
