pub mod content;
pub mod document;
pub mod quiz_question;
pub mod topic;
pub mod understanding;

pub use content::{ContentMain, ContentSub, StudyContent};
pub use document::{
    DocumentKind, IncomingDocument, RemoteFile, RemoteFileError, SearchHit, UploadStatus,
    UploadedFileDetail, VectorStoreFile,
};
pub use quiz_question::{ChoiceLabel, Quiz, QuizQuestion};
pub use topic::{Topic, TopicOutline};
pub use understanding::{QuizAnswer, QuizSubmission, UnderstandingScore};
