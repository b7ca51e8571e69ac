mod category;
pub mod dice;
mod ids;
mod progress;
mod question;

pub use ids::{CATEGORY_COUNT, CategoryIndex, OPTION_COUNT, OptionIndex, ParseIndexError};

pub use category::{Accent, Category, CategoryCatalog, CategoryError};
pub use dice::{DiceFace, Orientation};
pub use progress::CompletionSet;
pub use question::{AnswerOption, Outcome, Question, QuestionError};
