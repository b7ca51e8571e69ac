use std::fmt;
use std::sync::Arc;

use rand::SeedableRng;
use rand::rngs::StdRng;
use tracing::{debug, info, warn};

use storage::repository::QuestionBank;
use trivia_core::model::{CategoryCatalog, CategoryIndex, Outcome, Question};

use crate::error::{GameError, TrackerError};
use crate::events::{EventBus, GameEvent, GameObserver};
use crate::progress::ProgressView;
use crate::sessions::{QuestionSession, Submission};
use crate::tracker::{CategoryTracker, Completion, Pick};

/// Tunables for a game.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct GameConfig {
    /// Fixed RNG seed for reproducible rolls; `None` seeds from the OS.
    pub seed: Option<u64>,
}

impl GameConfig {
    #[must_use]
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.seed = Some(seed);
        self
    }
}

/// Coarse state for presenters deciding which screen to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GamePhase {
    AwaitingRoll,
    Selected(CategoryIndex),
    Answering(CategoryIndex),
    Answered {
        category: CategoryIndex,
        outcome: Outcome,
    },
    Won,
}

/// Owns game progress and the current question, and publishes events.
///
/// Flow: `roll` → `open_question` → `answer` → `finish_question`, repeated
/// until `roll` returns `Pick::Won`; `restart` starts over.
pub struct GameService {
    catalog: CategoryCatalog,
    bank: Arc<dyn QuestionBank>,
    tracker: CategoryTracker,
    rng: StdRng,
    selected: Option<CategoryIndex>,
    active: Option<QuestionSession>,
    events: EventBus,
}

impl GameService {
    #[must_use]
    pub fn new(catalog: CategoryCatalog, bank: Arc<dyn QuestionBank>, config: GameConfig) -> Self {
        let rng = config
            .seed
            .map_or_else(StdRng::from_os_rng, StdRng::seed_from_u64);
        Self {
            catalog,
            bank,
            tracker: CategoryTracker::new(),
            rng,
            selected: None,
            active: None,
            events: EventBus::new(),
        }
    }

    pub fn subscribe(&mut self, observer: impl GameObserver + 'static) {
        self.events.subscribe(observer);
    }

    #[must_use]
    pub fn catalog(&self) -> &CategoryCatalog {
        &self.catalog
    }

    #[must_use]
    pub fn tracker(&self) -> &CategoryTracker {
        &self.tracker
    }

    #[must_use]
    pub fn selected(&self) -> Option<CategoryIndex> {
        self.selected
    }

    #[must_use]
    pub fn active_question(&self) -> Option<&Question> {
        self.active.as_ref().map(QuestionSession::question)
    }

    #[must_use]
    pub fn is_won(&self) -> bool {
        self.tracker.is_won()
    }

    #[must_use]
    pub fn progress(&self) -> ProgressView {
        self.tracker.progress(&self.catalog)
    }

    #[must_use]
    pub fn phase(&self) -> GamePhase {
        if let Some(session) = &self.active {
            return match session.outcome() {
                None => GamePhase::Answering(session.category()),
                Some(outcome) => GamePhase::Answered {
                    category: session.category(),
                    outcome,
                },
            };
        }
        if self.tracker.is_won() {
            return GamePhase::Won;
        }
        match self.selected {
            Some(category) => GamePhase::Selected(category),
            None => GamePhase::AwaitingRoll,
        }
    }

    /// Roll for a new category.
    ///
    /// An answered question left open is discarded first.
    ///
    /// # Errors
    ///
    /// Returns `GameError::QuestionInProgress` while a question awaits its answer.
    pub fn roll(&mut self) -> Result<Pick, GameError> {
        if self.active.as_ref().is_some_and(|s| !s.is_answered()) {
            warn!("roll requested while a question is open");
            return Err(GameError::QuestionInProgress);
        }
        self.active = None;

        let pick = self.tracker.pick_category(&mut self.rng);
        match pick {
            Pick::Category(category) => {
                self.selected = Some(category);
                self.events.publish(GameEvent::CategorySelected(category));
            }
            Pick::Won => {
                self.selected = None;
                debug!("roll requested after the game was won");
            }
        }
        Ok(pick)
    }

    /// Open the question for the selected category.
    ///
    /// Calling it again while the question is unanswered returns the same question.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NothingSelected` before a roll, and
    /// `GameError::NoQuestionAvailable` when the bank has nothing for the category.
    pub fn open_question(&mut self) -> Result<&Question, GameError> {
        let category = self.selected.ok_or(GameError::NothingSelected)?;

        let reuse = self
            .active
            .as_ref()
            .is_some_and(|s| s.category() == category && !s.is_answered());
        if !reuse {
            let session = QuestionSession::load(category, self.bank.as_ref())?;
            self.active = Some(session);
        }

        self.active
            .as_ref()
            .map(QuestionSession::question)
            .ok_or(GameError::NoActiveQuestion)
    }

    /// Answer the open question with option `choice` (0..4).
    ///
    /// A repeat answer returns `Submission::Ignored` and publishes nothing.
    /// The first answer consumes the selection, so `open_question` then
    /// reports `NothingSelected` until the next roll.
    ///
    /// # Errors
    ///
    /// Returns `GameError::NoActiveQuestion` without an open question and
    /// `GameError::InvalidArgument` for an out-of-range option.
    pub fn answer(&mut self, choice: usize) -> Result<Submission, GameError> {
        let session = self.active.as_mut().ok_or(GameError::NoActiveQuestion)?;
        let submission = session.submit_raw(choice)?;
        if submission.is_ignored() {
            return Ok(submission);
        }

        let category = session.category();
        // Every further attempt has to go through `roll`.
        self.selected = None;
        self.events.publish(GameEvent::AnswerEvaluated {
            category,
            outcome: submission.outcome(),
        });
        if let Some(done) = submission.completed_category() {
            self.record_completion(done);
        }
        Ok(submission)
    }

    /// Mark a category as answered correctly without going through a question.
    ///
    /// # Errors
    ///
    /// Returns `GameError::InvalidArgument` if `raw` is not a valid category index.
    pub fn mark_completed(&mut self, raw: usize) -> Result<Completion, GameError> {
        let category = CategoryIndex::try_from(raw).map_err(TrackerError::from)?;
        Ok(self.record_completion(category))
    }

    /// Close the current question and clear the selection.
    ///
    /// Returns the outcome if the question had been answered.
    pub fn finish_question(&mut self) -> Option<Outcome> {
        self.selected = None;
        let session = self.active.take()?;
        if !session.is_answered() {
            debug!(category = %session.category(), "question abandoned");
        }
        session.outcome()
    }

    /// Clear all progress and start a new game.
    pub fn restart(&mut self) {
        self.tracker.reset();
        self.selected = None;
        self.active = None;
        info!("game restarted");
        self.events.publish(GameEvent::GameReset);
    }

    fn record_completion(&mut self, category: CategoryIndex) -> Completion {
        let completion = self.tracker.mark_completed(category);
        if completion.newly_completed {
            self.events.publish(GameEvent::CategoryCompleted(category));
        }
        if completion.won_now {
            info!("all categories completed");
            self.events.publish(GameEvent::GameWon);
        }
        completion
    }
}

impl fmt::Debug for GameService {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("GameService")
            .field("completed", &self.tracker.completed())
            .field("selected", &self.selected)
            .field("active", &self.active)
            .field("observers", &self.events.len())
            .finish_non_exhaustive()
    }
}

//
// ─── TESTS ─────────────────────────────────────────────────────────────────────
//

#[cfg(test)]
mod tests {
    use super::*;
    use crate::events::EventLog;
    use storage::repository::InMemoryQuestionBank;
    use trivia_core::model::{AnswerOption, OptionIndex};

    // Option 0 is always the correct one.
    fn full_bank() -> Arc<dyn QuestionBank> {
        let entries = CategoryIndex::all().map(|category| {
            let question = Question::new(
                format!("Question for {category}"),
                vec![
                    AnswerOption::correct("right"),
                    AnswerOption::wrong("wrong 1"),
                    AnswerOption::wrong("wrong 2"),
                    AnswerOption::wrong("wrong 3"),
                ],
            )
            .unwrap();
            (category, question)
        });
        Arc::new(InMemoryQuestionBank::from_entries(entries))
    }

    fn build_game() -> (GameService, EventLog) {
        let mut game = GameService::new(
            CategoryCatalog::classic(),
            full_bank(),
            GameConfig::default().with_seed(42),
        );
        let log = EventLog::new();
        game.subscribe(log.clone());
        (game, log)
    }

    #[test]
    fn roll_selects_and_publishes() {
        let (mut game, log) = build_game();
        assert_eq!(game.phase(), GamePhase::AwaitingRoll);

        let category = game.roll().unwrap().category().unwrap();
        assert_eq!(game.selected(), Some(category));
        assert_eq!(game.phase(), GamePhase::Selected(category));
        assert_eq!(log.events(), vec![GameEvent::CategorySelected(category)]);
    }

    #[test]
    fn open_question_requires_a_roll() {
        let (mut game, _log) = build_game();
        assert!(matches!(game.open_question(), Err(GameError::NothingSelected)));
        assert!(matches!(game.answer(0), Err(GameError::NoActiveQuestion)));
    }

    #[test]
    fn correct_answer_completes_category() {
        let (mut game, log) = build_game();
        let category = game.roll().unwrap().category().unwrap();
        game.open_question().unwrap();

        let submission = game.answer(0).unwrap();
        assert_eq!(submission.outcome(), Outcome::Correct);
        assert!(game.tracker().is_completed(category));
        assert_eq!(
            game.phase(),
            GamePhase::Answered {
                category,
                outcome: Outcome::Correct
            }
        );
        assert_eq!(
            log.events(),
            vec![
                GameEvent::CategorySelected(category),
                GameEvent::AnswerEvaluated {
                    category,
                    outcome: Outcome::Correct
                },
                GameEvent::CategoryCompleted(category),
            ]
        );

        assert_eq!(game.finish_question(), Some(Outcome::Correct));
        assert_eq!(game.phase(), GamePhase::AwaitingRoll);
    }

    #[test]
    fn wrong_answer_leaves_category_open() {
        let (mut game, log) = build_game();
        let category = game.roll().unwrap().category().unwrap();
        game.open_question().unwrap();
        log.drain();

        assert_eq!(game.answer(3).unwrap().outcome(), Outcome::Incorrect);
        assert!(!game.tracker().is_completed(category));
        assert_eq!(
            log.events(),
            vec![GameEvent::AnswerEvaluated {
                category,
                outcome: Outcome::Incorrect
            }]
        );
    }

    #[test]
    fn answered_question_cannot_be_reopened_without_a_roll() {
        let (mut game, _log) = build_game();
        let category = game.roll().unwrap().category().unwrap();
        game.open_question().unwrap();
        game.answer(0).unwrap();

        assert_eq!(game.selected(), None);
        assert!(matches!(game.open_question(), Err(GameError::NothingSelected)));
        assert_eq!(
            game.phase(),
            GamePhase::Answered {
                category,
                outcome: Outcome::Correct
            }
        );

        assert_eq!(game.finish_question(), Some(Outcome::Correct));
        let next = game.roll().unwrap().category().unwrap();
        assert_ne!(next, category);
        assert!(game.open_question().is_ok());
    }

    #[test]
    fn repeat_answer_publishes_nothing() {
        let (mut game, log) = build_game();
        game.roll().unwrap();
        game.open_question().unwrap();
        game.answer(0).unwrap();
        log.drain();

        let repeat = game.answer(2).unwrap();
        assert!(repeat.is_ignored());
        assert_eq!(repeat.outcome(), Outcome::Correct);
        assert!(log.events().is_empty());
    }

    #[test]
    fn out_of_range_answer_is_invalid_argument() {
        let (mut game, _log) = build_game();
        game.roll().unwrap();
        game.open_question().unwrap();
        let err = game.answer(4).unwrap_err();
        assert!(matches!(err, GameError::InvalidArgument(ref e) if e.is_invalid_argument()));
        assert!(matches!(game.phase(), GamePhase::Answering(_)));
    }

    #[test]
    fn roll_is_rejected_while_question_unanswered() {
        let (mut game, _log) = build_game();
        game.roll().unwrap();
        game.open_question().unwrap();
        assert!(matches!(game.roll(), Err(GameError::QuestionInProgress)));

        game.answer(1).unwrap();
        assert!(game.roll().is_ok());
    }

    #[test]
    fn missing_question_is_reported() {
        let mut game = GameService::new(
            CategoryCatalog::classic(),
            Arc::new(InMemoryQuestionBank::new()),
            GameConfig::default().with_seed(1),
        );
        let category = game.roll().unwrap().category().unwrap();
        match game.open_question() {
            Err(GameError::NoQuestionAvailable { category: c, .. }) => assert_eq!(c, category),
            other => panic!("unexpected result: {other:?}"),
        }
        assert_eq!(game.phase(), GamePhase::Selected(category));
    }

    #[test]
    fn playing_every_category_wins_once() {
        let (mut game, log) = build_game();
        for _ in 0..6 {
            game.roll().unwrap();
            game.open_question().unwrap();
            game.answer(0).unwrap();
            game.finish_question();
        }
        assert!(game.is_won());
        assert_eq!(game.phase(), GamePhase::Won);
        assert_eq!(game.roll().unwrap(), Pick::Won);
        assert_eq!(log.count(&GameEvent::GameWon), 1);
        assert_eq!(log.events().last(), Some(&GameEvent::GameWon));
    }

    #[test]
    fn restart_clears_progress_and_publishes() {
        let (mut game, log) = build_game();
        game.mark_completed(2).unwrap();
        game.roll().unwrap();
        game.restart();

        assert!(!game.is_won());
        assert_eq!(game.progress().completed, 0);
        assert_eq!(game.phase(), GamePhase::AwaitingRoll);
        assert_eq!(log.events().last(), Some(&GameEvent::GameReset));
    }

    #[test]
    fn same_seed_rolls_the_same_category() {
        let (mut a, _) = build_game();
        let (mut b, _) = build_game();
        assert_eq!(a.roll().unwrap(), b.roll().unwrap());
    }

    #[test]
    fn reopening_unanswered_question_keeps_it() {
        let bank = InMemoryQuestionBank::from_entries(CategoryIndex::all().flat_map(|c| {
            ["first", "second"].map(|prompt| {
                let question = Question::new(
                    prompt,
                    OptionIndex::all()
                        .map(|i| AnswerOption::new(format!("{i}"), i.value() == 0))
                        .collect(),
                )
                .unwrap();
                (c, question)
            })
        }));
        let mut game = GameService::new(
            CategoryCatalog::classic(),
            Arc::new(bank),
            GameConfig::default().with_seed(5),
        );
        game.roll().unwrap();
        let first = game.open_question().unwrap().prompt().to_owned();
        let again = game.open_question().unwrap().prompt().to_owned();
        assert_eq!(first, again);
    }
}
