//! Line-based presenter: renders game state and feeds player input back in.

use std::io::{self, BufRead, Write};

use services::{EventLog, GameError, GameEvent, GameService, Pick, ProgressView};
use trivia_core::model::{Accent, DiceFace, OptionIndex, Outcome, Question};

pub struct Terminal<R, W> {
    input: R,
    output: W,
}

fn accent_label(accent: Accent) -> &'static str {
    match accent {
        Accent::Blue => "blue",
        Accent::Purple => "purple",
        Accent::Yellow => "yellow",
        Accent::Pink => "pink",
        Accent::Green => "green",
        Accent::Orange => "orange",
    }
}

impl<R: BufRead, W: Write> Terminal<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self { input, output }
    }

    #[cfg(test)]
    pub fn into_output(self) -> W {
        self.output
    }

    /// Returns `None` at end of input.
    fn read_line(&mut self) -> io::Result<Option<String>> {
        let mut line = String::new();
        if self.input.read_line(&mut line)? == 0 {
            return Ok(None);
        }
        Ok(Some(line.trim().to_string()))
    }

    fn render_progress(&mut self, progress: &ProgressView) -> io::Result<()> {
        writeln!(self.output)?;
        for slot in &progress.slots {
            let mark = if slot.completed { "*" } else { " " };
            writeln!(
                self.output,
                "  [{mark}] {} {} ({})",
                slot.face,
                slot.name,
                accent_label(slot.accent)
            )?;
        }
        writeln!(
            self.output,
            "  {}/{} categories completed",
            progress.completed, progress.total
        )
    }

    fn render_question(&mut self, question: &Question) -> io::Result<()> {
        writeln!(self.output, "\n{}", question.prompt())?;
        for index in OptionIndex::all() {
            writeln!(
                self.output,
                "  {}) {}",
                index.value() + 1,
                question.option_text(index)
            )?;
        }
        Ok(())
    }

    fn render_events(&mut self, game: &GameService, log: &EventLog) -> io::Result<()> {
        for event in log.drain() {
            match event {
                GameEvent::AnswerEvaluated { outcome, .. } => match outcome {
                    Outcome::Correct => writeln!(self.output, "Correct!")?,
                    Outcome::Incorrect => writeln!(self.output, "Wrong answer.")?,
                },
                GameEvent::CategoryCompleted(category) => writeln!(
                    self.output,
                    "You earned the {} star.",
                    game.catalog().get(category).name()
                )?,
                GameEvent::GameWon => writeln!(self.output, "\n*** YOU WON ***")?,
                GameEvent::CategorySelected(_) | GameEvent::GameReset => {}
            }
        }
        Ok(())
    }

    /// Reads a choice 1-4 until a valid one arrives. `None` at end of input.
    fn read_choice(&mut self) -> io::Result<Option<usize>> {
        loop {
            write!(self.output, "Your answer (1-4): ")?;
            self.output.flush()?;
            let Some(line) = self.read_line()? else {
                return Ok(None);
            };
            match line.parse::<usize>() {
                Ok(n @ 1..=4) => return Ok(Some(n - 1)),
                _ => writeln!(self.output, "Please type a number from 1 to 4.")?,
            }
        }
    }

    /// Asks whether to play again. True on "y"/"yes".
    fn play_again(&mut self) -> io::Result<bool> {
        write!(self.output, "Play again? [y/N] ")?;
        self.output.flush()?;
        Ok(self
            .read_line()?
            .is_some_and(|answer| matches!(answer.to_ascii_lowercase().as_str(), "y" | "yes")))
    }

    /// Runs the play loop until the player quits or input ends.
    ///
    /// # Errors
    ///
    /// Returns I/O errors from the terminal and unexpected `GameError`s.
    pub fn run(
        &mut self,
        game: &mut GameService,
        log: &EventLog,
    ) -> Result<(), Box<dyn std::error::Error>> {
        loop {
            self.render_progress(&game.progress())?;
            write!(self.output, "Press Enter to roll the dice (q to quit): ")?;
            self.output.flush()?;
            match self.read_line()? {
                None => return Ok(()),
                Some(line) if line.eq_ignore_ascii_case("q") => return Ok(()),
                Some(_) => {}
            }

            let category = match game.roll()? {
                Pick::Won => {
                    writeln!(self.output, "\n*** YOU WON ***")?;
                    if self.play_again()? {
                        game.restart();
                        log.drain();
                        continue;
                    }
                    return Ok(());
                }
                Pick::Category(category) => category,
            };
            log.drain();

            let face = DiceFace::from(category);
            writeln!(
                self.output,
                "\nThe dice shows {}: {}",
                face,
                game.catalog().get(category).name()
            )?;

            match game.open_question() {
                Ok(question) => {
                    let question = question.clone();
                    self.render_question(&question)?;
                }
                Err(GameError::NoQuestionAvailable { .. }) => {
                    writeln!(self.output, "No question available for this category.")?;
                    game.finish_question();
                    continue;
                }
                Err(err) => return Err(err.into()),
            }

            let Some(choice) = self.read_choice()? else {
                return Ok(());
            };
            game.answer(choice)?;
            self.render_events(game, log)?;
            game.finish_question();

            if game.is_won() && self.play_again()? {
                game.restart();
                log.drain();
            } else if game.is_won() {
                return Ok(());
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use services::GameConfig;
    use std::io::Cursor;
    use std::sync::Arc;
    use storage::builtin_bank;
    use storage::repository::InMemoryQuestionBank;
    use trivia_core::model::CategoryCatalog;

    fn builtin() -> Arc<dyn storage::QuestionBank> {
        Arc::new(builtin_bank(&CategoryCatalog::classic()).unwrap())
    }

    fn build_game(bank: Arc<dyn storage::QuestionBank>) -> (GameService, EventLog) {
        let mut game = GameService::new(
            CategoryCatalog::classic(),
            bank,
            GameConfig::default().with_seed(3),
        );
        let log = EventLog::new();
        game.subscribe(log.clone());
        (game, log)
    }

    fn run_script(game: &mut GameService, log: &EventLog, script: &str) -> String {
        let mut terminal = Terminal::new(Cursor::new(script.as_bytes().to_vec()), Vec::new());
        terminal.run(game, log).unwrap();
        String::from_utf8(terminal.into_output()).unwrap()
    }

    #[test]
    fn quits_on_q() {
        let (mut game, log) = build_game(builtin());
        let out = run_script(&mut game, &log, "q\n");
        assert!(out.contains("0/6 categories completed"));
        assert!(!out.contains("The dice shows"));
    }

    #[test]
    fn re_prompts_on_invalid_choice() {
        let (mut game, log) = build_game(builtin());
        let out = run_script(&mut game, &log, "\n9\nabc\n1\nq\n");
        assert!(out.contains("The dice shows"));
        assert_eq!(out.matches("Please type a number from 1 to 4.").count(), 2);
        assert!(out.contains("Correct!") || out.contains("Wrong answer."));
    }

    #[test]
    fn reports_missing_question() {
        let (mut game, log) = build_game(Arc::new(InMemoryQuestionBank::new()));
        let out = run_script(&mut game, &log, "\nq\n");
        assert!(out.contains("No question available for this category."));
        assert_eq!(game.progress().completed, 0);
    }

    #[test]
    fn shows_win_screen_when_everything_is_completed() {
        let (mut game, log) = build_game(builtin());
        for raw in 0..6 {
            game.mark_completed(raw).unwrap();
        }
        log.drain();
        let out = run_script(&mut game, &log, "\nn\n");
        assert!(out.contains("YOU WON"));
        assert!(out.contains("6/6 categories completed"));
        assert!(game.is_won());
    }
}
