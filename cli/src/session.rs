//! Interactive rounds of Connect 4 over any line-based reader and writer.
use std::io::{BufRead, Write};

use anyhow::Result;
use connect4::{Board, MoveValidation, Piece, SearchEngine, Winner, WIDTH};
use tracing::debug;

#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub enum Mode {
    SinglePlayer,
    TwoPlayer,
}

/// Who sits where for one round.
#[derive(Copy, Clone, Debug)]
struct Seats {
    mode: Mode,
    human: Piece,
}

impl Seats {
    fn is_human(&self, piece: Piece) -> bool {
        self.mode == Mode::TwoPlayer || piece == self.human
    }
}

pub struct Session<R, W> {
    input: R,
    output: W,
    engine: SearchEngine,
}

impl<R: BufRead, W: Write> Session<R, W> {
    pub fn new(input: R, output: W, engine: SearchEngine) -> Self {
        Self {
            input,
            output,
            engine,
        }
    }

    /// Plays rounds until the user declines another one or input ends.
    pub fn run(&mut self) -> Result<()> {
        write!(self.output, "Welcome to Connect 4!\n\n")?;
        if let Some(mode) = self.ask_mode()? {
            while let Some(winner) = self.play_round(mode)? {
                debug!(?winner, "round finished");
                match self.ask_yes_no("Would you like to play again? (Y/N)")? {
                    Some(true) => continue,
                    _ => break,
                }
            }
        }
        write!(self.output, "Thanks for playing!\n\n")?;
        self.output.flush()?;
        Ok(())
    }

    /// Returns `None` when input runs out before the round ends.
    fn play_round(&mut self, mode: Mode) -> Result<Option<Winner>> {
        let human = match mode {
            Mode::TwoPlayer => Piece::X,
            Mode::SinglePlayer => {
                let question = format!(
                    "Would you like to go first (play as {}) this round? (Y/N)",
                    Piece::X
                );
                match self.ask_yes_no(&question)? {
                    Some(true) => Piece::X,
                    Some(false) => Piece::O,
                    None => return Ok(None),
                }
            }
        };
        let seats = Seats { mode, human };
        let mut board = Board::new();

        while !board.is_terminal() {
            let piece = board.next_to_move();
            if seats.is_human(piece) {
                if !self.human_turn(&mut board, seats)? {
                    return Ok(None);
                }
            } else {
                self.ai_turn(&mut board)?;
            }
        }

        self.announce(&board, seats)?;
        Ok(Some(board.winner()))
    }

    /// Returns `false` when input runs out.
    fn human_turn(&mut self, board: &mut Board, seats: Seats) -> Result<bool> {
        let piece = board.next_to_move();
        match seats.mode {
            Mode::SinglePlayer => write!(self.output, "<< Player's Turn >>\n\n")?,
            Mode::TwoPlayer => write!(self.output, "<< Player {piece}'s Turn >>\n\n")?,
        }
        write!(self.output, "{board}")?;

        let question = format!("Enter a column number to place your next piece. (1-{WIDTH})");
        loop {
            let Some(answer) = self.prompt(&question)? else {
                return Ok(false);
            };
            // Columns are shown 1-based; anything unparseable is out of range.
            let column = answer
                .parse::<usize>()
                .ok()
                .and_then(|n| n.checked_sub(1))
                .unwrap_or(WIDTH);
            match board.validate_move(column) {
                MoveValidation::Valid => {
                    board.apply_move(piece, column);
                    write!(self.output, "{board}")?;
                    return Ok(true);
                }
                MoveValidation::InvalidColumnRange => writeln!(
                    self.output,
                    "That's not a valid column number! Please enter a valid column number."
                )?,
                MoveValidation::ColumnFull => writeln!(
                    self.output,
                    "That column is full! Please choose another column."
                )?,
                MoveValidation::RoundAlreadyOver => return Ok(true),
            }
        }
    }

    fn ai_turn(&mut self, board: &mut Board) -> Result<()> {
        write!(self.output, "<< AI's Turn >>\n\n")?;
        self.output.flush()?;
        let report = self.engine.search(board);
        debug!(
            column = report.column,
            score = report.score,
            nodes = report.stats.nodes,
            "AI move"
        );
        board.apply_move(board.next_to_move(), report.column);
        write!(
            self.output,
            "The AI placed its piece in column {}.\n\n",
            report.column + 1
        )?;
        Ok(())
    }

    fn announce(&mut self, board: &Board, seats: Seats) -> Result<()> {
        write!(self.output, "{board}")?;
        let message = match (board.winner(), seats.mode) {
            (Winner::Tie, _) => "It's a tie!".to_string(),
            (Winner::Piece(piece), Mode::TwoPlayer) => format!("Player {piece} wins!"),
            (Winner::Piece(piece), Mode::SinglePlayer) if piece == seats.human => {
                "You win!".to_string()
            }
            (Winner::Piece(_), Mode::SinglePlayer) => "The AI wins!".to_string(),
        };
        write!(self.output, "{message}\n\n")?;
        Ok(())
    }

    fn ask_mode(&mut self) -> Result<Option<Mode>> {
        loop {
            let Some(answer) = self.prompt("How many players? (1/2)")? else {
                return Ok(None);
            };
            match answer.as_str() {
                "1" => return Ok(Some(Mode::SinglePlayer)),
                "2" => return Ok(Some(Mode::TwoPlayer)),
                _ => {}
            }
        }
    }

    /// Any answer starting with `Y` is yes; any other non-empty answer is no.
    fn ask_yes_no(&mut self, question: &str) -> Result<Option<bool>> {
        Ok(self
            .prompt(question)?
            .and_then(|answer| answer.chars().next())
            .map(|first| first.eq_ignore_ascii_case(&'y')))
    }

    /// Asks until a non-empty line arrives. `None` at end of input.
    fn prompt(&mut self, question: &str) -> Result<Option<String>> {
        loop {
            write!(self.output, "{question}\n>> ")?;
            self.output.flush()?;
            let mut line = String::new();
            if self.input.read_line(&mut line)? == 0 {
                write!(self.output, "\n\n")?;
                return Ok(None);
            }
            write!(self.output, "\n\n")?;
            let answer = line.trim();
            if !answer.is_empty() {
                return Ok(Some(answer.to_string()));
            }
        }
    }
}
