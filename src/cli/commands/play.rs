//! Play command - Interactive game, human vs human or human vs computer

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result, bail};
use clap::{Parser, ValueEnum};
use tracing::info;

use super::parse_player_token;
use crate::{
    cli::output::render_board,
    config::{MatchConfig, Opponent},
    solver::ComputerPlayer,
    tictactoe::{BoardState, Game, GameOutcome, Player},
};

const MOVE_HELP: &str = "Illegal move or failed read. Enter a move as x y, with 0<=x,y<3.";

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum OpponentKind {
    /// Two people take turns at the same terminal
    Human,
    /// Play against the solver
    Computer,
}

#[derive(Copy, Clone, Debug, Eq, PartialEq, ValueEnum)]
pub enum Seat {
    /// You make the first move
    First,
    /// The computer makes the first move
    Second,
}

#[derive(Parser, Debug)]
#[command(about = "Play an interactive game")]
pub struct PlayArgs {
    /// Who you play against (asked interactively if omitted)
    #[arg(long, value_enum)]
    pub opponent: Option<OpponentKind>,

    /// Whether you move first against the computer (asked if omitted)
    #[arg(long, value_enum)]
    pub seat: Option<Seat>,

    /// Which mark moves first (`x` or `o`)
    #[arg(long, default_value = "x")]
    pub first_player: String,

    /// Let a computer that moves first consult the table instead of taking the centre
    #[arg(long)]
    pub no_center_opening: bool,
}

pub fn execute(args: PlayArgs) -> Result<()> {
    let stdin = io::stdin();
    let mut input = stdin.lock();
    let stdout = io::stdout();
    let mut output = stdout.lock();

    let config = resolve_config(&args, &mut input, &mut output)?;
    run_match(&config, &mut input, &mut output)?;
    Ok(())
}

/// Build the match configuration, asking for anything not given on the command line
pub fn resolve_config<R: BufRead, W: Write>(
    args: &PlayArgs,
    input: &mut R,
    output: &mut W,
) -> Result<MatchConfig> {
    let first_player = parse_player_token(&args.first_player, "--first-player")?;

    let opponent = match args.opponent {
        Some(kind) => kind,
        None => ask(
            input,
            output,
            "Would you like to play with a computer? (y/n)",
            "Please input either y or n.",
            |answer| match answer.chars().next() {
                Some('y' | 'Y') => Some(OpponentKind::Computer),
                Some('n' | 'N') => Some(OpponentKind::Human),
                _ => None,
            },
        )?,
    };

    if opponent == OpponentKind::Human {
        return Ok(MatchConfig::human_vs_human().with_first_player(first_player));
    }

    let seat = match args.seat {
        Some(seat) => seat,
        None => ask(
            input,
            output,
            "Would you like to go first or second? (1/2)",
            "Please input either 1 or 2",
            |answer| match answer.trim() {
                "1" => Some(Seat::First),
                "2" => Some(Seat::Second),
                _ => None,
            },
        )?,
    };

    let computer = match seat {
        Seat::First => first_player.opponent(),
        Seat::Second => first_player,
    };
    Ok(MatchConfig::against_computer(computer)
        .with_first_player(first_player)
        .with_center_opening(!args.no_center_opening))
}

/// Repeat `question` until `parse` accepts an answer
fn ask<R, W, T>(
    input: &mut R,
    output: &mut W,
    question: &str,
    retry: &str,
    parse: impl Fn(&str) -> Option<T>,
) -> Result<T>
where
    R: BufRead,
    W: Write,
{
    writeln!(output, "{question}")?;
    loop {
        let line = read_line(input)?;
        if let Some(answer) = parse(line.trim()) {
            return Ok(answer);
        }
        writeln!(output, "{retry}")?;
    }
}

fn read_line<R: BufRead>(input: &mut R) -> Result<String> {
    let mut line = String::new();
    let read = input
        .read_line(&mut line)
        .context("failed to read from input")?;
    if read == 0 {
        bail!("input ended before the game finished");
    }
    Ok(line)
}

/// Column and row from a line such as `1 2`; extra tokens are ignored
pub fn parse_coordinates(line: &str) -> Option<(usize, usize)> {
    let mut parts = line.split_whitespace();
    let x = parts.next()?.parse().ok()?;
    let y = parts.next()?.parse().ok()?;
    Some((x, y))
}

/// Run one game on a single shared board until it ends
pub fn run_match<R: BufRead, W: Write>(
    config: &MatchConfig,
    input: &mut R,
    output: &mut W,
) -> Result<GameOutcome> {
    config.validate()?;
    let mut game = Game::from_board(BoardState::new_with_player(config.first_player));

    let computer = match config.opponent {
        Opponent::Human => None,
        Opponent::Computer { plays } => {
            if plays == config.first_player && config.computer_opens_center {
                writeln!(output, "Current grid: ")?;
                write!(output, "{}", render_board(game.board()))?;
                let (x, y) = BoardState::coordinates(4);
                writeln!(output, "The computer plays {x} {y}.")?;
                game.play(4)?;
            }
            info!(start = %game.board().encode(), "solving for the computer");
            Some(ComputerPlayer::new(plays, game.board(), &config.solver)?)
        }
    };

    while game.outcome().is_none() {
        let board = *game.board();

        if let Some(computer) = computer.as_ref().filter(|c| c.plays() == board.to_move) {
            let pos = computer
                .choose(&board)
                .context("the computer could not find a move")?;
            let (x, y) = BoardState::coordinates(pos);
            writeln!(output, "The computer plays {x} {y}.")?;
            game.play(pos)?;
            continue;
        }

        writeln!(output, "Current grid: ")?;
        write!(output, "{}", render_board(&board))?;
        match computer {
            Some(_) => writeln!(output, "It's your turn! Make a move. ")?,
            None => writeln!(output, "It's {}'s turn! Make a move. ", board.to_move)?,
        }

        let line = read_line(input)?;
        let Some((x, y)) = parse_coordinates(&line) else {
            writeln!(output, "{MOVE_HELP}")?;
            continue;
        };
        match game.play_at(x, y) {
            Ok(_) => {}
            Err(err) if err.is_recoverable() => writeln!(output, "{MOVE_HELP}")?,
            Err(err) => return Err(err.into()),
        }
    }

    let outcome = game
        .outcome()
        .context("game loop ended without an outcome")?;
    announce(outcome, config.computer(), output)?;
    write!(output, "{}", render_board(game.board()))?;
    Ok(outcome)
}

fn announce<W: Write>(
    outcome: GameOutcome,
    computer: Option<Player>,
    output: &mut W,
) -> Result<()> {
    match (outcome, computer) {
        (GameOutcome::Draw, _) => writeln!(output, "It's a draw!")?,
        (GameOutcome::Win(winner), None) => writeln!(output, "{winner} won! ")?,
        (GameOutcome::Win(winner), Some(computer)) if winner == computer => {
            writeln!(output, "You lost!")?
        }
        (GameOutcome::Win(_), Some(_)) => writeln!(output, "You won! ")?,
    }
    Ok(())
}
