//! Interactive `browse` loop: one command per line on stdin, the current
//! route redrawn after each.

use anyhow::Result;
use colored::Colorize;
use std::io::Write;
use std::str::FromStr;
use thiserror::Error;
use tokio::io::{AsyncBufReadExt, BufReader, Lines, Stdin};
use trend_client::prelude::*;
use trend_common::pagination::InvalidPageSize;
use trend_common::{PageSize, QueryState};

use crate::controller::{ListController, Outcome};
use crate::detail::{self, DetailState};
use crate::router::Route;
use crate::{ui, view};

const LIST_HELP: &str = "n next · p previous · g <page> go to page · s <query> search · \
                         e <exchange> filter · z <size> page size · c clear filters · \
                         o <row> open · r refresh · q quit";
const DETAIL_HELP: &str = "b back to the list · q quit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Input {
    Next,
    Previous,
    Goto(usize),
    Search(String),
    Exchange(String),
    Size(PageSize),
    Clear,
    Open(usize),
    Back,
    Refresh,
    Help,
    Quit,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum InputError {
    #[error("unknown command {0:?}; `h` lists the commands")]
    Unknown(String),
    #[error("`{0}` expects a number")]
    Number(&'static str),
    #[error(transparent)]
    Size(#[from] InvalidPageSize),
}

fn number(command: &'static str, arg: &str) -> Result<usize, InputError> {
    arg.parse().map_err(|_| InputError::Number(command))
}

impl FromStr for Input {
    type Err = InputError;

    fn from_str(line: &str) -> Result<Self, Self::Err> {
        let line = line.trim();
        let (command, arg) = match line.split_once(char::is_whitespace) {
            Some((command, arg)) => (command, arg.trim()),
            None => (line, ""),
        };

        match command {
            "n" | "next" => Ok(Self::Next),
            "p" | "prev" | "previous" => Ok(Self::Previous),
            "g" | "go" => Ok(Self::Goto(number("g", arg)?)),
            // an empty search or exchange clears that filter
            "s" | "search" => Ok(Self::Search(arg.to_string())),
            "e" | "exchange" => Ok(Self::Exchange(arg.to_string())),
            "z" | "size" => Ok(Self::Size(arg.parse()?)),
            "c" | "clear" => Ok(Self::Clear),
            "o" | "open" => Ok(Self::Open(number("o", arg)?)),
            "b" | "back" => Ok(Self::Back),
            "r" | "refresh" => Ok(Self::Refresh),
            "h" | "help" | "?" => Ok(Self::Help),
            "q" | "quit" | "exit" => Ok(Self::Quit),
            _ => Err(InputError::Unknown(line.to_string())),
        }
    }
}

/// Feed a list command into the controller; true when a refetch is due.
pub fn apply(list: &mut ListController, input: &Input) -> bool {
    let bar = list.pagination();
    match input {
        Input::Next => bar.next().is_some_and(|event| list.apply(event)),
        Input::Previous => bar.previous().is_some_and(|event| list.apply(event)),
        Input::Goto(label) => bar.click(*label).is_some_and(|event| list.apply(event)),
        Input::Size(size) => list.apply(bar.change_size(*size)),
        Input::Search(query) => list.search(query),
        Input::Exchange(exchange) => list.filter_exchange(exchange),
        Input::Clear => list.clear_filters(),
        Input::Refresh => true,
        Input::Open(_) | Input::Back | Input::Help | Input::Quit => false,
    }
}

async fn prompt(lines: &mut Lines<BufReader<Stdin>>) -> Result<Option<String>> {
    print!("{} ", ">".blue().bold());
    std::io::stdout().flush()?;
    Ok(lines.next_line().await?)
}

/// Run the session from `start` until `q` or end of input.
pub async fn browse<A: StocksApi + Sync>(api: &A, start: Route) -> Result<()> {
    let mut lines = BufReader::new(tokio::io::stdin()).lines();
    let mut list = ListController::new(QueryState::default());
    let mut mounted = false;
    let mut route = start;

    loop {
        log::debug!("showing {route}");
        match route.clone() {
            Route::Login => {
                println!("{}", view::LOGIN_HINT.yellow());
                return Ok(());
            }

            Route::Detail { symbol } => {
                let state =
                    ui::with_spinner(view::detail::LOADING, detail::load(api, &symbol)).await;
                if let DetailState::Redirect(next) = state {
                    route = next;
                    continue;
                }
                println!("{}\n", view::detail::render(&state));
                println!("{}", DETAIL_HELP.dimmed());

                route = loop {
                    let Some(line) = prompt(&mut lines).await? else {
                        return Ok(());
                    };
                    match line.parse::<Input>() {
                        Ok(Input::Back) => break Route::List,
                        Ok(Input::Quit) => return Ok(()),
                        _ => println!("{}", DETAIL_HELP.dimmed()),
                    }
                };
            }

            Route::List => {
                if !mounted {
                    mounted = true;
                    let outcome = ui::with_spinner(view::LOADING, list.mount(api)).await;
                    if let Outcome::Redirect(next) = outcome {
                        route = next;
                        continue;
                    }
                }
                println!("{}\n", view::render_list(&list));
                for notice in list.take_notices() {
                    eprintln!("{notice}");
                }

                let Some(line) = prompt(&mut lines).await? else {
                    return Ok(());
                };
                if line.trim().is_empty() {
                    continue;
                }

                match line.parse::<Input>() {
                    Ok(Input::Quit) => return Ok(()),
                    Ok(Input::Help) => println!("{}", LIST_HELP.dimmed()),
                    Ok(Input::Open(row)) => match list.open_row(row) {
                        Some(next) => route = next,
                        None => eprintln!("{}", format!("row {row} has nothing to open").red()),
                    },
                    Ok(input) => {
                        if apply(&mut list, &input) {
                            if let Outcome::Redirect(next) =
                                ui::with_spinner(view::LOADING, list.refresh(api)).await
                            {
                                route = next;
                            }
                        }
                    }
                    Err(e) => eprintln!("{}", e.to_string().red()),
                }
            }
        }
    }
}
