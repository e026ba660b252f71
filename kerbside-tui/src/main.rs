//! Terminal UI for kerbside that resolves an address and shows its bin
//! collection schedule.

mod app;
mod input;
mod ui;

use std::{cmp::Reverse, io, sync::Arc, time::Duration as StdDuration};

use anyhow::Result;
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event as CEvent},
    execute,
    terminal::{EnterAlternateScreen, LeaveAlternateScreen, disable_raw_mode, enable_raw_mode},
};
use ratatui::{Terminal, backend::CrosstermBackend};
use reqwest::Client;
use kerbside_core::{
    AddressCandidate, AddressQuery, normalise_postcode, plugin::PluginRegistry,
    score::score_candidate, service::KerbsideService,
};
use kerbside_provider_northherts as northherts;

use crate::app::{App, Screen};
use crate::input::Action;

#[tokio::main]
async fn main() -> Result<()> {
    // HTTP + service setup
    let client = Client::builder().user_agent("kerbside/0.1").build()?;

    let plugins = vec![northherts::plugin(client)];
    let registry = Arc::new(PluginRegistry::new(plugins));
    let service = Arc::new(KerbsideService::new(registry));

    // App state
    let app = App::new(service);

    // Terminal init
    enable_raw_mode()?;
    let mut stdout = io::stdout();
    execute!(
        stdout,
        EnterAlternateScreen,
        EnableMouseCapture
    )?;
    let backend = CrosstermBackend::new(stdout);
    let mut terminal = Terminal::new(backend)?;

    // Run event loop
    let res = run(&mut terminal, app).await;

    // Restore terminal
    disable_raw_mode()?;
    execute!(
        terminal.backend_mut(),
        LeaveAlternateScreen,
        DisableMouseCapture
    )?;
    terminal.show_cursor()?;

    res
}

async fn run(terminal: &mut Terminal<CrosstermBackend<io::Stdout>>, mut app: App) -> Result<()> {
    loop {
        // Draw current UI
        terminal.draw(|frame| ui::draw(frame, &app))?;

        // Poll for input (non-blocking, small timeout to keep CPU low)
        if event::poll(StdDuration::from_millis(100))?
            && let CEvent::Key(key) = event::read()?
        {
            let action = input::handle_key_event(key, &mut app);

            match action {
                Action::Quit => break,
                Action::None => {}
                Action::SearchAddresses => {
                    // Needs a council & non-empty query
                    let query_text = app.address_input.trim();
                    if query_text.is_empty() {
                        app.error_message = Some(
                            "Type a house number, street and postcode, then press Enter".into(),
                        );
                        continue;
                    }

                    let Some(council) = app.selected_council.clone() else {
                        app.error_message = Some("Select a council first".into());
                        continue;
                    };

                    let query = parse_search_input(query_text);

                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let res = app.service.search_addresses(council, &query).await;

                    app.is_loading = false;
                    match res {
                        Ok(candidates) => {
                            app.address_list_index = best_candidate_index(&candidates, &query);
                            app.address_results = candidates;
                            app.selected_address = None;
                        }
                        Err(err) => {
                            app.error_message = Some(format!("Search failed: {err}"));
                        }
                    }
                }
                Action::LoadScheduleForCurrentAddress => {
                    let Some(council) = app.selected_council.clone() else {
                        app.error_message = Some("Select a council first".into());
                        continue;
                    };

                    let Some(address) = app.select_current_address() else {
                        app.error_message =
                            Some("No address selected (search and pick one first)".into());
                        continue;
                    };

                    let Some(uprn) = address.uprn.clone() else {
                        app.error_message =
                            Some("Selected address does not expose a UPRN".into());
                        app.screen = Screen::AddressSearch;
                        continue;
                    };

                    app.is_loading = true;
                    app.error_message = None;
                    terminal.draw(|frame| ui::draw(frame, &app))?;

                    let res = app.service.collections_for(council, &uprn).await;

                    app.is_loading = false;
                    match res {
                        Ok(collections) => {
                            app.collections = collections;
                        }
                        Err(err) => {
                            app.collections.clear();
                            app.error_message = Some(format!("Failed to load schedule: {err}"));
                        }
                    }
                }
            }
        }
    }

    Ok(())
}

// Pre-select the candidate the scoring heuristics consider the best match,
// falling back to the first entry when nothing scored.
fn best_candidate_index(candidates: &[AddressCandidate], query: &AddressQuery) -> usize {
    candidates
        .iter()
        .enumerate()
        .map(|(index, candidate)| (score_candidate(candidate, query), index))
        .max_by_key(|(score, index)| (*score, Reverse(*index)))
        .filter(|(score, _)| *score > 0)
        .map_or(0, |(_, index)| index)
}

fn parse_search_input(input: &str) -> AddressQuery {
    let mut parts: Vec<&str> = input.split_whitespace().collect();

    // Peel a trailing postcode off the free text, typed with or without its
    // internal space.
    let mut postcode = None;
    if let [.., outward, inward] = parts.as_slice()
        && looks_like_postcode(&format!("{outward} {inward}"))
    {
        postcode = Some(format!("{outward} {inward}"));
        parts.truncate(parts.len() - 2);
    } else if let [.., last] = parts.as_slice()
        && looks_like_postcode(last)
    {
        postcode = Some((*last).to_owned());
        parts.truncate(parts.len() - 1);
    }

    // A leading token with a digit reads as a house number or name.
    let house = match parts.as_slice() {
        [first, _second, ..] if first.chars().any(|ch| ch.is_ascii_digit()) => {
            Some((*first).to_owned())
        }
        _ => None,
    };

    let street_parts = if house.is_some() {
        parts.get(1..).unwrap_or(&[])
    } else {
        parts.as_slice()
    };
    let street = if street_parts.is_empty() {
        None
    } else {
        Some(street_parts.join(" "))
    };

    AddressQuery::new(house, street, None, postcode)
}

// True when the text is a postcode and nothing else, modulo case and
// internal whitespace.
fn looks_like_postcode(text: &str) -> bool {
    normalise_postcode(text).is_some_and(|canonical| {
        canonical
            .chars()
            .filter(|ch| !ch.is_whitespace())
            .eq(text.to_uppercase().chars().filter(|ch| !ch.is_whitespace()))
    })
}
