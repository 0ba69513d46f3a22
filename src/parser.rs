// File: src/parser.rs
//! Turns raw input lines into structured commands.
//!
//! Grammar: a command word followed by arguments. Field arguments use the
//! prefixes `n/` (name), `d/` (date, YYYY-MM-DD), `s/` and `e/` (start/end
//! time, HH:MM 24-hour). A repeated prefix keeps the last value.
use crate::command::{
    Command, EventEdits, MESSAGE_END_BEFORE_START, MESSAGE_UNKNOWN_COMMAND,
};
use crate::model::{Event, EventName};
use crate::store::EventFilter;
use chrono::{NaiveDate, NaiveTime};
use std::collections::HashMap;
use std::str::FromStr;
use strum::EnumString;
use thiserror::Error;

pub const MESSAGE_DATE_CONSTRAINTS: &str = "Dates should be valid and in YYYY-MM-DD format";
pub const MESSAGE_TIME_CONSTRAINTS: &str = "Times should be in HH:MM (24-hour) format";
pub const MESSAGE_EDIT_NO_FIELDS: &str = "At least one field to edit must be provided";

pub const ADD_USAGE: &str = "add: Adds an event to the scheduler.\n\
    Parameters: n/NAME d/DATE s/START_TIME e/END_TIME\n\
    Example: add n/Tennis d/2024-05-01 s/10:00 e/11:00";
pub const DELETE_USAGE: &str = "delete: Deletes the event at the displayed index.\n\
    Parameters: INDEX (a positive integer)\n\
    Example: delete 1";
pub const EDIT_USAGE: &str = "edit: Edits the event at the displayed index.\n\
    Parameters: INDEX [n/NAME] [d/DATE] [s/START_TIME] [e/END_TIME]\n\
    Example: edit 1 s/12:00 e/13:00";
pub const FIND_USAGE: &str = "find: Finds events by name keyword or date.\n\
    Parameters: KEYWORD | d/DATE\n\
    Example: find tennis";

/// Malformed or unrecognized input. Produced before the model or storage is
/// touched; always safe to retry with corrected input.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("{0}")]
pub struct ParseError(pub String);

fn invalid_format(usage: &str) -> ParseError {
    ParseError(format!("Invalid command format! \n{usage}"))
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, EnumString)]
#[strum(serialize_all = "lowercase")]
enum CommandWord {
    Add,
    Delete,
    Edit,
    List,
    Find,
    Help,
    Exit,
}

pub fn parse_command(input: &str) -> Result<Command, ParseError> {
    let trimmed = input.trim();
    let (word, args) = trimmed
        .split_once(char::is_whitespace)
        .unwrap_or((trimmed, ""));
    let word = CommandWord::from_str(word)
        .map_err(|_| ParseError(MESSAGE_UNKNOWN_COMMAND.to_string()))?;
    match word {
        CommandWord::Add => parse_add(args),
        CommandWord::Delete => parse_delete(args),
        CommandWord::Edit => parse_edit(args),
        CommandWord::List => Ok(Command::List),
        CommandWord::Find => parse_find(args),
        CommandWord::Help => Ok(Command::Help),
        CommandWord::Exit => Ok(Command::Exit),
    }
}

const PREFIXES: [&str; 4] = ["n/", "d/", "s/", "e/"];

/// Splits an argument string into the text before the first prefix and a
/// prefix → value map. Values run until the next prefix; repeats keep the
/// last occurrence.
fn split_fields(args: &str) -> (String, HashMap<&'static str, String>) {
    let mut hits: Vec<(usize, &'static str)> = Vec::new();
    for prefix in PREFIXES {
        let mut search = 0;
        while let Some(rel) = args[search..].find(prefix) {
            let pos = search + rel;
            // A prefix only counts at a token boundary; "e/" inside a name
            // like "Cafe/Bar" must not split the field.
            if pos == 0 || args[..pos].ends_with(char::is_whitespace) {
                hits.push((pos, prefix));
            }
            search = pos + prefix.len();
        }
    }
    hits.sort_by_key(|(pos, _)| *pos);

    let preamble_end = hits.first().map_or(args.len(), |(pos, _)| *pos);
    let preamble = args[..preamble_end].trim().to_string();

    let mut fields = HashMap::new();
    for (i, (pos, prefix)) in hits.iter().enumerate() {
        let start = pos + prefix.len();
        let end = hits.get(i + 1).map_or(args.len(), |(pos, _)| *pos);
        fields.insert(*prefix, args[start..end].trim().to_string());
    }
    (preamble, fields)
}

fn parse_name(raw: &str) -> Result<EventName, ParseError> {
    EventName::new(raw).map_err(|e| ParseError(e.to_string()))
}

fn parse_date(raw: &str) -> Result<NaiveDate, ParseError> {
    NaiveDate::parse_from_str(raw, "%Y-%m-%d")
        .map_err(|_| ParseError(MESSAGE_DATE_CONSTRAINTS.to_string()))
}

fn parse_time(raw: &str) -> Result<NaiveTime, ParseError> {
    NaiveTime::parse_from_str(raw, "%H:%M")
        .map_err(|_| ParseError(MESSAGE_TIME_CONSTRAINTS.to_string()))
}

fn parse_index(raw: &str) -> Option<usize> {
    raw.parse::<usize>().ok().filter(|i| *i >= 1)
}

fn parse_add(args: &str) -> Result<Command, ParseError> {
    let (preamble, fields) = split_fields(args);
    if !preamble.is_empty() {
        return Err(invalid_format(ADD_USAGE));
    }
    let (Some(name), Some(date), Some(start), Some(end)) = (
        fields.get("n/"),
        fields.get("d/"),
        fields.get("s/"),
        fields.get("e/"),
    ) else {
        return Err(invalid_format(ADD_USAGE));
    };

    let name = parse_name(name)?;
    let date = parse_date(date)?;
    let start_time = parse_time(start)?;
    let end_time = parse_time(end)?;
    if start_time >= end_time {
        return Err(ParseError(MESSAGE_END_BEFORE_START.to_string()));
    }
    Ok(Command::Add(Event::new(name, date, start_time, end_time)))
}

fn parse_delete(args: &str) -> Result<Command, ParseError> {
    parse_index(args.trim())
        .map(Command::Delete)
        .ok_or_else(|| invalid_format(DELETE_USAGE))
}

fn parse_edit(args: &str) -> Result<Command, ParseError> {
    let (preamble, fields) = split_fields(args);
    let index = parse_index(&preamble).ok_or_else(|| invalid_format(EDIT_USAGE))?;

    let edits = EventEdits {
        name: fields.get("n/").map(|v| parse_name(v)).transpose()?,
        date: fields.get("d/").map(|v| parse_date(v)).transpose()?,
        start_time: fields.get("s/").map(|v| parse_time(v)).transpose()?,
        end_time: fields.get("e/").map(|v| parse_time(v)).transpose()?,
    };
    if edits.is_empty() {
        return Err(ParseError(MESSAGE_EDIT_NO_FIELDS.to_string()));
    }
    Ok(Command::Edit { index, edits })
}

fn parse_find(args: &str) -> Result<Command, ParseError> {
    let (preamble, fields) = split_fields(args);
    if let Some(date) = fields.get("d/") {
        return Ok(Command::Find(EventFilter::OnDate(parse_date(date)?)));
    }
    if preamble.is_empty() {
        return Err(invalid_format(FIND_USAGE));
    }
    Ok(Command::Find(EventFilter::NameContains(preamble)))
}
