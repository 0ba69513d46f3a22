// File: ./src/cli.rs
//! Shared command-line interface logic: help text and event-list rendering.

use crate::model::Event;

/// One-screen summary of the command language, also returned by `help`.
pub fn command_summary() -> String {
    [
        "Available commands:",
        "    add n/NAME d/DATE s/START e/END      Add an event (DATE: YYYY-MM-DD, times: HH:MM)",
        "    delete INDEX                         Delete the event at the displayed index",
        "    edit INDEX [n/..][d/..][s/..][e/..]  Edit fields of the event at the index",
        "    list                                 Show all events",
        "    find KEYWORD | find d/DATE           Filter events by name keyword or date",
        "    help                                 Show this summary",
        "    exit                                 Quit the scheduler",
    ]
    .join("\n")
}

pub fn print_help(binary_name: &str) {
    println!(
        "Ezsched v{} - Simple and fast command-driven event scheduler",
        env!("CARGO_PKG_VERSION")
    );
    println!();
    println!("USAGE:");
    println!("    {} [--root <path>]", binary_name);
    println!("    {} --help", binary_name);
    println!();
    println!("OPTIONS:");
    println!("    -r, --root <path>     Use a different directory for config and data.");
    println!("    -h, --help            Show this help message.");
    println!();
    println!("{}", command_summary());
    println!();
    println!("EXAMPLES:");
    println!("    add n/Tennis d/2024-05-01 s/10:00 e/11:00");
    println!("    find tennis");
    println!("    delete 1");
}

/// Renders the displayed event list, one numbered block per event, with a
/// completed tag when enabled.
pub fn render_events(events: &[Event], show_completed: bool) -> String {
    if events.is_empty() {
        return "No events to show.".to_string();
    }
    let mut out = String::new();
    for (i, event) in events.iter().enumerate() {
        if i > 0 {
            out.push_str("\n\n");
        }
        out.push_str(&format!("{}. {}", i + 1, event));
        if show_completed {
            let status = event.completed_status();
            if !status.is_empty() {
                out.push_str(&format!("\n[{}]", status));
            }
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::model::EventName;
    use chrono::{NaiveDate, NaiveTime};

    #[test]
    fn rendering_numbers_events_from_one() {
        let events = vec![Event::new(
            EventName::new("Tennis").unwrap(),
            NaiveDate::from_ymd_opt(2024, 5, 1).unwrap(),
            NaiveTime::from_hms_opt(10, 0, 0).unwrap(),
            NaiveTime::from_hms_opt(11, 0, 0).unwrap(),
        )];
        let out = render_events(&events, false);
        assert!(out.starts_with("1. Tennis\n"));
    }

    #[test]
    fn empty_list_has_a_placeholder() {
        assert_eq!(render_events(&[], true), "No events to show.");
    }
}
