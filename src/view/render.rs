//! View models and text rendering
//!
//! Cards are plain data derived from the read-model caches. The `Display`
//! impls produce the terminal rendering; the browser client builds its DOM
//! from the same fields.

use chrono::{DateTime, NaiveDate, NaiveDateTime};
use std::fmt;

use crate::models::{Activity, Todo};

pub const ACTIVITIES_LOADING: &str = "Loading activities...";
pub const ACTIVITIES_FAILED: &str = "Failed to load activities. Please try again later.";
pub const NO_PARTICIPANTS: &str = "No participants yet";

pub const TODOS_PROMPT: &str = "Enter your email above to view your tasks";
pub const TODOS_EMPTY: &str = "No tasks yet. Add your first task above!";
pub const TODOS_FAILED: &str = "Failed to load tasks. Please try again later.";

/// Removal control attached to one roster entry
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParticipantRow {
    pub activity: String,
    pub email: String,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Roster {
    /// Rendered as the [`NO_PARTICIPANTS`] placeholder
    Empty,
    Participants(Vec<ParticipantRow>),
}

/// One activity card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ActivityCard {
    pub name: String,
    pub description: String,
    pub schedule: String,
    pub spots_left: i64,
    pub roster: Roster,
}

impl ActivityCard {
    pub fn new(name: &str, activity: &Activity) -> Self {
        let roster = if activity.participants.is_empty() {
            Roster::Empty
        } else {
            Roster::Participants(
                activity
                    .participants
                    .iter()
                    .map(|email| ParticipantRow {
                        activity: name.to_string(),
                        email: email.clone(),
                    })
                    .collect(),
            )
        };

        Self {
            name: name.to_string(),
            description: activity.description.clone(),
            schedule: activity.schedule.clone(),
            spots_left: activity.spots_left(),
            roster,
        }
    }

    pub fn availability(&self) -> String {
        format!("{} spots left", self.spots_left)
    }

    pub fn participants(&self) -> &[ParticipantRow] {
        match &self.roster {
            Roster::Empty => &[],
            Roster::Participants(rows) => rows,
        }
    }
}

impl fmt::Display for ActivityCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        writeln!(f, "{}", self.name)?;
        writeln!(f, "  {}", self.description)?;
        writeln!(f, "  Schedule: {}", self.schedule)?;
        writeln!(f, "  Availability: {}", self.availability())?;
        match &self.roster {
            Roster::Empty => writeln!(f, "  {}", NO_PARTICIPANTS),
            Roster::Participants(rows) => {
                writeln!(f, "  Participants:")?;
                for row in rows {
                    writeln!(f, "    - {} [x]", row.email)?;
                }
                Ok(())
            }
        }
    }
}

/// One todo card
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TodoCard {
    pub id: u64,
    pub title: String,
    /// Omitted entirely when the todo has no description
    pub description: Option<String>,
    /// Locale-formatted due date
    pub due: Option<String>,
    pub completed: bool,
}

impl TodoCard {
    pub fn new(todo: &Todo) -> Self {
        Self {
            id: todo.id,
            title: todo.title.clone(),
            description: todo.description().map(str::to_string),
            due: todo.due_date().map(format_due_date),
            completed: todo.completed,
        }
    }

    /// Label of the completion control
    pub fn toggle_label(&self) -> &'static str {
        if self.completed {
            "Mark Incomplete"
        } else {
            "Mark Complete"
        }
    }
}

impl fmt::Display for TodoCard {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mark = if self.completed { "x" } else { " " };
        writeln!(f, "[{}] #{} {}", mark, self.id, self.title)?;
        if let Some(description) = &self.description {
            writeln!(f, "      {}", description)?;
        }
        if let Some(due) = &self.due {
            writeln!(f, "      Due: {}", due)?;
        }
        Ok(())
    }
}

/// Format a due date as an en-US locale date (`M/D/YYYY`).
///
/// The calendar date is taken as written; unparseable input is returned as is.
pub fn format_due_date(raw: &str) -> String {
    parse_due_date(raw)
        .map(|date| date.format("%-m/%-d/%Y").to_string())
        .unwrap_or_else(|| raw.to_string())
}

fn parse_due_date(raw: &str) -> Option<NaiveDate> {
    let raw = raw.trim();

    if let Ok(date) = NaiveDate::parse_from_str(raw, "%Y-%m-%d") {
        return Some(date);
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(raw) {
        return Some(dt.date_naive());
    }
    ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%dT%H:%M"]
        .iter()
        .find_map(|fmt| NaiveDateTime::parse_from_str(raw, fmt).ok())
        .map(|dt| dt.date())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn todo(description: Option<&str>, due_date: Option<&str>, completed: bool) -> Todo {
        Todo {
            id: 7,
            title: "Essay".to_string(),
            description: description.map(str::to_string),
            due_date: due_date.map(str::to_string),
            completed,
            student_email: "s@x.com".to_string(),
            created_at: None,
        }
    }

    #[test]
    fn test_chess_club_card() {
        let activity = Activity::new("...", "Fridays", 10).participant("a@x.com");
        let card = ActivityCard::new("Chess Club", &activity);

        assert_eq!(card.availability(), "9 spots left");
        assert_eq!(
            card.participants(),
            &[ParticipantRow {
                activity: "Chess Club".to_string(),
                email: "a@x.com".to_string(),
            }]
        );

        let text = card.to_string();
        assert!(text.contains("Availability: 9 spots left"));
        assert!(text.contains("a@x.com [x]"));
    }

    #[test]
    fn test_empty_roster_placeholder() {
        let card = ActivityCard::new("Art Club", &Activity::new("Paint", "Thursdays", 15));

        assert_eq!(card.roster, Roster::Empty);
        assert!(card.to_string().contains(NO_PARTICIPANTS));
    }

    #[test]
    fn test_overfull_activity_shows_raw_value() {
        let activity = Activity::new("x", "y", 0).participant("a@x.com");
        assert_eq!(ActivityCard::new("Tiny", &activity).availability(), "-1 spots left");
    }

    #[test]
    fn test_todo_card_omits_missing_lines() {
        let card = TodoCard::new(&todo(Some(""), None, false));
        assert_eq!(card.to_string(), "[ ] #7 Essay\n");
        assert_eq!(card.toggle_label(), "Mark Complete");
    }

    #[test]
    fn test_todo_card_full() {
        let card = TodoCard::new(&todo(Some("Five pages"), Some("2025-03-09"), true));

        assert_eq!(card.due.as_deref(), Some("3/9/2025"));
        assert_eq!(card.toggle_label(), "Mark Incomplete");
        assert_eq!(card.to_string(), "[x] #7 Essay\n      Five pages\n      Due: 3/9/2025\n");
    }

    #[test]
    fn test_due_date_formats() {
        assert_eq!(format_due_date("2024-12-01"), "12/1/2024");
        assert_eq!(format_due_date("2024-12-01T23:30:00+00:00"), "12/1/2024");
        assert_eq!(format_due_date("2024-01-05T08:00"), "1/5/2024");
        assert_eq!(format_due_date("next friday"), "next friday");
    }
}
