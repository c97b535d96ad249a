use chrono::{DateTime, Local, TimeZone};
use std::fmt::Display;

pub const COMMAND_NAMES: &[&str] = &["help", "clear", "echo", "date"];
pub const HELP_TEXT: &str = "Available commands: help, clear, echo, date";
pub const NOT_FOUND_PREFIX: &str = "Command not found: ";
pub const ECHO_PREFIX: &str = "echo ";

/// Weekday, month, day, year, time and UTC offset, e.g. `Sun Oct 18 2026 14:03:22 GMT+0200`.
pub const DATE_FORMAT: &str = "%a %b %d %Y %H:%M:%S GMT%z";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Help,
    Clear,
    Date,
    Echo(String),
    Unknown(String),
}

impl Command {
    /// Trims and lowercases `raw`, then matches it against the built-ins.
    pub fn parse(raw: &str) -> Self {
        let normalized = raw.trim().to_lowercase();
        match normalized.as_str() {
            "help" => Command::Help,
            "clear" => Command::Clear,
            "date" => Command::Date,
            _ => match normalized.strip_prefix(ECHO_PREFIX) {
                Some(rest) => Command::Echo(rest.to_string()),
                None => Command::Unknown(normalized),
            },
        }
    }

    pub fn run<Tz>(self, now: &DateTime<Tz>) -> Reply
    where
        Tz: TimeZone,
        Tz::Offset: Display,
    {
        match self {
            Command::Help => Reply::Text(HELP_TEXT.to_string()),
            Command::Clear => Reply::Clear,
            Command::Date => Reply::Text(now.format(DATE_FORMAT).to_string()),
            Command::Echo(rest) => Reply::Text(rest),
            Command::Unknown(cmd) => Reply::Text(format!("{NOT_FOUND_PREFIX}{cmd}")),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Text(String),
    /// Transcript reset request. Its visible response line is empty.
    Clear,
}

impl Reply {
    pub fn text(&self) -> &str {
        match self {
            Reply::Text(text) => text,
            Reply::Clear => "",
        }
    }

    pub fn clears_transcript(&self) -> bool {
        matches!(self, Reply::Clear)
    }
}

pub fn interpret(raw: &str) -> Reply {
    interpret_at(raw, &Local::now())
}

pub fn interpret_at<Tz>(raw: &str, now: &DateTime<Tz>) -> Reply
where
    Tz: TimeZone,
    Tz::Offset: Display,
{
    Command::parse(raw).run(now)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{Datelike, FixedOffset};

    fn fixed_now() -> DateTime<FixedOffset> {
        FixedOffset::east_opt(2 * 3600)
            .unwrap()
            .with_ymd_and_hms(2026, 10, 18, 14, 3, 22)
            .unwrap()
    }

    #[test]
    fn help_lists_every_command() {
        let reply = interpret("help");
        assert_eq!(reply, Reply::Text(HELP_TEXT.to_string()));
        for name in COMMAND_NAMES {
            assert!(reply.text().contains(name));
        }
    }

    #[test]
    fn echo_is_case_insensitive_and_returns_normalized_remainder() {
        assert_eq!(interpret("ECHO hello world").text(), "hello world");
        assert_eq!(interpret("  echo Mixed Case  ").text(), "mixed case");
        assert_eq!(interpret("echo  two spaces").text(), " two spaces");
    }

    #[test]
    fn bare_echo_is_not_a_command() {
        assert_eq!(interpret("echo").text(), "Command not found: echo");
        assert_eq!(interpret("echo   ").text(), "Command not found: echo");
    }

    #[test]
    fn unknown_commands_report_normalized_input() {
        assert_eq!(interpret("foo").text(), "Command not found: foo");
        assert_eq!(interpret("  LS -la ").text(), "Command not found: ls -la");
        assert_eq!(interpret("").text(), "Command not found: ");
    }

    #[test]
    fn clear_requests_reset_with_empty_text() {
        let reply = interpret("  CLEAR ");
        assert!(reply.clears_transcript());
        assert_eq!(reply.text(), "");
        assert!(!interpret("help").clears_transcript());
    }

    #[test]
    fn date_uses_supplied_clock() {
        let reply = interpret_at("  Date  ", &fixed_now());
        assert_eq!(reply.text(), "Sun Oct 18 2026 14:03:22 GMT+0200");
    }

    #[test]
    fn local_date_parses_back_as_calendar_time() {
        let reply = interpret("  Date  ");
        let parsed = DateTime::parse_from_str(reply.text(), DATE_FORMAT)
            .expect("date reply should round-trip through its format");
        assert!(parsed.year() >= 2024);
    }

    #[test]
    fn parse_maps_to_variants() {
        assert_eq!(Command::parse("Help"), Command::Help);
        assert_eq!(Command::parse("date"), Command::Date);
        assert_eq!(Command::parse("echo hi"), Command::Echo("hi".to_string()));
        assert_eq!(
            Command::parse("dates"),
            Command::Unknown("dates".to_string())
        );
    }
}
