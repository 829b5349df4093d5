use freight_core::Tab;
use thiserror::Error;

pub const HELP: &str = "\
Commands:
  tab book|track          switch tab
  set <field> <value>     edit a booking field (pickupLocation, dropoffLocation,
                          vehicleType, goodsType, weight)
  estimate                request a price estimate for the form
  book                    submit the booking
  query <id>              edit the tracking ID
  track [id]              track the shipment (optionally setting the ID first)
  dismiss                 close the booking confirmation
  clear                   hide the error message
  log <level>             change the log level (e.g. debug)
  show                    redraw the dashboard
  help                    show this list
  quit                    leave without waiting for pending requests";

/// One line of dashboard input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    SelectTab(Tab),
    Set { field: String, value: String },
    Estimate,
    Book,
    Query(String),
    Track(Option<String>),
    Dismiss,
    ClearError,
    LogLevel(String),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("unknown command '{0}' (type 'help' for a list)")]
    Unknown(String),

    #[error("usage: {0}")]
    Usage(&'static str),
}

impl Command {
    /// Parses one input line. Blank lines and `#` comments yield `None`.
    ///
    /// Values run to the end of the line, so `set pickupLocation 12 Dock Road`
    /// keeps the spaces.
    pub fn parse(line: &str) -> Result<Option<Self>, CommandError> {
        let line = line.trim();
        if line.is_empty() || line.starts_with('#') {
            return Ok(None);
        }

        let (word, rest) = split_word(line);
        let command = match word.to_ascii_lowercase().as_str() {
            "tab" => {
                let tab = Tab::parse(rest).ok_or(CommandError::Usage("tab book|track"))?;
                Self::SelectTab(tab)
            }
            "set" => {
                let (field, value) = split_word(rest);
                if field.is_empty() {
                    return Err(CommandError::Usage("set <field> <value>"));
                }
                Self::Set {
                    field: field.to_string(),
                    value: value.to_string(),
                }
            }
            "estimate" => Self::Estimate,
            "book" => Self::Book,
            "query" => Self::Query(rest.to_string()),
            "track" if rest.is_empty() => Self::Track(None),
            "track" => Self::Track(Some(rest.to_string())),
            "dismiss" => Self::Dismiss,
            "clear" => Self::ClearError,
            "log" if rest.is_empty() => return Err(CommandError::Usage("log <level>")),
            "log" => Self::LogLevel(rest.to_string()),
            "show" => Self::Show,
            "help" | "?" => Self::Help,
            "quit" | "exit" => Self::Quit,
            _ => return Err(CommandError::Unknown(word.to_string())),
        };
        Ok(Some(command))
    }
}

fn split_word(s: &str) -> (&str, &str) {
    match s.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (s, ""),
    }
}
