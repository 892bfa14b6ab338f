use crate::CommandError;

/// First words whose raw text is never announced to other sessions
const QUIET_VERBS: [&str; 5] = ["start", "stop", "create", "update", "delete"];

pub const HELP_TEXT: &str = "=== AVAILABLE COMMANDS ===
status                     - Show service health status
start <service>            - Start a service (Manager only)
stop <service>             - Stop a service (Manager only)
fail <service>             - Simulate service failure
recover <service>          - Recover a service
create user <name> <email> - Create a new user
help                       - Show this help
clear                      - Clear chat history
users                      - Show connected users

Examples:
  start user
  stop product
  fail user
  recover product
  create user John john@example.com
  status
";

/// One parsed ChatOps command line
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Status,
    Start { service: String },
    Stop { service: String },
    Fail { service: String },
    Recover { service: String },
    CreateUser { name: String, email: String },
    Help,
    Users,
    Clear,
}

impl Command {
    /// Verbs match case-insensitively and service names are lower-cased.
    /// `create user` keeps the case of its arguments.
    #[track_caller]
    pub fn parse(line: &str) -> Result<Self, CommandError> {
        let words: Vec<&str> = line.split_whitespace().collect();
        let Some((verb, args)) = words.split_first() else {
            return Err(CommandError::unknown(line));
        };

        match (verb.to_lowercase().as_str(), args) {
            ("status", []) => Ok(Self::Status),
            ("help", []) => Ok(Self::Help),
            ("users", []) => Ok(Self::Users),
            ("clear", []) => Ok(Self::Clear),
            ("start", [service]) => Ok(Self::Start {
                service: service.to_lowercase(),
            }),
            ("start", _) => Err(CommandError::usage("start <service>")),
            ("stop", [service]) => Ok(Self::Stop {
                service: service.to_lowercase(),
            }),
            ("stop", _) => Err(CommandError::usage("stop <service>")),
            ("fail", [service]) => Ok(Self::Fail {
                service: service.to_lowercase(),
            }),
            ("fail", _) => Err(CommandError::usage("fail <service>")),
            ("recover", [service]) => Ok(Self::Recover {
                service: service.to_lowercase(),
            }),
            ("recover", _) => Err(CommandError::usage("recover <service>")),
            ("create", [noun, rest @ ..]) if noun.eq_ignore_ascii_case("user") => match rest {
                [name, email] => Ok(Self::CreateUser {
                    name: name.to_string(),
                    email: email.to_string(),
                }),
                _ => Err(CommandError::usage("create user <name> <email>")),
            },
            _ => Err(CommandError::unknown(line)),
        }
    }

    /// Short name for logs, spans and metrics
    pub fn name(&self) -> &'static str {
        match self {
            Self::Status => "status",
            Self::Start { .. } => "start",
            Self::Stop { .. } => "stop",
            Self::Fail { .. } => "fail",
            Self::Recover { .. } => "recover",
            Self::CreateUser { .. } => "create_user",
            Self::Help => "help",
            Self::Users => "users",
            Self::Clear => "clear",
        }
    }
}

/// Whether the raw line may be shown to other sessions before it runs
pub fn is_announced(line: &str) -> bool {
    match line.split_whitespace().next() {
        Some(verb) => !QUIET_VERBS
            .iter()
            .any(|quiet| verb.eq_ignore_ascii_case(quiet)),
        None => false,
    }
}
