use std::path::PathBuf;

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AppEvent {
    Open,
    ItemsChanged,
    LoadItems(PathBuf),
    ConfigReload,
}

impl AppEvent {
    /// Parses one line of the control socket protocol.
    pub fn parse_command(line: &str) -> Option<Self> {
        let line = line.trim();
        let (verb, arg) = match line.split_once(char::is_whitespace) {
            Some((verb, arg)) => (verb, arg.trim()),
            None => (line, ""),
        };
        match (verb, arg) {
            ("open", "") => Some(Self::Open),
            ("reload", "") => Some(Self::ItemsChanged),
            ("load", path) if !path.is_empty() => Some(Self::LoadItems(PathBuf::from(path))),
            _ => None,
        }
    }

    /// The line `parse_command` reads back as `self`.
    pub fn to_command(&self) -> Option<String> {
        match self {
            Self::Open => Some("open".to_string()),
            Self::ItemsChanged => Some("reload".to_string()),
            Self::LoadItems(path) => Some(format!("load {}", path.display())),
            Self::ConfigReload => None,
        }
    }
}
