use crate::*;

/// Keyboard commands the editor handles itself.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, derive_more::Display)]
pub enum EditorCommand {
    Format,
    Undo,
    Redo,
}

impl EditorCommand {
    /// Parse a chord like `"Ctrl+Shift+F"`. `Cmd` counts as `Ctrl`; case and
    /// spacing are ignored.
    pub fn from_keybinding(binding: &str) -> Option<Self> {
        let (mut ctrl, mut shift, mut alt) = (false, false, false);
        let mut key = None;
        for part in binding.split('+').map(str::trim) {
            match part.to_ascii_lowercase().as_str() {
                "ctrl" | "control" | "cmd" | "meta" => ctrl = true,
                "shift" => shift = true,
                "alt" | "option" => alt = true,
                "" => return None,
                other if key.is_none() => key = Some(other.to_string()),
                _ => return None,
            }
        }

        match (ctrl, shift, alt, key?.as_str()) {
            (true, true, false, "f") => Some(EditorCommand::Format),
            (true, false, false, "z") => Some(EditorCommand::Undo),
            (true, false, false, "y") | (true, true, false, "z") => Some(EditorCommand::Redo),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FormatSettings {
    pub indent: u8,
    pub uppercase: bool,
}

impl Default for FormatSettings {
    fn default() -> Self {
        Self::from(config())
    }
}

impl From<&Config> for FormatSettings {
    fn from(config: &Config) -> Self {
        Self {
            indent: config.format_indent,
            uppercase: config.format_uppercase,
        }
    }
}

/// Pretty-print `sql`. Blank input yields `None` so the document is left alone.
pub fn format_sql(sql: &str, settings: FormatSettings) -> Option<String> {
    let trimmed = sql.trim();
    if trimmed.is_empty() {
        return None;
    }
    let options = sqlformat::FormatOptions {
        indent: sqlformat::Indent::Spaces(settings.indent),
        uppercase: Some(settings.uppercase),
        lines_between_queries: 1,
        ..Default::default()
    };
    Some(sqlformat::format(trimmed, &sqlformat::QueryParams::None, &options))
}
