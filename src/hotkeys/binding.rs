//! Textual hotkey specifications such as `ctrl+shift+s`

use std::{fmt, str::FromStr};

/// Errors produced while resolving a hotkey specification
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum BindingError {
    #[error("hotkey specification is empty")]
    Empty,

    #[error("unrecognized token '{0}'")]
    UnrecognizedToken(String),

    #[error("hotkey '{0}' has no key, only modifiers")]
    MissingKey(String),

    #[error("hotkey '{spec}' names more than one key ('{first}' and '{second}')")]
    MultipleKeys {
        spec: String,
        first: String,
        second: String,
    },
}

/// Modifier keys held together with the bound key
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub struct ModifierSet {
    pub ctrl: bool,
    pub shift: bool,
    pub alt: bool,
    pub super_key: bool,
}

impl ModifierSet {
    pub fn is_empty(&self) -> bool {
        !(self.ctrl || self.shift || self.alt || self.super_key)
    }

    /// Set the modifier named by `token`, returning false if it is not one
    fn insert_token(&mut self, token: &str) -> bool {
        match token {
            "CTRL" | "CONTROL" => self.ctrl = true,
            "SHIFT" => self.shift = true,
            "ALT" | "OPTION" | "MOD1" => self.alt = true,
            "WIN" | "SUPER" | "CMD" | "MOD4" => self.super_key = true,
            _ => return false,
        }
        true
    }
}

/// The non-modifier key of a binding
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum KeyCode {
    /// `A`-`Z`
    Letter(char),
    /// `0`-`9`
    Digit(char),
    Space,
    /// `F1`-`F12`
    Function(u8),
}

impl KeyCode {
    fn from_token(token: &str) -> Option<Self> {
        let mut chars = token.chars();
        if let (Some(c), None) = (chars.next(), chars.next()) {
            return match c {
                'A'..='Z' => Some(Self::Letter(c)),
                '0'..='9' => Some(Self::Digit(c)),
                _ => None,
            };
        }

        if token == "SPACE" {
            return Some(Self::Space);
        }

        token
            .strip_prefix('F')
            .and_then(|n| n.parse::<u8>().ok())
            .filter(|n| (1..=12).contains(n))
            .map(Self::Function)
    }

    /// W3C `KeyboardEvent.code` name, e.g. `KeyS`, `Digit1`, `Space`, `F5`
    pub fn code_name(&self) -> String {
        match self {
            Self::Letter(c) => format!("Key{}", c),
            Self::Digit(c) => format!("Digit{}", c),
            Self::Space => "Space".to_string(),
            Self::Function(n) => format!("F{}", n),
        }
    }
}

impl fmt::Display for KeyCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Letter(c) | Self::Digit(c) => write!(f, "{}", c),
            Self::Space => f.write_str("Space"),
            Self::Function(n) => write!(f, "F{}", n),
        }
    }
}

/// A resolved hotkey: modifier set plus exactly one key
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct HotkeyBinding {
    pub modifiers: ModifierSet,
    pub key: KeyCode,
}

impl HotkeyBinding {
    /// Resolve a `+`-joined, case-insensitive specification
    pub fn parse(spec: &str) -> Result<Self, BindingError> {
        if spec.trim().is_empty() {
            return Err(BindingError::Empty);
        }

        let mut modifiers = ModifierSet::default();
        let mut key: Option<(KeyCode, &str)> = None;

        for raw in spec.split('+') {
            let raw = raw.trim();
            let token = raw.to_ascii_uppercase();

            if modifiers.insert_token(&token) {
                continue;
            }

            let code = KeyCode::from_token(&token)
                .ok_or_else(|| BindingError::UnrecognizedToken(raw.to_string()))?;

            if let Some((_, first)) = key {
                return Err(BindingError::MultipleKeys {
                    spec: spec.to_string(),
                    first: first.to_string(),
                    second: raw.to_string(),
                });
            }
            key = Some((code, raw));
        }

        match key {
            Some((key, _)) => Ok(Self { modifiers, key }),
            None => Err(BindingError::MissingKey(spec.to_string())),
        }
    }
}

impl FromStr for HotkeyBinding {
    type Err = BindingError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Self::parse(s)
    }
}

impl fmt::Display for HotkeyBinding {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let m = &self.modifiers;
        for (held, name) in [
            (m.ctrl, "Ctrl+"),
            (m.shift, "Shift+"),
            (m.alt, "Alt+"),
            (m.super_key, "Super+"),
        ] {
            if held {
                f.write_str(name)?;
            }
        }
        write!(f, "{}", self.key)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_modifiers_and_key_case_insensitively() {
        let binding = HotkeyBinding::parse("Ctrl+shift+s").unwrap();
        assert!(binding.modifiers.ctrl);
        assert!(binding.modifiers.shift);
        assert!(!binding.modifiers.alt);
        assert_eq!(binding.key, KeyCode::Letter('S'));
        assert_eq!(binding.to_string(), "Ctrl+Shift+S");
    }

    #[test]
    fn accepts_platform_modifier_aliases() {
        let binding: HotkeyBinding = "mod1 + MOD4 + 7".parse().unwrap();
        assert!(binding.modifiers.alt);
        assert!(binding.modifiers.super_key);
        assert_eq!(binding.key, KeyCode::Digit('7'));

        let binding = HotkeyBinding::parse("option+cmd+space").unwrap();
        assert_eq!(binding.to_string(), "Alt+Super+Space");
    }

    #[test]
    fn bare_key_has_no_modifiers() {
        let binding = HotkeyBinding::parse("f9").unwrap();
        assert!(binding.modifiers.is_empty());
        assert_eq!(binding.key, KeyCode::Function(9));
    }

    #[test]
    fn code_names_follow_w3c_naming() {
        assert_eq!(KeyCode::Letter('Q').code_name(), "KeyQ");
        assert_eq!(KeyCode::Digit('0').code_name(), "Digit0");
        assert_eq!(KeyCode::Space.code_name(), "Space");
        assert_eq!(KeyCode::Function(12).code_name(), "F12");
    }

    #[test]
    fn unknown_token_is_named_in_error() {
        assert_eq!(
            HotkeyBinding::parse("ctrl+hyper+s"),
            Err(BindingError::UnrecognizedToken("hyper".to_string()))
        );
        assert_eq!(
            HotkeyBinding::parse("ctrl+F13"),
            Err(BindingError::UnrecognizedToken("F13".to_string()))
        );
        assert_eq!(
            HotkeyBinding::parse("ctrl++s"),
            Err(BindingError::UnrecognizedToken(String::new()))
        );
    }

    #[test]
    fn rejects_empty_modifier_only_and_double_key() {
        assert_eq!(HotkeyBinding::parse("  "), Err(BindingError::Empty));
        assert_eq!(
            HotkeyBinding::parse("ctrl+shift"),
            Err(BindingError::MissingKey("ctrl+shift".to_string()))
        );
        assert!(matches!(
            HotkeyBinding::parse("a+b"),
            Err(BindingError::MultipleKeys { ref first, ref second, .. }) if first == "a" && second == "b"
        ));
    }
}
