use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Screen {
    #[default]
    Welcome,
    Register,
    Preferences,
}

impl Screen {
    pub const ALL: [Screen; 3] = [Screen::Welcome, Screen::Register, Screen::Preferences];

    /// Wraps from the last screen back to the first.
    pub fn next(self) -> Self {
        match self {
            Self::Welcome => Self::Register,
            Self::Register => Self::Preferences,
            Self::Preferences => Self::Welcome,
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            Self::Welcome => "Welcome",
            Self::Register => "Register",
            Self::Preferences => "Preferences",
        }
    }
}

impl fmt::Display for Screen {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Welcome => f.write_str("welcome"),
            Self::Register => f.write_str("register"),
            Self::Preferences => f.write_str("preferences"),
        }
    }
}

impl FromStr for Screen {
    type Err = String;

    fn from_str(raw: &str) -> Result<Self, Self::Err> {
        Self::ALL
            .into_iter()
            .find(|screen| screen.to_string().eq_ignore_ascii_case(raw.trim()))
            .ok_or_else(|| format!("unknown screen '{raw}' (expected welcome, register or preferences)"))
    }
}

#[cfg(test)]
mod tests {
    use super::Screen;

    #[test]
    fn parses_names_case_insensitively() {
        assert_eq!("Register".parse::<Screen>(), Ok(Screen::Register));
        assert_eq!(" preferences ".parse::<Screen>(), Ok(Screen::Preferences));
        assert!("settings".parse::<Screen>().is_err());
    }

    #[test]
    fn next_cycles_through_all_screens() {
        let mut screen = Screen::Welcome;
        for expected in [Screen::Register, Screen::Preferences, Screen::Welcome] {
            screen = screen.next();
            assert_eq!(screen, expected);
        }
    }
}
