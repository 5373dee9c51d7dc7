//! Main menu actions.

/// One entry of the main menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuAction {
    Add,
    List,
    Delete,
    SearchKeyword,
    SearchTag,
    BrowseTags,
    Filter,
    Quit,
}

impl MenuAction {
    /// Menu entries in display order; the number shown is `index + 1`.
    pub const ALL: [MenuAction; 8] = [
        MenuAction::Add,
        MenuAction::List,
        MenuAction::Delete,
        MenuAction::SearchKeyword,
        MenuAction::SearchTag,
        MenuAction::BrowseTags,
        MenuAction::Filter,
        MenuAction::Quit,
    ];

    /// Parses a typed menu number.
    pub fn from_choice(input: &str) -> Option<Self> {
        let number: usize = input.trim().parse().ok()?;
        number
            .checked_sub(1)
            .and_then(|index| Self::ALL.get(index).copied())
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Add => "Add memo",
            Self::List => "List memos",
            Self::Delete => "Delete memo",
            Self::SearchKeyword => "Search by keyword",
            Self::SearchTag => "Search by tag",
            Self::BrowseTags => "Browse tags",
            Self::Filter => "Filter by keyword and tag",
            Self::Quit => "Quit",
        }
    }

    /// Stable name used in log events.
    pub fn event_name(self) -> &'static str {
        match self {
            Self::Add => "add",
            Self::List => "list",
            Self::Delete => "delete",
            Self::SearchKeyword => "search_keyword",
            Self::SearchTag => "search_tag",
            Self::BrowseTags => "browse_tags",
            Self::Filter => "filter",
            Self::Quit => "quit",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::MenuAction;

    #[test]
    fn choices_map_to_actions_by_position() {
        assert_eq!(MenuAction::from_choice("1"), Some(MenuAction::Add));
        assert_eq!(MenuAction::from_choice(" 7 "), Some(MenuAction::Filter));
        assert_eq!(MenuAction::from_choice("8"), Some(MenuAction::Quit));
    }

    #[test]
    fn invalid_choices_are_rejected() {
        for input in ["", "0", "9", "abc", "-1", "1.5"] {
            assert_eq!(MenuAction::from_choice(input), None, "input {input:?}");
        }
    }
}
