use super::super::super::messages::{Message, Tool};
use super::super::super::state::App;
use iced::keyboard::{Key, Modifiers, key};

impl App {
    pub(super) fn shortcut_message_for_key(
        &self,
        key: Key,
        modifiers: Modifiers,
    ) -> Option<Message> {
        // Reader shortcuts only act on an open document.
        if self.active_tool != Tool::Reader || self.reader.session.is_none() {
            return None;
        }

        let pressed = match key.as_ref() {
            Key::Named(key::Named::ArrowLeft) => "left".to_string(),
            Key::Named(key::Named::ArrowRight) => "right".to_string(),
            Key::Named(key::Named::Space) => "space".to_string(),
            Key::Character(ch) => ch.to_ascii_lowercase(),
            _ => return None,
        };

        if Self::shortcut_matches(&self.config.key_undo, "ctrl+z", &pressed, modifiers) {
            Some(Message::Undo)
        } else if Self::shortcut_matches(&self.config.key_redo, "ctrl+y", &pressed, modifiers) {
            Some(Message::Redo)
        } else if Self::shortcut_matches(
            &self.config.key_clear_highlights,
            "ctrl+x",
            &pressed,
            modifiers,
        ) {
            Some(Message::RequestClearHighlights)
        } else if Self::shortcut_matches(&self.config.key_next_page, "right", &pressed, modifiers) {
            Some(Message::NextPage)
        } else if Self::shortcut_matches(&self.config.key_prev_page, "left", &pressed, modifiers) {
            Some(Message::PreviousPage)
        } else if Self::shortcut_matches(&self.config.key_zoom_in, "ctrl+=", &pressed, modifiers) {
            Some(Message::ZoomIn)
        } else if Self::shortcut_matches(&self.config.key_zoom_out, "ctrl+-", &pressed, modifiers) {
            Some(Message::ZoomOut)
        } else if Self::shortcut_matches(&self.config.key_rotate_cw, "ctrl+]", &pressed, modifiers)
        {
            Some(Message::RotateClockwise)
        } else if Self::shortcut_matches(&self.config.key_rotate_ccw, "ctrl+[", &pressed, modifiers)
        {
            Some(Message::RotateCounterClockwise)
        } else {
            None
        }
    }

    pub(super) fn shortcut_matches(
        raw: &str,
        fallback: &str,
        pressed: &str,
        modifiers: Modifiers,
    ) -> bool {
        let normalized = Self::normalize_shortcut_token(raw, fallback);

        let mut required_ctrl = false;
        let mut required_alt = false;
        let mut required_logo = false;
        let mut required_shift = false;
        let mut required_key: Option<&str> = None;

        for token in normalized
            .split('+')
            .map(str::trim)
            .filter(|s| !s.is_empty())
        {
            match token {
                "ctrl" | "control" => required_ctrl = true,
                "alt" => required_alt = true,
                "logo" | "meta" | "super" | "cmd" | "command" => required_logo = true,
                "shift" => required_shift = true,
                key => required_key = Some(key),
            }
        }

        let required_key = required_key.unwrap_or(fallback);
        if pressed != required_key {
            return false;
        }

        modifiers.control() == required_ctrl
            && modifiers.alt() == required_alt
            && modifiers.logo() == required_logo
            && modifiers.shift() == required_shift
    }

    pub(super) fn normalize_shortcut_token(raw: &str, fallback: &str) -> String {
        let normalized = raw.trim().to_ascii_lowercase();
        if normalized.is_empty() {
            fallback.to_string()
        } else {
            normalized.replace("spacebar", "space")
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use iced::keyboard::Modifiers;

    #[test]
    fn normalizes_spacebar_alias() {
        assert_eq!(App::normalize_shortcut_token(" SpaceBar ", "x"), "space");
    }

    #[test]
    fn matches_ctrl_z_shortcut() {
        assert!(App::shortcut_matches("ctrl+z", "x", "z", Modifiers::CTRL));
    }

    #[test]
    fn bare_arrow_binding_needs_no_modifiers() {
        assert!(App::shortcut_matches("right", "x", "right", Modifiers::empty()));
        assert!(!App::shortcut_matches("right", "x", "right", Modifiers::CTRL));
    }

    #[test]
    fn rejects_unexpected_extra_modifier() {
        assert!(!App::shortcut_matches(
            "ctrl+z",
            "x",
            "z",
            Modifiers::CTRL | Modifiers::SHIFT,
        ));
    }

    #[test]
    fn empty_binding_falls_back() {
        assert!(App::shortcut_matches("", "ctrl+y", "y", Modifiers::CTRL));
    }
}
