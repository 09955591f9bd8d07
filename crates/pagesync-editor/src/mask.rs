//! Masked password input.
//!
//! Input panels only show plain text, so the password panel displays one `*`
//! per character while the real password is kept here. Each change of the
//! visible text is diffed against the previous mask to recover the edit.

/// Character shown in place of each password character.
pub const MASK_CHAR: char = '*';

/// Tracks the real password behind a visible mask.
///
/// The visible text after an edit is made of mask characters for the
/// characters that were kept plus the characters the user just typed. A
/// contiguous run of typed characters is spliced in at its position, which
/// covers typing, pasting and replacing a selection. Deletions leave only
/// mask characters, so their position cannot be recovered and the password
/// is truncated to the new length.
#[derive(Clone, Default, PartialEq, Eq)]
pub struct PasswordMask {
    password: Vec<char>,
}

impl PasswordMask {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The real password.
    pub fn password(&self) -> String {
        self.password.iter().collect()
    }

    /// Visible mask for the current password.
    pub fn mask(&self) -> String {
        std::iter::repeat_n(MASK_CHAR, self.password.len()).collect()
    }

    /// Apply a change of the visible text.
    ///
    /// Returns the mask to display when the visible text must be replaced, or
    /// `None` when it already shows the mask.
    pub fn on_change(&mut self, visible: &str) -> Option<String> {
        if visible == self.mask() {
            return None;
        }

        let visible: Vec<char> = visible.chars().collect();
        let old_len = self.password.len();
        let typed: Vec<usize> = visible
            .iter()
            .enumerate()
            .filter(|(_, c)| **c != MASK_CHAR)
            .map(|(i, _)| i)
            .collect();

        if let Some(&start) = typed.first() {
            let end = start + typed.len();
            let kept_after = visible.len() - end;
            let contiguous = typed.last() == Some(&(end - 1));
            if contiguous && start + kept_after <= old_len {
                let mut password = self.password[..start].to_vec();
                password.extend_from_slice(&visible[start..end]);
                password.extend_from_slice(&self.password[old_len - kept_after..]);
                self.password = password;
            } else {
                self.apply_single_edit(start, visible[start], visible.len());
            }
        } else if visible.len() < old_len {
            self.password.truncate(visible.len());
        } else {
            // Only mask characters were typed; their position is unknown.
            self.password.resize(visible.len(), MASK_CHAR);
        }

        Some(self.mask())
    }

    /// Insert or replace the character at `index`, assuming a single edit.
    fn apply_single_edit(&mut self, index: usize, c: char, new_len: usize) {
        let old_len = self.password.len();
        let index = index.min(old_len);
        if new_len > old_len {
            self.password.insert(index, c);
        } else if index < old_len {
            self.password[index] = c;
            self.password.truncate(new_len);
        } else {
            self.password.truncate(new_len);
        }
    }
}

impl std::fmt::Debug for PasswordMask {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("PasswordMask")
            .field("len", &self.password.len())
            .finish_non_exhaustive()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn typed(text: &str) -> PasswordMask {
        let mut mask = PasswordMask::new();
        for c in text.chars() {
            let visible = format!("{}{c}", mask.mask());
            mask.on_change(&visible);
        }
        mask
    }

    #[test]
    fn test_typing_builds_password() {
        let mut mask = PasswordMask::new();
        assert_eq!(mask.on_change("s").as_deref(), Some("*"));
        assert_eq!(mask.on_change("*e").as_deref(), Some("**"));
        assert_eq!(mask.on_change("**c").as_deref(), Some("***"));
        assert_eq!(mask.password(), "sec");
    }

    #[test]
    fn test_rendered_mask_is_not_an_edit() {
        let mut mask = typed("abc");
        assert_eq!(mask.on_change("***"), None);
        assert_eq!(mask.password(), "abc");
    }

    #[test]
    fn test_insert_in_the_middle() {
        let mut mask = typed("abc");
        assert_eq!(mask.mask(), "***");
        assert_eq!(mask.on_change("**x*").as_deref(), Some("****"));
        assert_eq!(mask.password(), "abxc");
    }

    #[test]
    fn test_insert_at_start() {
        let mut mask = typed("abc");
        mask.on_change("x***");
        assert_eq!(mask.password(), "xabc");
    }

    #[test]
    fn test_shrink_truncates() {
        let mut mask = typed("abc");
        assert_eq!(mask.on_change("**").as_deref(), Some("**"));
        assert_eq!(mask.password(), "ab");
        mask.on_change("");
        assert_eq!(mask.password(), "");
    }

    #[test]
    fn test_replace_character() {
        let mut mask = typed("abc");
        mask.on_change("*x*");
        assert_eq!(mask.password(), "axc");
    }

    #[test]
    fn test_paste_keeps_all_characters() {
        let mut mask = typed("ab");
        mask.on_change("*xyz*");
        assert_eq!(mask.password(), "axyzb");
    }

    #[test]
    fn test_replace_selection() {
        let mut mask = typed("abcdef");
        mask.on_change("*XY**");
        assert_eq!(mask.password(), "aXYef");
    }

    #[test]
    fn test_scattered_edit_falls_back_to_first_character() {
        let mut mask = typed("abc");
        mask.on_change("x**y*");
        assert_eq!(mask.password(), "xabc");
        assert_eq!(mask.mask(), "****");
    }

    #[test]
    fn test_typed_mask_character_is_appended() {
        let mut mask = typed("ab");
        mask.on_change("***");
        assert_eq!(mask.password(), "ab*");
    }

    #[test]
    fn test_unicode_password() {
        let mask = typed("pä§");
        assert_eq!(mask.password(), "pä§");
        assert_eq!(mask.mask(), "***");
    }

    #[test]
    fn test_debug_hides_password() {
        let debug = format!("{:?}", typed("hunter2"));
        assert!(!debug.contains("hunter2"));
    }
}
