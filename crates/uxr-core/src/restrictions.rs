//! # UX Restriction Flags
//!
//! Bit values making up a restriction bitmask. Each set bit disallows one UI
//! capability. The engine treats the mask as opaque apart from two values:
//! [`UxRestrictions::BASELINE`] (nothing restricted) and
//! [`UxRestrictions::FULLY_RESTRICTED`] (every known flag set), which is the
//! fail-safe used whenever configuration is missing.

/// Namespace for restriction bit constants.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct UxRestrictions;

impl UxRestrictions {
    /// No restrictions in force.
    pub const BASELINE: u32 = 0;
    /// No dialpad.
    pub const NO_DIALPAD: u32 = 0x1;
    /// No filtering of lists.
    pub const NO_FILTERING: u32 = 0x1 << 1;
    /// Displayed strings must be limited in length.
    pub const LIMIT_STRING_LENGTH: u32 = 0x1 << 2;
    /// No text entry through a keyboard.
    pub const NO_KEYBOARD: u32 = 0x1 << 3;
    /// No video playback.
    pub const NO_VIDEO: u32 = 0x1 << 4;
    /// Browsable content must be limited in item count and depth.
    pub const LIMIT_CONTENT: u32 = 0x1 << 5;
    /// No setup or configuration flows.
    pub const NO_SETUP: u32 = 0x1 << 6;
    /// No display of text messages.
    pub const NO_TEXT_MESSAGE: u32 = 0x1 << 7;
    /// No voice transcription shown as text.
    pub const NO_VOICE_TRANSCRIPTION: u32 = 0x1 << 8;

    /// Every known restriction flag.
    pub const FULLY_RESTRICTED: u32 = Self::NO_DIALPAD
        | Self::NO_FILTERING
        | Self::LIMIT_STRING_LENGTH
        | Self::NO_KEYBOARD
        | Self::NO_VIDEO
        | Self::LIMIT_CONTENT
        | Self::NO_SETUP
        | Self::NO_TEXT_MESSAGE
        | Self::NO_VOICE_TRANSCRIPTION;

    /// Named flags, lowest bit first.
    pub fn named_flags() -> &'static [(&'static str, u32)] {
        &[
            ("no_dialpad", Self::NO_DIALPAD),
            ("no_filtering", Self::NO_FILTERING),
            ("limit_string_length", Self::LIMIT_STRING_LENGTH),
            ("no_keyboard", Self::NO_KEYBOARD),
            ("no_video", Self::NO_VIDEO),
            ("limit_content", Self::LIMIT_CONTENT),
            ("no_setup", Self::NO_SETUP),
            ("no_text_message", Self::NO_TEXT_MESSAGE),
            ("no_voice_transcription", Self::NO_VOICE_TRANSCRIPTION),
        ]
    }

    /// Names of the known flags set in `mask`.
    pub fn flag_names(mask: u32) -> Vec<&'static str> {
        Self::named_flags()
            .iter()
            .filter(|(_, bit)| mask & bit != 0)
            .map(|(name, _)| *name)
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fully_restricted_is_union_of_flags() {
        let union = UxRestrictions::named_flags()
            .iter()
            .fold(0u32, |acc, (_, bit)| acc | bit);
        assert_eq!(union, UxRestrictions::FULLY_RESTRICTED);
        assert_eq!(UxRestrictions::FULLY_RESTRICTED, 0x1FF);
    }

    #[test]
    fn test_flags_are_distinct_single_bits() {
        let flags = UxRestrictions::named_flags();
        for (i, (_, a)) in flags.iter().enumerate() {
            assert_eq!(a.count_ones(), 1);
            for (_, b) in &flags[i + 1..] {
                assert_eq!(a & b, 0);
            }
        }
    }

    #[test]
    fn test_flag_names() {
        assert!(UxRestrictions::flag_names(UxRestrictions::BASELINE).is_empty());
        assert_eq!(
            UxRestrictions::flag_names(UxRestrictions::NO_DIALPAD | UxRestrictions::NO_VIDEO),
            vec!["no_dialpad", "no_video"]
        );
        assert_eq!(
            UxRestrictions::flag_names(UxRestrictions::FULLY_RESTRICTED).len(),
            9
        );
    }
}
