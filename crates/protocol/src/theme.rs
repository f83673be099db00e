use serde::{Deserialize, Serialize};

/// Semantic color tokens resolved by the renderer's active palette.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ThemeToken {
    AccentGreen,
    AccentWhite,

    Background,
    Surface,
    Border,

    TextPrimary,
    TextSecondary,
    TextMuted,

    BootText,
    BootPrompt,

    HudActive,
    HudInactive,

    GlitchBright,
    GlitchDim,

    CardTitle,
    CardMeta,

    OverlayBackground,
    OverlayText,
    LightboxChrome,
}
