//! Semantic icon names.
//!
//! Wireframes name icons by meaning (`add`, `delete`, `users`). Each name maps
//! to a Tabler icon and a text symbol used when no icon font is loaded.

/// A resolved icon.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct IconGlyph {
    /// Tabler icon name, used as the `ti-*` class.
    pub tabler: &'static str,
    /// Plain-text stand-in.
    pub symbol: &'static str,
}

const fn glyph(tabler: &'static str, symbol: &'static str) -> IconGlyph {
    IconGlyph { tabler, symbol }
}

/// Shown for names outside the table.
pub const FALLBACK_ICON: IconGlyph = glyph("x", "✕");

const ICONS: &[(&str, IconGlyph)] = &[
    // navigation
    ("home", glyph("home", "⌂")),
    ("back", glyph("arrow-left", "←")),
    ("forward", glyph("arrow-right", "→")),
    ("close", glyph("x", "✕")),
    ("menu", glyph("menu-2", "☰")),
    ("search", glyph("search", "⌕")),
    ("filter", glyph("filter", "⏷")),
    ("sort", glyph("arrows-sort", "⇅")),
    // actions
    ("add", glyph("plus", "+")),
    ("remove", glyph("minus", "−")),
    ("edit", glyph("edit", "✎")),
    ("delete", glyph("trash", "🗑")),
    ("save", glyph("device-floppy", "💾")),
    ("cancel", glyph("x", "✕")),
    ("check", glyph("check", "✓")),
    // status
    ("error", glyph("alert-circle", "⊘")),
    ("warning", glyph("alert-triangle", "⚠")),
    ("info", glyph("info-circle", "ⓘ")),
    ("success", glyph("check-circle", "✔")),
    ("star", glyph("star", "★")),
    ("heart", glyph("heart", "♥")),
    ("bookmark", glyph("bookmark", "🔖")),
    ("share", glyph("share", "⤴")),
    ("settings", glyph("settings", "⚙")),
    ("profile", glyph("user-circle", "☺")),
    ("notification", glyph("bell", "🔔")),
    ("message", glyph("message", "✉")),
    ("phone", glyph("phone", "☎")),
    ("email", glyph("mail", "✉")),
    ("calendar", glyph("calendar", "📅")),
    ("clock", glyph("clock", "◷")),
    ("location", glyph("map-pin", "⌖")),
    ("camera", glyph("camera", "📷")),
    ("image", glyph("photo", "🖼")),
    ("file", glyph("file", "📄")),
    ("folder", glyph("folder", "📁")),
    ("download", glyph("download", "⤓")),
    ("upload", glyph("upload", "⤒")),
    ("refresh", glyph("refresh", "↻")),
    ("sync", glyph("sync", "⇄")),
    ("wifi", glyph("wifi", "📶")),
    ("bluetooth", glyph("bluetooth", "ᛒ")),
    ("archive", glyph("archive", "🗄")),
    ("users", glyph("users", "👥")),
    ("clipboard", glyph("clipboard", "📋")),
    ("chart", glyph("chart-bar", "📊")),
    ("dashboard", glyph("dashboard", "▦")),
    ("arrow-down", glyph("arrow-down", "↓")),
    ("play", glyph("player-play", "▶")),
    ("pause", glyph("player-pause", "⏸")),
];

/// Look up a semantic name, then a raw Tabler name.
pub fn lookup_icon(name: &str) -> Option<IconGlyph> {
    let name = name.trim();
    ICONS
        .iter()
        .find(|(semantic, _)| semantic.eq_ignore_ascii_case(name))
        .or_else(|| ICONS.iter().find(|(_, glyph)| glyph.tabler == name))
        .map(|(_, glyph)| *glyph)
}

/// Resolve an icon name; unknown names get [`FALLBACK_ICON`].
pub fn icon_glyph(name: &str) -> IconGlyph {
    lookup_icon(name).unwrap_or(FALLBACK_ICON)
}

/// Text for an icon. Names of one or two characters (`+`, `★`) are
/// already symbols and pass through.
pub fn icon_symbol(name: &str) -> String {
    match lookup_icon(name) {
        Some(glyph) => glyph.symbol.to_string(),
        None if (1..=2).contains(&name.trim().chars().count()) => name.trim().to_string(),
        None => FALLBACK_ICON.symbol.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_semantic_names() {
        assert_eq!(icon_glyph("add").tabler, "plus");
        assert_eq!(icon_glyph("Delete").tabler, "trash");
        assert_eq!(icon_glyph("users").symbol, "👥");
    }

    #[test]
    fn test_tabler_names_accepted() {
        assert_eq!(lookup_icon("device-floppy"), Some(icon_glyph("save")));
    }

    #[test]
    fn test_unknown_falls_back() {
        assert_eq!(lookup_icon("sparkle"), None);
        assert_eq!(icon_glyph("sparkle"), FALLBACK_ICON);
        assert_eq!(icon_symbol("sparkle"), "✕");
    }

    #[test]
    fn test_symbols_pass_through() {
        assert_eq!(icon_symbol("+"), "+");
        assert_eq!(icon_symbol("add"), "+");
    }
}
