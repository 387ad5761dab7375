pub const ICON_INFO: &str = "ℹ";
pub const ICON_WARNING: &str = "⚠";
pub const ICON_SUCCESS: &str = "✔";
pub const ICON_DANGER: &str = "✖";
pub const BUSY_INDICATOR: &str = "[working...]";
pub const DETAIL_INDENT: &str = "    ";
pub const PROMPT_HINT: &str =
    "Enter `<kind> <value>`, a bare value for the selected kind, `kind <name>`, `help` or `quit`.";
