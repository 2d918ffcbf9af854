pub const TITLE: &str = " Employee Records ";
pub const SEARCH_TITLE: &str = " Search (/) ";
pub const SEARCH_PLACEHOLDER: &str = "Search by Name or Position";
pub const LEVEL_TITLE: &str = " Level (l) ";
pub const UPLOAD_PROMPT: &str = "Upload .xlsx/.xls file: ";
pub const PREVIEW_HINT: &str = " c: Confirm Insert  x: Discard ";
pub const TABLE_HEADER: [&str; 5] = ["", "Name", "Position", "Level", "Action"];
pub const PREVIEW_HEADER: [&str; 3] = ["Name", "Position", "Level"];
pub const KEY_HINTS: &str =
    "↑↓ move  space select  a all  / search  l level  d delete  D delete selected  u upload  r reload  q quit";
pub const CHECKED: &str = "[x]";
pub const UNCHECKED: &str = "[ ]";
