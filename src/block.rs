/// Kind of list the scanner is currently inside
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Unordered,
    Ordered,
}

impl ListKind {
    pub fn open_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "<ul>",
            ListKind::Ordered => "<ol>",
        }
    }

    pub fn close_tag(self) -> &'static str {
        match self {
            ListKind::Unordered => "</ul>",
            ListKind::Ordered => "</ol>",
        }
    }
}

/// State carried from one line to the next while scanning a document
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScanState {
    pub in_code_block: bool,
    /// `None` outside of a list; otherwise the kind that opened the list
    pub list: Option<ListKind>,
}
