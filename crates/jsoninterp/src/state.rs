//! Resumable lexical state.
//!
//! A [`LexState`] is the only thing carried from one line to the next. It is a
//! stack of [`Frame`]s; the empty stack is the implicit root, i.e. the
//! top-level value context. Nesting depth lives in the length of the stack and
//! never in the set of frame kinds, which stays fixed:
//!
//! | Frame | Context |
//! |---|---|
//! | *(empty)* | top-level value |
//! | [`Frame::Object`] | inside `{ }`, with the slot being awaited |
//! | [`Frame::Array`] | inside `[ ]` |
//! | [`Frame::String`] | inside `" "`, as a key or a value |
//! | [`Frame::Interpolation`] | inside `${ }`, delegated to the embedded grammar |
//! | [`Frame::BlockComment`] | inside `/* */` |
//!
//! Whatever context a string or interpolation returns to is the frame beneath
//! it, so it never has to be encoded in the frame kind.
use alloc::vec::Vec;

/// What an object is waiting for next.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum ObjectSlot {
    /// After `{` or `,`.
    Key,
    /// After a key string.
    Colon,
    /// After `:`.
    Value,
    /// After a value: `,` or `}`.
    Next,
}

/// Whether a string is an object key or a value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum StringRole {
    /// An object key.
    Key,
    /// Any other string.
    Value,
}

/// Where scanning resumes once an interpolation region closes.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(rename_all = "snake_case")
)]
pub enum Resume {
    /// The region stood in for a whole value; the enclosing slot advances.
    Value,
    /// The region was spliced into a string; string scanning continues.
    String,
}

/// An open `${ ... }` region.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Interpolation {
    /// What the region stands in for.
    pub resume: Resume,
    /// Raw text is currently owned by the embedded grammar. Always `true`
    /// while the frame is on the stack: the frame is popped as the region
    /// closes.
    pub embedded: bool,
    /// Opaque word owned by the embedded grammar, persisted across lines.
    pub carry: u32,
}

impl Interpolation {
    pub(crate) const fn open(resume: Resume) -> Self {
        Self {
            resume,
            embedded: true,
            carry: 0,
        }
    }
}

/// One entry of the lexical stack.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
#[cfg_attr(
    feature = "serde",
    derive(serde::Serialize, serde::Deserialize),
    serde(tag = "frame", content = "data", rename_all = "snake_case")
)]
pub enum Frame {
    /// Inside `{ ... }`.
    Object(ObjectSlot),
    /// Inside `[ ... ]`.
    Array,
    /// Inside a string literal.
    String(StringRole),
    /// Inside `${ ... }`.
    Interpolation(Interpolation),
    /// Inside `/* ... */`.
    BlockComment,
}

/// The state needed to resume tokenizing at the start of a line.
///
/// `LexState::default()` is the state at the start of a document. Two states
/// compare equal exactly when scanning the same text from them yields the same
/// result, so hosts may memoize on `(LexState, line)`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LexState {
    frames: Vec<Frame>,
}

impl LexState {
    pub(crate) const EMPTY: LexState = LexState { frames: Vec::new() };

    /// The state at the start of a document.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Returns `true` at the top level, outside of any construct.
    #[must_use]
    pub fn is_initial(&self) -> bool {
        self.frames.is_empty()
    }

    /// Number of open frames.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.frames.len()
    }

    /// Frames from outermost to innermost.
    #[must_use]
    pub fn frames(&self) -> &[Frame] {
        &self.frames
    }

    /// The innermost frame.
    #[must_use]
    pub fn top(&self) -> Option<&Frame> {
        self.frames.last()
    }

    /// Returns `true` when the next line starts inside an interpolation region
    /// whose text belongs to the embedded grammar.
    #[must_use]
    pub fn is_embedded(&self) -> bool {
        matches!(
            self.top(),
            Some(Frame::Interpolation(Interpolation { embedded: true, .. }))
        )
    }

    pub(crate) fn top_mut(&mut self) -> Option<&mut Frame> {
        self.frames.last_mut()
    }

    pub(crate) fn push(&mut self, frame: Frame) {
        self.frames.push(frame);
    }

    pub(crate) fn pop(&mut self) -> Option<Frame> {
        self.frames.pop()
    }

    /// Pops every frame down to and including the innermost frame matching
    /// `is_match`. Leaves the stack alone and returns `false` if none matches.
    pub(crate) fn pop_through(&mut self, is_match: impl Fn(&Frame) -> bool) -> bool {
        match self.frames.iter().rposition(is_match) {
            Some(idx) => {
                self.frames.truncate(idx);
                true
            }
            None => false,
        }
    }

    /// Records that a complete value was just scanned in the current slot.
    pub(crate) fn value_done(&mut self) {
        if let Some(Frame::Object(slot)) = self.top_mut() {
            *slot = ObjectSlot::Next;
        }
    }
}

impl FromIterator<Frame> for LexState {
    fn from_iter<I: IntoIterator<Item = Frame>>(iter: I) -> Self {
        Self {
            frames: iter.into_iter().collect(),
        }
    }
}
