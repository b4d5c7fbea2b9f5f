//=========================================================================
// Tutorial Stage
//=========================================================================
//
// One step of the interactive tutorial: an optional message plus the
// predicates and hooks that decide when the overlay moves on.
//
// A stage without an advance predicate is *blocking*: the overlay waits
// for an explicit `advance()` (a tap) and freezes gameplay meanwhile.
//
//=========================================================================

//=== External Dependencies ===============================================

use std::fmt;

//=== Callback Types ======================================================

/// Predicate evaluated once per overlay update while its stage is current.
pub type StageTest = Box<dyn FnMut() -> bool>;

/// Callback fired on stage changes.
pub type StageHook = Box<dyn FnMut()>;

//=== TutorialStage =======================================================

/// A single tutorial step, assembled with the builder methods.
///
/// ```rust
/// # use radum_engine::core::tutorial::TutorialStage;
/// let intro = TutorialStage::new().message(["Tap a cell", "to place a piece"]);
/// let wait = TutorialStage::new().advance_when(|| true).allow_submit();
/// assert!(intro.is_blocking());
/// assert!(!wait.is_blocking());
/// ```
#[derive(Default)]
pub struct TutorialStage {
    message: Option<Vec<String>>,
    advance_test: Option<StageTest>,
    reverse_test: Option<StageTest>,
    can_submit: bool,
    on_activate: Option<StageHook>,
    on_advance: Option<StageHook>,
}

impl TutorialStage {
    pub fn new() -> Self {
        Self::default()
    }

    //--- Builder ----------------------------------------------------------

    /// Text lines shown in the tutorial panel, top line first.
    pub fn message<I, S>(mut self, lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.message = Some(lines.into_iter().map(Into::into).collect());
        self
    }

    /// Moves to the next stage once `test` holds.
    pub fn advance_when(mut self, test: impl FnMut() -> bool + 'static) -> Self {
        self.advance_test = Some(Box::new(test));
        self
    }

    /// Moves back to the previous stage once `test` holds.
    pub fn reverse_when(mut self, test: impl FnMut() -> bool + 'static) -> Self {
        self.reverse_test = Some(Box::new(test));
        self
    }

    /// Lets the underlying scene accept submit actions during this stage.
    pub fn allow_submit(mut self) -> Self {
        self.can_submit = true;
        self
    }

    /// Runs whenever this stage becomes current.
    pub fn on_activate(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_activate = Some(Box::new(hook));
        self
    }

    /// Runs when the overlay advances past this stage.
    pub fn on_advance(mut self, hook: impl FnMut() + 'static) -> Self {
        self.on_advance = Some(Box::new(hook));
        self
    }

    //--- Queries ----------------------------------------------------------

    pub fn lines(&self) -> Option<&[String]> {
        self.message.as_deref()
    }

    /// `true` when the stage waits for an explicit advance.
    pub fn is_blocking(&self) -> bool {
        self.advance_test.is_none()
    }

    pub fn can_submit(&self) -> bool {
        self.can_submit
    }

    //--- Evaluation -------------------------------------------------------

    pub(super) fn should_reverse(&mut self) -> bool {
        self.reverse_test.as_mut().is_some_and(|test| test())
    }

    pub(super) fn should_advance(&mut self) -> bool {
        self.advance_test.as_mut().is_some_and(|test| test())
    }

    pub(super) fn fire_activate(&mut self) {
        if let Some(hook) = self.on_activate.as_mut() {
            hook();
        }
    }

    pub(super) fn fire_advance(&mut self) {
        if let Some(hook) = self.on_advance.as_mut() {
            hook();
        }
    }
}

impl fmt::Debug for TutorialStage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("TutorialStage")
            .field("message", &self.message)
            .field("blocking", &self.is_blocking())
            .field("reversible", &self.reverse_test.is_some())
            .field("can_submit", &self.can_submit)
            .finish()
    }
}

//=========================================================================
// Unit Tests
//=========================================================================
