//! Text-selection capture for the rendered content area.
//!
//! The platform reports every selection change; the tracker keeps only the
//! spans that matter for the "explain selection" affordance: non-empty,
//! trimmed text whose anchor sits inside the content container. Subscribers
//! are notified on every effective change and removed on teardown. This is
//! a push-based, single-threaded event source; spans are never persisted.

/// Screen position of the selection anchor, used to place the explanation
/// popover next to the selected text.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct AnchorPoint {
    pub x: f32,
    pub y: f32,
}

/// A selection change as reported by the platform, before filtering.
#[derive(Clone, Debug, Default)]
pub struct RawSelection {
    pub text: String,
    /// Whether the selection anchor lies within the content container.
    pub inside_container: bool,
    /// `None` when the platform cannot map the selection to screen
    /// coordinates reliably; the span is still captured without one.
    pub anchor: Option<AnchorPoint>,
}

/// A captured selection ready for an explanation request.
#[derive(Clone, Debug, PartialEq)]
pub struct SelectionSpan {
    pub text: String,
    pub anchor: Option<AnchorPoint>,
}

/// Handle returned by [`SelectionTracker::subscribe`]; pass it back to
/// [`SelectionTracker::unsubscribe`] on teardown.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct SubscriptionId(usize);

type Handler = Box<dyn FnMut(Option<&SelectionSpan>)>;

#[derive(Default)]
pub struct SelectionTracker {
    current: Option<SelectionSpan>,
    handlers: Vec<(SubscriptionId, Handler)>,
    next_id: usize,
}

impl SelectionTracker {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn current(&self) -> Option<&SelectionSpan> {
        self.current.as_ref()
    }

    /// Register a handler for selection changes. The handler receives the
    /// new span, or `None` when the selection was cleared.
    pub fn subscribe(&mut self, handler: impl FnMut(Option<&SelectionSpan>) + 'static) -> SubscriptionId {
        let id = SubscriptionId(self.next_id);
        self.next_id += 1;
        self.handlers.push((id, Box::new(handler)));
        id
    }

    pub fn unsubscribe(&mut self, id: SubscriptionId) {
        self.handlers.retain(|(handler_id, _)| *handler_id != id);
    }

    /// Feed a platform selection-change event through the tracker. Empty or
    /// out-of-container selections clear the span. Returns true when the
    /// captured span changed.
    pub fn update(&mut self, raw: Option<RawSelection>) -> bool {
        let span = raw.and_then(|raw| {
            if !raw.inside_container {
                return None;
            }
            let text = raw.text.trim();
            if text.is_empty() {
                return None;
            }
            Some(SelectionSpan {
                text: text.to_string(),
                anchor: raw.anchor,
            })
        });

        if span == self.current {
            return false;
        }
        self.current = span;
        for (_, handler) in &mut self.handlers {
            handler(self.current.as_ref());
        }
        true
    }

    pub fn clear(&mut self) {
        self.update(None);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::rc::Rc;

    fn inside(text: &str) -> RawSelection {
        RawSelection {
            text: text.to_string(),
            inside_container: true,
            anchor: Some(AnchorPoint { x: 10.0, y: 20.0 }),
        }
    }

    #[test]
    fn captures_trimmed_text_with_anchor() {
        let mut tracker = SelectionTracker::new();
        assert!(tracker.update(Some(inside("  fn main()  \n"))));
        let span = tracker.current().unwrap();
        assert_eq!(span.text, "fn main()");
        assert_eq!(span.anchor, Some(AnchorPoint { x: 10.0, y: 20.0 }));
    }

    #[test]
    fn whitespace_only_selection_clears() {
        let mut tracker = SelectionTracker::new();
        tracker.update(Some(inside("some text")));
        assert!(tracker.update(Some(inside("   \n\t"))));
        assert!(tracker.current().is_none());
    }

    #[test]
    fn selection_outside_container_clears() {
        let mut tracker = SelectionTracker::new();
        tracker.update(Some(inside("some text")));
        let outside = RawSelection {
            text: "other text".to_string(),
            inside_container: false,
            anchor: None,
        };
        assert!(tracker.update(Some(outside)));
        assert!(tracker.current().is_none());
    }

    #[test]
    fn missing_anchor_still_captures_the_text() {
        let mut tracker = SelectionTracker::new();
        let raw = RawSelection {
            text: "let x = 1;".to_string(),
            inside_container: true,
            anchor: None,
        };
        assert!(tracker.update(Some(raw)));
        let span = tracker.current().unwrap();
        assert_eq!(span.text, "let x = 1;");
        assert!(span.anchor.is_none());
    }

    #[test]
    fn unchanged_selection_does_not_notify() {
        let mut tracker = SelectionTracker::new();
        let count = Rc::new(RefCell::new(0));
        let seen = count.clone();
        tracker.subscribe(move |_| *seen.borrow_mut() += 1);

        assert!(tracker.update(Some(inside("abc"))));
        assert!(!tracker.update(Some(inside("abc"))));
        assert!(!tracker.update(Some(inside("  abc  "))));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn unsubscribe_stops_notifications() {
        let mut tracker = SelectionTracker::new();
        let count = Rc::new(RefCell::new(0));
        let seen = count.clone();
        let id = tracker.subscribe(move |_| *seen.borrow_mut() += 1);

        tracker.update(Some(inside("abc")));
        tracker.unsubscribe(id);
        tracker.update(Some(inside("def")));
        assert_eq!(*count.borrow(), 1);
    }

    #[test]
    fn clear_notifies_with_none() {
        let mut tracker = SelectionTracker::new();
        let last = Rc::new(RefCell::new(Some("sentinel".to_string())));
        let seen = last.clone();
        tracker.subscribe(move |span| {
            *seen.borrow_mut() = span.map(|s| s.text.clone());
        });

        tracker.update(Some(inside("abc")));
        assert_eq!(last.borrow().as_deref(), Some("abc"));
        tracker.clear();
        assert!(last.borrow().is_none());
    }
}
