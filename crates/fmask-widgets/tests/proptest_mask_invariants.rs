#![forbid(unsafe_code)]

//! Property-based invariant tests for the field controllers.
//!
//! Random keystroke sequences are replayed against fresh fields.
//!
//! 1. After any edit the value is the canonical rendering of its digits
//! 2. The caret always lies inside the text
//! 3. A date field only ever holds digits the validator accepts
//! 4. A focused phone field never loses its opening parenthesis
//! 5. The mirror holds ISO exactly when eight digits are present
//! 6. Key releases never change a field

use fmask_core::{Event, KeyCode, KeyEvent, KeyEventKind, Modifiers, PasteEvent};
use fmask_text::digits::grapheme_count;
use fmask_text::{DATE, DateValidator, PHONE};
use fmask_widgets::{DateField, MirrorCell, PhoneField};
use proptest::prelude::*;

// ── Helpers ──────────────────────────────────────────────────────────

#[derive(Debug, Clone)]
enum Op {
    Digit(u8),
    Letter(char),
    Backspace,
    Delete,
    Left,
    Right,
    Home,
    End,
    ShiftLeft,
    SelectAll,
    Paste(String),
}

impl Op {
    fn event(&self) -> Event {
        let key = |code| Event::Key(KeyEvent::new(code));
        match self {
            Self::Digit(d) => key(KeyCode::Char(char::from(b'0' + d))),
            Self::Letter(c) => key(KeyCode::Char(*c)),
            Self::Backspace => key(KeyCode::Backspace),
            Self::Delete => key(KeyCode::Delete),
            Self::Left => key(KeyCode::Left),
            Self::Right => key(KeyCode::Right),
            Self::Home => key(KeyCode::Home),
            Self::End => key(KeyCode::End),
            Self::ShiftLeft => {
                Event::Key(KeyEvent::new(KeyCode::Left).with_modifiers(Modifiers::SHIFT))
            }
            Self::SelectAll => {
                Event::Key(KeyEvent::new(KeyCode::Char('a')).with_modifiers(Modifiers::CTRL))
            }
            Self::Paste(text) => Event::Paste(PasteEvent::new(text.clone())),
        }
    }
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        6 => (0u8..10).prop_map(Op::Digit),
        1 => prop::char::range('a', 'z').prop_map(Op::Letter),
        2 => Just(Op::Backspace),
        1 => Just(Op::Delete),
        1 => Just(Op::Left),
        1 => Just(Op::Right),
        1 => Just(Op::Home),
        1 => Just(Op::End),
        1 => Just(Op::ShiftLeft),
        1 => Just(Op::SelectAll),
        1 => "[0-9/() -]{0,12}".prop_map(Op::Paste),
    ]
}

fn ops() -> impl Strategy<Value = Vec<Op>> {
    proptest::collection::vec(op(), 0..40)
}

// ═════════════════════════════════════════════════════════════════════════
// 1-3. Date field
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn date_value_stays_canonical(ops in ops()) {
        let mut field = DateField::free_text();
        field.handle_event(&Event::Focus(true));
        for op in &ops {
            field.handle_event(&op.event());
            prop_assert!(DATE.is_canonical(field.value()), "{:?} -> {}", op, field.value());
            prop_assert!(field.cursor() <= grapheme_count(field.value()));
        }
    }

    #[test]
    fn date_digits_are_always_accepted(ops in ops()) {
        let validator = DateValidator::default();
        let mut field = DateField::free_text();
        for op in &ops {
            field.handle_event(&op.event());
            prop_assert!(validator.accepts(&field.digits()), "{}", field.value());
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 2, 4. Phone field
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn phone_keeps_prefix_while_focused(ops in ops()) {
        let mut field = PhoneField::new();
        field.handle_event(&Event::Focus(true));
        for op in &ops {
            field.handle_event(&op.event());
            prop_assert!(field.value().starts_with('('), "{:?} -> {}", op, field.value());
            prop_assert!(PHONE.is_canonical(field.value()));
            prop_assert!(field.cursor() <= grapheme_count(field.value()));
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 5. Mirror
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn mirror_tracks_complete_dates(ops in ops()) {
        let mirror = MirrorCell::new();
        let mut field = DateField::free_text().with_mirror(Box::new(mirror.clone()));
        for op in &ops {
            field.handle_event(&op.event());
        }
        let digits = field.digits();
        if digits.len() == 8 {
            let expected = format!("{}-{}-{}", &digits[4..8], &digits[2..4], &digits[0..2]);
            prop_assert_eq!(mirror.get(), expected);
        } else {
            prop_assert_eq!(mirror.get(), "");
        }
    }
}

// ═════════════════════════════════════════════════════════════════════════
// 6. Releases
// ═════════════════════════════════════════════════════════════════════════

proptest! {
    #[test]
    fn releases_are_inert(ops in ops(), last in op()) {
        let mut field = DateField::free_text();
        for op in &ops {
            field.handle_event(&op.event());
        }
        let before = (field.value().to_owned(), field.selection());
        if let Event::Key(key) = last.event() {
            field.handle_event(&Event::Key(key.with_kind(KeyEventKind::Release)));
        }
        prop_assert_eq!((field.value().to_owned(), field.selection()), before);
    }
}
