#![no_main]

use arbitrary::Arbitrary;
use fmask_core::{Event, KeyCode, KeyEvent, Modifiers, PasteEvent, Selection};
use fmask_text::digits::grapheme_count;
use fmask_text::{DATE, DateValidator, PHONE};
use fmask_widgets::{AcceptingHost, DateField, PhoneField, PresentationMode};
use libfuzzer_sys::fuzz_target;

#[derive(Debug, Arbitrary)]
enum Step {
    Char(char),
    Backspace,
    Delete,
    Left { shift: bool },
    Right { shift: bool },
    Home,
    End,
    SelectAll,
    Select(u8, u8),
    Paste(String),
    Focus(bool),
}

impl Step {
    fn event(&self) -> Event {
        let key = |code| Event::Key(KeyEvent::new(code));
        let shifted = |code, shift: bool| {
            let mods = if shift { Modifiers::SHIFT } else { Modifiers::NONE };
            Event::Key(KeyEvent::new(code).with_modifiers(mods))
        };
        match self {
            Self::Char(c) => key(KeyCode::Char(*c)),
            Self::Backspace => key(KeyCode::Backspace),
            Self::Delete => key(KeyCode::Delete),
            Self::Left { shift } => shifted(KeyCode::Left, *shift),
            Self::Right { shift } => shifted(KeyCode::Right, *shift),
            Self::Home => key(KeyCode::Home),
            Self::End => key(KeyCode::End),
            Self::SelectAll => {
                Event::Key(KeyEvent::new(KeyCode::Char('a')).with_modifiers(Modifiers::CTRL))
            }
            Self::Select(a, b) => Event::Select(Selection::new(usize::from(*a), usize::from(*b))),
            Self::Paste(text) => Event::Paste(PasteEvent::new(text.clone())),
            Self::Focus(focused) => Event::Focus(*focused),
        }
    }
}

#[derive(Debug, Arbitrary)]
struct Input {
    native: bool,
    steps: Vec<Step>,
}

fuzz_target!(|input: Input| {
    let validator = DateValidator::default();
    let mut date = if input.native {
        DateField::native(Box::new(AcceptingHost))
    } else {
        DateField::free_text()
    };
    let mut phone = PhoneField::new();

    for step in input.steps.iter().take(256) {
        let event = step.event();
        date.handle_event(&event);
        phone.handle_event(&event);

        // Post-conditions that must always hold:
        assert!(date.cursor() <= grapheme_count(date.value()), "date caret OOB");
        assert!(phone.cursor() <= grapheme_count(phone.value()), "phone caret OOB");
        if date.mode() == PresentationMode::Editing {
            assert!(validator.accepts(&date.digits()), "invalid date digits kept");
        }
        assert!(date.digits().len() <= DATE.max_digits);
        assert!(phone.digits().len() <= PHONE.max_digits);
    }
});
