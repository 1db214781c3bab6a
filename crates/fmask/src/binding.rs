#![forbid(unsafe_code)]

//! Attaching field controllers to host elements.
//!
//! The host describes its text inputs with [`ElementDescriptor`]s; [`bind`]
//! creates one independent controller per element that matches a mask rule.
//! Elements matching nothing are left alone. A page without matching
//! elements yields empty [`Bindings`].

use fmask_core::Event;
use fmask_widgets::{
    AcceptingHost, DateField, InputKind, MirrorCell, PhoneField, PresentationHost,
};

use crate::config::MaskConfig;
use crate::error::{BindingError, Error};

/// What the host knows about one input element.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ElementDescriptor {
    /// Element id.
    pub id: Option<String>,
    /// Native kind of the control.
    pub kind: InputKind,
    /// Value of the `data-mask` attribute.
    pub data_mask: Option<String>,
    /// Class list.
    pub classes: Vec<String>,
    /// Current text.
    pub value: String,
}

impl ElementDescriptor {
    /// A descriptor of the given kind.
    #[must_use]
    pub fn new(kind: InputKind) -> Self {
        Self {
            kind,
            ..Self::default()
        }
    }

    /// Set the id (builder).
    #[must_use]
    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    /// Set the `data-mask` attribute (builder).
    #[must_use]
    pub fn with_data_mask(mut self, value: impl Into<String>) -> Self {
        self.data_mask = Some(value.into());
        self
    }

    /// Add a class (builder).
    #[must_use]
    pub fn with_class(mut self, class: impl Into<String>) -> Self {
        self.classes.push(class.into());
        self
    }

    /// Set the current text (builder).
    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = value.into();
        self
    }

    fn has_id(&self, id: &str) -> bool {
        self.id.as_deref() == Some(id)
    }

    fn is_date(&self, config: &MaskConfig) -> bool {
        self.kind == InputKind::Date
            || self.data_mask.as_deref() == Some(config.date_mask_attribute.as_str())
            || self.classes.iter().any(|c| *c == config.date_mask_class)
    }
}

/// A controller bound to one element.
#[derive(Debug)]
pub enum BoundField {
    /// `DD/MM/YYYY` field.
    Date(DateField),
    /// `(DD)PPPPP-PPPP` field.
    Phone(PhoneField),
}

impl BoundField {
    /// Forward a host event. Returns `true` if the state changed.
    pub fn handle_event(&mut self, event: &Event) -> bool {
        match self {
            Self::Date(field) => field.handle_event(event),
            Self::Phone(field) => field.handle_event(event),
        }
    }

    /// Current text.
    #[must_use]
    pub fn value(&self) -> &str {
        match self {
            Self::Date(field) => field.value(),
            Self::Phone(field) => field.value(),
        }
    }

    /// The date controller, if this is a date field.
    #[must_use]
    pub fn as_date(&self) -> Option<&DateField> {
        match self {
            Self::Date(field) => Some(field),
            Self::Phone(_) => None,
        }
    }

    /// The phone controller, if this is a phone field.
    #[must_use]
    pub fn as_phone(&self) -> Option<&PhoneField> {
        match self {
            Self::Phone(field) => Some(field),
            Self::Date(_) => None,
        }
    }
}

/// Controllers created by [`bind`], keyed by element index.
#[derive(Debug, Default)]
pub struct Bindings {
    fields: Vec<(usize, BoundField)>,
    mirror: Option<MirrorCell>,
}

impl Bindings {
    /// Number of bound fields.
    #[must_use]
    pub fn len(&self) -> usize {
        self.fields.len()
    }

    /// Whether nothing was bound.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.fields.is_empty()
    }

    /// The controller bound to element `index`.
    #[must_use]
    pub fn get(&self, index: usize) -> Option<&BoundField> {
        self.fields
            .iter()
            .find(|(i, _)| *i == index)
            .map(|(_, field)| field)
    }

    /// The controller bound to element `index`, mutably.
    pub fn get_mut(&mut self, index: usize) -> Option<&mut BoundField> {
        self.fields
            .iter_mut()
            .find(|(i, _)| *i == index)
            .map(|(_, field)| field)
    }

    /// Forward `event` to the controller of element `index`.
    ///
    /// Events for unbound elements are ignored.
    pub fn dispatch(&mut self, index: usize, event: &Event) -> bool {
        self.get_mut(index)
            .is_some_and(|field| field.handle_event(event))
    }

    /// Bound controllers with their element indices.
    pub fn iter(&self) -> impl Iterator<Item = (usize, &BoundField)> {
        self.fields.iter().map(|(i, field)| (*i, field))
    }

    /// The shared ISO mirror, if the page has one.
    #[must_use]
    pub fn mirror(&self) -> Option<&MirrorCell> {
        self.mirror.as_ref()
    }
}

/// Bind controllers to `elements`; native date controls accept every switch.
pub fn bind(elements: &[ElementDescriptor], config: &MaskConfig) -> Bindings {
    bind_with(elements, config, |_| Box::new(AcceptingHost))
}

/// Bind controllers, asking `host_for` for each native date control's host.
///
/// An invalid `config` is replaced by [`MaskConfig::default`].
pub fn bind_with<F>(elements: &[ElementDescriptor], config: &MaskConfig, mut host_for: F) -> Bindings
where
    F: FnMut(&ElementDescriptor) -> Box<dyn PresentationHost>,
{
    let fallback;
    let config = match config.validate() {
        Ok(()) => config,
        Err(err) => {
            let err = Error::from(err);
            tracing::warn!(error = %err, action = %err.degradation(), "invalid mask config");
            fallback = MaskConfig::default();
            &fallback
        }
    };

    let _span = tracing::debug_span!("mask.bind", elements = elements.len()).entered();

    let mirror = elements
        .iter()
        .position(|el| el.has_id(&config.mirror_element_id))
        .map(|index| {
            tracing::debug!(index, "mirror bound");
            MirrorCell::new()
        });

    let validator = config.validator();
    let mut bindings = Bindings {
        fields: Vec::new(),
        mirror,
    };
    let mut phone_bound = false;

    for (index, el) in elements.iter().enumerate() {
        if el.has_id(&config.phone_element_id) {
            if phone_bound {
                let err = BindingError::DuplicateId {
                    id: config.phone_element_id.clone(),
                    index,
                };
                tracing::warn!(error = %err, "element skipped");
                continue;
            }
            phone_bound = true;
            let field = PhoneField::new().with_value(el.value.clone());
            bindings.fields.push((index, BoundField::Phone(field)));
            continue;
        }

        if el.is_date(config) {
            let field = if el.kind == InputKind::Date {
                DateField::native(host_for(el))
            } else {
                DateField::free_text()
            };
            let mut field = field
                .with_validator(validator)
                .with_value(el.value.clone());
            if let Some(mirror) = &bindings.mirror {
                field = field.with_mirror(Box::new(mirror.clone()));
            }
            bindings.fields.push((index, BoundField::Date(field)));
            continue;
        }

        if !el.has_id(&config.mirror_element_id) {
            tracing::trace!(error = %BindingError::Unmatched { index }, "element left unmasked");
        }
    }

    tracing::debug!(bound = bindings.len(), "binding complete");
    bindings
}
