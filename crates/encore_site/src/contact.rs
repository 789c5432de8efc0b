//! Contact form validation and mailto handoff
//!
//! The form never posts anywhere. A valid submission becomes a `mailto:`
//! navigation and the visitor's mail client takes it from there.

use std::sync::OnceLock;

use encore_dom::{Document, DomPatch, Element, NodeId, Query};
use regex::Regex;

use crate::error::ValidationError;
use crate::markup::{CONTACT_FORM, FORM_ERROR, HIDDEN};

/// Raw field values as typed
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Trimmed values that passed every rule
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ValidContact {
    pub name: String,
    pub email: String,
    pub message: String,
}

/// Result of a submit attempt
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// A field is missing from the markup; native submission proceeds
    NotIntercepted,
    /// First failing rule, now shown in the error slot
    Rejected(ValidationError),
    /// Navigation handed to the mail client
    Accepted(String),
}

impl SubmitOutcome {
    pub fn is_intercepted(&self) -> bool {
        !matches!(self, SubmitOutcome::NotIntercepted)
    }
}

/// `local@domain.tld`, no whitespace anywhere
pub fn is_valid_email(value: &str) -> bool {
    static EMAIL: OnceLock<Regex> = OnceLock::new();
    EMAIL
        .get_or_init(|| Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern compiles"))
        .is_match(value)
}

/// Check the rules in order and stop at the first failure
pub fn validate(fields: &ContactFields) -> Result<ValidContact, ValidationError> {
    let name = fields.name.trim();
    let email = fields.email.trim();
    let message = fields.message.trim();

    if name.is_empty() {
        return Err(ValidationError::MissingName);
    }
    if email.is_empty() {
        return Err(ValidationError::MissingEmail);
    }
    if !is_valid_email(email) {
        return Err(ValidationError::InvalidEmail);
    }
    if message.is_empty() {
        return Err(ValidationError::MissingMessage);
    }

    Ok(ValidContact {
        name: name.to_string(),
        email: email.to_string(),
        message: message.to_string(),
    })
}

/// Characters `encodeURIComponent` leaves alone but `urlencoding` escapes
const COMPONENT_UNRESERVED: [(&str, &str); 5] = [
    ("%21", "!"),
    ("%27", "'"),
    ("%28", "("),
    ("%29", ")"),
    ("%2A", "*"),
];

/// Percent-encode one URI component the way browsers' `encodeURIComponent` does
pub fn encode_component(text: &str) -> String {
    // Every '%' in the output starts an escape, so these only match whole escapes
    COMPONENT_UNRESERVED
        .iter()
        .fold(urlencoding::encode(text).into_owned(), |out, (escaped, raw)| {
            out.replace(escaped, raw)
        })
}

pub fn mailto_uri(recipient: &str, contact: &ValidContact) -> String {
    let subject = format!("Website message from {}", contact.name);
    let body = format!(
        "Name: {}\nEmail: {}\n\n{}",
        contact.name, contact.email, contact.message
    );
    format!(
        "mailto:{recipient}?subject={}&body={}",
        encode_component(&subject),
        encode_component(&body)
    )
}

/// Error slot contents: `Some` shows the message, `None` clears and hides
pub fn error_view(slot: NodeId, error: Option<ValidationError>) -> [DomPatch; 2] {
    [
        DomPatch::SetText {
            node: slot,
            text: error.map(|e| e.to_string()).unwrap_or_default(),
        },
        DomPatch::set_class(slot, HIDDEN, error.is_none()),
    ]
}

/// The `#contactForm` and its fields
#[derive(Clone, Debug)]
pub struct ContactForm {
    form: NodeId,
    name: Option<NodeId>,
    email: Option<NodeId>,
    message: Option<NodeId>,
    error_slot: NodeId,
    recipient: String,
}

impl ContactForm {
    /// Locate the form, make sure it has an error slot and switch off
    /// native validation. `None` without a form.
    pub fn setup(doc: &mut Document, recipient: &str) -> Option<Self> {
        let Some(form) = doc.get_element_by_id(CONTACT_FORM) else {
            tracing::debug!("no contact form");
            return None;
        };
        let field = |tag: &str, name: &str| doc.query_first(form, &Query::tag(tag).attr_eq("name", name));
        let name = field("input", "name");
        let email = field("input", "email");
        let message = field("textarea", "message");

        let error_slot = match doc.query_first(form, &Query::class_name(FORM_ERROR)) {
            Some(slot) => slot,
            None => {
                let mut p = Element::new("p");
                p.set_class_name(&format!("{FORM_ERROR} {HIDDEN}"));
                p.set_attr("role", "alert");
                let slot = doc.create_element(p);
                doc.append_child(form, slot);
                slot
            }
        };
        if let Some(el) = doc.element_mut(form) {
            el.set_attr("novalidate", "novalidate");
        }

        Some(Self {
            form,
            name,
            email,
            message,
            error_slot,
            recipient: recipient.to_string(),
        })
    }

    pub fn form(&self) -> NodeId {
        self.form
    }

    pub fn error_slot(&self) -> NodeId {
        self.error_slot
    }

    /// Fields present in the markup
    pub fn fields(&self) -> impl Iterator<Item = NodeId> + '_ {
        [self.name, self.email, self.message].into_iter().flatten()
    }

    /// Current values, `None` if any field is missing
    pub fn read(&self, doc: &Document) -> Option<ContactFields> {
        let value = |node: Option<NodeId>| doc.element(node?).map(|el| el.value.clone());
        Some(ContactFields {
            name: value(self.name)?,
            email: value(self.email)?,
            message: value(self.message)?,
        })
    }

    pub fn clear_error(&self) -> [DomPatch; 2] {
        error_view(self.error_slot, None)
    }

    /// Validate and build the patches for one submit
    pub fn submit(&self, doc: &Document) -> (SubmitOutcome, Vec<DomPatch>) {
        let Some(fields) = self.read(doc) else {
            return (SubmitOutcome::NotIntercepted, Vec::new());
        };

        let mut patches = self.clear_error().to_vec();
        match validate(&fields) {
            Err(err) => {
                tracing::debug!(%err, "contact form rejected");
                patches.extend(error_view(self.error_slot, Some(err)));
                (SubmitOutcome::Rejected(err), patches)
            }
            Ok(contact) => {
                let href = mailto_uri(&self.recipient, &contact);
                patches.push(DomPatch::Navigate { href: href.clone() });
                (SubmitOutcome::Accepted(href), patches)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use encore_dom::element;
    use proptest::prelude::*;

    const TO: &str = "zippora__@live.nl";

    fn fields(name: &str, email: &str, message: &str) -> ContactFields {
        ContactFields {
            name: name.into(),
            email: email.into(),
            message: message.into(),
        }
    }

    fn form_doc(with_message: bool) -> Document {
        let mut doc = Document::new();
        let root = doc.root();
        let mut form = element("form")
            .id("contactForm")
            .child(element("input").attr("name", "name"))
            .child(element("input").attr("name", "email"));
        if with_message {
            form = form.child(element("textarea").attr("name", "message"));
        }
        doc.mount(root, element("section").id("contact").child(form));
        doc
    }

    fn fill(doc: &mut Document, name: &str, email: &str, message: &str) {
        let root = doc.root();
        for (field, value) in [("name", name), ("email", email), ("message", message)] {
            let node = doc.query_first(root, &Query::new().attr_eq("name", field)).unwrap();
            doc.element_mut(node).unwrap().value = value.to_string();
        }
    }

    #[test]
    fn test_rule_order() {
        assert_eq!(validate(&fields("", "", "")), Err(ValidationError::MissingName));
        assert_eq!(validate(&fields(" Jo ", "  ", "")), Err(ValidationError::MissingEmail));
        assert_eq!(validate(&fields("Jo", "not-an-email", "")), Err(ValidationError::InvalidEmail));
        assert_eq!(validate(&fields("Jo", "a@b.co", "\n")), Err(ValidationError::MissingMessage));
        let ok = validate(&fields(" Jo ", " a@b.co ", " hi ")).unwrap();
        assert_eq!((ok.name.as_str(), ok.email.as_str(), ok.message.as_str()), ("Jo", "a@b.co", "hi"));
    }

    #[test]
    fn test_email_shape() {
        for good in ["a@b.co", "first.last@sub.example.org", "x@y.z"] {
            assert!(is_valid_email(good), "{good}");
        }
        for bad in ["a@b", "@b.co", "a@.co", "a b@c.de", "a@@b.co", "a@b.", "plain"] {
            assert!(!is_valid_email(bad), "{bad}");
        }
    }

    #[test]
    fn test_mailto_encoding() {
        let contact = validate(&fields("Jo & Co", "a@b.co", "hi there\nbye")).unwrap();
        assert_eq!(
            mailto_uri(TO, &contact),
            "mailto:zippora__@live.nl?subject=Website%20message%20from%20Jo%20%26%20Co\
             &body=Name%3A%20Jo%20%26%20Co%0AEmail%3A%20a%40b.co%0A%0Ahi%20there%0Abye"
        );
    }

    #[test]
    fn test_component_encoding_keeps_marks() {
        assert_eq!(encode_component("O'Brien (drums)!*"), "O'Brien%20(drums)!*");
        assert_eq!(encode_component("100%21 ~-_."), "100%2521%20~-_.");
        assert_eq!(encode_component("Zoë"), "Zo%C3%AB");

        let contact = validate(&fields("O'Brien", "a@b.co", "hi")).unwrap();
        assert!(mailto_uri(TO, &contact).contains("subject=Website%20message%20from%20O'Brien&"));
    }

    #[test]
    fn test_setup_creates_error_slot() {
        let mut doc = form_doc(true);
        let form = ContactForm::setup(&mut doc, TO).unwrap();
        let slot = doc.element(form.error_slot()).unwrap();
        assert_eq!(slot.tag, "p");
        assert!(slot.has_class(FORM_ERROR) && slot.has_class(HIDDEN));
        assert_eq!(slot.attr("role"), Some("alert"));
        assert_eq!(doc.parent(form.error_slot()), Some(form.form()));
        assert_eq!(doc.element(form.form()).unwrap().attr("novalidate"), Some("novalidate"));
        assert_eq!(form.fields().count(), 3);

        // A second setup reuses the slot
        let again = ContactForm::setup(&mut doc, TO).unwrap();
        assert_eq!(again.error_slot(), form.error_slot());
    }

    #[test]
    fn test_submit_flow() {
        let mut doc = form_doc(true);
        let form = ContactForm::setup(&mut doc, TO).unwrap();

        fill(&mut doc, "Jo", "not-an-email", "hi");
        let (outcome, patches) = form.submit(&doc);
        doc.apply(patches);
        assert_eq!(outcome, SubmitOutcome::Rejected(ValidationError::InvalidEmail));
        let slot = doc.element(form.error_slot()).unwrap();
        assert_eq!(slot.text, "Please enter a valid email.");
        assert!(!slot.has_class(HIDDEN));
        assert_eq!(doc.location(), None);

        doc.apply(form.clear_error());
        let slot = doc.element(form.error_slot()).unwrap();
        assert!(slot.text.is_empty() && slot.has_class(HIDDEN));

        fill(&mut doc, "Jo", "a@b.co", "hi");
        let (outcome, patches) = form.submit(&doc);
        doc.apply(patches);
        let SubmitOutcome::Accepted(href) = outcome else {
            panic!("expected mailto, got {outcome:?}");
        };
        assert!(href.starts_with("mailto:zippora__@live.nl?subject="));
        assert!(href.contains("Jo") && href.contains("a%40b.co") && href.contains("hi"));
        assert_eq!(doc.location(), Some(href.as_str()));
    }

    #[test]
    fn test_missing_field_not_intercepted() {
        let mut doc = form_doc(false);
        let form = ContactForm::setup(&mut doc, TO).unwrap();
        assert_eq!(form.fields().count(), 2);
        let (outcome, patches) = form.submit(&doc);
        assert_eq!(outcome, SubmitOutcome::NotIntercepted);
        assert!(!outcome.is_intercepted());
        assert!(patches.is_empty());
    }

    #[test]
    fn test_no_form() {
        let mut doc = Document::new();
        assert!(ContactForm::setup(&mut doc, TO).is_none());
    }

    proptest! {
        #[test]
        fn test_blank_name_always_first(
            name in "[ \t\n]{0,4}",
            email in ".{0,12}",
            message in ".{0,12}",
        ) {
            prop_assert_eq!(
                validate(&fields(&name, &email, &message)),
                Err(ValidationError::MissingName)
            );
        }

        #[test]
        fn test_accepted_mailto_has_no_raw_separators(
            name in "[A-Za-z&=?#]{1,8}",
            message in "[A-Za-z &=?#\n]{1,16}",
        ) {
            prop_assume!(!message.trim().is_empty());
            let contact = validate(&fields(&name, "a@b.co", &message)).unwrap();
            let uri = mailto_uri(TO, &contact);
            let query = uri.split_once('?').unwrap().1;
            prop_assert_eq!(query.matches('&').count(), 1);
            prop_assert!(!query.contains('#') && !query.contains('\n'));
        }
    }
}
