use regex::Regex;
use std::{fmt, future::Future, sync::LazyLock, time::Duration};
use thiserror::Error;
use url::Url;

pub const MESSAGE_TIMEOUT: Duration = Duration::from_secs(5);

static EMAIL_PATTERN: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^[^\s@]+@[^\s@]+\.[^\s@]+$").expect("email pattern is a valid regex")
});

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Field {
    Name,
    Email,
    Subject,
    Message,
}

impl Field {
    pub const ALL: [Self; 4] = [Self::Name, Self::Email, Self::Subject, Self::Message];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Name => "name",
            Self::Email => "email",
            Self::Subject => "subject",
            Self::Message => "message",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct ContactFields {
    pub name: String,
    pub email: String,
    pub subject: String,
    pub message: String,
}

impl ContactFields {
    pub fn get(&self, field: Field) -> &str {
        match field {
            Field::Name => &self.name,
            Field::Email => &self.email,
            Field::Subject => &self.subject,
            Field::Message => &self.message,
        }
    }

    pub fn set(&mut self, field: Field, value: String) {
        match field {
            Field::Name => self.name = value,
            Field::Email => self.email = value,
            Field::Subject => self.subject = value,
            Field::Message => self.message = value,
        }
    }

    pub fn pairs(&self) -> [(&'static str, &str); 4] {
        Field::ALL.map(|field| (field.as_str(), self.get(field)))
    }
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("{0} must not be blank")]
    Blank(Field),
    #[error("email address is not valid")]
    Email,
}

#[derive(Debug, Error, PartialEq, Eq)]
pub enum SubmitError {
    #[error("no contact endpoint is configured")]
    NoEndpoint,
    #[error("contact endpoint answered with status {0}")]
    Status(u16),
    #[error("contact request failed: {0}")]
    Transport(String),
}

pub fn validate(fields: &ContactFields) -> Result<(), ValidationError> {
    if let Some(field) = Field::ALL
        .into_iter()
        .find(|field| fields.get(*field).trim().is_empty())
    {
        return Err(ValidationError::Blank(field));
    }

    if !EMAIL_PATTERN.is_match(&fields.email) {
        return Err(ValidationError::Email);
    }

    Ok(())
}

#[derive(Debug, PartialEq, Eq)]
pub enum Submission {
    Send(ContactFields),
    Invalid(ValidationError),
    AlreadySending,
}

/// `Idle -> Submitting -> Succeeded | Failed -> Idle`; the way back to idle
/// goes through `expire`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum FormPhase {
    Idle,
    Submitting,
    Succeeded,
    Failed,
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Notice {
    Success,
    Failure,
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ContactForm {
    fields: ContactFields,
    phase: FormPhase,
    notice: Option<Notice>,
    ticket: u64,
}

impl Default for ContactForm {
    fn default() -> Self {
        Self {
            fields: ContactFields::default(),
            phase: FormPhase::Idle,
            notice: None,
            ticket: 0,
        }
    }
}

impl ContactForm {
    pub fn fields(&self) -> &ContactFields {
        &self.fields
    }

    pub fn set_field(&mut self, field: Field, value: String) {
        self.fields.set(field, value);
    }

    pub fn is_loading(&self) -> bool {
        self.phase == FormPhase::Submitting
    }

    pub fn notice(&self) -> Option<Notice> {
        self.notice
    }

    pub fn notice_ticket(&self) -> u64 {
        self.ticket
    }

    /// A submit while a request is in flight changes nothing. Invalid input
    /// shows the failure notice and sends nothing.
    pub fn submit(&mut self) -> Submission {
        if self.phase == FormPhase::Submitting {
            return Submission::AlreadySending;
        }

        if let Err(error) = validate(&self.fields) {
            self.phase = FormPhase::Idle;
            self.show(Notice::Failure);
            return Submission::Invalid(error);
        }

        self.phase = FormPhase::Submitting;
        self.notice = None;
        Submission::Send(self.fields.clone())
    }

    pub fn resolve(&mut self, outcome: &Result<(), SubmitError>) -> bool {
        if self.phase != FormPhase::Submitting {
            return false;
        }

        match outcome {
            Ok(()) => {
                self.phase = FormPhase::Succeeded;
                self.fields = ContactFields::default();
                self.show(Notice::Success);
            }
            Err(_) => {
                self.phase = FormPhase::Failed;
                self.show(Notice::Failure);
            }
        }
        true
    }

    pub fn expire(&mut self, ticket: u64) -> bool {
        if ticket != self.ticket || self.notice.is_none() {
            return false;
        }

        self.notice = None;
        if self.phase != FormPhase::Submitting {
            self.phase = FormPhase::Idle;
        }
        true
    }

    fn show(&mut self, notice: Notice) {
        self.ticket += 1;
        self.notice = Some(notice);
    }
}

pub trait Transport {
    fn post_form(
        &self,
        endpoint: &Url,
        fields: &ContactFields,
    ) -> impl Future<Output = Result<(), SubmitError>>;
}

pub async fn deliver<T: Transport>(
    transport: &T,
    endpoint: Option<&Url>,
    fields: &ContactFields,
) -> Result<(), SubmitError> {
    let endpoint = endpoint.ok_or(SubmitError::NoEndpoint)?;
    transport.post_form(endpoint, fields).await
}

#[cfg(target_arch = "wasm32")]
pub mod web {
    use super::{ContactFields, SubmitError, Transport};
    use gloo_net::http::Request;
    use std::future::Future;
    use url::Url;
    use web_sys::FormData;

    /// Only the status code decides success.
    pub struct FetchTransport;

    impl Transport for FetchTransport {
        fn post_form(
            &self,
            endpoint: &Url,
            fields: &ContactFields,
        ) -> impl Future<Output = Result<(), SubmitError>> {
            let endpoint = endpoint.to_string();
            let fields = fields.clone();

            async move {
                let form = FormData::new()
                    .map_err(|error| SubmitError::Transport(format!("{error:?}")))?;
                for (name, value) in fields.pairs() {
                    form.append_with_str(name, value)
                        .map_err(|error| SubmitError::Transport(format!("{error:?}")))?;
                }

                let response = Request::post(&endpoint)
                    .header("Accept", "application/json")
                    .body(form)
                    .map_err(|error| SubmitError::Transport(error.to_string()))?
                    .send()
                    .await
                    .map_err(|error| SubmitError::Transport(error.to_string()))?;

                if response.ok() {
                    Ok(())
                } else {
                    Err(SubmitError::Status(response.status()))
                }
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::{Cell, RefCell};

    struct FakeTransport {
        outcome: Result<(), SubmitError>,
        posts: Cell<usize>,
        last: RefCell<Option<(String, ContactFields)>>,
    }

    impl FakeTransport {
        fn answering(outcome: Result<(), SubmitError>) -> Self {
            Self {
                outcome,
                posts: Cell::new(0),
                last: RefCell::new(None),
            }
        }
    }

    impl Transport for FakeTransport {
        async fn post_form(
            &self,
            endpoint: &Url,
            fields: &ContactFields,
        ) -> Result<(), SubmitError> {
            self.posts.set(self.posts.get() + 1);
            *self.last.borrow_mut() = Some((endpoint.to_string(), fields.clone()));
            match &self.outcome {
                Ok(()) => Ok(()),
                Err(SubmitError::Status(status)) => Err(SubmitError::Status(*status)),
                Err(_) => Err(SubmitError::Transport("connection reset".to_string())),
            }
        }
    }

    impl ContactForm {
        fn phase(&self) -> FormPhase {
            self.phase
        }

        fn submit_valid(&mut self) -> ContactFields {
            match self.submit() {
                Submission::Send(fields) => fields,
                other => panic!("expected a send, got {other:?}"),
            }
        }
    }

    fn endpoint() -> Url {
        Url::parse("https://forms.example.com/f/contact").expect("valid URL")
    }

    fn filled_form() -> ContactForm {
        let mut form = ContactForm::default();
        form.set_field(Field::Name, "Ada".to_string());
        form.set_field(Field::Email, "ada@example.com".to_string());
        form.set_field(Field::Subject, "Hello".to_string());
        form.set_field(Field::Message, "Nice portfolio.".to_string());
        form
    }

    async fn run_submission(form: &mut ContactForm, transport: &FakeTransport) {
        let endpoint = endpoint();
        if let Submission::Send(fields) = form.submit() {
            assert!(form.is_loading());
            let outcome = deliver(transport, Some(&endpoint), &fields).await;
            form.resolve(&outcome);
        }
    }

    #[test]
    fn blank_fields_fail_validation() {
        let fields = ContactFields {
            name: "  ".to_string(),
            email: "a@b.co".to_string(),
            subject: "S".to_string(),
            message: "M".to_string(),
        };

        assert_eq!(validate(&fields), Err(ValidationError::Blank(Field::Name)));
    }

    #[test]
    fn email_needs_local_part_at_and_dotted_domain() {
        let mut fields = filled_form().fields().clone();

        for bad in ["bad", "a@b", "@b.co", "a@.", "a b@c.de", "a@b@c.de"] {
            fields.email = bad.to_string();
            assert_eq!(validate(&fields), Err(ValidationError::Email), "{bad}");
        }

        fields.email = "a@b.co".to_string();
        assert_eq!(validate(&fields), Ok(()));
    }

    #[tokio::test]
    async fn invalid_input_shows_error_without_posting() {
        let transport = FakeTransport::answering(Ok(()));
        let mut form = ContactForm::default();
        form.set_field(Field::Name, "A".to_string());
        form.set_field(Field::Email, "bad".to_string());
        form.set_field(Field::Subject, "S".to_string());
        form.set_field(Field::Message, "M".to_string());

        run_submission(&mut form, &transport).await;

        assert_eq!(transport.posts.get(), 0);
        assert_eq!(form.phase(), FormPhase::Idle);
        assert_eq!(form.notice(), Some(Notice::Failure));
        assert_eq!(form.fields().email, "bad");
    }

    #[tokio::test]
    async fn ok_response_clears_fields_and_shows_success() {
        let transport = FakeTransport::answering(Ok(()));
        let mut form = filled_form();

        run_submission(&mut form, &transport).await;

        assert_eq!(transport.posts.get(), 1);
        let (posted_to, posted) = transport.last.borrow().clone().expect("one post recorded");
        assert_eq!(posted_to, "https://forms.example.com/f/contact");
        assert_eq!(posted.name, "Ada");
        assert_eq!(form.phase(), FormPhase::Succeeded);
        assert_eq!(form.notice(), Some(Notice::Success));
        assert_eq!(form.fields(), &ContactFields::default());
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn failed_response_keeps_fields_and_shows_error() {
        let transport = FakeTransport::answering(Err(SubmitError::Status(500)));
        let mut form = filled_form();

        run_submission(&mut form, &transport).await;

        assert_eq!(transport.posts.get(), 1);
        assert_eq!(form.phase(), FormPhase::Failed);
        assert_eq!(form.notice(), Some(Notice::Failure));
        assert_eq!(form.fields().subject, "Hello");
        assert!(!form.is_loading());
    }

    #[tokio::test]
    async fn missing_endpoint_is_reported_as_failure() {
        let transport = FakeTransport::answering(Ok(()));
        let mut form = filled_form();

        let fields = form.submit_valid();
        let outcome = deliver(&transport, None, &fields).await;
        form.resolve(&outcome);

        assert_eq!(outcome, Err(SubmitError::NoEndpoint));
        assert_eq!(transport.posts.get(), 0);
        assert_eq!(form.notice(), Some(Notice::Failure));
    }

    #[tokio::test]
    async fn notice_hides_after_timeout_and_form_returns_to_idle() {
        let transport = FakeTransport::answering(Ok(()));
        let mut form = filled_form();
        run_submission(&mut form, &transport).await;

        assert!(form.expire(form.notice_ticket()));

        assert_eq!(form.notice(), None);
        assert_eq!(form.phase(), FormPhase::Idle);
    }

    #[test]
    fn stale_timer_does_not_hide_a_newer_notice() {
        let mut form = ContactForm::default();
        let _ = form.submit();
        let first = form.notice_ticket();
        let _ = form.submit();

        assert!(!form.expire(first));
        assert_eq!(form.notice(), Some(Notice::Failure));
        assert!(form.expire(form.notice_ticket()));
    }

    #[test]
    fn second_submit_while_sending_changes_nothing() {
        let mut form = filled_form();
        form.submit_valid();
        let ticket = form.notice_ticket();

        assert_eq!(form.submit(), Submission::AlreadySending);
        assert!(form.is_loading());
        assert_eq!(form.notice(), None);
        assert_eq!(form.notice_ticket(), ticket);
    }

    #[test]
    fn invalid_submit_reports_the_first_problem() {
        let mut form = filled_form();
        form.set_field(Field::Email, "nope".to_string());

        assert_eq!(form.submit(), Submission::Invalid(ValidationError::Email));
        assert!(!form.is_loading());
    }

    #[test]
    fn resolve_without_pending_request_is_ignored() {
        let mut form = filled_form();

        assert!(!form.resolve(&Ok(())));
        assert_eq!(form.fields().name, "Ada");
    }

    #[test]
    fn pairs_follow_field_order() {
        let form = filled_form();

        let names: Vec<&str> = form
            .fields()
            .pairs()
            .iter()
            .map(|(name, _)| *name)
            .collect();

        assert_eq!(names, vec!["name", "email", "subject", "message"]);
    }
}
