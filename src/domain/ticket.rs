/// The two ticket fields the reply generators consume. Empty values are
/// forwarded to the model as-is, not rejected.
#[derive(Debug, Clone)]
pub struct TicketFields {
    pub subject: String,
    pub message: String,
}

impl TicketFields {
    pub fn new(subject: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            subject: subject.into(),
            message: message.into(),
        }
    }
}
