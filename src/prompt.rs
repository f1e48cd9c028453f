/// Build the instruction text sent to an upstream model for a support
/// reply. Subject and message are embedded verbatim; the character budget
/// is stated in natural language so the model is nudged toward compliance.
/// Callers that need a hard guarantee must still truncate afterwards.
pub fn support_reply_prompt(subject: &str, message: &str, char_budget: usize) -> String {
    format!(
        "As a customer support agent, please provide a professional and helpful \
         response to the following customer query.\n\n\
         IMPORTANT: Your response MUST be under {char_budget} characters total.\n\n\
         Ticket Subject: {subject}\n\
         Customer Message: {message}\n\n\
         Provide a concise, empathetic, and solution-oriented response. \
         Keep it professional, customer-friendly, and within the character limit."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn embeds_ticket_fields_verbatim() {
        let prompt = support_reply_prompt("Billing Question", "I was charged twice", 250);
        assert!(prompt.contains("Ticket Subject: Billing Question"));
        assert!(prompt.contains("Customer Message: I was charged twice"));
    }

    #[test]
    fn states_audience_and_budget() {
        let prompt = support_reply_prompt("Login", "Cannot reset password", 500);
        assert!(prompt.contains("customer support agent"));
        assert!(prompt.contains("under 500 characters"));
    }

    #[test]
    fn forwards_empty_fields_unchanged() {
        let prompt = support_reply_prompt("", "", 255);
        assert!(prompt.contains("Ticket Subject: \n"));
        assert!(prompt.contains("under 255 characters"));
    }
}
