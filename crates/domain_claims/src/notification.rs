//! Approval notification composition
//!
//! Renders the email queued for the claimant when a claim is approved. The
//! rendered message is stored in the notification outbox in the same
//! transaction as the approval and delivered later by the dispatcher.

/// A rendered notification, ready for the outbox
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClaimNotification {
    pub recipient: String,
    pub subject: String,
    pub body: String,
}

impl ClaimNotification {
    /// Builds the approval notice for a claimant
    pub fn approval(claimant_name: &str, claimant_email: &str, item_title: &str) -> Self {
        let subject = format!("Your claim for \"{item_title}\" has been approved");
        let body = format!(
            "Hi {claimant_name},\n\n\
             Good news: an administrator has approved your claim for \
             \"{item_title}\".\n\n\
             Please visit the campus lost & found desk with your student ID \
             to pick up the item. Bring any proof of ownership you mentioned \
             in your claim.\n\n\
             Campus Lost & Found"
        );
        Self {
            recipient: claimant_email.to_string(),
            subject,
            body,
        }
    }
}
