//! Validate, format and send one enquiry.

use super::mailer::{MailSender, compose};
use super::model::{EnquiryRequest, EnquiryType};
use crate::error::{EnquiryError, MailError};

/// Run an enquiry through type check, validation and delivery.
///
/// The type and fields are checked before the relay is looked at, so a bad
/// request is reported as such even when no relay is configured. No retries:
/// a relay failure is returned to the caller.
pub async fn dispatch_enquiry(
    mailer: Option<&dyn MailSender>,
    req: &EnquiryRequest,
) -> Result<EnquiryType, EnquiryError> {
    let kind = req.enquiry_type()?;
    req.validate(kind)?;

    let mailer = mailer.ok_or(MailError::NotConfigured)?;
    let mail = compose(kind, req);
    mailer.send(mail).await?;

    tracing::info!(enquiry_type = %kind, "Enquiry dispatched");
    Ok(kind)
}
