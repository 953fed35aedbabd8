//! Enquiry handling: the mail relay behind the site's contact forms and the
//! chatbot's lead submissions.

pub mod dispatch;
pub mod mailer;
pub mod model;
pub mod routes;

pub use dispatch::dispatch_enquiry;
pub use mailer::{EnquiryMail, MailSender, SmtpConfig, SmtpMailer};
pub use model::{EnquiryRequest, EnquiryResponse, EnquiryType};
pub use routes::{EnquiryRouteState, enquiry_routes};
