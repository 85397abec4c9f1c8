use kindaccess_core_contact_impl::ContactServiceImpl;
use kindaccess_email_impl::{template::TemplateEmailServiceImpl, EmailServiceImpl};
use kindaccess_templates_impl::TemplateServiceImpl;

pub type RestServer = kindaccess_api_rest::RestServer<Contact>;

pub type Contact = ContactServiceImpl<TemplateEmail>;

pub type TemplateEmail = TemplateEmailServiceImpl<Email, Template>;
pub type Email = EmailServiceImpl;
pub type Template = TemplateServiceImpl;
