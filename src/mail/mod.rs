//! mail
//!
//! Local message construction and rendering helpers.
//!
//! Gmail's send endpoint takes a full RFC822 message, base64url-encoded;
//! [`rfc822`] builds those. [`html`] turns HTML message bodies into plain
//! text for terminal display.

pub mod html;
pub mod rfc822;

pub use html::strip_html;
pub use rfc822::{encode_raw, Attachment, MessageBuilder};
