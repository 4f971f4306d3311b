//! Service layer modules for the remote parser service.
//!
//! Contains the document-upload client and the question-answering client.
//! The two clients settle independently and never share a lifecycle flag.

pub mod ai_client;
pub mod parser_client;

pub use ai_client::AiClient;
pub use parser_client::ParserClient;
