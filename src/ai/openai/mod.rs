pub mod client;
pub mod extract;
pub mod responses;
pub mod types;

pub use extract::extract_text;
pub use responses::OpenAiResponsesClient;
