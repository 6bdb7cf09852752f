// Services layer for business logic
// Services own the request lifecycle; handlers only validate and translate

pub mod message;

pub use message::MessageService;
