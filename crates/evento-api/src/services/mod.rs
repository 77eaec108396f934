// Services layer for business logic
// Services own the operation semantics, calling the store through its trait

pub mod event;

pub use event::EventService;
