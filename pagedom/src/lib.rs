pub mod element;
pub mod event;
pub mod query;

pub use element::{find_element, find_element_mut, Content, Element, HIDDEN_CLASS};
pub use event::Event;
pub use query::{ancestry, closest, query_all, query_first, walk_mut};
